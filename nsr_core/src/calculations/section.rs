//! Rectangular column cross-section.
//!
//! Coordinates are measured from the section centroid: `x` along the width
//! `b`, `y` along the depth `h`.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Concrete envelope and material strengths, in mm and MPa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    /// Width along x (mm)
    pub b_mm: f64,
    /// Depth along y (mm)
    pub h_mm: f64,
    /// Specified concrete compressive strength f'c (MPa)
    pub fc_mpa: f64,
    /// Specified yield strength of longitudinal steel fy (MPa)
    pub fy_mpa: f64,
}

impl CrossSection {
    /// Build a section, rejecting non-positive (or non-finite) values.
    pub fn new(b_mm: f64, h_mm: f64, fc_mpa: f64, fy_mpa: f64) -> CalcResult<Self> {
        for (field, value) in [("b_mm", b_mm), ("h_mm", h_mm), ("fc_mpa", fc_mpa), ("fy_mpa", fy_mpa)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        Ok(CrossSection {
            b_mm,
            h_mm,
            fc_mpa,
            fy_mpa,
        })
    }

    /// Gross area Ag = b·h (mm²)
    pub fn gross_area_mm2(&self) -> f64 {
        self.b_mm * self.h_mm
    }

    /// Larger of the two dimensions (mm)
    pub fn max_dimension_mm(&self) -> f64 {
        self.b_mm.max(self.h_mm)
    }

    /// Corners in counter-clockwise order, starting bottom-left.
    pub fn corners(&self) -> [Vector2<f64>; 4] {
        let hx = self.b_mm / 2.0;
        let hy = self.h_mm / 2.0;
        [
            Vector2::new(-hx, -hy),
            Vector2::new(hx, -hy),
            Vector2::new(hx, hy),
            Vector2::new(-hx, hy),
        ]
    }

    /// Largest projection of the section onto `direction` (unit vector).
    ///
    /// This is the coordinate of the most-compressed fiber when `direction`
    /// points toward the compression face.
    pub fn extreme_projection(&self, direction: &Vector2<f64>) -> f64 {
        direction.x.abs() * self.b_mm / 2.0 + direction.y.abs() * self.h_mm / 2.0
    }
}
