//! # Longitudinal Reinforcement Layout
//!
//! Generates bar centroids for a symmetric perimeter pattern:
//!
//! ```text
//!   o-----o-----o      nx = 3 bars on top and bottom faces (corners included)
//!   |           |
//!   o           o      ny = 1 intermediate bar on each side face
//!   |           |
//!   o-----o-----o
//! ```
//!
//! Bar centroids sit at `cover + stirrup + bar/2` from each concrete face.

use std::collections::HashSet;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::section::CrossSection;
use crate::errors::{CalcError, CalcResult};
use crate::materials::bar_area_mm2;

/// Minimum number of longitudinal bars in a tied rectangular column (C.10.9.2)
pub const MIN_BAR_COUNT: usize = 4;

/// Bars closer than this (after rounding) are treated as the same bar
const DEDUP_RESOLUTION_MM: f64 = 0.1;

/// One longitudinal bar, positioned relative to the section centroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub x_mm: f64,
    pub y_mm: f64,
    pub area_mm2: f64,
}

impl Bar {
    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x_mm, self.y_mm)
    }
}

/// Ordered, read-only set of bars for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementLayout {
    bars: Vec<Bar>,
}

impl ReinforcementLayout {
    /// Generate the bar pattern.
    ///
    /// # Arguments
    ///
    /// * `nx` - bars along the top and bottom faces, corners included
    /// * `ny` - intermediate bars along each side face, corners excluded
    ///
    /// # Errors
    ///
    /// `InvalidReinforcement` when `nx < 2`, when fewer than 4 bars result, or
    /// when the cover and diameters leave no room inside the section.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nsr_core::calculations::{CrossSection, ReinforcementLayout};
    ///
    /// let section = CrossSection::new(400.0, 500.0, 28.0, 420.0).unwrap();
    /// let layout = ReinforcementLayout::generate(&section, 40.0, 12.7, 19.1, 3, 1).unwrap();
    /// assert_eq!(layout.len(), 8);
    /// ```
    pub fn generate(
        section: &CrossSection,
        clear_cover_mm: f64,
        stirrup_diameter_mm: f64,
        bar_diameter_mm: f64,
        nx: u32,
        ny: u32,
    ) -> CalcResult<Self> {
        let expected = 2 * nx as usize + 2 * ny as usize;
        if nx < 2 {
            return Err(CalcError::invalid_reinforcement(format!(
                "bars per face along b must be at least 2 (got {nx}); total bar count {expected} is insufficient"
            )));
        }
        if expected < MIN_BAR_COUNT {
            return Err(CalcError::invalid_reinforcement(format!(
                "total bar count {expected} is below the minimum of {MIN_BAR_COUNT}"
            )));
        }

        let edge_offset = clear_cover_mm + stirrup_diameter_mm + bar_diameter_mm / 2.0;
        let x_ext = section.b_mm / 2.0 - edge_offset;
        let y_ext = section.h_mm / 2.0 - edge_offset;
        if x_ext <= 0.0 || y_ext <= 0.0 {
            return Err(CalcError::invalid_reinforcement(format!(
                "cover + stirrup + bar/2 = {edge_offset:.1} mm leaves no room for bars in a {:.0} x {:.0} mm section",
                section.b_mm, section.h_mm
            )));
        }

        let area = bar_area_mm2(bar_diameter_mm);
        let mut bars = Vec::with_capacity(expected);

        // Top and bottom faces
        let x_step = 2.0 * x_ext / f64::from(nx - 1);
        for i in 0..nx {
            let x = -x_ext + f64::from(i) * x_step;
            bars.push(Bar { x_mm: x, y_mm: -y_ext, area_mm2: area });
            bars.push(Bar { x_mm: x, y_mm: y_ext, area_mm2: area });
        }

        // Side faces, between the corner bars
        let y_step = 2.0 * y_ext / (f64::from(ny) + 1.0);
        for i in 0..ny {
            let y = -y_ext + f64::from(i + 1) * y_step;
            bars.push(Bar { x_mm: -x_ext, y_mm: y, area_mm2: area });
            bars.push(Bar { x_mm: x_ext, y_mm: y, area_mm2: area });
        }

        let bars = dedup_bars(bars);
        if bars.len() != expected {
            tracing::warn!(
                unique = bars.len(),
                expected,
                "unique bar count differs from the requested pattern; check nx/ny"
            );
        }
        if bars.len() < MIN_BAR_COUNT {
            return Err(CalcError::invalid_reinforcement(format!(
                "only {} distinct bars after removing duplicates (minimum {MIN_BAR_COUNT})",
                bars.len()
            )));
        }

        Ok(ReinforcementLayout { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Total steel area Ast (mm²)
    pub fn total_area_mm2(&self) -> f64 {
        self.bars.iter().map(|b| b.area_mm2).sum()
    }

    /// Gross steel ratio ρg = Ast / (b·h)
    pub fn steel_ratio(&self, section: &CrossSection) -> f64 {
        self.total_area_mm2() / section.gross_area_mm2()
    }
}

/// Drop bars whose rounded coordinates repeat an earlier bar, keeping order.
fn dedup_bars(bars: Vec<Bar>) -> Vec<Bar> {
    let mut seen = HashSet::new();
    bars.into_iter()
        .filter(|bar| {
            let key = (
                (bar.x_mm / DEDUP_RESOLUTION_MM).round() as i64,
                (bar.y_mm / DEDUP_RESOLUTION_MM).round() as i64,
            );
            seen.insert(key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn section() -> CrossSection {
        CrossSection::new(400.0, 500.0, 28.0, 420.0).unwrap()
    }

    #[test]
    fn test_eight_bar_pattern() {
        let layout = ReinforcementLayout::generate(&section(), 40.0, 12.7, 19.1, 3, 1).unwrap();
        assert_eq!(layout.len(), 8);

        // Edge offset 40 + 12.7 + 9.55 = 62.25 mm
        let x_ext = 200.0 - 62.25;
        let y_ext = 250.0 - 62.25;
        let first = layout.bars()[0];
        assert!((first.x_mm + x_ext).abs() < 1e-9);
        assert!((first.y_mm + y_ext).abs() < 1e-9);

        // Side bars at mid-height
        let side: Vec<_> = layout.iter().skip(6).collect();
        assert_eq!(side.len(), 2);
        assert!(side.iter().all(|b| b.y_mm.abs() < 1e-9));
        assert!((side[0].x_mm + x_ext).abs() < 1e-9);
        assert!((side[1].x_mm - x_ext).abs() < 1e-9);
    }

    #[test]
    fn test_four_corner_bars() {
        let layout = ReinforcementLayout::generate(&section(), 40.0, 9.5, 25.4, 2, 0).unwrap();
        assert_eq!(layout.len(), 4);
        let area = layout.total_area_mm2();
        assert!((area - 4.0 * bar_area_mm2(25.4)).abs() < 1e-9);
    }

    #[test]
    fn test_steel_ratio() {
        let s = section();
        let layout = ReinforcementLayout::generate(&s, 40.0, 12.7, 19.1, 3, 1).unwrap();
        // 8 × 286.52 / 200 000 ≈ 0.01146
        assert!((layout.steel_ratio(&s) - 0.01146).abs() < 1e-4);
    }

    #[test]
    fn test_rejects_single_bar_face() {
        let err = ReinforcementLayout::generate(&section(), 40.0, 12.7, 19.1, 1, 0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_REINFORCEMENT");
        assert!(err.to_string().contains("bar count"));
    }

    #[test]
    fn test_rejects_cover_larger_than_section() {
        let small = CrossSection::new(100.0, 100.0, 28.0, 420.0).unwrap();
        let err = ReinforcementLayout::generate(&small, 40.0, 12.7, 19.1, 2, 0).unwrap_err();
        assert!(err.to_string().contains("no room"));
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let a = Bar { x_mm: 10.0, y_mm: 5.0, area_mm2: 100.0 };
        let b = Bar { x_mm: 10.01, y_mm: 5.02, area_mm2: 200.0 };
        let c = Bar { x_mm: -10.0, y_mm: 5.0, area_mm2: 100.0 };
        let out = dedup_bars(vec![a, b, c]);
        assert_eq!(out, vec![a, c]);
    }

    proptest! {
        #[test]
        fn generated_bars_stay_inside_section(nx in 2u32..7, ny in 0u32..6) {
            let s = section();
            let layout = ReinforcementLayout::generate(&s, 40.0, 9.5, 15.9, nx, ny).unwrap();
            prop_assert_eq!(layout.len(), (2 * nx + 2 * ny) as usize);
            for bar in layout.iter() {
                prop_assert!(bar.x_mm.abs() < s.b_mm / 2.0);
                prop_assert!(bar.y_mm.abs() < s.h_mm / 2.0);
            }
        }
    }
}
