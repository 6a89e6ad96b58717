//! # Biaxial Interaction Sweep
//!
//! Traces the φPn–φMnx–φMny failure surface of a rectangular column by
//! sweeping the neutral-axis depth `c` and orientation `θ`. For every sample
//! the concrete block and each bar are integrated under the plane-sections
//! assumption:
//!
//! ```text
//! εs = εcu · (c − d) / c          d = bar depth below the compressed fiber
//! fs = clamp(Es · εs, −fy, fy)
//! Pn  = Cc + Σ Fs
//! Mnx = Cc·ȳ + Σ Fs·y             Mny = Cc·x̄ + Σ Fs·x
//! ```
//!
//! φ comes from the largest tensile bar strain of the sample. Samples are
//! independent, so the sweep can fan out over rayon without changing the
//! output order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::compression_zone::{CompressionZone, NeutralAxisState};
use super::reinforcement::ReinforcementLayout;
use super::section::CrossSection;
use super::strength_reduction::{phi, PHI_COMPRESSION};
use crate::materials::{EPSILON_CU, ES_MPA, STRESS_BLOCK_INTENSITY};

/// Smallest neutral-axis depth in the sweep grid (mm)
pub const C_GRID_START_MM: f64 = 1e-3;

/// The grid extends to this multiple of the larger section dimension
pub const C_GRID_SPAN_FACTOR: f64 = 1.5;

/// Blocks shallower than this are skipped (mm)
pub const MIN_BLOCK_DEPTH_MM: f64 = 1e-3;

/// Code cap on axial capacity for tied columns: φPn,max = 0.80 φ Po (C.10.3.6.2)
pub const AXIAL_CAP_FACTOR: f64 = 0.80;

/// Permitted band for the gross steel ratio ρg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelRatioLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for SteelRatioLimits {
    /// 1 % to 6 % (C.10.9.1 allows 8 %, C.21.4.3.1 limits DMO/DES columns to 6 %)
    fn default() -> Self {
        SteelRatioLimits { min: 0.01, max: 0.06 }
    }
}

impl SteelRatioLimits {
    pub fn contains(&self, ratio: f64) -> bool {
        (self.min..=self.max).contains(&ratio)
    }
}

/// Algorithm switches for one sweep.
///
/// ## JSON Example
///
/// ```json
/// {
///   "compression_zone": "Polygon",
///   "deduct_displaced_concrete": true,
///   "include_tension": false,
///   "enforce_axial_cap": false,
///   "parallel": false,
///   "ratio_limits": { "min": 0.01, "max": 0.06 }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepOptions {
    /// Concrete block model
    pub compression_zone: CompressionZone,

    /// Remove the concrete stress carried by bars inside the block
    pub deduct_displaced_concrete: bool,

    /// Keep net-tension samples (Pn < 0)
    pub include_tension: bool,

    /// Drop samples with φPn above 0.80·φ·Po
    pub enforce_axial_cap: bool,

    /// Evaluate samples on the rayon thread pool
    pub parallel: bool,

    /// Permitted gross steel ratio band
    pub ratio_limits: SteelRatioLimits,
}

impl Default for SweepOptions {
    fn default() -> Self {
        SweepOptions {
            compression_zone: CompressionZone::Polygon,
            deduct_displaced_concrete: true,
            include_tension: false,
            enforce_axial_cap: false,
            parallel: false,
            ratio_limits: SteelRatioLimits::default(),
        }
    }
}

impl SweepOptions {
    /// Settings that reproduce the historical column sheets: axis-aligned
    /// block, no displaced-concrete deduction.
    pub fn legacy() -> Self {
        SweepOptions {
            compression_zone: CompressionZone::AxisAligned,
            deduct_displaced_concrete: false,
            ..SweepOptions::default()
        }
    }
}

/// One factored point of the failure surface.
///
/// Forces in N, moments in N·mm. `phi`, `epsilon_t`, `c_mm` and `theta_rad`
/// describe the sample that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityPoint {
    /// φ·Pn (N), compression positive
    pub axial_n: f64,
    /// φ·Mnx (N·mm)
    pub moment_x_nmm: f64,
    /// φ·Mny (N·mm)
    pub moment_y_nmm: f64,
    pub phi: f64,
    pub epsilon_t: f64,
    pub c_mm: f64,
    pub theta_rad: f64,
}

/// Nominal resultants of one sample before filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionResponse {
    pub pn_n: f64,
    pub mnx_nmm: f64,
    pub mny_nmm: f64,
    pub epsilon_t: f64,
    pub phi: f64,
}

/// Section, bars and constants shared by every sample of a sweep.
#[derive(Debug, Clone)]
pub struct SweepContext<'a> {
    pub section: &'a CrossSection,
    pub layout: &'a ReinforcementLayout,
    pub beta1: f64,
    pub options: SweepOptions,
    /// Pure axial capacity Po (N)
    pub po_n: f64,
    /// Code maximum φPn,max = 0.80 · 0.65 · Po (N)
    pub phi_pn_max_n: f64,
}

impl<'a> SweepContext<'a> {
    pub fn new(
        section: &'a CrossSection,
        layout: &'a ReinforcementLayout,
        beta1: f64,
        options: SweepOptions,
    ) -> Self {
        let po_n = crate::materials::pure_axial_capacity_n(
            section.fc_mpa,
            section.fy_mpa,
            section.gross_area_mm2(),
            layout.total_area_mm2(),
        );
        SweepContext {
            section,
            layout,
            beta1,
            options,
            po_n,
            phi_pn_max_n: AXIAL_CAP_FACTOR * PHI_COMPRESSION * po_n,
        }
    }

    /// Integrate forces for one neutral-axis state.
    ///
    /// Returns `None` when the stress block is too shallow to carry load.
    pub fn evaluate(&self, axis: &NeutralAxisState) -> Option<SectionResponse> {
        let a_mm = self.beta1 * axis.c_mm;
        if a_mm < MIN_BLOCK_DEPTH_MM {
            return None;
        }

        let zone = self.options.compression_zone;
        let fc = self.section.fc_mpa;
        let fy = self.section.fy_mpa;

        let block = zone.block(self.section, axis, a_mm);
        let cc_n = STRESS_BLOCK_INTENSITY * fc * block.area_mm2;
        let mut pn = cc_n;
        let mut mnx = cc_n * block.centroid.y;
        let mut mny = cc_n * block.centroid.x;
        let mut epsilon_t: f64 = 0.0;

        for bar in self.layout.iter() {
            let position = bar.position();
            let depth = zone.fiber_depth(self.section, axis, &position);
            let strain = EPSILON_CU * (axis.c_mm - depth) / axis.c_mm;
            let mut stress = (ES_MPA * strain).clamp(-fy, fy);
            if self.options.deduct_displaced_concrete && block.contains(&position) {
                stress -= STRESS_BLOCK_INTENSITY * fc;
            }

            let force = bar.area_mm2 * stress;
            pn += force;
            mnx += force * bar.y_mm;
            mny += force * bar.x_mm;

            if strain < 0.0 {
                epsilon_t = epsilon_t.max(-strain);
            }
        }

        Some(SectionResponse {
            pn_n: pn,
            mnx_nmm: mnx,
            mny_nmm: mny,
            epsilon_t,
            phi: phi(epsilon_t),
        })
    }

    /// Evaluate and filter one sample into a surface point.
    pub fn capacity_point(&self, axis: &NeutralAxisState) -> Option<CapacityPoint> {
        let response = self.evaluate(axis)?;
        if response.pn_n < 0.0 && !self.options.include_tension {
            return None;
        }
        let phi = response.phi;
        let axial_n = phi * response.pn_n;
        if self.options.enforce_axial_cap && axial_n > self.phi_pn_max_n {
            return None;
        }
        Some(CapacityPoint {
            axial_n,
            moment_x_nmm: phi * response.mnx_nmm,
            moment_y_nmm: phi * response.mny_nmm,
            phi,
            epsilon_t: response.epsilon_t,
            c_mm: axis.c_mm,
            theta_rad: axis.theta_rad,
        })
    }

    /// Run the full sweep over `grid`, preserving grid order.
    pub fn sweep(&self, grid: &[NeutralAxisState]) -> Vec<CapacityPoint> {
        if self.options.parallel {
            grid.par_iter().filter_map(|axis| self.capacity_point(axis)).collect()
        } else {
            grid.iter().filter_map(|axis| self.capacity_point(axis)).collect()
        }
    }
}

/// Neutral-axis depths from near zero to 1.5× the larger section dimension,
/// both ends included.
pub fn c_grid(section: &CrossSection, steps: usize) -> Vec<f64> {
    linspace(C_GRID_START_MM, section.max_dimension_mm() * C_GRID_SPAN_FACTOR, steps)
}

/// Orientations `k · 2π / steps` for `k` in `0..steps` (2π itself excluded).
pub fn theta_grid(steps: usize) -> Vec<f64> {
    let step = std::f64::consts::TAU / steps as f64;
    (0..steps).map(|k| k as f64 * step).collect()
}

/// Full sample grid, depth-major: every θ for the first c, then the next c.
pub fn sample_grid(section: &CrossSection, c_steps: usize, theta_steps: usize) -> Vec<NeutralAxisState> {
    let thetas = theta_grid(theta_steps);
    c_grid(section, c_steps)
        .into_iter()
        .flat_map(|c| thetas.iter().map(move |&theta| NeutralAxisState::new(c, theta)))
        .collect()
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = end;
            values
        }
    }
}
