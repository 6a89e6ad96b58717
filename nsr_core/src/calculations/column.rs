//! # Column Interaction Diagram
//!
//! Biaxial P-M-M interaction surface for tied rectangular columns per
//! NSR-10 Title C (C.9.3.2, C.10.2, C.10.3.6, C.10.9).
//!
//! ## Assumptions
//!
//! - Rectangular section, symmetric perimeter bar pattern
//! - Equivalent rectangular stress block, εcu = 0.003
//! - Elastic-perfectly-plastic steel, Es = 200 000 MPa
//! - Tied column: φ = 0.65 when compression-controlled, φPn,max = 0.80 φ Po
//!
//! ## Example
//!
//! ```rust
//! use nsr_core::calculations::column::{ColumnInput, generate_interaction_surface};
//! use nsr_core::calculations::SweepOptions;
//!
//! let input = ColumnInput {
//!     label: "C-1".to_string(),
//!     width_cm: 40.0,
//!     depth_cm: 50.0,
//!     clear_cover_cm: 4.0,
//!     stirrup_diameter_mm: 12.7,
//!     bar_diameter_mm: 19.1,
//!     bars_per_face_x: 3,
//!     bars_per_face_y_interior: 1,
//!     fc_mpa: 28.0,
//!     fy_mpa: 420.0,
//!     num_c_steps: 30,
//!     num_theta_steps: 36,
//! };
//!
//! let surface = generate_interaction_surface(&input, &SweepOptions::default()).unwrap();
//! let summary = surface.summary();
//! println!("φPn,max = {:.0} kN from {} points", summary.max_axial_kn, summary.point_count);
//! ```

use serde::{Deserialize, Serialize};

use super::compression_zone::CompressionZone;
use super::interaction::{sample_grid, CapacityPoint, SweepContext, SweepOptions};
use super::reinforcement::ReinforcementLayout;
use super::section::CrossSection;
use crate::errors::{CalcError, CalcResult};
use crate::materials::beta1;
use crate::units::{
    Centimeters, KiloNewtonMeters, KiloNewtons, Millimeters, NewtonMillimeters, Newtons, SquareCentimeters,
    SquareMillimeters,
};

fn default_c_steps() -> usize {
    30
}

fn default_theta_steps() -> usize {
    36
}

/// Input parameters for a column interaction diagram.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "C-1",
///   "width_cm": 40.0,
///   "depth_cm": 50.0,
///   "clear_cover_cm": 4.0,
///   "stirrup_diameter_mm": 12.7,
///   "bar_diameter_mm": 19.1,
///   "bars_per_face_x": 3,
///   "bars_per_face_y_interior": 1,
///   "fc_mpa": 28.0,
///   "fy_mpa": 420.0,
///   "num_c_steps": 30,
///   "num_theta_steps": 36
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInput {
    /// User label for this column (e.g., "C-1", "C-EjeA-N1")
    pub label: String,

    /// Section width b in cm (x direction)
    pub width_cm: f64,

    /// Section depth h in cm (y direction)
    pub depth_cm: f64,

    /// Clear cover to the stirrup in cm
    pub clear_cover_cm: f64,

    /// Stirrup (tie) diameter in mm
    pub stirrup_diameter_mm: f64,

    /// Longitudinal bar diameter in mm
    pub bar_diameter_mm: f64,

    /// Bars on each face parallel to x, corners included
    pub bars_per_face_x: u32,

    /// Intermediate bars on each face parallel to y, corners excluded
    pub bars_per_face_y_interior: u32,

    /// Concrete compressive strength f'c (MPa)
    pub fc_mpa: f64,

    /// Steel yield strength fy (MPa)
    pub fy_mpa: f64,

    /// Number of neutral-axis depth samples
    #[serde(default = "default_c_steps")]
    pub num_c_steps: usize,

    /// Number of neutral-axis orientation samples
    #[serde(default = "default_theta_steps")]
    pub num_theta_steps: usize,
}

impl ColumnInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("width_cm", self.width_cm, "Width must be positive"),
            ("depth_cm", self.depth_cm, "Depth must be positive"),
            ("clear_cover_cm", self.clear_cover_cm, "Clear cover must be positive"),
            ("stirrup_diameter_mm", self.stirrup_diameter_mm, "Stirrup diameter must be positive"),
            ("bar_diameter_mm", self.bar_diameter_mm, "Bar diameter must be positive"),
            ("fc_mpa", self.fc_mpa, "Concrete strength must be positive"),
            ("fy_mpa", self.fy_mpa, "Steel yield strength must be positive"),
        ];
        for (field, value, reason) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), reason));
            }
        }
        if self.num_c_steps == 0 {
            return Err(CalcError::invalid_input(
                "num_c_steps",
                "0",
                "At least one neutral-axis depth sample is required",
            ));
        }
        if self.num_theta_steps == 0 {
            return Err(CalcError::invalid_input(
                "num_theta_steps",
                "0",
                "At least one neutral-axis orientation sample is required",
            ));
        }
        Ok(())
    }

    /// Section in mm / MPa
    pub fn cross_section(&self) -> CalcResult<CrossSection> {
        let b: Millimeters = Centimeters(self.width_cm).into();
        let h: Millimeters = Centimeters(self.depth_cm).into();
        CrossSection::new(b.value(), h.value(), self.fc_mpa, self.fy_mpa)
    }

    /// Bar layout for this input
    pub fn reinforcement(&self, section: &CrossSection) -> CalcResult<ReinforcementLayout> {
        let cover: Millimeters = Centimeters(self.clear_cover_cm).into();
        ReinforcementLayout::generate(
            section,
            cover.value(),
            self.stirrup_diameter_mm,
            self.bar_diameter_mm,
            self.bars_per_face_x,
            self.bars_per_face_y_interior,
        )
    }

    /// Nominal bar count of the pattern, before deduplication
    pub fn nominal_bar_count(&self) -> usize {
        2 * self.bars_per_face_x as usize + 2 * self.bars_per_face_y_interior as usize
    }
}

/// Input parameters and derived quantities echoed back with a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceParams {
    pub width_cm: f64,
    pub depth_cm: f64,
    pub clear_cover_cm: f64,
    pub stirrup_diameter_mm: f64,
    pub bar_diameter_mm: f64,
    pub bars_per_face_x: u32,
    pub bars_per_face_y_interior: u32,
    /// Distinct bars actually placed
    pub bar_count: usize,
    /// Ast (mm²)
    pub total_steel_area_mm2: f64,
    pub fc_mpa: f64,
    pub fy_mpa: f64,
    /// ρg = Ast / Ag
    pub steel_ratio: f64,
    pub beta1: f64,
    /// Pure axial capacity Po (N)
    pub po_n: f64,
    /// Code maximum φPn,max (N)
    pub phi_pn_max_n: f64,
    pub compression_zone: CompressionZone,
}

/// Discrete φPn–φMnx–φMny failure surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionSurface {
    pub message: String,
    /// Points in sweep order (depth-major)
    pub points: Vec<CapacityPoint>,
    pub params: SurfaceParams,
}

/// Headline figures of a surface, in kN and kN·m, for reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSummary {
    pub point_count: usize,
    /// Largest φPn (kN)
    pub max_axial_kn: f64,
    /// Largest |φMnx| (kN·m)
    pub max_moment_x_knm: f64,
    /// Largest |φMny| (kN·m)
    pub max_moment_y_knm: f64,
    pub min_phi: f64,
    pub max_phi: f64,
    /// Ast (cm²)
    pub total_steel_area_cm2: f64,
    pub steel_ratio: f64,
}

impl InteractionSurface {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Summary statistics for the report collaborator.
    pub fn summary(&self) -> SurfaceSummary {
        let fold_max = |f: fn(&CapacityPoint) -> f64| self.points.iter().map(f).fold(f64::NEG_INFINITY, f64::max);
        let steel: SquareCentimeters = SquareMillimeters(self.params.total_steel_area_mm2).into();

        SurfaceSummary {
            point_count: self.points.len(),
            max_axial_kn: KiloNewtons::from(Newtons(fold_max(|p| p.axial_n))).value(),
            max_moment_x_knm: KiloNewtonMeters::from(NewtonMillimeters(fold_max(|p| p.moment_x_nmm.abs()))).value(),
            max_moment_y_knm: KiloNewtonMeters::from(NewtonMillimeters(fold_max(|p| p.moment_y_nmm.abs()))).value(),
            min_phi: self.points.iter().map(|p| p.phi).fold(f64::INFINITY, f64::min),
            max_phi: fold_max(|p| p.phi),
            total_steel_area_cm2: steel.value(),
            steel_ratio: self.params.steel_ratio,
        }
    }

    /// Points as (φPn kN, φMnx kN·m, φMny kN·m) for plotting.
    pub fn points_kn_knm(&self) -> Vec<(f64, f64, f64)> {
        self.points
            .iter()
            .map(|p| {
                (
                    KiloNewtons::from(Newtons(p.axial_n)).value(),
                    KiloNewtonMeters::from(NewtonMillimeters(p.moment_x_nmm)).value(),
                    KiloNewtonMeters::from(NewtonMillimeters(p.moment_y_nmm)).value(),
                )
            })
            .collect()
    }
}

/// Generate the biaxial interaction surface of a rectangular column.
///
/// Pure function: identical input and options give identical points in the
/// same order.
///
/// # Returns
///
/// * `Ok(InteractionSurface)` - points plus echoed parameters
/// * `Err(CalcError)` - invalid input, invalid bar pattern, steel ratio
///   outside `options.ratio_limits`, or an empty surface
pub fn generate_interaction_surface(input: &ColumnInput, options: &SweepOptions) -> CalcResult<InteractionSurface> {
    input.validate()?;

    let section = input.cross_section()?;
    let layout = input.reinforcement(&section)?;
    let total_steel = layout.total_area_mm2();
    let steel_ratio = layout.steel_ratio(&section);
    if !options.ratio_limits.contains(steel_ratio) {
        return Err(CalcError::steel_ratio_out_of_range(
            steel_ratio,
            options.ratio_limits.min,
            options.ratio_limits.max,
        ));
    }
    tracing::debug!(
        bars = layout.len(),
        total_steel_mm2 = total_steel,
        steel_ratio,
        "reinforcement"
    );

    let beta1 = beta1(section.fc_mpa);
    let ctx = SweepContext::new(&section, &layout, beta1, *options);
    let grid = sample_grid(&section, input.num_c_steps, input.num_theta_steps);
    let points = ctx.sweep(&grid);
    tracing::debug!(samples = grid.len(), points = points.len(), label = %input.label, "interaction sweep finished");

    if points.is_empty() {
        return Err(CalcError::NoValidPoints { samples: grid.len() });
    }

    let message = format!(
        "Diagram computed with {} points. {} used.",
        points.len(),
        options.compression_zone.display_name()
    );

    Ok(InteractionSurface {
        message,
        points,
        params: SurfaceParams {
            width_cm: input.width_cm,
            depth_cm: input.depth_cm,
            clear_cover_cm: input.clear_cover_cm,
            stirrup_diameter_mm: input.stirrup_diameter_mm,
            bar_diameter_mm: input.bar_diameter_mm,
            bars_per_face_x: input.bars_per_face_x,
            bars_per_face_y_interior: input.bars_per_face_y_interior,
            bar_count: layout.len(),
            total_steel_area_mm2: total_steel,
            fc_mpa: input.fc_mpa,
            fy_mpa: input.fy_mpa,
            steel_ratio,
            beta1,
            po_n: ctx.po_n,
            phi_pn_max_n: ctx.phi_pn_max_n,
            compression_zone: options.compression_zone,
        },
    })
}

/// Status-tagged record for callers that exchange JSON.
///
/// ## JSON Example
///
/// ```json
/// { "status": "Error", "message": "Invalid reinforcement: ...", "code": "INVALID_REINFORCEMENT", "hint": "Add more bars ..." }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum SurfaceResponse {
    #[serde(rename = "OK")]
    Ok {
        message: String,
        points: Vec<CapacityPoint>,
        params: SurfaceParams,
    },
    #[serde(rename = "Error")]
    Error { message: String, code: String, hint: String },
}

impl SurfaceResponse {
    pub fn is_ok(&self) -> bool {
        matches!(self, SurfaceResponse::Ok { .. })
    }

    pub fn status(&self) -> &'static str {
        match self {
            SurfaceResponse::Ok { .. } => "OK",
            SurfaceResponse::Error { .. } => "Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            SurfaceResponse::Ok { message, .. } | SurfaceResponse::Error { message, .. } => message,
        }
    }
}

impl From<CalcResult<InteractionSurface>> for SurfaceResponse {
    fn from(result: CalcResult<InteractionSurface>) -> Self {
        match result {
            Ok(surface) => SurfaceResponse::Ok {
                message: surface.message,
                points: surface.points,
                params: surface.params,
            },
            Err(err) => SurfaceResponse::Error {
                message: err.to_string(),
                code: err.error_code().to_string(),
                hint: err.hint().to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::pure_axial_capacity_n;
    use std::f64::consts::{PI, TAU};

    fn test_column() -> ColumnInput {
        ColumnInput {
            label: "Test Column".to_string(),
            width_cm: 40.0,
            depth_cm: 50.0,
            clear_cover_cm: 4.0,
            stirrup_diameter_mm: 12.7,
            bar_diameter_mm: 19.1,
            bars_per_face_x: 3,
            bars_per_face_y_interior: 1,
            fc_mpa: 28.0,
            fy_mpa: 420.0,
            num_c_steps: 30,
            num_theta_steps: 36,
        }
    }

    #[test]
    fn test_reference_column_produces_surface() {
        let surface = generate_interaction_surface(&test_column(), &SweepOptions::default()).unwrap();
        assert!(!surface.is_empty());
        assert!(surface.points.iter().all(|p| p.axial_n >= 0.0));
        assert_eq!(surface.params.bar_count, 8);
        assert!((surface.params.steel_ratio - 0.01146).abs() < 1e-4);
        assert!(surface.message.contains(&surface.len().to_string()));

        let response = SurfaceResponse::from(Ok(surface));
        assert_eq!(response.status(), "OK");
    }

    #[test]
    fn test_legacy_mode_produces_surface() {
        let surface = generate_interaction_surface(&test_column(), &SweepOptions::legacy()).unwrap();
        assert!(!surface.is_empty());
        assert!(surface.points.iter().all(|p| p.axial_n >= 0.0));
        assert!(surface.message.contains("Axis-aligned"));
    }

    #[test]
    fn test_rejects_two_bars() {
        let mut col = test_column();
        col.bars_per_face_x = 1;
        col.bars_per_face_y_interior = 0;
        let result = generate_interaction_surface(&col, &SweepOptions::default());
        let response = SurfaceResponse::from(result);
        assert_eq!(response.status(), "Error");
        assert!(response.message().contains("bar count"));
    }

    #[test]
    fn test_rejects_excessive_steel_ratio() {
        let col = ColumnInput {
            width_cm: 20.0,
            depth_cm: 20.0,
            clear_cover_cm: 2.5,
            stirrup_diameter_mm: 9.5,
            bar_diameter_mm: 32.3,
            bars_per_face_x: 4,
            bars_per_face_y_interior: 2,
            ..test_column()
        };
        let err = generate_interaction_surface(&col, &SweepOptions::default()).unwrap_err();
        assert_eq!(err.error_code(), "STEEL_RATIO_OUT_OF_RANGE");
        let response = SurfaceResponse::from(Err(err));
        assert!(response.message().contains("Steel ratio"));
    }

    #[test]
    fn test_rejects_light_steel_ratio() {
        let col = ColumnInput {
            width_cm: 80.0,
            depth_cm: 80.0,
            bars_per_face_x: 2,
            bars_per_face_y_interior: 0,
            bar_diameter_mm: 15.9,
            ..test_column()
        };
        let err = generate_interaction_surface(&col, &SweepOptions::default()).unwrap_err();
        assert!(matches!(err, CalcError::SteelRatioOutOfRange { ratio, .. } if ratio < 0.01));
    }

    #[test]
    fn test_rejects_invalid_input() {
        let mut col = test_column();
        col.fc_mpa = 0.0;
        let err = generate_interaction_surface(&col, &SweepOptions::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut col = test_column();
        col.num_theta_steps = 0;
        assert!(generate_interaction_surface(&col, &SweepOptions::default()).is_err());
    }

    #[test]
    fn test_symmetry_under_half_turn() {
        let surface = generate_interaction_surface(&test_column(), &SweepOptions::default()).unwrap();
        let mut matched = 0;
        for p in &surface.points {
            let mirrored_theta = (p.theta_rad + PI) % TAU;
            let mirror = surface.points.iter().find(|q| {
                q.c_mm == p.c_mm && {
                    let d = (q.theta_rad - mirrored_theta).abs();
                    d < 1e-9 || (TAU - d) < 1e-9
                }
            });
            if let Some(q) = mirror {
                matched += 1;
                let scale = 1.0 + p.axial_n.abs();
                assert!((q.axial_n - p.axial_n).abs() < 1e-6 * scale);
                assert!((q.moment_x_nmm + p.moment_x_nmm).abs() < 1e-6 * (1.0 + p.moment_x_nmm.abs()) + 1.0);
                assert!((q.moment_y_nmm + p.moment_y_nmm).abs() < 1e-6 * (1.0 + p.moment_y_nmm.abs()) + 1.0);
            }
        }
        assert!(matched as f64 >= 0.95 * surface.len() as f64);
    }

    #[test]
    fn test_pure_axial_bound() {
        let surface = generate_interaction_surface(&test_column(), &SweepOptions::default()).unwrap();
        let params = &surface.params;
        let ag = params.width_cm * params.depth_cm * 100.0;
        let po = pure_axial_capacity_n(params.fc_mpa, params.fy_mpa, ag, params.total_steel_area_mm2);
        assert!((params.po_n - po).abs() < 1e-6);

        let max_phi_pn = surface.points.iter().map(|p| p.axial_n).fold(0.0, f64::max);
        let max_pn = surface
            .points
            .iter()
            .map(|p| p.axial_n / p.phi)
            .fold(0.0, f64::max);
        assert!(max_pn <= po * (1.0 + 1e-9));
        assert!(max_phi_pn <= 0.65 * po * (1.0 + 1e-9));
        // The deepest samples put most of the section in compression
        assert!(max_pn > 0.8 * po);
    }

    #[test]
    fn test_legacy_axial_bound_within_displaced_concrete() {
        let surface = generate_interaction_surface(&test_column(), &SweepOptions::legacy()).unwrap();
        let params = &surface.params;
        let max_pn = surface
            .points
            .iter()
            .map(|p| p.axial_n / p.phi)
            .fold(0.0, f64::max);
        // No deduction: Pn may exceed Po by at most the concrete displaced by the bars
        let allowance = 0.85 * params.fc_mpa * params.total_steel_area_mm2;
        assert!(max_pn <= params.po_n + allowance + 1e-6);
    }

    #[test]
    fn test_phi_non_increasing_with_depth() {
        let options = SweepOptions {
            include_tension: true,
            ..SweepOptions::default()
        };
        for legacy in [false, true] {
            let opts = if legacy {
                SweepOptions {
                    include_tension: true,
                    ..SweepOptions::legacy()
                }
            } else {
                options
            };
            let surface = generate_interaction_surface(&test_column(), &opts).unwrap();
            let thetas = [0.0, surface.points.iter().map(|p| p.theta_rad).fold(0.0, f64::max)];
            for theta in thetas {
                let mut by_depth: Vec<_> = surface.points.iter().filter(|p| p.theta_rad == theta).collect();
                by_depth.sort_by(|a, b| a.c_mm.total_cmp(&b.c_mm));
                assert!(by_depth.len() > 10);
                for pair in by_depth.windows(2) {
                    assert!(pair[1].phi <= pair[0].phi + 1e-12);
                    assert!(pair[1].epsilon_t <= pair[0].epsilon_t + 1e-15);
                }
            }
        }
    }

    #[test]
    fn test_determinism_and_parallel_parity() {
        let col = test_column();
        let a = generate_interaction_surface(&col, &SweepOptions::default()).unwrap();
        let b = generate_interaction_surface(&col, &SweepOptions::default()).unwrap();
        assert_eq!(a.points, b.points);

        let parallel = SweepOptions {
            parallel: true,
            ..SweepOptions::default()
        };
        let c = generate_interaction_surface(&col, &parallel).unwrap();
        assert_eq!(a.points, c.points);
    }

    #[test]
    fn test_summary() {
        let surface = generate_interaction_surface(&test_column(), &SweepOptions::default()).unwrap();
        let summary = surface.summary();
        assert_eq!(summary.point_count, surface.len());
        assert!(summary.max_axial_kn > 0.0);
        assert!(summary.max_moment_x_knm > 0.0);
        assert!(summary.max_moment_y_knm > 0.0);
        // h > b: strong-axis moment capacity exceeds weak-axis capacity
        assert!(summary.max_moment_x_knm > summary.max_moment_y_knm);
        assert!(summary.min_phi >= 0.65 && summary.max_phi <= 0.90);
        assert!((summary.total_steel_area_cm2 - 22.92).abs() < 0.01);

        let plotted = surface.points_kn_knm();
        assert_eq!(plotted.len(), surface.len());
        assert!((plotted[0].0 - surface.points[0].axial_n / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_response_serialization() {
        let response = SurfaceResponse::from(generate_interaction_surface(&test_column(), &SweepOptions::default()));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.starts_with("{\"status\":\"OK\""));
        let back: SurfaceResponse = serde_json::from_str(&json).unwrap();
        assert!(back.is_ok());
        assert_eq!(back.message(), response.message());
    }

    #[test]
    fn test_empty_surface_is_reported() {
        // A single depth sample sits at the grid start, too shallow to carry load
        let mut col = test_column();
        col.num_c_steps = 1;
        let result = generate_interaction_surface(&col, &SweepOptions::default());
        assert!(matches!(result, Err(CalcError::NoValidPoints { samples: 36 })));

        let response = SurfaceResponse::from(result);
        assert_eq!(response.status(), "Error");
        assert!(response.message().contains("No valid points"));
        assert!(matches!(response, SurfaceResponse::Error { ref code, .. } if code == "NO_VALID_POINTS"));
    }

    #[test]
    fn test_nominal_bar_count_does_not_overflow() {
        let col = ColumnInput {
            bars_per_face_x: u32::MAX,
            bars_per_face_y_interior: u32::MAX,
            ..test_column()
        };
        assert_eq!(col.nominal_bar_count(), 4 * u32::MAX as usize);
    }

    #[test]
    fn test_input_defaults_from_json() {
        let json = r#"{
            "label": "C-2",
            "width_cm": 40.0,
            "depth_cm": 40.0,
            "clear_cover_cm": 4.0,
            "stirrup_diameter_mm": 9.5,
            "bar_diameter_mm": 19.1,
            "bars_per_face_x": 3,
            "bars_per_face_y_interior": 1,
            "fc_mpa": 21.0,
            "fy_mpa": 420.0
        }"#;
        let input: ColumnInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.num_c_steps, 30);
        assert_eq!(input.num_theta_steps, 36);
        assert_eq!(input.nominal_bar_count(), 8);
    }
}
