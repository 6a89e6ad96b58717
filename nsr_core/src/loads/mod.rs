//! Load combinations and column load cases per NSR-10
//!
//! Service actions on a column (axial force and biaxial moments per load
//! type) are factored into design demands that can be checked against an
//! interaction surface.
//!
//! # Overview
//!
//! - [`LoadType`] - Load categories entering column combinations (D, L, Lr, E)
//! - [`LoadCase`] - Scalar load value per type
//! - [`ColumnLoadCase`] - Axial force and moments per type for one column
//! - [`LoadCombination`] - Factors for one code combination
//! - [`LimitState`] - Service vs ultimate combination sets
//!
//! # Example
//!
//! ```
//! use nsr_core::loads::{ColumnLoadCase, LimitState, LoadType, SeismicCombinationOptions};
//!
//! let case = ColumnLoadCase::new("C-1 ground floor")
//!     .with_action(LoadType::Dead, 850.0, 12.0, 4.0)
//!     .with_action(LoadType::Live, 300.0, 5.0, 2.0)
//!     .with_action(LoadType::Seismic, 0.0, 95.0, 40.0);
//!
//! let combos = LimitState::Ultimate.combinations(&SeismicCombinationOptions::default());
//! for (name, action) in case.factored_all(&combos) {
//!     println!("{name}: Pu = {:.0} kN, Mux = {:.1} kN·m", action.axial_kn, action.moment_x_knm);
//! }
//! ```

pub mod combinations;
pub mod load_types;

pub use combinations::{
    find_governing_combination, find_minimum_combination, nsr10_service_combinations,
    nsr10_ultimate_combinations, LoadCombination, SeismicCombinationOptions, F1_RESIDENTIAL,
};
pub use load_types::LoadType;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Which set of combinations to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LimitState {
    /// Unfactored combinations for deflection and long-term checks (B.2.3)
    Service,
    /// Factored combinations for strength design (B.2.4, A.3.5.1)
    #[default]
    Ultimate,
}

impl LimitState {
    pub fn display_name(&self) -> &'static str {
        match self {
            LimitState::Service => "Service (B.2.3)",
            LimitState::Ultimate => "Ultimate (B.2.4 / A.3.5.1)",
        }
    }

    /// Seismic options only affect the ultimate set.
    pub fn combinations(&self, seismic: &SeismicCombinationOptions) -> Vec<LoadCombination> {
        match self {
            LimitState::Service => nsr10_service_combinations(),
            LimitState::Ultimate => nsr10_ultimate_combinations(seismic),
        }
    }
}

impl std::fmt::Display for LimitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A collection of load values by type for a specific loading scenario
///
/// # Example
/// ```
/// use nsr_core::loads::{LoadCase, LoadType};
///
/// let case = LoadCase::new("Roof")
///     .with_load(LoadType::Dead, 120.0)
///     .with_load(LoadType::LiveRoof, 25.0);
///
/// assert_eq!(case.get(LoadType::Dead), 120.0);
/// assert_eq!(case.get(LoadType::Live), 0.0);
/// ```
///
/// # JSON Format
/// ```json
/// { "label": "Roof", "loads": { "Dead": 120.0, "LiveRoof": 25.0 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    pub label: String,

    /// Load values keyed by type (units depend on context)
    pub loads: BTreeMap<LoadType, f64>,
}

impl LoadCase {
    pub fn new(label: impl Into<String>) -> Self {
        LoadCase {
            label: label.into(),
            loads: BTreeMap::new(),
        }
    }

    /// Add or update a load value (builder pattern)
    pub fn with_load(mut self, load_type: LoadType, value: f64) -> Self {
        self.loads.insert(load_type, value);
        self
    }

    pub fn set_load(&mut self, load_type: LoadType, value: f64) {
        self.loads.insert(load_type, value);
    }

    /// Get the load value for a type, defaulting to 0.0 if not set
    pub fn get(&self, load_type: LoadType) -> f64 {
        self.loads.get(&load_type).copied().unwrap_or(0.0)
    }

    pub fn has(&self, load_type: LoadType) -> bool {
        self.loads.contains_key(&load_type)
    }

    /// Gravity loads must be non-negative; seismic effects may carry either sign.
    pub fn validate(&self) -> CalcResult<()> {
        for (load_type, value) in &self.loads {
            if load_type.is_gravity() && *value < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("load_{}", load_type.code()),
                    value.to_string(),
                    format!("{} cannot be negative", load_type.description()),
                ));
            }
        }
        Ok(())
    }

    /// Apply all combinations and find the governing (maximum) result
    pub fn governing_load(&self, combinations: &[LoadCombination]) -> (f64, String) {
        find_governing_combination(self, combinations)
    }
}

impl Default for LoadCase {
    fn default() -> Self {
        LoadCase::new("Unnamed")
    }
}

/// Axial force and biaxial moments acting on a column.
///
/// Compression positive, kN and kN·m, same sign convention as the
/// interaction surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnAction {
    pub axial_kn: f64,
    pub moment_x_knm: f64,
    pub moment_y_knm: f64,
}

impl ColumnAction {
    pub fn new(axial_kn: f64, moment_x_knm: f64, moment_y_knm: f64) -> Self {
        ColumnAction {
            axial_kn,
            moment_x_knm,
            moment_y_knm,
        }
    }

    /// Resultant biaxial moment √(Mx² + My²)
    pub fn resultant_moment_knm(&self) -> f64 {
        self.moment_x_knm.hypot(self.moment_y_knm)
    }

    fn scaled(&self, factor: f64) -> ColumnAction {
        ColumnAction::new(self.axial_kn * factor, self.moment_x_knm * factor, self.moment_y_knm * factor)
    }

    fn plus(&self, other: &ColumnAction) -> ColumnAction {
        ColumnAction::new(
            self.axial_kn + other.axial_kn,
            self.moment_x_knm + other.moment_x_knm,
            self.moment_y_knm + other.moment_y_knm,
        )
    }
}

/// Service actions on one column, per load type.
///
/// # JSON Format
/// ```json
/// {
///   "label": "C-1",
///   "actions": {
///     "Dead": { "axial_kn": 850.0, "moment_x_knm": 12.0, "moment_y_knm": 4.0 },
///     "Seismic": { "axial_kn": 0.0, "moment_x_knm": 95.0, "moment_y_knm": 40.0 }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnLoadCase {
    pub label: String,
    pub actions: BTreeMap<LoadType, ColumnAction>,
}

impl ColumnLoadCase {
    pub fn new(label: impl Into<String>) -> Self {
        ColumnLoadCase {
            label: label.into(),
            actions: BTreeMap::new(),
        }
    }

    /// Add or update the service action of one load type (builder pattern)
    pub fn with_action(mut self, load_type: LoadType, axial_kn: f64, moment_x_knm: f64, moment_y_knm: f64) -> Self {
        self.actions
            .insert(load_type, ColumnAction::new(axial_kn, moment_x_knm, moment_y_knm));
        self
    }

    pub fn get(&self, load_type: LoadType) -> ColumnAction {
        self.actions.get(&load_type).copied().unwrap_or_default()
    }

    /// Gravity axial loads must be non-negative.
    pub fn validate(&self) -> CalcResult<()> {
        for (load_type, action) in &self.actions {
            if load_type.is_gravity() && action.axial_kn < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("axial_{}", load_type.code()),
                    action.axial_kn.to_string(),
                    format!("{} axial force cannot be negative", load_type.description()),
                ));
            }
        }
        Ok(())
    }

    /// Factored demand (Pu, Mux, Muy) for one combination.
    pub fn factored(&self, combination: &LoadCombination) -> ColumnAction {
        combination
            .factors
            .iter()
            .map(|(load_type, factor)| self.get(*load_type).scaled(*factor))
            .fold(ColumnAction::default(), |acc, a| acc.plus(&a))
    }

    /// Factored demands for every combination, with combination names.
    ///
    /// Directional (seismic) actions are also applied reversed, giving a
    /// second entry suffixed with `'` for combinations that contain them.
    pub fn factored_all(&self, combinations: &[LoadCombination]) -> Vec<(String, ColumnAction)> {
        let mut out = Vec::with_capacity(combinations.len() * 2);
        for combo in combinations {
            out.push((combo.name.clone(), self.factored(combo)));
            if combo.factors.keys().any(LoadType::is_directional) {
                let reversed = LoadCombination {
                    name: format!("{}'", combo.name),
                    equation: combo.equation.clone(),
                    factors: combo
                        .factors
                        .iter()
                        .map(|(lt, f)| (*lt, if lt.is_directional() { -f } else { *f }))
                        .collect(),
                };
                out.push((reversed.name.clone(), self.factored(&reversed)));
            }
        }
        out
    }
}
