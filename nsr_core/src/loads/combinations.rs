//! NSR-10 Load Combinations
//!
//! Service combinations per B.2.3 and ultimate (strength) combinations per
//! B.2.4 and A.3.5.1.
//!
//! ## Seismic Combinations
//!
//! E is the design seismic effect (already divided by R). The vertical
//! component Ev = 0.2·SDS·D = 0.5·Aa·Fa·D is folded into the dead-load
//! factor of both seismic combinations when requested:
//!
//! ```text
//! (1.2 + Ev)D + f1·L + E
//! (0.9 - Ev)D + E
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::load_types::LoadType;
use super::LoadCase;

/// Live-load factor in seismic combinations for residential occupancy (A.3.5.1)
pub const F1_RESIDENTIAL: f64 = 0.5;

/// A load combination with factors for each load type
///
/// # Example
/// ```
/// use nsr_core::loads::{LoadCombination, LoadCase, LoadType};
///
/// let combo = LoadCombination::new("U-2", "1.2D + 1.6L")
///     .with_factor(LoadType::Dead, 1.2)
///     .with_factor(LoadType::Live, 1.6);
///
/// let case = LoadCase::new("Floor")
///     .with_load(LoadType::Dead, 100.0)
///     .with_load(LoadType::Live, 50.0);
///
/// assert!((combo.apply(&case) - 200.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Combination identifier (e.g., "S-1", "U-4")
    pub name: String,

    /// Human-readable equation for display (e.g., "1.2D + 1.6L + 0.5Lr")
    pub equation: String,

    /// Load factors keyed by load type
    pub factors: BTreeMap<LoadType, f64>,
}

impl LoadCombination {
    /// Create a new load combination
    pub fn new(name: impl Into<String>, equation: impl Into<String>) -> Self {
        LoadCombination {
            name: name.into(),
            equation: equation.into(),
            factors: BTreeMap::new(),
        }
    }

    /// Add a load factor (builder pattern)
    pub fn with_factor(mut self, load_type: LoadType, factor: f64) -> Self {
        self.factors.insert(load_type, factor);
        self
    }

    /// Apply this combination to a LoadCase, returning the total factored load
    ///
    /// Load types absent from either side contribute nothing.
    pub fn apply(&self, case: &LoadCase) -> f64 {
        self.factors
            .iter()
            .map(|(load_type, factor)| factor * case.get(*load_type))
            .sum()
    }

    /// Get the factor for a specific load type (0.0 if not in combination)
    pub fn get_factor(&self, load_type: LoadType) -> f64 {
        self.factors.get(&load_type).copied().unwrap_or(0.0)
    }
}

/// Switches for the seismic part of the ultimate combinations.
///
/// ## JSON Example
///
/// ```json
/// { "include_seismic": true, "live_factor": 0.5, "include_vertical": false, "aa": 0.0, "fa": 1.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeismicCombinationOptions {
    /// Add the A.3.5.1 seismic combinations
    pub include_seismic: bool,

    /// f1, live-load factor in seismic combinations
    pub live_factor: f64,

    /// Fold the vertical seismic component Ev into the dead-load factor
    pub include_vertical: bool,

    /// Aa, effective peak acceleration coefficient
    pub aa: f64,

    /// Fa, short-period site coefficient
    pub fa: f64,
}

impl Default for SeismicCombinationOptions {
    fn default() -> Self {
        SeismicCombinationOptions {
            include_seismic: true,
            live_factor: F1_RESIDENTIAL,
            include_vertical: false,
            aa: 0.0,
            fa: 1.0,
        }
    }
}

impl SeismicCombinationOptions {
    /// Vertical seismic factor on D, or `None` when it does not apply.
    pub fn vertical_factor(&self) -> Option<f64> {
        if !self.include_vertical {
            return None;
        }
        if self.aa > 0.0 && self.fa > 0.0 {
            Some(0.5 * self.aa * self.fa)
        } else {
            tracing::warn!(aa = self.aa, fa = self.fa, "Aa or Fa not positive; vertical seismic Ev ignored");
            None
        }
    }
}

/// Generate NSR-10 service combinations (B.2.3)
///
/// # Example
/// ```
/// use nsr_core::loads::nsr10_service_combinations;
///
/// let combos = nsr10_service_combinations();
/// assert_eq!(combos[0].equation, "D + L");
/// ```
pub fn nsr10_service_combinations() -> Vec<LoadCombination> {
    vec![
        LoadCombination::new("S-1", "D + L")
            .with_factor(LoadType::Dead, 1.0)
            .with_factor(LoadType::Live, 1.0),
        // Long-term effects
        LoadCombination::new("S-2", "D").with_factor(LoadType::Dead, 1.0),
        LoadCombination::new("S-3", "D + Lr")
            .with_factor(LoadType::Dead, 1.0)
            .with_factor(LoadType::LiveRoof, 1.0),
    ]
}

/// Generate NSR-10 ultimate combinations (B.2.4, A.3.5.1)
///
/// The gravity combinations with L and Lr are only produced when the seismic
/// live factor is positive, matching the column workflow where f1 = 0 means
/// no occupancy live load.
///
/// # Example
/// ```
/// use nsr_core::loads::{nsr10_ultimate_combinations, SeismicCombinationOptions};
///
/// let combos = nsr10_ultimate_combinations(&SeismicCombinationOptions::default());
/// let names: Vec<_> = combos.iter().map(|c| c.equation.as_str()).collect();
/// assert_eq!(names, ["1.4D", "1.2D + 1.6L + 0.5Lr", "1.2D + 0.5L + 1.6Lr", "1.2D + 0.5L + E", "0.9D + E"]);
/// ```
pub fn nsr10_ultimate_combinations(options: &SeismicCombinationOptions) -> Vec<LoadCombination> {
    let mut combos = vec![LoadCombination::new("U-1", "1.4D").with_factor(LoadType::Dead, 1.4)];

    let f1 = options.live_factor;
    if f1 > 0.0 {
        combos.push(
            LoadCombination::new("U-2", "1.2D + 1.6L + 0.5Lr")
                .with_factor(LoadType::Dead, 1.2)
                .with_factor(LoadType::Live, 1.6)
                .with_factor(LoadType::LiveRoof, 0.5),
        );
        combos.push(
            LoadCombination::new("U-3", "1.2D + 0.5L + 1.6Lr")
                .with_factor(LoadType::Dead, 1.2)
                .with_factor(LoadType::Live, 0.5)
                .with_factor(LoadType::LiveRoof, 1.6),
        );
    }

    if options.include_seismic {
        let ev = options.vertical_factor().unwrap_or(0.0);
        let d_upper = 1.2 + ev;
        let d_lower = 0.9 - ev;
        let live_term = if f1 > 0.0 { format!(" + {f1}L") } else { String::new() };

        let (upper_eq, lower_eq) = if options.include_vertical {
            (format!("({d_upper:.2})D{live_term} + E"), format!("({d_lower:.2})D + E"))
        } else {
            (format!("1.2D{live_term} + E"), "0.9D + E".to_string())
        };

        let mut upper = LoadCombination::new(format!("U-{}", combos.len() + 1), upper_eq)
            .with_factor(LoadType::Dead, round3(d_upper))
            .with_factor(LoadType::Seismic, 1.0);
        if f1 > 0.0 {
            upper = upper.with_factor(LoadType::Live, f1);
        }
        combos.push(upper);

        combos.push(
            LoadCombination::new(format!("U-{}", combos.len() + 1), lower_eq)
                .with_factor(LoadType::Dead, round3(d_lower))
                .with_factor(LoadType::Seismic, 1.0),
        );
    }

    combos
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Find the governing (maximum) load combination
///
/// # Example
/// ```
/// use nsr_core::loads::{LoadCase, LoadType, nsr10_service_combinations, find_governing_combination};
///
/// let case = LoadCase::new("Floor")
///     .with_load(LoadType::Dead, 20.0)
///     .with_load(LoadType::Live, 50.0);
///
/// let (max_load, combo_name) = find_governing_combination(&case, &nsr10_service_combinations());
/// assert_eq!(max_load, 70.0);
/// assert_eq!(combo_name, "S-1");
/// ```
pub fn find_governing_combination(case: &LoadCase, combinations: &[LoadCombination]) -> (f64, String) {
    combinations
        .iter()
        .map(|combo| (combo.apply(case), combo.name.clone()))
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .unwrap_or((0.0, String::new()))
}

/// Find the minimum load combination result (governs net tension in columns)
pub fn find_minimum_combination(case: &LoadCase, combinations: &[LoadCombination]) -> (f64, String) {
    combinations
        .iter()
        .map(|combo| (combo.apply(case), combo.name.clone()))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .unwrap_or((0.0, String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_combinations() {
        let combos = nsr10_service_combinations();
        let equations: Vec<_> = combos.iter().map(|c| c.equation.as_str()).collect();
        assert_eq!(equations, ["D + L", "D", "D + Lr"]);
    }

    #[test]
    fn test_ultimate_without_live_or_seismic() {
        let options = SeismicCombinationOptions {
            include_seismic: false,
            live_factor: 0.0,
            ..Default::default()
        };
        let combos = nsr10_ultimate_combinations(&options);
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].get_factor(LoadType::Dead), 1.4);
    }

    #[test]
    fn test_seismic_without_live_term() {
        let options = SeismicCombinationOptions {
            live_factor: 0.0,
            ..Default::default()
        };
        let combos = nsr10_ultimate_combinations(&options);
        assert_eq!(combos.len(), 3);
        assert_eq!(combos[1].equation, "1.2D + E");
        assert_eq!(combos[1].get_factor(LoadType::Live), 0.0);
        assert_eq!(combos[2].equation, "0.9D + E");
    }

    #[test]
    fn test_vertical_seismic_factors() {
        let options = SeismicCombinationOptions {
            include_vertical: true,
            aa: 0.2,
            fa: 1.2,
            ..Default::default()
        };
        // Ev = 0.5 × 0.2 × 1.2 = 0.12
        let combos = nsr10_ultimate_combinations(&options);
        let upper = &combos[3];
        let lower = &combos[4];
        assert_eq!(upper.get_factor(LoadType::Dead), 1.32);
        assert_eq!(lower.get_factor(LoadType::Dead), 0.78);
        assert_eq!(upper.equation, "(1.32)D + 0.5L + E");
        assert_eq!(lower.equation, "(0.78)D + E");
        assert_eq!(upper.get_factor(LoadType::Live), 0.5);
    }

    #[test]
    fn test_vertical_seismic_ignored_without_coefficients() {
        let options = SeismicCombinationOptions {
            include_vertical: true,
            aa: 0.0,
            ..Default::default()
        };
        assert_eq!(options.vertical_factor(), None);
        let combos = nsr10_ultimate_combinations(&options);
        assert_eq!(combos[3].get_factor(LoadType::Dead), 1.2);
        assert_eq!(combos[4].get_factor(LoadType::Dead), 0.9);
    }

    #[test]
    fn test_combination_names_are_sequential() {
        let combos = nsr10_ultimate_combinations(&SeismicCombinationOptions::default());
        for (i, combo) in combos.iter().enumerate() {
            assert_eq!(combo.name, format!("U-{}", i + 1));
        }
    }

    #[test]
    fn test_find_governing_and_minimum() {
        let case = LoadCase::new("Column C-1")
            .with_load(LoadType::Dead, 500.0)
            .with_load(LoadType::Live, 200.0)
            .with_load(LoadType::Seismic, -400.0);

        let combos = nsr10_ultimate_combinations(&SeismicCombinationOptions::default());
        let (max_load, max_name) = find_governing_combination(&case, &combos);
        // 1.2 × 500 + 1.6 × 200 = 920
        assert!((max_load - 920.0).abs() < 1e-9);
        assert_eq!(max_name, "U-2");

        let (min_load, min_name) = find_minimum_combination(&case, &combos);
        // 0.9 × 500 - 400 = 50
        assert!((min_load - 50.0).abs() < 1e-9);
        assert_eq!(min_name, "U-5");
    }

    #[test]
    fn test_combination_serialization() {
        let combo = LoadCombination::new("U-1", "1.4D").with_factor(LoadType::Dead, 1.4);
        let json = serde_json::to_string(&combo).unwrap();
        let parsed: LoadCombination = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, combo);
    }
}
