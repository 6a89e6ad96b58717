//! Reinforcing bars (NSR-10 C.3.5)
//!
//! Bar designations follow the imperial numbering used on Colombian drawings
//! (#3 to #10). Nominal diameters are the values offered on the column form.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::errors::CalcError;

/// Modulus of elasticity of reinforcement, MPa (C.8.5.2)
pub const ES_MPA: f64 = 200_000.0;

/// Default yield strength of deformed bars, MPa (Grade 60 / 420)
pub const DEFAULT_FY_MPA: f64 = 420.0;

/// Standard deformed bar sizes.
///
/// ## JSON
///
/// Serialized as the drawing designation: `"#6"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RebarSize {
    #[serde(rename = "#3")]
    No3,
    #[serde(rename = "#4")]
    No4,
    #[serde(rename = "#5")]
    No5,
    #[serde(rename = "#6")]
    No6,
    #[serde(rename = "#7")]
    No7,
    #[serde(rename = "#8")]
    No8,
    #[serde(rename = "#9")]
    No9,
    #[serde(rename = "#10")]
    No10,
}

impl RebarSize {
    /// All sizes, smallest first
    pub const ALL: [RebarSize; 8] = [
        RebarSize::No3,
        RebarSize::No4,
        RebarSize::No5,
        RebarSize::No6,
        RebarSize::No7,
        RebarSize::No8,
        RebarSize::No9,
        RebarSize::No10,
    ];

    /// Nominal diameter in mm
    pub fn diameter_mm(&self) -> f64 {
        match self {
            RebarSize::No3 => 9.5,
            RebarSize::No4 => 12.7,
            RebarSize::No5 => 15.9,
            RebarSize::No6 => 19.1,
            RebarSize::No7 => 22.2,
            RebarSize::No8 => 25.4,
            RebarSize::No9 => 28.7,
            RebarSize::No10 => 32.3,
        }
    }

    /// Nominal area in mm², computed from the nominal diameter
    pub fn area_mm2(&self) -> f64 {
        bar_area_mm2(self.diameter_mm())
    }

    /// Drawing designation, e.g. "#6"
    pub fn designation(&self) -> &'static str {
        match self {
            RebarSize::No3 => "#3",
            RebarSize::No4 => "#4",
            RebarSize::No5 => "#5",
            RebarSize::No6 => "#6",
            RebarSize::No7 => "#7",
            RebarSize::No8 => "#8",
            RebarSize::No9 => "#9",
            RebarSize::No10 => "#10",
        }
    }

    /// Sizes the column form allows for ties
    pub fn is_tie_size(&self) -> bool {
        matches!(self, RebarSize::No3 | RebarSize::No4)
    }
}

impl fmt::Display for RebarSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}mm)", self.designation(), self.diameter_mm())
    }
}

impl FromStr for RebarSize {
    type Err = CalcError;

    /// Accepts "#6", "6" or "No6" (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .trim_start_matches('#')
            .trim_start_matches("No")
            .trim_start_matches("NO")
            .trim_start_matches("no")
            .trim_start_matches('.');
        RebarSize::ALL
            .iter()
            .copied()
            .find(|size| size.designation()[1..] == *digits)
            .ok_or_else(|| CalcError::invalid_input("bar_size", trimmed, "Unknown bar designation (expected #3 to #10)"))
    }
}

/// Area of one round bar of the given diameter, mm²
pub fn bar_area_mm2(diameter_mm: f64) -> f64 {
    PI * (diameter_mm / 2.0).powi(2)
}

/// Yield strain fy / Es
pub fn yield_strain(fy_mpa: f64) -> f64 {
    fy_mpa / ES_MPA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas() {
        // #6: π (19.1/2)² = 286.5 mm²
        assert!((RebarSize::No6.area_mm2() - 286.52).abs() < 0.01);
        assert!((bar_area_mm2(10.0) - 78.54).abs() < 0.01);
    }

    #[test]
    fn test_parse_designations() {
        assert_eq!("#6".parse::<RebarSize>().unwrap(), RebarSize::No6);
        assert_eq!("10".parse::<RebarSize>().unwrap(), RebarSize::No10);
        assert_eq!("No4".parse::<RebarSize>().unwrap(), RebarSize::No4);
        assert!("#11".parse::<RebarSize>().is_err());
        assert!("".parse::<RebarSize>().is_err());
    }

    #[test]
    fn test_sizes_are_ordered() {
        for pair in RebarSize::ALL.windows(2) {
            assert!(pair[0].diameter_mm() < pair[1].diameter_mm());
        }
    }

    #[test]
    fn test_yield_strain() {
        assert!((yield_strain(420.0) - 0.0021).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&RebarSize::No8).unwrap();
        assert_eq!(json, "\"#8\"");
        let back: RebarSize = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RebarSize::No8);
    }
}
