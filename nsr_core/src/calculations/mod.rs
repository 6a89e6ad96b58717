//! # Structural Calculations
//!
//! Column interaction surfaces per NSR-10. The calculation follows the
//! pattern:
//!
//! - `ColumnInput` - Input parameters (JSON-serializable)
//! - `InteractionSurface` - Calculation results (JSON-serializable)
//! - `generate_interaction_surface(input, options) -> Result<InteractionSurface, CalcError>` - Pure calculation function
//!
//! ## Building Blocks
//!
//! - [`section`] - Rectangular gross section
//! - [`reinforcement`] - Perimeter bar layout
//! - [`strength_reduction`] - φ from net tensile strain
//! - [`compression_zone`] - Concrete stress block models
//! - [`interaction`] - The (c, θ) sweep
//! - [`column`] - Input, surface and entry point

pub mod column;
pub mod compression_zone;
pub mod interaction;
pub mod reinforcement;
pub mod section;
pub mod strength_reduction;

use serde::{Deserialize, Serialize};

pub use column::{
    generate_interaction_surface, ColumnInput, InteractionSurface, SurfaceParams, SurfaceResponse, SurfaceSummary,
};
pub use compression_zone::{CompressionZone, NeutralAxisState};
pub use interaction::{CapacityPoint, SteelRatioLimits, SweepOptions};
pub use reinforcement::{Bar, ReinforcementLayout};
pub use section::CrossSection;
pub use strength_reduction::{phi, TensionControl};

/// Enum wrapper for all calculation types.
///
/// Stored in projects with an explicit type tag so more element types can be
/// added without breaking existing files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Biaxial interaction surface of a tied rectangular column
    Column(ColumnInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Column(c) => &c.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Column(_) => "Column",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::GlobalSettings;

    #[test]
    fn test_item_tagging() {
        let column = GlobalSettings::default().new_column("C-4", 35.0, 35.0, 3, 1);
        let item = CalculationItem::Column(column);
        assert_eq!(item.label(), "C-4");
        assert_eq!(item.calc_type(), "Column");

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.starts_with("{\"type\":\"Column\""));
    }
}
