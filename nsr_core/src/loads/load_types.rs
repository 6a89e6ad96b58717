//! Load type definitions per NSR-10 Title B
//!
//! Only the load categories that enter column combinations are modeled.

use serde::{Deserialize, Serialize};

/// Load types per NSR-10 B.2.2
///
/// # Example
/// ```
/// use nsr_core::loads::LoadType;
///
/// let dead = LoadType::Dead;
/// assert_eq!(dead.code(), "D");
/// assert_eq!(dead.description(), "Dead load");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoadType {
    /// D - Dead load (self-weight and permanent attachments)
    Dead,
    /// L - Live load (occupancy)
    Live,
    /// Lr - Roof live load
    LiveRoof,
    /// E - Seismic load effect (reduced by R where applicable)
    Seismic,
}

impl LoadType {
    /// All load types in standard order
    pub const ALL: [LoadType; 4] = [LoadType::Dead, LoadType::Live, LoadType::LiveRoof, LoadType::Seismic];

    /// Standard abbreviation code (D, L, Lr, E)
    ///
    /// # Example
    /// ```
    /// use nsr_core::loads::LoadType;
    /// assert_eq!(LoadType::LiveRoof.code(), "Lr");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            LoadType::Dead => "D",
            LoadType::Live => "L",
            LoadType::LiveRoof => "Lr",
            LoadType::Seismic => "E",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            LoadType::Dead => "Dead load",
            LoadType::Live => "Live load",
            LoadType::LiveRoof => "Roof live load",
            LoadType::Seismic => "Seismic load",
        }
    }

    /// Parse a code such as "Lr" (case-sensitive, as written in combinations)
    pub fn from_code(code: &str) -> Option<LoadType> {
        LoadType::ALL.into_iter().find(|lt| lt.code() == code)
    }

    /// Seismic effects reverse; their sign is significant.
    pub fn is_directional(&self) -> bool {
        matches!(self, LoadType::Seismic)
    }

    pub fn is_gravity(&self) -> bool {
        matches!(self, LoadType::Dead | LoadType::Live | LoadType::LiveRoof)
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_type_codes() {
        assert_eq!(LoadType::Dead.code(), "D");
        assert_eq!(LoadType::Live.code(), "L");
        assert_eq!(LoadType::LiveRoof.code(), "Lr");
        assert_eq!(LoadType::Seismic.code(), "E");
    }

    #[test]
    fn test_from_code() {
        for lt in LoadType::ALL {
            assert_eq!(LoadType::from_code(lt.code()), Some(lt));
        }
        assert_eq!(LoadType::from_code("W"), None);
    }

    #[test]
    fn test_gravity_and_directional() {
        assert!(LoadType::Dead.is_gravity());
        assert!(LoadType::LiveRoof.is_gravity());
        assert!(!LoadType::Seismic.is_gravity());
        assert!(LoadType::Seismic.is_directional());
        assert!(!LoadType::Live.is_directional());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&LoadType::LiveRoof).unwrap();
        assert_eq!(json, "\"LiveRoof\"");
        let parsed: LoadType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, LoadType::LiveRoof);
    }
}
