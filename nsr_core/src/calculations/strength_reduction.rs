//! Strength-reduction factor φ as a function of net tensile strain (NSR-10 C.9.3.2).

use serde::{Deserialize, Serialize};

/// Compression-controlled strain limit (conservative for fy = 420 MPa)
pub const EPSILON_COMPRESSION_LIMIT: f64 = 0.002;

/// Tension-controlled strain limit
pub const EPSILON_TENSION_LIMIT: f64 = 0.005;

/// φ for compression-controlled tied sections
pub const PHI_COMPRESSION: f64 = 0.65;

/// φ for tension-controlled sections
pub const PHI_TENSION: f64 = 0.90;

/// Section behavior implied by the extreme tensile strain εt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TensionControl {
    CompressionControlled,
    Transition,
    TensionControlled,
}

impl TensionControl {
    pub fn classify(epsilon_t: f64) -> Self {
        if epsilon_t <= EPSILON_COMPRESSION_LIMIT {
            TensionControl::CompressionControlled
        } else if epsilon_t < EPSILON_TENSION_LIMIT {
            TensionControl::Transition
        } else {
            TensionControl::TensionControlled
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TensionControl::CompressionControlled => "Compression-controlled",
            TensionControl::Transition => "Transition",
            TensionControl::TensionControlled => "Tension-controlled",
        }
    }
}

/// φ for a given extreme tensile strain εt (positive in tension).
///
/// # Example
///
/// ```rust
/// use nsr_core::calculations::strength_reduction::phi;
///
/// assert_eq!(phi(0.0), 0.65);
/// assert!((phi(0.0035) - 0.775).abs() < 1e-12);
/// assert_eq!(phi(0.01), 0.90);
/// ```
pub fn phi(epsilon_t: f64) -> f64 {
    match TensionControl::classify(epsilon_t) {
        TensionControl::CompressionControlled => PHI_COMPRESSION,
        TensionControl::Transition => {
            PHI_COMPRESSION
                + (PHI_TENSION - PHI_COMPRESSION) * (epsilon_t - EPSILON_COMPRESSION_LIMIT)
                    / (EPSILON_TENSION_LIMIT - EPSILON_COMPRESSION_LIMIT)
        }
        TensionControl::TensionControlled => PHI_TENSION,
    }
}
