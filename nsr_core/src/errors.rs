//! # Error Types
//!
//! Structured error types for nsr_core. Ordinary out-of-range design input
//! never panics: every failure comes back as a [`CalcError`] so that a batch
//! caller (e.g. one trying many trial sections) can keep going.
//!
//! ## Example
//!
//! ```rust
//! use nsr_core::errors::{CalcError, CalcResult};
//!
//! fn validate_width(width_cm: f64) -> CalcResult<()> {
//!     if width_cm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "width_cm",
//!             width_cm.to_string(),
//!             "Width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_width(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for nsr_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive dimension, zero resolution, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The bar pattern cannot be built (too few bars, bars outside the section)
    #[error("Invalid reinforcement: {reason}")]
    InvalidReinforcement { reason: String },

    /// Gross steel ratio outside the permitted band
    #[error("Steel ratio {ratio:.4} outside permitted limits [{min:.2}, {max:.2}]")]
    SteelRatioOutOfRange { ratio: f64, min: f64, max: f64 },

    /// The sweep finished without producing a single capacity point
    #[error("No valid points generated for the interaction diagram ({samples} samples evaluated)")]
    NoValidPoints { samples: usize },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidReinforcement error
    pub fn invalid_reinforcement(reason: impl Into<String>) -> Self {
        CalcError::InvalidReinforcement {
            reason: reason.into(),
        }
    }

    /// Create a SteelRatioOutOfRange error
    pub fn steel_ratio_out_of_range(ratio: f64, min: f64, max: f64) -> Self {
        CalcError::SteelRatioOutOfRange { ratio, min, max }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidReinforcement { .. } => "INVALID_REINFORCEMENT",
            CalcError::SteelRatioOutOfRange { .. } => "STEEL_RATIO_OUT_OF_RANGE",
            CalcError::NoValidPoints { .. } => "NO_VALID_POINTS",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Actionable suggestion for the person entering the data.
    pub fn hint(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "Check that every dimension and strength is positive",
            CalcError::InvalidReinforcement { .. } => {
                "Add more bars (at least 2 per face, 4 in total) or reduce the cover"
            }
            CalcError::SteelRatioOutOfRange { ratio, min, .. } => {
                if ratio < min {
                    "Add more bars or use a larger bar size"
                } else {
                    "Increase section dimensions or use fewer/smaller bars"
                }
            }
            CalcError::NoValidPoints { .. } => {
                "Increase section dimensions or the number of neutral-axis steps"
            }
            CalcError::SerializationError { .. } | CalcError::Internal { .. } => {
                "Report this input so it can be reproduced"
            }
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
