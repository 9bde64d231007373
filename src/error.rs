//! Error types for the fallible edges of the crate.
//!
//! The simulation itself never fails: passes no-op on empty collections and
//! on entities removed earlier in the same tick. Only loading and validating
//! tuning data can go wrong.

use std::fmt;

/// Top-level error enum for bubble-sim.
#[derive(Debug)]
pub enum SimError {
    /// Tuning file could not be read.
    Io(std::io::Error),

    /// Tuning JSON was malformed or had wrongly-typed fields.
    Parse(serde_json::Error),

    /// A tuning value is outside its valid range.
    InvalidTuning {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the valid range.
        expected: &'static str,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io(e) => write!(f, "failed to read tuning file: {}", e),
            SimError::Parse(e) => write!(f, "failed to parse tuning JSON: {}", e),
            SimError::InvalidTuning {
                name,
                value,
                expected,
            } => write!(
                f,
                "tuning value '{}' = {} is invalid (expected {})",
                name, value, expected
            ),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            SimError::Parse(e) => Some(e),
            SimError::InvalidTuning { .. } => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e)
    }
}
