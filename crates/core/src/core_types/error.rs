//! Error taxonomy for the fire automaton.
//!
//! Only two things can go wrong: a bad configuration at construction time, or
//! a caller reading a coordinate that was never resolved through the topology.
//! Stepping itself is total and never fails.

use thiserror::Error;

/// Errors surfaced by the engine and its accessors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FireError {
    /// Rejected construction parameter
    #[error("invalid configuration: {parameter} {message}")]
    Configuration {
        parameter: &'static str,
        message: String,
    },

    /// Direct coordinate access outside `[0, width) x [0, height)`
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl FireError {
    pub(crate) fn configuration(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            parameter,
            message: message.into(),
        }
    }
}

/// Result alias used across the crate.
pub type FireResult<T> = Result<T, FireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FireError::configuration("density", "must be within [0, 1], got 1.5");
        assert_eq!(
            err.to_string(),
            "invalid configuration: density must be within [0, 1], got 1.5"
        );

        let err = FireError::OutOfRange {
            x: 7,
            y: 2,
            width: 5,
            height: 5,
        };
        assert_eq!(err.to_string(), "coordinate (7, 2) is outside the 5x5 grid");
    }
}
