// src/error.rs
use std::fmt;

/// Custom error types for the eosim library
#[derive(Debug, Clone)]
pub enum SimError {
    /// Invalid parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid configuration
    InvalidConfiguration { field: String, reason: String },

    /// A sampled path never left the exit domain within max_t
    UnreachableExit { start: Vec<f64>, max_t: f64 },

    /// Monte Carlo estimation error
    MonteCarloError { samples: usize, reason: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            SimError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            SimError::UnreachableExit { start, max_t } => {
                write!(
                    f,
                    "Exit time is out of reach from {:?} within max_t = {}",
                    start, max_t
                )
            }
            SimError::MonteCarloError { samples, reason } => {
                write!(
                    f,
                    "Monte Carlo estimation error with {} valid samples: {}",
                    samples, reason
                )
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Result type alias for eosim operations
pub type SimResult<T> = Result<T, SimError>;

/// Validation utilities
pub mod validation {
    use super::{SimError, SimResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> SimResult<()> {
        if value <= 0.0 {
            Err(SimError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> SimResult<()> {
        if value < 0.0 {
            Err(SimError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SimResult<()> {
        if !value.is_finite() {
            Err(SimError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the per-gridpoint sample count
    pub fn validate_samples(n: usize) -> SimResult<()> {
        if n == 0 {
            Err(SimError::InvalidConfiguration {
                field: "n".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if n > 100_000_000 {
            Err(SimError::InvalidConfiguration {
                field: "n".to_string(),
                reason: "exceeds maximum allowed (100 million)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the discretized step count num = round(max_t/dt)
    pub fn validate_step_count(num: usize) -> SimResult<()> {
        if num < 2 {
            Err(SimError::InvalidConfiguration {
                field: "max_t/dt".to_string(),
                reason: "round(max_t/dt) must be at least 2 so one increment exists".to_string(),
            })
        } else if num > 100_000_000 {
            Err(SimError::InvalidConfiguration {
                field: "max_t/dt".to_string(),
                reason: "exceeds maximum allowed step count (100 million)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("dt", 0.01).is_ok());
        assert!(validate_positive("dt", 0.0).is_err());
        assert!(validate_positive("dt", -0.1).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", 1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_samples() {
        assert!(validate_samples(1).is_ok());
        assert!(validate_samples(0).is_err());
    }

    #[test]
    fn test_validate_step_count() {
        assert!(validate_step_count(2).is_ok());
        assert!(validate_step_count(1).is_err());
        assert!(validate_step_count(0).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = SimError::InvalidParameters {
            parameter: "dx".to_string(),
            value: -0.1,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("dx"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("positive"));
    }

    #[test]
    fn test_unreachable_exit_display() {
        let error = SimError::UnreachableExit {
            start: vec![0.0, 0.5],
            max_t: 5.0,
        };

        let display = format!("{}", error);
        assert!(display.contains("out of reach"));
        assert!(display.contains("5"));
    }
}
