//! Error types for the backward-induction engine.

use pricer_models::instruments::InstrumentError;
use pricer_models::models::ModelError;
use thiserror::Error;

/// Configuration error for simulations and rollback methods.
///
/// Raised at construction when invalid parameters are provided.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Path count outside the valid range.
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Simulation times must start at zero and increase strictly.
    #[error("Invalid simulation time grid: {0}")]
    InvalidTimeGrid(String),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        value: String,
    },
}

/// Path simulation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Invalid simulation configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Model evaluation failed during evolution.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// A simulated state is NaN or infinite.
    #[error("Non-finite state at t = {time} on path {path}")]
    NonFiniteState {
        /// Simulation time
        time: f64,
        /// Path index
        path: usize,
    },
}

/// Pricing errors raised by rollback methods and the engine.
///
/// # Variants
/// - `InvalidSchedule`: Empty, negative or non-increasing exercise times
/// - `PayoffMismatch`: Payoff count differs from the exercise count
/// - `ObservationTimeMismatch`: Payoff observed at a different time
/// - `StateMismatch`: States of the wrong representation for the method
/// - `ConvergenceFailure`: Internal consistency check failed
/// - `Model`, `Simulation`, `Config`: Lower-level failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Invalid exercise schedule.
    #[error("Invalid exercise schedule: {0}")]
    InvalidSchedule(#[from] InstrumentError),

    /// Payoffs and exercise times differ in number.
    #[error("Expected {expected} payoffs, one per exercise time, got {got}")]
    PayoffMismatch {
        /// Number of exercise times
        expected: usize,
        /// Number of payoffs
        got: usize,
    },

    /// Payoff observation time differs from its exercise time.
    #[error("Payoff observed at t = {observation} for exercise at t = {exercise}")]
    ObservationTimeMismatch {
        /// Exercise time
        exercise: f64,
        /// Payoff observation time
        observation: f64,
    },

    /// Method received states it did not produce.
    #[error("{method} expects {expected} states")]
    StateMismatch {
        /// Method name
        method: &'static str,
        /// Expected representation
        expected: &'static str,
    },

    /// Numerical method failed an internal consistency check.
    #[error("{method} failed at t = {time}: {reason}")]
    ConvergenceFailure {
        /// Method name
        method: &'static str,
        /// Exercise or step time
        time: f64,
        /// Description of the failure
        reason: String,
    },

    /// Model evaluation failed.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Path simulation failed.
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Invalid method configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PricingError {
    /// Shorthand for [`PricingError::ConvergenceFailure`].
    pub(crate) fn convergence(method: &'static str, time: f64, reason: impl Into<String>) -> Self {
        Self::ConvergenceFailure {
            method,
            time,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount(0);
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = ConfigError::InvalidParameter {
            name: "split_ratio",
            value: "must lie in [0, 1]".to_string(),
        };
        assert!(err.to_string().contains("split_ratio"));
    }

    #[test]
    fn test_convergence_failure_names_time() {
        let err = PricingError::convergence("pde", 12.0, "singular system");
        assert_eq!(err.to_string(), "pde failed at t = 12: singular system");
    }

    #[test]
    fn test_from_instrument_error() {
        let err: PricingError = InstrumentError::EmptySchedule.into();
        assert!(matches!(err, PricingError::InvalidSchedule(_)));
    }
}
