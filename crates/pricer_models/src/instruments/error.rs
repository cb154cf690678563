//! Instrument error types.
//!
//! Structured errors for exercise schedule and payoff construction.

use thiserror::Error;

use crate::models::ModelError;

/// Instrument-related errors.
///
/// # Variants
/// - `EmptySchedule`: No exercise times
/// - `NonIncreasingSchedule`: Exercise times out of order
/// - `NegativeTime`: Exercise time before today
/// - `CashFlowMismatch`: Pay times and cash flows differ in length
/// - `PayTimeBeforeObservation`: Cash flow paid before the exercise time
/// - `NoCashFlows`: Nothing left to pay after an exercise time
/// - `Model`: Bond valuation failed
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::NonIncreasingSchedule { index: 2, time: 3.0, previous: 4.0 };
/// assert!(format!("{}", err).contains("t = 3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Exercise schedule without any exercise time.
    #[error("Exercise schedule is empty")]
    EmptySchedule,

    /// Exercise times must be strictly increasing.
    #[error("Exercise time {index} at t = {time} does not follow t = {previous}")]
    NonIncreasingSchedule {
        /// Position in the schedule
        index: usize,
        /// Offending exercise time
        time: f64,
        /// Preceding exercise time
        previous: f64,
    },

    /// Exercise times must be non-negative.
    #[error("Exercise time {index} at t = {time} is negative")]
    NegativeTime {
        /// Position in the schedule
        index: usize,
        /// Offending exercise time
        time: f64,
    },

    /// Pay times and cash flows must have equal, non-zero length.
    #[error("Cash flow schedule mismatch: {pay_times} pay times, {cash_flows} cash flows")]
    CashFlowMismatch {
        /// Number of pay times
        pay_times: usize,
        /// Number of cash flows
        cash_flows: usize,
    },

    /// All cash flows must be paid at or after the observation time.
    #[error("Cash flow paid at t = {pay_time} precedes observation at t = {observation_time}")]
    PayTimeBeforeObservation {
        /// Offending pay time
        pay_time: f64,
        /// Observation (exercise) time
        observation_time: f64,
    },

    /// No cash flows remain after the exercise time.
    #[error("No cash flows after exercise at t = {time}")]
    NoCashFlows {
        /// Exercise time
        time: f64,
    },

    /// Bond valuation error.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_schedule_display() {
        assert_eq!(
            format!("{}", InstrumentError::EmptySchedule),
            "Exercise schedule is empty"
        );
    }

    #[test]
    fn test_pay_time_error_names_times() {
        let err = InstrumentError::PayTimeBeforeObservation {
            pay_time: 11.0,
            observation_time: 12.0,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("t = 11"));
        assert!(msg.contains("t = 12"));
    }

    #[test]
    fn test_from_model_error() {
        let err: InstrumentError = ModelError::InvalidTimeOrder {
            t: 2.0,
            maturity: 1.0,
        }
        .into();
        assert!(matches!(err, InstrumentError::Model(_)));
    }
}
