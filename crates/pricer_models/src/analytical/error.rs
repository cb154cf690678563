//! Error types for analytical pricing operations.

use pricer_core::types::SolverError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`: Negative volatility
/// - `InvalidStrike`: Non-positive strike where a lognormal formula needs one
/// - `InvalidExpiry`: Non-positive expiry for an implied-volatility inversion
/// - `RootNotBracketed`: Implied volatility inversion found no sign change
/// - `Solver`: Root finder failed to converge
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (negative).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid strike (non-positive for lognormal formulas).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid expiry.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// No volatility in the search bracket reproduces the price.
    #[error(
        "Implied volatility not bracketed for price {price} at strike {strike}: searched [{lower}, {upper}]"
    )]
    RootNotBracketed {
        /// Target option price
        price: f64,
        /// Option strike
        strike: f64,
        /// Final lower bracket bound
        lower: f64,
        /// Final upper bracket bound
        upper: f64,
    },

    /// Root finder failure other than a missing bracket.
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}
