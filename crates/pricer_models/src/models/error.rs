//! Error types for short-rate model operations.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::SolverError;
use thiserror::Error;

/// Short-rate model errors.
///
/// # Variants
/// - `InvalidParameter`: Non-finite model parameter
/// - `InvalidVolatility`: Negative or non-finite volatility value
/// - `NonIncreasingBreakpoints`: Volatility breakpoints out of order
/// - `InvalidTimeOrder`: Maturity before observation time
/// - `CashFlowMismatch`: Pay times and cash flows of different length
/// - `RootNotBracketed`: Jamshidian strike solve failed
/// - `Solver`: Other root-finding failure
/// - `MarketData`: Discount curve lookup failed
///
/// # Examples
/// ```
/// use pricer_models::models::ModelError;
///
/// let err = ModelError::RootNotBracketed { expiry: 10.0, strike: 0.0, lower: -256.0, upper: 256.0 };
/// assert!(format!("{}", err).contains("expiry 10"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// A scalar model parameter is not finite.
    #[error("Invalid model parameter {name} = {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Volatility values must be finite and non-negative.
    #[error("Invalid volatility at breakpoint {index}: σ = {value}")]
    InvalidVolatility {
        /// Breakpoint index
        index: usize,
        /// Offending volatility
        value: f64,
    },

    /// Volatility breakpoints must be non-negative and strictly increasing.
    #[error("Volatility breakpoint {index} at t = {time} is not strictly increasing")]
    NonIncreasingBreakpoints {
        /// Breakpoint index
        index: usize,
        /// Breakpoint time
        time: f64,
    },

    /// A term structure needs at least one breakpoint with a matching value.
    #[error("Volatility term structure needs matching breakpoints and values: got {times} times and {values} values")]
    VolatilityShape {
        /// Number of breakpoint times
        times: usize,
        /// Number of values
        values: usize,
    },

    /// Observation time after maturity (or negative).
    #[error("Invalid time order: observation t = {t}, maturity T = {maturity}")]
    InvalidTimeOrder {
        /// Observation time
        t: f64,
        /// Maturity
        maturity: f64,
    },

    /// Pay times and cash flows differ in length or are empty.
    #[error("Cash flow schedule mismatch: {pay_times} pay times, {cash_flows} cash flows")]
    CashFlowMismatch {
        /// Number of pay times
        pay_times: usize,
        /// Number of cash flows
        cash_flows: usize,
    },

    /// No state value equates the coupon bond with the strike.
    #[error(
        "Coupon bond option at expiry {expiry} with strike {strike}: no root in [{lower}, {upper}]"
    )]
    RootNotBracketed {
        /// Option expiry
        expiry: f64,
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

    /// Discount curve failure.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}
