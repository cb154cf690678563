//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions used by the short-rate model
//! and for quoting results:
//! - Black model for lognormal forwards (zero-bond options)
//! - Bachelier model for normal forwards (swaption-style quotes)
//! - Implied volatility inversion for both, by bracketed root finding
//!
//! ## Numerical Accuracy
//!
//! The normal CDF is evaluated through the complementary error function
//! from `statrs`, which is accurate to double precision in both tails.

pub mod bachelier;
pub mod black;
pub mod distributions;
pub mod error;
mod inversion;
mod option_type;

pub use bachelier::{bachelier, bachelier_vega, implied_volatility};
pub use black::{black, black_implied_volatility};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use option_type::OptionType;
