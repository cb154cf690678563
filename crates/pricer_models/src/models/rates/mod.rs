//! Interest rate models.
//!
//! ## Gaussian short rate (Hull-White 1F)
//!
//! The short rate is `r(t) = f(0,t) + x(t)` with
//!
//! ```text
//! dx(t) = [y(t) - a x(t)] dt + σ(t) dW(t),   x(0) = 0
//! y(t)  = ∫₀ᵗ e^{-2a(t-u)} σ(u)² du
//! ```
//!
//! so that zero bonds, their options and all conditional moments of `x`
//! are available in closed form.

mod gaussian;
mod volatility;

pub use gaussian::{GaussianShortRateModel, NumericalInstabilityWarning};
pub use volatility::VolatilityTermStructure;

/// `(1 - e^{-rate·τ}) / rate`, equal to `τ` for `rate = 0`.
#[inline]
pub(crate) fn decay_integral(rate: f64, tau: f64) -> f64 {
    if rate == 0.0 {
        tau
    } else {
        -(-rate * tau).exp_m1() / rate
    }
}
