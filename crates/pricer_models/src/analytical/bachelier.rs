//! Bachelier (normal) formulas for European options.
//!
//! This model is the quoting convention for rate options where forwards
//! may be negative; implied normal volatilities of Bermudan and European
//! prices are computed by inverting it.
//!
//! ## Mathematical Formulas
//!
//! With `s = σ√T`, `ω = ±1` and `h = ω(F − K)/s`:
//!
//! ```text
//! V = s·(h·N(h) + φ(h))
//! ```
//!
//! For `s = 0` the intrinsic value `max(ω(F − K), 0)` is returned.

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use super::inversion::invert_volatility;
use super::OptionType;

/// Undiscounted Bachelier price.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{bachelier, OptionType};
///
/// // ATM: σ√T / √(2π)
/// let price = bachelier(0.03, 0.03, 0.01, 4.0, OptionType::Call);
/// assert!((price - 0.02 * 0.398_942_280_401_432_7).abs() < 1e-15);
/// ```
pub fn bachelier(strike: f64, forward: f64, sigma: f64, expiry: f64, option_type: OptionType) -> f64 {
    let omega = option_type.sign();
    let std_dev = sigma * expiry.max(0.0).sqrt();
    if !(std_dev > 0.0) {
        return (omega * (forward - strike)).max(0.0);
    }
    let h = omega * (forward - strike) / std_dev;
    std_dev * (h * norm_cdf(h) + norm_pdf(h))
}

/// Sensitivity of [`bachelier`] to `sigma`; identical for calls and puts.
///
/// ```text
/// ∂V/∂σ = √T·φ((F − K)/(σ√T))
/// ```
pub fn bachelier_vega(strike: f64, forward: f64, sigma: f64, expiry: f64) -> f64 {
    let sqrt_t = expiry.max(0.0).sqrt();
    let std_dev = sigma * sqrt_t;
    if !(std_dev > 0.0) {
        return 0.0;
    }
    sqrt_t * norm_pdf((forward - strike) / std_dev)
}

/// Bachelier (normal) implied volatility of an undiscounted option price.
///
/// The search starts on `[1e-4, 1e-1]` and widens geometrically a bounded
/// number of times.
///
/// # Errors
///
/// * `InvalidExpiry` - Non-positive expiry
/// * `RootNotBracketed` - Price below intrinsic value or otherwise unattainable
///
/// # Examples
/// ```
/// use pricer_models::analytical::{bachelier, implied_volatility, OptionType};
///
/// let price = bachelier(0.025, 0.03, 0.0075, 10.0, OptionType::Put);
/// let vol = implied_volatility(price, 0.025, 0.03, 10.0, OptionType::Put).unwrap();
/// assert!((vol - 0.0075).abs() < 1e-10);
/// ```
pub fn implied_volatility(
    price: f64,
    strike: f64,
    forward: f64,
    expiry: f64,
    option_type: OptionType,
) -> Result<f64, AnalyticalError> {
    invert_volatility(
        |sigma| bachelier(strike, forward, sigma, expiry, option_type),
        price,
        strike,
        expiry,
        1e-4,
        1e-1,
    )
}
