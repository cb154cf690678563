//! Black model for options on lognormal forwards.
//!
//! ## Mathematical Formulas
//!
//! With `ν = σ√T`, `m = F/K`, `d₁ = ln(m)/ν + ν/2`, `d₂ = d₁ − ν` and
//! `ω = ±1` for call/put:
//!
//! ```text
//! V = K·ω·(m·N(ω d₁) − N(ω d₂))
//! ```
//!
//! For `ν < 1e-12` the intrinsic value `max(ω(F − K), 0)` is returned.

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use super::inversion::invert_volatility;
use super::OptionType;

/// Total standard deviations below this are treated as zero.
const MIN_STD_DEV: f64 = 1e-12;

/// Undiscounted Black price of a call or put on a positive forward.
///
/// A non-positive strike returns the intrinsic value.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{black, OptionType};
///
/// let call = black(1.0, 1.0, 0.2, 1.0, OptionType::Call);
/// let put = black(1.0, 1.0, 0.2, 1.0, OptionType::Put);
/// assert!((call - put).abs() < 1e-15);
/// assert!((call - 0.079_655_674_554_057_9).abs() < 1e-14);
/// ```
pub fn black(strike: f64, forward: f64, sigma: f64, expiry: f64, option_type: OptionType) -> f64 {
    let omega = option_type.sign();
    let nu = sigma * expiry.max(0.0).sqrt();
    if nu < MIN_STD_DEV || strike <= 0.0 {
        return (omega * (forward - strike)).max(0.0);
    }
    let moneyness = forward / strike;
    let d1 = moneyness.ln() / nu + 0.5 * nu;
    let d2 = d1 - nu;
    strike * omega * (moneyness * norm_cdf(omega * d1) - norm_cdf(omega * d2))
}

/// Black (lognormal) implied volatility of an undiscounted option price.
///
/// The search starts on `[0.01, 1.0]` and widens geometrically a bounded
/// number of times.
///
/// # Errors
///
/// * `InvalidStrike` - Non-positive strike
/// * `InvalidExpiry` - Non-positive expiry
/// * `RootNotBracketed` - Price outside the attainable range
///
/// # Examples
/// ```
/// use pricer_models::analytical::{black, black_implied_volatility, OptionType};
///
/// let price = black(0.03, 0.032, 0.25, 5.0, OptionType::Put);
/// let vol = black_implied_volatility(price, 0.03, 0.032, 5.0, OptionType::Put).unwrap();
/// assert!((vol - 0.25).abs() < 1e-10);
/// ```
pub fn black_implied_volatility(
    price: f64,
    strike: f64,
    forward: f64,
    expiry: f64,
    option_type: OptionType,
) -> Result<f64, AnalyticalError> {
    if !(strike > 0.0) {
        return Err(AnalyticalError::InvalidStrike { strike });
    }
    invert_volatility(
        |sigma| black(strike, forward, sigma, expiry, option_type),
        price,
        strike,
        expiry,
        0.01,
        1.0,
    )
}
