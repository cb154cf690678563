//! Property tests for Black and Bachelier formulas and their inversions.

use approx::assert_relative_eq;
use pricer_models::analytical::{
    bachelier, black, black_implied_volatility, implied_volatility, OptionType,
};
use proptest::prelude::*;

#[test]
fn test_bachelier_atm_reference() {
    // σ√(T/2π) at the money
    let price = bachelier(0.03, 0.03, 0.01, 4.0, OptionType::Call);
    assert_relative_eq!(
        price,
        0.01 * 2.0 / (2.0 * std::f64::consts::PI).sqrt(),
        epsilon = 1e-15
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Bachelier inversion recovers the volatility for strikes within 1.5 std devs.
    #[test]
    fn prop_bachelier_implied_volatility_round_trip(
        sigma in 0.001..0.05_f64,
        z in -1.5..1.5_f64,
        expiry in 0.5..10.0_f64,
        call in any::<bool>(),
    ) {
        let forward = 0.03;
        let strike = forward + z * sigma * expiry.sqrt();
        let option_type = if call { OptionType::Call } else { OptionType::Put };
        let price = bachelier(strike, forward, sigma, expiry, option_type);
        let implied = implied_volatility(price, strike, forward, expiry, option_type).unwrap();
        prop_assert!((implied - sigma).abs() < 1e-8 * sigma.max(1e-3), "{} vs {}", implied, sigma);
    }

    /// Black inversion recovers the volatility for moderate moneyness.
    #[test]
    fn prop_black_implied_volatility_round_trip(
        sigma in 0.05..0.8_f64,
        z in -1.0..1.0_f64,
        expiry in 0.5..10.0_f64,
        call in any::<bool>(),
    ) {
        let forward = 0.03;
        let strike = forward * (z * sigma * expiry.sqrt()).exp();
        let option_type = if call { OptionType::Call } else { OptionType::Put };
        let price = black(strike, forward, sigma, expiry, option_type);
        let implied = black_implied_volatility(price, strike, forward, expiry, option_type).unwrap();
        prop_assert!((implied - sigma).abs() < 1e-8, "{} vs {}", implied, sigma);
    }

    /// Bachelier put-call parity: C − P = F − K.
    #[test]
    fn prop_bachelier_parity(
        strike in -0.02..0.08_f64,
        sigma in 0.0..0.05_f64,
        expiry in 0.0..10.0_f64,
    ) {
        let call = bachelier(strike, 0.03, sigma, expiry, OptionType::Call);
        let put = bachelier(strike, 0.03, sigma, expiry, OptionType::Put);
        prop_assert!((call - put - (0.03 - strike)).abs() < 1e-14);
    }
}
