//! Property and scenario tests for the Gaussian short-rate model.
//!
//! # Test Categories
//!
//! 1. **Put-call parity** of zero bond options
//! 2. **Monotonicity** of coupon bond options in each volatility value
//! 3. **Zero mean reversion limit**
//! 4. **At-the-money forward** call/put equality

use std::sync::Arc;

use approx::assert_relative_eq;
use pricer_core::market_data::curves::{FlatCurve, ForwardCurve, YieldCurve};
use pricer_models::analytical::OptionType;
use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
use proptest::prelude::*;

fn flat_model(rate: f64, mean_reversion: f64, sigma: f64) -> GaussianShortRateModel {
    GaussianShortRateModel::new(
        Arc::new(FlatCurve::new(rate)),
        mean_reversion,
        VolatilityTermStructure::flat(sigma).unwrap(),
    )
    .unwrap()
}

fn term_structure_model(vols: Vec<f64>) -> GaussianShortRateModel {
    let curve = ForwardCurve::new(vec![2.0, 5.0, 10.0, 30.0], vec![0.02, 0.025, 0.03, 0.028])
        .unwrap();
    GaussianShortRateModel::new(
        Arc::new(curve),
        0.03,
        VolatilityTermStructure::new(vec![1.0, 2.0, 5.0], vols).unwrap(),
    )
    .unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_atm_forward_call_equals_put() {
    let model = flat_model(0.03, 0.03, 0.005);
    let strike = model.curve().discount_factor(10.0).unwrap()
        / model.curve().discount_factor(5.0).unwrap();
    let call = model
        .zero_bond_option(5.0, 10.0, strike, OptionType::Call)
        .unwrap();
    let put = model
        .zero_bond_option(5.0, 10.0, strike, OptionType::Put)
        .unwrap();
    assert!(call > 0.0);
    assert_relative_eq!(call, put, epsilon = 1e-15);
}

#[test]
fn test_mean_reversion_limit() {
    let exact = flat_model(0.03, 0.0, 0.005);
    let near = flat_model(0.03, 1e-6, 0.005);
    let pay_times = [6.0, 7.0, 8.0, 9.0, 10.0, 10.0];
    let cash_flows = [0.03, 0.03, 0.03, 0.03, 0.03, 1.0];
    for option_type in [OptionType::Call, OptionType::Put] {
        let a = exact
            .coupon_bond_option(5.0, &pay_times, &cash_flows, 1.0, option_type)
            .unwrap();
        let b = near
            .coupon_bond_option(5.0, &pay_times, &cash_flows, 1.0, option_type)
            .unwrap();
        assert_relative_eq!(a, b, epsilon = 1e-6);
    }
    assert_relative_eq!(
        exact.zero_bond(5.0, 0.01, 10.0).unwrap(),
        near.zero_bond(5.0, 0.01, 10.0).unwrap(),
        epsilon = 1e-6
    );
    assert_eq!(exact.g(5.0, 10.0), 5.0);
}

#[test]
fn test_negative_mean_reversion_is_supported() {
    let model = flat_model(0.03, -0.02, 0.005);
    assert!(model.g(0.0, 10.0) > 10.0);
    let call = model
        .zero_bond_option(5.0, 10.0, 0.85, OptionType::Call)
        .unwrap();
    let put = model
        .zero_bond_option(5.0, 10.0, 0.85, OptionType::Put)
        .unwrap();
    let forward = (-0.3_f64).exp() - 0.85 * (-0.15_f64).exp();
    assert_relative_eq!(call - put, forward, epsilon = 1e-14);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// ZBO(call) − ZBO(put) = P(0,T) − K·P(0,t).
    #[test]
    fn prop_zero_bond_option_parity(
        expiry in 0.25..15.0_f64,
        tenor in 0.25..20.0_f64,
        strike in 0.3..1.2_f64,
        sigma in 0.001..0.03_f64,
        mean_reversion in -0.05..0.2_f64,
    ) {
        let model = flat_model(0.025, mean_reversion, sigma);
        let maturity = expiry + tenor;
        let call = model.zero_bond_option(expiry, maturity, strike, OptionType::Call).unwrap();
        let put = model.zero_bond_option(expiry, maturity, strike, OptionType::Put).unwrap();
        let forward = (-0.025 * maturity).exp() - strike * (-0.025 * expiry).exp();
        prop_assert!((call - put - forward).abs() < 1e-12, "parity error {}", call - put - forward);
    }

    /// Coupon bond options are non-decreasing in each volatility value.
    #[test]
    fn prop_coupon_bond_option_monotone_in_volatility(
        v0 in 0.002..0.02_f64,
        v1 in 0.002..0.02_f64,
        v2 in 0.002..0.02_f64,
        index in 0..3usize,
        bump in 0.0..0.005_f64,
        call in any::<bool>(),
    ) {
        let base = vec![v0, v1, v2];
        let mut bumped = base.clone();
        bumped[index] += bump;
        let option_type = if call { OptionType::Call } else { OptionType::Put };
        let pay_times = [6.0, 7.0, 8.0, 9.0, 10.0, 10.0];
        let cash_flows = [0.03, 0.03, 0.03, 0.03, 0.03, 1.0];
        let low = term_structure_model(base)
            .coupon_bond_option(5.0, &pay_times, &cash_flows, 1.0, option_type)
            .unwrap();
        let high = term_structure_model(bumped)
            .coupon_bond_option(5.0, &pay_times, &cash_flows, 1.0, option_type)
            .unwrap();
        prop_assert!(high >= low - 1e-12, "{} < {}", high, low);
    }

    /// The zero bond at the mean state reproduces the initial curve forward.
    #[test]
    fn prop_zero_bond_martingale_at_origin(maturity in 0.0..30.0_f64) {
        let model = term_structure_model(vec![0.01, 0.008, 0.007]);
        let p = model.zero_bond(0.0, 0.0, maturity).unwrap();
        let df = model.curve().discount_factor(maturity).unwrap();
        prop_assert!((p - df).abs() < 1e-15);
    }
}
