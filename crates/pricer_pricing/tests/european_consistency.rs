//! European consistency: every rollback method against Jamshidian.
//!
//! A single exercise date reduces the engine to a European option on the
//! co-terminal coupon bond, which the model prices in closed form. Errors
//! are relative to the closed-form price of each expiry.
//!
//! # Set-up
//!
//! Flat 3% curve, mean reversion 5%, flat volatility 1%; a 20y annual 3%
//! bond callable at par on years 12 to 19.

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use pricer_core::market_data::curves::FlatCurve;
use pricer_models::analytical::OptionType;
use pricer_models::instruments::{CouponBond, ExerciseSchedule, Payoff};
use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
use pricer_pricing::{bermudan_option_npv, price};
use pricer_pricing::rollback::amc::{AmcConfig, AmcSolver};
use pricer_pricing::rollback::density::{BreakEven, DensityGridConfig, DensityIntegration};
use pricer_pricing::rollback::pde::{PdeConfig, PdeSolver};
use pricer_pricing::rollback::RollbackMethod;
use pricer_pricing::simulation::{PathSimulation, SimulationConfig};
use proptest::prelude::*;

fn model() -> Arc<GaussianShortRateModel> {
    Arc::new(
        GaussianShortRateModel::new(
            Arc::new(FlatCurve::new(0.03)),
            0.05,
            VolatilityTermStructure::flat(0.01).unwrap(),
        )
        .unwrap(),
    )
}

fn underlyings(model: &Arc<GaussianShortRateModel>) -> Vec<CouponBond> {
    let schedule = ExerciseSchedule::new((12..20).map(f64::from).collect()).unwrap();
    let mut pay_times: Vec<f64> = (13..=20).map(f64::from).collect();
    pay_times.push(20.0);
    let mut cash_flows = vec![0.03; 8];
    cash_flows.push(1.0);
    CouponBond::coterminal_underlyings(model.clone(), &schedule, &pay_times, &cash_flows, 1.0)
        .unwrap()
}

fn analytic(underlying: &CouponBond) -> f64 {
    underlying
        .model()
        .coupon_bond_option(
            underlying.observation_time(),
            underlying.pay_times(),
            underlying.cash_flows(),
            0.0,
            OptionType::Call,
        )
        .unwrap()
}

/// Largest relative engine error over all co-terminal Europeans.
fn max_relative_european_error<M: RollbackMethod>(method: &M) -> f64 {
    let m = model();
    underlyings(&m)
        .into_iter()
        .map(|u| {
            let t = u.observation_time();
            let reference = analytic(&u);
            let npv = bermudan_option_npv(&[t], &[u], method, false).unwrap();
            ((npv - reference) / reference).abs()
        })
        .fold(0.0, f64::max)
}

fn grid() -> DensityGridConfig {
    DensityGridConfig::default()
}

// ============================================================================
// Density integration
// ============================================================================

#[test]
fn test_simpson_matches_jamshidian() {
    // the payoff kink limits Simpson on the default grid to about 1.5e-3
    let default = DensityIntegration::simpson(model(), grid()).unwrap();
    assert!(max_relative_european_error(&default) < 2e-3);

    let fine = DensityIntegration::simpson(model(), grid().with_grid_points(401)).unwrap();
    let error = max_relative_european_error(&fine);
    assert!(error < 1e-3, "simpson 401 points: {error:.3e}");
}

#[test]
fn test_cubic_spline_exact_matches_jamshidian() {
    let method = DensityIntegration::cubic_spline_exact(model(), grid()).unwrap();
    let error = max_relative_european_error(&method);
    assert!(error < 1e-3, "cubic spline exact: {error:.3e}");
}

#[test]
fn test_break_even_matches_jamshidian() {
    let simpson = DensityIntegration::simpson(model(), grid()).unwrap();
    let error = max_relative_european_error(&BreakEven::new(simpson));
    assert!(error < 1e-3, "break-even simpson: {error:.3e}");

    let exact = DensityIntegration::cubic_spline_exact(model(), grid()).unwrap();
    let error = max_relative_european_error(&BreakEven::new(exact));
    assert!(error < 1e-4, "break-even cubic spline exact: {error:.3e}");
}

#[test]
fn test_hermite_converges_with_degree() {
    let low = DensityIntegration::hermite(model(), 5, grid()).unwrap();
    let high = DensityIntegration::hermite(model(), 21, grid()).unwrap();
    let low_error = max_relative_european_error(&low);
    let high_error = max_relative_european_error(&high);
    assert!(high_error < 5e-2, "hermite 21: {high_error:.3e}");
    assert!(high_error < low_error);
}

#[test]
fn test_break_even_hermite_matches_jamshidian() {
    for degree in [11, 21, 41] {
        let hermite = DensityIntegration::hermite(model(), degree, grid()).unwrap();
        let error = max_relative_european_error(&BreakEven::new(hermite));
        assert!(error < 1e-3, "break-even hermite {degree}: {error:.3e}");
    }
}

#[test]
fn test_concrete_par_bond_within_one_basis_point() {
    // 10y 3% annual bond struck at par, European at 5y
    let m = model();
    let pay_times: Vec<f64> = (5..=10).map(f64::from).collect();
    let mut cash_flows = vec![-1.0];
    cash_flows.extend([0.03; 4]);
    cash_flows.push(1.03);
    let u = CouponBond::new(m.clone(), 5.0, pay_times, cash_flows).unwrap();
    let reference = analytic(&u);
    let method = DensityIntegration::simpson(m, grid()).unwrap();
    let npv = bermudan_option_npv(&[5.0], &[u], &method, false).unwrap();
    assert_abs_diff_eq!(npv, reference, epsilon = 1e-4);
}

// ============================================================================
// PDE and AMC
// ============================================================================

#[test]
fn test_pde_matches_jamshidian() {
    let method = PdeSolver::new(model(), PdeConfig::default()).unwrap();
    let error = max_relative_european_error(&method);
    assert!(error < 1e-3, "pde: {error:.3e}");
}

#[test]
fn test_amc_matches_jamshidian() {
    let m = model();
    let config = SimulationConfig::builder()
        .times((0..=20).map(f64::from).collect())
        .n_paths(1 << 15)
        .build()
        .unwrap();
    let sim = Arc::new(PathSimulation::new(m.clone(), config).unwrap());
    let method = AmcSolver::new(sim, AmcConfig::default()).unwrap();
    for u in underlyings(&m) {
        let t = u.observation_time();
        let reference = analytic(&u);
        let schedule = ExerciseSchedule::new(vec![t]).unwrap();
        let summary = price(&schedule, &[u], &method, false).unwrap();
        let standard_error = summary.standard_error.unwrap();
        let tolerance = (1e-2 * reference).max(4.0 * standard_error);
        assert!(
            (summary.npv - reference).abs() < tolerance,
            "expiry {t}: npv {} reference {reference} se {standard_error:.2e}",
            summary.npv
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_density_european_tracks_strike(strike in 0.85f64..1.15, expiry in 1u32..8) {
        let m = model();
        let t = f64::from(expiry);
        let pay_times = vec![t, t + 1.0, t + 2.0, t + 3.0];
        let cash_flows = vec![-strike, 0.03, 0.03, 1.03];
        let u = CouponBond::new(m.clone(), t, pay_times, cash_flows).unwrap();
        let reference = analytic(&u);
        let exact = DensityIntegration::cubic_spline_exact(m, grid()).unwrap();
        let npv = bermudan_option_npv(&[t], &[u], &BreakEven::new(exact), false).unwrap();
        prop_assert!(
            (npv - reference).abs() < 1e-4 * reference + 1e-7,
            "npv {} reference {}",
            npv,
            reference
        );
    }
}
