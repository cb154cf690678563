//! Martingale checks on simulated paths.
//!
//! Deflated tradables must average to their time-zero prices under both
//! numeraire schemes; deviations are measured in standard errors.

use std::sync::Arc;

use pricer_core::market_data::curves::{ForwardCurve, YieldCurve};
use pricer_models::analytical::OptionType;
use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
use pricer_pricing::simulation::{NumeraireScheme, PathSimulation, SimulationConfig};

fn model() -> Arc<GaussianShortRateModel> {
    let curve = ForwardCurve::new(vec![2.0, 5.0, 10.0], vec![0.02, 0.025, 0.03]).unwrap();
    let volatility =
        VolatilityTermStructure::new(vec![1.0, 2.0, 5.0], vec![0.01, 0.008, 0.007]).unwrap();
    Arc::new(GaussianShortRateModel::new(Arc::new(curve), 0.03, volatility).unwrap())
}

fn simulate(scheme: NumeraireScheme) -> PathSimulation {
    let config = SimulationConfig::builder()
        .times((0..=20).map(|i| 0.5 * f64::from(i)).collect())
        .n_paths(20_000)
        .seed(7)
        .numeraire(scheme)
        .build()
        .unwrap();
    PathSimulation::new(model(), config).unwrap()
}

fn mean_and_error(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, (variance / n).sqrt())
}

fn deflated_zero_bonds(sim: &PathSimulation, t: f64, maturity: f64) -> Vec<f64> {
    let idx = sim.nearest_index(t);
    let model = sim.model();
    let x = sim.x(idx).to_vec();
    let bonds = model.zero_bonds(t, &x, maturity).unwrap();
    bonds
        .iter()
        .zip(sim.s(idx))
        .map(|(p, s)| p / model.numeraire(t, *s).unwrap())
        .collect()
}

#[test]
fn test_zero_bonds_are_martingales() {
    for scheme in [NumeraireScheme::RollingForward, NumeraireScheme::BankAccount] {
        let sim = simulate(scheme);
        for (t, maturity) in [(1.0, 1.0), (3.0, 7.5), (6.5, 10.0), (10.0, 10.0)] {
            let (mean, error) = mean_and_error(&deflated_zero_bonds(&sim, t, maturity));
            let expected = sim.model().curve().discount_factor(maturity).unwrap();
            assert!(
                (mean - expected).abs() < 4.0 * error + 2e-5,
                "{scheme:?} P(0,{maturity}) seen at {t}: {mean} vs {expected} (se {error})"
            );
        }
    }
}

#[test]
fn test_rolling_forward_discount_is_exact_per_step() {
    // exp(s) / P(0, t) compounds P(t_k, x_k, t_{k+1}) on every path
    let sim = simulate(NumeraireScheme::RollingForward);
    let model = sim.model();
    let (x0, s0, s1) = (sim.x(3), sim.s(3), sim.s(4));
    let (t0, t1) = (sim.times()[3], sim.times()[4]);
    for p in 0..100 {
        let ratio = model.numeraire(t0, s0[p]).unwrap() / model.numeraire(t1, s1[p]).unwrap();
        let bond = model.zero_bond(t0, x0[p], t1).unwrap();
        assert!((ratio - bond).abs() < 1e-13);
    }
}

#[test]
fn test_zero_bond_option_payoff_matches_closed_form() {
    let sim = simulate(NumeraireScheme::RollingForward);
    let model = sim.model();
    let (expiry, maturity) = (5.0, 10.0);
    let strike = model.curve().discount_factor(maturity).unwrap()
        / model.curve().discount_factor(expiry).unwrap();
    let idx = sim.nearest_index(expiry);
    let x = sim.x(idx).to_vec();
    let payoffs: Vec<f64> = model
        .zero_bonds(expiry, &x, maturity)
        .unwrap()
        .iter()
        .zip(sim.s(idx))
        .map(|(p, s)| (p - strike).max(0.0) / model.numeraire(expiry, *s).unwrap())
        .collect();
    let (mean, error) = mean_and_error(&payoffs);
    let expected = model
        .zero_bond_option(expiry, maturity, strike, OptionType::Call)
        .unwrap();
    assert!((mean - expected).abs() < 4.0 * error + 1e-5);
}
