//! Simulated paths of the Gaussian short-rate state.
//!
//! Each path carries the state `[x, s]` where `x` is the short-rate factor
//! and `s` the stochastic part of the log numeraire, so that the numeraire
//! is `N(t) = exp(s) / P(0,t)`.
//!
//! # Memory Layout
//!
//! States are stored in an `ndarray::Array3` of shape
//! `(n_times, 2, n_paths)`: `paths[[i, 0, p]]` is `x(tᵢ)` and
//! `paths[[i, 1, p]]` is `s(tᵢ)` on path `p`.

use std::sync::Arc;

use ndarray::{s, Array3, ArrayView1};
use pricer_models::models::rates::GaussianShortRateModel;
use tracing::debug;

use super::{NumeraireScheme, SimulationConfig};
use crate::error::SimulationError;
use crate::rng::PricerRng;

/// Monte Carlo paths of `[x, s]` on a fixed time grid.
///
/// Transitions use the exact Gaussian law of `x` between grid times, so
/// there is no time-step bias in the state. Immutable after construction;
/// share it with `Arc` across solvers.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
/// use pricer_pricing::simulation::{PathSimulation, SimulationConfig};
///
/// let model = Arc::new(
///     GaussianShortRateModel::new(
///         Arc::new(FlatCurve::new(0.03)),
///         0.05,
///         VolatilityTermStructure::flat(0.01).unwrap(),
///     )
///     .unwrap(),
/// );
/// let config = SimulationConfig::builder()
///     .times(vec![0.0, 1.0, 2.0])
///     .n_paths(8)
///     .build()
///     .unwrap();
/// let sim = PathSimulation::new(model, config).unwrap();
/// assert_eq!(sim.paths().shape(), &[3, 2, 8]);
/// assert_eq!(sim.nearest_index(1.4), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PathSimulation {
    model: Arc<GaussianShortRateModel>,
    config: SimulationConfig,
    paths: Array3<f64>,
}

impl PathSimulation {
    /// Simulates all paths.
    ///
    /// # Errors
    ///
    /// - `Config` if the configuration is invalid
    /// - `Model` if a transition moment cannot be evaluated
    /// - `NonFiniteState` if a simulated state overflows
    pub fn new(
        model: Arc<GaussianShortRateModel>,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let times = config.times();
        let n_paths = config.n_paths();
        let mut paths = Array3::<f64>::zeros((times.len(), 2, n_paths));
        let mut rng = PricerRng::from_seed(config.seed());
        let mut draws = vec![0.0; n_paths];

        for (step, w) in times.windows(2).enumerate() {
            let (t0, t1) = (w[0], w[1]);
            rng.fill_normal(&mut draws);
            let std_dev = model.variance(t0, t1)?.sqrt();
            let decay = model.g_prime(t0, t1);
            match config.numeraire() {
                NumeraireScheme::RollingForward => {
                    let g = model.g(t0, t1);
                    let y0 = model.y(t0);
                    for (p, z) in draws.iter().enumerate() {
                        let x0 = paths[[step, 0, p]];
                        let s0 = paths[[step, 1, p]];
                        paths[[step + 1, 0, p]] = decay * (x0 + g * y0) + std_dev * z;
                        paths[[step + 1, 1, p]] = s0 + g * x0 + 0.5 * g * g * y0;
                    }
                }
                NumeraireScheme::BankAccount => {
                    let drift = model.risk_neutral_expectation(t0, 0.0, t1)?;
                    let dt = t1 - t0;
                    for (p, z) in draws.iter().enumerate() {
                        let x0 = paths[[step, 0, p]];
                        let s0 = paths[[step, 1, p]];
                        let x1 = decay * x0 + drift + std_dev * z;
                        paths[[step + 1, 0, p]] = x1;
                        paths[[step + 1, 1, p]] = s0 + 0.5 * (x0 + x1) * dt;
                    }
                }
            }
            if let Some(path) = paths
                .slice(s![step + 1, .., ..])
                .columns()
                .into_iter()
                .position(|c| !c.iter().all(|v| v.is_finite()))
            {
                return Err(SimulationError::NonFiniteState { time: t1, path });
            }
        }
        debug!(
            n_times = times.len(),
            n_paths,
            seed = config.seed(),
            scheme = ?config.numeraire(),
            "simulated paths"
        );
        Ok(Self {
            model,
            config,
            paths,
        })
    }

    /// Model the paths were simulated with.
    #[inline]
    pub fn model(&self) -> &Arc<GaussianShortRateModel> {
        &self.model
    }

    /// Simulation configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulation times.
    #[inline]
    pub fn times(&self) -> &[f64] {
        self.config.times()
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.config.n_paths()
    }

    /// Full state array of shape `(n_times, 2, n_paths)`.
    #[inline]
    pub fn paths(&self) -> &Array3<f64> {
        &self.paths
    }

    /// Index of the simulation time closest to `t`.
    ///
    /// Ties resolve to the later time.
    pub fn nearest_index(&self, t: f64) -> usize {
        let times = self.times();
        let idx = times.partition_point(|&ti| ti < t);
        if idx > 0 && (idx == times.len() || (t - times[idx - 1]).abs() < (t - times[idx]).abs()) {
            idx - 1
        } else {
            idx
        }
    }

    /// Short-rate states `x` at time index `idx`.
    #[inline]
    pub fn x(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.paths.slice(s![idx, 0, ..])
    }

    /// Log-numeraire states `s` at time index `idx`.
    #[inline]
    pub fn s(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.paths.slice(s![idx, 1, ..])
    }
}
