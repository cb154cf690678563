//! Longstaff-Schwartz rollback on simulated paths.

use std::sync::Arc;

use tracing::{debug, trace};

use super::controls::RegressionControls;
use super::regression::PolynomialRegression;
use crate::error::{ConfigError, PricingError};
use crate::rollback::{check_lengths, interpolate_at_origin, ModelStates, Rollback, RollbackMethod};
use crate::simulation::PathSimulation;

/// Regression configuration.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rollback::amc::AmcConfig;
///
/// let config = AmcConfig::default().with_split_ratio(0.5);
/// assert_eq!(config.max_polynomial_degree, 2);
/// assert!(config.validate().is_ok());
/// assert!(config.with_split_ratio(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmcConfig {
    /// Maximum total degree of the monomial basis.
    pub max_polynomial_degree: usize,
    /// Share of paths used to train the regressions.
    pub split_ratio: f64,
}

impl Default for AmcConfig {
    fn default() -> Self {
        Self {
            max_polynomial_degree: 2,
            split_ratio: 0.25,
        }
    }
}

impl AmcConfig {
    /// Sets the maximum polynomial degree.
    #[inline]
    pub fn with_max_polynomial_degree(mut self, degree: usize) -> Self {
        self.max_polynomial_degree = degree;
        self
    }

    /// Sets the training share of the paths.
    #[inline]
    pub fn with_split_ratio(mut self, split_ratio: f64) -> Self {
        self.split_ratio = split_ratio;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.split_ratio) {
            return Err(ConfigError::InvalidParameter {
                name: "split_ratio",
                value: format!("{} must lie in [0, 1]", self.split_ratio),
            });
        }
        Ok(())
    }

    /// Number of training paths out of `n_paths`.
    #[inline]
    pub fn training_paths(&self, n_paths: usize) -> usize {
        ((self.split_ratio * n_paths as f64).floor() as usize).min(n_paths)
    }
}

/// What the regression estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AmcMode {
    /// Regress the discounted value `max(U, H)` on the controls at the
    /// earlier date and propagate the regressed value.
    #[default]
    Continuation,
    /// Regress `U − H` at the later date for the exercise decision only and
    /// propagate the realised cash flow of that decision.
    ExerciseOnly,
}

/// American Monte Carlo rollback.
///
/// Paths `[0, n_train)` train the regressions; the remaining paths price.
/// The final rollback to `t = 0` averages the pricing paths without
/// regression.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
/// use pricer_pricing::rollback::amc::{AmcConfig, AmcSolver};
/// use pricer_pricing::rollback::RollbackMethod;
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
///     .n_paths(1000)
///     .build()
///     .unwrap();
/// let sim = Arc::new(PathSimulation::new(model, config).unwrap());
/// let amc = AmcSolver::new(sim, AmcConfig::default()).unwrap();
///
/// // a unit cash flow at t = 2 is a zero bond
/// let states = amc.states(2.0).unwrap();
/// let ones = vec![1.0; states.len()];
/// let zeros = vec![0.0; states.len()];
/// let rolled = amc.roll_back(0.0, 2.0, &states, &ones, &zeros).unwrap();
/// let value = amc.value_at_origin(&rolled).unwrap();
/// assert!((value - (-0.06_f64).exp()).abs() < 2e-3);
/// ```
#[derive(Debug, Clone)]
pub struct AmcSolver {
    simulation: Arc<PathSimulation>,
    config: AmcConfig,
    mode: AmcMode,
    controls: RegressionControls,
}

/// Discounted values on every path at the earlier date.
pub(crate) struct PathValues {
    pub(crate) x0: Vec<f64>,
    pub(crate) s0: Vec<f64>,
    pub(crate) values: Vec<f64>,
}

impl AmcSolver {
    /// Continuation-mode solver with state-variable controls.
    pub fn new(simulation: Arc<PathSimulation>, config: AmcConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            simulation,
            config,
            mode: AmcMode::default(),
            controls: RegressionControls::default(),
        })
    }

    /// Sets the regression mode.
    #[inline]
    pub fn with_mode(mut self, mode: AmcMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the regression controls.
    #[inline]
    pub fn with_controls(mut self, controls: RegressionControls) -> Self {
        self.controls = controls;
        self
    }

    /// Simulated paths.
    #[inline]
    pub fn simulation(&self) -> &Arc<PathSimulation> {
        &self.simulation
    }

    /// Regression configuration.
    #[inline]
    pub fn config(&self) -> &AmcConfig {
        &self.config
    }

    /// Regression mode.
    #[inline]
    pub fn mode(&self) -> AmcMode {
        self.mode
    }

    /// First index of the pricing paths.
    pub(crate) fn pricing_start(&self) -> usize {
        let n = self.simulation.n_paths();
        let start = self.config.training_paths(n);
        if start < n {
            start
        } else {
            0
        }
    }

    /// Mean and standard error over the pricing paths.
    pub(crate) fn pricing_mean(&self, values: &[f64]) -> (f64, f64) {
        mean_and_error(&values[self.pricing_start().min(values.len())..])
    }

    pub(crate) fn path_states(&self, time: f64) -> (Vec<f64>, Vec<f64>) {
        let idx = self.simulation.nearest_index(time);
        (
            self.simulation.x(idx).to_vec(),
            self.simulation.s(idx).to_vec(),
        )
    }

    /// `N(t₀)/N(t₁)` per path.
    fn deflators(&self, t0: f64, s0: &[f64], t1: f64, s1: &[f64]) -> Result<Vec<f64>, PricingError> {
        let model = self.simulation.model();
        let curve_ratio = model.numeraire(t0, 0.0)? / model.numeraire(t1, 0.0)?;
        Ok(s0
            .iter()
            .zip(s1)
            .map(|(a, b)| (a - b).exp() * curve_ratio)
            .collect())
    }

    fn regression(
        &self,
        time: f64,
        controls: &[Vec<f64>],
        target: &[f64],
    ) -> Result<PolynomialRegression, PricingError> {
        PolynomialRegression::fit(controls, target, self.config.max_polynomial_degree)
            .map_err(|err| PricingError::convergence(self.name(), time, err.to_string()))
    }

    /// Discounts `max(U₁, H₁)` (or the realised decision) to `t₀` on every path.
    pub(crate) fn path_values(
        &self,
        t0: f64,
        t1: f64,
        states1: &ModelStates,
        exercise: &[f64],
        hold: &[f64],
    ) -> Result<PathValues, PricingError> {
        let ModelStates::Paths { x: x1, s: s1 } = states1 else {
            return Err(PricingError::StateMismatch {
                method: self.name(),
                expected: "path",
            });
        };
        check_lengths(self.name(), t1, x1.len(), exercise, hold)?;
        let n = x1.len();
        if n != self.simulation.n_paths() {
            return Err(PricingError::convergence(
                self.name(),
                t1,
                format!("{n} states for {} simulated paths", self.simulation.n_paths()),
            ));
        }

        let (x0, s0) = self.path_states(t0);
        let deflators = self.deflators(t0, &s0, t1, s1)?;
        let n_train = self.config.training_paths(n);
        let model = self.simulation.model();

        let values = match self.mode {
            AmcMode::Continuation => {
                let discounted: Vec<f64> = deflators
                    .iter()
                    .zip(exercise.iter().zip(hold))
                    .map(|(d, (u, h))| d * u.max(*h))
                    .collect();
                if n_train > 0 && t0 > 0.0 {
                    let controls = self.controls.evaluate(model, t0, &x0)?;
                    let fit = self.regression(t0, &controls, &discounted[..n_train])?;
                    trace!(t0, n_train, "continuation regression");
                    fit.predict(&controls, n)
                } else {
                    discounted
                }
            }
            AmcMode::ExerciseOnly => {
                let hold_is_zero = hold.iter().all(|h| *h == 0.0);
                let indicator: Vec<f64> = if n_train > 0 && !hold_is_zero {
                    let controls = self.controls.evaluate(model, t1, x1)?;
                    let target: Vec<f64> = exercise[..n_train]
                        .iter()
                        .zip(&hold[..n_train])
                        .map(|(u, h)| u - h)
                        .collect();
                    let fit = self.regression(t1, &controls, &target)?;
                    trace!(t1, n_train, "exercise regression");
                    fit.predict(&controls, n)
                } else {
                    exercise.iter().zip(hold).map(|(u, h)| u - h).collect()
                };
                deflators
                    .iter()
                    .zip(&indicator)
                    .zip(exercise.iter().zip(hold))
                    .map(|((d, i), (u, h))| d * if *i > 0.0 { *u } else { *h })
                    .collect()
            }
        };

        if let Some(path) = values.iter().position(|v: &f64| !v.is_finite()) {
            return Err(PricingError::convergence(
                self.name(),
                t0,
                format!("non-finite value on path {path}"),
            ));
        }
        Ok(PathValues { x0, s0, values })
    }
}

/// Sample mean and its standard error.
pub(crate) fn mean_and_error(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    if n < 2 {
        return (mean, 0.0);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (mean, (variance / n as f64).sqrt())
}

impl RollbackMethod for AmcSolver {
    fn name(&self) -> &'static str {
        match self.mode {
            AmcMode::Continuation => "amc",
            AmcMode::ExerciseOnly => "amc_exercise_only",
        }
    }

    fn states(&self, time: f64) -> Result<ModelStates, PricingError> {
        let (x, s) = self.path_states(time);
        Ok(ModelStates::Paths { x, s })
    }

    fn roll_back(
        &self,
        t0: f64,
        t1: f64,
        states1: &ModelStates,
        exercise: &[f64],
        hold: &[f64],
    ) -> Result<Rollback, PricingError> {
        let PathValues { x0, s0, values } = self.path_values(t0, t1, states1, exercise, hold)?;
        debug!(method = self.name(), t0, t1, n_paths = values.len(), "amc rollback");
        if t0 == 0.0 {
            let (mean, error) = self.pricing_mean(&values);
            return Ok(Rollback {
                states: ModelStates::Grid(vec![0.0]),
                values: vec![mean],
                standard_error: Some(error),
            });
        }
        Ok(Rollback::new(ModelStates::Paths { x: x0, s: s0 }, values))
    }

    fn value_at_origin(&self, rollback: &Rollback) -> Result<f64, PricingError> {
        match &rollback.states {
            ModelStates::Paths { .. } => Ok(self.pricing_mean(&rollback.values).0),
            ModelStates::Grid(x) => interpolate_at_origin(self.name(), x, &rollback.values),
        }
    }
}
