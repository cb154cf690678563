//! Theta-scheme finite differences for the backward equation.
//!
//! Between exercise dates the value satisfies
//!
//! ```text
//! ∂V/∂t + (y(t) − a·x) ∂V/∂x + ½σ(t)² ∂²V/∂x² − (f(0,t) + x) V = 0
//! ```
//!
//! which is stepped backward on the grid of the later date with
//! `(I − hθL) Vⁿ = (I + h(1−θ)L) Vⁿ⁺¹`. Coefficients are frozen at each
//! sub-step midpoint; boundary rows use one-sided first derivatives and no
//! diffusion. The solution is re-gridded onto the earlier date's states with
//! a natural cubic spline.

use std::sync::Arc;

use pricer_core::math::interpolators::CubicSplineInterpolator;
use pricer_core::math::linalg::solve_tridiagonal;
use pricer_models::models::rates::GaussianShortRateModel;
use tracing::debug;

use super::density::DensityGridConfig;
use super::{check_lengths, ModelStates, Rollback, RollbackMethod};
use crate::error::{ConfigError, PricingError};

const METHOD: &str = "pde";

/// Finite-difference configuration.
///
/// `theta = 0.5` is Crank-Nicolson, `1.0` fully implicit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdeConfig {
    /// Number of grid points (odd, at least 3).
    pub grid_points: usize,
    /// Grid half-width in standard deviations of `x`.
    pub std_devs: f64,
    /// Implicitness in `[0, 1]`.
    pub theta: f64,
    /// Maximum sub-step length in years.
    pub time_step: f64,
}

impl Default for PdeConfig {
    fn default() -> Self {
        Self {
            grid_points: 101,
            std_devs: 5.0,
            theta: 0.5,
            time_step: 1.0 / 24.0,
        }
    }
}

impl PdeConfig {
    /// Sets the implicitness.
    #[inline]
    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta = theta;
        self
    }

    /// Sets the maximum sub-step length.
    #[inline]
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// Sets the number of grid points.
    #[inline]
    pub fn with_grid_points(mut self, grid_points: usize) -> Self {
        self.grid_points = grid_points;
        self
    }

    fn grid(&self) -> DensityGridConfig {
        DensityGridConfig {
            grid_points: self.grid_points,
            std_devs: self.std_devs,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid().validate()?;
        if !(0.0..=1.0).contains(&self.theta) {
            return Err(ConfigError::InvalidParameter {
                name: "theta",
                value: format!("{} must lie in [0, 1]", self.theta),
            });
        }
        if !(self.time_step > 0.0) || !self.time_step.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "time_step",
                value: format!("{} must be positive", self.time_step),
            });
        }
        Ok(())
    }
}

/// Tridiagonal operator rows `(lower, centre, upper)`.
struct Operator {
    lower: Vec<f64>,
    centre: Vec<f64>,
    upper: Vec<f64>,
}

impl Operator {
    fn new(x: &[f64], drift: impl Fn(f64) -> f64, variance: f64, rate: impl Fn(f64) -> f64) -> Self {
        let n = x.len();
        let dx = x[1] - x[0];
        let mut lower = vec![0.0; n];
        let mut centre = vec![0.0; n];
        let mut upper = vec![0.0; n];
        for (i, &xi) in x.iter().enumerate() {
            let mu = drift(xi);
            let r = rate(xi);
            if i == 0 {
                centre[i] = -mu / dx - r;
                upper[i] = mu / dx;
            } else if i == n - 1 {
                lower[i] = -mu / dx;
                centre[i] = mu / dx - r;
            } else {
                let diffusion = 0.5 * variance / (dx * dx);
                let convection = 0.5 * mu / dx;
                lower[i] = diffusion - convection;
                centre[i] = -2.0 * diffusion - r;
                upper[i] = diffusion + convection;
            }
        }
        Self {
            lower,
            centre,
            upper,
        }
    }

    /// `(I + s·L) v`.
    fn apply(&self, scale: f64, v: &[f64]) -> Vec<f64> {
        let n = v.len();
        (0..n)
            .map(|i| {
                let mut lv = self.centre[i] * v[i];
                if i > 0 {
                    lv += self.lower[i] * v[i - 1];
                }
                if i + 1 < n {
                    lv += self.upper[i] * v[i + 1];
                }
                v[i] + scale * lv
            })
            .collect()
    }

    /// Solves `(I − s·L) u = rhs`.
    fn solve(&self, scale: f64, rhs: &[f64]) -> Result<Vec<f64>, String> {
        let n = rhs.len();
        let sub: Vec<f64> = (1..n).map(|i| -scale * self.lower[i]).collect();
        let diag: Vec<f64> = self.centre.iter().map(|c| 1.0 - scale * c).collect();
        let sup: Vec<f64> = (0..n - 1).map(|i| -scale * self.upper[i]).collect();
        solve_tridiagonal(&sub, &diag, &sup, rhs).map_err(|err| err.to_string())
    }
}

/// Theta-scheme rollback on the Gaussian short-rate model.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
/// use pricer_pricing::rollback::pde::{PdeConfig, PdeSolver};
/// use pricer_pricing::rollback::RollbackMethod;
///
/// let model = Arc::new(
///     GaussianShortRateModel::new(
///         Arc::new(FlatCurve::new(0.03)),
///         0.05,
///         VolatilityTermStructure::flat(0.01).unwrap(),
///     )
///     .unwrap(),
/// );
/// let pde = PdeSolver::new(model, PdeConfig::default()).unwrap();
/// let states = pde.states(2.0).unwrap();
/// let ones = vec![1.0; states.len()];
/// let zeros = vec![0.0; states.len()];
/// let rolled = pde.roll_back(0.0, 2.0, &states, &ones, &zeros).unwrap();
/// assert!((rolled.values[0] - (-0.06_f64).exp()).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct PdeSolver {
    model: Arc<GaussianShortRateModel>,
    config: PdeConfig,
}

impl PdeSolver {
    /// Validates the configuration and builds the solver.
    pub fn new(model: Arc<GaussianShortRateModel>, config: PdeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { model, config })
    }

    /// Solver configuration.
    #[inline]
    pub fn config(&self) -> &PdeConfig {
        &self.config
    }

    fn step(&self, x: &[f64], lo: f64, hi: f64, values: &[f64]) -> Result<Vec<f64>, PricingError> {
        let h = hi - lo;
        let mid = 0.5 * (lo + hi);
        let a = self.model.mean_reversion();
        let y = self.model.y(mid);
        let sigma = self.model.sigma(mid);
        let f0 = self.model.short_rate(mid, 0.0)?;
        let operator = Operator::new(x, |xi| y - a * xi, sigma * sigma, |xi| f0 + xi);

        let theta = self.config.theta;
        let rhs = operator.apply(h * (1.0 - theta), values);
        if theta == 0.0 {
            return Ok(rhs);
        }
        operator
            .solve(h * theta, &rhs)
            .map_err(|reason| PricingError::convergence(METHOD, lo, reason))
    }

    /// Rollback when `x(t1)` has collapsed to at most two states.
    ///
    /// A grid this small only arises where the accumulated variance vanishes,
    /// so `x` moves to its `t1`-forward mean and the value is discounted with
    /// `P(t0, x, t1)`.
    fn roll_back_deterministic(
        &self,
        t0: f64,
        t1: f64,
        x1: &[f64],
        values: &[f64],
    ) -> Result<Rollback, PricingError> {
        let x0 = self.config.grid().grid(&self.model, t0)?;
        let spline = match x1.len() {
            0 => return Err(PricingError::convergence(METHOD, t1, "empty grid")),
            1 => None,
            _ => Some(
                CubicSplineInterpolator::new(x1, values)
                    .map_err(|err| PricingError::convergence(METHOD, t1, err.to_string()))?,
            ),
        };
        let rolled = x0
            .iter()
            .map(|&x| -> Result<f64, PricingError> {
                let mean = self.model.t_forward_expectation(t0, x, t1)?;
                let value = spline.as_ref().map_or(values[0], |s| s.extrapolate(mean));
                Ok(self.model.zero_bond(t0, x, t1)? * value)
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(t0, t1, grid_points = x1.len(), "pde rollback without diffusion");
        Ok(Rollback::new(ModelStates::Grid(x0), rolled))
    }
}

impl RollbackMethod for PdeSolver {
    fn name(&self) -> &'static str {
        METHOD
    }

    fn states(&self, time: f64) -> Result<ModelStates, PricingError> {
        Ok(ModelStates::Grid(self.config.grid().grid(&self.model, time)?))
    }

    fn roll_back(
        &self,
        t0: f64,
        t1: f64,
        states1: &ModelStates,
        exercise: &[f64],
        hold: &[f64],
    ) -> Result<Rollback, PricingError> {
        let ModelStates::Grid(x1) = states1 else {
            return Err(PricingError::StateMismatch {
                method: METHOD,
                expected: "grid",
            });
        };
        check_lengths(METHOD, t1, x1.len(), exercise, hold)?;
        let mut values: Vec<f64> = exercise.iter().zip(hold).map(|(u, h)| u.max(*h)).collect();
        if x1.len() < 3 {
            return self.roll_back_deterministic(t0, t1, x1, &values);
        }

        let steps = ((t1 - t0) / self.config.time_step).ceil().max(0.0) as usize;
        let h = if steps > 0 { (t1 - t0) / steps as f64 } else { 0.0 };
        for j in (0..steps).rev() {
            let lo = t0 + h * j as f64;
            let hi = if j + 1 == steps { t1 } else { t0 + h * (j + 1) as f64 };
            values = self.step(x1, lo, hi, &values)?;
        }
        debug!(t0, t1, steps, grid_points = x1.len(), "pde rollback");

        let x0 = self.config.grid().grid(&self.model, t0)?;
        let spline = CubicSplineInterpolator::new(x1, &values)
            .map_err(|err| PricingError::convergence(METHOD, t0, err.to_string()))?;
        let values = x0.iter().map(|&x| spline.extrapolate(x)).collect();
        Ok(Rollback::new(ModelStates::Grid(x0), values))
    }
}
