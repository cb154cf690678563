//! Rollback by integration over the Gaussian transition density.
//!
//! In the `t₁`-forward measure `x(t₁) | x(t₀)` is Gaussian with mean
//! `E^{t₁}[x(t₁) | x₀]` and variance `Var(t₀, t₁)`, hence
//!
//! ```text
//! V(t₀, x₀) = P(t₀, x₀, t₁) · ∫ max(U, H)(x₁) φ(x₁; μ(x₀), σ²) dx₁
//! ```
//!
//! The integral is evaluated on the grid of `t₁` by a [`DensityQuadrature`]:
//!
//! | Quadrature | Integrand | Support |
//! |------------|-----------|---------|
//! | [`Simpson`] | grid values × density | grid |
//! | [`CubicSplineExact`] | natural spline, closed-form Gaussian moments | grid |
//! | [`Hermite`] | spline at Gauss-Hermite nodes | unbounded |
//!
//! [`BreakEven`] takes the kink at the exercise boundary out of the
//! integrand for any of them.

mod break_even;
mod hermite;
mod simpson;
mod spline_exact;

pub use break_even::BreakEven;
pub use hermite::Hermite;
pub use simpson::Simpson;
pub use spline_exact::CubicSplineExact;

use std::sync::Arc;

use pricer_core::math::interpolators::CubicSplineInterpolator;
use pricer_core::types::InterpolationError;
use pricer_models::models::rates::GaussianShortRateModel;
use tracing::debug;

use super::{check_lengths, ModelStates, Rollback, RollbackMethod};
use crate::error::{ConfigError, PricingError};

/// Grid geometry of the density methods.
///
/// The grid at time `t` has `grid_points` equally spaced states spanning
/// `±std_devs · sqrt(Var(x(t)))`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rollback::density::DensityGridConfig;
///
/// let config = DensityGridConfig::default().with_grid_points(201);
/// assert_eq!(config.grid_points, 201);
/// assert_eq!(config.std_devs, 5.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DensityGridConfig {
    /// Number of grid points (odd, at least 3).
    pub grid_points: usize,
    /// Half-width of the grid in standard deviations.
    pub std_devs: f64,
}

impl Default for DensityGridConfig {
    fn default() -> Self {
        Self {
            grid_points: 101,
            std_devs: 5.0,
        }
    }
}

impl DensityGridConfig {
    /// Sets the number of grid points.
    #[inline]
    pub fn with_grid_points(mut self, grid_points: usize) -> Self {
        self.grid_points = grid_points;
        self
    }

    /// Sets the grid half-width in standard deviations.
    #[inline]
    pub fn with_std_devs(mut self, std_devs: f64) -> Self {
        self.std_devs = std_devs;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_points < 3 || self.grid_points % 2 == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "grid_points",
                value: format!("{} must be odd and at least 3", self.grid_points),
            });
        }
        if !(self.std_devs > 0.0) || !self.std_devs.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "std_devs",
                value: format!("{} must be positive", self.std_devs),
            });
        }
        Ok(())
    }

    /// Equally spaced states at `time`, or `[0]` when `x(time)` is deterministic.
    pub(crate) fn grid(&self, model: &GaussianShortRateModel, time: f64) -> Result<Vec<f64>, PricingError> {
        let std_dev = model.variance(0.0, time)?.sqrt();
        if std_dev == 0.0 {
            return Ok(vec![0.0]);
        }
        let half_width = self.std_devs * std_dev;
        let step = 2.0 * half_width / (self.grid_points - 1) as f64;
        Ok((0..self.grid_points)
            .map(|i| -half_width + step * i as f64)
            .collect())
    }
}

/// Gaussian expectation of grid values.
pub trait DensityQuadrature: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// `E[V(X)]` for `X ~ N(mean, std_dev²)` and each mean, where `V` is
    /// given by `values` on the strictly increasing `grid`.
    ///
    /// Called with `std_dev > 0` and at least two grid points.
    fn expectations(
        &self,
        grid: &[f64],
        values: &[f64],
        means: &[f64],
        std_dev: f64,
    ) -> Result<Vec<f64>, InterpolationError>;

    /// True when the integral is confined to the supplied grid, so that
    /// integrals over adjacent grids add up without overlapping tails.
    fn is_grid_bounded(&self) -> bool {
        false
    }
}

/// Transition from the grid at `t₀` to `t₁`.
pub(crate) struct Transition {
    pub(crate) x0: Vec<f64>,
    pub(crate) means: Vec<f64>,
    pub(crate) std_dev: f64,
    pub(crate) discount: Vec<f64>,
}

/// Density-integration rollback with a pluggable quadrature.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
/// use pricer_pricing::rollback::density::{DensityGridConfig, DensityIntegration};
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
/// let method = DensityIntegration::simpson(model, DensityGridConfig::default()).unwrap();
/// assert_eq!(method.states(0.0).unwrap().len(), 1);
/// assert_eq!(method.states(5.0).unwrap().len(), 101);
/// ```
#[derive(Debug, Clone)]
pub struct DensityIntegration<Q> {
    model: Arc<GaussianShortRateModel>,
    config: DensityGridConfig,
    quadrature: Q,
}

impl<Q: DensityQuadrature> DensityIntegration<Q> {
    /// Density integration with the given quadrature.
    pub fn with_quadrature(
        model: Arc<GaussianShortRateModel>,
        config: DensityGridConfig,
        quadrature: Q,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            model,
            config,
            quadrature,
        })
    }

    /// Grid configuration.
    #[inline]
    pub fn config(&self) -> &DensityGridConfig {
        &self.config
    }

    /// Quadrature rule.
    #[inline]
    pub fn quadrature(&self) -> &Q {
        &self.quadrature
    }

    pub(crate) fn transition(&self, t0: f64, t1: f64) -> Result<Transition, PricingError> {
        let x0 = self.config.grid(&self.model, t0)?;
        let variance = self.model.variance(t0, t1)?;
        if !variance.is_finite() {
            return Err(PricingError::convergence(
                self.quadrature.name(),
                t1,
                format!("non-finite conditional variance {variance} from t = {t0}"),
            ));
        }
        let means = x0
            .iter()
            .map(|&x| self.model.t_forward_expectation(t0, x, t1))
            .collect::<Result<Vec<_>, _>>()?;
        let discount = self.model.zero_bonds(t0, &x0, t1)?;
        Ok(Transition {
            x0,
            means,
            std_dev: variance.sqrt(),
            discount,
        })
    }

    /// Undiscounted expectations of `values` on `grid` for each transition mean.
    pub(crate) fn expect(
        &self,
        t1: f64,
        grid: &[f64],
        values: &[f64],
        transition: &Transition,
    ) -> Result<Vec<f64>, PricingError> {
        let to_pricing = |err: InterpolationError| {
            PricingError::convergence(self.quadrature.name(), t1, err.to_string())
        };
        match grid.len() {
            0 => Err(PricingError::convergence(
                self.quadrature.name(),
                t1,
                "empty grid",
            )),
            1 => Ok(vec![values[0]; transition.means.len()]),
            _ if transition.std_dev == 0.0 => {
                let spline = CubicSplineInterpolator::new(grid, values).map_err(to_pricing)?;
                Ok(transition
                    .means
                    .iter()
                    .map(|&m| spline.extrapolate(m))
                    .collect())
            }
            _ => self
                .quadrature
                .expectations(grid, values, &transition.means, transition.std_dev)
                .map_err(to_pricing),
        }
    }
}

impl DensityIntegration<Simpson> {
    /// Simpson's rule on the grid.
    pub fn simpson(
        model: Arc<GaussianShortRateModel>,
        config: DensityGridConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_quadrature(model, config, Simpson)
    }
}

impl DensityIntegration<CubicSplineExact> {
    /// Exact Gaussian integration of the natural cubic spline.
    pub fn cubic_spline_exact(
        model: Arc<GaussianShortRateModel>,
        config: DensityGridConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_quadrature(model, config, CubicSplineExact)
    }
}

impl DensityIntegration<Hermite> {
    /// Gauss-Hermite quadrature of the given degree.
    pub fn hermite(
        model: Arc<GaussianShortRateModel>,
        degree: usize,
        config: DensityGridConfig,
    ) -> Result<Self, ConfigError> {
        let quadrature = Hermite::new(degree)?;
        Self::with_quadrature(model, config, quadrature)
    }
}

impl<Q: DensityQuadrature> RollbackMethod for DensityIntegration<Q> {
    fn name(&self) -> &'static str {
        self.quadrature.name()
    }

    fn states(&self, time: f64) -> Result<ModelStates, PricingError> {
        Ok(ModelStates::Grid(self.config.grid(&self.model, time)?))
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
                method: self.name(),
                expected: "grid",
            });
        };
        check_lengths(self.name(), t1, x1.len(), exercise, hold)?;
        let values: Vec<f64> = exercise.iter().zip(hold).map(|(u, h)| u.max(*h)).collect();
        let transition = self.transition(t0, t1)?;
        let expectations = self.expect(t1, x1, &values, &transition)?;
        debug!(
            method = self.name(),
            t0,
            t1,
            grid_points = transition.x0.len(),
            "density rollback"
        );
        let values = transition
            .discount
            .iter()
            .zip(&expectations)
            .map(|(p, e)| p * e)
            .collect();
        Ok(Rollback::new(ModelStates::Grid(transition.x0), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::FlatCurve;
    use pricer_models::models::rates::VolatilityTermStructure;

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

    #[test]
    fn test_config_validation() {
        assert!(DensityGridConfig::default().validate().is_ok());
        assert!(DensityGridConfig::default()
            .with_grid_points(100)
            .validate()
            .is_err());
        assert!(DensityGridConfig::default()
            .with_std_devs(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_grid_spans_std_devs() {
        let m = model();
        let config = DensityGridConfig::default();
        let grid = config.grid(&m, 4.0).unwrap();
        let std_dev = m.variance(0.0, 4.0).unwrap().sqrt();
        assert_eq!(grid.len(), 101);
        assert_relative_eq!(grid[0], -5.0 * std_dev, epsilon = 1e-15);
        assert_relative_eq!(grid[100], 5.0 * std_dev, epsilon = 1e-15);
        assert_relative_eq!(grid[50], 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_bond_rolls_back_exactly() {
        // unit payoff at t1 rolls back to P(t0, x0, t1)
        let m = model();
        let method = DensityIntegration::simpson(m.clone(), DensityGridConfig::default()).unwrap();
        let states = method.states(5.0).unwrap();
        let ones = vec![1.0; states.len()];
        let zeros = vec![0.0; states.len()];
        let rb = method.roll_back(2.0, 5.0, &states, &ones, &zeros).unwrap();
        for (x, v) in rb.states.x().iter().zip(&rb.values) {
            let p = m.zero_bond(2.0, *x, 5.0).unwrap();
            assert_relative_eq!(*v, p, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_rejects_path_states() {
        let method = DensityIntegration::simpson(model(), DensityGridConfig::default()).unwrap();
        let states = ModelStates::Paths {
            x: vec![0.0],
            s: vec![0.0],
        };
        assert!(matches!(
            method.roll_back(0.0, 1.0, &states, &[1.0], &[0.0]),
            Err(PricingError::StateMismatch { .. })
        ));
    }
}
