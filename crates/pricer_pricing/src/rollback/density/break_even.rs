//! Rollback split at the exercise boundary.
//!
//! `max(U, H)` has a kink where exercise and hold values cross. The first
//! root `x*` of the spline through `U − H` locates it.
//!
//! A grid-bounded quadrature integrates each smooth side separately: the
//! grid is cut at `x*`, the point `(x*, U(x*))` is appended to both halves,
//! and the two integrals are summed.
//!
//! A quadrature that reads the spline beyond the grid cannot be split
//! without counting the tails twice. For those the kink is subtracted
//! instead: with `p` the cubic of the `U − H` spline segment holding `x*`,
//! `J = p·1{exercise side}` carries the whole kink, `V − J` is smooth at
//! `x*` and goes to the quadrature, and `E[J]` is added back in closed form.

use pricer_core::math::interpolators::{CubicSplineInterpolator, SplineSegment};
use tracing::debug;

use super::spline_exact::segment_expectation;
use super::{DensityIntegration, DensityQuadrature, Transition};
use crate::error::PricingError;
use crate::rollback::{check_lengths, ModelStates, Rollback, RollbackMethod};

/// Break-even decorator over a density rollback.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
/// use pricer_pricing::rollback::density::{BreakEven, DensityGridConfig, DensityIntegration};
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
/// let inner = DensityIntegration::cubic_spline_exact(model, DensityGridConfig::default()).unwrap();
/// let method = BreakEven::new(inner);
/// assert_eq!(method.name(), "break_even");
/// ```
#[derive(Debug, Clone)]
pub struct BreakEven<Q> {
    inner: DensityIntegration<Q>,
}

impl<Q: DensityQuadrature> BreakEven<Q> {
    /// Wraps a density rollback.
    pub fn new(inner: DensityIntegration<Q>) -> Self {
        Self { inner }
    }

    /// Wrapped rollback.
    #[inline]
    pub fn inner(&self) -> &DensityIntegration<Q> {
        &self.inner
    }
}

/// Grid and values below and above `root`, both ending at the root.
fn split_at_root(
    grid: &[f64],
    values: &[f64],
    root: f64,
    root_value: f64,
) -> ((Vec<f64>, Vec<f64>), (Vec<f64>, Vec<f64>)) {
    let mut lower: (Vec<f64>, Vec<f64>) = grid
        .iter()
        .zip(values)
        .filter(|(x, _)| **x < root)
        .map(|(x, v)| (*x, *v))
        .unzip();
    lower.0.push(root);
    lower.1.push(root_value);

    let (upper_x, upper_v): (Vec<f64>, Vec<f64>) = grid
        .iter()
        .zip(values)
        .filter(|(x, _)| **x > root)
        .map(|(x, v)| (*x, *v))
        .unzip();
    let mut upper = (vec![root], vec![root_value]);
    upper.0.extend(upper_x);
    upper.1.extend(upper_v);

    (lower, upper)
}

impl<Q: DensityQuadrature> RollbackMethod for BreakEven<Q> {
    fn name(&self) -> &'static str {
        "break_even"
    }

    fn states(&self, time: f64) -> Result<ModelStates, PricingError> {
        self.inner.states(time)
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
        if x1.len() < 2 {
            return self.inner.roll_back(t0, t1, states1, exercise, hold);
        }

        let to_pricing = |reason: String| PricingError::convergence(self.name(), t1, reason);
        let difference: Vec<f64> = exercise.iter().zip(hold).map(|(u, h)| u - h).collect();
        let difference_spline = CubicSplineInterpolator::new(x1, &difference)
            .map_err(|err| to_pricing(err.to_string()))?;
        let root = difference_spline
            .first_root()
            .map_err(|err| to_pricing(err.to_string()))?;

        let transition = self.inner.transition(t0, t1)?;
        let root = match root {
            Some(root) if transition.std_dev > 0.0 => root,
            _ => return self.inner.roll_back(t0, t1, states1, exercise, hold),
        };

        let values: Vec<f64> = exercise.iter().zip(hold).map(|(u, h)| u.max(*h)).collect();
        let expectations = if self.inner.quadrature().is_grid_bounded() {
            let root_value = CubicSplineInterpolator::new(x1, exercise)
                .map_err(|err| to_pricing(err.to_string()))?
                .extrapolate(root);
            self.split_expectations(t1, x1, &values, root, root_value, &transition)?
        } else {
            let segment = *difference_spline.segment_at(root);
            self.kink_expectations(t1, x1, &values, root, &segment, &transition)?
        };
        debug!(t0, t1, break_even = root, "break-even rollback");

        let values = transition
            .discount
            .iter()
            .zip(&expectations)
            .map(|(p, e)| p * e)
            .collect();
        Ok(Rollback::new(ModelStates::Grid(transition.x0), values))
    }
}

impl<Q: DensityQuadrature> BreakEven<Q> {
    fn split_expectations(
        &self,
        t1: f64,
        x1: &[f64],
        values: &[f64],
        root: f64,
        root_value: f64,
        transition: &Transition,
    ) -> Result<Vec<f64>, PricingError> {
        let (lower, upper) = split_at_root(x1, values, root, root_value);
        let mut expectations = vec![0.0; transition.x0.len()];
        for (grid, part) in [lower, upper] {
            if grid.len() < 2 {
                continue;
            }
            let part = self.inner.expect(t1, &grid, &part, transition)?;
            for (e, p) in expectations.iter_mut().zip(part) {
                *e += p;
            }
        }
        Ok(expectations)
    }

    fn kink_expectations(
        &self,
        t1: f64,
        x1: &[f64],
        values: &[f64],
        root: f64,
        segment: &SplineSegment<f64>,
        transition: &Transition,
    ) -> Result<Vec<f64>, PricingError> {
        let slope = segment.derivative(root);
        if slope == 0.0 {
            return self.inner.expect(t1, x1, values, transition);
        }
        // exercise where U − H > 0
        let (lower, upper) = if slope > 0.0 {
            (root, f64::INFINITY)
        } else {
            (f64::NEG_INFINITY, root)
        };
        let smooth: Vec<f64> = x1
            .iter()
            .zip(values)
            .map(|(&x, v)| if x > lower && x < upper { v - segment.eval(x) } else { *v })
            .collect();
        let mut expectations = self.inner.expect(t1, x1, &smooth, transition)?;
        for (e, &mean) in expectations.iter_mut().zip(&transition.means) {
            *e += segment_expectation(segment, lower, upper, mean, transition.std_dev);
        }
        Ok(expectations)
    }
}
