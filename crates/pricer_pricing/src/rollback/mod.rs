//! Rollback methods: discounted conditional expectations between exercise dates.
//!
//! A [`RollbackMethod`] owns its state discretisation (a grid or a set of
//! simulated paths) and maps values at a later exercise time to values at
//! an earlier one:
//!
//! ```text
//! V(t₀, x₀) = N(t₀, x₀) · E[ max(U(t₁), H(t₁)) / N(t₁) | x₀ ]
//! ```
//!
//! ## Available Methods
//!
//! - [`density`]: quadrature over the Gaussian transition density
//!   (Simpson, cubic-spline-exact, Gauss-Hermite, break-even splitting)
//! - [`pde`]: theta-scheme finite differences on the backward equation
//! - [`amc`]: American Monte Carlo regression on simulated paths, with an
//!   optional control variate

pub mod amc;
pub mod density;
pub mod pde;

use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};

use crate::error::PricingError;

/// State representation of a rollback method at one time.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelStates {
    /// Grid of short-rate states `x`.
    Grid(Vec<f64>),
    /// Simulated states `x` and log numeraire `s` per path.
    Paths {
        /// Short-rate states
        x: Vec<f64>,
        /// Log-numeraire states
        s: Vec<f64>,
    },
}

impl ModelStates {
    /// Short-rate states `x`, one per grid point or path.
    #[inline]
    pub fn x(&self) -> &[f64] {
        match self {
            Self::Grid(x) => x,
            Self::Paths { x, .. } => x,
        }
    }

    /// Number of states.
    #[inline]
    pub fn len(&self) -> usize {
        self.x().len()
    }

    /// True when no states are present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x().is_empty()
    }
}

/// Result of one rollback step.
#[derive(Debug, Clone, PartialEq)]
pub struct Rollback {
    /// States at the earlier time.
    pub states: ModelStates,
    /// Rolled-back values at those states.
    pub values: Vec<f64>,
    /// Pathwise standard error of a final Monte Carlo average, if any.
    pub standard_error: Option<f64>,
}

impl Rollback {
    /// Rollback result without a standard error.
    #[inline]
    pub fn new(states: ModelStates, values: Vec<f64>) -> Self {
        Self {
            states,
            values,
            standard_error: None,
        }
    }
}

/// A single step of backward induction.
///
/// Implementations must be deterministic: the same inputs give the same
/// values, whether or not they evaluate states in parallel.
pub trait RollbackMethod: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// States at which the method represents values at `time`.
    fn states(&self, time: f64) -> Result<ModelStates, PricingError>;

    /// Roll `max(exercise, hold)` at `t1` back to `t0 < t1`.
    ///
    /// `states1` are the states returned for `t1` (by [`states`](Self::states)
    /// or a previous rollback) and `exercise`, `hold` hold one value per state.
    fn roll_back(
        &self,
        t0: f64,
        t1: f64,
        states1: &ModelStates,
        exercise: &[f64],
        hold: &[f64],
    ) -> Result<Rollback, PricingError>;

    /// Present value from a rollback to `t = 0`.
    ///
    /// The default interpolates linearly at `x = 0`, clamping outside the
    /// states.
    fn value_at_origin(&self, rollback: &Rollback) -> Result<f64, PricingError> {
        interpolate_at_origin(self.name(), rollback.states.x(), &rollback.values)
    }
}

/// Linear interpolation of `values` at `x = 0`, flat outside the states.
pub(crate) fn interpolate_at_origin(
    method: &'static str,
    xs: &[f64],
    values: &[f64],
) -> Result<f64, PricingError> {
    match (xs, values) {
        ([], _) | (_, []) => Err(PricingError::convergence(method, 0.0, "no states at t = 0")),
        (_, [v]) => Ok(*v),
        _ => {
            let x = 0.0_f64.clamp(xs[0], xs[xs.len() - 1]);
            LinearInterpolator::new(xs, values)
                .and_then(|interp| interp.interpolate(x))
                .map_err(|err| PricingError::convergence(method, 0.0, err.to_string()))
        }
    }
}

/// Checks that `exercise` and `hold` match the number of states.
pub(crate) fn check_lengths(
    method: &'static str,
    time: f64,
    states: usize,
    exercise: &[f64],
    hold: &[f64],
) -> Result<(), PricingError> {
    if exercise.len() != states || hold.len() != states {
        return Err(PricingError::convergence(
            method,
            time,
            format!(
                "{} states but {} exercise and {} hold values",
                states,
                exercise.len(),
                hold.len()
            ),
        ));
    }
    Ok(())
}
