//! Control-variate decorator for the AMC rollback.

use std::fmt;
use std::sync::Arc;

use pricer_models::analytical::OptionType;
use pricer_models::instruments::{CouponBond, Payoff};
use tracing::debug;

use super::solver::{mean_and_error, AmcSolver, PathValues};
use crate::error::PricingError;
use crate::rollback::{ModelStates, Rollback, RollbackMethod};

/// How the control coefficient `β` is chosen.
///
/// `Unit` is the default: the corrected estimate stays unbiased.
/// `Estimated` minimises the sample variance but reuses the pricing paths
/// for `β`, which adds a small bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ControlCoefficient {
    /// `β = 1`.
    #[default]
    Unit,
    /// `β = Cov(V, A) / Var(A)` on the pricing paths.
    Estimated,
}

/// AMC rollback corrected by an auxiliary claim with a known price.
///
/// On the final rollback to `t = 0` the discounted auxiliary payoff `A` is
/// averaged over the pricing paths and the estimate becomes
/// `mean(V) − β (mean(A) − analytic)`. Earlier rollbacks are unchanged.
pub struct ControlVariate {
    solver: AmcSolver,
    auxiliary: Arc<dyn Payoff>,
    floored: bool,
    analytic_value: f64,
    coefficient: ControlCoefficient,
}

impl fmt::Debug for ControlVariate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlVariate")
            .field("solver", &self.solver)
            .field("observation_time", &self.auxiliary.observation_time())
            .field("floored", &self.floored)
            .field("analytic_value", &self.analytic_value)
            .field("coefficient", &self.coefficient)
            .finish()
    }
}

impl ControlVariate {
    /// Wraps `solver` with an auxiliary payoff and its present value.
    ///
    /// With `floored` the auxiliary claim pays `max(A, 0)`.
    pub fn new(
        solver: AmcSolver,
        auxiliary: Arc<dyn Payoff>,
        floored: bool,
        analytic_value: f64,
    ) -> Self {
        Self {
            solver,
            auxiliary,
            floored,
            analytic_value,
            coefficient: ControlCoefficient::default(),
        }
    }

    /// The underlying itself as control, priced off the curve.
    pub fn linear(solver: AmcSolver, underlying: CouponBond) -> Result<Self, PricingError> {
        let analytic_value = underlying.present_value()?;
        Ok(Self::new(solver, Arc::new(underlying), false, analytic_value))
    }

    /// The European option `max(U, 0)` on the underlying as control, priced
    /// by Jamshidian's decomposition.
    pub fn european(solver: AmcSolver, underlying: CouponBond) -> Result<Self, PricingError> {
        let analytic_value = underlying.model().coupon_bond_option(
            underlying.observation_time(),
            underlying.pay_times(),
            underlying.cash_flows(),
            0.0,
            OptionType::Call,
        )?;
        Ok(Self::new(solver, Arc::new(underlying), true, analytic_value))
    }

    /// Sets how the control coefficient is chosen.
    #[inline]
    pub fn with_coefficient(mut self, coefficient: ControlCoefficient) -> Self {
        self.coefficient = coefficient;
        self
    }

    /// Wrapped solver.
    #[inline]
    pub fn solver(&self) -> &AmcSolver {
        &self.solver
    }

    /// Present value of the auxiliary claim.
    #[inline]
    pub fn analytic_value(&self) -> f64 {
        self.analytic_value
    }

    /// Discounted auxiliary payoff on every path.
    fn auxiliary_values(&self) -> Result<Vec<f64>, PricingError> {
        let time = self.auxiliary.observation_time();
        let (x, s) = self.solver.path_states(time);
        let payoff = self.auxiliary.at(&x)?;
        let model = self.solver.simulation().model();
        payoff
            .iter()
            .zip(&s)
            .map(|(a, s)| -> Result<f64, PricingError> {
                let a = if self.floored { a.max(0.0) } else { *a };
                Ok(a / model.numeraire(time, *s)?)
            })
            .collect()
    }

    fn beta(&self, values: &[f64], controls: &[f64]) -> f64 {
        match self.coefficient {
            ControlCoefficient::Unit => 1.0,
            ControlCoefficient::Estimated => {
                let (mean_v, _) = mean_and_error(values);
                let (mean_a, _) = mean_and_error(controls);
                let (cov, var) = values.iter().zip(controls).fold((0.0, 0.0), |(c, v), (x, a)| {
                    (c + (x - mean_v) * (a - mean_a), v + (a - mean_a).powi(2))
                });
                if var > 0.0 {
                    cov / var
                } else {
                    0.0
                }
            }
        }
    }
}

impl RollbackMethod for ControlVariate {
    fn name(&self) -> &'static str {
        "amc_control_variate"
    }

    fn states(&self, time: f64) -> Result<ModelStates, PricingError> {
        self.solver.states(time)
    }

    fn roll_back(
        &self,
        t0: f64,
        t1: f64,
        states1: &ModelStates,
        exercise: &[f64],
        hold: &[f64],
    ) -> Result<Rollback, PricingError> {
        if t0 != 0.0 {
            return self.solver.roll_back(t0, t1, states1, exercise, hold);
        }
        let PathValues { values, .. } = self.solver.path_values(t0, t1, states1, exercise, hold)?;
        let controls = self.auxiliary_values()?;
        let start = self.solver.pricing_start();
        let values = &values[start..];
        let controls = &controls[start..];

        let beta = self.beta(values, controls);
        let adjusted: Vec<f64> = values
            .iter()
            .zip(controls)
            .map(|(v, a)| v - beta * (a - self.analytic_value))
            .collect();
        let (mean, error) = mean_and_error(&adjusted);
        debug!(
            t1,
            beta,
            control_error = mean_and_error(controls).0 - self.analytic_value,
            "control variate applied"
        );
        Ok(Rollback {
            states: ModelStates::Grid(vec![0.0]),
            values: vec![mean],
            standard_error: Some(error),
        })
    }

    fn value_at_origin(&self, rollback: &Rollback) -> Result<f64, PricingError> {
        self.solver.value_at_origin(rollback)
    }
}
