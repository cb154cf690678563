//! Backward induction over an exercise schedule.
//!
//! Starting at the last exercise time `Tₙ` with a zero hold value, each step
//! evaluates the payoff on the method's states, takes the exercise decision
//! `max(Uₖ, Hₖ)` and rolls the result back to `Tₖ₋₁`. The final step rolls
//! back to `t = 0` (or takes the decision in place when `T₁ = 0`) and reads
//! the value at the origin.

use pricer_models::instruments::{ExerciseSchedule, Payoff};
use tracing::{debug, info};

use crate::error::PricingError;
use crate::rollback::{Rollback, RollbackMethod};

/// Maximum distance between a payoff's observation time and its exercise time.
pub const OBSERVATION_TOLERANCE: f64 = 1e-12;

/// Outcome of a backward induction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingSummary {
    /// Present value at `t = 0`.
    pub npv: f64,
    /// Pathwise standard error of Monte Carlo estimates.
    pub standard_error: Option<f64>,
    /// Name of the rollback method.
    pub method: String,
    /// Exercise times, increasing.
    pub exercise_times: Vec<f64>,
}

/// Present value of a Bermudan option.
///
/// `payoffs[k]` is the exercise value at `expiry_times[k]`. A single expiry
/// prices the European option.
///
/// # Errors
///
/// - `InvalidSchedule` for empty, negative or non-increasing expiries
/// - `PayoffMismatch` when the payoff count differs from the expiry count
/// - `ObservationTimeMismatch` when a payoff is observed at another time
/// - Any error of the rollback method
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_models::analytical::OptionType;
/// use pricer_models::instruments::CouponBond;
/// use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
/// use pricer_pricing::engine::bermudan_option_npv;
/// use pricer_pricing::rollback::density::{DensityGridConfig, DensityIntegration};
///
/// let model = Arc::new(
///     GaussianShortRateModel::new(
///         Arc::new(FlatCurve::new(0.03)),
///         0.05,
///         VolatilityTermStructure::flat(0.01).unwrap(),
///     )
///     .unwrap(),
/// );
/// let pay_times = vec![5.0, 6.0, 7.0];
/// let cash_flows = vec![-1.0, 0.03, 1.03];
/// let underlying = CouponBond::new(model.clone(), 5.0, pay_times.clone(), cash_flows.clone()).unwrap();
/// let method = DensityIntegration::simpson(model.clone(), DensityGridConfig::default()).unwrap();
///
/// let npv = bermudan_option_npv(&[5.0], &[underlying], &method, false).unwrap();
/// let analytic = model
///     .coupon_bond_option(5.0, &pay_times, &cash_flows, 0.0, OptionType::Call)
///     .unwrap();
/// assert!((npv - analytic).abs() < 1e-4);
/// ```
pub fn bermudan_option_npv<P, M>(
    expiry_times: &[f64],
    payoffs: &[P],
    method: &M,
    show_progress: bool,
) -> Result<f64, PricingError>
where
    P: Payoff,
    M: RollbackMethod + ?Sized,
{
    let schedule = ExerciseSchedule::new(expiry_times.to_vec())?;
    price(&schedule, payoffs, method, show_progress).map(|summary| summary.npv)
}

/// Backward induction over a validated schedule.
///
/// `show_progress` raises the per-date events from `debug` to `info`.
pub fn price<P, M>(
    schedule: &ExerciseSchedule,
    payoffs: &[P],
    method: &M,
    show_progress: bool,
) -> Result<PricingSummary, PricingError>
where
    P: Payoff,
    M: RollbackMethod + ?Sized,
{
    let times = schedule.times();
    if payoffs.len() != times.len() {
        return Err(PricingError::PayoffMismatch {
            expected: times.len(),
            got: payoffs.len(),
        });
    }
    for (&exercise, payoff) in times.iter().zip(payoffs) {
        let observation = payoff.observation_time();
        if !((observation - exercise).abs() <= OBSERVATION_TOLERANCE) {
            return Err(PricingError::ObservationTimeMismatch {
                exercise,
                observation,
            });
        }
    }

    let n = times.len();
    let mut states = method.states(times[n - 1])?;
    let mut hold = vec![0.0; states.len()];
    let mut rolled = None;
    for k in (0..n).rev() {
        let exercise = payoffs[k].at(states.x())?;
        if show_progress {
            info!(method = method.name(), step = n - k, of = n, time = times[k], "exercise date");
        } else {
            debug!(method = method.name(), step = n - k, of = n, time = times[k], "exercise date");
        }
        let t0 = if k > 0 { times[k - 1] } else { 0.0 };
        if k == 0 && times[0] == 0.0 {
            let values = exercise.iter().zip(&hold).map(|(u, h)| u.max(*h)).collect();
            rolled = Some(Rollback::new(states, values));
            break;
        }
        let rollback = method.roll_back(t0, times[k], &states, &exercise, &hold)?;
        if k == 0 {
            rolled = Some(rollback);
            break;
        }
        states = rollback.states;
        hold = rollback.values;
    }

    let rollback = rolled.ok_or_else(|| {
        PricingError::convergence(method.name(), 0.0, "backward induction produced no value")
    })?;
    let npv = method.value_at_origin(&rollback)?;
    Ok(PricingSummary {
        npv,
        standard_error: rollback.standard_error,
        method: method.name().to_string(),
        exercise_times: times.to_vec(),
    })
}
