//! Underlying payoffs evaluated at an exercise time.
//!
//! A payoff maps model states at its observation time to the value of the
//! instrument received on exercise. The backward-induction engine only
//! needs [`Payoff::observation_time`] and [`Payoff::at`].

use std::sync::Arc;

use super::{ExerciseSchedule, InstrumentError};
use crate::models::rates::GaussianShortRateModel;
use crate::models::ModelError;

/// Exercise value as a function of the short-rate state.
///
/// # Examples
/// ```
/// use pricer_models::instruments::Payoff;
/// use pricer_models::models::ModelError;
///
/// struct Digital { time: f64 }
///
/// impl Payoff for Digital {
///     fn observation_time(&self) -> f64 { self.time }
///     fn at(&self, states: &[f64]) -> Result<Vec<f64>, ModelError> {
///         Ok(states.iter().map(|x| if *x > 0.0 { 1.0 } else { 0.0 }).collect())
///     }
/// }
///
/// let d = Digital { time: 1.0 };
/// assert_eq!(d.at(&[-0.1, 0.2]).unwrap(), vec![0.0, 1.0]);
/// ```
pub trait Payoff: Send + Sync {
    /// Time at which the payoff is observed.
    fn observation_time(&self) -> f64;

    /// Payoff values for each state `x` at the observation time.
    fn at(&self, states: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// Fixed cash flows valued at their observation time.
///
/// `U(x) = Σ cᵢ · P(t, x, Tᵢ)`. A strike is represented by a negative cash
/// flow paid at the observation time.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_models::instruments::{CouponBond, Payoff};
/// use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
///
/// let model = Arc::new(
///     GaussianShortRateModel::new(
///         Arc::new(FlatCurve::new(0.03)),
///         0.05,
///         VolatilityTermStructure::flat(0.01).unwrap(),
///     )
///     .unwrap(),
/// );
/// let bond = CouponBond::new(model, 2.0, vec![2.0, 3.0], vec![-1.0, 1.0]).unwrap();
/// let values = bond.at(&[-0.01, 0.0, 0.01]).unwrap();
/// assert!(values[0] > values[1] && values[1] > values[2]);
/// ```
#[derive(Debug, Clone)]
pub struct CouponBond {
    model: Arc<GaussianShortRateModel>,
    observation_time: f64,
    pay_times: Vec<f64>,
    cash_flows: Vec<f64>,
}

impl CouponBond {
    /// Create a coupon bond observed at `observation_time`.
    ///
    /// # Errors
    /// - `CashFlowMismatch` for empty or unequal schedules
    /// - `PayTimeBeforeObservation` for a cash flow paid before observation
    pub fn new(
        model: Arc<GaussianShortRateModel>,
        observation_time: f64,
        pay_times: Vec<f64>,
        cash_flows: Vec<f64>,
    ) -> Result<Self, InstrumentError> {
        if pay_times.is_empty() || pay_times.len() != cash_flows.len() {
            return Err(InstrumentError::CashFlowMismatch {
                pay_times: pay_times.len(),
                cash_flows: cash_flows.len(),
            });
        }
        if let Some(&pay_time) = pay_times.iter().find(|&&t| !(t >= observation_time)) {
            return Err(InstrumentError::PayTimeBeforeObservation {
                pay_time,
                observation_time,
            });
        }
        Ok(Self {
            model,
            observation_time,
            pay_times,
            cash_flows,
        })
    }

    /// Co-terminal underlyings of a Bermudan bond option.
    ///
    /// For each exercise time `Tₖ` the underlying pays `−strike` at `Tₖ`
    /// and every cash flow of the bond paid strictly after `Tₖ`.
    ///
    /// # Errors
    /// - `CashFlowMismatch` for unequal bond schedules
    /// - `NoCashFlows` if an exercise time is at or after the last payment
    pub fn coterminal_underlyings(
        model: Arc<GaussianShortRateModel>,
        schedule: &ExerciseSchedule,
        pay_times: &[f64],
        cash_flows: &[f64],
        strike: f64,
    ) -> Result<Vec<Self>, InstrumentError> {
        if pay_times.len() != cash_flows.len() {
            return Err(InstrumentError::CashFlowMismatch {
                pay_times: pay_times.len(),
                cash_flows: cash_flows.len(),
            });
        }
        schedule
            .times()
            .iter()
            .map(|&exercise| {
                let (mut times, mut flows) = (vec![exercise], vec![-strike]);
                for (&t, &cf) in pay_times.iter().zip(cash_flows) {
                    if t > exercise {
                        times.push(t);
                        flows.push(cf);
                    }
                }
                if times.len() == 1 {
                    return Err(InstrumentError::NoCashFlows { time: exercise });
                }
                Self::new(Arc::clone(&model), exercise, times, flows)
            })
            .collect()
    }

    /// Pay times.
    #[inline]
    pub fn pay_times(&self) -> &[f64] {
        &self.pay_times
    }

    /// Signed cash flows.
    #[inline]
    pub fn cash_flows(&self) -> &[f64] {
        &self.cash_flows
    }

    /// Model used to value the cash flows.
    #[inline]
    pub fn model(&self) -> &GaussianShortRateModel {
        &self.model
    }

    /// Today's value of the cash flows, `Σ cᵢ P(0, Tᵢ)`.
    pub fn present_value(&self) -> Result<f64, ModelError> {
        let mut value = 0.0;
        for (&t, &cf) in self.pay_times.iter().zip(&self.cash_flows) {
            value += cf * self.model.curve().discount_factor(t)?;
        }
        Ok(value)
    }
}

impl Payoff for CouponBond {
    #[inline]
    fn observation_time(&self) -> f64 {
        self.observation_time
    }

    fn at(&self, states: &[f64]) -> Result<Vec<f64>, ModelError> {
        let mut values = vec![0.0; states.len()];
        for (&pay_time, &cf) in self.pay_times.iter().zip(&self.cash_flows) {
            let bonds = self.model.zero_bonds(self.observation_time, states, pay_time)?;
            for (v, p) in values.iter_mut().zip(bonds) {
                *v += cf * p;
            }
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rates::VolatilityTermStructure;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::FlatCurve;

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
    fn test_rejects_pay_time_before_observation() {
        let err = CouponBond::new(model(), 2.0, vec![1.5, 3.0], vec![1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            InstrumentError::PayTimeBeforeObservation {
                pay_time: 1.5,
                observation_time: 2.0
            }
        );
    }

    #[test]
    fn test_rejects_mismatched_cash_flows() {
        assert!(matches!(
            CouponBond::new(model(), 2.0, vec![3.0], vec![]),
            Err(InstrumentError::CashFlowMismatch { .. })
        ));
    }

    #[test]
    fn test_at_sums_zero_bonds() {
        let m = model();
        let bond =
            CouponBond::new(m.clone(), 1.0, vec![1.0, 2.0, 3.0], vec![-1.0, 0.05, 1.05]).unwrap();
        let x = 0.004;
        let expected = -1.0
            + 0.05 * m.zero_bond(1.0, x, 2.0).unwrap()
            + 1.05 * m.zero_bond(1.0, x, 3.0).unwrap();
        assert_relative_eq!(bond.at(&[x]).unwrap()[0], expected, epsilon = 1e-15);
        assert_eq!(bond.observation_time(), 1.0);
    }

    #[test]
    fn test_present_value() {
        let bond = CouponBond::new(model(), 1.0, vec![1.0, 2.0], vec![-1.0, 1.0]).unwrap();
        let expected = (-0.06_f64).exp() - (-0.03_f64).exp();
        assert_relative_eq!(bond.present_value().unwrap(), expected, epsilon = 1e-15);
    }

    #[test]
    fn test_coterminal_underlyings() {
        let pay_times = [12.0, 13.0, 14.0, 15.0, 15.0];
        let cash_flows = [-1.0, 0.03, 0.03, 0.03, 1.0];
        let schedule = ExerciseSchedule::new(vec![12.0, 13.0, 14.0]).unwrap();
        let underlyings =
            CouponBond::coterminal_underlyings(model(), &schedule, &pay_times, &cash_flows, 1.0)
                .unwrap();
        assert_eq!(underlyings.len(), 3);
        assert_eq!(underlyings[0].pay_times(), &[12.0, 13.0, 14.0, 15.0, 15.0]);
        assert_eq!(underlyings[0].cash_flows(), &[-1.0, 0.03, 0.03, 0.03, 1.0]);
        assert_eq!(underlyings[2].pay_times(), &[14.0, 15.0, 15.0]);
        assert_eq!(underlyings[2].cash_flows(), &[-1.0, 0.03, 1.0]);
    }

    #[test]
    fn test_coterminal_underlyings_past_maturity() {
        let schedule = ExerciseSchedule::new(vec![1.0, 5.0]).unwrap();
        let err =
            CouponBond::coterminal_underlyings(model(), &schedule, &[2.0, 3.0], &[0.1, 1.0], 1.0)
                .unwrap_err();
        assert_eq!(err, InstrumentError::NoCashFlows { time: 5.0 });
    }
}
