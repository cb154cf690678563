//! Piecewise-flat instantaneous forward curve.

use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::types::time::{Date, DayCountConvention};
use num_traits::Float;

/// Yield curve with backward-flat continuously compounded forward rates.
///
/// Pillar `i` at time `t_i` carries rate `r_i`, which applies on
/// `(t_{i-1}, t_i]` with `t_{-1} = 0`. Beyond the last pillar the last rate
/// is extrapolated flat.
///
/// ```text
/// D(t) = exp(-∫₀ᵗ f(u) du)
/// ```
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{ForwardCurve, YieldCurve};
///
/// let curve = ForwardCurve::new(vec![1.0, 5.0], vec![0.01, 0.03]).unwrap();
///
/// // One year at 1%, then four years at 3%
/// let df = curve.discount_factor(5.0).unwrap();
/// assert!((df - (-0.13_f64).exp()).abs() < 1e-15);
/// assert_eq!(curve.instantaneous_forward(0.5).unwrap(), 0.01);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardCurve<T: Float> {
    times: Vec<T>,
    rates: Vec<T>,
    /// Integrated forward rate at each pillar
    cumulative: Vec<T>,
}

impl<T: Float> ForwardCurve<T> {
    /// Build the curve from pillar year fractions and forward rates.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - No pillars, or mismatched lengths
    /// * `InvalidPillar` - Pillar times not positive and strictly increasing
    pub fn new(times: Vec<T>, rates: Vec<T>) -> Result<Self, MarketDataError> {
        if times.is_empty() || times.len() != rates.len() {
            return Err(MarketDataError::InsufficientData {
                got: times.len().min(rates.len()),
                need: times.len().max(1),
            });
        }
        let mut previous = T::zero();
        let mut integral = T::zero();
        let mut cumulative = Vec::with_capacity(times.len());
        for (index, (&t, &r)) in times.iter().zip(rates.iter()).enumerate() {
            if !(t > previous) {
                return Err(MarketDataError::InvalidPillar {
                    index,
                    t: t.to_f64().unwrap_or(f64::NAN),
                });
            }
            integral = integral + r * (t - previous);
            cumulative.push(integral);
            previous = t;
        }
        Ok(Self {
            times,
            rates,
            cumulative,
        })
    }

    /// Build the curve from pillar dates measured from an explicit reference date.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::market_data::curves::{ForwardCurve, YieldCurve};
    /// use pricer_core::types::time::{Date, DayCountConvention};
    ///
    /// let reference = Date::from_ymd(2024, 1, 1).unwrap();
    /// let pillars = [Date::from_ymd(2025, 1, 1).unwrap(), Date::from_ymd(2029, 1, 1).unwrap()];
    /// let curve = ForwardCurve::from_dates(
    ///     reference,
    ///     &pillars,
    ///     vec![0.02_f64, 0.025],
    ///     DayCountConvention::Actual365Fixed,
    /// )
    /// .unwrap();
    /// assert!(curve.discount_factor(1.0).unwrap() < 1.0);
    /// ```
    pub fn from_dates(
        reference: Date,
        dates: &[Date],
        rates: Vec<T>,
        convention: DayCountConvention,
    ) -> Result<Self, MarketDataError> {
        let times = dates
            .iter()
            .map(|&d| {
                let t = convention.year_fraction(reference, d);
                T::from(t).ok_or(MarketDataError::InvalidMaturity { t })
            })
            .collect::<Result<Vec<T>, _>>()?;
        Self::new(times, rates)
    }

    /// Pillar year fractions.
    #[inline]
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// Pillar forward rates.
    #[inline]
    pub fn rates(&self) -> &[T] {
        &self.rates
    }

    /// Index of the pillar whose rate applies at `t`.
    #[inline]
    fn pillar(&self, t: T) -> usize {
        self.times
            .partition_point(|&ti| ti < t)
            .min(self.times.len() - 1)
    }

    /// `∫₀ᵗ f(u) du`
    fn integrated_forward(&self, t: T) -> T {
        let i = self.pillar(t);
        let (start, base) = if i == 0 {
            (T::zero(), T::zero())
        } else {
            (self.times[i - 1], self.cumulative[i - 1])
        };
        base + self.rates[i] * (t - start)
    }
}

impl<T: Float> YieldCurve<T> for ForwardCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok((-self.integrated_forward(t)).exp())
    }

    fn instantaneous_forward(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rates[self.pillar(t)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_curve() -> ForwardCurve<f64> {
        ForwardCurve::new(vec![1.0, 2.0, 5.0, 10.0], vec![0.01, 0.015, 0.02, 0.025]).unwrap()
    }

    #[test]
    fn test_discount_factor_at_pillars() {
        let curve = sample_curve();
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
        assert_relative_eq!(curve.discount_factor(1.0).unwrap(), (-0.01_f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(
            curve.discount_factor(5.0).unwrap(),
            (-(0.01 + 0.015 + 0.06_f64)).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_flat_extrapolation() {
        let curve = sample_curve();
        let d10 = curve.discount_factor(10.0).unwrap();
        let d12 = curve.discount_factor(12.0).unwrap();
        assert_relative_eq!(d12 / d10, (-0.05_f64).exp(), epsilon = 1e-14);
        assert_eq!(curve.instantaneous_forward(30.0).unwrap(), 0.025);
    }

    #[test]
    fn test_backward_flat_forward_at_pillar() {
        let curve = sample_curve();
        // The rate of pillar i applies up to and including t_i
        assert_eq!(curve.instantaneous_forward(2.0).unwrap(), 0.015);
        assert_eq!(curve.instantaneous_forward(2.0 + 1e-9).unwrap(), 0.02);
    }

    #[test]
    fn test_forward_rate_matches_piecewise_rate() {
        let curve = sample_curve();
        assert_relative_eq!(curve.forward_rate(2.5, 4.5).unwrap(), 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_increasing_pillars() {
        let result = ForwardCurve::new(vec![1.0, 1.0], vec![0.01, 0.02]);
        assert_eq!(result, Err(MarketDataError::InvalidPillar { index: 1, t: 1.0 }));
    }

    #[test]
    fn test_rejects_pillar_on_reference_date() {
        let reference = Date::from_ymd(2024, 1, 1).unwrap();
        let result = ForwardCurve::<f64>::from_dates(
            reference,
            &[reference],
            vec![0.01],
            DayCountConvention::Actual365Fixed,
        );
        assert!(matches!(result, Err(MarketDataError::InvalidPillar { index: 0, .. })));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(ForwardCurve::<f64>::new(vec![], vec![]).is_err());
    }
}
