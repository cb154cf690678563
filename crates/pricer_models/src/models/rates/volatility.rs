//! Piecewise-constant short-rate volatility.

use crate::models::ModelError;

/// Piecewise-constant volatility `σ(t)` on breakpoints `t₀ < t₁ < … < tₙ₋₁`.
///
/// Value `σᵢ` applies on `[tᵢ₋₁, tᵢ)` (with `t₋₁ = 0`), and the last value
/// is extrapolated flat beyond `tₙ₋₁`. The step function is right-continuous;
/// integrals of `σ²` do not depend on the value at a breakpoint.
///
/// # Example
///
/// ```
/// use pricer_models::models::rates::VolatilityTermStructure;
///
/// let vol = VolatilityTermStructure::new(vec![1.0, 2.0, 5.0], vec![0.01, 0.008, 0.007]).unwrap();
/// assert_eq!(vol.sigma(0.5), 0.01);
/// assert_eq!(vol.sigma(1.0), 0.008);
/// assert_eq!(vol.sigma(1.5), 0.008);
/// assert_eq!(vol.sigma(30.0), 0.007);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolatilityTermStructure {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl VolatilityTermStructure {
    /// Build from breakpoints and values of equal, non-zero length.
    ///
    /// # Errors
    ///
    /// - [`ModelError::VolatilityShape`] on empty or mismatched inputs
    /// - [`ModelError::NonIncreasingBreakpoints`] if times are negative or unsorted
    /// - [`ModelError::InvalidVolatility`] if a value is negative or non-finite
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, ModelError> {
        if times.is_empty() || times.len() != values.len() {
            return Err(ModelError::VolatilityShape {
                times: times.len(),
                values: values.len(),
            });
        }
        let mut previous = 0.0;
        for (index, &time) in times.iter().enumerate() {
            let first_ok = index == 0 && time >= 0.0;
            if !time.is_finite() || !(first_ok || time > previous) {
                return Err(ModelError::NonIncreasingBreakpoints { index, time });
            }
            previous = time;
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ModelError::InvalidVolatility { index, value });
        }
        Ok(Self { times, values })
    }

    /// Constant volatility.
    pub fn flat(sigma: f64) -> Result<Self, ModelError> {
        Self::new(vec![1.0], vec![sigma])
    }

    /// Breakpoint times.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Volatility values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Index of the first breakpoint `tᵢ >= t`, or `len` beyond the last.
    #[inline]
    pub(crate) fn segment(&self, t: f64) -> usize {
        self.times.partition_point(|&ti| ti < t)
    }

    /// Value of the integration segment `idx` returned by `segment`.
    #[inline]
    pub(crate) fn segment_value(&self, idx: usize) -> f64 {
        self.values[idx.min(self.values.len() - 1)]
    }

    /// `σ(t)`, right-continuous: at a breakpoint `tᵢ` the value of the
    /// segment starting there.
    #[inline]
    pub fn sigma(&self, t: f64) -> f64 {
        let idx = self.times.partition_point(|&ti| ti <= t);
        self.segment_value(idx)
    }
}
