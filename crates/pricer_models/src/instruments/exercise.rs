//! Bermudan exercise schedules.

use super::InstrumentError;

/// Strictly increasing, non-negative exercise times `T₁ < … < Tₙ`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::ExerciseSchedule;
///
/// let schedule = ExerciseSchedule::new(vec![12.0, 13.0, 14.0]).unwrap();
/// assert_eq!(schedule.len(), 3);
/// assert_eq!(schedule.first(), 12.0);
/// assert_eq!(schedule.last(), 14.0);
/// assert!(ExerciseSchedule::new(vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExerciseSchedule {
    times: Vec<f64>,
}

impl ExerciseSchedule {
    /// Validate and wrap exercise times.
    ///
    /// # Errors
    /// - `EmptySchedule` for no times
    /// - `NegativeTime` for a time below zero
    /// - `NonIncreasingSchedule` for a time not above its predecessor
    pub fn new(times: Vec<f64>) -> Result<Self, InstrumentError> {
        if times.is_empty() {
            return Err(InstrumentError::EmptySchedule);
        }
        for (index, &time) in times.iter().enumerate() {
            if !(time >= 0.0) {
                return Err(InstrumentError::NegativeTime { index, time });
            }
            if index > 0 && !(time > times[index - 1]) {
                return Err(InstrumentError::NonIncreasingSchedule {
                    index,
                    time,
                    previous: times[index - 1],
                });
            }
        }
        Ok(Self { times })
    }

    /// A single exercise time.
    pub fn european(expiry: f64) -> Result<Self, InstrumentError> {
        Self::new(vec![expiry])
    }

    /// Exercise times in increasing order.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of exercise times.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false` for a validated schedule.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// First exercise time.
    #[inline]
    pub fn first(&self) -> f64 {
        self.times[0]
    }

    /// Last exercise time.
    #[inline]
    pub fn last(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}

impl TryFrom<Vec<f64>> for ExerciseSchedule {
    type Error = InstrumentError;

    fn try_from(times: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(times)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_schedule() {
        let schedule = ExerciseSchedule::new(vec![0.0, 1.0, 2.5]).unwrap();
        assert_eq!(schedule.times(), &[0.0, 1.0, 2.5]);
        assert!(!schedule.is_empty());
    }

    #[test]
    fn test_rejects_repeated_time() {
        assert_eq!(
            ExerciseSchedule::new(vec![1.0, 2.0, 2.0]),
            Err(InstrumentError::NonIncreasingSchedule {
                index: 2,
                time: 2.0,
                previous: 2.0
            })
        );
    }

    #[test]
    fn test_rejects_negative_time() {
        assert_eq!(
            ExerciseSchedule::try_from(vec![-0.5, 1.0]),
            Err(InstrumentError::NegativeTime {
                index: 0,
                time: -0.5
            })
        );
    }

    #[test]
    fn test_rejects_nan() {
        assert!(ExerciseSchedule::new(vec![1.0, f64::NAN]).is_err());
    }
}
