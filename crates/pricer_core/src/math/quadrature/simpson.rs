//! Composite Simpson's rule on irregular grids.

use crate::types::InterpolationError;

/// Integrate samples `ys` taken at strictly increasing `xs`.
///
/// Pairs of intervals are integrated with the quadratic through their three
/// samples, which handles unequal spacing. With an odd number of intervals
/// the last interval is integrated with the quadratic through the final
/// three samples. Two samples fall back to the trapezoidal rule; a single
/// sample integrates to zero.
///
/// # Errors
///
/// * `InvalidInput` - Mismatched lengths
/// * `InsufficientData` - No samples
/// * `NonMonotonicData` - `xs` not strictly increasing
///
/// # Example
///
/// ```
/// use pricer_core::math::quadrature::simpson;
///
/// let xs = [0.0, 0.3, 1.0, 1.2, 2.0];
/// let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
/// let integral = simpson(&xs, &ys).unwrap();
/// assert!((integral - 8.0 / 3.0).abs() < 1e-12);
/// ```
pub fn simpson(xs: &[f64], ys: &[f64]) -> Result<f64, InterpolationError> {
    if xs.len() != ys.len() {
        return Err(InterpolationError::InvalidInput(format!(
            "xs and ys must have same length: got {} and {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.is_empty() {
        return Err(InterpolationError::InsufficientData { got: 0, need: 1 });
    }
    if let Some(index) = xs.windows(2).position(|w| !(w[1] > w[0])) {
        return Err(InterpolationError::NonMonotonicData { index: index + 1 });
    }

    let n = xs.len();
    match n {
        1 => return Ok(0.0),
        2 => return Ok(0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1])),
        _ => {}
    }

    let intervals = n - 1;
    let paired = intervals - intervals % 2;
    let mut total = 0.0;
    for i in (0..paired).step_by(2) {
        let h0 = xs[i + 1] - xs[i];
        let h1 = xs[i + 2] - xs[i + 1];
        let hsum = h0 + h1;
        let ratio = h0 / h1;
        total += hsum / 6.0
            * (ys[i] * (2.0 - 1.0 / ratio)
                + ys[i + 1] * (hsum * hsum / (h0 * h1))
                + ys[i + 2] * (2.0 - ratio));
    }

    if intervals % 2 == 1 {
        let h_last = xs[n - 1] - xs[n - 2];
        let h_prev = xs[n - 2] - xs[n - 3];
        let alpha = (2.0 * h_last * h_last + 3.0 * h_last * h_prev) / (6.0 * (h_prev + h_last));
        let beta = (h_last * h_last + 3.0 * h_last * h_prev) / (6.0 * h_prev);
        let eta = h_last.powi(3) / (6.0 * h_prev * (h_prev + h_last));
        total += alpha * ys[n - 1] + beta * ys[n - 2] - eta * ys[n - 3];
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_grid_matches_classic_rule() {
        let xs: Vec<f64> = (0..11).map(|i| i as f64 * 0.1).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x.exp()).collect();
        let integral = simpson(&xs, &ys).unwrap();
        assert_relative_eq!(integral, 1.0_f64.exp() - 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_exact_for_quadratics_with_odd_interval_count() {
        let xs = [-1.0, -0.2, 0.5, 0.6, 1.7, 2.0];
        let ys: Vec<f64> = xs.iter().map(|x| 1.0 - x + 2.0 * x * x).collect();
        let exact = |x: f64| x - x * x / 2.0 + 2.0 * x * x * x / 3.0;
        let integral = simpson(&xs, &ys).unwrap();
        assert_relative_eq!(integral, exact(2.0) - exact(-1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_two_points_trapezoid() {
        assert_relative_eq!(simpson(&[0.0, 2.0], &[1.0, 3.0]).unwrap(), 4.0);
    }

    #[test]
    fn test_single_point_is_zero() {
        assert_eq!(simpson(&[0.5], &[10.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        assert!(matches!(
            simpson(&[0.0, 1.0], &[1.0]),
            Err(InterpolationError::InvalidInput(_))
        ));
    }
}
