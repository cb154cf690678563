//! Closed-form Gaussian integration of a natural cubic spline.
//!
//! On a segment `[l, r]` the spline is `a + b·u + c·u² + d·u³` with
//! `u = x − l`. Writing `x = μ + σz` gives `u = σ(z − α)` with
//! `α = (l − μ)/σ`, so each power of `u` expands into the standard normal
//! partial moments
//!
//! ```text
//! M₀(z) = Φ(z)
//! M₁(z) = −φ(z)
//! M₂(z) = Φ(z) − zφ(z)
//! M₃(z) = −(z² + 2)φ(z)
//! ```

use pricer_core::math::interpolators::{CubicSplineInterpolator, SplineSegment};
use pricer_core::types::InterpolationError;
use pricer_models::analytical::{norm_cdf, norm_pdf};
use rayon::prelude::*;

use super::DensityQuadrature;

/// Binomial coefficients `C(n, j)` for `n ≤ 3`.
const BINOMIAL: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [1.0, 1.0, 0.0, 0.0],
    [1.0, 2.0, 1.0, 0.0],
    [1.0, 3.0, 3.0, 1.0],
];

/// Exact integration of the natural cubic spline through the grid values.
///
/// The spline is integrated only between the first and last knot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CubicSplineExact;

/// Partial moments `M₀..M₃` at `z`.
#[inline]
fn partial_moments(z: f64) -> [f64; 4] {
    if z == f64::INFINITY {
        return [1.0, 0.0, 1.0, 0.0];
    }
    if z == f64::NEG_INFINITY {
        return [0.0; 4];
    }
    let cdf = norm_cdf(z);
    let pdf = norm_pdf(z);
    [cdf, -pdf, cdf - z * pdf, -(z * z + 2.0) * pdf]
}

/// `∫ s(μ + σz) φ(z) dz` between the standardized bounds whose partial
/// moments are `lower` and `upper`.
fn segment_integral(
    segment: &SplineSegment<f64>,
    lower: &[f64; 4],
    upper: &[f64; 4],
    mean: f64,
    std_dev: f64,
) -> f64 {
    let alpha = (segment.left - mean) / std_dev;
    let delta: [f64; 4] = std::array::from_fn(|j| upper[j] - lower[j]);
    // ∫ u^n φ over the segment
    let mut scale = 1.0;
    let mut integrals = [0.0; 4];
    for (n, integral) in integrals.iter_mut().enumerate() {
        let sum: f64 = (0..=n)
            .map(|j| BINOMIAL[n][j] * (-alpha).powi((n - j) as i32) * delta[j])
            .sum();
        *integral = scale * sum;
        scale *= std_dev;
    }
    segment.a * integrals[0]
        + segment.b * integrals[1]
        + segment.c * integrals[2]
        + segment.d * integrals[3]
}

/// `E[s(X)·1{lower < X < upper}]` for `X ~ N(mean, std_dev²)`, with `s` the
/// segment polynomial continued over the whole line. Bounds may be infinite.
pub(crate) fn segment_expectation(
    segment: &SplineSegment<f64>,
    lower: f64,
    upper: f64,
    mean: f64,
    std_dev: f64,
) -> f64 {
    let lo = partial_moments((lower - mean) / std_dev);
    let hi = partial_moments((upper - mean) / std_dev);
    segment_integral(segment, &lo, &hi, mean, std_dev)
}

fn integrate_spline(spline: &CubicSplineInterpolator<f64>, mean: f64, std_dev: f64) -> f64 {
    let xs = spline.xs();
    let moments: Vec<[f64; 4]> = xs
        .iter()
        .map(|x| partial_moments((x - mean) / std_dev))
        .collect();

    spline
        .segments()
        .iter()
        .zip(moments.windows(2))
        .map(|(segment, m)| segment_integral(segment, &m[0], &m[1], mean, std_dev))
        .sum()
}

impl DensityQuadrature for CubicSplineExact {
    fn name(&self) -> &'static str {
        "cubic_spline_exact"
    }

    fn expectations(
        &self,
        grid: &[f64],
        values: &[f64],
        means: &[f64],
        std_dev: f64,
    ) -> Result<Vec<f64>, InterpolationError> {
        let spline = CubicSplineInterpolator::new(grid, values)?;
        Ok(means
            .par_iter()
            .map(|&mean| integrate_spline(&spline, mean, std_dev))
            .collect())
    }

    fn is_grid_bounded(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // Exact polynomial moments
    // ========================================

    #[test]
    fn test_linear_values_integrate_exactly() {
        // a straight line is reproduced by the natural spline
        let xs: Vec<f64> = (0..41).map(|i| -8.0 + 0.4 * i as f64).collect();
        let values: Vec<f64> = xs.iter().map(|x| 2.0 + 3.0 * x).collect();
        let e = CubicSplineExact
            .expectations(&xs, &values, &[0.0, 0.5], 1.0)
            .unwrap();
        assert_relative_eq!(e[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(e[1], 3.5, epsilon = 1e-12);
    }

    #[test]
    fn test_two_knot_segment_mass() {
        let e = CubicSplineExact
            .expectations(&[-1.0, 1.0], &[1.0, 1.0], &[0.0], 1.0)
            .unwrap();
        assert_relative_eq!(e[0], norm_cdf(1.0) - norm_cdf(-1.0), epsilon = 1e-14);
    }

    #[test]
    fn test_quadratic_close_to_second_moment() {
        let xs: Vec<f64> = (0..201).map(|i| -10.0 + 0.1 * i as f64).collect();
        let values: Vec<f64> = xs.iter().map(|x| x * x).collect();
        let e = CubicSplineExact
            .expectations(&xs, &values, &[0.0], 1.0)
            .unwrap();
        assert_relative_eq!(e[0], 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_segment_expectation_over_half_lines() {
        // s(x) = 1 + 2(x - 0.5) + 0.3(x - 0.5)^2 - 0.1(x - 0.5)^3 with u = x - 0.5
        let segment = SplineSegment {
            left: 0.5,
            right: 1.0,
            a: 1.0,
            b: 2.0,
            c: 0.3,
            d: -0.1,
        };
        let (mean, std_dev) = (0.2, 0.7);
        let below = segment_expectation(&segment, f64::NEG_INFINITY, 0.5, mean, std_dev);
        let above = segment_expectation(&segment, 0.5, f64::INFINITY, mean, std_dev);

        // full-line moments of u = X - 0.5 ~ N(-0.3, 0.49)
        let m = mean - 0.5;
        let v = std_dev * std_dev;
        let full = 1.0 + 2.0 * m + 0.3 * (m * m + v) - 0.1 * (m * m * m + 3.0 * m * v);
        assert_relative_eq!(below + above, full, epsilon = 1e-13);

        // mass-only segment gives the normal tail probability
        let unit = SplineSegment {
            left: 0.0,
            right: 1.0,
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
        };
        let tail = segment_expectation(&unit, 0.5, f64::INFINITY, mean, std_dev);
        assert_relative_eq!(tail, 1.0 - norm_cdf((0.5 - mean) / std_dev), epsilon = 1e-14);
    }

    #[test]
    fn test_partial_moments_limits() {
        let lo = partial_moments(-40.0);
        let hi = partial_moments(40.0);
        // full-line moments of N(0, 1): 1, 0, 1, 0
        assert_relative_eq!(hi[0] - lo[0], 1.0, epsilon = 1e-15);
        assert_relative_eq!(hi[1] - lo[1], 0.0, epsilon = 1e-15);
        assert_relative_eq!(hi[2] - lo[2], 1.0, epsilon = 1e-15);
        assert_relative_eq!(hi[3] - lo[3], 0.0, epsilon = 1e-15);
    }
}
