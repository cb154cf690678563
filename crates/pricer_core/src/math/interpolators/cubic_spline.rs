//! Natural cubic spline interpolation.

use super::{find_segment, out_of_bounds, validate_knots, Interpolator};
use crate::math::solvers::{BrentSolver, SolverConfig};
use crate::types::{InterpolationError, SolverError};
use num_traits::Float;

/// Sub-intervals scanned per segment when searching for roots.
const ROOT_SCAN_STEPS: usize = 4;

/// Cubic polynomial of one spline segment in local coordinates.
///
/// Represents `y = a + b*(x-left) + c*(x-left)² + d*(x-left)³` on `[left, right]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSegment<T: Float> {
    /// Left knot
    pub left: T,
    /// Right knot
    pub right: T,
    /// Constant term (y value at `left`)
    pub a: T,
    /// Linear coefficient
    pub b: T,
    /// Quadratic coefficient
    pub c: T,
    /// Cubic coefficient
    pub d: T,
}

impl<T: Float> SplineSegment<T> {
    /// Evaluate the segment polynomial at `x` (no bounds check).
    #[inline]
    pub fn eval(&self, x: T) -> T {
        let dx = x - self.left;
        self.a + dx * (self.b + dx * (self.c + dx * self.d))
    }

    /// First derivative of the segment polynomial at `x` (no bounds check).
    #[inline]
    pub fn derivative(&self, x: T) -> T {
        let dx = x - self.left;
        let two = T::one() + T::one();
        let three = two + T::one();
        self.b + dx * (two * self.c + three * self.d * dx)
    }
}

/// Natural cubic spline interpolator with C² continuity.
///
/// Zero second derivative at both boundaries. With two knots the spline
/// degenerates to the straight line through them.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{CubicSplineInterpolator, Interpolator};
///
/// let xs: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
/// let ys = [0.0, 1.0, 4.0, 9.0];
///
/// let spline = CubicSplineInterpolator::new(&xs, &ys).unwrap();
/// assert!((spline.interpolate(2.0).unwrap() - 4.0).abs() < 1e-12);
///
/// // End polynomials continue beyond the knots
/// let beyond = spline.extrapolate(3.5);
/// assert!(beyond.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct CubicSplineInterpolator<T: Float> {
    xs: Vec<T>,
    segments: Vec<SplineSegment<T>>,
}

impl<T: Float> CubicSplineInterpolator<T> {
    /// Construct a natural cubic spline from strictly increasing knots.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - Fewer than 2 data points
    /// * `NonMonotonicData` - `xs` not strictly increasing
    /// * `InvalidInput` - Mismatched array lengths
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        validate_knots(xs, ys, 2)?;
        let segments = Self::compute_segments(xs, ys);
        Ok(Self {
            xs: xs.to_vec(),
            segments,
        })
    }

    /// Solve the tridiagonal system for the knot second derivatives `M`
    /// (Thomas algorithm) and convert to per-segment polynomials.
    fn compute_segments(xs: &[T], ys: &[T]) -> Vec<SplineSegment<T>> {
        let n = xs.len();
        let two = T::one() + T::one();
        let six = two + two + two;

        let h: Vec<T> = xs.windows(2).map(|w| w[1] - w[0]).collect();

        // Natural boundary: M[0] = M[n-1] = 0
        let mut m = vec![T::zero(); n];
        if n > 2 {
            let interior = n - 2;
            let mut c_prime = vec![T::zero(); interior];
            let mut d_prime = vec![T::zero(); interior];
            for k in 0..interior {
                let i = k + 1;
                let sub = h[i - 1];
                let diag = two * (h[i - 1] + h[i]);
                let sup = h[i];
                let rhs = six * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
                let (denom, prev_d) = if k == 0 {
                    (diag, T::zero())
                } else {
                    (diag - sub * c_prime[k - 1], sub * d_prime[k - 1])
                };
                c_prime[k] = sup / denom;
                d_prime[k] = (rhs - prev_d) / denom;
            }
            m[interior] = d_prime[interior - 1];
            for k in (0..interior - 1).rev() {
                m[k + 1] = d_prime[k] - c_prime[k] * m[k + 2];
            }
        }

        (0..n - 1)
            .map(|i| SplineSegment {
                left: xs[i],
                right: xs[i + 1],
                a: ys[i],
                b: (ys[i + 1] - ys[i]) / h[i] - h[i] * (two * m[i] + m[i + 1]) / six,
                c: m[i] / two,
                d: (m[i + 1] - m[i]) / (six * h[i]),
            })
            .collect()
    }

    /// Knot abscissae.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Segment polynomials, ordered left to right.
    #[inline]
    pub fn segments(&self) -> &[SplineSegment<T>] {
        &self.segments
    }

    /// Number of knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed spline.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Evaluate at any `x`, continuing the end polynomials outside the knots.
    pub fn extrapolate(&self, x: T) -> T {
        self.segment_at(x).eval(x)
    }

    /// Segment whose polynomial is used at `x`; the end segments cover
    /// the region outside the knots.
    #[inline]
    pub fn segment_at(&self, x: T) -> &SplineSegment<T> {
        &self.segments[find_segment(&self.xs, x)]
    }

    /// Smallest `x` inside the knot range where the spline vanishes.
    ///
    /// Each segment is scanned for sign changes and refined with Brent's
    /// method. Returns `Ok(None)` when the spline keeps one strict sign.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::interpolators::CubicSplineInterpolator;
    ///
    /// let spline = CubicSplineInterpolator::new(&[-2.0, 0.0, 2.0], &[-1.0, 0.5, 2.0]).unwrap();
    /// let root = spline.first_root().unwrap().unwrap();
    /// assert!(root > -2.0 && root < 0.0);
    /// ```
    pub fn first_root(&self) -> Result<Option<T>, SolverError> {
        let solver = BrentSolver::new(SolverConfig::high_precision());
        let steps = T::from(ROOT_SCAN_STEPS).unwrap_or_else(T::one);
        for segment in &self.segments {
            let width = segment.right - segment.left;
            let mut lo = segment.left;
            let mut f_lo = segment.eval(lo);
            if f_lo == T::zero() {
                return Ok(Some(lo));
            }
            for step in 1..=ROOT_SCAN_STEPS {
                let hi = if step == ROOT_SCAN_STEPS {
                    segment.right
                } else {
                    segment.left + width * T::from(step).unwrap_or_else(T::zero) / steps
                };
                let f_hi = segment.eval(hi);
                if f_hi == T::zero() {
                    return Ok(Some(hi));
                }
                if f_lo.signum() != f_hi.signum() {
                    return solver.find_root(|x| segment.eval(x), lo, hi).map(Some);
                }
                lo = hi;
                f_lo = f_hi;
            }
        }
        Ok(None)
    }
}

impl<T: Float> Interpolator<T> for CubicSplineInterpolator<T> {
    /// Evaluate the spline at `x` inside the knot range.
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if x < x_min || x > x_max {
            return Err(out_of_bounds(x, x_min, x_max));
        }
        Ok(self.extrapolate(x))
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
