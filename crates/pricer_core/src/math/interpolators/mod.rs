//! Interpolation methods on strictly increasing grids.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: Piecewise linear interpolation between data points
//! - [`CubicSplineInterpolator`]: Natural cubic spline with C² continuity,
//!   exposing its segment polynomials for exact integration and root search
//!
//! ## Core Trait
//!
//! All interpolators implement [`Interpolator`]:
//! - `interpolate(x)`: value inside the domain, `OutOfBounds` outside
//! - `domain()`: valid interpolation range
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let interp = LinearInterpolator::<f64>::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//! assert!((interp.interpolate(1.5).unwrap() - 2.5).abs() < 1e-10);
//! ```

mod cubic_spline;
mod linear;

pub use cubic_spline::{CubicSplineInterpolator, SplineSegment};
pub use linear::LinearInterpolator;

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation on a fixed set of knots.
pub trait Interpolator<T: Float> {
    /// Interpolated value at `x`.
    ///
    /// # Errors
    ///
    /// `InterpolationError::OutOfBounds` when `x` lies outside [`domain`](Self::domain).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Closed interval on which `interpolate` is defined.
    fn domain(&self) -> (T, T);
}

/// Checks knot data shared by all interpolators.
fn validate_knots<T: Float>(xs: &[T], ys: &[T], need: usize) -> Result<(), InterpolationError> {
    if xs.len() != ys.len() {
        return Err(InterpolationError::InvalidInput(format!(
            "xs and ys must have same length: got {} and {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < need {
        return Err(InterpolationError::InsufficientData {
            got: xs.len(),
            need,
        });
    }
    if let Some(index) = xs.windows(2).position(|w| !(w[1] > w[0])) {
        return Err(InterpolationError::NonMonotonicData { index: index + 1 });
    }
    Ok(())
}

/// Index `i` with `xs[i] <= x < xs[i + 1]`, clamped to `[0, n - 2]`.
#[inline]
fn find_segment<T: Float>(xs: &[T], x: T) -> usize {
    let pos = xs.partition_point(|&xi| xi <= x);
    pos.clamp(1, xs.len() - 1) - 1
}

#[inline]
fn out_of_bounds<T: Float>(x: T, min: T, max: T) -> InterpolationError {
    InterpolationError::OutOfBounds {
        x: x.to_f64().unwrap_or(f64::NAN),
        min: min.to_f64().unwrap_or(f64::NAN),
        max: max.to_f64().unwrap_or(f64::NAN),
    }
}
