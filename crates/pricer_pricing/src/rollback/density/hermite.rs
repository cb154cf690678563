//! Gauss-Hermite quadrature on the spline through the grid values.

use pricer_core::math::interpolators::CubicSplineInterpolator;
use pricer_core::math::quadrature::GaussHermite;
use pricer_core::types::InterpolationError;
use rayon::prelude::*;

use super::DensityQuadrature;
use crate::error::ConfigError;

/// Gauss-Hermite rule applied to the natural spline of the grid values.
///
/// Nodes outside the grid evaluate the end polynomials of the spline, so the
/// integral is not confined to the grid. A kinked integrand converges
/// slowly in the degree (a few percent at 11 to 21 nodes); wrap the rollback
/// in [`BreakEven`](super::BreakEven) for exercise problems.
#[derive(Debug, Clone)]
pub struct Hermite {
    rule: GaussHermite,
}

impl Hermite {
    /// `degree`-point rule.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidParameter` when `degree` is zero.
    pub fn new(degree: usize) -> Result<Self, ConfigError> {
        let rule = GaussHermite::new(degree).map_err(|err| ConfigError::InvalidParameter {
            name: "degree",
            value: err.to_string(),
        })?;
        Ok(Self { rule })
    }

    /// Number of quadrature nodes.
    #[inline]
    pub fn degree(&self) -> usize {
        self.rule.len()
    }
}

impl DensityQuadrature for Hermite {
    fn name(&self) -> &'static str {
        "hermite"
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
            .map(|&mean| self.rule.expectation(|x| spline.extrapolate(x), mean, std_dev))
            .collect())
    }
}
