//! Gauss–Hermite quadrature via the Golub–Welsch algorithm.

use crate::types::InterpolationError;
use nalgebra::{DMatrix, SymmetricEigen};
use std::f64::consts::{PI, SQRT_2};

/// Gauss–Hermite rule for the weight `e^{-x²}` on the real line.
///
/// An `n`-point rule integrates polynomials up to degree `2n - 1` exactly.
/// Nodes are the eigenvalues of the symmetric Jacobi matrix with
/// off-diagonal entries `sqrt(k / 2)`; weights are `sqrt(π)` times the
/// squared first components of the normalised eigenvectors.
///
/// # Example
///
/// ```
/// use pricer_core::math::quadrature::GaussHermite;
///
/// let rule = GaussHermite::new(5).unwrap();
///
/// // E[Z²] = 1 for a standard normal Z
/// let second_moment = rule.expectation(|z| z * z, 0.0, 1.0);
/// assert!((second_moment - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct GaussHermite {
    nodes: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussHermite {
    /// Build the `n`-point rule.
    ///
    /// # Errors
    ///
    /// `InterpolationError::InsufficientData` when `n == 0`.
    pub fn new(n: usize) -> Result<Self, InterpolationError> {
        if n == 0 {
            return Err(InterpolationError::InsufficientData { got: 0, need: 1 });
        }

        let mut jacobi = DMatrix::<f64>::zeros(n, n);
        for k in 1..n {
            let beta = (k as f64 / 2.0).sqrt();
            jacobi[(k - 1, k)] = beta;
            jacobi[(k, k - 1)] = beta;
        }

        let eigen = SymmetricEigen::new(jacobi);
        let mut pairs: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let v0 = eigen.eigenvectors[(0, i)];
                (eigen.eigenvalues[i], PI.sqrt() * v0 * v0)
            })
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (nodes, weights) = pairs.into_iter().unzip();

        Ok(Self { nodes, weights })
    }

    /// Quadrature nodes in increasing order.
    #[inline]
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Weights matching [`nodes`](Self::nodes).
    #[inline]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a constructed rule.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Points `mean + sqrt(2)·std·ξ_k` at which `expectation` samples `f`.
    pub fn abscissae(&self, mean: f64, std_dev: f64) -> impl Iterator<Item = f64> + '_ {
        self.nodes.iter().map(move |&z| mean + SQRT_2 * std_dev * z)
    }

    /// Approximates `E[f(X)]` for `X ~ N(mean, std_dev²)`.
    pub fn expectation<F>(&self, f: F, mean: f64, std_dev: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        self.abscissae(mean, std_dev)
            .zip(self.weights.iter())
            .map(|(x, w)| w * f(x))
            .sum::<f64>()
            / PI.sqrt()
    }
}
