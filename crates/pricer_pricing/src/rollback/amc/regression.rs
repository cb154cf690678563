//! Least-squares regression on a multivariate monomial basis.

use nalgebra::{DMatrix, DVector};
use pricer_core::math::linalg::least_squares;
use pricer_core::types::LinearAlgebraError;

/// Exponent vectors of all monomials in `n_vars` variables with total
/// degree at most `max_degree`, constant term first.
pub(crate) fn multi_indices(n_vars: usize, max_degree: usize) -> Vec<Vec<u32>> {
    if n_vars == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for first in 0..=max_degree {
        for mut rest in multi_indices(n_vars - 1, max_degree - first) {
            rest.insert(0, first as u32);
            out.push(rest);
        }
    }
    out
}

/// Fitted polynomial `Σ βₖ Πⱼ cⱼ^eₖⱼ` in the regression controls.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PolynomialRegression {
    exponents: Vec<Vec<u32>>,
    beta: DVector<f64>,
}

impl PolynomialRegression {
    /// Fits `target ≈ basis(controls)` on the rows `0..target.len()`.
    ///
    /// `controls` holds one vector per control variable, each at least as
    /// long as `target`.
    pub(crate) fn fit(
        controls: &[Vec<f64>],
        target: &[f64],
        max_degree: usize,
    ) -> Result<Self, LinearAlgebraError> {
        let exponents = multi_indices(controls.len(), max_degree);
        let design = design_matrix(controls, &exponents, target.len());
        let beta = least_squares(&design, &DVector::from_column_slice(target))?;
        Ok(Self { exponents, beta })
    }

    /// Evaluates the fitted polynomial on the first `rows` control values.
    pub(crate) fn predict(&self, controls: &[Vec<f64>], rows: usize) -> Vec<f64> {
        let design = design_matrix(controls, &self.exponents, rows);
        (design * &self.beta).iter().copied().collect()
    }

    /// Number of basis functions.
    #[cfg(test)]
    pub(crate) fn n_terms(&self) -> usize {
        self.exponents.len()
    }
}

fn design_matrix(controls: &[Vec<f64>], exponents: &[Vec<u32>], rows: usize) -> DMatrix<f64> {
    DMatrix::from_fn(rows, exponents.len(), |r, k| {
        exponents[k]
            .iter()
            .zip(controls)
            .map(|(&e, c)| c[r].powi(e as i32))
            .product()
    })
}
