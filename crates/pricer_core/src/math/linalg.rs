//! Linear system solvers.
//!
//! - [`solve_tridiagonal`]: Thomas algorithm for finite-difference systems
//! - [`least_squares`]: SVD-based least squares for regression fits

use crate::types::LinearAlgebraError;
use nalgebra::{DMatrix, DVector};

/// Pivots smaller than this are treated as zero.
const PIVOT_EPSILON: f64 = 1e-300;

/// Solves a tridiagonal system of equations.
///
/// ```text
/// | diag[0]  sup[0]                     | | x[0]   |   | rhs[0]   |
/// | sub[0]   diag[1]  sup[1]            | | x[1]   | = | rhs[1]   |
/// |          ...      ...      ...      | | ...    |   | ...      |
/// |                   sub[n-2] diag[n-1]| | x[n-1] |   | rhs[n-1] |
/// ```
///
/// # Arguments
///
/// * `sub` - Lower diagonal (length n-1)
/// * `diag` - Main diagonal (length n)
/// * `sup` - Upper diagonal (length n-1)
/// * `rhs` - Right-hand side (length n)
///
/// # Errors
///
/// * `DimensionMismatch` - Inconsistent lengths
/// * `SingularMatrix` - Zero pivot during elimination
///
/// # Example
///
/// ```
/// use pricer_core::math::linalg::solve_tridiagonal;
///
/// let x = solve_tridiagonal(&[1.0, 1.0], &[4.0, 4.0, 4.0], &[1.0, 1.0], &[5.0, 6.0, 5.0]).unwrap();
/// for xi in x {
///     assert!((xi - 1.0).abs() < 1e-14);
/// }
/// ```
pub fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, LinearAlgebraError> {
    let n = diag.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    for len in [sub.len(), sup.len()] {
        if len != n - 1 {
            return Err(LinearAlgebraError::DimensionMismatch {
                expected: n - 1,
                got: len,
            });
        }
    }
    if rhs.len() != n {
        return Err(LinearAlgebraError::DimensionMismatch {
            expected: n,
            got: rhs.len(),
        });
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    if diag[0].abs() < PIVOT_EPSILON {
        return Err(LinearAlgebraError::SingularMatrix { row: 0 });
    }
    if n > 1 {
        c_prime[0] = sup[0] / diag[0];
    }
    d_prime[0] = rhs[0] / diag[0];

    for i in 1..n {
        let denom = diag[i] - sub[i - 1] * c_prime[i - 1];
        if denom.abs() < PIVOT_EPSILON {
            return Err(LinearAlgebraError::SingularMatrix { row: i });
        }
        if i < n - 1 {
            c_prime[i] = sup[i] / denom;
        }
        d_prime[i] = (rhs[i] - sub[i - 1] * d_prime[i - 1]) / denom;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }
    Ok(x)
}

/// Minimum-norm least-squares solution of `design · β ≈ target`.
///
/// Uses a singular value decomposition, so rank-deficient designs (for
/// example a constant regressor) still return a solution.
///
/// # Example
///
/// ```
/// use nalgebra::{DMatrix, DVector};
/// use pricer_core::math::linalg::least_squares;
///
/// // Fit y = 1 + 2x exactly
/// let design = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
/// let target = DVector::from_vec(vec![1.0, 3.0, 5.0]);
/// let beta = least_squares(&design, &target).unwrap();
/// assert!((beta[0] - 1.0).abs() < 1e-12);
/// assert!((beta[1] - 2.0).abs() < 1e-12);
/// ```
pub fn least_squares(
    design: &DMatrix<f64>,
    target: &DVector<f64>,
) -> Result<DVector<f64>, LinearAlgebraError> {
    if design.nrows() != target.len() {
        return Err(LinearAlgebraError::DimensionMismatch {
            expected: design.nrows(),
            got: target.len(),
        });
    }
    let svd = design.clone().svd(true, true);
    let max_singular = svd.singular_values.max();
    let eps = f64::EPSILON * design.nrows().max(design.ncols()) as f64 * max_singular;
    svd.solve(target, eps)
        .map_err(|msg| LinearAlgebraError::LeastSquares(msg.to_string()))
}
