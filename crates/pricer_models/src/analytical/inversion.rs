//! Bracketed implied-volatility inversion shared by the Black and Bachelier formulas.

use super::error::AnalyticalError;
use pricer_core::math::solvers::{BracketExpansion, BrentSolver, SolverConfig};
use pricer_core::types::SolverError;

/// Bracket widenings attempted before giving up.
pub(crate) const MAX_BRACKET_EXPANSIONS: usize = 8;

/// Solve `pricer(σ) = price` for `σ` starting from `[lower, upper]`.
pub(crate) fn invert_volatility<F>(
    pricer: F,
    price: f64,
    strike: f64,
    expiry: f64,
    lower: f64,
    upper: f64,
) -> Result<f64, AnalyticalError>
where
    F: Fn(f64) -> f64,
{
    if !(expiry > 0.0) {
        return Err(AnalyticalError::InvalidExpiry { expiry });
    }
    let solver = BrentSolver::new(SolverConfig::new(1e-12, 200));
    solver
        .find_root_expanding(
            |sigma| pricer(sigma) - price,
            lower,
            upper,
            BracketExpansion::Geometric,
            MAX_BRACKET_EXPANSIONS,
        )
        .map_err(|err| match err {
            SolverError::NoBracket { a, b } => AnalyticalError::RootNotBracketed {
                price,
                strike,
                lower: a,
                upper: b,
            },
            other => AnalyticalError::Solver(other),
        })
}
