//! Root-finding solvers for numerical computation.
//!
//! The engine needs bounded, bracketed root finding in three places: the
//! Jamshidian strike solve, implied-volatility inversion and break-even
//! detection. All of them go through [`BrentSolver`].
//!
//! ## Configuration
//!
//! [`SolverConfig`] controls:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! Bracket widening is controlled per call with [`BracketExpansion`] and a
//! bounded number of attempts, so every solve terminates.
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::{BracketExpansion, BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//!
//! // The root 3.0 lies outside the initial bracket [-1, 1]
//! let f = |x: f64| x - 3.0;
//! let root = solver
//!     .find_root_expanding(f, -1.0, 1.0, BracketExpansion::Symmetric, 8)
//!     .unwrap();
//! assert!((root - 3.0).abs() < 1e-10);
//! ```

mod brent;
mod config;

pub use brent::{BracketExpansion, BrentSolver};
pub use config::SolverConfig;
