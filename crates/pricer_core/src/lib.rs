//! # pricer_core: Numerical Foundation for the Bermudan Rates Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace and provides:
//! - Discount curves: `YieldCurve`, `FlatCurve`, `ForwardCurve` (`market_data::curves`)
//! - Root finding: `BrentSolver` with bounded bracket expansion (`math::solvers`)
//! - Interpolation: linear and natural cubic splines with segment access (`math::interpolators`)
//! - Quadrature: Gauss–Hermite rules and Simpson's rule on irregular grids (`math::quadrature`)
//! - Linear algebra: tridiagonal and least-squares solvers (`math::linalg`)
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - Error types: `InterpolationError`, `SolverError`, `LinearAlgebraError` (`types::error`)
//!
//! ## Dependencies
//!
//! Layer 1 has no dependencies on other pricer_* crates:
//! - num-traits: generic floating point for curves and solvers
//! - nalgebra: eigen decomposition and SVD
//! - chrono: date arithmetic
//! - serde: serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
//! use pricer_core::math::solvers::BrentSolver;
//!
//! let curve = FlatCurve::new(0.03_f64);
//! let df = curve.discount_factor(10.0).unwrap();
//!
//! // Recover the rate from the discount factor
//! let solver = BrentSolver::with_defaults();
//! let rate = solver
//!     .find_root(|r: f64| (-r * 10.0).exp() - df, 0.0, 0.1)
//!     .unwrap();
//! assert!((rate - 0.03).abs() < 1e-9);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): enable serialisation for `Date` and `DayCountConvention`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
