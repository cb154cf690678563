//! Numerical building blocks shared by the model and pricing layers.
//!
//! - [`solvers`]: bracketed root finding
//! - [`interpolators`]: 1D interpolation on sorted grids
//! - [`quadrature`]: Gauss–Hermite and Simpson integration rules
//! - [`linalg`]: tridiagonal and least-squares solvers

pub mod interpolators;
pub mod linalg;
pub mod quadrature;
pub mod solvers;
