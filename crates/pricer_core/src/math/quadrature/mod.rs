//! Numerical integration rules.
//!
//! - [`GaussHermite`]: nodes and weights for `∫ f(x) e^{-x²} dx`, with a
//!   helper for Gaussian expectations
//! - [`simpson`]: composite Simpson's rule on irregularly spaced samples

mod gauss_hermite;
mod simpson;

pub use gauss_hermite::GaussHermite;
pub use simpson::simpson;
