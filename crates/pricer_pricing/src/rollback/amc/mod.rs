//! American Monte Carlo (Longstaff-Schwartz) rollback.
//!
//! Works on the paths of a shared [`PathSimulation`](crate::simulation::PathSimulation).
//! Paths are split into a training set, on which the regressions are fitted,
//! and a pricing set, on which the estimate is averaged:
//!
//! - [`AmcMode::Continuation`]: the discounted `max(U, H)` is regressed on the
//!   controls at the earlier date and the regressed value propagates
//! - [`AmcMode::ExerciseOnly`]: `U − H` is regressed at the exercise date and
//!   only the decision uses the regression; realised cash flows propagate
//!
//! [`ControlVariate`] corrects the final average with an auxiliary claim of
//! known price.

mod control_variate;
mod controls;
mod regression;
mod solver;

pub use control_variate::{ControlCoefficient, ControlVariate};
pub use controls::RegressionControls;
pub use solver::{AmcConfig, AmcMode, AmcSolver};
