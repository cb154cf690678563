//! Core time and error types.
//!
//! This module provides:
//! - `time`: `Date` and `DayCountConvention` for converting calendar dates to year fractions
//! - `error`: Structured error types for dates, interpolation, root finding and linear algebra
//!
//! # Re-exports
//!
//! - [`Date`], [`DayCountConvention`], [`year_fraction`] from `time`
//! - [`DateError`], [`InterpolationError`], [`SolverError`], [`LinearAlgebraError`] from `error`

pub mod error;
pub mod time;

pub use error::{DateError, InterpolationError, LinearAlgebraError, SolverError};
pub use time::{year_fraction, Date, DayCountConvention};
