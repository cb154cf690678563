//! Discount curve abstractions.
//!
//! This module provides:
//! - [`YieldCurve`]: Generic trait for discount factor and rate calculations
//! - [`FlatCurve`]: Constant rate yield curve implementation
//! - [`ForwardCurve`]: Piecewise-flat instantaneous forward curve on pillars

mod flat;
mod forward;
mod traits;

pub use flat::FlatCurve;
pub use forward::ForwardCurve;
pub use traits::YieldCurve;
