//! Short-rate models.
//!
//! - [`rates::GaussianShortRateModel`]: one-factor Gaussian (Hull-White) model
//!   in the `x`-state formulation with closed-form bonds, bond options and
//!   conditional moments
//! - [`rates::VolatilityTermStructure`]: piecewise-constant short-rate volatility
//! - [`ModelError`]: model construction and evaluation errors
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use pricer_core::market_data::curves::FlatCurve;
//! use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
//!
//! let vol = VolatilityTermStructure::flat(0.01).unwrap();
//! let model = GaussianShortRateModel::new(Arc::new(FlatCurve::new(0.03)), 0.05, vol).unwrap();
//!
//! // x = 0 reproduces the initial curve
//! let p = model.zero_bond(0.0, 0.0, 10.0).unwrap();
//! assert!((p - (-0.3_f64).exp()).abs() < 1e-15);
//! ```

mod error;
pub mod rates;

pub use error::ModelError;
