//! # Pricer Pricing (Layer 3: Backward-Induction Engine)
//!
//! Bermudan option pricing on the one-factor Gaussian short-rate model.
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns the model and payoffs of Layer 2 into prices:
//! - Seeded path simulation of the short-rate state and numeraire
//! - Interchangeable rollback methods behind the [`RollbackMethod`] trait:
//!   density integration, theta-scheme PDE and American Monte Carlo
//! - The backward-induction engine over an exercise schedule
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pricer_core::market_data::curves::FlatCurve;
//! use pricer_models::instruments::{CouponBond, ExerciseSchedule};
//! use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
//! use pricer_pricing::engine::price;
//! use pricer_pricing::rollback::density::{BreakEven, DensityGridConfig, DensityIntegration};
//!
//! let model = Arc::new(
//!     GaussianShortRateModel::new(
//!         Arc::new(FlatCurve::new(0.03)),
//!         0.05,
//!         VolatilityTermStructure::flat(0.01).unwrap(),
//!     )
//!     .unwrap(),
//! );
//! let schedule = ExerciseSchedule::new(vec![2.0, 3.0, 4.0]).unwrap();
//! let underlyings = CouponBond::coterminal_underlyings(
//!     model.clone(),
//!     &schedule,
//!     &[3.0, 4.0, 5.0, 5.0],
//!     &[0.03, 0.03, 0.03, 1.0],
//!     1.0,
//! )
//! .unwrap();
//!
//! let inner = DensityIntegration::cubic_spline_exact(model, DensityGridConfig::default()).unwrap();
//! let summary = price(&schedule, &underlyings, &BreakEven::new(inner), false).unwrap();
//! assert!(summary.npv > 0.0);
//! ```
//!
//! ## Concurrency
//!
//! Backward steps run in sequence. Density integrals within a step are
//! evaluated in parallel with `rayon`; a [`simulation::PathSimulation`] is
//! immutable and can be shared across solvers with `Arc`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engine;
pub mod error;
pub mod rng;
pub mod rollback;
pub mod simulation;

pub use engine::{bermudan_option_npv, price, PricingSummary};
pub use error::{ConfigError, PricingError, SimulationError};
pub use rollback::{ModelStates, Rollback, RollbackMethod};
