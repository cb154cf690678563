//! # Pricer Models (L2: Business Logic)
//!
//! Gaussian short-rate model, analytic option formulas and Bermudan payoffs.
//!
//! This crate provides:
//! - The one-factor Gaussian (Hull-White) model with closed-form zero bonds,
//!   zero bond options and Jamshidian coupon bond options
//! - Black and Bachelier formulas with bracketed implied volatility inversion
//! - Coupon bond payoffs and validated exercise schedules
//!
//! ## Design Principles
//!
//! - **Pure model operations**: every model method is a function of its
//!   parameters and arguments, so a model can be shared across threads
//! - **Explicit errors**: bracket failures name the offending expiry or strike
//! - **Reference date as input**: nothing reads an ambient evaluation date

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
