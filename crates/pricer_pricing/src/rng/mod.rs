//! # Random Number Generation
//!
//! Seeded pseudo-random numbers for path simulation.
//!
//! - **Reproducibility**: every generator is created from an explicit seed
//! - **Efficiency**: batch generation into caller-owned `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(123);
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```
//!
//! Normals are drawn from `rand::rngs::StdRng` with the Ziggurat sampler of
//! `rand_distr::StandardNormal`, so sequences are stable for a given
//! `rand` release but differ from other generators seeded identically.

mod prng;

pub use prng::PricerRng;
