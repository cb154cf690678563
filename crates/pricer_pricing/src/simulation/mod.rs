//! Path simulation of the Gaussian short-rate model.
//!
//! - [`SimulationConfig`]: time grid, path count, seed and numeraire scheme
//! - [`PathSimulation`]: simulated `[x, s]` states shared by AMC solvers

mod config;
mod paths;

pub use config::{
    NumeraireScheme, SimulationConfig, SimulationConfigBuilder, DEFAULT_SEED, MAX_PATHS,
};
pub use paths::PathSimulation;
