//! CLI error types.

use pricer_core::market_data::MarketDataError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_models::models::ModelError;
use pricer_pricing::{ConfigError, PricingError, SimulationError};
use thiserror::Error;

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not a valid pricing request.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Invalid argument or configuration value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Discount curve construction failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Model construction or evaluation failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Invalid schedule or payoff.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Implied volatility inversion failed.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// Invalid method configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Path simulation failed.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Backward induction failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
