//! Bermudan CLI - Command Line Pricing of Bermudan Bond Options
//!
//! Operational entry point for the backward-induction engine.
//!
//! # Commands
//!
//! - `bermudan price --config <file>` - Price a Bermudan and its co-terminal Europeans
//! - `bermudan european` - Analytic coupon bond option on a flat curve
//! - `bermudan implied-vol` - Bachelier implied volatility of an option price
//! - `bermudan check --config <file>` - Print the resolved pricing request
//!
//! # Architecture
//!
//! As the **S**ervice layer this crate only wires configuration, models and
//! rollback methods together; every number comes from the pricer crates.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::MethodKind;

/// Bermudan bond option pricing on the Gaussian short-rate model
#[derive(Parser)]
#[command(name = "bermudan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a Bermudan option and its co-terminal Europeans
    Price {
        /// Pricing request (TOML)
        #[arg(short, long, default_value = "bermudan.toml")]
        config: PathBuf,

        /// Override the rollback method of the request
        #[arg(short, long, value_enum)]
        method: Option<MethodKind>,
    },

    /// Analytic European option on an annual coupon bond
    European {
        /// Option expiry in years
        #[arg(long)]
        expiry: f64,

        /// Bond maturity in years
        #[arg(long)]
        maturity: f64,

        /// Strike paid at expiry
        #[arg(long, default_value_t = 1.0)]
        strike: f64,

        /// Annual coupon rate
        #[arg(long, default_value_t = 0.03)]
        coupon: f64,

        /// Flat continuously compounded zero rate
        #[arg(long, default_value_t = 0.03)]
        rate: f64,

        /// Mean reversion
        #[arg(long, default_value_t = 0.05)]
        mean_reversion: f64,

        /// Flat short-rate volatility
        #[arg(long, default_value_t = 0.01)]
        volatility: f64,

        /// Price the put instead of the call
        #[arg(long)]
        put: bool,
    },

    /// Bachelier implied volatility of an option price
    ImpliedVol {
        /// Option price (undiscounted)
        #[arg(long)]
        price: f64,

        /// Strike
        #[arg(long)]
        strike: f64,

        /// Forward
        #[arg(long)]
        forward: f64,

        /// Expiry in years
        #[arg(long)]
        expiry: f64,

        /// Price is a put
        #[arg(long)]
        put: bool,
    },

    /// Print the resolved pricing request
    Check {
        /// Pricing request (TOML)
        #[arg(short, long, default_value = "bermudan.toml")]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    debug!(verbose = cli.verbose, "starting bermudan");

    let result = match cli.command {
        Commands::Price { config, method } => commands::price::run(&config, method, cli.verbose),
        Commands::European {
            expiry,
            maturity,
            strike,
            coupon,
            rate,
            mean_reversion,
            volatility,
            put,
        } => commands::european::run(&commands::european::EuropeanArgs {
            expiry,
            maturity,
            strike,
            coupon,
            rate,
            mean_reversion,
            volatility,
            put,
        }),
        Commands::ImpliedVol {
            price,
            strike,
            forward,
            expiry,
            put,
        } => commands::implied_vol::run(price, strike, forward, expiry, put),
        Commands::Check { config } => commands::check::run(&config),
    };

    if let Err(err) = result {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
