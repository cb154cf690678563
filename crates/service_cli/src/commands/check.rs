//! Check command implementation
//!
//! Parses a pricing request, builds its model and schedule, and prints the
//! request with all defaults filled in.

use std::path::Path;

use tracing::info;

use crate::config::PricingRequest;
use crate::{CliError, Result};

/// Run the check command
pub fn run(path: &Path) -> Result<()> {
    let request = PricingRequest::load(path)?;
    request.model()?;
    let schedule = request.schedule()?;
    info!(exercise_dates = schedule.len(), "request is valid");

    let resolved = toml::to_string_pretty(&request)
        .map_err(|err| CliError::InvalidArgument(err.to_string()))?;
    println!("{resolved}");
    Ok(())
}
