//! Implied volatility command implementation

use pricer_models::analytical::{implied_volatility, OptionType};

use crate::Result;

/// Run the implied-vol command
pub fn run(price: f64, strike: f64, forward: f64, expiry: f64, put: bool) -> Result<()> {
    let option_type = if put { OptionType::Put } else { OptionType::Call };
    let vol = implied_volatility(price, strike, forward, expiry, option_type)?;
    println!("{vol:.8}");
    Ok(())
}
