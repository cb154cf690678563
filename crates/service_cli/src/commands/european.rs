//! European command implementation
//!
//! Prices an option on an annual coupon bond by Jamshidian's decomposition
//! with the put-call parity check.

use std::sync::Arc;

use pricer_core::market_data::curves::FlatCurve;
use pricer_models::analytical::OptionType;
use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
use tracing::info;

use crate::{CliError, Result};

/// Arguments of the european command.
pub struct EuropeanArgs {
    pub expiry: f64,
    pub maturity: f64,
    pub strike: f64,
    pub coupon: f64,
    pub rate: f64,
    pub mean_reversion: f64,
    pub volatility: f64,
    pub put: bool,
}

/// Annual pay times after `expiry` up to `maturity` and their cash flows,
/// notional included in the last one.
pub(crate) fn annual_bond(expiry: f64, maturity: f64, coupon: f64) -> Result<(Vec<f64>, Vec<f64>)> {
    if !(maturity > expiry) {
        return Err(CliError::InvalidArgument(format!(
            "maturity {maturity} must be after expiry {expiry}"
        )));
    }
    let mut pay_times = Vec::new();
    let mut t = maturity;
    while t > expiry + 1e-12 {
        pay_times.push(t);
        t -= 1.0;
    }
    pay_times.reverse();
    let mut cash_flows = vec![coupon; pay_times.len()];
    if let Some(last) = cash_flows.last_mut() {
        *last += 1.0;
    }
    Ok((pay_times, cash_flows))
}

/// Run the european command
pub fn run(args: &EuropeanArgs) -> Result<()> {
    let model = GaussianShortRateModel::new(
        Arc::new(FlatCurve::new(args.rate)),
        args.mean_reversion,
        VolatilityTermStructure::flat(args.volatility)?,
    )?;
    let (pay_times, cash_flows) = annual_bond(args.expiry, args.maturity, args.coupon)?;
    let option_type = if args.put { OptionType::Put } else { OptionType::Call };
    info!(
        expiry = args.expiry,
        maturity = args.maturity,
        strike = args.strike,
        coupons = pay_times.len(),
        "pricing coupon bond option"
    );

    let (value, warning) = model.coupon_bond_option_checked(
        args.expiry,
        &pay_times,
        &cash_flows,
        args.strike,
        option_type,
    )?;
    if let Some(w) = warning {
        println!("warning: {w}");
    }
    println!("{value:.10}");
    Ok(())
}
