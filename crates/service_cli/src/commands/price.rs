//! Price command implementation
//!
//! Prices the Bermudan option of a request with the backward-induction
//! engine, then every co-terminal European both by the engine and in closed
//! form, and reports the switch-option value.

use std::path::Path;

use pricer_models::analytical::OptionType;
use pricer_models::instruments::Payoff;
use pricer_pricing::{bermudan_option_npv, price};
use tracing::info;

use crate::config::{MethodKind, PricingRequest};
use crate::Result;

/// Run the price command
pub fn run(path: &Path, method: Option<MethodKind>, verbose: bool) -> Result<()> {
    let request = PricingRequest::load(path)?;
    let kind = method.unwrap_or(request.method.kind);
    if kind.uses_paths() {
        info!(?kind, n_paths = request.simulation.n_paths, "Starting pricing...");
    } else {
        info!(?kind, "Starting pricing...");
    }

    let model = request.model()?;
    let schedule = request.schedule()?;
    let underlyings = request.underlyings(&model)?;
    let method = request.method(&model, kind)?;

    let summary = price(&schedule, &underlyings, method.as_ref(), verbose)?;

    println!("\n┌──────────┬──────────────┬──────────────┬──────────────┐");
    println!("│ Expiry   │ Engine       │ Analytic     │ Difference   │");
    println!("├──────────┼──────────────┼──────────────┼──────────────┤");
    let mut best_european = f64::NEG_INFINITY;
    for underlying in &underlyings {
        let expiry = underlying.observation_time();
        let engine = bermudan_option_npv(
            &[expiry],
            std::slice::from_ref(underlying),
            method.as_ref(),
            false,
        )?;
        let (analytic, warning) = model.coupon_bond_option_checked(
            expiry,
            underlying.pay_times(),
            underlying.cash_flows(),
            0.0,
            OptionType::Call,
        )?;
        if let Some(w) = warning {
            info!(%w, "parity repaired");
        }
        best_european = best_european.max(analytic);
        println!(
            "│ {expiry:>8.3} │ {engine:>12.8} │ {analytic:>12.8} │ {:>12.2e} │",
            engine - analytic
        );
    }
    println!("└──────────┴──────────────┴──────────────┴──────────────┘");

    println!("\nMethod:         {}", summary.method);
    println!("Bermudan:       {:.8}", summary.npv);
    if let Some(error) = summary.standard_error {
        println!("Std. error:     {error:.2e}");
    }
    println!("Switch value:   {:.8}", summary.npv - best_european);

    info!("Pricing complete");
    Ok(())
}
