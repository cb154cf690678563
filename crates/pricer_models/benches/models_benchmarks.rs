//! Criterion benchmarks for the Gaussian short-rate model.
//!
//! Jamshidian coupon bond options are priced once per European reference
//! and zero bonds once per grid point and path, so both are tracked here.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::curves::FlatCurve;
use pricer_models::analytical::{implied_volatility, OptionType};
use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};

fn model() -> GaussianShortRateModel {
    GaussianShortRateModel::new(
        Arc::new(FlatCurve::new(0.03)),
        0.05,
        VolatilityTermStructure::new(vec![1.0, 2.0, 5.0], vec![0.01, 0.008, 0.007]).unwrap(),
    )
    .unwrap()
}

fn bench_zero_bonds(c: &mut Criterion) {
    let m = model();
    let mut group = c.benchmark_group("zero_bonds");
    for size in [101, 16384] {
        let states: Vec<f64> = (0..size).map(|i| -0.1 + 0.2 * i as f64 / size as f64).collect();
        group.bench_with_input(BenchmarkId::new("vectorised", size), &states, |b, xs| {
            b.iter(|| m.zero_bonds(10.0, black_box(xs), 20.0).unwrap());
        });
    }
    group.finish();
}

fn bench_coupon_bond_option(c: &mut Criterion) {
    let m = model();
    let pay_times: Vec<f64> = (13..=20).map(f64::from).collect();
    let mut cash_flows = vec![0.03; pay_times.len()];
    if let Some(last) = cash_flows.last_mut() {
        *last += 1.0;
    }
    c.bench_function("coupon_bond_option_jamshidian", |b| {
        b.iter(|| {
            m.coupon_bond_option(12.0, black_box(&pay_times), &cash_flows, 1.0, OptionType::Call)
                .unwrap()
        });
    });
}

fn bench_implied_volatility(c: &mut Criterion) {
    c.bench_function("bachelier_implied_volatility", |b| {
        b.iter(|| implied_volatility(black_box(0.004), 0.03, 0.031, 5.0, OptionType::Call).unwrap());
    });
}

criterion_group!(
    benches,
    bench_zero_bonds,
    bench_coupon_bond_option,
    bench_implied_volatility
);
criterion_main!(benches);
