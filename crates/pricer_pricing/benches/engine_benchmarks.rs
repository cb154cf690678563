//! Criterion benchmarks for the backward-induction engine.
//!
//! Prices the 8-date co-terminal Bermudan with each rollback family and
//! tracks path simulation separately, since AMC solvers share it.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::curves::FlatCurve;
use pricer_models::instruments::{CouponBond, ExerciseSchedule};
use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
use pricer_pricing::price;
use pricer_pricing::rollback::amc::{AmcConfig, AmcSolver};
use pricer_pricing::rollback::density::{BreakEven, DensityGridConfig, DensityIntegration};
use pricer_pricing::rollback::pde::{PdeConfig, PdeSolver};
use pricer_pricing::rollback::RollbackMethod;
use pricer_pricing::simulation::{PathSimulation, SimulationConfig};

fn model() -> Arc<GaussianShortRateModel> {
    Arc::new(
        GaussianShortRateModel::new(
            Arc::new(FlatCurve::new(0.03)),
            0.05,
            VolatilityTermStructure::flat(0.01).unwrap(),
        )
        .unwrap(),
    )
}

fn bermudan(model: &Arc<GaussianShortRateModel>) -> (ExerciseSchedule, Vec<CouponBond>) {
    let schedule = ExerciseSchedule::new((12..20).map(f64::from).collect()).unwrap();
    let mut pay_times: Vec<f64> = (13..=20).map(f64::from).collect();
    pay_times.push(20.0);
    let mut cash_flows = vec![0.03; 8];
    cash_flows.push(1.0);
    let underlyings =
        CouponBond::coterminal_underlyings(model.clone(), &schedule, &pay_times, &cash_flows, 1.0)
            .unwrap();
    (schedule, underlyings)
}

fn simulation_config(n_paths: usize) -> SimulationConfig {
    SimulationConfig::builder()
        .times((0..=20).map(f64::from).collect())
        .n_paths(n_paths)
        .build()
        .unwrap()
}

fn bench_grid_methods(c: &mut Criterion) {
    let m = model();
    let (schedule, underlyings) = bermudan(&m);
    let config = DensityGridConfig::default();
    let methods: Vec<(&str, Box<dyn RollbackMethod>)> = vec![
        ("simpson", Box::new(DensityIntegration::simpson(m.clone(), config).unwrap())),
        (
            "cubic_spline_exact",
            Box::new(DensityIntegration::cubic_spline_exact(m.clone(), config).unwrap()),
        ),
        ("hermite_21", Box::new(DensityIntegration::hermite(m.clone(), 21, config).unwrap())),
        (
            "break_even",
            Box::new(BreakEven::new(DensityIntegration::simpson(m.clone(), config).unwrap())),
        ),
        ("pde", Box::new(PdeSolver::new(m.clone(), PdeConfig::default()).unwrap())),
    ];

    let mut group = c.benchmark_group("bermudan_grid");
    for (name, method) in &methods {
        group.bench_function(*name, |b| {
            b.iter(|| price(black_box(&schedule), &underlyings, method.as_ref(), false).unwrap());
        });
    }
    group.finish();
}

fn bench_simulation(c: &mut Criterion) {
    let m = model();
    let mut group = c.benchmark_group("path_simulation");
    group.sample_size(10);
    for n_paths in [1 << 12, 1 << 15] {
        group.bench_with_input(BenchmarkId::from_parameter(n_paths), &n_paths, |b, &n| {
            b.iter(|| PathSimulation::new(m.clone(), simulation_config(n)).unwrap());
        });
    }
    group.finish();
}

fn bench_amc(c: &mut Criterion) {
    let m = model();
    let (schedule, underlyings) = bermudan(&m);
    let mut group = c.benchmark_group("bermudan_amc");
    group.sample_size(10);
    for n_paths in [1 << 12, 1 << 15] {
        let sim = Arc::new(PathSimulation::new(m.clone(), simulation_config(n_paths)).unwrap());
        let amc = AmcSolver::new(sim, AmcConfig::default()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n_paths), &amc, |b, amc| {
            b.iter(|| price(black_box(&schedule), &underlyings, amc, false).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid_methods, bench_simulation, bench_amc);
criterion_main!(benches);
