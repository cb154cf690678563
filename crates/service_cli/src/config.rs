//! TOML pricing requests.
//!
//! ```toml
//! [curve]
//! kind = "flat"
//! rate = 0.03
//!
//! [model]
//! mean_reversion = 0.05
//! volatility_times = [1.0]
//! volatility_values = [0.01]
//!
//! [instrument]
//! exercise_times = [12.0, 13.0, 14.0]
//! pay_times = [13.0, 14.0, 15.0, 15.0]
//! cash_flows = [0.03, 0.03, 0.03, 1.0]
//! strike = 1.0
//!
//! [method]
//! kind = "cubic_spline_exact"
//!
//! [simulation]
//! n_paths = 16384
//! ```
//!
//! Every section except `[instrument]` may be omitted.

use std::path::Path;
use std::sync::Arc;

use clap::ValueEnum;
use pricer_core::market_data::curves::{FlatCurve, ForwardCurve, YieldCurve};
use pricer_models::instruments::{CouponBond, ExerciseSchedule};
use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
use pricer_pricing::rollback::amc::{AmcConfig, AmcMode, AmcSolver, ControlVariate};
use pricer_pricing::rollback::density::{BreakEven, DensityGridConfig, DensityIntegration};
use pricer_pricing::rollback::pde::{PdeConfig, PdeSolver};
use pricer_pricing::rollback::RollbackMethod;
use pricer_pricing::simulation::{NumeraireScheme, PathSimulation, SimulationConfig, DEFAULT_SEED};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CliError, Result};

/// Complete pricing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingRequest {
    /// Discount curve.
    #[serde(default)]
    pub curve: CurveConfig,
    /// Gaussian short-rate model parameters.
    #[serde(default)]
    pub model: ModelConfig,
    /// Bermudan bond option.
    pub instrument: InstrumentConfig,
    /// Rollback method.
    #[serde(default)]
    pub method: MethodConfig,
    /// Path simulation for AMC methods.
    #[serde(default)]
    pub simulation: SimulationSection,
}

/// Discount curve section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveConfig {
    /// Constant continuously compounded rate.
    Flat {
        /// Zero rate
        rate: f64,
    },
    /// Piecewise-flat instantaneous forwards.
    Forward {
        /// Pillar times in years
        times: Vec<f64>,
        /// Forward rates
        rates: Vec<f64>,
    },
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self::Flat { rate: 0.03 }
    }
}

/// Model section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Mean reversion `a`.
    pub mean_reversion: f64,
    /// Volatility breakpoints.
    pub volatility_times: Vec<f64>,
    /// Volatility values, one per breakpoint.
    pub volatility_values: Vec<f64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            mean_reversion: 0.05,
            volatility_times: vec![1.0],
            volatility_values: vec![0.01],
        }
    }
}

/// Instrument section: a bond callable at `strike` on each exercise time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentConfig {
    /// Exercise times, increasing.
    pub exercise_times: Vec<f64>,
    /// Bond payment times.
    pub pay_times: Vec<f64>,
    /// Bond cash flows.
    pub cash_flows: Vec<f64>,
    /// Amount paid on exercise.
    #[serde(default = "default_strike")]
    pub strike: f64,
}

fn default_strike() -> f64 {
    1.0
}

/// Rollback method families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Simpson's rule on the density grid
    Simpson,
    /// Exact integration of the natural cubic spline
    #[default]
    CubicSplineExact,
    /// Gauss-Hermite quadrature
    Hermite,
    /// Cubic-spline-exact split at the exercise boundary
    BreakEven,
    /// Gauss-Hermite with the exercise-boundary kink integrated in closed form
    BreakEvenHermite,
    /// Theta-scheme finite differences
    Pde,
    /// Longstaff-Schwartz with regressed continuation
    Amc,
    /// Longstaff-Schwartz regressing the exercise decision only
    AmcExerciseOnly,
    /// Longstaff-Schwartz with the first European as control variate
    AmcControlVariate,
}

impl MethodKind {
    /// True for methods that run on simulated paths.
    pub fn uses_paths(self) -> bool {
        matches!(
            self,
            Self::Amc | Self::AmcExerciseOnly | Self::AmcControlVariate
        )
    }
}

/// Method section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MethodConfig {
    /// Method family.
    pub kind: MethodKind,
    /// Grid points of density and PDE methods.
    pub grid_points: usize,
    /// Grid half-width in standard deviations.
    pub std_devs: f64,
    /// Gauss-Hermite degree.
    pub hermite_degree: usize,
    /// PDE implicitness.
    pub theta: f64,
    /// PDE time step.
    pub time_step: f64,
    /// AMC polynomial degree.
    pub max_polynomial_degree: usize,
    /// AMC training share.
    pub split_ratio: f64,
}

impl Default for MethodConfig {
    fn default() -> Self {
        let grid = DensityGridConfig::default();
        let pde = PdeConfig::default();
        let amc = AmcConfig::default();
        Self {
            kind: MethodKind::default(),
            grid_points: grid.grid_points,
            std_devs: grid.std_devs,
            hermite_degree: 11,
            theta: pde.theta,
            time_step: pde.time_step,
            max_polynomial_degree: amc.max_polynomial_degree,
            split_ratio: amc.split_ratio,
        }
    }
}

/// Simulation section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    /// Number of paths.
    pub n_paths: usize,
    /// Seed of the normal draws.
    pub seed: u64,
    /// Largest gap between simulation times.
    pub time_step: f64,
    /// Numeraire discretisation.
    pub numeraire: NumeraireScheme,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            n_paths: 1 << 14,
            seed: DEFAULT_SEED,
            time_step: 1.0,
            numeraire: NumeraireScheme::default(),
        }
    }
}

impl PricingRequest {
    /// Reads a request from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        let request: Self = toml::from_str(&text)?;
        debug!(path = %path.display(), "loaded pricing request");
        Ok(request)
    }

    /// Gaussian short-rate model on the configured curve.
    pub fn model(&self) -> Result<Arc<GaussianShortRateModel>> {
        let curve: Arc<dyn YieldCurve<f64> + Send + Sync> = match &self.curve {
            CurveConfig::Flat { rate } => Arc::new(FlatCurve::new(*rate)),
            CurveConfig::Forward { times, rates } => {
                Arc::new(ForwardCurve::new(times.clone(), rates.clone())?)
            }
        };
        let volatility = VolatilityTermStructure::new(
            self.model.volatility_times.clone(),
            self.model.volatility_values.clone(),
        )?;
        Ok(Arc::new(GaussianShortRateModel::new(
            curve,
            self.model.mean_reversion,
            volatility,
        )?))
    }

    /// Validated exercise schedule.
    pub fn schedule(&self) -> Result<ExerciseSchedule> {
        Ok(ExerciseSchedule::new(self.instrument.exercise_times.clone())?)
    }

    /// Co-terminal underlyings, one per exercise time.
    pub fn underlyings(&self, model: &Arc<GaussianShortRateModel>) -> Result<Vec<CouponBond>> {
        Ok(CouponBond::coterminal_underlyings(
            model.clone(),
            &self.schedule()?,
            &self.instrument.pay_times,
            &self.instrument.cash_flows,
            self.instrument.strike,
        )?)
    }

    /// Simulation times: zero, every exercise time and a grid of at most
    /// `time_step` in between.
    pub fn simulation_times(&self) -> Result<Vec<f64>> {
        let step = self.simulation.time_step;
        if !(step > 0.0) {
            return Err(CliError::InvalidArgument(format!(
                "simulation time_step {step} must be positive"
            )));
        }
        let last = self.schedule()?.last();
        let mut times = vec![0.0];
        let mut k = 1.0;
        while k * step < last {
            times.push(k * step);
            k += 1.0;
        }
        times.extend(self.instrument.exercise_times.iter().copied());
        times.sort_by(f64::total_cmp);
        times.dedup_by(|a, b| (*a - *b).abs() < 1e-12);
        Ok(times)
    }

    /// Rollback method of the given kind.
    pub fn method(
        &self,
        model: &Arc<GaussianShortRateModel>,
        kind: MethodKind,
    ) -> Result<Box<dyn RollbackMethod>> {
        let m = &self.method;
        let grid = DensityGridConfig::default()
            .with_grid_points(m.grid_points)
            .with_std_devs(m.std_devs);
        let method: Box<dyn RollbackMethod> = match kind {
            MethodKind::Simpson => Box::new(DensityIntegration::simpson(model.clone(), grid)?),
            MethodKind::CubicSplineExact => {
                Box::new(DensityIntegration::cubic_spline_exact(model.clone(), grid)?)
            }
            MethodKind::Hermite => Box::new(DensityIntegration::hermite(
                model.clone(),
                m.hermite_degree,
                grid,
            )?),
            MethodKind::BreakEven => Box::new(BreakEven::new(
                DensityIntegration::cubic_spline_exact(model.clone(), grid)?,
            )),
            MethodKind::BreakEvenHermite => Box::new(BreakEven::new(DensityIntegration::hermite(
                model.clone(),
                m.hermite_degree,
                grid,
            )?)),
            MethodKind::Pde => {
                let config = PdeConfig {
                    grid_points: m.grid_points,
                    std_devs: m.std_devs,
                    theta: m.theta,
                    time_step: m.time_step,
                };
                Box::new(PdeSolver::new(model.clone(), config)?)
            }
            MethodKind::Amc | MethodKind::AmcExerciseOnly | MethodKind::AmcControlVariate => {
                let config = SimulationConfig::builder()
                    .times(self.simulation_times()?)
                    .n_paths(self.simulation.n_paths)
                    .seed(self.simulation.seed)
                    .numeraire(self.simulation.numeraire)
                    .build()?;
                let simulation = Arc::new(PathSimulation::new(model.clone(), config)?);
                let amc = AmcConfig::default()
                    .with_max_polynomial_degree(m.max_polynomial_degree)
                    .with_split_ratio(m.split_ratio);
                let solver = AmcSolver::new(simulation, amc)?;
                match kind {
                    MethodKind::AmcExerciseOnly => Box::new(solver.with_mode(AmcMode::ExerciseOnly)),
                    MethodKind::AmcControlVariate => {
                        let first = self.underlyings(model)?.into_iter().next().ok_or_else(|| {
                            CliError::InvalidArgument("no exercise times".to_string())
                        })?;
                        Box::new(ControlVariate::european(solver, first)?)
                    }
                    _ => Box::new(solver),
                }
            }
        };
        Ok(method)
    }
}
