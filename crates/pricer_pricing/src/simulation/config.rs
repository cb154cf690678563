//! Path simulation configuration.

use crate::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 123;

/// Discretisation of the numeraire along simulated paths.
///
/// - `RollingForward`: each step is exact in the forward measure of its end
///   date; the numeraire is the discretely compounded bank account
/// - `BankAccount`: risk-neutral transition with the continuously
///   compounded bank account integrated by the trapezoidal rule
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NumeraireScheme {
    /// Discrete bank account, rolling forward measure.
    #[default]
    RollingForward,
    /// Continuous bank account, risk-neutral measure.
    BankAccount,
}

/// Simulation configuration.
///
/// Immutable configuration of the time grid, path count, seed and
/// numeraire scheme. Use [`SimulationConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::simulation::{NumeraireScheme, SimulationConfig};
///
/// let config = SimulationConfig::builder()
///     .times((0..=20).map(f64::from).collect())
///     .n_paths(1 << 14)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 16384);
/// assert_eq!(config.seed(), 123);
/// assert_eq!(config.numeraire(), NumeraireScheme::RollingForward);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    times: Vec<f64>,
    n_paths: usize,
    seed: u64,
    numeraire: NumeraireScheme,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Simulation times, starting at zero.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Seed of the normal draws.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Numeraire discretisation.
    #[inline]
    pub fn numeraire(&self) -> NumeraireScheme {
        self.numeraire
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidPathCount` if `n_paths` is 0 or above [`MAX_PATHS`]
    /// - `InvalidTimeGrid` unless times start at 0, have at least two
    ///   entries and increase strictly
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.times.len() < 2 {
            return Err(ConfigError::InvalidTimeGrid(format!(
                "need at least two times, got {}",
                self.times.len()
            )));
        }
        if self.times[0] != 0.0 {
            return Err(ConfigError::InvalidTimeGrid(format!(
                "first time must be 0, got {}",
                self.times[0]
            )));
        }
        if let Some(i) = self.times.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(ConfigError::InvalidTimeGrid(format!(
                "time {} at index {} does not exceed {}",
                self.times[i + 1],
                i + 1,
                self.times[i]
            )));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    times: Option<Vec<f64>>,
    n_paths: Option<usize>,
    seed: Option<u64>,
    numeraire: NumeraireScheme,
}

impl SimulationConfigBuilder {
    /// Sets the simulation times.
    #[inline]
    pub fn times(mut self, times: Vec<f64>) -> Self {
        self.times = Some(times);
        self
    }

    /// Sets the number of paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the seed (default 123).
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the numeraire scheme.
    #[inline]
    pub fn numeraire(mut self, numeraire: NumeraireScheme) -> Self {
        self.numeraire = numeraire;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a missing field, otherwise see
    /// [`SimulationConfig::validate`].
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let times = self.times.ok_or(ConfigError::InvalidParameter {
            name: "times",
            value: "must be specified".to_string(),
        })?;
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;
        let config = SimulationConfig {
            times,
            n_paths,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            numeraire: self.numeraire,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times() -> Vec<f64> {
        vec![0.0, 1.0, 2.0]
    }

    #[test]
    fn test_config_builder_valid() {
        let config = SimulationConfig::builder()
            .times(times())
            .n_paths(1000)
            .seed(42)
            .numeraire(NumeraireScheme::BankAccount)
            .build()
            .unwrap();
        assert_eq!(config.times(), &[0.0, 1.0, 2.0]);
        assert_eq!(config.seed(), 42);
        assert_eq!(config.numeraire(), NumeraireScheme::BankAccount);
    }

    #[test]
    fn test_config_invalid_zero_paths() {
        let result = SimulationConfig::builder().times(times()).n_paths(0).build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(0))));
    }

    #[test]
    fn test_config_invalid_too_many_paths() {
        let result = SimulationConfig::builder()
            .times(times())
            .n_paths(MAX_PATHS + 1)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidPathCount(_))));
    }

    #[test]
    fn test_config_time_grid_must_start_at_zero() {
        let result = SimulationConfig::builder()
            .times(vec![0.5, 1.0])
            .n_paths(10)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidTimeGrid(_))));
    }

    #[test]
    fn test_config_time_grid_must_increase() {
        let result = SimulationConfig::builder()
            .times(vec![0.0, 1.0, 1.0])
            .n_paths(10)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidTimeGrid(_))));
    }

    #[test]
    fn test_config_missing_times() {
        let result = SimulationConfig::builder().n_paths(1000).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "times", .. })
        ));
    }
}
