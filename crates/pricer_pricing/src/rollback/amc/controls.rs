//! Regression controls derived from the simulated state.

use pricer_models::models::rates::GaussianShortRateModel;

use crate::error::PricingError;

/// Explanatory variables of the Longstaff-Schwartz regressions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum RegressionControls {
    /// The short-rate state `x`.
    #[default]
    StateVariable,
    /// Continuously compounded zero rate to `maturity`, optionally with its
    /// call payoff `max(rate − strike_rate, 0)` as a second control.
    CoterminalRate {
        /// Maturity of the zero rate
        maturity: f64,
        /// Strike of the optional call control
        strike_rate: Option<f64>,
    },
}

impl RegressionControls {
    /// Number of control variables.
    pub fn len(&self) -> usize {
        match self {
            Self::StateVariable => 1,
            Self::CoterminalRate {
                strike_rate: None, ..
            } => 1,
            Self::CoterminalRate { .. } => 2,
        }
    }

    /// Always false: every variant has at least one control.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Control values at time `t` for the states `x`, one vector per control.
    pub(crate) fn evaluate(
        &self,
        model: &GaussianShortRateModel,
        t: f64,
        x: &[f64],
    ) -> Result<Vec<Vec<f64>>, PricingError> {
        match *self {
            Self::StateVariable => Ok(vec![x.to_vec()]),
            Self::CoterminalRate {
                maturity,
                strike_rate,
            } => {
                if !(maturity > t) {
                    return Err(PricingError::convergence(
                        "amc",
                        t,
                        format!("co-terminal rate maturity {maturity} not after observation"),
                    ));
                }
                let tau = maturity - t;
                let rates: Vec<f64> = model
                    .zero_bonds(t, x, maturity)?
                    .iter()
                    .map(|p| -p.ln() / tau)
                    .collect();
                match strike_rate {
                    Some(k) => {
                        let calls = rates.iter().map(|r| (r - k).max(0.0)).collect();
                        Ok(vec![rates, calls])
                    }
                    None => Ok(vec![rates]),
                }
            }
        }
    }
}
