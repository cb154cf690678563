//! One-factor Gaussian short-rate model.

use std::fmt;
use std::sync::Arc;

use pricer_core::market_data::curves::YieldCurve;
use pricer_core::math::solvers::{BracketExpansion, BrentSolver, SolverConfig};
use pricer_core::types::SolverError;

use super::{decay_integral, VolatilityTermStructure};
use crate::analytical::{black, OptionType};
use crate::models::ModelError;

/// Initial Jamshidian bracket for the state variable.
const STATE_BRACKET: (f64, f64) = (-1.0, 1.0);
/// Number of symmetric bracket doublings before giving up.
const MAX_BRACKET_EXPANSIONS: usize = 8;
/// Absolute tolerance of the Jamshidian state solve.
const STATE_TOLERANCE: f64 = 1e-12;
/// Relative tolerance of the put-call parity check.
const PARITY_TOLERANCE: f64 = 1e-10;

/// Put-call parity violation detected by
/// [`GaussianShortRateModel::coupon_bond_option_checked`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericalInstabilityWarning {
    /// Option expiry
    pub expiry: f64,
    /// Option strike
    pub strike: f64,
    /// `|C − P − (B − K·P(0,t))|`
    pub parity_error: f64,
    /// Threshold that was exceeded
    pub tolerance: f64,
}

impl fmt::Display for NumericalInstabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "put-call parity violated by {:.3e} (tolerance {:.3e}) for expiry {} and strike {}",
            self.parity_error, self.tolerance, self.expiry, self.strike
        )
    }
}

/// Hull-White one-factor model in the `x`-state formulation.
///
/// The model is fully specified by an initial discount curve, a constant
/// mean reversion `a` and a piecewise-constant volatility `σ(t)`. The
/// auxiliary variance `y(t)` is accumulated once at construction on the
/// volatility breakpoints.
///
/// ```text
/// G(t,T)  = (1 − e^{−a(T−t)}) / a          (T − t for a = 0)
/// G'(t,T) = e^{−a(T−t)}
/// P(t,x,T) = P(0,T)/P(0,t) · exp(−G x − ½ G² y(t))
/// ```
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::curves::FlatCurve;
/// use pricer_models::models::rates::{GaussianShortRateModel, VolatilityTermStructure};
///
/// let vol = VolatilityTermStructure::new(vec![1.0, 2.0, 5.0], vec![0.01, 0.008, 0.007]).unwrap();
/// let model = GaussianShortRateModel::new(Arc::new(FlatCurve::new(0.02)), 0.03, vol).unwrap();
///
/// let p = model.zero_bond(10.0, 0.01, 20.0).unwrap();
/// assert!((p - 0.739665065962519).abs() < 1e-13);
/// ```
#[derive(Clone)]
pub struct GaussianShortRateModel {
    curve: Arc<dyn YieldCurve<f64> + Send + Sync>,
    mean_reversion: f64,
    volatility: VolatilityTermStructure,
    y_at_breakpoints: Vec<f64>,
}

impl fmt::Debug for GaussianShortRateModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaussianShortRateModel")
            .field("mean_reversion", &self.mean_reversion)
            .field("volatility", &self.volatility)
            .finish_non_exhaustive()
    }
}

impl GaussianShortRateModel {
    /// Construct the model and precompute `y` on the volatility breakpoints.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidParameter`] for a non-finite mean reversion.
    pub fn new(
        curve: Arc<dyn YieldCurve<f64> + Send + Sync>,
        mean_reversion: f64,
        volatility: VolatilityTermStructure,
    ) -> Result<Self, ModelError> {
        if !mean_reversion.is_finite() {
            return Err(ModelError::InvalidParameter {
                name: "mean_reversion",
                value: mean_reversion,
            });
        }
        let mut y_at_breakpoints = Vec::with_capacity(volatility.times().len());
        let (mut t0, mut y0) = (0.0, 0.0);
        for (&t1, &sigma) in volatility.times().iter().zip(volatility.values()) {
            let decay = (-mean_reversion * (t1 - t0)).exp();
            let y1 = decay * decay * y0
                + sigma * sigma * decay_integral(2.0 * mean_reversion, t1 - t0);
            y_at_breakpoints.push(y1);
            t0 = t1;
            y0 = y1;
        }
        Ok(Self {
            curve,
            mean_reversion,
            volatility,
            y_at_breakpoints,
        })
    }

    /// Initial discount curve.
    pub fn curve(&self) -> &(dyn YieldCurve<f64> + Send + Sync) {
        self.curve.as_ref()
    }

    /// Mean reversion `a`.
    #[inline]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Volatility term structure.
    #[inline]
    pub fn volatility(&self) -> &VolatilityTermStructure {
        &self.volatility
    }

    /// Short-rate volatility `σ(t)`, right-continuous at breakpoints.
    #[inline]
    pub fn sigma(&self, t: f64) -> f64 {
        self.volatility.sigma(t)
    }

    /// `G(t,T) = (1 − e^{−a(T−t)}) / a`.
    #[inline]
    pub fn g(&self, t: f64, maturity: f64) -> f64 {
        decay_integral(self.mean_reversion, maturity - t)
    }

    /// `G'(t,T) = e^{−a(T−t)}`.
    #[inline]
    pub fn g_prime(&self, t: f64, maturity: f64) -> f64 {
        (-self.mean_reversion * (maturity - t)).exp()
    }

    /// Auxiliary variance `y(t) = ∫₀ᵗ e^{−2a(t−u)} σ(u)² du`.
    pub fn y(&self, t: f64) -> f64 {
        let idx = self.volatility.segment(t);
        let (t0, y0) = if idx == 0 {
            (0.0, 0.0)
        } else {
            (self.volatility.times()[idx - 1], self.y_at_breakpoints[idx - 1])
        };
        let sigma = self.volatility.segment_value(idx);
        let decay = self.g_prime(t0, t);
        decay * decay * y0 + sigma * sigma * decay_integral(2.0 * self.mean_reversion, t - t0)
    }

    /// Conditional variance `Var[x(T) | x(t)] = y(T) − G'(t,T)² y(t)`.
    ///
    /// # Errors
    ///
    /// [`ModelError::InvalidTimeOrder`] if `T < t` or `t < 0`.
    pub fn variance(&self, t: f64, maturity: f64) -> Result<f64, ModelError> {
        check_order(t, maturity)?;
        let decay = self.g_prime(t, maturity);
        Ok((self.y(maturity) - decay * decay * self.y(t)).max(0.0))
    }

    /// Conditional mean of `x(T)` under the `T`-forward measure.
    ///
    /// `E^T[x(T) | x(t)] = G'(t,T)·(x + G(t,T)·y(t))`
    pub fn t_forward_expectation(&self, t: f64, x: f64, maturity: f64) -> Result<f64, ModelError> {
        check_order(t, maturity)?;
        Ok(self.g_prime(t, maturity) * (x + self.g(t, maturity) * self.y(t)))
    }

    /// Conditional mean of `x(T)` under the risk-neutral measure.
    ///
    /// The drift integral `∫ₜᵀ G'(u,T) y(u) du` is evaluated with Simpson's
    /// rule on each volatility segment crossed, where the integrand is smooth.
    pub fn risk_neutral_expectation(
        &self,
        t: f64,
        x: f64,
        maturity: f64,
    ) -> Result<f64, ModelError> {
        check_order(t, maturity)?;
        let integrand = |u: f64| self.g_prime(u, maturity) * self.y(u);
        let mut knots = vec![t];
        knots.extend(
            self.volatility
                .times()
                .iter()
                .copied()
                .filter(|&b| b > t && b < maturity),
        );
        knots.push(maturity);
        let drift: f64 = knots
            .windows(2)
            .map(|w| {
                let (lo, hi) = (w[0], w[1]);
                (hi - lo) / 6.0 * (integrand(lo) + 4.0 * integrand(0.5 * (lo + hi)) + integrand(hi))
            })
            .sum();
        Ok(self.g_prime(t, maturity) * x + drift)
    }

    /// Zero coupon bond `P(t, x, T)`.
    ///
    /// # Errors
    ///
    /// - [`ModelError::InvalidTimeOrder`] if `T < t` or `t < 0`
    /// - [`ModelError::MarketData`] on curve lookup failure
    pub fn zero_bond(&self, t: f64, x: f64, maturity: f64) -> Result<f64, ModelError> {
        let (ratio, g, half_g2y) = self.bond_coefficients(t, maturity)?;
        Ok(ratio * (-g * x - half_g2y).exp())
    }

    /// Zero coupon bonds `P(t, xᵢ, T)` for a vector of states.
    pub fn zero_bonds(&self, t: f64, states: &[f64], maturity: f64) -> Result<Vec<f64>, ModelError> {
        let (ratio, g, half_g2y) = self.bond_coefficients(t, maturity)?;
        Ok(states
            .iter()
            .map(|x| ratio * (-g * x - half_g2y).exp())
            .collect())
    }

    fn bond_coefficients(&self, t: f64, maturity: f64) -> Result<(f64, f64, f64), ModelError> {
        check_order(t, maturity)?;
        let ratio = self.curve.discount_factor(maturity)? / self.curve.discount_factor(t)?;
        let g = self.g(t, maturity);
        Ok((ratio, g, 0.5 * g * g * self.y(t)))
    }

    /// Present value of a European option on the zero bond `P(t, ·, T)`.
    ///
    /// ```text
    /// ZBO = P(0,t) · Black(K, P(0,T)/P(0,t), √(G(t,T)² y(t)), 1, ω)
    /// ```
    pub fn zero_bond_option(
        &self,
        expiry: f64,
        maturity: f64,
        strike: f64,
        option_type: OptionType,
    ) -> Result<f64, ModelError> {
        check_order(expiry, maturity)?;
        let p0 = self.curve.discount_factor(expiry)?;
        let p1 = self.curve.discount_factor(maturity)?;
        let nu = self.g(expiry, maturity) * self.y(expiry).sqrt();
        Ok(p0 * black(strike, p1 / p0, nu, 1.0, option_type))
    }

    /// Present value of a European option on a coupon bond by Jamshidian's
    /// decomposition.
    ///
    /// Solves `Σ cᵢ P(t, x*, Tᵢ) = K` for `x*` and sums zero bond options
    /// struck at `P(t, x*, Tᵢ)`. The search starts on `[−1, 1]` and is
    /// doubled symmetrically up to eight times.
    ///
    /// # Errors
    ///
    /// - [`ModelError::CashFlowMismatch`] on empty or mismatched schedules
    /// - [`ModelError::InvalidTimeOrder`] for pay times before expiry
    /// - [`ModelError::RootNotBracketed`] if no `x*` exists within the bracket
    pub fn coupon_bond_option(
        &self,
        expiry: f64,
        pay_times: &[f64],
        cash_flows: &[f64],
        strike: f64,
        option_type: OptionType,
    ) -> Result<f64, ModelError> {
        if pay_times.is_empty() || pay_times.len() != cash_flows.len() {
            return Err(ModelError::CashFlowMismatch {
                pay_times: pay_times.len(),
                cash_flows: cash_flows.len(),
            });
        }
        let mut coefficients = Vec::with_capacity(pay_times.len());
        for &pay_time in pay_times {
            coefficients.push(self.bond_coefficients(expiry, pay_time)?);
        }
        let bond_minus_strike = |x: f64| {
            coefficients
                .iter()
                .zip(cash_flows)
                .map(|((ratio, g, half_g2y), cf)| cf * ratio * (-g * x - half_g2y).exp())
                .sum::<f64>()
                - strike
        };

        let solver = BrentSolver::new(SolverConfig::new(STATE_TOLERANCE, 200));
        let x_star = solver
            .find_root_expanding(
                bond_minus_strike,
                STATE_BRACKET.0,
                STATE_BRACKET.1,
                BracketExpansion::Symmetric,
                MAX_BRACKET_EXPANSIONS,
            )
            .map_err(|err| match err {
                SolverError::NoBracket { a, b } => ModelError::RootNotBracketed {
                    expiry,
                    strike,
                    lower: a,
                    upper: b,
                },
                other => ModelError::Solver(other),
            })?;

        let mut value = 0.0;
        for ((&pay_time, &cf), (ratio, g, half_g2y)) in
            pay_times.iter().zip(cash_flows).zip(&coefficients)
        {
            let zero_strike = ratio * (-g * x_star - half_g2y).exp();
            value += cf * self.zero_bond_option(expiry, pay_time, zero_strike, option_type)?;
        }
        Ok(value)
    }

    /// Coupon bond option with a put-call parity check.
    ///
    /// Prices both sides and compares `C − P` with the forward bond value
    /// `Σ cᵢ P(0,Tᵢ) − K P(0,t)`. On a violation beyond a relative tolerance
    /// of `1e-10` the requested side is replaced by the parity-implied value
    /// of the out-of-the-money side, a warning is logged and returned.
    pub fn coupon_bond_option_checked(
        &self,
        expiry: f64,
        pay_times: &[f64],
        cash_flows: &[f64],
        strike: f64,
        option_type: OptionType,
    ) -> Result<(f64, Option<NumericalInstabilityWarning>), ModelError> {
        let call = self.coupon_bond_option(expiry, pay_times, cash_flows, strike, OptionType::Call)?;
        let put = self.coupon_bond_option(expiry, pay_times, cash_flows, strike, OptionType::Put)?;
        let mut bond = 0.0;
        for (&pay_time, &cf) in pay_times.iter().zip(cash_flows) {
            bond += cf * self.curve.discount_factor(pay_time)?;
        }
        let discounted_strike = strike * self.curve.discount_factor(expiry)?;
        let (value, warning) =
            reconcile_parity(call, put, bond, discounted_strike, option_type);
        let warning = warning.map(|(parity_error, tolerance)| NumericalInstabilityWarning {
            expiry,
            strike,
            parity_error,
            tolerance,
        });
        if let Some(w) = &warning {
            tracing::warn!(%w, "coupon bond option repaired from put-call parity");
        }
        Ok((value, warning))
    }

    /// Instantaneous forward rate `f(t, T)` seen at state `x`.
    pub fn forward_rate(&self, t: f64, x: f64, maturity: f64) -> Result<f64, ModelError> {
        check_order(t, maturity)?;
        let f0 = self.curve.instantaneous_forward(maturity)?;
        Ok(f0 + self.g_prime(t, maturity) * (x + self.g(t, maturity) * self.y(t)))
    }

    /// Short rate `r(t) = f(0,t) + x`.
    pub fn short_rate(&self, t: f64, x: f64) -> Result<f64, ModelError> {
        Ok(self.curve.instantaneous_forward(t)? + x)
    }

    /// Numeraire `exp(s) / P(0,t)` for the accumulated state `s`.
    pub fn numeraire(&self, t: f64, s: f64) -> Result<f64, ModelError> {
        Ok(s.exp() / self.curve.discount_factor(t)?)
    }
}

#[inline]
fn check_order(t: f64, maturity: f64) -> Result<(), ModelError> {
    if t < 0.0 || maturity < t {
        return Err(ModelError::InvalidTimeOrder { t, maturity });
    }
    Ok(())
}

/// Returns the repaired value and `(parity_error, tolerance)` on violation.
fn reconcile_parity(
    call: f64,
    put: f64,
    bond: f64,
    discounted_strike: f64,
    option_type: OptionType,
) -> (f64, Option<(f64, f64)>) {
    let forward = bond - discounted_strike;
    let parity_error = (call - put - forward).abs();
    let tolerance = PARITY_TOLERANCE * bond.abs().max(discounted_strike.abs()).max(1.0);
    let requested = match option_type {
        OptionType::Call => call,
        OptionType::Put => put,
    };
    if parity_error <= tolerance {
        return (requested, None);
    }
    // forward > 0 makes the put the out-of-the-money side
    let repaired = if forward > 0.0 {
        match option_type {
            OptionType::Call => put + forward,
            OptionType::Put => put,
        }
    } else {
        match option_type {
            OptionType::Call => call,
            OptionType::Put => call - forward,
        }
    };
    (repaired, Some((parity_error, tolerance)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::FlatCurve;

    // ================================================================
    // Fixtures
    // ================================================================

    fn model_with(mean_reversion: f64) -> GaussianShortRateModel {
        let vol =
            VolatilityTermStructure::new(vec![1.0, 2.0, 5.0], vec![0.01, 0.008, 0.007]).unwrap();
        GaussianShortRateModel::new(Arc::new(FlatCurve::new(0.02)), mean_reversion, vol).unwrap()
    }

    fn model() -> GaussianShortRateModel {
        model_with(0.03)
    }

    // ================================================================
    // y(t) and σ(t)
    // ================================================================

    #[test]
    fn test_y_matches_breakpoint_values() {
        let m = model();
        for (i, &t) in m.volatility().times().iter().enumerate() {
            assert_relative_eq!(m.y(t), m.y_at_breakpoints[i], epsilon = 1e-18);
        }
        assert_eq!(m.y(0.0), 0.0);
    }

    #[test]
    fn test_y_zero_mean_reversion_is_integrated_variance() {
        let m = model_with(0.0);
        let expected = 1.0 * 1e-4 + 1.0 * 0.64e-4 + 3.0 * 0.49e-4 + 2.0 * 0.49e-4;
        assert_relative_eq!(m.y(7.0), expected, max_relative = 1e-14);
    }

    #[test]
    fn test_flat_breakpoints_match_single_breakpoint() {
        let curve = Arc::new(FlatCurve::new(0.02));
        let vol3 = VolatilityTermStructure::new(vec![1.0, 2.0, 5.0], vec![0.01; 3]).unwrap();
        let m3 = GaussianShortRateModel::new(curve.clone(), 0.03, vol3).unwrap();
        let m1 = GaussianShortRateModel::new(curve, 0.03, VolatilityTermStructure::flat(0.01).unwrap())
            .unwrap();
        for t in [0.0, 0.5, 1.0, 1.5, 3.0, 5.0, 10.0] {
            assert_eq!(m3.sigma(t), m1.sigma(t));
            assert_relative_eq!(m3.y(t), m1.y(t), max_relative = 1e-13);
        }
    }

    // ================================================================
    // Closed-form reference values
    // ================================================================

    #[test]
    fn test_zero_bond_reference() {
        assert_relative_eq!(
            model().zero_bond(10.0, 0.01, 20.0).unwrap(),
            0.739665065962519,
            epsilon = 1e-13
        );
    }

    #[test]
    fn test_zero_bond_at_origin_is_curve() {
        let m = model();
        assert_relative_eq!(
            m.zero_bond(0.0, 0.0, 7.0).unwrap(),
            (-0.14_f64).exp(),
            epsilon = 1e-15
        );
        assert_eq!(m.zero_bond(3.0, 0.5, 3.0).unwrap(), 1.0);
    }

    #[test]
    fn test_zero_bond_option_reference() {
        let m = model();
        let call = m.zero_bond_option(10.0, 20.0, 1.0, OptionType::Call).unwrap();
        let put = m.zero_bond_option(10.0, 20.0, 1.0, OptionType::Put).unwrap();
        assert_relative_eq!(call, 0.008017065488223098, epsilon = 1e-12);
        assert_relative_eq!(put, 0.1564277725305656, epsilon = 1e-12);
    }

    #[test]
    fn test_coupon_bond_option_reference() {
        let m = model();
        let pay_times = [11.0, 12.0, 13.0, 14.0, 15.0, 15.0];
        let cash_flows = [0.02, 0.02, 0.02, 0.02, 0.02, 1.0];
        let call = m
            .coupon_bond_option(10.0, &pay_times, &cash_flows, 1.0, OptionType::Call)
            .unwrap();
        assert_relative_eq!(call, 0.029017570861380355, epsilon = 1e-9);
    }

    #[test]
    fn test_coupon_bond_option_with_strike_as_cash_flow() {
        let m = model();
        let pay_times = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 15.0];
        let cash_flows = [-1.0, 0.02, 0.02, 0.02, 0.02, 0.02, 1.0];
        let call = m
            .coupon_bond_option(10.0, &pay_times, &cash_flows, 0.0, OptionType::Call)
            .unwrap();
        assert_relative_eq!(call, 0.029017570861380355, epsilon = 1e-9);
    }

    #[test]
    fn test_single_cash_flow_is_zero_bond_option() {
        let m = model();
        for option_type in [OptionType::Call, OptionType::Put] {
            let cb = m
                .coupon_bond_option(10.0, &[20.0], &[1.0], 1.0, option_type)
                .unwrap();
            let zb = m.zero_bond_option(10.0, 20.0, 1.0, option_type).unwrap();
            assert_relative_eq!(cb, zb, epsilon = 2e-12);
        }
    }

    #[test]
    fn test_coupon_bond_option_root_not_bracketed() {
        // positive cash flows never sum to a zero strike
        let err = model()
            .coupon_bond_option(10.0, &[11.0, 12.0], &[0.5, 0.5], 0.0, OptionType::Call)
            .unwrap_err();
        assert!(matches!(err, ModelError::RootNotBracketed { expiry, .. } if expiry == 10.0));
    }

    #[test]
    fn test_coupon_bond_option_rejects_mismatched_schedule() {
        let err = model()
            .coupon_bond_option(10.0, &[11.0, 12.0], &[1.0], 1.0, OptionType::Call)
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::CashFlowMismatch {
                pay_times: 2,
                cash_flows: 1
            }
        );
    }

    // ================================================================
    // Parity check
    // ================================================================

    #[test]
    fn test_checked_option_without_violation() {
        let m = model();
        let pay_times = [11.0, 12.0, 13.0, 14.0, 15.0, 15.0];
        let cash_flows = [0.02, 0.02, 0.02, 0.02, 0.02, 1.0];
        let (value, warning) = m
            .coupon_bond_option_checked(10.0, &pay_times, &cash_flows, 1.0, OptionType::Call)
            .unwrap();
        assert!(warning.is_none());
        assert_relative_eq!(value, 0.029017570861380355, epsilon = 1e-9);
    }

    #[test]
    fn test_reconcile_parity_uses_out_of_the_money_side() {
        // forward = 0.3, put is out of the money; corrupted call
        let (value, warning) = reconcile_parity(0.5, 0.05, 1.0, 0.7, OptionType::Call);
        assert_relative_eq!(value, 0.35, epsilon = 1e-15);
        assert!(warning.is_some());

        // forward = -0.2, call is out of the money; corrupted put
        let (value, warning) = reconcile_parity(0.01, 0.5, 0.5, 0.7, OptionType::Put);
        assert_relative_eq!(value, 0.21, epsilon = 1e-15);
        assert!(warning.is_some());
    }

    #[test]
    fn test_reconcile_parity_within_tolerance() {
        let (value, warning) = reconcile_parity(0.35, 0.05, 1.0, 0.7, OptionType::Put);
        assert_eq!(value, 0.05);
        assert!(warning.is_none());
    }

    // ================================================================
    // Moments
    // ================================================================

    #[test]
    fn test_variance_and_expectations() {
        let m = model();
        assert_eq!(m.variance(4.0, 4.0).unwrap(), 0.0);
        assert!(m.variance(1.0, 6.0).unwrap() > 0.0);
        assert_relative_eq!(m.t_forward_expectation(0.0, 0.0, 5.0).unwrap(), 0.0);
        assert!(matches!(
            m.variance(5.0, 4.0),
            Err(ModelError::InvalidTimeOrder { .. })
        ));
    }

    #[test]
    fn test_risk_neutral_expectation_zero_mean_reversion() {
        // a = 0, flat σ: ∫₀ᵀ σ² u du = σ² T² / 2, exact under Simpson
        let m = GaussianShortRateModel::new(
            Arc::new(FlatCurve::new(0.02)),
            0.0,
            VolatilityTermStructure::flat(0.01).unwrap(),
        )
        .unwrap();
        let mean = m.risk_neutral_expectation(0.0, 0.0, 4.0).unwrap();
        assert_relative_eq!(mean, 1e-4 * 8.0, max_relative = 1e-12);
    }

    #[test]
    fn test_short_rate_forward_rate_and_numeraire() {
        let m = model();
        assert_relative_eq!(m.short_rate(2.0, 0.01).unwrap(), 0.03, epsilon = 1e-12);
        assert_relative_eq!(m.forward_rate(0.0, 0.0, 3.0).unwrap(), 0.02, epsilon = 1e-12);
        assert_relative_eq!(
            m.numeraire(2.0, 0.0).unwrap(),
            (0.04_f64).exp(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_small_mean_reversion_approaches_zero_limit() {
        let m0 = model_with(0.0);
        let m_small = model_with(1e-7);
        assert_relative_eq!(
            m0.zero_bond(10.0, 0.01, 20.0).unwrap(),
            m_small.zero_bond(10.0, 0.01, 20.0).unwrap(),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            m0.zero_bond_option(10.0, 20.0, 0.8, OptionType::Call).unwrap(),
            m_small.zero_bond_option(10.0, 20.0, 0.8, OptionType::Call).unwrap(),
            epsilon = 1e-6
        );
    }
}
