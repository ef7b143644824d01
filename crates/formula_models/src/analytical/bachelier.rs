//! Bachelier (normal) pricing formula with exact first-order Greeks.
//!
//! The Bachelier model assumes additive Gaussian forward dynamics, so the
//! volatility is quoted in forward units and negative forwards are allowed.
//! It is the market standard for interest rate options.
//!
//! ## Mathematical Formulas
//!
//! **Price**: P = D·(x·N(d) + σ√T·n(d))
//!
//! Where:
//! - x = ω·(F − K), ω = +1 for a call, −1 for a put
//! - d = x / (σ√T)
//! - D is the numeraire
//!
//! **Greeks** (all scaled by D):
//! - Delta: ω·N(d), and ∂P/∂K = −ω·N(d)
//! - Vega: √T·n(d)
//! - Gamma: n(d) / (σ√T)
//! - Theta: −σ·n(d) / (2√T)
//!
//! ## Limiting Branch
//!
//! When σ√T < [`SIGMA_ROOT_T_THRESHOLD`] the price is the intrinsic value.
//! At the money (|x| below the same threshold) d is held at 0: vega and
//! theta take their finite one-sided limits and gamma is `+∞`, the density
//! of the payoff kink.

use formula_core::math::{norm_cdf, norm_pdf, FRAC_1_SQRT_2PI};
use formula_core::traits::PriceFunction;
use formula_core::types::{DerivativeResult, NormalMarketData, OptionSpec, OptionType};
use tracing::trace;

use super::SIGMA_ROOT_T_THRESHOLD;

#[derive(Debug, Clone, Copy)]
enum Regime {
    Intrinsic,
    Smooth {
        /// N(d)
        cdf: f64,
        /// n(d)
        pdf: f64,
    },
}

/// Unscaled Bachelier terms shared by the price and every Greek.
#[derive(Debug, Clone, Copy)]
struct NormalKernel {
    sign: f64,
    /// ω·(F − K)
    moneyness: f64,
    volatility: f64,
    sqrt_t: f64,
    sigma_root_t: f64,
    regime: Regime,
}

impl NormalKernel {
    fn new(
        forward: f64,
        strike: f64,
        time_to_expiry: f64,
        volatility: f64,
        option_type: OptionType,
    ) -> Self {
        let sign = option_type.sign();
        let moneyness = sign * (forward - strike);
        let sqrt_t = time_to_expiry.sqrt();
        let sigma_root_t = volatility * sqrt_t;

        let regime = if sigma_root_t < SIGMA_ROOT_T_THRESHOLD {
            trace!(strike, sigma_root_t, "bachelier: intrinsic branch");
            Regime::Intrinsic
        } else {
            let d = moneyness / sigma_root_t;
            Regime::Smooth {
                cdf: norm_cdf(d),
                pdf: norm_pdf(d),
            }
        };

        Self {
            sign,
            moneyness,
            volatility,
            sqrt_t,
            sigma_root_t,
            regime,
        }
    }

    fn from_option(option: &OptionSpec, data: &NormalMarketData) -> Self {
        Self::new(
            data.forward(),
            option.strike(),
            option.time_to_expiry(),
            data.volatility(),
            option.option_type(),
        )
    }

    #[inline]
    fn at_the_money(&self) -> bool {
        self.moneyness.abs() < SIGMA_ROOT_T_THRESHOLD
    }

    fn price(&self) -> f64 {
        match self.regime {
            Regime::Intrinsic => self.moneyness.max(0.0),
            Regime::Smooth { cdf, pdf } => self.moneyness * cdf + self.sigma_root_t * pdf,
        }
    }

    /// ∂/∂F; ∂/∂K is its negation.
    fn delta(&self) -> f64 {
        match self.regime {
            Regime::Intrinsic => {
                if self.moneyness > 0.0 {
                    self.sign
                } else {
                    0.0
                }
            }
            Regime::Smooth { cdf, .. } => self.sign * cdf,
        }
    }

    fn vega(&self) -> f64 {
        match self.regime {
            Regime::Intrinsic => {
                if self.at_the_money() {
                    self.sqrt_t * FRAC_1_SQRT_2PI
                } else {
                    0.0
                }
            }
            Regime::Smooth { pdf, .. } => self.sqrt_t * pdf,
        }
    }

    fn gamma(&self) -> f64 {
        match self.regime {
            Regime::Intrinsic => {
                if self.at_the_money() {
                    f64::INFINITY
                } else {
                    0.0
                }
            }
            Regime::Smooth { pdf, .. } => pdf / self.sigma_root_t,
        }
    }

    fn theta(&self) -> f64 {
        match self.regime {
            Regime::Intrinsic => {
                if self.at_the_money() && self.volatility > 0.0 {
                    // Tends to -∞ as T -> 0
                    -self.volatility * FRAC_1_SQRT_2PI / (2.0 * self.sqrt_t)
                } else {
                    0.0
                }
            }
            Regime::Smooth { pdf, .. } => -self.volatility * pdf / (2.0 * self.sqrt_t),
        }
    }
}

/// Unscaled Bachelier price `x·N(d) + σ√T·n(d)`, or `max(x, 0)` when
/// σ√T is below [`SIGMA_ROOT_T_THRESHOLD`].
///
/// Inputs are not validated; callers wanting the numeraire-scaled price with
/// checked inputs should use [`BachelierFormula::price`].
///
/// # Examples
/// ```
/// use formula_core::types::OptionType;
/// use formula_models::analytical::bachelier_price;
///
/// let call = bachelier_price(0.03, 0.03, 1.0, 0.01, OptionType::Call);
/// // ATM: σ√T·n(0)
/// assert!((call - 0.01 * 0.398_942_280_401_432_7).abs() < 1e-17);
///
/// // Zero volatility: intrinsic value
/// assert_eq!(bachelier_price(0.03, 0.01, 1.0, 0.0, OptionType::Call), 0.03 - 0.01);
/// ```
pub fn bachelier_price(
    forward: f64,
    strike: f64,
    time_to_expiry: f64,
    volatility: f64,
    option_type: OptionType,
) -> f64 {
    NormalKernel::new(forward, strike, time_to_expiry, volatility, option_type).price()
}

/// Bachelier (normal) formula engine.
///
/// Every output is scaled by the numeraire of the [`NormalMarketData`].
///
/// # Examples
/// ```
/// use formula_core::types::{DerivativeAxis, NormalMarketData, OptionSpec};
/// use formula_models::analytical::BachelierFormula;
///
/// let option = OptionSpec::call(0.025, 2.0).unwrap();
/// let data = NormalMarketData::new(0.03, 0.98, 0.01).unwrap();
///
/// let adjoint = BachelierFormula::price_adjoint(&option, &data);
/// assert_eq!(BachelierFormula::delta(&option, &data), adjoint.derivative(DerivativeAxis::Forward));
/// assert_eq!(BachelierFormula::vega(&option, &data), adjoint.derivative(DerivativeAxis::Volatility));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BachelierFormula;

impl BachelierFormula {
    /// Returns a reusable price function bound to `option`.
    #[inline]
    pub fn price_function(option: &OptionSpec) -> NormalPriceFunction {
        NormalPriceFunction { option: *option }
    }

    /// Computes the numeraire-scaled Bachelier price.
    pub fn price(option: &OptionSpec, data: &NormalMarketData) -> f64 {
        data.numeraire() * NormalKernel::from_option(option, data).price()
    }

    /// Computes the price and `[∂/∂F, ∂/∂σ, ∂/∂K]`.
    pub fn price_adjoint(option: &OptionSpec, data: &NormalMarketData) -> DerivativeResult {
        let kernel = NormalKernel::from_option(option, data);
        let df = data.numeraire();
        let delta = df * kernel.delta();
        DerivativeResult::new(df * kernel.price(), [delta, df * kernel.vega(), -delta])
    }

    /// ∂P/∂F; identical to the forward slot of [`BachelierFormula::price_adjoint`].
    pub fn delta(option: &OptionSpec, data: &NormalMarketData) -> f64 {
        data.numeraire() * NormalKernel::from_option(option, data).delta()
    }

    /// ∂²P/∂F².
    ///
    /// `+∞` at the money in the limiting branch.
    pub fn gamma(option: &OptionSpec, data: &NormalMarketData) -> f64 {
        data.numeraire() * NormalKernel::from_option(option, data).gamma()
    }

    /// ∂P/∂σ; identical to the volatility slot of [`BachelierFormula::price_adjoint`].
    pub fn vega(option: &OptionSpec, data: &NormalMarketData) -> f64 {
        data.numeraire() * NormalKernel::from_option(option, data).vega()
    }

    /// −∂P/∂T with forward and numeraire held fixed.
    ///
    /// `−∞` at the money with zero expiry and positive volatility.
    pub fn theta(option: &OptionSpec, data: &NormalMarketData) -> f64 {
        data.numeraire() * NormalKernel::from_option(option, data).theta()
    }
}

/// Bachelier price function bound to one option.
///
/// # Examples
/// ```
/// use formula_core::traits::PriceFunction;
/// use formula_core::types::{NormalMarketData, OptionSpec};
/// use formula_models::analytical::BachelierFormula;
///
/// let price_fn = BachelierFormula::price_function(&OptionSpec::put(0.02, 1.0).unwrap());
/// let data = NormalMarketData::new(0.01, 0.95, 0.0).unwrap();
/// assert!((PriceFunction::evaluate(&price_fn, &data) - 0.95 * 0.01).abs() < 1e-17);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalPriceFunction {
    option: OptionSpec,
}

impl NormalPriceFunction {
    /// Returns the bound option.
    #[inline]
    pub fn option(&self) -> &OptionSpec {
        &self.option
    }

    /// Prices the bound option.
    #[inline]
    pub fn evaluate(&self, data: &NormalMarketData) -> f64 {
        BachelierFormula::price(&self.option, data)
    }
}

impl PriceFunction<NormalMarketData> for NormalPriceFunction {
    #[inline]
    fn evaluate(&self, data: &NormalMarketData) -> f64 {
        NormalPriceFunction::evaluate(self, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use formula_core::types::DerivativeAxis;

    fn data(forward: f64, numeraire: f64, volatility: f64) -> NormalMarketData {
        NormalMarketData::new(forward, numeraire, volatility).unwrap()
    }

    fn option(strike: f64, expiry: f64, option_type: OptionType) -> OptionSpec {
        OptionSpec::new(strike, expiry, option_type).unwrap()
    }

    // ==========================================================
    // Raw Formula Tests
    // ==========================================================

    #[test]
    fn test_raw_price_is_unscaled() {
        let raw = bachelier_price(104.0, 94.0, 4.5, 25.0, OptionType::Call);
        let scaled = BachelierFormula::price(&option(94.0, 4.5, OptionType::Call), &data(104.0, 0.9, 25.0));
        assert_eq!(scaled, 0.9 * raw);
    }

    #[test]
    fn test_raw_price_zero_volatility() {
        assert_eq!(bachelier_price(104.0, 94.0, 4.5, 0.0, OptionType::Call), 10.0);
        assert_eq!(bachelier_price(104.0, 94.0, 4.5, 0.0, OptionType::Put), 0.0);
        assert_eq!(bachelier_price(104.0, 124.0, 0.0, 25.0, OptionType::Put), 20.0);
    }

    #[test]
    fn test_raw_price_negative_forward() {
        let call = bachelier_price(-0.005, 0.0, 1.0, 0.01, OptionType::Call);
        let put = bachelier_price(-0.005, 0.0, 1.0, 0.01, OptionType::Put);
        assert!(call > 0.0);
        assert_abs_diff_eq!(call - put, -0.005, epsilon = 1e-15);
    }

    // ==========================================================
    // Price Tests
    // ==========================================================

    #[test]
    fn test_price_reference_values() {
        let market = data(104.0, 0.9, 25.0);
        let cases = [
            (94.0, OptionType::Call, 23.878_912_746_106_586),
            (94.0, OptionType::Put, 14.878_912_746_106_586),
            (124.0, OptionType::Call, 11.379_630_758_528_982),
            (124.0, OptionType::Put, 29.379_630_758_528_982),
            (104.0, OptionType::Call, 19.041_398_444_736_775),
        ];
        for (strike, option_type, expected) in cases {
            let price = BachelierFormula::price(&option(strike, 4.5, option_type), &market);
            assert_relative_eq!(price, expected, max_relative = 1e-13);
        }
    }

    #[test]
    fn test_put_call_parity() {
        let market = data(0.03, 0.98, 0.01);
        for strike in [0.0, 0.01, 0.025, 0.03, 0.06] {
            let call = BachelierFormula::price(&option(strike, 2.0, OptionType::Call), &market);
            let put = BachelierFormula::price(&option(strike, 2.0, OptionType::Put), &market);
            assert_abs_diff_eq!(call - put, 0.98 * (0.03 - strike), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_price_function_matches_price() {
        let opt = option(94.0, 4.5, OptionType::Call);
        let price_fn = BachelierFormula::price_function(&opt);
        assert_eq!(price_fn.option(), &opt);
        let market = data(104.0, 0.9, 25.0);
        assert_eq!(price_fn.evaluate(&market), BachelierFormula::price(&opt, &market));
    }

    // ==========================================================
    // Adjoint and Greek Tests
    // ==========================================================

    #[test]
    fn test_adjoint_reference_values() {
        let market = data(104.0, 0.9, 25.0);
        let adjoint = BachelierFormula::price_adjoint(&option(94.0, 4.5, OptionType::Put), &market);
        assert_relative_eq!(adjoint.value(), 14.878_912_746_106_586, max_relative = 1e-13);
        assert_relative_eq!(
            adjoint.derivative(DerivativeAxis::Forward),
            -0.382_696_320_740_555_93,
            max_relative = 1e-13
        );
        assert_relative_eq!(
            adjoint.derivative(DerivativeAxis::Volatility),
            0.748_235_038_140_485_9,
            max_relative = 1e-13
        );
        assert_relative_eq!(
            adjoint.derivative(DerivativeAxis::Strike),
            0.382_696_320_740_555_93,
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_greeks_match_adjoint_exactly() {
        let market = data(104.0, 0.9, 25.0);
        for strike in [94.0, 104.0, 124.0] {
            for option_type in [OptionType::Call, OptionType::Put] {
                let opt = option(strike, 4.5, option_type);
                let adjoint = BachelierFormula::price_adjoint(&opt, &market);
                assert_eq!(
                    BachelierFormula::delta(&opt, &market),
                    adjoint.derivative(DerivativeAxis::Forward)
                );
                assert_eq!(
                    BachelierFormula::vega(&opt, &market),
                    adjoint.derivative(DerivativeAxis::Volatility)
                );
            }
        }
    }

    #[test]
    fn test_gamma_and_theta_reference_values() {
        let market = data(104.0, 0.9, 25.0);
        let opt = option(124.0, 4.5, OptionType::Call);
        assert_relative_eq!(
            BachelierFormula::gamma(&opt, &market),
            0.006_305_552_508_250_889,
            max_relative = 1e-13
        );
        assert_relative_eq!(
            BachelierFormula::theta(&opt, &market),
            -1.970_485_158_828_402_7,
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_greeks_central_differences() {
        let market = data(104.0, 0.9, 25.0);
        let h_f = 1e-2;
        let h_v = 1e-4;
        let h_t = 1e-5;
        for strike in [94.0, 104.0, 124.0] {
            for option_type in [OptionType::Call, OptionType::Put] {
                let opt = option(strike, 4.5, option_type);
                let price = |f: f64, v: f64, t: f64| {
                    BachelierFormula::price(&option(strike, t, option_type), &data(f, 0.9, v))
                };
                let p0 = price(104.0, 25.0, 4.5);

                let fd_delta = (price(104.0 + h_f, 25.0, 4.5) - price(104.0 - h_f, 25.0, 4.5)) / (2.0 * h_f);
                let fd_gamma =
                    (price(104.0 + h_f, 25.0, 4.5) - 2.0 * p0 + price(104.0 - h_f, 25.0, 4.5)) / (h_f * h_f);
                let fd_vega = (price(104.0, 25.0 + h_v, 4.5) - price(104.0, 25.0 - h_v, 4.5)) / (2.0 * h_v);
                let fd_theta = -(price(104.0, 25.0, 4.5 + h_t) - price(104.0, 25.0, 4.5 - h_t)) / (2.0 * h_t);

                assert_abs_diff_eq!(BachelierFormula::delta(&opt, &market), fd_delta, epsilon = 1e-5);
                assert_abs_diff_eq!(BachelierFormula::gamma(&opt, &market), fd_gamma, epsilon = 1e-5);
                assert_abs_diff_eq!(BachelierFormula::vega(&opt, &market), fd_vega, epsilon = 1e-5);
                assert_abs_diff_eq!(BachelierFormula::theta(&opt, &market), fd_theta, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_strike_derivative_central_difference() {
        let market = data(0.03, 0.98, 0.01);
        let h = 1e-5;
        for option_type in [OptionType::Call, OptionType::Put] {
            let adjoint = BachelierFormula::price_adjoint(&option(0.025, 2.0, option_type), &market);
            let up = BachelierFormula::price(&option(0.025 + h, 2.0, option_type), &market);
            let down = BachelierFormula::price(&option(0.025 - h, 2.0, option_type), &market);
            assert_abs_diff_eq!(
                adjoint.derivative(DerivativeAxis::Strike),
                (up - down) / (2.0 * h),
                epsilon = 1e-7
            );
        }
    }

    // ==========================================================
    // Limiting Branch Tests
    // ==========================================================

    #[test]
    fn test_zero_volatility_intrinsic() {
        let market = data(104.0, 0.9, 0.0);
        let itm = BachelierFormula::price_adjoint(&option(94.0, 4.5, OptionType::Call), &market);
        assert_abs_diff_eq!(itm.value(), 9.0, epsilon = 1e-15);
        assert_eq!(itm.derivatives(), &[0.9, 0.0, -0.9]);

        let otm = BachelierFormula::price_adjoint(&option(94.0, 4.5, OptionType::Put), &market);
        assert_eq!(otm.value(), 0.0);
        assert_eq!(otm.derivatives(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_gamma_infinite_at_the_money_zero_volatility() {
        let market = data(104.0, 0.9, 0.0);
        for option_type in [OptionType::Call, OptionType::Put] {
            let gamma = BachelierFormula::gamma(&option(104.0, 4.5, option_type), &market);
            assert!(gamma.is_infinite() && gamma > 0.0);
        }
        let away = BachelierFormula::gamma(&option(94.0, 4.5, OptionType::Call), &market);
        assert_eq!(away, 0.0);
    }

    #[test]
    fn test_vega_and_theta_at_the_money_zero_volatility() {
        let market = data(104.0, 0.9, 0.0);
        let opt = option(104.0, 4.5, OptionType::Call);
        assert_relative_eq!(
            BachelierFormula::vega(&opt, &market),
            0.761_655_937_789_470_9,
            max_relative = 1e-14
        );
        assert_eq!(BachelierFormula::theta(&opt, &market), 0.0);

        let expired = BachelierFormula::theta(&option(104.0, 0.0, OptionType::Call), &data(104.0, 0.9, 25.0));
        assert!(expired.is_infinite() && expired < 0.0);
    }
}
