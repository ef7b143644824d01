//! Black-76 pricing formula with exact first- and second-order adjoints.
//!
//! ## Mathematical Formulas
//!
//! **Price**: P = D·ω·(F·N(ω·d₁) − K·N(ω·d₂))
//!
//! Where:
//! - d₁ = (ln(F/K) + σ²T/2) / (σ√T)
//! - d₂ = d₁ − σ√T
//! - ω = +1 for a call, −1 for a put
//! - D is the numeraire
//!
//! ## Limiting Branches
//!
//! - K = 0: the call is certain to be exercised (P = D·F), the put never is.
//! - σ√T < [`SIGMA_ROOT_T_THRESHOLD`]: discounted intrinsic value, with the
//!   one-sided intrinsic slopes as first derivatives and a zero Hessian.
//!
//! ## Derivative Order
//!
//! Every derivative vector is `[∂/∂F, ∂/∂σ, ∂/∂K]`; the Hessian uses the
//! same axis order.

use formula_core::math::{norm_cdf, norm_pdf};
use formula_core::traits::PriceFunction;
use formula_core::types::{
    BlackMarketData, DerivativeResult, OptionSpec, OptionType, SecondOrderResult,
};
use tracing::trace;

use super::SIGMA_ROOT_T_THRESHOLD;

/// Which closed form applies to an (option, data) pair.
#[derive(Debug, Clone, Copy)]
enum Regime {
    /// K = 0.
    ZeroStrike,
    /// σ√T below threshold.
    Intrinsic,
    /// Smooth closed form.
    Smooth {
        d1: f64,
        d2: f64,
        /// N(ω·d₁)
        cdf_d1: f64,
        /// N(ω·d₂)
        cdf_d2: f64,
        /// n(d₁)
        pdf_d1: f64,
        /// n(d₂)
        pdf_d2: f64,
    },
}

/// Shared evaluation state for price and all derivatives.
///
/// Built once per call so the value returned by every entry point comes from
/// the same floating-point operations.
#[derive(Debug, Clone, Copy)]
struct BlackKernel {
    sign: f64,
    forward: f64,
    strike: f64,
    numeraire: f64,
    volatility: f64,
    sqrt_t: f64,
    sigma_root_t: f64,
    regime: Regime,
}

impl BlackKernel {
    fn new(option: &OptionSpec, data: &BlackMarketData) -> Self {
        let sign = option.option_type().sign();
        let forward = data.forward();
        let strike = option.strike();
        let sqrt_t = option.time_to_expiry().sqrt();
        let sigma_root_t = data.volatility() * sqrt_t;

        let regime = if strike == 0.0 {
            trace!(strike, sigma_root_t, "black: zero-strike branch");
            Regime::ZeroStrike
        } else if sigma_root_t < SIGMA_ROOT_T_THRESHOLD {
            trace!(strike, sigma_root_t, "black: intrinsic branch");
            Regime::Intrinsic
        } else {
            // F / K overflows for subnormal strikes; the difference of logs does not
            let log_moneyness = forward.ln() - strike.ln();
            let d1 = log_moneyness / sigma_root_t + 0.5 * sigma_root_t;
            let d2 = d1 - sigma_root_t;
            Regime::Smooth {
                d1,
                d2,
                cdf_d1: norm_cdf(sign * d1),
                cdf_d2: norm_cdf(sign * d2),
                pdf_d1: norm_pdf(d1),
                pdf_d2: norm_pdf(d2),
            }
        };

        Self {
            sign,
            forward,
            strike,
            numeraire: data.numeraire(),
            volatility: data.volatility(),
            sqrt_t,
            sigma_root_t,
            regime,
        }
    }

    #[inline]
    fn is_call(&self) -> bool {
        self.sign > 0.0
    }

    /// True when ω·(F − K) > 0.
    #[inline]
    fn in_the_money(&self) -> bool {
        self.sign * (self.forward - self.strike) > 0.0
    }

    fn price(&self) -> f64 {
        match self.regime {
            Regime::ZeroStrike => {
                if self.is_call() {
                    self.numeraire * self.forward
                } else {
                    0.0
                }
            }
            Regime::Intrinsic => {
                self.numeraire * (self.sign * (self.forward - self.strike)).max(0.0)
            }
            Regime::Smooth { cdf_d1, cdf_d2, .. } => {
                self.numeraire * self.sign * (self.forward * cdf_d1 - self.strike * cdf_d2)
            }
        }
    }

    /// `[∂P/∂F, ∂P/∂σ, ∂P/∂K]`
    fn first_order(&self) -> [f64; 3] {
        let df = self.numeraire;
        match self.regime {
            Regime::ZeroStrike => {
                if self.is_call() {
                    [df, 0.0, -df]
                } else {
                    [0.0, 0.0, 0.0]
                }
            }
            Regime::Intrinsic => {
                if self.in_the_money() {
                    [self.sign * df, 0.0, -self.sign * df]
                } else {
                    [0.0, 0.0, 0.0]
                }
            }
            Regime::Smooth {
                cdf_d1,
                cdf_d2,
                pdf_d1,
                ..
            } => [
                df * self.sign * cdf_d1,
                df * self.forward * self.sqrt_t * pdf_d1,
                -df * self.sign * cdf_d2,
            ],
        }
    }

    /// Upper triangle `[ff, fσ, fK, σσ, σK, KK]`.
    ///
    /// Entries do not depend on the option type: the call and the put differ
    /// by D·(F − K), which is linear in every axis.
    fn second_order(&self) -> [f64; 6] {
        let Regime::Smooth {
            d1,
            d2,
            pdf_d1,
            pdf_d2,
            ..
        } = self.regime
        else {
            return [0.0; 6];
        };

        let df = self.numeraire;
        let f = self.forward;
        let k = self.strike;
        let v = self.sigma_root_t;
        let sqrt_t = self.sqrt_t;
        // A density that underflowed zeroes its term even when the factor is
        // unbounded (d₁·d₂ overflowing, K·σ√T underflowing)
        let weight = |pdf: f64, factor: f64| if pdf == 0.0 { 0.0 } else { pdf * factor };

        let forward_forward = df * weight(pdf_d1, 1.0 / (f * v));
        let forward_vol = -df * weight(pdf_d1, d2 * sqrt_t / v);
        let forward_strike = -df * weight(pdf_d2, 1.0 / (f * v));
        let vol_vol = df * f * weight(pdf_d1, d1 * d2 * sqrt_t * sqrt_t / v);
        let vol_strike = df * weight(pdf_d2, d1 * sqrt_t / v);
        let strike_strike = df * weight(pdf_d2, 1.0 / (k * v));

        [
            forward_forward,
            forward_vol,
            forward_strike,
            vol_vol,
            vol_strike,
            strike_strike,
        ]
    }

    /// −∂P/∂T at fixed numeraire.
    fn theta(&self) -> f64 {
        match self.regime {
            Regime::Smooth { pdf_d1, .. } => {
                -self.numeraire * self.forward * pdf_d1 * self.volatility / (2.0 * self.sqrt_t)
            }
            _ => 0.0,
        }
    }
}

/// Black-76 formula engine.
///
/// Stateless: every operation is a pure function of an [`OptionSpec`] and a
/// [`BlackMarketData`].
///
/// # Examples
/// ```
/// use formula_core::types::{BlackMarketData, DerivativeAxis, OptionSpec};
/// use formula_models::analytical::BlackFormula;
///
/// let call = OptionSpec::call(94.0, 4.5).unwrap();
/// let put = OptionSpec::put(94.0, 4.5).unwrap();
/// let data = BlackMarketData::new(104.0, 0.9, 0.5).unwrap();
///
/// // Put-call parity: C - P = D·(F - K)
/// let parity = BlackFormula::price(&call, &data) - BlackFormula::price(&put, &data);
/// assert!((parity - 0.9 * (104.0 - 94.0)).abs() < 1e-12);
///
/// let adjoint = BlackFormula::price_adjoint(&call, &data);
/// assert_eq!(adjoint.value(), BlackFormula::price(&call, &data));
/// assert!(adjoint.derivative(DerivativeAxis::Forward) > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackFormula;

impl BlackFormula {
    /// Returns a reusable price function bound to `option`.
    #[inline]
    pub fn price_function(option: &OptionSpec) -> BlackPriceFunction {
        BlackPriceFunction { option: *option }
    }

    /// Computes the Black-76 price.
    pub fn price(option: &OptionSpec, data: &BlackMarketData) -> f64 {
        BlackKernel::new(option, data).price()
    }

    /// Computes the price and `[∂/∂F, ∂/∂σ, ∂/∂K]`.
    ///
    /// The value component is identical to [`BlackFormula::price`].
    pub fn price_adjoint(option: &OptionSpec, data: &BlackMarketData) -> DerivativeResult {
        let kernel = BlackKernel::new(option, data);
        DerivativeResult::new(kernel.price(), kernel.first_order())
    }

    /// Computes the price, first derivatives and the symmetric Hessian over
    /// forward, volatility and strike.
    ///
    /// - `H[F][F]` is gamma, `H[σ][σ]` is volga, `H[F][σ]` is vanna.
    /// - All entries are zero in the limiting branches.
    pub fn price_adjoint2(option: &OptionSpec, data: &BlackMarketData) -> SecondOrderResult {
        let kernel = BlackKernel::new(option, data);
        SecondOrderResult::from_upper_triangle(
            kernel.price(),
            kernel.first_order(),
            kernel.second_order(),
        )
    }

    /// ∂P/∂F
    pub fn delta(option: &OptionSpec, data: &BlackMarketData) -> f64 {
        BlackKernel::new(option, data).first_order()[0]
    }

    /// ∂²P/∂F²
    pub fn gamma(option: &OptionSpec, data: &BlackMarketData) -> f64 {
        BlackKernel::new(option, data).second_order()[0]
    }

    /// ∂P/∂σ
    pub fn vega(option: &OptionSpec, data: &BlackMarketData) -> f64 {
        BlackKernel::new(option, data).first_order()[1]
    }

    /// ∂²P/∂F∂σ
    pub fn vanna(option: &OptionSpec, data: &BlackMarketData) -> f64 {
        BlackKernel::new(option, data).second_order()[1]
    }

    /// ∂²P/∂σ²
    pub fn volga(option: &OptionSpec, data: &BlackMarketData) -> f64 {
        BlackKernel::new(option, data).second_order()[3]
    }

    /// Driftless theta −∂P/∂T with forward and numeraire held fixed.
    ///
    /// Zero in the limiting branches.
    pub fn theta(option: &OptionSpec, data: &BlackMarketData) -> f64 {
        BlackKernel::new(option, data).theta()
    }
}

/// Black-76 price function bound to one option.
///
/// Captures the option by value, so it is `Copy` and can be shared across
/// threads and evaluated any number of times.
///
/// # Examples
/// ```
/// use formula_core::types::{BlackMarketData, OptionSpec};
/// use formula_models::analytical::BlackFormula;
///
/// let option = OptionSpec::call(0.0, 1.0).unwrap();
/// let price_fn = BlackFormula::price_function(&option);
///
/// let data = BlackMarketData::new(104.0, 0.9, 0.5).unwrap();
/// assert_eq!(price_fn.evaluate(&data), 0.9 * 104.0);
/// assert_eq!(price_fn.evaluate(&data), price_fn.evaluate(&data));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackPriceFunction {
    option: OptionSpec,
}

impl BlackPriceFunction {
    /// Returns the bound option.
    #[inline]
    pub fn option(&self) -> &OptionSpec {
        &self.option
    }

    /// Returns the bound option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option.option_type()
    }

    /// Prices the bound option.
    #[inline]
    pub fn evaluate(&self, data: &BlackMarketData) -> f64 {
        BlackFormula::price(&self.option, data)
    }
}

impl PriceFunction<BlackMarketData> for BlackPriceFunction {
    #[inline]
    fn evaluate(&self, data: &BlackMarketData) -> f64 {
        BlackPriceFunction::evaluate(self, data)
    }
}
