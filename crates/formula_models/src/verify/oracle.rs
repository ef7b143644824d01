//! Finite-difference oracle for the analytic engines.
//!
//! Each analytic sensitivity is compared to a bump-and-revalue estimate:
//!
//! | Quantity | Estimate |
//! |----------|----------|
//! | First derivatives | Central difference of the price |
//! | Theta | Central difference of the price in expiry, negated |
//! | Black Hessian | Central difference of the analytic gradient |
//! | Bachelier gamma | Central second difference of the price |
//!
//! Where the lower bump would leave the input domain (zero strike, zero
//! volatility, zero expiry, or a Black forward below the step) a
//! second-order forward one-sided difference is used instead.

use formula_core::types::{
    BlackMarketData, DerivativeAxis, NormalMarketData, OptionSpec, OptionType, Result,
};
use tracing::warn;

use super::config::VerificationConfig;
use super::error::VerificationError;
use super::finite_difference::{central_first_order, central_second_order, forward_one_sided};
use crate::analytical::{BachelierFormula, BlackFormula};

/// Hessian entries checked for Black, upper triangle.
const HESSIAN_ENTRIES: [(DerivativeAxis, DerivativeAxis, &str); 6] = [
    (DerivativeAxis::Forward, DerivativeAxis::Forward, "forward-forward"),
    (DerivativeAxis::Forward, DerivativeAxis::Volatility, "forward-volatility"),
    (DerivativeAxis::Forward, DerivativeAxis::Strike, "forward-strike"),
    (DerivativeAxis::Volatility, DerivativeAxis::Volatility, "volatility-volatility"),
    (DerivativeAxis::Volatility, DerivativeAxis::Strike, "volatility-strike"),
    (DerivativeAxis::Strike, DerivativeAxis::Strike, "strike-strike"),
];

/// Comparison of one analytic sensitivity against its finite difference.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisVerification {
    /// Sensitivity name, e.g. `"forward"` or `"volatility-strike"`.
    pub name: &'static str,
    /// Value from the closed form.
    pub analytic: f64,
    /// Value from finite differences.
    pub finite_difference: f64,
    /// Tolerance applied.
    pub tolerance: f64,
    /// Whether `|analytic − fd| <= tolerance · max(1, |fd|)`.
    pub passed: bool,
}

impl AxisVerification {
    /// Compares `analytic` to `finite_difference`, logging a warning on failure.
    pub fn new(name: &'static str, analytic: f64, finite_difference: f64, tolerance: f64) -> Self {
        let passed = scaled_error(analytic, finite_difference) <= tolerance;
        if !passed {
            warn!(
                axis = name,
                analytic,
                finite_difference,
                tolerance,
                "analytic sensitivity disagrees with finite difference"
            );
        }
        Self {
            name,
            analytic,
            finite_difference,
            tolerance,
            passed,
        }
    }

    /// Returns `|analytic − fd| / max(1, |fd|)`.
    #[inline]
    pub fn error(&self) -> f64 {
        scaled_error(self.analytic, self.finite_difference)
    }
}

/// Result of verifying one (option, market data) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjointVerification {
    /// Analytic price at the base point.
    pub value: f64,
    /// First-order checks followed by theta.
    pub first_order: Vec<AxisVerification>,
    /// Second-order checks.
    pub second_order: Vec<AxisVerification>,
}

impl AdjointVerification {
    /// Iterates over every check, first order then second order.
    pub fn checks(&self) -> impl Iterator<Item = &AxisVerification> {
        self.first_order.iter().chain(self.second_order.iter())
    }

    /// Returns the check named `name`, if present.
    pub fn check(&self, name: &str) -> Option<&AxisVerification> {
        self.checks().find(|check| check.name == name)
    }

    /// Returns whether every check passed.
    pub fn all_passed(&self) -> bool {
        self.checks().all(|check| check.passed)
    }

    /// Returns the number of failed checks.
    pub fn failed_count(&self) -> usize {
        self.checks().filter(|check| !check.passed).count()
    }

    /// Returns the largest scaled error over all checks.
    pub fn max_error(&self) -> f64 {
        self.checks().map(AxisVerification::error).fold(0.0, f64::max)
    }

    /// Returns a one-line summary.
    pub fn summary(&self) -> String {
        let status = if self.all_passed() { "PASS" } else { "FAIL" };
        format!(
            "{} - value: {:.6}, checks: {}, failed: {}, max error: {:.3e}",
            status,
            self.value,
            self.checks().count(),
            self.failed_count(),
            self.max_error(),
        )
    }
}

#[inline]
fn scaled_error(analytic: f64, finite_difference: f64) -> f64 {
    (analytic - finite_difference).abs() / finite_difference.abs().max(1.0)
}

/// Bumpable input coordinate.
#[derive(Debug, Clone, Copy)]
enum Coordinate {
    Forward,
    Volatility,
    Strike,
    Expiry,
}

impl From<DerivativeAxis> for Coordinate {
    fn from(axis: DerivativeAxis) -> Self {
        match axis {
            DerivativeAxis::Forward => Coordinate::Forward,
            DerivativeAxis::Volatility => Coordinate::Volatility,
            DerivativeAxis::Strike => Coordinate::Strike,
        }
    }
}

/// Raw inputs shared by both models.
#[derive(Debug, Clone, Copy)]
struct Point {
    forward: f64,
    volatility: f64,
    strike: f64,
    expiry: f64,
}

impl Point {
    fn get(&self, coordinate: Coordinate) -> f64 {
        match coordinate {
            Coordinate::Forward => self.forward,
            Coordinate::Volatility => self.volatility,
            Coordinate::Strike => self.strike,
            Coordinate::Expiry => self.expiry,
        }
    }

    fn with(mut self, coordinate: Coordinate, value: f64) -> Self {
        match coordinate {
            Coordinate::Forward => self.forward = value,
            Coordinate::Volatility => self.volatility = value,
            Coordinate::Strike => self.strike = value,
            Coordinate::Expiry => self.expiry = value,
        }
        self
    }

    fn option(&self, option_type: OptionType) -> Result<OptionSpec> {
        OptionSpec::new(self.strike, self.expiry, option_type)
    }
}

fn step(config: &VerificationConfig, coordinate: Coordinate) -> f64 {
    match coordinate {
        Coordinate::Forward => config.forward_step,
        Coordinate::Volatility => config.volatility_step,
        Coordinate::Strike => config.strike_step,
        Coordinate::Expiry => config.expiry_step,
    }
}

/// Derivative of `f` along `coordinate` at `point`.
///
/// Central when the lower bump stays in the domain, forward one-sided
/// otherwise. Only the Black forward is bounded away from zero.
fn derivative_along<F>(
    f: F,
    point: Point,
    coordinate: Coordinate,
    config: &VerificationConfig,
    positive_forward: bool,
) -> Result<f64>
where
    F: Fn(Point) -> Result<f64>,
{
    let h = step(config, coordinate);
    let x = point.get(coordinate);
    let lower = x - h;
    let central = match coordinate {
        Coordinate::Forward => !positive_forward || lower > 0.0,
        _ => lower >= 0.0,
    };

    let along = |value: f64| f(point.with(coordinate, value));
    if central {
        central_first_order(along, x, h)
    } else {
        forward_one_sided(along, x, h)
    }
}

/// Verifies the Black price, gradient, theta and Hessian against finite
/// differences.
///
/// # Errors
/// Returns [`VerificationError::Config`] if `config` fails validation.
///
/// # Examples
/// ```
/// use formula_core::types::{BlackMarketData, OptionSpec};
/// use formula_models::verify::{verify_black_adjoint, VerificationConfig};
///
/// let option = OptionSpec::call(94.0, 4.5).unwrap();
/// let data = BlackMarketData::new(104.0, 0.9, 0.5).unwrap();
///
/// let report = verify_black_adjoint(&option, &data, &VerificationConfig::default()).unwrap();
/// assert!(report.all_passed(), "{}", report.summary());
/// ```
pub fn verify_black_adjoint(
    option: &OptionSpec,
    data: &BlackMarketData,
    config: &VerificationConfig,
) -> std::result::Result<AdjointVerification, VerificationError> {
    config.validate()?;

    let option_type = option.option_type();
    let numeraire = data.numeraire();
    let point = Point {
        forward: data.forward(),
        volatility: data.volatility(),
        strike: option.strike(),
        expiry: option.time_to_expiry(),
    };
    let market = |p: Point| BlackMarketData::new(p.forward, numeraire, p.volatility);
    let price = |p: Point| -> Result<f64> { Ok(BlackFormula::price(&p.option(option_type)?, &market(p)?)) };

    let analytic = BlackFormula::price_adjoint2(option, data);
    let first_tolerance = config.first_order_tolerance;
    let second_tolerance = config.second_order_tolerance;

    let mut first_order = Vec::with_capacity(DerivativeAxis::ALL.len() + 1);
    for axis in DerivativeAxis::ALL {
        let fd = derivative_along(&price, point, axis.into(), config, true)?;
        first_order.push(AxisVerification::new(
            axis.name(),
            analytic.derivative(axis),
            fd,
            first_tolerance,
        ));
    }
    let fd_theta = -derivative_along(&price, point, Coordinate::Expiry, config, true)?;
    first_order.push(AxisVerification::new(
        "theta",
        BlackFormula::theta(option, data),
        fd_theta,
        first_tolerance,
    ));

    let mut second_order = Vec::with_capacity(HESSIAN_ENTRIES.len());
    for (a, b, name) in HESSIAN_ENTRIES {
        let gradient_entry = |p: Point| -> Result<f64> {
            let adjoint = BlackFormula::price_adjoint(&p.option(option_type)?, &market(p)?);
            Ok(adjoint.derivative(b))
        };
        let fd = derivative_along(&gradient_entry, point, a.into(), config, true)?;
        second_order.push(AxisVerification::new(
            name,
            analytic.second_derivative(a, b),
            fd,
            second_tolerance,
        ));
    }

    Ok(AdjointVerification {
        value: analytic.value(),
        first_order,
        second_order,
    })
}

/// Verifies the Bachelier price adjoint, theta and gamma against finite
/// differences.
///
/// # Errors
/// Returns [`VerificationError::Config`] if `config` fails validation.
pub fn verify_bachelier_adjoint(
    option: &OptionSpec,
    data: &NormalMarketData,
    config: &VerificationConfig,
) -> std::result::Result<AdjointVerification, VerificationError> {
    config.validate()?;

    let option_type = option.option_type();
    let numeraire = data.numeraire();
    let point = Point {
        forward: data.forward(),
        volatility: data.volatility(),
        strike: option.strike(),
        expiry: option.time_to_expiry(),
    };
    let price = |p: Point| -> Result<f64> {
        let market = NormalMarketData::new(p.forward, numeraire, p.volatility)?;
        Ok(BachelierFormula::price(&p.option(option_type)?, &market))
    };

    let analytic = BachelierFormula::price_adjoint(option, data);
    let first_tolerance = config.first_order_tolerance;

    let mut first_order = Vec::with_capacity(DerivativeAxis::ALL.len() + 1);
    for axis in DerivativeAxis::ALL {
        let fd = derivative_along(&price, point, axis.into(), config, false)?;
        first_order.push(AxisVerification::new(
            axis.name(),
            analytic.derivative(axis),
            fd,
            first_tolerance,
        ));
    }
    let fd_theta = -derivative_along(&price, point, Coordinate::Expiry, config, false)?;
    first_order.push(AxisVerification::new(
        "theta",
        BachelierFormula::theta(option, data),
        fd_theta,
        first_tolerance,
    ));

    let fd_gamma = central_second_order(
        |forward| price(point.with(Coordinate::Forward, forward)),
        point.forward,
        config.forward_step,
    )?;
    let second_order = vec![AxisVerification::new(
        "forward-forward",
        BachelierFormula::gamma(option, data),
        fd_gamma,
        config.second_order_tolerance,
    )];

    Ok(AdjointVerification {
        value: analytic.value(),
        first_order,
        second_order,
    })
}
