//! Finite-difference verification settings.
//!
//! Settings can be built in code through the fluent `with_*` setters or
//! loaded from a TOML document. Omitted fields keep their defaults.
//!
//! ```toml
//! forward_step = 0.01
//! volatility_step = 1e-4
//! first_order_tolerance = 1e-6
//! ```

use serde::Deserialize;

use super::error::ConfigError;

/// Bump sizes and tolerances for the finite-difference oracle.
///
/// A finite-difference value `fd` matches an analytic value `a` when
/// `|a - fd| <= tolerance * max(1, |fd|)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Absolute bump applied to the forward.
    pub forward_step: f64,
    /// Absolute bump applied to the volatility.
    pub volatility_step: f64,
    /// Absolute bump applied to the strike.
    pub strike_step: f64,
    /// Absolute bump applied to the time to expiry.
    pub expiry_step: f64,
    /// Tolerance for first derivatives and theta.
    pub first_order_tolerance: f64,
    /// Tolerance for second derivatives.
    pub second_order_tolerance: f64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            forward_step: 1e-2,
            volatility_step: 1e-4,
            strike_step: 1e-2,
            expiry_step: 1e-5,
            first_order_tolerance: 1e-6,
            second_order_tolerance: 1e-6,
        }
    }
}

impl VerificationConfig {
    /// Creates a configuration with the default steps and tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: VerificationConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the forward bump.
    #[inline]
    pub fn with_forward_step(mut self, step: f64) -> Self {
        self.forward_step = step;
        self
    }

    /// Sets the volatility bump.
    #[inline]
    pub fn with_volatility_step(mut self, step: f64) -> Self {
        self.volatility_step = step;
        self
    }

    /// Sets the strike bump.
    #[inline]
    pub fn with_strike_step(mut self, step: f64) -> Self {
        self.strike_step = step;
        self
    }

    /// Sets the expiry bump.
    #[inline]
    pub fn with_expiry_step(mut self, step: f64) -> Self {
        self.expiry_step = step;
        self
    }

    /// Sets the first-order tolerance.
    #[inline]
    pub fn with_first_order_tolerance(mut self, tolerance: f64) -> Self {
        self.first_order_tolerance = tolerance;
        self
    }

    /// Sets the second-order tolerance.
    #[inline]
    pub fn with_second_order_tolerance(mut self, tolerance: f64) -> Self {
        self.second_order_tolerance = tolerance;
        self
    }

    /// Checks that every step and tolerance is finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let steps = [
            ("forward_step", self.forward_step),
            ("volatility_step", self.volatility_step),
            ("strike_step", self.strike_step),
            ("expiry_step", self.expiry_step),
        ];
        for (name, value) in steps {
            if !is_positive_finite(value) {
                return Err(ConfigError::InvalidStep { name, value });
            }
        }

        let tolerances = [
            ("first_order_tolerance", self.first_order_tolerance),
            ("second_order_tolerance", self.second_order_tolerance),
        ];
        for (name, value) in tolerances {
            if !is_positive_finite(value) {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }

        Ok(())
    }
}

#[inline]
fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
