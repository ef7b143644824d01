//! Option type and option descriptor.
//!
//! This module provides:
//! - `OptionType`: Call or put, with the `±1` sign convention
//! - `OptionSpec`: Immutable strike, time to expiry and option type

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::validate;

/// European option type.
///
/// The sign convention `+1` for calls and `-1` for puts is shared by every
/// formula in the workspace.
///
/// # Examples
/// ```
/// use formula_core::types::OptionType;
///
/// assert_eq!(OptionType::Call.sign(), 1.0);
/// assert_eq!(OptionType::Put.sign(), -1.0);
/// assert_eq!(OptionType::from_is_call(false), OptionType::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Returns `+1.0` for a call and `-1.0` for a put.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Returns true for a call.
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Builds the option type from a call flag.
    #[inline]
    pub fn from_is_call(is_call: bool) -> Self {
        if is_call {
            OptionType::Call
        } else {
            OptionType::Put
        }
    }

    /// Returns the opposite option type.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            OptionType::Call => OptionType::Put,
            OptionType::Put => OptionType::Call,
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Immutable European option descriptor.
///
/// Holds only what the closed-form formulas need from the trade: strike,
/// time to expiry in years, and the option type. A strike of zero is a
/// valid edge handled by the formulas.
///
/// # Examples
/// ```
/// use formula_core::types::{OptionSpec, OptionType};
///
/// let option = OptionSpec::new(100.0, 1.0, OptionType::Put).unwrap();
/// assert_eq!(option.intrinsic(90.0), 10.0);
/// assert_eq!(option.intrinsic(110.0), 0.0);
///
/// // Zero strike is valid
/// assert!(OptionSpec::call(0.0, 1.0).is_ok());
///
/// // Negative expiry is not
/// assert!(OptionSpec::call(100.0, -0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "OptionSpecRaw"))]
pub struct OptionSpec {
    strike: f64,
    time_to_expiry: f64,
    option_type: OptionType,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct OptionSpecRaw {
    strike: f64,
    time_to_expiry: f64,
    option_type: OptionType,
}

#[cfg(feature = "serde")]
impl TryFrom<OptionSpecRaw> for OptionSpec {
    type Error = super::error::FormulaError;

    fn try_from(raw: OptionSpecRaw) -> Result<Self> {
        Self::new(raw.strike, raw.time_to_expiry, raw.option_type)
    }
}

impl OptionSpec {
    /// Creates a new option descriptor.
    ///
    /// # Arguments
    /// * `strike` - Strike (finite, `>= 0`)
    /// * `time_to_expiry` - Time to expiry in years (finite, `>= 0`)
    /// * `option_type` - Call or put
    ///
    /// # Errors
    /// `FormulaError::InvalidArgument` if either number is non-finite or negative.
    pub fn new(strike: f64, time_to_expiry: f64, option_type: OptionType) -> Result<Self> {
        Ok(Self {
            strike: validate::non_negative("strike", strike)?,
            time_to_expiry: validate::non_negative("time_to_expiry", time_to_expiry)?,
            option_type,
        })
    }

    /// Caller guarantees the fields already satisfy `new`'s checks.
    #[inline]
    pub(crate) fn from_validated(strike: f64, time_to_expiry: f64, option_type: OptionType) -> Self {
        Self {
            strike,
            time_to_expiry,
            option_type,
        }
    }

    /// Creates a call descriptor.
    pub fn call(strike: f64, time_to_expiry: f64) -> Result<Self> {
        Self::new(strike, time_to_expiry, OptionType::Call)
    }

    /// Creates a put descriptor.
    pub fn put(strike: f64, time_to_expiry: f64) -> Result<Self> {
        Self::new(strike, time_to_expiry, OptionType::Put)
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns true for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        self.option_type.is_call()
    }

    /// Returns the same option with the other option type.
    #[inline]
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..*self
        }
    }

    /// Undiscounted intrinsic value `max(sign·(forward − strike), 0)`.
    #[inline]
    pub fn intrinsic(&self, forward: f64) -> f64 {
        (self.option_type.sign() * (forward - self.strike)).max(0.0)
    }
}
