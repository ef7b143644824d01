//! Flat per-option pricing record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::market_data::{BlackMarketData, NormalMarketData};
use super::option::{OptionSpec, OptionType};
use super::validate;

/// One option's pricing inputs carried as a unit.
///
/// Holds everything except the volatility, which the caller supplies per
/// model when converting to market data.
///
/// # Examples
/// ```
/// use formula_core::types::{OptionType, SimpleOptionDatum};
///
/// let datum = SimpleOptionDatum::new(104.0, 94.0, 4.5, 0.9, OptionType::Call).unwrap();
/// let option = datum.to_option_spec();
/// let data = datum.to_black_data(0.5).unwrap();
///
/// assert_eq!(option.strike(), 94.0);
/// assert_eq!(data.numeraire(), 0.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SimpleOptionDatumRaw"))]
pub struct SimpleOptionDatum {
    forward: f64,
    strike: f64,
    time_to_expiry: f64,
    discount_factor: f64,
    put_call: OptionType,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct SimpleOptionDatumRaw {
    forward: f64,
    strike: f64,
    time_to_expiry: f64,
    discount_factor: f64,
    put_call: OptionType,
}

#[cfg(feature = "serde")]
impl TryFrom<SimpleOptionDatumRaw> for SimpleOptionDatum {
    type Error = super::error::FormulaError;

    fn try_from(raw: SimpleOptionDatumRaw) -> Result<Self> {
        Self::new(
            raw.forward,
            raw.strike,
            raw.time_to_expiry,
            raw.discount_factor,
            raw.put_call,
        )
    }
}

impl SimpleOptionDatum {
    /// Creates a pricing record.
    ///
    /// # Errors
    /// `FormulaError::InvalidArgument` if `forward` is non-finite, `strike`
    /// or `time_to_expiry` is negative, or `discount_factor` is not positive.
    pub fn new(
        forward: f64,
        strike: f64,
        time_to_expiry: f64,
        discount_factor: f64,
        put_call: OptionType,
    ) -> Result<Self> {
        Ok(Self {
            forward: validate::finite("forward", forward)?,
            strike: validate::non_negative("strike", strike)?,
            time_to_expiry: validate::non_negative("time_to_expiry", time_to_expiry)?,
            discount_factor: validate::positive("discount_factor", discount_factor)?,
            put_call,
        })
    }

    /// Returns the forward.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
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

    /// Returns the discount factor.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Returns the option type.
    #[inline]
    pub fn put_call(&self) -> OptionType {
        self.put_call
    }

    /// Builds the option descriptor.
    pub fn to_option_spec(&self) -> OptionSpec {
        // Fields were validated against the same domain in `new`.
        OptionSpec::from_validated(self.strike, self.time_to_expiry, self.put_call)
    }

    /// Builds Black market data with the given lognormal volatility.
    ///
    /// # Errors
    /// `FormulaError::InvalidArgument` if the forward is not positive or the
    /// volatility is invalid.
    pub fn to_black_data(&self, volatility: f64) -> Result<BlackMarketData> {
        BlackMarketData::new(self.forward, self.discount_factor, volatility)
    }

    /// Builds Normal market data with the given additive volatility.
    ///
    /// # Errors
    /// `FormulaError::InvalidArgument` if the volatility is invalid.
    pub fn to_normal_data(&self, volatility: f64) -> Result<NormalMarketData> {
        NormalMarketData::new(self.forward, self.discount_factor, volatility)
    }
}
