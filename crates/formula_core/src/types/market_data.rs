//! Market data for the Black and Normal formulas.
//!
//! Both containers hold a forward, a numeraire (discount factor applied to
//! the terminal payoff) and a volatility. They differ in the volatility
//! convention and in the admissible forward:
//!
//! | Type               | Volatility             | Forward      |
//! |--------------------|------------------------|--------------|
//! | `BlackMarketData`  | lognormal (relative)   | `> 0`        |
//! | `NormalMarketData` | additive (basis point) | any finite   |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::validate;

/// Market data for the Black-76 formula.
///
/// # Examples
/// ```
/// use formula_core::types::BlackMarketData;
///
/// let data = BlackMarketData::new(104.0, 0.9, 0.5).unwrap();
/// assert_eq!(data.forward(), 104.0);
/// assert_eq!(data.numeraire(), 0.9);
/// assert_eq!(data.volatility(), 0.5);
///
/// // The lognormal model needs a positive forward
/// assert!(BlackMarketData::new(0.0, 0.9, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MarketDataRaw"))]
pub struct BlackMarketData {
    forward: f64,
    numeraire: f64,
    volatility: f64,
}

/// Market data for the Bachelier (Normal) formula.
///
/// # Examples
/// ```
/// use formula_core::types::NormalMarketData;
///
/// // Negative forwards are admissible under additive dynamics
/// let data = NormalMarketData::new(-0.0025, 0.98, 0.0075).unwrap();
/// assert_eq!(data.forward(), -0.0025);
///
/// assert!(NormalMarketData::new(0.01, 0.98, -0.001).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MarketDataRaw"))]
pub struct NormalMarketData {
    forward: f64,
    numeraire: f64,
    volatility: f64,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct MarketDataRaw {
    forward: f64,
    numeraire: f64,
    volatility: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<MarketDataRaw> for BlackMarketData {
    type Error = super::error::FormulaError;

    fn try_from(raw: MarketDataRaw) -> Result<Self> {
        Self::new(raw.forward, raw.numeraire, raw.volatility)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<MarketDataRaw> for NormalMarketData {
    type Error = super::error::FormulaError;

    fn try_from(raw: MarketDataRaw) -> Result<Self> {
        Self::new(raw.forward, raw.numeraire, raw.volatility)
    }
}

impl BlackMarketData {
    /// Creates Black market data.
    ///
    /// # Arguments
    /// * `forward` - Forward price (finite, `> 0`)
    /// * `numeraire` - Discount factor (finite, `> 0`)
    /// * `volatility` - Lognormal volatility (finite, `>= 0`)
    ///
    /// # Errors
    /// `FormulaError::InvalidArgument` naming the first offending field.
    pub fn new(forward: f64, numeraire: f64, volatility: f64) -> Result<Self> {
        Ok(Self {
            forward: validate::positive("forward", forward)?,
            numeraire: validate::positive("numeraire", numeraire)?,
            volatility: validate::non_negative("volatility", volatility)?,
        })
    }

    /// Returns the forward.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Returns the numeraire.
    #[inline]
    pub fn numeraire(&self) -> f64 {
        self.numeraire
    }

    /// Returns the lognormal volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns `volatility·√time_to_expiry`.
    #[inline]
    pub fn sigma_root_t(&self, time_to_expiry: f64) -> f64 {
        self.volatility * time_to_expiry.sqrt()
    }

    /// Returns a copy with a different forward.
    pub fn with_forward(&self, forward: f64) -> Result<Self> {
        Self::new(forward, self.numeraire, self.volatility)
    }

    /// Returns a copy with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self> {
        Self::new(self.forward, self.numeraire, volatility)
    }
}

impl NormalMarketData {
    /// Creates Normal market data.
    ///
    /// # Arguments
    /// * `forward` - Forward (finite, any sign)
    /// * `numeraire` - Discount factor (finite, `> 0`)
    /// * `volatility` - Additive volatility in forward units (finite, `>= 0`)
    ///
    /// # Errors
    /// `FormulaError::InvalidArgument` naming the first offending field.
    pub fn new(forward: f64, numeraire: f64, volatility: f64) -> Result<Self> {
        Ok(Self {
            forward: validate::finite("forward", forward)?,
            numeraire: validate::positive("numeraire", numeraire)?,
            volatility: validate::non_negative("volatility", volatility)?,
        })
    }

    /// Returns the forward.
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Returns the numeraire.
    #[inline]
    pub fn numeraire(&self) -> f64 {
        self.numeraire
    }

    /// Returns the additive volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns `volatility·√time_to_expiry`.
    #[inline]
    pub fn sigma_root_t(&self, time_to_expiry: f64) -> f64 {
        self.volatility * time_to_expiry.sqrt()
    }

    /// Returns a copy with a different forward.
    pub fn with_forward(&self, forward: f64) -> Result<Self> {
        Self::new(forward, self.numeraire, self.volatility)
    }

    /// Returns a copy with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self> {
        Self::new(self.forward, self.numeraire, volatility)
    }
}
