//! Option, market-data and result value types.
//!
//! This module provides:
//! - `option`: Option type (call/put) and the immutable option descriptor
//! - `market_data`: Black (lognormal) and Normal (additive) market data
//! - `derivatives`: First- and second-order derivative carriers
//! - `datum`: Flat per-option pricing record for batch callers
//! - `error`: Structured error type for argument validation
//!
//! # Re-exports
//!
//! For convenience, all value types are re-exported at this module level.

pub mod datum;
pub mod derivatives;
pub mod error;
pub mod market_data;
pub mod option;

mod validate;

pub use datum::SimpleOptionDatum;
pub use derivatives::{DerivativeAxis, DerivativeResult, SecondOrderResult, AXIS_COUNT};
pub use error::{FormulaError, Result};
pub use market_data::{BlackMarketData, NormalMarketData};
pub use option::{OptionSpec, OptionType};
