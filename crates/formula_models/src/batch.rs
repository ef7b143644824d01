//! Rayon-based batch pricing of flat option records.
//!
//! Each [`SimpleOptionDatum`] is converted into an option and market data
//! pair with a shared volatility and priced independently. Results keep the
//! input order. A record that fails conversion aborts the whole batch.

use formula_core::types::{Result, SimpleOptionDatum};
use rayon::prelude::*;
use tracing::debug;

use crate::analytical::{BachelierFormula, BlackFormula};

/// Prices every record with Black-76 at lognormal volatility `volatility`.
///
/// # Errors
/// `FormulaError::InvalidArgument` if `volatility` is invalid or any record
/// has a non-positive forward.
///
/// # Examples
/// ```
/// use formula_core::types::{OptionType, SimpleOptionDatum};
/// use formula_models::batch::price_black_batch;
///
/// let data = [
///     SimpleOptionDatum::new(104.0, 94.0, 4.5, 0.9, OptionType::Call).unwrap(),
///     SimpleOptionDatum::new(104.0, 124.0, 4.5, 0.9, OptionType::Put).unwrap(),
/// ];
/// let prices = price_black_batch(&data, 0.5).unwrap();
/// assert_eq!(prices.len(), 2);
/// assert!(prices[1] > prices[0]);
/// ```
pub fn price_black_batch(data: &[SimpleOptionDatum], volatility: f64) -> Result<Vec<f64>> {
    debug!(size = data.len(), volatility, "black batch");
    data.par_iter()
        .map(|datum| {
            let market = datum.to_black_data(volatility)?;
            Ok(BlackFormula::price(&datum.to_option_spec(), &market))
        })
        .collect()
}

/// Prices every record with Bachelier at normal volatility `volatility`.
///
/// # Errors
/// `FormulaError::InvalidArgument` if `volatility` is invalid.
pub fn price_normal_batch(data: &[SimpleOptionDatum], volatility: f64) -> Result<Vec<f64>> {
    debug!(size = data.len(), volatility, "normal batch");
    data.par_iter()
        .map(|datum| {
            let market = datum.to_normal_data(volatility)?;
            Ok(BachelierFormula::price(&datum.to_option_spec(), &market))
        })
        .collect()
}
