//! Field validation shared by the value type constructors.

use super::error::{FormulaError, Result};

pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::InvalidArgument {
            name,
            value,
            reason: "must be finite",
        })
    }
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(FormulaError::InvalidArgument {
            name,
            value,
            reason: "must be non-negative",
        })
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64> {
    let value = finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(FormulaError::InvalidArgument {
            name,
            value,
            reason: "must be strictly positive",
        })
    }
}
