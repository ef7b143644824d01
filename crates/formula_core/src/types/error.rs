//! Error types for structured error handling.
//!
//! This module provides:
//! - `FormulaError`: Errors raised while constructing value types
//! - `Result<T>`: Convenience alias used across the workspace

use thiserror::Error;

/// Convenience type alias for results in this workspace.
pub type Result<T> = std::result::Result<T, FormulaError>;

/// Categorised construction errors.
///
/// Pricing itself is total once inputs exist; every variant here is raised
/// synchronously while building a value type, before any computation.
///
/// # Variants
/// - `InvalidArgument`: A field is non-finite or outside its domain
/// - `LengthMismatch`: A derivative vector does not have one slot per axis
///
/// # Examples
/// ```
/// use formula_core::types::FormulaError;
///
/// let err = FormulaError::InvalidArgument {
///     name: "numeraire",
///     value: 0.0,
///     reason: "must be strictly positive",
/// };
/// assert_eq!(
///     format!("{}", err),
///     "Invalid argument: numeraire = 0 (must be strictly positive)"
/// );
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum FormulaError {
    /// A field is non-finite or outside the domain of the value type.
    #[error("Invalid argument: {name} = {value} ({reason})")]
    InvalidArgument {
        /// Name of the offending field
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Constraint that was violated
        reason: &'static str,
    },

    /// A derivative vector has the wrong number of entries.
    #[error("Derivative length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Required number of entries
        expected: usize,
        /// Number of entries supplied
        actual: usize,
    },
}

impl FormulaError {
    /// Returns true for the invalid-argument kind.
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FormulaError::InvalidArgument { .. })
    }
}
