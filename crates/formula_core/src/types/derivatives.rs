//! Derivative result carriers.
//!
//! Both carriers use the fixed axis order of [`DerivativeAxis`]:
//! index 0 = ∂/∂forward, 1 = ∂/∂volatility, 2 = ∂/∂strike.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::{FormulaError, Result};

/// Number of differentiation axes.
pub const AXIS_COUNT: usize = 3;

/// Differentiation axis, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DerivativeAxis {
    /// ∂/∂forward
    Forward = 0,
    /// ∂/∂volatility
    Volatility = 1,
    /// ∂/∂strike
    Strike = 2,
}

impl DerivativeAxis {
    /// All axes in slot order.
    pub const ALL: [DerivativeAxis; AXIS_COUNT] = [
        DerivativeAxis::Forward,
        DerivativeAxis::Volatility,
        DerivativeAxis::Strike,
    ];

    /// Returns the slot index of the axis.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns a short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            DerivativeAxis::Forward => "forward",
            DerivativeAxis::Volatility => "volatility",
            DerivativeAxis::Strike => "strike",
        }
    }
}

/// A value together with its first derivatives.
///
/// # Examples
/// ```
/// use formula_core::types::{DerivativeAxis, DerivativeResult};
///
/// let result = DerivativeResult::new(10.0, [0.6, 35.0, -0.5]);
/// assert_eq!(result.value(), 10.0);
/// assert_eq!(result.derivative(DerivativeAxis::Volatility), 35.0);
///
/// // Vectors must have one entry per axis
/// assert!(DerivativeResult::from_vec(10.0, vec![0.6, 35.0]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DerivativeResult {
    value: f64,
    derivatives: [f64; AXIS_COUNT],
}

impl DerivativeResult {
    /// Creates a result from a value and the derivatives in slot order.
    #[inline]
    pub fn new(value: f64, derivatives: [f64; AXIS_COUNT]) -> Self {
        Self { value, derivatives }
    }

    /// Creates a result from a derivative vector.
    ///
    /// # Errors
    /// `FormulaError::LengthMismatch` unless the vector has exactly
    /// [`AXIS_COUNT`] entries.
    pub fn from_vec(value: f64, derivatives: Vec<f64>) -> Result<Self> {
        let actual = derivatives.len();
        let derivatives: [f64; AXIS_COUNT] =
            derivatives
                .try_into()
                .map_err(|_| FormulaError::LengthMismatch {
                    expected: AXIS_COUNT,
                    actual,
                })?;
        Ok(Self::new(value, derivatives))
    }

    /// Returns the value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the derivative along `axis`.
    #[inline]
    pub fn derivative(&self, axis: DerivativeAxis) -> f64 {
        self.derivatives[axis.index()]
    }

    /// Returns all derivatives in slot order.
    #[inline]
    pub fn derivatives(&self) -> &[f64; AXIS_COUNT] {
        &self.derivatives
    }
}

/// A value with its first derivatives and symmetric Hessian.
///
/// The Hessian is stored as a full matrix but can only be built from its
/// upper triangle, so `hessian[i][j] == hessian[j][i]` holds exactly.
///
/// # Examples
/// ```
/// use formula_core::types::{DerivativeAxis, SecondOrderResult};
///
/// let result = SecondOrderResult::from_upper_triangle(
///     10.0,
///     [0.6, 35.0, -0.5],
///     [0.01, -0.2, -0.01, 12.0, 0.25, 0.012],
/// );
/// assert_eq!(
///     result.second_derivative(DerivativeAxis::Strike, DerivativeAxis::Volatility),
///     result.second_derivative(DerivativeAxis::Volatility, DerivativeAxis::Strike),
/// );
/// assert_eq!(result.first_order().derivative(DerivativeAxis::Forward), 0.6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SecondOrderResult {
    value: f64,
    derivatives: [f64; AXIS_COUNT],
    hessian: [[f64; AXIS_COUNT]; AXIS_COUNT],
}

impl SecondOrderResult {
    /// Creates a result from the upper triangle of the Hessian.
    ///
    /// `upper` is `[ff, fv, fk, vv, vk, kk]` where `f`, `v`, `k` are the
    /// forward, volatility and strike axes.
    pub fn from_upper_triangle(
        value: f64,
        derivatives: [f64; AXIS_COUNT],
        upper: [f64; 6],
    ) -> Self {
        let [ff, fv, fk, vv, vk, kk] = upper;
        Self {
            value,
            derivatives,
            hessian: [[ff, fv, fk], [fv, vv, vk], [fk, vk, kk]],
        }
    }

    /// Returns the value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the first derivative along `axis`.
    #[inline]
    pub fn derivative(&self, axis: DerivativeAxis) -> f64 {
        self.derivatives[axis.index()]
    }

    /// Returns all first derivatives in slot order.
    #[inline]
    pub fn derivatives(&self) -> &[f64; AXIS_COUNT] {
        &self.derivatives
    }

    /// Returns ∂²/∂a∂b.
    #[inline]
    pub fn second_derivative(&self, a: DerivativeAxis, b: DerivativeAxis) -> f64 {
        self.hessian[a.index()][b.index()]
    }

    /// Returns the full Hessian.
    #[inline]
    pub fn hessian(&self) -> &[[f64; AXIS_COUNT]; AXIS_COUNT] {
        &self.hessian
    }

    /// Drops the Hessian.
    #[inline]
    pub fn first_order(&self) -> DerivativeResult {
        DerivativeResult::new(self.value, self.derivatives)
    }
}
