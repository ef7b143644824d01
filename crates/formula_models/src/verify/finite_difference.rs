//! Finite-difference stencils over fallible scalar functions.
//!
//! The function being differentiated usually rebuilds validated inputs at
//! each bumped point, so it returns a [`Result`] and the first rejected
//! bump is propagated.

use formula_core::types::Result;

/// Central difference `(f(x+h) − f(x−h)) / 2h`.
///
/// # Examples
/// ```
/// use formula_models::verify::central_first_order;
///
/// let slope = central_first_order(|x| Ok(x * x * x), 2.0, 1e-4).unwrap();
/// assert!((slope - 12.0).abs() < 1e-7);
/// ```
pub fn central_first_order<F>(f: F, x: f64, h: f64) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    Ok((f(x + h)? - f(x - h)?) / (2.0 * h))
}

/// Second-order forward difference `(−3f(x) + 4f(x+h) − f(x+2h)) / 2h`.
///
/// Used where `x − h` lies outside the domain of `f`. The truncation error
/// is O(h²), matching [`central_first_order`].
///
/// # Examples
/// ```
/// use formula_models::verify::forward_one_sided;
///
/// let slope = forward_one_sided(|x| Ok(x * x), 0.0, 1e-3).unwrap();
/// assert!(slope.abs() < 1e-12);
/// ```
pub fn forward_one_sided<F>(f: F, x: f64, h: f64) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    Ok((-3.0 * f(x)? + 4.0 * f(x + h)? - f(x + 2.0 * h)?) / (2.0 * h))
}

/// Central second difference `(f(x+h) − 2f(x) + f(x−h)) / h²`.
pub fn central_second_order<F>(f: F, x: f64, h: f64) -> Result<f64>
where
    F: Fn(f64) -> Result<f64>,
{
    Ok((f(x + h)? - 2.0 * f(x)? + f(x - h)?) / (h * h))
}
