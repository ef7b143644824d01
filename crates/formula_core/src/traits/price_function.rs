//! Price function trait.

/// A price function bound to a single option, evaluated over market data.
///
/// # Type Parameters
/// * `D` - Market data type consumed by the function
///
/// # Design Philosophy
///
/// Implementors capture only immutable option data, so a price function is
/// `Copy`, can be evaluated any number of times, and may be shared across
/// threads without synchronisation:
///
/// ```
/// use formula_core::traits::PriceFunction;
///
/// #[derive(Clone, Copy)]
/// struct Forward;
///
/// impl PriceFunction<f64> for Forward {
///     fn evaluate(&self, data: &f64) -> f64 {
///         *data
///     }
/// }
///
/// let f = Forward;
/// assert_eq!(f.evaluate(&3.0), 3.0);
/// assert_eq!(f.evaluate(&3.0), 3.0);
/// ```
pub trait PriceFunction<D>: Copy + Send + Sync {
    /// Prices the bound option.
    ///
    /// # Invariants
    /// - The method must be pure (no side effects, deterministic)
    fn evaluate(&self, data: &D) -> f64;
}
