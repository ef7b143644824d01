//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form prices and exact derivatives:
//! - Black-76 model for lognormal forward dynamics, with Hessian
//! - Bachelier model for normal (additive) forward dynamics, with Greeks
//!
//! ## Design Principles
//!
//! - **Pure functions**: engines are unit structs; every operation depends
//!   only on its option and market data arguments
//! - **Exact derivatives**: sensitivities come from differentiating the
//!   closed form, never from bump-and-revalue
//! - **Explicit limits**: `σ√T` below [`SIGMA_ROOT_T_THRESHOLD`] routes to
//!   intrinsic-value formulas instead of the smooth closed form

pub mod bachelier;
pub mod black;

// Re-export main types at module level
pub use bachelier::{bachelier_price, BachelierFormula, NormalPriceFunction};
pub use black::{BlackFormula, BlackPriceFunction};

/// Below this value of `σ√T` both engines use their intrinsic-value limits.
pub const SIGMA_ROOT_T_THRESHOLD: f64 = 1e-16;
