//! Pricing abstractions shared by the formula engines.
//!
//! This module defines:
//! - `PriceFunction`: A reusable price function bound to one option

pub mod price_function;

pub use price_function::PriceFunction;
