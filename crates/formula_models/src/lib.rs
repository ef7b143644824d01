//! # formula_models: Closed-Form Option Formulas with Exact Derivatives
//!
//! ## Layer 2 (Formulas) Role
//!
//! formula_models builds on formula_core and provides:
//! - Black-76 price, gradient and Hessian (`analytical::black`)
//! - Bachelier price, gradient and Greeks (`analytical::bachelier`)
//! - Parallel pricing of flat option records (`batch`)
//! - A finite-difference oracle for the analytic derivatives (`verify`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use formula_core::types::{BlackMarketData, DerivativeAxis, OptionSpec};
//! use formula_models::analytical::BlackFormula;
//!
//! let option = OptionSpec::call(94.0, 4.5).unwrap();
//! let data = BlackMarketData::new(104.0, 0.9, 0.5).unwrap();
//!
//! let result = BlackFormula::price_adjoint2(&option, &data);
//! assert!((result.value() - 40.655_337_368_541_22).abs() < 1e-10);
//!
//! // Gamma is symmetric in the Hessian and shared by calls and puts
//! let gamma = result.second_derivative(DerivativeAxis::Forward, DerivativeAxis::Forward);
//! assert_eq!(gamma, BlackFormula::gamma(&option.with_option_type(option.option_type().flip()), &data));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for formula_core value types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod batch;
pub mod verify;
