//! # formula_core: Foundation Types for Closed-Form Option Formulas
//!
//! ## Layer 1 (Foundation) Role
//!
//! formula_core is the bottom layer of the workspace, providing:
//! - Option descriptors: `OptionType`, `OptionSpec` (`types::option`)
//! - Market data: `BlackMarketData`, `NormalMarketData` (`types::market_data`)
//! - Derivative carriers: `DerivativeResult`, `SecondOrderResult` (`types::derivatives`)
//! - Flat pricing records: `SimpleOptionDatum` (`types::datum`)
//! - Error types: `FormulaError` (`types::error`)
//! - The `PriceFunction` abstraction (`traits`)
//! - Standard normal CDF/PDF (`math::distributions`)
//!
//! ## Validation at Construction
//!
//! Every value type validates its fields in `new`. Once a value exists it is
//! immutable and inside the documented domain, so the formula layer never
//! has to re-check its inputs and never returns an error.
//!
//! ## Usage Examples
//!
//! ```rust
//! use formula_core::types::{BlackMarketData, OptionSpec, OptionType};
//!
//! let option = OptionSpec::new(94.0, 4.5, OptionType::Call).unwrap();
//! let data = BlackMarketData::new(104.0, 0.9, 0.5).unwrap();
//!
//! assert_eq!(option.strike(), 94.0);
//! assert_eq!(data.sigma_root_t(option.time_to_expiry()), 0.5 * 4.5_f64.sqrt());
//!
//! // Negative strikes are rejected before any pricing can happen
//! assert!(OptionSpec::new(-1.0, 1.0, OptionType::Put).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for all value types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
