//! Finite-difference verification of the analytic engines.
//!
//! This module provides:
//! - `config`: Bump sizes and tolerances (`VerificationConfig`), TOML loadable
//! - `error`: `ConfigError` and `VerificationError`
//! - `finite_difference`: Central, one-sided and second-difference stencils
//! - `oracle`: Per-sensitivity comparison reports for both models
//!
//! The oracle is a test and diagnostics aid. Production prices and
//! sensitivities always come from [`crate::analytical`].
//!
//! # Usage
//!
//! ```rust
//! use formula_core::types::{NormalMarketData, OptionSpec};
//! use formula_models::verify::{verify_bachelier_adjoint, VerificationConfig};
//!
//! let config = VerificationConfig::from_toml_str("volatility_step = 1e-4").unwrap();
//! let option = OptionSpec::put(124.0, 4.5).unwrap();
//! let data = NormalMarketData::new(104.0, 0.9, 25.0).unwrap();
//!
//! let report = verify_bachelier_adjoint(&option, &data, &config).unwrap();
//! assert!(report.all_passed(), "{}", report.summary());
//! ```

pub mod config;
pub mod error;
pub mod finite_difference;
pub mod oracle;

pub use config::VerificationConfig;
pub use error::{ConfigError, VerificationError};
pub use finite_difference::{central_first_order, central_second_order, forward_one_sided};
pub use oracle::{
    verify_bachelier_adjoint, verify_black_adjoint, AdjointVerification, AxisVerification,
};
