//! Kestrel Configuration Layer
//!
//! Serializable settings for the valuation engines: the implied-volatility
//! and yield-to-maturity solvers, plus default ranges for chart sampling.
//!
//! # Features
//!
//! - **Defaults**: Every field defaults to the engine's named constant
//! - **Validation**: [`Validate`] reports every violated rule at once
//! - **Files**: JSON or TOML, chosen by file extension
//!
//! # Example
//!
//! ```rust
//! use kestrel_config::{EngineConfig, Validate};
//!
//! let config = EngineConfig::from_json_str(r#"{"implied_vol": {"max_iterations": 50}}"#).unwrap();
//! assert_eq!(config.implied_vol.max_iterations, 50);
//! assert!(config.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod engine;
pub mod error;

pub use engine::{EngineConfig, SamplingConfig};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
