//! # Kestrel Options
//!
//! Black-Scholes-Merton valuation of European options.
//!
//! This crate provides:
//!
//! - **Pricing**: Closed-form call and put values, with intrinsic value at expiry
//! - **Greeks**: Analytic delta, gamma, vega, theta (per day) and rho
//! - **Implied volatility**: Bounded Newton-Raphson with explicit failure modes
//! - **Sampling**: Price and Greek series across underlying prices for charts
//! - **Batch**: Many contracts at once, optionally in parallel
//!
//! Every function is pure; nothing is cached between calls.
//!
//! ## Example
//!
//! ```rust
//! use kestrel_options::prelude::*;
//!
//! let params = OptionParams::new(100.0, 105.0, 0.25, 0.05, 0.2, OptionKind::Call).unwrap();
//! let result = black_scholes(&params);
//!
//! assert!((result.price - 2.478).abs() < 1e-3);
//! assert!(result.greeks.delta > 0.0 && result.greeks.delta < 1.0);
//!
//! let iv = implied_volatility(result.price, 100.0, 105.0, 0.25, 0.05, OptionKind::Call).unwrap();
//! assert!((iv.volatility - 0.2).abs() < 1e-4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]

pub mod batch;
pub mod error;
pub mod greeks;
pub mod implied_vol;
pub mod pricing;
pub mod sampling;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::price_batch;
    pub use crate::error::{OptionError, OptionResult};
    pub use crate::greeks::{greeks, DAYS_PER_YEAR};
    pub use crate::implied_vol::{
        implied_volatility, ImpliedVolConfig, ImpliedVolSolver, ImpliedVolatility,
    };
    pub use crate::pricing::{black_scholes, d1_d2, intrinsic_value, price};
    pub use crate::sampling::{greeks_vs_spot, price_vs_spot, GreeksPoint, PricePoint};
    pub use crate::types::{BlackScholesResult, Greeks, OptionKind, OptionParams};
    pub use kestrel_math::grid::SampleGrid;
}

pub use batch::price_batch;
pub use error::{OptionError, OptionResult};
pub use greeks::greeks;
pub use implied_vol::{implied_volatility, ImpliedVolConfig, ImpliedVolSolver, ImpliedVolatility};
pub use pricing::{black_scholes, d1_d2, intrinsic_value, price};
pub use sampling::{greeks_vs_spot, price_vs_spot, GreeksPoint, PricePoint};
pub use types::{BlackScholesResult, Greeks, OptionKind, OptionParams};
