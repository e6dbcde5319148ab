//! # Kestrel Bonds
//!
//! Fixed-income analytics for plain fixed-coupon bonds.
//!
//! This crate provides:
//!
//! - **Cash Flows**: Coupon schedule with redemption on the final period
//! - **Pricing**: Price from yield, current yield, yield-to-maturity by bisection
//! - **Risk**: Macaulay and modified duration, convexity, DV01
//! - **Analysis**: One-pass bond summaries and duration/convexity shock estimates
//! - **Curves**: Linear spot curve with flat extrapolation and implied forwards
//!
//! ## Example
//!
//! ```rust
//! use kestrel_bonds::prelude::*;
//!
//! let bond = BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap();
//!
//! let price = price_from_yield(&bond, 0.06).unwrap();
//! let ytm = yield_to_maturity(&bond, price).unwrap();
//! assert!((ytm.yield_value - 0.06).abs() < 1e-6);
//!
//! let summary = analyze(&bond, 0.06).unwrap();
//! println!("Modified duration: {:.3}", summary.modified_duration);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]

pub mod analysis;
pub mod cashflows;
pub mod curve;
pub mod error;
pub mod pricing;
pub mod risk;
pub mod sampling;
pub mod types;
pub mod yield_solver;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analysis::{analyze, estimate_price_change, BondSummary, PriceChangeEstimate};
    pub use crate::cashflows::cash_flow_schedule;
    pub use crate::curve::{ForwardRate, YieldCurve};
    pub use crate::error::{BondError, BondResult};
    pub use crate::pricing::{current_yield, price_from_yield};
    pub use crate::risk::{convexity, dv01, macaulay_duration, modified_duration, BASIS_POINT};
    pub use crate::sampling::{price_yield_profile, PriceYieldPoint};
    pub use crate::types::{BondParams, CashFlow, Frequency};
    pub use crate::yield_solver::{
        yield_to_maturity, YieldResult, YieldSolver, YieldSolverConfig,
    };
    pub use kestrel_math::grid::SampleGrid;
}

pub use analysis::{analyze, estimate_price_change, BondSummary, PriceChangeEstimate};
pub use cashflows::cash_flow_schedule;
pub use curve::{ForwardRate, YieldCurve};
pub use error::{BondError, BondResult};
pub use pricing::{current_yield, price_from_yield};
pub use risk::{convexity, dv01, macaulay_duration, modified_duration};
pub use sampling::{price_yield_profile, PriceYieldPoint};
pub use types::{BondParams, CashFlow, Frequency};
pub use yield_solver::{yield_to_maturity, YieldResult, YieldSolver, YieldSolverConfig};
