//! # Kestrel Math
//!
//! Numeric primitives shared by the Kestrel valuation engines.
//!
//! This crate provides:
//!
//! - **Distributions**: Standard normal CDF and PDF
//! - **Grids**: Evenly spaced sampling grids for chart data
//! - **Solvers**: Root-finding algorithms (Bisection, Newton-Raphson, bounded Newton-Raphson)
//! - **Interpolation**: Linear interpolation with selectable extrapolation
//!
//! Both the option and the bond engine route their inversions through
//! [`solvers`], so the two solvers share one convergence contract: a root is
//! returned only when the residual is within tolerance, and every failure is
//! a distinct [`MathError`] variant.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod distributions;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{normal_cdf, normal_pdf};
    pub use crate::error::{MathError, MathResult};
    pub use crate::grid::SampleGrid;
    pub use crate::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
    pub use crate::solvers::{
        bisection, newton_raphson, newton_raphson_bounded, IterateBounds, SolverConfig,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
