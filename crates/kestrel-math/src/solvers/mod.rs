//! Root-finding algorithms.
//!
//! This module provides numerical solvers for finding roots of equations:
//!
//! - [`bisection`]: Simple and reliable bracketing method
//! - [`newton_raphson`]: Fast quadratic convergence when the derivative is available
//! - [`newton_raphson_bounded`]: Newton-Raphson whose iterates are kept inside a box
//!
//! # Outcomes
//!
//! Every solver returns a [`SolverResult`] only when `|f(root)|` is within
//! the configured tolerance. Failures are reported as distinct errors:
//!
//! | Failure | Error |
//! |---------|-------|
//! | No sign change across the bracket | [`MathError::InvalidBracket`] |
//! | Derivative below the floor | [`MathError::FlatDerivative`] |
//! | Iteration budget exhausted | [`MathError::ConvergenceFailed`] (carries the last iterate) |
//!
//! # Example: YTM Calculation
//!
//! ```rust
//! use kestrel_math::solvers::{bisection, SolverConfig};
//!
//! // Bond: 5% annual coupon, 5 years, price 95
//! let price_fn = |y: f64| {
//!     let mut pv = 0.0;
//!     for t in 1..=5 {
//!         pv += 5.0 / (1.0 + y).powi(t);
//!     }
//!     pv += 100.0 / (1.0 + y).powi(5);
//!     pv - 95.0
//! };
//!
//! let result = bisection(price_fn, 0.0001, 0.5, &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.05); // YTM > coupon rate for discount bond
//! ```
//!
//! [`MathError::InvalidBracket`]: crate::MathError::InvalidBracket
//! [`MathError::FlatDerivative`]: crate::MathError::FlatDerivative
//! [`MathError::ConvergenceFailed`]: crate::MathError::ConvergenceFailed

mod bisection;
mod newton;

pub use bisection::bisection;
pub use newton::{newton_raphson, newton_raphson_bounded, IterateBounds};

use serde::{Deserialize, Serialize};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default floor below which a derivative is treated as zero.
pub const DEFAULT_MIN_DERIVATIVE: f64 = 1e-15;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Tolerance on `|f(x)|` for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Derivatives with a smaller magnitude stop Newton iterations.
    pub min_derivative: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            min_derivative: DEFAULT_MIN_DERIVATIVE,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            min_derivative: DEFAULT_MIN_DERIVATIVE,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the derivative floor used by Newton-Raphson.
    #[must_use]
    pub fn with_min_derivative(mut self, min_derivative: f64) -> Self {
        self.min_derivative = min_derivative;
        self
    }
}

/// Result of a converged root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}
