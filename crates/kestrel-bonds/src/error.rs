//! Error types for bond operations.

use kestrel_math::MathError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// A bond, yield or curve parameter is outside its domain.
    #[error("Invalid {field} = {value}: {reason}")]
    InvalidInput {
        /// Name of the offending parameter.
        field: String,
        /// The rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: String,
    },

    /// The target price is not reached by any yield in the search range.
    #[error(
        "No yield in [{min_yield}, {max_yield}] prices the bond at {target_price} (prices span [{price_at_max}, {price_at_min}])"
    )]
    YieldNotBracketed {
        /// The price that was inverted.
        target_price: f64,
        /// Lower end of the yield range.
        min_yield: f64,
        /// Upper end of the yield range.
        max_yield: f64,
        /// Bond price at `min_yield`.
        price_at_min: f64,
        /// Bond price at `max_yield`.
        price_at_max: f64,
    },

    /// Yield calculation failed to converge.
    #[error(
        "Yield calculation failed to converge after {iterations} iterations (last estimate: {last_estimate}, residual: {residual:.2e})"
    )]
    YieldConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last midpoint of the bisection.
        last_estimate: f64,
        /// Absolute price error at the last estimate.
        residual: f64,
    },

    /// Error from the numeric layer.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl BondError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }
}
