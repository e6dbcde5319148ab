//! Error types for option pricing.

use kestrel_math::MathError;
use thiserror::Error;

/// A specialized Result type for option operations.
pub type OptionResult<T> = Result<T, OptionError>;

/// Errors that can occur while pricing or inverting an option.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionError {
    /// A contract or solver parameter is outside its domain.
    #[error("Invalid {field} = {value}: {reason}")]
    InvalidInput {
        /// Name of the offending parameter.
        field: String,
        /// The rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: String,
    },

    /// No volatility in the solver range reproduces the market price.
    ///
    /// The price must lie strictly above the no-arbitrage floor and no
    /// higher than the price at the maximum volatility.
    #[error(
        "No implied volatility for price {market_price}: attainable range is ({lower_bound}, {upper_bound}]"
    )]
    NoSolution {
        /// The price that was inverted.
        market_price: f64,
        /// No-arbitrage lower bound (discounted intrinsic value).
        lower_bound: f64,
        /// Price at the maximum volatility.
        upper_bound: f64,
    },

    /// Vega fell below the floor, so the price surface is too flat to invert.
    #[error("Vega {vega:.2e} at volatility {volatility} is too small after {iterations} iterations")]
    FlatVega {
        /// Volatility at which vega vanished.
        volatility: f64,
        /// The near-zero vega.
        vega: f64,
        /// Iterations completed before the failure.
        iterations: u32,
    },

    /// Newton iteration ran out of budget.
    #[error(
        "Implied volatility did not converge after {iterations} iterations (last volatility: {last_volatility}, residual: {residual:.2e})"
    )]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last volatility iterate.
        last_volatility: f64,
        /// Absolute price error at the last iterate.
        residual: f64,
    },

    /// Error from the numeric layer.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl OptionError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Returns true for failures of the implied-volatility search itself,
    /// as opposed to rejected inputs.
    pub fn is_solver_failure(&self) -> bool {
        matches!(
            self,
            Self::NoSolution { .. } | Self::FlatVega { .. } | Self::ConvergenceFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OptionError::invalid_input("volatility", -0.2, "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid volatility = -0.2: must be positive"
        );
        assert!(!err.is_solver_failure());
    }

    #[test]
    fn test_no_solution_is_solver_failure() {
        let err = OptionError::NoSolution {
            market_price: 50.0,
            lower_bound: 0.0,
            upper_bound: 42.0,
        };
        assert!(err.is_solver_failure());
        assert!(err.to_string().contains("attainable range"));
    }

    #[test]
    fn test_from_math_error() {
        let err: OptionError = MathError::invalid_input("bad grid").into();
        assert!(matches!(err, OptionError::Math(_)));
    }
}
