//! Newton-Raphson root-finding algorithm.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// This method has quadratic convergence near the root but requires
/// the derivative of the function.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use kestrel_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);

        if dfx.abs() < config.min_derivative {
            return Err(MathError::FlatDerivative {
                x,
                derivative: dfx,
                iterations: iteration,
            });
        }

        let step = fx / dfx;
        x -= step;

        // Check for step convergence
        if step.abs() < config.tolerance {
            let final_fx = f(x);
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: final_fx,
            });
        }
    }

    let residual = f(x).abs();
    Err(MathError::convergence_failed(
        config.max_iterations,
        residual,
        x,
    ))
}

/// Box that keeps Newton iterates inside a valid domain.
///
/// After every update an iterate at or below `lower` is reset to `reset`
/// and an iterate above `upper` is capped at `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterateBounds {
    /// Iterates at or below this value are reset.
    pub lower: f64,
    /// Replacement for an iterate that fell to or below `lower`.
    pub reset: f64,
    /// Iterates above this value are capped here.
    pub upper: f64,
}

impl IterateBounds {
    /// Creates iterate bounds.
    #[must_use]
    pub fn new(lower: f64, reset: f64, upper: f64) -> Self {
        Self {
            lower,
            reset,
            upper,
        }
    }

    /// Pulls `x` back into the box.
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        if x <= self.lower {
            self.reset
        } else if x > self.upper {
            self.upper
        } else {
            x
        }
    }
}

/// Newton-Raphson with iterates held inside [`IterateBounds`].
///
/// Convergence is residual-only: a capped iterate can stop moving without
/// being a root, so a vanishing step is never treated as success.
///
/// # Errors
///
/// - [`MathError::FlatDerivative`] as soon as `|f'(x)| < config.min_derivative`
/// - [`MathError::ConvergenceFailed`] when the budget is exhausted
pub fn newton_raphson_bounded<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: IterateBounds,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    if !(bounds.lower < bounds.reset && bounds.reset <= bounds.upper) {
        return Err(MathError::invalid_input(format!(
            "iterate bounds must satisfy lower < reset <= upper, got ({}, {}, {})",
            bounds.lower, bounds.reset, bounds.upper
        )));
    }

    let mut x = initial_guess;
    let mut fx = f(x);

    for iteration in 0..config.max_iterations {
        trace!("newton iter {iteration}: x = {x}, f = {fx:.3e}");

        if fx.abs() < config.tolerance {
            debug!("newton converged to {x} in {iteration} iterations");
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if dfx.abs() < config.min_derivative {
            warn!("newton stopped at x = {x}: derivative {dfx:.3e} below floor");
            return Err(MathError::FlatDerivative {
                x,
                derivative: dfx,
                iterations: iteration,
            });
        }

        x = bounds.apply(x - fx / dfx);
        fx = f(x);
    }

    warn!(
        "newton exhausted {} iterations at x = {x} (residual {fx:.3e})",
        config.max_iterations
    );
    Err(MathError::convergence_failed(
        config.max_iterations,
        fx.abs(),
        x,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_cube_root() {
        let f = |x: f64| x * x * x - 27.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_raphson(f, df, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_derivative_error() {
        let f = |x: f64| x * x * x - 1.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_raphson(f, df, 0.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::FlatDerivative { .. })));
    }

    #[test]
    fn test_bounds_apply() {
        let bounds = IterateBounds::new(0.0, 0.01, 5.0);

        assert_relative_eq!(bounds.apply(-0.3), 0.01);
        assert_relative_eq!(bounds.apply(0.0), 0.01);
        assert_relative_eq!(bounds.apply(7.5), 5.0);
        assert_relative_eq!(bounds.apply(0.42), 0.42);
    }

    #[test]
    fn test_bounded_converges() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;
        let bounds = IterateBounds::new(0.0, 0.01, 5.0);

        let result =
            newton_raphson_bounded(f, df, 0.3, bounds, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_bounded_reset_from_negative_step() {
        // From x = 4 the first step overshoots below zero and is reset
        let f = |x: f64| x.ln() + 2.0;
        let df = |x: f64| 1.0 / x;
        let bounds = IterateBounds::new(0.0, 0.01, 5.0);

        let result =
            newton_raphson_bounded(f, df, 4.0, bounds, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, (-2.0_f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_bounded_capped_iterate_is_not_success() {
        // Root at 10 lies above the cap; iterates pin at 5 and never converge
        let f = |x: f64| x - 10.0;
        let df = |_x: f64| 1.0;
        let bounds = IterateBounds::new(0.0, 0.01, 5.0);

        let result = newton_raphson_bounded(f, df, 1.0, bounds, &SolverConfig::default());

        match result {
            Err(MathError::ConvergenceFailed { last_estimate, .. }) => {
                assert_relative_eq!(last_estimate, 5.0);
            }
            other => panic!("expected ConvergenceFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_bounded_flat_derivative() {
        let f = |x: f64| x - 1.0;
        let df = |_x: f64| 1e-20;
        let bounds = IterateBounds::new(0.0, 0.01, 5.0);

        let result = newton_raphson_bounded(f, df, 0.5, bounds, &SolverConfig::default());

        assert!(matches!(
            result,
            Err(MathError::FlatDerivative { iterations: 0, .. })
        ));
    }

    #[test]
    fn test_bounded_rejects_inverted_box() {
        let bounds = IterateBounds::new(1.0, 0.5, 5.0);
        let result =
            newton_raphson_bounded(|x| x, |_| 1.0, 0.5, bounds, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidInput { .. })));
    }
}
