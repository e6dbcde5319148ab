//! Bisection root-finding algorithm.

use log::{debug, trace, warn};

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and selecting the subinterval containing the root.
///
/// Requires: `f(a) * f(b) <= 0` (opposite signs at endpoints). A bracket
/// without a sign change means the function has no root inside it and is
/// reported as [`MathError::InvalidBracket`] before any iteration.
///
/// Convergence is declared only when `|f(mid)| < tolerance`. If the budget
/// runs out first, [`MathError::ConvergenceFailed`] carries the last
/// midpoint.
///
/// # Example
///
/// ```rust
/// use kestrel_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo * f_hi > 0.0 || f_lo.is_nan() || f_hi.is_nan() {
        warn!("bisection: no sign change on [{lo}, {hi}] (f = {f_lo:.3e}, {f_hi:.3e})");
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    // Handle case where endpoint is the root
    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    let mut mid = lo;
    let mut f_mid = f_lo;

    for iteration in 0..config.max_iterations {
        mid = (lo + hi) / 2.0;
        f_mid = f(mid);
        trace!("bisection iter {iteration}: x = {mid}, f = {f_mid:.3e}");

        if f_mid.abs() < config.tolerance {
            debug!(
                "bisection converged to {mid} in {} iterations",
                iteration + 1
            );
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        // Keep the half whose endpoints still straddle zero
        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    warn!(
        "bisection exhausted {} iterations at x = {mid} (residual {f_mid:.3e})",
        config.max_iterations
    );
    Err(MathError::convergence_failed(
        config.max_iterations,
        f_mid.abs(),
        mid,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Reversed bracket should still work
        let result = bisection(f, 2.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Both endpoints have same sign
        let result = bisection(f, 2.0, 3.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_root_at_endpoint() {
        let f = |x: f64| x - 1.0;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 1.0, epsilon = 1e-10);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_decreasing_function() {
        // Bond-like: decreasing in x
        let f = |x: f64| 1.0 / (1.0 + x) - 0.8;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_budget_exhausted_reports_last_estimate() {
        let f = |x: f64| x * x - 2.0;
        let config = SolverConfig::new(1e-12, 5);

        let result = bisection(f, 1.0, 2.0, &config);

        match result {
            Err(MathError::ConvergenceFailed {
                iterations,
                last_estimate,
                residual,
            }) => {
                assert_eq!(iterations, 5);
                assert!((last_estimate - std::f64::consts::SQRT_2).abs() < 0.05);
                assert!(residual > 0.0);
            }
            other => panic!("expected ConvergenceFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_one_evaluation_per_iteration() {
        let calls = std::cell::Cell::new(0u32);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            x * x - 2.0
        };

        let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        // Two endpoint evaluations, then one per halving
        assert_eq!(calls.get(), result.iterations + 2);
    }
}
