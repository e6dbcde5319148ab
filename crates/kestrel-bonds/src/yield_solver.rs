//! Yield-to-maturity by bisection.
//!
//! Bond price is strictly decreasing in yield, so the yield range
//! `[YTM_LOWER_BOUND, YTM_UPPER_BOUND]` maps to a price range. Targets
//! outside it are reported as [`BondError::YieldNotBracketed`]; targets
//! inside are located by halving until the repriced bond is within tolerance
//! of the target, or the budget runs out
//! ([`BondError::YieldConvergenceFailed`], carrying the last midpoint).
//!
//! # Example
//!
//! ```rust
//! use kestrel_bonds::{BondParams, Frequency, YieldSolver};
//!
//! let bond = BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap();
//! let result = YieldSolver::new().solve(&bond, 925.6126).unwrap();
//!
//! assert!((result.yield_value - 0.06).abs() < 1e-6);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use kestrel_math::solvers::{bisection, SolverConfig};
use kestrel_math::MathError;

use crate::error::{BondError, BondResult};
use crate::pricing::unchecked_price;
use crate::types::{check_finite, BondParams};

/// Price tolerance for convergence.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Bisection budget.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Lowest yield searched.
pub const YTM_LOWER_BOUND: f64 = 0.0001;

/// Highest yield searched.
pub const YTM_UPPER_BOUND: f64 = 0.5;

/// Result of a yield calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    /// The calculated yield (as a decimal, e.g., 0.05 for 5%).
    pub yield_value: f64,
    /// Number of iterations to converge.
    pub iterations: u32,
    /// Repriced bond minus target price.
    pub residual: f64,
}

/// Tunable parameters of the yield search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldSolverConfig {
    /// Absolute price tolerance.
    pub tolerance: f64,
    /// Maximum bisection steps.
    pub max_iterations: u32,
    /// Lower end of the yield range.
    pub lower_bound: f64,
    /// Upper end of the yield range.
    pub upper_bound: f64,
}

impl Default for YieldSolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lower_bound: YTM_LOWER_BOUND,
            upper_bound: YTM_UPPER_BOUND,
        }
    }
}

impl YieldSolverConfig {
    /// Sets the price tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the yield search range.
    #[must_use]
    pub fn with_bounds(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }
}

/// Yield-to-maturity solver.
#[derive(Debug, Clone, Default)]
pub struct YieldSolver {
    config: YieldSolverConfig,
}

impl YieldSolver {
    /// Creates a new yield solver with default settings.
    ///
    /// Default tolerance: 1e-6
    /// Default max iterations: 100
    /// Default range: [0.0001, 0.5]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: YieldSolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &YieldSolverConfig {
        &self.config
    }

    fn check_config(&self, params: &BondParams) -> BondResult<()> {
        let YieldSolverConfig {
            tolerance,
            max_iterations,
            lower_bound,
            upper_bound,
        } = self.config;

        check_finite("tolerance", tolerance)?;
        if tolerance <= 0.0 {
            return Err(BondError::invalid_input("tolerance", tolerance, "must be positive"));
        }
        if max_iterations == 0 {
            return Err(BondError::invalid_input(
                "max_iterations",
                0.0,
                "must be at least 1",
            ));
        }
        check_finite("lower_bound", lower_bound)?;
        check_finite("upper_bound", upper_bound)?;
        if lower_bound <= -params.periods_per_year() {
            return Err(BondError::invalid_input(
                "lower_bound",
                lower_bound,
                "periodic yield must exceed -100%",
            ));
        }
        if upper_bound <= lower_bound {
            return Err(BondError::invalid_input(
                "upper_bound",
                upper_bound,
                "must exceed lower_bound",
            ));
        }
        Ok(())
    }

    /// Solves for the yield that prices the bond at `market_price`.
    ///
    /// # Errors
    ///
    /// - [`BondError::InvalidInput`] for a non-positive price, a bond with no
    ///   remaining coupon period, or an invalid configuration
    /// - [`BondError::YieldNotBracketed`] when no yield in range reaches the price
    /// - [`BondError::YieldConvergenceFailed`] when the budget runs out
    pub fn solve(&self, params: &BondParams, market_price: f64) -> BondResult<YieldResult> {
        self.check_config(params)?;
        check_finite("market_price", market_price)?;
        if market_price <= 0.0 {
            return Err(BondError::invalid_input(
                "market_price",
                market_price,
                "must be positive",
            ));
        }
        if params.is_matured() {
            return Err(BondError::invalid_input(
                "years_to_maturity",
                params.years_to_maturity(),
                "no coupon period remains, so the yield is undefined",
            ));
        }

        let objective = |y: f64| unchecked_price(params, y) - market_price;
        let config = SolverConfig::new(self.config.tolerance, self.config.max_iterations);

        let result = bisection(
            objective,
            self.config.lower_bound,
            self.config.upper_bound,
            &config,
        )
        .map_err(|err| match err {
            MathError::InvalidBracket { a, b, fa, fb } => BondError::YieldNotBracketed {
                target_price: market_price,
                min_yield: a,
                max_yield: b,
                price_at_min: fa + market_price,
                price_at_max: fb + market_price,
            },
            MathError::ConvergenceFailed {
                iterations,
                residual,
                last_estimate,
            } => BondError::YieldConvergenceFailed {
                iterations,
                last_estimate,
                residual,
            },
            other => BondError::Math(other),
        })?;

        debug!(
            "ytm {} for price {market_price} in {} iterations",
            result.root, result.iterations
        );

        Ok(YieldResult {
            yield_value: result.root,
            iterations: result.iterations,
            residual: result.residual,
        })
    }
}

/// Yield to maturity with the default configuration.
pub fn yield_to_maturity(params: &BondParams, market_price: f64) -> BondResult<YieldResult> {
    YieldSolver::new().solve(params, market_price)
}
