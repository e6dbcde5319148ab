//! Implied volatility by bounded Newton-Raphson.
//!
//! Starting from [`INITIAL_VOLATILITY`], each step moves σ by
//! `(price(σ) − market) / vega(σ)`. Iterates at or below zero are reset to
//! [`VOLATILITY_RESET`] and iterates above [`MAX_VOLATILITY`] are capped.
//!
//! Before iterating, the market price is checked against the range the model
//! can produce: it must lie strictly above the discounted intrinsic value
//! (σ → 0) and no higher than the price at [`MAX_VOLATILITY`]. Prices outside
//! that range fail with [`OptionError::NoSolution`] instead of exhausting the
//! iteration budget.
//!
//! # Example
//!
//! ```rust
//! use kestrel_options::{implied_volatility, price, OptionKind, OptionParams};
//!
//! let params = OptionParams::new(100.0, 105.0, 0.25, 0.05, 0.2, OptionKind::Call).unwrap();
//! let market = price(&params);
//!
//! let iv = implied_volatility(market, 100.0, 105.0, 0.25, 0.05, OptionKind::Call).unwrap();
//! assert!((iv.volatility - 0.2).abs() < 1e-4);
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use kestrel_math::solvers::{newton_raphson_bounded, IterateBounds, SolverConfig};
use kestrel_math::MathError;

use crate::error::{OptionError, OptionResult};
use crate::greeks::vega;
use crate::pricing::price;
use crate::types::{check_finite, check_positive, OptionKind, OptionParams};

/// Price tolerance for convergence.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Iteration budget.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Starting volatility.
pub const INITIAL_VOLATILITY: f64 = 0.3;

/// Vega below which the price surface is treated as flat.
pub const MIN_VEGA: f64 = 1e-10;

/// Upper clamp on the volatility iterate.
pub const MAX_VOLATILITY: f64 = 5.0;

/// Replacement for an iterate that fell to zero or below.
pub const VOLATILITY_RESET: f64 = 0.01;

/// Tunable parameters of the implied-volatility search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpliedVolConfig {
    /// Absolute price tolerance.
    pub tolerance: f64,
    /// Maximum Newton iterations.
    pub max_iterations: u32,
    /// Starting volatility.
    pub initial_volatility: f64,
    /// Vega floor.
    pub min_vega: f64,
    /// Upper clamp on the iterate.
    pub max_volatility: f64,
    /// Reset value for non-positive iterates.
    pub volatility_reset: f64,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_volatility: INITIAL_VOLATILITY,
            min_vega: MIN_VEGA,
            max_volatility: MAX_VOLATILITY,
            volatility_reset: VOLATILITY_RESET,
        }
    }
}

impl ImpliedVolConfig {
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

    /// Sets the starting volatility.
    #[must_use]
    pub fn with_initial_volatility(mut self, initial_volatility: f64) -> Self {
        self.initial_volatility = initial_volatility;
        self
    }

    /// Sets the vega floor.
    #[must_use]
    pub fn with_min_vega(mut self, min_vega: f64) -> Self {
        self.min_vega = min_vega;
        self
    }

    /// Sets the volatility cap.
    #[must_use]
    pub fn with_max_volatility(mut self, max_volatility: f64) -> Self {
        self.max_volatility = max_volatility;
        self
    }

    fn check(&self) -> OptionResult<()> {
        check_positive("tolerance", self.tolerance)?;
        check_positive("min_vega", self.min_vega)?;
        check_positive("volatility_reset", self.volatility_reset)?;
        check_positive("initial_volatility", self.initial_volatility)?;
        check_positive("max_volatility", self.max_volatility)?;
        if self.max_iterations == 0 {
            return Err(OptionError::invalid_input(
                "max_iterations",
                0.0,
                "must be at least 1",
            ));
        }
        if self.volatility_reset > self.max_volatility {
            return Err(OptionError::invalid_input(
                "volatility_reset",
                self.volatility_reset,
                "must not exceed max_volatility",
            ));
        }
        Ok(())
    }
}

/// A converged implied volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVolatility {
    /// The volatility reproducing the market price.
    pub volatility: f64,
    /// Newton iterations used.
    pub iterations: u32,
    /// Model price minus market price at `volatility`.
    pub residual: f64,
}

/// Implied-volatility solver.
#[derive(Debug, Clone, Default)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
}

impl ImpliedVolSolver {
    /// Creates a solver with the default constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: ImpliedVolConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the price tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Range of prices the model can reach for this contract:
    /// `(discounted intrinsic, price at max volatility]`.
    pub fn attainable_range(
        &self,
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        rate: f64,
        kind: OptionKind,
    ) -> OptionResult<(f64, f64)> {
        self.config.check()?;
        let params = OptionParams::new(
            spot,
            strike,
            time_to_maturity,
            rate,
            self.config.max_volatility,
            kind,
        )?;
        Ok(price_bounds(&params))
    }

    /// Solves for the volatility that reproduces `market_price`.
    ///
    /// # Errors
    ///
    /// - [`OptionError::InvalidInput`] for a non-positive price or expiry, or
    ///   any contract parameter out of domain
    /// - [`OptionError::NoSolution`] when the price is outside the attainable range
    /// - [`OptionError::FlatVega`] when vega drops below the floor
    /// - [`OptionError::ConvergenceFailed`] when the budget runs out
    pub fn solve(
        &self,
        market_price: f64,
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        rate: f64,
        kind: OptionKind,
    ) -> OptionResult<ImpliedVolatility> {
        self.config.check()?;
        check_positive("market_price", market_price)?;
        check_finite("time_to_maturity", time_to_maturity)?;
        if time_to_maturity <= 0.0 {
            return Err(OptionError::invalid_input(
                "time_to_maturity",
                time_to_maturity,
                "must be positive to infer a volatility",
            ));
        }

        let params = OptionParams::new(
            spot,
            strike,
            time_to_maturity,
            rate,
            self.config.initial_volatility,
            kind,
        )?;

        let (lower_bound, upper_bound) =
            price_bounds(&params.at_volatility(self.config.max_volatility));
        if market_price <= lower_bound || market_price > upper_bound {
            warn!(
                "implied vol: price {market_price} outside attainable range ({lower_bound}, {upper_bound}]"
            );
            return Err(OptionError::NoSolution {
                market_price,
                lower_bound,
                upper_bound,
            });
        }

        let objective = |sigma: f64| price(&params.at_volatility(sigma)) - market_price;
        let slope = |sigma: f64| vega(&params.at_volatility(sigma));

        let bounds = IterateBounds::new(
            0.0,
            self.config.volatility_reset,
            self.config.max_volatility,
        );
        let solver_config =
            SolverConfig::new(self.config.tolerance, self.config.max_iterations)
                .with_min_derivative(self.config.min_vega);

        let result = newton_raphson_bounded(
            objective,
            slope,
            self.config.initial_volatility,
            bounds,
            &solver_config,
        )
        .map_err(|err| match err {
            MathError::FlatDerivative {
                x,
                derivative,
                iterations,
            } => OptionError::FlatVega {
                volatility: x,
                vega: derivative,
                iterations,
            },
            MathError::ConvergenceFailed {
                iterations,
                residual,
                last_estimate,
            } => OptionError::ConvergenceFailed {
                iterations,
                last_volatility: last_estimate,
                residual,
            },
            other => OptionError::Math(other),
        })?;

        debug!(
            "implied vol {} for price {market_price} in {} iterations",
            result.root, result.iterations
        );

        Ok(ImpliedVolatility {
            volatility: result.root,
            iterations: result.iterations,
            residual: result.residual,
        })
    }
}

/// `(max(0, φ(S − K·e^{−rT})), price at params.volatility)`.
fn price_bounds(params: &OptionParams) -> (f64, f64) {
    let discounted_strike = params.strike() * (-params.rate() * params.time_to_maturity()).exp();
    let lower = (params.kind().sign() * (params.spot() - discounted_strike)).max(0.0);
    (lower, price(params))
}

/// Implied volatility with the default configuration.
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    time_to_maturity: f64,
    rate: f64,
    kind: OptionKind,
) -> OptionResult<ImpliedVolatility> {
    ImpliedVolSolver::new().solve(market_price, spot, strike, time_to_maturity, rate, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn market(sigma: f64, kind: OptionKind) -> f64 {
        price(&OptionParams::new(100.0, 105.0, 0.25, 0.05, sigma, kind).unwrap())
    }

    #[test]
    fn test_round_trip_call_and_put() {
        for kind in [OptionKind::Call, OptionKind::Put] {
            for sigma in [0.1, 0.2, 0.45, 0.8] {
                let iv = implied_volatility(market(sigma, kind), 100.0, 105.0, 0.25, 0.05, kind)
                    .unwrap();
                assert_relative_eq!(iv.volatility, sigma, epsilon = 1e-4);
                assert!(iv.residual.abs() < DEFAULT_TOLERANCE);
                assert!(iv.iterations <= DEFAULT_MAX_ITERATIONS);
            }
        }
    }

    #[test]
    fn test_price_above_max_volatility_is_no_solution() {
        // A call can never be worth more than the underlying
        let result = implied_volatility(150.0, 100.0, 105.0, 0.25, 0.05, OptionKind::Call);

        match result {
            Err(OptionError::NoSolution {
                market_price,
                upper_bound,
                ..
            }) => {
                assert_eq!(market_price, 150.0);
                assert!(upper_bound < 100.0);
            }
            other => panic!("expected NoSolution, got {other:?}"),
        }
    }

    #[test]
    fn test_price_below_intrinsic_is_no_solution() {
        // Deep ITM call below its discounted intrinsic value of ~20.99
        let result = implied_volatility(20.0, 120.0, 100.0, 0.2, 0.05, OptionKind::Call);

        assert!(matches!(result, Err(OptionError::NoSolution { .. })));
    }

    #[test]
    fn test_invalid_inputs() {
        let kind = OptionKind::Call;
        assert!(matches!(
            implied_volatility(0.0, 100.0, 105.0, 0.25, 0.05, kind),
            Err(OptionError::InvalidInput { .. })
        ));
        assert!(matches!(
            implied_volatility(2.0, 100.0, 105.0, 0.0, 0.05, kind),
            Err(OptionError::InvalidInput { .. })
        ));
        assert!(matches!(
            implied_volatility(2.0, -100.0, 105.0, 0.25, 0.05, kind),
            Err(OptionError::InvalidInput { .. })
        ));
        assert!(matches!(
            implied_volatility(f64::NAN, 100.0, 105.0, 0.25, 0.05, kind),
            Err(OptionError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_budget_exhausted_reports_last_volatility() {
        let target = market(0.6, OptionKind::Call);
        let solver = ImpliedVolSolver::new().with_max_iterations(1);

        match solver.solve(target, 100.0, 105.0, 0.25, 0.05, OptionKind::Call) {
            Err(OptionError::ConvergenceFailed {
                iterations,
                last_volatility,
                residual,
            }) => {
                assert_eq!(iterations, 1);
                assert!(last_volatility > INITIAL_VOLATILITY);
                assert!(residual > 0.0);
            }
            other => panic!("expected ConvergenceFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_flat_vega_reported() {
        // Far OTM short-dated call: vega at the starting point is ~0
        let target = 1e-5;
        let solver = ImpliedVolSolver::new().with_config(
            ImpliedVolConfig::default()
                .with_initial_volatility(0.01)
                .with_min_vega(1e-6),
        );

        let result = solver.solve(target, 50.0, 100.0, 0.1, 0.0, OptionKind::Call);
        assert!(matches!(result, Err(OptionError::FlatVega { iterations: 0, .. })));
    }

    #[test]
    fn test_attainable_range() {
        let (lo, hi) = ImpliedVolSolver::new()
            .attainable_range(100.0, 105.0, 0.25, 0.05, OptionKind::Call)
            .unwrap();
        assert_eq!(lo, 0.0);
        assert!(hi > 50.0 && hi < 100.0);
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: ImpliedVolConfig = serde_json::from_str(r#"{"tolerance": 1e-8}"#).unwrap();
        assert_eq!(config.tolerance, 1e-8);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(config.max_volatility, MAX_VOLATILITY);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let solver =
            ImpliedVolSolver::new().with_config(ImpliedVolConfig::default().with_tolerance(0.0));
        assert!(solver
            .solve(2.0, 100.0, 105.0, 0.25, 0.05, OptionKind::Call)
            .is_err());
    }
}
