//! Black-Scholes-Merton valuation of European options.
//!
//! For `T > 0`:
//!
//! ```text
//! d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T)
//! d2 = d1 − σ√T
//! call = S·Φ(d1) − K·e^{−rT}·Φ(d2)
//! put  = K·e^{−rT}·Φ(−d2) − S·Φ(−d1)
//! ```
//!
//! At `T = 0` the option is worth its intrinsic value and d1/d2 are undefined.

use kestrel_math::distributions::normal_cdf;

use crate::greeks::greeks;
use crate::types::{BlackScholesResult, OptionKind, OptionParams};

/// Returns `(d1, d2)`, or `None` at expiry.
pub fn d1_d2(params: &OptionParams) -> Option<(f64, f64)> {
    let t = params.time_to_maturity();
    if t <= 0.0 {
        return None;
    }

    let sigma = params.volatility();
    let sigma_sqrt_t = sigma * t.sqrt();
    let d1 = ((params.spot() / params.strike()).ln() + (params.rate() + 0.5 * sigma * sigma) * t)
        / sigma_sqrt_t;
    Some((d1, d1 - sigma_sqrt_t))
}

/// Payoff if exercised now: `max(0, S − K)` for calls, `max(0, K − S)` for puts.
pub fn intrinsic_value(spot: f64, strike: f64, kind: OptionKind) -> f64 {
    (kind.sign() * (spot - strike)).max(0.0)
}

/// Black-Scholes price.
///
/// # Example
///
/// ```rust
/// use kestrel_options::{price, OptionKind, OptionParams};
///
/// let params = OptionParams::new(100.0, 105.0, 0.25, 0.05, 0.2, OptionKind::Call).unwrap();
/// assert!((price(&params) - 2.4779).abs() < 1e-3);
/// ```
pub fn price(params: &OptionParams) -> f64 {
    match d1_d2(params) {
        Some((d1, d2)) => price_with(params, d1, d2),
        None => intrinsic_value(params.spot(), params.strike(), params.kind()),
    }
}

pub(crate) fn price_with(params: &OptionParams, d1: f64, d2: f64) -> f64 {
    let s = params.spot();
    let discounted_strike = params.strike() * (-params.rate() * params.time_to_maturity()).exp();

    match params.kind() {
        OptionKind::Call => s * normal_cdf(d1) - discounted_strike * normal_cdf(d2),
        OptionKind::Put => discounted_strike * normal_cdf(-d2) - s * normal_cdf(-d1),
    }
}

/// Price, Greeks, d1 and d2 in one evaluation.
pub fn black_scholes(params: &OptionParams) -> BlackScholesResult {
    let d = d1_d2(params);
    let price = match d {
        Some((d1, d2)) => price_with(params, d1, d2),
        None => intrinsic_value(params.spot(), params.strike(), params.kind()),
    };

    BlackScholesResult {
        price,
        greeks: greeks(params),
        d1: d.map(|(d1, _)| d1),
        d2: d.map(|(_, d2)| d2),
    }
}
