//! Closed-form Black-Scholes sensitivities.

use kestrel_math::distributions::{normal_cdf, normal_pdf};

use crate::pricing::d1_d2;
use crate::types::{Greeks, OptionKind, OptionParams};

/// Calendar days per year used to express theta per day.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Analytic Greeks.
///
/// At expiry every Greek is zero except delta, which jumps to the exercise
/// indicator: 1 for an in-the-money call, −1 for an in-the-money put, 0
/// otherwise (at-the-money included).
pub fn greeks(params: &OptionParams) -> Greeks {
    let Some((d1, d2)) = d1_d2(params) else {
        return expired_greeks(params);
    };

    let s = params.spot();
    let k = params.strike();
    let t = params.time_to_maturity();
    let r = params.rate();
    let sigma = params.volatility();
    let sqrt_t = t.sqrt();
    let discount = (-r * t).exp();
    let pdf_d1 = normal_pdf(d1);

    let gamma = pdf_d1 / (s * sigma * sqrt_t);
    let vega = s * pdf_d1 * sqrt_t;
    let decay = -(s * pdf_d1 * sigma) / (2.0 * sqrt_t);

    let (delta, theta_annual, rho) = match params.kind() {
        OptionKind::Call => (
            normal_cdf(d1),
            decay - r * k * discount * normal_cdf(d2),
            k * t * discount * normal_cdf(d2),
        ),
        OptionKind::Put => (
            normal_cdf(d1) - 1.0,
            decay + r * k * discount * normal_cdf(-d2),
            -k * t * discount * normal_cdf(-d2),
        ),
    };

    Greeks {
        delta,
        gamma,
        vega,
        theta: theta_annual / DAYS_PER_YEAR,
        rho,
    }
}

fn expired_greeks(params: &OptionParams) -> Greeks {
    let delta = match params.kind() {
        OptionKind::Call if params.spot() > params.strike() => 1.0,
        OptionKind::Put if params.spot() < params.strike() => -1.0,
        _ => 0.0,
    };
    Greeks {
        delta,
        ..Greeks::default()
    }
}

/// Vega alone, for solvers that only need the slope in σ.
pub(crate) fn vega(params: &OptionParams) -> f64 {
    match d1_d2(params) {
        Some((d1, _)) => params.spot() * normal_pdf(d1) * params.time_to_maturity().sqrt(),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price;
    use approx::assert_relative_eq;

    fn params(kind: OptionKind) -> OptionParams {
        OptionParams::new(100.0, 105.0, 0.25, 0.05, 0.2, kind).unwrap()
    }

    #[test]
    fn test_reference_call_greeks() {
        let g = greeks(&params(OptionKind::Call));

        assert_relative_eq!(g.delta, 0.37718, epsilon = 1e-4);
        assert_relative_eq!(g.gamma, 0.037988, epsilon = 1e-5);
        assert_relative_eq!(g.vega, 18.9941, epsilon = 1e-3);
        assert_relative_eq!(g.theta, -0.025643, epsilon = 1e-5);
        assert_relative_eq!(g.rho, 8.80997, epsilon = 1e-3);
    }

    #[test]
    fn test_reference_put_greeks() {
        let g = greeks(&params(OptionKind::Put));

        assert_relative_eq!(g.delta, -0.62282, epsilon = 1e-4);
        assert_relative_eq!(g.theta, -0.011438, epsilon = 1e-5);
        assert_relative_eq!(g.rho, -17.11395, epsilon = 1e-3);
    }

    #[test]
    fn test_gamma_vega_match_across_kinds() {
        let call = greeks(&params(OptionKind::Call));
        let put = greeks(&params(OptionKind::Put));

        assert_relative_eq!(call.gamma, put.gamma);
        assert_relative_eq!(call.vega, put.vega);
        assert_relative_eq!(call.delta - put.delta, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_against_finite_differences() {
        let p = params(OptionKind::Call);
        let g = greeks(&p);
        let h = 1e-4;

        let up = price(&p.with_spot(100.0 + h).unwrap());
        let down = price(&p.with_spot(100.0 - h).unwrap());
        assert_relative_eq!(g.delta, (up - down) / (2.0 * h), epsilon = 1e-6);
        assert_relative_eq!(
            g.gamma,
            (up - 2.0 * price(&p) + down) / (h * h),
            epsilon = 1e-3
        );

        let vol_up = price(&p.with_volatility(0.2 + h).unwrap());
        let vol_down = price(&p.with_volatility(0.2 - h).unwrap());
        assert_relative_eq!(g.vega, (vol_up - vol_down) / (2.0 * h), epsilon = 1e-4);

        // One day less to expiry, holding everything else fixed
        let day = 1.0 / DAYS_PER_YEAR;
        let tomorrow = price(&p.with_time_to_maturity(0.25 - day).unwrap());
        assert_relative_eq!(g.theta, tomorrow - price(&p), epsilon = 1e-3);
    }

    #[test]
    fn test_expired_greeks() {
        let expired = |spot: f64, kind| {
            greeks(&OptionParams::new(spot, 100.0, 0.0, 0.05, 0.2, kind).unwrap())
        };

        assert_eq!(expired(110.0, OptionKind::Call).delta, 1.0);
        assert_eq!(expired(90.0, OptionKind::Call).delta, 0.0);
        assert_eq!(expired(100.0, OptionKind::Call).delta, 0.0);
        assert_eq!(expired(90.0, OptionKind::Put).delta, -1.0);
        assert_eq!(expired(110.0, OptionKind::Put).delta, 0.0);
        assert_eq!(expired(100.0, OptionKind::Put).delta, 0.0);

        let g = expired(110.0, OptionKind::Call);
        assert_eq!((g.gamma, g.vega, g.theta, g.rho), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_vega_helper_matches() {
        let p = params(OptionKind::Put);
        assert_relative_eq!(vega(&p), greeks(&p).vega);
    }
}
