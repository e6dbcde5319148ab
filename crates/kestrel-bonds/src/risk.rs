//! Yield sensitivities: duration, convexity and DV01.
//!
//! ## Formulas
//!
//! With t in coupon periods, PV_t the discounted cash flow, P the price, m the
//! frequency and y the yield:
//!
//! ```text
//! D_mac = Σ t·PV_t / P / m
//! D_mod = D_mac / (1 + y/m)
//! C     = Σ t·(t+1)·PV_t / (P·(1 + y/m)²) / m²
//! DV01  = D_mod × P × 0.0001
//! ```
//!
//! A bond with no remaining coupon period has zero duration and convexity.

use crate::error::BondResult;
use crate::pricing::{discount, price_from_yield};
use crate::types::{check_yield, BondParams};

/// One basis point as a decimal.
pub const BASIS_POINT: f64 = 0.0001;

/// Macaulay duration in years.
pub fn macaulay_duration(params: &BondParams, ytm: f64) -> BondResult<f64> {
    check_yield(params, ytm)?;
    if params.is_matured() {
        return Ok(0.0);
    }
    let sums = discount(params, ytm)?;
    Ok(sums.time_weighted / sums.price / params.periods_per_year())
}

/// Modified duration: percentage price change per unit yield change.
pub fn modified_duration(params: &BondParams, ytm: f64) -> BondResult<f64> {
    let macaulay = macaulay_duration(params, ytm)?;
    Ok(macaulay / (1.0 + ytm / params.periods_per_year()))
}

/// Convexity in years².
pub fn convexity(params: &BondParams, ytm: f64) -> BondResult<f64> {
    check_yield(params, ytm)?;
    if params.is_matured() {
        return Ok(0.0);
    }
    let m = params.periods_per_year();
    let base = 1.0 + ytm / m;
    let sums = discount(params, ytm)?;
    Ok(sums.convexity_weighted / (sums.price * base * base) / (m * m))
}

/// Price change for a one basis point yield move.
pub fn dv01(params: &BondParams, ytm: f64) -> BondResult<f64> {
    let price = price_from_yield(params, ytm)?;
    Ok(modified_duration(params, ytm)? * price * BASIS_POINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Frequency;
    use approx::assert_relative_eq;

    fn bond() -> BondParams {
        BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap()
    }

    #[test]
    fn test_reference_bond() {
        let y = 0.06;
        assert_relative_eq!(macaulay_duration(&bond(), y).unwrap(), 7.8950, epsilon = 1e-3);
        assert_relative_eq!(modified_duration(&bond(), y).unwrap(), 7.6650, epsilon = 1e-3);
        assert_relative_eq!(convexity(&bond(), y).unwrap(), 71.785, epsilon = 1e-2);
        assert_relative_eq!(dv01(&bond(), y).unwrap(), 0.70949, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_coupon_duration_is_maturity() {
        let zero = BondParams::new(100.0, 0.0, 5.0, Frequency::Annual).unwrap();

        assert_relative_eq!(macaulay_duration(&zero, 0.05).unwrap(), 5.0, epsilon = 1e-12);
        // 5 × 6 / 1.05² for annual compounding
        assert_relative_eq!(convexity(&zero, 0.05).unwrap(), 30.0 / 1.1025, epsilon = 1e-10);
    }

    #[test]
    fn test_modified_duration_matches_price_slope() {
        let y = 0.045;
        let h = 1e-6;
        let p = price_from_yield(&bond(), y).unwrap();
        let up = price_from_yield(&bond(), y + h).unwrap();
        let down = price_from_yield(&bond(), y - h).unwrap();

        let slope_duration = -(up - down) / (2.0 * h) / p;
        assert_relative_eq!(modified_duration(&bond(), y).unwrap(), slope_duration, epsilon = 1e-5);
    }

    #[test]
    fn test_convexity_matches_price_curvature() {
        let y = 0.045;
        let h = 1e-4;
        let p = price_from_yield(&bond(), y).unwrap();
        let up = price_from_yield(&bond(), y + h).unwrap();
        let down = price_from_yield(&bond(), y - h).unwrap();

        let curvature = (up - 2.0 * p + down) / (h * h) / p;
        assert_relative_eq!(convexity(&bond(), y).unwrap(), curvature, epsilon = 1e-2);
    }

    #[test]
    fn test_matured_bond_has_no_risk() {
        let matured = BondParams::new(1000.0, 0.05, 0.4, Frequency::SemiAnnual).unwrap();

        assert_eq!(macaulay_duration(&matured, 0.05).unwrap(), 0.0);
        assert_eq!(modified_duration(&matured, 0.05).unwrap(), 0.0);
        assert_eq!(convexity(&matured, 0.05).unwrap(), 0.0);
        assert_eq!(dv01(&matured, 0.05).unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_bad_yield() {
        assert!(macaulay_duration(&bond(), f64::NAN).is_err());
        assert!(convexity(&bond(), -3.0).is_err());
        assert!(dv01(&bond(), f64::INFINITY).is_err());
    }

    #[test]
    fn test_unrepresentable_yield_rejected() {
        let monthly = BondParams::new(1000.0, 0.05, 30.0, Frequency::Monthly).unwrap();
        assert!(macaulay_duration(&monthly, -11.999_999).is_err());
        assert!(convexity(&monthly, -11.999_999).is_err());
        assert!(dv01(&monthly, -11.999_999).is_err());

        assert!(macaulay_duration(&bond(), 1e100).is_err());
        assert!(convexity(&bond(), 1e100).is_err());
    }
}
