//! Bond summaries and duration/convexity price-change estimates.

use serde::{Deserialize, Serialize};

use crate::error::BondResult;
use crate::pricing::{discount, price_from_yield};
use crate::risk::BASIS_POINT;
use crate::types::{check_finite, check_yield, BondParams};

/// Price and risk measures of a bond at one yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondSummary {
    /// The bond analysed.
    pub params: BondParams,
    /// Yield used for discounting.
    pub yield_value: f64,
    /// Price at `yield_value`.
    pub price: f64,
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Modified duration.
    pub modified_duration: f64,
    /// Convexity in years².
    pub convexity: f64,
    /// Price change per basis point.
    pub dv01: f64,
}

/// Price, durations, convexity and DV01 from a single discounting pass.
///
/// # Example
///
/// ```rust
/// use kestrel_bonds::{analyze, BondParams, Frequency};
///
/// let bond = BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap();
/// let summary = analyze(&bond, 0.06).unwrap();
///
/// assert!(summary.price < 1000.0);
/// assert!((summary.macaulay_duration - 7.9).abs() < 0.1);
/// ```
pub fn analyze(params: &BondParams, ytm: f64) -> BondResult<BondSummary> {
    check_yield(params, ytm)?;

    if params.is_matured() {
        return Ok(BondSummary {
            params: *params,
            yield_value: ytm,
            price: params.face_value(),
            macaulay_duration: 0.0,
            modified_duration: 0.0,
            convexity: 0.0,
            dv01: 0.0,
        });
    }

    let m = params.periods_per_year();
    let base = 1.0 + ytm / m;
    let sums = discount(params, ytm)?;

    let macaulay_duration = sums.time_weighted / sums.price / m;
    let modified_duration = macaulay_duration / base;
    let convexity = sums.convexity_weighted / (sums.price * base * base) / (m * m);

    Ok(BondSummary {
        params: *params,
        yield_value: ytm,
        price: sums.price,
        macaulay_duration,
        modified_duration,
        convexity,
        dv01: modified_duration * sums.price * BASIS_POINT,
    })
}

/// Taylor estimate of a yield shock compared with full repricing.
///
/// Every change is a fraction of the current price (0.01 is 1%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceChangeEstimate {
    /// Price before the shock.
    pub current_price: f64,
    /// Yield shift applied.
    pub yield_change: f64,
    /// First-order term, `−D_mod·Δy`.
    pub duration_effect: f64,
    /// Second-order term, `½·C·Δy²` (zero when convexity is not used).
    pub convexity_effect: f64,
    /// Sum of the two effects.
    pub estimated_change: f64,
    /// `current_price × (1 + estimated_change)`.
    pub estimated_price: f64,
    /// Exact price at the shifted yield.
    pub actual_price: f64,
    /// Exact relative change.
    pub actual_change: f64,
    /// `estimated_change − actual_change`.
    pub error: f64,
}

/// Estimates the effect of moving the yield by `yield_change`.
///
/// # Example
///
/// ```rust
/// use kestrel_bonds::{estimate_price_change, BondParams, Frequency};
///
/// let bond = BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap();
///
/// let first_order = estimate_price_change(&bond, 0.06, 0.01, false).unwrap();
/// let second_order = estimate_price_change(&bond, 0.06, 0.01, true).unwrap();
///
/// // Convexity closes most of the gap left by duration alone
/// assert!(second_order.error.abs() < first_order.error.abs());
/// ```
pub fn estimate_price_change(
    params: &BondParams,
    ytm: f64,
    yield_change: f64,
    use_convexity: bool,
) -> BondResult<PriceChangeEstimate> {
    check_finite("yield_change", yield_change)?;
    let summary = analyze(params, ytm)?;
    let actual_price = price_from_yield(params, ytm + yield_change)?;

    let duration_effect = -summary.modified_duration * yield_change;
    let convexity_effect = if use_convexity {
        0.5 * summary.convexity * yield_change * yield_change
    } else {
        0.0
    };
    let estimated_change = duration_effect + convexity_effect;
    let actual_change = (actual_price - summary.price) / summary.price;

    Ok(PriceChangeEstimate {
        current_price: summary.price,
        yield_change,
        duration_effect,
        convexity_effect,
        estimated_change,
        estimated_price: summary.price * (1.0 + estimated_change),
        actual_price,
        actual_change,
        error: estimated_change - actual_change,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::{convexity, dv01, macaulay_duration, modified_duration};
    use crate::types::Frequency;
    use approx::assert_relative_eq;

    fn bond() -> BondParams {
        BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap()
    }

    #[test]
    fn test_summary_matches_individual_measures() {
        let y = 0.06;
        let summary = analyze(&bond(), y).unwrap();

        assert_relative_eq!(summary.price, price_from_yield(&bond(), y).unwrap());
        assert_relative_eq!(summary.macaulay_duration, macaulay_duration(&bond(), y).unwrap());
        assert_relative_eq!(summary.modified_duration, modified_duration(&bond(), y).unwrap());
        assert_relative_eq!(summary.convexity, convexity(&bond(), y).unwrap());
        assert_relative_eq!(summary.dv01, dv01(&bond(), y).unwrap());
        assert_eq!(summary.params, bond());
    }

    #[test]
    fn test_rate_rise_estimate() {
        let est = estimate_price_change(&bond(), 0.06, 0.01, true).unwrap();

        assert!(est.duration_effect < 0.0);
        assert!(est.convexity_effect > 0.0);
        assert!(est.actual_price < est.current_price);
        assert_relative_eq!(
            est.estimated_price,
            est.current_price * (1.0 + est.estimated_change)
        );
        assert_relative_eq!(est.error, est.estimated_change - est.actual_change);
        // Second-order estimate within a few basis points of the truth
        assert!(est.error.abs() < 0.001);
    }

    #[test]
    fn test_duration_only_underestimates_price() {
        // Convex price curve: the tangent line lies below it in both directions
        for shift in [-0.02, 0.02] {
            let est = estimate_price_change(&bond(), 0.06, shift, false).unwrap();
            assert_eq!(est.convexity_effect, 0.0);
            assert!(est.error < 0.0);
        }
    }

    #[test]
    fn test_zero_shift() {
        let est = estimate_price_change(&bond(), 0.06, 0.0, true).unwrap();
        assert_eq!(est.estimated_change, 0.0);
        assert_relative_eq!(est.actual_change, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_matured_summary() {
        let matured = BondParams::new(500.0, 0.05, 0.1, Frequency::Quarterly).unwrap();
        let summary = analyze(&matured, 0.05).unwrap();

        assert_eq!(summary.price, 500.0);
        assert_eq!(summary.dv01, 0.0);

        let est = estimate_price_change(&matured, 0.05, 0.01, true).unwrap();
        assert_eq!(est.actual_price, 500.0);
        assert_eq!(est.error, 0.0);
    }

    #[test]
    fn test_shift_beyond_domain_rejected() {
        assert!(estimate_price_change(&bond(), 0.06, -5.0, true).is_err());
        assert!(estimate_price_change(&bond(), 0.06, f64::NAN, true).is_err());
    }

    #[test]
    fn test_unrepresentable_yield_rejected() {
        let monthly = BondParams::new(1000.0, 0.05, 30.0, Frequency::Monthly).unwrap();
        assert!(analyze(&monthly, -11.999_999).is_err());
        assert!(analyze(&bond(), 1e100).is_err());
        assert!(estimate_price_change(&bond(), 0.06, 1e100, false).is_err());
    }
}
