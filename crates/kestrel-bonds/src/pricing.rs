//! Bond price from yield.
//!
//! With `n = floor(N·m)` periods, coupon `C = F·c/m` and periodic yield
//! `i = y/m`:
//!
//! ```text
//! P = Σ_{t=1}^{n} C / (1+i)^t + F / (1+i)^n
//! ```
//!
//! A bond with no remaining period is worth its face value.

use crate::cashflows::cash_flows;
use crate::error::{BondError, BondResult};
use crate::types::{check_finite, check_yield, BondParams};

/// Discounted cash-flow sums shared by price, duration and convexity.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Discounted {
    /// Σ PV_t
    pub price: f64,
    /// Σ t·PV_t, t in periods
    pub time_weighted: f64,
    /// Σ t·(t+1)·PV_t, t in periods
    pub convexity_weighted: f64,
}

/// Discounts every cash flow once. Callers must have validated `ytm`.
///
/// Fails when the sums over- or underflow, which happens for yields just
/// above `-m` or astronomically large ones.
pub(crate) fn discount(params: &BondParams, ytm: f64) -> BondResult<Discounted> {
    let base = 1.0 + ytm / params.periods_per_year();

    let sums = cash_flows(params).fold(Discounted::default(), |mut acc, cf| {
        let t = f64::from(cf.period);
        let pv = cf.amount / base.powi(cf.period as i32);
        acc.price += pv;
        acc.time_weighted += t * pv;
        acc.convexity_weighted += t * (t + 1.0) * pv;
        acc
    });

    let representable = sums.price > 0.0
        && sums.price.is_finite()
        && sums.time_weighted.is_finite()
        && sums.convexity_weighted.is_finite();
    if !representable {
        return Err(BondError::invalid_input(
            "yield",
            ytm,
            format!("discounted price {} is not a positive finite number", sums.price),
        ));
    }
    Ok(sums)
}

/// Price for a given yield to maturity.
///
/// # Example
///
/// ```rust
/// use kestrel_bonds::{price_from_yield, BondParams, Frequency};
///
/// let bond = BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap();
///
/// // Priced at its coupon rate the bond trades at par
/// let par = price_from_yield(&bond, 0.05).unwrap();
/// assert!((par - 1000.0).abs() < 1e-9);
/// ```
pub fn price_from_yield(params: &BondParams, ytm: f64) -> BondResult<f64> {
    check_yield(params, ytm)?;
    if params.is_matured() {
        return Ok(params.face_value());
    }
    Ok(discount(params, ytm)?.price)
}

/// Price without validating `ytm`, for solver objectives that must stay
/// total. Overflow shows up as an infinite or zero price.
pub(crate) fn unchecked_price(params: &BondParams, ytm: f64) -> f64 {
    if params.is_matured() {
        return params.face_value();
    }
    let base = 1.0 + ytm / params.periods_per_year();
    cash_flows(params)
        .map(|cf| cf.amount / base.powi(cf.period as i32))
        .sum()
}

/// Annual coupon divided by price.
pub fn current_yield(params: &BondParams, price: f64) -> BondResult<f64> {
    check_finite("price", price)?;
    if price <= 0.0 {
        return Err(BondError::invalid_input("price", price, "must be positive"));
    }
    Ok(params.annual_coupon() / price)
}
