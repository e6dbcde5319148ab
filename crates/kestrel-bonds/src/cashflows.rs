//! Coupon schedule generation.

use crate::types::{BondParams, CashFlow};

/// Payments from period 1 to `total_periods`, with the face value added to
/// the last one.
///
/// A bond with no remaining period has an empty schedule.
///
/// # Example
///
/// ```rust
/// use kestrel_bonds::{cash_flow_schedule, BondParams, Frequency};
///
/// let bond = BondParams::new(100.0, 0.04, 2.0, Frequency::SemiAnnual).unwrap();
/// let flows = cash_flow_schedule(&bond);
///
/// assert_eq!(flows.len(), 4);
/// assert_eq!(flows[3].amount, 102.0);
/// assert_eq!(flows[3].time, 2.0);
/// ```
pub fn cash_flow_schedule(params: &BondParams) -> Vec<CashFlow> {
    cash_flows(params).collect()
}

/// Lazy form of [`cash_flow_schedule`].
pub(crate) fn cash_flows(params: &BondParams) -> impl Iterator<Item = CashFlow> {
    let n = params.total_periods();
    let m = params.periods_per_year();
    let coupon = params.coupon_payment();
    let face = params.face_value();

    (1..=n).map(move |period| CashFlow {
        period,
        time: f64::from(period) / m,
        amount: if period == n { coupon + face } else { coupon },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Frequency;
    use approx::assert_relative_eq;

    #[test]
    fn test_semi_annual_schedule() {
        let bond = BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap();
        let flows = cash_flow_schedule(&bond);

        assert_eq!(flows.len(), 20);
        assert_eq!(flows[0].period, 1);
        assert_relative_eq!(flows[0].time, 0.5);
        assert_relative_eq!(flows[0].amount, 25.0);
        assert_relative_eq!(flows[19].time, 10.0);
        assert_relative_eq!(flows[19].amount, 1025.0);

        let total: f64 = flows.iter().map(|cf| cf.amount).sum();
        assert_relative_eq!(total, 1500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fractional_maturity_truncates() {
        // 2.9 years annual → 2 periods
        let bond = BondParams::new(100.0, 0.05, 2.9, Frequency::Annual).unwrap();
        let flows = cash_flow_schedule(&bond);

        assert_eq!(flows.len(), 2);
        assert_relative_eq!(flows[1].amount, 105.0);
    }

    #[test]
    fn test_zero_coupon_single_flow() {
        let bond = BondParams::new(100.0, 0.0, 3.0, Frequency::Annual).unwrap();
        let flows = cash_flow_schedule(&bond);

        assert_eq!(flows.len(), 3);
        assert_eq!(flows[0].amount, 0.0);
        assert_eq!(flows[2].amount, 100.0);
    }

    #[test]
    fn test_matured_bond_has_no_flows() {
        let bond = BondParams::new(100.0, 0.05, 0.25, Frequency::SemiAnnual).unwrap();
        assert!(cash_flow_schedule(&bond).is_empty());
    }
}
