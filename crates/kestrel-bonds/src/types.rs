//! Bond specification and cash-flow value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};

/// Coupon payment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - most common for US bonds
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }
}

impl TryFrom<u32> for Frequency {
    type Error = BondError;

    fn try_from(periods: u32) -> BondResult<Self> {
        match periods {
            1 => Ok(Frequency::Annual),
            2 => Ok(Frequency::SemiAnnual),
            4 => Ok(Frequency::Quarterly),
            12 => Ok(Frequency::Monthly),
            other => Err(BondError::invalid_input(
                "frequency",
                f64::from(other),
                "payments per year must be 1, 2, 4 or 12",
            )),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

/// A plain fixed-coupon bullet bond.
///
/// # Example
///
/// ```rust
/// use kestrel_bonds::{BondParams, Frequency};
///
/// let bond = BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap();
/// assert_eq!(bond.total_periods(), 20);
/// assert_eq!(bond.coupon_payment(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBondParams")]
pub struct BondParams {
    face_value: f64,
    coupon_rate: f64,
    years_to_maturity: f64,
    frequency: Frequency,
}

#[derive(Deserialize)]
struct RawBondParams {
    face_value: f64,
    coupon_rate: f64,
    years_to_maturity: f64,
    #[serde(default)]
    frequency: Frequency,
}

impl TryFrom<RawBondParams> for BondParams {
    type Error = BondError;

    fn try_from(raw: RawBondParams) -> BondResult<Self> {
        BondParams::new(
            raw.face_value,
            raw.coupon_rate,
            raw.years_to_maturity,
            raw.frequency,
        )
    }
}

impl BondParams {
    /// Creates a validated bond.
    ///
    /// # Arguments
    ///
    /// * `face_value` - Redemption amount F (> 0)
    /// * `coupon_rate` - Annual coupon rate c as a decimal (>= 0)
    /// * `years_to_maturity` - N (> 0)
    /// * `frequency` - Coupon payments per year
    pub fn new(
        face_value: f64,
        coupon_rate: f64,
        years_to_maturity: f64,
        frequency: Frequency,
    ) -> BondResult<Self> {
        check_finite("face_value", face_value)?;
        if face_value <= 0.0 {
            return Err(BondError::invalid_input(
                "face_value",
                face_value,
                "must be positive",
            ));
        }
        check_finite("coupon_rate", coupon_rate)?;
        if coupon_rate < 0.0 {
            return Err(BondError::invalid_input(
                "coupon_rate",
                coupon_rate,
                "must not be negative",
            ));
        }
        check_finite("years_to_maturity", years_to_maturity)?;
        if years_to_maturity <= 0.0 {
            return Err(BondError::invalid_input(
                "years_to_maturity",
                years_to_maturity,
                "must be positive",
            ));
        }

        Ok(Self {
            face_value,
            coupon_rate,
            years_to_maturity,
            frequency,
        })
    }

    /// Face (redemption) value.
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Annual coupon rate.
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Years to maturity.
    pub fn years_to_maturity(&self) -> f64 {
        self.years_to_maturity
    }

    /// Coupon frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Payments per year as a float.
    pub fn periods_per_year(&self) -> f64 {
        f64::from(self.frequency.periods_per_year())
    }

    /// Number of remaining coupon periods, `floor(N·m)`.
    pub fn total_periods(&self) -> u32 {
        let periods = (self.years_to_maturity * self.periods_per_year()).floor();
        if periods >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            periods as u32
        }
    }

    /// Coupon paid each period, `F·c/m`.
    pub fn coupon_payment(&self) -> f64 {
        self.face_value * self.coupon_rate / self.periods_per_year()
    }

    /// Annual coupon income, `F·c`.
    pub fn annual_coupon(&self) -> f64 {
        self.face_value * self.coupon_rate
    }

    /// True when no coupon period remains (N·m < 1).
    pub fn is_matured(&self) -> bool {
        self.total_periods() == 0
    }
}

pub(crate) fn check_finite(field: &str, value: f64) -> BondResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BondError::invalid_input(field, value, "must be finite"))
    }
}

/// Checks that `1 + y/m` stays positive.
pub(crate) fn check_yield(params: &BondParams, ytm: f64) -> BondResult<()> {
    check_finite("yield", ytm)?;
    if ytm <= -params.periods_per_year() {
        return Err(BondError::invalid_input(
            "yield",
            ytm,
            "periodic yield must exceed -100%",
        ));
    }
    Ok(())
}

/// One scheduled payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Coupon period, starting at 1.
    pub period: u32,
    /// Time of payment in years.
    pub time: f64,
    /// Amount paid (coupon, plus face value on the final period).
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_conversion() {
        assert_eq!(Frequency::try_from(2).unwrap(), Frequency::SemiAnnual);
        assert_eq!(Frequency::try_from(12).unwrap().periods_per_year(), 12);
        assert!(Frequency::try_from(0).is_err());
        assert!(Frequency::try_from(3).is_err());
        assert_eq!(Frequency::Quarterly.to_string(), "Quarterly");
    }

    #[test]
    fn test_periods() {
        let bond = BondParams::new(1000.0, 0.06, 7.3, Frequency::Quarterly).unwrap();
        assert_eq!(bond.total_periods(), 29);
        assert!((bond.coupon_payment() - 15.0).abs() < 1e-12);
        assert!((bond.annual_coupon() - 60.0).abs() < 1e-12);

        let short = BondParams::new(100.0, 0.05, 0.4, Frequency::Annual).unwrap();
        assert_eq!(short.total_periods(), 0);
        assert!(short.is_matured());
    }

    #[test]
    fn test_validation() {
        let m = Frequency::Annual;
        assert!(BondParams::new(0.0, 0.05, 10.0, m).is_err());
        assert!(BondParams::new(100.0, -0.01, 10.0, m).is_err());
        assert!(BondParams::new(100.0, 0.05, 0.0, m).is_err());
        assert!(BondParams::new(100.0, f64::NAN, 10.0, m).is_err());
        assert!(BondParams::new(100.0, 0.0, 10.0, m).is_ok());
    }

    #[test]
    fn test_yield_domain() {
        let bond = BondParams::new(100.0, 0.05, 5.0, Frequency::SemiAnnual).unwrap();
        assert!(check_yield(&bond, -0.01).is_ok());
        assert!(check_yield(&bond, -2.0).is_err());
        assert!(check_yield(&bond, f64::INFINITY).is_err());
    }

    #[test]
    fn test_serde_defaults_frequency() {
        let bond: BondParams = serde_json::from_str(
            r#"{"face_value": 1000.0, "coupon_rate": 0.05, "years_to_maturity": 10.0}"#,
        )
        .unwrap();
        assert_eq!(bond.frequency(), Frequency::SemiAnnual);

        let bad = r#"{"face_value": -1.0, "coupon_rate": 0.05, "years_to_maturity": 10.0}"#;
        assert!(serde_json::from_str::<BondParams>(bad).is_err());
    }
}
