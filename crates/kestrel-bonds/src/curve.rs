//! Spot yield curve with linear interpolation and implied forward rates.
//!
//! Yields are annually compounded. Between pillars the curve is linear in
//! maturity; beyond the first or last pillar it is flat.
//!
//! The forward rate between `t1` and `t2` follows from
//! `(1+y2)^t2 = (1+y1)^t1 · (1+f)^(t2−t1)`.
//!
//! # Example
//!
//! ```rust
//! use kestrel_bonds::YieldCurve;
//!
//! let curve = YieldCurve::reference().unwrap();
//!
//! assert!((curve.interpolate_yield(1.5).unwrap() - 0.0465).abs() < 1e-12);
//! let forward = curve.forward_rate(1.0, 2.0).unwrap();
//! assert!(forward > 0.048);
//! ```

use log::trace;
use serde::{Deserialize, Serialize};

use kestrel_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};

use crate::error::{BondError, BondResult};
use crate::types::check_finite;

/// Pillars of the sample curve: (maturity in years, yield).
const REFERENCE_PILLARS: [(f64, f64); 10] = [
    (0.25, 0.0430),
    (0.5, 0.0440),
    (1.0, 0.0450),
    (2.0, 0.0480),
    (3.0, 0.0490),
    (5.0, 0.0500),
    (7.0, 0.0510),
    (10.0, 0.0520),
    (20.0, 0.0540),
    (30.0, 0.0550),
];

/// An interpolated spot yield curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurvePoints", into = "CurvePoints")]
pub struct YieldCurve {
    interpolator: LinearInterpolator,
}

/// Wire form of a [`YieldCurve`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CurvePoints {
    maturities: Vec<f64>,
    yields: Vec<f64>,
}

impl TryFrom<CurvePoints> for YieldCurve {
    type Error = BondError;

    fn try_from(points: CurvePoints) -> BondResult<Self> {
        YieldCurve::new(points.maturities, points.yields)
    }
}

impl From<YieldCurve> for CurvePoints {
    fn from(curve: YieldCurve) -> Self {
        Self {
            maturities: curve.maturities().to_vec(),
            yields: curve.yields().to_vec(),
        }
    }
}

/// Forward rate between two maturities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForwardRate {
    /// Start of the forward period in years.
    pub start: f64,
    /// End of the forward period in years.
    pub end: f64,
    /// Annually compounded forward rate.
    pub rate: f64,
}

impl YieldCurve {
    /// Builds a curve from parallel maturity and yield lists.
    ///
    /// # Errors
    ///
    /// Fails unless there are at least two points, the lists have equal
    /// length, every value is finite, maturities are non-negative and
    /// strictly increasing, and every yield exceeds −100%.
    pub fn new(maturities: Vec<f64>, yields: Vec<f64>) -> BondResult<Self> {
        if maturities.len() != yields.len() {
            return Err(BondError::invalid_input(
                "yields",
                yields.len() as f64,
                format!("expected {} yields, one per maturity", maturities.len()),
            ));
        }
        if maturities.len() < 2 {
            return Err(BondError::invalid_input(
                "maturities",
                maturities.len() as f64,
                "a curve needs at least two points",
            ));
        }
        for (&t, &y) in maturities.iter().zip(&yields) {
            check_finite("maturity", t)?;
            check_finite("yield", y)?;
            if t < 0.0 {
                return Err(BondError::invalid_input("maturity", t, "must not be negative"));
            }
            if y <= -1.0 {
                return Err(BondError::invalid_input("yield", y, "must exceed -100%"));
            }
        }
        if let Some(w) = maturities.windows(2).find(|w| w[1] <= w[0]) {
            return Err(BondError::invalid_input(
                "maturity",
                w[1],
                format!("maturities must be strictly increasing (follows {})", w[0]),
            ));
        }

        let interpolator =
            LinearInterpolator::new(maturities, yields)?.with_extrapolation(Extrapolation::Flat);
        Ok(Self { interpolator })
    }

    /// The fixed sample curve from 3 months (4.30%) to 30 years (5.50%).
    ///
    /// Built through [`YieldCurve::new`], so the pillar table passes the same
    /// checks as user input.
    pub fn reference() -> BondResult<Self> {
        let (maturities, yields): (Vec<f64>, Vec<f64>) = REFERENCE_PILLARS.iter().copied().unzip();
        Self::new(maturities, yields)
    }

    /// Pillar maturities.
    pub fn maturities(&self) -> &[f64] {
        self.interpolator.xs()
    }

    /// Pillar yields.
    pub fn yields(&self) -> &[f64] {
        self.interpolator.ys()
    }

    /// Number of pillars.
    pub fn len(&self) -> usize {
        self.maturities().len()
    }

    /// Always false; a curve has at least two pillars.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Spot yield at `maturity`.
    pub fn interpolate_yield(&self, maturity: f64) -> BondResult<f64> {
        check_maturity("maturity", maturity)?;
        Ok(self.interpolator.interpolate(maturity)?)
    }

    /// Forward rate from `t1` to `t2`.
    pub fn forward_rate(&self, t1: f64, t2: f64) -> BondResult<f64> {
        check_maturity("t1", t1)?;
        check_maturity("t2", t2)?;
        if t2 <= t1 {
            return Err(BondError::invalid_input(
                "t2",
                t2,
                format!("must be later than t1 = {t1}"),
            ));
        }

        let y1 = self.interpolator.interpolate(t1)?;
        let y2 = self.interpolator.interpolate(t2)?;
        let growth = (1.0 + y2).powf(t2) / (1.0 + y1).powf(t1);
        let forward = growth.powf(1.0 / (t2 - t1)) - 1.0;

        trace!("forward {t1}y→{t2}y: y1 = {y1}, y2 = {y2}, f = {forward}");
        Ok(forward)
    }

    /// Forwards between each pair of consecutive pillars.
    pub fn forward_curve(&self) -> BondResult<Vec<ForwardRate>> {
        self.maturities()
            .windows(2)
            .map(|w| {
                Ok(ForwardRate {
                    start: w[0],
                    end: w[1],
                    rate: self.forward_rate(w[0], w[1])?,
                })
            })
            .collect()
    }
}

fn check_maturity(field: &str, t: f64) -> BondResult<()> {
    check_finite(field, t)?;
    if t < 0.0 {
        return Err(BondError::invalid_input(field, t, "must not be negative"));
    }
    Ok(())
}
