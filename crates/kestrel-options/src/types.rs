//! Option contract and result value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OptionError, OptionResult};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionKind {
    /// +1 for calls, -1 for puts.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            OptionKind::Call => 1.0,
            OptionKind::Put => -1.0,
        }
    }

    /// Returns true for a call.
    #[must_use]
    pub fn is_call(self) -> bool {
        matches!(self, OptionKind::Call)
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionKind::Call => "Call",
            OptionKind::Put => "Put",
        };
        write!(f, "{name}")
    }
}

/// Parameters of a European option under Black-Scholes.
///
/// Constructed through [`OptionParams::new`], which rejects any input that
/// would make the pricing formulas divide by zero or produce NaN.
///
/// # Example
///
/// ```rust
/// use kestrel_options::{OptionKind, OptionParams};
///
/// let params = OptionParams::new(100.0, 105.0, 0.25, 0.05, 0.2, OptionKind::Call).unwrap();
/// assert_eq!(params.strike(), 105.0);
///
/// assert!(OptionParams::new(100.0, 105.0, 0.25, 0.05, 0.0, OptionKind::Call).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOptionParams")]
pub struct OptionParams {
    spot: f64,
    strike: f64,
    time_to_maturity: f64,
    rate: f64,
    volatility: f64,
    kind: OptionKind,
}

/// Unvalidated wire form of [`OptionParams`].
#[derive(Deserialize)]
struct RawOptionParams {
    spot: f64,
    strike: f64,
    time_to_maturity: f64,
    rate: f64,
    volatility: f64,
    kind: OptionKind,
}

impl TryFrom<RawOptionParams> for OptionParams {
    type Error = OptionError;

    fn try_from(raw: RawOptionParams) -> OptionResult<Self> {
        OptionParams::new(
            raw.spot,
            raw.strike,
            raw.time_to_maturity,
            raw.rate,
            raw.volatility,
            raw.kind,
        )
    }
}

impl OptionParams {
    /// Creates validated option parameters.
    ///
    /// # Arguments
    ///
    /// * `spot` - Underlying price S (> 0)
    /// * `strike` - Strike K (> 0)
    /// * `time_to_maturity` - T in years (>= 0)
    /// * `rate` - Continuously compounded risk-free rate r (any finite value)
    /// * `volatility` - Annualized volatility σ (> 0)
    /// * `kind` - Call or put
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        rate: f64,
        volatility: f64,
        kind: OptionKind,
    ) -> OptionResult<Self> {
        check_positive("spot", spot)?;
        check_positive("strike", strike)?;
        check_time("time_to_maturity", time_to_maturity)?;
        check_finite("rate", rate)?;
        check_positive("volatility", volatility)?;

        Ok(Self {
            spot,
            strike,
            time_to_maturity,
            rate,
            volatility,
            kind,
        })
    }

    /// Underlying price.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity in years.
    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    /// Risk-free rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Volatility.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Call or put.
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Returns true once the option has expired (T = 0).
    pub fn is_expired(&self) -> bool {
        self.time_to_maturity == 0.0
    }

    /// Copy with a different underlying price.
    pub fn with_spot(&self, spot: f64) -> OptionResult<Self> {
        check_positive("spot", spot)?;
        Ok(self.at_spot(spot))
    }

    /// Copy with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> OptionResult<Self> {
        check_positive("volatility", volatility)?;
        Ok(self.at_volatility(volatility))
    }

    /// Copy with a different time to maturity.
    pub fn with_time_to_maturity(&self, time_to_maturity: f64) -> OptionResult<Self> {
        check_time("time_to_maturity", time_to_maturity)?;
        Ok(Self {
            time_to_maturity,
            ..*self
        })
    }

    /// Copy with a different option kind.
    pub fn with_kind(&self, kind: OptionKind) -> Self {
        Self { kind, ..*self }
    }

    // Callers must have checked `spot > 0`.
    pub(crate) fn at_spot(&self, spot: f64) -> Self {
        Self { spot, ..*self }
    }

    // Callers must have checked `volatility > 0`.
    pub(crate) fn at_volatility(&self, volatility: f64) -> Self {
        Self {
            volatility,
            ..*self
        }
    }
}

pub(crate) fn check_finite(field: &str, value: f64) -> OptionResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OptionError::invalid_input(field, value, "must be finite"))
    }
}

pub(crate) fn check_positive(field: &str, value: f64) -> OptionResult<()> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(OptionError::invalid_input(field, value, "must be positive"))
    }
}

fn check_time(field: &str, value: f64) -> OptionResult<()> {
    check_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(OptionError::invalid_input(field, value, "must not be negative"))
    }
}

/// First-order and second-order price sensitivities.
///
/// `vega` and `rho` are per unit change (multiply by 0.01 for a one-point
/// move); `theta` is per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t per calendar day
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

/// Price, Greeks and the intermediate normal arguments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackScholesResult {
    /// Option value.
    pub price: f64,
    /// Sensitivities.
    pub greeks: Greeks,
    /// d1, absent at expiry.
    pub d1: Option<f64>,
    /// d2, absent at expiry.
    pub d2: Option<f64>,
}
