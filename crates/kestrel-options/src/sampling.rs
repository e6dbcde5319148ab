//! Chart data: option value and Greeks across a range of underlying prices.
//!
//! The series are lazy iterators recomputed on every traversal. They are
//! `Clone`, so the same sequence can be replayed without re-validating
//! inputs.

use serde::{Deserialize, Serialize};

use kestrel_math::grid::SampleGrid;

use crate::error::{OptionError, OptionResult};
use crate::greeks::greeks;
use crate::pricing::{intrinsic_value, price};
use crate::types::{Greeks, OptionParams};

/// Option value at one underlying price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Underlying price.
    pub spot: f64,
    /// Black-Scholes value.
    pub price: f64,
    /// Payoff if exercised now.
    pub intrinsic: f64,
}

/// Greeks at one underlying price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreeksPoint {
    /// Underlying price.
    pub spot: f64,
    /// Sensitivities at `spot`.
    pub greeks: Greeks,
}

fn check_spot_grid(grid: &SampleGrid) -> OptionResult<()> {
    if grid.start() > 0.0 {
        Ok(())
    } else {
        Err(OptionError::invalid_input(
            "grid.start",
            grid.start(),
            "spot range must be positive",
        ))
    }
}

/// Option value over the spot grid, keeping every other parameter fixed.
///
/// # Example
///
/// ```rust
/// use kestrel_math::grid::SampleGrid;
/// use kestrel_options::{price_vs_spot, OptionKind, OptionParams};
///
/// let params = OptionParams::new(100.0, 100.0, 0.5, 0.03, 0.25, OptionKind::Put).unwrap();
/// let grid = SampleGrid::new(50.0, 150.0, 20).unwrap();
///
/// let series: Vec<_> = price_vs_spot(&params, &grid).unwrap().collect();
/// assert_eq!(series.len(), 21);
/// ```
pub fn price_vs_spot(
    params: &OptionParams,
    grid: &SampleGrid,
) -> OptionResult<impl Iterator<Item = PricePoint> + Clone> {
    check_spot_grid(grid)?;
    let params = *params;

    Ok(grid.points().map(move |spot| {
        let shifted = params.at_spot(spot);
        PricePoint {
            spot,
            price: price(&shifted),
            intrinsic: intrinsic_value(spot, params.strike(), params.kind()),
        }
    }))
}

/// Greeks over the spot grid, keeping every other parameter fixed.
pub fn greeks_vs_spot(
    params: &OptionParams,
    grid: &SampleGrid,
) -> OptionResult<impl Iterator<Item = GreeksPoint> + Clone> {
    check_spot_grid(grid)?;
    let params = *params;

    Ok(grid.points().map(move |spot| GreeksPoint {
        spot,
        greeks: greeks(&params.at_spot(spot)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OptionKind;
    use approx::assert_relative_eq;

    fn params() -> OptionParams {
        OptionParams::new(100.0, 100.0, 0.5, 0.03, 0.25, OptionKind::Call).unwrap()
    }

    #[test]
    fn test_price_series() {
        let grid = SampleGrid::new(60.0, 140.0, 8).unwrap();
        let series: Vec<PricePoint> = price_vs_spot(&params(), &grid).unwrap().collect();

        assert_eq!(series.len(), 9);
        assert_relative_eq!(series[0].spot, 60.0);
        assert_relative_eq!(series[8].spot, 140.0);
        assert_relative_eq!(series[4].spot, 100.0);

        // Call value rises with spot and never falls below intrinsic
        assert!(series.windows(2).all(|w| w[1].price > w[0].price));
        assert!(series.iter().all(|p| p.price >= p.intrinsic - 1e-12));
        assert_relative_eq!(series[8].intrinsic, 40.0);
    }

    #[test]
    fn test_series_replays_identically() {
        let grid = SampleGrid::new(80.0, 120.0, 10).unwrap();
        let series = greeks_vs_spot(&params(), &grid).unwrap();

        let first: Vec<GreeksPoint> = series.clone().collect();
        let second: Vec<GreeksPoint> = series.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_greeks_series_matches_pointwise() {
        let grid = SampleGrid::new(90.0, 110.0, 4).unwrap();
        for point in greeks_vs_spot(&params(), &grid).unwrap() {
            let expected = greeks(&params().with_spot(point.spot).unwrap());
            assert_eq!(point.greeks, expected);
        }
    }

    #[test]
    fn test_expired_series_is_payoff() {
        let expired = params().with_time_to_maturity(0.0).unwrap();
        let grid = SampleGrid::new(90.0, 110.0, 2).unwrap();
        let series: Vec<PricePoint> = price_vs_spot(&expired, &grid).unwrap().collect();

        assert_eq!(series[0].price, 0.0);
        assert_eq!(series[2].price, 10.0);
    }

    #[test]
    fn test_non_positive_spot_range_rejected() {
        let grid = SampleGrid::new(-10.0, 100.0, 10).unwrap();
        assert!(price_vs_spot(&params(), &grid).is_err());
        assert!(greeks_vs_spot(&params(), &grid).is_err());
    }
}
