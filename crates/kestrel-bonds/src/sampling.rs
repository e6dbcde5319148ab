//! Price/yield profile for charting.

use serde::{Deserialize, Serialize};

use kestrel_math::grid::SampleGrid;

use crate::error::BondResult;
use crate::pricing::{price_from_yield, unchecked_price};
use crate::types::BondParams;

/// Bond price at one yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceYieldPoint {
    /// Yield to maturity.
    pub yield_value: f64,
    /// Price at that yield.
    pub price: f64,
}

/// Prices the bond at every yield on the grid.
///
/// The iterator is lazy and `Clone`; each traversal reprices.
pub fn price_yield_profile(
    params: &BondParams,
    grid: &SampleGrid,
) -> BondResult<impl Iterator<Item = PriceYieldPoint> + Clone> {
    // Price is positive and decreasing in yield, so if both ends price
    // cleanly every point in between does too
    price_from_yield(params, grid.start())?;
    price_from_yield(params, grid.end())?;
    let params = *params;

    Ok(grid.points().map(move |yield_value| PriceYieldPoint {
        yield_value,
        price: unchecked_price(&params, yield_value),
    }))
}
