//! Interpolation methods for yield curve construction.
//!
//! Only piecewise-linear interpolation is provided; what happens outside the
//! data range is chosen with [`Extrapolation`]:
//!
//! | Mode | Below first point | Above last point |
//! |------|-------------------|------------------|
//! | `None` | error | error |
//! | `Flat` | first value | last value |
//! | `Linear` | first segment extended | last segment extended |

mod linear;

pub use linear::LinearInterpolator;

use serde::{Deserialize, Serialize};

use crate::error::MathResult;

/// Behaviour of an interpolator outside its data range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    /// Queries outside the range fail.
    #[default]
    None,
    /// Constant continuation of the nearest end value.
    Flat,
    /// Continuation of the nearest segment's slope.
    Linear,
}

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns the extrapolation mode.
    fn extrapolation(&self) -> Extrapolation {
        Extrapolation::None
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_yield_curve_construction() {
        let maturities = vec![0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 20.0, 30.0];
        let zero_rates = vec![
            0.0200, 0.0210, 0.0225, 0.0250, 0.0275, 0.0310, 0.0340, 0.0370, 0.0400, 0.0410,
        ];

        let linear = LinearInterpolator::new(maturities, zero_rates)
            .unwrap()
            .with_extrapolation(Extrapolation::Flat);

        // Between 3Y and 5Y pillars
        let z = linear.interpolate(4.0).unwrap();
        assert!(z > 0.0275 && z < 0.0310);
        assert_relative_eq!(z, 0.02925, epsilon = 1e-12);

        // Flat beyond both ends
        assert_relative_eq!(linear.interpolate(0.0).unwrap(), 0.0200);
        assert_relative_eq!(linear.interpolate(50.0).unwrap(), 0.0410);
    }
}
