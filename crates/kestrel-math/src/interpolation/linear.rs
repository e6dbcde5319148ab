//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{Extrapolation, Interpolator};

/// Linear interpolation between data points.
///
/// The simplest form of interpolation, connecting consecutive points
/// with straight lines.
///
/// # Example
///
/// ```rust
/// use kestrel_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};
///
/// let xs = vec![1.0, 2.0, 3.0];
/// let ys = vec![1.0, 4.0, 9.0];
///
/// let interp = LinearInterpolator::new(xs, ys)
///     .unwrap()
///     .with_extrapolation(Extrapolation::Flat);
///
/// assert!((interp.interpolate(1.5).unwrap() - 2.5).abs() < 1e-12);
/// assert!((interp.interpolate(10.0).unwrap() - 9.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (must be strictly increasing)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// if any value is non-finite, or if `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("values must be finite"));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self {
            xs,
            ys,
            extrapolation: Extrapolation::None,
        })
    }

    /// Sets the behaviour outside the data range.
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// X coordinates.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Y coordinates.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Finds the index i such that xs[i] <= x < xs[i+1], clamped to a valid segment.
    fn find_segment(&self, x: f64) -> usize {
        let upper = self.xs.partition_point(|&xi| xi <= x);
        upper.saturating_sub(1).min(self.xs.len() - 2)
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if self.extrapolation == Extrapolation::None && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        Ok(())
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        if x.is_nan() {
            return Err(MathError::invalid_input("query point is NaN"));
        }
        self.check_range(x)?;

        let last = self.xs.len() - 1;
        if self.extrapolation == Extrapolation::Flat {
            if x <= self.xs[0] {
                return Ok(self.ys[0]);
            }
            if x >= self.xs[last] {
                return Ok(self.ys[last]);
            }
        }

        let i = self.find_segment(x);

        let x0 = self.xs[i];
        let x1 = self.xs[i + 1];
        let y0 = self.ys[i];
        let y1 = self.ys[i + 1];

        let t = (x - x0) / (x1 - x0);
        Ok(y0 + t * (y1 - y0))
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        if x.is_nan() {
            return Err(MathError::invalid_input("query point is NaN"));
        }
        self.check_range(x)?;

        if self.extrapolation == Extrapolation::Flat && !self.in_range(x) {
            return Ok(0.0);
        }

        let i = self.find_segment(x);
        Ok((self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i]))
    }

    fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
