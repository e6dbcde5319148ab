//! Evenly spaced sampling grids.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// An inclusive, evenly spaced grid over `[start, end]`.
///
/// A grid with `steps` intervals has `steps + 1` points; the first is
/// exactly `start` and the last exactly `end`.
///
/// # Example
///
/// ```rust
/// use kestrel_math::grid::SampleGrid;
///
/// let grid = SampleGrid::new(80.0, 120.0, 4).unwrap();
/// let points: Vec<f64> = grid.points().collect();
/// assert_eq!(points, vec![80.0, 90.0, 100.0, 110.0, 120.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampleGrid")]
pub struct SampleGrid {
    start: f64,
    end: f64,
    steps: u32,
}

/// Unvalidated wire form of [`SampleGrid`].
#[derive(Deserialize)]
struct RawSampleGrid {
    start: f64,
    end: f64,
    steps: u32,
}

impl TryFrom<RawSampleGrid> for SampleGrid {
    type Error = MathError;

    fn try_from(raw: RawSampleGrid) -> MathResult<Self> {
        SampleGrid::new(raw.start, raw.end, raw.steps)
    }
}

impl SampleGrid {
    /// Creates a grid.
    ///
    /// # Errors
    ///
    /// Fails when either bound is non-finite, `end <= start`, or `steps == 0`.
    pub fn new(start: f64, end: f64, steps: u32) -> MathResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(MathError::invalid_input(format!(
                "grid bounds must be finite, got [{start}, {end}]"
            )));
        }
        if end <= start {
            return Err(MathError::invalid_input(format!(
                "grid end {end} must exceed start {start}"
            )));
        }
        if steps == 0 {
            return Err(MathError::invalid_input("grid needs at least one step"));
        }
        Ok(Self { start, end, steps })
    }

    /// First point.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Last point.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Number of intervals.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Distance between neighbouring points.
    pub fn spacing(&self) -> f64 {
        (self.end - self.start) / f64::from(self.steps)
    }

    /// Number of points (`steps + 1`).
    pub fn len(&self) -> usize {
        self.steps as usize + 1
    }

    /// Always false; a valid grid has at least two points.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the grid points in increasing order.
    ///
    /// The iterator is `Clone`, so a sequence can be replayed.
    pub fn points(&self) -> impl Iterator<Item = f64> + Clone {
        let Self { start, end, steps } = *self;
        (0..=steps).map(move |i| {
            if i == steps {
                end
            } else {
                start + (end - start) * f64::from(i) / f64::from(steps)
            }
        })
    }
}
