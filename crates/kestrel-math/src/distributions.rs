//! Standard normal distribution.
//!
//! `Φ` is evaluated through the complementary error function,
//! `Φ(x) = ½·erfc(−x/√2)`, which keeps full relative precision in the
//! lower tail where `1 + erf(x/√2)` would cancel.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

/// Standard normal cumulative distribution function `Φ(x)`.
///
/// # Example
///
/// ```rust
/// use kestrel_math::distributions::normal_cdf;
///
/// assert!((normal_cdf(0.0) - 0.5).abs() < 1e-15);
/// ```
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal probability density function `φ(x)`.
#[inline]
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cdf_reference_values() {
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        // erfc is accurate to roughly 1e-11
        assert_relative_eq!(normal_cdf(1.0), 0.841_344_746_068_543, epsilon = 1e-10);
        assert_relative_eq!(normal_cdf(-1.96), 0.024_997_895_148_220, epsilon = 1e-10);
        assert_relative_eq!(normal_cdf(3.0), 0.998_650_101_968_370, epsilon = 1e-10);
    }

    #[test]
    fn test_cdf_symmetry() {
        for x in [0.1, 0.5, 1.3, 2.7, 4.0] {
            assert_relative_eq!(normal_cdf(x) + normal_cdf(-x), 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_cdf_tails() {
        assert!(normal_cdf(-40.0) >= 0.0);
        assert!(normal_cdf(-10.0) > 0.0);
        assert_relative_eq!(normal_cdf(40.0), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_pdf_reference_values() {
        assert_relative_eq!(normal_pdf(0.0), 0.398_942_280_401_433, epsilon = 1e-14);
        assert_relative_eq!(normal_pdf(1.0), 0.241_970_724_519_143, epsilon = 1e-14);
        assert_relative_eq!(normal_pdf(-1.0), normal_pdf(1.0), epsilon = 1e-15);
    }

    #[test]
    fn test_pdf_is_cdf_derivative() {
        let h = 1e-6;
        for x in [-2.0, -0.5, 0.0, 0.75, 1.8] {
            let numerical = (normal_cdf(x + h) - normal_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(normal_pdf(x), numerical, epsilon = 1e-8);
        }
    }
}
