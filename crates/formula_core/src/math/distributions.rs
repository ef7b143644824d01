//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function N(x)
//! - `norm_pdf`: Probability density function n(x)
//!
//! The CDF is evaluated through the complementary error function from
//! `libm` (within about one ulp), which keeps full relative precision in the
//! lower tail instead of cancelling against 1.

use libm::erfc;

/// 1 / sqrt(2 * pi)
pub const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal cumulative distribution function.
///
/// N(x) = (1/2)·erfc(−x/√2)
///
/// # Accuracy
/// Double precision near the centre; relative precision is preserved for
/// large negative `x`, and the result saturates at exactly `1.0` for large
/// positive `x`.
///
/// # Examples
/// ```
/// use formula_core::math::norm_cdf;
///
/// assert_eq!(norm_cdf(0.0), 0.5);
/// assert!((norm_cdf(1.0) - 0.841_344_746_068_542_9).abs() < 1e-15);
/// assert!(norm_cdf(-20.0) > 0.0);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Standard normal probability density function.
///
/// n(x) = (1/√(2π))·exp(−x²/2)
///
/// # Examples
/// ```
/// use formula_core::math::norm_pdf;
///
/// assert!((norm_pdf(0.0) - 0.398_942_280_401_432_7).abs() < 1e-16);
/// assert_eq!(norm_pdf(f64::INFINITY), 0.0);
/// ```
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // norm_cdf tests
    // ==========================================================

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_eq!(norm_cdf(0.0), 0.5);
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0), 0.841_344_746_068_542_9, max_relative = 1e-15);
        assert_relative_eq!(norm_cdf(-1.0), 0.158_655_253_931_457_05, max_relative = 1e-15);
        assert_relative_eq!(norm_cdf(2.0), 0.977_249_868_051_820_8, max_relative = 1e-15);
        assert_relative_eq!(norm_cdf(-2.0), 0.022_750_131_948_179_207, max_relative = 1e-14);
        assert_relative_eq!(norm_cdf(3.0), 0.998_650_101_968_369_9, max_relative = 1e-15);
    }

    #[test]
    fn test_norm_cdf_double_precision_near_centre() {
        assert_relative_eq!(norm_cdf(-0.5), 0.308_537_538_725_986_9, max_relative = 1e-15);
        assert_relative_eq!(norm_cdf(0.25), 0.598_706_325_682_923_7, max_relative = 1e-15);
        assert_relative_eq!(norm_cdf(0.5), 0.691_462_461_274_013_1, max_relative = 1e-15);
        assert_relative_eq!(norm_cdf(1.5), 0.933_192_798_731_142, max_relative = 1e-15);
    }

    #[test]
    fn test_norm_cdf_lower_tail_keeps_relative_precision() {
        // 1 - N(8) would round to zero; erfc does not
        assert_relative_eq!(norm_cdf(-8.0), 6.220_960_574_271_784e-16, max_relative = 1e-12);
        assert_relative_eq!(norm_cdf(-10.0), 7.619_853_024_160_526e-24, max_relative = 1e-12);
        assert_relative_eq!(norm_cdf(-20.0), 2.753_624_118_606_233_7e-89, max_relative = 1e-12);
    }

    #[test]
    fn test_norm_cdf_saturates() {
        assert_eq!(norm_cdf(40.0), 1.0);
        assert_eq!(norm_cdf(-40.0), 0.0);
        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        let test_values = [-3.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0];
        for x in test_values {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_cdf_monotonic() {
        let values: Vec<f64> = (-50..=50).map(|i| i as f64 * 0.1).collect();
        for pair in values.windows(2) {
            assert!(
                norm_cdf(pair[1]) > norm_cdf(pair[0]),
                "CDF not monotonic at x = {}",
                pair[0]
            );
        }
    }

    // ==========================================================
    // norm_pdf tests
    // ==========================================================

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0), 0.398_942_280_401_432_7, max_relative = 1e-15);
        assert_relative_eq!(norm_pdf(1.0), 0.241_970_724_519_143_35, max_relative = 1e-15);
        assert_relative_eq!(norm_pdf(-2.0), 0.053_990_966_513_188_05, max_relative = 1e-15);
        assert_relative_eq!(norm_pdf(3.0), 0.004_431_848_411_938_007, max_relative = 1e-14);
    }

    #[test]
    fn test_norm_pdf_tail_underflows_to_zero() {
        assert_eq!(norm_pdf(40.0), 0.0);
        assert!(norm_pdf(-37.0) > 0.0);
    }

    #[test]
    fn test_cdf_pdf_relationship() {
        let h = 1e-5;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let numerical_derivative = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numerical_derivative, norm_pdf(x), max_relative = 1e-8);
        }
    }
}
