//! Standard normal distribution
//!
//! CDF is evaluated through the complementary error function so both tails
//! keep full relative precision in the lower tail.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x == f64::INFINITY {
        return 1.0;
    }
    if x == f64::NEG_INFINITY {
        return 0.0;
    }
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    if x.is_infinite() {
        return 0.0;
    }
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf() {
        assert_relative_eq!(norm_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(norm_cdf(1.96), 0.975_002_104_851_780, max_relative = 1e-9);
        assert_relative_eq!(norm_cdf(-1.96), 0.024_997_895_148_220, max_relative = 1e-9);
        assert_relative_eq!(norm_cdf(1.0), 0.841_344_746_068_543, max_relative = 1e-9);
    }

    #[test]
    fn test_norm_cdf_tails() {
        // Far lower tail keeps relative accuracy: Φ(-8) ≈ 6.22e-16
        assert_relative_eq!(norm_cdf(-8.0), 6.220_960_574_271_78e-16, max_relative = 1e-9);
        assert_eq!(norm_cdf(40.0), 1.0);
        assert!(norm_cdf(-40.0) >= 0.0);
        assert_eq!(norm_cdf(f64::INFINITY), 1.0);
        assert_eq!(norm_cdf(f64::NEG_INFINITY), 0.0);
        assert!(norm_cdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for &x in &[0.1, 0.5, 1.3, 2.7, 4.2, 7.5] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_pdf() {
        assert_relative_eq!(norm_pdf(0.0), 0.398_942_280_401_432_7, max_relative = 1e-15);
        assert_relative_eq!(norm_pdf(1.0), norm_pdf(-1.0));
        assert_eq!(norm_pdf(1e200), 0.0);
        assert_eq!(norm_pdf(f64::NEG_INFINITY), 0.0);
    }
}
