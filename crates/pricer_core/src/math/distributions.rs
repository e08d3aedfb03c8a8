//! Standard normal distribution functions.
//!
//! - `norm_cdf`: Φ(x), from the kernel's [`erfc`]
//! - `norm_pdf`: φ(x)
//! - `norm_inv_cdf`: Φ⁻¹(p), Acklam's rational approximation refined by one
//!   Halley step against `norm_cdf`
//!
//! `norm_cdf` and `norm_pdf` are generic over `T: Float`.

use num_traits::Float;

use super::special::erfc;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2π)
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½ erfc(-x / √2), accurate to about 1e-7.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(std::f64::consts::SQRT_2).unwrap();
    let half = T::from(0.5).unwrap();
    half * erfc(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// φ(x) = exp(-x² / 2) / √(2π)
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();
    frac_1_sqrt_2pi * (-half * x * x).exp()
}

const ACKLAM_A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_69e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];

const ACKLAM_B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];

const ACKLAM_C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];

const ACKLAM_D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

/// Break-point between the tail and central approximations.
const P_LOW: f64 = 0.02425;

fn acklam_tail(q: f64) -> f64 {
    let [c0, c1, c2, c3, c4, c5] = ACKLAM_C;
    let [d0, d1, d2, d3] = ACKLAM_D;
    (((((c0 * q + c1) * q + c2) * q + c3) * q + c4) * q + c5)
        / ((((d0 * q + d1) * q + d2) * q + d3) * q + 1.0)
}

/// Inverse standard normal CDF (quantile function).
///
/// Returns `-∞` for `p <= 0`, `+∞` for `p >= 1` and `NaN` for `NaN`.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::{norm_cdf, norm_inv_cdf};
///
/// let z = norm_inv_cdf(0.95);
/// assert!((z - 1.6448536).abs() < 1e-5);
/// assert!((norm_cdf(z) - 0.95).abs() < 1e-8);
/// ```
pub fn norm_inv_cdf(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let x = if p < P_LOW {
        acklam_tail((-2.0 * p.ln()).sqrt())
    } else if p > 1.0 - P_LOW {
        -acklam_tail((-2.0 * (1.0 - p).ln()).sqrt())
    } else {
        let [a0, a1, a2, a3, a4, a5] = ACKLAM_A;
        let [b0, b1, b2, b3, b4] = ACKLAM_B;
        let q = p - 0.5;
        let r = q * q;
        (((((a0 * r + a1) * r + a2) * r + a3) * r + a4) * r + a5) * q
            / (((((b0 * r + b1) * r + b2) * r + b3) * r + b4) * r + 1.0)
    };

    // Halley refinement against norm_cdf keeps Φ(Φ⁻¹(p)) ≈ p
    let e = norm_cdf(x) - p;
    let u = e * SQRT_2PI * (0.5 * x * x).exp();
    x - u / (1.0 + 0.5 * x * u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(1.0_f64), 0.841_344_746_068_542_9, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.158_655_253_931_457_07, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.977_249_868_051_820_8, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022_750_131_948_179_195, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [-3.0, -1.2, -0.1, 0.0, 0.4, 2.2] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_norm_cdf_extremes_stay_in_unit_interval() {
        let hi = norm_cdf(8.0_f64);
        let lo = norm_cdf(-8.0_f64);
        assert!(hi > 0.999_999 && hi <= 1.0);
        assert!(lo >= 0.0 && lo < 1e-6);
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), 0.398_942_280_4, epsilon = 1e-9);
        assert_relative_eq!(norm_pdf(1.0_f64), 0.241_970_724_5, epsilon = 1e-9);
        assert_relative_eq!(norm_pdf(-1.0_f64), norm_pdf(1.0_f64), epsilon = 1e-15);
    }

    #[test]
    fn test_norm_inv_cdf_quantiles() {
        assert!(norm_inv_cdf(0.5).abs() < 1e-6);
        assert_relative_eq!(norm_inv_cdf(0.975), 1.959_963_985, epsilon = 1e-5);
        assert_relative_eq!(norm_inv_cdf(0.99), 2.326_347_874, epsilon = 2e-5);
        assert_relative_eq!(norm_inv_cdf(0.01), -2.326_347_874, epsilon = 2e-5);
    }

    #[test]
    fn test_norm_inv_cdf_inverts_cdf() {
        for p in [0.001, 0.02, 0.3, 0.5, 0.77, 0.98, 0.999] {
            assert_relative_eq!(norm_cdf(norm_inv_cdf(p)), p, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_norm_inv_cdf_bounds() {
        assert_eq!(norm_inv_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(norm_inv_cdf(1.0), f64::INFINITY);
        assert!(norm_inv_cdf(f64::NAN).is_nan());
    }
}
