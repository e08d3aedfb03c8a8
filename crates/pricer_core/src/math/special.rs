//! Special functions used by the pricing models.
//!
//! This module provides:
//! - `erf`, `erfc`: Error function pair (Abramowitz and Stegun 7.1.26, |ε| ≤ 1.5e-7)
//! - `gamma`, `ln_gamma`: Lanczos approximation with reflection for x < 0.5
//! - `factorial`, `binomial`, `permutation`: Combinatorial functions
//!
//! The plain functions are total: outside their domain they return `NaN`,
//! and on overflow they return `+∞`. Callers at an API boundary should use
//! the `checked_*` variants, which report [`MathError`] instead.
//!
//! # Examples
//!
//! ```
//! use pricer_core::math::special::{binomial, factorial, gamma};
//!
//! assert_eq!(factorial(5.0), 120.0);
//! assert_eq!(binomial(5.0, 2.0), 10.0);
//! assert!((gamma(0.5) - std::f64::consts::PI.sqrt()).abs() < 1e-12);
//! assert!(factorial(-1.0).is_nan());
//! assert!(factorial(171.0).is_infinite());
//! ```

use num_traits::Float;
use std::f64::consts::PI;

use crate::types::MathError;

/// Largest n with a finite n! in `f64`.
pub const MAX_FACTORIAL_ARG: f64 = 170.0;

/// Gamma overflows `f64` beyond this argument.
const MAX_GAMMA_ARG: f64 = 171.624_376_956_302_7;

/// Lanczos parameter g.
const LANCZOS_G: f64 = 7.0;

/// Lanczos coefficients for g = 7, n = 9.
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// sqrt(2π)
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Complementary error function.
///
/// Uses the Abramowitz and Stegun approximation (formula 7.1.26) which provides
/// maximum error of 1.5e-7 for all x.
///
/// # Mathematical Definition
/// erfc(x) = 1 - erf(x) = (2/√π) ∫_x^∞ e^(-t²) dt
#[inline]
pub fn erfc<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < T::zero() {
        T::from(2.0).unwrap() - erfc_abs
    } else {
        erfc_abs
    }
}

/// Error function, `erf(x) = 1 - erfc(x)`.
#[inline]
pub fn erf<T: Float>(x: T) -> T {
    T::one() - erfc(x)
}

/// Lanczos sum for x ≥ 0.5, already shifted by one.
fn lanczos_series(x: f64) -> (f64, f64) {
    let x = x - 1.0;
    let mut a = LANCZOS_COEFFS[0];
    for (i, c) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        a += c / (x + i as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    (a, t)
}

/// Gamma function.
///
/// Lanczos approximation for x ≥ 0.5 and the reflection formula
/// Γ(x) = π / (sin(πx) Γ(1 - x)) below that. Reflection is applied once, so
/// evaluation is iterative regardless of the argument.
///
/// Returns `NaN` at the poles (0, -1, -2, ...) and for `NaN` input, and `+∞`
/// above ≈171.62.
pub fn gamma(x: f64) -> f64 {
    if x.is_nan() || (x <= 0.0 && x.fract() == 0.0) {
        return f64::NAN;
    }
    if x > MAX_GAMMA_ARG {
        return f64::INFINITY;
    }

    let (reflected, z) = if x < 0.5 { (true, 1.0 - x) } else { (false, x) };

    let (a, t) = lanczos_series(z);
    // Split the power so t^(z-0.5) does not overflow before e^-t brings it down
    let half_pow = t.powf(0.5 * (z - 0.5));
    let value = SQRT_2PI * half_pow * (half_pow * (-t).exp()) * a;

    if reflected {
        PI / ((PI * x).sin() * value)
    } else {
        value
    }
}

/// Natural logarithm of the gamma function for x > 0.
///
/// Returns `NaN` for x ≤ 0.
pub fn ln_gamma(x: f64) -> f64 {
    if x.is_nan() || x <= 0.0 {
        return f64::NAN;
    }
    if x < 0.5 {
        // ln Γ(x) = ln π - ln sin(πx) - ln Γ(1 - x)
        let (a, t) = lanczos_series(1.0 - x);
        let ln_g1mx = 0.5 * (2.0 * PI).ln() + (0.5 - x) * t.ln() - t + a.ln();
        return PI.ln() - (PI * x).sin().ln() - ln_g1mx;
    }
    let (a, t) = lanczos_series(x);
    0.5 * (2.0 * PI).ln() + (x - 0.5) * t.ln() - t + a.ln()
}

#[inline]
fn is_non_negative_integer(n: f64) -> bool {
    n.is_finite() && n >= 0.0 && n.fract() == 0.0
}

/// Factorial n! for non-negative integer n.
///
/// Iterative product. Returns `NaN` for negative or non-integer input and
/// `+∞` for n > 170.
pub fn factorial(n: f64) -> f64 {
    if n.is_infinite() && n > 0.0 {
        return f64::INFINITY;
    }
    if !is_non_negative_integer(n) {
        return f64::NAN;
    }
    if n > MAX_FACTORIAL_ARG {
        return f64::INFINITY;
    }
    (2..=n as u64).fold(1.0, |acc, i| acc * i as f64)
}

/// Binomial coefficient C(n, k).
///
/// Uses the multiplicative form for integer arguments and the gamma-function
/// ratio Γ(n+1) / (Γ(k+1) Γ(n-k+1)) otherwise. Integer k outside [0, n]
/// yields 0.
pub fn binomial(n: f64, k: f64) -> f64 {
    if n.is_nan() || k.is_nan() {
        return f64::NAN;
    }

    if is_non_negative_integer(n) && k.fract() == 0.0 {
        if k < 0.0 || k > n {
            return 0.0;
        }
        let k = k.min(n - k);
        let mut result = 1.0;
        let mut i = 1.0;
        while i <= k {
            result = result * (n - k + i) / i;
            i += 1.0;
        }
        return result.round();
    }

    let (a, b, c) = (n + 1.0, k + 1.0, n - k + 1.0);
    if a > 0.0 && b > 0.0 && c > 0.0 {
        (ln_gamma(a) - ln_gamma(b) - ln_gamma(c)).exp()
    } else {
        gamma(a) / (gamma(b) * gamma(c))
    }
}

/// Number of ordered arrangements P(n, r) = n! / (n - r)!.
///
/// Returns `NaN` for negative or non-integer input, 0 when r > n, and `+∞`
/// on overflow.
pub fn permutation(n: f64, r: f64) -> f64 {
    if !is_non_negative_integer(n) || !is_non_negative_integer(r) {
        return f64::NAN;
    }
    if r > n {
        return 0.0;
    }
    let mut result = 1.0;
    let mut i = 0.0;
    while i < r {
        result *= n - i;
        if result.is_infinite() {
            return f64::INFINITY;
        }
        i += 1.0;
    }
    result
}

/// Natural logarithm, rejecting non-positive arguments.
pub fn checked_ln(x: f64) -> Result<f64, MathError> {
    if x.is_nan() || x <= 0.0 {
        return Err(MathError::Domain {
            function: "ln",
            argument: x,
        });
    }
    Ok(x.ln())
}

/// Square root, rejecting negative arguments.
pub fn checked_sqrt(x: f64) -> Result<f64, MathError> {
    if x.is_nan() || x < 0.0 {
        return Err(MathError::Domain {
            function: "sqrt",
            argument: x,
        });
    }
    Ok(x.sqrt())
}

/// Real n-th root.
///
/// Odd roots of negative numbers are real and returned; even roots of
/// negative numbers and the zeroth root are domain errors.
pub fn nth_root(x: f64, n: u32) -> Result<f64, MathError> {
    if n == 0 || x.is_nan() || (x < 0.0 && n % 2 == 0) {
        return Err(MathError::Domain {
            function: "nth_root",
            argument: x,
        });
    }
    let inv = 1.0 / n as f64;
    if x < 0.0 {
        Ok(-(-x).powf(inv))
    } else {
        Ok(x.powf(inv))
    }
}

/// Inverse hyperbolic cosine for x ≥ 1.
pub fn acosh(x: f64) -> Result<f64, MathError> {
    if x.is_nan() || x < 1.0 {
        return Err(MathError::Domain {
            function: "acosh",
            argument: x,
        });
    }
    Ok((x + (x * x - 1.0).sqrt()).ln())
}

/// Factorial with explicit domain and overflow errors.
pub fn checked_factorial(n: f64) -> Result<f64, MathError> {
    if !is_non_negative_integer(n) && !(n.is_infinite() && n > 0.0) {
        return Err(MathError::Domain {
            function: "factorial",
            argument: n,
        });
    }
    if n > MAX_FACTORIAL_ARG {
        return Err(MathError::Overflow {
            function: "factorial",
            argument: n,
        });
    }
    Ok(factorial(n))
}

/// Gamma function with explicit pole and overflow errors.
pub fn checked_gamma(x: f64) -> Result<f64, MathError> {
    if x.is_nan() || (x <= 0.0 && x.fract() == 0.0) {
        return Err(MathError::Domain {
            function: "gamma",
            argument: x,
        });
    }
    let value = gamma(x);
    if value.is_infinite() {
        return Err(MathError::Overflow {
            function: "gamma",
            argument: x,
        });
    }
    Ok(value)
}
