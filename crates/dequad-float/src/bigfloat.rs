//! Arbitrary precision binary floats.
//!
//! This module wraps `dashu`'s `FBig` with a precision context so the
//! quadrature code can run at any number of significant digits.

use dashu::float::round::mode::HalfEven;
use dashu::float::FBig;
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::real::RealContext;

type Repr = FBig<HalfEven>;

/// Extra bits carried while computing constants and sums.
const GUARD_BITS: usize = 32;

/// An arbitrary precision binary floating point number.
///
/// The precision travels with the value; arithmetic between two values keeps
/// the larger of the two precisions. Values created by a [`BigFloatContext`]
/// all share the context's precision.
#[derive(Clone, PartialEq, PartialOrd)]
pub struct BigFloat(Repr);

impl BigFloat {
    /// Significand width in bits (0 means exact/unbounded).
    #[must_use]
    pub fn precision(&self) -> usize {
        self.0.precision()
    }

    /// Nearest double.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }

    /// Returns a reference to the inner `dashu` float.
    #[must_use]
    pub fn as_inner(&self) -> &FBig<HalfEven> {
        &self.0
    }

    /// Returns the inner `dashu` float.
    #[must_use]
    pub fn into_inner(self) -> FBig<HalfEven> {
        self.0
    }

    fn with_precision(self, precision: usize) -> Self {
        Self(self.0.with_precision(precision).value())
    }
}

impl Zero for BigFloat {
    fn zero() -> Self {
        Self(Repr::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0 == Repr::ZERO
    }
}

impl One for BigFloat {
    fn one() -> Self {
        Self(Repr::ONE)
    }
}

impl fmt::Debug for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigFloat({:e}, prec={})", self.to_f64(), self.precision())
    }
}

impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Add for BigFloat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&BigFloat> for BigFloat {
    type Output = Self;

    fn add(self, rhs: &BigFloat) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &BigFloat {
    type Output = BigFloat;

    fn add(self, rhs: Self) -> Self::Output {
        BigFloat(&self.0 + &rhs.0)
    }
}

impl Sub for BigFloat {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&BigFloat> for BigFloat {
    type Output = Self;

    fn sub(self, rhs: &BigFloat) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &BigFloat {
    type Output = BigFloat;

    fn sub(self, rhs: Self) -> Self::Output {
        BigFloat(&self.0 - &rhs.0)
    }
}

impl Mul for BigFloat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&BigFloat> for BigFloat {
    type Output = Self;

    fn mul(self, rhs: &BigFloat) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &BigFloat {
    type Output = BigFloat;

    fn mul(self, rhs: Self) -> Self::Output {
        BigFloat(&self.0 * &rhs.0)
    }
}

impl Div for BigFloat {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div<&BigFloat> for BigFloat {
    type Output = Self;

    fn div(self, rhs: &BigFloat) -> Self::Output {
        Self(self.0 / &rhs.0)
    }
}

impl Div for &BigFloat {
    type Output = BigFloat;

    fn div(self, rhs: Self) -> Self::Output {
        BigFloat(&self.0 / &rhs.0)
    }
}

impl Neg for BigFloat {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &BigFloat {
    type Output = BigFloat;

    fn neg(self) -> Self::Output {
        BigFloat(-self.0.clone())
    }
}

/// Working-precision context for [`BigFloat`].
///
/// Holds the binary precision derived from the requested decimal digits and
/// caches π and ln 10 at that precision.
#[derive(Clone, Debug)]
pub struct BigFloatContext {
    digits: u32,
    precision: usize,
    pi: BigFloat,
    ln10: BigFloat,
}

impl BigFloatContext {
    /// Creates a context with an explicit binary precision.
    ///
    /// # Panics
    ///
    /// Panics if `precision` is zero.
    #[must_use]
    pub fn with_precision_bits(precision: usize) -> Self {
        assert!(precision > 0, "precision must be positive");
        let digits = ((precision as f64) / std::f64::consts::LOG2_10).floor().max(1.0) as u32;
        Self::build(digits, precision)
    }

    fn build(digits: u32, precision: usize) -> Self {
        let pi = BigFloat(machin_pi(precision + GUARD_BITS)).with_precision(precision);
        let ten = BigFloat(Repr::from_parts(IBig::from(10), 0)).with_precision(precision + GUARD_BITS);
        let ln10 = BigFloat(ten.0.ln()).with_precision(precision);
        Self {
            digits,
            precision,
            pi,
            ln10,
        }
    }

    /// Bits needed for `digits` decimal digits, with one digit of headroom.
    fn bits_for_digits(digits: u32) -> usize {
        let bits = ((f64::from(digits) + 1.0) * std::f64::consts::LOG2_10).round();
        (bits as usize).max(2)
    }
}

impl RealContext for BigFloatContext {
    type Real = BigFloat;

    fn with_digits(digits: u32) -> Self {
        let digits = digits.max(1);
        Self::build(digits, Self::bits_for_digits(digits))
    }

    fn digits(&self) -> u32 {
        self.digits
    }

    fn precision_bits(&self) -> usize {
        self.precision
    }

    fn round(&self, value: BigFloat) -> BigFloat {
        value.with_precision(self.precision)
    }

    /// # Panics
    ///
    /// Panics if `value` is NaN or infinite.
    fn from_f64(&self, value: f64) -> BigFloat {
        assert!(value.is_finite(), "cannot represent {value} as a BigFloat");
        let repr = Repr::try_from(value).expect("finite doubles convert exactly");
        self.round(BigFloat(repr))
    }

    fn from_i64(&self, value: i64) -> BigFloat {
        self.round(BigFloat(Repr::from_parts(IBig::from(value), 0)))
    }

    fn to_f64(&self, value: &BigFloat) -> f64 {
        value.to_f64()
    }

    fn epsilon(&self) -> BigFloat {
        let exponent = 1 - self.precision as isize;
        self.round(BigFloat(Repr::from_parts(IBig::ONE, exponent)))
    }

    fn pi(&self) -> BigFloat {
        self.pi.clone()
    }

    fn exp(&self, x: &BigFloat) -> BigFloat {
        BigFloat(self.round(x.clone()).0.exp())
    }

    fn ln(&self, x: &BigFloat) -> BigFloat {
        BigFloat(self.round(x.clone()).0.ln())
    }

    fn fsum(&self, terms: &[BigFloat]) -> BigFloat {
        // Every term has at most `precision` bits, so the wide accumulator
        // only rounds when the exponents span more than the guard width.
        let width = usize::BITS as usize - terms.len().leading_zeros() as usize;
        let wide = self.precision + 2 * GUARD_BITS + width;
        let total = terms
            .iter()
            .fold(BigFloat::zero().with_precision(wide), |acc, term| {
                acc + term.clone().with_precision(wide)
            });
        self.round(total)
    }

    fn log10(&self, x: &BigFloat) -> BigFloat {
        self.ln(x) / self.ln10.clone()
    }
}

/// π = 16·atan(1/5) − 4·atan(1/239) at `precision` bits.
fn machin_pi(precision: usize) -> Repr {
    let sixteen = Repr::from_parts(IBig::from(16), 0);
    let four = Repr::from_parts(IBig::from(4), 0);
    let pi = &sixteen * &atan_inverse(5, precision) - &four * &atan_inverse(239, precision);
    pi.with_precision(precision).value()
}

/// atan(1/n) by its Taylor series, for integer `n > 1`.
fn atan_inverse(n: i64, precision: usize) -> Repr {
    let one = Repr::from_parts(IBig::ONE, 0).with_precision(precision).value();
    let n_big = Repr::from_parts(IBig::from(n), 0).with_precision(precision).value();
    let n_squared = &n_big * &n_big;

    // each term shrinks by n², stop once it drops below 2^-precision
    let terms = ((precision as f64) * std::f64::consts::LN_2 / (2.0 * (n as f64).ln())).ceil() as i64 + 1;

    let mut power = &one / &n_big;
    let mut sum = power.clone();
    for k in 1..=terms {
        power = &power / &n_squared;
        let odd = Repr::from_parts(IBig::from(2 * k + 1), 0);
        let term = &power / &odd;
        sum = if k % 2 == 1 { &sum - &term } else { &sum + &term };
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_precision_from_digits() {
        let ctx = BigFloatContext::with_digits(30);
        assert_eq!(ctx.digits(), 30);
        assert_eq!(ctx.precision_bits(), 103);
        assert_eq!(ctx.one().precision(), 103);
    }

    #[test]
    fn test_with_precision_bits() {
        let ctx = BigFloatContext::with_precision_bits(53);
        assert_eq!(ctx.digits(), 15);
        assert_eq!(ctx.precision_bits(), 53);
    }

    #[test]
    fn test_pi_matches_double() {
        let ctx = BigFloatContext::with_digits(50);
        assert_relative_eq!(ctx.to_f64(&ctx.pi()), std::f64::consts::PI);
    }

    #[test]
    fn test_pi_beyond_double() {
        // π - 3.141592653589793 (the double) ≈ 1.2246e-16
        let ctx = BigFloatContext::with_digits(40);
        let residual = ctx.pi() - ctx.from_f64(std::f64::consts::PI);
        assert_relative_eq!(ctx.to_f64(&residual), 1.2246467991473532e-16, max_relative = 1e-12);
    }

    #[test]
    fn test_exp_ln_roundtrip() {
        let ctx = BigFloatContext::with_digits(35);
        let x = ctx.from_f64(2.5);
        let y = ctx.ln(&ctx.exp(&x));
        let diff = ctx.abs(&(y - x));
        assert!(diff < ctx.from_f64(1e-33));
    }

    #[test]
    fn test_hyperbolic() {
        let ctx = BigFloatContext::with_digits(25);
        let x = ctx.from_f64(0.75);
        assert_relative_eq!(ctx.to_f64(&ctx.sinh(&x)), 0.75f64.sinh(), max_relative = 1e-15);
        assert_relative_eq!(ctx.to_f64(&ctx.cosh(&x)), 0.75f64.cosh(), max_relative = 1e-15);
        assert_relative_eq!(ctx.to_f64(&ctx.tanh(&-x)), (-0.75f64).tanh(), max_relative = 1e-15);
    }

    #[test]
    fn test_log10_and_sqrt() {
        let ctx = BigFloatContext::with_digits(25);
        assert_relative_eq!(ctx.to_f64(&ctx.log10(&ctx.from_i64(1000))), 3.0, max_relative = 1e-15);
        assert_relative_eq!(ctx.to_f64(&ctx.sqrt(&ctx.from_i64(2))), 2f64.sqrt(), max_relative = 1e-15);
    }

    #[test]
    fn test_fsum_cancellation() {
        let ctx = BigFloatContext::with_digits(20);
        let big = ctx.from_f64(1e30);
        let terms = vec![big.clone(), ctx.one(), -big, ctx.one()];
        assert_eq!(ctx.to_f64(&ctx.fsum(&terms)), 2.0);
    }

    #[test]
    fn test_epsilon() {
        let ctx = BigFloatContext::with_precision_bits(53);
        assert_eq!(ctx.to_f64(&ctx.epsilon()), f64::EPSILON);
    }

    #[test]
    fn test_zero_one() {
        assert!(BigFloat::zero().is_zero());
        assert!(!BigFloat::one().is_zero());
    }
}
