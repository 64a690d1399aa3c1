//! Real number traits.
//!
//! [`Real`] is the value bound used throughout dequad; [`RealContext`] is the
//! precision-carrying object that performs every operation a plain operator
//! cannot express (transcendentals, constants, conversions, summation).

use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A real number usable by the quadrature routines.
///
/// Field operators come from `std::ops`; anything that depends on the working
/// precision lives on [`RealContext`].
pub trait Real:
    Clone
    + Debug
    + PartialOrd
    + Send
    + Sync
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
}

impl<T> Real for T where
    T: Clone
        + Debug
        + PartialOrd
        + Send
        + Sync
        + Zero
        + One
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + Neg<Output = T>
{
}

/// Number of significant decimal digits needed to resolve a tolerance.
///
/// Computes `ceil(-log10(eps)) + 1`, never less than 1.
///
/// ```
/// use dequad_float::digits_for_tolerance;
///
/// assert_eq!(digits_for_tolerance(1e-10), 11);
/// assert_eq!(digits_for_tolerance(0.5), 2);
/// ```
#[must_use]
pub fn digits_for_tolerance(eps: f64) -> u32 {
    if !(eps.is_finite() && eps > 0.0) {
        return 1;
    }
    let digits = (-eps.log10()).ceil() + 1.0;
    if digits < 1.0 {
        1
    } else {
        digits as u32
    }
}

/// A working-precision context.
///
/// A context is created once for a given number of significant digits and
/// then passed to every operation. Values produced by a context carry its
/// precision; mixing values from contexts of different precision is allowed
/// but the result precision is backend defined.
pub trait RealContext: Clone + Debug + Send + Sync {
    /// The real number type this context operates on.
    type Real: Real;

    /// Creates a context working with `digits` significant decimal digits.
    fn with_digits(digits: u32) -> Self;

    /// Creates a context precise enough to resolve `eps`.
    fn for_tolerance(eps: f64) -> Self {
        Self::with_digits(digits_for_tolerance(eps))
    }

    /// Significant decimal digits actually carried by this context.
    fn digits(&self) -> u32;

    /// Significand width in bits.
    fn precision_bits(&self) -> usize;

    /// Rounds `value` to the working precision.
    fn round(&self, value: Self::Real) -> Self::Real;

    /// Converts a double. The conversion is exact before rounding.
    fn from_f64(&self, value: f64) -> Self::Real;

    /// Converts an integer.
    fn from_i64(&self, value: i64) -> Self::Real;

    /// Nearest double to `value`.
    fn to_f64(&self, value: &Self::Real) -> f64;

    /// Distance from 1 to the next representable number.
    fn epsilon(&self) -> Self::Real;

    /// π at working precision.
    fn pi(&self) -> Self::Real;

    /// eˣ
    fn exp(&self, x: &Self::Real) -> Self::Real;

    /// Natural logarithm. `x` must be positive.
    fn ln(&self, x: &Self::Real) -> Self::Real;

    /// Sum of `terms` rounded once to working precision, independent of the
    /// order of the terms.
    fn fsum(&self, terms: &[Self::Real]) -> Self::Real;

    /// 0
    fn zero(&self) -> Self::Real {
        self.from_i64(0)
    }

    /// 1
    fn one(&self) -> Self::Real {
        self.from_i64(1)
    }

    /// Euler's number.
    fn e(&self) -> Self::Real {
        self.exp(&self.one())
    }

    /// |x|
    fn abs(&self, x: &Self::Real) -> Self::Real {
        if *x < self.zero() {
            -x.clone()
        } else {
            x.clone()
        }
    }

    /// The larger of `a` and `b`.
    fn max(&self, a: &Self::Real, b: &Self::Real) -> Self::Real {
        if a < b {
            b.clone()
        } else {
            a.clone()
        }
    }

    /// √x, with `sqrt(x) = 0` for `x ≤ 0`.
    fn sqrt(&self, x: &Self::Real) -> Self::Real {
        if *x <= self.zero() {
            return self.zero();
        }
        self.exp(&(self.ln(x) * self.from_f64(0.5)))
    }

    /// Base-10 logarithm.
    fn log10(&self, x: &Self::Real) -> Self::Real {
        self.ln(x) / self.ln(&self.from_i64(10))
    }

    /// Hyperbolic sine.
    fn sinh(&self, x: &Self::Real) -> Self::Real {
        let ex = self.exp(x);
        let inv = self.one() / ex.clone();
        (ex - inv) * self.from_f64(0.5)
    }

    /// Hyperbolic cosine.
    fn cosh(&self, x: &Self::Real) -> Self::Real {
        let ex = self.exp(x);
        let inv = self.one() / ex.clone();
        (ex + inv) * self.from_f64(0.5)
    }

    /// Hyperbolic tangent.
    fn tanh(&self, x: &Self::Real) -> Self::Real {
        // 1 - 2/(e^{2|x|} + 1) keeps the exponential bounded below by 1
        let negative = *x < self.zero();
        let two_abs = self.abs(x) * self.from_i64(2);
        let t = self.one() - self.from_i64(2) / (self.exp(&two_abs) + self.one());
        if negative {
            -t
        } else {
            t
        }
    }

    /// `base^exponent` for positive `base`.
    fn powf(&self, base: &Self::Real, exponent: &Self::Real) -> Self::Real {
        self.exp(&(self.ln(base) * exponent.clone()))
    }
}
