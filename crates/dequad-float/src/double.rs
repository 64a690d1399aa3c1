//! IEEE double precision context.

use crate::real::RealContext;
use crate::sum::fsum_f64;

/// Significant decimal digits an `f64` can carry.
const F64_MAX_DIGITS: u32 = 17;

/// Working-precision context backed by `f64`.
///
/// Requests for more digits than a double carries saturate: the context
/// remembers the request but computes in double precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct F64Context {
    requested_digits: u32,
}

impl F64Context {
    /// Digits that were asked for, which may exceed [`RealContext::digits`].
    #[must_use]
    pub fn requested_digits(&self) -> u32 {
        self.requested_digits
    }
}

impl Default for F64Context {
    fn default() -> Self {
        Self::with_digits(F64_MAX_DIGITS)
    }
}

impl RealContext for F64Context {
    type Real = f64;

    fn with_digits(digits: u32) -> Self {
        Self {
            requested_digits: digits.max(1),
        }
    }

    fn digits(&self) -> u32 {
        self.requested_digits.min(F64_MAX_DIGITS)
    }

    fn precision_bits(&self) -> usize {
        f64::MANTISSA_DIGITS as usize
    }

    #[inline]
    fn round(&self, value: f64) -> f64 {
        value
    }

    #[inline]
    fn from_f64(&self, value: f64) -> f64 {
        value
    }

    #[inline]
    fn from_i64(&self, value: i64) -> f64 {
        value as f64
    }

    #[inline]
    fn to_f64(&self, value: &f64) -> f64 {
        *value
    }

    fn epsilon(&self) -> f64 {
        f64::EPSILON
    }

    fn pi(&self) -> f64 {
        std::f64::consts::PI
    }

    #[inline]
    fn exp(&self, x: &f64) -> f64 {
        x.exp()
    }

    #[inline]
    fn ln(&self, x: &f64) -> f64 {
        x.ln()
    }

    fn fsum(&self, terms: &[f64]) -> f64 {
        fsum_f64(terms.iter().copied())
    }

    fn e(&self) -> f64 {
        std::f64::consts::E
    }

    #[inline]
    fn abs(&self, x: &f64) -> f64 {
        x.abs()
    }

    fn sqrt(&self, x: &f64) -> f64 {
        if *x <= 0.0 {
            0.0
        } else {
            x.sqrt()
        }
    }

    fn log10(&self, x: &f64) -> f64 {
        x.log10()
    }

    #[inline]
    fn sinh(&self, x: &f64) -> f64 {
        x.sinh()
    }

    #[inline]
    fn cosh(&self, x: &f64) -> f64 {
        x.cosh()
    }

    #[inline]
    fn tanh(&self, x: &f64) -> f64 {
        x.tanh()
    }

    fn powf(&self, base: &f64, exponent: &f64) -> f64 {
        base.powf(*exponent)
    }
}
