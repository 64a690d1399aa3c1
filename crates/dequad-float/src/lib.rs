//! # dequad-float
//!
//! Real arithmetic at an explicit working precision for dequad.
//!
//! Every transcendental operation goes through a [`RealContext`] value that
//! carries the precision, so two integrations running at different
//! precisions never share mutable state.
//!
//! - [`F64Context`]: IEEE double precision, saturating at about 17 digits
//! - [`BigFloatContext`]: arbitrary precision on top of `dashu` floats
//! - [`fsum_f64`]: correctly rounded summation of doubles
//!
//! ## Example
//!
//! ```
//! use dequad_float::{BigFloatContext, RealContext};
//!
//! let ctx = BigFloatContext::with_digits(40);
//! let x = ctx.from_f64(0.5);
//! let y = ctx.sinh(&x);
//! assert!((ctx.to_f64(&y) - 0.5f64.sinh()).abs() < 1e-15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bigfloat;
pub mod double;
pub mod real;
pub mod sum;

#[cfg(test)]
mod proptests;

pub use bigfloat::{BigFloat, BigFloatContext};
pub use double::F64Context;
pub use real::{digits_for_tolerance, Real, RealContext};
pub use sum::fsum_f64;
