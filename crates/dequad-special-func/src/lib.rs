//! Special Functions for dequad
//!
//! Numerical special functions evaluated at the working precision of a
//! [`RealContext`](dequad_float::RealContext):
//!
//! - **Lambert W**: W(x)·e^W(x) = x on both real branches
//!
//! # Purpose
//!
//! The tanh-sinh node generator sizes its truncation index in closed form
//! through the lower branch W₋₁, so the function has to be available at any
//! precision the integrator runs at.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod lambert;

#[cfg(test)]
mod proptests;

pub use error::{SpecialFuncError, SpecialFuncResult};
pub use lambert::{lambert_w, lambert_w0, lambert_wm1, Branch};
