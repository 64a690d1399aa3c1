//! Adaptive Numerical Integration for dequad
//!
//! Tanh-sinh (double-exponential) quadrature of one-dimensional integrals
//! over finite intervals, at a working precision derived from the requested
//! accuracy.
//!
//! # Quick Start
//!
//! ```
//! use dequad_integrate::{tanh_sinh, DEFAULT_MAX_STEPS};
//!
//! // ∫₀¹ dx/√x = 2, singular at 0
//! let result = tanh_sinh(|x| 1.0 / x.sqrt(), 0.0, 1.0, 1e-10, DEFAULT_MAX_STEPS).unwrap();
//! assert!((result.value - 2.0).abs() < 1e-10);
//! assert!(result.error < 1e-10);
//! ```
//!
//! # Features
//!
//! - **Any precision**: generic over [`RealContext`](dequad_float::RealContext);
//!   `f64` or arbitrary-precision `BigFloat`
//! - **Endpoint control**: integrands may be given in boundary-relative form
//!   to keep full precision next to a singular endpoint
//! - **Two error estimators**: level comparison by default, second
//!   derivative of the transformed integrand when f' and f'' are supplied
//! - **Exact summation**: each level is summed with a single final rounding
//! - **Parallel node generation** via rayon on fine levels

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod options;
pub mod result;
pub mod tanh_sinh;

#[cfg(test)]
mod proptests;

pub use error::{IntegrateError, IntegrateResult};
pub use options::{TanhSinhOptions, DEFAULT_MAX_STEPS, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_TOLERANCE};
pub use result::TanhSinhResult;
pub use tanh_sinh::{
    tanh_sinh, BoundaryDerivatives, BoundaryForms, BoundaryIntegrand, Derivatives, DerivativeEstimator,
    ErrorEstimator, HeuristicEstimator, LevelSnapshot, NodeSet, Normalized, OneSided, Side, TanhSinh,
};
