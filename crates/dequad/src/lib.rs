//! # dequad
//!
//! Adaptive double-exponential (tanh-sinh) quadrature in Rust, at double
//! or arbitrary precision.
//!
//! ## Features
//!
//! - **Explicit precision**: every computation runs under a
//!   [`RealContext`](float::RealContext) sized from the requested tolerance
//! - **Endpoint singularities**: integrands may be supplied relative to
//!   each endpoint
//! - **Error control**: level-comparison or derivative-based estimates
//!
//! ## Quick Start
//!
//! ```
//! use dequad::prelude::*;
//!
//! let ts = TanhSinh::<BigFloatContext>::new(TanhSinhOptions::new(1e-25)).unwrap();
//! let ctx = ts.context().clone();
//!
//! // ∫₀¹ 4/(1+x²) dx = π
//! let four = ctx.from_i64(4);
//! let result = ts
//!     .integrate(|x| four.clone() / (ctx.one() + x.clone() * x.clone()), &ctx.zero(), &ctx.one())
//!     .unwrap();
//! let diff = ctx.abs(&(result.value - ctx.pi()));
//! assert!(ctx.to_f64(&diff) < 1e-25);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use dequad_float as float;
pub use dequad_integrate as integrate;
pub use dequad_special_func as special_func;

pub use dequad_integrate::{tanh_sinh, IntegrateError, IntegrateResult, TanhSinh, TanhSinhOptions, TanhSinhResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use dequad_float::{BigFloat, BigFloatContext, F64Context, Real, RealContext};
    pub use dequad_integrate::{
        tanh_sinh, BoundaryIntegrand, Derivatives, ErrorEstimator, IntegrateError, IntegrateResult, TanhSinh,
        TanhSinhOptions, TanhSinhResult, DEFAULT_MAX_STEPS,
    };
    pub use dequad_special_func::{lambert_w0, lambert_wm1, Branch};
}
