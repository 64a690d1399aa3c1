//! Tanh-Sinh Quadrature
//!
//! Double-exponential quadrature on a finite interval with adaptive step
//! halving.
//!
//! # Components
//!
//! - **Normalizer**: views the integrand from each endpoint ([`Normalized`],
//!   [`OneSided`], [`BoundaryForms`])
//! - **Node generator**: abscissas and weights per level ([`NodeSet`])
//! - **Estimators**: [`HeuristicEstimator`] and [`DerivativeEstimator`]
//!   behind [`ErrorEstimator`]
//! - **Refinement loop**: [`TanhSinh`], halving `h` until the error estimate
//!   drops below `eps`
//!
//! # Example
//!
//! ```
//! use dequad_float::F64Context;
//! use dequad_integrate::tanh_sinh::{Derivatives, TanhSinh};
//! use dequad_integrate::TanhSinhOptions;
//!
//! let ts = TanhSinh::<F64Context>::new(TanhSinhOptions::new(1e-10)).unwrap();
//!
//! // ∫₀¹ eˣ dx with an analytic error estimate
//! let exp = |x: &f64| x.exp();
//! let derivatives = Derivatives::new(exp, exp);
//! let result = ts.integrate_with_derivatives(exp, &derivatives, &0.0, &1.0).unwrap();
//! assert!((result.value - (std::f64::consts::E - 1.0)).abs() < 1e-10);
//! ```

mod estimate;
mod integrator;
mod nodes;
mod normalize;

pub use estimate::{DerivativeEstimator, ErrorEstimator, HeuristicEstimator, LevelSnapshot};
pub use integrator::{tanh_sinh, TanhSinh};
pub use nodes::NodeSet;
pub use normalize::{
    BoundaryDerivatives, BoundaryForms, BoundaryIntegrand, Derivatives, Normalized, NormalizedDerivatives, OneSided,
    Side,
};
