//! Lambert W function.
//!
//! W(x) is the inverse of w ↦ w·eʷ. On the reals it has two branches:
//!
//! - W₀ (principal): defined for x ≥ -1/e, with W₀(x) ≥ -1
//! - W₋₁ (lower): defined for -1/e ≤ x < 0, with W₋₁(x) ≤ -1
//!
//! # Key Properties
//!
//! - W(-1/e) = -1 on both branches (the branch point)
//! - W₀(0) = 0, W₀(e) = 1
//! - W₋₁(x) → -∞ as x → 0⁻, roughly like ln(-x) - ln(-ln(-x))
//!
//! # Evaluation
//!
//! A starting guess from the branch-point series or the asymptotic
//! expansion is polished with Halley's iteration at the context's working
//! precision.

use std::fmt;

use dequad_float::RealContext;

use crate::error::{SpecialFuncError, SpecialFuncResult};

const MAX_ITERATIONS: usize = 64;

/// Real branch of the Lambert W function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Branch {
    /// W₀, the branch through the origin.
    Principal,
    /// W₋₁, the branch tending to -∞ at 0⁻.
    Lower,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Principal => write!(f, "principal"),
            Branch::Lower => write!(f, "lower"),
        }
    }
}

/// Principal branch W₀(x).
///
/// # Errors
///
/// Returns [`SpecialFuncError::OutOfDomain`] for x < -1/e.
pub fn lambert_w0<C: RealContext>(ctx: &C, x: &C::Real) -> SpecialFuncResult<C::Real> {
    lambert_w(ctx, Branch::Principal, x)
}

/// Lower branch W₋₁(x).
///
/// # Errors
///
/// Returns [`SpecialFuncError::OutOfDomain`] unless -1/e ≤ x < 0.
///
/// # Example
///
/// ```
/// use dequad_float::{F64Context, RealContext};
/// use dequad_special_func::lambert_wm1;
///
/// let ctx = F64Context::default();
/// let w = lambert_wm1(&ctx, &-0.1).unwrap();
/// assert!((w * w.exp() + 0.1).abs() < 1e-15);
/// assert!(w < -1.0);
/// ```
pub fn lambert_wm1<C: RealContext>(ctx: &C, x: &C::Real) -> SpecialFuncResult<C::Real> {
    lambert_w(ctx, Branch::Lower, x)
}

/// Evaluates W on the given real branch.
///
/// # Errors
///
/// - [`SpecialFuncError::OutOfDomain`] if `x` is outside the branch's domain
/// - [`SpecialFuncError::NoConvergence`] if Halley's iteration stalls
pub fn lambert_w<C: RealContext>(ctx: &C, branch: Branch, x: &C::Real) -> SpecialFuncResult<C::Real> {
    let zero = ctx.zero();
    let one = ctx.one();
    let e = ctx.e();

    // distance from the branch point, scaled: 1 + e·x ∈ [0, ∞)
    let offset = one.clone() + e.clone() * x.clone();
    let tolerance = ctx.epsilon() * ctx.from_i64(16);

    let out_of_domain = || SpecialFuncError::OutOfDomain {
        branch,
        x: ctx.to_f64(x),
    };

    if offset < -tolerance.clone() {
        return Err(out_of_domain());
    }
    if branch == Branch::Lower && *x >= zero {
        return Err(out_of_domain());
    }
    if ctx.abs(&offset) <= tolerance {
        return Ok(-one);
    }
    if branch == Branch::Principal && *x == zero {
        return Ok(zero);
    }

    let guess = initial_guess(ctx, branch, x, &offset);
    halley(ctx, x, guess, &tolerance)
}

/// Starting point for Halley's iteration.
fn initial_guess<C: RealContext>(ctx: &C, branch: Branch, x: &C::Real, offset: &C::Real) -> C::Real {
    let one = ctx.one();
    let near_branch_point = ctx.to_f64(x) < -0.25;

    if near_branch_point {
        // W = -1 ± p - p²/3 + 11p³/72 with p = √(2(1 + e·x))
        let p = ctx.sqrt(&(ctx.from_i64(2) * offset.clone()));
        let p = match branch {
            Branch::Principal => p,
            Branch::Lower => -p,
        };
        let p2 = p.clone() * p.clone();
        let p3 = p2.clone() * p.clone();
        return -one + p - p2 / ctx.from_i64(3) + p3 * ctx.from_i64(11) / ctx.from_i64(72);
    }

    match branch {
        Branch::Lower => {
            // x ∈ [-1/4, 0): L₁ - L₂ + L₂/L₁ with L₁ = ln(-x), L₂ = ln(-L₁)
            let l1 = ctx.ln(&-x.clone());
            let l2 = ctx.ln(&-l1.clone());
            l1.clone() - l2.clone() + l2 / l1
        }
        Branch::Principal => {
            if ctx.to_f64(x) < 3.0 {
                ctx.ln(&(one + x.clone()))
            } else {
                let l1 = ctx.ln(x);
                let l2 = ctx.ln(&l1);
                l1.clone() - l2.clone() + l2 / l1
            }
        }
    }
}

/// Halley's iteration on f(w) = w·eʷ - x.
fn halley<C: RealContext>(
    ctx: &C,
    x: &C::Real,
    mut w: C::Real,
    tolerance: &C::Real,
) -> SpecialFuncResult<C::Real> {
    let zero = ctx.zero();
    let one = ctx.one();
    let two = ctx.from_i64(2);
    let mut previous_step: Option<C::Real> = None;

    for _ in 0..MAX_ITERATIONS {
        let ew = ctx.exp(&w);
        let f = w.clone() * ew.clone() - x.clone();
        let w_plus_one = w.clone() + one.clone();
        if w_plus_one == zero {
            return Ok(w);
        }

        let denominator = ew * w_plus_one.clone()
            - (w.clone() + two.clone()) * f.clone() / (two.clone() * w_plus_one);
        if denominator == zero {
            return Ok(w);
        }

        let step = f / denominator;
        let step_size = ctx.abs(&step);
        // near the branch point round-off stalls the iteration before the tolerance
        if previous_step.as_ref().is_some_and(|prev| step_size >= *prev) {
            return Ok(w);
        }

        w = w - step;
        if step_size <= tolerance.clone() * (one.clone() + ctx.abs(&w)) {
            return Ok(w);
        }
        previous_step = Some(step_size);
    }

    Err(SpecialFuncError::NoConvergence {
        iterations: MAX_ITERATIONS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dequad_float::{BigFloatContext, F64Context};

    fn residual(w: f64, x: f64) -> f64 {
        (w * w.exp() - x).abs()
    }

    #[test]
    fn test_principal_known_values() {
        let ctx = F64Context::default();
        assert_eq!(lambert_w0(&ctx, &0.0).unwrap(), 0.0);
        assert_relative_eq!(lambert_w0(&ctx, &std::f64::consts::E).unwrap(), 1.0, max_relative = 1e-14);
        // Ω constant
        assert_relative_eq!(lambert_w0(&ctx, &1.0).unwrap(), 0.567_143_290_409_783_8, max_relative = 1e-14);
        let w = lambert_w0(&ctx, &1e6).unwrap();
        assert!(residual(w, 1e6) < 1e-8);
    }

    #[test]
    fn test_lower_known_values() {
        let ctx = F64Context::default();
        // W₋₁(-ln2/2) = -2 ln 2
        let x = -std::f64::consts::LN_2 / 2.0;
        assert_relative_eq!(
            lambert_wm1(&ctx, &x).unwrap(),
            -2.0 * std::f64::consts::LN_2,
            max_relative = 1e-13
        );
        let w = lambert_wm1(&ctx, &-1e-20).unwrap();
        assert_relative_eq!(w, -49.962_984_276_674_5, max_relative = 1e-12);
    }

    #[test]
    fn test_branch_point() {
        let ctx = F64Context::default();
        let x = -(-1.0f64).exp();
        assert_relative_eq!(lambert_w0(&ctx, &x).unwrap(), -1.0, epsilon = 1e-7);
        assert_relative_eq!(lambert_wm1(&ctx, &x).unwrap(), -1.0, epsilon = 1e-7);
    }

    #[test]
    fn test_near_branch_point_branches_split() {
        let ctx = F64Context::default();
        let x = -0.36;
        let upper = lambert_w0(&ctx, &x).unwrap();
        let lower = lambert_wm1(&ctx, &x).unwrap();
        assert!(upper > -1.0 && lower < -1.0);
        assert!(residual(upper, x) < 1e-15);
        assert!(residual(lower, x) < 1e-15);

        let closer = -0.3678;
        assert!(residual(lambert_wm1(&ctx, &closer).unwrap(), closer) < 1e-15);
        assert!(residual(lambert_w0(&ctx, &closer).unwrap(), closer) < 1e-15);
    }

    #[test]
    fn test_out_of_domain() {
        let ctx = F64Context::default();
        assert_eq!(
            lambert_w0(&ctx, &-1.0),
            Err(SpecialFuncError::OutOfDomain {
                branch: Branch::Principal,
                x: -1.0
            })
        );
        assert!(matches!(
            lambert_wm1(&ctx, &0.5),
            Err(SpecialFuncError::OutOfDomain { branch: Branch::Lower, .. })
        ));
        assert!(lambert_wm1(&ctx, &0.0).is_err());
    }

    #[test]
    fn test_lower_branch_high_precision() {
        let ctx = BigFloatContext::with_digits(40);
        let x = ctx.from_f64(-1e-30);
        let w = lambert_wm1(&ctx, &x).unwrap();
        let back = w.clone() * ctx.exp(&w);
        let err = ctx.abs(&(back - x));
        // relative to |x| = 1e-30
        assert!(ctx.to_f64(&err) < 1e-68);
        assert!(ctx.to_f64(&w) < -70.0);
    }
}
