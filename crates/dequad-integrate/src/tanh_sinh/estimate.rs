//! Error estimators for a refinement level.
//!
//! Two strategies share the [`ErrorEstimator`] interface:
//!
//! - [`HeuristicEstimator`]: compares the last three level values and the
//!   size of the summands; needs nothing but the integrand
//! - [`DerivativeEstimator`]: second derivative of the transformed
//!   integrand from caller-supplied f' and f''; much sharper
//!
//! # Analytic estimate
//!
//! In boundary-relative coordinates one side of the integral becomes
//! `∫₀^∞ F(t) dt` with `F(t) = f(1 - g(t))·g'(t)` and
//! `g(t) = tanh(π/2·sinh t)`. The trapezoidal error is approximated by
//! `h·(h/2π)²·Σ F''(h·j)`, where
//!
//! ```text
//! F'' = f''(y)·g'³ − 3·f'(y)·g'·g'' + f(y)·g'''      y = 1 - g(t)
//! ```

use dequad_float::{Real, RealContext};

use super::nodes::NodeSet;
use super::normalize::{BoundaryDerivatives, Side};

/// Everything an estimator may look at after a level has been summed.
#[derive(Debug)]
pub struct LevelSnapshot<'a, R> {
    /// Zero-based refinement level.
    pub level: usize,
    /// Target accuracy at working precision.
    pub eps: &'a R,
    /// Nodes of this level.
    pub nodes: &'a NodeSet<R>,
    /// Level values so far, the current one last.
    pub history: &'a [R],
    /// Weighted summands of this level in ascending-abscissa order.
    pub summands: &'a [R],
    /// `f_left(y_j)` for `j = 1..=J`, at index `j - 1`.
    pub left_values: &'a [R],
    /// `f_right(y_j)` for `j = 0..=J`.
    pub right_values: &'a [R],
}

/// Error estimate for one refinement level.
pub trait ErrorEstimator<C: RealContext> {
    /// Signed or unsigned estimate; the loop compares its magnitude with
    /// `eps`.
    fn estimate(&self, ctx: &C, snapshot: &LevelSnapshot<'_, C::Real>) -> C::Real;
}

/// Estimate from the convergence of successive levels.
///
/// For `level ≤ 1` the estimate is 1. A level value identical to the
/// previous one gives 0. Otherwise, with `e1 = |V₋₁ - V₋₂|`,
/// `e2 = |V₋₁ - V₋₃|`, `e3 = eps·max|S|` and `e4 = max(|S₀|, |S_last|)`,
/// the estimate is `max(e1^(ln e1 / ln e2), e1², e3, e4)`. When the
/// exponent is undefined the rate term is `e1²`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicEstimator;

impl<C: RealContext> ErrorEstimator<C> for HeuristicEstimator {
    fn estimate(&self, ctx: &C, snapshot: &LevelSnapshot<'_, C::Real>) -> C::Real {
        let history = snapshot.history;
        let n = history.len();
        if snapshot.level <= 1 || n < 3 {
            return ctx.one();
        }

        let current = &history[n - 1];
        if *current == history[n - 2] {
            return ctx.zero();
        }

        let e1 = ctx.abs(&(current.clone() - history[n - 2].clone()));
        let e2 = ctx.abs(&(current.clone() - history[n - 3].clone()));
        let rate = convergence_rate(ctx, &e1, &e2);
        let e1_sq = e1.clone() * e1;

        let summands = snapshot.summands;
        let largest = summands
            .iter()
            .fold(ctx.zero(), |acc, s| ctx.max(&acc, &ctx.abs(s)));
        let e3 = snapshot.eps.clone() * largest;
        let e4 = match (summands.first(), summands.last()) {
            (Some(first), Some(last)) => ctx.max(&ctx.abs(first), &ctx.abs(last)),
            _ => ctx.zero(),
        };

        ctx.max(&ctx.max(&rate, &e1_sq), &ctx.max(&e3, &e4))
    }
}

/// `e1^(ln e1 / ln e2)`, or `e1²` when the exponent is undefined.
fn convergence_rate<C: RealContext>(ctx: &C, e1: &C::Real, e2: &C::Real) -> C::Real {
    let zero = ctx.zero();
    let squared = e1.clone() * e1.clone();
    if *e1 == zero || *e2 == zero {
        return squared;
    }

    let ln_e2 = ctx.ln(e2);
    if ln_e2 == zero {
        return squared;
    }
    let ln_e1 = ctx.ln(e1);
    ctx.exp(&(ln_e1.clone() * ln_e1 / ln_e2))
}

/// Estimate from the second derivative of the transformed integrand.
///
/// Integrand values are taken from the snapshot; only the derivatives are
/// evaluated.
#[derive(Debug)]
pub struct DerivativeEstimator<'d, D> {
    derivatives: &'d D,
}

impl<'d, D> DerivativeEstimator<'d, D> {
    /// Estimator over boundary-relative derivatives.
    pub fn new(derivatives: &'d D) -> Self {
        Self { derivatives }
    }
}

impl<C, D> ErrorEstimator<C> for DerivativeEstimator<'_, D>
where
    C: RealContext,
    D: BoundaryDerivatives<C::Real>,
{
    fn estimate(&self, ctx: &C, snapshot: &LevelSnapshot<'_, C::Real>) -> C::Real {
        let nodes = snapshot.nodes;
        let h = nodes.step();
        let abscissas = nodes.abscissas();
        let cutoff = nodes.cutoff();

        let jacobians: Vec<Jacobian<C::Real>> = (0..=cutoff)
            .map(|j| Jacobian::at(ctx, &(h.clone() * ctx.from_i64(j as i64))))
            .collect();

        // left side skips the shared center node
        let left = (1..=cutoff).map(|j| {
            let value = &snapshot.left_values[j - 1];
            self.sample(ctx, Side::Left, &abscissas[j], value, &jacobians[j])
        });
        let right = (0..=cutoff).map(|j| {
            let value = &snapshot.right_values[j];
            self.sample(ctx, Side::Right, &abscissas[j], value, &jacobians[j])
        });
        let samples: Vec<C::Real> = left.chain(right).collect();

        let two_pi = ctx.pi() * ctx.from_i64(2);
        let ratio = h.clone() / two_pi;
        h.clone() * ratio.clone() * ratio * ctx.fsum(&samples)
    }
}

impl<D> DerivativeEstimator<'_, D> {
    /// `F''(t)` on one side.
    fn sample<C>(&self, ctx: &C, side: Side, y: &C::Real, value: &C::Real, g: &Jacobian<C::Real>) -> C::Real
    where
        C: RealContext,
        D: BoundaryDerivatives<C::Real>,
    {
        let first = self.derivatives.first(side, y);
        let second = self.derivatives.second(side, y);
        let g1_cubed = g.first.clone() * g.first.clone() * g.first.clone();

        second * g1_cubed - ctx.from_i64(3) * first * g.first.clone() * g.second.clone()
            + value.clone() * g.third.clone()
    }
}

/// First three derivatives of `g(t) = tanh(π/2·sinh t)`.
#[derive(Clone, Debug, PartialEq)]
struct Jacobian<R> {
    first: R,
    second: R,
    third: R,
}

impl<R: Real> Jacobian<R> {
    fn at<C: RealContext<Real = R>>(ctx: &C, t: &R) -> Self {
        let pi = ctx.pi();
        let two = ctx.from_i64(2);
        let half_pi = pi.clone() / two.clone();

        let sinh_t = ctx.sinh(t);
        let cosh_t = ctx.cosh(t);
        let u = half_pi.clone() * sinh_t.clone();
        let sinh_u = ctx.sinh(&u);
        let cosh_u = ctx.cosh(&u);
        let tanh_u = ctx.tanh(&u);

        let cosh_u_sq = cosh_u.clone() * cosh_u.clone();
        let cosh_t_sq = cosh_t.clone() * cosh_t.clone();
        let pi_sq = pi.clone() * pi.clone();

        // g' = π/2·cosh t / cosh²u
        let first = half_pi.clone() * cosh_t.clone() / cosh_u_sq.clone();

        // g'' = π/2·(sinh t − π·cosh²t·tanh u) / cosh²u
        let second = half_pi
            * (sinh_t.clone() - pi.clone() * cosh_t_sq.clone() * tanh_u.clone())
            / cosh_u_sq.clone();

        // g''' = π/4·cosh t·(2c − 2π²C²/c + π²C²c + π²C²·tanh u·sinh u − 6π·sinh t·sinh u) / c³
        // with c = cosh u, C = cosh t
        let pi_sq_cosh_t_sq = pi_sq * cosh_t_sq;
        let bracket = two.clone() * cosh_u.clone()
            - two.clone() * pi_sq_cosh_t_sq.clone() / cosh_u.clone()
            + pi_sq_cosh_t_sq.clone() * cosh_u.clone()
            + pi_sq_cosh_t_sq * tanh_u * sinh_u.clone()
            - ctx.from_i64(6) * pi.clone() * sinh_t * sinh_u;
        let quarter_pi = pi / (two.clone() * two);
        let third = quarter_pi * cosh_t * bracket / (cosh_u_sq * cosh_u);

        Self { first, second, third }
    }
}
