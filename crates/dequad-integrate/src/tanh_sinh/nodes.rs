//! Tanh-sinh abscissas and weights for one refinement level.
//!
//! With `u = π/2·sinh(t)` the substitution `x = tanh(u)` maps `(-∞, ∞)` onto
//! `(-1, 1)` with doubly exponential decay of the Jacobian. Sampling at
//! `t = h·j` gives, in distance-from-endpoint form,
//!
//! ```text
//! y_j = 1 - tanh(u_j) = 1 / (exp(u_j)·cosh(u_j))
//! w_j = h·(π/2)·cosh(h·j) / cosh(u_j)²
//! ```
//!
//! The first form loses everything to cancellation once `tanh(u_j)` rounds
//! to 1; the second keeps full relative precision down to the smallest `y_j`.
//!
//! # Truncation
//!
//! Weights decay like `exp(-π/2·e^{hj})`. The cutoff `J` is the smallest
//! index whose weight falls below `eps²`:
//!
//! ```text
//! J = ⌊ln(-W₋₁(-eps²/(2h))·2/π) / h⌋ + 1
//! ```
//!
//! which requires `-eps²/(2h) ≥ -1/e`, i.e. `2·e·eps² < h`.

use dequad_float::{Real, RealContext};
use dequad_special_func::lambert_wm1;
use rayon::prelude::*;
use tracing::trace;

use crate::error::{IntegrateError, IntegrateResult};

/// Abscissas and weights for `j = 0..=J` at one step size.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSet<R> {
    step: R,
    cutoff: usize,
    abscissas: Vec<R>,
    weights: Vec<R>,
}

impl<R: Real> NodeSet<R> {
    /// Generates the nodes for step `h` and tolerance `eps`.
    ///
    /// Nodes are computed independently per index. When there are at least
    /// `parallel_threshold` of them they are computed on the rayon pool;
    /// the result is identical either way.
    ///
    /// # Errors
    ///
    /// - [`IntegrateError::PrecisionUnderflow`] if `2·e·eps² ≥ h`
    /// - [`IntegrateError::SpecialFunction`] if the Lambert W solve fails
    pub fn generate<C>(ctx: &C, h: &R, eps: &R, parallel_threshold: usize) -> IntegrateResult<Self>
    where
        C: RealContext<Real = R>,
    {
        let cutoff = cutoff_index(ctx, h, eps)?;
        let count = cutoff + 1;

        let (abscissas, weights): (Vec<R>, Vec<R>) = if count >= parallel_threshold {
            (0..count)
                .into_par_iter()
                .map(|j| node(ctx, h, j))
                .unzip()
        } else {
            (0..count).map(|j| node(ctx, h, j)).unzip()
        };

        Ok(Self {
            step: h.clone(),
            cutoff,
            abscissas,
            weights,
        })
    }

    /// Step size `h`.
    pub fn step(&self) -> &R {
        &self.step
    }

    /// Cutoff index `J`.
    pub fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Number of nodes, `J + 1`.
    pub fn len(&self) -> usize {
        self.abscissas.len()
    }

    /// Always false: a node set holds at least the center node.
    pub fn is_empty(&self) -> bool {
        self.abscissas.is_empty()
    }

    /// Distances `y_j` from the endpoint, `y_0 = 1` decreasing towards 0.
    pub fn abscissas(&self) -> &[R] {
        &self.abscissas
    }

    /// Weights `w_j`.
    pub fn weights(&self) -> &[R] {
        &self.weights
    }
}

/// `J` for step `h`, after checking `2·e·eps² < h`.
fn cutoff_index<C: RealContext>(ctx: &C, h: &C::Real, eps: &C::Real) -> IntegrateResult<usize> {
    let two = ctx.from_i64(2);
    let eps_sq = eps.clone() * eps.clone();

    if !(two.clone() * ctx.e() * eps_sq.clone() < *h) {
        let step = ctx.to_f64(h);
        return Err(IntegrateError::PrecisionUnderflow {
            level: level_for_step(step),
            step,
            tolerance: ctx.to_f64(eps),
        });
    }

    let w = lambert_wm1(ctx, &(-eps_sq / (two.clone() * h.clone())))?;
    let reach = ctx.ln(&(-w * two / ctx.pi())) / h.clone();
    let floor = ctx.to_f64(&reach).floor().max(0.0);
    let cutoff = floor as usize + 1;

    trace!(step = ctx.to_f64(h), cutoff, "tanh-sinh cutoff");
    Ok(cutoff)
}

/// `(y_j, w_j)` for a single index.
fn node<C: RealContext>(ctx: &C, h: &C::Real, j: usize) -> (C::Real, C::Real) {
    let half_pi = ctx.pi() / ctx.from_i64(2);
    let t = h.clone() * ctx.from_i64(j as i64);
    let u = half_pi.clone() * ctx.sinh(&t);
    let cosh_u = ctx.cosh(&u);

    let weight = h.clone() * half_pi * ctx.cosh(&t) / (cosh_u.clone() * cosh_u.clone());
    let abscissa = ctx.one() / (ctx.exp(&u) * cosh_u);
    (abscissa, weight)
}

/// Level `k` uses `h = 2^-(k+1)`.
fn level_for_step(step: f64) -> usize {
    let halvings = -step.log2();
    if halvings.is_finite() && halvings >= 1.0 {
        halvings.round() as usize - 1
    } else {
        0
    }
}
