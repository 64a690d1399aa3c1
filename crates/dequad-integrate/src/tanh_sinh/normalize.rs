//! Boundary-relative forms of an integrand.
//!
//! Tanh-sinh nodes cluster at the endpoints, so the integrand is evaluated
//! as a function of the distance `s ∈ [0, 2]` from one endpoint rather
//! than of `x` itself. The left form measures from `a`, the right form from
//! `b`:
//!
//! ```text
//! f_left(s)  = f(a + s·(b-a)/2)      f_left(0)  = f(a),  f_left(2)  = f(b)
//! f_right(s) = f(b + s·(a-b)/2)      f_right(0) = f(b),  f_right(2) = f(a)
//! ```
//!
//! Callers with an integrand singular at an endpoint can supply the two
//! forms directly ([`BoundaryForms`]) and avoid computing `b - x` in
//! floating point. When only one endpoint is troublesome, [`OneSided`]
//! takes the form for that side and falls back to `f` on the other.

use dequad_float::Real;

/// Which endpoint a boundary-relative form is measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Distance from the lower bound `a`.
    Left,
    /// Distance from the upper bound `b`.
    Right,
}

/// An integrand in boundary-relative form.
pub trait BoundaryIntegrand<R> {
    /// Value at distance `s` from the given endpoint, in units of the
    /// half-width.
    fn eval(&self, side: Side, s: &R) -> R;
}

/// First and second derivatives of a boundary-relative integrand.
pub trait BoundaryDerivatives<R> {
    /// d/ds of the form on `side`.
    fn first(&self, side: Side, s: &R) -> R;

    /// d²/ds² of the form on `side`.
    fn second(&self, side: Side, s: &R) -> R;
}

/// First and second derivative of an integrand.
#[derive(Clone, Copy, Debug)]
pub struct Derivatives<D1, D2> {
    /// f'
    pub first: D1,
    /// f''
    pub second: D2,
}

impl<D1, D2> Derivatives<D1, D2> {
    /// Pairs the two derivative callables.
    pub fn new(first: D1, second: D2) -> Self {
        Self { first, second }
    }
}

/// An integrand over `[a, b]` seen from both endpoints.
#[derive(Clone, Debug)]
pub struct Normalized<F, R> {
    f: F,
    a: R,
    b: R,
    half_width: R,
}

impl<F, R> Normalized<F, R>
where
    F: Fn(&R) -> R,
    R: Real,
{
    /// Wraps `f` on `[a, b]`. The caller guarantees `a < b`.
    pub fn new(f: F, a: R, b: R) -> Self {
        let two = R::one() + R::one();
        let half_width = (b.clone() - a.clone()) / two;
        Self { f, a, b, half_width }
    }

    /// `(b - a) / 2`, the factor that maps results back to `[a, b]`.
    pub fn half_width(&self) -> &R {
        &self.half_width
    }

    /// `f(a + s·(b-a)/2)`
    pub fn left(&self, s: &R) -> R {
        (self.f)(&self.left_point(s))
    }

    /// `f(b + s·(a-b)/2)`
    pub fn right(&self, s: &R) -> R {
        (self.f)(&self.right_point(s))
    }

    fn left_point(&self, s: &R) -> R {
        self.a.clone() + s.clone() * self.half_width.clone()
    }

    fn right_point(&self, s: &R) -> R {
        self.b.clone() - s.clone() * self.half_width.clone()
    }

    /// Chain-rule scaled derivatives of both forms.
    pub fn derivatives<'d, D1, D2>(
        &'d self,
        derivatives: &'d Derivatives<D1, D2>,
    ) -> NormalizedDerivatives<'d, F, R, D1, D2> {
        NormalizedDerivatives {
            normalized: self,
            derivatives,
        }
    }
}

impl<F, R> BoundaryIntegrand<R> for Normalized<F, R>
where
    F: Fn(&R) -> R,
    R: Real,
{
    fn eval(&self, side: Side, s: &R) -> R {
        match side {
            Side::Left => self.left(s),
            Side::Right => self.right(s),
        }
    }
}

/// A [`Normalized`] integrand with a caller-supplied form on one side.
///
/// Built by [`Normalized::with_form`].
#[derive(Debug)]
pub struct OneSided<'n, F, R, G> {
    normalized: &'n Normalized<F, R>,
    side: Side,
    form: G,
}

impl<F, R> Normalized<F, R>
where
    F: Fn(&R) -> R,
    R: Real,
{
    /// Replaces the form on `side` with `form`, keeping `f` on the other.
    pub fn with_form<G>(&self, side: Side, form: G) -> OneSided<'_, F, R, G>
    where
        G: Fn(&R) -> R,
    {
        OneSided {
            normalized: self,
            side,
            form,
        }
    }
}

impl<F, R, G> BoundaryIntegrand<R> for OneSided<'_, F, R, G>
where
    F: Fn(&R) -> R,
    G: Fn(&R) -> R,
    R: Real,
{
    fn eval(&self, side: Side, s: &R) -> R {
        if side == self.side {
            (self.form)(s)
        } else {
            self.normalized.eval(side, s)
        }
    }
}

/// Derivatives of [`Normalized`] forms.
///
/// The k-th derivative of the left form is `((b-a)/2)^k · f⁽ᵏ⁾(a + s(b-a)/2)`
/// and of the right form `((a-b)/2)^k · f⁽ᵏ⁾(b + s(a-b)/2)`, so odd orders
/// flip sign on the right.
#[derive(Debug)]
pub struct NormalizedDerivatives<'d, F, R, D1, D2> {
    normalized: &'d Normalized<F, R>,
    derivatives: &'d Derivatives<D1, D2>,
}

impl<F, R, D1, D2> BoundaryDerivatives<R> for NormalizedDerivatives<'_, F, R, D1, D2>
where
    F: Fn(&R) -> R,
    D1: Fn(&R) -> R,
    D2: Fn(&R) -> R,
    R: Real,
{
    fn first(&self, side: Side, s: &R) -> R {
        let n = self.normalized;
        match side {
            Side::Left => (self.derivatives.first)(&n.left_point(s)) * n.half_width.clone(),
            Side::Right => -((self.derivatives.first)(&n.right_point(s)) * n.half_width.clone()),
        }
    }

    fn second(&self, side: Side, s: &R) -> R {
        let n = self.normalized;
        let scale = n.half_width.clone() * n.half_width.clone();
        let x = match side {
            Side::Left => n.left_point(s),
            Side::Right => n.right_point(s),
        };
        (self.derivatives.second)(&x) * scale
    }
}

/// Caller-supplied boundary-relative forms.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryForms<FL, FR> {
    /// Form measured from the lower bound.
    pub left: FL,
    /// Form measured from the upper bound.
    pub right: FR,
}

impl<R, FL, FR> BoundaryIntegrand<R> for BoundaryForms<FL, FR>
where
    FL: Fn(&R) -> R,
    FR: Fn(&R) -> R,
{
    fn eval(&self, side: Side, s: &R) -> R {
        match side {
            Side::Left => (self.left)(s),
            Side::Right => (self.right)(s),
        }
    }
}

impl<R, L1, L2, R1, R2> BoundaryDerivatives<R> for BoundaryForms<Derivatives<L1, L2>, Derivatives<R1, R2>>
where
    L1: Fn(&R) -> R,
    L2: Fn(&R) -> R,
    R1: Fn(&R) -> R,
    R2: Fn(&R) -> R,
{
    fn first(&self, side: Side, s: &R) -> R {
        match side {
            Side::Left => (self.left.first)(s),
            Side::Right => (self.right.first)(s),
        }
    }

    fn second(&self, side: Side, s: &R) -> R {
        match side {
            Side::Left => (self.left.second)(s),
            Side::Right => (self.right.second)(s),
        }
    }
}
