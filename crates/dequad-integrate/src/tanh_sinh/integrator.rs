//! The adaptive refinement loop.

use dequad_float::{F64Context, RealContext};
use tracing::{debug, warn};

use super::estimate::{DerivativeEstimator, ErrorEstimator, HeuristicEstimator, LevelSnapshot};
use super::nodes::NodeSet;
use super::normalize::{BoundaryForms, BoundaryIntegrand, Derivatives, Normalized, Side};
use crate::error::{IntegrateError, IntegrateResult};
use crate::options::TanhSinhOptions;
use crate::result::TanhSinhResult;

/// Adaptive tanh-sinh integrator at a fixed working precision.
///
/// The precision context is derived once from the tolerance and shared by
/// every call; build bounds and integrand constants through
/// [`context`](Self::context) so they carry the same precision.
///
/// # Example
///
/// ```
/// use dequad_float::{BigFloatContext, RealContext};
/// use dequad_integrate::{TanhSinh, TanhSinhOptions};
///
/// let ts = TanhSinh::<BigFloatContext>::new(TanhSinhOptions::new(1e-20)).unwrap();
/// let ctx = ts.context().clone();
/// let (a, b) = (ctx.zero(), ctx.one());
///
/// // ∫₀¹ eˣ dx = e - 1
/// let result = ts.integrate(|x| ctx.exp(x), &a, &b).unwrap();
/// let exact = ctx.e() - ctx.one();
/// assert!(ctx.to_f64(&ctx.abs(&(result.value - exact))) < 1e-19);
/// ```
#[derive(Clone, Debug)]
pub struct TanhSinh<C: RealContext> {
    ctx: C,
    options: TanhSinhOptions,
    eps: C::Real,
}

impl<C: RealContext> TanhSinh<C> {
    /// Creates an integrator working at `ceil(-log10(eps)) + 1` digits.
    ///
    /// # Errors
    ///
    /// Fails if the options do not [validate](TanhSinhOptions::validate).
    pub fn new(options: TanhSinhOptions) -> IntegrateResult<Self> {
        options.validate()?;
        let ctx = C::for_tolerance(options.eps);
        let eps = ctx.from_f64(options.eps);
        Ok(Self { ctx, options, eps })
    }

    /// Working-precision context.
    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Options this integrator was built with.
    pub fn options(&self) -> &TanhSinhOptions {
        &self.options
    }

    /// Integrates `f` over `[a, b]`, estimating the error from successive
    /// levels.
    ///
    /// # Errors
    ///
    /// - [`IntegrateError::InvalidInterval`] unless `a < b`
    /// - [`IntegrateError::ConvergenceFailure`] if the level budget runs out
    /// - [`IntegrateError::PrecisionUnderflow`] if the step outruns the tolerance
    pub fn integrate<F>(&self, f: F, a: &C::Real, b: &C::Real) -> IntegrateResult<TanhSinhResult<C::Real>>
    where
        F: Fn(&C::Real) -> C::Real,
    {
        self.check_interval(a, b)?;
        let normalized = Normalized::new(f, a.clone(), b.clone());
        let half_width = normalized.half_width().clone();
        self.run(&normalized, &HeuristicEstimator, &half_width)
    }

    /// Integrates `f` over `[a, b]` using `f'` and `f''` for the error
    /// estimate.
    ///
    /// # Errors
    ///
    /// Same as [`integrate`](Self::integrate).
    pub fn integrate_with_derivatives<F, D1, D2>(
        &self,
        f: F,
        derivatives: &Derivatives<D1, D2>,
        a: &C::Real,
        b: &C::Real,
    ) -> IntegrateResult<TanhSinhResult<C::Real>>
    where
        F: Fn(&C::Real) -> C::Real,
        D1: Fn(&C::Real) -> C::Real,
        D2: Fn(&C::Real) -> C::Real,
    {
        self.check_interval(a, b)?;
        let normalized = Normalized::new(f, a.clone(), b.clone());
        let half_width = normalized.half_width().clone();
        let boundary = normalized.derivatives(derivatives);
        self.run(&normalized, &DerivativeEstimator::new(&boundary), &half_width)
    }

    /// Integrates over `[a, b]` given the boundary-relative forms
    /// `f_left(s) = f(a + s·(b-a)/2)` and `f_right(s) = f(b + s·(a-b)/2)`.
    ///
    /// For integrands singular at an endpoint, writing the forms by hand
    /// avoids the cancellation in `b - x` close to `b`.
    ///
    /// # Example
    ///
    /// ```
    /// use dequad_float::F64Context;
    /// use dequad_integrate::{TanhSinh, TanhSinhOptions};
    ///
    /// // ∫₀¹ dx/√(x(1-x)) = π, with the singular factors taken exactly
    /// let ts = TanhSinh::<F64Context>::new(TanhSinhOptions::new(1e-10)).unwrap();
    /// let form = |s: &f64| 1.0 / (s / 2.0 * (1.0 - s / 2.0)).sqrt();
    /// let result = ts.integrate_boundary(form, form, &0.0, &1.0).unwrap();
    /// assert!((result.value - std::f64::consts::PI).abs() < 1e-10);
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`integrate`](Self::integrate).
    pub fn integrate_boundary<FL, FR>(
        &self,
        f_left: FL,
        f_right: FR,
        a: &C::Real,
        b: &C::Real,
    ) -> IntegrateResult<TanhSinhResult<C::Real>>
    where
        FL: Fn(&C::Real) -> C::Real,
        FR: Fn(&C::Real) -> C::Real,
    {
        let half_width = self.check_interval(a, b)?;
        let forms = BoundaryForms {
            left: f_left,
            right: f_right,
        };
        self.run(&forms, &HeuristicEstimator, &half_width)
    }

    /// Integrates `f` over `[a, b]` with a hand-written form for one endpoint.
    ///
    /// `form` replaces `f` on `side` (see
    /// [`integrate_boundary`](Self::integrate_boundary) for the forms); the
    /// other side is still evaluated through `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use dequad_float::F64Context;
    /// use dequad_integrate::{Side, TanhSinh, TanhSinhOptions};
    ///
    /// // ∫₀¹ dx/√(1-x) = 2, singular at b
    /// let ts = TanhSinh::<F64Context>::new(TanhSinhOptions::new(1e-10)).unwrap();
    /// let f = |x: &f64| 1.0 / (1.0 - x).sqrt();
    /// let near_b = |s: &f64| 1.0 / (s / 2.0).sqrt();
    /// let result = ts.integrate_one_sided(f, Side::Right, near_b, &0.0, &1.0).unwrap();
    /// assert!((result.value - 2.0).abs() < 1e-10);
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`integrate`](Self::integrate).
    pub fn integrate_one_sided<F, G>(
        &self,
        f: F,
        side: Side,
        form: G,
        a: &C::Real,
        b: &C::Real,
    ) -> IntegrateResult<TanhSinhResult<C::Real>>
    where
        F: Fn(&C::Real) -> C::Real,
        G: Fn(&C::Real) -> C::Real,
    {
        self.check_interval(a, b)?;
        let normalized = Normalized::new(f, a.clone(), b.clone());
        let half_width = normalized.half_width().clone();
        self.run(&normalized.with_form(side, form), &HeuristicEstimator, &half_width)
    }

    /// Boundary-relative integration with the forms' own first and second
    /// derivatives (with respect to `s`) for the error estimate.
    ///
    /// # Errors
    ///
    /// Same as [`integrate`](Self::integrate).
    #[allow(clippy::too_many_arguments)]
    pub fn integrate_boundary_with_derivatives<FL, FR, L1, L2, R1, R2>(
        &self,
        f_left: FL,
        f_right: FR,
        left: Derivatives<L1, L2>,
        right: Derivatives<R1, R2>,
        a: &C::Real,
        b: &C::Real,
    ) -> IntegrateResult<TanhSinhResult<C::Real>>
    where
        FL: Fn(&C::Real) -> C::Real,
        FR: Fn(&C::Real) -> C::Real,
        L1: Fn(&C::Real) -> C::Real,
        L2: Fn(&C::Real) -> C::Real,
        R1: Fn(&C::Real) -> C::Real,
        R2: Fn(&C::Real) -> C::Real,
    {
        let half_width = self.check_interval(a, b)?;
        let forms = BoundaryForms {
            left: f_left,
            right: f_right,
        };
        let derivatives = BoundaryForms { left, right };
        self.run(&forms, &DerivativeEstimator::new(&derivatives), &half_width)
    }

    /// Runs the refinement loop with an arbitrary estimator.
    ///
    /// # Errors
    ///
    /// Same as [`integrate`](Self::integrate).
    pub fn integrate_with_estimator<I, E>(
        &self,
        integrand: &I,
        estimator: &E,
        a: &C::Real,
        b: &C::Real,
    ) -> IntegrateResult<TanhSinhResult<C::Real>>
    where
        I: BoundaryIntegrand<C::Real>,
        E: ErrorEstimator<C>,
    {
        let half_width = self.check_interval(a, b)?;
        self.run(integrand, estimator, &half_width)
    }

    /// `(b - a) / 2` after checking `a < b`.
    fn check_interval(&self, a: &C::Real, b: &C::Real) -> IntegrateResult<C::Real> {
        if !(a < b) {
            return Err(IntegrateError::InvalidInterval {
                a: self.ctx.to_f64(a),
                b: self.ctx.to_f64(b),
            });
        }
        Ok((b.clone() - a.clone()) / self.ctx.from_i64(2))
    }

    fn run<I, E>(&self, integrand: &I, estimator: &E, half_width: &C::Real) -> IntegrateResult<TanhSinhResult<C::Real>>
    where
        I: BoundaryIntegrand<C::Real>,
        E: ErrorEstimator<C>,
    {
        let ctx = &self.ctx;
        let max_steps = self.options.max_steps;
        let two = ctx.from_i64(2);

        let mut h = ctx.one();
        let mut history: Vec<C::Real> = Vec::new();
        let mut evaluations = 0;
        let mut last_error = ctx.one();

        for level in 0..max_steps {
            h = h / two.clone();

            let nodes = NodeSet::generate(ctx, &h, &self.eps, self.options.parallel_threshold)
                .map_err(|err| {
                    warn!(level, %err, "tanh-sinh aborted");
                    err
                })?;
            let abscissas = nodes.abscissas();
            let weights = nodes.weights();
            let cutoff = nodes.cutoff();

            let left_values: Vec<C::Real> = abscissas[1..]
                .iter()
                .map(|y| integrand.eval(Side::Left, y))
                .collect();
            let right_values: Vec<C::Real> = abscissas
                .iter()
                .map(|y| integrand.eval(Side::Right, y))
                .collect();
            evaluations += left_values.len() + right_values.len();

            // a + tiny s first, through the center, to b
            let summands: Vec<C::Real> = (1..=cutoff)
                .rev()
                .map(|j| left_values[j - 1].clone() * weights[j].clone())
                .chain((0..=cutoff).map(|j| right_values[j].clone() * weights[j].clone()))
                .collect();
            history.push(ctx.fsum(&summands));

            let snapshot = LevelSnapshot {
                level,
                eps: &self.eps,
                nodes: &nodes,
                history: &history,
                summands: &summands,
                left_values: &left_values,
                right_values: &right_values,
            };
            // no estimate beats the working precision
            let resolution = ctx.epsilon() * largest_magnitude(ctx, &summands);
            let error = ctx.max(&ctx.abs(&estimator.estimate(ctx, &snapshot)), &resolution);
            let value = &history[level];

            debug!(
                level,
                step = ctx.to_f64(&h),
                nodes = nodes.len(),
                value = ctx.to_f64(value),
                error = ctx.to_f64(&error),
                "tanh-sinh level"
            );

            if error < self.eps {
                return Ok(TanhSinhResult {
                    value: value.clone() * half_width.clone(),
                    error: error * half_width.clone(),
                    levels: level + 1,
                    evaluations,
                });
            }
            last_error = error;
        }

        let value = history.last().cloned().unwrap_or_else(|| ctx.zero()) * half_width.clone();
        let err = IntegrateError::ConvergenceFailure {
            steps: max_steps,
            value: ctx.to_f64(&value),
            error: ctx.to_f64(&(last_error * half_width.clone())),
        };
        warn!(%err, "tanh-sinh aborted");
        Err(err)
    }
}

fn largest_magnitude<C: RealContext>(ctx: &C, values: &[C::Real]) -> C::Real {
    values.iter().fold(ctx.zero(), |acc, v| ctx.max(&acc, &ctx.abs(v)))
}

/// Integrates `f` over `[a, b]` in double precision.
///
/// Shorthand for a [`TanhSinh<F64Context>`] built from `eps` and
/// `max_steps` (usually [`DEFAULT_MAX_STEPS`](crate::DEFAULT_MAX_STEPS)).
///
/// ```
/// use dequad_integrate::{tanh_sinh, DEFAULT_MAX_STEPS};
///
/// let result = tanh_sinh(|x| x * x, 0.0, 3.0, 1e-10, DEFAULT_MAX_STEPS).unwrap();
/// assert!((result.value - 9.0).abs() < 1e-9);
/// ```
///
/// # Errors
///
/// Same as [`TanhSinh::integrate`], plus option validation errors.
pub fn tanh_sinh<F>(f: F, a: f64, b: f64, eps: f64, max_steps: usize) -> IntegrateResult<TanhSinhResult<f64>>
where
    F: Fn(f64) -> f64,
{
    let options = TanhSinhOptions::new(eps).with_max_steps(max_steps);
    TanhSinh::<F64Context>::new(options)?.integrate(|x: &f64| f(*x), &a, &b)
}
