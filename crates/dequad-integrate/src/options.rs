//! Integrator configuration.

use crate::error::{IntegrateError, IntegrateResult};

/// Level budget used when none is given.
pub const DEFAULT_MAX_STEPS: usize = 10;

/// Tolerance used by [`TanhSinhOptions::default`].
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Node count from which a level's nodes are generated in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Options for [`TanhSinh`](crate::TanhSinh).
///
/// The working precision is not an option of its own: it follows from
/// `eps` as `ceil(-log10(eps)) + 1` significant digits.
#[derive(Clone, Debug, PartialEq)]
pub struct TanhSinhOptions {
    /// Target accuracy. The loop stops once the error estimate drops below it.
    pub eps: f64,
    /// Maximum number of refinement levels.
    pub max_steps: usize,
    /// Minimum node count to enable parallel node generation.
    pub parallel_threshold: usize,
}

impl Default for TanhSinhOptions {
    fn default() -> Self {
        Self {
            eps: DEFAULT_TOLERANCE,
            max_steps: DEFAULT_MAX_STEPS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl TanhSinhOptions {
    /// Options with the given tolerance and defaults otherwise.
    #[must_use]
    pub fn new(eps: f64) -> Self {
        Self::default().with_tolerance(eps)
    }

    /// Sets the target accuracy.
    #[must_use]
    pub fn with_tolerance(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Sets the level budget.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the parallel node-generation threshold. `usize::MAX` keeps
    /// generation sequential.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Checks that the options describe a runnable integration.
    ///
    /// # Errors
    ///
    /// - [`IntegrateError::InvalidTolerance`] unless `0 < eps < 1`
    /// - [`IntegrateError::InvalidParameter`] if `max_steps` is zero
    pub fn validate(&self) -> IntegrateResult<()> {
        if !(self.eps.is_finite() && self.eps > 0.0 && self.eps < 1.0) {
            return Err(IntegrateError::InvalidTolerance { eps: self.eps });
        }
        if self.max_steps == 0 {
            return Err(IntegrateError::InvalidParameter {
                parameter: "max_steps",
                message: "at least one refinement level is required".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = TanhSinhOptions::default();
        assert_eq!(opts.eps, 1e-10);
        assert_eq!(opts.max_steps, 10);
        assert_eq!(opts.parallel_threshold, 256);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let opts = TanhSinhOptions::new(1e-20)
            .with_max_steps(4)
            .with_parallel_threshold(usize::MAX);
        assert_eq!(opts.eps, 1e-20);
        assert_eq!(opts.max_steps, 4);
        assert_eq!(opts.parallel_threshold, usize::MAX);
    }

    #[test]
    fn test_invalid_tolerance() {
        for eps in [0.0, -1e-3, 1.0, 2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                TanhSinhOptions::new(eps).validate(),
                Err(IntegrateError::InvalidTolerance { .. })
            ));
        }
    }

    #[test]
    fn test_zero_steps() {
        let err = TanhSinhOptions::default().with_max_steps(0).validate();
        assert!(matches!(
            err,
            Err(IntegrateError::InvalidParameter { parameter: "max_steps", .. })
        ));
    }
}
