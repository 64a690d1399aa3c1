//! Error types for numerical integration.

use dequad_special_func::SpecialFuncError;
use thiserror::Error;

/// Result type for integration.
pub type IntegrateResult<T> = Result<T, IntegrateError>;

/// Errors that abort an integration call.
///
/// None of these are retried internally. Recovering (relaxing the tolerance,
/// raising the level budget) is up to the caller.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum IntegrateError {
    /// The step size became too small for the requested tolerance
    /// (`2·e·eps² < h` no longer holds).
    #[error("step {step:e} at level {level} is too small for tolerance {tolerance:e}")]
    PrecisionUnderflow {
        /// Refinement level whose step violated the bound.
        level: usize,
        /// Step size at that level.
        step: f64,
        /// Requested tolerance.
        tolerance: f64,
    },

    /// The level budget ran out before the error estimate dropped below the
    /// tolerance.
    #[error("no convergence after {steps} levels (value {value:e}, error estimate {error:e})")]
    ConvergenceFailure {
        /// Levels evaluated.
        steps: usize,
        /// Best value, scaled to the original interval.
        value: f64,
        /// Magnitude of the last error estimate, scaled likewise.
        error: f64,
    },

    /// The bounds do not satisfy `a < b`.
    #[error("invalid interval [{a}, {b}]: lower bound must be below upper bound")]
    InvalidInterval {
        /// Lower bound.
        a: f64,
        /// Upper bound.
        b: f64,
    },

    /// The tolerance is not a finite number in `(0, 1)`.
    #[error("tolerance must be finite and in (0, 1), got {eps:e}")]
    InvalidTolerance {
        /// Offending tolerance.
        eps: f64,
    },

    /// Any other option is out of range.
    #[error("invalid {parameter}: {message}")]
    InvalidParameter {
        /// Name of the option.
        parameter: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// Sizing the node set failed inside Lambert W.
    #[error(transparent)]
    SpecialFunction(#[from] SpecialFuncError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use dequad_special_func::Branch;

    #[test]
    fn test_display() {
        let err = IntegrateError::ConvergenceFailure {
            steps: 3,
            value: 0.5,
            error: 1e-3,
        };
        let msg = err.to_string();
        assert!(msg.contains("3 levels"));
        assert!(msg.contains("1e-3"));

        let err = IntegrateError::InvalidInterval { a: 1.0, b: 0.0 };
        assert!(err.to_string().contains("[1, 0]"));
    }

    #[test]
    fn test_from_special_func() {
        let inner = SpecialFuncError::OutOfDomain {
            branch: Branch::Lower,
            x: -1.0,
        };
        let err: IntegrateError = inner.clone().into();
        assert_eq!(err, IntegrateError::SpecialFunction(inner));
    }
}
