//! Error types for special function evaluation.

use thiserror::Error;

use crate::lambert::Branch;

/// Result type for special function evaluation.
pub type SpecialFuncResult<T> = Result<T, SpecialFuncError>;

/// Errors that can occur while evaluating a special function.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SpecialFuncError {
    /// The argument lies outside the real domain of the requested branch.
    #[error("Lambert W {branch} branch is not real at x = {x:e}")]
    OutOfDomain {
        /// Branch that was requested.
        branch: Branch,
        /// Offending argument, rounded to a double.
        x: f64,
    },

    /// The root iteration stalled.
    #[error("Lambert W iteration did not converge after {iterations} steps")]
    NoConvergence {
        /// Iterations performed.
        iterations: usize,
    },
}
