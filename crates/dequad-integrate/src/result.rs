//! Integration result.

/// Result of a converged tanh-sinh integration.
#[derive(Clone, Debug, PartialEq)]
pub struct TanhSinhResult<R> {
    /// Integral over the original interval.
    pub value: R,
    /// Magnitude of the final error estimate, scaled to the original interval.
    pub error: R,
    /// Refinement levels evaluated, including the converged one.
    pub levels: usize,
    /// Total number of integrand evaluations.
    pub evaluations: usize,
}

impl<R> TanhSinhResult<R> {
    /// Splits into `(value, error)`.
    pub fn into_parts(self) -> (R, R) {
        (self.value, self.error)
    }
}
