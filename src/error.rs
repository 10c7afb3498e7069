//! Error types for mnn-spectral.

use thiserror::Error;

/// Errors that can occur while building the graph, embedding, or clustering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpectralError {
    /// A parameter (k, M, n) is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Eigensolver or k-means failure, or a numerical precondition
    /// (connectivity, symmetry) did not hold.
    #[error("numerical error: {0}")]
    NumericalError(String),

    /// A collaborator returned data that violates its documented shape.
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// Points of differing dimensionality in one input.
    #[error("dimension mismatch: expected {expected} dimensions, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// No points (or zero-dimensional points) were supplied.
    #[error("input is empty")]
    EmptyInput,
}

impl SpectralError {
    /// True for every error caused by the caller's parameters or input shape.
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            SpectralError::InvalidParameter(_)
                | SpectralError::DimensionMismatch { .. }
                | SpectralError::EmptyInput
        )
    }
}

pub type Result<T> = std::result::Result<T, SpectralError>;
