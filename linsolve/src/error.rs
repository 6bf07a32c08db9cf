//! Error types for linsolve

use thiserror::Error;

/// Errors that can occur while solving a linear system
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolveError {
    /// The coefficient matrix is not square
    #[error("Coefficient matrix must be square, got ({rows}, {cols})")]
    DimensionMismatch { rows: usize, cols: usize },

    /// The coefficient matrix has no rows
    #[error("Coefficient matrix is empty")]
    EmptyMatrix,

    /// The right-hand side does not match the matrix dimension
    #[error("Right-hand side has length {actual}, expected {expected}")]
    RhsLengthMismatch { expected: usize, actual: usize },

    /// A diagonal entry is zero
    #[error("Zero pivot on the diagonal at row {row}")]
    SingularPivot { row: usize },

    /// The iteration budget ran out before the stopping criterion held
    #[error("Maximum iterations reached ({iterations}), last relative change {max_relative_change}")]
    MaxIterationsExceeded {
        iterations: usize,
        max_relative_change: f64,
    },
}

/// Errors that can occur while building a matrix
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Matrix data has length {actual}, expected {expected}")]
    DataLength { expected: usize, actual: usize },

    #[error("Row {row} has length {actual}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Result type for solver operations
pub type Result<T> = std::result::Result<T, SolveError>;
