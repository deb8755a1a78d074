use thiserror::Error;

/// The two failure classes callers can observe.
///
/// Structural problems with caller input are [`ErrorKind::InvalidArgument`];
/// conditions detected while computing (singular pivots, non-square input to
/// a square-only routine, failed positive-definiteness) are
/// [`ErrorKind::Runtime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Runtime,
}

/// All errors returned by `tessera-core`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A shape specification is invalid (zero dimension, ragged rows, ...).
    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape {
        shape: Vec<usize>,
        reason: &'static str,
    },

    /// A literal element is not a number.
    #[error("invalid element at ({row}, {column}): value is not a number")]
    InvalidElement { row: usize, column: usize },

    /// Operand shapes do not match the required layout.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// The right-hand operand cannot be broadcast onto the left-hand matrix.
    #[error("cannot broadcast shape {rhs:?} onto {lhs:?}")]
    BroadcastError { lhs: Vec<usize>, rhs: Vec<usize> },

    /// A row, column, or range index is out of bounds.
    #[error("index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// A square-only operation received a rectangular matrix.
    #[error("{operation} requires a square matrix, got {m} x {n}")]
    NotSquare {
        operation: &'static str,
        m: usize,
        n: usize,
    },

    /// Matrix is singular and cannot be inverted / decomposed.
    #[error("singular matrix")]
    SingularMatrix,

    /// Cholesky met a non-positive radicand on the diagonal.
    #[error("matrix is not positive definite (non-positive radicand at row {row})")]
    NotPositiveDefinite { row: usize },
}

impl CoreError {
    /// Collapse the error onto its externally observable class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidShape { .. }
            | Self::InvalidElement { .. }
            | Self::DimensionMismatch { .. }
            | Self::BroadcastError { .. }
            | Self::IndexOutOfBounds { .. }
            | Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NotSquare { .. } | Self::SingularMatrix | Self::NotPositiveDefinite { .. } => {
                ErrorKind::Runtime
            }
        }
    }

    pub(crate) fn not_square(operation: &'static str, m: usize, n: usize) -> Self {
        Self::NotSquare { operation, m, n }
    }
}

/// Convenience alias used throughout `tessera-core`.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let shape = CoreError::InvalidShape {
            shape: vec![0, 3],
            reason: "zero dimension",
        };
        assert_eq!(shape.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            CoreError::BroadcastError {
                lhs: vec![3, 3],
                rhs: vec![1, 2],
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(CoreError::SingularMatrix.kind(), ErrorKind::Runtime);
        assert_eq!(CoreError::not_square("det", 2, 3).kind(), ErrorKind::Runtime);
        assert_eq!(
            CoreError::NotPositiveDefinite { row: 1 }.kind(),
            ErrorKind::Runtime
        );
    }

    #[test]
    fn test_display() {
        let e = CoreError::not_square("LU decomposition", 2, 3);
        assert_eq!(
            e.to_string(),
            "LU decomposition requires a square matrix, got 2 x 3"
        );
        let e = CoreError::InvalidElement { row: 0, column: 2 };
        assert_eq!(
            e.to_string(),
            "invalid element at (0, 2): value is not a number"
        );
    }
}
