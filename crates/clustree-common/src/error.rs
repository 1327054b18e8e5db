//! Error types shared by the report and normalization layers.
//!
//! Only recoverable conditions live here. Broken invariants (an ordering
//! request for an item without a key, a cluster built for the wrong arena
//! slot) panic at the call site instead.

use std::fmt;

use thiserror::Error;

/// Failure to map a normalized feature vector back into data space.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("vector has {actual} dimensions but the normalization expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// A component was NaN or infinite and has no data-space counterpart.
    #[error("non-numeric feature value in dimension {dimension}")]
    NonNumeric { dimension: usize },
}

/// Failure while emitting a textual report fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("cannot restore feature values: {0}")]
    Normalization(#[from] NormalizationError),
    #[error("report sink rejected output")]
    Format(#[from] fmt::Error),
}

/// Rejected matrix construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("row {row} has {actual} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{rows}x{cols} matrix needs {expected} values, got {actual}")]
    Length {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_error_wraps_normalization_failure() {
        let err: ReportError = NormalizationError::NonNumeric { dimension: 2 }.into();
        assert_eq!(
            err.to_string(),
            "cannot restore feature values: non-numeric feature value in dimension 2"
        );
    }

    #[test]
    fn dimension_mismatch_message() {
        let err = NormalizationError::DimensionMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "vector has 2 dimensions but the normalization expects 3"
        );
    }
}
