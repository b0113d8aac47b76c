//! # Error reporting for packed symmetric matrices
//!
//! Invalid indices, offsets and dimensions are reported to the caller instead of being clamped or
//! causing a panic.
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fmt;

/// A `PackingError` is created when an index, an offset or a dimension doesn't match the order of
/// the matrix it was used with.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PackingError {
    /// The coordinate is not in the strict upper triangle of a matrix of this order.
    ///
    /// Either `row >= column`, or one of the two is not smaller than the order.
    InvalidCoordinate {
        /// Order of the matrix.
        order: usize,
        /// First index of the coordinate.
        row: usize,
        /// Second index of the coordinate.
        column: usize,
    },
    /// The offset is not smaller than the number of stored entries.
    InvalidOffset {
        /// Order of the matrix.
        order: usize,
        /// Offending offset.
        offset: usize,
    },
    /// A packed array doesn't have exactly `order * (order - 1) / 2` entries.
    LengthMismatch {
        /// Order of the matrix.
        order: usize,
        /// Number of entries required for this order.
        expected: usize,
        /// Number of entries provided.
        found: usize,
    },
    /// The number of values strictly above the diagonal doesn't fit in a `usize`.
    OrderTooLarge {
        /// Order of the matrix.
        order: usize,
    },
    /// Indices of rows and columns to remove are not strictly increasing.
    UnorderedIndices {
        /// Index that came first.
        previous: usize,
        /// Index that followed it, and is not larger.
        index: usize,
    },
    /// A dense matrix is not square of the expected order.
    DimensionMismatch {
        /// Order of the matrix.
        order: usize,
        /// `None` if the number of rows is wrong, otherwise the row with the wrong length.
        row: Option<usize>,
        /// Number of rows, or length of the row, that was found.
        found: usize,
    },
}

impl Display for PackingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PackingError::InvalidCoordinate { order, row, column } => write!(
                f,
                "coordinate ({}, {}) is not in the strict upper triangle of a matrix of order {}",
                row, column, order,
            ),
            PackingError::InvalidOffset { order, offset } => write!(
                f,
                "offset {} is out of range for a matrix of order {}",
                offset, order,
            ),
            PackingError::LengthMismatch { order, expected, found } => write!(
                f,
                "packed array has length {}, but a matrix of order {} needs {} entries",
                found, order, expected,
            ),
            PackingError::OrderTooLarge { order } => write!(
                f,
                "a matrix of order {} has too many values to index them with a usize",
                order,
            ),
            PackingError::UnorderedIndices { previous, index } => write!(
                f,
                "indices should be sorted and unique, but {} follows {}",
                index, previous,
            ),
            PackingError::DimensionMismatch { order, row: None, found } => write!(
                f,
                "dense matrix has {} rows, expected {}",
                found, order,
            ),
            PackingError::DimensionMismatch { order, row: Some(row), found } => write!(
                f,
                "row {} of the dense matrix has {} entries, expected {}",
                row, found, order,
            ),
        }
    }
}

impl Error for PackingError {}
