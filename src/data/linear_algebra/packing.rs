//! # Packing the strict upper triangle
//!
//! A symmetric matrix of order `n` is fully described by its diagonal and the `n * (n - 1) / 2`
//! values strictly above it. These functions map between a coordinate `(i, j)` with `i < j` and
//! the position of that value in a flat array holding only those values.
//!
//! The values are stored row by row: first `(0, 1), (0, 2), ..., (0, n - 1)`, then
//! `(1, 2), ..., (1, n - 1)`, and so on, ending with `(n - 2, n - 1)`. Row `i` holds
//! `n - 1 - i` values.
//!
//! The diagonal is not part of the packed array. When unpacking, the caller decides what is placed
//! on it.
use itertools::{Itertools, repeat_n};
use tracing::trace;

use crate::data::linear_algebra::error::PackingError;

/// Number of values in the strict upper triangle of a matrix of order `n`.
///
/// This is the length of the packed array, `n * (n - 1) / 2`. The even factor is halved before
/// multiplying.
///
/// # Return value
///
/// `None` if the number of values doesn't fit in a `usize`.
pub fn nr_pairs(n: usize) -> Option<usize> {
    match n {
        0 => Some(0),
        n if n % 2 == 0 => (n / 2).checked_mul(n - 1),
        n => n.checked_mul((n - 1) / 2),
    }
}

/// Offset of the first value of row `i` in the packed array.
///
/// Each row `r < i` contributes `n - 1 - r` values, which sums to `i * n - i * (i + 1) / 2`.
///
/// # Arguments
///
/// * `n`: Order of the matrix.
/// * `i`: Row index, at most `n - 1`. For `i == n - 1` the result equals `nr_pairs(n)`.
///
/// # Return value
///
/// `None` if `i` is not a row of the matrix, or if `nr_pairs(n)` doesn't fit in a `usize`.
pub fn row_start(n: usize, i: usize) -> Option<usize> {
    if i < n && nr_pairs(n).is_some() {
        Some(row_offset(n, i))
    } else {
        None
    }
}

/// Unchecked version of `row_start`.
///
/// Requires `i < n` and `nr_pairs(n)` to fit. The result is computed as `i * (2n - i - 1) / 2`,
/// where exactly one of the two factors is even. None of the intermediate values exceed
/// `max(2n, nr_pairs(n))`.
pub(super) fn row_offset(n: usize, i: usize) -> usize {
    debug_assert!(i < n);

    let other = 2 * n - i - 1;
    if i % 2 == 0 {
        (i / 2) * other
    } else {
        i * (other / 2)
    }
}

/// All coordinates of the strict upper triangle, in the order they are stored.
///
/// The `k`-th item yielded has offset `k`.
pub fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).tuple_combinations::<(usize, usize)>()
}

/// Position of the value at `(i, j)` in the packed array.
///
/// # Arguments
///
/// * `n`: Order of the matrix.
/// * `i`: Row index.
/// * `j`: Column index, should be larger than `i` and smaller than `n`.
///
/// # Return value
///
/// The offset `i * n - i * (i + 1) / 2 + j - i - 1`.
///
/// # Errors
///
/// `InvalidCoordinate` when the coordinate is on or below the diagonal, or outside the matrix.
/// `OrderTooLarge` when the packed array of this order can't be indexed with a `usize`.
pub fn offset_of(n: usize, i: usize, j: usize) -> Result<usize, PackingError> {
    if !(i < j && j < n) {
        return Err(PackingError::InvalidCoordinate { order: n, row: i, column: j });
    }
    checked_nr_pairs(n)?;

    Ok(row_offset(n, i) + (j - i - 1))
}

/// Coordinate of the value stored at `offset` in the packed array.
///
/// This is the inverse of `offset_of`. The row is the largest `i` for which `row_start(n, i)` does
/// not exceed the offset; it is found by binary search over the row starts, which increase with
/// `i`.
///
/// # Errors
///
/// `InvalidOffset` when the offset is not smaller than `nr_pairs(n)`. `OrderTooLarge` when the
/// packed array of this order can't be indexed with a `usize`.
pub fn coordinate_of(n: usize, offset: usize) -> Result<(usize, usize), PackingError> {
    if offset >= checked_nr_pairs(n)? {
        return Err(PackingError::InvalidOffset { order: n, offset });
    }

    // row_offset(n, low) <= offset < row_offset(n, high)
    let (mut low, mut high) = (0, n - 1);
    while high - low > 1 {
        let middle = low + (high - low) / 2;
        if row_offset(n, middle) <= offset {
            low = middle;
        } else {
            high = middle;
        }
    }

    let i = low;
    let j = i + 1 + (offset - row_offset(n, i));
    debug_assert!(j < n);

    Ok((i, j))
}

/// `nr_pairs` with the overflow reported as an error.
pub(super) fn checked_nr_pairs(n: usize) -> Result<usize, PackingError> {
    nr_pairs(n).ok_or(PackingError::OrderTooLarge { order: n })
}

/// Collect the strict upper triangle of a dense matrix.
///
/// Values on and below the diagonal are not read, so the matrix is not checked for symmetry.
///
/// # Arguments
///
/// * `matrix`: Row-major square matrix of order `n`.
/// * `n`: Order of the matrix.
///
/// # Return value
///
/// Packed array with `packed[offset_of(n, i, j)] == matrix[i][j]` for all `i < j`.
///
/// # Errors
///
/// `DimensionMismatch` when the matrix isn't `n` by `n`.
pub fn pack<F: Clone, R: AsRef<[F]>>(matrix: &[R], n: usize) -> Result<Vec<F>, PackingError> {
    check_dimensions(matrix, n)?;

    let packed = pairs(n)
        .map(|(i, j)| matrix[i].as_ref()[j].clone())
        .collect::<Vec<_>>();
    debug_assert_eq!(Some(packed.len()), nr_pairs(n));
    trace!(order = n, len = packed.len(), "packed dense matrix");

    Ok(packed)
}

/// Expand a packed array into a dense symmetric matrix.
///
/// # Arguments
///
/// * `packed`: Values of the strict upper triangle, in packed order.
/// * `n`: Order of the matrix.
/// * `diagonal`: Value placed on every diagonal entry.
///
/// # Return value
///
/// Row-major matrix with entries `(i, j)` and `(j, i)` both equal to `packed[offset_of(n, i, j)]`.
///
/// # Errors
///
/// `LengthMismatch` when `packed` doesn't have `nr_pairs(n)` values.
pub fn unpack<F: Clone>(packed: &[F], n: usize, diagonal: F) -> Result<Vec<Vec<F>>, PackingError> {
    let expected = checked_nr_pairs(n)?;
    if packed.len() != expected {
        return Err(PackingError::LengthMismatch { order: n, expected, found: packed.len() });
    }

    let dense = expand(packed, n, diagonal);
    trace!(order = n, "unpacked into dense matrix");

    Ok(dense)
}

/// Expand a packed array of which the length is known to match the order.
pub(super) fn expand<F: Clone>(packed: &[F], n: usize, diagonal: F) -> Vec<Vec<F>> {
    debug_assert_eq!(Some(packed.len()), nr_pairs(n));

    let mut dense = repeat_n(repeat_n(diagonal, n).collect::<Vec<_>>(), n).collect::<Vec<_>>();
    for ((i, j), value) in pairs(n).zip(packed) {
        dense[i][j] = value.clone();
        dense[j][i] = value.clone();
    }

    dense
}

fn check_dimensions<F, R: AsRef<[F]>>(matrix: &[R], order: usize) -> Result<(), PackingError> {
    if matrix.len() != order {
        return Err(PackingError::DimensionMismatch { order, row: None, found: matrix.len() });
    }

    for (index, row) in matrix.iter().enumerate() {
        let row: &[F] = row.as_ref();
        if row.len() != order {
            return Err(PackingError::DimensionMismatch { order, row: Some(index), found: row.len() });
        }
    }

    Ok(())
}
