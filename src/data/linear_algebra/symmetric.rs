//! # Packed symmetric matrix
//!
//! Owns the packed strict upper triangle of a symmetric matrix, together with its order. The
//! diagonal is not stored.
use std::fmt::{Display, Formatter};
use std::fmt;
use std::mem;

use index_utils::remove_indices;
use itertools::repeat_n;
use num_traits::Zero;
use tracing::debug;

use crate::data::linear_algebra::error::PackingError;
use crate::data::linear_algebra::packing::{checked_nr_pairs, expand, nr_pairs, offset_of, pack, pairs, row_offset};

/// Symmetric matrix of which only the values strictly above the diagonal are stored.
///
/// Coordinates `(row, column)` and `(column, row)` refer to the same value. The diagonal can't be
/// read or written.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PackedSymmetric<F> {
    data: Vec<F>,
    order: usize,
}

impl<F> PackedSymmetric<F> {
    /// Wrap a packed array.
    ///
    /// # Arguments
    ///
    /// * `data`: Values of the strict upper triangle, in packed order.
    /// * `order`: Number of rows (and columns) of the represented matrix.
    ///
    /// # Errors
    ///
    /// `LengthMismatch` if `data` doesn't hold exactly `order * (order - 1) / 2` values,
    /// `OrderTooLarge` if that number doesn't fit in a `usize`.
    pub fn new(data: Vec<F>, order: usize) -> Result<Self, PackingError> {
        let expected = checked_nr_pairs(order)?;
        if data.len() == expected {
            Ok(Self { data, order, })
        } else {
            Err(PackingError::LengthMismatch { order, expected, found: data.len() })
        }
    }

    /// Number of rows, which equals the number of columns.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of values stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether no values are stored, which is the case for orders `0` and `1`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Retrieve the value at `(row, column)`, which is the same as the one at `(column, row)`.
    ///
    /// # Errors
    ///
    /// `InvalidCoordinate` on the diagonal or outside of the matrix.
    pub fn get(&self, row: usize, column: usize) -> Result<&F, PackingError> {
        let offset = self.offset(row, column)?;

        Ok(&self.data[offset])
    }

    /// Replace the value at both `(row, column)` and `(column, row)`.
    ///
    /// # Return value
    ///
    /// The value that was stored before.
    ///
    /// # Errors
    ///
    /// `InvalidCoordinate` on the diagonal or outside of the matrix.
    pub fn set(&mut self, row: usize, column: usize, value: F) -> Result<F, PackingError> {
        let offset = self.offset(row, column)?;

        Ok(mem::replace(&mut self.data[offset], value))
    }

    /// Iterate over all stored values, in packed order, together with their coordinate in the
    /// upper triangle.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &F)> {
        pairs(self.order).zip(&self.data)
    }

    /// Off-diagonal values of a row, sorted by column.
    ///
    /// The values left of the diagonal are spread over the packed array, the values right of it are
    /// stored contiguously.
    ///
    /// # Errors
    ///
    /// `InvalidCoordinate` if the row is outside of the matrix.
    pub fn row(&self, i: usize) -> Result<impl Iterator<Item = (usize, &F)>, PackingError> {
        if i >= self.order {
            return Err(PackingError::InvalidCoordinate { order: self.order, row: i, column: i });
        }

        let order = self.order;
        let left = (0..i)
            .map(move |column| (column, &self.data[row_offset(order, column) + i - column - 1]));
        let start = row_offset(order, i);
        let right = self.data[start..(start + order - 1 - i)].iter()
            .enumerate()
            .map(move |(k, value)| (i + 1 + k, value));

        Ok(left.chain(right))
    }

    /// Remove rows and the columns with the same indices.
    ///
    /// The order shrinks by the number of indices, remaining values keep their relative order.
    ///
    /// # Arguments
    ///
    /// * `indices`: Rows (and columns) to remove, sorted and unique.
    ///
    /// # Errors
    ///
    /// `UnorderedIndices` if the indices are not strictly increasing, `InvalidCoordinate` if an
    /// index is outside of the matrix. In both cases the matrix is left unchanged.
    pub fn remove_indices(&mut self, indices: &[usize]) -> Result<(), PackingError> {
        if let Some(pair) = indices.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(PackingError::UnorderedIndices { previous: pair[0], index: pair[1] });
        }
        if let Some(&index) = indices.iter().find(|&&index| index >= self.order) {
            return Err(PackingError::InvalidCoordinate { order: self.order, row: index, column: index });
        }
        if indices.is_empty() {
            return Ok(());
        }

        let offsets = pairs(self.order)
            .enumerate()
            .filter(|(_, (i, j))| indices.binary_search(i).is_ok() || indices.binary_search(j).is_ok())
            .map(|(offset, _)| offset)
            .collect::<Vec<_>>();
        remove_indices(&mut self.data, &offsets);

        let old_order = self.order;
        self.order -= indices.len();
        debug_assert_eq!(Some(self.data.len()), nr_pairs(self.order));
        debug!(old_order, order = self.order, removed = offsets.len(), "removed rows and columns");

        Ok(())
    }

    /// Packed values, see `packing` for their order.
    pub fn data(&self) -> &[F] {
        &self.data
    }

    /// Take the packed values.
    pub fn into_data(self) -> Vec<F> {
        self.data
    }

    fn offset(&self, row: usize, column: usize) -> Result<usize, PackingError> {
        let (i, j) = if row < column { (row, column) } else { (column, row) };

        offset_of(self.order, i, j)
            .map_err(|_| PackingError::InvalidCoordinate { order: self.order, row, column })
    }
}

impl<F: Clone> PackedSymmetric<F> {
    /// Read the strict upper triangle of a dense matrix.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the matrix isn't square of the given order.
    pub fn from_dense<R: AsRef<[F]>>(matrix: &[R], order: usize) -> Result<Self, PackingError> {
        let data = pack(matrix, order)?;
        debug!(order, "created packed matrix from dense matrix");

        Ok(Self { data, order, })
    }

    /// Create a matrix with all off-diagonal values being equal to a given value.
    ///
    /// # Errors
    ///
    /// `OrderTooLarge` if the number of values doesn't fit in a `usize`.
    pub fn constant(value: F, order: usize) -> Result<Self, PackingError> {
        let len = checked_nr_pairs(order)?;

        Ok(Self { data: repeat_n(value, len).collect(), order, })
    }

    /// Dense copy of this matrix.
    ///
    /// # Arguments
    ///
    /// * `diagonal`: Value to place on the diagonal, which isn't stored.
    pub fn to_dense(&self, diagonal: F) -> Vec<Vec<F>> {
        expand(&self.data, self.order, diagonal)
    }
}

impl<F: Zero + Clone> PackedSymmetric<F> {
    /// Create a matrix of which all off-diagonal values are zero.
    ///
    /// # Errors
    ///
    /// `OrderTooLarge` if the number of values doesn't fit in a `usize`.
    pub fn zeros(order: usize) -> Result<Self, PackingError> {
        Self::constant(F::zero(), order)
    }
}

impl<F: Display> Display for PackedSymmetric<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = 8;

        write!(f, "{}", repeat_n(" ", width).collect::<String>())?;
        for column in 0..self.order {
            write!(f, "{:^width$}", column, width = width)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", repeat_n("-", (1 + self.order) * width).collect::<String>())?;

        for row in 0..self.order {
            write!(f, "{:>width$}", format!("{} |", row), width = width)?;
            for column in 0..self.order {
                match self.get(row, column) {
                    _ if column < row => write!(f, "{:^width$}", "", width = width)?,
                    Ok(value) => write!(f, "{:^width$}", value.to_string(), width = width)?,
                    Err(_) => write!(f, "{:^width$}", "*", width = width)?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::data::linear_algebra::error::PackingError;
    use crate::data::linear_algebra::packing::pack;
    use crate::data::linear_algebra::symmetric::PackedSymmetric;

    fn test_matrix() -> PackedSymmetric<i32> {
        // 0 1 2 3
        //   0 4 5
        //     0 6
        //       0
        PackedSymmetric::new(vec![1, 2, 3, 4, 5, 6], 4).unwrap()
    }

    #[test]
    fn new() {
        let matrix = test_matrix();
        assert_eq!(matrix.order(), 4);
        assert_eq!(matrix.len(), 6);
        assert!(!matrix.is_empty());

        assert_eq!(
            PackedSymmetric::new(vec![1, 2], 3),
            Err(PackingError::LengthMismatch { order: 3, expected: 3, found: 2 }),
        );
        assert!(PackedSymmetric::<i32>::new(vec![], 1).unwrap().is_empty());
    }

    #[test]
    fn get_set() {
        let mut matrix = test_matrix();

        assert_eq!(matrix.get(0, 1), Ok(&1));
        assert_eq!(matrix.get(1, 0), Ok(&1));
        assert_eq!(matrix.get(3, 2), Ok(&6));
        assert_eq!(
            matrix.get(2, 2),
            Err(PackingError::InvalidCoordinate { order: 4, row: 2, column: 2 }),
        );
        assert_eq!(
            matrix.get(4, 1),
            Err(PackingError::InvalidCoordinate { order: 4, row: 4, column: 1 }),
        );

        // Setting through the lower triangle is visible in the upper triangle
        assert_eq!(matrix.set(3, 1, 50), Ok(5));
        assert_eq!(matrix.get(1, 3), Ok(&50));
        assert_eq!(matrix.data(), &[1, 2, 3, 4, 50, 6]);

        assert!(matrix.set(0, 0, 7).is_err());
        assert_eq!(matrix.data(), &[1, 2, 3, 4, 50, 6]);
    }

    #[test]
    fn constructors() {
        let matrix = PackedSymmetric::<f64>::zeros(5).unwrap();
        assert_eq!(matrix.len(), 10);
        assert!(matrix.iter().all(|(_, &value)| value == 0f64));

        let matrix = PackedSymmetric::constant("a", 3).unwrap();
        assert_eq!(matrix.into_data(), vec!["a"; 3]);

        let dense = [
            [9, 1, 2],
            [1, 9, 3],
            [2, 3, 9],
        ];
        let matrix = PackedSymmetric::from_dense(&dense, 3).unwrap();
        assert_eq!(matrix.data(), &[1, 2, 3]);
        assert!(PackedSymmetric::from_dense(&dense, 2).is_err());
    }

    #[test]
    fn iter() {
        let matrix = test_matrix();
        let items = matrix.iter().collect::<Vec<_>>();

        assert_eq!(items.len(), 6);
        assert_eq!(items[0], ((0, 1), &1));
        assert_eq!(items[3], ((1, 2), &4));
        assert_eq!(items[5], ((2, 3), &6));
    }

    #[test]
    fn row() {
        let matrix = test_matrix();

        assert_eq!(matrix.row(0).unwrap().collect::<Vec<_>>(), vec![(1, &1), (2, &2), (3, &3)]);
        assert_eq!(matrix.row(2).unwrap().collect::<Vec<_>>(), vec![(0, &2), (1, &4), (3, &6)]);
        assert_eq!(matrix.row(3).unwrap().collect::<Vec<_>>(), vec![(0, &3), (1, &5), (2, &6)]);
        assert!(matrix.row(4).is_err());
    }

    #[test]
    fn to_dense() {
        let matrix = test_matrix();
        assert_eq!(matrix.to_dense(0), vec![
            vec![0, 1, 2, 3],
            vec![1, 0, 4, 5],
            vec![2, 4, 0, 6],
            vec![3, 5, 6, 0],
        ]);
    }

    #[test]
    fn remove_indices() {
        // Removing nothing
        let mut matrix = test_matrix();
        matrix.remove_indices(&[]).unwrap();
        assert_eq!(matrix, test_matrix());

        // Removing a single row and column
        let mut matrix = test_matrix();
        matrix.remove_indices(&[1]).unwrap();
        assert_eq!(matrix.order(), 3);
        assert_eq!(matrix.data(), &[2, 3, 6]);

        // Same as packing the dense matrix without those rows and columns
        let mut matrix = test_matrix();
        matrix.remove_indices(&[0, 2]).unwrap();
        let dense = test_matrix().to_dense(0);
        let reduced = [1, 3]
            .iter()
            .map(|&i| [1, 3].iter().map(|&j| dense[i][j]).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert_eq!(matrix.data(), pack(&reduced, 2).unwrap().as_slice());

        // Everything
        let mut matrix = test_matrix();
        matrix.remove_indices(&[0, 1, 2, 3]).unwrap();
        assert_eq!(matrix.order(), 0);
        assert!(matrix.is_empty());

        // Out of range leaves the matrix untouched
        let mut matrix = test_matrix();
        assert!(matrix.remove_indices(&[1, 4]).is_err());
        assert_eq!(matrix, test_matrix());
    }

    #[test]
    fn remove_indices_unordered() {
        // Duplicate index
        let mut matrix = test_matrix();
        assert_eq!(
            matrix.remove_indices(&[1, 1]),
            Err(PackingError::UnorderedIndices { previous: 1, index: 1 }),
        );
        assert_eq!(matrix, test_matrix());

        // Decreasing indices
        let mut matrix = test_matrix();
        assert_eq!(
            matrix.remove_indices(&[2, 1]),
            Err(PackingError::UnorderedIndices { previous: 2, index: 1 }),
        );
        assert_eq!(matrix, test_matrix());

        // Reported before indices that are out of range
        let mut matrix = test_matrix();
        assert_eq!(
            matrix.remove_indices(&[0, 9, 9]),
            Err(PackingError::UnorderedIndices { previous: 9, index: 9 }),
        );
        assert_eq!(matrix.order(), 4);
        assert_eq!(matrix.len(), 6);
    }

    #[test]
    fn order_too_large() {
        assert_eq!(
            PackedSymmetric::constant(0u8, usize::MAX),
            Err(PackingError::OrderTooLarge { order: usize::MAX }),
        );
        assert_eq!(
            PackedSymmetric::<u8>::new(vec![], usize::MAX),
            Err(PackingError::OrderTooLarge { order: usize::MAX }),
        );
    }

    #[test]
    fn display() {
        let output = PackedSymmetric::new(vec![1, 2, 3], 3).unwrap().to_string();
        let lines = output.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 2 + 3);
        assert_eq!(lines[1], "-".repeat(4 * 8));
        assert!(lines[2].starts_with("     0 |"));
        assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), vec!["0", "|", "*", "1", "2"]);
        assert_eq!(lines[4].split_whitespace().collect::<Vec<_>>(), vec!["2", "|", "*"]);
    }
}
