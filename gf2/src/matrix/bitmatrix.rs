use super::transpose_kernel::transpose_64x64_inplace;
use crate::bit::{WORD_BIT_LEN, Word, word_count};
use crate::{BitVec, Bitwise, BitwiseMut, BitwisePair, BitwisePairMut, ParseBitsError, ShapeError};
use std::ops::{Index, Mul, Range};
use std::str::FromStr;

/// A dense matrix over GF(2) stored as a vector of equal-length [`BitVec`] rows.
///
/// Row operations (swap, add one row into another) are word-parallel; column access goes
/// bit by bit, so column-heavy algorithms should work on [`transposed`](BitMatrix::transposed)
/// copies instead.
///
/// # Construction
///
/// ```
/// use gf2::{BitMatrix, BitVec};
///
/// let zeros = BitMatrix::zeros(10, 20);
/// let identity = BitMatrix::identity(10);
/// let rows = vec!["101".parse::<BitVec>().unwrap(), "011".parse().unwrap()];
/// let matrix = BitMatrix::from_rows(rows).unwrap();
/// assert_eq!(matrix.shape(), (2, 3));
/// assert_eq!(matrix, "101\n011".parse().unwrap());
/// ```
///
/// # Accessing Elements
///
/// ```
/// use gf2::{BitMatrix, Bitwise, BitwiseMut};
///
/// let mut m = BitMatrix::zeros(5, 5);
/// m.set((2, 3), true);
/// assert_eq!(m.get((2, 3)), true);
/// assert_eq!(m[(2, 3)], true);
///
/// m.row_mut(2).assign_index(4, true);
/// assert_eq!(m.row(2).weight(), 2);
/// ```
#[must_use]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    rows: Vec<BitVec>,
    column_count: usize,
}

impl BitMatrix {
    /// Creates a new matrix with all bits set to zero.
    pub fn zeros(row_count: usize, column_count: usize) -> Self {
        Self {
            rows: vec![BitVec::zeros(column_count); row_count],
            column_count,
        }
    }

    /// Creates an identity matrix of the given dimension.
    ///
    /// ```
    /// use gf2::BitMatrix;
    ///
    /// let id = BitMatrix::identity(3);
    /// assert!(id[(1, 1)]);
    /// assert!(!id[(0, 1)]);
    /// ```
    pub fn identity(dimension: usize) -> Self {
        let mut matrix = Self::zeros(dimension, dimension);
        for index in 0..dimension {
            matrix.set((index, index), true);
        }
        matrix
    }

    /// Creates a matrix with uniformly random entries.
    pub fn random(row_count: usize, column_count: usize, random_number_generator: &mut impl rand::Rng) -> Self {
        Self {
            rows: (0..row_count)
                .map(|_| BitVec::random(column_count, random_number_generator))
                .collect(),
            column_count,
        }
    }

    /// Assembles a matrix from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Empty`] for an empty row list and [`ShapeError::RaggedRow`] when a
    /// row length differs from the first row.
    pub fn from_rows(rows: Vec<BitVec>) -> Result<Self, ShapeError> {
        let column_count = rows.first().ok_or(ShapeError::Empty)?.len();
        if let Some((row, found)) = rows
            .iter()
            .map(BitVec::len)
            .enumerate()
            .find(|(_, length)| *length != column_count)
        {
            return Err(ShapeError::RaggedRow {
                row,
                expected: column_count,
                found,
            });
        }
        Ok(Self { rows, column_count })
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Returns the matrix dimensions as `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.rows.iter().all(Bitwise::is_zero)
    }

    pub fn row(&self, index: usize) -> &BitVec {
        &self.rows[index]
    }

    pub fn row_mut(&mut self, index: usize) -> &mut BitVec {
        &mut self.rows[index]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &BitVec> {
        self.rows.iter()
    }

    #[must_use]
    pub fn get(&self, (row, column): (usize, usize)) -> bool {
        self.rows[row].index(column)
    }

    pub fn set(&mut self, (row, column): (usize, usize), to: bool) {
        self.rows[row].assign_index(column, to);
    }

    /// Copies column `index` into a vector of length [`row_count()`](BitMatrix::row_count).
    pub fn column(&self, index: usize) -> BitVec {
        self.rows.iter().map(|row| row.index(index)).collect()
    }

    /// Swaps two rows in place.
    pub fn swap_rows(&mut self, left_row_index: usize, right_row_index: usize) {
        self.rows.swap(left_row_index, right_row_index);
    }

    /// Adds (XORs) one row into another: `row[to_index] ^= row[from_index]`.
    ///
    /// ```
    /// use gf2::{BitMatrix, Bitwise};
    ///
    /// let mut m = BitMatrix::identity(3);
    /// m.add_into_row(0, 1);
    /// assert_eq!(m.row(0).weight(), 2);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the two indexes coincide.
    pub fn add_into_row(&mut self, to_index: usize, from_index: usize) {
        assert_ne!(to_index, from_index, "cannot add a row into itself");
        let (target, source) = if from_index < to_index {
            let (head, tail) = self.rows.split_at_mut(to_index);
            (&mut tail[0], &head[from_index])
        } else {
            let (head, tail) = self.rows.split_at_mut(from_index);
            (&mut head[to_index], &tail[0])
        };
        BitwisePairMut::bitxor_assign(target, source);
    }

    /// Returns the matrix whose column `i` is column `permutation[i]` of `self`.
    ///
    /// ```
    /// use gf2::BitMatrix;
    ///
    /// let m: BitMatrix = "110\n001".parse().unwrap();
    /// assert_eq!(m.permuted_columns(&[2, 0, 1]), "011\n100".parse().unwrap());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `permutation.len()` differs from the column count or an entry is out of range.
    pub fn permuted_columns(&self, permutation: &[usize]) -> Self {
        assert_eq!(
            permutation.len(),
            self.column_count,
            "permutation length must equal the column count"
        );
        let columns = self.transposed();
        let permuted = Self {
            rows: permutation.iter().map(|&source| columns.rows[source].clone()).collect(),
            column_count: self.row_count(),
        };
        permuted.transposed()
    }

    /// XOR over the selected columns, restricted to rows in `rows`.
    ///
    /// The result has length `rows.len()`; bit `r` is the parity of row `rows.start + r`
    /// on `indexes`. The cost is proportional to `rows.len() * indexes.len()`.
    ///
    /// ```
    /// use gf2::{BitMatrix, BitVec};
    ///
    /// let m: BitMatrix = "110\n011\n101".parse().unwrap();
    /// assert_eq!(m.sum_of_columns(&[0, 1], 0..3), "011".parse::<BitVec>().unwrap());
    /// assert_eq!(m.sum_of_columns(&[0, 1], 1..3), "11".parse::<BitVec>().unwrap());
    /// ```
    pub fn sum_of_columns(&self, indexes: &[usize], rows: Range<usize>) -> BitVec {
        self.rows[rows]
            .iter()
            .map(|row| indexes.iter().fold(false, |parity, &column| parity ^ row.index(column)))
            .collect()
    }

    /// XOR of the selected rows.
    pub fn sum_of_rows(&self, indexes: &[usize]) -> BitVec {
        let mut sum = BitVec::zeros(self.column_count);
        for &index in indexes {
            BitwisePairMut::bitxor_assign(&mut sum, &self.rows[index]);
        }
        sum
    }

    /// Returns the transpose.
    ///
    /// ```
    /// use gf2::BitMatrix;
    ///
    /// let m: BitMatrix = "110\n001".parse().unwrap();
    /// assert_eq!(m.transposed(), "10\n10\n01".parse().unwrap());
    /// ```
    pub fn transposed(&self) -> Self {
        transposed_slice(&self.rows, self.column_count)
    }

    /// Transpose of the row slice `rows`: shape `(column_count, rows.len())`.
    ///
    /// Row `j` of the result holds column `j` restricted to `rows`, so a column sum over
    /// that window becomes a [`sum_of_rows`](BitMatrix::sum_of_rows) of the result.
    pub fn transposed_rows(&self, rows: Range<usize>) -> Self {
        transposed_slice(&self.rows[rows], self.column_count)
    }
}

fn transposed_slice(rows: &[BitVec], column_count: usize) -> BitMatrix {
    let mut transposed = BitMatrix::zeros(column_count, rows.len());
    let mut tile = [0 as Word; WORD_BIT_LEN];
    for row_block in 0..word_count(rows.len()) {
        let block_rows = &rows[row_block * WORD_BIT_LEN..rows.len().min((row_block + 1) * WORD_BIT_LEN)];
        for column_block in 0..word_count(column_count) {
            tile.fill(0);
            for (slot, row) in tile.iter_mut().zip(block_rows) {
                *slot = row.as_words()[column_block];
            }
            transpose_64x64_inplace(&mut tile);
            let first_column = column_block * WORD_BIT_LEN;
            let last_column = column_count.min(first_column + WORD_BIT_LEN);
            for (offset, word) in tile.iter().take(last_column - first_column).enumerate() {
                transposed.rows[first_column + offset].words_mut()[row_block] = *word;
            }
        }
    }
    transposed
}

impl Index<(usize, usize)> for BitMatrix {
    type Output = bool;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        if self.get(index) { &true } else { &false }
    }
}

/// Matrix-vector product: bit `r` of the result is `row(r) · vector`.
///
/// ```
/// use gf2::{BitMatrix, BitVec};
///
/// let m: BitMatrix = "110\n011".parse().unwrap();
/// let x: BitVec = "100".parse().unwrap();
/// assert_eq!(&m * &x, "10".parse::<BitVec>().unwrap());
/// ```
impl Mul<&BitVec> for &BitMatrix {
    type Output = BitVec;

    fn mul(self, vector: &BitVec) -> BitVec {
        assert_eq!(vector.len(), self.column_count, "vector length must equal the column count");
        self.rows.iter().map(|row| row.dot(vector)).collect()
    }
}

impl std::fmt::Display for BitMatrix {
    /// One row per line; the alternate form separates rows with `|` on a single line.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let separator = if f.alternate() { "|" } else { "\n" };
        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitMatrix(shape={:?},value={:#})", self.shape(), self)
    }
}

/// Rows separated by newlines or `|`; blank lines are skipped.
impl FromStr for BitMatrix {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split(['\n', '|'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(BitVec::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_rows(rows)?)
    }
}
