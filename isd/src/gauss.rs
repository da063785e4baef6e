use gf2::{BitMatrix, BitVec, Bitwise, BitwiseMut};

/// Reduces the trailing `rows` columns of `matrix` to the identity, applying every row
/// operation to `syndrome` as well.
///
/// Pivot `i` lives in column `k + i`, where `k = columns - rows`. When a pivot column has no
/// usable one on or below the diagonal the submatrix is singular and `false` is returned;
/// the matrix and syndrome are then partially reduced and must not be reused. Singularity is
/// an ordinary outcome for a random permutation.
///
/// ```
/// use gf2::{BitMatrix, BitVec};
/// use isd::gauss::gauss_elimination;
///
/// let mut matrix: BitMatrix = "1001\n0110".parse().unwrap();
/// let mut syndrome: BitVec = "01".parse().unwrap();
/// assert!(gauss_elimination(&mut matrix, &mut syndrome));
/// assert_eq!(matrix, "0110\n1001".parse::<BitMatrix>().unwrap());
/// assert_eq!(syndrome, "10".parse::<BitVec>().unwrap());
/// ```
///
/// # Panics
///
/// Panics if the syndrome length differs from the row count.
pub fn gauss_elimination(matrix: &mut BitMatrix, syndrome: &mut BitVec) -> bool {
    let (rows, columns) = matrix.shape();
    assert_eq!(syndrome.len(), rows, "syndrome length must equal the row count");
    let Some(information) = columns.checked_sub(rows) else {
        return false;
    };

    for pivot in 0..rows {
        let column = information + pivot;
        let mut below: Vec<usize> = (pivot + 1..rows).filter(|&row| matrix.get((row, column))).collect();
        if !matrix.get((pivot, column)) {
            let Some(replacement) = below.pop() else {
                return false;
            };
            matrix.swap_rows(pivot, replacement);
            syndrome.swap_indexes(pivot, replacement);
        }
        for row in below {
            add_row(matrix, syndrome, row, pivot);
        }
    }

    for pivot in (0..rows).rev() {
        let column = information + pivot;
        for row in 0..pivot {
            if matrix.get((row, column)) {
                add_row(matrix, syndrome, row, pivot);
            }
        }
    }
    true
}

fn add_row(matrix: &mut BitMatrix, syndrome: &mut BitVec, to: usize, from: usize) {
    matrix.add_into_row(to, from);
    if syndrome.index(from) {
        syndrome.negate_index(to);
    }
}

/// `true` when the trailing `rows` columns of `matrix` form the identity.
#[must_use]
pub fn is_systematic(matrix: &BitMatrix) -> bool {
    let (rows, columns) = matrix.shape();
    let Some(information) = columns.checked_sub(rows) else {
        return false;
    };
    (0..rows).all(|row| (0..rows).all(|pivot| matrix.get((row, information + pivot)) == (row == pivot)))
}
