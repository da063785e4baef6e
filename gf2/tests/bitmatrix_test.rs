use gf2::{BitMatrix, BitVec, Bitwise, BitwisePair};
use itertools::iproduct;
use proptest::prelude::*;
use rand::prelude::*;
use std::collections::HashSet;

proptest! {
    #[test]
    fn shape(row_count in 0..100usize, column_count in 0..100usize) {
        let matrix = BitMatrix::zeros(row_count, column_count);
        assert_eq!(matrix.row_count(), row_count);
        assert_eq!(matrix.column_count(), column_count);
        assert_eq!(matrix.shape(), (row_count, column_count));
        assert!(matrix.is_zero());
    }

    #[test]
    fn clone(matrix in arbitrary_bitmatrix(100)) {
        assert_eq!(matrix, matrix.clone());
    }

    #[test]
    fn swap_rows(matrix in nonempty_bitmatrix(100), raw_row_indexes in (0..100usize, 0..100usize)) {
        let row_indexes = [raw_row_indexes.0 % matrix.row_count(), raw_row_indexes.1 % matrix.row_count()];
        let mut swapped = matrix.clone();
        swapped.swap_rows(row_indexes[0], row_indexes[1]);
        assert_eq!(matrix.row(row_indexes[0]), swapped.row(row_indexes[1]));
        for row_index in (0..matrix.row_count()).collect::<HashSet<usize>>().difference(&HashSet::from(row_indexes)) {
            assert_eq!(matrix.row(*row_index), swapped.row(*row_index));
        }
    }

    #[test]
    fn add_into_row(matrix in nonempty_bitmatrix(100), raw_row_indexes in (0..100usize, 0..100usize)) {
        let to = raw_row_indexes.0 % matrix.row_count();
        let from = raw_row_indexes.1 % matrix.row_count();
        prop_assume!(to != from);
        let mut added = matrix.clone();
        added.add_into_row(to, from);
        assert_eq!(added.row(to), &(matrix.row(to) ^ matrix.row(from)));
        assert_eq!(added.row(from), matrix.row(from));
    }

    #[test]
    fn transpose(matrix in arbitrary_bitmatrix(150)) {
        let transposed = matrix.transposed();
        assert_eq!(transposed.shape(), (matrix.column_count(), matrix.row_count()));
        for (row, column) in iproduct!(0..matrix.row_count(), 0..matrix.column_count()) {
            assert_eq!(matrix[(row, column)], transposed[(column, row)]);
        }
        assert_eq!(transposed.transposed(), matrix);
    }

    #[test]
    fn transposed_rows_is_a_window(matrix in nonempty_bitmatrix(100), bounds in (0..100usize, 0..100usize)) {
        let start = bounds.0.min(bounds.1) % matrix.row_count();
        let stop = (bounds.0.max(bounds.1) % matrix.row_count()).max(start);
        let window = matrix.transposed_rows(start..stop);
        assert_eq!(window.shape(), (matrix.column_count(), stop - start));
        for column in 0..matrix.column_count() {
            assert_eq!(window.row(column), &matrix.column(column).extract(start, stop));
        }
    }

    #[test]
    fn permutation_round_trip((matrix, permutation) in matrix_with_permutation(80)) {
        let permuted = matrix.permuted_columns(&permutation);
        for (row, column) in iproduct!(0..matrix.row_count(), 0..matrix.column_count()) {
            assert_eq!(permuted[(row, column)], matrix[(row, permutation[column])]);
        }
        let mut inverse = vec![0; permutation.len()];
        for (position, &source) in permutation.iter().enumerate() {
            inverse[source] = position;
        }
        assert_eq!(permuted.permuted_columns(&inverse), matrix);
    }

    #[test]
    fn sum_of_columns_ignores_order((matrix, permutation) in matrix_with_permutation(80), count in 0..10usize) {
        let indexes: Vec<usize> = permutation.iter().copied().take(count).collect();
        let mut reversed = indexes.clone();
        reversed.reverse();
        let rows = 0..matrix.row_count();
        assert_eq!(matrix.sum_of_columns(&indexes, rows.clone()), matrix.sum_of_columns(&reversed, rows));
    }

    #[test]
    fn sum_of_columns_is_product_with_indicator((matrix, permutation) in matrix_with_permutation(80), count in 0..10usize) {
        let indexes: Vec<usize> = permutation.iter().copied().take(count).collect();
        let indicator = BitVec::with_support(matrix.column_count(), indexes.iter().copied());
        assert_eq!(matrix.sum_of_columns(&indexes, 0..matrix.row_count()), &matrix * &indicator);
        assert_eq!(matrix.transposed().sum_of_rows(&indexes), &matrix * &indicator);
    }

    #[test]
    fn matrix_vector_product(matrix in nonempty_bitmatrix(100), seed in any::<u64>()) {
        let vector = BitVec::random(matrix.column_count(), &mut SmallRng::seed_from_u64(seed));
        let product = &matrix * &vector;
        assert_eq!(product.len(), matrix.row_count());
        for row in 0..matrix.row_count() {
            assert_eq!(product.index(row), matrix.row(row).dot(&vector));
        }
    }

    #[test]
    fn text_form(matrix in nonempty_bitmatrix(60)) {
        prop_assume!(matrix.column_count() > 0);
        assert_eq!(matrix.to_string().parse::<BitMatrix>().unwrap(), matrix);
        assert_eq!(format!("{matrix:#}").parse::<BitMatrix>().unwrap(), matrix);
    }
}

#[test]
fn sum_of_rows_of_identity() {
    let identity = BitMatrix::identity(70);
    let sum = identity.sum_of_rows(&[1, 5, 69]);
    assert_eq!(sum.support().collect::<Vec<_>>(), vec![1, 5, 69]);
}

#[test]
#[should_panic(expected = "permutation length must equal the column count")]
fn permutation_length_mismatch_panics() {
    let matrix = BitMatrix::identity(4);
    let _ = matrix.permuted_columns(&[0, 1, 2]);
}

fn random_bitmatrix(row_count: usize, column_count: usize, seed: u64) -> BitMatrix {
    BitMatrix::random(row_count, column_count, &mut SmallRng::seed_from_u64(seed))
}

prop_compose! {
   fn arbitrary_bitmatrix(max_dimension: usize)(shape in (0..=max_dimension, 0..=max_dimension), seed in any::<u64>()) -> BitMatrix {
       random_bitmatrix(shape.0, shape.1, seed)
   }
}

prop_compose! {
   fn nonempty_bitmatrix(max_dimension: usize)(shape in (1..=max_dimension, 1..=max_dimension), seed in any::<u64>()) -> BitMatrix {
       random_bitmatrix(shape.0, shape.1, seed)
   }
}

prop_compose! {
   fn matrix_with_permutation(max_dimension: usize)(matrix in nonempty_bitmatrix(max_dimension), seed in any::<u64>()) -> (BitMatrix, Vec<usize>) {
       let mut permutation: Vec<usize> = (0..matrix.column_count()).collect();
       permutation.shuffle(&mut SmallRng::seed_from_u64(seed));
       (matrix, permutation)
   }
}
