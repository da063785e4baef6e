use isd::{Combination, number_of_combinations};
use itertools::Itertools;
use proptest::prelude::*;
use std::collections::HashSet;

fn collect(mut combination: Combination) -> Vec<Vec<usize>> {
    let mut subsets = Vec::new();
    while combination.has_next() {
        subsets.push(combination.current().to_vec());
        combination.advance();
    }
    subsets
}

#[test]
fn enumerates_pairs_in_lexicographic_order() {
    let subsets = collect(Combination::new(5, 2));
    assert_eq!(subsets.len(), 10);
    assert_eq!(subsets[..4], [vec![0, 1], vec![0, 2], vec![0, 3], vec![0, 4]]);
    assert_eq!(subsets.last(), Some(&vec![3, 4]));
}

#[test]
fn degenerate_sizes() {
    assert_eq!(collect(Combination::new(4, 0)), vec![Vec::<usize>::new()]);
    assert!(collect(Combination::new(2, 3)).is_empty());
    assert_eq!(collect(Combination::new(3, 3)), vec![vec![0, 1, 2]]);
}

#[test]
fn reset_rewinds() {
    let mut combination = Combination::new(6, 3);
    for _ in 0..7 {
        combination.advance();
    }
    combination.reset();
    assert_eq!(combination.current(), &[0, 1, 2]);
    assert_eq!(collect(combination).len(), 20);
}

#[test]
fn large_counts_saturate() {
    assert_eq!(number_of_combinations(2000, 1000), usize::MAX);
    assert_eq!(number_of_combinations(64, 32), 1_832_624_140_942_590_534);
}

proptest! {
    #[test]
    fn count_is_symmetric(n in 0..60usize, k in 0..60usize) {
        prop_assume!(k <= n);
        prop_assert_eq!(number_of_combinations(n, k), number_of_combinations(n, n - k));
    }

    #[test]
    fn order_matches_itertools(n in 0..10usize, k in 0..5usize) {
        let expected: Vec<Vec<usize>> = (0..n).combinations(k).collect();
        prop_assert_eq!(collect(Combination::new(n, k)), expected);
    }

    #[test]
    fn yields_count_distinct_subsets(n in 0..12usize, k in 0..6usize) {
        let combination = Combination::new(n, k);
        let expected = combination.count();
        let subsets = collect(combination);
        prop_assert_eq!(subsets.len(), expected);
        let distinct: HashSet<&Vec<usize>> = subsets.iter().collect();
        prop_assert_eq!(distinct.len(), subsets.len());
        for subset in &subsets {
            prop_assert_eq!(subset.len(), k);
            prop_assert!(subset.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert!(subset.iter().all(|&index| index < n));
        }
        prop_assert!(subsets.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
