#![allow(dead_code)]

use gf2::{BitMatrix, BitVec};
use isd::{Instance, syndrome_of};
use rand::prelude::*;

/// Check matrix `[A | I]` with shuffled columns, and the syndrome of a random error of the
/// given weight. The error itself is returned alongside.
pub fn planted_instance(rows: usize, columns: usize, weight: usize, seed: u64) -> (Instance, BitVec) {
    let mut random_number_generator = SmallRng::seed_from_u64(seed);
    let information = columns - rows;
    let mut systematic = BitMatrix::random(rows, columns, &mut random_number_generator);
    for row in 0..rows {
        for pivot in 0..rows {
            systematic.set((row, information + pivot), row == pivot);
        }
    }
    let mut order: Vec<usize> = (0..columns).collect();
    order.shuffle(&mut random_number_generator);
    let check_matrix = systematic.permuted_columns(&order);

    let support = rand::seq::index::sample(&mut random_number_generator, columns, weight);
    let error = BitVec::with_support(columns, support.iter());
    let syndrome = syndrome_of(&check_matrix, &error);
    let instance = Instance::new(check_matrix, syndrome, weight).expect("planted instance is well formed");
    (instance, error)
}

pub fn parse_matrix(text: &str) -> BitMatrix {
    text.parse().expect("valid matrix text")
}

pub fn parse_bits(text: &str) -> BitVec {
    text.parse().expect("valid bit text")
}
