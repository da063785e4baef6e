use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gf2::{BitMatrix, BitVec};
use isd::gauss::gauss_elimination;
use isd::permutation::RandomPermutation;
use isd::step::{AlgorithmKind, DecodingStep};
use isd::{Algorithm, Instance, ParameterConfig, decode, syndrome_of};
use rand::prelude::*;

fn planted_instance(rows: usize, columns: usize, weight: usize, seed: u64) -> Instance {
    let mut random_number_generator = SmallRng::seed_from_u64(seed);
    let mut matrix = BitMatrix::random(rows, columns, &mut random_number_generator);
    for row in 0..rows {
        for pivot in 0..rows {
            matrix.set((row, columns - rows + pivot), row == pivot);
        }
    }
    let support = rand::seq::index::sample(&mut random_number_generator, columns, weight);
    let error = BitVec::with_support(columns, support.iter());
    let syndrome = syndrome_of(&matrix, &error);
    Instance::new(matrix, syndrome, weight).unwrap()
}

pub fn gauss_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("gauss_elimination");
    group.sample_size(10);
    for (row_count, column_count) in [(64, 128), (256, 512), (512, 1024)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{row_count}x{column_count}")),
            &(row_count, column_count),
            |bencher, &(row_count, column_count)| {
                bencher.iter_batched(
                    || {
                        let mut random_number_generator = thread_rng();
                        (
                            BitMatrix::random(row_count, column_count, &mut random_number_generator),
                            BitVec::random(row_count, &mut random_number_generator),
                        )
                    },
                    |(mut matrix, mut syndrome)| gauss_elimination(&mut matrix, &mut syndrome),
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

pub fn decode_benchmark(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("decode");
    group.sample_size(10);
    let instance = planted_instance(40, 80, 4, 1);
    let parameters = ParameterConfig {
        p: Some(1),
        l: Some(4),
        l1: Some(3),
        l2: Some(2),
        ..ParameterConfig::default()
    };
    for kind in AlgorithmKind::ALL {
        let algorithm = Algorithm::new(kind, &parameters, instance.check_matrix().shape()).unwrap();
        group.bench_function(BenchmarkId::from_parameter(algorithm.name()), |bencher| {
            let mut seed = 0;
            bencher.iter(|| {
                seed += 1;
                let mut cursor = RandomPermutation::with_seed(instance.length(), seed);
                decode(&instance, &algorithm, &mut cursor, Some(100_000)).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, gauss_benchmark, decode_benchmark);
criterion_main!(benches);
