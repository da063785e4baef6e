//! The outer search loop: draw a permutation, reduce, search, translate back.

use crate::config::{DecoderConfig, PermutationStrategy};
use crate::error::{ConfigError, DecodeError};
use crate::permutation::{
    LexicographicPermutation, PartialPermutation, Permutation, PermutationCursor, RandomPermutation,
};
use crate::step::{Algorithm, DecodingStep};
use gf2::{BitMatrix, BitVec, Bitwise, IndexSet, remapped};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// `matrix · error`, the syndrome an error vector produces.
#[must_use]
pub fn syndrome_of(matrix: &BitMatrix, error: &BitVec) -> BitVec {
    matrix * error
}

/// A syndrome-decoding problem: find `e` with `weight(e) = ω` and `H·e = s`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    check_matrix: BitMatrix,
    syndrome: BitVec,
    weight: usize,
}

impl Instance {
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the matrix has no rows, more rows than columns, a
    /// syndrome of the wrong length, or when `weight` exceeds the code length.
    pub fn new(check_matrix: BitMatrix, syndrome: BitVec, weight: usize) -> Result<Self, DecodeError> {
        let (rows, columns) = check_matrix.shape();
        if rows == 0 {
            return Err(DecodeError::EmptyMatrix);
        }
        if rows > columns {
            return Err(DecodeError::TooManyRows { rows, columns });
        }
        if syndrome.len() != rows {
            return Err(DecodeError::SyndromeLength {
                expected: rows,
                found: syndrome.len(),
            });
        }
        if weight > columns {
            return Err(DecodeError::WeightTooLarge { weight, length: columns });
        }
        Ok(Self {
            check_matrix,
            syndrome,
            weight,
        })
    }

    #[must_use]
    pub fn check_matrix(&self) -> &BitMatrix {
        &self.check_matrix
    }

    #[must_use]
    pub fn syndrome(&self) -> &BitVec {
        &self.syndrome
    }

    #[must_use]
    pub fn weight(&self) -> usize {
        self.weight
    }

    /// Code length `n`.
    #[must_use]
    pub fn length(&self) -> usize {
        self.check_matrix.column_count()
    }

    /// Code dimension `k = n - rows`, the number of information columns.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.check_matrix.column_count() - self.check_matrix.row_count()
    }

    /// `true` when `error` has length `n`, weight `ω` and syndrome `s`.
    #[must_use]
    pub fn verify(&self, error: &BitVec) -> bool {
        error.len() == self.length()
            && error.weight() == self.weight
            && syndrome_of(&self.check_matrix, error) == self.syndrome
    }
}

/// Counters of one decoding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SearchStats {
    /// Permutations taken from the cursor.
    pub draws: u64,
    /// Draws skipped because the trailing submatrix was singular.
    pub singular: u64,
    /// Draws on which the step ran.
    pub searched: u64,
}

impl SearchStats {
    fn absorb(&mut self, other: SearchStats) {
        self.draws += other.draws;
        self.singular += other.singular;
        self.searched += other.searched;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub error_vector: BitVec,
    pub stats: SearchStats,
}

/// A check matrix and syndrome after elimination, in permuted column order.
#[derive(Clone)]
struct Reduced {
    matrix: BitMatrix,
    syndrome: BitVec,
}

fn reduce<S: DecodingStep>(step: &S, instance: &Instance, permutation: &Permutation) -> Option<Reduced> {
    let mut matrix = instance.check_matrix.permuted_columns(permutation);
    let mut syndrome = instance.syndrome.clone();
    step.reduce(&mut matrix, &mut syndrome)
        .then_some(Reduced { matrix, syndrome })
}

/// Runs the step and maps its candidate back to the original column order.
fn search<S: DecodingStep>(
    step: &S,
    instance: &Instance,
    reduced: &Reduced,
    permutation: &Permutation,
) -> Option<BitVec> {
    let candidate = step.search(&reduced.matrix, &reduced.syndrome, instance.weight)?;
    let support = remapped(&IndexSet::from(&candidate), permutation);
    let error = BitVec::with_support(instance.length(), support);
    if instance.verify(&error) {
        Some(error)
    } else {
        log::warn!("{} returned a candidate that does not solve the instance", step.name());
        None
    }
}

fn check_inputs<S: DecodingStep, C: PermutationCursor>(
    instance: &Instance,
    step: &S,
    cursor: &C,
) -> Result<(), DecodeError> {
    let rows = instance.check_matrix.row_count();
    step.check_fits(rows)?;
    step.check_weight(rows, instance.weight)?;
    if cursor.has_next() && cursor.current().len() != instance.length() {
        return Err(DecodeError::PermutationLength {
            expected: instance.length(),
            found: cursor.current().len(),
        });
    }
    log::debug!(
        "decoding n={} k={} weight={} with {}",
        instance.length(),
        instance.dimension(),
        instance.weight,
        step.parameters()
    );
    Ok(())
}

fn budget_spent(stats: &SearchStats, max_iterations: Option<u64>) -> bool {
    max_iterations.is_some_and(|budget| stats.draws >= budget)
}

fn report_success(step_name: &str, instance: &Instance, stats: &SearchStats) {
    log::info!(
        "{step_name} found a weight-{} error for n={} after {} draws",
        instance.weight,
        instance.length(),
        stats.draws
    );
}

/// Reduced matrix of the last full draw, reused while only information columns move.
struct BaseDraw {
    inverse: Permutation,
    reduced: Option<Reduced>,
}

impl BaseDraw {
    /// `None` when the base draw was singular; the trailing columns did not change since.
    fn repermuted(&self, permutation: &Permutation) -> Option<Reduced> {
        let base = self.reduced.as_ref()?;
        let relative: Vec<usize> = permutation.iter().map(|&column| self.inverse[column]).collect();
        Some(Reduced {
            matrix: base.matrix.permuted_columns(&relative),
            syndrome: base.syndrome.clone(),
        })
    }
}

/// Draws permutations from `cursor` until the step finds a solution.
///
/// When the cursor reports a [`changed_range`](PermutationCursor::changed_range) inside the
/// information columns, the draw reuses the elimination of the last full draw and only
/// reorders its columns.
///
/// Returns `Ok(None)` once the cursor is exhausted or `max_iterations` draws were made.
///
/// # Errors
///
/// Returns [`DecodeError::PermutationLength`] when the cursor permutes a different number
/// of columns and [`DecodeError::Parameters`] when the step's windows do not fit or the
/// weight is below what one match guesses.
pub fn decode<S: DecodingStep, C: PermutationCursor>(
    instance: &Instance,
    step: &S,
    cursor: &mut C,
    max_iterations: Option<u64>,
) -> Result<Option<Solution>, DecodeError> {
    check_inputs(instance, step, cursor)?;
    let information = instance.dimension();
    let mut stats = SearchStats::default();
    let mut base: Option<BaseDraw> = None;

    while cursor.has_next() {
        if budget_spent(&stats, max_iterations) {
            log::debug!("iteration budget of {} draws spent", stats.draws);
            return Ok(None);
        }
        let permutation = cursor.current().clone();
        let changed = cursor.changed_range();
        cursor.advance();
        stats.draws += 1;

        let reduced = match changed {
            None => {
                let reduced = reduce(step, instance, &permutation);
                base = Some(BaseDraw {
                    inverse: permutation.inverse(),
                    reduced: reduced.clone(),
                });
                reduced
            }
            Some(window) => match &base {
                Some(base) if window.end <= information => base.repermuted(&permutation),
                _ => reduce(step, instance, &permutation),
            },
        };
        let Some(reduced) = reduced else {
            log::trace!("draw {} is singular", stats.draws);
            stats.singular += 1;
            continue;
        };

        stats.searched += 1;
        if let Some(error_vector) = search(step, instance, &reduced, &permutation) {
            report_success(step.name(), instance, &stats);
            return Ok(Some(Solution { error_vector, stats }));
        }
    }
    log::debug!("permutation source exhausted after {} draws", stats.draws);
    Ok(None)
}

/// State shared by the workers of [`decode_parallel`].
struct Shared<C> {
    cursor: C,
    solution: Option<BitVec>,
    stats: SearchStats,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn work<S: DecodingStep, C: PermutationCursor>(
    worker: usize,
    instance: &Instance,
    step: &S,
    shared: &Mutex<Shared<C>>,
    max_iterations: Option<u64>,
) {
    let mut local = SearchStats::default();
    loop {
        let permutation = {
            let mut shared = lock(shared);
            if shared.solution.is_some()
                || !shared.cursor.has_next()
                || budget_spent(&shared.stats, max_iterations)
            {
                break;
            }
            shared.stats.draws += 1;
            let permutation = shared.cursor.current().clone();
            shared.cursor.advance();
            permutation
        };

        let Some(reduced) = reduce(step, instance, &permutation) else {
            log::trace!("worker {worker} drew a singular permutation");
            local.singular += 1;
            continue;
        };
        local.searched += 1;
        if let Some(error_vector) = search(step, instance, &reduced, &permutation) {
            let mut shared = lock(shared);
            if shared.solution.is_none() {
                log::debug!("worker {worker} published a solution");
                shared.solution = Some(error_vector);
            }
            break;
        }
    }
    lock(shared).stats.absorb(local);
}

/// [`decode`] on `threads` scoped workers sharing one cursor.
///
/// Workers take permutations from the cursor under a mutex and reduce and search without
/// holding it. The first solution published wins; the others finish their current draw and
/// stop. Every draw runs a full elimination.
///
/// # Errors
///
/// As for [`decode`].
pub fn decode_parallel<S, C>(
    instance: &Instance,
    step: &S,
    cursor: C,
    threads: usize,
    max_iterations: Option<u64>,
) -> Result<Option<Solution>, DecodeError>
where
    S: DecodingStep + Sync,
    C: PermutationCursor + Send,
{
    check_inputs(instance, step, &cursor)?;
    let shared = Mutex::new(Shared {
        cursor,
        solution: None,
        stats: SearchStats::default(),
    });
    std::thread::scope(|scope| {
        for worker in 0..threads.max(1) {
            let shared = &shared;
            scope.spawn(move || work(worker, instance, step, shared, max_iterations));
        }
    });

    let Shared { solution, stats, .. } = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
    Ok(solution.map(|error_vector| {
        report_success(step.name(), instance, &stats);
        Solution { error_vector, stats }
    }))
}

/// Builds the step and the permutation source from a [`DecoderConfig`].
#[derive(Debug, Clone)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the configuration does not validate.
    pub fn new(config: DecoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// The configured step, resolved for the instance's shape.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Parameters`] when a projection window does not fit or the
    /// weight is below what one match guesses.
    pub fn algorithm_for(&self, instance: &Instance) -> Result<Algorithm, DecodeError> {
        let algorithm = Algorithm::new(
            self.config.algorithm,
            &self.config.parameters,
            instance.check_matrix.shape(),
        )?;
        algorithm.check_weight(instance.check_matrix.row_count(), instance.weight)?;
        Ok(algorithm)
    }

    fn cursor(&self, instance: &Instance) -> Box<dyn PermutationCursor + Send> {
        let length = instance.length();
        let seed = self.config.seed;
        match self.config.permutation {
            PermutationStrategy::Partial { window } if window.min(instance.dimension()) > 0 => {
                let information = instance.dimension();
                let window = information - window.min(information)..information;
                Box::new(match seed {
                    Some(seed) => PartialPermutation::with_seed(length, window, seed),
                    None => PartialPermutation::new(length, window),
                })
            }
            PermutationStrategy::Lexicographic => Box::new(LexicographicPermutation::new(length)),
            PermutationStrategy::Random | PermutationStrategy::Partial { .. } => Box::new(match seed {
                Some(seed) => RandomPermutation::with_seed(length, seed),
                None => RandomPermutation::new(length),
            }),
        }
    }

    /// Sequential search with the configured step and permutation source.
    ///
    /// # Errors
    ///
    /// See [`decode`].
    pub fn decode(&self, instance: &Instance) -> Result<Option<Solution>, DecodeError> {
        let algorithm = self.algorithm_for(instance)?;
        let mut cursor = self.cursor(instance);
        decode(instance, &algorithm, &mut cursor, self.config.max_iterations)
    }

    /// Concurrent search on [`DecoderConfig::thread_count`] workers.
    ///
    /// # Errors
    ///
    /// See [`decode`].
    pub fn decode_parallel(&self, instance: &Instance) -> Result<Option<Solution>, DecodeError> {
        let algorithm = self.algorithm_for(instance)?;
        decode_parallel(
            instance,
            &algorithm,
            self.cursor(instance),
            self.config.thread_count(),
            self.config.max_iterations,
        )
    }
}
