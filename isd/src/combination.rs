/// Cursor over the `k`-subsets of `0..n` in lexicographic order.
///
/// ```
/// use isd::Combination;
///
/// let mut combination = Combination::new(4, 2);
/// let mut subsets = Vec::new();
/// while combination.has_next() {
///     subsets.push(combination.current().to_vec());
///     combination.advance();
/// }
/// assert_eq!(subsets, [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]]);
/// ```
///
/// For `k = 0` the cursor yields one empty subset; for `k > n` it yields nothing.
#[derive(Debug, Clone)]
pub struct Combination {
    length: usize,
    indexes: Vec<usize>,
    exhausted: bool,
}

impl Combination {
    #[must_use]
    pub fn new(length: usize, size: usize) -> Self {
        Self {
            length,
            indexes: (0..size).collect(),
            exhausted: size > length,
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.exhausted
    }

    /// Current subset, ascending.
    #[must_use]
    pub fn current(&self) -> &[usize] {
        &self.indexes
    }

    pub fn advance(&mut self) {
        if self.exhausted {
            return;
        }
        let size = self.indexes.len();
        let last_movable = (0..size)
            .rev()
            .find(|&position| self.indexes[position] < self.length - size + position);
        match last_movable {
            Some(position) => {
                self.indexes[position] += 1;
                for next in position + 1..size {
                    self.indexes[next] = self.indexes[next - 1] + 1;
                }
            }
            None => self.exhausted = true,
        }
    }

    /// Rewinds to the first subset.
    pub fn reset(&mut self) {
        let size = self.indexes.len();
        self.indexes.clear();
        self.indexes.extend(0..size);
        self.exhausted = size > self.length;
    }

    /// Number of subsets the cursor yields from the start.
    #[must_use]
    pub fn count(&self) -> usize {
        number_of_combinations(self.length, self.indexes.len())
    }

    /// Calls `visit` on every remaining subset.
    pub fn for_each(mut self, mut visit: impl FnMut(&[usize])) {
        while self.has_next() {
            visit(self.current());
            self.advance();
        }
    }
}

/// Binomial coefficient `C(n, k)`, saturating at `usize::MAX`.
///
/// ```
/// use isd::number_of_combinations;
///
/// assert_eq!(number_of_combinations(134, 1), 134);
/// assert_eq!(number_of_combinations(10, 3), 120);
/// assert_eq!(number_of_combinations(3, 5), 0);
/// ```
#[must_use]
pub fn number_of_combinations(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut count: u128 = 1;
    for step in 0..k {
        let Some(product) = count.checked_mul((n - step) as u128) else {
            return usize::MAX;
        };
        count = product / (step as u128 + 1);
    }
    usize::try_from(count).unwrap_or(usize::MAX)
}
