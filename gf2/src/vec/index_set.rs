use crate::Bitwise;
use sorted_iter::{SortedIterator, assume::AssumeSortedByItemExt};
use sorted_vec::SortedSet;

/// A set of column indexes, kept sorted and free of duplicates.
#[must_use]
#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub struct IndexSet {
    indexes: SortedSet<usize>,
}

impl IndexSet {
    pub fn new() -> IndexSet {
        IndexSet {
            indexes: SortedSet::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.indexes
    }

    /// Indices present in exactly one of the two sets.
    ///
    /// ```
    /// use gf2::IndexSet;
    ///
    /// let left: IndexSet = [1, 4, 7].into_iter().collect();
    /// let right: IndexSet = [4, 9].into_iter().collect();
    /// assert_eq!(left.symmetric_difference(&right).as_slice(), &[1, 7, 9]);
    /// ```
    pub fn symmetric_difference(&self, other: &IndexSet) -> IndexSet {
        self.support().symmetric_difference(other.support()).collect()
    }
}

impl Default for IndexSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<usize> for IndexSet {
    fn from_iter<Iterator: IntoIterator<Item = usize>>(iterator: Iterator) -> Self {
        let indexes = SortedSet::from_unsorted(iterator.into_iter().collect());
        IndexSet { indexes }
    }
}

impl IntoIterator for IndexSet {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.indexes.into_iter()
    }
}

impl Bitwise for IndexSet {
    #[inline]
    fn index(&self, index: usize) -> bool {
        self.indexes.binary_search(&index).is_ok()
    }

    #[inline]
    fn weight(&self) -> usize {
        self.indexes.len()
    }

    #[inline]
    fn support(&self) -> impl SortedIterator<Item = usize> {
        self.indexes.iter().copied().assume_sorted_by_item()
    }
}

impl<'life, T> From<&'life T> for IndexSet
where
    T: Bitwise + 'life,
{
    fn from(value: &'life T) -> Self {
        value.support().collect()
    }
}

/// Maps every index `i` of `bits` to `support[i]`.
///
/// ```
/// use gf2::{IndexSet, remapped};
///
/// let relative: IndexSet = [0, 2].into_iter().collect();
/// assert_eq!(remapped(&relative, &[5, 3, 1]).as_slice(), &[1, 5]);
/// ```
pub fn remapped(bits: &IndexSet, support: &[usize]) -> IndexSet {
    bits.support().map(|id| support[id]).collect()
}
