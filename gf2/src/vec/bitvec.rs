use crate::bit::{WORD_BIT_LEN, Word, word_count};
use crate::{Bitwise, BitwiseMut, BitwisePair, BitwisePairMut, ParseBitsError};
use sorted_iter::SortedIterator;
use std::cmp::Ordering;
use std::ops::{BitAnd, BitAndAssign, BitXor, BitXorAssign};
use std::str::FromStr;

/// A fixed-length sequence of bits packed into 64-bit words.
///
/// Bit `i` lives in word `i / 64` at position `i % 64`, so index 0 is the least significant
/// position. Storage past [`len()`](BitVec::len) is kept zero, which makes equality, hashing
/// and ordering plain word comparisons.
///
/// # Construction
///
/// ```
/// use gf2::BitVec;
///
/// let zeros = BitVec::zeros(100);
/// let ones = BitVec::ones(100);
/// let from_iter: BitVec = [true, false, true, false].into_iter().collect();
/// let parsed: BitVec = "1010".parse().unwrap();
/// assert_eq!(parsed, from_iter);
/// ```
///
/// # Bit Operations
///
/// ```
/// use gf2::{BitVec, Bitwise, BitwiseMut, BitwisePairMut};
///
/// let mut v = BitVec::zeros(10);
/// v.assign_index(3, true);
/// v.assign_index(7, true);
/// assert_eq!(v.weight(), 2);
/// assert_eq!(v.support().collect::<Vec<_>>(), vec![3, 7]);
///
/// v.bitxor_assign(&BitVec::ones(10));
/// assert_eq!(v.weight(), 8);
/// ```
///
/// # Ordering
///
/// Vectors are ordered by length first and then by numeric value, reading bit `len() - 1`
/// as the most significant. Sorting collision lists relies on equal keys being adjacent,
/// which any total order consistent with equality provides.
#[must_use]
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BitVec {
    words: Vec<Word>,
    length: usize,
}

impl BitVec {
    /// Creates a new `BitVec` with all bits set to zero.
    ///
    /// ```
    /// use gf2::{BitVec, Bitwise};
    ///
    /// let v = BitVec::zeros(100);
    /// assert_eq!(v.len(), 100);
    /// assert!(v.is_zero());
    /// ```
    pub fn zeros(length: usize) -> BitVec {
        BitVec {
            words: vec![0; word_count(length)],
            length,
        }
    }

    /// Creates a new `BitVec` with all bits set to one.
    ///
    /// ```
    /// use gf2::{BitVec, Bitwise};
    ///
    /// let v = BitVec::ones(70);
    /// assert_eq!(v.weight(), 70);
    /// ```
    pub fn ones(length: usize) -> BitVec {
        let mut vec = BitVec {
            words: vec![Word::MAX; word_count(length)],
            length,
        };
        vec.clear_tail();
        vec
    }

    /// Draws every bit uniformly at random.
    pub fn random(length: usize, random_number_generator: &mut impl rand::Rng) -> BitVec {
        let mut vec = BitVec::zeros(length);
        random_number_generator.fill(vec.words.as_mut_slice());
        vec.clear_tail();
        vec
    }

    /// Returns a vector of `length` bits whose support is `indexes`.
    ///
    /// # Panics
    ///
    /// Panics if an index is not smaller than `length`.
    pub fn with_support(length: usize, indexes: impl IntoIterator<Item = usize>) -> BitVec {
        let mut vec = BitVec::zeros(length);
        for index in indexes {
            assert!(index < length, "index {index} out of range for length {length}");
            vec.assign_index(index, true);
        }
        vec
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// View the data as a flat slice of words.
    #[must_use]
    pub fn as_words(&self) -> &[Word] {
        &self.words
    }

    /// Callers keep the bits past `len()` zero.
    pub(crate) fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    /// Returns an iterator over the bits as boolean values.
    ///
    /// ```
    /// use gf2::{BitVec, BitwiseMut};
    ///
    /// let mut v = BitVec::zeros(5);
    /// v.assign_index(1, true);
    /// v.assign_index(3, true);
    /// let bits: Vec<bool> = v.iter().collect();
    /// assert_eq!(bits, vec![false, true, false, true, false]);
    /// ```
    pub fn iter(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        (0..self.length).map(|index| self.words.index(index))
    }

    /// Resizes the bit vector to a new length, preserving existing data.
    ///
    /// New bits are zero.
    pub fn resize(&mut self, new_length: usize) {
        self.words.resize(word_count(new_length), 0);
        self.length = new_length;
        self.clear_tail();
    }

    /// Extracts the bits `start..stop` into a new vector.
    ///
    /// ```
    /// use gf2::{BitVec, Bitwise};
    ///
    /// let v: BitVec = "0010101000".parse().unwrap();
    /// let slice = v.extract(2, 7);
    /// assert_eq!(slice.len(), 5);
    /// assert_eq!(slice.support().collect::<Vec<_>>(), vec![0, 2, 4]);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `start > stop` or `stop > len()`.
    pub fn extract(&self, start: usize, stop: usize) -> BitVec {
        assert!(start <= stop && stop <= self.length, "invalid range {start}..{stop} for length {}", self.length);
        let length = stop - start;
        let mut extracted = BitVec::zeros(length);
        let shift = start % WORD_BIT_LEN;
        let first = start / WORD_BIT_LEN;
        for (offset, word) in extracted.words.iter_mut().enumerate() {
            let low = self.words.get(first + offset).copied().unwrap_or(0);
            let high = self.words.get(first + offset + 1).copied().unwrap_or(0);
            *word = if shift == 0 {
                low
            } else {
                (low >> shift) | (high << (WORD_BIT_LEN - shift))
            };
        }
        extracted.clear_tail();
        extracted
    }

    /// Swaps the bits at positions `left` and `right`.
    pub fn swap_indexes(&mut self, left: usize, right: usize) {
        let (left_bit, right_bit) = (self.index(left), self.index(right));
        if left_bit != right_bit {
            self.negate_index(left);
            self.negate_index(right);
        }
    }

    /// Hamming weight of `self ^ other` without allocating.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    #[must_use]
    pub fn distance(&self, other: &BitVec) -> usize {
        self.xor_weight(other)
    }

    fn clear_tail(&mut self) {
        let used = self.length % WORD_BIT_LEN;
        if used == 0 {
            return;
        }
        if let Some(last) = self.words.last_mut() {
            *last &= (1 << used) - 1;
        }
    }

    fn assert_same_length(&self, other: &BitVec) {
        assert_eq!(self.length, other.length, "bit vector lengths differ");
    }
}

impl Bitwise for BitVec {
    #[inline]
    fn index(&self, index: usize) -> bool {
        debug_assert!(index < self.length, "index {index} out of range for length {}", self.length);
        self.words.index(index)
    }

    #[inline]
    fn support(&self) -> impl SortedIterator<Item = usize> {
        self.words.support()
    }

    #[inline]
    fn weight(&self) -> usize {
        self.words.weight()
    }

    #[inline]
    fn parity(&self) -> bool {
        self.words.parity()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.words.is_zero()
    }
}

impl BitwiseMut for BitVec {
    #[inline]
    fn assign_index(&mut self, index: usize, to: bool) {
        assert!(index < self.length, "index {index} out of range for length {}", self.length);
        self.words.assign_index(index, to);
    }

    #[inline]
    fn negate_index(&mut self, index: usize) {
        assert!(index < self.length, "index {index} out of range for length {}", self.length);
        self.words.negate_index(index);
    }

    #[inline]
    fn clear_bits(&mut self) {
        self.words.clear_bits();
    }
}

impl BitwisePair for BitVec {
    #[inline]
    fn dot(&self, other: &BitVec) -> bool {
        self.assert_same_length(other);
        self.words.dot(other.words.as_slice())
    }

    #[inline]
    fn and_weight(&self, other: &BitVec) -> usize {
        self.assert_same_length(other);
        self.words.and_weight(other.words.as_slice())
    }

    #[inline]
    fn xor_weight(&self, other: &BitVec) -> usize {
        self.assert_same_length(other);
        self.words.xor_weight(other.words.as_slice())
    }
}

impl BitwisePairMut for BitVec {
    #[inline]
    fn assign(&mut self, other: &BitVec) {
        self.assert_same_length(other);
        self.words.assign(other.words.as_slice());
    }

    #[inline]
    fn bitand_assign(&mut self, other: &BitVec) {
        self.assert_same_length(other);
        BitwisePairMut::bitand_assign(self.words.as_mut_slice(), other.words.as_slice());
    }

    #[inline]
    fn bitxor_assign(&mut self, other: &BitVec) {
        self.assert_same_length(other);
        BitwisePairMut::bitxor_assign(self.words.as_mut_slice(), other.words.as_slice());
    }
}

impl BitXorAssign<&BitVec> for BitVec {
    fn bitxor_assign(&mut self, other: &BitVec) {
        BitwisePairMut::bitxor_assign(self, other);
    }
}

impl BitXor for &BitVec {
    type Output = BitVec;

    fn bitxor(self, other: Self) -> BitVec {
        let mut result = self.clone();
        result ^= other;
        result
    }
}

impl BitAndAssign<&BitVec> for BitVec {
    fn bitand_assign(&mut self, other: &BitVec) {
        BitwisePairMut::bitand_assign(self, other);
    }
}

impl BitAnd for &BitVec {
    type Output = BitVec;

    fn bitand(self, other: Self) -> BitVec {
        let mut result = self.clone();
        result &= other;
        result
    }
}

impl Ord for BitVec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length
            .cmp(&other.length)
            .then_with(|| self.words.iter().rev().cmp(other.words.iter().rev()))
    }
}

impl PartialOrd for BitVec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<Iterator: IntoIterator<Item = bool>>(iterator: Iterator) -> Self {
        let mut vec = BitVec::default();
        for bit in iterator {
            if vec.length % WORD_BIT_LEN == 0 {
                vec.words.push(0);
            }
            vec.length += 1;
            if bit {
                vec.words.assign_index(vec.length - 1, true);
            }
        }
        vec
    }
}

/// Character `i` of the text is bit `i`; whitespace is skipped.
impl FromStr for BitVec {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|character| !character.is_whitespace())
            .enumerate()
            .map(|(position, character)| match character {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(ParseBitsError::InvalidCharacter { character, position }),
            })
            .collect()
    }
}

impl std::fmt::Display for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitVec(len={},value={})", self.length, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_numeric_within_a_length() {
        let small: BitVec = "1100".parse().unwrap();
        let large: BitVec = "0001".parse().unwrap();
        assert!(small < large);
        assert!(BitVec::zeros(3) < BitVec::zeros(4));
    }

    #[test]
    fn extract_across_words() {
        let v = BitVec::with_support(200, [3, 64, 130, 199]);
        let slice = v.extract(60, 140);
        assert_eq!(slice.support().collect::<Vec<_>>(), vec![4, 70]);
        assert_eq!(v.extract(199, 200).weight(), 1);
        assert!(v.extract(10, 10).is_empty());
    }

    #[test]
    fn resize_clears_truncated_bits() {
        let mut v = BitVec::ones(70);
        v.resize(65);
        v.resize(70);
        assert_eq!(v.weight(), 65);
    }

    #[test]
    fn rejects_invalid_characters() {
        assert_eq!(
            "01x".parse::<BitVec>(),
            Err(ParseBitsError::InvalidCharacter {
                character: 'x',
                position: 2
            })
        );
    }
}
