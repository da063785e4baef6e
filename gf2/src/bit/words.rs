use super::{Bitwise, BitwiseMut, BitwisePair, BitwisePairMut, WORD_BIT_LEN, Word};
use sorted_iter::SortedIterator;
use sorted_iter::assume::AssumeSortedByItemExt;

/// Number of words needed to hold `bit_count` bits.
#[inline]
#[must_use]
pub const fn word_count(bit_count: usize) -> usize {
    bit_count.div_ceil(WORD_BIT_LEN)
}

#[inline]
fn split_index(index: usize) -> (usize, Word) {
    (index / WORD_BIT_LEN, 1 << (index % WORD_BIT_LEN))
}

/// Ascending iterator over the set bits of a word slice.
#[derive(Clone, Debug)]
pub struct WordSupport<'life> {
    words: &'life [Word],
    word_index: usize,
    current: Word,
}

impl<'life> WordSupport<'life> {
    pub fn new(words: &'life [Word]) -> Self {
        Self {
            words,
            word_index: 0,
            current: words.first().copied().unwrap_or(0),
        }
    }
}

impl Iterator for WordSupport<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.word_index * WORD_BIT_LEN + bit);
            }
            self.word_index += 1;
            self.current = *self.words.get(self.word_index)?;
        }
    }
}

impl Bitwise for [Word] {
    #[inline]
    fn index(&self, index: usize) -> bool {
        let (word, mask) = split_index(index);
        self[word] & mask != 0
    }

    #[inline]
    fn support(&self) -> impl SortedIterator<Item = usize> {
        WordSupport::new(self).assume_sorted_by_item()
    }

    #[inline]
    fn weight(&self) -> usize {
        self.iter().map(|word| word.count_ones() as usize).sum()
    }

    #[inline]
    fn parity(&self) -> bool {
        self.iter().fold(0, |acc, word| acc ^ word).count_ones() % 2 == 1
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.iter().all(|word| *word == 0)
    }
}

impl BitwiseMut for [Word] {
    #[inline]
    fn assign_index(&mut self, index: usize, to: bool) {
        let (word, mask) = split_index(index);
        if to {
            self[word] |= mask;
        } else {
            self[word] &= !mask;
        }
    }

    #[inline]
    fn negate_index(&mut self, index: usize) {
        let (word, mask) = split_index(index);
        self[word] ^= mask;
    }

    #[inline]
    fn clear_bits(&mut self) {
        self.fill(0);
    }
}

impl BitwisePair for [Word] {
    #[inline]
    fn dot(&self, other: &[Word]) -> bool {
        self.iter()
            .zip(other)
            .fold(0, |acc, (left, right)| acc ^ (left & right))
            .count_ones()
            % 2
            == 1
    }

    #[inline]
    fn and_weight(&self, other: &[Word]) -> usize {
        self.iter()
            .zip(other)
            .map(|(left, right)| (left & right).count_ones() as usize)
            .sum()
    }

    #[inline]
    fn xor_weight(&self, other: &[Word]) -> usize {
        self.iter()
            .zip(other)
            .map(|(left, right)| (left ^ right).count_ones() as usize)
            .sum()
    }
}

impl BitwisePairMut for [Word] {
    #[inline]
    fn assign(&mut self, other: &[Word]) {
        self.copy_from_slice(other);
    }

    #[inline]
    fn bitand_assign(&mut self, other: &[Word]) {
        for (left, right) in self.iter_mut().zip(other) {
            *left &= right;
        }
    }

    #[inline]
    fn bitxor_assign(&mut self, other: &[Word]) {
        for (left, right) in self.iter_mut().zip(other) {
            *left ^= right;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_crosses_word_boundaries() {
        let words: [Word; 3] = [1 << 63 | 1, 0, 1 << 5];
        let support: Vec<usize> = words.support().collect();
        assert_eq!(support, vec![0, 63, 133]);
        assert_eq!(words.weight(), 3);
        assert!(words.parity());
    }

    #[test]
    fn empty_slice_has_empty_support() {
        let words: [Word; 0] = [];
        assert_eq!(words.support().count(), 0);
        assert!(words.is_zero());
    }
}
