use crate::Word;

/// Masks selecting the low half of every 2^k-bit group, for k = 0..6.
#[allow(
    clippy::unusual_byte_groupings,
    reason = "Better readability via nested groups of every 4 and every 16 bits"
)]
const BLOCK_MASKS: [Word; 6] = [
    0b___0101_0101_0101_0101___0101_0101_0101_0101___0101_0101_0101_0101___0101_0101_0101_0101,
    0b___0011_0011_0011_0011___0011_0011_0011_0011___0011_0011_0011_0011___0011_0011_0011_0011,
    0b___0000_1111_0000_1111___0000_1111_0000_1111___0000_1111_0000_1111___0000_1111_0000_1111,
    0b___0000_0000_1111_1111___0000_0000_1111_1111___0000_0000_1111_1111___0000_0000_1111_1111,
    0b___0000_0000_0000_0000___1111_1111_1111_1111___0000_0000_0000_0000___1111_1111_1111_1111,
    0b___0000_0000_0000_0000___0000_0000_0000_0000___1111_1111_1111_1111___1111_1111_1111_1111,
];

/// Exchanges the off-diagonal `block_size`-square blocks of every `2 * block_size` tile.
#[inline]
fn swap_blocks(tile: &mut [Word; 64], block_size: usize, block_mask: Word) {
    for block_top_row in (0..64).step_by(2 * block_size) {
        for upper in block_top_row..block_top_row + block_size {
            let lower = upper + block_size;
            let diff = ((tile[upper] >> block_size) ^ tile[lower]) & block_mask;
            tile[lower] ^= diff;
            tile[upper] ^= diff << block_size;
        }
    }
}

/// Transposes a 64×64 tile in place: bit `c` of word `r` moves to bit `r` of word `c`.
///
/// Hacker's Delight, 2nd ed., section 7.3: 32×32 blocks are swapped first, then 16×16
/// blocks inside each of them, down to single bits.
pub fn transpose_64x64_inplace(tile: &mut [Word; 64]) {
    for level in (0..BLOCK_MASKS.len()).rev() {
        swap_blocks(tile, 1 << level, BLOCK_MASKS[level]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn tile_transpose_moves_every_bit() {
        let mut random_number_generator = SmallRng::seed_from_u64(42);
        let mut tile = [0 as Word; 64];
        for word in &mut tile {
            *word = random_number_generator.r#gen();
        }
        let original = tile;
        transpose_64x64_inplace(&mut tile);
        for row in 0..64 {
            for column in 0..64 {
                assert_eq!((original[row] >> column) & 1, (tile[column] >> row) & 1);
            }
        }
        transpose_64x64_inplace(&mut tile);
        assert_eq!(tile, original);
    }
}
