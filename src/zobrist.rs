//! Fixed-seed Zobrist key table.
//!
//! Position hashes are part of the library's external contract: threefold
//! repetition detection and opening-book lookups rely on every implementation
//! producing identical keys for identical positions. The table is therefore
//! generated from a fixed seed by a deterministic xorshift* generator rather
//! than from a process-local RNG, and the indexing scheme below must not
//! change.

use once_cell::sync::Lazy;

const RANDOM_SEED: u64 = 49109794719;
const TABLE_SIZE: usize = 2000;

/// Pseudorandom key pool shared by all positions.
pub static ZOBRIST_KEYS: Lazy<[u64; TABLE_SIZE]> = Lazy::new(|| {
    let mut state = RANDOM_SEED;
    let mut keys = [0u64; TABLE_SIZE];
    for key in &mut keys {
        state ^= state >> 12;
        state ^= state << 25;
        state ^= state >> 27;
        *key = state.wrapping_mul(0x2545F4914F6CDD1D);
    }
    keys
});

/// Key for a colored piece on a square.
///
/// `piece_ordinal` is `color * 6 + piece` (white pawn..king = 0..5,
/// black pawn..king = 6..11), `square` is the 0..63 square index.
#[inline]
#[must_use]
pub fn piece_square_key(piece_ordinal: usize, square: usize) -> u64 {
    ZOBRIST_KEYS[57 * piece_ordinal + 13 * square]
}

/// Key for one side's castle right (right ordinal 0..3, side ordinal 0..1).
#[inline]
#[must_use]
pub fn castle_right_key(right_ordinal: usize, side_ordinal: usize) -> u64 {
    ZOBRIST_KEYS[3 * right_ordinal + 300 + 3 * side_ordinal]
}

/// Key for the en-passant target pawn square (0..63).
#[inline]
#[must_use]
pub fn en_passant_key(square: usize) -> u64 {
    ZOBRIST_KEYS[3 * square + 400]
}

/// Key for the side to move (side ordinal 0..1).
#[inline]
#[must_use]
pub fn side_to_move_key(side_ordinal: usize) -> u64 {
    ZOBRIST_KEYS[3 * side_ordinal + 500]
}
