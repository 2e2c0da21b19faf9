//! Precomputed geometry tables.
//!
//! All tables are derived once at first use. `BETWEEN` is the workhorse of
//! the sliding-attack routine: `BETWEEN[a][b]` is the closed index interval
//! `[a, b]` as a bit mask, computed as `(1<<b) | ((1<<b) - (1<<a))`. The
//! table is intentionally asymmetric; callers always index it low-to-high.

use std::sync::LazyLock;

pub(crate) static KNIGHT_ATTACKS: LazyLock<[u64; 64]> = LazyLock::new(|| {
    let deltas = [
        (2, 1),
        (1, 2),
        (-1, 2),
        (-2, 1),
        (-2, -1),
        (-1, -2),
        (1, -2),
        (2, -1),
    ];
    leaper_table(&deltas)
});

/// King neighborhood; also serves as the adjacent-squares mask.
pub(crate) static KING_ATTACKS: LazyLock<[u64; 64]> = LazyLock::new(|| {
    let deltas = [
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ];
    leaper_table(&deltas)
});

/// Diagonal pawn attacks by color (white = index 0).
pub(crate) static PAWN_ATTACKS: LazyLock<[[u64; 64]; 2]> = LazyLock::new(|| {
    let mut attacks = [[0u64; 64]; 2];
    for sq in 0..64 {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        for (color, dr) in [(0usize, 1isize), (1, -1)] {
            let nr = r + dr;
            if (0..8).contains(&nr) {
                for df in [-1, 1] {
                    let nf = f + df;
                    if (0..8).contains(&nf) {
                        attacks[color][sq] |= 1u64 << (nr * 8 + nf);
                    }
                }
            }
        }
    }
    attacks
});

/// Pawn pushes by color: the single step plus, from the start rank, the
/// two-square push. Zero on the pushing color's terminal ranks.
pub(crate) static PAWN_PUSHES: LazyLock<[[u64; 64]; 2]> = LazyLock::new(|| {
    let mut pushes = [[0u64; 64]; 2];
    for sq in 0..64 {
        let r = (sq / 8) as isize;
        let f = sq % 8;
        for (color, dr, start) in [(0usize, 1isize, 1isize), (1, -1, 6)] {
            let nr = r + dr;
            if (0..8).contains(&nr) {
                pushes[color][sq] |= 1u64 << (nr as usize * 8 + f);
                if r == start {
                    pushes[color][sq] |= 1u64 << ((r + 2 * dr) as usize * 8 + f);
                }
            }
        }
    }
    pushes
});

/// Closed index interval `[a, b]` as a bit mask (valid for `a <= b`).
pub(crate) static BETWEEN: LazyLock<Box<[[u64; 64]; 64]>> = LazyLock::new(|| {
    let mut between = Box::new([[0u64; 64]; 64]);
    for a in 0..64 {
        for b in 0..64 {
            let high = 1u64 << b;
            between[a][b] = high | high.wrapping_sub(1u64 << a);
        }
    }
    between
});

/// The a1-h8 direction diagonal through each square, minus the square.
pub(crate) static DIAG_NESW: LazyLock<[u64; 64]> = LazyLock::new(|| ray_table(&[(1, 1), (-1, -1)]));

/// The a8-h1 direction diagonal through each square, minus the square.
pub(crate) static DIAG_NWSE: LazyLock<[u64; 64]> = LazyLock::new(|| ray_table(&[(1, -1), (-1, 1)]));

/// The full rank through each square, minus the square.
pub(crate) static RANK_ATTACKS: LazyLock<[u64; 64]> = LazyLock::new(|| ray_table(&[(0, 1), (0, -1)]));

/// The full file through each square, minus the square.
pub(crate) static FILE_ATTACKS: LazyLock<[u64; 64]> = LazyLock::new(|| ray_table(&[(1, 0), (-1, 0)]));

fn leaper_table(deltas: &[(isize, isize)]) -> [u64; 64] {
    let mut attacks = [0u64; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                *slot |= 1u64 << (nr as usize * 8 + nf as usize);
            }
        }
    }
    attacks
}

fn ray_table(directions: &[(isize, isize)]) -> [u64; 64] {
    let mut rays = [0u64; 64];
    for (sq, slot) in rays.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        for &(dr, df) in directions {
            let mut nr = r + dr;
            let mut nf = f + df;
            while (0..8).contains(&nr) && (0..8).contains(&nf) {
                *slot |= 1u64 << (nr as usize * 8 + nf as usize);
                nr += dr;
                nf += df;
            }
        }
    }
    rays
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_attacks_corner_and_center() {
        // a1 knight reaches b3 and c2
        assert_eq!(KNIGHT_ATTACKS[0], (1u64 << 17) | (1u64 << 10));
        // d4 knight has the full eight targets
        assert_eq!(KNIGHT_ATTACKS[27].count_ones(), 8);
    }

    #[test]
    fn test_king_attacks_counts() {
        assert_eq!(KING_ATTACKS[0].count_ones(), 3); // a1
        assert_eq!(KING_ATTACKS[4].count_ones(), 5); // e1
        assert_eq!(KING_ATTACKS[27].count_ones(), 8); // d4
    }

    #[test]
    fn test_pawn_attacks() {
        // White pawn on e2 attacks d3 and f3
        assert_eq!(PAWN_ATTACKS[0][12], (1u64 << 19) | (1u64 << 21));
        // Black pawn on e7 attacks d6 and f6
        assert_eq!(PAWN_ATTACKS[1][52], (1u64 << 43) | (1u64 << 45));
        // Edge pawn has only one attack
        assert_eq!(PAWN_ATTACKS[0][8].count_ones(), 1); // a2
    }

    #[test]
    fn test_pawn_pushes() {
        // e2 (white): e3 and e4
        assert_eq!(PAWN_PUSHES[0][12], (1u64 << 20) | (1u64 << 28));
        // e3 (white): only e4
        assert_eq!(PAWN_PUSHES[0][20], 1u64 << 28);
        // e7 (black): e6 and e5
        assert_eq!(PAWN_PUSHES[1][52], (1u64 << 44) | (1u64 << 36));
        // Terminal ranks push nowhere
        assert_eq!(PAWN_PUSHES[0][60], 0); // e8, white
        assert_eq!(PAWN_PUSHES[1][4], 0); // e1, black
    }

    #[test]
    fn test_between_interval() {
        // [0, 3] covers bits 0..=3
        assert_eq!(BETWEEN[0][3], 0b1111);
        // [2, 2] is just bit 2
        assert_eq!(BETWEEN[2][2], 0b100);
        assert_eq!(BETWEEN[0][63], u64::MAX);
    }

    #[test]
    fn test_rank_file_rays() {
        // e4 rank ray is rank 4 minus e4
        let rank4 = 0xFFu64 << 24;
        assert_eq!(RANK_ATTACKS[28], rank4 & !(1u64 << 28));
        // e4 file ray is the e-file minus e4
        let file_e = 0x1010101010101010u64;
        assert_eq!(FILE_ATTACKS[28], file_e & !(1u64 << 28));
    }

    #[test]
    fn test_diagonals_exclude_square() {
        for sq in 0..64 {
            assert_eq!(DIAG_NESW[sq] & (1u64 << sq), 0);
            assert_eq!(DIAG_NWSE[sq] & (1u64 << sq), 0);
        }
        // a1 lies on the long a1-h8 diagonal: 7 other squares
        assert_eq!(DIAG_NESW[0].count_ones(), 7);
        // a1's anti-diagonal is just itself
        assert_eq!(DIAG_NWSE[0], 0);
    }
}
