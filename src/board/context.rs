//! Castling path data.
//!
//! The squares involved in castling are data, not logic: callers may supply
//! their own layout (e.g. for variants) while the legality filter and move
//! executor stay generic. The default context describes orthodox chess.

use super::types::{Bitboard, CastleSide, Color, Square};

/// The squares involved in one castle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastleData {
    /// King start square
    pub king_from: Square,
    /// King destination
    pub king_to: Square,
    /// Rook start square
    pub rook_from: Square,
    /// Rook destination
    pub rook_to: Square,
    /// Squares between king and rook that must be empty
    pub empty_path: Bitboard,
    /// Squares the king traverses (start and end included) that must be safe
    pub safe_path: Bitboard,
}

/// Per-color, per-wing castling data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameContext {
    castles: [[CastleData; 2]; 2],
}

fn mask(squares: &[Square]) -> Bitboard {
    Bitboard(squares.iter().fold(0, |acc, sq| acc | sq.bitboard()))
}

fn orthodox(color: Color, side: CastleSide) -> CastleData {
    let rank = color.back_rank();
    let sq = |file: usize| Square::new(rank, file);
    match side {
        CastleSide::King => CastleData {
            king_from: sq(4),
            king_to: sq(6),
            rook_from: sq(7),
            rook_to: sq(5),
            empty_path: mask(&[sq(5), sq(6)]),
            safe_path: mask(&[sq(4), sq(5), sq(6)]),
        },
        CastleSide::Queen => CastleData {
            king_from: sq(4),
            king_to: sq(2),
            rook_from: sq(0),
            rook_to: sq(3),
            empty_path: mask(&[sq(1), sq(2), sq(3)]),
            safe_path: mask(&[sq(4), sq(3), sq(2)]),
        },
    }
}

impl GameContext {
    /// Build a context from explicit castle data, indexed `[color][wing]`
    /// with white first and the king's wing first.
    #[must_use]
    pub const fn new(castles: [[CastleData; 2]; 2]) -> Self {
        GameContext { castles }
    }

    #[inline]
    #[must_use]
    pub fn castle(&self, color: Color, side: CastleSide) -> &CastleData {
        let wing = match side {
            CastleSide::King => 0,
            CastleSide::Queen => 1,
        };
        &self.castles[color.index()][wing]
    }

    /// Identify a castle by the king's destination square, if any.
    #[must_use]
    pub fn castle_by_destination(&self, color: Color, to: Square) -> Option<CastleSide> {
        for side in [CastleSide::King, CastleSide::Queen] {
            if self.castle(color, side).king_to == to {
                return Some(side);
            }
        }
        None
    }

    /// Identify the wing whose rook starts on the given square, if any.
    #[must_use]
    pub fn wing_of_rook_home(&self, color: Color, sq: Square) -> Option<CastleSide> {
        for side in [CastleSide::King, CastleSide::Queen] {
            if self.castle(color, side).rook_from == sq {
                return Some(side);
            }
        }
        None
    }
}

impl Default for GameContext {
    fn default() -> Self {
        let build = |color| {
            [
                orthodox(color, CastleSide::King),
                orthodox(color, CastleSide::Queen),
            ]
        };
        GameContext {
            castles: [build(Color::White), build(Color::Black)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orthodox_white_kingside() {
        let ctx = GameContext::default();
        let data = ctx.castle(Color::White, CastleSide::King);
        assert_eq!(data.king_from.to_string(), "e1");
        assert_eq!(data.king_to.to_string(), "g1");
        assert_eq!(data.rook_from.to_string(), "h1");
        assert_eq!(data.rook_to.to_string(), "f1");
        assert_eq!(data.empty_path.popcount(), 2);
        assert_eq!(data.safe_path.popcount(), 3);
    }

    #[test]
    fn test_orthodox_black_queenside() {
        let ctx = GameContext::default();
        let data = ctx.castle(Color::Black, CastleSide::Queen);
        assert_eq!(data.king_from.to_string(), "e8");
        assert_eq!(data.king_to.to_string(), "c8");
        assert_eq!(data.rook_from.to_string(), "a8");
        assert_eq!(data.rook_to.to_string(), "d8");
        // b8, c8, d8 must be empty
        assert_eq!(data.empty_path.popcount(), 3);
    }

    #[test]
    fn test_castle_by_destination() {
        let ctx = GameContext::default();
        assert_eq!(
            ctx.castle_by_destination(Color::White, Square::new(0, 6)),
            Some(CastleSide::King)
        );
        assert_eq!(
            ctx.castle_by_destination(Color::White, Square::new(0, 2)),
            Some(CastleSide::Queen)
        );
        assert_eq!(ctx.castle_by_destination(Color::White, Square::new(0, 4)), None);
    }

    #[test]
    fn test_wing_of_rook_home() {
        let ctx = GameContext::default();
        assert_eq!(
            ctx.wing_of_rook_home(Color::Black, Square::new(7, 0)),
            Some(CastleSide::Queen)
        );
        assert_eq!(
            ctx.wing_of_rook_home(Color::Black, Square::new(7, 7)),
            Some(CastleSide::King)
        );
        assert_eq!(ctx.wing_of_rook_home(Color::Black, Square::new(7, 4)), None);
    }
}
