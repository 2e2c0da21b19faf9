//! Piece and color types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chess piece types.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    /// All piece types in index order
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Piece::Pawn => 0,
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 4,
            Piece::King => 5,
        }
    }

    /// Parse a piece from a character, ignoring case (p, n, b, r, q, k)
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }

    /// Convert piece to lowercase character
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    /// The letter used for this piece in SAN (empty for pawns).
    #[inline]
    #[must_use]
    pub const fn san_letter(self) -> &'static str {
        match self {
            Piece::Pawn => "",
            Piece::Knight => "N",
            Piece::Bishop => "B",
            Piece::Rook => "R",
            Piece::Queen => "Q",
            Piece::King => "K",
        }
    }

    /// Convert piece to character with case based on color (uppercase for White)
    #[inline]
    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        let c = self.to_char();
        if color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// The Unicode figurine for this piece, used by FAN notation.
    #[inline]
    #[must_use]
    pub const fn fan_glyph(self, color: Color) -> char {
        match (color, self) {
            (Color::White, Piece::Pawn) => '♙',
            (Color::White, Piece::Knight) => '♘',
            (Color::White, Piece::Bishop) => '♗',
            (Color::White, Piece::Rook) => '♖',
            (Color::White, Piece::Queen) => '♕',
            (Color::White, Piece::King) => '♔',
            (Color::Black, Piece::Pawn) => '♟',
            (Color::Black, Piece::Knight) => '♞',
            (Color::Black, Piece::Bishop) => '♝',
            (Color::Black, Piece::Rook) => '♜',
            (Color::Black, Piece::Queen) => '♛',
            (Color::Black, Piece::King) => '♚',
        }
    }

    /// Returns true if this piece can attack diagonally (Bishop, Queen)
    #[inline]
    #[must_use]
    pub const fn attacks_diagonally(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Queen)
    }

    /// Returns true if this piece can attack along ranks/files (Rook, Queen)
    #[inline]
    #[must_use]
    pub const fn attacks_straight(self) -> bool {
        matches!(self, Piece::Rook | Piece::Queen)
    }

    /// Returns true if this piece is a slider (Bishop, Rook, Queen)
    #[inline]
    #[must_use]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }
}

/// Promotion piece choices in order of typical preference (queen first)
pub(crate) const PROMOTION_PIECES: [Piece; 4] =
    [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

/// Chess colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors in index order (White=0, Black=1)
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Back rank for this color (0 for White, 7 for Black)
    #[inline]
    #[must_use]
    pub(crate) const fn back_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Pawn forward direction (+1 for White, -1 for Black)
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_direction(self) -> isize {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Pawn promotion rank (7 for White, 0 for Black)
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_promotion_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Ordinal of a colored piece for Zobrist indexing (0..11)
    #[inline]
    #[must_use]
    pub(crate) const fn piece_ordinal(self, piece: Piece) -> usize {
        self.index() * 6 + piece.index()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_index() {
        for (i, piece) in Piece::ALL.iter().enumerate() {
            assert_eq!(piece.index(), i);
        }
    }

    #[test]
    fn test_piece_from_char() {
        assert_eq!(Piece::from_char('p'), Some(Piece::Pawn));
        assert_eq!(Piece::from_char('N'), Some(Piece::Knight));
        assert_eq!(Piece::from_char('b'), Some(Piece::Bishop));
        assert_eq!(Piece::from_char('R'), Some(Piece::Rook));
        assert_eq!(Piece::from_char('q'), Some(Piece::Queen));
        assert_eq!(Piece::from_char('K'), Some(Piece::King));
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn test_piece_to_fen_char() {
        assert_eq!(Piece::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(Piece::Pawn.to_fen_char(Color::Black), 'p');
        assert_eq!(Piece::Knight.to_fen_char(Color::White), 'N');
        assert_eq!(Piece::Queen.to_fen_char(Color::Black), 'q');
    }

    #[test]
    fn test_san_letter() {
        assert_eq!(Piece::Pawn.san_letter(), "");
        assert_eq!(Piece::Knight.san_letter(), "N");
        assert_eq!(Piece::King.san_letter(), "K");
    }

    #[test]
    fn test_fan_glyphs_unique() {
        let mut seen = std::collections::HashSet::new();
        for color in Color::BOTH {
            for piece in Piece::ALL {
                assert!(seen.insert(piece.fan_glyph(color)));
            }
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
    }

    #[test]
    fn test_color_pawn_geometry() {
        assert_eq!(Color::White.pawn_direction(), 1);
        assert_eq!(Color::Black.pawn_direction(), -1);
        assert_eq!(Color::White.pawn_promotion_rank(), 7);
        assert_eq!(Color::Black.pawn_promotion_rank(), 0);
    }

    #[test]
    fn test_piece_ordinal() {
        assert_eq!(Color::White.piece_ordinal(Piece::Pawn), 0);
        assert_eq!(Color::White.piece_ordinal(Piece::King), 5);
        assert_eq!(Color::Black.piece_ordinal(Piece::Pawn), 6);
        assert_eq!(Color::Black.piece_ordinal(Piece::King), 11);
    }

    #[test]
    fn test_piece_is_slider() {
        assert!(!Piece::Pawn.is_slider());
        assert!(!Piece::Knight.is_slider());
        assert!(Piece::Bishop.is_slider());
        assert!(Piece::Rook.is_slider());
        assert!(Piece::Queen.is_slider());
        assert!(!Piece::King.is_slider());
    }
}
