//! Board state: piece placement, side to move, castling rights, en passant,
//! counters, incremental hash, history and the undo stack.

use crate::zobrist;

use super::context::GameContext;
use super::error::InvariantError;
use super::types::{Bitboard, CastleRight, Color, Move, Piece, Square};

/// Snapshot sufficient to reverse one move.
#[derive(Clone, Debug)]
pub(crate) struct UndoEntry {
    pub(crate) mv: Move,
    /// Captured piece and the square it actually stood on (differs from the
    /// move's destination for en passant)
    pub(crate) captured: Option<(Color, Piece, Square)>,
    pub(crate) castle_rights: [CastleRight; 2],
    pub(crate) ep_target: Option<Square>,
    pub(crate) ep_destination: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) hash: u64,
}

/// A chess position.
///
/// Owned, mutable value: one move at a time via [`Board::make_move`], exact
/// reversal via [`Board::undo_move`]. Distinct boards share only the
/// immutable geometry and Zobrist tables, so separate instances are freely
/// usable from separate threads.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) mailbox: [Option<(Color, Piece)>; 64],
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castle_rights: [CastleRight; 2],
    /// Square of the pawn that just double-pushed
    pub(crate) ep_target: Option<Square>,
    /// Square a capturing pawn would land on
    pub(crate) ep_destination: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_counter: u32,
    pub(crate) hash: u64,
    pub(crate) history: Vec<u64>,
    pub(crate) undo_stack: Vec<UndoEntry>,
    pub(crate) context: GameContext,
}

impl Board {
    /// Create a board with the standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            board.set_piece(Square::new(0, file), Color::White, *piece);
            board.set_piece(Square::new(7, file), Color::Black, *piece);
            board.set_piece(Square::new(1, file), Color::White, Piece::Pawn);
            board.set_piece(Square::new(6, file), Color::Black, Piece::Pawn);
        }
        board.set_castle_right(Color::White, CastleRight::KingAndQueenSide);
        board.set_castle_right(Color::Black, CastleRight::KingAndQueenSide);
        board.history.push(board.hash);
        board
    }

    /// Create an empty board (no pieces, white to move, no rights).
    #[must_use]
    pub fn empty() -> Self {
        Board {
            mailbox: [None; 64],
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castle_rights: [CastleRight::None; 2],
            ep_target: None,
            ep_destination: None,
            halfmove_clock: 0,
            fullmove_counter: 1,
            hash: zobrist::side_to_move_key(Color::White.index()),
            history: Vec::new(),
            undo_stack: Vec::new(),
            context: GameContext::default(),
        }
    }

    /// Reset to the empty state, keeping the game context.
    pub fn clear(&mut self) {
        let context = self.context.clone();
        *self = Board::empty();
        self.context = context;
    }

    // ---- accessors -------------------------------------------------------

    /// Piece and color on a square
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.mailbox[sq.index()]
    }

    /// Get just the piece type on a square (without color)
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    /// Get just the color of the piece on a square
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(color, _)| color)
    }

    /// Occupancy of one colored piece kind
    #[inline]
    #[must_use]
    pub fn bitboard(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// All squares occupied by one side
    #[inline]
    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// All occupied squares
    #[inline]
    #[must_use]
    pub fn all_pieces(&self) -> Bitboard {
        self.all_occupied
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    #[inline]
    #[must_use]
    pub fn castle_right(&self, color: Color) -> CastleRight {
        self.castle_rights[color.index()]
    }

    /// Square of the pawn that just made a two-square push, if any
    #[must_use]
    pub fn ep_target(&self) -> Option<Square> {
        self.ep_target
    }

    /// Square a capturing pawn would land on, if en passant is available
    #[must_use]
    pub fn ep_destination(&self) -> Option<Square> {
        self.ep_destination
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_counter(&self) -> u32 {
        self.fullmove_counter
    }

    /// The incrementally maintained Zobrist hash
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Hashes of every position reached, oldest first
    #[must_use]
    pub fn history(&self) -> &[u64] {
        &self.history
    }

    /// The castling path data in effect
    #[must_use]
    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// Replace the castling path data (variant setups)
    pub fn set_context(&mut self, context: GameContext) {
        self.context = context;
    }

    #[must_use]
    pub(crate) fn is_square_empty(&self, sq: Square) -> bool {
        self.mailbox[sq.index()].is_none()
    }

    #[must_use]
    pub(crate) fn find_king(&self, color: Color) -> Option<Square> {
        let kings = self.pieces[color.index()][Piece::King.index()];
        if kings.is_empty() {
            None
        } else {
            Some(kings.first_square())
        }
    }

    // ---- raw placement ---------------------------------------------------

    /// Place a piece, replacing any existing occupant.
    ///
    /// Raw placement: bitboards, mailbox and hash stay coherent, but king
    /// counts and position legality are not validated, and the change is not
    /// undoable. Callers using raw placement own the correctness of the
    /// resulting position.
    pub fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        self.unset_piece(sq);
        let bit = sq.bitboard();
        self.pieces[color.index()][piece.index()].0 |= bit;
        self.occupied[color.index()].0 |= bit;
        self.all_occupied.0 |= bit;
        self.mailbox[sq.index()] = Some((color, piece));
        self.hash ^= zobrist::piece_square_key(color.piece_ordinal(piece), sq.index());
    }

    /// Remove whatever occupies a square, returning it.
    ///
    /// Same caveats as [`Board::set_piece`].
    pub fn unset_piece(&mut self, sq: Square) -> Option<(Color, Piece)> {
        let (color, piece) = self.mailbox[sq.index()]?;
        let bit = sq.bitboard();
        self.pieces[color.index()][piece.index()].0 &= !bit;
        self.occupied[color.index()].0 &= !bit;
        self.all_occupied.0 &= !bit;
        self.mailbox[sq.index()] = None;
        self.hash ^= zobrist::piece_square_key(color.piece_ordinal(piece), sq.index());
        Some((color, piece))
    }

    /// Set the side to move, keeping the hash coherent.
    pub fn set_side_to_move(&mut self, color: Color) {
        self.hash ^= zobrist::side_to_move_key(self.side_to_move.index());
        self.side_to_move = color;
        self.hash ^= zobrist::side_to_move_key(color.index());
    }

    /// Set one side's castle right, keeping the hash coherent.
    pub fn set_castle_right(&mut self, color: Color, right: CastleRight) {
        let old = self.castle_rights[color.index()];
        if old != CastleRight::None {
            self.hash ^= zobrist::castle_right_key(old.index(), color.index());
        }
        self.castle_rights[color.index()] = right;
        if right != CastleRight::None {
            self.hash ^= zobrist::castle_right_key(right.index(), color.index());
        }
    }

    pub(crate) fn set_ep_pair(&mut self, target: Option<Square>, destination: Option<Square>) {
        if let Some(old) = self.ep_target {
            self.hash ^= zobrist::en_passant_key(old.index());
        }
        self.ep_target = target;
        self.ep_destination = destination;
        if let Some(new) = target {
            self.hash ^= zobrist::en_passant_key(new.index());
        }
    }

    // ---- hashing ---------------------------------------------------------

    /// Recompute the Zobrist hash from scratch.
    ///
    /// The incremental hash must always equal this value; the property tests
    /// lean on that invariant.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        let mut hash = 0u64;
        for idx in 0..64 {
            if let Some((color, piece)) = self.mailbox[idx] {
                hash ^= zobrist::piece_square_key(color.piece_ordinal(piece), idx);
            }
        }
        for color in Color::BOTH {
            let right = self.castle_rights[color.index()];
            if right != CastleRight::None {
                hash ^= zobrist::castle_right_key(right.index(), color.index());
            }
        }
        if let Some(target) = self.ep_target {
            hash ^= zobrist::en_passant_key(target.index());
        }
        hash ^= zobrist::side_to_move_key(self.side_to_move.index());
        hash
    }

    // ---- draw detection --------------------------------------------------

    /// Neither side can force mate with the remaining material.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let heavy_or_pawn = |color: Color| {
            self.bitboard(color, Piece::Pawn).0
                | self.bitboard(color, Piece::Rook).0
                | self.bitboard(color, Piece::Queen).0
        };
        if heavy_or_pawn(Color::White) != 0 || heavy_or_pawn(Color::Black) != 0 {
            return false;
        }

        let white_knights = self.bitboard(Color::White, Piece::Knight).popcount();
        let black_knights = self.bitboard(Color::Black, Piece::Knight).popcount();
        let white_bishops = self.bitboard(Color::White, Piece::Bishop).popcount();
        let black_bishops = self.bitboard(Color::Black, Piece::Bishop).popcount();
        let knights = white_knights + black_knights;
        let bishops = white_bishops + black_bishops;

        // Bare kings, or a lone minor piece
        if knights + bishops <= 1 {
            return true;
        }

        // Two knights against a bare king
        if bishops == 0 && knights == 2 && (white_knights == 0 || black_knights == 0) {
            return true;
        }

        // Bishops only, all standing on one square color
        if knights == 0 {
            let all_bishops = self.bitboard(Color::White, Piece::Bishop).0
                | self.bitboard(Color::Black, Piece::Bishop).0;
            return all_bishops & Bitboard::LIGHT_SQUARES.0 == 0
                || all_bishops & Bitboard::DARK_SQUARES.0 == 0;
        }

        false
    }

    /// The current position occurred at least `n` times in total.
    ///
    /// Walks the hash history backward two plies at a time, bounded by the
    /// halfmove clock (an irreversible move makes older repeats unreachable).
    #[must_use]
    pub fn is_repetition(&self, n: u32) -> bool {
        let span = self
            .history
            .len()
            .saturating_sub(1)
            .min(self.halfmove_clock as usize);
        if self.history.len() < 4 {
            return false;
        }
        let current = self.history[self.history.len() - 1];
        let mut seen = 1u32;
        let mut offset = 2;
        while offset <= span {
            if self.history[self.history.len() - 1 - offset] == current {
                seen += 1;
                if seen >= n {
                    return true;
                }
            }
            offset += 2;
        }
        false
    }

    /// Standard threefold repetition.
    #[must_use]
    pub fn is_threefold_repetition(&self) -> bool {
        self.is_repetition(3)
    }

    /// Fifty-move rule: one hundred plies without a capture or pawn move.
    #[must_use]
    pub fn is_fifty_move_rule(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Threefold repetition, insufficient material, fifty-move rule or
    /// stalemate.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.is_threefold_repetition()
            || self.is_insufficient_material()
            || self.is_fifty_move_rule()
            || self.is_stalemate()
    }

    // ---- invariant checking ----------------------------------------------

    /// Check the internal consistency of the position.
    ///
    /// Raw placement can express transient states that break these
    /// invariants; a violation after normal move flow is a bug.
    pub fn validate(&self) -> Result<(), InvariantError> {
        if self.occupied[0].intersects(self.occupied[1]) {
            return Err(InvariantError::OverlappingSides);
        }
        for idx in 0..64 {
            let sq = Square::from_index(idx);
            let bit = sq.bitboard();
            let from_bitboards = Color::BOTH.into_iter().find_map(|color| {
                Piece::ALL
                    .into_iter()
                    .find(|piece| self.bitboard(color, *piece).0 & bit != 0)
                    .map(|piece| (color, piece))
            });
            if from_bitboards != self.mailbox[idx] {
                return Err(InvariantError::MailboxMismatch {
                    square: sq.to_string(),
                });
            }
        }
        for color in Color::BOTH {
            let kings = self.bitboard(color, Piece::King).popcount();
            if kings != 1 {
                return Err(InvariantError::BadKingCount {
                    color: color.to_string(),
                    count: kings,
                });
            }
        }
        match (self.ep_target, self.ep_destination) {
            (None, None) => {}
            (Some(target), Some(dest)) => {
                let adjacent_ranks = target.rank().abs_diff(dest.rank()) == 1;
                if target.file() != dest.file() || !adjacent_ranks {
                    return Err(InvariantError::BadEnPassantPair);
                }
            }
            _ => return Err(InvariantError::BadEnPassantPair),
        }
        let recomputed = self.compute_hash();
        if recomputed != self.hash {
            return Err(InvariantError::HashMismatch {
                incremental: self.hash,
                recomputed,
            });
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

/// Positions compare by observable state: placement, side to move, rights,
/// en passant, counters, hash and history. The undo stack is deliberately
/// excluded (two boards reaching the same position by different paths with
/// identical histories are equal).
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.mailbox == other.mailbox
            && self.pieces == other.pieces
            && self.occupied == other.occupied
            && self.all_occupied == other.all_occupied
            && self.side_to_move == other.side_to_move
            && self.castle_rights == other.castle_rights
            && self.ep_target == other.ep_target
            && self.ep_destination == other.ep_destination
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_counter == other.fullmove_counter
            && self.hash == other.hash
            && self.history == other.history
    }
}

impl Eq for Board {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_setup() {
        let board = Board::new();
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(
            board.piece_at(Square::new(0, 4)),
            Some((Color::White, Piece::King))
        );
        assert_eq!(
            board.piece_at(Square::new(7, 3)),
            Some((Color::Black, Piece::Queen))
        );
        assert_eq!(board.all_pieces().popcount(), 32);
        assert_eq!(board.castle_right(Color::White), CastleRight::KingAndQueenSide);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_counter(), 1);
        assert_eq!(board.history().len(), 1);
        board.validate().unwrap();
    }

    #[test]
    fn test_set_unset_piece_keeps_hash_coherent() {
        let mut board = Board::empty();
        let e4 = Square::new(3, 4);
        board.set_piece(e4, Color::White, Piece::Knight);
        assert_eq!(board.piece_on(e4), Some(Piece::Knight));
        assert_eq!(board.hash, board.compute_hash());

        // Replacing an occupant keeps everything coherent
        board.set_piece(e4, Color::Black, Piece::Queen);
        assert_eq!(board.piece_at(e4), Some((Color::Black, Piece::Queen)));
        assert_eq!(board.all_pieces().popcount(), 1);
        assert_eq!(board.hash, board.compute_hash());

        assert_eq!(board.unset_piece(e4), Some((Color::Black, Piece::Queen)));
        assert!(board.is_square_empty(e4));
        assert_eq!(board.hash, board.compute_hash());
    }

    #[test]
    fn test_set_side_and_rights_keep_hash_coherent() {
        let mut board = Board::empty();
        board.set_side_to_move(Color::Black);
        assert_eq!(board.hash, board.compute_hash());
        board.set_castle_right(Color::White, CastleRight::QueenSide);
        assert_eq!(board.hash, board.compute_hash());
        board.set_castle_right(Color::White, CastleRight::None);
        assert_eq!(board.hash, board.compute_hash());
    }

    #[test]
    fn test_insufficient_material_cases() {
        // Bare kings
        let board = Board::from_fen("7k/8/8/8/8/8/8/K7 w - - 0 1");
        assert!(board.is_insufficient_material());

        // Lone minor
        let board = Board::from_fen("7k/8/8/8/8/8/6N1/K7 w - - 0 1");
        assert!(board.is_insufficient_material());

        // Two knights, one side
        let board = Board::from_fen("7k/8/8/8/8/8/5NN1/K7 w - - 0 1");
        assert!(board.is_insufficient_material());

        // Knight each: not classified as dead
        let board = Board::from_fen("6nk/8/8/8/8/8/6N1/K7 w - - 0 1");
        assert!(!board.is_insufficient_material());

        // Same-colored bishops on both sides (c1 and f4 are both dark)
        let board = Board::from_fen("7k/8/8/8/5b2/8/8/K1B5 w - - 0 1");
        assert!(board.is_insufficient_material());

        // Opposite-colored bishops can still mate
        let board = Board::from_fen("7k/8/8/8/4b3/8/8/K1B5 w - - 0 1");
        assert!(!board.is_insufficient_material());

        // A pawn is always enough
        let board = Board::from_fen("7k/8/8/8/8/8/4P3/K7 w - - 0 1");
        assert!(!board.is_insufficient_material());
    }

    #[test]
    fn test_clear_keeps_context() {
        let mut board = Board::new();
        board.clear();
        assert_eq!(board.all_pieces(), Bitboard::EMPTY);
        assert_eq!(board.castle_right(Color::White), CastleRight::None);
        assert_eq!(board.hash, board.compute_hash());
        assert!(board.history().is_empty());
    }

    #[test]
    fn test_validate_catches_missing_king() {
        let mut board = Board::empty();
        board.set_piece(Square::new(0, 0), Color::White, Piece::King);
        assert!(matches!(
            board.validate(),
            Err(InvariantError::BadKingCount { .. })
        ));
    }
}
