//! Move legality without making the move.
//!
//! A candidate move is legal iff afterwards no enemy piece targets the
//! mover's king. Rather than applying the move and undoing it, the filter
//! rebuilds the occupancy the move would produce and intersects enemy
//! attacker sets with the attack rays from the king square. En passant
//! removes two pawns at once and castling is a path-safety question; both get
//! dedicated handling here.

use super::geometry::{
    bishop_attacks, queen_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS,
};
use super::types::{Bitboard, CastleSide, Color, Move, Piece, Square};
use super::Board;

impl Board {
    /// True if `sq` is attacked by any piece of `by` under the current
    /// occupancy.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        self.square_attacked_with(sq, by, self.all_occupied.0, 0)
    }

    /// Attack test under a hypothetical occupancy. `removed` masks attackers
    /// that the hypothetical move captures.
    fn square_attacked_with(&self, sq: Square, by: Color, occupancy: u64, removed: u64) -> bool {
        let target = sq.index();
        let piece = |p: Piece| self.bitboard(by, p).0 & !removed;

        let pawn_sources = PAWN_ATTACKS[by.opponent().index()][target];
        if piece(Piece::Pawn) & pawn_sources != 0 {
            return true;
        }
        if piece(Piece::Knight) & KNIGHT_ATTACKS[target] != 0 {
            return true;
        }
        if piece(Piece::King) & KING_ATTACKS[target] != 0 {
            return true;
        }
        let queens = piece(Piece::Queen);
        if (piece(Piece::Rook) | queens) & rook_attacks(target, occupancy) != 0 {
            return true;
        }
        if (piece(Piece::Bishop) | queens) & bishop_attacks(target, occupancy) != 0 {
            return true;
        }
        false
    }

    /// True if `color`'s king stands attacked.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king) => self.is_square_attacked(king, color.opponent()),
            None => false,
        }
    }

    /// True if the side to move's king stands attacked.
    #[must_use]
    pub fn is_king_attacked(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }

    /// Pieces of `color` and kind `piece` that attack `target` under the
    /// current occupancy.
    pub(crate) fn attackers_of_type(&self, target: Square, color: Color, piece: Piece) -> Bitboard {
        let occ = self.all_occupied.0;
        let t = target.index();
        let sources = match piece {
            Piece::Pawn => PAWN_ATTACKS[color.opponent().index()][t],
            Piece::Knight => KNIGHT_ATTACKS[t],
            Piece::King => KING_ATTACKS[t],
            Piece::Bishop => bishop_attacks(t, occ),
            Piece::Rook => rook_attacks(t, occ),
            Piece::Queen => queen_attacks(t, occ),
        };
        Bitboard(self.bitboard(color, piece).0 & sources)
    }

    /// Detect whether a move is an en-passant capture in this position.
    pub(crate) fn is_en_passant_capture(&self, mv: Move, piece: Piece) -> bool {
        piece == Piece::Pawn
            && self.ep_destination == Some(mv.to())
            && mv.from().file() != mv.to().file()
            && self.is_square_empty(mv.to())
    }

    /// Detect a castle: the king jumping two or more files.
    pub(crate) fn castle_wing_of(&self, mv: Move, piece: Piece) -> Option<CastleSide> {
        if piece != Piece::King || mv.from().file().abs_diff(mv.to().file()) < 2 {
            return None;
        }
        self.context
            .castle_by_destination(self.side_to_move, mv.to())
    }

    /// The castle path constraints: between squares empty, king path safe.
    #[must_use]
    pub(crate) fn is_castle_path_legal(&self, color: Color, wing: CastleSide) -> bool {
        let data = self.context.castle(color, wing);
        if self.all_occupied.0 & data.empty_path.0 != 0 {
            return false;
        }
        let them = color.opponent();
        data.safe_path
            .iter()
            .all(|sq| !self.is_square_attacked(sq, them))
    }

    /// The legality filter: would the side to move's king be attacked after
    /// this move? Assumes the move is pseudo-legal for the piece on `from`;
    /// use [`Board::make_move_strict`] for untrusted input.
    #[must_use]
    pub fn is_move_legal(&self, mv: Move) -> bool {
        if mv.is_null() {
            return false;
        }
        let us = self.side_to_move;
        let Some((color, piece)) = self.piece_at(mv.from()) else {
            return false;
        };
        if color != us {
            return false;
        }
        let them = us.opponent();

        if let Some(wing) = self.castle_wing_of(mv, piece) {
            let data = self.context.castle(us, wing);
            return mv.from() == data.king_from && self.is_castle_path_legal(us, wing);
        }

        let from_bb = mv.from().bitboard();
        let to_bb = mv.to().bitboard();

        if piece == Piece::King {
            // The destination must be safe once the king has left its
            // current square (a slider keeps attacking "through" the king).
            let occupancy = (self.all_occupied.0 ^ from_bb) | to_bb;
            return !self.square_attacked_with(mv.to(), them, occupancy, to_bb);
        }

        let Some(king) = self.find_king(us) else {
            return true;
        };
        let ep_bb = if self.is_en_passant_capture(mv, piece) {
            self.ep_target.map_or(0, Square::bitboard)
        } else {
            0
        };
        let occupancy = (self.all_occupied.0 ^ from_bb ^ ep_bb) | to_bb;
        !self.square_attacked_with(king, them, occupancy, to_bb | ep_bb)
    }

    /// After `pusher` double-pushed a pawn to `target`, decide whether the
    /// en-passant opportunity (landing on `destination`) is real: an enemy
    /// pawn must stand beside the pushed pawn and the capture must not
    /// expose the capturer's own king to a rook/queen or bishop/queen.
    #[must_use]
    pub(crate) fn ep_capturable(&self, pusher: Color, target: Square, destination: Square) -> bool {
        let capturer = pusher.opponent();
        let candidates = self.bitboard(capturer, Piece::Pawn).0
            & PAWN_ATTACKS[pusher.index()][destination.index()];
        if candidates == 0 {
            return false;
        }
        let Some(king) = self.find_king(capturer) else {
            return true;
        };
        let rooks = self.bitboard(pusher, Piece::Rook).0 | self.bitboard(pusher, Piece::Queen).0;
        let bishops =
            self.bitboard(pusher, Piece::Bishop).0 | self.bitboard(pusher, Piece::Queen).0;
        for from in Bitboard(candidates).iter() {
            // Remove both pawns, land the capturer on the crossed square.
            let occupancy = (self.all_occupied.0 ^ from.bitboard() ^ target.bitboard())
                | destination.bitboard();
            let exposed = rook_attacks(king.index(), occupancy) & rooks != 0
                || bishop_attacks(king.index(), occupancy) & bishops != 0;
            if !exposed {
                return true;
            }
        }
        false
    }
}
