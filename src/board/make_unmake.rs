//! Move execution and exact reversal.
//!
//! Every accepted move pushes an [`UndoEntry`](super::state::UndoEntry) and
//! appends the new hash to the history; `undo_move` pops both and restores
//! the position bit for bit. All state updates go through the hash-coherent
//! primitives, so the incremental hash never drifts from a from-scratch
//! recomputation.

use crate::debug_log;

use super::state::UndoEntry;
use super::types::{CastleRight, CastleSide, Color, Move, Piece, Square};
use super::Board;

impl Board {
    /// Apply a move if the legality filter accepts it.
    ///
    /// Returns `false` and leaves the position untouched for an illegal
    /// move. The move is trusted to be pseudo-legal for the piece on its
    /// origin square; use [`Board::make_move_strict`] for untrusted input.
    pub fn make_move(&mut self, mv: Move) -> bool {
        self.do_move(mv, false)
    }

    /// Apply a move with full validation on top of the legality filter:
    /// the mover must belong to the side to move, the destination must not
    /// hold a same-color piece, a promotion piece must be present exactly
    /// when a pawn reaches the terminal rank, and a castle requires the
    /// right to be held.
    pub fn make_move_strict(&mut self, mv: Move) -> bool {
        self.do_move(mv, true)
    }

    fn do_move(&mut self, mv: Move, full_validation: bool) -> bool {
        if !self.is_move_legal(mv) {
            debug_log!("rejected move {mv}: legality filter");
            return false;
        }
        if full_validation && !self.passes_full_validation(mv) {
            debug_log!("rejected move {mv}: full validation");
            return false;
        }

        let us = self.side_to_move;
        let them = us.opponent();
        let Some((_, piece)) = self.piece_at(mv.from()) else {
            return false;
        };

        let castle_wing = self.castle_wing_of(mv, piece);
        if let Some(wing) = castle_wing {
            // A castle with the rook missing is unexecutable no matter what
            // the rights claim.
            let data = self.context.castle(us, wing);
            if self.piece_at(data.rook_from) != Some((us, Piece::Rook)) {
                return false;
            }
        }

        let is_ep = self.is_en_passant_capture(mv, piece);
        let captured: Option<(Color, Piece, Square)> = if is_ep {
            self.ep_target.map(|sq| (them, Piece::Pawn, sq))
        } else {
            self.piece_at(mv.to())
                .filter(|(color, _)| *color == them)
                .map(|(color, captured)| (color, captured, mv.to()))
        };

        self.undo_stack.push(UndoEntry {
            mv,
            captured,
            castle_rights: self.castle_rights,
            ep_target: self.ep_target,
            ep_destination: self.ep_destination,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        });

        self.set_ep_pair(None, None);

        if let Some(wing) = castle_wing {
            let data = *self.context.castle(us, wing);
            self.unset_piece(data.king_from);
            self.set_piece(data.king_to, us, Piece::King);
            self.unset_piece(data.rook_from);
            self.set_piece(data.rook_to, us, Piece::Rook);
            self.set_castle_right(us, CastleRight::None);
        } else {
            match piece {
                Piece::King => {
                    self.set_castle_right(us, CastleRight::None);
                }
                Piece::Rook => {
                    if let Some(wing) = self.context.wing_of_rook_home(us, mv.from()) {
                        let right = self.castle_right(us);
                        if right.allows(wing) {
                            self.set_castle_right(us, right.without(wing));
                        }
                    }
                }
                _ => {}
            }

            if let Some((_, _, square)) = captured {
                self.unset_piece(square);
            }
            self.unset_piece(mv.from());
            let placed = mv.promoted_to().unwrap_or(piece);
            self.set_piece(mv.to(), us, placed);

            // A rook captured on its home square takes the right with it
            if let Some((_, Piece::Rook, square)) = captured {
                if let Some(wing) = self.context.wing_of_rook_home(them, square) {
                    let right = self.castle_right(them);
                    if right.allows(wing) {
                        self.set_castle_right(them, right.without(wing));
                    }
                }
            }
        }

        if captured.is_some() || piece == Piece::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_counter += 1;
        }

        // Advertise en passant only when some enemy pawn can actually use it
        if piece == Piece::Pawn && mv.from().rank().abs_diff(mv.to().rank()) == 2 {
            let crossed = Square::new(
                (mv.from().rank() + mv.to().rank()) / 2,
                mv.from().file(),
            );
            if self.ep_capturable(us, mv.to(), crossed) {
                self.set_ep_pair(Some(mv.to()), Some(crossed));
            }
        }

        self.set_side_to_move(them);
        self.history.push(self.hash);
        true
    }

    fn passes_full_validation(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        let Some((color, piece)) = self.piece_at(mv.from()) else {
            return false;
        };
        if color != us {
            return false;
        }
        if let Some(wing) = self.castle_wing_of(mv, piece) {
            let data = self.context.castle(us, wing);
            return self.castle_right(us).allows(wing)
                && self.piece_at(data.rook_from) == Some((us, Piece::Rook));
        }
        if self.color_on(mv.to()) == Some(us) {
            return false;
        }
        let reaches_terminal =
            piece == Piece::Pawn && mv.to().rank() == us.pawn_promotion_rank();
        match (reaches_terminal, mv.promoted_to()) {
            (true, Some(promo)) => !matches!(promo, Piece::Pawn | Piece::King),
            (true, None) => false,
            (false, Some(_)) => false,
            (false, None) => true,
        }
    }

    /// Flip the side to move without moving a piece.
    ///
    /// Pushes an undo entry so that [`Board::undo_move`] stays symmetrical.
    pub fn make_null_move(&mut self) {
        self.undo_stack.push(UndoEntry {
            mv: Move::NULL,
            captured: None,
            castle_rights: self.castle_rights,
            ep_target: self.ep_target,
            ep_destination: self.ep_destination,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        });
        self.set_ep_pair(None, None);
        self.set_side_to_move(self.side_to_move.opponent());
        self.history.push(self.hash);
    }

    /// Reverse the most recent move (or null move), restoring every
    /// side effect: placement, rights, en passant, counters, hash and
    /// history. Returns the move undone, or `None` on an empty stack.
    pub fn undo_move(&mut self) -> Option<Move> {
        let entry = self.undo_stack.pop()?;
        self.history.pop();
        let mover = self.side_to_move.opponent();
        let mv = entry.mv;

        if !mv.is_null() {
            let moved = self.piece_on(mv.to());
            let castle_wing = if moved == Some(Piece::King) {
                self.castle_wing_of_mover(mover, mv)
            } else {
                None
            };
            if let Some(wing) = castle_wing {
                let data = *self.context.castle(mover, wing);
                self.unset_piece(data.king_to);
                self.set_piece(data.king_from, mover, Piece::King);
                self.unset_piece(data.rook_to);
                self.set_piece(data.rook_from, mover, Piece::Rook);
            } else {
                let placed = self.unset_piece(mv.to());
                let original = if mv.promoted_to().is_some() {
                    Piece::Pawn
                } else {
                    placed.map_or(Piece::Pawn, |(_, piece)| piece)
                };
                self.set_piece(mv.from(), mover, original);
                if let Some((color, piece, square)) = entry.captured {
                    self.set_piece(square, color, piece);
                }
            }
            if mover == Color::Black {
                self.fullmove_counter -= 1;
            }
        }

        // Scalar state comes straight from the snapshot; the hash overwrite
        // below settles anything the primitives touched along the way.
        self.side_to_move = mover;
        self.castle_rights = entry.castle_rights;
        self.ep_target = entry.ep_target;
        self.ep_destination = entry.ep_destination;
        self.halfmove_clock = entry.halfmove_clock;
        self.hash = entry.hash;
        Some(mv)
    }

    fn castle_wing_of_mover(&self, mover: Color, mv: Move) -> Option<CastleSide> {
        if mv.from().file().abs_diff(mv.to().file()) < 2 {
            return None;
        }
        self.context
            .castle_by_destination(mover, mv.to())
            .filter(|wing| self.context.castle(mover, *wing).king_from == mv.from())
    }
}
