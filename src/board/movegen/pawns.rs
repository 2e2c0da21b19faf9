use super::super::geometry::{PAWN_ATTACKS, PAWN_PUSHES};
use super::super::types::{Bitboard, Move, MoveList, Square, PROMOTION_PIECES};
use super::super::Board;

impl Board {
    pub(crate) fn generate_pawn_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.side_to_move;
        let c_idx = color.index();
        let from_idx = from.index();

        // Pushes: the single step gates the double
        let step_free = from
            .forward(color.pawn_direction())
            .is_some_and(|sq| self.is_square_empty(sq));
        let pushes = if step_free {
            PAWN_PUSHES[c_idx][from_idx] & !self.all_occupied.0
        } else {
            0
        };

        // Captures: enemy occupancy or the en-passant destination
        let attacks = PAWN_ATTACKS[c_idx][from_idx];
        let mut captures = attacks & self.occupied_by(color.opponent()).0;
        if let Some(ep) = self.ep_destination {
            captures |= attacks & ep.bitboard();
        }

        let promotion_rank = color.pawn_promotion_rank();
        for to in Bitboard(pushes | captures).iter() {
            if to.rank() == promotion_rank {
                for promo in PROMOTION_PIECES {
                    moves.push(Move::promotion(from, to, promo));
                }
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }
}
