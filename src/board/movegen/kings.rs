use super::super::geometry::KING_ATTACKS;
use super::super::types::{Bitboard, CastleSide, Move, MoveList, Piece, Square};
use super::super::Board;

impl Board {
    pub(crate) fn generate_king_moves(&self, from: Square, moves: &mut MoveList) {
        let color = self.side_to_move;
        let own = self.occupied_by(color).0;
        for to in Bitboard(KING_ATTACKS[from.index()] & !own).iter() {
            moves.push(Move::new(from, to));
        }

        // Castles are emitted whenever the right is held and the rook is
        // home; the legality filter rules on path emptiness and safety.
        for wing in [CastleSide::King, CastleSide::Queen] {
            if !self.castle_right(color).allows(wing) {
                continue;
            }
            let data = self.context.castle(color, wing);
            if from == data.king_from
                && self.piece_at(data.rook_from) == Some((color, Piece::Rook))
            {
                moves.push(Move::new(data.king_from, data.king_to));
            }
        }
    }
}
