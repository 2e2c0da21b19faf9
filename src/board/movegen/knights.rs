use super::super::geometry::KNIGHT_ATTACKS;
use super::super::types::{Bitboard, Move, MoveList, Square};
use super::super::Board;

impl Board {
    pub(crate) fn generate_knight_moves(&self, from: Square, moves: &mut MoveList) {
        let own = self.occupied_by(self.side_to_move).0;
        let targets = Bitboard(KNIGHT_ATTACKS[from.index()] & !own);
        for to in targets.iter() {
            moves.push(Move::new(from, to));
        }
    }
}
