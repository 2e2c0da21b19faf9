use super::super::geometry::{bishop_attacks, queen_attacks, rook_attacks};
use super::super::types::{Bitboard, Move, MoveList, Square};
use super::super::Board;

/// Type of sliding piece for move generation
#[derive(Clone, Copy)]
pub(crate) enum SliderType {
    Bishop,
    Rook,
    Queen,
}

impl Board {
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        slider: SliderType,
        moves: &mut MoveList,
    ) {
        let own = self.occupied_by(self.side_to_move).0;
        let occupancy = self.all_occupied.0;
        let raw = match slider {
            SliderType::Bishop => bishop_attacks(from.index(), occupancy),
            SliderType::Rook => rook_attacks(from.index(), occupancy),
            SliderType::Queen => queen_attacks(from.index(), occupancy),
        };
        for to in Bitboard(raw & !own).iter() {
            moves.push(Move::new(from, to));
        }
    }
}
