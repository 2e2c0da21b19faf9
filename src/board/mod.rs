//! Board representation, move generation and notation.

mod context;
mod error;
mod fen;
mod geometry;
mod legality;
mod make_unmake;
mod movegen;
mod san;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use context::{CastleData, GameContext};
pub use error::{FenError, InvariantError, MoveParseError, SanError, SquareError};
pub use fen::STARTING_FEN;
pub use state::Board;
pub use types::{Bitboard, CastleRight, CastleSide, Color, Move, MoveList, Piece, Square};
