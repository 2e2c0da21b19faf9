//! FEN parsing and serialization.

use std::str::FromStr;

use crate::debug_log;

use super::error::{FenError, MoveParseError};
use super::types::{
    file_to_index, rank_to_index, CastleRight, CastleSide, Color, Move, Piece, Square,
};
use super::Board;

/// The standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// Returns an error if the FEN string is invalid.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        board.load_fen(fen)?;
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible
    /// parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Load a position into this board, replacing the current state but
    /// keeping the game context. History and the undo stack restart from
    /// the loaded position.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.clear();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        // Parse piece placement
        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::InvalidRank { rank: rank_idx });
            }
            let mut file = 0;
            for c in rank_str.chars() {
                if c.is_ascii_digit() {
                    file += c.to_digit(10).unwrap() as usize;
                } else {
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    self.set_piece(Square::new(7 - rank_idx, file), color, piece);
                    file += 1;
                }
            }
        }

        // Parse side to move
        self.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        // Parse castling rights
        for c in parts[2].chars() {
            match c {
                'K' => self.castle_rights[0] = self.castle_rights[0].with(CastleSide::King),
                'Q' => self.castle_rights[0] = self.castle_rights[0].with(CastleSide::Queen),
                'k' => self.castle_rights[1] = self.castle_rights[1].with(CastleSide::King),
                'q' => self.castle_rights[1] = self.castle_rights[1].with(CastleSide::Queen),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        // Parse the en-passant destination; the pair is only stored when the
        // capture is actually available.
        if parts[3] != "-" {
            let chars: Vec<char> = parts[3].chars().collect();
            let valid = chars.len() == 2
                && ('a'..='h').contains(&chars[0])
                && ('1'..='8').contains(&chars[1]);
            if !valid {
                return Err(FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                });
            }
            let destination = Square::new(rank_to_index(chars[1]), file_to_index(chars[0]));
            let pusher = self.side_to_move.opponent();
            let expected_rank = match pusher {
                Color::White => 2,
                Color::Black => 5,
            };
            if destination.rank() != expected_rank {
                return Err(FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                });
            }
            let target = Square::new(
                (destination.rank() as isize + pusher.pawn_direction()) as usize,
                destination.file(),
            );
            if self.piece_at(target) == Some((pusher, Piece::Pawn))
                && self.ep_capturable(pusher, target, destination)
            {
                self.ep_target = Some(target);
                self.ep_destination = Some(destination);
            }
        }

        // Parse counters (optional)
        if parts.len() >= 5 {
            self.halfmove_clock = parts[4].parse().unwrap_or(0);
        }
        if parts.len() >= 6 {
            self.fullmove_counter = parts[5].parse().unwrap_or(1);
        }

        self.hash = self.compute_hash();
        self.history.push(self.hash);
        debug_log!("loaded FEN '{fen}' with hash {:#018x}", self.hash);
        Ok(())
    }

    /// Convert the position to FEN notation with counters.
    #[must_use]
    pub fn fen(&self) -> String {
        self.fen_with(true, false)
    }

    /// Convert the position to FEN notation.
    ///
    /// `include_counters` appends the halfmove clock and fullmove counter.
    /// `ep_only_if_capturable` emits `-` for the en-passant field when no
    /// enemy pawn can actually make the capture.
    #[must_use]
    pub fn fen_with(&self, include_counters: bool, ep_only_if_capturable: bool) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                let sq = Square::new(rank, file);
                if let Some((color, piece)) = self.piece_at(sq) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = if self.white_to_move() { "w" } else { "b" };

        let mut castling = String::new();
        if self.castle_right(Color::White).allows(CastleSide::King) {
            castling.push('K');
        }
        if self.castle_right(Color::White).allows(CastleSide::Queen) {
            castling.push('Q');
        }
        if self.castle_right(Color::Black).allows(CastleSide::King) {
            castling.push('k');
        }
        if self.castle_right(Color::Black).allows(CastleSide::Queen) {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = match (self.ep_target, self.ep_destination) {
            (Some(target), Some(destination)) => {
                let pusher = self.side_to_move.opponent();
                if !ep_only_if_capturable || self.ep_capturable(pusher, target, destination) {
                    destination.to_string()
                } else {
                    "-".to_string()
                }
            }
            _ => "-".to_string(),
        };

        let mut fen = format!("{} {} {} {}", rows.join("/"), active, castling, ep);
        if include_counters {
            fen.push_str(&format!(
                " {} {}",
                self.halfmove_clock, self.fullmove_counter
            ));
        }
        fen
    }

    /// Parse a move in UCI long algebraic notation (e.g., "e2e4", "e7e8q").
    ///
    /// Returns the matching legal move if found, or an error describing why
    /// parsing failed.
    ///
    /// # Example
    /// ```
    /// use chesskit::board::Board;
    ///
    /// let board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&self, uci: &str) -> Result<Move, MoveParseError> {
        if uci.len() < 4 || uci.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: uci.len() });
        }

        let chars: Vec<char> = uci.chars().collect();

        if !('a'..='h').contains(&chars[0])
            || !('1'..='8').contains(&chars[1])
            || !('a'..='h').contains(&chars[2])
            || !('1'..='8').contains(&chars[3])
        {
            return Err(MoveParseError::InvalidSquare {
                notation: uci.to_string(),
            });
        }

        let from = Square::new(rank_to_index(chars[1]), file_to_index(chars[0]));
        let to = Square::new(rank_to_index(chars[3]), file_to_index(chars[2]));

        let promotion = if uci.len() == 5 {
            let piece = Piece::from_char(chars[4])
                .ok_or(MoveParseError::InvalidPromotion { char: chars[4] })?;
            if matches!(piece, Piece::Pawn | Piece::King) {
                return Err(MoveParseError::InvalidPromotion { char: chars[4] });
            }
            Some(piece)
        } else {
            None
        };

        let candidate = match promotion {
            Some(piece) => Move::promotion(from, to, piece),
            None => Move::new(from, to),
        };
        if self.legal_moves().contains(candidate) {
            Ok(candidate)
        } else {
            Err(MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
        }
    }

    /// Parse a UCI move and make it on the board in one call.
    ///
    /// # Example
    /// ```
    /// use chesskit::board::Board;
    ///
    /// let mut board = Board::new();
    /// board.make_move_uci("e2e4").unwrap();
    /// board.make_move_uci("e7e5").unwrap();
    /// ```
    pub fn make_move_uci(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(uci)?;
        self.make_move(mv);
        Ok(mv)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_round_trip() {
        let board = Board::try_from_fen(STARTING_FEN).unwrap();
        assert_eq!(board.fen(), STARTING_FEN);
    }

    #[test]
    fn test_starting_fen_matches_new() {
        assert_eq!(Board::new(), Board::from_fen(STARTING_FEN));
    }

    #[test]
    fn test_fen_black_to_move_with_ep() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::try_from_fen(fen).unwrap();
        assert!(!board.white_to_move());
        // A black pawn could in principle capture on e3? Not from the start
        // position (no pawn on d4/f4), so the pair is dropped.
        assert_eq!(board.ep_destination(), None);
        assert_eq!(board.fen_with(false, false), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq -");
    }

    #[test]
    fn test_fen_ep_kept_when_capturable() {
        let fen = "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 2";
        let board = Board::try_from_fen(fen).unwrap();
        assert_eq!(board.ep_destination().map(|s| s.to_string()), Some("e3".into()));
        assert_eq!(board.ep_target().map(|s| s.to_string()), Some("e4".into()));
        assert!(board.fen().contains(" e3 "));
    }

    #[test]
    fn test_fen_counters_default() {
        let board = Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w - -").unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_counter(), 1);
    }

    #[test]
    fn test_fen_counters_parsed() {
        let board = Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w - - 42 17").unwrap();
        assert_eq!(board.halfmove_clock(), 42);
        assert_eq!(board.fullmove_counter(), 17);
        assert!(board.fen().ends_with("42 17"));
    }

    #[test]
    fn test_fen_without_counters() {
        let board = Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w - - 42 17").unwrap();
        assert_eq!(board.fen_with(false, false), "8/8/8/8/8/8/8/K1k5 w - -");
    }

    #[test]
    fn test_fen_errors() {
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenError::TooFewParts { .. })
        ));
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiece { .. })
        ));
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1"),
            Err(FenError::InvalidCastling { .. })
        ));
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        // En-passant destination on an impossible rank
        assert!(matches!(
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq e6 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
    }

    #[test]
    fn test_fen_partial_castling() {
        let board =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1").unwrap();
        assert_eq!(board.castle_right(Color::White), CastleRight::KingSide);
        assert_eq!(board.castle_right(Color::Black), CastleRight::QueenSide);
        assert!(board.fen().contains(" Kq "));
    }

    #[test]
    fn test_fen_no_castling() {
        let board =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1").unwrap();
        assert_eq!(board.castle_right(Color::White), CastleRight::None);
        assert_eq!(board.castle_right(Color::Black), CastleRight::None);
    }

    #[test]
    fn test_load_fen_resets_history() {
        let mut board = Board::new();
        board.make_move_uci("e2e4").unwrap();
        board.load_fen("8/8/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        assert_eq!(board.history().len(), 1);
        assert_eq!(board.hash(), board.compute_hash());
    }

    #[test]
    fn test_parse_move_e2e4() {
        let board = Board::new();
        let mv = board.parse_move("e2e4").unwrap();
        assert_eq!(mv.from(), Square::new(1, 4));
        assert_eq!(mv.to(), Square::new(3, 4));
    }

    #[test]
    fn test_parse_move_promotion() {
        let board = Board::try_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        let mv = board.parse_move("a7a8q").unwrap();
        assert_eq!(mv.promoted_to(), Some(Piece::Queen));
    }

    #[test]
    fn test_parse_move_errors() {
        let board = Board::new();
        assert!(matches!(
            board.parse_move("e2"),
            Err(MoveParseError::InvalidLength { .. })
        ));
        assert!(matches!(
            board.parse_move("z9z9"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            board.parse_move("e2e5"),
            Err(MoveParseError::IllegalMove { .. })
        ));
        let board = Board::try_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").unwrap();
        assert!(matches!(
            board.parse_move("a7a8p"),
            Err(MoveParseError::InvalidPromotion { .. })
        ));
    }

    #[test]
    fn test_from_str_trait() {
        let board: Board = STARTING_FEN.parse().unwrap();
        assert!(board.white_to_move());
    }

    #[test]
    fn test_double_push_ep_advertised_only_with_capturer() {
        // From the start position no black pawn stands beside e4, so the
        // en-passant pair is dropped and the field serializes as '-'.
        let mut board = Board::new();
        board.make_move_uci("e2e4").unwrap();
        assert_eq!(
            board.fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );

        // With a black pawn on d4 the same push advertises e3.
        let mut board = Board::from_fen("rnbqkbnr/ppp1pppp/8/8/3p4/8/PPPPPPPP/RNBQKBNR w KQkq - 0 3");
        board.make_move_uci("e2e4").unwrap();
        assert_eq!(
            board.fen(),
            "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3"
        );
    }
}
