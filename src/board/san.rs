//! Standard and Figurine Algebraic Notation support.
//!
//! SAN is the human-readable move notation used in scoresheets, books and
//! GUIs ("e4", "Nf3", "Bxc6+", "O-O", "e8=Q#"); FAN replaces the piece
//! letter with the Unicode figurine.
//!
//! Encoding is a position mutator by design: the check/mate suffix and
//! capture marker depend on the position after the move, so the encoder
//! applies the move and leaves the board one ply ahead. Decoding never
//! commits a move.
//!
//! # Examples
//! ```
//! use chesskit::board::Board;
//!
//! let mut board = Board::new();
//! let mv = board.parse_san("e4").unwrap();
//! assert_eq!(board.san_move(mv).unwrap(), "e4");
//! ```

use super::error::SanError;
use super::types::{Bitboard, CastleSide, Color, Move, MoveList, Piece, Square};
use super::Board;

impl Board {
    /// Encode a move in SAN and apply it to the board.
    pub fn san_move(&mut self, mv: Move) -> Result<String, SanError> {
        self.encode_move(mv, false)
    }

    /// Encode a move in FAN (Unicode figurines) and apply it to the board.
    pub fn fan_move(&mut self, mv: Move) -> Result<String, SanError> {
        self.encode_move(mv, true)
    }

    fn encode_move(&mut self, mv: Move, figurine: bool) -> Result<String, SanError> {
        let us = self.side_to_move;
        let Some((color, piece)) = self.piece_at(mv.from()) else {
            return Err(SanError::IllegalMove {
                notation: mv.to_string(),
                fen: self.fen(),
            });
        };

        // Castles short-circuit: king jumping two or more files
        if piece == Piece::King && mv.from().file().abs_diff(mv.to().file()) >= 2 {
            let mut san = if mv.to().file() > mv.from().file() {
                String::from("O-O")
            } else {
                String::from("O-O-O")
            };
            if !self.make_move(mv) {
                return Err(SanError::IllegalMove {
                    notation: mv.to_string(),
                    fen: self.fen(),
                });
            }
            san.push_str(self.check_suffix());
            return Ok(san);
        }

        let mut san = String::new();
        if piece != Piece::Pawn {
            if figurine {
                san.push(piece.fan_glyph(color));
            } else {
                san.push_str(piece.san_letter());
            }
        }

        // Disambiguate against other same-type pieces that could also reach
        // the destination legally: file alone, then rank alone, then the
        // full origin square.
        let mut disambiguated = false;
        if piece != Piece::Pawn {
            let others =
                self.attackers_of_type(mv.to(), us, piece).0 & !mv.from().bitboard();
            let rivals: Vec<Square> = Bitboard(others)
                .iter()
                .filter(|rival| self.is_move_legal(Move::new(*rival, mv.to())))
                .collect();
            if !rivals.is_empty() {
                let file_taken = rivals.iter().any(|r| r.file() == mv.from().file());
                let rank_taken = rivals.iter().any(|r| r.rank() == mv.from().rank());
                if !file_taken {
                    san.push(mv.from().file_char());
                } else if !rank_taken {
                    san.push(mv.from().rank_char());
                } else {
                    san.push_str(&mv.from().to_string());
                }
                disambiguated = true;
            }
        }

        let is_capture = self.color_on(mv.to()) == Some(us.opponent())
            || self.is_en_passant_capture(mv, piece);
        if is_capture {
            if piece == Piece::Pawn && !disambiguated {
                san.push(mv.from().file_char());
            }
            san.push('x');
        }

        san.push_str(&mv.to().to_string());

        if let Some(promo) = mv.promoted_to() {
            san.push('=');
            if figurine {
                san.push(promo.fan_glyph(color));
            } else {
                san.push_str(promo.san_letter());
            }
        }

        if !self.make_move(mv) {
            return Err(SanError::IllegalMove {
                notation: mv.to_string(),
                fen: self.fen(),
            });
        }
        san.push_str(self.check_suffix());
        Ok(san)
    }

    fn check_suffix(&self) -> &'static str {
        if self.is_checkmate() {
            "#"
        } else if self.is_king_attacked() {
            "+"
        } else {
            ""
        }
    }

    /// Decode a SAN (or FAN-free ASCII) move against the current position.
    ///
    /// Accepts check/mate/annotation suffixes and the `Z0` null move. The
    /// board is not modified; use [`Board::make_move_san`] to decode and
    /// commit in one step.
    pub fn parse_san(&self, san: &str) -> Result<Move, SanError> {
        let original = san;
        let mut normalized: String = san
            .chars()
            .filter(|c| !matches!(c, '+' | '#' | '!' | '?' | '\n' | '\r'))
            .collect();
        if let Some(stripped) = normalized.strip_suffix("e.p.") {
            normalized = stripped.trim_end().to_string();
        }
        if normalized.len() > 2 {
            if let Some(stripped) = normalized.strip_suffix("ep") {
                normalized = stripped.trim_end().to_string();
            }
        }
        let body = normalized.trim();
        if body.is_empty() {
            return Err(SanError::Empty);
        }
        if !body.is_ascii() {
            return Err(SanError::InvalidSquare {
                notation: body.to_string(),
            });
        }

        if body.eq_ignore_ascii_case("z0") {
            return Ok(Move::NULL);
        }

        if body == "O-O" || body == "0-0" {
            return Ok(self.castle_move(CastleSide::King));
        }
        if body == "O-O-O" || body == "0-0-0" {
            return Ok(self.castle_move(CastleSide::Queen));
        }

        // Split off the promotion: '=<letter>' or a bare trailing letter
        let mut promotion: Option<Piece> = None;
        let mut body = body.to_string();
        if let Some(eq) = body.find('=') {
            let promo_char = body[eq + 1..]
                .chars()
                .next()
                .ok_or(SanError::InvalidPromotion { char: '=' })?;
            promotion = Some(parse_promotion_piece(promo_char)?);
            body.truncate(eq);
        } else if body.len() >= 3 {
            // A bare trailing letter is an implicit promotion ("e8Q")
            let last = body.chars().last().unwrap();
            if last.is_ascii_alphabetic() && last != 'O' {
                let rest = &body[..body.len() - last.len_utf8()];
                if rest.chars().last().is_some_and(|c| c.is_ascii_digit()) {
                    promotion = Some(parse_promotion_piece(last)?);
                    body = rest.to_string();
                }
            }
        }

        let body: String = body.chars().filter(|c| *c != 'x').collect();
        if body.len() < 2 {
            return Err(SanError::InvalidSquare { notation: body });
        }
        let dest: Square =
            body[body.len() - 2..]
                .parse()
                .map_err(|_| SanError::InvalidSquare {
                    notation: body[body.len() - 2..].to_string(),
                })?;
        let prefix = &body[..body.len() - 2];

        let us = self.side_to_move;
        let (piece, specifier) = match prefix.chars().next() {
            None => (Piece::Pawn, ""),
            Some(first) if first.is_ascii_uppercase() => (
                Piece::from_char(first).ok_or(SanError::InvalidPiece { char: first })?,
                &prefix[1..],
            ),
            Some(_) => (Piece::Pawn, prefix),
        };

        if piece == Piece::Pawn && specifier.is_empty() {
            // Plain pawn move: the origin is the nearest own pawn behind the
            // destination on the same file (pawn pushes cannot jump pieces).
            let from = self
                .pawn_push_origin(us, dest)
                .ok_or_else(|| SanError::NoMatchingMove {
                    san: original.to_string(),
                    fen: self.fen(),
                })?;
            return Ok(attach_promotion(from, dest, promotion));
        }

        let mut candidates = self.attackers_of_type(dest, us, piece).0;
        let (dis_file, dis_rank) = parse_specifier(specifier, original)?;
        if let Some(file) = dis_file {
            candidates &= Bitboard::file_mask(file).0;
        }
        if let Some(rank) = dis_rank {
            candidates &= Bitboard::rank_mask(rank).0;
        }

        match candidates.count_ones() {
            0 => Err(SanError::NoMatchingMove {
                san: original.to_string(),
                fen: self.fen(),
            }),
            1 => Ok(attach_promotion(
                Bitboard(candidates).first_square(),
                dest,
                promotion,
            )),
            _ => {
                // The specifier alone leaves several pieces; legality picks
                // the real one.
                let legal: Vec<Square> = Bitboard(candidates)
                    .iter()
                    .filter(|from| {
                        self.is_move_legal(attach_promotion(*from, dest, promotion))
                    })
                    .collect();
                match legal.as_slice() {
                    [] => Err(SanError::NoMatchingMove {
                        san: original.to_string(),
                        fen: self.fen(),
                    }),
                    [from] => Ok(attach_promotion(*from, dest, promotion)),
                    _ => Err(SanError::AmbiguousMove {
                        san: original.to_string(),
                        fen: self.fen(),
                    }),
                }
            }
        }
    }

    /// Decode a SAN move and make it on the board in one call.
    pub fn make_move_san(&mut self, san: &str) -> Result<Move, SanError> {
        let mv = self.parse_san(san)?;
        if mv.is_null() {
            self.make_null_move();
            return Ok(mv);
        }
        if !self.make_move(mv) {
            return Err(SanError::IllegalMove {
                notation: san.to_string(),
                fen: self.fen(),
            });
        }
        Ok(mv)
    }

    fn castle_move(&self, wing: CastleSide) -> Move {
        let data = self.context.castle(self.side_to_move, wing);
        Move::new(data.king_from, data.king_to)
    }

    /// The nearest own pawn behind `dest` on the same file: highest below
    /// for White, lowest above for Black.
    fn pawn_push_origin(&self, us: Color, dest: Square) -> Option<Square> {
        let pawns = self.bitboard(us, Piece::Pawn).0 & Bitboard::file_mask(dest.file()).0;
        let dest_bit = dest.bitboard();
        match us {
            Color::White => {
                let below = pawns & dest_bit.wrapping_sub(1);
                if below == 0 {
                    None
                } else {
                    Some(Bitboard(below).last_square())
                }
            }
            Color::Black => {
                let above = pawns & !(dest_bit | dest_bit.wrapping_sub(1));
                if above == 0 {
                    None
                } else {
                    Some(Bitboard(above).first_square())
                }
            }
        }
    }
}

fn attach_promotion(from: Square, to: Square, promotion: Option<Piece>) -> Move {
    match promotion {
        Some(piece) => Move::promotion(from, to, piece),
        None => Move::new(from, to),
    }
}

fn parse_promotion_piece(c: char) -> Result<Piece, SanError> {
    let piece = Piece::from_char(c).ok_or(SanError::InvalidPromotion { char: c })?;
    if matches!(piece, Piece::Pawn | Piece::King) {
        return Err(SanError::InvalidPromotion { char: c });
    }
    Ok(piece)
}

/// A disambiguator is empty, a file letter, a rank digit, or a full square.
fn parse_specifier(
    specifier: &str,
    original: &str,
) -> Result<(Option<usize>, Option<usize>), SanError> {
    let chars: Vec<char> = specifier.chars().collect();
    match chars.as_slice() {
        [] => Ok((None, None)),
        [c @ 'a'..='h'] => Ok((Some(*c as usize - 'a' as usize), None)),
        [c @ '1'..='8'] => Ok((None, Some(*c as usize - '1' as usize))),
        [f @ 'a'..='h', r @ '1'..='8'] => Ok((
            Some(*f as usize - 'a' as usize),
            Some(*r as usize - '1' as usize),
        )),
        _ => Err(SanError::InvalidSquare {
            notation: original.to_string(),
        }),
    }
}

fn encode_or_null(board: &mut Board, mv: Move, figurine: bool) -> Result<String, SanError> {
    if mv.is_null() {
        board.make_null_move();
        return Ok(String::from("Z0"));
    }
    if figurine {
        board.fan_move(mv)
    } else {
        board.san_move(mv)
    }
}

impl MoveList {
    fn replay_board(&self) -> Result<Board, SanError> {
        match self.start_fen() {
            None => Ok(Board::new()),
            Some(fen) => Board::try_from_fen(fen).map_err(|_| SanError::InvalidSquare {
                notation: fen.to_string(),
            }),
        }
    }

    fn render(&mut self) -> Result<(), SanError> {
        let mut san = Vec::with_capacity(self.len());
        let mut board = self.replay_board()?;
        for mv in self.as_slice() {
            san.push(encode_or_null(&mut board, *mv, false)?);
        }
        let mut fan = Vec::with_capacity(self.len());
        let mut board = self.replay_board()?;
        for mv in self.as_slice() {
            fan.push(encode_or_null(&mut board, *mv, true)?);
        }
        self.store_rendered(san, fan);
        Ok(())
    }

    /// The SAN rendering of every move, replayed from the start FEN.
    /// Cached until the list is mutated.
    pub fn san_array(&mut self) -> Result<&[String], SanError> {
        if self.is_dirty() {
            self.render()?;
        }
        Ok(self.cached_san())
    }

    /// The FAN rendering of every move, replayed from the start FEN.
    pub fn fan_array(&mut self) -> Result<&[String], SanError> {
        if self.is_dirty() {
            self.render()?;
        }
        Ok(self.cached_fan())
    }

    /// The SAN moves joined with single spaces (no move numbers).
    pub fn san_text(&mut self) -> Result<String, SanError> {
        Ok(self.san_array()?.join(" "))
    }

    /// Replace the list contents by decoding a whitespace-separated SAN
    /// sequence. Move numbers, results, NAGs and brace comments are skipped.
    pub fn load_from_san(&mut self, text: &str) -> Result<(), SanError> {
        self.clear();
        let mut board = self.replay_board()?;
        let stripped = strip_brace_comments(text);
        for token in stripped.split_whitespace() {
            if is_skippable_token(token) {
                continue;
            }
            let mv = board.parse_san(token)?;
            if mv.is_null() {
                board.make_null_move();
            } else if !board.make_move(mv) {
                return Err(SanError::IllegalMove {
                    notation: token.to_string(),
                    fen: board.fen(),
                });
            }
            self.push(mv);
        }
        Ok(())
    }
}

fn strip_brace_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn is_skippable_token(token: &str) -> bool {
    token.starts_with('$')
        || token.contains("...")
        || token.chars().all(|c| c.is_ascii_digit() || c == '.')
        || matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}
