//! Error types for board operations.

use std::fmt;

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few parts (needs at least 4)
    TooFewParts { found: usize },
    /// Invalid piece character in position string
    InvalidPiece { char: char },
    /// Invalid castling character
    InvalidCastling { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// Invalid rank in position string
    InvalidRank { rank: usize },
    /// Too many files in a rank
    TooManyFiles { rank: usize, files: usize },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidCastling { char } => {
                write!(f, "Invalid castling character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::InvalidRank { rank } => {
                write!(f, "Invalid rank index {rank} in FEN")
            }
            FenError::TooManyFiles { rank, files } => {
                write!(f, "Too many files ({files}) in rank {rank}")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for coordinate-move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move string has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// Invalid square notation in move
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "Move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "Invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Rank out of bounds (must be 0-7)
    RankOutOfBounds { rank: usize },
    /// File out of bounds (must be 0-7)
    FileOutOfBounds { file: usize },
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "Rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "File {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for SAN (Standard Algebraic Notation) handling.
///
/// Errors raised while replaying a sequence carry the board's FEN at the
/// failure point so the offending position can be reconstructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// Empty SAN string
    Empty,
    /// Invalid piece character
    InvalidPiece { char: char },
    /// Invalid square in SAN
    InvalidSquare { notation: String },
    /// Invalid promotion piece
    InvalidPromotion { char: char },
    /// The origin square cannot be determined
    NoMatchingMove { san: String, fen: String },
    /// Multiple origin squares remain after legality filtering
    AmbiguousMove { san: String, fen: String },
    /// A decoded or supplied move is rejected by the legality filter
    IllegalMove { notation: String, fen: String },
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "Empty SAN string"),
            SanError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in SAN")
            }
            SanError::InvalidSquare { notation } => {
                write!(f, "Invalid square in SAN '{notation}'")
            }
            SanError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
            SanError::NoMatchingMove { san, fen } => {
                write!(f, "No legal move matches '{san}' in position {fen}")
            }
            SanError::AmbiguousMove { san, fen } => {
                write!(f, "Ambiguous move '{san}' in position {fen}")
            }
            SanError::IllegalMove { notation, fen } => {
                write!(f, "Illegal move '{notation}' in position {fen}")
            }
        }
    }
}

impl std::error::Error for SanError {}

/// Error type for position invariant violations.
///
/// Raised by `Board::validate`; a violation indicates a programming bug in
/// raw-placement usage, not bad user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// A mailbox entry disagrees with the piece bitboards
    MailboxMismatch { square: String },
    /// The two side-occupancy bitboards overlap
    OverlappingSides,
    /// A side does not have exactly one king
    BadKingCount { color: String, count: u32 },
    /// Only one half of the en-passant pair is set, or the pair geometry is wrong
    BadEnPassantPair,
    /// The incremental hash disagrees with a from-scratch recomputation
    HashMismatch { incremental: u64, recomputed: u64 },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::MailboxMismatch { square } => {
                write!(f, "Mailbox disagrees with bitboards at {square}")
            }
            InvariantError::OverlappingSides => {
                write!(f, "White and black occupancy bitboards overlap")
            }
            InvariantError::BadKingCount { color, count } => {
                write!(f, "{color} has {count} kings, expected 1")
            }
            InvariantError::BadEnPassantPair => {
                write!(f, "En-passant target/destination pair is inconsistent")
            }
            InvariantError::HashMismatch {
                incremental,
                recomputed,
            } => {
                write!(
                    f,
                    "Incremental hash {incremental:#018x} != recomputed {recomputed:#018x}"
                )
            }
        }
    }
}

impl std::error::Error for InvariantError {}
