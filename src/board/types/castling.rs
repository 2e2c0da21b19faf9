//! Castle right type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One side's castling permission.
///
/// Stored per color; the ordinal (0-3) feeds the Zobrist castle-right keys,
/// so the variant order must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastleRight {
    #[default]
    None,
    KingSide,
    QueenSide,
    KingAndQueenSide,
}

/// Which wing a castle happens on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleRight {
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            CastleRight::None => 0,
            CastleRight::KingSide => 1,
            CastleRight::QueenSide => 2,
            CastleRight::KingAndQueenSide => 3,
        }
    }

    /// Check whether this right permits castling on the given wing
    #[inline]
    #[must_use]
    pub const fn allows(self, side: CastleSide) -> bool {
        match side {
            CastleSide::King => {
                matches!(self, CastleRight::KingSide | CastleRight::KingAndQueenSide)
            }
            CastleSide::Queen => matches!(
                self,
                CastleRight::QueenSide | CastleRight::KingAndQueenSide
            ),
        }
    }

    /// The right left over after losing permission on the given wing
    #[inline]
    #[must_use]
    pub const fn without(self, side: CastleSide) -> CastleRight {
        match (self, side) {
            (CastleRight::KingAndQueenSide, CastleSide::King)
            | (CastleRight::QueenSide, CastleSide::King) => CastleRight::QueenSide,
            (CastleRight::KingAndQueenSide, CastleSide::Queen)
            | (CastleRight::KingSide, CastleSide::Queen) => CastleRight::KingSide,
            _ => CastleRight::None,
        }
    }

    /// The right gained by adding permission on the given wing
    #[inline]
    #[must_use]
    pub const fn with(self, side: CastleSide) -> CastleRight {
        match (self, side) {
            (CastleRight::None, CastleSide::King) | (CastleRight::KingSide, CastleSide::King) => {
                CastleRight::KingSide
            }
            (CastleRight::None, CastleSide::Queen)
            | (CastleRight::QueenSide, CastleSide::Queen) => CastleRight::QueenSide,
            _ => CastleRight::KingAndQueenSide,
        }
    }
}

impl fmt::Display for CastleRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleRight::None => write!(f, "-"),
            CastleRight::KingSide => write!(f, "K"),
            CastleRight::QueenSide => write!(f, "Q"),
            CastleRight::KingAndQueenSide => write!(f, "KQ"),
        }
    }
}
