use crate::chess::{Color, Role};
use derive_more::{Display, Error};
use shakmaty as sm;
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// A chess [piece][`Role`] of a certain [`Color`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Piece {
    role: Role,
    color: Color,
}

impl Piece {
    /// Constructs [`Piece`] from a pair of [`Role`] and [`Color`].
    #[inline]
    pub fn new(role: Role, color: Color) -> Self {
        Piece { role, color }
    }

    /// This piece's [`Role`].
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// This piece's [`Color`].
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns an iterator over all twelve pieces.
    #[inline]
    pub fn iter() -> impl Iterator<Item = Self> {
        Color::iter().flat_map(|c| Role::iter().map(move |r| Piece::new(r, c)))
    }

    /// This piece's figurine symbol.
    pub fn symbol(&self) -> char {
        use Color::*;
        use Role::*;
        match (self.role, self.color) {
            (Pawn, White) => '♙',
            (Knight, White) => '♘',
            (Bishop, White) => '♗',
            (Rook, White) => '♖',
            (Queen, White) => '♕',
            (King, White) => '♔',
            (Pawn, Black) => '♟',
            (Knight, Black) => '♞',
            (Bishop, Black) => '♝',
            (Rook, Black) => '♜',
            (Queen, Black) => '♛',
            (King, Black) => '♚',
        }
    }
}

/// Prints the piece the way FEN does, upper case for white and lower case for black.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = self.role.to_string().chars().next().unwrap_or('?');
        match self.color {
            Color::White => f.write_char(c.to_ascii_uppercase()),
            Color::Black => f.write_char(c),
        }
    }
}

/// The reason why parsing [`Piece`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse piece, expected one of `PNBRQKpnbrqk`")]
pub struct ParsePieceError;

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let role = lower.parse().map_err(|_| ParsePieceError)?;
        let color = if s == lower {
            Color::Black
        } else {
            Color::White
        };

        Ok(Piece::new(role, color))
    }
}

#[doc(hidden)]
impl From<sm::Piece> for Piece {
    #[inline]
    fn from(p: sm::Piece) -> Self {
        Piece::new(p.role.into(), p.color.into())
    }
}

#[doc(hidden)]
impl From<Piece> for sm::Piece {
    #[inline]
    fn from(p: Piece) -> Self {
        sm::Piece {
            color: p.color().into(),
            role: p.role().into(),
        }
    }
}
