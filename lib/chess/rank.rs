use crate::chess::Color;
use derive_more::{Display, Error};
use shakmaty as sm;
use std::{ops::Sub, str::FromStr};

/// A row on the chess board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(i8)]
pub enum Rank {
    #[display(fmt = "1")]
    First,
    #[display(fmt = "2")]
    Second,
    #[display(fmt = "3")]
    Third,
    #[display(fmt = "4")]
    Fourth,
    #[display(fmt = "5")]
    Fifth,
    #[display(fmt = "6")]
    Sixth,
    #[display(fmt = "7")]
    Seventh,
    #[display(fmt = "8")]
    Eighth,
}

impl Rank {
    const ALL: [Self; 8] = {
        use Rank::*;
        [First, Second, Third, Fourth, Fifth, Sixth, Seventh, Eighth]
    };

    /// Constructs [`Rank`] from its index, or returns `None` if not in the range (0..=7).
    #[inline]
    pub fn from_index(i: i8) -> Option<Self> {
        usize::try_from(i).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// This rank's index in the range (0..=7).
    #[inline]
    pub fn index(&self) -> i8 {
        *self as i8
    }

    /// Returns an iterator over [`Rank`]s ordered by [index][`Rank::index`].
    #[inline]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        Self::ALL.into_iter()
    }

    /// The rank where the pieces of the given [`Color`] start the game.
    #[inline]
    pub fn back(side: Color) -> Self {
        match side {
            Color::White => Rank::First,
            Color::Black => Rank::Eighth,
        }
    }

    /// The rank where the pawns of the given [`Color`] start the game.
    #[inline]
    pub fn pawns(side: Color) -> Self {
        match side {
            Color::White => Rank::Second,
            Color::Black => Rank::Seventh,
        }
    }
}

impl Sub for Rank {
    type Output = i8;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.index() - rhs.index()
    }
}

/// The reason why parsing [`Rank`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse rank, expected digit in the range `(1..=8)`")]
pub struct ParseRankError;

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Rank::First),
            "2" => Ok(Rank::Second),
            "3" => Ok(Rank::Third),
            "4" => Ok(Rank::Fourth),
            "5" => Ok(Rank::Fifth),
            "6" => Ok(Rank::Sixth),
            "7" => Ok(Rank::Seventh),
            "8" => Ok(Rank::Eighth),
            _ => Err(ParseRankError),
        }
    }
}

#[doc(hidden)]
impl From<sm::Rank> for Rank {
    #[inline]
    fn from(r: sm::Rank) -> Self {
        Self::ALL[usize::from(u8::from(r))]
    }
}

#[doc(hidden)]
impl From<Rank> for sm::Rank {
    #[inline]
    fn from(r: Rank) -> Self {
        sm::Rank::ALL[r.index() as usize]
    }
}
