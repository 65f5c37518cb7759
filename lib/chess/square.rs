use crate::chess::{File, ParseFileError, ParseRankError, Rank};
use derive_more::{Display, Error, From};
use shakmaty as sm;
use std::str::FromStr;

/// Whether a pair of raw board coordinates lies on the board.
#[inline]
pub fn in_bounds(file: i8, rank: i8) -> bool {
    (0..8).contains(&file) && (0..8).contains(&rank)
}

/// A square on the chess board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}{}", file, rank)]
pub struct Square {
    // Field order makes the derived ordering rank-major, i.e. a1, b1, ..., h8.
    rank: Rank,
    file: File,
}

impl Square {
    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    #[inline]
    pub fn new(file: File, rank: Rank) -> Self {
        Square { rank, file }
    }

    /// Normalizes a pair of raw coordinates, or returns `None` if off the board.
    #[inline]
    pub fn from_coords(file: i8, rank: i8) -> Option<Self> {
        Some(Square::new(File::from_index(file)?, Rank::from_index(rank)?))
    }

    /// This square's [`File`].
    #[inline]
    pub fn file(&self) -> File {
        self.file
    }

    /// This square's [`Rank`].
    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// This square's raw `(file, rank)` coordinates.
    #[inline]
    pub fn coords(&self) -> (i8, i8) {
        (self.file.index(), self.rank.index())
    }

    /// The square displaced by `(df, dr)` from this one, if still on the board.
    #[inline]
    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let (f, r) = self.coords();
        Square::from_coords(f.checked_add(df)?, r.checked_add(dr)?)
    }

    /// The displacement `(df, dr)` that leads from this square to `whither`.
    #[inline]
    pub fn delta(&self, whither: Square) -> (i8, i8) {
        (whither.file - self.file, whither.rank - self.rank)
    }

    /// Returns an iterator over all 64 squares, rank by rank starting from `a1`.
    #[inline]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Rank::iter().flat_map(|r| File::iter().map(move |f| Square::new(f, r)))
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square")]
    InvalidFile(ParseFileError),
    #[display(fmt = "failed to parse square")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}

#[doc(hidden)]
impl From<sm::Square> for Square {
    #[inline]
    fn from(s: sm::Square) -> Self {
        Square::new(s.file().into(), s.rank().into())
    }
}

#[doc(hidden)]
impl From<Square> for sm::Square {
    #[inline]
    fn from(s: Square) -> Self {
        sm::Square::from_coords(s.file().into(), s.rank().into())
    }
}
