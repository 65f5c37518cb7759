use crate::chess::{Color, Figure, File, ParsePieceError, Piece, Rank, Role, Square};
use arrayvec::ArrayString;
use derive_more::{Display, Error, From};
use std::fmt::{self, Write};
use std::{ops::Index, str::FromStr};

/// The chess board.
///
/// The board exclusively owns every live [`Figure`] and is the sole authority
/// on what occupies a [`Square`]. Since each square holds at most one figure,
/// no two figures can ever share a position.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    grid: [[Option<Figure>; 8]; 8],
}

impl Default for Board {
    /// The standard starting arrangement.
    fn default() -> Self {
        use Role::*;

        let mut board = Board::empty();
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for side in Color::iter() {
            for (file, role) in File::iter().zip(back) {
                let piece = Piece::new(role, side);
                board.put(Square::new(file, Rank::back(side)), Figure::new(piece));
                let pawn = Piece::new(Pawn, side);
                board.put(Square::new(file, Rank::pawns(side)), Figure::new(pawn));
            }
        }

        board
    }
}

impl Board {
    /// A board without any pieces.
    #[inline]
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
        }
    }

    /// The [`Figure`] on the given [`Square`], if any.
    #[inline]
    pub fn occupant(&self, sq: Square) -> Option<Figure> {
        let (f, r) = sq.coords();
        self.grid[r as usize][f as usize]
    }

    /// The [`Figure`] at a pair of raw coordinates.
    ///
    /// Coordinates off the board are simply unoccupied.
    #[inline]
    pub fn occupant_at(&self, file: i8, rank: i8) -> Option<Figure> {
        self.occupant(Square::from_coords(file, rank)?)
    }

    /// Whether the given [`Square`] is occupied.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.occupant(sq).is_some()
    }

    /// An iterator over all figures on the board and the squares they occupy.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Square, Figure)> + '_ {
        Square::iter().filter_map(|sq| Some((sq, self.occupant(sq)?)))
    }

    /// An iterator over the figures of a [`Color`] and the squares they occupy.
    #[inline]
    pub fn by_color(&self, side: Color) -> impl Iterator<Item = (Square, Figure)> + '_ {
        self.iter().filter(move |(_, f)| f.color() == side)
    }

    /// The [`Square`] occupied by the king of a [`Color`], if any.
    #[inline]
    pub fn king(&self, side: Color) -> Option<Square> {
        let king = Piece::new(Role::King, side);
        self.iter().find(|(_, f)| f.piece() == king).map(|(sq, _)| sq)
    }

    /// Places a [`Figure`] on a [`Square`], returning whatever stood there.
    #[inline]
    pub fn put(&mut self, sq: Square, figure: Figure) -> Option<Figure> {
        self.slot(sq).replace(figure)
    }

    /// Removes the [`Figure`] on a [`Square`], if any.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Figure> {
        self.slot(sq).take()
    }

    /// Moves the figure on `whence` to the vacant `whither`.
    #[inline]
    pub fn relocate(&mut self, whence: Square, whither: Square) {
        debug_assert!(!self.is_occupied(whither), "{whither} is occupied");
        if let Some(figure) = self.take(whence) {
            self.put(whither, figure);
        }
    }

    /// A printable diagram of this board.
    #[inline]
    pub fn diagram(&self) -> Diagram<'_> {
        Diagram(self)
    }

    #[inline]
    fn slot(&mut self, sq: Square) -> &mut Option<Figure> {
        let (f, r) = sq.coords();
        &mut self.grid[r as usize][f as usize]
    }

    /// Infers whether a figure found on a square must have moved to get there.
    fn settle(piece: Piece, sq: Square) -> Figure {
        let home = match piece.role() {
            Role::Pawn => Rank::pawns(piece.color()),
            _ => Rank::back(piece.color()),
        };

        if sq.rank() == home {
            Figure::new(piece)
        } else {
            Figure::moved(piece)
        }
    }
}

/// Retrieves the [`Figure`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Figure>;

    #[inline]
    fn index(&self, sq: Square) -> &Self::Output {
        let (f, r) = sq.coords();
        &self.grid[r as usize][f as usize]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({self})")
    }
}

/// Prints the piece placement field of the [FEN] notation.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut skip = 0;
            for file in File::iter() {
                match self[Square::new(file, rank)] {
                    None => skip += 1,
                    Some(figure) => {
                        if skip > 0 {
                            write!(f, "{skip}")?;
                            skip = 0;
                        }

                        write!(f, "{figure}")?;
                    }
                }
            }

            if skip > 0 {
                write!(f, "{skip}")?;
            }

            if rank != Rank::First {
                f.write_char('/')?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Board`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseBoardError {
    #[display(fmt = "failed to parse board, expected 8 ranks separated by `/`")]
    #[from(ignore)]
    RankCount,
    #[display(fmt = "failed to parse board, expected 8 squares on rank {}", _0)]
    #[from(ignore)]
    FileCount(#[error(not(source))] Rank),
    #[display(fmt = "failed to parse board")]
    InvalidPiece(ParsePieceError),
    #[display(fmt = "failed to parse board, expected at most one {} king", _0)]
    #[from(ignore)]
    KingCount(#[error(not(source))] Color),
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses the piece placement field of a FEN string, ignoring any other fields.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let placement = s.split_whitespace().next().unwrap_or_default();
        let rows: Vec<_> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(ParseBoardError::RankCount);
        }

        let mut board = Board::empty();
        for (rank, row) in Rank::iter().rev().zip(rows) {
            let mut file = 0i8;
            for c in row.chars() {
                match c.to_digit(10) {
                    Some(n @ 1..=8) => file += n as i8,
                    _ => {
                        let piece: Piece = c.encode_utf8(&mut [0; 4]).parse()?;
                        let sq = Square::from_coords(file, rank.index())
                            .ok_or(ParseBoardError::FileCount(rank))?;
                        board.put(sq, Board::settle(piece, sq));
                        file += 1;
                    }
                }

                if file > 8 {
                    return Err(ParseBoardError::FileCount(rank));
                }
            }

            if file != 8 {
                return Err(ParseBoardError::FileCount(rank));
            }
        }

        for side in Color::iter() {
            let king = Piece::new(Role::King, side);
            if board.iter().filter(|(_, f)| f.piece() == king).count() > 1 {
                return Err(ParseBoardError::KingCount(side));
            }
        }

        Ok(board)
    }
}

/// A human readable diagram of a [`Board`], white at the bottom.
#[derive(Debug, Copy, Clone)]
pub struct Diagram<'a>(&'a Board);

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut files = ArrayString::<40>::new();
        files.push_str("   ");
        for file in File::iter() {
            write!(files, "  {file} ")?;
        }

        writeln!(f, "{files}")?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;

        for rank in Rank::iter().rev() {
            write!(f, " {rank} |")?;

            for file in File::iter() {
                match self.0[Square::new(file, rank)] {
                    Some(figure) => write!(f, " {} |", figure.piece().symbol())?,
                    None => write!(f, "   |")?,
                }
            }

            writeln!(f, " {rank}")?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        write!(f, "{files}")
    }
}

// We provide a custom implementation of Arbitrary rather than deriving,
// so that every generated board has exactly one king of each color.
#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Board {
    type Parameters = ();
    type Strategy = proptest::strategy::BoxedStrategy<Board>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::{collection::vec, option::weighted, prelude::*};

        (
            vec(weighted(0.2, any::<Piece>()), 64),
            any::<Square>(),
            any::<Square>(),
        )
            .prop_filter("kings must stand apart", |(_, w, b)| w != b)
            .prop_map(|(pieces, wk, bk)| {
                let mut board = Board::empty();

                for (sq, piece) in Square::iter().zip(pieces) {
                    match piece {
                        Some(p) if p.role() == Role::King => continue,
                        Some(p) if p.role() == Role::Pawn && sq.rank().index() % 7 == 0 => continue,
                        Some(p) => board.put(sq, Board::settle(p, sq)),
                        None => continue,
                    };
                }

                board.put(wk, Board::settle(Piece::new(Role::King, Color::White), wk));
                board.put(bk, Board::settle(Piece::new(Role::King, Color::Black), bk));

                board
            })
            .boxed()
    }
}
