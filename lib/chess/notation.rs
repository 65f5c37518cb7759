use crate::chess::{ParseSquareError, Role, Square};
use derive_more::{Constructor, DebugCustom, Display, Error, From};
use std::fmt::{self, Formatter, Write};
use std::str::FromStr;

/// A move written as the kind of piece to move and the square it should land on.
///
/// Pawn moves carry no piece letter, e.g. `d4`, while other pieces are prefixed
/// by `K`ing, `H`etman (queen), `S`koczek (knight), `G`oniec (bishop) or
/// `W`ieża (rook), e.g. `Sf3`.
#[derive(DebugCustom, Copy, Clone, Eq, PartialEq, Hash, Constructor)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug(fmt = "Notation({})", self)]
pub struct Notation {
    role: Role,
    whither: Square,
}

impl Notation {
    /// The kind of piece to move.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// The destination [`Square`].
    #[inline]
    pub fn whither(&self) -> Square {
        self.whither
    }

    fn letter(role: Role) -> Option<char> {
        match role {
            Role::Pawn => None,
            Role::Knight => Some('S'),
            Role::Bishop => Some('G'),
            Role::Rook => Some('W'),
            Role::Queen => Some('H'),
            Role::King => Some('K'),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(c) = Notation::letter(self.role) {
            f.write_char(c)?;
        }

        write!(f, "{}", self.whither)
    }
}

/// The reason why parsing [`Notation`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse notation; {}")]
pub enum ParseNotationError {
    #[display(fmt = "expected 2 or 3 characters")]
    #[from(ignore)]
    InvalidLength,

    #[display(fmt = "expected one of `K`, `H`, `S`, `G`, `W`")]
    #[from(ignore)]
    InvalidPiece,

    #[display(fmt = "invalid square")]
    InvalidSquare(ParseSquareError),
}

impl FromStr for Notation {
    type Err = ParseNotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let role = match (chars.next(), s.chars().count()) {
            (_, 2) => Role::Pawn,
            (Some('K'), 3) => Role::King,
            (Some('H'), 3) => Role::Queen,
            (Some('S'), 3) => Role::Knight,
            (Some('G'), 3) => Role::Bishop,
            (Some('W'), 3) => Role::Rook,
            (_, 3) => return Err(ParseNotationError::InvalidPiece),
            _ => return Err(ParseNotationError::InvalidLength),
        };

        let whither = match role {
            Role::Pawn => s.parse()?,
            _ => chars.as_str().parse()?,
        };

        Ok(Notation::new(role, whither))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{File, Rank};
    use test_strategy::proptest;

    #[proptest]
    fn parsing_printed_notation_is_an_identity(n: Notation) {
        assert_eq!(n.to_string().parse(), Ok(n));
    }

    #[test]
    fn pawn_moves_have_no_piece_letter() {
        let n: Notation = "d4".parse().unwrap();
        assert_eq!(n.role(), Role::Pawn);
        assert_eq!(n.whither(), Square::new(File::D, Rank::Fourth));
    }

    #[test]
    fn piece_letters_name_the_moving_role() {
        for (s, role) in [
            ("Ke2", Role::King),
            ("He2", Role::Queen),
            ("Se2", Role::Knight),
            ("Ge2", Role::Bishop),
            ("We2", Role::Rook),
        ] {
            assert_eq!(s.parse(), Ok(Notation::new(role, "e2".parse().unwrap())));
        }
    }

    #[proptest]
    fn parsing_notation_fails_for_wrong_length(
        #[filter(![2, 3].contains(&#s.chars().count()))] s: String,
    ) {
        assert_eq!(s.parse::<Notation>(), Err(ParseNotationError::InvalidLength));
    }

    #[proptest]
    fn parsing_notation_fails_for_unknown_piece_letter(
        #[filter(!"KHSGW".contains(#c))] c: char,
        sq: Square,
    ) {
        assert_eq!(
            format!("{c}{sq}").parse::<Notation>(),
            Err(ParseNotationError::InvalidPiece)
        );
    }

    #[test]
    fn parsing_notation_fails_for_squares_off_the_board() {
        assert!(matches!(
            "i4".parse::<Notation>(),
            Err(ParseNotationError::InvalidSquare(ParseSquareError::InvalidFile(_)))
        ));

        assert!(matches!(
            "Ka9".parse::<Notation>(),
            Err(ParseNotationError::InvalidSquare(ParseSquareError::InvalidRank(_)))
        ));

        assert!(matches!(
            "Sa0".parse::<Notation>(),
            Err(ParseNotationError::InvalidSquare(ParseSquareError::InvalidRank(_)))
        ));
    }
}
