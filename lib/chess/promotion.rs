use crate::chess::Role;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of piece a pawn may be promoted to.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Promotion {
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[display(fmt = "q")]
    Queen,
}

impl From<Promotion> for Role {
    #[inline]
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::Knight => Role::Knight,
            Promotion::Bishop => Role::Bishop,
            Promotion::Rook => Role::Rook,
            Promotion::Queen => Role::Queen,
        }
    }
}

/// The reason why a [`Role`] is not a valid [`Promotion`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "pawns cannot be promoted to `{}`", _0)]
pub struct InvalidPromotion(#[error(not(source))] pub Role);

impl TryFrom<Role> for Promotion {
    type Error = InvalidPromotion;

    #[inline]
    fn try_from(r: Role) -> Result<Self, Self::Error> {
        match r {
            Role::Knight => Ok(Promotion::Knight),
            Role::Bishop => Ok(Promotion::Bishop),
            Role::Rook => Ok(Promotion::Rook),
            Role::Queen => Ok(Promotion::Queen),
            r => Err(InvalidPromotion(r)),
        }
    }
}

/// The reason why parsing [`Promotion`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse promotion, expected one of `q`, `r`, `b`, `n`")]
pub struct ParsePromotionError;

impl FromStr for Promotion {
    type Err = ParsePromotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Promotion::Knight),
            "b" => Ok(Promotion::Bishop),
            "r" => Ok(Promotion::Rook),
            "q" => Ok(Promotion::Queen),
            _ => Err(ParsePromotionError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn promotion_converts_to_role_and_back(p: Promotion) {
        assert_eq!(Promotion::try_from(Role::from(p)), Ok(p));
    }

    #[test]
    fn pawns_and_kings_are_not_promotions() {
        assert_eq!(Promotion::try_from(Role::Pawn), Err(InvalidPromotion(Role::Pawn)));
        assert_eq!(Promotion::try_from(Role::King), Err(InvalidPromotion(Role::King)));
    }

    #[proptest]
    fn promotion_prints_like_its_role(p: Promotion) {
        assert_eq!(p.to_string(), Role::from(p).to_string());
    }

    #[proptest]
    fn parsing_printed_promotion_is_an_identity(p: Promotion) {
        assert_eq!(p.to_string().parse(), Ok(p));
    }

    #[proptest]
    fn parsing_promotion_fails_for_other_strings(
        #[filter(!["q", "r", "b", "n"].contains(&#s.as_str()))] s: String,
    ) {
        assert_eq!(s.parse::<Promotion>(), Err(ParsePromotionError));
    }
}
