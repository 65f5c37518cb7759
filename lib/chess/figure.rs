use crate::chess::{Color, Piece, Role};
use derive_more::Display;

/// A [`Piece`] as it lives on the board.
///
/// Besides its identity, a figure remembers whether it has ever moved, which
/// is what allows a pawn to advance two squares from its starting rank.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}", piece)]
pub struct Figure {
    piece: Piece,
    moved: bool,
}

impl Figure {
    /// A figure that has not moved yet.
    #[inline]
    pub fn new(piece: Piece) -> Self {
        Figure {
            piece,
            moved: false,
        }
    }

    /// A figure that has already moved at least once.
    #[inline]
    pub fn moved(piece: Piece) -> Self {
        Figure { piece, moved: true }
    }

    /// This figure's [`Piece`].
    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// This figure's [`Role`].
    #[inline]
    pub fn role(&self) -> Role {
        self.piece.role()
    }

    /// This figure's [`Color`].
    #[inline]
    pub fn color(&self) -> Color {
        self.piece.color()
    }

    /// Whether this figure has moved since the game started.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Records that this figure has moved.
    #[inline]
    pub fn mark_moved(&mut self) {
        self.moved = true;
    }
}

impl From<Piece> for Figure {
    #[inline]
    fn from(p: Piece) -> Self {
        Figure::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn new_figure_has_not_moved(p: Piece) {
        assert!(!Figure::new(p).has_moved());
    }

    #[proptest]
    fn marking_figure_as_moved_is_permanent(mut f: Figure) {
        f.mark_moved();
        assert!(f.has_moved());
        f.mark_moved();
        assert_eq!(f, Figure::moved(f.piece()));
    }

    #[proptest]
    fn figure_prints_like_its_piece(f: Figure) {
        assert_eq!(f.to_string(), f.piece().to_string());
    }

    #[proptest]
    fn figure_shares_role_and_color_with_its_piece(f: Figure) {
        assert_eq!(Piece::new(f.role(), f.color()), f.piece());
    }
}
