use crate::chess::{Board, Color, Figure, Role, Square};
use crate::rules::{alignment, is_clear, Alignment};

/// What a figure would do to the occupant of the square it moves to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Capture {
    /// The square is held by a figure of the same color.
    Blocked,
    /// The square is held by an opposing figure, which would be removed.
    Taken(Figure),
    /// The square is empty.
    Quiet,
}

impl Capture {
    /// Whether the move may land on the square at all.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Capture::Blocked)
    }
}

/// The rank increment that moves a pawn of the given color forward.
#[inline]
pub fn forward(side: Color) -> i8 {
    match side {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Legality predicates.
///
/// The figure is assumed to stand on `whence`. None of these consult or mutate
/// anything besides the [`Board`] they are given.
impl Figure {
    /// How the occupant of `whither` would be affected if this figure moved there.
    #[inline]
    pub fn capture(&self, board: &Board, whither: Square) -> Capture {
        match board[whither] {
            None => Capture::Quiet,
            Some(f) if f.color() == self.color() => Capture::Blocked,
            Some(f) => Capture::Taken(f),
        }
    }

    /// Whether this figure may move from `whence` to `whither` while `turn` is to play.
    #[inline]
    pub fn is_legal_move_for_turn(
        &self,
        board: &Board,
        turn: Color,
        whence: Square,
        whither: Square,
    ) -> bool {
        self.color() == turn && self.is_legal_move(board, whence, whither)
    }

    /// Whether this figure may move from `whence` to `whither` regardless of whose turn it is.
    ///
    /// Accounts for the movement pattern, obstruction and the occupant of `whither`,
    /// but not for whether the move would leave the king attacked.
    pub fn is_legal_move(&self, board: &Board, whence: Square, whither: Square) -> bool {
        if self.role() != Role::Pawn {
            return self.is_legal_attack(board, whence, whither)
                && !self.capture(board, whither).is_blocked();
        }

        let ahead = forward(self.color());
        match whence.delta(whither) {
            (0, dr) if dr == ahead => !board.is_occupied(whither),
            (0, dr) if dr == 2 * ahead => {
                !self.has_moved() && !board.is_occupied(whither) && is_clear(board, whence, whither)
            }

            (-1 | 1, dr) if dr == ahead => {
                matches!(self.capture(board, whither), Capture::Taken(_))
            }

            _ => false,
        }
    }

    /// Whether this figure attacks `whither` from `whence`.
    ///
    /// Only the movement pattern and obstruction matter, whatever stands on `whither`
    /// and whoever's turn it is.
    pub fn is_legal_attack(&self, board: &Board, whence: Square, whither: Square) -> bool {
        let (df, dr) = whence.delta(whither);

        match self.role() {
            Role::Pawn => df.abs() == 1 && dr == forward(self.color()),
            Role::Knight => matches!((df.abs(), dr.abs()), (1, 2) | (2, 1)),
            Role::King => df.abs().max(dr.abs()) == 1,
            Role::Bishop => {
                alignment(whence, whither) == Some(Alignment::Diagonal)
                    && is_clear(board, whence, whither)
            }

            Role::Rook => {
                alignment(whence, whither) == Some(Alignment::Straight)
                    && is_clear(board, whence, whither)
            }

            Role::Queen => is_clear(board, whence, whither),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Piece;
    use proptest::sample::Selector;
    use shakmaty as sm;
    use test_strategy::proptest;

    fn figure(role: Role, color: Color) -> Figure {
        Figure::new(Piece::new(role, color))
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[proptest]
    fn attacks_agree_with_shakmaty(b: Board, x: Selector, whither: Square) {
        let (whence, f) = x.select(b.iter());
        let occupied: sm::Bitboard = b.iter().map(|(sq, _)| sm::Square::from(sq)).collect();
        let attacks = sm::attacks::attacks(whence.into(), f.piece().into(), occupied);

        assert_eq!(
            f.is_legal_attack(&b, whence, whither),
            attacks.contains(whither.into())
        );
    }

    #[proptest]
    fn figure_never_attacks_its_own_square(b: Board, f: Figure, sq: Square) {
        assert!(!f.is_legal_attack(&b, sq, sq));
        assert!(!f.is_legal_move(&b, sq, sq));
    }

    #[proptest]
    fn figure_cannot_land_on_own_color(b: Board, x: Selector, y: Selector) {
        let (whence, f) = x.select(b.iter());
        let (whither, _) = y.select(b.by_color(f.color()));
        assert!(!f.is_legal_move(&b, whence, whither));
    }

    #[proptest]
    fn moves_are_only_legal_on_the_figure_color_turn(
        b: Board,
        x: Selector,
        whither: Square,
        turn: Color,
    ) {
        let (whence, f) = x.select(b.iter());
        assert_eq!(
            f.is_legal_move_for_turn(&b, turn, whence, whither),
            f.color() == turn && f.is_legal_move(&b, whence, whither)
        );
    }

    #[proptest]
    fn non_pawn_moves_are_attacks_on_squares_not_held_by_own_color(
        b: Board,
        #[filter(#x.select(#b.iter()).1.role() != Role::Pawn)] x: Selector,
        whither: Square,
    ) {
        let (whence, f) = x.select(b.iter());
        assert_eq!(
            f.is_legal_move(&b, whence, whither),
            f.is_legal_attack(&b, whence, whither) && !f.capture(&b, whither).is_blocked()
        );
    }

    #[proptest]
    fn capture_is_three_valued(b: Board, f: Figure, whither: Square) {
        match (f.capture(&b, whither), b[whither]) {
            (Capture::Quiet, None) => {}
            (Capture::Blocked, Some(g)) => assert_eq!(g.color(), f.color()),
            (Capture::Taken(t), Some(g)) => {
                assert_eq!(t, g);
                assert_ne!(g.color(), f.color());
            }
            (c, o) => panic!("unexpected {c:?} for occupant {o:?}"),
        }
    }

    #[test]
    fn rook_is_obstructed_by_intermediate_figures() {
        let mut board = Board::empty();
        let rook = figure(Role::Rook, Color::White);
        board.put(sq("a1"), rook);
        board.put(sq("a4"), figure(Role::Pawn, Color::White));

        assert!(!rook.is_legal_move(&board, sq("a1"), sq("a6")));
        assert!(rook.is_legal_move(&board, sq("a1"), sq("a3")));
        assert!(!rook.is_legal_move(&board, sq("a1"), sq("a4")));
        assert!(rook.is_legal_move(&board, sq("a1"), sq("h1")));
        assert!(!rook.is_legal_move(&board, sq("a1"), sq("b2")));
    }

    #[test]
    fn bishop_captures_opponents_but_not_own_color() {
        let mut board = Board::empty();
        let bishop = figure(Role::Bishop, Color::White);
        board.put(sq("c1"), bishop);
        board.put(sq("f4"), figure(Role::Knight, Color::Black));
        board.put(sq("a3"), figure(Role::Knight, Color::White));

        assert!(bishop.is_legal_move(&board, sq("c1"), sq("f4")));
        assert!(!bishop.is_legal_move(&board, sq("c1"), sq("g5")));
        assert!(!bishop.is_legal_move(&board, sq("c1"), sq("a3")));
        assert!(bishop.is_legal_move(&board, sq("c1"), sq("b2")));
        assert!(!bishop.is_legal_move(&board, sq("c1"), sq("c2")));
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let board = Board::empty();
        let queen = figure(Role::Queen, Color::Black);

        assert!(queen.is_legal_move(&board, sq("d4"), sq("d8")));
        assert!(queen.is_legal_move(&board, sq("d4"), sq("a4")));
        assert!(queen.is_legal_move(&board, sq("d4"), sq("g7")));
        assert!(queen.is_legal_move(&board, sq("d4"), sq("a1")));
        assert!(!queen.is_legal_move(&board, sq("d4"), sq("e6")));
    }

    #[test]
    fn knight_jumps_over_figures() {
        let board = Board::default();
        let knight = figure(Role::Knight, Color::White);

        assert!(knight.is_legal_move(&board, sq("g1"), sq("f3")));
        assert!(knight.is_legal_move(&board, sq("g1"), sq("h3")));
        assert!(!knight.is_legal_move(&board, sq("g1"), sq("e2")));
        assert!(!knight.is_legal_move(&board, sq("g1"), sq("g3")));
    }

    #[test]
    fn king_steps_a_single_square() {
        let board = Board::empty();
        let king = figure(Role::King, Color::White);

        assert!(king.is_legal_move(&board, sq("e4"), sq("e5")));
        assert!(king.is_legal_move(&board, sq("e4"), sq("d3")));
        assert!(!king.is_legal_move(&board, sq("e4"), sq("e6")));
        assert!(!king.is_legal_move(&board, sq("e4"), sq("g5")));
    }

    #[test]
    fn pawn_advances_forward_onto_empty_squares() {
        let mut board = Board::empty();
        let white = figure(Role::Pawn, Color::White);
        let black = figure(Role::Pawn, Color::Black);

        assert!(white.is_legal_move(&board, sq("e2"), sq("e3")));
        assert!(!white.is_legal_move(&board, sq("e2"), sq("e1")));
        assert!(black.is_legal_move(&board, sq("e7"), sq("e6")));
        assert!(!black.is_legal_move(&board, sq("e7"), sq("e8")));

        board.put(sq("e3"), black);
        assert!(!white.is_legal_move(&board, sq("e2"), sq("e3")));
    }

    #[test]
    fn pawn_double_step_requires_an_unmoved_pawn_and_a_clear_path() {
        let mut board = Board::empty();
        let pawn = figure(Role::Pawn, Color::White);
        let moved = Figure::moved(pawn.piece());

        assert!(pawn.is_legal_move(&board, sq("e2"), sq("e4")));
        assert!(!moved.is_legal_move(&board, sq("e2"), sq("e4")));
        assert!(!pawn.is_legal_move(&board, sq("e2"), sq("e5")));

        board.put(sq("e3"), figure(Role::Knight, Color::Black));
        assert!(!pawn.is_legal_move(&board, sq("e2"), sq("e4")));

        board.take(sq("e3"));
        board.put(sq("e4"), figure(Role::Knight, Color::Black));
        assert!(!pawn.is_legal_move(&board, sq("e2"), sq("e4")));
    }

    #[test]
    fn pawn_captures_diagonally_forward_only() {
        let mut board = Board::empty();
        let pawn = figure(Role::Pawn, Color::Black);
        board.put(sq("d4"), figure(Role::Rook, Color::White));
        board.put(sq("f4"), figure(Role::Rook, Color::Black));
        board.put(sq("d6"), figure(Role::Rook, Color::White));

        assert!(pawn.is_legal_move(&board, sq("e5"), sq("d4")));
        assert!(!pawn.is_legal_move(&board, sq("e5"), sq("f4")));
        assert!(!pawn.is_legal_move(&board, sq("e5"), sq("d6")));
        assert!(pawn.is_legal_attack(&board, sq("e5"), sq("f4")));
        assert!(!pawn.is_legal_attack(&board, sq("e5"), sq("e4")));
    }
}
