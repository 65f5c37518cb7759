use crate::chess::{Board, Color, Square};

/// Whether any figure of color `by` attacks `target`.
#[inline]
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .by_color(by)
        .any(|(whence, f)| f.is_legal_attack(board, whence, target))
}

/// Whether the king of color `side`, standing on `king`, is attacked by the opponent.
///
/// A side without a king is never in check.
#[inline]
pub fn is_in_check(board: &Board, side: Color, king: Option<Square>) -> bool {
    king.map_or(false, |sq| is_attacked(board, sq, !side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Figure, Piece, Role};
    use shakmaty as sm;
    use test_strategy::proptest;

    fn put(board: &mut Board, s: &str, role: Role, color: Color) {
        board.put(s.parse().unwrap(), Figure::new(Piece::new(role, color)));
    }

    #[test]
    fn no_side_is_in_check_at_the_start() {
        let board = Board::default();
        for side in Color::iter() {
            assert!(!is_in_check(&board, side, board.king(side)));
        }
    }

    #[proptest]
    fn side_without_king_is_never_in_check(b: Board, c: Color) {
        assert!(!is_in_check(&b, c, None));
    }

    #[test]
    fn check_detection_is_symmetric() {
        let mut board = Board::empty();
        put(&mut board, "e1", Role::King, Color::White);
        put(&mut board, "e8", Role::King, Color::Black);

        for side in Color::iter() {
            assert!(!is_in_check(&board, side, board.king(side)));
        }

        put(&mut board, "a8", Role::Rook, Color::White);
        assert!(is_in_check(&board, Color::Black, board.king(Color::Black)));
        assert!(!is_in_check(&board, Color::White, board.king(Color::White)));

        put(&mut board, "d8", Role::Bishop, Color::Black);
        assert!(!is_in_check(&board, Color::Black, board.king(Color::Black)));
    }

    #[test]
    fn pawns_give_check_diagonally() {
        let mut board = Board::empty();
        put(&mut board, "e4", Role::King, Color::White);
        put(&mut board, "e5", Role::Pawn, Color::Black);
        assert!(!is_in_check(&board, Color::White, board.king(Color::White)));

        put(&mut board, "d5", Role::Pawn, Color::Black);
        assert!(is_in_check(&board, Color::White, board.king(Color::White)));
    }

    #[proptest]
    fn check_agrees_with_shakmaty(b: Board, c: Color) {
        let king = b.king(c).unwrap();
        let mut board = sm::Board::empty();
        for (sq, f) in b.iter() {
            board.set_piece_at(sq.into(), f.piece().into());
        }

        let attackers = board.attacks_to(king.into(), (!c).into(), board.occupied());
        assert_eq!(is_in_check(&b, c, Some(king)), attackers.any());
    }
}
