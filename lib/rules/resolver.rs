use crate::chess::{Board, Color, Figure, Notation, Piece, Promotion, Rank, Role, Square};
use crate::rules::{is_in_check, Kings, State};
use derive_more::{Display, Error};

/// A move that was applied to the board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[display(fmt = "{}{}", whence, whither)]
pub struct Move {
    whence: Square,
    whither: Square,
    piece: Piece,
    captured: Option<Piece>,
    promotion: bool,
}

impl Move {
    /// The square the piece left.
    #[inline]
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The square the piece landed on.
    #[inline]
    pub fn whither(&self) -> Square {
        self.whither
    }

    /// The piece that moved.
    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// The opposing piece removed from the board, if any.
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Whether the move left a pawn awaiting promotion.
    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promotion
    }
}

/// The reason why a move was not applied.
///
/// Whatever the reason, neither the board nor the turn changed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[error(ignore)]
pub enum Rejection {
    #[display(fmt = "there is no piece on {}", _0)]
    Vacant(Square),

    #[display(fmt = "coordinates are off the board")]
    OutOfBounds,

    #[display(fmt = "the piece on {} does not belong to the side to move", _0)]
    OutOfTurn(Square),

    #[display(fmt = "the piece on {} cannot move to {}", _0, _1)]
    Illegal(Square, Square),

    #[display(fmt = "moving from {} to {} would leave the king in check", _0, _1)]
    SelfCheck(Square, Square),

    #[display(fmt = "the pawn on {} is awaiting promotion", _0)]
    PromotionPending(Square),

    #[display(fmt = "no piece can play {}", _0)]
    NoCandidate(Notation),
}

/// The reason why a promotion choice was refused.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[error(ignore)]
pub enum PromotionError {
    #[display(fmt = "no pawn is awaiting promotion")]
    NotPending,

    #[display(fmt = "the pawn awaiting promotion is not the {} pawn on {}", _0, _1)]
    Mismatch(Color, Square),
}

/// What it takes to reverse a tentative move.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Undo {
    whence: Square,
    whither: Square,
    figure: Figure,
    captured: Option<Figure>,
    kings: Kings,
}

/// Tentatively moves the figure on `whence` to `whither`, removing whatever stands there.
///
/// Every rule other than the safety of the king is assumed to have been checked already.
pub fn apply(
    board: &mut Board,
    kings: &mut Kings,
    whence: Square,
    whither: Square,
) -> Option<Undo> {
    let figure = board[whence]?;
    let captured = board.take(whither);
    debug_assert!(captured.map_or(true, |c| c.color() != figure.color()));

    let undo = Undo {
        whence,
        whither,
        figure,
        captured,
        kings: *kings,
    };

    board.relocate(whence, whither);

    if figure.role() == Role::King {
        kings[figure.color()] = Some(whither);
    }

    if let Some(c) = captured.filter(|c| c.role() == Role::King) {
        kings[c.color()] = None;
    }

    Some(undo)
}

/// Takes back a tentative move, restoring any captured figure.
pub fn rollback(board: &mut Board, kings: &mut Kings, undo: Undo) {
    board.take(undo.whither);
    board.put(undo.whence, undo.figure);
    if let Some(c) = undo.captured {
        board.put(undo.whither, c);
    }

    *kings = undo.kings;
}

/// Whether moving the figure on `whence` to `whither` would leave its own king attacked.
pub fn exposes_king(board: &Board, kings: Kings, whence: Square, whither: Square) -> bool {
    let mut board = *board;
    let mut kings = kings;

    match apply(&mut board, &mut kings, whence, whither) {
        None => false,
        Some(undo) => {
            let side = undo.figure.color();
            is_in_check(&board, side, kings[side])
        }
    }
}

/// Moves the figure on `whence` to `whither` on behalf of the side to move.
///
/// The move is applied tentatively and rolled back if it leaves the mover's own
/// king attacked. Otherwise it's committed and the turn passes to the opponent.
pub fn resolve(
    board: &mut Board,
    state: &mut State,
    whence: Square,
    whither: Square,
) -> Result<Move, Rejection> {
    if let Some((_, sq)) = state.promotion() {
        return Err(Rejection::PromotionPending(sq));
    }

    let figure = board[whence].ok_or(Rejection::Vacant(whence))?;
    let side = state.turn();

    if figure.color() != side {
        return Err(Rejection::OutOfTurn(whence));
    }

    if !figure.is_legal_move_for_turn(board, side, whence, whither) {
        return Err(Rejection::Illegal(whence, whither));
    }

    let undo = apply(board, state.kings_mut(), whence, whither).ok_or(Rejection::Vacant(whence))?;

    if state.recheck(board, side) {
        rollback(board, state.kings_mut(), undo);
        state.recheck(board, side);
        return Err(Rejection::SelfCheck(whence, whither));
    }

    Ok(commit(board, state, undo))
}

fn commit(board: &mut Board, state: &mut State, undo: Undo) -> Move {
    let mut figure = undo.figure;
    figure.mark_moved();
    board.put(undo.whither, figure);

    state.flip();
    state.refresh(board);

    let side = figure.color();
    let promotion = figure.role() == Role::Pawn && undo.whither.rank() == Rank::back(!side);
    if promotion {
        state.set_promotion(Some((side, undo.whither)));
    }

    Move {
        whence: undo.whence,
        whither: undo.whither,
        piece: figure.piece(),
        captured: undo.captured.map(|c| c.piece()),
        promotion,
    }
}

/// Replaces the pawn awaiting promotion by a new figure of the chosen kind.
pub fn promote(
    board: &mut Board,
    state: &mut State,
    side: Color,
    square: Square,
    promotion: Promotion,
) -> Result<Piece, PromotionError> {
    match state.promotion() {
        None => Err(PromotionError::NotPending),
        Some(pending) if pending != (side, square) => Err(PromotionError::Mismatch(side, square)),
        Some(_) => {
            debug_assert_eq!(board[square].map(|f| f.piece()), Some(Piece::new(Role::Pawn, side)));
            let piece = Piece::new(promotion.into(), side);
            board.put(square, Figure::moved(piece));
            state.set_promotion(None);
            state.refresh(board);
            Ok(piece)
        }
    }
}
