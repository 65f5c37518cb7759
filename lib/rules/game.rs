use crate::chess::{Board, Color, Notation, Piece, Promotion, Square};
use crate::rules::{exposes_king, promote, resolve};
use crate::rules::{CheckFlags, Move, PromotionError, Rejection, State};
use arrayvec::ArrayVec;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A game of chess in progress.
///
/// The game is the only writer of its [`Board`]; every mutation goes through
/// [`Game::request_move`] or [`Game::promote`].
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    state: State,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Board::default(), Color::White)
    }
}

impl Game {
    /// Starts a game from an arbitrary arrangement of figures with `turn` to move.
    pub fn new(board: Board, turn: Color) -> Self {
        let state = State::new(&board, turn);
        Game { board, state }
    }

    /// The current arrangement of figures.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Every piece on the board and the square it occupies.
    pub fn snapshot(&self) -> Vec<(Square, Piece)> {
        self.board.iter().map(|(sq, f)| (sq, f.piece())).collect()
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.state.turn()
    }

    /// Whether `side` was in check when last recomputed.
    #[inline]
    pub fn is_check(&self, side: Color) -> bool {
        self.state.checks().get(side)
    }

    /// A handle to the check flags that may be shared with other threads.
    #[inline]
    pub fn check_flags(&self) -> Arc<CheckFlags> {
        self.state.checks()
    }

    /// The color and square of the pawn awaiting promotion, if any.
    #[inline]
    pub fn pending_promotion(&self) -> Option<(Color, Square)> {
        self.state.promotion()
    }

    /// Recomputes both check flags.
    #[instrument(level = "trace", skip(self))]
    pub fn refresh(&self) {
        self.state.refresh(&self.board);
    }

    /// Every square the figure on `whence` could move to right now.
    pub fn legal_targets(&self, whence: Square) -> ArrayVec<Square, 27> {
        if self.state.promotion().is_some() {
            return ArrayVec::new();
        }

        match self.board[whence] {
            None => ArrayVec::new(),
            Some(figure) => Square::iter()
                .filter(|&whither| {
                    figure.is_legal_move_for_turn(&self.board, self.turn(), whence, whither)
                })
                .filter(|&whither| {
                    !exposes_king(&self.board, *self.state.kings(), whence, whither)
                })
                .collect(),
        }
    }

    /// Moves the figure on `whence` to `whither` if that's legal for the side to move.
    #[instrument(level = "debug", skip(self), err)]
    pub fn request_move(&mut self, whence: Square, whither: Square) -> Result<Move, Rejection> {
        let m = resolve(&mut self.board, &mut self.state, whence, whither)?;

        debug!(%m, turn = %self.turn(), check = self.is_check(self.turn()));

        Ok(m)
    }

    /// Like [`Game::request_move`], but accepts raw `(file, rank)` coordinates.
    pub fn request_coords(
        &mut self,
        (f0, r0): (i8, i8),
        (f1, r1): (i8, i8),
    ) -> Result<Move, Rejection> {
        let whence = Square::from_coords(f0, r0).ok_or(Rejection::OutOfBounds)?;
        let whither = Square::from_coords(f1, r1).ok_or(Rejection::OutOfBounds)?;
        self.request_move(whence, whither)
    }

    /// Plays the move described by `notation` with the first figure able to make it.
    ///
    /// Figures of the notation's role that belong to the side to move are tried in
    /// board order, from `a1` towards `h8`.
    #[instrument(level = "debug", skip(self, notation), fields(notation = %notation), err)]
    pub fn request_notation(&mut self, notation: &Notation) -> Result<Move, Rejection> {
        if let Some((_, sq)) = self.state.promotion() {
            return Err(Rejection::PromotionPending(sq));
        }

        let candidates: ArrayVec<Square, 64> = self
            .board
            .by_color(self.turn())
            .filter(|(_, f)| f.role() == notation.role())
            .map(|(sq, _)| sq)
            .collect();

        for whence in candidates {
            match resolve(&mut self.board, &mut self.state, whence, notation.whither()) {
                Ok(m) => {
                    debug!(%m, turn = %self.turn(), check = self.is_check(self.turn()));
                    return Ok(m);
                }

                Err(e) => debug!(%whence, "{e}"),
            }
        }

        Err(Rejection::NoCandidate(*notation))
    }

    /// Replaces the pawn awaiting promotion by a figure of the chosen kind.
    #[instrument(level = "debug", skip(self), err)]
    pub fn promote(
        &mut self,
        side: Color,
        square: Square,
        promotion: Promotion,
    ) -> Result<Piece, PromotionError> {
        promote(&mut self.board, &mut self.state, side, square, promotion)
    }
}
