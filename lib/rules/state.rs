use crate::chess::{Board, Color, Square};
use crate::rules::is_in_check;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Whether each side is in check, readable from any thread.
#[derive(Debug, Default)]
pub struct CheckFlags {
    flags: [AtomicBool; 2],
}

impl CheckFlags {
    /// Whether the given side was in check when last recomputed.
    #[inline]
    pub fn get(&self, side: Color) -> bool {
        self.flags[side.index()].load(Ordering::Acquire)
    }

    /// Records whether the given side is in check and returns the previous record.
    #[inline]
    pub(crate) fn set(&self, side: Color, check: bool) -> bool {
        self.flags[side.index()].swap(check, Ordering::AcqRel)
    }
}

/// Where each side's king stands.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Kings([Option<Square>; 2]);

impl Kings {
    /// Finds both kings on the board.
    pub fn locate(board: &Board) -> Self {
        Kings([board.king(Color::White), board.king(Color::Black)])
    }
}

impl Index<Color> for Kings {
    type Output = Option<Square>;

    #[inline]
    fn index(&self, side: Color) -> &Self::Output {
        &self.0[side.index()]
    }
}

impl IndexMut<Color> for Kings {
    #[inline]
    fn index_mut(&mut self, side: Color) -> &mut Self::Output {
        &mut self.0[side.index()]
    }
}

/// Everything about a game besides the arrangement of figures.
#[derive(Debug)]
pub struct State {
    turn: Color,
    kings: Kings,
    checks: Arc<CheckFlags>,
    promotion: Option<(Color, Square)>,
}

impl State {
    /// The state of a game played on `board` with `turn` to move.
    pub fn new(board: &Board, turn: Color) -> Self {
        let state = State {
            turn,
            kings: Kings::locate(board),
            checks: Arc::default(),
            promotion: None,
        };

        state.refresh(board);
        state
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Hands the turn over to the opponent.
    #[inline]
    pub fn flip(&mut self) {
        self.turn = !self.turn;
    }

    /// The cached king positions.
    #[inline]
    pub fn kings(&self) -> &Kings {
        &self.kings
    }

    /// Mutable access to the cached king positions.
    #[inline]
    pub fn kings_mut(&mut self) -> &mut Kings {
        &mut self.kings
    }

    /// A shared handle to the check flags.
    #[inline]
    pub fn checks(&self) -> Arc<CheckFlags> {
        self.checks.clone()
    }

    /// The pawn awaiting promotion, if any.
    #[inline]
    pub fn promotion(&self) -> Option<(Color, Square)> {
        self.promotion
    }

    /// Records the pawn awaiting promotion, or clears it.
    #[inline]
    pub fn set_promotion(&mut self, promotion: Option<(Color, Square)>) {
        self.promotion = promotion;
    }

    /// Recomputes whether `side` is in check on `board` and returns the result.
    pub fn recheck(&self, board: &Board, side: Color) -> bool {
        debug_assert_eq!(self.kings, Kings::locate(board), "stale king cache");
        let check = is_in_check(board, side, self.kings[side]);
        self.checks.set(side, check);
        check
    }

    /// Recomputes both check flags.
    pub fn refresh(&self, board: &Board) {
        for side in Color::iter() {
            self.recheck(board, side);
        }
    }
}

/// Clones get their own check flags.
impl Clone for State {
    fn clone(&self) -> Self {
        let checks = CheckFlags::default();
        for side in Color::iter() {
            checks.set(side, self.checks.get(side));
        }

        State {
            turn: self.turn,
            kings: self.kings,
            checks: Arc::new(checks),
            promotion: self.promotion,
        }
    }
}
