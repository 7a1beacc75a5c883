use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Number of ranks and files on the board.
pub const BOARD_SIZE: i32 = 8;

/// A board coordinate. Row 0 is rank 8 (black's back rank), row 7 is rank 1.
///
/// Rows and columns are signed so that candidate squares arriving from the
/// wire or produced by stepping off the board stay representable; anything
/// outside `0..8` fails [`Square::in_bounds`] and is never used as an index.
///
/// On the wire a square is a `[row, col]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Square {
    pub row: i32,
    pub col: i32,
}

impl Square {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }
}

impl From<(i32, i32)> for Square {
    fn from((row, col): (i32, i32)) -> Self {
        Square::new(row, col)
    }
}

impl From<Square> for (i32, i32) {
    fn from(sq: Square) -> Self {
        (sq.row, sq.col)
    }
}

/// A relative step between squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub row: i32,
    pub col: i32,
}

impl Step {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl Add<Step> for Square {
    type Output = Square;

    #[inline]
    fn add(self, step: Step) -> Square {
        Square::new(self.row + step.row, self.col + step.col)
    }
}
