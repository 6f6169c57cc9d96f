//! Board coordinates.

use serde::{Deserialize, Serialize};

/// A point on the board, zero-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Position {
    /// Row index (top to bottom).
    pub row: usize,
    /// Column index (left to right).
    pub col: usize,
}

impl Position {
    /// Steps one point along `(d_row, d_col)`, staying inside a `side x side` grid.
    pub fn step(self, (d_row, d_col): (isize, isize), side: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < side && col < side).then_some(Position { row, col })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
