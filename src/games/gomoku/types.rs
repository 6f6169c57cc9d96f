//! Core domain types for gomoku.

use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Stone color, doubling as the identity of each seat at the table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    /// Black (always moves first).
    Black,
    /// White.
    White,
}

impl Color {
    /// Returns the other color.
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Normalizes a requested color, falling back to black.
    ///
    /// Matching is exact: only `"black"` and `"white"` are accepted.
    #[instrument]
    pub fn from_requested(requested: Option<&str>) -> Self {
        match requested {
            Some("white") => Color::White,
            _ => Color::Black,
        }
    }
}

/// Supported board sizes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(try_from = "usize", into = "usize")]
pub enum BoardSize {
    /// 9x9.
    Nine,
    /// 13x13.
    Thirteen,
    /// 15x15, the default.
    #[default]
    Fifteen,
    /// 19x19.
    Nineteen,
}

impl BoardSize {
    /// Side length of the square board.
    pub fn side(self) -> usize {
        match self {
            BoardSize::Nine => 9,
            BoardSize::Thirteen => 13,
            BoardSize::Fifteen => 15,
            BoardSize::Nineteen => 19,
        }
    }

    /// Normalizes a requested size, falling back to 15 for anything unsupported.
    #[instrument]
    pub fn from_requested(requested: Option<u64>) -> Self {
        requested
            .and_then(|side| usize::try_from(side).ok())
            .and_then(|side| Self::try_from(side).ok())
            .unwrap_or_default()
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = UnsupportedSize;

    fn try_from(side: usize) -> Result<Self, Self::Error> {
        match side {
            9 => Ok(BoardSize::Nine),
            13 => Ok(BoardSize::Thirteen),
            15 => Ok(BoardSize::Fifteen),
            19 => Ok(BoardSize::Nineteen),
            other => Err(UnsupportedSize(other)),
        }
    }
}

impl From<BoardSize> for usize {
    fn from(size: BoardSize) -> Self {
        size.side()
    }
}

impl std::fmt::Display for BoardSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{0}x{0}", self.side())
    }
}

/// A board side length outside the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Unsupported board size {_0} (expected 9, 13, 15 or 19)")]
pub struct UnsupportedSize(#[error(not(source))] pub usize);

/// A cell on the board.
///
/// Serializes as `null` when empty and as the stone color otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<Color>", into = "Option<Color>")]
pub enum Square {
    /// No stone.
    #[default]
    Empty,
    /// A stone of the given color.
    Occupied(Color),
}

impl Square {
    /// Returns the stone color, if any.
    pub fn stone(self) -> Option<Color> {
        match self {
            Square::Empty => None,
            Square::Occupied(color) => Some(color),
        }
    }
}

impl From<Option<Color>> for Square {
    fn from(stone: Option<Color>) -> Self {
        stone.map_or(Square::Empty, Square::Occupied)
    }
}

impl From<Square> for Option<Color> {
    fn from(square: Square) -> Self {
        square.stone()
    }
}

/// Square grid of cells, sized at creation and never resized.
///
/// Serializes as an array of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Square>>", into = "Vec<Vec<Square>>")]
pub struct Board {
    size: BoardSize,
    /// Squares in row-major order.
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(size: BoardSize) -> Self {
        let side = size.side();
        Self {
            size,
            squares: vec![Square::Empty; side * side],
        }
    }

    /// Returns the board size.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the side length.
    pub fn side(&self) -> usize {
        self.size.side()
    }

    /// Resolves signed coordinates to a position on this board.
    ///
    /// Returns `None` when either coordinate falls outside the grid.
    pub fn locate(&self, row: i64, col: i64) -> Option<Position> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.side() && col < self.side()).then(|| Position::new(row, col))
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Option<Square> {
        self.index(pos).map(|idx| self.squares[idx])
    }

    /// Checks if the position holds no stone.
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Places a stone. Callers must have checked the square is empty.
    pub(super) fn place(&mut self, pos: Position, color: Color) {
        if let Some(idx) = self.index(pos) {
            debug_assert_eq!(self.squares[idx], Square::Empty);
            self.squares[idx] = Square::Occupied(color);
        }
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Square]> {
        self.squares.chunks(self.side())
    }

    /// Number of stones on the board.
    pub fn stone_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Black stones are `X`, white stones `O`, empty points `.`.
    pub fn display(&self) -> String {
        let mut result = String::from("   ");
        for col in 0..self.side() {
            result.push_str(&format!("{:>3}", col));
        }
        result.push('\n');
        for (row, squares) in self.rows().enumerate() {
            result.push_str(&format!("{:>3}", row));
            for square in squares {
                let symbol = match square {
                    Square::Empty => '.',
                    Square::Occupied(Color::Black) => 'X',
                    Square::Occupied(Color::White) => 'O',
                };
                result.push_str("  ");
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let side = self.side();
        (pos.row < side && pos.col < side).then(|| pos.row * side + pos.col)
    }
}

impl TryFrom<Vec<Vec<Square>>> for Board {
    type Error = MalformedBoard;

    fn try_from(rows: Vec<Vec<Square>>) -> Result<Self, Self::Error> {
        let size = BoardSize::try_from(rows.len()).map_err(MalformedBoard::Size)?;
        if let Some(row) = rows.iter().position(|r| r.len() != size.side()) {
            return Err(MalformedBoard::Ragged { row });
        }
        Ok(Self {
            size,
            squares: rows.into_iter().flatten().collect(),
        })
    }
}

impl From<Board> for Vec<Vec<Square>> {
    fn from(board: Board) -> Self {
        board.rows().map(<[Square]>::to_vec).collect()
    }
}

/// A serialized board that does not describe a supported square grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MalformedBoard {
    /// Row count is not a supported size.
    #[display("{_0}")]
    Size(UnsupportedSize),
    /// A row has the wrong length.
    #[display("Row {row} does not match the board width")]
    Ragged {
        /// Index of the offending row.
        row: usize,
    },
}
