//! Game logic and rules for gomoku.

use super::position::Position;
use super::types::{Board, BoardSize, Color, Square};
use tracing::{debug, instrument};

/// Stones in an unbroken line needed to win. Longer lines also win.
pub const WIN_LENGTH: usize = 5;

/// Line directions checked around a placed stone: horizontal, vertical,
/// diagonal and anti-diagonal. The opposite direction of each is implied.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Counts same-colored stones walking from `pos` along `dir`, excluding `pos`.
///
/// Stops at the board edge or the first square not holding `color`.
pub fn run_length(board: &Board, pos: Position, color: Color, dir: (isize, isize)) -> usize {
    let mut count = 0;
    let mut cursor = pos;
    while let Some(next) = cursor.step(dir, board.side()) {
        if board.get(next) != Some(Square::Occupied(color)) {
            break;
        }
        count += 1;
        cursor = next;
    }
    count
}

/// Longest line through `pos` for `color` along any axis, counting `pos` itself.
pub fn longest_line(board: &Board, pos: Position, color: Color) -> usize {
    AXES.iter()
        .map(|&(dr, dc)| {
            1 + run_length(board, pos, color, (dr, dc)) + run_length(board, pos, color, (-dr, -dc))
        })
        .max()
        .unwrap_or(1)
}

/// Checks whether the stone just placed at `pos` completes a winning line.
///
/// Only lines through `pos` are inspected, so the cost is bounded by
/// four times the board side regardless of how full the board is.
#[instrument(skip(board))]
pub fn is_winning_move(board: &Board, pos: Position, color: Color) -> bool {
    longest_line(board, pos, color) >= WIN_LENGTH
}

/// Why a stone could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlaceError {
    /// Coordinates fall outside the board.
    #[display("({row}, {col}) is outside the {size} board")]
    OutOfBounds {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
        /// Size of the board.
        size: BoardSize,
    },
    /// A stone already sits on the target point.
    #[display("{_0} is already occupied")]
    Occupied(Position),
    /// The game already has a winner.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for PlaceError {}

/// Result of an accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// No winner yet; `next` is to move.
    Continue {
        /// Color to move next.
        next: Color,
    },
    /// The placed stone completed a line.
    Won(Color),
}

/// Gomoku game engine: board, turn order and winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    to_move: Color,
    winner: Option<Color>,
}

impl Game {
    /// Creates a new game with black to move.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        Self {
            board: Board::new(size),
            to_move: Color::Black,
            winner: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the color to move. After a win this stays on the winner.
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Returns the winner, if the game is over.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Checks if the game has been won.
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Places a stone for the color to move at `(row, col)`.
    ///
    /// Every check runs before the board is touched, so an error leaves
    /// the game exactly as it was.
    #[instrument(skip(self), fields(to_move = %self.to_move))]
    pub fn place(&mut self, row: i64, col: i64) -> Result<Placement, PlaceError> {
        if self.is_over() {
            return Err(PlaceError::GameOver);
        }

        let pos = self
            .board
            .locate(row, col)
            .ok_or(PlaceError::OutOfBounds {
                row,
                col,
                size: self.board.size(),
            })?;

        if !self.board.is_empty(pos) {
            return Err(PlaceError::Occupied(pos));
        }

        let color = self.to_move;
        self.board.place(pos, color);

        if is_winning_move(&self.board, pos, color) {
            debug!(%pos, %color, "Winning line completed");
            self.winner = Some(color);
            return Ok(Placement::Won(color));
        }

        self.to_move = color.opponent();
        Ok(Placement::Continue {
            next: self.to_move,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: BoardSize, stones: &[(usize, usize, Color)]) -> Board {
        let mut board = Board::new(size);
        for &(row, col, color) in stones {
            board.place(Position::new(row, col), color);
        }
        board
    }

    #[test]
    fn test_run_length_stops_at_edge() {
        let board = board_with(
            BoardSize::Nine,
            &[(0, 0, Color::Black), (0, 1, Color::Black)],
        );
        assert_eq!(run_length(&board, Position::new(0, 1), Color::Black, (0, -1)), 1);
        assert_eq!(run_length(&board, Position::new(0, 0), Color::Black, (-1, 0)), 0);
    }

    #[test]
    fn test_run_length_stops_at_opponent() {
        let board = board_with(
            BoardSize::Nine,
            &[
                (4, 4, Color::Black),
                (4, 5, Color::Black),
                (4, 6, Color::White),
                (4, 7, Color::Black),
            ],
        );
        assert_eq!(run_length(&board, Position::new(4, 4), Color::Black, (0, 1)), 1);
    }

    #[test]
    fn test_longest_line_counts_both_directions() {
        let board = board_with(
            BoardSize::Fifteen,
            &[
                (3, 3, Color::White),
                (4, 4, Color::White),
                (5, 5, Color::White),
                (6, 6, Color::White),
            ],
        );
        assert_eq!(longest_line(&board, Position::new(4, 4), Color::White), 4);
        assert!(!is_winning_move(&board, Position::new(4, 4), Color::White));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let board = board_with(
            BoardSize::Nine,
            &[
                (0, 8, Color::Black),
                (1, 7, Color::Black),
                (2, 6, Color::Black),
                (3, 5, Color::Black),
                (4, 4, Color::Black),
            ],
        );
        assert!(is_winning_move(&board, Position::new(2, 6), Color::Black));
    }

    #[test]
    fn test_place_rejects_without_mutating() {
        let mut game = Game::new(BoardSize::Nine);
        game.place(4, 4).expect("first move");
        let before = game.clone();

        assert_eq!(
            game.place(4, 4),
            Err(PlaceError::Occupied(Position::new(4, 4)))
        );
        assert!(matches!(
            game.place(9, 0),
            Err(PlaceError::OutOfBounds { row: 9, col: 0, .. })
        ));
        assert!(matches!(
            game.place(-1, 3),
            Err(PlaceError::OutOfBounds { .. })
        ));
        assert_eq!(game, before);
    }
}
