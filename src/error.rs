//! Game session error types.

use crate::games::gomoku::PlaceError;
use crate::session::SessionStatus;
use derive_more::{Display, Error};
use tracing::instrument;

/// Session operation being attempted, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Operation {
    /// Joining as the second player.
    #[display("join")]
    Join,
    /// Placing a stone.
    #[display("move in")]
    Move,
}

/// What went wrong with a session operation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// No session exists under the code.
    #[display("Game {code} not found")]
    NotFound {
        /// Code that was looked up.
        code: String,
    },
    /// Operation is not legal in the session's current lifecycle state.
    #[display("Cannot {operation} a game that is {status}")]
    InvalidState {
        /// Operation attempted.
        operation: Operation,
        /// Status the session was in.
        status: SessionStatus,
    },
    /// Coordinates are off the board or the point is taken.
    #[display("Invalid move: {_0}")]
    InvalidMove(PlaceError),
    /// Caller does not hold the color whose turn it is.
    #[display("Not your turn")]
    Forbidden,
}

/// Game session error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error kind.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }

    /// Human-readable message without the source location.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl From<GameErrorKind> for GameError {
    #[track_caller]
    fn from(kind: GameErrorKind) -> Self {
        Self::new(kind)
    }
}
