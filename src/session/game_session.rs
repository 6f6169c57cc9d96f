//! Per-session state machine: lifecycle, seating and turn enforcement.

use super::{PlayerId, SessionCode};
use crate::error::{GameError, GameErrorKind, Operation};
use crate::games::gomoku::{Board, BoardSize, Color, Game, PlaceError, Placement};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Lifecycle of a session. Only ever moves forward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    /// Host is seated, waiting for a guest.
    Waiting,
    /// Both seats filled, moves accepted.
    Playing,
    /// Someone won. Read-only from here on.
    Finished,
}

/// A player's seat: who they are and which color they play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct Seat {
    /// Identifier the player must present with moves.
    pub player_id: PlayerId,
    /// Color assigned to the player.
    pub color: Color,
}

/// Externally visible state of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board as rows of cells.
    pub board: Board,
    /// Color to move. Once finished, this is left on the winner.
    pub turn: Color,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Winning color, set only when finished.
    pub winner: Option<Color>,
}

/// A game session with up to two seated players.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    /// Session code.
    code: SessionCode,
    /// The game being played.
    game: Game,
    /// Color chosen by the host at creation.
    host_color: Color,
    /// Seated players by color.
    players: HashMap<Color, PlayerId>,
    /// Lifecycle status.
    status: SessionStatus,
    /// Last creation, join or accepted move.
    last_activity: Instant,
}

impl GameSession {
    /// Creates a waiting session with the host seated on `host_color`.
    #[instrument(skip(host_id), fields(host_id = %host_id.as_ref()))]
    pub fn new(
        code: SessionCode,
        size: BoardSize,
        host_color: Color,
        host_id: impl AsRef<str>,
    ) -> Self {
        info!(session_id = %code, %size, %host_color, "Creating new game session");
        Self {
            code,
            game: Game::new(size),
            host_color,
            players: HashMap::from([(host_color, host_id.as_ref().to_string())]),
            status: SessionStatus::Waiting,
            last_activity: Instant::now(),
        }
    }

    /// Gets the player seated on `color`.
    pub fn player(&self, color: Color) -> Option<&str> {
        self.players.get(&color).map(String::as_str)
    }

    /// Seats the guest on the color the host did not take.
    ///
    /// Black moves first whichever side the guest lands on.
    #[instrument(skip(self), fields(session_id = %self.code))]
    pub fn join(&mut self, player_id: PlayerId) -> Result<Seat, GameError> {
        if self.status != SessionStatus::Waiting {
            warn!(status = %self.status, "Join rejected");
            return Err(GameErrorKind::InvalidState {
                operation: Operation::Join,
                status: self.status,
            }
            .into());
        }

        let color = self.host_color.opponent();
        info!(%player_id, %color, "Seating guest");
        self.players.insert(color, player_id.clone());
        self.status = SessionStatus::Playing;
        self.last_activity = Instant::now();

        Ok(Seat::new(player_id, color))
    }

    /// Places a stone for `player_id` at `(row, col)`.
    ///
    /// Checks run in order: lifecycle, turn ownership, then coordinates.
    /// A caller presenting an unknown id and one presenting the other
    /// player's id both get [`GameErrorKind::Forbidden`].
    #[instrument(skip(self), fields(session_id = %self.code))]
    pub fn make_move(&mut self, player_id: &str, row: i64, col: i64) -> Result<Snapshot, GameError> {
        if self.status != SessionStatus::Playing {
            warn!(status = %self.status, "Move rejected: game not in play");
            return Err(GameErrorKind::InvalidState {
                operation: Operation::Move,
                status: self.status,
            }
            .into());
        }

        let current = self.game.to_move();
        if self.player(current) != Some(player_id) {
            warn!(expected_color = %current, "Player tried to move out of turn");
            return Err(GameErrorKind::Forbidden.into());
        }

        let placement = self.game.place(row, col).map_err(|e| {
            warn!(error = %e, "Invalid move");
            match e {
                PlaceError::GameOver => GameError::new(GameErrorKind::InvalidState {
                    operation: Operation::Move,
                    status: self.status,
                }),
                other => GameError::new(GameErrorKind::InvalidMove(other)),
            }
        })?;
        self.last_activity = Instant::now();

        match placement {
            Placement::Won(winner) => {
                self.status = SessionStatus::Finished;
                info!(%winner, "Game won");
            }
            Placement::Continue { next } => {
                debug!(%next, "Move accepted");
            }
        }

        Ok(self.snapshot())
    }

    /// Returns the externally visible state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.game.board().clone(),
            turn: self.game.to_move(),
            status: self.status,
            winner: self.game.winner(),
        }
    }
}
