//! Game session management for HTTP multiplayer.

mod code;
mod game_session;
mod manager;

pub use code::{CODE_ALPHABET, CODE_LENGTH, random_code};
pub use game_session::{GameSession, Seat, SessionStatus, Snapshot};
pub use manager::{MIN_REAP_INTERVAL, SessionHandle, SessionManager};

/// Short code identifying a game session.
pub type SessionCode = String;

/// Opaque identifier a player presents with each move.
pub type PlayerId = String;

/// Player id handed to the session creator.
pub const HOST_PLAYER_ID: &str = "host";

/// Player id handed to the player who joins.
pub const GUEST_PLAYER_ID: &str = "guest";
