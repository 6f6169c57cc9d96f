//! Strictly Gomoku library - five-in-a-row game sessions
//!
//! This library provides an in-memory session server for two-player gomoku.
//!
//! # Architecture
//!
//! - **Games**: Board, rules and incremental win detection
//! - **Session**: Per-session state machine and the shared session store
//! - **Server**: REST interface over the session store
//! - **Client**: Typed HTTP client for the REST interface
//!
//! # Example
//!
//! ```
//! use strictly_gomoku::{BoardSize, Color, SessionManager, SessionStatus};
//!
//! let sessions = SessionManager::new();
//! let (code, _) = sessions.create_session(BoardSize::Fifteen, Color::Black);
//! let guest = sessions.join(&code, "guest").expect("session is waiting");
//! assert_eq!(guest.color, Color::White);
//!
//! let snapshot = sessions.make_move(&code, "host", 7, 7).expect("black opens");
//! assert_eq!(snapshot.status, SessionStatus::Playing);
//! assert_eq!(snapshot.turn, Color::White);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod client;
mod config;
mod error;
mod games;
mod server;
mod session;

// Crate-level exports - REST bodies
pub use api::{
    CreateGameRequest, CreateGameResponse, ErrorResponse, HealthResponse, JoinGameResponse,
    MoveRequest,
};

// Crate-level exports - Client
pub use client::{ClientError, RestGameClient};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Errors
pub use error::{GameError, GameErrorKind, Operation};

// Crate-level exports - Server types
pub use server::{ApiError, GameServer, router};

// Crate-level exports - Session management
pub use session::{
    CODE_ALPHABET, CODE_LENGTH, GUEST_PLAYER_ID, GameSession, HOST_PLAYER_ID, MIN_REAP_INTERVAL,
    PlayerId, Seat, SessionCode, SessionHandle, SessionManager, SessionStatus, Snapshot,
    random_code,
};

// Crate-level exports - Game types (gomoku)
pub use games::gomoku::{
    Board, BoardSize, Color, Difficulty, Game, MalformedBoard, PlaceError, Placement, Position,
    Square, UnsupportedSize, WIN_LENGTH, is_winning_move, longest_line, run_length, suggest_move,
};
