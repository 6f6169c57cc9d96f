//! Request and response bodies of the REST interface.

use crate::games::gomoku::{BoardSize, Color};
use crate::session::{PlayerId, SessionCode};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /game`.
///
/// Both fields are optional. Values that are missing, of the wrong JSON
/// type, or outside the supported set fall back to a 15x15 board with the
/// host playing black.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// Requested board side length.
    #[serde(default, deserialize_with = "lenient_size", skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Requested host color (`"black"` or `"white"`).
    #[serde(default, deserialize_with = "lenient_color", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CreateGameRequest {
    /// Parses a raw request body, treating anything unreadable as empty.
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unreadable create request, using defaults");
            Self::default()
        })
    }

    /// Applies the documented defaults.
    pub fn normalize(&self) -> (BoardSize, Color) {
        (
            BoardSize::from_requested(self.size),
            Color::from_requested(self.color.as_deref()),
        )
    }
}

fn lenient_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_u64().or_else(|| {
            v.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
                .map(|f| f as u64)
        })
    }))
}

fn lenient_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_owned)))
}

/// Response of `POST /game`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameResponse {
    /// Code to share with the second player.
    pub game_code: SessionCode,
    /// Host's player id.
    pub player_id: PlayerId,
    /// Host's color.
    pub color: Color,
}

/// Response of `POST /game/{code}/join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinGameResponse {
    /// Guest's player id.
    pub player_id: PlayerId,
    /// Guest's color.
    pub color: Color,
}

/// Body of `POST /game/{code}/move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct MoveRequest {
    /// Id of the player moving.
    #[new(into)]
    pub player_id: PlayerId,
    /// Target row.
    pub row: i64,
    /// Target column.
    pub col: i64,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Number of stored sessions.
    pub sessions: usize,
}
