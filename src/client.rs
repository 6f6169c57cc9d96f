//! Type-safe HTTP client for the REST interface.

use crate::api::{
    CreateGameRequest, CreateGameResponse, ErrorResponse, HealthResponse, JoinGameResponse,
    MoveRequest,
};
use crate::session::Snapshot;
use derive_more::{Display, Error, From};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Failure talking to a game server.
#[derive(Debug, Display, Error, From)]
pub enum ClientError {
    /// Request never completed or the body was unreadable.
    #[display("HTTP transport error: {_0}")]
    #[from]
    Http(reqwest::Error),
    /// Server answered with an error status.
    #[display("Server returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the error body.
        message: String,
    },
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// REST client bound to one server.
#[derive(Debug, Clone)]
pub struct RestGameClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestGameClient {
    /// Creates a client for the server at `base_url`.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Returns the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks the server is up.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Creates a session and returns the host's credentials.
    #[instrument(skip(self))]
    pub async fn create_game(
        &self,
        request: &CreateGameRequest,
    ) -> Result<CreateGameResponse, ClientError> {
        let response = self
            .client
            .post(format!("{}/game", self.base_url))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Joins the session under `code` as the guest.
    #[instrument(skip(self))]
    pub async fn join_game(&self, code: &str) -> Result<JoinGameResponse, ClientError> {
        let response = self
            .client
            .post(format!("{}/game/{}/join", self.base_url, code))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Fetches the current state of the session under `code`.
    #[instrument(skip(self))]
    pub async fn get_game(&self, code: &str) -> Result<Snapshot, ClientError> {
        let response = self
            .client
            .get(format!("{}/game/{}", self.base_url, code))
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Places a stone.
    #[instrument(skip(self))]
    pub async fn make_move(
        &self,
        code: &str,
        request: &MoveRequest,
    ) -> Result<Snapshot, ClientError> {
        let response = self
            .client
            .post(format!("{}/game/{}/move", self.base_url, code))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            debug!(%status, "Request succeeded");
            return Ok(response.json().await?);
        }

        let body = response.text().await?;
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        warn!(%status, %message, "Server rejected request");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
