//! REST server setup and request handling.

use crate::api::{
    CreateGameRequest, CreateGameResponse, ErrorResponse, HealthResponse, JoinGameResponse,
    MoveRequest,
};
use crate::config::ServerConfig;
use crate::error::{GameError, GameErrorKind};
use crate::session::{GUEST_PLAYER_ID, HOST_PLAYER_ID, SessionManager, Snapshot};
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::{Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, instrument, warn};

/// Error returned to HTTP clients: a status code and a message.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{status}: {message}")]
pub struct ApiError {
    /// HTTP status.
    pub status: StatusCode,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Creates an error response.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        let status = match err.kind() {
            GameErrorKind::NotFound { .. } => StatusCode::NOT_FOUND,
            GameErrorKind::InvalidState { .. } | GameErrorKind::InvalidMove(_) => {
                StatusCode::BAD_REQUEST
            }
            GameErrorKind::Forbidden => StatusCode::FORBIDDEN,
        };
        Self::new(status, err.message())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Main server: routes REST calls onto a shared session store.
#[derive(Debug, Clone)]
pub struct GameServer {
    sessions: SessionManager,
    config: ServerConfig,
}

impl GameServer {
    /// Creates a game server with an empty session store.
    #[instrument]
    pub fn new(config: ServerConfig) -> Self {
        Self::with_sessions(config, SessionManager::new())
    }

    /// Creates a game server on top of an existing session store.
    #[instrument(skip(sessions))]
    pub fn with_sessions(config: ServerConfig, sessions: SessionManager) -> Self {
        info!("Creating game server");
        Self { sessions, config }
    }

    /// Returns the session store.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Builds the router with CORS and request logging applied.
    pub fn router(&self) -> Router {
        router(self.sessions.clone())
    }

    /// Binds the configured address and serves until Ctrl+C.
    #[instrument(skip(self))]
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        self.run_on(listener).await
    }

    /// Serves on an already bound listener until Ctrl+C.
    #[instrument(skip_all)]
    pub async fn run_on(self, listener: TcpListener) -> anyhow::Result<()> {
        let reaper = self.config.session_ttl().map(|ttl| {
            self.sessions
                .spawn_reaper(ttl, Duration::from_secs(*self.config.reap_interval_secs()))
        });

        info!(addr = %listener.local_addr()?, "Server ready");
        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await;

        if let Some(reaper) = reaper {
            reaper.abort();
        }
        info!("Server stopped");
        result?;
        Ok(())
    }
}

/// Builds the REST router over `sessions`.
pub fn router(sessions: SessionManager) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/game", post(create_game))
        .route("/game/{code}", get(get_game))
        .route("/game/{code}/join", post(join_game))
        .route("/game/{code}/move", post(make_move))
        .fallback(not_found)
        .layer(cors())
        .layer(middleware::from_fn(log_requests))
        .with_state(sessions)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl+C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[instrument(skip_all)]
async fn health(State(sessions): State<SessionManager>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        sessions: sessions.len(),
    })
}

#[instrument(skip_all)]
async fn create_game(
    State(sessions): State<SessionManager>,
    body: Bytes,
) -> Json<CreateGameResponse> {
    let request = CreateGameRequest::from_body(&body);
    let (size, color) = request.normalize();
    debug!(?request, %size, %color, "Normalized create request");

    let (code, _) = sessions.create_session(size, color);
    Json(CreateGameResponse {
        game_code: code,
        player_id: HOST_PLAYER_ID.to_string(),
        color,
    })
}

#[instrument(skip(sessions))]
async fn join_game(
    State(sessions): State<SessionManager>,
    Path(code): Path<String>,
) -> Result<Json<JoinGameResponse>, ApiError> {
    let seat = sessions.join(&code, GUEST_PLAYER_ID)?;
    Ok(Json(JoinGameResponse {
        player_id: seat.player_id,
        color: seat.color,
    }))
}

#[instrument(skip(sessions))]
async fn get_game(
    State(sessions): State<SessionManager>,
    Path(code): Path<String>,
) -> Result<Json<Snapshot>, ApiError> {
    Ok(Json(sessions.snapshot(&code)?))
}

#[instrument(skip(sessions, payload))]
async fn make_move(
    State(sessions): State<SessionManager>,
    Path(code): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<Snapshot>, ApiError> {
    // Unknown codes are reported as such even when the body is also bad.
    sessions.get_session(&code)?;
    let Json(request) = payload?;
    let snapshot = sessions.make_move(&code, &request.player_id, request.row, request.col)?;
    Ok(Json(snapshot))
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Not found")
}

/// Any origin may call the API with JSON bodies.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if status.is_success() {
        info!(%method, %uri, %status, elapsed_ms, "Request handled");
    } else {
        warn!(%method, %uri, %status, elapsed_ms, "Request failed");
    }
    response
}
