//! Session store: owns all sessions and hands out codes.

use super::code::random_code;
use super::game_session::{GameSession, Seat, Snapshot};
use super::{HOST_PLAYER_ID, PlayerId, SessionCode};
use crate::error::{GameError, GameErrorKind};
use crate::games::gomoku::{BoardSize, Color};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, TryLockError};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Reaper period used when a zero interval is requested.
pub const MIN_REAP_INTERVAL: Duration = Duration::from_secs(1);

/// Shared, individually locked session.
pub type SessionHandle = Arc<Mutex<GameSession>>;

/// Manages all game sessions.
///
/// Each session sits behind its own lock, so operations on different
/// sessions never wait on each other. The map lock is held only long
/// enough to look up, insert or sweep entries.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<SessionCode, SessionHandle>>>,
}

/// Locks a session. Validation precedes every mutation, so a panic while
/// holding the lock cannot leave a half-applied move behind.
fn lock(handle: &SessionHandle) -> MutexGuard<'_, GameSession> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionManager {
    /// Creates an empty session manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self::default()
    }

    /// Creates a waiting session with the host seated on `host_color`.
    ///
    /// Codes are drawn until one unused by any stored session comes up.
    pub fn create_session(&self, size: BoardSize, host_color: Color) -> (SessionCode, Snapshot) {
        self.create_session_with_rng(&mut rand::rng(), size, host_color)
    }

    /// Same as [`create_session`](Self::create_session), drawing codes from `rng`.
    #[instrument(skip(self, rng))]
    pub fn create_session_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: BoardSize,
        host_color: Color,
    ) -> (SessionCode, Snapshot) {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let code = loop {
            let candidate = random_code(&mut *rng);
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
            debug!(%candidate, "Session code collision, drawing again");
        };

        let session = GameSession::new(code.clone(), size, host_color, HOST_PLAYER_ID);
        let snapshot = session.snapshot();
        sessions.insert(code.clone(), Arc::new(Mutex::new(session)));

        info!(session_id = %code, total = sessions.len(), "Created new session");
        (code, snapshot)
    }

    /// Gets a session by code.
    #[instrument(skip(self))]
    pub fn get_session(&self, code: &str) -> Result<SessionHandle, GameError> {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        sessions.get(code).cloned().ok_or_else(|| {
            debug!(session_id = code, "Session not found");
            GameError::new(GameErrorKind::NotFound {
                code: code.to_string(),
            })
        })
    }

    /// Removes the session under `code`, returning its handle.
    ///
    /// Operations already waiting on the session's lock fail with NotFound.
    #[instrument(skip(self))]
    pub fn remove_session(&self, code: &str) -> Result<SessionHandle, GameError> {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(code);

        removed.ok_or_else(|| {
            GameError::new(GameErrorKind::NotFound {
                code: code.to_string(),
            })
        })
    }

    /// Runs `op` on the session under `code` while holding its lock.
    ///
    /// The session must still be stored once the lock is held: a session
    /// removed while the caller waited is reported as NotFound.
    fn with_live_session<T>(
        &self,
        code: &str,
        op: impl FnOnce(&mut GameSession) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let handle = self.get_session(code)?;
        let mut session = lock(&handle);

        let still_stored = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .is_some_and(|stored| Arc::ptr_eq(stored, &handle));
        if !still_stored {
            warn!(session_id = code, "Session removed while waiting for its lock");
            return Err(GameError::new(GameErrorKind::NotFound {
                code: code.to_string(),
            }));
        }

        op(&mut session)
    }

    /// Seats a guest in the session under `code`.
    #[instrument(skip(self, player_id))]
    pub fn join(&self, code: &str, player_id: impl Into<PlayerId>) -> Result<Seat, GameError> {
        let player_id = player_id.into();
        self.with_live_session(code, |session| session.join(player_id))
    }

    /// Places a stone for `player_id` in the session under `code`.
    #[instrument(skip(self))]
    pub fn make_move(
        &self,
        code: &str,
        player_id: &str,
        row: i64,
        col: i64,
    ) -> Result<Snapshot, GameError> {
        self.with_live_session(code, |session| session.make_move(player_id, row, col))
    }

    /// Reads the current state of the session under `code`.
    #[instrument(skip(self))]
    pub fn snapshot(&self, code: &str) -> Result<Snapshot, GameError> {
        let handle = self.get_session(code)?;
        let session = lock(&handle);
        Ok(session.snapshot())
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Checks if no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes sessions idle for at least `ttl`. Returns how many were removed.
    ///
    /// Sessions locked by an in-flight operation are kept; they are
    /// by definition not idle.
    #[instrument(skip(self))]
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let before = sessions.len();
        sessions.retain(|code, handle| {
            let idle = match handle.try_lock() {
                Ok(session) => session.last_activity().elapsed(),
                Err(TryLockError::Poisoned(poisoned)) => {
                    poisoned.into_inner().last_activity().elapsed()
                }
                Err(TryLockError::WouldBlock) => return true,
            };
            let keep = idle < ttl;
            if !keep {
                debug!(session_id = %code, idle_secs = idle.as_secs(), "Evicting idle session");
            }
            keep
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    /// Spawns a background task that evicts idle sessions every `interval`.
    ///
    /// A zero interval is raised to [`MIN_REAP_INTERVAL`].
    #[instrument(skip(self))]
    pub fn spawn_reaper(&self, ttl: Duration, interval: Duration) -> tokio::task::JoinHandle<()> {
        let interval = if interval.is_zero() {
            warn!(
                interval_secs = MIN_REAP_INTERVAL.as_secs(),
                "Zero reap interval requested, using the minimum"
            );
            MIN_REAP_INTERVAL
        } else {
            interval
        };
        info!(ttl_secs = ttl.as_secs(), interval_secs = interval.as_secs(), "Starting session reaper");
        let sessions = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                sessions.evict_idle(ttl);
            }
        })
    }
}
