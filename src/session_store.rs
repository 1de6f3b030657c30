//! Session Storage
//!
//! Per-player game sessions keyed by an opaque session identifier. The game
//! logic only talks to the [`SessionStore`] trait; [`MemorySessionStore`] is
//! the in-process backend used by the server.

use crate::games::session::GameSession;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    time::{Duration, Instant},
};
use tracing::{debug, warn};
use uuid::Uuid;

/// Opaque session token carried by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept only well-formed tokens; anything else is treated as no session.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(|id| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session backend unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage interface for game sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the session, if one exists and is still live
    async fn get(&self, id: &SessionId) -> StoreResult<Option<GameSession>>;

    /// Insert or replace the session
    async fn put(&self, id: SessionId, session: GameSession) -> StoreResult<()>;

    /// Drop the session
    async fn delete(&self, id: &SessionId) -> StoreResult<()>;

    /// Number of sessions currently held
    async fn len(&self) -> StoreResult<usize>;
}

struct StoredSession {
    session: GameSession,
    last_seen: Instant,
}

impl StoredSession {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() >= ttl
    }
}

/// In-memory session store with idle expiry.
///
/// Sessions untouched for `ttl` are dropped lazily: on lookup, or by a sweep
/// once the table grows past `max_sessions`.
pub struct MemorySessionStore {
    sessions: DashMap<SessionId, StoredSession>,
    ttl: Duration,
    max_sessions: usize,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            max_sessions,
        }
    }

    /// Remove every expired session, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, stored| !stored.is_expired(self.ttl));
        let purged = before.saturating_sub(self.sessions.len());
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }
        purged
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(24 * 60 * 60), 100_000)
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: &SessionId) -> StoreResult<Option<GameSession>> {
        if let Some(mut stored) = self.sessions.get_mut(id) {
            if !stored.is_expired(self.ttl) {
                stored.last_seen = Instant::now();
                return Ok(Some(stored.session.clone()));
            }
        }

        if self
            .sessions
            .remove_if(id, |_, stored| stored.is_expired(self.ttl))
            .is_some()
        {
            debug!(session = %id, "Session expired");
        }
        Ok(None)
    }

    async fn put(&self, id: SessionId, session: GameSession) -> StoreResult<()> {
        self.sessions.insert(
            id,
            StoredSession {
                session,
                last_seen: Instant::now(),
            },
        );

        if self.sessions.len() > self.max_sessions {
            self.purge_expired();
            if self.sessions.len() > self.max_sessions {
                warn!(
                    "Session store holds {} sessions (soft limit {})",
                    self.sessions.len(),
                    self.max_sessions
                );
            }
        }
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> StoreResult<()> {
        self.sessions.remove(id);
        Ok(())
    }

    async fn len(&self) -> StoreResult<usize> {
        Ok(self.sessions.len())
    }
}
