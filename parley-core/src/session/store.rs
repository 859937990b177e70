//! Session data structures and the in-memory session store

use chrono::{DateTime, Utc};
use parley_providers::ChatCompletion;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::history::ConversationHistory;

/// One live conversation session.
///
/// The history lives behind an async mutex; `send` holds it across the
/// remote call, which serializes turns per session (at most one in-flight
/// send per session id).
pub struct Session {
    /// Opaque caller-supplied identifier
    pub id: String,
    /// Session creation time
    pub created_at: DateTime<Utc>,
    history: Mutex<ConversationHistory>,
    client: Arc<dyn ChatCompletion>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(
        id: impl Into<String>,
        history: ConversationHistory,
        client: Arc<dyn ChatCompletion>,
    ) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            history: Mutex::new(history),
            client,
        }
    }

    /// The conversation history, guarded per session
    pub fn history(&self) -> &Mutex<ConversationHistory> {
        &self.history
    }

    /// The completion client bound to this session
    pub fn client(&self) -> &Arc<dyn ChatCompletion> {
        &self.client
    }
}

/// Thread-safe map from session id to live session.
///
/// Create-on-first-use with no expiry by default; eviction policy is an
/// extension point rather than built in.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<String, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a session if it exists
    pub async fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.inner.read().await.get(id).cloned()
    }

    /// Insert unless the id is already present; returns the session now
    /// stored under the id. A racing insert keeps the first session, so
    /// at most one instance exists per id.
    ///
    /// The capacity bound is enforced under the same write lock as the
    /// insert, so racing creations of distinct ids cannot overshoot it.
    /// An already-stored id is returned regardless of the cap.
    pub async fn try_insert(
        &self,
        session: Arc<Session>,
        cap: Option<usize>,
    ) -> crate::Result<Arc<Session>> {
        let mut sessions = self.inner.write().await;
        if let Some(existing) = sessions.get(&session.id) {
            return Ok(existing.clone());
        }
        if let Some(cap) = cap {
            if sessions.len() >= cap {
                return Err(crate::Error::Session(format!(
                    "Session limit of {cap} reached; cannot create session '{}'",
                    session.id
                )));
            }
        }
        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// List all live session ids
    pub async fn ids(&self) -> Vec<String> {
        self.inner.read().await.keys().cloned().collect()
    }
}
