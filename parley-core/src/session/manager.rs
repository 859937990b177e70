//! SessionManager - the stateful heart of the relay.
//!
//! Turns a stateless "send text for session X" request into a stateful
//! conversational exchange with the remote model. Guarantees at most one
//! `ConversationHistory` per session id for the process lifetime, and at
//! most one in-flight send per session id at a time.

use chrono::{DateTime, Utc};
use parley_providers::{CompletionFactory, Message};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::history::ConversationHistory;
use super::store::{Session, SessionStore};
use crate::error::{Error, Result};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Point-in-time view of one live session, for status/introspection output
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub message_count: usize,
}

/// Manages all conversation sessions and mediates the remote call.
///
/// Both the HTTP server and the CLI loop feed the same manager instance;
/// interfaces in the same process share sessions.
pub struct SessionManager {
    store: SessionStore,
    factory: Arc<dyn CompletionFactory>,
    persona: String,
    request_timeout: Duration,
    max_sessions: Option<usize>,
}

impl SessionManager {
    /// Create a manager with the default timeout and no session cap
    pub fn new(factory: Arc<dyn CompletionFactory>, persona: impl Into<String>) -> Self {
        Self::with_options(factory, persona, DEFAULT_REQUEST_TIMEOUT, None)
    }

    /// Create a manager with an explicit remote-call timeout and an
    /// optional cap on live sessions
    pub fn with_options(
        factory: Arc<dyn CompletionFactory>,
        persona: impl Into<String>,
        request_timeout: Duration,
        max_sessions: Option<usize>,
    ) -> Self {
        Self::with_store(
            SessionStore::new(),
            factory,
            persona,
            request_timeout,
            max_sessions,
        )
    }

    /// Create a manager over a caller-supplied store, e.g. one already
    /// holding sessions or shared with other machinery
    pub fn with_store(
        store: SessionStore,
        factory: Arc<dyn CompletionFactory>,
        persona: impl Into<String>,
        request_timeout: Duration,
        max_sessions: Option<usize>,
    ) -> Self {
        Self {
            store,
            factory,
            persona: persona.into(),
            request_timeout,
            max_sessions,
        }
    }

    /// Return the existing session or lazily construct one: fresh history
    /// seeded with the persona, plus a client built by the factory.
    ///
    /// Factory failure (missing connection settings) propagates as
    /// `Error::Config` and the session is not added to the store.
    pub async fn get_or_create(&self, session_id: &str) -> Result<Arc<Session>> {
        if let Some(session) = self.store.get(session_id).await {
            return Ok(session);
        }

        let client = self.factory.build()?;
        let history = ConversationHistory::with_system(&self.persona);
        let session = Arc::new(Session::new(session_id, history, client));

        // The store re-checks the capacity bound under its write lock;
        // checking len() here first would race with other creations.
        let session = self.store.try_insert(session, self.max_sessions).await?;
        debug!("Created session '{}'", session_id);
        Ok(session)
    }

    /// Relay one user message for a session and return the assistant reply.
    ///
    /// The user message and the assistant reply are committed to history
    /// together, after the provider accepted the turn; a failed turn
    /// leaves history untouched and the session usable.
    pub async fn send(&self, session_id: &str, user_text: &str) -> Result<String> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(Error::Validation("Message cannot be empty".to_string()));
        }

        let session = self.get_or_create(session_id).await?;

        // Holding the history lock across the remote call serializes
        // sends per session id.
        let mut history = session.history().lock().await;

        let mut outbound = history.snapshot();
        outbound.push(Message::user(text));

        let reply = match timeout(self.request_timeout, session.client().complete(outbound)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                warn!("Completion failed for session '{}': {}", session_id, err);
                return Err(Error::Provider(format!(
                    "Error communicating with completion provider: {err}"
                )));
            }
            Err(_) => {
                warn!(
                    "Completion timed out for session '{}' after {}s",
                    session_id,
                    self.request_timeout.as_secs()
                );
                return Err(Error::Provider(format!(
                    "Completion request timed out after {}s",
                    self.request_timeout.as_secs()
                )));
            }
        };

        history.add_user(text);
        history.add_assistant(&reply);

        Ok(reply)
    }

    /// Reset a session's history and immediately re-seed the persona, so
    /// a cleared session behaves exactly like a fresh one. Unknown ids
    /// are a silent no-op.
    pub async fn clear(&self, session_id: &str) {
        if let Some(session) = self.store.get(session_id).await {
            let mut history = session.history().lock().await;
            history.clear();
            history.set_system(&self.persona);
            debug!("Cleared session '{}'", session_id);
        }
    }

    /// Snapshot of a session's history, if the session exists
    pub async fn history(&self, session_id: &str) -> Option<Vec<Message>> {
        let session = self.store.get(session_id).await?;
        let history = session.history().lock().await;
        Some(history.snapshot())
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.store.len().await
    }

    /// Summaries of all live sessions
    pub async fn sessions(&self) -> Vec<SessionSummary> {
        let mut summaries = Vec::new();
        for id in self.store.ids().await {
            if let Some(session) = self.store.get(&id).await {
                let message_count = session.history().lock().await.len();
                summaries.push(SessionSummary {
                    id,
                    created_at: session.created_at,
                    message_count,
                });
            }
        }
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        summaries
    }
}
