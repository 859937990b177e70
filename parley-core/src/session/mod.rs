//! Session management for conversation history
//!
//! A session is one independent conversation, identified by an opaque
//! caller-supplied string. Sessions are created lazily on first use and
//! live for the process lifetime; only their history can be reset.

pub mod history;
pub mod manager;
pub mod store;

pub use history::ConversationHistory;
pub use manager::{SessionManager, SessionSummary};
pub use store::{Session, SessionStore};
