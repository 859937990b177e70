//! Core types and session management for parley
//!
//! This crate provides the conversation history, the session manager and
//! the configuration/logging plumbing used by the server and CLI front-ends.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;

pub use error::{Error, Result};
pub use session::{ConversationHistory, Session, SessionManager, SessionStore, SessionSummary};
