//! Ordered, append-only conversation log

use parley_providers::{Message, Role};

/// One conversation's ordered message log.
///
/// Invariants:
/// - at most one system message, and it always occupies position 0;
/// - messages are never reordered or deleted individually, only the
///   whole history can be reset;
/// - append is the only mutation.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history already seeded with a system message
    pub fn with_system(content: impl Into<String>) -> Self {
        let mut history = Self::new();
        history.set_system(content);
        history
    }

    /// Set the system message at position 0.
    ///
    /// Inserts when absent; deterministically replaces the existing
    /// system message's content otherwise. Never produces more than one
    /// system message.
    pub fn set_system(&mut self, content: impl Into<String>) {
        match self.messages.first_mut() {
            Some(first) if first.role == Role::System => {
                first.content = content.into();
            }
            _ => self.messages.insert(0, Message::system(content)),
        }
    }

    /// Append a user message
    pub fn add_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message
    pub fn add_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Owned copy of the full ordered history, for transmission
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Number of messages, including the system message
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Empty the history entirely, including the system message.
    ///
    /// The caller re-issues `set_system` if persona continuity is wanted;
    /// the session manager always does.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
