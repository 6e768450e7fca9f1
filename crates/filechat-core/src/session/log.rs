//! Append-only conversation history.

use super::message::{ConversationMessage, MessageRole};

/// Ordered, role-tagged history of one session.
///
/// Insertion order is chronological order and is also the order the turns
/// are sent to the model. `append` is the only mutator besides `clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    messages: Vec<ConversationMessage>,
}

impl ConversationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns a reference to it.
    pub fn append(&mut self, role: MessageRole, content: impl Into<String>) -> &ConversationMessage {
        self.messages.push(ConversationMessage::new(role, content));
        &self.messages[self.messages.len() - 1]
    }

    /// Drops every message. Nothing else in the session is touched.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// All messages in chronological order.
    pub fn all(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn first(&self) -> Option<&ConversationMessage> {
        self.messages.first()
    }

    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
