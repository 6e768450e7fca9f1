//! Session domain model.

use super::context::ContextStore;
use super::log::ConversationLog;
use uuid::Uuid;

/// State of one logical user session.
///
/// Owns its conversation log and file context exclusively; two sessions
/// never see each other's messages or files.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Chat history sent to the model on every submission
    pub log: ConversationLog,
    /// Text of the most recent upload batch
    pub context: ContextStore,
}

impl Session {
    /// Creates an empty session with a fresh id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
            log: ConversationLog::new(),
            context: ContextStore::new(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
