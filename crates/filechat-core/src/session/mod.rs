//! Session domain module.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageRole`, `ConversationMessage`)
//! - `log`: Append-only conversation history (`ConversationLog`)
//! - `context`: Aggregated file text for grounding (`ContextStore`)
//! - `model`: The per-user session that owns both (`Session`)

mod context;
mod log;
mod message;
mod model;

pub use context::ContextStore;
pub use log::ConversationLog;
pub use message::{ConversationMessage, MessageRole};
pub use model::Session;
