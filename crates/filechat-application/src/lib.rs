pub mod chat_service;
pub mod session_cache;

pub use chat_service::{ChatError, ChatService, UploadSummary};
pub use session_cache::SessionCache;
