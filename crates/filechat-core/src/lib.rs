//! Domain layer for filechat.
//!
//! Holds the session model (conversation log and file context), the payload
//! builder that turns a session into a `generateContent` request, and the
//! traits implemented by the outer crates.

pub mod backend;
pub mod config;
pub mod error;
pub mod payload;
pub mod secret;
pub mod session;
pub mod upload;

pub use backend::ChatBackend;
pub use error::{ApiError, ConfigError, ExtractionError, PayloadError, SchemaError};
pub use payload::{RequestPayload, build_payload};
pub use session::{ContextStore, ConversationLog, ConversationMessage, MessageRole, Session};
pub use upload::{FileKind, UploadedFile};
