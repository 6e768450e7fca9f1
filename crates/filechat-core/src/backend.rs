//! Chat backend trait.
//!
//! Defines the seam between the session logic and the remote model. The
//! Gemini HTTP client in `filechat-interaction` implements it; tests use
//! in-memory fakes.

use crate::error::ApiError;
use crate::payload::RequestPayload;

/// A remote model that answers one request with one reply.
///
/// Implementations make a single attempt per call: no retries, no backoff,
/// no streaming.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends the payload and returns the assistant's reply text.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: text of the first part of the first candidate
    /// - `Err(ApiError)`: transport, HTTP status, or response-shape failure
    async fn send(&self, payload: &RequestPayload) -> Result<String, ApiError>;

    /// Model identifier, for display.
    fn model(&self) -> &str;
}
