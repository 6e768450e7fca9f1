//! Secret management service trait.
//!
//! Defines the interface for resolving the API key and model settings.

use crate::config::GeminiConfig;
use crate::error::ConfigError;

/// Service for loading the Gemini configuration at startup.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - The API key is never logged or exposed in error messages
/// - A missing key is reported as [`ConfigError::MissingApiKey`]
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Resolves the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(GeminiConfig)`: an API key was found
    /// - `Err(ConfigError)`: no key, or an unreadable secret file
    async fn load_config(&self) -> Result<GeminiConfig, ConfigError>;
}
