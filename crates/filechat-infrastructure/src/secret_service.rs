//! Secret service implementation.
//!
//! Resolves the Gemini settings from, in order: the process environment
//! (after loading `.env`), `secret.json`, and built-in defaults.

use crate::paths::FilechatPaths;
use filechat_core::ConfigError;
use filechat_core::config::{
    API_KEY_ENV, BASE_URL_ENV, GeminiConfig, MODEL_ENV, SecretConfig,
};
use filechat_core::secret::SecretService;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Service for resolving the Gemini configuration at startup.
///
/// # Example
///
/// ```ignore
/// use filechat_infrastructure::SecretServiceImpl;
/// use filechat_core::secret::SecretService;
///
/// let service = SecretServiceImpl::new()?;
/// let config = service.load_config().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SecretServiceImpl {
    /// Location of `secret.json`
    secret_path: PathBuf,
    /// Whether to read a `.env` file from the working directory first
    load_dotenv: bool,
}

impl SecretServiceImpl {
    /// Creates a service reading `~/.config/filechat/secret.json` and `.env`.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            secret_path: FilechatPaths::secret_file()?,
            load_dotenv: true,
        })
    }

    /// Creates a service with an explicit secret file and no `.env` loading.
    pub fn with_path(secret_path: impl Into<PathBuf>) -> Self {
        Self {
            secret_path: secret_path.into(),
            load_dotenv: false,
        }
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_config(&self) -> Result<GeminiConfig, ConfigError> {
        if self.load_dotenv {
            // Existing environment variables win over `.env` entries.
            match dotenvy::dotenv() {
                Ok(path) => debug!(path = %path.display(), "loaded .env file"),
                Err(e) if e.not_found() => {}
                Err(e) => debug!(error = %e, "ignoring unreadable .env file"),
            }
        }

        let secrets = read_secret_file(&self.secret_path).await?;
        resolve_config(|key| std::env::var(key).ok(), secrets, &self.secret_path)
    }
}

/// Reads `secret.json`. A missing file is not an error.
pub async fn read_secret_file(path: &Path) -> Result<Option<SecretConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::SecretFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            });
        }
    };

    let secrets = serde_json::from_str(&content).map_err(|e| ConfigError::SecretFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), "loaded secret file");
    Ok(Some(secrets))
}

/// Merges environment values, secret-file values and defaults.
///
/// `lookup` returns the value of an environment variable; blank values are
/// treated as unset.
pub fn resolve_config<F>(
    lookup: F,
    secrets: Option<SecretConfig>,
    secret_path: &Path,
) -> Result<GeminiConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    let file_gemini = secrets.and_then(|s| s.gemini);

    let api_key = env(API_KEY_ENV)
        .or_else(|| {
            file_gemini
                .as_ref()
                .map(|g| g.api_key.clone())
                .filter(|key| !key.trim().is_empty())
        })
        .ok_or_else(|| ConfigError::MissingApiKey {
            secret_path: secret_path.to_path_buf(),
        })?;

    let mut config = GeminiConfig::new(api_key.trim());

    let model = env(MODEL_ENV).or_else(|| file_gemini.and_then(|g| g.model_name));
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        config = config.with_model(model.trim());
    }
    if let Some(base_url) = env(BASE_URL_ENV) {
        config = config.with_base_url(base_url.trim());
    }

    debug!(model = %config.model_name, base_url = %config.base_url, "resolved gemini config");
    Ok(config)
}
