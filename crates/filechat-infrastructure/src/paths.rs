//! Path management for filechat configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/filechat/
//! └── secret.json              # Optional Gemini API key and model
//! ```
//!
//! Nothing is ever written here; the directory is only read at startup.

use filechat_core::ConfigError;
use std::path::PathBuf;

pub struct FilechatPaths;

impl FilechatPaths {
    /// Returns the filechat configuration directory (`~/.config/filechat`).
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(home.join(".config").join("filechat"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }
}
