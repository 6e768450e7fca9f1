//! Error types for filechat.
//!
//! Each layer gets its own enum so callers have to handle every failure kind
//! explicitly. Display strings are what the REPL shows to the user.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::MessageRole;

/// Startup configuration failure. Fatal: the REPL refuses to start.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No API key in the environment, `.env`, or the secret file.
    #[error("GEMINI_API_KEY not found in environment, .env file, or {}", .secret_path.display())]
    MissingApiKey { secret_path: PathBuf },

    /// The secret file exists but could not be read or parsed.
    #[error("Failed to load secret file at {}: {message}", .path.display())]
    SecretFile { path: PathBuf, message: String },

    /// Home directory could not be determined.
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

/// Failure while turning an uploaded batch into context text.
///
/// Any variant aborts the whole batch; the session context is left untouched.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The file could not be read from disk.
    #[error("failed to read '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is neither PDF nor plain text.
    #[error("unsupported file type for '{name}': {mime_type} (only PDF and TXT are accepted)")]
    UnsupportedKind { name: String, mime_type: String },

    /// The PDF could not be decoded.
    #[error("failed to parse PDF '{name}': {message}")]
    Pdf { name: String, message: String },

    /// A text file is not valid UTF-8.
    #[error("'{name}' is not valid UTF-8 text: {source}")]
    InvalidUtf8 {
        name: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl ExtractionError {
    /// Name of the file that broke the batch.
    pub fn file_name(&self) -> &str {
        match self {
            Self::Read { name, .. }
            | Self::UnsupportedKind { name, .. }
            | Self::Pdf { name, .. }
            | Self::InvalidUtf8 { name, .. } => name,
        }
    }
}

/// Internal-consistency failure while building a request payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// File context can only be merged into a leading user turn.
    #[error("conversation must start with a user message when file context is present (found {role})")]
    FirstMessageNotUser { role: MessageRole },
}

/// A 200 response whose body does not carry `candidates[0].content.parts[0].text`.
///
/// Every variant keeps the raw response body for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Error parsing response (body is not JSON: {reason}): {body}")]
    InvalidJson { reason: String, body: String },

    #[error("Error parsing response (unexpected shape: {reason}): {body}")]
    Malformed { reason: String, body: String },

    #[error("Error parsing response (no candidates): {body}")]
    NoCandidates { body: String },

    #[error("Error parsing response (candidate has no content): {body}")]
    MissingContent { body: String },

    #[error("Error parsing response (content has no parts): {body}")]
    NoParts { body: String },

    #[error("Error parsing response (first part has no text): {body}")]
    MissingText { body: String },
}

impl SchemaError {
    /// Raw response body that failed to parse.
    pub fn body(&self) -> &str {
        match self {
            Self::InvalidJson { body, .. }
            | Self::Malformed { body, .. }
            | Self::NoCandidates { body }
            | Self::MissingContent { body }
            | Self::NoParts { body }
            | Self::MissingText { body } => body,
        }
    }
}

/// Failure of a single `generateContent` call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// DNS, connect, or I/O failure before a response arrived.
    #[error("Error generating response: {message}")]
    Transport {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any non-200 status. The body is kept verbatim.
    #[error("API Error: {status} - {body}")]
    Http { status: u16, body: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ApiError {
    pub fn transport(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: source.into(),
        }
    }

    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable detail for an HTTP error.
    ///
    /// Gemini wraps failures as `{"error": {"status", "message"}}`; when the
    /// body has that shape this returns `"{status}: {message}"`, otherwise the
    /// raw body.
    pub fn detail(&self) -> Option<String> {
        let Self::Http { body, .. } = self else {
            return None;
        };

        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
        let error = parsed.as_ref().and_then(|value| value.get("error"));
        let message = error
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str());
        let status_text = error
            .and_then(|e| e.get("status"))
            .and_then(|s| s.as_str())
            .unwrap_or_default();

        Some(match message {
            Some(msg) if status_text.is_empty() => msg.to_string(),
            Some(msg) => format!("{status_text}: {msg}"),
            None => body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_contains_status_and_body() {
        let err = ApiError::http(500, "oops");
        assert_eq!(err.to_string(), "API Error: 500 - oops");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_detail_extracts_gemini_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        let err = ApiError::http(400, body);
        assert_eq!(
            err.detail().as_deref(),
            Some("INVALID_ARGUMENT: API key not valid.")
        );
    }

    #[test]
    fn test_detail_falls_back_to_raw_body() {
        let err = ApiError::http(502, "<html>bad gateway</html>");
        assert_eq!(err.detail().as_deref(), Some("<html>bad gateway</html>"));
        let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        assert!(ApiError::transport("connect failed", refused).detail().is_none());
    }

    #[test]
    fn test_transport_error_keeps_cause() {
        use std::error::Error as _;

        let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "dns lookup timed out");
        let err = ApiError::transport("Gemini API request failed", cause);

        assert_eq!(err.to_string(), "Error generating response: Gemini API request failed");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "dns lookup timed out");
    }

    #[test]
    fn test_schema_error_keeps_body() {
        let err = SchemaError::NoCandidates {
            body: r#"{"promptFeedback":{}}"#.to_string(),
        };
        assert_eq!(err.body(), r#"{"promptFeedback":{}}"#);
        let api: ApiError = err.into();
        assert!(api.to_string().starts_with("Error parsing response"));
    }

    #[test]
    fn test_extraction_error_names_file() {
        let err = ExtractionError::Pdf {
            name: "report.pdf".to_string(),
            message: "invalid header".to_string(),
        };
        assert_eq!(err.file_name(), "report.pdf");
        assert!(err.to_string().contains("report.pdf"));
    }
}
