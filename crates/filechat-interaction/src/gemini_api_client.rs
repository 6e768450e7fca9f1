//! GeminiApiClient - Direct REST API implementation for Gemini.
//!
//! Posts the assembled conversation to `generateContent` and pulls the reply
//! out of `candidates[0].content.parts[0].text`. One attempt per call.

use async_trait::async_trait;
use filechat_core::config::GeminiConfig;
use filechat_core::{ApiError, ChatBackend, RequestPayload, SchemaError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

const API_PATH: &str = "v1beta/models";

/// Client that talks to the Gemini HTTP API.
///
/// No request timeout is configured: a hung connection blocks the caller
/// until the OS gives up.
#[derive(Clone)]
pub struct GeminiApiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiApiClient {
    /// Creates a client for the public endpoint with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let defaults = GeminiConfig::new(api_key).with_model(model);
        Self::from_config(&defaults)
    }

    pub fn from_config(config: &GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model_name.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Points the client at another host (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Endpoint without the key, safe to log.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{API_PATH}/{model}:generateContent",
            self.base_url,
            model = self.model
        )
    }

    async fn send_request(&self, body: &RequestPayload) -> Result<String, ApiError> {
        let url = format!("{}?key={api_key}", self.endpoint(), api_key = self.api_key);

        debug!(
            endpoint = %self.endpoint(),
            turns = body.contents.len(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            // The URL carries the key.
            .map_err(|err| {
                let err = err.without_url();
                ApiError::transport(format!("Gemini API request failed: {err}"), err)
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|err| {
            let err = err.without_url();
            ApiError::transport(format!("Failed to read Gemini response body: {err}"), err)
        })?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), model = %self.model, "Gemini API returned an error status");
            return Err(ApiError::http(status.as_u16(), body_text));
        }

        let text = extract_text_response(&body_text)?;
        info!(model = %self.model, reply_chars = text.chars().count(), "received Gemini reply");
        Ok(text)
    }
}

#[async_trait]
impl ChatBackend for GeminiApiClient {
    async fn send(&self, payload: &RequestPayload) -> Result<String, ApiError> {
        self.send_request(payload).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Option<Vec<PartResponse>>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

/// Pulls `candidates[0].content.parts[0].text` out of a 200 response body.
///
/// Each missing step maps to its own [`SchemaError`] variant, all of which
/// keep the raw body.
pub fn extract_text_response(body: &str) -> Result<String, SchemaError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|err| SchemaError::InvalidJson {
            reason: err.to_string(),
            body: body.to_string(),
        })?;

    let response: GenerateContentResponse =
        serde_json::from_value(value).map_err(|err| SchemaError::Malformed {
            reason: err.to_string(),
            body: body.to_string(),
        })?;

    let candidate = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .ok_or_else(|| SchemaError::NoCandidates {
            body: body.to_string(),
        })?;

    let content = candidate.content.ok_or_else(|| SchemaError::MissingContent {
        body: body.to_string(),
    })?;

    let part = content
        .parts
        .and_then(|parts| parts.into_iter().next())
        .ok_or_else(|| SchemaError::NoParts {
            body: body.to_string(),
        })?;

    part.text.ok_or_else(|| SchemaError::MissingText {
        body: body.to_string(),
    })
}
