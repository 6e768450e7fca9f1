//! Request payload assembly for the Gemini `generateContent` endpoint.
//!
//! The payload is rebuilt from scratch on every submission. Uploaded file
//! text is not sent as a separate system field: it is folded into the first
//! user turn together with a short instruction, and the rest of the history
//! follows unchanged.

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::session::{ContextStore, ConversationLog, MessageRole};

/// Sampling temperature sent with every request.
pub const TEMPERATURE: f64 = 0.7;
/// Upper bound on reply length sent with every request.
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

const BASE_INSTRUCTION: &str = "You are a helpful assistant.";
const CONTEXT_INSTRUCTION: &str =
    "You are a helpful assistant. Use the following file content as context for the conversation:";

/// Body of a `generateContent` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

/// One turn on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: WireRole,
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: WireRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Role names understood by the API. There is no third value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    User,
    Model,
}

impl From<MessageRole> for WireRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => WireRole::User,
            MessageRole::Assistant => WireRole::Model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// Instruction text for the given context.
pub fn system_instruction(context: &ContextStore) -> String {
    if context.is_empty() {
        BASE_INSTRUCTION.to_string()
    } else {
        format!("{CONTEXT_INSTRUCTION}\n\n{}", context.text())
    }
}

/// Builds the request body for the current session state.
///
/// With file context, the first logged message is merged with the
/// instruction into one user turn and is not emitted again. Without context
/// the log is passed through as-is. An empty log yields empty `contents`.
///
/// Reads but never mutates its inputs.
///
/// # Errors
///
/// [`PayloadError::FirstMessageNotUser`] when context is present and the log
/// starts with an assistant turn.
pub fn build_payload(
    log: &ConversationLog,
    context: &ContextStore,
) -> Result<RequestPayload, PayloadError> {
    let messages = log.all();
    let mut contents = Vec::with_capacity(messages.len());

    let mut start_index = 0;
    if let Some(first) = messages.first().filter(|_| !context.is_empty()) {
        if first.role != MessageRole::User {
            return Err(PayloadError::FirstMessageNotUser { role: first.role });
        }
        let instruction = system_instruction(context);
        contents.push(Content::text(
            WireRole::User,
            format!("{instruction}\n\nUser: {}", first.content),
        ));
        start_index = 1;
    }

    contents.extend(
        messages[start_index..]
            .iter()
            .map(|message| Content::text(message.role.into(), message.content.clone())),
    );

    Ok(RequestPayload {
        contents,
        generation_config: GenerationConfig::default(),
    })
}
