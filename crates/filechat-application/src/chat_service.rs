//! Chat use cases.
//!
//! `ChatService` implements the three user-facing actions against an
//! explicit [`Session`]: submit a prompt, upload a file batch, clear the
//! conversation. Failures come back as typed errors; the session is left in
//! a consistent state either way.

use filechat_core::{
    ApiError, ChatBackend, ExtractionError, MessageRole, PayloadError, Session, UploadedFile,
    build_payload,
};
use filechat_infrastructure::{TextExtractor, load_uploaded_files};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Failure of a prompt submission.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Internal error: {0}")]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result of a successful upload batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub file_names: Vec<String>,
    /// Characters in the new aggregated context
    pub char_count: usize,
}

impl UploadSummary {
    pub fn file_count(&self) -> usize {
        self.file_names.len()
    }
}

impl fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} file(s) loaded successfully!", self.file_count())
    }
}

/// Orchestrates extraction, payload assembly and the remote call.
pub struct ChatService {
    /// Remote model that answers prompts
    backend: Arc<dyn ChatBackend>,
    /// Turns upload batches into context text
    extractor: TextExtractor,
}

impl ChatService {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            extractor: TextExtractor::new(),
        }
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    /// Runs one submit/build/send/append cycle.
    ///
    /// The prompt is appended to the log before anything else happens. The
    /// reply is appended only on success, so after a failure the last message
    /// is the unanswered prompt and the user can simply submit again.
    pub async fn submit_prompt(
        &self,
        session: &mut Session,
        prompt: &str,
    ) -> Result<String, ChatError> {
        session.log.append(MessageRole::User, prompt);

        let payload = build_payload(&session.log, &session.context)?;
        info!(
            session_id = %session.id,
            turns = payload.contents.len(),
            has_context = !session.context.is_empty(),
            "submitting prompt"
        );

        match self.backend.send(&payload).await {
            Ok(reply) => {
                session.log.append(MessageRole::Assistant, reply.clone());
                Ok(reply)
            }
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "submission failed");
                Err(e.into())
            }
        }
    }

    /// Replaces the session context with the text of `files`.
    ///
    /// All-or-nothing: if any file fails, the previous context survives.
    pub fn upload_files(
        &self,
        session: &mut Session,
        files: &[UploadedFile],
    ) -> Result<UploadSummary, ExtractionError> {
        let aggregated = self.extractor.extract_batch(files).inspect_err(|e| {
            warn!(session_id = %session.id, file = e.file_name(), error = %e, "upload batch rejected");
        })?;

        let file_names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        session.context.replace(aggregated, file_names.clone());

        let summary = UploadSummary {
            file_names,
            char_count: session.context.char_count(),
        };
        info!(
            session_id = %session.id,
            files = summary.file_count(),
            chars = summary.char_count,
            "context replaced"
        );
        Ok(summary)
    }

    /// Loads files from disk and uploads them as one batch.
    pub async fn upload_paths<P: AsRef<Path>>(
        &self,
        session: &mut Session,
        paths: &[P],
    ) -> Result<UploadSummary, ExtractionError> {
        let files = load_uploaded_files(paths).await?;
        self.upload_files(session, &files)
    }

    /// Empties the conversation. The file context is kept.
    pub fn clear_conversation(&self, session: &mut Session) {
        session.log.clear();
        info!(session_id = %session.id, "conversation cleared");
    }
}
