//! Text extraction for uploaded documents.
//!
//! PDFs are decoded with `pdf-extract`, one page at a time in page order;
//! plain text is decoded as strict UTF-8. Each file becomes a block headed by
//! its name so the model can attribute excerpts back to a source file.

use filechat_core::{ExtractionError, FileKind, UploadedFile};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info};

/// Converts upload batches into the aggregated context text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts every file of a batch, in upload order.
    ///
    /// Blocks are `"=== File: {name} ===\n{text}\n"` joined with a newline, so
    /// consecutive blocks are separated by a blank line.
    ///
    /// # Errors
    ///
    /// The first file that fails aborts the whole batch; text already
    /// extracted from earlier files is dropped.
    pub fn extract_batch(&self, files: &[UploadedFile]) -> Result<String, ExtractionError> {
        let mut blocks = Vec::with_capacity(files.len());
        for file in files {
            let text = self.extract_file(file)?;
            blocks.push(format_file_block(&file.name, &text));
        }

        let aggregated = blocks.join("\n");
        info!(
            files = files.len(),
            chars = aggregated.chars().count(),
            "extracted upload batch"
        );
        Ok(aggregated)
    }

    /// Extracts the text of a single file without the header block.
    pub fn extract_file(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        let text = match file.kind {
            FileKind::Pdf => extract_pdf_text(&file.name, &file.bytes)?,
            FileKind::PlainText => String::from_utf8(file.bytes.clone()).map_err(|source| {
                ExtractionError::InvalidUtf8 {
                    name: file.name.clone(),
                    source,
                }
            })?,
        };
        debug!(name = %file.name, kind = ?file.kind, bytes = file.size(), "extracted file");
        Ok(text)
    }
}

/// Wraps one file's text in its header block.
pub fn format_file_block(name: &str, text: &str) -> String {
    format!("=== File: {name} ===\n{text}\n")
}

fn extract_pdf_text(name: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed documents instead of returning Err.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|payload| ExtractionError::Pdf {
        name: name.to_string(),
        message: panic_message(&*payload),
    })?
    .map_err(|e| ExtractionError::Pdf {
        name: name.to_string(),
        message: e.to_string(),
    })?;

    debug!(name, pages = pages.len(), "decoded pdf");
    Ok(join_pages(&pages))
}

/// Concatenates page texts with no separator.
///
/// `pdf-extract` opens every page with a paragraph break; that break is
/// dropped so pages run together and the header line is not followed by a
/// blank line.
fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| page.strip_prefix("\n\n").unwrap_or(page.as_str()))
        .collect()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "PDF decoder panicked".to_string()
    }
}
