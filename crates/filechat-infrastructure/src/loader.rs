//! Upload surface: turns file paths into in-memory uploads.
//!
//! The MIME type is inferred from the extension with `mime_guess`; only PDF
//! and plain text are accepted, anything else is rejected here before
//! extraction runs.

use filechat_core::{ExtractionError, FileKind, UploadedFile};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Infers the MIME type from a filename extension using the `mime_guess` library.
fn infer_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

/// Reads one file from disk.
///
/// # Errors
///
/// [`ExtractionError::UnsupportedKind`] for anything but PDF/TXT, and
/// [`ExtractionError::Read`] if the file cannot be read.
pub async fn load_uploaded_file(path: &Path) -> Result<UploadedFile, ExtractionError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mime_type = infer_mime_type(path);
    let kind = FileKind::from_mime_type(&mime_type).ok_or_else(|| {
        ExtractionError::UnsupportedKind {
            name: name.clone(),
            mime_type: mime_type.clone(),
        }
    })?;

    let bytes = fs::read(path).await.map_err(|source| ExtractionError::Read {
        name: name.clone(),
        source,
    })?;

    debug!(name = %name, mime_type = %mime_type, bytes = bytes.len(), "loaded upload");
    Ok(UploadedFile::new(name, kind, bytes))
}

/// Reads a whole batch, in the given order. Stops at the first failure.
pub async fn load_uploaded_files<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Vec<UploadedFile>, ExtractionError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(load_uploaded_file(path.as_ref()).await?);
    }
    Ok(files)
}
