//! Uploaded file model.

use serde::{Deserialize, Serialize};

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const TEXT_MIME_TYPE: &str = "text/plain";

/// The two document kinds the upload surface accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Pdf,
    PlainText,
}

impl FileKind {
    /// Maps a declared MIME type to a kind. Anything else is rejected.
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        match mime_type {
            PDF_MIME_TYPE => Some(FileKind::Pdf),
            TEXT_MIME_TYPE => Some(FileKind::PlainText),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FileKind::Pdf => PDF_MIME_TYPE,
            FileKind::PlainText => TEXT_MIME_TYPE,
        }
    }
}

/// A file handed over by the upload surface, held in memory for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original filename, used in the context header
    pub name: String,
    /// Declared kind of the file
    pub kind: FileKind,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, kind: FileKind, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            kind,
            bytes: bytes.into(),
        }
    }

    /// Convenience constructor for a plain-text file.
    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(name, FileKind::PlainText, content.into().into_bytes())
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime_type() {
        assert_eq!(FileKind::from_mime_type("application/pdf"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_mime_type("text/plain"), Some(FileKind::PlainText));
        assert_eq!(FileKind::from_mime_type("image/png"), None);
        assert_eq!(FileKind::Pdf.mime_type(), PDF_MIME_TYPE);
    }

    #[test]
    fn test_text_constructor() {
        let file = UploadedFile::text("notes.txt", "hello");
        assert_eq!(file.kind, FileKind::PlainText);
        assert_eq!(file.bytes, b"hello");
        assert_eq!(file.size(), 5);
    }
}
