//! Text extraction from uploaded resume documents.
//!
//! Thin adapters that turn PDF, DOCX, and plain-text bytes into the
//! `(name, text)` pairs the ranking core consumes. Files with unsupported
//! extensions are skipped by callers before extraction - that is a silent
//! skip by design, logged but never an error.
//!
//! - **PDF**: text layer via `pdf-extract`
//! - **DOCX**: text runs of `word/document.xml` via `zip` + `quick-xml`
//! - **TXT**: lossy UTF-8 passthrough

use std::path::Path;

pub mod docx;
pub mod pdf;

/// Supported resume document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    /// Get the display name for this format.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Text => "Plain Text",
        }
    }

    /// Detect the format from a filename extension.
    ///
    /// Returns `None` for unsupported extensions; callers skip those files
    /// before the ranking core ever sees them.
    #[must_use]
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename).extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "txt" | "text" | "md" => Some(DocumentFormat::Text),
            _ => None,
        }
    }
}

/// Errors that can occur during text extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to extract text from {format} document: {message}")]
    ExtractionFailed {
        format: &'static str,
        message: String,
    },
}

/// Extract plain text from document bytes.
///
/// Empty output is valid - a resume with no extractable text simply scores
/// at the bottom of its batch.
///
/// # Errors
///
/// Returns [`ExtractError::ExtractionFailed`] if the bytes cannot be parsed
/// as the given format.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
    match format {
        DocumentFormat::Pdf => pdf::extract_pdf_text(bytes),
        DocumentFormat::Docx => docx::extract_docx_text(bytes),
        DocumentFormat::Text => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            DocumentFormat::from_filename("resume.pdf"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_filename("Resume.DOCX"),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::from_filename("notes.txt"),
            Some(DocumentFormat::Text)
        );
        assert_eq!(DocumentFormat::from_filename("archive.zip"), None);
        assert_eq!(DocumentFormat::from_filename("no_extension"), None);
    }

    #[test]
    fn test_plain_text_passthrough() {
        let text = extract_text(b"Python developer", DocumentFormat::Text).unwrap();
        assert_eq!(text, "Python developer");
    }

    #[test]
    fn test_plain_text_lossy_utf8() {
        let text = extract_text(&[0x50, 0xFF, 0x79], DocumentFormat::Text).unwrap();
        assert!(text.starts_with('P'));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(DocumentFormat::Pdf.display_name(), "PDF");
        assert_eq!(DocumentFormat::Docx.display_name(), "DOCX");
    }
}
