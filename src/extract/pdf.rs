//! PDF text extraction.

use crate::extract::ExtractError;

/// Extract the text layer from PDF bytes.
///
/// Scanned PDFs without a text layer yield little or no text; that is
/// passed through as-is (no OCR) and the candidate scores accordingly.
///
/// # Errors
///
/// Returns [`ExtractError::ExtractionFailed`] if the bytes are not a
/// parseable PDF.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::ExtractionFailed {
        format: "PDF",
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail() {
        let result = extract_pdf_text(b"definitely not a pdf");
        assert!(result.is_err());
    }
}
