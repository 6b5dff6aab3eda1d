//! Centralized validation and helper functions for uploaded documents.

use crate::extract::DocumentFormat;

/// Security-related constants for input validation
pub const MAX_FILENAME_LENGTH: usize = 255;
pub const MIN_FILE_CONTENT_SIZE: usize = 1;

/// Security validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename: contains path traversal or invalid characters")]
    InvalidFilename,
    #[error("Empty filename provided")]
    EmptyFilename,
    #[error("File content appears malformed or invalid")]
    InvalidFileContent,
    #[error("File format validation failed")]
    FormatValidationFailed,
}

/// Secure filename validation to prevent directory traversal and other attacks
///
/// Validates and sanitizes filenames by:
/// - Checking length limits
/// - Preventing directory traversal (../, ..\\)
/// - Removing potentially dangerous characters
/// - Ensuring filename is not empty after sanitization
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` if the filename is empty,
/// `ValidationError::FilenameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidFilename` if it contains invalid characters.
pub fn validate_filename(filename: &str) -> Result<String, ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    // Prevent directory traversal attacks
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ValidationError::InvalidFilename);
    }

    // Check for null bytes and other dangerous characters
    if filename.contains('\0') || filename.chars().any(|c| ('\x01'..='\x1F').contains(&c)) {
        return Err(ValidationError::InvalidFilename);
    }

    // Sanitize filename by keeping only safe characters
    let sanitized = filename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-' || *c == '_' || *c == ' ')
        .collect::<String>();

    if sanitized.trim().is_empty() {
        return Err(ValidationError::InvalidFilename);
    }

    // Prevent hidden files (starting with .) unless it's a known extension
    if sanitized.starts_with('.') && DocumentFormat::from_filename(&sanitized).is_none() {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(sanitized)
}

/// Validate file content using magic numbers for known binary formats
///
/// Performs format validation by checking file signatures to prevent format
/// confusion attacks (e.g. an executable renamed to .pdf).
#[must_use]
pub fn validate_file_format(content: &[u8], expected_format: DocumentFormat) -> bool {
    if content.is_empty() {
        return false;
    }

    match expected_format {
        DocumentFormat::Pdf => {
            // PDF files start with "%PDF-"
            content.len() >= 5 && content.starts_with(b"%PDF-")
        }
        DocumentFormat::Docx => {
            // DOCX files are ZIP archives: local file header magic
            content.len() >= 4 && content.starts_with(b"PK\x03\x04")
        }
        DocumentFormat::Text => {
            // Text files: bounded fraction of non-printable bytes
            let non_printable_count = content
                .iter()
                .filter(|&&b| b < 9 || (b > 13 && b < 32))
                .count();
            content.len() < 100 || non_printable_count <= content.len() / 20
        }
    }
}

/// Comprehensive validation of an uploaded document.
///
/// Validates the filename (when present), minimum content size, and the
/// format magic number. Returns the sanitized filename.
///
/// # Errors
///
/// Returns the specific [`ValidationError`] for the first failed check.
pub fn validate_upload(
    filename: Option<&str>,
    content: &[u8],
    format: DocumentFormat,
) -> Result<Option<String>, ValidationError> {
    let sanitized = match filename {
        Some(name) => Some(validate_filename(name)?),
        None => None,
    };

    if content.len() < MIN_FILE_CONTENT_SIZE {
        return Err(ValidationError::InvalidFileContent);
    }

    if !validate_file_format(content, format) {
        return Err(ValidationError::FormatValidationFailed);
    }

    Ok(sanitized)
}
