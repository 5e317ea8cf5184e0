//! Error types for folio.
//!
//! Provides [`PdfError`] for fatal errors that stop the current operation.
//! Values that may legitimately be absent (a thumbnail, a CropBox, an
//! outline) are modelled as `Option`/empty collections, not errors.

use std::fmt;

/// Fatal error types for PDF document access.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error reading PDF data.
    IoError(String),
    /// A zero-based page index beyond the end of the document.
    PageOutOfRange {
        /// The requested page.
        page: usize,
        /// The number of pages in the document.
        page_count: usize,
    },
    /// A constituent file of the document does not exist.
    FileNotFound(String),
    /// The PDF is encrypted and requires a password to open.
    PasswordRequired,
    /// The supplied password is incorrect for this encrypted PDF.
    InvalidPassword,
    /// The requested feature (search, outline, annotations) is disabled
    /// on this document.
    FeatureDisabled(&'static str),
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit (e.g. `max_input_bytes`).
        limit_name: String,
        /// The configured limit.
        limit_value: usize,
        /// The value that exceeded it.
        actual_value: usize,
    },
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PdfError::IoError(msg) => write!(f, "I/O error: {msg}"),
            PdfError::PageOutOfRange { page, page_count } => {
                write!(f, "page index {page} out of range (0..{page_count})")
            }
            PdfError::FileNotFound(path) => write!(f, "file not found: {path}"),
            PdfError::PasswordRequired => write!(f, "PDF is encrypted and requires a password"),
            PdfError::InvalidPassword => write!(f, "the supplied password is incorrect"),
            PdfError::FeatureDisabled(feature) => {
                write!(f, "{feature} is disabled for this document")
            }
            PdfError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit {limit_value}, got {actual_value})"
            ),
            PdfError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<std::io::Error> for PdfError {
    fn from(err: std::io::Error) -> Self {
        PdfError::IoError(err.to_string())
    }
}
