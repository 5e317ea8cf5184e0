//! Errors raised while reading a single PDF file.
//!
//! Every variant folds into [`PdfError`] at the backend boundary, so the
//! façade only ever sees core errors.

use folio_core::PdfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// lopdf rejected the file or one of its objects.
    #[error("malformed PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Structure that lopdf accepted but that does not match what a page
    /// or annotation dictionary must contain.
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// A required page attribute is missing from the page and every
    /// `/Parent` above it.
    #[error("/{0} not found on page or its ancestors")]
    MissingInherited(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] PdfError),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Core(e) => e,
            BackendError::Io(e) => PdfError::IoError(e.to_string()),
            other => PdfError::ParseError(other.to_string()),
        }
    }
}
