//! folio-parse: PDF parsing backend for folio documents.
//!
//! Provides the [`PdfBackend`] abstraction, the lopdf-based default
//! implementation, and page geometry normalization. Depends on folio-core
//! for shared data types.

pub mod backend;
pub mod error;
pub mod lopdf_backend;
pub mod page_geometry;

pub use backend::PdfBackend;
pub use error::BackendError;
pub use folio_core;
pub use lopdf_backend::{LopdfBackend, LopdfDocument, LopdfPage};
pub use page_geometry::PageGeometry;
