//! folio-core: Backend-independent data types for folio documents.
//!
//! This crate provides the foundational types (BBox, PageInfo, OutlineEntry,
//! Annotation, Hyperlink, etc.) and the text search used by folio.
//! It performs no I/O; PDF parsing lives in folio-parse.

pub mod annotation;
pub mod error;
pub mod geometry;
pub mod metadata;
pub mod outline;
pub mod page_info;
pub mod search;

pub use annotation::{Annotation, AnnotationType, Hyperlink, LinkTarget};
pub use error::PdfError;
pub use geometry::{BBox, RenderSize};
pub use metadata::DocumentMetadata;
pub use outline::OutlineEntry;
pub use page_info::{PageInfo, Rotation};
pub use search::{SearchOptions, TextMatch, search_text};
