//! folio: a logical PDF document spanning one or more files.
//!
//! This is the public API facade crate for folio. It re-exports types from
//! folio-core and uses folio-parse to read the constituent files.
//!
//! # Architecture
//!
//! - **folio-core**: Backend-independent data types and text search
//! - **folio-parse**: PDF parsing through the lopdf backend
//! - **folio** (this crate): [`Document`], its caches, hooks and collaborators
//!
//! # Example
//!
//! ```ignore
//! use folio::{Document, SearchOptions};
//!
//! let doc = Document::from_files("/books/atlas", ["part1.pdf", "part2.pdf"]);
//! for page in 0..doc.page_count()? {
//!     let info = doc.page_info(page)?;
//!     println!("{page}: {:?} rotated {}", info.rect, info.rotation.degrees());
//! }
//! let hits = doc.searcher().search(&doc, "equator", &SearchOptions::default())?;
//! ```

mod annotation_parser;
mod document;
mod hooks;
mod options;
mod outline_parser;
mod page_map;
mod searcher;
mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use folio_core;
pub use folio_parse;

pub use annotation_parser::AnnotationParser;
pub use document::Document;
pub use folio_core::{
    Annotation, AnnotationType, BBox, DocumentMetadata, Hyperlink, LinkTarget, OutlineEntry,
    PageInfo, PdfError, RenderSize, Rotation, SearchOptions, TextMatch,
};
pub use hooks::{Color, DocumentHooks, DrawOp, OverlayCanvas, OverlayRequest, RecordingCanvas};
pub use options::DocumentOptions;
pub use outline_parser::OutlineParser;
pub use searcher::DocumentSearcher;
