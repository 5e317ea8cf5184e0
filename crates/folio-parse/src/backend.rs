//! PDF parsing backend trait.
//!
//! Defines the [`PdfBackend`] trait that abstracts the PDF operations a
//! folio document needs from a single physical file.

use folio_core::{Annotation, BBox, DocumentMetadata, Hyperlink, OutlineEntry, PdfError};

use crate::page_geometry::PageGeometry;

/// Trait abstracting PDF parsing operations on one physical file.
///
/// Page indices are zero-based and local to the file. Mapping logical
/// pages of a multi-file document onto files happens in the `folio` crate.
///
/// # Usage
///
/// ```ignore
/// let doc = MyBackend::open(pdf_bytes)?;
/// let page = MyBackend::get_page(&doc, 0)?;
/// let geometry = MyBackend::page_geometry(&doc, &page)?;
/// ```
pub trait PdfBackend {
    /// The parsed PDF document type.
    type Document;

    /// A reference to a single page within a document.
    type Page;

    /// Backend-specific error type, convertible to [`PdfError`].
    type Error: std::error::Error + Into<PdfError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid PDF, or if the PDF is
    /// encrypted (use [`PdfBackend::open_with_password`]).
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Parse and decrypt PDF bytes with a user or owner password. The
    /// password is ignored for unencrypted documents.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::InvalidPassword`] (through `Self::Error`) when the
    /// password opens neither the user nor the owner access.
    fn open_with_password(bytes: &[u8], password: &str) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Access a page by 0-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range.
    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error>;

    /// Get the MediaBox for a page, inherited through the page tree.
    fn page_media_box(doc: &Self::Document, page: &Self::Page) -> Result<BBox, Self::Error>;

    /// Get the CropBox for a page, if set on the page or an ancestor.
    fn page_crop_box(doc: &Self::Document, page: &Self::Page) -> Result<Option<BBox>, Self::Error>;

    /// Get the raw `/Rotate` value (inherited, default 0).
    fn page_rotate(doc: &Self::Document, page: &Self::Page) -> Result<i64, Self::Error>;

    /// Combine MediaBox, CropBox and rotation into a [`PageGeometry`].
    fn page_geometry(doc: &Self::Document, page: &Self::Page) -> Result<PageGeometry, Self::Error> {
        let media_box = Self::page_media_box(doc, page)?;
        let crop_box = Self::page_crop_box(doc, page)?;
        let rotation = Self::page_rotate(doc, page)?;
        Ok(PageGeometry::new(media_box, crop_box, rotation))
    }

    /// Extract document-level metadata from the PDF /Info dictionary.
    fn document_metadata(doc: &Self::Document) -> Result<DocumentMetadata, Self::Error>;

    /// Extract the flattened outline. Page numbers are local to this file.
    fn document_outline(doc: &Self::Document) -> Result<Vec<OutlineEntry>, Self::Error>;

    /// Extract the annotations of a page.
    fn page_annotations(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<Vec<Annotation>, Self::Error>;

    /// Extract the resolved Link annotations of a page.
    /// Page targets are local to this file.
    fn page_hyperlinks(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<Vec<Hyperlink>, Self::Error>;

    /// Extract the plain text of a page.
    fn page_text(doc: &Self::Document, page: &Self::Page) -> Result<String, Self::Error>;
}
