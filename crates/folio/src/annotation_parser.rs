//! Per-page annotations and links of a document.

use std::collections::HashMap;
use std::sync::Arc;

use folio_core::{Annotation, Hyperlink, PdfError};
use folio_parse::{LopdfBackend, LopdfDocument, LopdfPage, PdfBackend};
use parking_lot::Mutex;

use crate::Document;

type PageCache<T> = Mutex<HashMap<usize, Arc<[T]>>>;

/// Parses and caches the annotations of a [`Document`], page by page.
#[derive(Debug, Default)]
pub struct AnnotationParser {
    annotations: PageCache<Annotation>,
    hyperlinks: PageCache<Hyperlink>,
}

impl AnnotationParser {
    /// All annotations on logical `page` that have a subtype and a rect.
    ///
    /// Returns an empty list when annotations are disabled.
    pub fn annotations(&self, doc: &Document, page: usize) -> Result<Arc<[Annotation]>, PdfError> {
        cached(&self.annotations, doc, page, |pdf, pdf_page, _| {
            LopdfBackend::page_annotations(pdf, pdf_page).map_err(PdfError::from)
        })
    }

    /// Link annotations on logical `page` with a resolved target.
    ///
    /// Page targets are logical pages of the combined document.
    /// Returns an empty list when annotations are disabled.
    pub fn hyperlinks(&self, doc: &Document, page: usize) -> Result<Arc<[Hyperlink]>, PdfError> {
        cached(&self.hyperlinks, doc, page, |pdf, pdf_page, offset| {
            let links = LopdfBackend::page_hyperlinks(pdf, pdf_page).map_err(PdfError::from)?;
            Ok(links
                .into_iter()
                .map(|link| Hyperlink {
                    bbox: link.bbox,
                    target: link.target.shifted(offset),
                })
                .collect())
        })
    }

    /// Number of pages with cached annotations.
    pub fn cached_pages(&self) -> usize {
        self.annotations.lock().len()
    }

    pub(crate) fn clear(&self) {
        self.annotations.lock().clear();
        self.hyperlinks.lock().clear();
    }
}

/// Look up `page` in `cache`, computing it with `parse` on a miss.
///
/// `parse` receives the file, the page within it, and the first logical
/// page of that file.
fn cached<T>(
    cache: &PageCache<T>,
    doc: &Document,
    page: usize,
    parse: impl FnOnce(&LopdfDocument, &LopdfPage, usize) -> Result<Vec<T>, PdfError>,
) -> Result<Arc<[T]>, PdfError> {
    let (file_index, local) = doc.locate(page)?;
    if !doc.annotations_enabled() {
        return Ok(Vec::new().into());
    }
    if let Some(items) = cache.lock().get(&page) {
        return Ok(Arc::clone(items));
    }

    let generation = doc.generation();
    let pdf = doc.load_file(file_index)?;
    let pdf_page = LopdfBackend::get_page(&pdf, local).map_err(PdfError::from)?;
    let items: Arc<[T]> = parse(&pdf, &pdf_page, page - local)?.into();

    let mut cache = cache.lock();
    if doc.generation() == generation {
        cache.insert(page, Arc::clone(&items));
    }
    Ok(items)
}
