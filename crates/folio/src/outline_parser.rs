//! The combined outline of a multi-file document.

use std::sync::Arc;

use folio_core::{OutlineEntry, PdfError};
use folio_parse::{LopdfBackend, PdfBackend};
use parking_lot::Mutex;

use crate::Document;

/// Parses and caches the outline (table of contents) of a [`Document`].
#[derive(Debug, Default)]
pub struct OutlineParser {
    outline: Mutex<Option<Arc<[OutlineEntry]>>>,
}

impl OutlineParser {
    /// The outline of every file, concatenated in file order.
    ///
    /// Destination pages are logical pages: an entry pointing at page 2 of
    /// the second file reports `first page of that file + 2`. The result is
    /// parsed once and reused until the document cache is cleared. Returns
    /// an empty outline when outlines are disabled.
    pub fn outline(&self, doc: &Document) -> Result<Arc<[OutlineEntry]>, PdfError> {
        if !doc.outline_enabled() {
            return Ok(Vec::new().into());
        }
        if let Some(outline) = self.outline.lock().as_ref() {
            return Ok(Arc::clone(outline));
        }

        let generation = doc.generation();
        let map = doc.page_map()?;
        let mut entries = Vec::new();
        for file_index in 0..doc.files().len() {
            let pdf = doc.load_file(file_index)?;
            let offset = map.first_page(file_index);
            let file_outline = LopdfBackend::document_outline(&pdf).map_err(PdfError::from)?;
            entries.extend(file_outline.iter().map(|entry| entry.shifted(offset)));
        }
        tracing::debug!(entries = entries.len(), "parsed document outline");

        let outline: Arc<[OutlineEntry]> = entries.into();
        let mut slot = self.outline.lock();
        if doc.generation() == generation {
            *slot = Some(Arc::clone(&outline));
        }
        Ok(outline)
    }

    /// Whether a parsed outline is cached.
    pub fn is_cached(&self) -> bool {
        self.outline.lock().is_some()
    }

    pub(crate) fn clear(&self) {
        *self.outline.lock() = None;
    }
}
