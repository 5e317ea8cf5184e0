//! Full-text search across every page of a document.

use std::num::NonZeroUsize;
use std::sync::Arc;

use folio_core::search::compile_pattern;
use folio_core::{PdfError, SearchOptions, TextMatch, search_text};
use lru::LruCache;
use parking_lot::Mutex;

use crate::Document;

/// Searches the text of a [`Document`].
///
/// Page texts are kept in a least-recently-used cache sized by
/// [`DocumentOptions::text_cache_pages`](crate::DocumentOptions::text_cache_pages),
/// so repeated searches do not extract the same pages again.
pub struct DocumentSearcher {
    texts: Mutex<LruCache<usize, Arc<str>>>,
}

impl DocumentSearcher {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            texts: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Search every page in order.
    ///
    /// Stops once [`SearchOptions::max_results`] matches are found. Page
    /// numbers in the returned matches are logical pages. An empty pattern
    /// matches nothing.
    ///
    /// # Errors
    ///
    /// - [`PdfError::FeatureDisabled`] when search is disabled.
    /// - [`PdfError::Other`] when a regex pattern does not compile.
    /// - Any error from loading the files or extracting text.
    pub fn search(
        &self,
        doc: &Document,
        pattern: &str,
        options: &SearchOptions,
    ) -> Result<Vec<TextMatch>, PdfError> {
        check_search(doc, pattern, options)?;
        let limit = options.max_results.unwrap_or(usize::MAX);
        let mut matches = Vec::new();
        if pattern.is_empty() {
            return Ok(matches);
        }

        for page in 0..doc.page_count()? {
            if matches.len() >= limit {
                break;
            }
            let remaining = SearchOptions {
                max_results: Some(limit - matches.len()),
                ..options.clone()
            };
            let text = self.page_text(doc, page)?;
            matches.extend(search_text(&text, pattern, &remaining, page));
        }

        tracing::debug!(pattern, matches = matches.len(), "searched document");
        Ok(matches)
    }

    /// Search a single logical page.
    pub fn search_page(
        &self,
        doc: &Document,
        page: usize,
        pattern: &str,
        options: &SearchOptions,
    ) -> Result<Vec<TextMatch>, PdfError> {
        check_search(doc, pattern, options)?;
        let text = self.page_text(doc, page)?;
        Ok(search_text(&text, pattern, options, page))
    }

    /// Number of page texts currently cached.
    pub fn cached_text_pages(&self) -> usize {
        self.texts.lock().len()
    }

    pub(crate) fn clear(&self) {
        self.texts.lock().clear();
    }

    fn page_text(&self, doc: &Document, page: usize) -> Result<Arc<str>, PdfError> {
        if let Some(text) = self.texts.lock().get(&page) {
            return Ok(Arc::clone(text));
        }

        let generation = doc.generation();
        let text: Arc<str> = Arc::from(doc.page_text(page)?);
        let mut texts = self.texts.lock();
        if doc.generation() == generation {
            texts.put(page, Arc::clone(&text));
        }
        Ok(text)
    }
}

fn check_search(doc: &Document, pattern: &str, options: &SearchOptions) -> Result<(), PdfError> {
    if !doc.search_enabled() {
        return Err(PdfError::FeatureDisabled("search"));
    }
    if !pattern.is_empty() && compile_pattern(pattern, options).is_none() {
        return Err(PdfError::Other(format!("invalid search pattern: {pattern}")));
    }
    Ok(())
}

impl std::fmt::Debug for DocumentSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSearcher")
            .field("cached_text_pages", &self.cached_text_pages())
            .finish()
    }
}
