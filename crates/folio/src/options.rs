//! Configuration for a [`Document`](crate::Document).

/// Options controlling how a document loads and caches its files.
///
/// # Example
///
/// ```
/// use folio::DocumentOptions;
///
/// let options = DocumentOptions {
///     search_enabled: false,
///     text_cache_pages: 16,
///     ..DocumentOptions::default()
/// };
/// assert!(options.outline_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Whether full-text search is available (default: `true`).
    pub search_enabled: bool,
    /// Whether the outline is parsed (default: `true`).
    pub outline_enabled: bool,
    /// Whether annotations and links are parsed (default: `true`).
    pub annotations_enabled: bool,
    /// Treat every page as having the first page's geometry (default: `false`).
    pub aspect_ratio_equal: bool,
    /// Password applied to every encrypted file (default: none).
    pub password: Option<String>,
    /// Number of page texts kept by the searcher (default: 64).
    pub text_cache_pages: usize,
    /// Reject files larger than this many bytes (default: no limit).
    pub max_input_bytes: Option<usize>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            search_enabled: true,
            outline_enabled: true,
            annotations_enabled: true,
            aspect_ratio_equal: false,
            password: None,
            text_cache_pages: 64,
            max_input_bytes: None,
        }
    }
}
