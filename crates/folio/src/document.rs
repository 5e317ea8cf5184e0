//! The logical [`Document`] spanning one or more PDF files.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;

use folio_core::{BBox, DocumentMetadata, PageInfo, PdfError, RenderSize, Rotation};
use folio_parse::{LopdfBackend, LopdfDocument, PdfBackend};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::hooks::{DocumentHooks, NoHooks, OverlayCanvas, OverlayRequest};
use crate::page_map::PageMap;
use crate::store::PdfStore;
use crate::{AnnotationParser, DocumentOptions, DocumentSearcher, OutlineParser};

/// A single logical PDF document made of one or more physical files.
///
/// Files are resolved under a common base path and concatenated in order:
/// logical page 0 is the first page of the first file, and the pages of
/// each following file continue the numbering. Every page accessor is
/// zero-based and fails with [`PdfError::PageOutOfRange`] past the end.
///
/// Nothing is read at construction. Files are loaded on first use and kept
/// until [`clear_cache`](Self::clear_cache); page geometry is computed once
/// per page and cached. A `Document` is `Send + Sync`, so the caches can be
/// filled from a background thread while other threads query it.
///
/// # Example
///
/// ```ignore
/// use folio::Document;
///
/// let doc = Document::from_files("/books/atlas", ["part1.pdf", "part2.pdf"]);
/// let pages = doc.page_count()?;
/// let file = doc.path_for_page(pages - 1)?;
/// let local = doc.page_number_for_page(pages - 1)?;
/// ```
pub struct Document {
    base_path: Option<PathBuf>,
    files: Vec<PathBuf>,
    title: Option<String>,
    uid: Option<String>,
    displayed: bool,
    options: DocumentOptions,
    hooks: Arc<dyn DocumentHooks>,
    page_map: RwLock<Option<Arc<PageMap>>>,
    page_infos: RwLock<HashMap<usize, PageInfo>>,
    /// Bumped by `clear_cache`; values computed under an older generation
    /// are not cached.
    generation: AtomicU64,
    store: PdfStore,
    searcher: DocumentSearcher,
    outline_parser: OutlineParser,
    annotation_parser: AnnotationParser,
}

impl Document {
    /// An empty document with no base path and no files.
    pub fn new() -> Self {
        Self::from_parts(None, Vec::new())
    }

    /// A document backed by the single file at `path`.
    ///
    /// The base path is the file's parent directory.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let base = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf);
        match (base, path.file_name()) {
            (Some(base), Some(name)) => Self::from_parts(Some(base), vec![PathBuf::from(name)]),
            _ => Self::from_parts(None, vec![path.to_path_buf()]),
        }
    }

    /// A document made of `files`, in order, resolved relative to `base_path`.
    ///
    /// Absolute entries in `files` are used as-is.
    pub fn from_files<I, P>(base_path: impl Into<PathBuf>, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::from_parts(
            Some(base_path.into()),
            files.into_iter().map(Into::into).collect(),
        )
    }

    fn from_parts(base_path: Option<PathBuf>, files: Vec<PathBuf>) -> Self {
        let options = DocumentOptions::default();
        Self {
            base_path,
            files,
            title: None,
            uid: None,
            displayed: false,
            searcher: DocumentSearcher::new(options.text_cache_pages),
            options,
            hooks: Arc::new(NoHooks),
            page_map: RwLock::new(None),
            page_infos: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
            store: PdfStore::default(),
            outline_parser: OutlineParser::default(),
            annotation_parser: AnnotationParser::default(),
        }
    }

    /// Replace the document options.
    pub fn with_options(mut self, options: DocumentOptions) -> Self {
        self.searcher = DocumentSearcher::new(options.text_cache_pages);
        self.options = options;
        self.clear_cache();
        self
    }

    /// Attach host hooks.
    pub fn with_hooks(mut self, hooks: Arc<dyn DocumentHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    // --- properties ---

    /// Display title. Defaults to the stem of the first file name.
    pub fn title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        self.files
            .first()
            .and_then(|file| file.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Override the title derived from the first file name.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Stable identifier of the document.
    ///
    /// Defaults to the hex SHA-256 digest of the base path and file list,
    /// so the same set of files yields the same uid across runs.
    pub fn uid(&self) -> String {
        match &self.uid {
            Some(uid) => uid.clone(),
            None => self.default_uid(),
        }
    }

    /// Override the computed uid.
    pub fn set_uid(&mut self, uid: impl Into<String>) {
        self.uid = Some(uid.into());
    }

    fn default_uid(&self) -> String {
        let mut hasher = Sha256::new();
        if let Some(base) = &self.base_path {
            hasher.update(base.to_string_lossy().as_bytes());
        }
        hasher.update([0u8]);
        for file in &self.files {
            hasher.update(file.to_string_lossy().as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }

    /// Directory relative file names are resolved against.
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Change the base path. Clears every cache.
    pub fn set_base_path(&mut self, base_path: Option<PathBuf>) {
        self.base_path = base_path;
        self.clear_cache();
    }

    /// File names as given, relative to the base path unless absolute.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Replace the file list. Clears every cache.
    pub fn set_files<I, P>(&mut self, files: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self.clear_cache();
    }

    /// Resolved path of every file, in order.
    pub fn file_paths(&self) -> Vec<PathBuf> {
        (0..self.files.len())
            .map(|index| self.resolved_path(index))
            .collect()
    }

    /// Whether every page reports the first page's geometry.
    pub fn aspect_ratio_equal(&self) -> bool {
        self.options.aspect_ratio_equal
    }

    /// When set, every page reports the first page's rect and rotation.
    /// Clears cached geometry.
    pub fn set_aspect_ratio_equal(&mut self, equal: bool) {
        if self.options.aspect_ratio_equal != equal {
            self.options.aspect_ratio_equal = equal;
            self.clear_page_infos();
        }
    }

    /// Whether text search is available.
    pub fn search_enabled(&self) -> bool {
        self.options.search_enabled
    }

    /// Enable or disable text search. Clears cached search text.
    pub fn set_search_enabled(&mut self, enabled: bool) {
        self.options.search_enabled = enabled;
        self.searcher.clear();
    }

    /// Whether outline parsing is available.
    pub fn outline_enabled(&self) -> bool {
        self.options.outline_enabled
    }

    /// Enable or disable outline parsing. Clears the cached outline.
    pub fn set_outline_enabled(&mut self, enabled: bool) {
        self.options.outline_enabled = enabled;
        self.outline_parser.clear();
    }

    /// Whether annotation parsing is available.
    pub fn annotations_enabled(&self) -> bool {
        self.options.annotations_enabled
    }

    /// Enable or disable annotation parsing. Clears cached annotations.
    pub fn set_annotations_enabled(&mut self, enabled: bool) {
        self.options.annotations_enabled = enabled;
        self.annotation_parser.clear();
    }

    /// Whether a host is currently showing this document.
    pub fn displayed(&self) -> bool {
        self.displayed
    }

    /// Mark the document as shown or hidden.
    ///
    /// Hiding a displayed document releases its loaded files; cached page
    /// geometry is kept.
    pub fn set_displayed(&mut self, displayed: bool) {
        if self.displayed && !displayed {
            self.store.release();
        }
        self.displayed = displayed;
    }

    /// Current feature switches and password.
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Text search over this document's pages.
    pub fn searcher(&self) -> &DocumentSearcher {
        &self.searcher
    }

    /// Outline (bookmark) reader for this document.
    pub fn outline_parser(&self) -> &OutlineParser {
        &self.outline_parser
    }

    /// Per-page annotation and hyperlink reader.
    pub fn annotation_parser(&self) -> &AnnotationParser {
        &self.annotation_parser
    }

    /// Metadata from the first file's `/Info` dictionary.
    pub fn metadata(&self) -> Result<DocumentMetadata, PdfError> {
        if self.files.is_empty() {
            return Ok(DocumentMetadata::default());
        }
        let pdf = self.load_file(0)?;
        LopdfBackend::document_metadata(&pdf).map_err(PdfError::from)
    }

    // --- page mapping ---

    /// Total number of pages across all files.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::FileNotFound`] or a parse error if any file
    /// cannot be loaded.
    pub fn page_count(&self) -> Result<usize, PdfError> {
        Ok(self.page_map()?.total())
    }

    /// Page count of every file, in file order.
    pub fn file_page_counts(&self) -> Result<Vec<usize>, PdfError> {
        Ok(self.page_map()?.counts().to_vec())
    }

    /// Path of the file containing logical `page`.
    pub fn path_for_page(&self, page: usize) -> Result<PathBuf, PdfError> {
        let (file_index, _) = self.locate(page)?;
        Ok(self.resolved_path(file_index))
    }

    /// Zero-based page within its own file for logical `page`.
    pub fn page_number_for_page(&self, page: usize) -> Result<usize, PdfError> {
        Ok(self.locate(page)?.1)
    }

    /// Index into [`files`](Self::files) of the file containing `page`.
    pub fn file_index_for_page(&self, page: usize) -> Result<usize, PdfError> {
        Ok(self.locate(page)?.0)
    }

    pub(crate) fn locate(&self, page: usize) -> Result<(usize, usize), PdfError> {
        self.page_map()?.locate(page)
    }

    pub(crate) fn page_map(&self) -> Result<Arc<PageMap>, PdfError> {
        if let Some(map) = self.page_map.read().as_ref() {
            return Ok(Arc::clone(map));
        }

        let generation = self.generation();
        let counts = (0..self.files.len())
            .map(|index| Ok(LopdfBackend::page_count(&*self.load_file(index)?)))
            .collect::<Result<Vec<_>, PdfError>>()?;
        let map = Arc::new(PageMap::new(counts));
        tracing::debug!(files = self.files.len(), pages = map.total(), "computed page map");

        let mut slot = self.page_map.write();
        if self.generation() == generation {
            *slot = Some(Arc::clone(&map));
        }
        Ok(map)
    }

    pub(crate) fn load_file(&self, file_index: usize) -> Result<Arc<LopdfDocument>, PdfError> {
        self.store
            .get_or_load(&self.resolved_path(file_index), &self.options)
    }

    fn resolved_path(&self, file_index: usize) -> PathBuf {
        let file = &self.files[file_index];
        match &self.base_path {
            Some(base) if !file.is_absolute() => base.join(file),
            _ => file.clone(),
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    // --- geometry cache ---

    /// Geometry of logical `page`, computed on first access and cached.
    pub fn page_info(&self, page: usize) -> Result<PageInfo, PdfError> {
        if let Some(info) = self.page_infos.read().get(&page) {
            return Ok(*info);
        }

        let generation = self.generation();
        let info = if self.options.aspect_ratio_equal && page != 0 {
            self.locate(page)?;
            self.page_info(0)?.for_page(page)
        } else {
            self.compute_page_info(page)?
        };

        let mut infos = self.page_infos.write();
        if self.generation() == generation {
            infos.insert(page, info);
        }
        Ok(info)
    }

    fn compute_page_info(&self, page: usize) -> Result<PageInfo, PdfError> {
        let (file_index, local) = self.locate(page)?;
        let pdf = self.load_file(file_index)?;
        let pdf_page = LopdfBackend::get_page(&pdf, local).map_err(PdfError::from)?;
        let geometry = LopdfBackend::page_geometry(&pdf, &pdf_page).map_err(PdfError::from)?;
        Ok(geometry.page_info(page))
    }

    /// Visible page rectangle (CropBox clipped to MediaBox), unrotated.
    pub fn rect_box_for_page(&self, page: usize) -> Result<BBox, PdfError> {
        Ok(self.page_info(page)?.rect)
    }

    /// Effective `/Rotate` of logical `page`.
    pub fn rotation_for_page(&self, page: usize) -> Result<Rotation, PdfError> {
        Ok(self.page_info(page)?.rotation)
    }

    /// Number of pages whose geometry is currently cached.
    pub fn cached_page_count(&self) -> usize {
        self.page_infos.read().len()
    }

    /// Number of files currently loaded.
    pub fn loaded_file_count(&self) -> usize {
        self.store.loaded_count()
    }

    /// Drop every cache: page geometry, per-file page counts, loaded files,
    /// outline, annotations and page texts. The next query recomputes.
    pub fn clear_cache(&self) {
        {
            let mut infos = self.page_infos.write();
            let mut map = self.page_map.write();
            self.generation.fetch_add(1, Ordering::AcqRel);
            infos.clear();
            *map = None;
        }
        self.store.release();
        self.searcher.clear();
        self.outline_parser.clear();
        self.annotation_parser.clear();
        tracing::debug!(uid = %self.uid(), "cleared document caches");
    }

    fn clear_page_infos(&self) {
        let mut infos = self.page_infos.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        infos.clear();
    }

    /// Compute and cache the geometry of every page, and the outline when
    /// enabled.
    ///
    /// This loads every file, so call it off the main thread (see
    /// [`fill_cache_in_background`](Self::fill_cache_in_background)).
    /// With the `parallel` feature pages are processed with rayon.
    pub fn fill_cache(&self) -> Result<(), PdfError> {
        let count = self.page_count()?;

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..count)
                .into_par_iter()
                .try_for_each(|page| self.page_info(page).map(|_| ()))?;
        }
        #[cfg(not(feature = "parallel"))]
        {
            for page in 0..count {
                self.page_info(page)?;
            }
        }

        if self.options.outline_enabled {
            self.outline_parser.outline(self)?;
        }
        tracing::debug!(pages = count, "filled page cache");
        Ok(())
    }

    /// Run [`fill_cache`](Self::fill_cache) on a new thread.
    pub fn fill_cache_in_background(doc: Arc<Self>) -> JoinHandle<Result<(), PdfError>> {
        std::thread::spawn(move || {
            let result = doc.fill_cache();
            if let Err(err) = &result {
                tracing::warn!(%err, "background cache fill failed");
            }
            result
        })
    }

    // --- hooks ---

    /// Thumbnail path supplied by the hooks for `page`, if any.
    pub fn thumbnail_path_for_page(&self, page: usize) -> Result<Option<PathBuf>, PdfError> {
        self.locate(page)?;
        Ok(self.hooks.thumbnail_path(self, page))
    }

    /// Whether the hooks want an overlay for renditions of `size`.
    pub fn should_draw_overlay(&self, size: RenderSize) -> bool {
        self.hooks.should_draw_overlay(self, size)
    }

    /// Let the hooks draw an overlay onto `canvas`.
    ///
    /// Returns `Ok(false)` without calling the drawing hook when
    /// [`should_draw_overlay`](DocumentHooks::should_draw_overlay) declines.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError::PageOutOfRange`] when `request.page` is not a
    /// page of this document.
    pub fn draw_overlay(
        &self,
        canvas: &mut dyn OverlayCanvas,
        request: &OverlayRequest,
    ) -> Result<bool, PdfError> {
        self.locate(request.page)?;
        if !self.hooks.should_draw_overlay(self, request.size) {
            return Ok(false);
        }
        self.hooks.draw_overlay(self, canvas, request);
        Ok(true)
    }

    /// Text of logical `page`.
    ///
    /// Uses [`DocumentHooks::page_content`] when it returns text, otherwise
    /// extracts the text from the file.
    pub fn page_text(&self, page: usize) -> Result<String, PdfError> {
        let (file_index, local) = self.locate(page)?;
        if let Some(text) = self.hooks.page_content(self, page) {
            return Ok(text);
        }
        tracing::trace!(page, "extracting page text");
        let pdf = self.load_file(file_index)?;
        let pdf_page = LopdfBackend::get_page(&pdf, local).map_err(PdfError::from)?;
        LopdfBackend::page_text(&pdf, &pdf_page).map_err(PdfError::from)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("base_path", &self.base_path)
            .field("files", &self.files)
            .field("title", &self.title)
            .field("displayed", &self.displayed)
            .field("options", &self.options)
            .field("cached_pages", &self.cached_page_count())
            .finish_non_exhaustive()
    }
}
