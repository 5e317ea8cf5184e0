//! Loaded PDF files of a document.
//!
//! The store owns the "pdf lock": loading a file happens while holding it,
//! so each file is parsed at most once per document even when several
//! threads fill caches at the same time.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_core::PdfError;
use folio_parse::{LopdfBackend, LopdfDocument, PdfBackend};
use parking_lot::Mutex;

use crate::DocumentOptions;

#[derive(Default)]
pub(crate) struct PdfStore {
    docs: Mutex<HashMap<PathBuf, Arc<LopdfDocument>>>,
}

impl PdfStore {
    /// Return the parsed file at `path`, loading it on first use.
    pub(crate) fn get_or_load(
        &self,
        path: &Path,
        options: &DocumentOptions,
    ) -> Result<Arc<LopdfDocument>, PdfError> {
        let mut docs = self.docs.lock();
        if let Some(doc) = docs.get(path) {
            return Ok(Arc::clone(doc));
        }
        let doc = Arc::new(open_file(path, options)?);
        docs.insert(path.to_path_buf(), Arc::clone(&doc));
        Ok(doc)
    }

    /// Drop every loaded file. Handles still held by callers stay valid.
    pub(crate) fn release(&self) {
        let released = {
            let mut docs = self.docs.lock();
            let n = docs.len();
            docs.clear();
            n
        };
        if released > 0 {
            tracing::debug!(released, "released loaded PDF files");
        }
    }

    pub(crate) fn loaded_count(&self) -> usize {
        self.docs.lock().len()
    }
}

fn open_file(path: &Path, options: &DocumentOptions) -> Result<LopdfDocument, PdfError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PdfError::FileNotFound(path.display().to_string()),
        _ => PdfError::IoError(format!("{}: {e}", path.display())),
    })?;

    if let Some(max_bytes) = options.max_input_bytes {
        if bytes.len() > max_bytes {
            return Err(PdfError::ResourceLimitExceeded {
                limit_name: "max_input_bytes".to_string(),
                limit_value: max_bytes,
                actual_value: bytes.len(),
            });
        }
    }

    let doc = match &options.password {
        Some(password) => LopdfBackend::open_with_password(&bytes, password),
        None => LopdfBackend::open(&bytes),
    }
    .map_err(PdfError::from)?;

    tracing::debug!(
        path = %path.display(),
        pages = LopdfBackend::page_count(&doc),
        "loaded PDF file"
    );
    Ok(doc)
}
