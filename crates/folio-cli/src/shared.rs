use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use folio::{BBox, Document, DocumentOptions};

use crate::cli::DocumentArgs;
use crate::page_range::parse_page_range;

/// Print `err` to stderr and return the process exit code.
pub fn fail(err: impl Display) -> i32 {
    eprintln!("Error: {err}");
    1
}

/// Build the document described by the command-line arguments.
///
/// Every file is opened up front so missing or unreadable files are
/// reported before any output is written.
pub fn open_document(args: &DocumentArgs) -> Result<Document, i32> {
    let doc = match (&args.base, args.files.as_slice()) {
        (None, [single]) => Document::from_path(single),
        (base, files) => {
            Document::from_files(base.clone().unwrap_or_default(), files.iter().cloned())
        }
    }
    .with_options(DocumentOptions {
        password: args.password.clone(),
        ..DocumentOptions::default()
    });

    let pages = doc.page_count().map_err(fail)?;
    tracing::info!(files = doc.files().len(), pages, "opened document");
    Ok(doc)
}

/// Resolve an optional page range string into zero-based logical pages.
///
/// `None` selects every page.
pub fn resolve_pages(doc: &Document, pages: Option<&str>) -> Result<Vec<usize>, i32> {
    let page_count = doc.page_count().map_err(fail)?;
    match pages {
        Some(range) => parse_page_range(range, page_count).map_err(fail),
        None => Ok((0..page_count).collect()),
    }
}

pub fn format_bbox(b: &BBox) -> String {
    format!("[{:.2}, {:.2}, {:.2}, {:.2}]", b.x0, b.top, b.x1, b.bottom)
}

pub fn bbox_to_json(b: &BBox) -> serde_json::Value {
    serde_json::json!([b.x0, b.top, b.x1, b.bottom])
}

/// Print a JSON value on one line.
pub fn print_json(value: &serde_json::Value) -> Result<(), i32> {
    let json = serde_json::to_string(value).map_err(fail)?;
    println!("{json}");
    Ok(())
}

/// Per-page progress on stderr (`\r{label} page N/M`), shown only on a
/// terminal so piped output stays clean.
pub struct ProgressReporter {
    label: &'static str,
    total: usize,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(label: &'static str, total: usize) -> Self {
        Self {
            label,
            total,
            enabled: total > 1 && io::stderr().is_terminal(),
        }
    }

    /// `current` is 1-based.
    pub fn report(&self, current: usize) {
        if self.enabled {
            eprint!("\r{} page {current}/{}", self.label, self.total);
            let _ = io::stderr().flush();
        }
    }

    pub fn finish(&self) {
        if self.enabled {
            eprint!("\r\x1b[2K");
            let _ = io::stderr().flush();
        }
    }
}
