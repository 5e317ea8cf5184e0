use folio::{Document, SearchOptions, TextMatch};

use crate::cli::{DocumentArgs, OutputFormat};
use crate::shared::{ProgressReporter, fail, open_document, print_json, resolve_pages};

pub struct SearchArgs<'a> {
    pub pattern: &'a str,
    pub pages: Option<&'a str>,
    pub regex: bool,
    pub case_sensitive: bool,
    pub max_results: Option<usize>,
}

pub fn run(args: &DocumentArgs, search: &SearchArgs<'_>) -> Result<(), i32> {
    let doc = open_document(args)?;
    let opts = SearchOptions {
        regex: search.regex,
        case_sensitive: search.case_sensitive,
        max_results: search.max_results,
        ..SearchOptions::default()
    };

    let matches = match search.pages {
        None => doc
            .searcher()
            .search(&doc, search.pattern, &opts)
            .map_err(fail)?,
        Some(range) => {
            let page_indices = resolve_pages(&doc, Some(range))?;
            search_pages(&doc, &page_indices, search.pattern, &opts)?
        }
    };

    match args.format {
        OutputFormat::Text => {
            println!("page\ttext\tpreview");
            for m in &matches {
                println!("{}\t{}\t{}", m.page_number + 1, m.text, m.preview);
            }
            Ok(())
        }
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = matches
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "page": m.page_number + 1,
                        "text": m.text,
                        "start": m.start,
                        "end": m.end,
                        "preview": m.preview,
                    })
                })
                .collect();
            print_json(&serde_json::Value::Array(json))
        }
    }
}

/// Search an explicit page selection in the order given, stopping at
/// `max_results` matches.
fn search_pages(
    doc: &Document,
    pages: &[usize],
    pattern: &str,
    opts: &SearchOptions,
) -> Result<Vec<TextMatch>, i32> {
    let limit = opts.max_results.unwrap_or(usize::MAX);
    let progress = ProgressReporter::new("Searching", pages.len());
    let mut matches: Vec<TextMatch> = Vec::new();
    for (i, &page) in pages.iter().enumerate() {
        if matches.len() >= limit {
            break;
        }
        progress.report(i + 1);
        let found = doc
            .searcher()
            .search_page(doc, page, pattern, opts)
            .map_err(fail)?;
        matches.extend(found);
    }
    matches.truncate(limit);
    progress.finish();
    Ok(matches)
}
