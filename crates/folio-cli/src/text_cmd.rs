use crate::cli::{DocumentArgs, OutputFormat};
use crate::shared::{ProgressReporter, open_document, print_json, resolve_pages};

pub fn run(args: &DocumentArgs, pages: Option<&str>) -> Result<(), i32> {
    let doc = open_document(args)?;
    let page_indices = resolve_pages(&doc, pages)?;
    let progress = ProgressReporter::new("Extracting", page_indices.len());
    let mut json_pages = Vec::new();

    for (i, &page) in page_indices.iter().enumerate() {
        progress.report(i + 1);
        let text = doc.page_text(page).map_err(|e| {
            eprintln!("Error reading page {}: {e}", page + 1);
            1
        })?;

        match args.format {
            OutputFormat::Text => {
                println!("--- Page {} ---", page + 1);
                println!("{}", text.trim_end());
            }
            OutputFormat::Json => json_pages.push(serde_json::json!({
                "page": page + 1,
                "text": text,
            })),
        }
    }
    progress.finish();

    match args.format {
        OutputFormat::Text => Ok(()),
        OutputFormat::Json => print_json(&serde_json::Value::Array(json_pages)),
    }
}
