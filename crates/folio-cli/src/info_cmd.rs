use folio::Document;

use crate::cli::{DocumentArgs, OutputFormat};
use crate::shared::{fail, open_document, print_json};

pub fn run(args: &DocumentArgs) -> Result<(), i32> {
    let doc = open_document(args)?;
    let page_count = doc.page_count().map_err(fail)?;
    let counts = doc.file_page_counts().map_err(fail)?;
    let metadata = doc.metadata().map_err(fail)?;

    match args.format {
        OutputFormat::Text => {
            println!("Title: {}", doc.title());
            println!("UID: {}", doc.uid());
            println!("Pages: {page_count}");
            println!("Files:");
            for (path, count) in doc.file_paths().iter().zip(&counts) {
                println!("  {}\t{count}", path.display());
            }
            if !metadata.is_empty() {
                println!("Metadata:");
                for (key, value) in metadata.fields() {
                    println!("  {key}: {value}");
                }
            }
            Ok(())
        }
        OutputFormat::Json => print_json(&info_json(&doc, page_count, &counts, &metadata)),
    }
}

fn info_json(
    doc: &Document,
    page_count: usize,
    counts: &[usize],
    metadata: &folio::DocumentMetadata,
) -> serde_json::Value {
    let files: Vec<serde_json::Value> = doc
        .file_paths()
        .iter()
        .zip(counts)
        .map(|(path, count)| {
            serde_json::json!({
                "path": path.display().to_string(),
                "pages": count,
            })
        })
        .collect();

    serde_json::json!({
        "title": doc.title(),
        "uid": doc.uid(),
        "pages": page_count,
        "files": files,
        "metadata": metadata,
    })
}
