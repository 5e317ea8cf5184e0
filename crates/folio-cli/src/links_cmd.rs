use folio::{Hyperlink, LinkTarget};

use crate::cli::{DocumentArgs, OutputFormat};
use crate::shared::{
    ProgressReporter, bbox_to_json, format_bbox, open_document, print_json, resolve_pages,
};

/// `(kind, value)` for a link target; page targets are shown 1-based.
fn describe_target(target: &LinkTarget) -> (&'static str, String) {
    match target {
        LinkTarget::Uri(uri) => ("uri", uri.clone()),
        LinkTarget::Page(page) => ("page", (page + 1).to_string()),
        LinkTarget::Named(name) => ("named", name.clone()),
        LinkTarget::RemoteFile(file) => ("file", file.clone()),
    }
}

pub fn run(args: &DocumentArgs, pages: Option<&str>) -> Result<(), i32> {
    let doc = open_document(args)?;
    let page_indices = resolve_pages(&doc, pages)?;
    let progress = ProgressReporter::new("Links:", page_indices.len());

    if args.format == OutputFormat::Text {
        println!("page\tkind\ttarget\tbbox");
    }
    let mut json_links = Vec::new();

    for (i, &page) in page_indices.iter().enumerate() {
        progress.report(i + 1);
        let links = doc.annotation_parser().hyperlinks(&doc, page).map_err(|e| {
            eprintln!("Error reading page {}: {e}", page + 1);
            1
        })?;

        for link in links.iter() {
            match args.format {
                OutputFormat::Text => {
                    let (kind, value) = describe_target(&link.target);
                    println!("{}\t{kind}\t{value}\t{}", page + 1, format_bbox(&link.bbox));
                }
                OutputFormat::Json => json_links.push(link_json(link, page + 1)),
            }
        }
    }
    progress.finish();

    match args.format {
        OutputFormat::Text => Ok(()),
        OutputFormat::Json => print_json(&serde_json::Value::Array(json_links)),
    }
}

fn link_json(link: &Hyperlink, page: usize) -> serde_json::Value {
    let (kind, value) = describe_target(&link.target);
    serde_json::json!({
        "page": page,
        "kind": kind,
        "target": value,
        "bbox": bbox_to_json(&link.bbox),
    })
}
