use folio::Annotation;

use crate::cli::{DocumentArgs, OutputFormat};
use crate::shared::{
    ProgressReporter, bbox_to_json, format_bbox, open_document, print_json, resolve_pages,
};

pub fn run(args: &DocumentArgs, pages: Option<&str>) -> Result<(), i32> {
    let doc = open_document(args)?;
    let page_indices = resolve_pages(&doc, pages)?;
    let progress = ProgressReporter::new("Annotations:", page_indices.len());

    if args.format == OutputFormat::Text {
        println!("page\ttype\tbbox\tcontents\tauthor");
    }
    let mut json_annots = Vec::new();

    for (i, &page) in page_indices.iter().enumerate() {
        progress.report(i + 1);
        let annots = doc.annotation_parser().annotations(&doc, page).map_err(|e| {
            eprintln!("Error reading page {}: {e}", page + 1);
            1
        })?;

        for annot in annots.iter() {
            match args.format {
                OutputFormat::Text => println!(
                    "{}\t{}\t{}\t{}\t{}",
                    page + 1,
                    annot.raw_subtype,
                    format_bbox(&annot.bbox),
                    annot.contents.as_deref().unwrap_or(""),
                    annot.author.as_deref().unwrap_or(""),
                ),
                OutputFormat::Json => json_annots.push(annot_json(annot, page + 1)),
            }
        }
    }
    progress.finish();

    match args.format {
        OutputFormat::Text => Ok(()),
        OutputFormat::Json => print_json(&serde_json::Value::Array(json_annots)),
    }
}

fn annot_json(annot: &Annotation, page: usize) -> serde_json::Value {
    serde_json::json!({
        "page": page,
        "type": annot.raw_subtype,
        "bbox": bbox_to_json(&annot.bbox),
        "contents": annot.contents,
        "author": annot.author,
        "date": annot.date,
    })
}
