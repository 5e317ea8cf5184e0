use folio::PageInfo;

use crate::cli::{DocumentArgs, OutputFormat};
use crate::shared::{
    ProgressReporter, bbox_to_json, fail, format_bbox, open_document, print_json, resolve_pages,
};

pub fn run(args: &DocumentArgs, pages: Option<&str>) -> Result<(), i32> {
    let doc = open_document(args)?;
    let page_indices = resolve_pages(&doc, pages)?;
    let progress = ProgressReporter::new("Reading", page_indices.len());

    let mut rows = Vec::with_capacity(page_indices.len());
    for (i, &page) in page_indices.iter().enumerate() {
        progress.report(i + 1);
        let path = doc.path_for_page(page).map_err(fail)?;
        let local = doc.page_number_for_page(page).map_err(fail)?;
        let info = doc.page_info(page).map_err(|e| {
            eprintln!("Error reading page {}: {e}", page + 1);
            1
        })?;
        rows.push((path, local, info));
    }
    progress.finish();

    match args.format {
        OutputFormat::Text => {
            println!("page\tfile\tfile_page\twidth\theight\trotation\trect");
            for (path, local, info) in &rows {
                let (width, height) = info.display_size();
                println!(
                    "{}\t{}\t{}\t{width:.2}\t{height:.2}\t{}\t{}",
                    info.page + 1,
                    path.display(),
                    local + 1,
                    info.rotation.degrees(),
                    format_bbox(&info.rect),
                );
            }
            Ok(())
        }
        OutputFormat::Json => {
            let pages: Vec<serde_json::Value> = rows
                .iter()
                .map(|(path, local, info)| page_json(&path.display().to_string(), *local, info))
                .collect();
            print_json(&serde_json::Value::Array(pages))
        }
    }
}

fn page_json(path: &str, local: usize, info: &PageInfo) -> serde_json::Value {
    let (width, height) = info.display_size();
    serde_json::json!({
        "page": info.page + 1,
        "file": path,
        "file_page": local + 1,
        "width": width,
        "height": height,
        "rotation": info.rotation.degrees(),
        "rect": bbox_to_json(&info.rect),
    })
}
