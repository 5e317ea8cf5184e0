use crate::cli::{DocumentArgs, OutputFormat};
use crate::shared::{fail, open_document, print_json};

pub fn run(args: &DocumentArgs) -> Result<(), i32> {
    let doc = open_document(args)?;
    let outline = doc.outline_parser().outline(&doc).map_err(fail)?;

    match args.format {
        OutputFormat::Text => {
            for entry in outline.iter() {
                let page = entry
                    .page_number
                    .map(|p| (p + 1).to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{}{}\t{page}", "  ".repeat(entry.level), entry.title);
            }
            Ok(())
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = outline
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "title": entry.title,
                        "level": entry.level,
                        "page": entry.page_number.map(|p| p + 1),
                        "top": entry.dest_top,
                    })
                })
                .collect();
            print_json(&serde_json::Value::Array(entries))
        }
    }
}
