//! PDF fixtures for CLI tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId, Stream, dictionary};

/// Write a PDF with one page per entry of `texts`.
///
/// Page `i` is letter-sized and shows `texts[i]`. When `link_first_to_last`
/// is set, the first page carries a Link to the last page and a URI link.
/// `outline` entries are `(title, page index)`.
pub fn write_pdf(
    dir: &Path,
    name: &str,
    texts: &[&str],
    outline: &[(&str, usize)],
    link_first_to_last: bool,
) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_ids: Vec<ObjectId> = texts.iter().map(|_| doc.new_object_id()).collect();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    for (i, (text, &page_id)) in texts.iter().zip(&page_ids).enumerate() {
        let content = format!("BT /F1 12 Tf 72 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        };
        if i == 0 && link_first_to_last {
            let last = page_ids[page_ids.len() - 1];
            let internal = doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Link",
                "Rect" => vec![72.into(), 72.into(), 144.into(), 96.into()],
                "Dest" => vec![Object::Reference(last), "Fit".into()],
            });
            let external = doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Link",
                "Rect" => vec![72.into(), 100.into(), 144.into(), 124.into()],
                "Contents" => Object::string_literal("website"),
                "A" => dictionary! {
                    "S" => "URI",
                    "URI" => Object::string_literal("https://example.com"),
                },
            });
            page.set(
                "Annots",
                vec![Object::Reference(internal), Object::Reference(external)],
            );
        }
        doc.objects.insert(page_id, Object::Dictionary(page));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => texts.len() as i64,
        }),
    );

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if !outline.is_empty() {
        let outlines_id = doc.new_object_id();
        let item_ids: Vec<ObjectId> = outline.iter().map(|_| doc.new_object_id()).collect();
        for (i, ((title, page), &item_id)) in outline.iter().zip(&item_ids).enumerate() {
            let mut item = dictionary! {
                "Title" => Object::string_literal(*title),
                "Parent" => outlines_id,
                "Dest" => vec![Object::Reference(page_ids[*page]), "Fit".into()],
            };
            if let Some(next) = item_ids.get(i + 1) {
                item.set("Next", *next);
            }
            doc.objects.insert(item_id, Object::Dictionary(item));
        }
        doc.objects.insert(
            outlines_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines",
                "First" => item_ids[0],
                "Last" => item_ids[item_ids.len() - 1],
            }),
        );
        catalog.set("Outlines", outlines_id);
    }
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("failed to save test PDF");
    path
}

/// Two files: `front.pdf` (2 pages, outline, links) and `back.pdf` (1 page,
/// outline).
pub fn two_file_fixture(dir: &Path) {
    write_pdf(
        dir,
        "front.pdf",
        &["Front cover", "Table of contents"],
        &[("Cover", 0), ("Contents", 1)],
        true,
    );
    write_pdf(dir, "back.pdf", &["Index of places"], &[("Index", 0)], false);
}
