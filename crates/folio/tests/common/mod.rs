//! Shared PDF fixtures for folio integration tests.
//!
//! Fixtures are synthesized with lopdf and written into temporary
//! directories, so every test controls exact page geometry and content.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

/// Description of one fixture page.
#[derive(Debug, Clone)]
pub struct PageSpec {
    pub media_box: [i64; 4],
    pub crop_box: Option<[i64; 4]>,
    pub rotate: i64,
    pub text: Option<String>,
    /// Index (within the same file) of a page this page links to.
    pub link_to: Option<usize>,
    /// Page number written as a bare integer (`/Dest [n /Fit]`).
    pub link_to_number: Option<i64>,
    pub uri: Option<String>,
    pub note: Option<String>,
}

impl PageSpec {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            media_box: [0, 0, width, height],
            crop_box: None,
            rotate: 0,
            text: None,
            link_to: None,
            link_to_number: None,
            uri: None,
            note: None,
        }
    }

    pub fn letter() -> Self {
        Self::new(612, 792)
    }

    pub fn rotate(mut self, degrees: i64) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn crop(mut self, crop_box: [i64; 4]) -> Self {
        self.crop_box = Some(crop_box);
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn link_to(mut self, page: usize) -> Self {
        self.link_to = Some(page);
        self
    }

    pub fn link_to_number(mut self, page: i64) -> Self {
        self.link_to_number = Some(page);
        self
    }

    pub fn uri(mut self, uri: &str) -> Self {
        self.uri = Some(uri.to_string());
        self
    }

    pub fn note(mut self, contents: &str) -> Self {
        self.note = Some(contents.to_string());
        self
    }
}

fn rect(values: [i64; 4]) -> Object {
    Object::Array(values.iter().map(|&v| Object::Integer(v)).collect())
}

/// Build a PDF from page specs and top-level outline entries
/// `(title, page index within this file)`.
pub fn build_pdf(pages: &[PageSpec], outline: &[(&str, usize)]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_ids: Vec<ObjectId> = pages.iter().map(|_| doc.new_object_id()).collect();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    for (spec, &page_id) in pages.iter().zip(&page_ids) {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => rect(spec.media_box),
            "Rotate" => spec.rotate,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        };
        if let Some(crop_box) = spec.crop_box {
            page.set("CropBox", rect(crop_box));
        }
        if let Some(text) = &spec.text {
            let content = format!("BT /F1 12 Tf 72 700 Td ({text}) Tj ET");
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            page.set("Contents", content_id);
        }

        let mut annots: Vec<Object> = Vec::new();
        if let Some(target) = spec.link_to {
            annots.push(
                doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => rect([72, 72, 144, 96]),
                    "Dest" => vec![Object::Reference(page_ids[target]), "Fit".into()],
                })
                .into(),
            );
        }
        if let Some(number) = spec.link_to_number {
            annots.push(
                doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => rect([72, 130, 144, 154]),
                    "Dest" => vec![Object::Integer(number), "Fit".into()],
                })
                .into(),
            );
        }
        if let Some(uri) = &spec.uri {
            annots.push(
                doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => rect([72, 100, 144, 124]),
                    "A" => dictionary! {
                        "S" => "URI",
                        "URI" => Object::string_literal(uri.as_str()),
                    },
                })
                .into(),
            );
        }
        if let Some(note) = &spec.note {
            annots.push(
                doc.add_object(dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Text",
                    "Rect" => rect([300, 300, 320, 320]),
                    "Contents" => Object::string_literal(note.as_str()),
                })
                .into(),
            );
        }
        if !annots.is_empty() {
            page.set("Annots", annots);
        }
        doc.objects.insert(page_id, Object::Dictionary(page));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => pages.len() as i64,
        }),
    );

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if !outline.is_empty() {
        catalog.set("Outlines", add_outline(&mut doc, &page_ids, outline));
    }
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

fn add_outline(doc: &mut Document, page_ids: &[ObjectId], outline: &[(&str, usize)]) -> ObjectId {
    let outlines_id = doc.new_object_id();
    let item_ids: Vec<ObjectId> = outline.iter().map(|_| doc.new_object_id()).collect();

    for (i, ((title, page), &item_id)) in outline.iter().zip(&item_ids).enumerate() {
        let mut item = dictionary! {
            "Title" => Object::string_literal(*title),
            "Parent" => outlines_id,
            "Dest" => vec![
                Object::Reference(page_ids[*page]),
                "XYZ".into(),
                0.into(),
                700.into(),
                Object::Null,
            ],
        };
        if i > 0 {
            item.set("Prev", item_ids[i - 1]);
        }
        if let Some(next) = item_ids.get(i + 1) {
            item.set("Next", *next);
        }
        doc.objects.insert(item_id, Object::Dictionary(item));
    }

    let mut outlines = Dictionary::new();
    outlines.set("Type", "Outlines");
    outlines.set("First", item_ids[0]);
    outlines.set("Last", item_ids[item_ids.len() - 1]);
    outlines.set("Count", item_ids.len() as i64);
    doc.objects.insert(outlines_id, Object::Dictionary(outlines));
    outlines_id
}

/// Write a fixture PDF named `name` into `dir`.
pub fn write_pdf(dir: &Path, name: &str, pages: &[PageSpec]) -> PathBuf {
    write_pdf_with_outline(dir, name, pages, &[])
}

pub fn write_pdf_with_outline(
    dir: &Path,
    name: &str,
    pages: &[PageSpec],
    outline: &[(&str, usize)],
) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_pdf(pages, outline)).expect("failed to write test PDF");
    path
}

/// `count` letter-size pages.
pub fn letter_pages(count: usize) -> Vec<PageSpec> {
    vec![PageSpec::letter(); count]
}
