//! PDF fixtures for unit tests.

use std::path::{Path, PathBuf};

use lopdf::{
    Document, EncryptionState, EncryptionVersion, Object, ObjectId, Permissions, dictionary,
};

/// A document with one page per `(width, height)`.
fn page_tree(sizes: &[(i64, i64)]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let kids: Vec<Object> = sizes
        .iter()
        .map(|&(width, height)| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => sizes.len() as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a PDF named `name` into `dir` with one page per `(width, height)`.
pub(crate) fn write_pdf(dir: &Path, name: &str, sizes: &[(i64, i64)]) -> PathBuf {
    let path = dir.join(name);
    page_tree(sizes).save(&path).expect("failed to save test PDF");
    path
}

/// Like [`write_pdf`], encrypted (RC4-128) with `user_password` and the
/// owner password `"owner"`.
pub(crate) fn write_encrypted_pdf(
    dir: &Path,
    name: &str,
    sizes: &[(i64, i64)],
    user_password: &str,
) -> PathBuf {
    let mut doc = page_tree(sizes);
    doc.trailer.set(
        "ID",
        vec![
            Object::string_literal(b"folio-store-id-1".to_vec()),
            Object::string_literal(b"folio-store-id-1".to_vec()),
        ],
    );
    let state = EncryptionState::try_from(EncryptionVersion::V2 {
        document: &doc,
        owner_password: "owner",
        user_password,
        key_length: 128,
        permissions: Permissions::all(),
    })
    .expect("failed to derive encryption state");
    doc.encrypt(&state).expect("failed to encrypt test PDF");

    let path = dir.join(name);
    doc.save(&path).expect("failed to save test PDF");
    path
}
