//! lopdf-based PDF parsing backend.
//!
//! Implements [`PdfBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate. This is the backend every folio document uses for its files.

use std::collections::{HashMap, HashSet};

use folio_core::{
    Annotation, AnnotationType, BBox, DocumentMetadata, Hyperlink, LinkTarget, OutlineEntry,
    PdfError,
};
use lopdf::encryption::DecryptionError;
use lopdf::{Dictionary, Object, ObjectId};

use crate::backend::PdfBackend;
use crate::error::BackendError;

/// Maximum outline nesting depth; deeper entries are ignored.
const MAX_OUTLINE_DEPTH: usize = 64;
/// Maximum hops when following `/Parent` links or chained destinations.
const MAX_CHAIN: usize = 64;

/// A parsed PDF document backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Ordered list of page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<ObjectId>,
    /// Reverse lookup from page ObjectId to 0-based page number.
    page_index: HashMap<ObjectId, usize>,
}

impl LopdfDocument {
    fn from_inner(inner: lopdf::Document) -> Self {
        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let page_ids: Vec<ObjectId> = inner.get_pages().values().copied().collect();
        let page_index = page_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();
        Self {
            inner,
            page_ids,
            page_index,
        }
    }

    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    fn page_number_of(&self, id: ObjectId) -> Option<usize> {
        self.page_index.get(&id).copied()
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// A reference to a single page within a [`LopdfDocument`].
#[derive(Debug, Clone, Copy)]
pub struct LopdfPage {
    /// The lopdf object ID for this page.
    pub object_id: ObjectId,
    /// The 0-based page index.
    pub index: usize,
}

/// The lopdf-based PDF backend.
///
/// # Example
///
/// ```ignore
/// use folio_parse::{LopdfBackend, PdfBackend};
///
/// let doc = LopdfBackend::open(pdf_bytes)?;
/// let page = LopdfBackend::get_page(&doc, 0)?;
/// let geometry = LopdfBackend::page_geometry(&doc, &page)?;
/// ```
pub struct LopdfBackend;

/// Extract a [`BBox`] from a lopdf array of 4 numbers `[x0, y0, x1, y1]`.
fn extract_bbox_from_array(array: &[Object]) -> Result<BBox, BackendError> {
    if array.len() != 4 {
        return Err(BackendError::Parse(format!(
            "expected 4-element array for box, got {}",
            array.len()
        )));
    }
    let x0 = object_to_f64(&array[0])?;
    let y0 = object_to_f64(&array[1])?;
    let x1 = object_to_f64(&array[2])?;
    let y1 = object_to_f64(&array[3])?;
    Ok(BBox::new(x0, y0, x1, y1))
}

/// Convert a lopdf numeric object (Integer or Real) to f64.
fn object_to_f64(obj: &Object) -> Result<f64, BackendError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(f) => Ok(*f as f64),
        _ => Err(BackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

/// Resolve a potentially indirect object reference.
fn resolve_object<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, BackendError> {
    let mut current_id = page_id;
    for _ in 0..MAX_CHAIN {
        let dict = doc
            .get_object(current_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(resolve_object(doc, value)));
        }

        match dict.get(b"Parent") {
            Ok(parent_obj) => {
                current_id = parent_obj
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
    Err(BackendError::Parse(
        "page tree /Parent chain too deep or circular".to_string(),
    ))
}

/// Resolve an inheritable box entry into a [`BBox`].
fn inherited_box(
    doc: &lopdf::Document,
    page_id: ObjectId,
    key: &str,
) -> Result<Option<BBox>, BackendError> {
    match resolve_inherited(doc, page_id, key.as_bytes())? {
        Some(obj) => {
            let array = obj
                .as_array()
                .map_err(|e| BackendError::Parse(format!("{key} is not an array: {e}")))?;
            Ok(Some(extract_bbox_from_array(array)?))
        }
        None => Ok(None),
    }
}

/// Decode a PDF text string: UTF-16BE with BOM, then UTF-8, then Latin-1.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Extract a string value from a dictionary, handling both String and Name types.
fn extract_string_from_dict(
    doc: &lopdf::Document,
    dict: &Dictionary,
    key: &[u8],
) -> Option<String> {
    let obj = resolve_object(doc, dict.get(key).ok()?);
    match obj {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

fn get_catalog_dict(doc: &lopdf::Document) -> Option<&Dictionary> {
    let root = doc.trailer.get(b"Root").ok()?;
    resolve_object(doc, root).as_dict().ok()
}

fn resolve_dict<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> Option<&'a Dictionary> {
    resolve_object(doc, obj).as_dict().ok()
}

impl PdfBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Page = LopdfPage;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = lopdf::Document::load_mem(bytes)?;

        // Reject encrypted PDFs when no password is provided
        if inner.is_encrypted() {
            return Err(BackendError::Core(PdfError::PasswordRequired));
        }

        let doc = LopdfDocument::from_inner(inner);
        tracing::debug!(pages = doc.page_ids.len(), "opened PDF");
        Ok(doc)
    }

    fn open_with_password(bytes: &[u8], password: &str) -> Result<Self::Document, Self::Error> {
        // lopdf authenticates and decrypts while loading
        let inner = lopdf::Document::load_mem_with_password(bytes, password).map_err(|e| match e {
            lopdf::Error::InvalidPassword
            | lopdf::Error::Decryption(DecryptionError::IncorrectPassword) => {
                BackendError::Core(PdfError::InvalidPassword)
            }
            other => BackendError::Pdf(other),
        })?;

        let doc = LopdfDocument::from_inner(inner);
        tracing::debug!(pages = doc.page_ids.len(), "opened PDF with password");
        Ok(doc)
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn get_page(doc: &Self::Document, index: usize) -> Result<Self::Page, Self::Error> {
        match doc.page_ids.get(index) {
            Some(&object_id) => Ok(LopdfPage { object_id, index }),
            None => Err(BackendError::Core(PdfError::PageOutOfRange {
                page: index,
                page_count: doc.page_ids.len(),
            })),
        }
    }

    fn page_media_box(doc: &Self::Document, page: &Self::Page) -> Result<BBox, Self::Error> {
        inherited_box(&doc.inner, page.object_id, "MediaBox")?
            .ok_or(BackendError::MissingInherited("MediaBox"))
    }

    fn page_crop_box(doc: &Self::Document, page: &Self::Page) -> Result<Option<BBox>, Self::Error> {
        inherited_box(&doc.inner, page.object_id, "CropBox")
    }

    fn page_rotate(doc: &Self::Document, page: &Self::Page) -> Result<i64, Self::Error> {
        match resolve_inherited(&doc.inner, page.object_id, b"Rotate")? {
            Some(obj) => obj
                .as_i64()
                .map_err(|e| BackendError::Parse(format!("Rotate is not an integer: {e}"))),
            None => Ok(0),
        }
    }

    fn document_metadata(doc: &Self::Document) -> Result<DocumentMetadata, Self::Error> {
        Ok(extract_document_metadata(&doc.inner))
    }

    fn document_outline(doc: &Self::Document) -> Result<Vec<OutlineEntry>, Self::Error> {
        Ok(extract_document_outline(doc))
    }

    fn page_annotations(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<Vec<Annotation>, Self::Error> {
        let mut annotations = Vec::new();
        for annot_dict in page_annotation_dicts(&doc.inner, page.object_id)? {
            let raw_subtype = match annot_dict.get(b"Subtype") {
                Ok(Object::Name(name)) => String::from_utf8_lossy(name).into_owned(),
                _ => continue,
            };
            let Some(bbox) = annotation_rect(&doc.inner, annot_dict) else {
                continue;
            };
            annotations.push(Annotation {
                annot_type: AnnotationType::from_subtype(&raw_subtype),
                bbox,
                contents: extract_string_from_dict(&doc.inner, annot_dict, b"Contents"),
                author: extract_string_from_dict(&doc.inner, annot_dict, b"T"),
                date: extract_string_from_dict(&doc.inner, annot_dict, b"M"),
                raw_subtype,
            });
        }
        Ok(annotations)
    }

    fn page_hyperlinks(
        doc: &Self::Document,
        page: &Self::Page,
    ) -> Result<Vec<Hyperlink>, Self::Error> {
        let mut hyperlinks = Vec::new();
        for annot_dict in page_annotation_dicts(&doc.inner, page.object_id)? {
            if !matches!(annot_dict.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Link") {
                continue;
            }
            let Some(bbox) = annotation_rect(&doc.inner, annot_dict) else {
                continue;
            };
            if let Some(target) = resolve_link_target(doc, annot_dict) {
                hyperlinks.push(Hyperlink { bbox, target });
            }
        }
        Ok(hyperlinks)
    }

    fn page_text(doc: &Self::Document, page: &Self::Page) -> Result<String, Self::Error> {
        let page_number = u32::try_from(page.index + 1)
            .map_err(|_| BackendError::Parse(format!("page index {} too large", page.index)))?;
        Ok(doc.inner.extract_text(&[page_number])?)
    }
}

/// Extract document-level metadata from the PDF /Info dictionary.
fn extract_document_metadata(doc: &lopdf::Document) -> DocumentMetadata {
    let Some(info_dict) = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|obj| resolve_dict(doc, obj))
    else {
        return DocumentMetadata::default();
    };

    DocumentMetadata {
        title: extract_string_from_dict(doc, info_dict, b"Title"),
        author: extract_string_from_dict(doc, info_dict, b"Author"),
        subject: extract_string_from_dict(doc, info_dict, b"Subject"),
        keywords: extract_string_from_dict(doc, info_dict, b"Keywords"),
        creator: extract_string_from_dict(doc, info_dict, b"Creator"),
        producer: extract_string_from_dict(doc, info_dict, b"Producer"),
        creation_date: extract_string_from_dict(doc, info_dict, b"CreationDate"),
        mod_date: extract_string_from_dict(doc, info_dict, b"ModDate"),
    }
}

/// Extract the document outline from the catalog's `/Outlines` tree.
///
/// Walks `/First` and `/Next` links depth-first. Every node is visited at
/// most once, so circular references terminate.
fn extract_document_outline(doc: &LopdfDocument) -> Vec<OutlineEntry> {
    let first_id = get_catalog_dict(&doc.inner)
        .and_then(|catalog| catalog.get(b"Outlines").ok())
        .and_then(|outlines| resolve_dict(&doc.inner, outlines))
        .and_then(|outlines| match outlines.get(b"First") {
            Ok(Object::Reference(id)) => Some(*id),
            _ => None,
        });

    let mut entries = Vec::new();
    if let Some(first_id) = first_id {
        let mut visited = HashSet::new();
        walk_outline_tree(doc, first_id, 0, &mut visited, &mut entries);
    }
    entries
}

fn walk_outline_tree(
    doc: &LopdfDocument,
    item_id: ObjectId,
    level: usize,
    visited: &mut HashSet<ObjectId>,
    entries: &mut Vec<OutlineEntry>,
) {
    if level >= MAX_OUTLINE_DEPTH {
        return;
    }

    let mut current_id = Some(item_id);
    while let Some(node_id) = current_id {
        if !visited.insert(node_id) {
            tracing::warn!(?node_id, "circular outline reference");
            break;
        }
        let Ok(node_dict) = doc.inner.get_object(node_id).and_then(|o| o.as_dict()) else {
            break;
        };

        let title = extract_string_from_dict(&doc.inner, node_dict, b"Title").unwrap_or_default();
        let (page_number, dest_top) = resolve_outline_dest(doc, node_dict);
        entries.push(OutlineEntry {
            title,
            level,
            page_number,
            dest_top,
        });

        if let Ok(Object::Reference(child_id)) = node_dict.get(b"First") {
            walk_outline_tree(doc, *child_id, level + 1, visited, entries);
        }

        current_id = match node_dict.get(b"Next") {
            Ok(Object::Reference(next_id)) => Some(*next_id),
            _ => None,
        };
    }
}

/// Resolve an outline item's destination from `/Dest` or a `/GoTo` action.
fn resolve_outline_dest(doc: &LopdfDocument, node_dict: &Dictionary) -> (Option<usize>, Option<f64>) {
    if let Ok(dest_obj) = node_dict.get(b"Dest") {
        if let Some(result) = resolve_dest(doc, dest_obj, 0) {
            return result;
        }
    }

    if let Some(action) = node_dict
        .get(b"A")
        .ok()
        .and_then(|a| resolve_dict(&doc.inner, a))
    {
        if action_type(action).as_deref() == Some("GoTo") {
            if let Some(result) = action
                .get(b"D")
                .ok()
                .and_then(|d| resolve_dest(doc, d, 0))
            {
                return result;
            }
        }
    }

    (None, None)
}

fn action_type(action: &Dictionary) -> Option<String> {
    match action.get(b"S") {
        Ok(Object::Name(name)) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Resolve a destination to `(page_number, dest_top)`.
///
/// Handles explicit arrays `[page /XYZ left top zoom]`, dictionaries with a
/// `/D` entry, and named destinations (string or name).
fn resolve_dest(
    doc: &LopdfDocument,
    dest_obj: &Object,
    depth: usize,
) -> Option<(Option<usize>, Option<f64>)> {
    if depth >= MAX_CHAIN {
        return None;
    }
    match resolve_object(&doc.inner, dest_obj) {
        Object::Array(arr) => {
            let page_number = match arr.first()? {
                Object::Reference(page_ref) => doc.page_number_of(*page_ref),
                // Integer page numbers appear in remote destinations; one
                // past the end of this file is not a page of it.
                Object::Integer(i) => usize::try_from(*i)
                    .ok()
                    .filter(|&page| page < doc.page_ids.len()),
                _ => return None,
            };
            Some((page_number, extract_dest_top(arr)))
        }
        Object::Dictionary(dict) => resolve_dest(doc, dict.get(b"D").ok()?, depth + 1),
        Object::String(bytes, _) => {
            let target = lookup_named_dest(&doc.inner, &decode_pdf_string(bytes))?;
            resolve_dest(doc, target, depth + 1)
        }
        Object::Name(name) => {
            let target = lookup_named_dest(&doc.inner, &String::from_utf8_lossy(name))?;
            resolve_dest(doc, target, depth + 1)
        }
        _ => None,
    }
}

/// Extract the top y-coordinate from a destination array.
///
/// Supports /XYZ (index 3), /FitH and /FitBH (index 2).
fn extract_dest_top(arr: &[Object]) -> Option<f64> {
    let Some(Object::Name(dest_type)) = arr.get(1) else {
        return None;
    };
    let index = match dest_type.as_slice() {
        b"XYZ" => 3,
        b"FitH" | b"FitBH" => 2,
        _ => return None,
    };
    // null means "unchanged"
    arr.get(index).and_then(|obj| object_to_f64(obj).ok())
}

/// Look up a named destination in `/Names`→`/Dests` or the legacy `/Dests`.
fn lookup_named_dest<'a>(doc: &'a lopdf::Document, name: &str) -> Option<&'a Object> {
    let catalog = get_catalog_dict(doc)?;

    let from_tree = catalog
        .get(b"Names")
        .ok()
        .and_then(|names| resolve_dict(doc, names))
        .and_then(|names| names.get(b"Dests").ok())
        .and_then(|dests| resolve_dict(doc, dests))
        .and_then(|tree| lookup_name_tree(doc, tree, name, 0));
    if from_tree.is_some() {
        return from_tree;
    }

    catalog
        .get(b"Dests")
        .ok()
        .and_then(|dests| resolve_dict(doc, dests))
        .and_then(|dests| dests.get(name.as_bytes()).ok())
        .map(|obj| resolve_object(doc, obj))
}

/// Look up a key in a PDF name tree (`/Names` leaves, `/Kids` branches).
fn lookup_name_tree<'a>(
    doc: &'a lopdf::Document,
    node: &'a Dictionary,
    name: &str,
    depth: usize,
) -> Option<&'a Object> {
    if depth >= MAX_CHAIN {
        return None;
    }

    if let Some(names) = node
        .get(b"Names")
        .ok()
        .and_then(|n| resolve_object(doc, n).as_array().ok())
    {
        for pair in names.chunks_exact(2) {
            if let Object::String(key, _) = resolve_object(doc, &pair[0]) {
                if decode_pdf_string(key) == name {
                    return Some(resolve_object(doc, &pair[1]));
                }
            }
        }
    }

    let kids = node
        .get(b"Kids")
        .ok()
        .and_then(|k| resolve_object(doc, k).as_array().ok())?;
    kids.iter()
        .filter_map(|kid| resolve_dict(doc, kid))
        .find_map(|kid| lookup_name_tree(doc, kid, name, depth + 1))
}

/// Collect the annotation dictionaries listed in a page's `/Annots` array.
///
/// Unresolvable entries and non-dictionaries are skipped.
fn page_annotation_dicts(
    doc: &lopdf::Document,
    page_id: ObjectId,
) -> Result<Vec<&Dictionary>, BackendError> {
    let page_dict = doc
        .get_object(page_id)
        .and_then(|o| o.as_dict())
        .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

    let annots_obj = match page_dict.get(b"Annots") {
        Ok(obj) => resolve_object(doc, obj),
        Err(_) => return Ok(Vec::new()),
    };
    let annots = annots_obj
        .as_array()
        .map_err(|e| BackendError::Parse(format!("/Annots is not an array: {e}")))?;

    Ok(annots
        .iter()
        .filter_map(|entry| resolve_dict(doc, entry))
        .collect())
}

fn annotation_rect(doc: &lopdf::Document, annot_dict: &Dictionary) -> Option<BBox> {
    let rect = resolve_object(doc, annot_dict.get(b"Rect").ok()?);
    let bbox = extract_bbox_from_array(rect.as_array().ok()?).ok()?;
    Some(bbox.normalized())
}

/// Resolve the target of a Link annotation from `/A` or `/Dest`.
fn resolve_link_target(doc: &LopdfDocument, annot_dict: &Dictionary) -> Option<LinkTarget> {
    if let Some(action) = annot_dict
        .get(b"A")
        .ok()
        .and_then(|a| resolve_dict(&doc.inner, a))
    {
        return match action_type(action)?.as_str() {
            "URI" => extract_string_from_dict(&doc.inner, action, b"URI")
                .filter(|uri| !uri.is_empty())
                .map(LinkTarget::Uri),
            "GoTo" => dest_target(doc, action.get(b"D").ok()?),
            "GoToR" | "Launch" => file_spec(&doc.inner, action).map(LinkTarget::RemoteFile),
            _ => None,
        };
    }

    dest_target(doc, annot_dict.get(b"Dest").ok()?)
}

/// Convert a destination into a link target, keeping unresolved names.
fn dest_target(doc: &LopdfDocument, dest_obj: &Object) -> Option<LinkTarget> {
    if let Some((Some(page), _)) = resolve_dest(doc, dest_obj, 0) {
        return Some(LinkTarget::Page(page));
    }
    match resolve_object(&doc.inner, dest_obj) {
        Object::String(bytes, _) => Some(LinkTarget::Named(decode_pdf_string(bytes))),
        Object::Name(name) => Some(LinkTarget::Named(String::from_utf8_lossy(name).into_owned())),
        _ => None,
    }
}

/// Read the `/F` file specification of an action (string or dictionary).
fn file_spec(doc: &lopdf::Document, action: &Dictionary) -> Option<String> {
    match resolve_object(doc, action.get(b"F").ok()?) {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Dictionary(spec) => extract_string_from_dict(doc, spec, b"UF")
            .or_else(|| extract_string_from_dict(doc, spec, b"F")),
        _ => None,
    }
}
