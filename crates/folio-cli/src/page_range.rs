use std::collections::BTreeSet;

/// Parse a 1-based page selection such as `"1,3-5"` into sorted, unique
/// zero-based logical pages.
///
/// Blank items are ignored. Page 0, pages past `page_count`, reversed ranges
/// and non-numeric items are errors.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = BTreeSet::new();

    for item in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match item.split_once('-') {
            Some((first, last)) => {
                let first = parse_page(first, page_count)?;
                let last = parse_page(last, page_count)?;
                if first > last {
                    return Err(format!("reversed page range: '{item}'"));
                }
                pages.extend(first..=last);
            }
            None => {
                pages.insert(parse_page(item, page_count)?);
            }
        }
    }

    Ok(pages.into_iter().collect())
}

/// Parse one 1-based page number into a zero-based index.
fn parse_page(text: &str, page_count: usize) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    match page {
        0 => Err("page 0 is invalid (pages start at 1)".to_string()),
        p if p > page_count => Err(format!(
            "page {p} exceeds document page count ({page_count})"
        )),
        p => Ok(p - 1),
    }
}
