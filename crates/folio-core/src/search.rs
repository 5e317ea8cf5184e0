//! Plain-text search over extracted page text.

use regex::Regex;

/// Options controlling text search behavior.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    /// Whether to interpret the pattern as a regex (default: `false`).
    /// When `false`, the pattern is treated as a literal string.
    pub regex: bool,
    /// Whether the search is case-sensitive (default: `false`).
    pub case_sensitive: bool,
    /// Stop after this many matches (default: no limit).
    pub max_results: Option<usize>,
    /// Characters of context kept on each side of a match in
    /// [`TextMatch::preview`] (default: 20).
    pub preview_chars: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            regex: false,
            case_sensitive: false,
            max_results: None,
            preview_chars: 20,
        }
    }
}

/// A single match within a page's text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextMatch {
    /// Page number (0-indexed).
    pub page_number: usize,
    /// The matched text.
    pub text: String,
    /// Byte offset of the match start in the page text.
    pub start: usize,
    /// Byte offset one past the match end in the page text.
    pub end: usize,
    /// The match with surrounding context, whitespace collapsed.
    pub preview: String,
}

/// Build the regex used for a search, or `None` if the pattern is invalid.
pub fn compile_pattern(pattern: &str, options: &SearchOptions) -> Option<Regex> {
    let body = if options.regex {
        pattern.to_string()
    } else {
        regex::escape(pattern)
    };
    let full = if options.case_sensitive {
        body
    } else {
        format!("(?i){body}")
    };
    Regex::new(&full).ok()
}

/// Search `text` for `pattern` and return matches tagged with `page_number`.
///
/// Returns an empty vector if the pattern is empty or invalid, or if the
/// text is empty. Zero-length regex matches are skipped.
pub fn search_text(
    text: &str,
    pattern: &str,
    options: &SearchOptions,
    page_number: usize,
) -> Vec<TextMatch> {
    if text.is_empty() || pattern.is_empty() {
        return Vec::new();
    }
    let Some(re) = compile_pattern(pattern, options) else {
        return Vec::new();
    };

    let limit = options.max_results.unwrap_or(usize::MAX);
    re.find_iter(text)
        .filter(|m| !m.is_empty())
        .take(limit)
        .map(|m| TextMatch {
            page_number,
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
            preview: preview(text, m.start(), m.end(), options.preview_chars),
        })
        .collect()
}

fn preview(text: &str, start: usize, end: usize, context: usize) -> String {
    let before_start = text[..start]
        .char_indices()
        .rev()
        .nth(context.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let before_start = if context == 0 { start } else { before_start };
    let after_end = text[end..]
        .char_indices()
        .nth(context)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    text[before_start..after_end]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
