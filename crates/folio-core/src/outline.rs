//! Document outline (table of contents) types.
//!
//! Provides [`OutlineEntry`] for the entries of the PDF `/Outlines` tree,
//! flattened in document order.

/// A single entry in the document outline.
///
/// Entries are flattened depth-first; `level` carries the nesting depth.
/// In a multi-file document `page_number` is the logical page, i.e. the
/// page inside the source file shifted by the file's first logical page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutlineEntry {
    /// The entry title text.
    pub title: String,
    /// Nesting depth (0-indexed). Top-level entries have level 0.
    pub level: usize,
    /// The 0-indexed destination page, if resolvable.
    pub page_number: Option<usize>,
    /// The y-coordinate on the destination page (top of view), if available.
    pub dest_top: Option<f64>,
}

impl OutlineEntry {
    /// Return a copy with the destination page shifted by `offset` pages.
    pub fn shifted(&self, offset: usize) -> OutlineEntry {
        OutlineEntry {
            page_number: self.page_number.map(|p| p + offset),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_without_destination() {
        let entry = OutlineEntry {
            title: "Appendix".to_string(),
            level: 1,
            page_number: None,
            dest_top: None,
        };
        assert_eq!(entry.level, 1);
        assert!(entry.page_number.is_none());
        assert_eq!(entry.shifted(10).page_number, None);
    }

    #[test]
    fn shifted_moves_page_only() {
        let entry = OutlineEntry {
            title: "Chapter 2".to_string(),
            level: 0,
            page_number: Some(3),
            dest_top: Some(700.0),
        };
        let shifted = entry.shifted(5);
        assert_eq!(shifted.page_number, Some(8));
        assert_eq!(shifted.title, "Chapter 2");
        assert_eq!(shifted.dest_top, Some(700.0));
    }
}
