//! The `/Info` dictionary of a document's first file.

/// Values from a PDF `/Info` dictionary.
///
/// Dates are kept as raw PDF date strings (`D:YYYYMMDDHHmmSSOHH'mm'`).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
}

impl DocumentMetadata {
    /// The present entries as `(/Info key, value)` pairs, in dictionary
    /// order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Keywords", &self.keywords),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
            ("CreationDate", &self.creation_date),
            ("ModDate", &self.mod_date),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }
}
