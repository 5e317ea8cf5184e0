//! Page annotations and resolved link targets.

use std::fmt;

use crate::BBox;

macro_rules! annotation_types {
    ($($(#[$doc:meta])* $variant:ident),* $(,)?) => {
        /// PDF annotation subtypes folio distinguishes.
        ///
        /// Any other `/Subtype` name is kept in [`AnnotationType::Other`].
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum AnnotationType {
            $($(#[$doc])* $variant,)*
            Other(String),
        }

        impl AnnotationType {
            /// Map a `/Subtype` name to its annotation type.
            pub fn from_subtype(subtype: &str) -> Self {
                match subtype {
                    $(stringify!($variant) => Self::$variant,)*
                    other => Self::Other(other.to_string()),
                }
            }

            /// The `/Subtype` name this type was parsed from.
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                    Self::Other(name) => name,
                }
            }
        }
    };
}

annotation_types! {
    /// Sticky note.
    Text,
    Link,
    FreeText,
    Highlight,
    Underline,
    StrikeOut,
    Stamp,
    Square,
    Circle,
    /// Freehand drawing.
    Ink,
    Popup,
    /// Form field.
    Widget,
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An annotation on one page. `bbox` is in the page's PDF space.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    pub annot_type: AnnotationType,
    pub bbox: BBox,
    /// `/Contents`
    pub contents: Option<String>,
    /// `/T`
    pub author: Option<String>,
    /// `/M`, as a raw PDF date string.
    pub date: Option<String>,
    pub raw_subtype: String,
}

/// Where a link annotation points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkTarget {
    Uri(String),
    /// Zero-based page; logical once returned by a document.
    Page(usize),
    /// Named destination that could not be resolved to a page.
    Named(String),
    /// File referenced by a remote GoTo or Launch action.
    RemoteFile(String),
}

impl LinkTarget {
    /// Move a page target by `offset` pages; other targets are unchanged.
    pub fn shifted(self, offset: usize) -> LinkTarget {
        match self {
            LinkTarget::Page(p) => LinkTarget::Page(p + offset),
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperlink {
    pub bbox: BBox,
    pub target: LinkTarget,
}
