//! Host-overridable behavior of a [`Document`].
//!
//! A host customizes a document by implementing [`DocumentHooks`] and
//! attaching it with [`Document::with_hooks`]. Every method has a default,
//! so an implementation only overrides what it needs.

use std::path::PathBuf;

use folio_core::{BBox, RenderSize};

use crate::Document;

/// Overridable callbacks consulted by a [`Document`].
///
/// Hooks may be called from any thread, including rendering threads running
/// concurrently with other document operations. The document holds none of
/// its locks while a hook runs, so hooks may call back into the document.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use std::sync::Arc;
///
/// use folio::{Document, DocumentHooks};
///
/// struct Thumbnails;
///
/// impl DocumentHooks for Thumbnails {
///     fn thumbnail_path(&self, _doc: &Document, page: usize) -> Option<PathBuf> {
///         Some(PathBuf::from(format!("thumbs/{page}.png")))
///     }
/// }
///
/// let doc = Document::new().with_hooks(Arc::new(Thumbnails));
/// # let _ = doc;
/// ```
pub trait DocumentHooks: Send + Sync {
    /// Path of a pre-rendered thumbnail for `page`, if the host has one.
    fn thumbnail_path(&self, _doc: &Document, _page: usize) -> Option<PathBuf> {
        None
    }

    /// Whether [`draw_overlay`](Self::draw_overlay) should run for pages
    /// rendered at `size`.
    fn should_draw_overlay(&self, _doc: &Document, _size: RenderSize) -> bool {
        false
    }

    /// Paint extra content on top of a rendered page.
    fn draw_overlay(
        &self,
        _doc: &Document,
        _canvas: &mut dyn OverlayCanvas,
        _request: &OverlayRequest,
    ) {
    }

    /// Replacement text for `page`. `None` falls back to text extraction.
    fn page_content(&self, _doc: &Document, _page: usize) -> Option<String> {
        None
    }
}

/// Hooks used when the host supplies none.
pub(crate) struct NoHooks;

impl DocumentHooks for NoHooks {}

/// Parameters of one overlay drawing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayRequest {
    /// Region of the page being drawn, in page space.
    pub rect: BBox,
    /// Zero-based logical page.
    pub page: usize,
    /// Current zoom factor (1.0 is 100%).
    pub zoom_scale: f64,
    /// Size class of the rendition.
    pub size: RenderSize,
}

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque color from RGB components.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Return the same color with alpha `a`.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// A drawing surface handed to [`DocumentHooks::draw_overlay`].
///
/// Coordinates are in page space, as in [`OverlayRequest::rect`].
pub trait OverlayCanvas {
    fn fill_rect(&mut self, rect: BBox, color: Color);

    fn stroke_rect(&mut self, rect: BBox, color: Color, line_width: f64);

    /// Draw `text` with its baseline starting at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, font_size: f64, color: Color);
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: BBox,
        color: Color,
    },
    StrokeRect {
        rect: BBox,
        color: Color,
        line_width: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
        color: Color,
    },
}

/// An [`OverlayCanvas`] that records every call instead of drawing.
///
/// Useful for hosts that replay overlays onto their own surface, and in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded operations, in call order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Take the recorded operations, leaving the canvas empty.
    pub fn take(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }
}

impl OverlayCanvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: BBox, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: BBox, color: Color, line_width: f64) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, font_size: f64, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            font_size,
            color,
        });
    }
}
