//! Geometric primitives shared across the workspace.

/// Bounding box in PDF user space.
///
/// Coordinates keep the PDF array order `[x0 y0 x1 y1]`:
/// - `x0`: left edge
/// - `top`: lower y value as stored in the PDF
/// - `x1`: right edge
/// - `bottom`: upper y value as stored in the PDF
///
/// Use [`BBox::normalized`] when the source array may list corners in
/// any order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Return a copy with `x0 <= x1` and `top <= bottom`.
    pub fn normalized(&self) -> BBox {
        BBox {
            x0: self.x0.min(self.x1),
            top: self.top.min(self.bottom),
            x1: self.x0.max(self.x1),
            bottom: self.top.max(self.bottom),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Width divided by height, or 0.0 for a box with no height.
    pub fn aspect_ratio(&self) -> f64 {
        let height = self.height();
        if height == 0.0 {
            0.0
        } else {
            self.width() / height
        }
    }

    /// A degenerate page box (zero or negative extent) counts as empty.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Overlap of two boxes, or `None` when it has no area. Used to clip a
    /// CropBox to its MediaBox.
    pub fn intersection(&self, other: &BBox) -> Option<BBox> {
        let bbox = BBox {
            x0: self.x0.max(other.x0),
            top: self.top.max(other.top),
            x1: self.x1.min(other.x1),
            bottom: self.bottom.min(other.bottom),
        };
        if bbox.is_empty() { None } else { Some(bbox) }
    }
}

/// The size class a page is being rendered at.
///
/// Hosts pass this to overlay hooks so they can skip drawing for small
/// renditions such as thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderSize {
    /// Full page rendering.
    #[default]
    Native,
    /// Thumbnail strip rendering.
    Thumbnail,
    /// Very small previews (page scrubber).
    Tiny,
}
