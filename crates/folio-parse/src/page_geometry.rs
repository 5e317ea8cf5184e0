//! Page box resolution: MediaBox, CropBox and rotation.
//!
//! Combines the raw page boxes into the visible page rectangle that a
//! document caches per page.

use folio_core::{BBox, PageInfo, Rotation};

/// Visible page geometry computed from the raw page boxes.
///
/// # Resolution rules
///
/// 1. Box corners are normalized (`x0 <= x1`, `top <= bottom`).
/// 2. The CropBox is clipped to the MediaBox.
/// 3. A missing CropBox, or one that does not overlap the MediaBox,
///    falls back to the MediaBox.
///
/// # Example
///
/// ```
/// use folio_core::{BBox, Rotation};
/// use folio_parse::page_geometry::PageGeometry;
///
/// let media_box = BBox::new(0.0, 0.0, 612.0, 792.0);
/// let geo = PageGeometry::new(media_box, None, 90);
///
/// assert_eq!(geo.rotation(), Rotation::Deg90);
/// assert_eq!(geo.width(), 792.0);
/// assert_eq!(geo.height(), 612.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    rect: BBox,
    rotation: Rotation,
}

impl PageGeometry {
    /// Create a new `PageGeometry` from page metadata.
    ///
    /// * `media_box` - Page MediaBox as raw PDF coordinates.
    /// * `crop_box` - Optional CropBox (same coordinate convention).
    /// * `rotation` - Raw `/Rotate` value, normalized via [`Rotation::from_degrees`].
    pub fn new(media_box: BBox, crop_box: Option<BBox>, rotation: i64) -> Self {
        let media = media_box.normalized();
        let rect = crop_box
            .and_then(|crop| media.intersection(&crop.normalized()))
            .unwrap_or(media);

        Self {
            rect,
            rotation: Rotation::from_degrees(rotation),
        }
    }

    /// Visible page rectangle in unrotated PDF space.
    pub fn rect(&self) -> BBox {
        self.rect
    }

    /// Normalized page rotation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Visible page width after rotation.
    pub fn width(&self) -> f64 {
        if self.rotation.is_quarter_turn() {
            self.rect.height()
        } else {
            self.rect.width()
        }
    }

    /// Visible page height after rotation.
    pub fn height(&self) -> f64 {
        if self.rotation.is_quarter_turn() {
            self.rect.width()
        } else {
            self.rect.height()
        }
    }

    /// Package this geometry as the cache entry for logical page `page`.
    pub fn page_info(&self, page: usize) -> PageInfo {
        PageInfo::new(page, self.rect, self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LETTER: BBox = BBox {
        x0: 0.0,
        top: 0.0,
        x1: 612.0,
        bottom: 792.0,
    };

    #[test]
    fn media_box_only() {
        let geo = PageGeometry::new(LETTER, None, 0);
        assert_eq!(geo.rect(), LETTER);
        assert_eq!(geo.width(), 612.0);
        assert_eq!(geo.height(), 792.0);
        assert_eq!(geo.rotation(), Rotation::Deg0);
    }

    #[test]
    fn crop_box_inside_media_box() {
        let crop = BBox::new(50.0, 50.0, 562.0, 742.0);
        let geo = PageGeometry::new(LETTER, Some(crop), 0);
        assert_eq!(geo.rect(), crop);
        assert_eq!(geo.width(), 512.0);
    }

    #[test]
    fn crop_box_clipped_to_media_box() {
        let crop = BBox::new(-20.0, 100.0, 700.0, 900.0);
        let geo = PageGeometry::new(LETTER, Some(crop), 0);
        assert_eq!(geo.rect(), BBox::new(0.0, 100.0, 612.0, 792.0));
    }

    #[test]
    fn disjoint_crop_box_falls_back_to_media_box() {
        let crop = BBox::new(1000.0, 1000.0, 1100.0, 1100.0);
        let geo = PageGeometry::new(LETTER, Some(crop), 0);
        assert_eq!(geo.rect(), LETTER);
    }

    #[test]
    fn inverted_media_box_is_normalized() {
        let geo = PageGeometry::new(BBox::new(612.0, 792.0, 0.0, 0.0), None, 0);
        assert_eq!(geo.rect(), LETTER);
    }

    #[test]
    fn rotation_swaps_display_dimensions() {
        for (raw, swapped) in [(0, false), (90, true), (180, false), (270, true), (-90, true)] {
            let geo = PageGeometry::new(LETTER, None, raw);
            if swapped {
                assert_eq!((geo.width(), geo.height()), (792.0, 612.0), "rotate {raw}");
            } else {
                assert_eq!((geo.width(), geo.height()), (612.0, 792.0), "rotate {raw}");
            }
        }
    }

    #[test]
    fn page_info_carries_page_index() {
        let info = PageGeometry::new(LETTER, None, 180).page_info(4);
        assert_eq!(info.page, 4);
        assert_eq!(info.rect, LETTER);
        assert_eq!(info.rotation, Rotation::Deg180);
    }
}
