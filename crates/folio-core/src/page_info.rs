//! Cached per-page geometry.
//!
//! Provides [`PageInfo`], the value a document caches for every logical page,
//! and [`Rotation`] for the page `/Rotate` entry.

use crate::geometry::BBox;

/// Page rotation, clockwise, in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Build a rotation from a raw `/Rotate` value.
    ///
    /// The value is normalized modulo 360 (so `-90` becomes `270`). Values
    /// that are not a multiple of 90 round down to the previous quarter turn.
    pub fn from_degrees(degrees: i64) -> Self {
        match degrees.rem_euclid(360) / 90 {
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            3 => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }

    /// The rotation in degrees: 0, 90, 180, or 270.
    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// True for 90 and 270, where displayed width and height are swapped.
    pub fn is_quarter_turn(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Cached geometry for a single logical page.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageInfo {
    /// Zero-based logical page index.
    pub page: usize,
    /// Visible page box (CropBox clipped to MediaBox) in unrotated PDF space.
    pub rect: BBox,
    /// Page rotation.
    pub rotation: Rotation,
}

impl PageInfo {
    pub fn new(page: usize, rect: BBox, rotation: Rotation) -> Self {
        Self {
            page,
            rect,
            rotation,
        }
    }

    /// Page `(width, height)` as displayed, after applying rotation.
    pub fn display_size(&self) -> (f64, f64) {
        let (w, h) = (self.rect.width(), self.rect.height());
        if self.rotation.is_quarter_turn() {
            (h, w)
        } else {
            (w, h)
        }
    }

    /// Displayed width divided by displayed height.
    pub fn display_aspect_ratio(&self) -> f64 {
        let (w, h) = self.display_size();
        if h == 0.0 { 0.0 } else { w / h }
    }

    /// Copy this geometry onto another logical page index.
    pub fn for_page(&self, page: usize) -> PageInfo {
        PageInfo { page, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_from_standard_values() {
        assert_eq!(Rotation::from_degrees(0), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(90), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(180), Rotation::Deg180);
        assert_eq!(Rotation::from_degrees(270), Rotation::Deg270);
    }

    #[test]
    fn rotation_wraps_large_and_negative_values() {
        assert_eq!(Rotation::from_degrees(450), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(-90), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(-360), Rotation::Deg0);
    }

    #[test]
    fn rotation_rounds_down_odd_values() {
        assert_eq!(Rotation::from_degrees(45), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(200), Rotation::Deg180);
    }

    #[test]
    fn display_size_swaps_on_quarter_turn() {
        let rect = BBox::new(0.0, 0.0, 612.0, 792.0);
        let upright = PageInfo::new(0, rect, Rotation::Deg0);
        let turned = PageInfo::new(0, rect, Rotation::Deg90);
        assert_eq!(upright.display_size(), (612.0, 792.0));
        assert_eq!(turned.display_size(), (792.0, 612.0));
        assert_eq!(
            PageInfo::new(0, rect, Rotation::Deg180).display_size(),
            (612.0, 792.0)
        );
    }

    #[test]
    fn for_page_rekeys_geometry() {
        let info = PageInfo::new(0, BBox::new(0.0, 0.0, 100.0, 200.0), Rotation::Deg270);
        let moved = info.for_page(7);
        assert_eq!(moved.page, 7);
        assert_eq!(moved.rect, info.rect);
        assert_eq!(moved.rotation, Rotation::Deg270);
    }
}
