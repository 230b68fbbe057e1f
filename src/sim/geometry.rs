//! Axis-aligned rectangles in scene space
//!
//! Scene space has x growing to the right and y growing up from the ground
//! line, so `y` is a rectangle's bottom edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Negative sizes are clamped to zero
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Build from a corner and a size
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// No interior area
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Strict overlap test, see [`overlaps`]
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }
}

/// Returns true if the rectangles share interior area.
///
/// Intervals are half-open: rectangles that only touch along an edge do not
/// overlap, and a zero-sized rectangle never overlaps anything.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }
    let in_horizontal_bounds = a.x < b.x + b.width && a.x + a.width > b.x;
    let in_vertical_bounds = a.y < b.y + b.height && a.y + a.height > b.y;
    in_horizontal_bounds && in_vertical_bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 1.0, 1.0);
        assert!(overlaps(&outer, &inner));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let above = Rect::new(0.0, 10.0, 10.0, 10.0);
        let corner = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &above));
        assert!(!overlaps(&a, &corner));
    }

    #[test]
    fn test_degenerate_rect_never_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let flat = Rect::new(2.0, 2.0, 5.0, 0.0);
        let thin = Rect::new(2.0, 2.0, 0.0, 5.0);
        assert!(!overlaps(&a, &flat));
        assert!(!overlaps(&a, &thin));
        assert!(!overlaps(&flat, &flat));
    }

    #[test]
    fn test_negative_size_clamped() {
        let r = Rect::new(1.0, 2.0, -3.0, -4.0);
        assert_eq!(r.size(), Vec2::ZERO);
        assert_eq!(r.max(), r.min());
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-100.0f32..100.0, -100.0f32..100.0, 0.0f32..50.0, 0.0f32..50.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_edge_neighbours_never_overlap(a in rect_strategy(), w in 0.0f32..50.0, h in 0.0f32..50.0) {
            let right = Rect::new(a.x + a.width, a.y, w, h);
            let above = Rect::new(a.x, a.y + a.height, w, h);
            prop_assert!(!overlaps(&a, &right));
            prop_assert!(!overlaps(&a, &above));
        }

        #[test]
        fn prop_zero_sized_rect_never_overlaps(
            a in rect_strategy(),
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
            len in 0.0f32..50.0,
        ) {
            let flat = Rect::new(x, y, len, 0.0);
            let thin = Rect::new(x, y, 0.0, len);
            prop_assert!(!overlaps(&a, &flat));
            prop_assert!(!overlaps(&flat, &a));
            prop_assert!(!overlaps(&a, &thin));
            prop_assert!(!overlaps(&thin, &a));
        }
    }
}
