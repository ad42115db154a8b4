// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned clip regions in root-surface space.

use kurbo::{Point, Rect};

/// Minimum overlap, per axis, for a rectangle to count as inside a clip.
///
/// Overlaps at or below this extent are treated as touching edges.
pub const OVERLAP_EPSILON: f64 = 1e-9;

/// The region a subtree is permitted to paint into.
///
/// `Unbounded` and `Empty` are distinct sentinels: the first admits
/// everything, the second admits nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ClipRegion {
    /// No clip has been established; the visible area is infinite.
    #[default]
    Unbounded,
    /// A rectangle with strictly positive area.
    Rect(Rect),
    /// Nothing is visible.
    Empty,
}

impl ClipRegion {
    /// Creates a clip from a rectangle.
    ///
    /// Zero-area, inverted, and NaN rectangles become [`Empty`](Self::Empty).
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let width = rect.x1 - rect.x0;
        let height = rect.y1 - rect.y0;
        // NaN comparisons are false, so NaN rects fall through to Empty.
        if width > 0.0 && height > 0.0 {
            Self::Rect(rect)
        } else {
            Self::Empty
        }
    }

    /// Returns `true` if nothing can be visible through this clip.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if this clip admits everything.
    #[inline]
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Returns the clip rectangle.
    ///
    /// `None` means unbounded; an empty clip reports [`Rect::ZERO`].
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Unbounded => None,
            Self::Rect(r) => Some(*r),
            Self::Empty => Some(Rect::ZERO),
        }
    }

    /// Returns the largest region contained in both `self` and `other`.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Empty) => Self::Empty,
            (Self::Unbounded, c) | (c, Self::Unbounded) => *c,
            (Self::Rect(a), Self::Rect(b)) => Self::from_rect(Rect::new(
                a.x0.max(b.x0),
                a.y0.max(b.y0),
                a.x1.min(b.x1),
                a.y1.min(b.y1),
            )),
        }
    }

    /// Intersects the clip with a rectangle.
    #[must_use]
    pub fn intersect_rect(&self, rect: Rect) -> Self {
        self.intersect(&Self::from_rect(rect))
    }

    /// Returns `true` if `rect` overlaps the clip by a positive area.
    ///
    /// Rectangles that only touch an edge of the clip do not overlap it.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, rect: Rect) -> bool {
        self.overlaps_within(rect, OVERLAP_EPSILON)
    }

    /// Like [`overlaps`](Self::overlaps), with an explicit per-axis tolerance.
    ///
    /// Inverted and NaN rectangles never overlap.
    #[must_use]
    pub fn overlaps_within(&self, rect: Rect, epsilon: f64) -> bool {
        // `max`/`min` discard NaN operands, so reject them up front.
        let well_formed = rect.x0 < rect.x1 && rect.y0 < rect.y1;
        if !well_formed {
            return false;
        }
        let (x0, y0, x1, y1) = match self {
            Self::Empty => return false,
            Self::Unbounded => (rect.x0, rect.y0, rect.x1, rect.y1),
            Self::Rect(c) => (
                rect.x0.max(c.x0),
                rect.y0.max(c.y0),
                rect.x1.min(c.x1),
                rect.y1.min(c.y1),
            ),
        };
        x1 - x0 > epsilon && y1 - y0 > epsilon
    }

    /// Returns `true` if `rect` lies entirely within the clip.
    #[must_use]
    pub fn contains_rect(&self, rect: Rect) -> bool {
        match self {
            Self::Empty => false,
            Self::Unbounded => true,
            Self::Rect(c) => {
                rect.x0 >= c.x0 && rect.y0 >= c.y0 && rect.x1 <= c.x1 && rect.y1 <= c.y1
            }
        }
    }

    /// Returns `true` if `point` lies inside the clip (half-open on the far
    /// edges).
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        match self {
            Self::Empty => false,
            Self::Unbounded => true,
            Self::Rect(c) => c.contains(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> ClipRegion {
        ClipRegion::from_rect(Rect::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn default_is_unbounded() {
        assert_eq!(ClipRegion::default(), ClipRegion::Unbounded);
        assert_eq!(ClipRegion::default().bounds(), None);
    }

    #[test]
    fn zero_area_rect_is_empty() {
        assert!(ClipRegion::from_rect(Rect::new(5.0, 5.0, 5.0, 20.0)).is_empty());
        assert!(ClipRegion::from_rect(Rect::new(10.0, 0.0, 0.0, 10.0)).is_empty());
        assert!(ClipRegion::from_rect(Rect::new(f64::NAN, 0.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn empty_is_distinguishable_from_unbounded() {
        let empty = ClipRegion::Empty;
        assert_eq!(empty.bounds(), Some(Rect::ZERO));
        assert!(!empty.is_unbounded());
        assert!(!empty.overlaps(Rect::new(-1e9, -1e9, 1e9, 1e9)));
    }

    #[test]
    fn intersect_overlapping() {
        let nested = ClipRegion::from_rect(Rect::new(50.0, 50.0, 150.0, 150.0));
        assert_eq!(
            container().intersect(&nested),
            ClipRegion::Rect(Rect::new(50.0, 50.0, 100.0, 100.0))
        );
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let far = ClipRegion::from_rect(Rect::new(110.0, 110.0, 120.0, 120.0));
        assert!(container().intersect(&far).is_empty());
    }

    #[test]
    fn intersect_touching_is_empty() {
        let touching = ClipRegion::from_rect(Rect::new(100.0, 0.0, 200.0, 100.0));
        assert!(container().intersect(&touching).is_empty());
    }

    #[test]
    fn unbounded_is_neutral_for_intersect() {
        assert_eq!(ClipRegion::Unbounded.intersect(&container()), container());
        assert_eq!(container().intersect(&ClipRegion::Unbounded), container());
        assert!(ClipRegion::Unbounded.intersect(&ClipRegion::Empty).is_empty());
    }

    #[test]
    fn small_positive_overlap_is_visible() {
        assert!(container().overlaps(Rect::new(98.0, 98.0, 108.0, 108.0)));
        assert!(container().overlaps(Rect::new(99.999, 99.999, 110.0, 110.0)));
    }

    #[test]
    fn touching_edge_is_not_visible() {
        assert!(!container().overlaps(Rect::new(100.0, 100.0, 110.0, 110.0)));
        assert!(!container().overlaps(Rect::new(100.0, 0.0, 110.0, 10.0)));
    }

    #[test]
    fn zero_area_rect_never_overlaps() {
        assert!(!container().overlaps(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert!(!ClipRegion::Unbounded.overlaps(Rect::new(50.0, 50.0, 60.0, 50.0)));
    }

    #[test]
    fn nan_rect_never_overlaps() {
        let nan = Rect::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
        assert!(!container().overlaps(nan));
        assert!(!ClipRegion::Unbounded.overlaps(nan));
        assert!(!container().overlaps(Rect::new(10.0, 10.0, f64::NAN, 20.0)));
        assert!(!container().overlaps(Rect::new(20.0, 10.0, 10.0, 20.0)));
    }

    #[test]
    fn unbounded_overlaps_any_positive_rect() {
        assert!(ClipRegion::Unbounded.overlaps(Rect::new(-1e6, -1e6, -1e6 + 1.0, -1e6 + 1.0)));
    }

    #[test]
    fn containment() {
        assert!(container().contains_rect(Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!container().contains_rect(Rect::new(98.0, 98.0, 108.0, 108.0)));
        assert!(container().contains_point(Point::new(0.0, 0.0)));
        assert!(!container().contains_point(Point::new(100.0, 50.0)));
        assert!(!ClipRegion::Empty.contains_point(Point::ZERO));
    }
}
