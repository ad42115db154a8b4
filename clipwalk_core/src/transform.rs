// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2-D affine composition helpers.
//!
//! Transforms are [`kurbo::Affine`] values. Composition follows matrix
//! multiplication, so `outer * inner` maps a point through `inner` first and
//! `outer` second. The helpers here name the few compositions the layout and
//! traversal passes need.

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// The pivot a node's render transform is applied around.
///
/// A render transform like a rotation or scale is conjugated by a translation
/// to this point, so that the pivot stays fixed in the node's local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOrigin {
    /// A point expressed as a fraction of the node's size (`0.0..=1.0`).
    Relative {
        /// Horizontal fraction of the width.
        x: f64,
        /// Vertical fraction of the height.
        y: f64,
    },
    /// A point in the node's local coordinate space.
    Absolute(Point),
}

impl TransformOrigin {
    /// The node's own top-left corner.
    pub const TOP_LEFT: Self = Self::Relative { x: 0.0, y: 0.0 };

    /// The centre of the node.
    pub const CENTER: Self = Self::Relative { x: 0.5, y: 0.5 };

    /// Resolves the origin to a local point for a node of the given size.
    #[inline]
    #[must_use]
    pub fn resolve(self, size: Size) -> Point {
        match self {
            Self::Relative { x, y } => Point::new(size.width * x, size.height * y),
            Self::Absolute(p) => p,
        }
    }
}

impl Default for TransformOrigin {
    #[inline]
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

/// Returns the transform that applies `inner` first, then `outer`.
#[inline]
#[must_use]
pub fn compose(outer: Affine, inner: Affine) -> Affine {
    outer * inner
}

/// Maps `rect` through `transform` and returns the axis-aligned bounding box
/// of the four transformed corners.
///
/// For translations and axis-aligned scales this is exact. Under rotation or
/// skew it is a conservative envelope: it never excludes a point the
/// transformed rectangle covers.
#[must_use]
pub fn map_rect(transform: Affine, rect: Rect) -> Rect {
    let p0 = transform * Point::new(rect.x0, rect.y0);
    let p1 = transform * Point::new(rect.x1, rect.y0);
    let p2 = transform * Point::new(rect.x0, rect.y1);
    let p3 = transform * Point::new(rect.x1, rect.y1);
    let min_x = p0.x.min(p1.x).min(p2.x).min(p3.x);
    let min_y = p0.y.min(p1.y).min(p2.y).min(p3.y);
    let max_x = p0.x.max(p1.x).max(p2.x).max(p3.x);
    let max_y = p0.y.max(p1.y).max(p2.y).max(p3.y);
    Rect::new(min_x, min_y, max_x, max_y)
}

/// Builds the transform that maps a node's local space into its parent's.
///
/// The render transform is applied around `origin` (in local coordinates),
/// then the result is placed at `offset`, the node's arranged position in the
/// parent:
///
/// ```text
/// translate(offset) · translate(origin) · render_transform · translate(-origin)
/// ```
#[must_use]
pub fn local_to_parent(offset: Point, render_transform: Affine, origin: Point) -> Affine {
    let placed = Affine::translate(offset.to_vec2());
    if render_transform == Affine::IDENTITY {
        return placed;
    }
    let pivot: Vec2 = origin.to_vec2();
    placed * Affine::translate(pivot) * render_transform * Affine::translate(-pivot)
}

/// Is every coefficient of `transform` finite?
#[inline]
#[must_use]
pub fn is_finite(transform: Affine) -> bool {
    transform.as_coeffs().iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        let d = a - b;
        d < 1e-9 && d > -1e-9
    }

    fn rect_close(a: Rect, b: Rect) -> bool {
        close(a.x0, b.x0) && close(a.y0, b.y0) && close(a.x1, b.x1) && close(a.y1, b.y1)
    }

    #[test]
    fn identity_is_neutral() {
        let t = Affine::translate((3.0, 4.0)) * Affine::scale(2.0);
        assert_eq!(compose(Affine::IDENTITY, t), t);
        assert_eq!(compose(t, Affine::IDENTITY), t);
    }

    #[test]
    fn compose_applies_inner_first() {
        let scale = Affine::scale(2.0);
        let shift = Affine::translate((10.0, 0.0));

        // Scale then shift: (1, 0) -> (2, 0) -> (12, 0).
        let p = compose(shift, scale) * Point::new(1.0, 0.0);
        assert_eq!(p, Point::new(12.0, 0.0));

        // Shift then scale: (1, 0) -> (11, 0) -> (22, 0).
        let p = compose(scale, shift) * Point::new(1.0, 0.0);
        assert_eq!(p, Point::new(22.0, 0.0));
    }

    #[test]
    fn map_rect_translation_is_exact() {
        let r = map_rect(
            Affine::translate((98.0, 98.0)),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        );
        assert_eq!(r, Rect::new(98.0, 98.0, 108.0, 108.0));
    }

    #[test]
    fn map_rect_rotation_is_envelope() {
        // A 10x10 square rotated 45 degrees around its top-left corner spans
        // sqrt(2) * 10 horizontally.
        let r = map_rect(
            Affine::rotate(core::f64::consts::FRAC_PI_4),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        );
        let half_diag = 10.0 * core::f64::consts::FRAC_1_SQRT_2;
        assert!(
            rect_close(r, Rect::new(-half_diag, 0.0, half_diag, 2.0 * half_diag)),
            "unexpected envelope {r:?}"
        );
    }

    #[test]
    fn local_to_parent_without_render_transform_is_offset() {
        let t = local_to_parent(Point::new(5.0, 7.0), Affine::IDENTITY, Point::new(3.0, 3.0));
        assert_eq!(t, Affine::translate((5.0, 7.0)));
    }

    #[test]
    fn local_to_parent_translation_ignores_origin() {
        let rt = Affine::translate((-100.0, -100.0));
        let a = local_to_parent(Point::new(110.0, 110.0), rt, Point::ZERO);
        let b = local_to_parent(Point::new(110.0, 110.0), rt, Point::new(5.0, 5.0));
        assert_eq!(a * Point::ZERO, Point::new(10.0, 10.0));
        assert_eq!(b * Point::ZERO, Point::new(10.0, 10.0));
    }

    #[test]
    fn rotation_about_center_keeps_square_in_place() {
        let size = Size::new(10.0, 10.0);
        let origin = TransformOrigin::CENTER.resolve(size);
        let t = local_to_parent(
            Point::new(20.0, 20.0),
            Affine::rotate(core::f64::consts::FRAC_PI_2),
            origin,
        );
        let r = map_rect(t, size.to_rect());
        assert!(
            rect_close(r, Rect::new(20.0, 20.0, 30.0, 30.0)),
            "quarter turn about the centre should map the square onto itself, got {r:?}"
        );
    }

    #[test]
    fn origin_resolves_against_size() {
        let size = Size::new(40.0, 20.0);
        assert_eq!(TransformOrigin::TOP_LEFT.resolve(size), Point::ZERO);
        assert_eq!(TransformOrigin::CENTER.resolve(size), Point::new(20.0, 10.0));
        assert_eq!(
            TransformOrigin::Absolute(Point::new(1.0, 2.0)).resolve(size),
            Point::new(1.0, 2.0)
        );
        assert_eq!(TransformOrigin::default(), TransformOrigin::TOP_LEFT);
    }

    #[test]
    fn non_finite_detected() {
        assert!(is_finite(Affine::IDENTITY));
        assert!(!is_finite(Affine::translate((f64::NAN, 0.0))));
        assert!(!is_finite(Affine::scale(f64::INFINITY)));
    }
}
