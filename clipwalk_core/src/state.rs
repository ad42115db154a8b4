// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accumulated transform and clip threaded through the traversal.
//!
//! A [`TraversalState`] is a plain value. Each node derives a fresh state for
//! its children with [`TraversalState::for_children`], so siblings never see
//! each other's contributions and no ancestor state is mutated in place.

use kurbo::{Affine, Rect};

use crate::clip::ClipRegion;
use crate::transform::{compose, local_to_parent, map_rect};
use crate::tree::VisualNode;

/// The `(transform, clip)` pair inherited by a node from its ancestors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraversalState {
    /// Clip in root-surface space.
    pub clip: ClipRegion,
    /// Maps the parent's local space into root-surface space.
    pub transform: Affine,
}

/// Where a node lands in root-surface space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Maps the node's local space into root-surface space.
    pub world_transform: Affine,
    /// Axis-aligned bounding box of the node's rectangle in root space.
    pub world_rect: Rect,
}

impl TraversalState {
    /// Identity transform, unbounded clip.
    pub const ROOT: Self = Self {
        clip: ClipRegion::Unbounded,
        transform: Affine::IDENTITY,
    };

    /// Creates a state from its parts.
    #[inline]
    #[must_use]
    pub const fn new(transform: Affine, clip: ClipRegion) -> Self {
        Self { clip, transform }
    }

    /// Identity transform clipped to `viewport`.
    #[inline]
    #[must_use]
    pub const fn with_viewport(viewport: ClipRegion) -> Self {
        Self {
            clip: viewport,
            transform: Affine::IDENTITY,
        }
    }

    /// Places `node` under this state.
    #[must_use]
    pub fn place(&self, node: &VisualNode) -> Placement {
        let size = node.bounds.size();
        let local = local_to_parent(
            node.bounds.origin(),
            node.render_transform,
            node.transform_origin.resolve(size),
        );
        let world_transform = compose(self.transform, local);
        Placement {
            world_transform,
            world_rect: map_rect(world_transform, size.to_rect()),
        }
    }

    /// Derives the state handed to a placed node's children.
    ///
    /// A clipping node narrows the inherited clip to its own world rect; a
    /// non-clipping node passes the inherited clip through unchanged.
    #[must_use]
    pub fn for_children(&self, placement: &Placement, clip_to_bounds: bool) -> Self {
        let clip = if clip_to_bounds {
            self.clip.intersect_rect(placement.world_rect)
        } else {
            self.clip
        };
        Self {
            clip,
            transform: placement.world_transform,
        }
    }
}

impl Default for TraversalState {
    #[inline]
    fn default() -> Self {
        Self::ROOT
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::*;
    use crate::transform::TransformOrigin;

    fn node(x: f64, y: f64, w: f64, h: f64) -> VisualNode {
        VisualNode {
            bounds: Rect::from_origin_size(Point::new(x, y), Size::new(w, h)),
            ..VisualNode::default()
        }
    }

    #[test]
    fn root_places_node_at_its_bounds() {
        let p = TraversalState::ROOT.place(&node(98.0, 98.0, 10.0, 10.0));
        assert_eq!(p.world_rect, Rect::new(98.0, 98.0, 108.0, 108.0));
        assert_eq!(p.world_transform, Affine::translate((98.0, 98.0)));
    }

    #[test]
    fn offsets_accumulate_through_parents() {
        let parent = node(50.0, 50.0, 100.0, 100.0);
        let child = node(50.0, 50.0, 10.0, 10.0);
        let p = TraversalState::ROOT.place(&parent);
        let s = TraversalState::ROOT.for_children(&p, true);
        assert_eq!(s.place(&child).world_rect, Rect::new(100.0, 100.0, 110.0, 110.0));
    }

    #[test]
    fn render_transform_applies_before_offset() {
        let mut n = node(110.0, 110.0, 10.0, 10.0);
        n.render_transform = Affine::translate((-100.0, -100.0));
        let p = TraversalState::ROOT.place(&n);
        assert_eq!(p.world_rect, Rect::new(10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn scale_about_center_grows_both_ways() {
        let mut n = node(10.0, 10.0, 10.0, 10.0);
        n.render_transform = Affine::scale(2.0);
        n.transform_origin = TransformOrigin::CENTER;
        let p = TraversalState::ROOT.place(&n);
        assert_eq!(p.world_rect, Rect::new(5.0, 5.0, 25.0, 25.0));
    }

    #[test]
    fn clipping_node_narrows_child_clip() {
        let viewport = ClipRegion::from_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        let s = TraversalState::with_viewport(viewport);
        let p = s.place(&node(50.0, 50.0, 100.0, 100.0));
        assert_eq!(
            s.for_children(&p, true).clip,
            ClipRegion::Rect(Rect::new(50.0, 50.0, 100.0, 100.0))
        );
        assert_eq!(s.for_children(&p, false).clip, viewport);
    }

    #[test]
    fn sibling_states_are_independent() {
        let parent = TraversalState::ROOT;
        let a = parent.for_children(&parent.place(&node(10.0, 0.0, 5.0, 5.0)), true);
        let b = parent.for_children(&parent.place(&node(0.0, 10.0, 5.0, 5.0)), true);
        assert_eq!(parent, TraversalState::ROOT);
        assert_ne!(a.clip, b.clip);
        assert_eq!(a.transform * Point::ZERO, Point::new(10.0, 0.0));
        assert_eq!(b.transform * Point::ZERO, Point::new(0.0, 10.0));
    }
}
