// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node records and layout input types.

use kurbo::{Affine, Insets, Rect};

use super::id::ContentId;
use crate::error::InvalidGeometry;
use crate::transform::{self, TransformOrigin};

/// The render inputs of one node, as read by the traversal.
///
/// This is a snapshot: [`VisualTree::node`](super::VisualTree::node) copies
/// the current values out of the tree, so the traversal never reaches back
/// into mutable per-property storage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualNode {
    /// Position and size in the parent's coordinate space, as arranged.
    pub bounds: Rect,
    /// Transform applied around [`transform_origin`](Self::transform_origin)
    /// before the node is placed at its bounds.
    pub render_transform: Affine,
    /// Pivot of the render transform.
    pub transform_origin: TransformOrigin,
    /// Whether the node's rect clips its entire subtree.
    pub clip_to_bounds: bool,
    /// Margin consumed by layout. Already folded into `bounds`.
    pub margin: Insets,
    /// Drawable content, forwarded to the drawing collaborator.
    pub content: Option<ContentId>,
}

impl Default for VisualNode {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            render_transform: Affine::IDENTITY,
            transform_origin: TransformOrigin::TOP_LEFT,
            clip_to_bounds: false,
            margin: Insets::ZERO,
            content: None,
        }
    }
}

impl VisualNode {
    /// Checks that the bounds and render transform are well formed.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checking bounds before the transform.
    pub fn validate(&self) -> Result<(), InvalidGeometry> {
        let b = &self.bounds;
        if !(b.x0.is_finite() && b.y0.is_finite() && b.x1.is_finite() && b.y1.is_finite()) {
            return Err(InvalidGeometry::NonFiniteBounds);
        }
        if b.x1 < b.x0 || b.y1 < b.y0 {
            return Err(InvalidGeometry::NegativeSize);
        }
        if !transform::is_finite(self.render_transform) {
            return Err(InvalidGeometry::NonFiniteTransform);
        }
        Ok(())
    }
}

/// How a node sizes and positions its children.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum NodeKind {
    /// Positions each child absolutely using its [`CanvasPosition`].
    ///
    /// A canvas asks for no space of its own; its size comes from an explicit
    /// width and height or from its parent.
    Canvas,
    /// Decorates its children: each child fills the box inside `padding`.
    Border {
        /// Space between the border's edge and its children.
        padding: Insets,
    },
    /// A custom element. Children fill the element's box.
    #[default]
    Element,
}

impl NodeKind {
    /// Whether nodes of this kind clip their subtree unless told otherwise.
    ///
    /// Panels clip; decorators and custom elements do not.
    #[must_use]
    pub const fn default_clip_to_bounds(self) -> bool {
        matches!(self, Self::Canvas)
    }
}

/// Offsets of a child inside a [`NodeKind::Canvas`] parent.
///
/// `left` wins over `right` and `top` over `bottom`. Unset axes place the
/// child at the canvas origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasPosition {
    /// Distance from the canvas's left edge to the child's left edge.
    pub left: Option<f64>,
    /// Distance from the canvas's top edge to the child's top edge.
    pub top: Option<f64>,
    /// Distance from the canvas's right edge to the child's right edge.
    pub right: Option<f64>,
    /// Distance from the canvas's bottom edge to the child's bottom edge.
    pub bottom: Option<f64>,
}

impl CanvasPosition {
    /// Positions a child by its top-left corner.
    #[must_use]
    pub const fn at(left: f64, top: f64) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            right: None,
            bottom: None,
        }
    }
}

/// Placement of a node inside the slot its parent arranges it into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Fill the slot. A node with an explicit size is centred instead.
    #[default]
    Stretch,
    /// Align to the left or top edge.
    Start,
    /// Centre in the slot.
    Center,
    /// Align to the right or bottom edge.
    End,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::*;

    #[test]
    fn default_node_is_valid() {
        assert_eq!(VisualNode::default().validate(), Ok(()));
    }

    #[test]
    fn validate_reports_bounds_problems() {
        let nan = VisualNode {
            bounds: Rect::new(0.0, f64::NAN, 10.0, 10.0),
            ..VisualNode::default()
        };
        assert_eq!(nan.validate(), Err(InvalidGeometry::NonFiniteBounds));

        let inverted = VisualNode {
            bounds: Rect::new(10.0, 0.0, 0.0, 10.0),
            ..VisualNode::default()
        };
        assert_eq!(inverted.validate(), Err(InvalidGeometry::NegativeSize));
    }

    #[test]
    fn validate_reports_transform_problems() {
        let n = VisualNode {
            bounds: Rect::from_origin_size(Point::ZERO, Size::new(1.0, 1.0)),
            render_transform: Affine::scale(f64::INFINITY),
            ..VisualNode::default()
        };
        assert_eq!(n.validate(), Err(InvalidGeometry::NonFiniteTransform));
    }

    #[test]
    fn panels_clip_by_default() {
        assert!(NodeKind::Canvas.default_clip_to_bounds());
        assert!(
            !NodeKind::Border {
                padding: Insets::ZERO
            }
            .default_clip_to_bounds()
        );
        assert!(!NodeKind::Element.default_clip_to_bounds());
    }
}
