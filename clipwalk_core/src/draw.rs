// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing collaborator invoked for each visible node.

use core::ops::ControlFlow;

use kurbo::{Affine, Rect};

use crate::clip::ClipRegion;
use crate::tree::{ContentId, NodeId};

/// Everything a drawing collaborator needs to paint one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawContext {
    /// The node being drawn.
    pub node: NodeId,
    /// The node's drawable content, if any.
    pub content: Option<ContentId>,
    /// Distance from the traversal root (the root is 0).
    pub depth: u32,
    /// Maps the node's local space (origin at its top-left corner) to world
    /// space.
    pub world_transform: Affine,
    /// World-space bounding box of the node.
    pub world_rect: Rect,
    /// Clip the node paints under, in world space.
    ///
    /// For a clip boundary this already includes the node's own rect.
    pub clip: ClipRegion,
}

/// Receives one call per visible node, parents before children and siblings
/// in order.
pub trait Draw {
    /// Paints one node.
    ///
    /// Return [`ControlFlow::Break`] to stop the traversal. Draws already
    /// issued stand; no further nodes are visited.
    fn draw(&mut self, ctx: &DrawContext) -> ControlFlow<()>;
}

impl<F> Draw for F
where
    F: FnMut(&DrawContext) -> ControlFlow<()>,
{
    fn draw(&mut self, ctx: &DrawContext) -> ControlFlow<()> {
        self(ctx)
    }
}
