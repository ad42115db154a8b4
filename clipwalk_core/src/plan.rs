// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: an ordered sequence of draw items for one pass.

use alloc::vec::Vec;
use core::ops::ControlFlow;

use kurbo::{Affine, Rect};

use crate::clip::ClipRegion;
use crate::draw::{Draw, DrawContext};
use crate::tree::{ContentId, NodeId};

/// A single draw command in the render plan.
///
/// Items are produced in back-to-front order, matching the tree's paint
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderItem {
    /// The node this item originates from.
    pub node: NodeId,
    /// The content to draw (if any; pure containers have `None`).
    pub content: Option<ContentId>,
    /// Depth below the traversal root.
    pub depth: u32,
    /// Local-to-world transform.
    pub world_transform: Affine,
    /// World-space bounding box.
    pub world_rect: Rect,
    /// World-space clip to paint under.
    pub clip: ClipRegion,
}

impl From<&DrawContext> for RenderItem {
    fn from(ctx: &DrawContext) -> Self {
        Self {
            node: ctx.node,
            content: ctx.content,
            depth: ctx.depth,
            world_transform: ctx.world_transform,
            world_rect: ctx.world_rect,
            clip: ctx.clip,
        }
    }
}

/// An ordered list of draw commands for a single traversal.
///
/// A `RenderPlan` is itself a [`Draw`] collaborator: hand it to
/// [`Culler::render`](crate::render::Culler::render) and it records every
/// visible node. Backends replay the items afterwards.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Draw items in back-to-front order.
    pub items: Vec<RenderItem>,
}

impl RenderPlan {
    /// Creates an empty render plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns whether `node` was drawn.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.items.iter().any(|item| item.node == node)
    }

    /// Returns the drawn nodes in paint order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.items.iter().map(|item| item.node)
    }
}

impl Draw for RenderPlan {
    fn draw(&mut self, ctx: &DrawContext) -> ControlFlow<()> {
        self.items.push(RenderItem::from(ctx));
        ControlFlow::Continue(())
    }
}
