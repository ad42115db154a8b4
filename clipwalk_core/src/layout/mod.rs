// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout pass: resolves every node's `bounds`.
//!
//! Layout follows a drain-relayout pattern:
//!
//! 1. Drain the [`LAYOUT`](crate::dirty::LAYOUT) channel.
//! 2. Collect the distinct roots that own a drained node.
//! 3. For each such root, **measure** with the caller's available size, then
//!    **arrange** into `Rect(0, 0, desired)`.
//!
//! Measure asks each node how much space it wants, margins included.
//! Arrange hands each node a slot in its parent's space, removes the margin
//! from it (negative margins grow the slot past the parent's box), applies
//! explicit sizes and alignment, and records the result as `bounds`.
//!
//! A clean tree does no work.

mod arrange;
mod measure;

use alloc::vec::Vec;

use kurbo::{Insets, Rect, Size};

use crate::dirty;
use crate::trace::{LayoutEvent, Tracer};
use crate::tree::{INVALID, VisualTree};

/// The result of a single [`VisualTree::update_layout`] call.
///
/// Node lists hold raw slot indices; see
/// [`VisualTree::node_at`](crate::tree::VisualTree::node_at).
#[derive(Clone, Debug, Default)]
pub struct LayoutChanges {
    /// Roots that were laid out.
    pub roots: Vec<u32>,
    /// Nodes whose `bounds` changed.
    pub moved: Vec<u32>,
    /// Number of nodes measured.
    pub measured: u32,
    /// Number of nodes arranged.
    pub arranged: u32,
}

impl LayoutChanges {
    /// Clears all change lists and counters.
    pub fn clear(&mut self) {
        self.roots.clear();
        self.moved.clear();
        self.measured = 0;
        self.arranged = 0;
    }

    /// Returns `true` if no layout work was done.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl VisualTree {
    /// Lays out every root whose subtree was invalidated since the last pass.
    ///
    /// Roots are measured against `available` (use
    /// `Size::new(f64::INFINITY, f64::INFINITY)` to let them size to content)
    /// and arranged at the origin with their desired size.
    pub fn update_layout(&mut self, available: Size) -> LayoutChanges {
        let mut changes = LayoutChanges::default();
        self.update_layout_into(available, &mut changes, &mut Tracer::none());
        changes
    }

    /// Like [`update_layout`](Self::update_layout), but reuses a
    /// caller-provided buffer and reports a [`LayoutEvent`] to `tracer`.
    pub fn update_layout_into(
        &mut self,
        available: Size,
        changes: &mut LayoutChanges,
        tracer: &mut Tracer<'_>,
    ) {
        changes.clear();

        let dirty_nodes: Vec<u32> = self
            .dirty
            .drain(dirty::LAYOUT)
            .affected()
            .deterministic()
            .run()
            .collect();

        for idx in dirty_nodes {
            if idx >= self.len || self.free_list.contains(&idx) {
                continue;
            }
            let root = self.root_of(idx);
            if !changes.roots.contains(&root) {
                changes.roots.push(root);
            }
        }

        for i in 0..changes.roots.len() {
            let root = changes.roots[i];
            let desired = self.measure(root, available, changes);
            self.arrange(root, desired.to_rect(), changes);
        }

        if !changes.is_empty() {
            tracer.layout(&LayoutEvent {
                roots: u32::try_from(changes.roots.len()).unwrap_or(u32::MAX),
                measured: changes.measured,
                arranged: changes.arranged,
                moved: u32::try_from(changes.moved.len()).unwrap_or(u32::MAX),
            });
        }
    }

    /// Walks parent links up to the root owning `idx`.
    fn root_of(&self, mut idx: u32) -> u32 {
        while self.parent[idx as usize] != INVALID {
            idx = self.parent[idx as usize];
        }
        idx
    }
}

/// Shrinks `size` by `insets`, clamping at zero. Infinite extents stay
/// infinite.
fn deflate(size: Size, insets: Insets) -> Size {
    Size::new(
        (size.width - insets.x0 - insets.x1).max(0.0),
        (size.height - insets.y0 - insets.y1).max(0.0),
    )
}

/// Shrinks `rect` by `insets` without clamping the origin, so negative
/// insets move the origin outward.
fn deflate_rect(rect: Rect, insets: Insets) -> Rect {
    let size = deflate(rect.size(), insets);
    Rect::from_origin_size((rect.x0 + insets.x0, rect.y0 + insets.y0), size)
}
