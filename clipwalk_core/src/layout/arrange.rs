// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-down placement of measured nodes.

use kurbo::{Rect, Size};

use super::{LayoutChanges, deflate, deflate_rect};
use crate::tree::{Alignment, INVALID, NodeKind, VisualTree};

impl VisualTree {
    /// Places the node at `idx` inside `slot` (in its parent's space) and
    /// arranges its subtree.
    pub(super) fn arrange(&mut self, idx: u32, slot: Rect, changes: &mut LayoutChanges) {
        let i = idx as usize;
        let margin = self.margin[i];
        let avail = deflate_rect(slot, margin);

        let desired = deflate(self.desired_size[i], margin);
        let mut width = avail.width();
        let mut height = avail.height();
        if self.h_align[i] != Alignment::Stretch {
            width = width.min(desired.width);
        }
        if self.v_align[i] != Alignment::Stretch {
            height = height.min(desired.height);
        }
        if let Some(w) = self.width[i] {
            width = w;
        }
        if let Some(h) = self.height[i] {
            height = h;
        }

        let x = avail.x0 + align_offset(self.h_align[i], avail.width(), width);
        let y = avail.y0 + align_offset(self.v_align[i], avail.height(), height);
        let bounds = Rect::from_origin_size((x, y), (width, height));

        if self.bounds[i] != bounds {
            changes.moved.push(idx);
        }
        self.bounds[i] = bounds;
        changes.arranged += 1;

        self.arrange_children(idx, Size::new(width, height), changes);
    }

    /// Hands each child a slot in the local space of the node at `idx`.
    fn arrange_children(&mut self, idx: u32, size: Size, changes: &mut LayoutChanges) {
        let kind = self.kind[idx as usize];
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            let c = child as usize;
            let slot = match kind {
                NodeKind::Canvas => {
                    let pos = self.canvas_position[c];
                    let desired = self.desired_size[c];
                    let x = match (pos.left, pos.right) {
                        (Some(left), _) => left,
                        (None, Some(right)) => size.width - right - desired.width,
                        (None, None) => 0.0,
                    };
                    let y = match (pos.top, pos.bottom) {
                        (Some(top), _) => top,
                        (None, Some(bottom)) => size.height - bottom - desired.height,
                        (None, None) => 0.0,
                    };
                    Rect::from_origin_size((x, y), desired)
                }
                NodeKind::Border { padding } => deflate_rect(size.to_rect(), padding),
                NodeKind::Element => size.to_rect(),
            };
            self.arrange(child, slot, changes);
            child = self.next_sibling[c];
        }
    }
}

/// Offset of a `size`-wide box inside an `available`-wide slot.
fn align_offset(alignment: Alignment, available: f64, size: f64) -> f64 {
    match alignment {
        Alignment::Start => 0.0,
        Alignment::End => available - size,
        // A stretched node only differs from its slot when it has an
        // explicit size, in which case it is centred.
        Alignment::Center | Alignment::Stretch => (available - size) / 2.0,
    }
}
