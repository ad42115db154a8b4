// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bottom-up desired-size computation.

use kurbo::Size;

use super::{LayoutChanges, deflate};
use crate::tree::{INVALID, NodeKind, VisualTree};

impl VisualTree {
    /// Measures the subtree at `idx` against `available` and stores each
    /// node's desired size, margins included.
    pub(super) fn measure(&mut self, idx: u32, available: Size, changes: &mut LayoutChanges) -> Size {
        let i = idx as usize;
        let margin = self.margin[i];

        let mut constraint = deflate(available, margin);
        if let Some(w) = self.width[i] {
            constraint.width = w;
        }
        if let Some(h) = self.height[i] {
            constraint.height = h;
        }

        let content = match self.kind[i] {
            NodeKind::Canvas => {
                // Children of a canvas are unconstrained and never grow it.
                let unbounded = Size::new(f64::INFINITY, f64::INFINITY);
                let _ = self.measure_children(idx, unbounded, changes);
                Size::ZERO
            }
            NodeKind::Border { padding } => {
                let inner = self.measure_children(idx, deflate(constraint, padding), changes);
                Size::new(
                    inner.width + padding.x0 + padding.x1,
                    inner.height + padding.y0 + padding.y1,
                )
            }
            NodeKind::Element => self.measure_children(idx, constraint, changes),
        };

        let width = self.width[i].unwrap_or(content.width);
        let height = self.height[i].unwrap_or(content.height);
        let desired = Size::new(
            (width + margin.x0 + margin.x1).max(0.0),
            (height + margin.y0 + margin.y1).max(0.0),
        );

        self.desired_size[i] = desired;
        changes.measured += 1;
        desired
    }

    /// Measures each child and returns the largest desired extent per axis.
    fn measure_children(&mut self, idx: u32, available: Size, changes: &mut LayoutChanges) -> Size {
        let mut max = Size::ZERO;
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            let desired = self.measure(child, available, changes);
            max.width = max.width.max(desired.width);
            max.height = max.height.max(desired.height);
            child = self.next_sibling[child as usize];
        }
        max
    }
}
