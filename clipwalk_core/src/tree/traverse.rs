// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sibling iteration.

use super::id::{INVALID, NodeId};
use super::store::VisualTree;

/// An iterator over the direct children of a node, in paint order.
///
/// Created by [`VisualTree::children`].
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a VisualTree,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a VisualTree, first: u32) -> Self {
        Self {
            tree,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current == INVALID {
            return None;
        }
        let idx = self.current;
        self.current = self.tree.next_sibling[idx as usize];
        Some(NodeId {
            idx,
            generation: self.tree.generation[idx as usize],
        })
    }
}
