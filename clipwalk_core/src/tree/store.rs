// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and property management.

use alloc::vec::Vec;

use kurbo::{Affine, Insets, Rect, Size};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{ContentId, INVALID, NodeId};
use super::node::{Alignment, CanvasPosition, NodeKind, VisualNode};
use super::traverse::Children;
use crate::dirty;
use crate::error::InvalidGeometry;
use crate::transform::TransformOrigin;

/// Changes to render-only state since the last [`VisualTree::take_changes`].
#[derive(Clone, Debug, Default)]
pub struct TreeChanges {
    /// Nodes whose render inputs changed and need repainting.
    pub repaint: Vec<u32>,
    /// Whether the tree topology changed.
    pub topology_changed: bool,
}

/// Struct-of-arrays storage for all nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct VisualTree {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Layout inputs --
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) width: Vec<Option<f64>>,
    pub(crate) height: Vec<Option<f64>>,
    pub(crate) margin: Vec<Insets>,
    pub(crate) h_align: Vec<Alignment>,
    pub(crate) v_align: Vec<Alignment>,
    pub(crate) canvas_position: Vec<CanvasPosition>,

    // -- Render inputs --
    pub(crate) render_transform: Vec<Affine>,
    pub(crate) transform_origin: Vec<TransformOrigin>,
    pub(crate) clip_to_bounds: Vec<bool>,
    pub(crate) content: Vec<Option<ContentId>>,

    // -- Computed by layout --
    pub(crate) desired_size: Vec<Size>,
    pub(crate) bounds: Vec<Rect>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
}

impl Default for VisualTree {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            kind: Vec::new(),
            width: Vec::new(),
            height: Vec::new(),
            margin: Vec::new(),
            h_align: Vec::new(),
            v_align: Vec::new(),
            canvas_position: Vec::new(),
            render_transform: Vec::new(),
            transform_origin: Vec::new(),
            clip_to_bounds: Vec::new(),
            content: Vec::new(),
            desired_size: Vec::new(),
            bounds: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    // -- Allocation API --

    /// Creates a new node of the given kind and returns its handle.
    ///
    /// The node starts with no explicit size, zero margin, stretch alignment,
    /// an identity render transform, no content, no parent, and the kind's
    /// default clip flag.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let clip = kind.default_clip_to_bounds();
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.kind[i] = kind;
            self.width[i] = None;
            self.height[i] = None;
            self.margin[i] = Insets::ZERO;
            self.h_align[i] = Alignment::Stretch;
            self.v_align[i] = Alignment::Stretch;
            self.canvas_position[i] = CanvasPosition::default();
            self.render_transform[i] = Affine::IDENTITY;
            self.transform_origin[i] = TransformOrigin::TOP_LEFT;
            self.clip_to_bounds[i] = clip;
            self.content[i] = None;
            self.desired_size[i] = Size::ZERO;
            self.bounds[i] = Rect::ZERO;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.kind.push(kind);
            self.width.push(None);
            self.height.push(None);
            self.margin.push(Insets::ZERO);
            self.h_align.push(Alignment::Stretch);
            self.v_align.push(Alignment::Stretch);
            self.canvas_position.push(CanvasPosition::default());
            self.render_transform.push(Affine::IDENTITY);
            self.transform_origin.push(TransformOrigin::TOP_LEFT);
            self.clip_to_bounds.push(clip);
            self.content.push(None);
            self.desired_size.push(Size::ZERO);
            self.bounds.push(Rect::ZERO);
            self.generation.push(0);
            idx
        };

        self.dirty.mark(idx, dirty::TOPOLOGY);
        self.dirty.mark(idx, dirty::LAYOUT);

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the node has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy node with children"
        );

        // Remove from parent's child list if attached; the parent re-measures.
        let p = self.parent[idx as usize];
        if p != INVALID {
            self.unlink_from_parent(idx);
            self.dirty.remove_dependency(idx, p, dirty::LAYOUT);
            self.dirty.mark(p, dirty::LAYOUT);
            self.dirty.mark(p, dirty::TOPOLOGY);
        }

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`, painting over its earlier
    /// siblings.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent, or
    /// if `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] == INVALID,
            "child already has a parent"
        );
        self.assert_no_cycle(parent.idx, child.idx);
        self.link_last(parent.idx, child.idx);
    }

    /// Removes `child` from its current parent, making it a root.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "node has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);
        self.dirty.remove_dependency(c, p, dirty::LAYOUT);

        self.dirty.mark_with(c, dirty::LAYOUT, &EagerPolicy);
        self.dirty.mark(p, dirty::LAYOUT);
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Moves `child` to be the last child of `new_parent`.
    ///
    /// If `child` already has a parent, it is removed first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` is `new_parent` or one
    /// of its ancestors.
    pub fn reparent(&mut self, child: NodeId, new_parent: NodeId) {
        self.validate(child);
        self.validate(new_parent);
        self.assert_no_cycle(new_parent.idx, child.idx);

        let old_p = self.parent[child.idx as usize];
        if old_p != INVALID {
            self.unlink_from_parent(child.idx);
            self.dirty.remove_dependency(child.idx, old_p, dirty::LAYOUT);
            self.dirty.mark(old_p, dirty::LAYOUT);
            self.dirty.mark(old_p, dirty::TOPOLOGY);
        }

        self.link_last(new_parent.idx, child.idx);
    }

    /// Inserts `child` before `sibling` in the sibling list, so that it paints
    /// underneath `sibling`.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, `sibling`
    /// has no parent, or `child` is an ancestor of `sibling`.
    pub fn insert_before(&mut self, child: NodeId, sibling: NodeId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");
        self.assert_no_cycle(p, c);

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;

        let _ = self.dirty.add_dependency(c, p, dirty::LAYOUT);
        self.dirty.mark_with(c, dirty::LAYOUT, &EagerPolicy);
        self.dirty.mark(p, dirty::LAYOUT);
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(self.handle(p))
        }
    }

    /// Returns an iterator over the direct children of a node, in paint order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the handles of root nodes (those with no parent).
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(self.handle(idx));
            }
        }
        roots
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the node's kind.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns the explicit width and height, if set.
    #[must_use]
    pub fn explicit_size(&self, id: NodeId) -> (Option<f64>, Option<f64>) {
        self.validate(id);
        (self.width[id.idx as usize], self.height[id.idx as usize])
    }

    /// Returns the node's margin.
    #[must_use]
    pub fn margin(&self, id: NodeId) -> Insets {
        self.validate(id);
        self.margin[id.idx as usize]
    }

    /// Returns the horizontal and vertical alignment.
    #[must_use]
    pub fn alignment(&self, id: NodeId) -> (Alignment, Alignment) {
        self.validate(id);
        (self.h_align[id.idx as usize], self.v_align[id.idx as usize])
    }

    /// Returns the node's offsets inside a canvas parent.
    #[must_use]
    pub fn canvas_position(&self, id: NodeId) -> CanvasPosition {
        self.validate(id);
        self.canvas_position[id.idx as usize]
    }

    /// Returns the node's render transform.
    #[must_use]
    pub fn render_transform(&self, id: NodeId) -> Affine {
        self.validate(id);
        self.render_transform[id.idx as usize]
    }

    /// Returns the pivot of the node's render transform.
    #[must_use]
    pub fn transform_origin(&self, id: NodeId) -> TransformOrigin {
        self.validate(id);
        self.transform_origin[id.idx as usize]
    }

    /// Returns whether the node clips its subtree.
    #[must_use]
    pub fn clip_to_bounds(&self, id: NodeId) -> bool {
        self.validate(id);
        self.clip_to_bounds[id.idx as usize]
    }

    /// Returns the node's drawable content.
    #[must_use]
    pub fn content(&self, id: NodeId) -> Option<ContentId> {
        self.validate(id);
        self.content[id.idx as usize]
    }

    /// Returns the size the node asked for in the last measure, margins
    /// included.
    ///
    /// Only valid after [`update_layout`](Self::update_layout) has been called.
    #[must_use]
    pub fn desired_size(&self, id: NodeId) -> Size {
        self.validate(id);
        self.desired_size[id.idx as usize]
    }

    /// Returns the node's arranged rect in its parent's coordinate space.
    #[must_use]
    pub fn bounds(&self, id: NodeId) -> Rect {
        self.validate(id);
        self.bounds[id.idx as usize]
    }

    /// Returns a snapshot of the node's render inputs.
    #[must_use]
    pub fn node(&self, id: NodeId) -> VisualNode {
        self.validate(id);
        self.node_at(id.idx)
    }

    /// Checks the node's bounds and render transform.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidGeometry`] found.
    pub fn validate_geometry(&self, id: NodeId) -> Result<(), InvalidGeometry> {
        self.node(id).validate()
    }

    // -- Mutation API (auto-marks dirty) --

    /// Changes how the node lays out its children.
    ///
    /// The clip flag is left as it is.
    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.validate(id);
        self.kind[id.idx as usize] = kind;
        self.dirty.mark_with(id.idx, dirty::LAYOUT, &EagerPolicy);
    }

    /// Sets the explicit width and height. `None` sizes to content.
    pub fn set_size(&mut self, id: NodeId, width: Option<f64>, height: Option<f64>) {
        self.validate(id);
        self.width[id.idx as usize] = width;
        self.height[id.idx as usize] = height;
        self.dirty.mark_with(id.idx, dirty::LAYOUT, &EagerPolicy);
    }

    /// Sets the margin. Negative components extend the node beyond the slot
    /// its parent gives it.
    pub fn set_margin(&mut self, id: NodeId, margin: Insets) {
        self.validate(id);
        self.margin[id.idx as usize] = margin;
        self.dirty.mark_with(id.idx, dirty::LAYOUT, &EagerPolicy);
    }

    /// Sets the horizontal and vertical alignment.
    pub fn set_alignment(&mut self, id: NodeId, horizontal: Alignment, vertical: Alignment) {
        self.validate(id);
        self.h_align[id.idx as usize] = horizontal;
        self.v_align[id.idx as usize] = vertical;
        self.dirty.mark_with(id.idx, dirty::LAYOUT, &EagerPolicy);
    }

    /// Sets the node's offsets inside a canvas parent.
    ///
    /// Ignored by other parent kinds.
    pub fn set_canvas_position(&mut self, id: NodeId, position: CanvasPosition) {
        self.validate(id);
        self.canvas_position[id.idx as usize] = position;
        self.dirty.mark_with(id.idx, dirty::LAYOUT, &EagerPolicy);
    }

    /// Sets the render transform.
    pub fn set_render_transform(&mut self, id: NodeId, transform: Affine) {
        self.validate(id);
        self.render_transform[id.idx as usize] = transform;
        self.dirty.mark(id.idx, dirty::RENDER);
    }

    /// Sets the pivot of the render transform.
    pub fn set_transform_origin(&mut self, id: NodeId, origin: TransformOrigin) {
        self.validate(id);
        self.transform_origin[id.idx as usize] = origin;
        self.dirty.mark(id.idx, dirty::RENDER);
    }

    /// Sets whether the node clips its subtree.
    pub fn set_clip_to_bounds(&mut self, id: NodeId, clip: bool) {
        self.validate(id);
        self.clip_to_bounds[id.idx as usize] = clip;
        self.dirty.mark(id.idx, dirty::RENDER);
    }

    /// Sets the node's drawable content.
    pub fn set_content(&mut self, id: NodeId, content: Option<ContentId>) {
        self.validate(id);
        self.content[id.idx as usize] = content;
        self.dirty.mark(id.idx, dirty::RENDER);
    }

    /// Assigns the node's arranged rect directly, bypassing measure/arrange.
    ///
    /// The next layout pass that covers this node overwrites the value.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        self.validate(id);
        self.bounds[id.idx as usize] = bounds;
        self.dirty.mark(id.idx, dirty::RENDER);
    }

    /// Drains render and topology changes recorded since the last call.
    pub fn take_changes(&mut self) -> TreeChanges {
        let repaint: Vec<u32> = self
            .dirty
            .drain(dirty::RENDER)
            .deterministic()
            .run()
            .collect();
        let topology: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();
        TreeChanges {
            repaint,
            topology_changed: !topology.is_empty(),
        }
    }

    // -- Raw-index accessors --
    //
    // These accept raw slot indices (as reported by traversal events and
    // `LayoutChanges`) rather than `NodeId` handles, skipping generation
    // validation.

    /// Returns a snapshot of the node at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn node_at(&self, idx: u32) -> VisualNode {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        let i = idx as usize;
        VisualNode {
            bounds: self.bounds[i],
            render_transform: self.render_transform[i],
            transform_origin: self.transform_origin[i],
            clip_to_bounds: self.clip_to_bounds[i],
            margin: self.margin[i],
            content: self.content[i],
        }
    }

    // -- Internal helpers --

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Panics if linking `c` under `p` would make `c` its own ancestor.
    fn assert_no_cycle(&self, p: u32, c: u32) {
        let mut cur = p;
        while cur != INVALID {
            assert!(cur != c, "would create a cycle");
            cur = self.parent[cur as usize];
        }
    }

    /// Appends `c` to `p`'s child list and invalidates both.
    fn link_last(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        // Child depends on parent: re-arranging the parent re-arranges it.
        let _ = self.dirty.add_dependency(c, p, dirty::LAYOUT);
        self.dirty.mark_with(c, dirty::LAYOUT, &EagerPolicy);
        self.dirty.mark(p, dirty::LAYOUT);
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut tree = VisualTree::new();
        let id = tree.create_node(NodeKind::Element);
        assert!(tree.is_alive(id));
        tree.destroy_node(id);
        assert!(!tree.is_alive(id));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut tree = VisualTree::new();
        let id1 = tree.create_node(NodeKind::Element);
        tree.destroy_node(id1);
        let id2 = tree.create_node(NodeKind::Canvas);
        // Same slot, different generation.
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
        assert!(!tree.is_alive(id1));
        assert!(tree.is_alive(id2));
    }

    #[test]
    fn reused_slot_is_reset() {
        let mut tree = VisualTree::new();
        let id1 = tree.create_node(NodeKind::Element);
        tree.set_render_transform(id1, Affine::scale(3.0));
        tree.set_content(id1, Some(ContentId(9)));
        tree.destroy_node(id1);

        let id2 = tree.create_node(NodeKind::Canvas);
        assert_eq!(tree.render_transform(id2), Affine::IDENTITY);
        assert_eq!(tree.content(id2), None);
        assert!(tree.clip_to_bounds(id2), "canvas clips by default");
    }

    #[test]
    fn add_child_and_query() {
        let mut tree = VisualTree::new();
        let parent = tree.create_node(NodeKind::Canvas);
        let a = tree.create_node(NodeKind::Element);
        let b = tree.create_node(NodeKind::Element);

        tree.add_child(parent, a);
        tree.add_child(parent, b);

        assert_eq!(tree.parent(a), Some(parent));
        assert_eq!(tree.parent(b), Some(parent));
        assert_eq!(tree.parent(parent), None);

        let children: Vec<NodeId> = tree.children(parent).collect();
        assert_eq!(children, vec![a, b]);
    }

    #[test]
    fn remove_from_parent_works() {
        let mut tree = VisualTree::new();
        let parent = tree.create_node(NodeKind::Canvas);
        let child = tree.create_node(NodeKind::Element);
        tree.add_child(parent, child);
        tree.remove_from_parent(child);

        assert_eq!(tree.parent(child), None);
        assert_eq!(tree.children(parent).count(), 0);
    }

    #[test]
    fn insert_before_works() {
        let mut tree = VisualTree::new();
        let parent = tree.create_node(NodeKind::Canvas);
        let a = tree.create_node(NodeKind::Element);
        let b = tree.create_node(NodeKind::Element);
        let c = tree.create_node(NodeKind::Element);

        tree.add_child(parent, a);
        tree.add_child(parent, c);
        tree.insert_before(b, c);

        let children: Vec<NodeId> = tree.children(parent).collect();
        assert_eq!(children, vec![a, b, c]);
    }

    #[test]
    fn reparent_works() {
        let mut tree = VisualTree::new();
        let p1 = tree.create_node(NodeKind::Canvas);
        let p2 = tree.create_node(NodeKind::Canvas);
        let child = tree.create_node(NodeKind::Element);

        tree.add_child(p1, child);
        tree.reparent(child, p2);

        assert_eq!(tree.parent(child), Some(p2));
        assert_eq!(tree.children(p1).count(), 0);
        assert_eq!(tree.children(p2).count(), 1);
    }

    #[test]
    fn roots_returns_parentless_nodes() {
        let mut tree = VisualTree::new();
        let a = tree.create_node(NodeKind::Canvas);
        let b = tree.create_node(NodeKind::Element);
        let c = tree.create_node(NodeKind::Canvas);
        tree.add_child(a, b);

        let roots = tree.roots();
        assert_eq!(roots, vec![a, c]);
    }

    #[test]
    #[should_panic(expected = "cannot destroy node with children")]
    fn destroy_with_children_panics() {
        let mut tree = VisualTree::new();
        let parent = tree.create_node(NodeKind::Canvas);
        let child = tree.create_node(NodeKind::Element);
        tree.add_child(parent, child);
        tree.destroy_node(parent);
    }

    #[test]
    #[should_panic(expected = "child already has a parent")]
    fn double_parent_panics() {
        let mut tree = VisualTree::new();
        let p1 = tree.create_node(NodeKind::Canvas);
        let p2 = tree.create_node(NodeKind::Canvas);
        let child = tree.create_node(NodeKind::Element);
        tree.add_child(p1, child);
        tree.add_child(p2, child);
    }

    #[test]
    #[should_panic(expected = "would create a cycle")]
    fn adding_ancestor_as_child_panics() {
        let mut tree = VisualTree::new();
        let a = tree.create_node(NodeKind::Canvas);
        let b = tree.create_node(NodeKind::Canvas);
        tree.add_child(a, b);
        tree.add_child(b, a);
    }

    #[test]
    #[should_panic(expected = "would create a cycle")]
    fn adding_node_to_itself_panics() {
        let mut tree = VisualTree::new();
        let a = tree.create_node(NodeKind::Canvas);
        tree.add_child(a, a);
    }

    #[test]
    #[should_panic(expected = "would create a cycle")]
    fn reparent_under_descendant_panics() {
        let mut tree = VisualTree::new();
        let a = tree.create_node(NodeKind::Canvas);
        let b = tree.create_node(NodeKind::Canvas);
        let c = tree.create_node(NodeKind::Element);
        tree.add_child(a, b);
        tree.add_child(b, c);
        tree.reparent(a, c);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_get_bounds() {
        let mut tree = VisualTree::new();
        let id = tree.create_node(NodeKind::Element);
        tree.destroy_node(id);
        let _ = tree.bounds(id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_set_margin() {
        let mut tree = VisualTree::new();
        let id = tree.create_node(NodeKind::Element);
        tree.destroy_node(id);
        tree.set_margin(id, Insets::uniform(1.0));
    }

    #[test]
    fn node_snapshot_reflects_properties() {
        let mut tree = VisualTree::new();
        let id = tree.create_node(NodeKind::Element);
        let bounds = Rect::from_origin_size(Point::new(1.0, 2.0), Size::new(3.0, 4.0));
        tree.set_bounds(id, bounds);
        tree.set_render_transform(id, Affine::translate((5.0, 5.0)));
        tree.set_transform_origin(id, TransformOrigin::CENTER);
        tree.set_clip_to_bounds(id, true);
        tree.set_margin(id, Insets::new(1.0, 0.0, 0.0, 0.0));
        tree.set_content(id, Some(ContentId(7)));

        let node = tree.node(id);
        assert_eq!(node.bounds, bounds);
        assert_eq!(node.render_transform, Affine::translate((5.0, 5.0)));
        assert_eq!(node.transform_origin, TransformOrigin::CENTER);
        assert!(node.clip_to_bounds);
        assert_eq!(node.margin, Insets::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(node.content, Some(ContentId(7)));
        assert_eq!(tree.node_at(id.index()), node);
    }

    #[test]
    fn validate_geometry_flags_nan_bounds() {
        let mut tree = VisualTree::new();
        let id = tree.create_node(NodeKind::Element);
        assert_eq!(tree.validate_geometry(id), Ok(()));
        tree.set_bounds(id, Rect::new(0.0, 0.0, f64::NAN, 1.0));
        assert_eq!(
            tree.validate_geometry(id),
            Err(InvalidGeometry::NonFiniteBounds)
        );
    }

    #[test]
    fn render_setters_mark_repaint() {
        let mut tree = VisualTree::new();
        let id = tree.create_node(NodeKind::Element);
        // Consume creation dirtiness.
        let changes = tree.take_changes();
        assert!(changes.topology_changed, "creation is a topology change");

        tree.set_clip_to_bounds(id, true);
        let changes = tree.take_changes();
        assert!(
            changes.repaint.contains(&id.idx),
            "render channel should contain the node"
        );
        assert!(!changes.topology_changed);

        let changes = tree.take_changes();
        assert!(changes.repaint.is_empty(), "changes are drained");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn node_at_out_of_range_panics() {
        let tree = VisualTree::new();
        let _ = tree.node_at(0);
    }
}
