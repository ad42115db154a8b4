// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The visual tree uses multi-channel dirty tracking (via [`understory_dirty`])
//! to decide which roots need a layout pass and to report what changed since
//! the last one.
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`LAYOUT`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) over dependency edges from
//!   child to parent. Invalidating a node's size, margin, alignment, or
//!   children marks its whole subtree, since every descendant's arranged
//!   position may move.
//!
//! - **Local-only**: [`RENDER`] is marked with the default policy when a
//!   render-only input changes (render transform, transform origin, clip
//!   flag, content, or directly assigned bounds). These never require layout.
//!
//! - **Structural**: [`TOPOLOGY`] is marked on node creation, destruction,
//!   and re-parenting.
//!
//! # Consumption
//!
//! [`VisualTree::update_layout`](crate::tree::VisualTree::update_layout)
//! drains [`LAYOUT`] and lays out every root that owns a dirty node.
//! [`VisualTree::take_changes`](crate::tree::VisualTree::take_changes) drains
//! the remaining channels for callers that track repaint work.

use understory_dirty::Channel;

/// A layout input changed; the node's subtree must be re-arranged.
pub const LAYOUT: Channel = Channel::new(0);

/// A render-only input changed; the node must be repainted.
pub const RENDER: Channel = Channel::new(1);

/// Tree topology changed.
pub const TOPOLOGY: Channel = Channel::new(2);
