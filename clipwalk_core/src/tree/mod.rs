// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual tree data model.
//!
//! A *node* is one element of the visual tree. Each node has:
//!
//! - An identity ([`NodeId`]): a generational handle that becomes stale when
//!   the node is destroyed.
//! - Topology: parent, first-child, and sibling links forming an ordered
//!   tree. Sibling order is paint order: later children paint over earlier
//!   ones.
//! - **Layout inputs** set by the caller: [`kind`](VisualTree::set_kind),
//!   [`size`](VisualTree::set_size), [`margin`](VisualTree::set_margin),
//!   [`alignment`](VisualTree::set_alignment), and
//!   [`canvas position`](VisualTree::set_canvas_position).
//! - **Render inputs** set by the caller:
//!   [`render transform`](VisualTree::set_render_transform),
//!   [`transform origin`](VisualTree::set_transform_origin),
//!   [`clip flag`](VisualTree::set_clip_to_bounds), and
//!   [`content`](VisualTree::set_content).
//! - **Computed properties** produced by
//!   [`update_layout`](VisualTree::update_layout): `desired_size` and
//!   `bounds`.
//!
//! The traversal reads nodes through the [`VisualNode`] snapshot record.

mod id;
mod node;
mod store;
mod traverse;

pub use id::{ContentId, INVALID, NodeId};
pub use node::{Alignment, CanvasPosition, NodeKind, VisualNode};
pub use store::{TreeChanges, VisualTree};
pub use traverse::Children;
