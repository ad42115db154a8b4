// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual tree, layout contract, and clip-culling render traversal.
//!
//! `clipwalk_core` decides, for every node of an arranged visual tree, the
//! node's cumulative transform and effective clip in root-surface space, and
//! whether the node is visible and must be drawn. It is `no_std` compatible
//! (with `alloc`) and stores nodes in struct-of-arrays layout addressed by
//! generational handles.
//!
//! # Architecture
//!
//! A frame flows through two passes over the same [`VisualTree`](tree::VisualTree):
//!
//! ```text
//!   VisualTree mutations ──► dirty::LAYOUT
//!                                 │
//!                                 ▼
//!   VisualTree::update_layout() ──► LayoutChanges (bounds per node)
//!                                 │
//!                                 ▼
//!   Culler::render() ──► Draw::draw(DrawContext) per visible node
//!                    └─► TraversalSummary
//! ```
//!
//! **[`tree`]**: Struct-of-arrays visual tree with generational handles.
//! Layout inputs (kind, size, margin, alignment) and render inputs (render
//! transform, transform origin, clip flag, content) are set by the caller;
//! desired sizes and bounds are computed by the layout pass.
//!
//! **[`layout`]**: Measure/arrange contract that resolves each node's
//! `bounds`, folding margins (including negative ones) into the arranged rect.
//!
//! **[`render`]**: The [`Culler`](render::Culler): a depth-first walk that
//! threads a [`TraversalState`](state::TraversalState) down the tree, tests
//! each node's world-space bounding box against the inherited clip, and
//! prunes subtrees that cannot be visible.
//!
//! **[`clip`]**: [`ClipRegion`](clip::ClipRegion): axis-aligned clip with
//! explicit unbounded and empty sentinels.
//!
//! **[`transform`]**: Affine composition helpers and
//! [`TransformOrigin`](transform::TransformOrigin).
//!
//! **[`draw`]** / **[`plan`]**: The drawing collaborator trait and a
//! [`RenderPlan`](plan::RenderPlan) that records draw calls in paint order.
//!
//! **[`dirty`]**: Dirty-tracking channels via `understory_dirty`.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! layout and traversal instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-node
//!   visit events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod clip;
pub mod dirty;
pub mod draw;
pub mod error;
pub mod layout;
pub mod plan;
pub mod render;
pub mod state;
pub mod trace;
pub mod transform;
pub mod tree;
