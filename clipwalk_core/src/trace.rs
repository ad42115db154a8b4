// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layout and render traversal.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! layout pass and the [`Culler`](crate::render::Culler) call as they work.
//! All method bodies default to no-ops, so implementing only the events you
//! care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates per-node [`NodeVisitEvent`]s and
//!   the corresponding `TraceSink` method.

#[cfg(feature = "trace-rich")]
use kurbo::Rect;

use crate::clip::ClipRegion;
use crate::error::InvalidGeometry;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What the traversal did with one node.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CullDecision {
    /// The node overlapped the clip and was drawn.
    Drawn,
    /// The node was outside the clip; its children were still visited.
    Culled,
    /// The node was outside the clip and its subtree was skipped.
    Pruned,
}

#[cfg(feature = "trace-rich")]
impl CullDecision {
    /// Lowercase name used by text and JSON output.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Drawn => "drawn",
            Self::Culled => "culled",
            Self::Pruned => "pruned",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a layout pass that did work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutEvent {
    /// Number of roots laid out.
    pub roots: u32,
    /// Number of nodes measured.
    pub measured: u32,
    /// Number of nodes arranged.
    pub arranged: u32,
    /// Number of nodes whose bounds changed.
    pub moved: u32,
}

/// Emitted when a render traversal starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraversalBeginEvent {
    /// Monotonic pass counter of the [`Culler`](crate::render::Culler).
    pub pass_index: u64,
    /// Slot index of the root being walked.
    pub root: u32,
    /// Clip the root is tested against.
    pub clip: ClipRegion,
}

/// Emitted when a node's geometry is malformed and it is treated as
/// zero-area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidGeometryEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Slot index of the offending node.
    pub node: u32,
    /// What was wrong.
    pub error: InvalidGeometry,
}

/// A per-node traversal record.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeVisitEvent {
    /// Pass counter.
    pub pass_index: u64,
    /// Slot index of the node.
    pub node: u32,
    /// Distance from the traversal root.
    pub depth: u32,
    /// World-space bounding box the node was tested with.
    pub world_rect: Rect,
    /// Outcome of the test.
    pub decision: CullDecision,
}

/// Per-pass counters produced by [`Culler::render`](crate::render::Culler::render).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraversalSummary {
    /// Pass counter.
    pub pass_index: u64,
    /// Nodes whose visibility was tested.
    pub visited: u32,
    /// Nodes handed to the drawing collaborator.
    pub drawn: u32,
    /// Nodes tested and found outside the clip.
    pub culled: u32,
    /// Culled nodes whose subtree was skipped.
    pub pruned: u32,
    /// Nodes with malformed geometry.
    pub invalid: u32,
    /// Whether the drawing collaborator stopped the walk early.
    pub cancelled: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from layout and traversal.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a layout pass that did work.
    fn on_layout(&mut self, e: &LayoutEvent) {
        _ = e;
    }

    /// Called when a render traversal starts.
    fn on_traversal_begin(&mut self, e: &TraversalBeginEvent) {
        _ = e;
    }

    /// Called with the counters of a finished (or cancelled) traversal.
    fn on_traversal_summary(&mut self, s: &TraversalSummary) {
        _ = s;
    }

    /// Called when a node with malformed geometry is encountered.
    fn on_invalid_geometry(&mut self, e: &InvalidGeometryEvent) {
        _ = e;
    }

    /// Called once per tested node (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_node_visit(&mut self, e: &NodeVisitEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`LayoutEvent`].
    #[inline]
    pub fn layout(&mut self, e: &LayoutEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TraversalBeginEvent`].
    #[inline]
    pub fn traversal_begin(&mut self, e: &TraversalBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_traversal_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TraversalSummary`].
    #[inline]
    pub fn traversal_summary(&mut self, s: &TraversalSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_traversal_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits an [`InvalidGeometryEvent`].
    #[inline]
    pub fn invalid_geometry(&mut self, e: &InvalidGeometryEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_invalid_geometry(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NodeVisitEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn node_visit(&mut self, e: &NodeVisitEvent) {
        if let Some(s) = &mut self.sink {
            s.on_node_visit(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> TraversalSummary {
        TraversalSummary {
            pass_index: 3,
            visited: 4,
            drawn: 2,
            culled: 2,
            pruned: 1,
            invalid: 0,
            cancelled: false,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_layout(&LayoutEvent::default());
        sink.on_traversal_begin(&TraversalBeginEvent {
            pass_index: 0,
            root: 0,
            clip: ClipRegion::Unbounded,
        });
        sink.on_traversal_summary(&sample_summary());
        sink.on_invalid_geometry(&InvalidGeometryEvent {
            pass_index: 0,
            node: 1,
            error: InvalidGeometry::NegativeSize,
        });
    }

    #[cfg(feature = "trace-rich")]
    #[test]
    fn decision_names_are_lowercase() {
        assert_eq!(CullDecision::Drawn.name(), "drawn");
        assert_eq!(CullDecision::Culled.name(), "culled");
        assert_eq!(CullDecision::Pruned.name(), "pruned");
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.layout(&LayoutEvent::default());
        tracer.traversal_summary(&sample_summary());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            passes: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_traversal_summary(&mut self, s: &TraversalSummary) {
                self.passes.push(s.pass_index);
            }
        }

        let mut sink = RecordingSink { passes: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.traversal_summary(&sample_summary());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.passes, &[3]);
    }
}
