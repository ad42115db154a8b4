// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use clipwalk_core::clip::ClipRegion;
use clipwalk_core::trace::{
    InvalidGeometryEvent, LayoutEvent, NodeVisitEvent, TraceSink, TraversalBeginEvent,
    TraversalSummary,
};
use kurbo::Rect;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    node_visits: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("node_visits", &self.node_visits)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self::with_writer(writer)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    ///
    /// Per-node visit lines are off; see
    /// [`with_node_visits`](Self::with_node_visits).
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            node_visits: false,
        }
    }

    /// Enables or disables one line per visited node.
    #[must_use]
    pub fn with_node_visits(mut self, enabled: bool) -> Self {
        self.node_visits = enabled;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn fmt_rect(r: Rect) -> String {
    format!("({:.1},{:.1})-({:.1},{:.1})", r.x0, r.y0, r.x1, r.y1)
}

fn fmt_clip(clip: &ClipRegion) -> String {
    match clip {
        ClipRegion::Unbounded => "unbounded".to_owned(),
        ClipRegion::Empty => "empty".to_owned(),
        ClipRegion::Rect(r) => fmt_rect(*r),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_layout(&mut self, e: &LayoutEvent) {
        let _ = writeln!(
            self.writer,
            "[layout] roots={} measured={} arranged={} moved={}",
            e.roots, e.measured, e.arranged, e.moved,
        );
    }

    fn on_traversal_begin(&mut self, e: &TraversalBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[begin] pass={} root={} clip={}",
            e.pass_index,
            e.root,
            fmt_clip(&e.clip),
        );
    }

    fn on_traversal_summary(&mut self, s: &TraversalSummary) {
        let status = if s.cancelled { "CANCELLED" } else { "ok" };
        let _ = writeln!(
            self.writer,
            "[summary] pass={} visited={} drawn={} culled={} pruned={} \
             invalid={} status={status}",
            s.pass_index, s.visited, s.drawn, s.culled, s.pruned, s.invalid,
        );
    }

    fn on_invalid_geometry(&mut self, e: &InvalidGeometryEvent) {
        let _ = writeln!(
            self.writer,
            "[invalid] pass={} node={} {}",
            e.pass_index, e.node, e.error,
        );
    }

    fn on_node_visit(&mut self, e: &NodeVisitEvent) {
        if !self.node_visits {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[node] pass={} {:indent$}node={} {} rect={}",
            e.pass_index,
            "",
            e.node,
            e.decision.name(),
            fmt_rect(e.world_rect),
            indent = e.depth as usize * 2,
        );
    }
}
