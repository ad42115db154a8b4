// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Per-node visits are large in number; they are recorded only when enabled
//! with [`RecorderSink::with_node_visits`].

use clipwalk_core::clip::ClipRegion;
use clipwalk_core::error::InvalidGeometry;
use clipwalk_core::trace::{
    CullDecision, InvalidGeometryEvent, LayoutEvent, NodeVisitEvent, TraceSink,
    TraversalBeginEvent, TraversalSummary,
};
use kurbo::Rect;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_LAYOUT: u8 = 1;
const TAG_TRAVERSAL_BEGIN: u8 = 2;
const TAG_TRAVERSAL_SUMMARY: u8 = 3;
const TAG_INVALID_GEOMETRY: u8 = 4;
const TAG_NODE_VISIT: u8 = 5;

const CLIP_UNBOUNDED: u8 = 0;
const CLIP_RECT: u8 = 1;
const CLIP_EMPTY: u8 = 2;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
    node_visits: bool,
}

impl RecorderSink {
    /// Creates an empty recorder that skips per-node visits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables recording of per-node visits.
    #[must_use]
    pub fn with_node_visits(mut self, enabled: bool) -> Self {
        self.node_visits = enabled;
        self
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_rect(&mut self, r: Rect) {
        self.write_f64(r.x0);
        self.write_f64(r.y0);
        self.write_f64(r.x1);
        self.write_f64(r.y1);
    }

    /// Clips always occupy a tag plus one rect so records stay fixed-size.
    fn write_clip(&mut self, clip: &ClipRegion) {
        match clip {
            ClipRegion::Unbounded => {
                self.write_u8(CLIP_UNBOUNDED);
                self.write_rect(Rect::ZERO);
            }
            ClipRegion::Rect(r) => {
                self.write_u8(CLIP_RECT);
                self.write_rect(*r);
            }
            ClipRegion::Empty => {
                self.write_u8(CLIP_EMPTY);
                self.write_rect(Rect::ZERO);
            }
        }
    }

    fn write_error(&mut self, e: InvalidGeometry) {
        self.write_u8(match e {
            InvalidGeometry::NonFiniteBounds => 0,
            InvalidGeometry::NegativeSize => 1,
            InvalidGeometry::NonFiniteTransform => 2,
        });
    }

    fn write_decision(&mut self, d: CullDecision) {
        self.write_u8(match d {
            CullDecision::Drawn => 0,
            CullDecision::Culled => 1,
            CullDecision::Pruned => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_layout(&mut self, e: &LayoutEvent) {
        self.write_u8(TAG_LAYOUT);
        self.write_u32(e.roots);
        self.write_u32(e.measured);
        self.write_u32(e.arranged);
        self.write_u32(e.moved);
    }

    fn on_traversal_begin(&mut self, e: &TraversalBeginEvent) {
        self.write_u8(TAG_TRAVERSAL_BEGIN);
        self.write_u64(e.pass_index);
        self.write_u32(e.root);
        self.write_clip(&e.clip);
    }

    fn on_traversal_summary(&mut self, s: &TraversalSummary) {
        self.write_u8(TAG_TRAVERSAL_SUMMARY);
        self.write_u64(s.pass_index);
        self.write_u32(s.visited);
        self.write_u32(s.drawn);
        self.write_u32(s.culled);
        self.write_u32(s.pruned);
        self.write_u32(s.invalid);
        self.write_u8(u8::from(s.cancelled));
    }

    fn on_invalid_geometry(&mut self, e: &InvalidGeometryEvent) {
        self.write_u8(TAG_INVALID_GEOMETRY);
        self.write_u64(e.pass_index);
        self.write_u32(e.node);
        self.write_error(e.error);
    }

    fn on_node_visit(&mut self, e: &NodeVisitEvent) {
        if !self.node_visits {
            return;
        }
        self.write_u8(TAG_NODE_VISIT);
        self.write_u64(e.pass_index);
        self.write_u32(e.node);
        self.write_u32(e.depth);
        self.write_rect(e.world_rect);
        self.write_decision(e.decision);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`LayoutEvent`].
    Layout(LayoutEvent),
    /// A [`TraversalBeginEvent`].
    TraversalBegin(TraversalBeginEvent),
    /// A [`TraversalSummary`].
    TraversalSummary(TraversalSummary),
    /// An [`InvalidGeometryEvent`].
    InvalidGeometry(InvalidGeometryEvent),
    /// A [`NodeVisitEvent`].
    NodeVisit(NodeVisitEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.take().map(f64::from_le_bytes)
    }

    fn read_rect(&mut self) -> Option<Rect> {
        Some(Rect::new(
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
        ))
    }

    fn read_clip(&mut self) -> Option<ClipRegion> {
        let tag = self.read_u8()?;
        let rect = self.read_rect()?;
        Some(match tag {
            CLIP_UNBOUNDED => ClipRegion::Unbounded,
            CLIP_RECT => ClipRegion::Rect(rect),
            _ => ClipRegion::Empty,
        })
    }

    fn read_error(&mut self) -> Option<InvalidGeometry> {
        Some(match self.read_u8()? {
            0 => InvalidGeometry::NonFiniteBounds,
            1 => InvalidGeometry::NegativeSize,
            _ => InvalidGeometry::NonFiniteTransform,
        })
    }

    fn read_decision(&mut self) -> Option<CullDecision> {
        Some(match self.read_u8()? {
            0 => CullDecision::Drawn,
            1 => CullDecision::Culled,
            _ => CullDecision::Pruned,
        })
    }

    fn decode_layout(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Layout(LayoutEvent {
            roots: self.read_u32()?,
            measured: self.read_u32()?,
            arranged: self.read_u32()?,
            moved: self.read_u32()?,
        }))
    }

    fn decode_traversal_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TraversalBegin(TraversalBeginEvent {
            pass_index: self.read_u64()?,
            root: self.read_u32()?,
            clip: self.read_clip()?,
        }))
    }

    fn decode_traversal_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TraversalSummary(TraversalSummary {
            pass_index: self.read_u64()?,
            visited: self.read_u32()?,
            drawn: self.read_u32()?,
            culled: self.read_u32()?,
            pruned: self.read_u32()?,
            invalid: self.read_u32()?,
            cancelled: self.read_u8()? != 0,
        }))
    }

    fn decode_invalid_geometry(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::InvalidGeometry(InvalidGeometryEvent {
            pass_index: self.read_u64()?,
            node: self.read_u32()?,
            error: self.read_error()?,
        }))
    }

    fn decode_node_visit(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::NodeVisit(NodeVisitEvent {
            pass_index: self.read_u64()?,
            node: self.read_u32()?,
            depth: self.read_u32()?,
            world_rect: self.read_rect()?,
            decision: self.read_decision()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_LAYOUT => self.decode_layout(),
            TAG_TRAVERSAL_BEGIN => self.decode_traversal_begin(),
            TAG_TRAVERSAL_SUMMARY => self.decode_traversal_summary(),
            TAG_INVALID_GEOMETRY => self.decode_invalid_geometry(),
            TAG_NODE_VISIT => self.decode_node_visit(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
