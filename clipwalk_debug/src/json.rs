// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter for recorded traversals.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes a JSON array
//! with one object per event. Every object carries an `"event"` name; the
//! remaining keys mirror the event's fields.

use std::io::{self, Write};

use clipwalk_core::clip::ClipRegion;
use kurbo::Rect;
use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes).map(|e| event_to_json(&e)).collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

/// Converts one decoded event into a JSON object.
#[must_use]
pub fn event_to_json(recorded: &RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::Layout(e) => json!({
            "event": "layout",
            "roots": e.roots,
            "measured": e.measured,
            "arranged": e.arranged,
            "moved": e.moved,
        }),
        RecordedEvent::TraversalBegin(e) => json!({
            "event": "traversal_begin",
            "pass": e.pass_index,
            "root": e.root,
            "clip": clip_to_json(&e.clip),
        }),
        RecordedEvent::TraversalSummary(s) => json!({
            "event": "traversal_summary",
            "pass": s.pass_index,
            "visited": s.visited,
            "drawn": s.drawn,
            "culled": s.culled,
            "pruned": s.pruned,
            "invalid": s.invalid,
            "cancelled": s.cancelled,
        }),
        RecordedEvent::InvalidGeometry(e) => json!({
            "event": "invalid_geometry",
            "pass": e.pass_index,
            "node": e.node,
            "error": e.error.to_string(),
        }),
        RecordedEvent::NodeVisit(e) => json!({
            "event": "node_visit",
            "pass": e.pass_index,
            "node": e.node,
            "depth": e.depth,
            "world_rect": rect_to_json(e.world_rect),
            "decision": e.decision.name(),
        }),
    }
}

/// `null` for unbounded, `[0, 0, 0, 0]` for empty.
fn clip_to_json(clip: &ClipRegion) -> Value {
    match clip.bounds() {
        None => Value::Null,
        Some(r) => rect_to_json(r),
    }
}

fn rect_to_json(r: Rect) -> Value {
    json!([r.x0, r.y0, r.x1, r.y1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use clipwalk_core::error::InvalidGeometry;
    use clipwalk_core::trace::{
        CullDecision, InvalidGeometryEvent, NodeVisitEvent, TraceSink, TraversalBeginEvent,
        TraversalSummary,
    };

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_traversal_begin(&TraversalBeginEvent {
            pass_index: 2,
            root: 0,
            clip: ClipRegion::Unbounded,
        });
        rec.on_invalid_geometry(&InvalidGeometryEvent {
            pass_index: 2,
            node: 5,
            error: InvalidGeometry::NonFiniteBounds,
        });
        rec.on_traversal_summary(&TraversalSummary {
            pass_index: 2,
            visited: 6,
            drawn: 4,
            culled: 2,
            pruned: 1,
            invalid: 1,
            cancelled: true,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        // Should parse as a JSON array.
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["event"], "traversal_begin");
        assert!(parsed[0]["clip"].is_null(), "unbounded clip is null");

        assert_eq!(parsed[1]["event"], "invalid_geometry");
        assert_eq!(parsed[1]["error"], "node bounds are not finite");

        assert_eq!(parsed[2]["event"], "traversal_summary");
        assert_eq!(parsed[2]["drawn"], 4);
        assert_eq!(parsed[2]["cancelled"], true);
    }

    #[test]
    fn clip_rect_exports_as_array() {
        let value = clip_to_json(&ClipRegion::Rect(Rect::new(0.0, 1.0, 2.0, 3.0)));
        assert_eq!(value, json!([0.0, 1.0, 2.0, 3.0]));
        assert_eq!(clip_to_json(&ClipRegion::Empty), json!([0.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn node_visit_decision_matches_pretty_output() {
        let mut rec = RecorderSink::new().with_node_visits(true);
        rec.on_node_visit(&NodeVisitEvent {
            pass_index: 0,
            node: 4,
            depth: 1,
            world_rect: Rect::new(0.0, 0.0, 5.0, 5.0),
            decision: CullDecision::Drawn,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["event"], "node_visit");
        assert_eq!(parsed[0]["decision"], "drawn");
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
