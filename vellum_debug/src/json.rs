// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON export of recorded sessions.
//!
//! [`export_events`] writes recorded trace events as [Chrome Trace Event
//! Format][format] JSON. Paint events carry no clock, so each event's timestamp
//! is its position in the recording; layers show up as nested durations.
//!
//! [`export_ops`] writes recorded drawing calls as a plain JSON array.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::pretty::{kind_name, layer_name};
use crate::recorder::{DrawOp, RecordedEvent};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Each node gets its own track.
pub fn export_events(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::with_capacity(events.len());

    for (ts, recorded) in events.iter().enumerate() {
        let value = match recorded {
            RecordedEvent::LayerBegin {
                node,
                layer,
                opacity,
            } => json!({
                "ph": "B",
                "name": layer_name(*layer),
                "cat": "Layer",
                "ts": ts,
                "pid": 0,
                "tid": node.index(),
                "args": { "opacity": opacity },
            }),
            RecordedEvent::LayerEnd { node, layer } => json!({
                "ph": "E",
                "name": layer_name(*layer),
                "cat": "Layer",
                "ts": ts,
                "pid": 0,
                "tid": node.index(),
            }),
            RecordedEvent::ResourceApplied { node, kind, slot } => json!({
                "ph": "i",
                "name": "Apply",
                "cat": "Resource",
                "ts": ts,
                "pid": 0,
                "tid": node.index(),
                "s": "t",
                "args": { "kind": kind_name(*kind), "slot": slot },
            }),
            RecordedEvent::Pending { node, kind, id } => json!({
                "ph": "i",
                "name": "Pending",
                "cat": "Resource",
                "ts": ts,
                "pid": 0,
                "tid": node.index(),
                "s": "t",
                "args": { "kind": kind_name(*kind), "id": id },
            }),
            RecordedEvent::Abort { node, kind } => json!({
                "ph": "i",
                "name": "Abort",
                "cat": "Paint",
                "ts": ts,
                "pid": 0,
                "tid": node.index(),
                "s": "t",
                "args": { "kind": kind_name(*kind) },
            }),
            RecordedEvent::FilterFinish { node, slot } => json!({
                "ph": "i",
                "name": "FilterFinish",
                "cat": "Resource",
                "ts": ts,
                "pid": 0,
                "tid": node.index(),
                "s": "t",
                "args": { "slot": slot },
            }),
            RecordedEvent::Summary(s) => json!({
                "ph": "i",
                "name": "Bracket",
                "cat": "Summary",
                "ts": ts,
                "pid": 0,
                "tid": s.node.index(),
                "s": "t",
                "args": {
                    "opacity_layer": s.opacity_layer,
                    "shadow_layer": s.shadow_layer,
                    "filter": s.filter,
                    "aborted": s.aborted,
                },
            }),
        };
        out.push(value);
    }

    serde_json::to_writer_pretty(&mut *writer, &out)?;
    writeln!(writer)
}

/// Exports recorded drawing calls as a JSON array of `{ "op": ... }` objects.
pub fn export_ops(ops: &[DrawOp], writer: &mut dyn Write) -> io::Result<()> {
    let out: Vec<Value> = ops.iter().map(op_to_json).collect();
    serde_json::to_writer_pretty(&mut *writer, &out)?;
    writeln!(writer)
}

fn rect_to_json(r: kurbo::Rect) -> Value {
    json!([r.x0, r.y0, r.x1, r.y1])
}

fn op_to_json(op: &DrawOp) -> Value {
    match op {
        DrawOp::Clip(rect) => json!({ "op": "clip", "rect": rect_to_json(*rect) }),
        DrawOp::BeginLayer(opacity) => json!({ "op": "begin_layer", "opacity": opacity }),
        DrawOp::EndLayer => json!({ "op": "end_layer" }),
        DrawOp::SetShadow {
            offset,
            blur,
            color,
            color_space,
        } => json!({
            "op": "set_shadow",
            "offset": [offset.x, offset.y],
            "blur": blur,
            "color": [color.r, color.g, color.b, color.a],
            "color_space": format!("{color_space:?}"),
        }),
        DrawOp::ConcatTransform(t) => json!({ "op": "concat", "coeffs": t.as_coeffs() }),
    }
}
