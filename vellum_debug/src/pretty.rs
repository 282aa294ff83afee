// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use vellum_core::resource::ResourceKind;
use vellum_core::trace::{
    BracketSummary, FilterFinishEvent, LayerBeginEvent, LayerEndEvent, LayerKind, PaintAbortEvent,
    PendingResourceEvent, ResourceAppliedEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

pub(crate) fn layer_name(layer: LayerKind) -> &'static str {
    match layer {
        LayerKind::Opacity => "opacity",
        LayerKind::Shadow => "shadow",
    }
}

pub(crate) fn kind_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Clipper => "clipper",
        ResourceKind::Masker => "masker",
        ResourceKind::Marker => "marker",
        ResourceKind::Filter => "filter",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_layer_begin(&mut self, e: &LayerBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[layer:begin] node={} {} opacity={:.2}",
            e.node,
            layer_name(e.layer),
            e.opacity,
        );
    }

    fn on_layer_end(&mut self, e: &LayerEndEvent) {
        let _ = writeln!(
            self.writer,
            "[layer:end] node={} {}",
            e.node,
            layer_name(e.layer),
        );
    }

    fn on_resource_applied(&mut self, e: &ResourceAppliedEvent) {
        let _ = writeln!(
            self.writer,
            "[apply] node={} {} slot={}",
            e.node,
            kind_name(e.kind),
            e.resource.index(),
        );
    }

    fn on_pending_resource(&mut self, e: &PendingResourceEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[pending] node={} {} id={:?}",
            e.node,
            kind_name(e.kind),
            e.id,
        );
    }

    fn on_paint_abort(&mut self, e: &PaintAbortEvent) {
        let _ = writeln!(
            self.writer,
            "[abort] node={} {} failed",
            e.node,
            kind_name(e.kind),
        );
    }

    fn on_filter_finish(&mut self, e: &FilterFinishEvent) {
        let _ = writeln!(
            self.writer,
            "[filter:finish] node={} slot={}",
            e.node,
            e.resource.index(),
        );
    }

    fn on_bracket_summary(&mut self, s: &BracketSummary) {
        let status = if s.aborted { "ABORTED" } else { "ok" };
        let _ = writeln!(
            self.writer,
            "[bracket] node={} opacity={} shadow={} filter={} status={status}",
            s.node, s.opacity_layer, s.shadow_layer, s.filter,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use kurbo::Rect;
    use vellum_core::Document;
    use vellum_core::context::PaintInfo;
    use vellum_core::style::{ResourceRefs, SvgStyle};
    use vellum_core::trace::Tracer;
    use vellum_core::tree::{ElementInfo, NodeKind};

    use super::*;
    use crate::recorder::RecordingContext;

    #[test]
    fn pretty_print_bracket() {
        let mut doc = Document::new();
        let style = SvgStyle {
            opacity: 0.5,
            resources: ResourceRefs {
                clipper: "later".into(),
                ..ResourceRefs::default()
            },
            ..SvgStyle::default()
        };
        let node = doc.tree_mut().create_node(NodeKind::Shape, Rc::new(style));
        doc.tree_mut().set_element(node, Some(ElementInfo::STYLED));

        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        let mut ctx = RecordingContext::new();
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut info = PaintInfo::new(&mut ctx, rect).with_tracer(Tracer::new(&mut sink));
        doc.paint_with_bracket(node, &mut info, rect, None, |_, _| {})
            .unwrap();
        drop(info);

        let output = String::from_utf8(sink.into_writer()).unwrap();
        assert!(
            output.contains("[layer:begin] node=#0 opacity opacity=0.50"),
            "got: {output}"
        );
        assert!(
            output.contains("[pending] node=#0 clipper id=\"later\""),
            "got: {output}"
        );
        assert!(output.contains("status=ok"), "got: {output}");
        assert!(output.contains("[layer:end] node=#0 opacity"), "got: {output}");
    }
}
