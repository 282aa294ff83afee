// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory recording of trace events and drawing calls.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event as an owned
//! [`RecordedEvent`]. [`RecordingContext`] implements [`GraphicsContext`] and
//! keeps every call as a [`DrawOp`], tracking how deeply transparency layers
//! are nested.

use kurbo::{Affine, Rect, Vec2};
use vellum_core::context::GraphicsContext;
use vellum_core::resource::ResourceKind;
use vellum_core::style::{Color, ColorSpace};
use vellum_core::trace::{
    BracketSummary, FilterFinishEvent, LayerBeginEvent, LayerEndEvent, LayerKind, PaintAbortEvent,
    PendingResourceEvent, ResourceAppliedEvent, TraceSink,
};
use vellum_core::tree::NodeId;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// One recorded trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A transparency layer was opened.
    LayerBegin {
        /// Node being painted.
        node: NodeId,
        /// Which layer.
        layer: LayerKind,
        /// Layer opacity.
        opacity: f32,
    },
    /// A transparency layer was closed.
    LayerEnd {
        /// Node being painted.
        node: NodeId,
        /// Which layer.
        layer: LayerKind,
    },
    /// A resource was applied.
    ResourceApplied {
        /// Node being painted.
        node: NodeId,
        /// Resource kind.
        kind: ResourceKind,
        /// Registry slot of the resource.
        slot: u32,
    },
    /// A reference was queued as pending.
    Pending {
        /// Referencing node.
        node: NodeId,
        /// Expected kind.
        kind: ResourceKind,
        /// The unresolved identifier.
        id: String,
    },
    /// A node's paint was aborted.
    Abort {
        /// Node whose paint was aborted.
        node: NodeId,
        /// Kind of the failing resource.
        kind: ResourceKind,
    },
    /// A filter composited its result.
    FilterFinish {
        /// Node being painted.
        node: NodeId,
        /// Registry slot of the filter.
        slot: u32,
    },
    /// A prepare call finished.
    Summary(BracketSummary),
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }
}

impl TraceSink for RecorderSink {
    fn on_layer_begin(&mut self, e: &LayerBeginEvent) {
        self.events.push(RecordedEvent::LayerBegin {
            node: e.node,
            layer: e.layer,
            opacity: e.opacity,
        });
    }

    fn on_layer_end(&mut self, e: &LayerEndEvent) {
        self.events.push(RecordedEvent::LayerEnd {
            node: e.node,
            layer: e.layer,
        });
    }

    fn on_resource_applied(&mut self, e: &ResourceAppliedEvent) {
        self.events.push(RecordedEvent::ResourceApplied {
            node: e.node,
            kind: e.kind,
            slot: e.resource.index(),
        });
    }

    fn on_pending_resource(&mut self, e: &PendingResourceEvent<'_>) {
        self.events.push(RecordedEvent::Pending {
            node: e.node,
            kind: e.kind,
            id: e.id.to_owned(),
        });
    }

    fn on_paint_abort(&mut self, e: &PaintAbortEvent) {
        self.events.push(RecordedEvent::Abort {
            node: e.node,
            kind: e.kind,
        });
    }

    fn on_filter_finish(&mut self, e: &FilterFinishEvent) {
        self.events.push(RecordedEvent::FilterFinish {
            node: e.node,
            slot: e.resource.index(),
        });
    }

    fn on_bracket_summary(&mut self, s: &BracketSummary) {
        self.events.push(RecordedEvent::Summary(*s));
    }
}

// ---------------------------------------------------------------------------
// RecordingContext
// ---------------------------------------------------------------------------

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// `clip`.
    Clip(Rect),
    /// `begin_transparency_layer`.
    BeginLayer(f32),
    /// `end_transparency_layer`.
    EndLayer,
    /// `set_shadow`.
    SetShadow {
        /// Shadow offset.
        offset: Vec2,
        /// Blur radius.
        blur: f64,
        /// Shadow color.
        color: Color,
        /// Compositing color space.
        color_space: ColorSpace,
    },
    /// `concat_transform`.
    ConcatTransform(Affine),
}

/// A [`GraphicsContext`] that records calls instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingContext {
    ops: Vec<DrawOp>,
    depth: u32,
    max_depth: u32,
    underflows: u32,
}

impl RecordingContext {
    /// Creates an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded calls in order.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Transparency layers currently open.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Deepest layer nesting seen.
    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Whether every opened layer was closed and nothing closed more than
    /// was opened.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && self.underflows == 0
    }

    /// Clears the recording.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl GraphicsContext for RecordingContext {
    fn clip(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clip(rect));
    }

    fn begin_transparency_layer(&mut self, opacity: f32) {
        self.ops.push(DrawOp::BeginLayer(opacity));
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }

    fn end_transparency_layer(&mut self) {
        self.ops.push(DrawOp::EndLayer);
        match self.depth.checked_sub(1) {
            Some(depth) => self.depth = depth,
            None => self.underflows += 1,
        }
    }

    fn set_shadow(&mut self, offset: Vec2, blur: f64, color: Color, color_space: ColorSpace) {
        self.ops.push(DrawOp::SetShadow {
            offset,
            blur,
            color,
            color_space,
        });
    }

    fn concat_transform(&mut self, transform: Affine) {
        self.ops.push(DrawOp::ConcatTransform(transform));
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use vellum_core::Document;
    use vellum_core::context::PaintInfo;
    use vellum_core::style::{Shadow, SvgStyle};
    use vellum_core::trace::Tracer;
    use vellum_core::tree::{ElementInfo, NodeKind};

    use super::*;

    #[test]
    fn context_tracks_nesting() {
        let mut ctx = RecordingContext::new();
        ctx.begin_transparency_layer(0.5);
        ctx.begin_transparency_layer(1.0);
        assert_eq!(ctx.depth(), 2);
        ctx.end_transparency_layer();
        ctx.end_transparency_layer();
        assert!(ctx.is_balanced());
        assert_eq!(ctx.max_depth(), 2);

        ctx.end_transparency_layer();
        assert!(!ctx.is_balanced());
        ctx.clear();
        assert!(ctx.is_balanced());
        assert!(ctx.ops().is_empty());
    }

    #[test]
    fn records_bracket_events() {
        let mut doc = Document::new();
        let style = SvgStyle {
            opacity: 0.75,
            shadow: Some(Shadow {
                offset: Vec2::new(1.0, 1.0),
                blur: 2.0,
                color: Color::BLACK,
            }),
            ..SvgStyle::default()
        };
        let node = doc.tree_mut().create_node(NodeKind::Shape, Rc::new(style));
        doc.tree_mut().set_element(node, Some(ElementInfo::STYLED));

        let mut sink = RecorderSink::new();
        let mut ctx = RecordingContext::new();
        let rect = Rect::new(0.0, 0.0, 20.0, 20.0);
        let mut info = PaintInfo::new(&mut ctx, rect).with_tracer(Tracer::new(&mut sink));
        doc.paint_with_bracket(node, &mut info, rect, None, |_, _| {})
            .unwrap();
        drop(info);

        assert!(ctx.is_balanced());
        assert_eq!(ctx.max_depth(), 2);
        assert_eq!(
            sink.events(),
            [
                RecordedEvent::LayerBegin {
                    node,
                    layer: LayerKind::Opacity,
                    opacity: 0.75
                },
                RecordedEvent::LayerBegin {
                    node,
                    layer: LayerKind::Shadow,
                    opacity: 1.0
                },
                RecordedEvent::Summary(BracketSummary {
                    node,
                    opacity_layer: true,
                    shadow_layer: true,
                    filter: false,
                    aborted: false,
                }),
                RecordedEvent::LayerEnd {
                    node,
                    layer: LayerKind::Opacity
                },
                RecordedEvent::LayerEnd {
                    node,
                    layer: LayerKind::Shadow
                },
            ]
        );
    }
}
