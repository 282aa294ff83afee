// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the paint bracket.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! paint bracket calls at each step. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! A tracer travels with each [`PaintInfo`](crate::context::PaintInfo).

use crate::resource::{ResourceHandle, ResourceKind};
use crate::tree::NodeId;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which transparency layer the bracket opened or closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Group opacity below 1.
    Opacity,
    /// Drop shadow, always at full opacity.
    Shadow,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the bracket opens a transparency layer.
#[derive(Clone, Copy, Debug)]
pub struct LayerBeginEvent {
    /// Node being painted.
    pub node: NodeId,
    /// Which layer.
    pub layer: LayerKind,
    /// Opacity the layer was opened with.
    pub opacity: f32,
}

/// Emitted when the bracket closes a transparency layer.
#[derive(Clone, Copy, Debug)]
pub struct LayerEndEvent {
    /// Node being painted.
    pub node: NodeId,
    /// Which layer.
    pub layer: LayerKind,
}

/// Emitted after a clipper, masker or filter was applied to a node.
#[derive(Clone, Copy, Debug)]
pub struct ResourceAppliedEvent {
    /// Node being painted.
    pub node: NodeId,
    /// Kind of the applied resource.
    pub kind: ResourceKind,
    /// The applied resource.
    pub resource: ResourceHandle,
}

/// Emitted when a style reference did not resolve and was queued.
#[derive(Clone, Copy, Debug)]
pub struct PendingResourceEvent<'a> {
    /// Referencing node.
    pub node: NodeId,
    /// Expected kind.
    pub kind: ResourceKind,
    /// The unresolved identifier.
    pub id: &'a str,
}

/// Emitted when a masker or filter refused to apply and the node is skipped.
#[derive(Clone, Copy, Debug)]
pub struct PaintAbortEvent {
    /// Node whose paint was aborted.
    pub node: NodeId,
    /// Kind of the failing resource.
    pub kind: ResourceKind,
}

/// Emitted when a filter composited its result during finish.
#[derive(Clone, Copy, Debug)]
pub struct FilterFinishEvent {
    /// Node being painted.
    pub node: NodeId,
    /// The filter.
    pub resource: ResourceHandle,
}

/// What one prepare call ended up opening.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BracketSummary {
    /// Node being painted.
    pub node: NodeId,
    /// An opacity layer was opened.
    pub opacity_layer: bool,
    /// A shadow layer was opened.
    pub shadow_layer: bool,
    /// A filter was prepared.
    pub filter: bool,
    /// The node's paint was aborted.
    pub aborted: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the paint bracket.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a transparency layer was opened.
    fn on_layer_begin(&mut self, e: &LayerBeginEvent) {
        _ = e;
    }

    /// Called after a transparency layer was closed.
    fn on_layer_end(&mut self, e: &LayerEndEvent) {
        _ = e;
    }

    /// Called after a resource was applied.
    fn on_resource_applied(&mut self, e: &ResourceAppliedEvent) {
        _ = e;
    }

    /// Called when a reference was queued as pending.
    fn on_pending_resource(&mut self, e: &PendingResourceEvent<'_>) {
        _ = e;
    }

    /// Called when a node's paint is aborted.
    fn on_paint_abort(&mut self, e: &PaintAbortEvent) {
        _ = e;
    }

    /// Called after a filter composited its result.
    fn on_filter_finish(&mut self, e: &FilterFinishEvent) {
        _ = e;
    }

    /// Called at the end of every prepare call.
    fn on_bracket_summary(&mut self, s: &BracketSummary) {
        _ = s;
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

impl Default for Tracer<'_> {
    fn default() -> Self {
        Self::none()
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident, $e:expr) => {{
        #[cfg(feature = "trace")]
        if let Some(s) = &mut $self.sink {
            s.$method($e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $e;
        }
    }};
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

    /// Emits a [`LayerBeginEvent`].
    #[inline]
    pub fn layer_begin(&mut self, e: &LayerBeginEvent) {
        dispatch!(self, on_layer_begin, e);
    }

    /// Emits a [`LayerEndEvent`].
    #[inline]
    pub fn layer_end(&mut self, e: &LayerEndEvent) {
        dispatch!(self, on_layer_end, e);
    }

    /// Emits a [`ResourceAppliedEvent`].
    #[inline]
    pub fn resource_applied(&mut self, e: &ResourceAppliedEvent) {
        dispatch!(self, on_resource_applied, e);
    }

    /// Emits a [`PendingResourceEvent`].
    #[inline]
    pub fn pending_resource(&mut self, e: &PendingResourceEvent<'_>) {
        dispatch!(self, on_pending_resource, e);
    }

    /// Emits a [`PaintAbortEvent`].
    #[inline]
    pub fn paint_abort(&mut self, e: &PaintAbortEvent) {
        dispatch!(self, on_paint_abort, e);
    }

    /// Emits a [`FilterFinishEvent`].
    #[inline]
    pub fn filter_finish(&mut self, e: &FilterFinishEvent) {
        dispatch!(self, on_filter_finish, e);
    }

    /// Emits a [`BracketSummary`].
    #[inline]
    pub fn bracket_summary(&mut self, s: &BracketSummary) {
        dispatch!(self, on_bracket_summary, s);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
