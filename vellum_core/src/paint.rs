// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paint bracket: effect setup before a node paints, teardown after.
//!
//! [`Document::prepare_to_render`] runs, in order:
//!
//! 1. Opacity below 1: clip to the repaint rect, open an opacity layer.
//! 2. Shadow: clip again, set the shadow, open a layer at full opacity.
//! 3. Look up the filter. A filter equal to the enclosing root filter is
//!    ignored, so a `<tspan>` sharing its `<text>`'s filter is not filtered
//!    twice.
//! 4. Apply the masker. Failure aborts the node.
//! 5. Apply the clipper. Failure is not an abort.
//! 6. Register with the filter and prepare it. Failure aborts the node.
//!
//! References that do not resolve are queued as pending at their step.
//!
//! The returned [`PaintBracket`] records what was opened and must be handed to
//! [`Document::finish_render`], which composites the filter and then closes
//! the opacity layer followed by the shadow layer. An abort still carries the
//! layers opened so far; see [`AbortedPaint::into_bracket`].

use alloc::rc::Rc;

use kurbo::Rect;
use thiserror::Error;

use crate::context::PaintInfo;
use crate::document::Document;
use crate::resource::{ResourceHandle, ResourceId, ResourceKind};
use crate::trace::{
    BracketSummary, FilterFinishEvent, LayerBeginEvent, LayerEndEvent, LayerKind,
    PaintAbortEvent, PendingResourceEvent, ResourceAppliedEvent,
};
use crate::tree::NodeId;

/// What one prepare call opened.
///
/// Live only for the duration of a single paint call. The bracket is neither
/// `Clone` nor `Copy`: [`Document::finish_render`] consumes it, so the layers
/// it records can be closed only once.
///
/// ```compile_fail
/// use kurbo::Rect;
/// use vellum_core::Document;
/// use vellum_core::context::{GraphicsContext, PaintInfo};
/// use vellum_core::tree::NodeId;
///
/// fn finish_twice(doc: &mut Document, node: NodeId, ctx: &mut dyn GraphicsContext) {
///     let mut info = PaintInfo::new(ctx, Rect::ZERO);
///     if let Ok(bracket) = doc.prepare_to_render(node, &mut info, Rect::ZERO, None) {
///         doc.finish_render(node, &mut info, bracket);
///         doc.finish_render(node, &mut info, bracket);
///     }
/// }
/// ```
#[must_use = "a bracket must be passed to `finish_render`"]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PaintBracket {
    opacity_layer: bool,
    shadow_layer: bool,
    filter: Option<ResourceHandle>,
}

impl PaintBracket {
    /// Whether an opacity layer is open.
    #[must_use]
    pub fn opacity_layer(&self) -> bool {
        self.opacity_layer
    }

    /// Whether a shadow layer is open.
    #[must_use]
    pub fn shadow_layer(&self) -> bool {
        self.shadow_layer
    }

    /// The prepared filter, if any.
    #[must_use]
    pub fn filter(&self) -> Option<ResourceHandle> {
        self.filter
    }

    /// Number of transparency layers [`Document::finish_render`] will close.
    #[must_use]
    pub fn open_layers(&self) -> u8 {
        u8::from(self.opacity_layer) + u8::from(self.shadow_layer)
    }
}

/// Why a node's paint was skipped.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PaintAbort {
    /// The masker could not be applied.
    #[error("mask {0} could not be applied")]
    Mask(ResourceId),
    /// The filter could not be prepared.
    #[error("filter {0} could not be prepared")]
    Filter(ResourceId),
}

/// A failed prepare, with the layers it had opened before failing.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct AbortedPaint {
    /// Why the paint was aborted.
    pub reason: PaintAbort,
    bracket: PaintBracket,
}

impl AbortedPaint {
    /// The partially opened bracket, to be passed to
    /// [`Document::finish_render`] so that its layers are closed.
    pub fn into_bracket(self) -> PaintBracket {
        self.bracket
    }
}

impl Document {
    /// Sets up opacity, shadow, masking, clipping and filtering for `node`.
    ///
    /// `repaint_rect` bounds the transparency layers. `root_filter` is the
    /// filter already active for the enclosing text root, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AbortedPaint`] if the masker or the filter refuses to apply.
    /// The node and its children must then not be painted, but the enclosed
    /// bracket still has to be finished.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `node` does not have a styled SVG element.
    pub fn prepare_to_render(
        &mut self,
        node: NodeId,
        info: &mut PaintInfo<'_>,
        repaint_rect: Rect,
        root_filter: Option<ResourceHandle>,
    ) -> Result<PaintBracket, AbortedPaint> {
        debug_assert!(
            self.tree
                .element(node)
                .is_some_and(|e| e.is_svg && e.is_styled),
            "painted node {node} must have a styled SVG element"
        );
        #[cfg(not(feature = "filters"))]
        {
            _ = root_filter;
        }

        let style = Rc::clone(self.tree.style(node));
        let refs = &style.resources;
        let mut bracket = PaintBracket::default();

        // Transparency layers come before any filter.
        if style.opacity < 1.0 {
            info.context.clip(repaint_rect);
            info.context.begin_transparency_layer(style.opacity);
            bracket.opacity_layer = true;
            info.tracer.layer_begin(&LayerBeginEvent {
                node,
                layer: LayerKind::Opacity,
                opacity: style.opacity,
            });
        }

        if let Some(shadow) = &style.shadow {
            info.context.clip(repaint_rect);
            info.context
                .set_shadow(shadow.offset, shadow.blur, shadow.color, style.color_space);
            info.context.begin_transparency_layer(1.0);
            bracket.shadow_layer = true;
            info.tracer.layer_begin(&LayerBeginEvent {
                node,
                layer: LayerKind::Shadow,
                opacity: 1.0,
            });
        }

        #[cfg(feature = "filters")]
        let filter = match self.resources.lookup(&refs.filter, ResourceKind::Filter) {
            Some(found) if Some(found) == root_filter => FilterRef::SameAsRoot,
            Some(found) => FilterRef::Found(found),
            None => FilterRef::Missing,
        };

        if let Some(masker) = self.resolve_traced(node, &refs.masker, ResourceKind::Masker, info) {
            self.resources.add_client(masker, node);
            if !self
                .resources
                .get_mut(masker)
                .apply_resource(&self.tree, node, &mut *info.context)
            {
                return Err(abort(
                    node,
                    info,
                    bracket,
                    PaintAbort::Mask(refs.masker.clone()),
                ));
            }
            applied(node, info, ResourceKind::Masker, masker);
        }

        if let Some(clipper) = self.resolve_traced(node, &refs.clipper, ResourceKind::Clipper, info)
        {
            self.resources.add_client(clipper, node);
            if self
                .resources
                .get_mut(clipper)
                .apply_resource(&self.tree, node, &mut *info.context)
            {
                applied(node, info, ResourceKind::Clipper, clipper);
            }
        }

        #[cfg(feature = "filters")]
        match filter {
            FilterRef::Found(handle) => {
                self.resources.add_client(handle, node);
                if !self
                    .resources
                    .get_mut(handle)
                    .prepare_filter(&self.tree, node, &mut *info.context)
                {
                    return Err(abort(
                        node,
                        info,
                        bracket,
                        PaintAbort::Filter(refs.filter.clone()),
                    ));
                }
                bracket.filter = Some(handle);
                applied(node, info, ResourceKind::Filter, handle);
            }
            FilterRef::Missing if !refs.filter.is_empty() => {
                self.pending.add(&refs.filter, node, ResourceKind::Filter);
                info.tracer.pending_resource(&PendingResourceEvent {
                    node,
                    kind: ResourceKind::Filter,
                    id: refs.filter.as_str(),
                });
            }
            FilterRef::Missing | FilterRef::SameAsRoot => {}
        }

        info.tracer.bracket_summary(&summary(node, &bracket, false));
        Ok(bracket)
    }

    /// Tears down what [`prepare_to_render`](Self::prepare_to_render) set up.
    ///
    /// Composites the filter, then closes the opacity layer, then the shadow
    /// layer.
    pub fn finish_render(&mut self, node: NodeId, info: &mut PaintInfo<'_>, bracket: PaintBracket) {
        if let Some(filter) = bracket.filter {
            self.resources
                .get_mut(filter)
                .finish_filter(&self.tree, node, &mut *info.context);
            info.tracer.filter_finish(&FilterFinishEvent {
                node,
                resource: filter,
            });
        }

        // The shadow layer was opened second but is closed last.
        if bracket.opacity_layer {
            info.context.end_transparency_layer();
            info.tracer.layer_end(&LayerEndEvent {
                node,
                layer: LayerKind::Opacity,
            });
        }
        if bracket.shadow_layer {
            info.context.end_transparency_layer();
            info.tracer.layer_end(&LayerEndEvent {
                node,
                layer: LayerKind::Shadow,
            });
        }
    }

    /// Runs `paint` inside a prepared bracket and always finishes it.
    ///
    /// `paint` is skipped when prepare aborts. The layers opened before the
    /// abort are closed either way.
    ///
    /// # Errors
    ///
    /// Returns the abort reason if `paint` was skipped.
    pub fn paint_with_bracket<F>(
        &mut self,
        node: NodeId,
        info: &mut PaintInfo<'_>,
        repaint_rect: Rect,
        root_filter: Option<ResourceHandle>,
        paint: F,
    ) -> Result<(), PaintAbort>
    where
        F: FnOnce(&mut Self, &mut PaintInfo<'_>),
    {
        match self.prepare_to_render(node, info, repaint_rect, root_filter) {
            Ok(bracket) => {
                paint(self, info);
                self.finish_render(node, info, bracket);
                Ok(())
            }
            Err(AbortedPaint { reason, bracket }) => {
                self.finish_render(node, info, bracket);
                Err(reason)
            }
        }
    }

    /// [`resolve_resource`](Self::resolve_resource), reporting queued
    /// references to the tracer.
    fn resolve_traced(
        &mut self,
        node: NodeId,
        id: &ResourceId,
        kind: ResourceKind,
        info: &mut PaintInfo<'_>,
    ) -> Option<ResourceHandle> {
        let found = self.resolve_resource(node, id, kind);
        if found.is_none() && !id.is_empty() {
            info.tracer.pending_resource(&PendingResourceEvent {
                node,
                kind,
                id: id.as_str(),
            });
        }
        found
    }
}

#[cfg(feature = "filters")]
#[derive(Clone, Copy)]
enum FilterRef {
    Found(ResourceHandle),
    SameAsRoot,
    Missing,
}

fn applied(node: NodeId, info: &mut PaintInfo<'_>, kind: ResourceKind, resource: ResourceHandle) {
    info.tracer.resource_applied(&ResourceAppliedEvent {
        node,
        kind,
        resource,
    });
}

fn summary(node: NodeId, bracket: &PaintBracket, aborted: bool) -> BracketSummary {
    BracketSummary {
        node,
        opacity_layer: bracket.opacity_layer,
        shadow_layer: bracket.shadow_layer,
        filter: bracket.filter.is_some(),
        aborted,
    }
}

fn abort(
    node: NodeId,
    info: &mut PaintInfo<'_>,
    bracket: PaintBracket,
    reason: PaintAbort,
) -> AbortedPaint {
    let kind = match reason {
        PaintAbort::Mask(_) => ResourceKind::Masker,
        PaintAbort::Filter(_) => ResourceKind::Filter,
    };
    info.tracer.paint_abort(&PaintAbortEvent { node, kind });
    info.tracer.bracket_summary(&summary(node, &bracket, true));
    AbortedPaint { reason, bracket }
}
