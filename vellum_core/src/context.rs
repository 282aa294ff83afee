// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing-context contract and per-paint state.
//!
//! Rasterization is not part of this crate. Renderers implement
//! [`GraphicsContext`] over their own canvas, and the paint bracket drives it
//! through the handful of primitives below. The same trait backs test doubles
//! and the recording context in `vellum_debug`.

use kurbo::{Affine, Rect, Vec2};

use crate::style::{Color, ColorSpace};
use crate::trace::Tracer;

/// The drawing primitives the support layer needs from a 2D canvas.
pub trait GraphicsContext {
    /// Intersects the current clip with `rect`.
    fn clip(&mut self, rect: Rect);

    /// Starts accumulating drawing into a layer blended at `opacity`.
    fn begin_transparency_layer(&mut self, opacity: f32);

    /// Ends the innermost transparency layer and composites it.
    fn end_transparency_layer(&mut self);

    /// Sets the shadow applied to subsequent drawing.
    fn set_shadow(&mut self, offset: Vec2, blur: f64, color: Color, color_space: ColorSpace);

    /// Multiplies the current transform by `transform`.
    fn concat_transform(&mut self, transform: Affine);
}

/// State threaded through one paint call.
pub struct PaintInfo<'a> {
    /// The context drawing goes to.
    pub context: &'a mut dyn GraphicsContext,
    /// The dirty rect, in the current user space.
    pub rect: Rect,
    /// Diagnostics for this paint call.
    pub tracer: Tracer<'a>,
}

impl core::fmt::Debug for PaintInfo<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PaintInfo")
            .field("rect", &self.rect)
            .finish_non_exhaustive()
    }
}

impl<'a> PaintInfo<'a> {
    /// Creates paint state without tracing.
    #[must_use]
    pub fn new(context: &'a mut dyn GraphicsContext, rect: Rect) -> Self {
        Self {
            context,
            rect,
            tracer: Tracer::none(),
        }
    }

    /// Attaches a tracer.
    #[must_use]
    pub fn with_tracer(mut self, tracer: Tracer<'a>) -> Self {
        self.tracer = tracer;
        self
    }

    /// Moves painting into a node's local space.
    ///
    /// Concatenates `local_to_ancestor` onto the context and maps the dirty
    /// rect back through its inverse. The identity transform is a no-op. A
    /// singular transform is still concatenated but leaves the rect alone,
    /// since it has no inverse.
    pub fn apply_transform(&mut self, local_to_ancestor: Affine) {
        if local_to_ancestor == Affine::IDENTITY {
            return;
        }
        self.context.concat_transform(local_to_ancestor);
        if local_to_ancestor.determinant() != 0.0 {
            self.rect = local_to_ancestor.inverse().transform_rect_bbox(self.rect);
        }
    }
}
