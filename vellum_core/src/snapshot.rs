// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Painting a subtree into an off-screen buffer.
//!
//! Masks, patterns and clip paths render their content subtree into an image
//! buffer before use. Buffer allocation is the caller's business; these
//! helpers only drive layout and paint and keep the buffer within the visible
//! viewport.

use kurbo::Rect;

use crate::context::{GraphicsContext, PaintInfo};
use crate::document::{Document, FrameView};
use crate::geometry::IntSize;
use crate::tree::{Layouter, NodeId};

/// An off-screen buffer with its own drawing context.
pub trait ImageBuffer {
    /// The context drawing into this buffer.
    fn context(&mut self) -> &mut dyn GraphicsContext;
}

/// Concrete layout and paint for render-tree nodes.
pub trait NodeRenderer: Layouter {
    /// Paints `node` and its subtree.
    fn paint(&mut self, doc: &mut Document, node: NodeId, info: &mut PaintInfo<'_>);
}

impl Document {
    /// Lays out and paints `item` into `image`.
    ///
    /// The dirty rect is the visible area of the document's view, or empty
    /// when the document is not shown. A container that normally does not
    /// draw its contents (such as a `<mask>` host) draws them for the
    /// duration of this call.
    pub fn render_subtree_to_image<R: NodeRenderer>(
        &mut self,
        image: &mut dyn ImageBuffer,
        item: NodeId,
        renderer: &mut R,
    ) {
        let rect = self
            .frame_view()
            .map_or(Rect::ZERO, FrameView::visible_rect);

        let force_contents =
            self.tree.kind(item).is_svg_container() && !self.tree.draws_contents(item);
        if force_contents {
            self.tree.set_draws_contents(item, true);
        }

        self.tree.layout_if_needed(item, renderer);
        let mut info = PaintInfo::new(image.context(), rect);
        renderer.paint(self, item, &mut info);

        if force_contents {
            self.tree.set_draws_contents(item, false);
        }
    }
}

/// Shrinks `size` so that it fits inside the visible viewport.
///
/// Without a view the size is returned unchanged.
#[must_use]
pub fn clamp_image_buffer_size_to_viewport(view: Option<&FrameView>, size: IntSize) -> IntSize {
    let Some(view) = view else {
        return size;
    };
    IntSize::new(
        size.width.min(view.visible_width),
        size.height.min(view.visible_height),
    )
}
