// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only style snapshot consulted by the support layer.
//!
//! Style resolution happens elsewhere. Nodes hold an [`Rc<SvgStyle>`] that the
//! resolver replaces wholesale; nothing here mutates a snapshot.
//!
//! [`Rc<SvgStyle>`]: alloc::rc::Rc

use kurbo::{Rect, Vec2};

use crate::resource::ResourceId;

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    /// Creates a color from its components.
    #[inline]
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Color space used when the drawing context composites a shadow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Device RGB.
    #[default]
    DeviceRgb,
    /// Linearized RGB.
    LinearRgb,
}

/// The `visibility` property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Painted.
    #[default]
    Visible,
    /// Not painted, still takes part in layout.
    Hidden,
    /// Treated like `Hidden` for SVG content.
    Collapse,
}

/// The `overflow-x` / `overflow-y` properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Content may paint outside the viewport.
    #[default]
    Visible,
    /// Content is clipped to the viewport.
    Hidden,
    /// Never produced for SVG content by style adjustment.
    Scroll,
    /// Behaves like `Visible` for SVG content.
    Auto,
}

/// A drop shadow declared on an element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Offset of the shadow from the content.
    pub offset: Vec2,
    /// Blur radius.
    pub blur: f64,
    /// Shadow color.
    pub color: Color,
}

impl Shadow {
    /// Grows `rect` by the area the shadow can paint into.
    ///
    /// Each edge only ever moves outwards: a shadow offset towards the right
    /// extends the right edge but never pulls in the left one.
    #[must_use]
    pub fn inflate(&self, rect: Rect) -> Rect {
        let left = (self.offset.x - self.blur).min(0.0);
        let right = (self.offset.x + self.blur).max(0.0);
        let top = (self.offset.y - self.blur).min(0.0);
        let bottom = (self.offset.y + self.blur).max(0.0);
        Rect::new(
            rect.x0 + left,
            rect.y0 + top,
            rect.x1 + right,
            rect.y1 + bottom,
        )
    }
}

/// Identifiers of the paint resources a node's style references.
///
/// An empty identifier means "no resource".
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResourceRefs {
    /// `clip-path`.
    pub clipper: ResourceId,
    /// `mask`.
    pub masker: ResourceId,
    /// `filter`.
    pub filter: ResourceId,
    /// `marker-start`.
    pub marker_start: ResourceId,
    /// `marker-mid`.
    pub marker_mid: ResourceId,
    /// `marker-end`.
    pub marker_end: ResourceId,
}

/// The resolved style of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgStyle {
    /// Group opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Drop shadow, if any.
    pub shadow: Option<Shadow>,
    /// `visibility`.
    pub visibility: Visibility,
    /// `overflow-x`.
    pub overflow_x: Overflow,
    /// `overflow-y`.
    pub overflow_y: Overflow,
    /// Color space for shadow compositing.
    pub color_space: ColorSpace,
    /// Referenced paint resources.
    pub resources: ResourceRefs,
}

impl Default for SvgStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            shadow: None,
            visibility: Visibility::Visible,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            color_space: ColorSpace::DeviceRgb,
            resources: ResourceRefs::default(),
        }
    }
}

impl SvgStyle {
    /// Grows `rect` by this style's shadow extent, or returns it unchanged.
    #[must_use]
    pub fn inflate_for_shadow(&self, rect: Rect) -> Rect {
        match &self.shadow {
            Some(shadow) => shadow.inflate(rect),
            None => rect,
        }
    }
}
