// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node kinds and the element facts the support layer consults.

/// What a render-tree node is.
///
/// Concrete paint and layout behavior lives with the caller; the support
/// layer only asks the capability questions below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The outermost `<svg>` node. Always owns a paint layer.
    Root,
    /// A grouping node such as `<g>` or `<a>`.
    Container,
    /// A nested `<svg>` or `<symbol>` instance that establishes a viewport.
    ViewportContainer,
    /// A container that never paints, e.g. `<defs>` or resource hosts.
    HiddenContainer,
    /// A basic shape or path.
    Shape,
    /// An `<image>`.
    Image,
    /// A `<text>` block; the root of a text subtree.
    Text,
    /// A `<tspan>` or `<textPath>` inside a text subtree.
    TextSpan,
}

impl NodeKind {
    /// Whether this node is an SVG container.
    ///
    /// Viewport and hidden containers are containers too. The root is not.
    #[inline]
    #[must_use]
    pub const fn is_svg_container(self) -> bool {
        matches!(
            self,
            Self::Container | Self::ViewportContainer | Self::HiddenContainer
        )
    }

    /// Whether this node roots a text subtree.
    #[inline]
    #[must_use]
    pub const fn is_svg_text(self) -> bool {
        matches!(self, Self::Text)
    }

    /// Whether this node is the outermost SVG node.
    #[inline]
    #[must_use]
    pub const fn is_root(self) -> bool {
        matches!(self, Self::Root)
    }
}

/// Facts about the DOM element behind a node.
///
/// Anonymous nodes (for example generated text runs) carry no element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ElementInfo {
    /// The element lives in the SVG namespace.
    pub is_svg: bool,
    /// The element accepts presentation style.
    pub is_styled: bool,
    /// The element's geometry uses percentages or other relative units.
    pub has_relative_values: bool,
}

impl ElementInfo {
    /// A styled SVG element with absolute geometry.
    pub const STYLED: Self = Self {
        is_svg: true,
        is_styled: true,
        has_relative_values: false,
    };

    /// A styled SVG element whose geometry depends on its viewport.
    pub const RELATIVE: Self = Self {
        is_svg: true,
        is_styled: true,
        has_relative_values: true,
    };

    /// Whether a relayout of the parent viewport must relayout this element.
    #[inline]
    #[must_use]
    pub const fn depends_on_viewport(self) -> bool {
        self.is_svg && self.is_styled && self.has_relative_values
    }
}
