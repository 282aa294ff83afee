// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only questions about nodes and their surroundings.

use alloc::vec::Vec;

use super::id::NodeId;
use super::store::RenderTree;
use crate::style::{Overflow, Visibility};

impl RenderTree {
    /// Returns the nearest ancestor-or-self that owns a paint layer.
    ///
    /// Detached subtrees without a layer return `None`.
    #[must_use]
    pub fn enclosing_layer(&self, id: NodeId) -> Option<NodeId> {
        if self.has_layer(id) {
            return Some(id);
        }
        self.ancestors(id).find(|&a| self.has_layer[a.idx as usize])
    }

    /// Whether anything painted into `layer` is visible.
    ///
    /// Walks the layer's subtree without descending into nested layers.
    #[must_use]
    pub fn layer_has_visible_content(&self, layer: NodeId) -> bool {
        self.validate(layer);
        let mut stack: Vec<NodeId> = Vec::new();
        stack.push(layer);
        while let Some(node) = stack.pop() {
            if self.style[node.idx as usize].visibility == Visibility::Visible {
                return true;
            }
            stack.extend(
                self.children(node)
                    .filter(|&c| !self.has_layer[c.idx as usize]),
            );
        }
        false
    }

    /// Returns the text root a node belongs to, starting with the node
    /// itself.
    #[must_use]
    pub fn find_text_root(&self, start: NodeId) -> Option<NodeId> {
        if self.kind(start).is_svg_text() {
            return Some(start);
        }
        self.ancestors(start)
            .find(|&a| self.kind[a.idx as usize].is_svg_text())
    }

    /// Whether a viewport-establishing node clips its content.
    ///
    /// SVG has no independent x/y overflow and never produces `scroll`; the
    /// root always clips to the initial viewport and must not ask. Those are
    /// checked in debug builds.
    #[must_use]
    pub fn is_overflow_hidden(&self, id: NodeId) -> bool {
        let style = self.style(id);
        debug_assert_eq!(
            style.overflow_x, style.overflow_y,
            "SVG overflow must be the same on both axes"
        );
        debug_assert_ne!(
            style.overflow_x,
            Overflow::Scroll,
            "SVG content never scrolls"
        );
        debug_assert!(
            !self.kind(id).is_root(),
            "the root must not query its overflow"
        );
        style.overflow_x == Overflow::Hidden
    }
}
