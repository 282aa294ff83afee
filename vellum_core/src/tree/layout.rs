// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout invalidation of children.

use super::id::NodeId;
use super::store::RenderTree;

/// Concrete layout for render-tree nodes.
///
/// The support layer decides *which* children lay out; implementors decide
/// *how*. An implementation writes the node's transform and geometry and
/// must clear its needs-layout flag before returning.
pub trait Layouter {
    /// Lays out `node`.
    fn layout(&mut self, tree: &mut RenderTree, node: NodeId);
}

impl RenderTree {
    /// Lays out `node` if it is marked as needing layout.
    pub fn layout_if_needed(&mut self, node: NodeId, layouter: &mut dyn Layouter) {
        if self.needs_layout(node) {
            layouter.layout(self, node);
        }
    }

    /// Lays out the children of `start`.
    ///
    /// A child is forced into layout when `self_needs_layout` is set, or when
    /// its element's geometry is relative to the viewport. Other children only
    /// lay out if they were already marked.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if a child is still marked after its layout.
    pub fn layout_children(
        &mut self,
        start: NodeId,
        self_needs_layout: bool,
        layouter: &mut dyn Layouter,
    ) {
        let mut next = self.first_child(start);
        while let Some(child) = next {
            let force = self_needs_layout
                || self
                    .element(child)
                    .is_some_and(|element| element.depends_on_viewport());
            if force {
                self.set_needs_layout(child, true);
            }
            self.layout_if_needed(child, layouter);
            debug_assert!(
                !self.needs_layout(child),
                "child {child} still needs layout after layout_children"
            );
            next = self.next_sibling(child);
        }
    }
}
