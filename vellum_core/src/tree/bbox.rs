// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aggregate bounding boxes over a container's children.

use kurbo::Rect;

use super::id::NodeId;
use super::store::RenderTree;
use crate::geometry::unite;

impl RenderTree {
    /// Unites the boxes of `container`'s children in its local space.
    ///
    /// With `include_all_painted_content`, each child contributes its repaint
    /// rect (stroke, markers, filters and shadows included); otherwise its
    /// object bounding box. Each box is mapped through the child's
    /// local-to-parent transform first. Empty boxes do not contribute.
    #[must_use]
    pub fn compute_container_bounding_box(
        &self,
        container: NodeId,
        include_all_painted_content: bool,
    ) -> Rect {
        self.children(container).fold(Rect::ZERO, |acc, child| {
            let i = child.idx as usize;
            let extent = if include_all_painted_content {
                self.repaint_rect[i]
            } else {
                self.object_bbox[i]
            };
            unite(acc, self.local_transform[i].transform_rect_bbox(extent))
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;

    use kurbo::Affine;

    use super::*;
    use crate::style::SvgStyle;
    use crate::tree::NodeKind;

    fn two_children() -> (RenderTree, NodeId, NodeId, NodeId) {
        let mut tree = RenderTree::new();
        let style = Rc::new(SvgStyle::default());
        let g = tree.create_node(NodeKind::Container, style.clone());
        let a = tree.create_node(NodeKind::Shape, style.clone());
        let b = tree.create_node(NodeKind::Shape, style);
        tree.append_child(g, a);
        tree.append_child(g, b);
        let a_box = Rect::from_origin_size((0.0, 0.0), (10.0, 10.0));
        let b_box = Rect::from_origin_size((20.0, 20.0), (5.0, 5.0));
        tree.set_object_bounding_box(a, a_box);
        tree.set_repaint_rect(a, a_box);
        tree.set_object_bounding_box(b, b_box);
        tree.set_repaint_rect(b, b_box);
        tree.set_local_transform(b, Affine::translate((0.0, 0.0)));
        (tree, g, a, b)
    }

    #[test]
    fn geometry_extent() {
        let (tree, g, _, _) = two_children();
        assert_eq!(
            tree.compute_container_bounding_box(g, false),
            Rect::new(0.0, 0.0, 25.0, 25.0)
        );
    }

    #[test]
    fn painted_extent_grows_origin() {
        let (mut tree, g, a, _) = two_children();
        tree.set_repaint_rect(a, Rect::from_origin_size((-2.0, -2.0), (14.0, 14.0)));
        let painted = tree.compute_container_bounding_box(g, true);
        assert_eq!(painted, Rect::new(-2.0, -2.0, 25.0, 25.0));
        // Geometry-only stays put and is contained in the painted box.
        let geometry = tree.compute_container_bounding_box(g, false);
        assert_eq!(geometry, Rect::new(0.0, 0.0, 25.0, 25.0));
        assert_eq!(painted.union(geometry), painted);
    }

    #[test]
    fn child_transforms_apply() {
        let (mut tree, g, _, b) = two_children();
        tree.set_local_transform(b, Affine::translate((10.0, -30.0)) * Affine::scale(2.0));
        // b: (20,20,25,25) * 2 = (40,40,50,50), + (10,-30) = (50,10,60,20).
        assert_eq!(
            tree.compute_container_bounding_box(g, false),
            Rect::new(0.0, 0.0, 60.0, 20.0)
        );
    }

    #[test]
    fn order_does_not_matter() {
        let (mut tree, g, a, b) = two_children();
        let before = tree.compute_container_bounding_box(g, false);
        tree.remove_from_parent(a);
        tree.append_child(g, a);
        assert_eq!(tree.children(g).next(), Some(b));
        assert_eq!(tree.compute_container_bounding_box(g, false), before);
    }

    #[test]
    fn empty_container_and_children() {
        let mut tree = RenderTree::new();
        let style = Rc::new(SvgStyle::default());
        let g = tree.create_node(NodeKind::Container, style.clone());
        assert_eq!(tree.compute_container_bounding_box(g, true), Rect::ZERO);

        let empty = tree.create_node(NodeKind::Shape, style.clone());
        let far = tree.create_node(NodeKind::Shape, style);
        tree.append_child(g, empty);
        tree.append_child(g, far);
        tree.set_object_bounding_box(far, Rect::new(100.0, 100.0, 110.0, 120.0));
        // The empty child at the origin does not drag the box towards (0, 0).
        assert_eq!(
            tree.compute_container_bounding_box(g, false),
            Rect::new(100.0, 100.0, 110.0, 120.0)
        );
    }
}
