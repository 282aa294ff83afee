// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping rects and points from a node's local space to an ancestor's.
//!
//! Every node carries a local-to-parent [`Affine`]. Mapping to an ancestor
//! walks the parent chain, applying one transform per step, and stops when
//! the ancestor is reached. Passing `None` as the ancestor maps all the way
//! into the space the root is placed in.
//!
//! Repaint rects additionally grow by each visited node's shadow before that
//! node's transform applies, so a shadow on a group enlarges the repaint area
//! of everything inside it.

use kurbo::{Affine, Point, Rect};

use crate::style::Visibility;
use crate::tree::{NodeId, RenderTree};

/// A point, and optionally a quad, being mapped up the tree.
///
/// The accumulated transform is kept so that callers can map further
/// geometry through the same chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    point: Point,
    quad: Option<[Point; 4]>,
    accumulated: Affine,
}

impl TransformState {
    /// Starts mapping a single point.
    #[must_use]
    pub fn from_point(point: Point) -> Self {
        Self {
            point,
            quad: None,
            accumulated: Affine::IDENTITY,
        }
    }

    /// Starts mapping a rect as a quad. The tracked point is its origin.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            point: rect.origin(),
            quad: Some([
                Point::new(rect.x0, rect.y0),
                Point::new(rect.x1, rect.y0),
                Point::new(rect.x1, rect.y1),
                Point::new(rect.x0, rect.y1),
            ]),
            accumulated: Affine::IDENTITY,
        }
    }

    /// Applies one more transform on top of those already applied.
    pub fn apply_transform(&mut self, transform: Affine) {
        self.accumulated = transform * self.accumulated;
    }

    /// The transform applied so far.
    #[must_use]
    pub fn accumulated_transform(&self) -> Affine {
        self.accumulated
    }

    /// The tracked point in the current space.
    #[must_use]
    pub fn mapped_point(&self) -> Point {
        self.accumulated * self.point
    }

    /// The tracked quad in the current space, if one is tracked.
    #[must_use]
    pub fn mapped_quad(&self) -> Option<[Point; 4]> {
        self.quad.map(|q| q.map(|p| self.accumulated * p))
    }

    /// The bounding box of the mapped quad, if one is tracked.
    #[must_use]
    pub fn mapped_quad_bounds(&self) -> Option<Rect> {
        let [a, b, c, d] = self.mapped_quad()?;
        Some(Rect::from_points(a, b).union_pt(c).union_pt(d))
    }
}

impl RenderTree {
    /// Maps a repaint rect from `node`'s local space into `ancestor`'s space.
    ///
    /// At each node on the way up, the rect first grows by that node's shadow
    /// and is then mapped through its local-to-parent transform and rounded
    /// out to whole pixels. `ancestor` itself contributes neither. With
    /// `None`, the walk includes the root.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `fixed` is set: SVG content is never
    /// fixed-position.
    #[must_use]
    pub fn map_repaint_rect_to_ancestor(
        &self,
        node: NodeId,
        ancestor: Option<NodeId>,
        rect: Rect,
        fixed: bool,
    ) -> Rect {
        debug_assert!(!fixed, "SVG content cannot be fixed-position");
        let mut rect = rect;
        let mut current = Some(node);
        while let Some(id) = current {
            if Some(id) == ancestor {
                break;
            }
            let i = id.idx as usize;
            rect = self.style[i].inflate_for_shadow(rect);
            rect = self.local_transform[i].transform_rect_bbox(rect).expand();
            current = self.parent(id);
        }
        rect
    }

    /// Maps `state` from `node`'s local space into `container`'s space.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `fixed` is set or `use_transforms` is not:
    /// mapping SVG geometry while ignoring transforms gives wrong answers.
    pub fn map_local_to_container(
        &self,
        node: NodeId,
        container: Option<NodeId>,
        fixed: bool,
        use_transforms: bool,
        state: &mut TransformState,
    ) {
        debug_assert!(!fixed, "SVG content cannot be fixed-position");
        debug_assert!(use_transforms, "SVG geometry must be mapped with transforms");
        let mut current = Some(node);
        while let Some(id) = current {
            if Some(id) == container {
                break;
            }
            state.apply_transform(self.local_transform[id.idx as usize]);
            current = self.parent(id);
        }
    }

    /// Returns the composed transform from `node`'s space to `ancestor`'s.
    #[must_use]
    pub fn local_to_ancestor_transform(&self, node: NodeId, ancestor: Option<NodeId>) -> Affine {
        let mut state = TransformState::from_point(Point::ORIGIN);
        self.map_local_to_container(node, ancestor, false, true, &mut state);
        state.accumulated_transform()
    }

    /// The device-pixel rect that must be repainted to cover `node`, in
    /// `repaint_container`'s space.
    ///
    /// Hidden nodes whose layer has nothing visible report an empty rect
    /// without walking the tree.
    #[must_use]
    pub fn clipped_overflow_rect_for_repaint(
        &self,
        node: NodeId,
        repaint_container: Option<NodeId>,
    ) -> Rect {
        if self.style(node).visibility != Visibility::Visible
            && !self
                .enclosing_layer(node)
                .is_some_and(|layer| self.layer_has_visible_content(layer))
        {
            return Rect::ZERO;
        }

        let local = self.repaint_rect_in_local_coordinates(node).expand();
        self.map_repaint_rect_to_ancestor(node, repaint_container, local, false)
            .expand()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;

    use kurbo::Vec2;

    use super::*;
    use crate::style::{Color, Shadow, SvgStyle};
    use crate::tree::NodeKind;

    fn shadowed(offset: Vec2, blur: f64) -> Rc<SvgStyle> {
        Rc::new(SvgStyle {
            shadow: Some(Shadow {
                offset,
                blur,
                color: Color::BLACK,
            }),
            ..SvgStyle::default()
        })
    }

    /// root ← g (translate 10,20) ← shape (scale 2)
    fn chain() -> (RenderTree, NodeId, NodeId, NodeId) {
        let mut tree = RenderTree::new();
        let style = Rc::new(SvgStyle::default());
        let root = tree.create_node(NodeKind::Root, style.clone());
        let g = tree.create_node(NodeKind::Container, style.clone());
        let shape = tree.create_node(NodeKind::Shape, style);
        tree.append_child(root, g);
        tree.append_child(g, shape);
        tree.set_local_transform(g, Affine::translate((10.0, 20.0)));
        tree.set_local_transform(shape, Affine::scale(2.0));
        tree.set_repaint_rect(shape, Rect::new(0.0, 0.0, 5.0, 5.0));
        (tree, root, g, shape)
    }

    #[test]
    fn repaint_rect_composes_transforms() {
        let (tree, root, g, shape) = chain();
        let r = Rect::new(0.0, 0.0, 5.0, 5.0);
        assert_eq!(
            tree.map_repaint_rect_to_ancestor(shape, Some(g), r, false),
            Rect::new(0.0, 0.0, 10.0, 10.0)
        );
        assert_eq!(
            tree.map_repaint_rect_to_ancestor(shape, Some(root), r, false),
            Rect::new(10.0, 20.0, 20.0, 30.0)
        );
        let composed = tree.local_to_ancestor_transform(shape, Some(root));
        assert_eq!(composed.transform_rect_bbox(r), Rect::new(10.0, 20.0, 20.0, 30.0));
        // Mapping to itself is the identity.
        assert_eq!(tree.map_repaint_rect_to_ancestor(shape, Some(shape), r, false), r);
    }

    #[test]
    fn identity_steps_do_not_change_result() {
        let (mut tree, root, g, shape) = chain();
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        let before = tree.map_repaint_rect_to_ancestor(shape, Some(root), r, false);

        // Splice an identity group between g and shape.
        let style = Rc::new(SvgStyle::default());
        let extra = tree.create_node(NodeKind::Container, style);
        tree.remove_from_parent(shape);
        tree.append_child(g, extra);
        tree.append_child(extra, shape);
        assert_eq!(
            tree.map_repaint_rect_to_ancestor(shape, Some(root), r, false),
            before
        );
    }

    #[test]
    fn shadow_inflates_before_transform() {
        let (mut tree, root, _, shape) = chain();
        tree.set_style(shape, shadowed(Vec2::new(1.0, 0.0), 0.0));
        let r = Rect::new(0.0, 0.0, 5.0, 5.0);
        // (0,0,6,5) scaled by 2 → (0,0,12,10), then translated.
        assert_eq!(
            tree.map_repaint_rect_to_ancestor(shape, Some(root), r, false),
            Rect::new(10.0, 20.0, 22.0, 30.0)
        );
    }

    #[test]
    fn ancestor_shadows_apply_along_the_way() {
        let (mut tree, root, g, shape) = chain();
        tree.set_style(g, shadowed(Vec2::ZERO, 1.0));
        let r = Rect::new(0.0, 0.0, 5.0, 5.0);
        assert_eq!(
            tree.map_repaint_rect_to_ancestor(shape, Some(root), r, false),
            Rect::new(9.0, 19.0, 21.0, 31.0)
        );
    }

    #[test]
    fn none_maps_through_root() {
        let (mut tree, root, _, shape) = chain();
        tree.set_local_transform(root, Affine::translate((100.0, 0.0)));
        let r = Rect::new(0.0, 0.0, 5.0, 5.0);
        assert_eq!(
            tree.map_repaint_rect_to_ancestor(shape, None, r, false),
            Rect::new(110.0, 20.0, 120.0, 30.0)
        );
    }

    #[test]
    fn point_and_quad_mapping() {
        let (tree, root, _, shape) = chain();
        let mut state = TransformState::from_point(Point::new(1.0, 1.0));
        tree.map_local_to_container(shape, Some(root), false, true, &mut state);
        assert_eq!(state.mapped_point(), Point::new(12.0, 22.0));
        assert_eq!(state.mapped_quad(), None);

        let mut state = TransformState::from_rect(Rect::new(0.0, 0.0, 1.0, 2.0));
        tree.map_local_to_container(shape, Some(root), false, true, &mut state);
        assert_eq!(
            state.mapped_quad_bounds(),
            Some(Rect::new(10.0, 20.0, 12.0, 24.0))
        );
    }

    #[test]
    #[should_panic(expected = "mapped with transforms")]
    fn mapping_without_transforms_panics() {
        let (tree, root, _, shape) = chain();
        let mut state = TransformState::from_point(Point::ORIGIN);
        tree.map_local_to_container(shape, Some(root), false, false, &mut state);
    }

    #[test]
    #[should_panic(expected = "fixed-position")]
    fn fixed_repaint_panics() {
        let (tree, root, _, shape) = chain();
        let _ = tree.map_repaint_rect_to_ancestor(shape, Some(root), Rect::ZERO, true);
    }

    #[test]
    fn clipped_overflow_rounds_out() {
        let (mut tree, root, _, shape) = chain();
        tree.set_repaint_rect(shape, Rect::new(0.25, 0.25, 4.5, 4.5));
        // Local rect expands to (0,0,5,5) before mapping.
        assert_eq!(
            tree.clipped_overflow_rect_for_repaint(shape, Some(root)),
            Rect::new(10.0, 20.0, 20.0, 30.0)
        );
    }

    #[test]
    fn hidden_node_in_invisible_layer_is_empty() {
        let (mut tree, root, g, shape) = chain();
        let hidden = Rc::new(SvgStyle {
            visibility: Visibility::Hidden,
            ..SvgStyle::default()
        });
        tree.set_style(shape, hidden.clone());
        // The root and g are still visible, so the shape is mapped.
        assert!(!crate::geometry::is_empty(
            tree.clipped_overflow_rect_for_repaint(shape, Some(root))
        ));

        tree.set_style(root, hidden.clone());
        tree.set_style(g, hidden);
        assert_eq!(
            tree.clipped_overflow_rect_for_repaint(shape, Some(root)),
            Rect::ZERO
        );
    }

    #[test]
    fn repaint_rect_rounds_out_at_every_step() {
        let mut tree = RenderTree::new();
        let style = Rc::new(SvgStyle::default());
        let root = tree.create_node(NodeKind::Root, style.clone());
        let g = tree.create_node(NodeKind::Container, style.clone());
        let shape = tree.create_node(NodeKind::Shape, style);
        tree.append_child(root, g);
        tree.append_child(g, shape);
        tree.set_local_transform(shape, Affine::scale(0.25));
        tree.set_local_transform(g, Affine::scale(4.0));

        // (0,0,1,1) shrinks to (0,0,0.25,0.25), rounds out to a whole pixel,
        // then grows by 4.
        assert_eq!(
            tree.map_repaint_rect_to_ancestor(shape, Some(root), Rect::new(0.0, 0.0, 1.0, 1.0), false),
            Rect::new(0.0, 0.0, 4.0, 4.0)
        );
    }
}
