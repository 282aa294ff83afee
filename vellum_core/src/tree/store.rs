// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and property management.

use alloc::rc::Rc;
use alloc::vec::Vec;

use kurbo::{Affine, Rect};

use super::id::{INVALID, NodeId};
use super::kind::{ElementInfo, NodeKind};
use super::traverse::{Ancestors, Children};
use crate::style::SvgStyle;

/// Struct-of-arrays storage for all render-tree nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct RenderTree {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Identity --
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) element: Vec<Option<ElementInfo>>,
    pub(crate) style: Vec<Rc<SvgStyle>>,

    // -- Geometry (written by layout) --
    pub(crate) local_transform: Vec<Affine>,
    pub(crate) object_bbox: Vec<Rect>,
    pub(crate) repaint_rect: Vec<Rect>,

    // -- State flags --
    pub(crate) needs_layout: Vec<bool>,
    pub(crate) draws_contents: Vec<bool>,
    pub(crate) has_layer: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,
}

impl Default for RenderTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            kind: Vec::new(),
            element: Vec::new(),
            style: Vec::new(),
            local_transform: Vec::new(),
            object_bbox: Vec::new(),
            repaint_rect: Vec::new(),
            needs_layout: Vec::new(),
            draws_contents: Vec::new(),
            has_layer: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    // -- Allocation API --

    /// Creates a detached node and returns its handle.
    ///
    /// The node starts with an identity transform, empty geometry, no
    /// element, and needs layout. Root nodes own a paint layer.
    pub fn create_node(&mut self, kind: NodeKind, style: Rc<SvgStyle>) -> NodeId {
        let has_layer = kind.is_root();
        let idx = if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.kind[i] = kind;
            self.element[i] = None;
            self.style[i] = style;
            self.local_transform[i] = Affine::IDENTITY;
            self.object_bbox[i] = Rect::ZERO;
            self.repaint_rect[i] = Rect::ZERO;
            self.needs_layout[i] = true;
            self.draws_contents[i] = true;
            self.has_layer[i] = has_layer;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.kind.push(kind);
            self.element.push(None);
            self.style.push(style);
            self.local_transform.push(Affine::IDENTITY);
            self.object_bbox.push(Rect::ZERO);
            self.repaint_rect.push(Rect::ZERO);
            self.needs_layout.push(true);
            self.draws_contents.push(true);
            self.has_layer.push(has_layer);
            self.generation.push(0);
            idx
        };

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// Resource bookkeeping is not touched; see
    /// [`Document::destroy_node`](crate::Document::destroy_node).
    ///
    /// # Panics
    ///
    /// Panics if the node has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy node with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent, or
    /// if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        assert!(
            !self.is_self_or_ancestor(c, p),
            "node cannot be attached under itself"
        );

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Inserts `child` before `sibling` in the sibling list.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, `sibling`
    /// has no parent, or `child` is an ancestor of `sibling`.
    pub fn insert_before(&mut self, child: NodeId, sibling: NodeId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");
        assert!(
            !self.is_self_or_ancestor(c, p),
            "node cannot be attached under itself"
        );

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] != INVALID,
            "node has no parent"
        );
        self.unlink_from_parent(child.idx);
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle_at(self.parent[id.idx as usize])
    }

    /// Returns the first child of a node, if any.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle_at(self.first_child[id.idx as usize])
    }

    /// Returns the next sibling of a node, if any.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle_at(self.next_sibling[id.idx as usize])
    }

    /// Returns an iterator over the direct children of a node, in tree order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns an iterator over the strict ancestors of a node, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        self.validate(id);
        Ancestors::new(self, self.parent[id.idx as usize])
    }

    // -- Property getters --

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns the element facts of a node, if it has an element.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<ElementInfo> {
        self.validate(id);
        self.element[id.idx as usize]
    }

    /// Returns the style snapshot of a node.
    #[must_use]
    pub fn style(&self, id: NodeId) -> &Rc<SvgStyle> {
        self.validate(id);
        &self.style[id.idx as usize]
    }

    /// Returns the local-to-parent transform of a node.
    #[must_use]
    pub fn local_to_parent_transform(&self, id: NodeId) -> Affine {
        self.validate(id);
        self.local_transform[id.idx as usize]
    }

    /// Returns the geometric extent of the node's own shape, in local space.
    #[must_use]
    pub fn object_bounding_box(&self, id: NodeId) -> Rect {
        self.validate(id);
        self.object_bbox[id.idx as usize]
    }

    /// Returns the painted extent of the node (stroke, markers, filters
    /// included), in local space.
    #[must_use]
    pub fn repaint_rect_in_local_coordinates(&self, id: NodeId) -> Rect {
        self.validate(id);
        self.repaint_rect[id.idx as usize]
    }

    /// Returns whether the node is marked as needing layout.
    #[must_use]
    pub fn needs_layout(&self, id: NodeId) -> bool {
        self.validate(id);
        self.needs_layout[id.idx as usize]
    }

    /// Returns whether a container paints its children.
    #[must_use]
    pub fn draws_contents(&self, id: NodeId) -> bool {
        self.validate(id);
        self.draws_contents[id.idx as usize]
    }

    /// Returns whether the node owns a paint layer.
    #[must_use]
    pub fn has_layer(&self, id: NodeId) -> bool {
        self.validate(id);
        self.has_layer[id.idx as usize]
    }

    // -- Mutation API --

    /// Sets the element facts of a node.
    pub fn set_element(&mut self, id: NodeId, element: Option<ElementInfo>) {
        self.validate(id);
        self.element[id.idx as usize] = element;
    }

    /// Replaces the style snapshot of a node.
    ///
    /// This does not deregister the node from resources its previous style
    /// referenced; see [`Document::set_style`](crate::Document::set_style).
    pub fn set_style(&mut self, id: NodeId, style: Rc<SvgStyle>) {
        self.validate(id);
        self.style[id.idx as usize] = style;
    }

    /// Sets the local-to-parent transform of a node.
    pub fn set_local_transform(&mut self, id: NodeId, transform: Affine) {
        self.validate(id);
        self.local_transform[id.idx as usize] = transform;
    }

    /// Sets the geometric extent of the node's own shape.
    pub fn set_object_bounding_box(&mut self, id: NodeId, rect: Rect) {
        self.validate(id);
        self.object_bbox[id.idx as usize] = rect;
    }

    /// Sets the painted extent of the node in local space.
    pub fn set_repaint_rect(&mut self, id: NodeId, rect: Rect) {
        self.validate(id);
        self.repaint_rect[id.idx as usize] = rect;
    }

    /// Marks or clears the node's needs-layout flag.
    ///
    /// Only the node itself is affected; ancestors are not marked.
    pub fn set_needs_layout(&mut self, id: NodeId, needs_layout: bool) {
        self.validate(id);
        self.needs_layout[id.idx as usize] = needs_layout;
    }

    /// Sets whether a container paints its children.
    pub fn set_draws_contents(&mut self, id: NodeId, draws_contents: bool) {
        self.validate(id);
        self.draws_contents[id.idx as usize] = draws_contents;
    }

    /// Sets whether the node owns a paint layer.
    ///
    /// # Panics
    ///
    /// Panics when removing the layer from a root node.
    pub fn set_has_layer(&mut self, id: NodeId, has_layer: bool) {
        self.validate(id);
        assert!(
            has_layer || !self.kind[id.idx as usize].is_root(),
            "root nodes always own a layer"
        );
        self.has_layer[id.idx as usize] = has_layer;
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    /// Whether slot `candidate` is `node` or one of its ancestors.
    fn is_self_or_ancestor(&self, candidate: u32, node: u32) -> bool {
        let mut cur = node;
        while cur != INVALID {
            if cur == candidate {
                return true;
            }
            cur = self.parent[cur as usize];
        }
        false
    }

    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds a handle for a raw slot, or `None` for [`INVALID`].
    pub(crate) fn handle_at(&self, idx: u32) -> Option<NodeId> {
        if idx == INVALID {
            None
        } else {
            Some(NodeId {
                idx,
                generation: self.generation[idx as usize],
            })
        }
    }

    /// Removes `idx` from its parent's child list.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}
