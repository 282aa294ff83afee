// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-document state: the render tree, its resources and forward references.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::resource::{
    PaintResource, PendingResources, ResourceHandle, ResourceId, ResourceKind, ResourceRegistry,
};
use crate::style::SvgStyle;
use crate::tree::{NodeId, RenderTree};

/// The visible part of the view a document is shown in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameView {
    /// Visible width in device pixels.
    pub visible_width: i32,
    /// Visible height in device pixels.
    pub visible_height: i32,
}

impl FrameView {
    /// Creates a view of the given visible size.
    #[must_use]
    pub const fn new(visible_width: i32, visible_height: i32) -> Self {
        Self {
            visible_width,
            visible_height,
        }
    }

    /// The visible area anchored at the origin.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f64::from(self.visible_width),
            f64::from(self.visible_height),
        )
    }
}

/// One SVG document.
///
/// Scopes the resource registry and pending queue that would otherwise be
/// process-wide: both start empty with the document and are released by
/// [`teardown`](Self::teardown).
#[derive(Debug, Default)]
pub struct Document {
    pub(crate) tree: RenderTree,
    pub(crate) resources: ResourceRegistry,
    pub(crate) pending: PendingResources,
    frame_view: Option<FrameView>,
}

impl Document {
    /// Creates an empty document that is not shown in any view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document shown in `view`.
    #[must_use]
    pub fn with_frame_view(view: FrameView) -> Self {
        Self {
            frame_view: Some(view),
            ..Self::default()
        }
    }

    /// The render tree.
    #[must_use]
    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    /// The render tree, mutably.
    #[must_use]
    pub fn tree_mut(&mut self) -> &mut RenderTree {
        &mut self.tree
    }

    /// The live resources.
    #[must_use]
    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// The live resources, mutably.
    #[must_use]
    pub fn resources_mut(&mut self) -> &mut ResourceRegistry {
        &mut self.resources
    }

    /// References waiting for a resource.
    #[must_use]
    pub fn pending(&self) -> &PendingResources {
        &self.pending
    }

    /// References waiting for a resource, mutably.
    #[must_use]
    pub fn pending_mut(&mut self) -> &mut PendingResources {
        &mut self.pending
    }

    /// The view this document is shown in, if any.
    #[must_use]
    pub fn frame_view(&self) -> Option<&FrameView> {
        self.frame_view.as_ref()
    }

    /// Attaches or detaches the view.
    pub fn set_frame_view(&mut self, view: Option<FrameView>) {
        self.frame_view = view;
    }

    /// Resolves a style reference made by `node`.
    ///
    /// An empty identifier resolves to nothing. An identifier with no live
    /// resource of `kind` is a forward reference: `node` is queued as pending
    /// under it and `None` is returned.
    pub fn resolve_resource(
        &mut self,
        node: NodeId,
        id: &ResourceId,
        kind: ResourceKind,
    ) -> Option<ResourceHandle> {
        if id.is_empty() {
            return None;
        }
        let found = self.resources.lookup(id, kind);
        if found.is_none() {
            self.pending.add(id, node, kind);
        }
        found
    }

    /// Tells every resource `node`'s style references to forget it.
    ///
    /// Covers the masker, the clipper, the three markers, and with the
    /// `filters` feature the filter. References that do not resolve are
    /// skipped without queuing anything. Calling this again is a no-op.
    pub fn deregister_client(&mut self, node: NodeId) {
        let style = Rc::clone(self.tree.style(node));
        let refs = &style.resources;
        let mut targets: Vec<(&ResourceId, ResourceKind)> = Vec::with_capacity(6);
        targets.push((&refs.masker, ResourceKind::Masker));
        targets.push((&refs.clipper, ResourceKind::Clipper));
        targets.push((&refs.marker_start, ResourceKind::Marker));
        targets.push((&refs.marker_mid, ResourceKind::Marker));
        targets.push((&refs.marker_end, ResourceKind::Marker));
        #[cfg(feature = "filters")]
        targets.push((&refs.filter, ResourceKind::Filter));

        for (id, kind) in targets {
            if let Some(handle) = self.resources.lookup(id, kind) {
                self.resources.invalidate_client(handle, node);
            }
        }
    }

    /// The area the node's filter affects, or an empty rect.
    #[cfg(feature = "filters")]
    #[must_use]
    pub fn filter_bounding_box(&self, node: NodeId) -> Rect {
        self.resource_bounding_box(node, ResourceKind::Filter)
    }

    /// The area the node's clip path covers, or an empty rect.
    #[must_use]
    pub fn clipper_bounding_box(&self, node: NodeId) -> Rect {
        self.resource_bounding_box(node, ResourceKind::Clipper)
    }

    /// The area the node's mask covers, or an empty rect.
    #[must_use]
    pub fn masker_bounding_box(&self, node: NodeId) -> Rect {
        self.resource_bounding_box(node, ResourceKind::Masker)
    }

    fn resource_bounding_box(&self, node: NodeId, kind: ResourceKind) -> Rect {
        let refs = &self.tree.style(node).resources;
        let id = match kind {
            ResourceKind::Clipper => &refs.clipper,
            ResourceKind::Masker => &refs.masker,
            ResourceKind::Filter => &refs.filter,
            ResourceKind::Marker => return Rect::ZERO,
        };
        match self.resources.lookup(id, kind) {
            Some(handle) => self
                .resources
                .get(handle)
                .resource_bounding_box(self.tree.object_bounding_box(node)),
            None => Rect::ZERO,
        }
    }

    /// Replaces a node's style, first deregistering it from the resources
    /// its old style referenced.
    pub fn set_style(&mut self, node: NodeId, style: Rc<SvgStyle>) {
        self.deregister_client(node);
        self.tree.set_style(node, style);
    }

    /// Destroys a node, deregistering it from resources and dropping its
    /// pending references first.
    ///
    /// # Panics
    ///
    /// Panics if the node has children or the handle is stale.
    pub fn destroy_node(&mut self, node: NodeId) {
        self.deregister_client(node);
        self.pending.remove_node(node);
        self.tree.destroy_node(node);
    }

    /// Releases every pending reference and hands back every registered
    /// resource, in identifier order.
    pub fn teardown(&mut self) -> Vec<(ResourceId, Box<dyn PaintResource>)> {
        self.pending.clear();
        self.resources.drain()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use alloc::rc::Rc;
    use core::cell::RefCell;

    use super::*;
    use crate::context::GraphicsContext;
    use crate::style::ResourceRefs;
    use crate::tree::{ElementInfo, NodeKind};

    /// What a [`TestResource`] was asked to do.
    #[derive(Clone, Debug, Default, PartialEq)]
    pub(crate) struct Calls {
        pub(crate) applied: u32,
        pub(crate) added: u32,
        pub(crate) invalidated: u32,
        pub(crate) prepared: u32,
        pub(crate) finished: u32,
    }

    /// A resource double that succeeds or fails on demand and counts calls.
    #[derive(Debug)]
    pub(crate) struct TestResource {
        pub(crate) kind: ResourceKind,
        pub(crate) succeeds: bool,
        pub(crate) bbox_outset: f64,
        pub(crate) calls: Rc<RefCell<Calls>>,
    }

    impl TestResource {
        pub(crate) fn boxed(
            kind: ResourceKind,
            succeeds: bool,
        ) -> (Box<dyn PaintResource>, Rc<RefCell<Calls>>) {
            let calls = Rc::new(RefCell::new(Calls::default()));
            (
                Box::new(Self {
                    kind,
                    succeeds,
                    bbox_outset: 1.0,
                    calls: calls.clone(),
                }),
                calls,
            )
        }
    }

    impl PaintResource for TestResource {
        fn kind(&self) -> ResourceKind {
            self.kind
        }

        fn apply_resource(
            &mut self,
            _: &RenderTree,
            _: NodeId,
            _: &mut dyn GraphicsContext,
        ) -> bool {
            self.calls.borrow_mut().applied += 1;
            self.succeeds
        }

        fn resource_bounding_box(&self, object_bbox: Rect) -> Rect {
            object_bbox.inflate(self.bbox_outset, self.bbox_outset)
        }

        fn add_client(&mut self, _: NodeId) {
            self.calls.borrow_mut().added += 1;
        }

        fn invalidate_client(&mut self, _: NodeId) {
            self.calls.borrow_mut().invalidated += 1;
        }

        fn prepare_filter(
            &mut self,
            _: &RenderTree,
            _: NodeId,
            _: &mut dyn GraphicsContext,
        ) -> bool {
            self.calls.borrow_mut().prepared += 1;
            self.succeeds
        }

        fn finish_filter(&mut self, _: &RenderTree, _: NodeId, _: &mut dyn GraphicsContext) {
            self.calls.borrow_mut().finished += 1;
        }
    }

    pub(crate) fn styled_node(doc: &mut Document, style: SvgStyle) -> NodeId {
        let node = doc.tree_mut().create_node(NodeKind::Shape, Rc::new(style));
        doc.tree_mut().set_element(node, Some(ElementInfo::STYLED));
        node
    }

    fn refs(masker: &str, clipper: &str, marker: &str) -> SvgStyle {
        SvgStyle {
            resources: ResourceRefs {
                masker: masker.into(),
                clipper: clipper.into(),
                marker_mid: marker.into(),
                ..ResourceRefs::default()
            },
            ..SvgStyle::default()
        }
    }

    #[test]
    fn empty_id_never_queues() {
        let mut doc = Document::new();
        let node = styled_node(&mut doc, SvgStyle::default());
        assert_eq!(
            doc.resolve_resource(node, &ResourceId::default(), ResourceKind::Masker),
            None
        );
        assert!(doc.pending().is_empty());
    }

    #[test]
    fn unresolved_id_queues_exactly_once() {
        let mut doc = Document::new();
        let node = styled_node(&mut doc, SvgStyle::default());
        let id = ResourceId::from("later");
        assert_eq!(doc.resolve_resource(node, &id, ResourceKind::Clipper), None);
        assert_eq!(doc.pending().len(), 1);
        assert_eq!(doc.pending().clients(&id).count(), 1);
    }

    #[test]
    fn resolved_id_does_not_queue() {
        let mut doc = Document::new();
        let node = styled_node(&mut doc, SvgStyle::default());
        let (clip, _) = TestResource::boxed(ResourceKind::Clipper, true);
        let h = doc.resources_mut().register("c".into(), clip);
        assert_eq!(
            doc.resolve_resource(node, &"c".into(), ResourceKind::Clipper),
            Some(h)
        );
        // Wrong kind is a miss and queues.
        assert_eq!(
            doc.resolve_resource(node, &"c".into(), ResourceKind::Masker),
            None
        );
        assert_eq!(doc.pending().len(), 1);
    }

    #[test]
    fn deregister_twice_invalidates_once() {
        let mut doc = Document::new();
        let node = styled_node(&mut doc, refs("m", "", ""));
        let (mask, calls) = TestResource::boxed(ResourceKind::Masker, true);
        let h = doc.resources_mut().register("m".into(), mask);
        doc.resources_mut().add_client(h, node);

        doc.deregister_client(node);
        doc.deregister_client(node);
        assert_eq!(calls.borrow().invalidated, 1);
        assert_eq!(doc.resources().clients(h).count(), 0);
        assert!(doc.pending().is_empty());
    }

    #[test]
    fn deregister_reaches_markers() {
        let mut doc = Document::new();
        let node = styled_node(&mut doc, refs("", "c", "arrow"));
        let (clip, clip_calls) = TestResource::boxed(ResourceKind::Clipper, true);
        let (marker, marker_calls) = TestResource::boxed(ResourceKind::Marker, true);
        let hc = doc.resources_mut().register("c".into(), clip);
        let hm = doc.resources_mut().register("arrow".into(), marker);
        doc.resources_mut().add_client(hc, node);
        doc.resources_mut().add_client(hm, node);

        doc.deregister_client(node);
        assert_eq!(clip_calls.borrow().invalidated, 1);
        assert_eq!(marker_calls.borrow().invalidated, 1);
    }

    #[test]
    fn deregister_without_resources_is_a_no_op() {
        let mut doc = Document::new();
        let node = styled_node(&mut doc, refs("missing", "", ""));
        doc.deregister_client(node);
        assert!(doc.pending().is_empty());
    }

    #[test]
    fn resource_bounding_boxes() {
        let mut doc = Document::new();
        let node = styled_node(&mut doc, refs("m", "nowhere", ""));
        doc.tree_mut()
            .set_object_bounding_box(node, Rect::new(0.0, 0.0, 10.0, 10.0));
        let (mask, _) = TestResource::boxed(ResourceKind::Masker, true);
        doc.resources_mut().register("m".into(), mask);

        assert_eq!(
            doc.masker_bounding_box(node),
            Rect::new(-1.0, -1.0, 11.0, 11.0)
        );
        assert_eq!(doc.clipper_bounding_box(node), Rect::ZERO);
        // Bounding-box queries never queue.
        assert!(doc.pending().is_empty());
    }

    #[cfg(feature = "filters")]
    #[test]
    fn filter_bounding_box() {
        let mut doc = Document::new();
        let node = styled_node(
            &mut doc,
            SvgStyle {
                resources: ResourceRefs {
                    filter: "blur".into(),
                    ..ResourceRefs::default()
                },
                ..SvgStyle::default()
            },
        );
        doc.tree_mut()
            .set_object_bounding_box(node, Rect::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(doc.filter_bounding_box(node), Rect::ZERO);
        let (filter, _) = TestResource::boxed(ResourceKind::Filter, true);
        doc.resources_mut().register("blur".into(), filter);
        assert_eq!(
            doc.filter_bounding_box(node),
            Rect::new(-1.0, -1.0, 5.0, 5.0)
        );
    }

    #[test]
    fn set_style_deregisters_old_references() {
        let mut doc = Document::new();
        let node = styled_node(&mut doc, refs("m", "", ""));
        let (mask, calls) = TestResource::boxed(ResourceKind::Masker, true);
        let h = doc.resources_mut().register("m".into(), mask);
        doc.resources_mut().add_client(h, node);

        doc.set_style(node, Rc::new(SvgStyle::default()));
        assert_eq!(calls.borrow().invalidated, 1);
        assert!(doc.tree().style(node).resources.masker.is_empty());
    }

    #[test]
    fn destroy_node_cleans_up() {
        let mut doc = Document::new();
        let node = styled_node(&mut doc, refs("m", "later", ""));
        let (mask, calls) = TestResource::boxed(ResourceKind::Masker, true);
        let h = doc.resources_mut().register("m".into(), mask);
        doc.resources_mut().add_client(h, node);
        doc.resolve_resource(node, &"later".into(), ResourceKind::Clipper);
        assert_eq!(doc.pending().len(), 1);

        doc.destroy_node(node);
        assert_eq!(calls.borrow().invalidated, 1);
        assert!(doc.pending().is_empty());
        assert!(!doc.tree().is_alive(node));
    }

    #[test]
    fn teardown_releases_everything() {
        let mut doc = Document::with_frame_view(FrameView::new(800, 600));
        let node = styled_node(&mut doc, SvgStyle::default());
        doc.resolve_resource(node, &"later".into(), ResourceKind::Filter);
        let (mask, _) = TestResource::boxed(ResourceKind::Masker, true);
        doc.resources_mut().register("m".into(), mask);

        let released = doc.teardown();
        assert_eq!(released.len(), 1);
        assert!(doc.pending().is_empty());
        assert!(doc.resources().is_empty());
        assert_eq!(
            doc.frame_view().map(FrameView::visible_rect),
            Some(Rect::new(0.0, 0.0, 800.0, 600.0))
        );
    }
}
