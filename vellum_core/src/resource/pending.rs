// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forward references waiting for a resource to be defined.

use alloc::collections::{BTreeMap, BTreeSet};

use super::{ResourceId, ResourceKind};
use crate::tree::NodeId;

/// One node waiting for an identifier, and what it expects the identifier to
/// be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PendingClient {
    /// The referencing node.
    pub node: NodeId,
    /// The kind of resource the node's style expects.
    pub kind: ResourceKind,
}

/// Multimap from unresolved identifier to the nodes waiting for it.
///
/// The support layer only appends. Draining on resource registration belongs
/// to the resource subsystem via [`take`](Self::take).
#[derive(Clone, Debug, Default)]
pub struct PendingResources {
    waiting: BTreeMap<ResourceId, BTreeSet<PendingClient>>,
}

impl PendingResources {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `node` references `id` as a resource of `kind`.
    ///
    /// An empty identifier is ignored. Returns `true` if a new entry was
    /// added.
    pub fn add(&mut self, id: &ResourceId, node: NodeId, kind: ResourceKind) -> bool {
        if id.is_empty() {
            return false;
        }
        self.waiting
            .entry(id.clone())
            .or_default()
            .insert(PendingClient { node, kind })
    }

    /// Whether anything waits for `id`.
    #[must_use]
    pub fn contains(&self, id: &ResourceId) -> bool {
        self.waiting.contains_key(id)
    }

    /// The clients waiting for `id`.
    pub fn clients(&self, id: &ResourceId) -> impl Iterator<Item = PendingClient> + '_ {
        self.waiting.get(id).into_iter().flatten().copied()
    }

    /// Removes and returns every client waiting for `id`.
    pub fn take(&mut self, id: &ResourceId) -> BTreeSet<PendingClient> {
        self.waiting.remove(id).unwrap_or_default()
    }

    /// Forgets `node` under every identifier.
    pub fn remove_node(&mut self, node: NodeId) {
        self.waiting.retain(|_, clients| {
            clients.retain(|c| c.node != node);
            !clients.is_empty()
        });
    }

    /// Releases every entry.
    pub fn clear(&mut self) {
        self.waiting.clear();
    }

    /// Total number of (identifier, client) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waiting.values().map(BTreeSet::len).sum()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;

    use super::*;
    use crate::style::SvgStyle;
    use crate::tree::{NodeKind, RenderTree};

    fn two_nodes() -> (NodeId, NodeId) {
        let mut tree = RenderTree::new();
        let style = Rc::new(SvgStyle::default());
        (
            tree.create_node(NodeKind::Shape, style.clone()),
            tree.create_node(NodeKind::Shape, style),
        )
    }

    #[test]
    fn empty_id_is_ignored() {
        let (a, _) = two_nodes();
        let mut pending = PendingResources::new();
        assert!(!pending.add(&ResourceId::default(), a, ResourceKind::Clipper));
        assert!(pending.is_empty());
    }

    #[test]
    fn entries_have_set_semantics() {
        let (a, b) = two_nodes();
        let id = ResourceId::from("later");
        let mut pending = PendingResources::new();
        assert!(pending.add(&id, a, ResourceKind::Masker));
        assert!(!pending.add(&id, a, ResourceKind::Masker));
        assert!(pending.add(&id, a, ResourceKind::Clipper));
        assert!(pending.add(&id, b, ResourceKind::Masker));
        assert_eq!(pending.len(), 3);
        assert_eq!(pending.clients(&id).count(), 3);
    }

    #[test]
    fn take_drains_one_identifier() {
        let (a, b) = two_nodes();
        let mut pending = PendingResources::new();
        pending.add(&"x".into(), a, ResourceKind::Masker);
        pending.add(&"y".into(), b, ResourceKind::Filter);
        let taken: Vec<_> = pending.take(&"x".into()).into_iter().collect();
        assert_eq!(
            taken,
            [PendingClient {
                node: a,
                kind: ResourceKind::Masker
            }]
        );
        assert!(!pending.contains(&"x".into()));
        assert!(pending.contains(&"y".into()));
        assert!(pending.take(&"x".into()).is_empty());
    }

    #[test]
    fn remove_node_drops_empty_keys() {
        let (a, b) = two_nodes();
        let mut pending = PendingResources::new();
        pending.add(&"x".into(), a, ResourceKind::Masker);
        pending.add(&"y".into(), a, ResourceKind::Clipper);
        pending.add(&"y".into(), b, ResourceKind::Clipper);
        pending.remove_node(a);
        assert!(!pending.contains(&"x".into()));
        assert_eq!(pending.len(), 1);
        pending.clear();
        assert!(pending.is_empty());
    }
}
