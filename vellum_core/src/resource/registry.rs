// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-scoped identifier → resource mapping with client bookkeeping.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt;

use super::{PaintResource, ResourceId, ResourceKind};
use crate::tree::NodeId;

/// A handle to a resource registered in a [`ResourceRegistry`].
///
/// Handles are generational: unregistering a resource makes every handle to
/// it stale, and a later registration reusing the slot gets a fresh handle.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceHandle {
    idx: u32,
    generation: u32,
}

impl ResourceHandle {
    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceHandle({}@gen{})", self.idx, self.generation)
    }
}

#[derive(Debug)]
struct Slot {
    id: ResourceId,
    resource: Box<dyn PaintResource>,
    clients: BTreeSet<NodeId>,
}

/// All live resources of one document, keyed by identifier.
///
/// The registry owns the boxed resources while they are registered. Creating
/// and destroying them is the resource subsystem's business: it registers a
/// resource once it is built and takes it back with
/// [`unregister`](Self::unregister).
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    slots: Vec<Option<Slot>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
    by_id: BTreeMap<ResourceId, u32>,
}

impl ResourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `resource` under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty or already registered.
    pub fn register(&mut self, id: ResourceId, resource: Box<dyn PaintResource>) -> ResourceHandle {
        assert!(!id.is_empty(), "cannot register a resource without an id");
        assert!(
            !self.by_id.contains_key(&id),
            "resource id {id} is already registered"
        );

        let slot = Slot {
            id: id.clone(),
            resource,
            clients: BTreeSet::new(),
        };
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            self.slots[idx as usize] = Some(slot);
            idx
        } else {
            let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            assert!(idx != u32::MAX, "resource registry is full");
            self.slots.push(Some(slot));
            self.generation.push(0);
            idx
        };
        self.by_id.insert(id, idx);

        ResourceHandle {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Removes a resource and hands it back to the caller.
    ///
    /// Its client set is dropped without notifying anyone.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn unregister(&mut self, handle: ResourceHandle) -> Box<dyn PaintResource> {
        self.validate(handle);
        let slot = self.slots[handle.idx as usize]
            .take()
            .unwrap_or_else(|| unreachable!("validated slot is occupied"));
        self.by_id.remove(&slot.id);
        self.free_list.push(handle.idx);
        slot.resource
    }

    /// Finds the live resource registered under `id` with the given kind.
    ///
    /// Returns `None` for an empty identifier, an unknown identifier, or a
    /// resource of a different kind.
    #[must_use]
    pub fn lookup(&self, id: &ResourceId, kind: ResourceKind) -> Option<ResourceHandle> {
        if id.is_empty() {
            return None;
        }
        let idx = *self.by_id.get(id)?;
        let slot = self.slots[idx as usize].as_ref()?;
        (slot.resource.kind() == kind).then(|| ResourceHandle {
            idx,
            generation: self.generation[idx as usize],
        })
    }

    /// Returns whether the handle refers to a registered resource.
    #[must_use]
    pub fn is_alive(&self, handle: ResourceHandle) -> bool {
        (handle.idx as usize) < self.slots.len()
            && self.generation[handle.idx as usize] == handle.generation
            && self.slots[handle.idx as usize].is_some()
    }

    /// Returns the identifier a resource is registered under.
    #[must_use]
    pub fn id(&self, handle: ResourceHandle) -> &ResourceId {
        &self.slot(handle).id
    }

    /// Returns the resource behind a handle.
    #[must_use]
    pub fn get(&self, handle: ResourceHandle) -> &dyn PaintResource {
        self.slot(handle).resource.as_ref()
    }

    /// Returns the resource behind a handle, mutably.
    #[must_use]
    pub fn get_mut(&mut self, handle: ResourceHandle) -> &mut dyn PaintResource {
        self.slot_mut(handle).resource.as_mut()
    }

    /// Records `node` as a client of the resource.
    ///
    /// Returns `true` if the node was not a client before; only then is the
    /// resource told about it.
    pub fn add_client(&mut self, handle: ResourceHandle, node: NodeId) -> bool {
        let slot = self.slot_mut(handle);
        let added = slot.clients.insert(node);
        if added {
            slot.resource.add_client(node);
        }
        added
    }

    /// Drops `node` from the resource's clients and lets the resource forget
    /// it.
    ///
    /// Returns `false` (and does not call the resource) if `node` was not a
    /// client, so repeated invalidation is harmless.
    pub fn invalidate_client(&mut self, handle: ResourceHandle, node: NodeId) -> bool {
        let slot = self.slot_mut(handle);
        let removed = slot.clients.remove(&node);
        if removed {
            slot.resource.invalidate_client(node);
        }
        removed
    }

    /// Returns the current clients of a resource in handle order.
    pub fn clients(&self, handle: ResourceHandle) -> impl Iterator<Item = NodeId> + '_ {
        self.slot(handle).clients.iter().copied()
    }

    /// Number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether no resource is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Unregisters every resource, returning them in identifier order.
    pub fn drain(&mut self) -> Vec<(ResourceId, Box<dyn PaintResource>)> {
        let ids: Vec<(ResourceId, u32)> = core::mem::take(&mut self.by_id).into_iter().collect();
        let mut out = Vec::with_capacity(ids.len());
        for (id, idx) in ids {
            if let Some(slot) = self.slots[idx as usize].take() {
                self.generation[idx as usize] += 1;
                self.free_list.push(idx);
                out.push((id, slot.resource));
            }
        }
        out
    }

    fn validate(&self, handle: ResourceHandle) {
        assert!(
            self.is_alive(handle),
            "stale ResourceHandle: {handle:?} (current gen: {})",
            self.generation
                .get(handle.idx as usize)
                .copied()
                .unwrap_or(u32::MAX)
        );
    }

    fn slot(&self, handle: ResourceHandle) -> &Slot {
        self.validate(handle);
        self.slots[handle.idx as usize]
            .as_ref()
            .unwrap_or_else(|| unreachable!("validated slot is occupied"))
    }

    fn slot_mut(&mut self, handle: ResourceHandle) -> &mut Slot {
        self.validate(handle);
        self.slots[handle.idx as usize]
            .as_mut()
            .unwrap_or_else(|| unreachable!("validated slot is occupied"))
    }
}
