// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint resources referenced from style by identifier.
//!
//! Clip paths, masks, markers and filters are owned by the resource
//! subsystem. This module only describes the contract the support layer
//! consumes ([`PaintResource`]), a document-scoped [`ResourceRegistry`]
//! mapping identifiers to live resources, and the [`PendingResources`]
//! queue of references that did not resolve yet.

mod pending;
mod registry;

use alloc::string::String;
use core::fmt;

use kurbo::Rect;

use crate::context::GraphicsContext;
use crate::tree::{NodeId, RenderTree};

pub use pending::{PendingClient, PendingResources};
pub use registry::{ResourceHandle, ResourceRegistry};

/// The identifier a style uses to reference a resource.
///
/// The empty identifier means "no resource".
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Whether this identifier references nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The identifier text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({:?})", self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which kind of effect a resource provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    /// A `<clipPath>`.
    Clipper,
    /// A `<mask>`.
    Masker,
    /// A `<marker>`.
    Marker,
    /// A `<filter>`.
    Filter,
}

/// A paint-time effect applied to nodes that reference it.
///
/// Implementations live in the resource subsystem. The support layer calls
/// these methods from the paint bracket, from bounding-box queries and from
/// client teardown. Filter-only methods default to "unsupported".
pub trait PaintResource: fmt::Debug {
    /// The kind of this resource. Lookups with a different kind miss.
    fn kind(&self) -> ResourceKind;

    /// Applies this resource to `node` on `context`.
    ///
    /// Returns `false` when the resource could not be applied. For maskers
    /// this aborts painting the node; clippers degrade to "no clip".
    fn apply_resource(
        &mut self,
        tree: &RenderTree,
        node: NodeId,
        context: &mut dyn GraphicsContext,
    ) -> bool;

    /// The area this resource affects for a node whose object bounding box is
    /// `object_bbox`.
    fn resource_bounding_box(&self, object_bbox: Rect) -> Rect;

    /// Called when `node` becomes a client of this resource.
    fn add_client(&mut self, node: NodeId) {
        _ = node;
    }

    /// Drops everything this resource cached for `node`.
    fn invalidate_client(&mut self, node: NodeId);

    /// Prepares a filter to capture `node`'s painting.
    ///
    /// Returns `false` when the filter cannot run, which aborts painting the
    /// node.
    fn prepare_filter(
        &mut self,
        tree: &RenderTree,
        node: NodeId,
        context: &mut dyn GraphicsContext,
    ) -> bool {
        _ = (tree, node, context);
        false
    }

    /// Runs the filter over the captured painting and composites the result
    /// into `context`.
    fn finish_filter(
        &mut self,
        tree: &RenderTree,
        node: NodeId,
        context: &mut dyn GraphicsContext,
    ) {
        _ = (tree, node, context);
    }
}
