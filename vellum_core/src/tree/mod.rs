// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render tree data model.
//!
//! A *node* is one vertex of the SVG rendering tree. Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is destroyed.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//! - A [`NodeKind`] answering the capability questions the support layer
//!   asks (container, text root, outermost root).
//! - A read-only style snapshot ([`SvgStyle`](crate::style::SvgStyle)).
//! - Geometry written by concrete layout: the local-to-parent transform,
//!   the object bounding box and the repaint rect in local coordinates.
//! - A needs-layout flag and a draws-contents flag.
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles. The
//! parent link is a plain index, and attaching a node under itself or one of
//! its descendants panics, so parent walks always terminate.

mod bbox;
mod id;
mod kind;
mod layout;
mod query;
mod store;
mod traverse;

pub use id::{INVALID, NodeId};
pub use kind::{ElementInfo, NodeKind};
pub use layout::Layouter;
pub use store::RenderTree;
pub use traverse::{Ancestors, Children};
