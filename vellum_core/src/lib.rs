// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint-resource and coordinate-mapping support for SVG render trees.
//!
//! `vellum_core` is the layer every node of a retained SVG rendering tree
//! calls into while it lays out and paints. It is `no_std` compatible (with
//! `alloc`) and stores the tree in struct-of-arrays form with generational
//! handles.
//!
//! # Architecture
//!
//! ```text
//!   Document
//!   ├── RenderTree ─────── transforms, geometry, needs-layout, styles
//!   ├── ResourceRegistry ─ id → clipper / masker / marker / filter
//!   └── PendingResources ─ id → nodes waiting for it
//!
//!   paint:  prepare_to_render ──► node paints ──► finish_render
//!                │                                    ▲
//!                └──────────── PaintBracket ──────────┘
//! ```
//!
//! **[`tree`]**: The render tree, its capability-tagged node kinds, the
//! layout propagator ([`RenderTree::layout_children`]) and the container
//! bounding-box aggregator ([`RenderTree::compute_container_bounding_box`]).
//!
//! **[`transform`]**: Mapping repaint rects, points and quads from a node up
//! to any ancestor.
//!
//! **[`resource`]**: The [`PaintResource`](resource::PaintResource) contract,
//! the per-document registry and the pending queue for forward references.
//!
//! **[`paint`]**: The prepare/finish paint bracket around a node's drawing.
//!
//! **[`snapshot`]**: Rendering a subtree into an off-screen buffer.
//!
//! **[`context`]**: The [`GraphicsContext`](context::GraphicsContext)
//! primitives the bracket drives.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) events for the bracket, with
//! a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `filters` (enabled by default): Filter resolution, application,
//!   bounding boxes and deregistration.
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//!
//! [`RenderTree::layout_children`]: tree::RenderTree::layout_children
//! [`RenderTree::compute_container_bounding_box`]: tree::RenderTree::compute_container_bounding_box

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod context;
pub mod document;
pub mod geometry;
pub mod paint;
pub mod resource;
pub mod snapshot;
pub mod style;
pub mod trace;
pub mod transform;
pub mod tree;

pub use document::{Document, FrameView};
pub use paint::{AbortedPaint, PaintAbort, PaintBracket};
