// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for vellum paint diagnostics.
//!
//! This crate provides [`TraceSink`](vellum_core::trace::TraceSink)
//! implementations and a recording drawing context for development and
//! post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory list of owned events.
//! - [`recorder::RecordingContext`]: a
//!   [`GraphicsContext`](vellum_core::context::GraphicsContext) that records
//!   every call instead of drawing.
//! - [`json`]: Chrome Trace Event Format JSON for recorded events, and a
//!   plain JSON dump of recorded drawing calls.

pub mod json;
pub mod pretty;
pub mod recorder;
