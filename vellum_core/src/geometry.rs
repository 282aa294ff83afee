// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle helpers and integer sizes.

use kurbo::Rect;

/// Whether `rect` covers no area.
///
/// Unlike [`Rect::is_zero_area`], a rect with negative extent counts as empty.
#[inline]
#[must_use]
pub fn is_empty(rect: Rect) -> bool {
    rect.width() <= 0.0 || rect.height() <= 0.0
}

/// Union of two rects where an empty rect is the identity.
///
/// [`Rect::union`] always includes both origins, so uniting with
/// [`Rect::ZERO`] would drag the result towards `(0, 0)`.
#[must_use]
pub fn unite(acc: Rect, rect: Rect) -> Rect {
    if is_empty(rect) {
        acc
    } else if is_empty(acc) {
        rect
    } else {
        acc.union(rect)
    }
}

/// A size in whole device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntSize {
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl IntSize {
    /// Creates a size.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}
