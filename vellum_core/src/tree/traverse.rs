// Copyright 2026 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use super::id::{INVALID, NodeId};
use super::store::RenderTree;

/// An iterator over the direct children of a node.
///
/// Created by [`RenderTree::children`].
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a RenderTree,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a RenderTree, first: u32) -> Self {
        Self {
            tree,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.tree.handle_at(self.current)?;
        self.current = self.tree.next_sibling[id.idx as usize];
        Some(id)
    }
}

/// An iterator over the strict ancestors of a node, nearest first.
///
/// Created by [`RenderTree::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a RenderTree,
    current: u32,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(tree: &'a RenderTree, first: u32) -> Self {
        Self {
            tree,
            current: first,
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.current == INVALID {
            return None;
        }
        let id = self.tree.handle_at(self.current)?;
        self.current = self.tree.parent[id.idx as usize];
        Some(id)
    }
}
