// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Node storage for the arena-backed AVL tree.

use std::cmp::Ordering;

/// Stable handle to one tree node.
///
/// A handle stays valid from the insert that produced it until the node is
/// removed; rebalancing rewrites relations, not slots. Slot counts are
/// bounded by `u32::MAX`.
pub type NodeId = u32;

/// The header sentinel always occupies slot 0.
pub(crate) const HEADER: NodeId = 0;

/// Balance state of one node.
///
/// Records the sign of `height(right) - height(left)`. `Header` is reserved
/// for the sentinel slot and never appears on a live node; stepping
/// operations use it as their stop condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeState {
    /// Both subtrees have equal height.
    Balanced,

    /// The left subtree is one higher.
    LeftHigh,

    /// The right subtree is one higher.
    RightHigh,

    /// Reserved for the header sentinel.
    Header,
}

/// Child side selector used by the rebalancing walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// One arena slot.
///
/// `key` and `value` are `None` only on the header slot and on vacant
/// (freed) slots; live nodes always carry both.
pub(crate) struct Node<K, V> {
    pub key: Option<K>,
    pub value: Option<V>,
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub state: NodeState,
}

impl<K, V> Node<K, V> {
    /// A fresh header sentinel.
    pub fn header() -> Self {
        Self {
            key: None,
            value: None,
            parent: None,
            left: None,
            right: None,
            state: NodeState::Header,
        }
    }

    /// A vacant slot awaiting reuse.
    pub fn vacant() -> Self {
        Self {
            key: None,
            value: None,
            parent: None,
            left: None,
            right: None,
            state: NodeState::Balanced,
        }
    }

    /// Child on the given side.
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Result of a binary search.
///
/// `diff` is `key.cmp(&node.key)`: `Equal` on an exact match, otherwise the
/// side of `node` on which the key would lie. `node` is `None` only when
/// the tree is empty. The GE/LE searches overload the miss side: see
/// [`AvlTree::search_ge`](crate::avl::AvlTree::search_ge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Exact match, nearest neighbour, or terminal probe.
    pub node: Option<NodeId>,

    /// Comparison of the searched key against `node`'s key.
    pub diff: Ordering,
}

impl SearchResult {
    /// Whether the search found the exact key.
    pub fn is_found(&self) -> bool {
        self.node.is_some() && self.diff == Ordering::Equal
    }
}
