// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Ordered set over the AVL tree.

use crate::avl::iter::Keys;
use crate::avl::node::{NodeId, SearchResult};
use crate::avl::tree::AvlTree;
use crate::error::MemResult;
use std::fmt;

/// Ordered set of keys with persistent node handles.
///
/// Thin wrapper over [`AvlTree`] with unit values. Search results and node
/// handles behave exactly as on the map.
pub struct AvlSet<K>
where
    K: Ord + fmt::Debug,
{
    inner: AvlTree<K, ()>,
}

impl<K> AvlSet<K>
where
    K: Ord + fmt::Debug,
{
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            inner: AvlTree::new(),
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Remove every key. All node handles become invalid.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Insert a key.
    ///
    /// ## Error Conditions
    /// - `DuplicateKey` when the key is already present
    pub fn insert(&mut self, key: K) -> MemResult<NodeId> {
        self.inner.insert(key, ())
    }

    /// Insert using a locality hint.
    pub fn insert_near(&mut self, hint: NodeId, key: K) -> MemResult<NodeId> {
        self.inner.insert_near(hint, key, ())
    }

    /// Remove by key. Returns whether the key was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.inner.remove(key)
    }

    /// Remove a node by handle, returning its key.
    pub fn remove_node(&mut self, id: NodeId) -> K {
        self.inner.remove_node(id).0
    }

    /// Membership test.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Key of a live node.
    pub fn key(&self, id: NodeId) -> &K {
        self.inner.key(id)
    }

    /// Node holding the smallest key.
    pub fn minimum(&self) -> Option<NodeId> {
        self.inner.minimum()
    }

    /// Node holding the largest key.
    pub fn maximum(&self) -> Option<NodeId> {
        self.inner.maximum()
    }

    /// Height of the tree.
    pub fn depth(&self) -> usize {
        self.inner.depth()
    }

    /// In-order successor.
    pub fn next_node(&self, id: NodeId) -> Option<NodeId> {
        self.inner.next_node(id)
    }

    /// In-order predecessor.
    pub fn prev_node(&self, id: NodeId) -> Option<NodeId> {
        self.inner.prev_node(id)
    }

    /// Plain binary search.
    pub fn search(&self, key: &K) -> SearchResult {
        self.inner.search(key)
    }

    /// Smallest key at or above `key`.
    pub fn search_ge(&self, key: &K) -> SearchResult {
        self.inner.search_ge(key)
    }

    /// Largest key at or below `key`.
    pub fn search_le(&self, key: &K) -> SearchResult {
        self.inner.search_le(key)
    }

    /// Hinted binary search.
    pub fn search_nearby(&self, hint: NodeId, key: &K) -> SearchResult {
        self.inner.search_nearby(hint, key)
    }

    /// Ascending key iterator.
    pub fn iter(&self) -> Keys<'_, K, ()> {
        self.inner.keys()
    }

    /// Structural invariant check, see
    /// [`AvlTree::check_invariants_detailed`].
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        self.inner.check_invariants_detailed()
    }
}

impl<K> Default for AvlSet<K>
where
    K: Ord + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for AvlSet<K>
where
    K: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlSet").field("count", &self.len()).finish()
    }
}
