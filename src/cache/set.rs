// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Bounded set with least-recently-used eviction.

use crate::cache::mru::{Keys, MruDictionary};
use crate::error::MemResult;
use std::fmt;
use std::hash::Hash;

/// Bounded set over the MRU dictionary.
///
/// Same recency and eviction behaviour as [`MruDictionary`] with unit
/// values; the eviction hook receives the evicted key.
pub struct MruSet<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    inner: MruDictionary<K, ()>,
}

impl<K> MruSet<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Create a set bounded to `capacity` keys.
    ///
    /// ## Error Conditions
    /// - `InvalidArgument` when `capacity` is zero
    pub fn new(capacity: usize) -> MemResult<Self> {
        Ok(Self {
            inner: MruDictionary::new(capacity)?,
        })
    }

    /// Number of cached keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Current capacity bound.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Register the eviction observer, replacing any previous one.
    pub fn set_eviction_hook(&mut self, mut hook: impl FnMut(K) + 'static) {
        self.inner.set_eviction_hook(move |key, ()| hook(key));
    }

    /// Insert a new key, evicting the LRU key when at capacity.
    ///
    /// ## Error Conditions
    /// - `DuplicateKey` when the key is already present
    pub fn add(&mut self, key: K) -> MemResult<()> {
        self.inner.add(key, ())
    }

    /// Insert unless the key is already present.
    pub fn try_add(&mut self, key: K) -> bool {
        self.inner.try_add(key, ())
    }

    /// Membership test that bumps the key to most recently used.
    pub fn contains(&mut self, key: &K) -> bool {
        self.inner.try_get(key).is_some()
    }

    /// Membership test without touching recency.
    pub fn peek(&self, key: &K) -> bool {
        self.inner.peek(key).is_some()
    }

    /// Bump a key to most recently used.
    pub fn bump(&mut self, key: &K) -> bool {
        self.inner.bump(key)
    }

    /// Remove a key. Returns whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.inner.remove(key)
    }

    /// Change the capacity bound, evicting LRU keys down to it.
    pub fn set_capacity(&mut self, capacity: usize) -> MemResult<()> {
        self.inner.set_capacity(capacity)
    }

    /// Most recently used key.
    pub fn most_recently_used(&self) -> Option<&K> {
        self.inner.most_recently_used().map(|(key, _)| key)
    }

    /// Least recently used key.
    pub fn least_recently_used(&self) -> Option<&K> {
        self.inner.least_recently_used().map(|(key, _)| key)
    }

    /// Keys in recency order, most recent first.
    pub fn keys(&self) -> Keys<'_, K, ()> {
        self.inner.keys()
    }

    /// Drop every key.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<K> fmt::Debug for MruSet<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MruSet")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
