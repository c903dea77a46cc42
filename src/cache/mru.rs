// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Bounded dictionary with least-recently-used eviction.

use crate::error::{MemError, MemResult};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// One cache entry plus its recency-list links (slot indices).
struct Slot<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

/// Bounded dictionary with O(1) access and LRU eviction.
///
/// A `HashMap` locates entries by key; recency is tracked by a circular
/// doubly-linked list embedded in the slot array. `head` is the most
/// recently used slot and `head.prev` the least recently used one.
///
/// ## Eviction
/// `add` past capacity evicts exactly one entry (the current LRU) and
/// invokes the eviction hook once with the evicted pair. Eviction is not an
/// error.
pub struct MruDictionary<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Key to slot index.
    map: HashMap<K, usize>,

    /// Slot storage; `None` marks a reusable hole.
    slots: Vec<Option<Slot<K, V>>>,

    /// Recycled slot indices.
    free: Vec<usize>,

    /// Most recently used slot, `None` when empty.
    head: Option<usize>,

    /// Maximum number of entries before eviction.
    capacity: usize,

    /// Observer invoked once per evicted entry.
    on_evicted: Option<Box<dyn FnMut(K, V)>>,
}

impl<K, V> MruDictionary<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Create a cache bounded to `capacity` entries.
    ///
    /// ## Error Conditions
    /// - `InvalidArgument` when `capacity` is zero
    pub fn new(capacity: usize) -> MemResult<Self> {
        if capacity == 0 {
            return Err(MemError::InvalidArgument {
                argument: "capacity".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(Self {
            map: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            capacity,
            on_evicted: None,
        })
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Current capacity bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Register the eviction observer, replacing any previous one.
    pub fn set_eviction_hook(&mut self, hook: impl FnMut(K, V) + 'static) {
        self.on_evicted = Some(Box::new(hook));
    }

    /// Insert a new entry, evicting the LRU entry when at capacity.
    ///
    /// ## Error Conditions
    /// - `DuplicateKey` when the key is already cached
    pub fn add(&mut self, key: K, value: V) -> MemResult<()> {
        if self.map.contains_key(&key) {
            return Err(MemError::DuplicateKey {
                key: format!("{:?}", key),
            });
        }
        if self.map.len() == self.capacity {
            self.evict_lru();
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        };
        self.slots[index] = Some(Slot {
            key: key.clone(),
            value,
            prev: index,
            next: index,
        });
        self.map.insert(key, index);
        self.link_front(index);
        Ok(())
    }

    /// Insert unless the key is already cached.
    pub fn try_add(&mut self, key: K, value: V) -> bool {
        if self.map.contains_key(&key) {
            return false;
        }
        // Capacity was validated at construction, so add cannot fail here.
        self.add(key, value).is_ok()
    }

    /// Look up a key and bump it to most recently used.
    pub fn try_get(&mut self, key: &K) -> Option<&V> {
        let index = *self.map.get(key)?;
        self.bump_slot(index);
        self.slots[index].as_ref().map(|slot| &slot.value)
    }

    /// Look up a key without touching recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let index = *self.map.get(key)?;
        self.slots[index].as_ref().map(|slot| &slot.value)
    }

    /// Bump a key to most recently used.
    ///
    /// Returns whether the key was present.
    pub fn bump(&mut self, key: &K) -> bool {
        match self.map.get(key) {
            Some(&index) => {
                self.bump_slot(index);
                true
            }
            None => false,
        }
    }

    /// Remove an entry.
    ///
    /// Returns whether the key was present. Removal does not invoke the
    /// eviction hook.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.map.remove(key) {
            Some(index) => {
                self.unlink(index);
                self.slots[index] = None;
                self.free.push(index);
                true
            }
            None => false,
        }
    }

    /// Change the capacity bound, evicting LRU entries down to it.
    ///
    /// ## Error Conditions
    /// - `InvalidArgument` when `capacity` is zero
    pub fn set_capacity(&mut self, capacity: usize) -> MemResult<()> {
        if capacity == 0 {
            return Err(MemError::InvalidArgument {
                argument: "capacity".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        while self.map.len() > capacity {
            self.evict_lru();
        }
        self.capacity = capacity;
        Ok(())
    }

    /// Most recently used entry.
    pub fn most_recently_used(&self) -> Option<(&K, &V)> {
        let head = self.head?;
        self.slots[head].as_ref().map(|slot| (&slot.key, &slot.value))
    }

    /// Least recently used entry.
    pub fn least_recently_used(&self) -> Option<(&K, &V)> {
        let head = self.head?;
        let tail = self.slots[head].as_ref().map(|slot| slot.prev)?;
        self.slots[tail].as_ref().map(|slot| (&slot.key, &slot.value))
    }

    /// Keys in recency order, most recent first.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            cache: self,
            cursor: self.head,
            remaining: self.map.len(),
        }
    }

    /// Drop every entry. Does not invoke the eviction hook.
    pub fn clear(&mut self) {
        self.map.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
    }

    /// Evict the least recently used entry and notify the observer.
    fn evict_lru(&mut self) {
        let head = match self.head {
            Some(head) => head,
            None => return,
        };
        let tail = match self.slots[head].as_ref() {
            Some(slot) => slot.prev,
            None => return,
        };
        self.unlink(tail);
        let slot = self.slots[tail].take();
        self.free.push(tail);
        if let Some(slot) = slot {
            self.map.remove(&slot.key);
            if let Some(hook) = self.on_evicted.as_mut() {
                hook(slot.key, slot.value);
            }
        }
    }

    /// Move a linked slot to the front of the recency list.
    fn bump_slot(&mut self, index: usize) {
        if self.head == Some(index) {
            return;
        }
        self.unlink(index);
        self.link_front(index);
    }

    /// Link an unlinked slot in front of the current head.
    fn link_front(&mut self, index: usize) {
        match self.head {
            None => {
                if let Some(slot) = self.slots[index].as_mut() {
                    slot.prev = index;
                    slot.next = index;
                }
            }
            Some(head) => {
                let tail = self.slots[head].as_ref().map(|s| s.prev).unwrap_or(head);
                if let Some(slot) = self.slots[index].as_mut() {
                    slot.next = head;
                    slot.prev = tail;
                }
                if let Some(slot) = self.slots[tail].as_mut() {
                    slot.next = index;
                }
                if let Some(slot) = self.slots[head].as_mut() {
                    slot.prev = index;
                }
            }
        }
        self.head = Some(index);
    }

    /// Detach a slot from the recency list.
    fn unlink(&mut self, index: usize) {
        let (prev, next) = match self.slots[index].as_ref() {
            Some(slot) => (slot.prev, slot.next),
            None => return,
        };
        if next == index {
            // Sole entry.
            self.head = None;
            return;
        }
        if let Some(slot) = self.slots[prev].as_mut() {
            slot.next = next;
        }
        if let Some(slot) = self.slots[next].as_mut() {
            slot.prev = prev;
        }
        if self.head == Some(index) {
            self.head = Some(next);
        }
    }
}

impl<K, V> fmt::Debug for MruDictionary<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MruDictionary")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// Iterator over cached keys, most recently used first.
pub struct Keys<'a, K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    cache: &'a MruDictionary<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Keys<'a, K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.cursor?;
        let slot = self.cache.slots[index].as_ref()?;
        self.remaining -= 1;
        self.cursor = Some(slot.next);
        Some(&slot.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
