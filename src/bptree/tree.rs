// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! B+-map core: two-level search, fill discipline, leaf lifecycle.

use crate::avl::{AvlTree, NodeId};
use crate::bptree::leaf::{Leaf, LeafId, Location};
use crate::error::{MemError, MemResult};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

/// Default entries per leaf.
const DEFAULT_ORDER: usize = 32;

/// Smallest usable order: the 2-into-3 redistribution must leave room for
/// one more entry in every target leaf.
const MIN_ORDER: usize = 5;

/// Ordered map over sorted-array leaves indexed by an AVL tree.
///
/// See the [module docs](crate::bptree) for the layout and fill rules.
/// Single-threaded; locations and iterators are snapshots that structural
/// mutation may invalidate.
pub struct BPlusMap<K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    /// Outer index: first key of each leaf → leaf handle.
    pub(crate) index: AvlTree<K, LeafId>,

    /// Leaf arena; `None` marks a reusable hole.
    pub(crate) leaves: Vec<Option<Leaf<K, V>>>,

    /// Recycled leaf slots.
    free: Vec<LeafId>,

    /// Entries per leaf.
    order: usize,

    /// Total entry count.
    pub(crate) count: usize,
}

impl<K, V> BPlusMap<K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    /// Create a map with the default order.
    pub fn new() -> Self {
        // The default order satisfies the minimum, so this cannot fail.
        Self::with_order(DEFAULT_ORDER).unwrap()
    }

    /// Create a map with an explicit number of entries per leaf.
    ///
    /// ## Error Conditions
    /// - `InvalidArgument` when `order < 5`
    pub fn with_order(order: usize) -> MemResult<Self> {
        if order < MIN_ORDER {
            return Err(MemError::InvalidArgument {
                argument: "order".to_string(),
                reason: format!("must be at least {}, got {}", MIN_ORDER, order),
            });
        }
        Ok(Self {
            index: AvlTree::new(),
            leaves: Vec::new(),
            free: Vec::new(),
            order,
            count: 0,
        })
    }

    /// Entries per leaf.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Total entry count.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.index.len()
    }

    /// Remove every entry. All locations become invalid.
    pub fn clear(&mut self) {
        self.index.clear();
        self.leaves.clear();
        self.free.clear();
        self.count = 0;
    }

    pub(crate) fn leaf(&self, id: LeafId) -> &Leaf<K, V> {
        self.leaves[id as usize].as_ref().unwrap()
    }

    pub(crate) fn leaf_mut(&mut self, id: LeafId) -> &mut Leaf<K, V> {
        self.leaves[id as usize].as_mut().unwrap()
    }

    /// Leftmost leaf.
    pub(crate) fn first_leaf(&self) -> Option<LeafId> {
        self.index.minimum().map(|node| *self.index.value(node))
    }

    /// Rightmost leaf.
    pub(crate) fn last_leaf(&self) -> Option<LeafId> {
        self.index.maximum().map(|node| *self.index.value(node))
    }

    /// Leaf to the right of `id`.
    pub(crate) fn next_leaf(&self, id: LeafId) -> Option<LeafId> {
        let node = self.leaf(id).node;
        self.index.next_node(node).map(|next| *self.index.value(next))
    }

    /// Leaf to the left of `id`.
    pub(crate) fn prev_leaf(&self, id: LeafId) -> Option<LeafId> {
        let node = self.leaf(id).node;
        self.index.prev_node(node).map(|prev| *self.index.value(prev))
    }

    /// Binary search.
    ///
    /// ## Output
    /// - `Some(location)`: present entry (`index >= 0`) or insertion point
    ///   (`index < 0`, complement encodes the position)
    /// - `None`: the map is empty
    pub fn search(&self, key: &K) -> Option<Location> {
        self.locate(key)
    }

    /// Binary search starting from a location hint.
    ///
    /// `hint` must reference a live leaf; cost is O(distance) for nearby
    /// keys and 2·log n in the worst case.
    pub fn search_nearby(&self, hint: Location, key: &K) -> Option<Location> {
        if self.index.is_empty() {
            return None;
        }
        let hint_node = self.leaf(hint.leaf).node;
        let outer = self.index.search_nearby(hint_node, key);
        Some(self.narrow(outer.node.unwrap(), outer.diff, key))
    }

    /// Value lookup.
    pub fn get(&self, key: &K) -> Option<&V> {
        let loc = self.locate(key)?;
        if loc.found() {
            Some(&self.leaf(loc.leaf).entries[loc.entry_index()].1)
        } else {
            None
        }
    }

    /// Mutable value lookup.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let loc = self.locate(key)?;
        if loc.found() {
            Some(&mut self.leaf_mut(loc.leaf).entries[loc.entry_index()].1)
        } else {
            None
        }
    }

    /// Membership test.
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).map(|loc| loc.found()).unwrap_or(false)
    }

    /// Entry with the smallest key.
    pub fn minimum(&self) -> Option<(&K, &V)> {
        let leaf = self.leaf(self.first_leaf()?);
        leaf.entries.first().map(|(k, v)| (k, v))
    }

    /// Entry with the largest key.
    pub fn maximum(&self) -> Option<(&K, &V)> {
        let leaf = self.leaf(self.last_leaf()?);
        leaf.entries.last().map(|(k, v)| (k, v))
    }

    /// Entry at a found location.
    pub fn entry_at(&self, loc: Location) -> Option<(&K, &V)> {
        if !loc.found() {
            return None;
        }
        let leaf = self.leaves.get(loc.leaf as usize)?.as_ref()?;
        leaf.entries.get(loc.entry_index()).map(|(k, v)| (k, v))
    }

    /// Location of the entry after `loc`, crossing leaf boundaries.
    ///
    /// `loc` must be a found location.
    pub fn next_location(&self, loc: Location) -> Option<Location> {
        let leaf = self.leaf(loc.leaf);
        let next_index = loc.entry_index() + 1;
        if next_index < leaf.len() {
            return Some(Location {
                leaf: loc.leaf,
                index: next_index as i32,
            });
        }
        self.next_leaf(loc.leaf).map(|leaf| Location { leaf, index: 0 })
    }

    /// Location of the entry before `loc`, crossing leaf boundaries.
    ///
    /// `loc` must be a found location.
    pub fn prev_location(&self, loc: Location) -> Option<Location> {
        if loc.entry_index() > 0 {
            return Some(Location {
                leaf: loc.leaf,
                index: loc.index - 1,
            });
        }
        let prev = self.prev_leaf(loc.leaf)?;
        Some(Location {
            leaf: prev,
            index: (self.leaf(prev).len() - 1) as i32,
        })
    }

    /// Replace the value at a found location, returning the old one.
    pub fn update_value_at(&mut self, loc: Location, value: V) -> V {
        let entry = &mut self.leaf_mut(loc.leaf).entries[loc.entry_index()];
        std::mem::replace(&mut entry.1, value)
    }

    /// Replace the key at a found location in place, returning the old one.
    ///
    /// The caller must guarantee the new key keeps the leaf strictly
    /// sorted relative to its neighbours; violating this silently corrupts
    /// the ordering. The outer index key is refreshed when the leaf's
    /// first entry changes.
    pub fn update_key_at(&mut self, loc: Location, key: K) -> K {
        let index = loc.entry_index();
        let entry = &mut self.leaf_mut(loc.leaf).entries[index];
        let old = std::mem::replace(&mut entry.0, key);
        if index == 0 {
            self.refresh_key(loc.leaf);
        }
        old
    }

    /// Replace both key and value at a found location.
    ///
    /// Same unchecked ordering contract as
    /// [`update_key_at`](Self::update_key_at).
    pub fn update_at(&mut self, loc: Location, key: K, value: V) -> (K, V) {
        let old_value = self.update_value_at(loc, value);
        let old_key = self.update_key_at(loc, key);
        (old_key, old_value)
    }

    /// Insert a new entry.
    ///
    /// ## Output
    /// - `Ok(Location)`: where the entry landed
    ///
    /// ## Error Conditions
    /// - `DuplicateKey` when the key is present (the map is unchanged)
    pub fn insert(&mut self, key: K, value: V) -> MemResult<Location> {
        match self.locate(&key) {
            None => {
                let leaf = self.create_leaf(vec![(key, value)], None)?;
                self.count = 1;
                Ok(Location { leaf, index: 0 })
            }
            Some(loc) if loc.found() => Err(MemError::DuplicateKey {
                key: format!("{:?}", key),
            }),
            Some(loc) => {
                let loc = self.insert_at(loc, key, value)?;
                self.count += 1;
                Ok(loc)
            }
        }
    }

    /// Insert using a location hint for the search.
    pub fn insert_near(&mut self, hint: Location, key: K, value: V) -> MemResult<Location> {
        match self.search_nearby(hint, &key) {
            None => self.insert(key, value),
            Some(loc) if loc.found() => Err(MemError::DuplicateKey {
                key: format!("{:?}", key),
            }),
            Some(loc) => {
                let loc = self.insert_at(loc, key, value)?;
                self.count += 1;
                Ok(loc)
            }
        }
    }

    /// Insert a new entry or overwrite an existing one.
    ///
    /// Returns the previous value when the key was present.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.locate(&key) {
            Some(loc) if loc.found() => Some(self.update_value_at(loc, value)),
            Some(loc) => {
                // Only a duplicate can fail insert_at's index plumbing, and
                // the location just proved the key absent.
                self.insert_at(loc, key, value).unwrap();
                self.count += 1;
                None
            }
            None => {
                self.insert(key, value).unwrap();
                None
            }
        }
    }

    /// Remove by key. Returns whether the key was present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.locate(key) {
            Some(loc) if loc.found() => {
                self.remove_at(loc).is_ok()
            }
            _ => false,
        }
    }

    /// Remove the entry at a found location.
    ///
    /// ## Error Conditions
    /// - `InvalidArgument` when `loc` encodes an insertion point
    pub fn remove_at(&mut self, loc: Location) -> MemResult<(K, V)> {
        if !loc.found() {
            return Err(MemError::InvalidArgument {
                argument: "loc".to_string(),
                reason: "location does not reference a present entry".to_string(),
            });
        }
        let index = loc.entry_index();
        let entry = self.leaf_mut(loc.leaf).entries.remove(index);
        self.count -= 1;

        if self.leaf(loc.leaf).entries.is_empty() {
            self.free_leaf(loc.leaf);
            return Ok(entry);
        }
        if index == 0 {
            self.refresh_key(loc.leaf);
        }
        if self.leaf(loc.leaf).len() <= self.order / 2 {
            self.rebalance_sparse(loc.leaf);
        }
        Ok(entry)
    }

    /// Verify every structural invariant.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Verify leaf ordering, outer-key agreement, occupancy and counts,
    /// reporting the first violation.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        self.index.check_invariants_detailed()?;

        let mut seen = 0usize;
        let mut prev_last: Option<&K> = None;
        let mut cursor = self.first_leaf();
        let mut visited = 0usize;
        while let Some(id) = cursor {
            let leaf = match self.leaves.get(id as usize).and_then(|slot| slot.as_ref()) {
                Some(leaf) => leaf,
                None => return Err(format!("leaf {} is vacant but indexed", id)),
            };
            if leaf.entries.is_empty() {
                return Err(format!("leaf {} is empty", id));
            }
            if leaf.len() > self.order {
                return Err(format!("leaf {} holds {} > order {}", id, leaf.len(), self.order));
            }
            if self.index.key(leaf.node) != &leaf.entries[0].0 {
                return Err(format!(
                    "leaf {} outer key {:?} != first key {:?}",
                    id,
                    self.index.key(leaf.node),
                    leaf.entries[0].0
                ));
            }
            if *self.index.value(leaf.node) != id {
                return Err(format!("leaf {} back reference mismatch", id));
            }
            for pair in leaf.entries.windows(2) {
                if pair[0].0 >= pair[1].0 {
                    return Err(format!("leaf {} keys not strictly increasing", id));
                }
            }
            if let Some(prev) = prev_last {
                if prev >= &leaf.entries[0].0 {
                    return Err(format!(
                        "leaf {} first key {:?} not above previous leaf's last {:?}",
                        id, leaf.entries[0].0, prev
                    ));
                }
            }
            prev_last = Some(&leaf.entries[leaf.len() - 1].0);
            seen += leaf.len();
            visited += 1;
            cursor = self.next_leaf(id);
        }
        if visited != self.index.len() {
            return Err(format!(
                "walked {} leaves but index holds {}",
                visited,
                self.index.len()
            ));
        }
        if seen != self.count {
            return Err(format!("count {} but leaves hold {}", self.count, seen));
        }
        Ok(())
    }

    /// Entry counts per leaf, left to right.
    pub fn leaf_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.index.len());
        let mut cursor = self.first_leaf();
        while let Some(id) = cursor {
            sizes.push(self.leaf(id).len());
            cursor = self.next_leaf(id);
        }
        sizes
    }

    /// Two-level locate; `None` only when the map is empty.
    pub(crate) fn locate(&self, key: &K) -> Option<Location> {
        if self.index.is_empty() {
            return None;
        }
        let outer = self.index.search(key);
        Some(self.narrow(outer.node.unwrap(), outer.diff, key))
    }

    /// Resolve an outer probe to an in-leaf location.
    ///
    /// A probe left of its leaf's first key steps one leaf to the left;
    /// with no leaf there, the key precedes everything and the location
    /// encodes insertion at the front of the first leaf.
    fn narrow(&self, node: NodeId, diff: Ordering, key: &K) -> Location {
        let mut node = node;
        if diff == Ordering::Less {
            match self.index.prev_node(node) {
                Some(prev) => node = prev,
                None => {
                    return Location {
                        leaf: *self.index.value(node),
                        index: !0,
                    }
                }
            }
        }
        let leaf_id = *self.index.value(node);
        let leaf = self.leaf(leaf_id);
        match leaf.entries.binary_search_by(|(k, _)| k.cmp(key)) {
            Ok(index) => Location {
                leaf: leaf_id,
                index: index as i32,
            },
            Err(index) => Location {
                leaf: leaf_id,
                index: !(index as i32),
            },
        }
    }

    /// Apply the insert fill discipline at a not-found location.
    pub(crate) fn insert_at(&mut self, loc: Location, key: K, value: V) -> MemResult<Location> {
        let leaf_id = loc.leaf;
        let position = loc.insertion_index();
        let size = self.leaf(leaf_id).len();
        let order = self.order;

        if size < order {
            // Room in place.
            self.leaf_mut(leaf_id).entries.insert(position, (key, value));
            if position == 0 {
                self.refresh_key(leaf_id);
            }
            return Ok(Location {
                leaf: leaf_id,
                index: position as i32,
            });
        }

        if position == 0 {
            // Full leaf, new global minimum (or a hinted front insert).
            if let Some(left) = self.prev_leaf(leaf_id) {
                if self.leaf(left).len() < order {
                    self.leaf_mut(left).entries.push((key, value));
                    let index = self.leaf(left).len() - 1;
                    return Ok(Location {
                        leaf: left,
                        index: index as i32,
                    });
                }
                // Left neighbour is busy too: redistribute {left, current}.
                return self.split_insert(left, leaf_id, order, key, value);
            }
            let hint = self.leaf(leaf_id).node;
            let leaf = self.create_leaf_near(vec![(key, value)], hint)?;
            return Ok(Location { leaf, index: 0 });
        }

        if position == order {
            // Full leaf, insert past its end.
            match self.next_leaf(leaf_id) {
                Some(right) => {
                    if self.leaf(right).len() < order {
                        self.leaf_mut(right).entries.insert(0, (key, value));
                        self.refresh_key(right);
                        return Ok(Location {
                            leaf: right,
                            index: 0,
                        });
                    }
                    self.split_insert(leaf_id, right, position, key, value)
                }
                None => {
                    let hint = self.leaf(leaf_id).node;
                    let leaf = self.create_leaf_near(vec![(key, value)], hint)?;
                    Ok(Location { leaf, index: 0 })
                }
            }
        } else {
            // Full leaf, interior insert: shed one entry to a neighbour
            // with room, creating a missing neighbour before splitting.
            if let Some(right) = self.next_leaf(leaf_id) {
                if self.leaf(right).len() < order {
                    let shed = self.leaf_mut(leaf_id).entries.pop().unwrap();
                    self.leaf_mut(right).entries.insert(0, shed);
                    self.refresh_key(right);
                    self.leaf_mut(leaf_id).entries.insert(position, (key, value));
                    return Ok(Location {
                        leaf: leaf_id,
                        index: position as i32,
                    });
                }
            }
            if let Some(left) = self.prev_leaf(leaf_id) {
                if self.leaf(left).len() < order {
                    let shed = self.leaf_mut(leaf_id).entries.remove(0);
                    self.leaf_mut(left).entries.push(shed);
                    self.leaf_mut(leaf_id)
                        .entries
                        .insert(position - 1, (key, value));
                    // The first entry changed either way: the old one was
                    // shed, and at position 1 the new entry replaces it.
                    self.refresh_key(leaf_id);
                    return Ok(Location {
                        leaf: leaf_id,
                        index: (position - 1) as i32,
                    });
                }
            }
            if self.next_leaf(leaf_id).is_none() {
                let shed = self.leaf_mut(leaf_id).entries.pop().unwrap();
                let hint = self.leaf(leaf_id).node;
                self.create_leaf_near(vec![shed], hint)?;
                self.leaf_mut(leaf_id).entries.insert(position, (key, value));
                return Ok(Location {
                    leaf: leaf_id,
                    index: position as i32,
                });
            }
            if self.prev_leaf(leaf_id).is_none() {
                let shed = self.leaf_mut(leaf_id).entries.remove(0);
                // Move the outer key off the shed entry before it becomes
                // the new left leaf's key.
                self.refresh_key(leaf_id);
                let hint = self.leaf(leaf_id).node;
                self.create_leaf_near(vec![shed], hint)?;
                self.leaf_mut(leaf_id)
                    .entries
                    .insert(position - 1, (key, value));
                if position == 1 {
                    self.refresh_key(leaf_id);
                }
                return Ok(Location {
                    leaf: leaf_id,
                    index: (position - 1) as i32,
                });
            }
            let right = self.next_leaf(leaf_id).unwrap();
            self.split_insert(leaf_id, right, position, key, value)
        }
    }

    /// Redistribute two full adjacent leaves into three and insert.
    ///
    /// `first` precedes `second`; `position` is the insert position within
    /// their concatenation. Targets are sized (T, T, 2C-2T) with
    /// T = 2C/3 rounded down; the rounding surplus always lands in the new
    /// last leaf, and the position arithmetic below depends on that
    /// direction.
    fn split_insert(
        &mut self,
        first: LeafId,
        second: LeafId,
        position: usize,
        key: K,
        value: V,
    ) -> MemResult<Location> {
        let order = self.order;
        let target = 2 * order / 3;

        let mut all = std::mem::take(&mut self.leaf_mut(first).entries);
        all.append(&mut self.leaf_mut(second).entries);

        let spill = all.split_off(2 * target);
        let middle = all.split_off(target);
        self.leaf_mut(first).entries = all;
        self.leaf_mut(second).entries = middle;
        self.refresh_key(second);
        let hint = self.leaf(second).node;
        let new_leaf = self.create_leaf_near(spill, hint)?;

        let (leaf_id, index) = if position < target {
            (first, position)
        } else if position < 2 * target {
            (second, position - target)
        } else {
            (new_leaf, position - 2 * target)
        };
        self.leaf_mut(leaf_id).entries.insert(index, (key, value));
        if index == 0 {
            self.refresh_key(leaf_id);
        }
        Ok(Location {
            leaf: leaf_id,
            index: index as i32,
        })
    }

    /// Refill or retire a leaf that dropped to half occupancy.
    fn rebalance_sparse(&mut self, leaf_id: LeafId) {
        let order = self.order;
        let size = self.leaf(leaf_id).len();

        // Whole leaf fits into the previous neighbour.
        if let Some(prev) = self.prev_leaf(leaf_id) {
            if self.leaf(prev).len() + size <= order {
                let mut moved = std::mem::take(&mut self.leaf_mut(leaf_id).entries);
                self.leaf_mut(prev).entries.append(&mut moved);
                self.free_leaf(leaf_id);
                return;
            }
        }
        // Whole leaf fits in front of the next neighbour.
        if let Some(next) = self.next_leaf(leaf_id) {
            if self.leaf(next).len() + size <= order {
                let mut moved = std::mem::take(&mut self.leaf_mut(leaf_id).entries);
                let old = std::mem::replace(&mut self.leaf_mut(next).entries, Vec::new());
                moved.extend(old);
                self.leaf_mut(next).entries = moved;
                self.refresh_key(next);
                self.free_leaf(leaf_id);
                return;
            }
        }
        // Residue split across both neighbours.
        if let (Some(prev), Some(next)) = (self.prev_leaf(leaf_id), self.next_leaf(leaf_id)) {
            let room_prev = order - self.leaf(prev).len();
            let room_next = order - self.leaf(next).len();
            if room_prev + room_next >= size {
                let mut moved = std::mem::take(&mut self.leaf_mut(leaf_id).entries);
                let tail = moved.split_off(room_prev.min(size));
                self.leaf_mut(prev).entries.append(&mut moved);
                if !tail.is_empty() {
                    let mut front = tail;
                    let old = std::mem::replace(&mut self.leaf_mut(next).entries, Vec::new());
                    front.extend(old);
                    self.leaf_mut(next).entries = front;
                    self.refresh_key(next);
                }
                self.free_leaf(leaf_id);
            }
        }
        // Otherwise the leaf stays under-filled; the discipline is
        // best-effort, not a hard per-step bound.
    }

    /// Allocate a leaf and register it in the outer index.
    pub(crate) fn create_leaf(
        &mut self,
        entries: Vec<(K, V)>,
        hint: Option<NodeId>,
    ) -> MemResult<LeafId> {
        let key = entries[0].0.clone();
        let id = match self.free.pop() {
            Some(id) => {
                self.leaves[id as usize] = Some(Leaf { entries, node: 0 });
                id
            }
            None => {
                self.leaves.push(Some(Leaf { entries, node: 0 }));
                (self.leaves.len() - 1) as LeafId
            }
        };
        let result = match hint {
            Some(hint) => self.index.insert_near(hint, key, id),
            None => self.index.insert(key, id),
        };
        match result {
            Ok(node) => {
                self.leaf_mut(id).node = node;
                Ok(id)
            }
            Err(e) => {
                // Roll the slot back so a caller-visible error leaves the
                // map unchanged.
                self.leaves[id as usize] = None;
                self.free.push(id);
                Err(e)
            }
        }
    }

    /// [`create_leaf`](Self::create_leaf) with a mandatory hint.
    fn create_leaf_near(&mut self, entries: Vec<(K, V)>, hint: NodeId) -> MemResult<LeafId> {
        self.create_leaf(entries, Some(hint))
    }

    /// Drop a leaf and its outer index entry.
    fn free_leaf(&mut self, id: LeafId) {
        let node = self.leaf(id).node;
        self.index.remove_node(node);
        self.leaves[id as usize] = None;
        self.free.push(id);
    }

    /// Mirror a changed first entry into the outer index key.
    pub(crate) fn refresh_key(&mut self, id: LeafId) {
        let key = self.leaf(id).entries[0].0.clone();
        let node = self.leaf(id).node;
        self.index.update_key(node, key);
    }
}

impl<K, V> Default for BPlusMap<K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for BPlusMap<K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BPlusMap")
            .field("count", &self.count)
            .field("leaves", &self.index.len())
            .field("order", &self.order)
            .finish()
    }
}

impl<K, V> Index<&K> for BPlusMap<K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    type Output = V;

    /// Panicking lookup; the checked spelling is [`BPlusMap::get`].
    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).unwrap()
    }
}
