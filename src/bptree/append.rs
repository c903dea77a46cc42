// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tail-append fast paths and the left-packing rebuild.
//!
//! The appender skips the two-level search entirely: it remembers the last
//! leaf and compares each key against the current maximum, so an ordered
//! load costs O(1) amortised per entry no matter how large the tree is.
//! `add_range_ordered` generalises the idea to ascending inserts into the
//! middle of an existing tree with a rolling location cursor.

use crate::bptree::leaf::Location;
use crate::bptree::tree::BPlusMap;
use crate::bptree::LeafId;
use crate::error::{MemError, MemResult};
use crate::metrics::{Metric, MetricUnit, MetricsCollector};
use std::cmp::Ordering;
use std::fmt;
use std::time::Instant;

impl<K, V> BPlusMap<K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    /// Ordered append handle.
    pub fn appender(&mut self) -> Appender<'_, K, V> {
        let last = self.last_leaf();
        Appender { map: self, last }
    }

    /// Bulk-insert an ascending sequence of entries.
    ///
    /// Keeps a rolling cursor: each key is located from the previous
    /// insert's position, which costs O(1) while consecutive keys land in
    /// the same leaf. Once a key passes the pre-existing maximum, the rest
    /// of the input flows through the dump-at-end path that packs leaves
    /// to capacity.
    ///
    /// ## Error Conditions
    /// - `OutOfOrder` when the input sequence is not strictly ascending
    /// - `DuplicateKey` when an input key is already present
    pub fn add_range_ordered<I>(&mut self, items: I) -> MemResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let max_key: Option<K> = self.maximum().map(|(key, _)| key.clone());
        let mut past_max = max_key.is_none();
        let mut cursor: Option<Location> = None;
        let mut prev_key: Option<K> = None;

        for (key, value) in items {
            if let Some(prev) = &prev_key {
                if key <= *prev {
                    return Err(MemError::OutOfOrder {
                        key: format!("{:?}", key),
                        maximum: format!("{:?}", prev),
                    });
                }
            }
            prev_key = Some(key.clone());

            if !past_max {
                if let Some(max) = &max_key {
                    past_max = key > *max;
                }
            }
            if past_max {
                self.append_tail(key, value)?;
                continue;
            }

            let loc = match cursor {
                Some(hint) => self.search_nearby(hint, &key),
                None => self.locate(&key),
            }
            .unwrap();
            if loc.found() {
                return Err(MemError::DuplicateKey {
                    key: format!("{:?}", key),
                });
            }
            let landed = self.insert_at(loc, key, value)?;
            self.count += 1;
            cursor = Some(landed);
        }
        Ok(())
    }

    /// Left-pack every leaf to capacity and rebuild the outer index.
    ///
    /// O(n); reclaims the slack the fill discipline accumulates. Every
    /// outstanding location and iterator is invalidated.
    pub fn optimize(&mut self) {
        let started = Instant::now();
        let total = self.count;

        let mut all: Vec<(K, V)> = Vec::with_capacity(total);
        let mut cursor = self.first_leaf();
        while let Some(id) = cursor {
            cursor = self.next_leaf(id);
            let leaf = self.leaves[id as usize].take().unwrap();
            all.extend(leaf.entries);
        }

        self.clear();

        let order = self.order();
        let mut hint = None;
        let mut batch: Vec<(K, V)> = Vec::with_capacity(order);
        for entry in all {
            batch.push(entry);
            if batch.len() == order {
                let leaf = self
                    .create_leaf(std::mem::replace(&mut batch, Vec::with_capacity(order)), hint)
                    .unwrap();
                hint = Some(self.leaf(leaf).node);
            }
        }
        if !batch.is_empty() {
            self.create_leaf(batch, hint).unwrap();
        }
        self.count = total;

        MetricsCollector::global().record(
            Metric::new(
                "bptree_optimize",
                started.elapsed().as_micros() as f64,
                MetricUnit::Microseconds,
            )
            .with_tag("entries", total.to_string()),
        );
    }

    /// Append one entry known to be above the current maximum.
    fn append_tail(&mut self, key: K, value: V) -> MemResult<()> {
        match self.last_leaf() {
            None => {
                self.create_leaf(vec![(key, value)], None)?;
            }
            Some(id) if self.leaf(id).len() < self.order() => {
                self.leaf_mut(id).entries.push((key, value));
            }
            Some(id) => {
                let hint = self.leaf(id).node;
                self.create_leaf(vec![(key, value)], Some(hint))?;
            }
        }
        self.count += 1;
        Ok(())
    }
}

/// Short-lived ordered-append handle.
///
/// Remembers the rightmost leaf so each append is one comparison plus an
/// array push. Obtain a fresh appender after any other mutation of the
/// map.
pub struct Appender<'a, K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    map: &'a mut BPlusMap<K, V>,
    last: Option<LeafId>,
}

impl<K, V> Appender<'_, K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    /// Append an entry above the current maximum key.
    ///
    /// ## Output
    /// - `Ok(Location)`: where the entry landed
    ///
    /// ## Error Conditions
    /// - `DuplicateKey` when `key` equals the current maximum
    /// - `OutOfOrder` when `key` is below the current maximum
    pub fn add_ordered(&mut self, key: K, value: V) -> MemResult<Location> {
        let last = match self.last {
            Some(last) => last,
            None => {
                let leaf = self.map.create_leaf(vec![(key, value)], None)?;
                self.map.count = 1;
                self.last = Some(leaf);
                return Ok(Location { leaf, index: 0 });
            }
        };

        let tail = &self.map.leaf(last).entries.last().unwrap().0;
        match key.cmp(tail) {
            Ordering::Equal => Err(MemError::DuplicateKey {
                key: format!("{:?}", key),
            }),
            Ordering::Less => Err(MemError::OutOfOrder {
                key: format!("{:?}", key),
                maximum: format!("{:?}", tail),
            }),
            Ordering::Greater => {
                if self.map.leaf(last).len() < self.map.order() {
                    self.map.leaf_mut(last).entries.push((key, value));
                    self.map.count += 1;
                    let index = self.map.leaf(last).len() - 1;
                    return Ok(Location {
                        leaf: last,
                        index: index as i32,
                    });
                }
                let hint = self.map.leaf(last).node;
                let leaf = self.map.create_leaf(vec![(key, value)], Some(hint))?;
                self.map.count += 1;
                self.last = Some(leaf);
                Ok(Location { leaf, index: 0 })
            }
        }
    }

    /// The map's current entry count.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the underlying map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
