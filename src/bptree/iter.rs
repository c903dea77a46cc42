// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Entry, key, value and range iteration over the leaf chain.
//!
//! Full scans walk the leaves left to right through the outer index and
//! step through each sorted array; a range scan bounds the walk with two
//! binary searches so only the edge leaves are partially scanned.

use crate::bptree::leaf::{LeafId, Location};
use crate::bptree::tree::BPlusMap;
use crate::error::{MemError, MemResult};
use std::fmt;

impl<K, V> BPlusMap<K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    /// Ascending iterator over all entries.
    pub fn items(&self) -> Items<'_, K, V> {
        Items {
            map: self,
            leaf: self.first_leaf(),
            index: 0,
        }
    }

    /// Ascending iterator over keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.items() }
    }

    /// Ascending iterator over values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.items() }
    }

    /// Ascending iterator over the entries between `low` and `high`.
    ///
    /// ## Input
    /// - `low`/`high`: range bounds, `low <= high`
    /// - `inclusive_low`/`inclusive_high`: whether each bound itself is
    ///   yielded when present
    ///
    /// ## Error Conditions
    /// - `InvalidArgument` when `high < low`
    pub fn range(
        &self,
        low: &K,
        high: &K,
        inclusive_low: bool,
        inclusive_high: bool,
    ) -> MemResult<RangeIter<'_, K, V>> {
        if high < low {
            return Err(MemError::InvalidArgument {
                argument: "high".to_string(),
                reason: format!("range end {:?} is below range start {:?}", high, low),
            });
        }

        let start = self.locate(low).and_then(|loc| {
            if loc.found() {
                if inclusive_low {
                    Some(loc)
                } else {
                    self.next_location(loc)
                }
            } else {
                self.location_at_insertion(loc)
            }
        });
        let end = self.locate(high).and_then(|loc| {
            if loc.found() {
                if inclusive_high {
                    Some(loc)
                } else {
                    self.prev_location(loc)
                }
            } else {
                self.location_before_insertion(loc)
            }
        });

        let bounds = match (start, end) {
            (Some(start), Some(end)) => {
                let (start_key, _) = self.entry_at(start).unwrap();
                let (end_key, _) = self.entry_at(end).unwrap();
                if start_key <= end_key {
                    Some((start, end))
                } else {
                    None
                }
            }
            _ => None,
        };
        Ok(RangeIter {
            map: self,
            next: bounds.map(|(start, _)| start),
            last: bounds.map(|(_, end)| end),
        })
    }

    /// First present entry at or after a miss location.
    pub(crate) fn location_at_insertion(&self, loc: Location) -> Option<Location> {
        let position = loc.insertion_index();
        if position < self.leaf(loc.leaf).len() {
            return Some(Location {
                leaf: loc.leaf,
                index: position as i32,
            });
        }
        self.next_leaf(loc.leaf).map(|leaf| Location { leaf, index: 0 })
    }

    /// Last present entry before a miss location.
    pub(crate) fn location_before_insertion(&self, loc: Location) -> Option<Location> {
        let position = loc.insertion_index();
        if position > 0 {
            return Some(Location {
                leaf: loc.leaf,
                index: (position - 1) as i32,
            });
        }
        let prev = self.prev_leaf(loc.leaf)?;
        Some(Location {
            leaf: prev,
            index: (self.leaf(prev).len() - 1) as i32,
        })
    }
}

/// Ascending entry iterator.
pub struct Items<'a, K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    map: &'a BPlusMap<K, V>,
    leaf: Option<LeafId>,
    index: usize,
}

impl<'a, K, V> Iterator for Items<'a, K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.leaf?;
            let leaf = self.map.leaf(id);
            if self.index < leaf.len() {
                let (key, value) = &leaf.entries[self.index];
                self.index += 1;
                return Some((key, value));
            }
            self.leaf = self.map.next_leaf(id);
            self.index = 0;
        }
    }
}

impl<'a, K, V> IntoIterator for &'a BPlusMap<K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Items<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items()
    }
}

/// Ascending key iterator.
pub struct Keys<'a, K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    inner: Items<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// Ascending value iterator.
pub struct Values<'a, K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    inner: Items<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}

/// Bounded ascending entry iterator.
pub struct RangeIter<'a, K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    map: &'a BPlusMap<K, V>,
    next: Option<Location>,
    last: Option<Location>,
}

impl<'a, K, V> Iterator for RangeIter<'a, K, V>
where
    K: Ord + Clone + fmt::Debug,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let loc = self.next?;
        self.next = if self.last == Some(loc) {
            None
        } else {
            self.map.next_location(loc)
        };
        let leaf = self.map.leaf(loc.leaf);
        let (key, value) = &leaf.entries[loc.entry_index()];
        Some((key, value))
    }
}
