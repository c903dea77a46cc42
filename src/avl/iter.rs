// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! In-order iteration: full scans, bounded ranges, string prefixes.
//!
//! Iterators step through parent links (`next_node`), so they carry no
//! stack; state is the current handle plus the inclusive end handle for
//! bounded scans. Obtaining an iterator and then mutating the tree
//! invalidates the iterator's handles; doing so may yield stale entries
//! but never walks a freed slot into undefined behaviour.

use crate::avl::node::{NodeId, SearchResult};
use crate::avl::tree::AvlTree;
use crate::error::{MemError, MemResult};
use std::cmp::Ordering;
use std::fmt;

impl<K, V> AvlTree<K, V>
where
    K: Ord + fmt::Debug,
{
    /// Ascending iterator over all entries.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: self,
            next: self.minimum(),
            last: None,
        }
    }

    /// Ascending iterator starting at a node handle.
    pub fn iter_from(&self, id: NodeId) -> Iter<'_, K, V> {
        Iter {
            tree: self,
            next: Some(id),
            last: None,
        }
    }

    /// Ascending iterator over keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Ascending iterator over values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
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
    ) -> MemResult<Range<'_, K, V>> {
        if high < low {
            return Err(MemError::InvalidArgument {
                argument: "high".to_string(),
                reason: format!("range end {:?} is below range start {:?}", high, low),
            });
        }

        let start = match self.search_ge(low) {
            SearchResult {
                node: Some(id),
                diff: Ordering::Equal,
            } => {
                if inclusive_low {
                    Some(id)
                } else {
                    self.next_node(id)
                }
            }
            SearchResult {
                node: Some(id),
                diff: Ordering::Less,
            } => Some(id),
            _ => None,
        };
        let end = match self.search_le(high) {
            SearchResult {
                node: Some(id),
                diff: Ordering::Equal,
            } => {
                if inclusive_high {
                    Some(id)
                } else {
                    self.prev_node(id)
                }
            }
            SearchResult {
                node: Some(id),
                diff: Ordering::Greater,
            } => Some(id),
            _ => None,
        };

        let bounds = match (start, end) {
            (Some(start), Some(end)) if self.key(start) <= self.key(end) => Some((start, end)),
            _ => None,
        };
        Ok(Range {
            tree: self,
            next: bounds.map(|(start, _)| start),
            last: bounds.map(|(_, end)| end),
        })
    }
}

impl<V> AvlTree<String, V> {
    /// Iterator over the contiguous run of keys starting with `prefix`,
    /// under byte-ordinal comparison.
    pub fn starts_with<'a>(&'a self, prefix: &'a str) -> Prefix<'a, V> {
        let start = match self.search_ge(&prefix.to_string()) {
            SearchResult {
                node: Some(id),
                diff: Ordering::Equal | Ordering::Less,
            } => Some(id),
            _ => None,
        };
        Prefix {
            tree: self,
            next: start,
            prefix,
        }
    }
}

/// Ascending entry iterator.
pub struct Iter<'a, K, V>
where
    K: Ord + fmt::Debug,
{
    tree: &'a AvlTree<K, V>,
    next: Option<NodeId>,
    /// Inclusive stop handle; `None` iterates to the maximum.
    last: Option<NodeId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Ord + fmt::Debug,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = if self.last == Some(id) {
            None
        } else {
            self.tree.next_node(id)
        };
        Some(self.tree.entry(id))
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V>
where
    K: Ord + fmt::Debug,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending key iterator.
pub struct Keys<'a, K, V>
where
    K: Ord + fmt::Debug,
{
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V>
where
    K: Ord + fmt::Debug,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// Ascending value iterator.
pub struct Values<'a, K, V>
where
    K: Ord + fmt::Debug,
{
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V>
where
    K: Ord + fmt::Debug,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}

/// Bounded ascending entry iterator.
pub struct Range<'a, K, V>
where
    K: Ord + fmt::Debug,
{
    tree: &'a AvlTree<K, V>,
    next: Option<NodeId>,
    last: Option<NodeId>,
}

impl<'a, K, V> Iterator for Range<'a, K, V>
where
    K: Ord + fmt::Debug,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        self.next = if self.last == Some(id) {
            None
        } else {
            self.tree.next_node(id)
        };
        Some(self.tree.entry(id))
    }
}

/// Iterator over string keys sharing a prefix.
pub struct Prefix<'a, V> {
    tree: &'a AvlTree<String, V>,
    next: Option<NodeId>,
    prefix: &'a str,
}

impl<'a, V> Iterator for Prefix<'a, V> {
    type Item = (&'a String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let (key, value) = self.tree.entry(id);
        if !key.starts_with(self.prefix) {
            self.next = None;
            return None;
        }
        self.next = self.tree.next_node(id);
        Some((key, value))
    }
}
