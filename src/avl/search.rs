// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Binary search variants over the AVL tree.
//!
//! Every search returns a [`SearchResult`]: the reached node plus the
//! comparison of the searched key against its key. The GE/LE variants
//! additionally remember the last ancestor they turned away from, so a
//! miss still lands on the true nearest neighbour on the requested side.
//! The hinted search climbs from a previously obtained node until an
//! ancestor's subtree interval covers the key, then descends; its cost is
//! proportional to the in-order distance between hint and target.

use crate::avl::node::{NodeId, SearchResult, HEADER};
use crate::avl::tree::AvlTree;
use std::cmp::Ordering;
use std::fmt;

impl<K, V> AvlTree<K, V>
where
    K: Ord + fmt::Debug,
{
    /// Plain binary search.
    ///
    /// ## Output
    /// - exact match: `{Some(node), Equal}`
    /// - miss: `{Some(terminal), diff}` where `terminal` is the last probe
    ///   and `diff = key.cmp(terminal.key)`
    /// - empty tree: `{None, Equal}`
    pub fn search(&self, key: &K) -> SearchResult {
        match self.root() {
            None => SearchResult {
                node: None,
                diff: Ordering::Equal,
            },
            Some(root) => self.search_from(root, key),
        }
    }

    /// Binary search restricted to the subtree rooted at `subtree`.
    pub fn search_from(&self, subtree: NodeId, key: &K) -> SearchResult {
        let mut cur = subtree;
        loop {
            match key.cmp(self.key(cur)) {
                Ordering::Equal => {
                    return SearchResult {
                        node: Some(cur),
                        diff: Ordering::Equal,
                    }
                }
                Ordering::Less => match self.node(cur).left {
                    Some(left) => cur = left,
                    None => {
                        return SearchResult {
                            node: Some(cur),
                            diff: Ordering::Less,
                        }
                    }
                },
                Ordering::Greater => match self.node(cur).right {
                    Some(right) => cur = right,
                    None => {
                        return SearchResult {
                            node: Some(cur),
                            diff: Ordering::Greater,
                        }
                    }
                },
            }
        }
    }

    /// Search for the smallest key at or above `key`.
    ///
    /// ## Output
    /// - exact match: `{Some(node), Equal}`
    /// - nearest greater: `{Some(node), Less}` (key < node.key)
    /// - nothing at or above: `{Some(terminal), Greater}`
    /// - empty tree: `{None, Equal}`
    pub fn search_ge(&self, key: &K) -> SearchResult {
        let Some(root) = self.root() else {
            return SearchResult {
                node: None,
                diff: Ordering::Equal,
            };
        };
        let mut cur = root;
        let mut above: Option<NodeId> = None;
        loop {
            match key.cmp(self.key(cur)) {
                Ordering::Equal => {
                    return SearchResult {
                        node: Some(cur),
                        diff: Ordering::Equal,
                    }
                }
                Ordering::Less => {
                    above = Some(cur);
                    match self.node(cur).left {
                        Some(left) => cur = left,
                        None => break,
                    }
                }
                Ordering::Greater => match self.node(cur).right {
                    Some(right) => cur = right,
                    None => break,
                },
            }
        }
        match above {
            Some(node) => SearchResult {
                node: Some(node),
                diff: Ordering::Less,
            },
            None => SearchResult {
                node: Some(cur),
                diff: Ordering::Greater,
            },
        }
    }

    /// Search for the largest key at or below `key`. Mirror of
    /// [`search_ge`](Self::search_ge).
    ///
    /// ## Output
    /// - exact match: `{Some(node), Equal}`
    /// - nearest lesser: `{Some(node), Greater}` (key > node.key)
    /// - nothing at or below: `{Some(terminal), Less}`
    /// - empty tree: `{None, Equal}`
    pub fn search_le(&self, key: &K) -> SearchResult {
        let Some(root) = self.root() else {
            return SearchResult {
                node: None,
                diff: Ordering::Equal,
            };
        };
        let mut cur = root;
        let mut below: Option<NodeId> = None;
        loop {
            match key.cmp(self.key(cur)) {
                Ordering::Equal => {
                    return SearchResult {
                        node: Some(cur),
                        diff: Ordering::Equal,
                    }
                }
                Ordering::Greater => {
                    below = Some(cur);
                    match self.node(cur).right {
                        Some(right) => cur = right,
                        None => break,
                    }
                }
                Ordering::Less => match self.node(cur).left {
                    Some(left) => cur = left,
                    None => break,
                },
            }
        }
        match below {
            Some(node) => SearchResult {
                node: Some(node),
                diff: Ordering::Greater,
            },
            None => SearchResult {
                node: Some(cur),
                diff: Ordering::Less,
            },
        }
    }

    /// Hinted binary search.
    ///
    /// Climbs from `hint` to the nearest ancestor whose subtree interval
    /// contains `key`, then descends. Worst case 2·log n; O(distance) when
    /// the hint is close to the target. `hint` must be a live handle.
    pub fn search_nearby(&self, hint: NodeId, key: &K) -> SearchResult {
        match self.root() {
            None => SearchResult {
                node: None,
                diff: Ordering::Equal,
            },
            Some(_) => {
                let subtree = self.nearby_subtree(hint, key);
                self.search_from(subtree, key)
            }
        }
    }

    /// Nearest ancestor of `hint` (possibly `hint` itself, possibly the
    /// root) whose subtree is known to cover `key`.
    ///
    /// Climbing over a right-child edge adds the parent's key as a lower
    /// bound, climbing over a left-child edge adds it as an upper bound;
    /// the climb stops as soon as the accumulated interval covers `key`.
    pub(crate) fn nearby_subtree(&self, hint: NodeId, key: &K) -> NodeId {
        let mut cur = hint;
        match key.cmp(self.key(cur)) {
            Ordering::Equal => cur,
            Ordering::Less => loop {
                let parent = self.node(cur).parent.unwrap();
                if parent == HEADER {
                    break cur;
                }
                if self.node(parent).right == Some(cur) {
                    match key.cmp(self.key(parent)) {
                        // key lies between parent and cur's subtree floor.
                        Ordering::Greater => break cur,
                        Ordering::Equal => break parent,
                        Ordering::Less => cur = parent,
                    }
                } else {
                    cur = parent;
                }
            },
            Ordering::Greater => loop {
                let parent = self.node(cur).parent.unwrap();
                if parent == HEADER {
                    break cur;
                }
                if self.node(parent).left == Some(cur) {
                    match key.cmp(self.key(parent)) {
                        Ordering::Less => break cur,
                        Ordering::Equal => break parent,
                        Ordering::Greater => cur = parent,
                    }
                } else {
                    cur = parent;
                }
            },
        }
    }
}
