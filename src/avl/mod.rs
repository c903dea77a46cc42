// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Balanced ordered map and set with persistent node handles.
//!
//! An AVL tree stored in an arena of slots addressed by [`NodeId`]. Slot 0
//! is the header sentinel: its parent link points at the root and its
//! reserved balance state doubles as the stop condition for in-order
//! stepping. Rebalancing rewrites relations but never moves a node between
//! slots, so a `NodeId` stays valid until its node is removed.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ AvlTree                                       │
//! ├───────────────────────────────────────────────┤
//! │ nodes: Vec<Node>     (slot 0 = header)        │
//! │ free:  Vec<NodeId>   (recycled slots)         │
//! │ count                                         │
//! └───────────────────────────────────────────────┘
//!        header.parent ──► root ──► left/right/parent links
//! ```
//!
//! ## Operations
//!
//! - **Search**: O(log n) descent; `search_nearby` starts from a hint and
//!   costs O(distance) when the hint is close
//! - **Insert/Remove**: O(log n) with balance-tag rebalancing
//! - **Step**: `next_node`/`prev_node` amortised O(1) via parent links
//!
//! ## Example Usage
//!
//! ```rust
//! use reedmem::avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! let node = tree.insert(2, "two")?;
//! tree.insert(1, "one")?;
//! tree.insert(3, "three")?;
//!
//! assert_eq!(tree.get(&2), Some(&"two"));
//! assert_eq!(tree.key(tree.next_node(node).unwrap()), &3);
//!
//! let keys: Vec<i32> = tree.keys().copied().collect();
//! assert_eq!(keys, vec![1, 2, 3]);
//! # Ok::<(), reedmem::MemError>(())
//! ```

pub mod iter;
pub mod node;
pub mod search;
pub mod set;
pub mod tree;

#[cfg(test)]
mod iter_test;

// Re-export the tree surface
pub use iter::{Iter, Keys, Prefix, Range, Values};
pub use node::{NodeId, SearchResult};
pub use set::AvlSet;
pub use tree::AvlTree;
