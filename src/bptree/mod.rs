// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Ordered map over sorted-array leaves indexed by an AVL tree.
//!
//! Each leaf owns a sorted array of up to `order` entries; the outer AVL
//! tree maps each leaf's first key to the leaf. Lookups are two-level: an
//! outer tree search picks the leaf, a binary search inside its array picks
//! the entry. Compared to a node-per-entry tree this trades pointer chasing
//! for array copies, which is the right trade for scan-heavy workloads.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ BPlusMap                                             │
//! ├──────────────────────────────────────────────────────┤
//! │ index:  AvlTree<K, LeafId>   (first key → leaf)      │
//! │ leaves: Vec<Option<Leaf>>    (sorted entry arrays)   │
//! │ order:  entries per leaf (≥ 5)                       │
//! └──────────────────────────────────────────────────────┘
//!      [1 4 9] → [12 17 20 31] → [40 58] → ...
//! ```
//!
//! ## Fill discipline
//!
//! Inserting into a full leaf first sheds one entry to a neighbour with
//! room, then creates a missing neighbour, and only then splits: the two
//! full leaves redistribute into three of sizes (T, T, 2C−2T) with
//! T = ⌊2C/3⌋, the surplus landing in the new last leaf. Deleting below
//! ⌊C/2⌋ merges into a neighbour or splits the residue across both. The
//! result is a best-effort fill of 2/3 after inserts and 1/2 after
//! deletes without per-step hard guarantees.
//!
//! ## Example Usage
//!
//! ```rust
//! use reedmem::bptree::BPlusMap;
//!
//! let mut map = BPlusMap::with_order(5)?;
//! for i in 0..100 {
//!     map.insert(i, i * 2)?;
//! }
//! assert_eq!(map.get(&40), Some(&80));
//!
//! let window: Vec<i32> = map.range(&10, &14, true, true)?.map(|(k, _)| *k).collect();
//! assert_eq!(window, vec![10, 11, 12, 13, 14]);
//! # Ok::<(), reedmem::MemError>(())
//! ```

pub mod append;
pub mod iter;
pub mod leaf;
pub mod tree;

#[cfg(test)]
mod iter_test;
#[cfg(test)]
mod tree_test;

// Re-export the map surface
pub use append::Appender;
pub use iter::{Items, Keys, RangeIter, Values};
pub use leaf::{LeafId, Location};
pub use tree::BPlusMap;
