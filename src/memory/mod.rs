// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Virtual-address allocator over the ordered containers.
//!
//! Two cooperating indices track the free space of a byte-addressed
//! virtual region: the address-ordered B+-map is the authoritative free
//! list, and a (length, address) AVL set accelerates best-fit search.
//! Capacity grows when nothing fits and shrinks when frees reach the end;
//! the last byte below capacity is always allocated.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │ MemoryManager                                      │
//! ├────────────────────────────────────────────────────┤
//! │ by_addr: BPlusMap<u64, u64>   address → length     │
//! │ by_len:  AvlSet<(u64, u64)>   (length, address)    │
//! │ capacity, total_free                               │
//! └────────────────────────────────────────────────────┘
//!   0 ──[alloc]──[free]──[alloc]──[alloc]── capacity
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use reedmem::memory::MemoryManager;
//!
//! let mut mm = MemoryManager::new();
//! let a = mm.alloc(100)?;
//! let b = mm.alloc(50)?;
//! assert_eq!((a, b), (0, 100));
//!
//! mm.free(a, 100)?;
//! assert_eq!(mm.total_free(), 100);
//! assert_eq!(mm.alloc(40)?, 0); // best fit reuses the hole
//! # Ok::<(), reedmem::MemError>(())
//! ```

pub mod manager;
pub mod segment;

#[cfg(test)]
mod manager_test;
#[cfg(test)]
mod segment_test;

pub use manager::{AllocatedIter, FreeIter, MemoryManager};
pub use segment::Segment;
