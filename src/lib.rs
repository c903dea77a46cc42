// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! ReedMem - in-memory ordered containers and a virtual-address allocator.
//!
//! High-performance primitives for ordered data and address-space
//! bookkeeping, built to compose: the B+-map layers sorted-array leaves
//! over the AVL tree, and the memory manager drives both as its free-list
//! indices.
//!
//! ## Features
//!
//! - **AVL tree**: ordered map/set with persistent node handles, hinted
//!   search and bidirectional stepping
//! - **B+-map**: sorted-array leaves over the AVL index, with an ordered
//!   appender and a left-packing `optimize`
//! - **Memory manager**: best-fit allocator for a 2^63 byte virtual space
//! - **Segmented stream**: sparse chunked byte stream with O(1) seeks
//! - **MRU cache**: bounded dictionary/set with O(1) LRU eviction
//! - **Codec**: fixed little-endian encodings of the primitive kinds
//! - **Metrics & Observability**: built-in performance monitoring
//!
//! ## Quick Start
//!
//! ```rust
//! use reedmem::bptree::BPlusMap;
//! use reedmem::memory::MemoryManager;
//!
//! let mut map = BPlusMap::new();
//! map.insert("page.title".to_string(), 1)?;
//! assert_eq!(map.get(&"page.title".to_string()), Some(&1));
//!
//! let mut mm = MemoryManager::new();
//! let addr = mm.alloc(4096)?;
//! mm.free(addr, 4096)?;
//! # Ok::<(), reedmem::MemError>(())
//! ```
//!
//! ## Architecture
//!
//! ReedMem is organized into modules:
//!
//! - **avl**: balanced ordered map/set, the foundation
//! - **bptree**: B+-map layered on the AVL index
//! - **memory**: virtual-address allocator over both trees
//! - **stream**: segmented byte stream
//! - **cache**: MRU dictionary and set
//! - **codec**: binary codec for primitive types
//! - **metrics**: performance monitoring and observability
//!
//! All containers are single-threaded: one logical actor at a time, no
//! suspension points, no internal locking outside the metrics collector.

pub mod avl;
pub mod bptree;
pub mod cache;
pub mod codec;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod stream;

#[cfg(test)]
mod error_test;

// Re-export commonly used types
pub use avl::{AvlSet, AvlTree, NodeId, SearchResult};
pub use bptree::{Appender, BPlusMap, LeafId, Location};
pub use cache::{MruDictionary, MruSet};
pub use codec::{ByteBuffer, Codec};
pub use error::{MemError, MemResult};
pub use memory::{MemoryManager, Segment};
pub use metrics::{Metric, MetricUnit, MetricsCollector};
pub use stream::SegmentedStream;
