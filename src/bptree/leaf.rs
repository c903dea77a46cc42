// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Leaf storage and the location handle.

use crate::avl::NodeId;

/// Stable handle to one leaf slot.
pub type LeafId = u32;

/// One leaf: a sorted entry array plus its outer-index back reference.
pub(crate) struct Leaf<K, V> {
    /// Strictly increasing entries, at most `order` of them.
    pub entries: Vec<(K, V)>,

    /// The outer AVL node whose key mirrors `entries[0].0`.
    pub node: NodeId,
}

impl<K, V> Leaf<K, V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Position of an entry or of a prospective insertion point.
///
/// `index >= 0` identifies the entry `entries[index]` of `leaf`. A negative
/// `index` encodes the insertion position as its bitwise complement: the
/// key is absent and would be inserted at `!index`.
///
/// A location is a snapshot: structural mutation of the map (including
/// `optimize`) may invalidate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Leaf holding (or destined to hold) the key.
    pub leaf: LeafId,

    /// Entry index, or the bitwise complement of the insertion index.
    pub index: i32,
}

impl Location {
    /// Whether the location names a present entry.
    pub fn found(&self) -> bool {
        self.index >= 0
    }

    /// Entry index of a present entry.
    pub fn entry_index(&self) -> usize {
        self.index as usize
    }

    /// Insertion position encoded by a not-found location.
    pub fn insertion_index(&self) -> usize {
        !self.index as usize
    }

    /// The bitwise complement of this location's index.
    pub fn complement(&self) -> Location {
        Location {
            leaf: self.leaf,
            index: !self.index,
        }
    }
}
