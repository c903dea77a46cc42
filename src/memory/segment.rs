// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Contiguous byte range of the virtual space.

use serde::{Deserialize, Serialize};

/// A contiguous range of bytes identified by base address and length.
///
/// Serde derives let callers persist allocation snapshots themselves and
/// feed them back through [`MemoryManager::load`](crate::memory::MemoryManager::load).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// First byte of the range.
    pub address: u64,

    /// Length in bytes; never zero.
    pub length: u64,
}

impl Segment {
    /// Create a segment.
    pub fn new(address: u64, length: u64) -> Self {
        Self { address, length }
    }

    /// One past the last byte.
    pub fn end(&self) -> u64 {
        self.address + self.length
    }
}
