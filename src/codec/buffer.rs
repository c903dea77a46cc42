// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Growable byte buffer with an explicit logical length.

use crate::codec::types::Codec;

/// Growable byte buffer that encoders append into.
///
/// Thin wrapper over `Vec<u8>` whose length is the logical length; capacity
/// grows by doubling underneath. `set_len` can both truncate and
/// zero-extend, which is what distinguishes it from a plain `Vec` in the
/// codec contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty buffer with pre-reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Logical length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Set the logical length.
    ///
    /// Shrinking discards the tail; growing zero-fills the newly reachable
    /// range.
    pub fn set_len(&mut self, len: usize) {
        self.data.resize(len, 0);
    }

    /// Truncate to `len` bytes (no-op if already shorter).
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Reset the logical length to zero, keeping capacity.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Append a single byte.
    pub fn push(&mut self, byte: u8) {
        self.data.push(byte);
    }

    /// Append raw bytes.
    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append an encodable value.
    pub fn put<T: Codec>(&mut self, value: &T) {
        value.encode(self);
    }

    /// View the logical contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the underlying bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}
