// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Segmented byte stream.
//!
//! A seekable in-memory stream that stores its contents in fixed-size
//! power-of-two chunks instead of one contiguous allocation. Seeking is
//! O(1) shift/mask arithmetic, growth never copies existing data, and the
//! stream may be sparse: chunks materialise on first write and read back
//! as zeros until then.

pub mod segmented;

#[cfg(test)]
mod segmented_test;

pub use segmented::SegmentedStream;
