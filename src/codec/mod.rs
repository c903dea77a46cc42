// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Binary codec for primitive element types.
//!
//! Fixed little-endian encodings of scalar types plus raw encodings of
//! strings and byte arrays, written into a growable [`ByteBuffer`]. The
//! codec is a leaf utility: it never writes length prefixes, because the
//! layers above it (log records, leaf pages, caller formats) frame their
//! own fields.
//!
//! ## Element kinds and widths
//!
//! | Kind | Width (bytes) |
//! |---|---|
//! | `bool`, `u8`, `i8` | 1 |
//! | `u16`, `i16` | 2 |
//! | `u32`, `i32`, `f32` | 4 |
//! | `u64`, `i64`, `f64` | 8 |
//! | `DateTime<Utc>`, `Duration` | 12 |
//! | `Decimal`, `Uuid` | 16 |
//! | `String`, `Vec<u8>` | variable (raw, no prefix) |
//!
//! ## Example Usage
//!
//! ```rust
//! use reedmem::codec::{ByteBuffer, Codec};
//!
//! let mut buf = ByteBuffer::new();
//! 0x1234u16.encode(&mut buf);
//! assert_eq!(buf.as_slice(), &[0x34, 0x12]);
//!
//! let back = u16::decode(buf.as_slice())?;
//! assert_eq!(back, 0x1234);
//! # Ok::<(), reedmem::MemError>(())
//! ```

pub mod buffer;
pub mod extended;
pub mod scalar;
pub mod types;

#[cfg(test)]
mod extended_test;

// Re-export the codec surface
pub use buffer::ByteBuffer;
pub use types::Codec;
