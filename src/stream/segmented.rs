// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Chunked, sparse, seekable byte stream.

use crate::error::{MemError, MemResult};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Default chunk size (128 KiB), comfortably above large-object thresholds.
const DEFAULT_CHUNK_SIZE: usize = 1 << 17;

/// The chunk-slot array never shrinks below this many slots.
const MIN_CHUNK_SLOTS: usize = 8;

/// Seekable byte stream over an array of fixed-size chunks.
///
/// Positions are addressed by shift/mask: the chunk index is
/// `position >> chunk_shift` and the intra-chunk offset is
/// `position & (chunk_size - 1)`. The slot array doubles on overflow and
/// halves on shrink, and a slot holds `None` until the first write touches
/// its chunk.
///
/// ## Example Usage
///
/// ```rust
/// use reedmem::stream::SegmentedStream;
/// use std::io::{Read, Seek, SeekFrom, Write};
///
/// let mut stream = SegmentedStream::new();
/// stream.seek(SeekFrom::Start(1_000_000))?;
/// stream.write_all(&[1, 2, 3])?;
/// assert_eq!(stream.len(), 1_000_003);
///
/// stream.seek(SeekFrom::Start(0))?;
/// let mut first = [0u8; 4];
/// stream.read_exact(&mut first)?;
/// assert_eq!(first, [0, 0, 0, 0]);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct SegmentedStream {
    /// Chunk slots; `None` until the chunk is materialised by a write.
    chunks: Vec<Option<Box<[u8]>>>,

    /// Chunk size in bytes (power of two).
    chunk_size: usize,

    /// log2 of the chunk size.
    chunk_shift: u32,

    /// Current read/write position; may exceed `length`.
    position: u64,

    /// Logical length in bytes.
    length: u64,
}

impl SegmentedStream {
    /// Create a stream with the default chunk size.
    pub fn new() -> Self {
        // Default size is a power of two, so the constructor cannot fail.
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE).unwrap()
    }

    /// Create a stream with an explicit chunk size.
    ///
    /// ## Input
    /// - `chunk_size`: chunk size in bytes; must be a nonzero power of two
    ///
    /// ## Error Conditions
    /// - `InvalidArgument` when `chunk_size` is zero or not a power of two
    pub fn with_chunk_size(chunk_size: usize) -> MemResult<Self> {
        if chunk_size == 0 || !chunk_size.is_power_of_two() {
            return Err(MemError::InvalidArgument {
                argument: "chunk_size".to_string(),
                reason: format!("must be a nonzero power of two, got {}", chunk_size),
            });
        }
        Ok(Self {
            chunks: Vec::new(),
            chunk_size,
            chunk_shift: chunk_size.trailing_zeros(),
            position: 0,
            length: 0,
        })
    }

    /// Logical length in bytes.
    pub fn len(&self) -> u64 {
        self.length
    }

    /// Whether the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Current position. May lie past the logical length.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes addressable without growing the slot array.
    pub fn capacity(&self) -> u64 {
        self.chunks.len() as u64 * self.chunk_size as u64
    }

    /// Configured chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Set the logical length.
    ///
    /// Growing leaves the new range sparse (it reads back as zeros);
    /// shrinking releases trailing chunks, zeroes the cut chunk's tail so a
    /// later regrow still reads zeros, and halves the slot array while more
    /// than half of it is unused (floor of 8 slots). The position is left
    /// untouched either way.
    pub fn set_length(&mut self, length: u64) {
        if length < self.length {
            let needed = (length.div_ceil(self.chunk_size as u64)) as usize;
            for slot in self.chunks.iter_mut().skip(needed) {
                *slot = None;
            }
            let cut = (length & (self.chunk_size as u64 - 1)) as usize;
            if cut != 0 {
                if let Some(Some(chunk)) = self.chunks.get_mut(needed - 1) {
                    chunk[cut..].fill(0);
                }
            }
            while self.chunks.len() > MIN_CHUNK_SLOTS && self.chunks.len() / 2 >= needed {
                self.chunks.truncate(self.chunks.len() / 2);
            }
        }
        self.length = length;
    }

    /// Copy the logical contents into one contiguous vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.length as usize];
        let mut pos = 0u64;
        while pos < self.length {
            let index = (pos >> self.chunk_shift) as usize;
            let offset = (pos & (self.chunk_size as u64 - 1)) as usize;
            let take = (self.chunk_size - offset).min((self.length - pos) as usize);
            if let Some(Some(chunk)) = self.chunks.get(index) {
                out[pos as usize..pos as usize + take]
                    .copy_from_slice(&chunk[offset..offset + take]);
            }
            pos += take as u64;
        }
        out
    }

    /// Grow the slot array (doubling) until `index` is addressable.
    fn ensure_slot(&mut self, index: usize) {
        if index < self.chunks.len() {
            return;
        }
        let mut target = self.chunks.len().max(MIN_CHUNK_SLOTS);
        while target <= index {
            target *= 2;
        }
        self.chunks.resize_with(target, || None);
    }

    /// Materialised, writable view of one chunk.
    fn chunk_mut(&mut self, index: usize) -> &mut [u8] {
        self.ensure_slot(index);
        let size = self.chunk_size;
        self.chunks[index].get_or_insert_with(|| vec![0u8; size].into_boxed_slice())
    }
}

impl Default for SegmentedStream {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SegmentedStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentedStream")
            .field("length", &self.length)
            .field("position", &self.position)
            .field("chunk_size", &self.chunk_size)
            .field("slots", &self.chunks.len())
            .finish()
    }
}

impl Read for SegmentedStream {
    /// Read up to `buf.len()` bytes, clipped to the logical length.
    ///
    /// Sparse ranges read back as zeros. A position at or past the logical
    /// length reads 0 bytes.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.length.saturating_sub(self.position);
        let total = (buf.len() as u64).min(available) as usize;

        let mut done = 0;
        while done < total {
            let index = (self.position >> self.chunk_shift) as usize;
            let offset = (self.position & (self.chunk_size as u64 - 1)) as usize;
            let take = (self.chunk_size - offset).min(total - done);

            match self.chunks.get(index) {
                Some(Some(chunk)) => {
                    buf[done..done + take].copy_from_slice(&chunk[offset..offset + take]);
                }
                _ => buf[done..done + take].fill(0),
            }
            self.position += take as u64;
            done += take;
        }
        Ok(total)
    }
}

impl Write for SegmentedStream {
    /// Write all of `buf` at the current position, growing the length.
    ///
    /// Writing past the logical length materialises only the touched
    /// chunks; any skipped-over gap stays sparse and reads back as zeros.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let mut done = 0;
        while done < buf.len() {
            let index = (self.position >> self.chunk_shift) as usize;
            let offset = (self.position & (self.chunk_size as u64 - 1)) as usize;
            let take = (self.chunk_size - offset).min(buf.len() - done);

            self.chunk_mut(index)[offset..offset + take].copy_from_slice(&buf[done..done + take]);
            self.position += take as u64;
            done += take;
        }
        self.length = self.length.max(self.position);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for SegmentedStream {
    /// Move the position; it may land past the logical length.
    ///
    /// ## Error Conditions
    /// - `InvalidInput` when the target position is before byte 0
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target: i128 = match pos {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::Current(delta) => self.position as i128 + delta as i128,
            SeekFrom::End(delta) => self.length as i128 + delta as i128,
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before byte 0",
            ));
        }
        self.position = target as u64;
        Ok(self.position)
    }
}
