// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Best-fit free-list allocator over a 2^63 byte virtual space.

use crate::avl::AvlSet;
use crate::bptree::{BPlusMap, Items, Location};
use crate::error::{MemError, MemResult};
use crate::memory::segment::Segment;
use crate::metrics::{Metric, MetricUnit, MetricsCollector};
use std::cmp::Ordering;
use std::time::Instant;

/// Addresses stay below 2^63.
const MAX_CAPACITY: u64 = (1u64 << 63) - 1;

/// Free-list allocator for arbitrary-length byte ranges.
///
/// `by_addr` (address → length) is the authoritative free list; `by_len`
/// is a redundant (length, address) index that makes best-fit search one
/// ceiling lookup. Freed ranges merge with adjacent free neighbours, and
/// a free range reaching the end of the space shrinks capacity instead of
/// staying on the free list: the last byte below `capacity` is always
/// allocated.
pub struct MemoryManager {
    /// Authoritative free list: base address → length.
    by_addr: BPlusMap<u64, u64>,

    /// Best-fit index: (length, address), lowest address first among
    /// equal lengths.
    by_len: AvlSet<(u64, u64)>,

    /// One past the last allocated byte.
    capacity: u64,

    /// Sum of the free-list lengths.
    total_free: u64,
}

impl MemoryManager {
    /// Create an empty manager (capacity 0).
    pub fn new() -> Self {
        Self {
            by_addr: BPlusMap::new(),
            by_len: AvlSet::new(),
            capacity: 0,
            total_free: 0,
        }
    }

    /// One past the last allocated byte.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Bytes on the free list.
    pub fn total_free(&self) -> u64 {
        self.total_free
    }

    /// Bytes currently allocated.
    pub fn total_allocated(&self) -> u64 {
        self.capacity - self.total_free
    }

    /// Allocate `length` bytes, best fit.
    ///
    /// Picks the smallest free segment that fits (lowest address among
    /// equals), carves from its front, and returns the remainder to the
    /// free list. When nothing fits the space grows at the end.
    ///
    /// ## Output
    /// - `Ok(address)`: base of the allocated range
    ///
    /// ## Error Conditions
    /// - `InvalidArgument` on zero length or when capacity would pass 2^63
    pub fn alloc(&mut self, length: u64) -> MemResult<u64> {
        if length == 0 {
            return Err(MemError::InvalidArgument {
                argument: "length".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let probe = self.by_len.search_ge(&(length, 0));
        let node = match (probe.node, probe.diff) {
            (Some(node), Ordering::Equal | Ordering::Less) => node,
            _ => {
                // Nothing fits: extend the space.
                let address = self.capacity;
                let grown = address.checked_add(length).filter(|end| *end <= MAX_CAPACITY);
                match grown {
                    Some(end) => {
                        self.capacity = end;
                        return Ok(address);
                    }
                    None => {
                        return Err(MemError::InvalidArgument {
                            argument: "length".to_string(),
                            reason: "capacity would exceed 2^63 - 1".to_string(),
                        })
                    }
                }
            }
        };

        let (seg_length, seg_address) = *self.by_len.key(node);
        self.by_len.remove_node(node);

        // The by_len entry always mirrors a by_addr entry.
        let loc = self.by_addr.search(&seg_address).unwrap();
        if seg_length == length {
            self.by_addr.remove_at(loc)?;
        } else {
            self.by_addr.remove_at(loc)?;
            let rest_address = seg_address + length;
            let rest_length = seg_length - length;
            self.by_addr.insert(rest_address, rest_length)?;
            self.by_len.insert((rest_length, rest_address))?;
        }
        self.total_free -= length;
        Ok(seg_address)
    }

    /// Return a previously allocated range to the free list.
    ///
    /// Merges with adjacent free neighbours; when the resulting free
    /// range reaches the end of the space, capacity shrinks instead of
    /// keeping a tail segment.
    ///
    /// ## Error Conditions
    /// - `InvalidArgument` on zero length
    /// - `BadFree` when the range extends past capacity
    /// - `DoubleFree` when the range overlaps free memory
    pub fn free(&mut self, address: u64, length: u64) -> MemResult<()> {
        if length == 0 {
            return Err(MemError::InvalidArgument {
                argument: "length".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        let end = match address.checked_add(length) {
            Some(end) if end <= self.capacity => end,
            _ => {
                return Err(MemError::BadFree {
                    address,
                    length,
                    reason: "range extends past capacity".to_string(),
                })
            }
        };

        // Bracket the range in the free list.
        let (prev, next) = match self.by_addr.search(&address) {
            Some(loc) if loc.found() => {
                return Err(MemError::DoubleFree { address, length });
            }
            Some(miss) => (
                self.neighbour_entry(self.by_addr.location_before_insertion(miss)),
                self.neighbour_entry(self.by_addr.location_at_insertion(miss)),
            ),
            None => (None, None),
        };

        if let Some(prev) = prev {
            if prev.end() > address {
                return Err(MemError::DoubleFree { address, length });
            }
        }
        if let Some(next) = next {
            if end > next.address {
                return Err(MemError::DoubleFree { address, length });
            }
        }

        let merge_prev = prev.map_or(false, |p| p.end() == address);
        let merge_next = next.map_or(false, |n| end == n.address);
        let new_address = if merge_prev { prev.unwrap().address } else { address };
        let new_end = if merge_next { next.unwrap().end() } else { end };

        // A free range reaching the end of the space trims capacity
        // instead of joining the free list. merge_next cannot hold here
        // because no free segment ends at capacity.
        if new_end == self.capacity {
            if let Some(p) = prev.filter(|_| merge_prev) {
                let loc = self.by_addr.search(&p.address).unwrap();
                self.by_addr.remove_at(loc)?;
                self.by_len.remove(&(p.length, p.address));
                self.total_free -= p.length;
            }
            self.capacity = new_address;
            return Ok(());
        }

        match (merge_prev, merge_next) {
            (true, true) => {
                let p = prev.unwrap();
                let n = next.unwrap();
                let next_loc = self.by_addr.search(&n.address).unwrap();
                self.by_addr.remove_at(next_loc)?;
                self.by_len.remove(&(n.length, n.address));
                self.by_len.remove(&(p.length, p.address));

                let combined = p.length + length + n.length;
                let prev_loc = self.by_addr.search(&p.address).unwrap();
                self.by_addr.update_value_at(prev_loc, combined);
                self.by_len.insert((combined, p.address))?;
            }
            (true, false) => {
                let p = prev.unwrap();
                self.by_len.remove(&(p.length, p.address));

                let combined = p.length + length;
                let prev_loc = self.by_addr.search(&p.address).unwrap();
                self.by_addr.update_value_at(prev_loc, combined);
                self.by_len.insert((combined, p.address))?;
            }
            (false, true) => {
                let n = next.unwrap();
                let next_loc = self.by_addr.search(&n.address).unwrap();
                self.by_addr.remove_at(next_loc)?;
                self.by_len.remove(&(n.length, n.address));

                let combined = length + n.length;
                self.by_addr.insert(address, combined)?;
                self.by_len.insert((combined, address))?;
            }
            (false, false) => {
                self.by_addr.insert(address, length)?;
                self.by_len.insert((length, address))?;
            }
        }
        self.total_free += length;
        Ok(())
    }

    /// Rebuild from an ascending run of allocated segments.
    ///
    /// The gaps between consecutive segments become the free list
    /// (appender fast path); capacity becomes the end of the last
    /// segment. Previous state is discarded.
    ///
    /// ## Error Conditions
    /// - `InvalidArgument` on zero-length, overlapping or unsorted input
    pub fn load<I>(&mut self, segments: I) -> MemResult<()>
    where
        I: IntoIterator<Item = Segment>,
    {
        let started = Instant::now();
        self.reset();

        let mut end = 0u64;
        let mut loaded = 0usize;
        {
            let mut appender = self.by_addr.appender();
            for segment in segments {
                if segment.length == 0 {
                    return Err(MemError::InvalidArgument {
                        argument: "segments".to_string(),
                        reason: format!("zero-length segment at {}", segment.address),
                    });
                }
                if segment.address < end || segment.end() > MAX_CAPACITY {
                    return Err(MemError::InvalidArgument {
                        argument: "segments".to_string(),
                        reason: format!(
                            "segment [{}, {}) is out of order or out of range",
                            segment.address,
                            segment.end()
                        ),
                    });
                }
                if segment.address > end {
                    let gap = segment.address - end;
                    appender.add_ordered(end, gap)?;
                    self.by_len.insert((gap, end))?;
                    self.total_free += gap;
                }
                end = segment.end();
                loaded += 1;
            }
        }
        self.capacity = end;

        MetricsCollector::global().record(
            Metric::new(
                "memory_load",
                started.elapsed().as_micros() as f64,
                MetricUnit::Microseconds,
            )
            .with_tag("segments", loaded.to_string()),
        );
        Ok(())
    }

    /// Discard all state.
    pub fn clear(&mut self) {
        self.clear_with(|_| {});
    }

    /// Discard all state, reporting each allocated segment in positional
    /// order first.
    pub fn clear_with(&mut self, mut on_free: impl FnMut(Segment)) {
        let started = Instant::now();
        let allocated: Vec<Segment> = self.allocated_segments().collect();
        let reported = allocated.len();
        for segment in allocated {
            on_free(segment);
        }
        self.reset();

        MetricsCollector::global().record(
            Metric::new(
                "memory_clear",
                started.elapsed().as_micros() as f64,
                MetricUnit::Microseconds,
            )
            .with_tag("segments", reported.to_string()),
        );
    }

    /// Allocated segments from 0 to capacity, the complement of the free
    /// list, in positional order.
    pub fn allocated_segments(&self) -> AllocatedIter<'_> {
        AllocatedIter {
            free: self.by_addr.items(),
            cursor: 0,
            capacity: self.capacity,
            done: false,
        }
    }

    /// Free segments in positional order.
    pub fn free_segments(&self) -> FreeIter<'_> {
        FreeIter {
            inner: self.by_addr.items(),
        }
    }

    /// Verify every allocator invariant.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Verify free-list disjointness, index agreement, the accounting
    /// scalars and the capacity-tail rule, reporting the first violation.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        self.by_addr.check_invariants_detailed()?;
        self.by_len.check_invariants_detailed()?;

        if self.by_len.len() != self.by_addr.len() {
            return Err(format!(
                "by_len holds {} entries, by_addr {}",
                self.by_len.len(),
                self.by_addr.len()
            ));
        }
        let mut sum = 0u64;
        let mut last_end: Option<u64> = None;
        for (&address, &length) in self.by_addr.items() {
            if length == 0 {
                return Err(format!("zero-length free segment at {}", address));
            }
            if let Some(last_end) = last_end {
                if address <= last_end {
                    return Err(format!(
                        "free segment at {} touches the previous one ending at {}",
                        address, last_end
                    ));
                }
            }
            if !self.by_len.contains(&(length, address)) {
                return Err(format!(
                    "free segment [{}, {}) missing from by_len",
                    address,
                    address + length
                ));
            }
            sum += length;
            last_end = Some(address + length);
        }
        if let Some(last_end) = last_end {
            if last_end >= self.capacity {
                return Err(format!(
                    "free segment ends at {} but capacity is {}",
                    last_end, self.capacity
                ));
            }
        }
        if sum != self.total_free {
            return Err(format!(
                "free segments sum to {} but total_free is {}",
                sum, self.total_free
            ));
        }
        if self.total_free > self.capacity {
            return Err("total_free exceeds capacity".to_string());
        }
        Ok(())
    }

    /// Copy out the entry a location helper resolved to.
    fn neighbour_entry(&self, loc: Option<Location>) -> Option<Segment> {
        let (address, length) = self.by_addr.entry_at(loc?)?;
        Some(Segment::new(*address, *length))
    }

    fn reset(&mut self) {
        self.by_addr.clear();
        self.by_len.clear();
        self.capacity = 0;
        self.total_free = 0;
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryManager")
            .field("capacity", &self.capacity)
            .field("total_free", &self.total_free)
            .field("free_segments", &self.by_addr.len())
            .finish()
    }
}

/// Iterator over the allocated complement of the free list.
pub struct AllocatedIter<'a> {
    free: Items<'a, u64, u64>,
    cursor: u64,
    capacity: u64,
    done: bool,
}

impl Iterator for AllocatedIter<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.free.next() {
                Some((&address, &length)) => {
                    let start = self.cursor;
                    self.cursor = address + length;
                    if address > start {
                        return Some(Segment::new(start, address - start));
                    }
                    // A free segment at address 0 has no allocated range
                    // before it.
                }
                None => {
                    self.done = true;
                    if self.capacity > self.cursor {
                        return Some(Segment::new(self.cursor, self.capacity - self.cursor));
                    }
                    return None;
                }
            }
        }
    }
}

/// Iterator over the free list as segments.
pub struct FreeIter<'a> {
    inner: Items<'a, u64, u64>,
}

impl Iterator for FreeIter<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(&address, &length)| Segment::new(address, length))
    }
}
