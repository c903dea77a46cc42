// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Memory-manager integration tests.
//!
//! Random alloc/free churn against a shadow model plus snapshot/restore
//! through the serialization surface.

mod test_utils;

use reedmem::memory::{MemoryManager, Segment};
use test_utils::XorShift;

fn assert_valid(mm: &MemoryManager, context: &str) {
    if let Err(e) = mm.check_invariants_detailed() {
        panic!("invariants violated after {}: {}", context, e);
    }
}

#[test]
fn test_long_churn_against_model() {
    let mut rng = XorShift::new(777);
    let mut mm = MemoryManager::new();
    let mut live: Vec<(u64, u64)> = Vec::new();

    for step in 0..10_000u64 {
        let roll = rng.below(100);
        if roll < 60 || live.is_empty() {
            let length = rng.below(4096) + 1;
            let address = mm.alloc(length).unwrap();
            // The fresh range never overlaps a live one.
            for &(a, l) in &live {
                assert!(address + length <= a || a + l <= address);
            }
            live.push((address, length));
        } else {
            let pick = rng.below(live.len() as u64) as usize;
            let (address, length) = live.swap_remove(pick);
            mm.free(address, length).unwrap();
        }

        if step % 500 == 0 {
            assert_valid(&mm, "churn step");
            let allocated: u64 = live.iter().map(|&(_, l)| l).sum();
            assert_eq!(mm.total_allocated(), allocated);
        }
    }

    // Free everything; the space collapses entirely.
    while let Some((address, length)) = live.pop() {
        mm.free(address, length).unwrap();
    }
    assert_eq!(mm.total_allocated(), 0);
    assert_eq!(mm.capacity(), 0);
    assert_eq!(mm.total_free(), 0);
    assert_valid(&mm, "full drain");
}

#[test]
fn test_snapshot_restore_round_trip() {
    let mut rng = XorShift::new(31337);
    let mut mm = MemoryManager::new();
    let mut live: Vec<(u64, u64)> = Vec::new();

    for _ in 0..500 {
        if rng.below(3) != 0 || live.is_empty() {
            let length = rng.below(512) + 1;
            let address = mm.alloc(length).unwrap();
            live.push((address, length));
        } else {
            let pick = rng.below(live.len() as u64) as usize;
            let (address, length) = live.swap_remove(pick);
            mm.free(address, length).unwrap();
        }
    }
    assert_valid(&mm, "setup churn");

    let snapshot: Vec<Segment> = mm.allocated_segments().collect();
    let mut restored = MemoryManager::new();
    restored.load(snapshot.clone()).unwrap();

    assert_eq!(restored.capacity(), mm.capacity());
    assert_eq!(restored.total_free(), mm.total_free());
    assert_eq!(restored.total_allocated(), mm.total_allocated());
    let free_a: Vec<Segment> = mm.free_segments().collect();
    let free_b: Vec<Segment> = restored.free_segments().collect();
    assert_eq!(free_a, free_b);
    assert_valid(&restored, "restore");

    // The complement of the complement is the original snapshot.
    let snapshot_again: Vec<Segment> = restored.allocated_segments().collect();
    assert_eq!(snapshot, snapshot_again);
}

#[test]
fn test_allocations_prefer_holes_over_growth() {
    let mut mm = MemoryManager::new();
    let mut addresses = Vec::new();
    for _ in 0..64 {
        addresses.push(mm.alloc(64).unwrap());
    }
    let capacity = mm.capacity();

    // Free every other block, then reallocate the same sizes: capacity
    // must not grow.
    for chunk in addresses.chunks(2) {
        mm.free(chunk[0], 64).unwrap();
    }
    for _ in 0..32 {
        mm.alloc(64).unwrap();
    }
    assert_eq!(mm.capacity(), capacity);
    assert_eq!(mm.total_free(), 0);
    assert_valid(&mm, "hole refill");
}
