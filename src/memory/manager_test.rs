// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for the memory manager.

#[cfg(test)]
mod tests {
    use crate::error::MemError;
    use crate::memory::{MemoryManager, Segment};

    fn assert_valid(mm: &MemoryManager, context: &str) {
        if let Err(e) = mm.check_invariants_detailed() {
            panic!("invariants violated after {}: {}", context, e);
        }
    }

    fn free_list(mm: &MemoryManager) -> Vec<(u64, u64)> {
        mm.free_segments().map(|s| (s.address, s.length)).collect()
    }

    #[test]
    fn test_new_manager_is_empty() {
        let mm = MemoryManager::new();
        assert_eq!(mm.capacity(), 0);
        assert_eq!(mm.total_free(), 0);
        assert_eq!(mm.total_allocated(), 0);
        assert_eq!(mm.allocated_segments().count(), 0);
        assert_valid(&mm, "construction");
    }

    #[test]
    fn test_alloc_zero_rejected() {
        let mut mm = MemoryManager::new();
        assert!(matches!(
            mm.alloc(0),
            Err(MemError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_sequential_allocs_extend_capacity() {
        let mut mm = MemoryManager::new();
        assert_eq!(mm.alloc(100).unwrap(), 0);
        assert_eq!(mm.alloc(50).unwrap(), 100);
        assert_eq!(mm.alloc(30).unwrap(), 150);
        assert_eq!(mm.capacity(), 180);
        assert_eq!(mm.total_free(), 0);
        assert_eq!(mm.total_allocated(), 180);
        assert_valid(&mm, "three allocs");
    }

    #[test]
    fn test_alloc_free_alloc_sequence() {
        // The reference walk-through: carve, free the middle, refill.
        let mut mm = MemoryManager::new();
        assert_eq!(mm.alloc(100).unwrap(), 0);
        assert_eq!(mm.alloc(50).unwrap(), 100);
        assert_eq!(mm.alloc(30).unwrap(), 150);

        mm.free(100, 50).unwrap();
        assert_eq!(mm.capacity(), 180);
        assert_eq!(mm.total_free(), 50);
        assert_eq!(free_list(&mm), vec![(100, 50)]);
        assert_valid(&mm, "free middle");

        // Best fit reuses the hole and leaves the remainder free.
        assert_eq!(mm.alloc(40).unwrap(), 100);
        assert_eq!(mm.total_free(), 10);
        assert_eq!(free_list(&mm), vec![(140, 10)]);
        assert_valid(&mm, "refill");

        mm.free(0, 100).unwrap();
        assert_eq!(free_list(&mm), vec![(0, 100), (140, 10)]);
        assert_eq!(mm.total_free(), 110);
        assert_valid(&mm, "free head");

        // Freeing the tail merges with (140, 10) and trims capacity.
        mm.free(150, 30).unwrap();
        assert_eq!(mm.capacity(), 140);
        assert_eq!(mm.total_free(), 100);
        assert_eq!(free_list(&mm), vec![(0, 100)]);
        assert_valid(&mm, "tail trim");
    }

    #[test]
    fn test_free_past_capacity_is_bad_free() {
        let mut mm = MemoryManager::new();
        mm.alloc(100).unwrap();
        assert!(matches!(
            mm.free(90, 20),
            Err(MemError::BadFree { .. })
        ));
        assert!(matches!(
            mm.free(200, 10),
            Err(MemError::BadFree { .. })
        ));
        assert_valid(&mm, "bad frees");
    }

    #[test]
    fn test_free_zero_length_rejected() {
        let mut mm = MemoryManager::new();
        mm.alloc(10).unwrap();
        assert!(matches!(
            mm.free(0, 0),
            Err(MemError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_double_free_detection() {
        let mut mm = MemoryManager::new();
        mm.alloc(100).unwrap();
        mm.alloc(20).unwrap(); // keeps the tail allocated
        mm.free(0, 100).unwrap();

        // Inside already-free memory.
        assert!(matches!(
            mm.free(50, 10),
            Err(MemError::DoubleFree { .. })
        ));
        // Exactly at a free segment's base.
        assert!(matches!(
            mm.free(0, 100),
            Err(MemError::DoubleFree { .. })
        ));
        // Straddling the free/allocated boundary.
        assert!(matches!(
            mm.free(90, 20),
            Err(MemError::DoubleFree { .. })
        ));
        assert_eq!(mm.total_free(), 100);
        assert_valid(&mm, "double frees");
    }

    #[test]
    fn test_partial_free_from_allocated_block_is_legal() {
        let mut mm = MemoryManager::new();
        mm.alloc(100).unwrap();
        mm.alloc(10).unwrap();

        // [20, 30) is allocated and nowhere near free memory.
        mm.free(20, 10).unwrap();
        assert_eq!(free_list(&mm), vec![(20, 10)]);
        assert_valid(&mm, "partial free");
    }

    #[test]
    fn test_free_merges_both_neighbours() {
        let mut mm = MemoryManager::new();
        mm.alloc(100).unwrap();
        mm.alloc(10).unwrap(); // guard so the tail stays allocated
        mm.free(10, 20).unwrap();
        mm.free(50, 20).unwrap();
        assert_eq!(free_list(&mm), vec![(10, 20), (50, 20)]);

        // [30, 50) bridges the two free segments.
        mm.free(30, 20).unwrap();
        assert_eq!(free_list(&mm), vec![(10, 60)]);
        assert_eq!(mm.total_free(), 60);
        assert_valid(&mm, "bridge merge");
    }

    #[test]
    fn test_free_merges_prev_only_and_next_only() {
        let mut mm = MemoryManager::new();
        mm.alloc(100).unwrap();
        mm.alloc(10).unwrap();

        mm.free(10, 10).unwrap();
        mm.free(20, 10).unwrap(); // extends the previous segment
        assert_eq!(free_list(&mm), vec![(10, 20)]);

        mm.free(60, 10).unwrap();
        mm.free(50, 10).unwrap(); // extends the next segment backwards
        assert_eq!(free_list(&mm), vec![(10, 20), (50, 20)]);
        assert_eq!(mm.total_free(), 40);
        assert_valid(&mm, "one-sided merges");
    }

    #[test]
    fn test_best_fit_prefers_smallest_then_lowest_address() {
        let mut mm = MemoryManager::new();
        mm.alloc(200).unwrap();
        mm.alloc(10).unwrap();
        mm.free(0, 30).unwrap(); // (0, 30)
        mm.free(50, 20).unwrap(); // (50, 20)
        mm.free(100, 20).unwrap(); // (100, 20)

        // Smallest segment that fits 15 is a 20-byte one; the lower
        // address wins the tie.
        assert_eq!(mm.alloc(15).unwrap(), 50);
        assert_eq!(free_list(&mm), vec![(0, 30), (65, 5), (100, 20)]);
        assert_valid(&mm, "best fit");
    }

    #[test]
    fn test_exact_fit_removes_segment() {
        let mut mm = MemoryManager::new();
        mm.alloc(100).unwrap();
        mm.alloc(10).unwrap();
        mm.free(40, 25).unwrap();

        assert_eq!(mm.alloc(25).unwrap(), 40);
        assert_eq!(mm.total_free(), 0);
        assert_eq!(free_list(&mm), vec![]);
        assert_valid(&mm, "exact fit");
    }

    #[test]
    fn test_alloc_free_round_trip_restores_state() {
        let mut mm = MemoryManager::new();
        mm.alloc(64).unwrap();
        mm.alloc(32).unwrap();
        mm.free(16, 8).unwrap();

        let capacity = mm.capacity();
        let total_free = mm.total_free();
        let before = free_list(&mm);

        let addr = mm.alloc(8).unwrap();
        mm.free(addr, 8).unwrap();

        assert_eq!(mm.capacity(), capacity);
        assert_eq!(mm.total_free(), total_free);
        assert_eq!(free_list(&mm), before);
        assert_valid(&mm, "round trip");
    }

    #[test]
    fn test_load_rebuilds_from_allocated_segments() {
        let mut mm = MemoryManager::new();
        mm.load(vec![
            Segment::new(0, 50),
            Segment::new(70, 30),
            Segment::new(200, 100),
        ])
        .unwrap();

        assert_eq!(mm.capacity(), 300);
        assert_eq!(mm.total_free(), 120);
        assert_eq!(free_list(&mm), vec![(50, 20), (100, 100)]);
        let allocated: Vec<Segment> = mm.allocated_segments().collect();
        assert_eq!(
            allocated,
            vec![
                Segment::new(0, 50),
                Segment::new(70, 30),
                Segment::new(200, 100),
            ]
        );
        assert_valid(&mm, "load");
    }

    #[test]
    fn test_load_replaces_previous_state() {
        let mut mm = MemoryManager::new();
        mm.alloc(999).unwrap();
        mm.load(vec![Segment::new(10, 10)]).unwrap();
        assert_eq!(mm.capacity(), 20);
        assert_eq!(mm.total_free(), 10);
        assert_eq!(free_list(&mm), vec![(0, 10)]);
        assert_valid(&mm, "reload");
    }

    #[test]
    fn test_load_rejects_bad_input() {
        let mut mm = MemoryManager::new();
        assert!(mm
            .load(vec![Segment::new(0, 10), Segment::new(5, 10)])
            .is_err());
        assert!(mm.load(vec![Segment::new(0, 0)]).is_err());
        assert!(mm
            .load(vec![Segment::new(10, 5), Segment::new(0, 5)])
            .is_err());
    }

    #[test]
    fn test_load_round_trip_via_serialization_surface() {
        let mut mm = MemoryManager::new();
        mm.alloc(100).unwrap();
        mm.alloc(50).unwrap();
        mm.alloc(30).unwrap();
        mm.free(100, 50).unwrap();

        let snapshot: Vec<Segment> = mm.allocated_segments().collect();
        let mut restored = MemoryManager::new();
        restored.load(snapshot).unwrap();

        assert_eq!(restored.capacity(), mm.capacity());
        assert_eq!(restored.total_free(), mm.total_free());
        assert_eq!(free_list(&restored), free_list(&mm));
        assert_valid(&restored, "snapshot restore");
    }

    #[test]
    fn test_clear_with_reports_allocated_in_order() {
        let mut mm = MemoryManager::new();
        mm.load(vec![Segment::new(0, 50), Segment::new(70, 30)])
            .unwrap();

        let mut reported = Vec::new();
        mm.clear_with(|segment| reported.push((segment.address, segment.length)));

        assert_eq!(reported, vec![(0, 50), (70, 30)]);
        assert_eq!(mm.capacity(), 0);
        assert_eq!(mm.total_free(), 0);
        assert_valid(&mm, "clear");
    }

    #[test]
    fn test_allocated_segments_with_free_head() {
        let mut mm = MemoryManager::new();
        mm.alloc(100).unwrap();
        mm.alloc(10).unwrap();
        mm.free(0, 40).unwrap();

        let allocated: Vec<Segment> = mm.allocated_segments().collect();
        assert_eq!(allocated, vec![Segment::new(40, 70)]);
    }

    #[test]
    fn test_churn_keeps_invariants() {
        let mut mm = MemoryManager::new();
        let mut live: Vec<(u64, u64)> = Vec::new();
        let mut state = 0x853C49E6748FEA9Bu64;

        for step in 0..2000u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let length = state % 256 + 1;

            if state & 3 != 0 || live.is_empty() {
                let address = mm.alloc(length).unwrap();
                live.push((address, length));
            } else {
                let pick = (state >> 8) as usize % live.len();
                let (address, length) = live.swap_remove(pick);
                mm.free(address, length).unwrap();
            }
            if step % 100 == 0 {
                assert_valid(&mm, "churn step");
            }
        }
        let allocated: u64 = live.iter().map(|(_, l)| l).sum();
        assert_eq!(mm.total_allocated(), allocated);
        assert_valid(&mm, "churn end");
    }
}
