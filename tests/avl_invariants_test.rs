// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! AVL invariant integration tests.
//!
//! Verifies the universal tree properties over generated workloads:
//! - stored balance tags match real height differences after every phase
//! - in-order iteration is strictly sorted
//! - the height bound 1.4404·log2(n+2) − 0.3277 holds
//! - prev/next stepping round-trips from every node

mod test_utils;

use reedmem::avl::AvlTree;
use test_utils::{shuffle, XorShift};

fn assert_valid<K: Ord + std::fmt::Debug, V>(tree: &AvlTree<K, V>, context: &str) {
    if let Err(e) = tree.check_invariants_detailed() {
        panic!("invariants violated after {}: {}", context, e);
    }
}

fn avl_depth_bound(count: usize) -> usize {
    (1.4404 * ((count + 2) as f64).log2() - 0.3277).ceil() as usize
}

// ============================================================================
// Ordered insertion scenarios
// ============================================================================

#[test]
fn test_ascending_thousand() {
    let mut tree = AvlTree::new();
    for i in 1..=1000 {
        tree.insert(i, ()).unwrap();
    }
    assert_eq!(tree.len(), 1000);
    assert!(tree.depth() <= 15, "depth {}", tree.depth());
    assert_eq!(tree.key(tree.minimum().unwrap()), &1);
    assert_eq!(tree.key(tree.maximum().unwrap()), &1000);

    let keys: Vec<i32> = tree.keys().copied().collect();
    assert_eq!(keys, (1..=1000).collect::<Vec<_>>());
    assert_valid(&tree, "ascending thousand");
}

#[test]
fn test_descending_thousand() {
    let mut tree = AvlTree::new();
    for i in (1..=1000).rev() {
        tree.insert(i, ()).unwrap();
    }
    assert_eq!(tree.len(), 1000);
    assert!(tree.depth() <= 15, "depth {}", tree.depth());

    let keys: Vec<i32> = tree.keys().copied().collect();
    assert_eq!(keys, (1..=1000).collect::<Vec<_>>());
    assert_valid(&tree, "descending thousand");
}

// ============================================================================
// Random churn
// ============================================================================

#[test]
fn test_random_churn_insert_then_remove_half() {
    let mut rng = XorShift::new(42);
    let count = 20_000usize;

    // Unique pseudo-random 64-bit keys in a fixed order.
    let mut keys: Vec<u64> = (0..count as u64)
        .map(|i| i.wrapping_mul(0x9E3779B97F4A7C15) ^ (i << 7))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    shuffle(&mut keys, &mut rng);
    let count = keys.len();

    let mut tree = AvlTree::new();
    for (step, &key) in keys.iter().enumerate() {
        tree.insert(key, step).unwrap();
        // 1% sample of the full invariant sweep.
        if step % 100 == 0 {
            assert_valid(&tree, "churn insert");
            assert!(tree.depth() <= avl_depth_bound(tree.len()));
        }
    }
    assert_eq!(tree.len(), count);

    shuffle(&mut keys, &mut rng);
    let (to_remove, to_keep) = keys.split_at(count / 2);
    for (step, key) in to_remove.iter().enumerate() {
        assert!(tree.remove(key));
        if step % 100 == 0 {
            assert_valid(&tree, "churn remove");
            assert!(tree.depth() <= avl_depth_bound(tree.len()));
        }
    }

    assert_eq!(tree.len(), count - count / 2);
    for key in to_keep {
        assert!(tree.contains_key(key));
    }
    for key in to_remove {
        assert!(!tree.contains_key(key));
    }
    assert_valid(&tree, "churn end");
}

// ============================================================================
// Structural round trips
// ============================================================================

#[test]
fn test_insert_remove_restores_order_and_depth() {
    let mut rng = XorShift::new(7);
    let mut tree = AvlTree::new();
    for i in 0..512 {
        tree.insert(i * 2, ()).unwrap();
    }

    for _ in 0..200 {
        let probe = rng.below(512) as i32 * 2 + 1; // always absent
        let before: Vec<i32> = tree.keys().copied().collect();
        let depth_before = tree.depth();

        tree.insert(probe, ()).unwrap();
        assert!(tree.remove(&probe));

        let after: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(before, after);
        assert!(tree.depth() <= depth_before.max(avl_depth_bound(tree.len())));
        assert_valid(&tree, "insert+remove");
    }
}

#[test]
fn test_prev_next_round_trip_everywhere() {
    let mut rng = XorShift::new(1234);
    let mut tree = AvlTree::new();
    for _ in 0..1000 {
        let _ = tree.insert(rng.below(1 << 32), ());
    }

    let mut id = tree.minimum().unwrap();
    loop {
        if let Some(prev) = tree.prev_node(id) {
            assert_eq!(tree.next_node(prev), Some(id));
        }
        match tree.next_node(id) {
            Some(next) => {
                assert_eq!(tree.prev_node(next), Some(id));
                id = next;
            }
            None => break,
        }
    }
    assert_eq!(id, tree.maximum().unwrap());
}
