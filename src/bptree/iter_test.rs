// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for B+-map iteration.

#[cfg(test)]
mod tests {
    use crate::bptree::BPlusMap;

    fn filled(n: i32) -> BPlusMap<i32, i32> {
        let mut map = BPlusMap::with_order(5).unwrap();
        for i in 0..n {
            map.insert(i, i * 10).unwrap();
        }
        map
    }

    #[test]
    fn test_items_cross_leaf_boundaries() {
        let map = filled(23);
        let keys: Vec<i32> = map.items().map(|(k, _)| *k).collect();
        assert_eq!(keys, (0..23).collect::<Vec<_>>());
        let values: Vec<i32> = map.values().copied().collect();
        assert_eq!(values[7], 70);
        assert_eq!(map.keys().count(), 23);
    }

    #[test]
    fn test_items_empty() {
        let map: BPlusMap<i32, ()> = BPlusMap::new();
        assert_eq!(map.items().count(), 0);
    }

    #[test]
    fn test_into_iterator_for_ref() {
        let map = filled(8);
        let mut total = 0;
        for (key, value) in &map {
            assert_eq!(*value, key * 10);
            total += 1;
        }
        assert_eq!(total, 8);
    }

    #[test]
    fn test_range_inclusive() {
        let map = filled(30);
        let keys: Vec<i32> = map
            .range(&7, &19, true, true)
            .unwrap()
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(keys, (7..=19).collect::<Vec<_>>());
    }

    #[test]
    fn test_range_exclusive() {
        let map = filled(30);
        let keys: Vec<i32> = map
            .range(&7, &19, false, false)
            .unwrap()
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(keys, (8..=18).collect::<Vec<_>>());
    }

    #[test]
    fn test_range_bounds_between_keys() {
        let mut map = BPlusMap::with_order(5).unwrap();
        for i in 0..20 {
            map.insert(i * 10, ()).unwrap();
        }
        let keys: Vec<i32> = map
            .range(&15, &87, true, true)
            .unwrap()
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(keys, vec![20, 30, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn test_range_outside_key_space() {
        let map = filled(10);
        assert_eq!(map.range(&50, &90, true, true).unwrap().count(), 0);
        assert_eq!(map.range(&-9, &-1, true, true).unwrap().count(), 0);
        assert_eq!(map.range(&-5, &50, true, true).unwrap().count(), 10);
    }

    #[test]
    fn test_range_empty_map() {
        let map: BPlusMap<i32, ()> = BPlusMap::new();
        assert_eq!(map.range(&0, &10, true, true).unwrap().count(), 0);
    }

    #[test]
    fn test_range_single_key() {
        let map = filled(10);
        let keys: Vec<i32> = map
            .range(&4, &4, true, true)
            .unwrap()
            .map(|(k, _)| *k)
            .collect();
        assert_eq!(keys, vec![4]);
        assert_eq!(map.range(&4, &4, false, true).unwrap().count(), 0);
    }

    #[test]
    fn test_range_inverted_bounds_fail() {
        let map = filled(10);
        assert!(map.range(&8, &2, true, true).is_err());
    }
}
