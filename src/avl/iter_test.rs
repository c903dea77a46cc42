// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for in-order, range and prefix iteration.

#[cfg(test)]
mod tests {
    use crate::avl::AvlTree;

    fn tens() -> AvlTree<i32, i32> {
        let mut tree = AvlTree::new();
        for i in [5, 2, 8, 1, 3, 7, 9, 4, 6] {
            tree.insert(i * 10, i).unwrap();
        }
        tree
    }

    #[test]
    fn test_iter_is_sorted() {
        let tree = tens();
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(keys, vec![10, 20, 30, 40, 50, 60, 70, 80, 90]);
        let values: Vec<i32> = tree.values().copied().collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_iter_empty() {
        let tree: AvlTree<i32, ()> = AvlTree::new();
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn test_into_iterator_for_ref() {
        let tree = tens();
        let mut n = 0;
        for (key, value) in &tree {
            assert_eq!(key / 10, *value);
            n += 1;
        }
        assert_eq!(n, 9);
    }

    #[test]
    fn test_next_prev_round_trip() {
        let tree = tens();
        let mut id = tree.minimum().unwrap();
        while let Some(next) = tree.next_node(id) {
            assert_eq!(tree.prev_node(next), Some(id));
            id = next;
        }
        assert_eq!(id, tree.maximum().unwrap());
        assert!(tree.next_node(id).is_none());
        assert!(tree.prev_node(tree.minimum().unwrap()).is_none());
    }

    #[test]
    fn test_iter_from() {
        let tree = tens();
        let start = tree.search(&50).node.unwrap();
        let keys: Vec<i32> = tree.iter_from(start).map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![50, 60, 70, 80, 90]);
    }

    #[test]
    fn test_range_inclusive_both() {
        let tree = tens();
        let keys: Vec<i32> = tree.range(&30, &60, true, true).unwrap().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![30, 40, 50, 60]);
    }

    #[test]
    fn test_range_exclusive_bounds() {
        let tree = tens();
        let keys: Vec<i32> = tree.range(&30, &60, false, false).unwrap().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![40, 50]);
    }

    #[test]
    fn test_range_bounds_between_keys() {
        let tree = tens();
        let keys: Vec<i32> = tree.range(&25, &65, true, true).unwrap().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![30, 40, 50, 60]);
    }

    #[test]
    fn test_range_outside_key_space() {
        let tree = tens();
        assert_eq!(tree.range(&100, &200, true, true).unwrap().count(), 0);
        assert_eq!(tree.range(&-10, &5, true, true).unwrap().count(), 0);
        let all: Vec<i32> = tree.range(&-10, &200, true, true).unwrap().map(|(k, _)| *k).collect();
        assert_eq!(all.len(), 9);
    }

    #[test]
    fn test_range_single_key() {
        let tree = tens();
        let keys: Vec<i32> = tree.range(&50, &50, true, true).unwrap().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![50]);
        assert_eq!(tree.range(&50, &50, false, true).unwrap().count(), 0);
        assert_eq!(tree.range(&50, &50, true, false).unwrap().count(), 0);
    }

    #[test]
    fn test_range_inverted_bounds_fail() {
        let tree = tens();
        assert!(tree.range(&60, &30, true, true).is_err());
    }

    #[test]
    fn test_starts_with() {
        let mut tree = AvlTree::new();
        for key in ["page.title", "page.text", "nav.home", "page", "pager", "nav.end"] {
            tree.insert(key.to_string(), ()).unwrap();
        }

        let hits: Vec<&String> = tree.starts_with("page").map(|(k, _)| k).collect();
        assert_eq!(hits, vec!["page", "page.text", "page.title", "pager"]);

        let nav: Vec<&String> = tree.starts_with("nav.").map(|(k, _)| k).collect();
        assert_eq!(nav, vec!["nav.end", "nav.home"]);

        assert_eq!(tree.starts_with("missing").count(), 0);
    }

    #[test]
    fn test_starts_with_is_byte_ordinal() {
        let mut tree = AvlTree::new();
        // 'Z' (0x5A) sorts before 'a' (0x61) byte-wise.
        for key in ["aZ", "aa", "ab", "b"] {
            tree.insert(key.to_string(), ()).unwrap();
        }
        let hits: Vec<&String> = tree.starts_with("a").map(|(k, _)| k).collect();
        assert_eq!(hits, vec!["aZ", "aa", "ab"]);
    }
}
