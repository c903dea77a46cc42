// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! AVL tree core: storage, insert, remove, rebalancing.
//!
//! Balance bookkeeping uses two-bit state tags instead of stored heights.
//! Insert walks up from the attachment point flipping tags until a step
//! absorbs the growth or one rotation restores balance; remove mirrors the
//! walk and keeps rotating while subtree heights keep shrinking. A removal
//! target with two children is spliced with its in-order predecessor by
//! pointer surgery, so the identity of every other node survives.

use crate::avl::node::{Node, NodeId, NodeState, Side, HEADER};
use crate::error::{MemError, MemResult};
use std::cmp::Ordering;
use std::fmt;

/// Ordered map keyed by `K` with persistent node handles.
///
/// See the [module docs](crate::avl) for the arena layout. All operations
/// are single-threaded; iteration and structural mutation must not be
/// interleaved.
pub struct AvlTree<K, V>
where
    K: Ord + fmt::Debug,
{
    /// Slot arena; slot 0 is the header sentinel.
    nodes: Vec<Node<K, V>>,

    /// Recycled slots.
    free: Vec<NodeId>,

    /// Number of live (non-header) nodes.
    count: usize,
}

impl<K, V> AvlTree<K, V>
where
    K: Ord + fmt::Debug,
{
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::header()],
            free: Vec::new(),
            count: 0,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Remove every entry. All node handles become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Node::header());
        self.free.clear();
        self.count = 0;
    }

    /// Root node, if any.
    pub(crate) fn root(&self) -> Option<NodeId> {
        self.nodes[HEADER as usize].parent
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id as usize]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id as usize]
    }

    /// Key of a live node.
    pub fn key(&self, id: NodeId) -> &K {
        self.node(id).key.as_ref().unwrap()
    }

    /// Value of a live node.
    pub fn value(&self, id: NodeId) -> &V {
        self.node(id).value.as_ref().unwrap()
    }

    /// Mutable value of a live node.
    pub fn value_mut(&mut self, id: NodeId) -> &mut V {
        self.node_mut(id).value.as_mut().unwrap()
    }

    /// Key and value of a live node.
    pub fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = self.node(id);
        (node.key.as_ref().unwrap(), node.value.as_ref().unwrap())
    }

    /// Replace a node's key in place without re-linking.
    ///
    /// The caller must guarantee the new key still lies strictly between
    /// the keys of `prev_node(id)` and `next_node(id)`; violating this
    /// silently corrupts the ordering. It exists so a layered index can
    /// refresh a derived key in O(1).
    pub fn update_key(&mut self, id: NodeId, key: K) -> K {
        self.node_mut(id).key.replace(key).unwrap()
    }

    /// Replace a node's value in place, returning the old one.
    pub fn update_value(&mut self, id: NodeId, value: V) -> V {
        self.node_mut(id).value.replace(value).unwrap()
    }

    /// Value lookup.
    pub fn get(&self, key: &K) -> Option<&V> {
        let result = self.search(key);
        match (result.node, result.diff) {
            (Some(id), Ordering::Equal) => Some(self.value(id)),
            _ => None,
        }
    }

    /// Mutable value lookup.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let result = self.search(key);
        match (result.node, result.diff) {
            (Some(id), Ordering::Equal) => Some(self.value_mut(id)),
            _ => None,
        }
    }

    /// Membership test.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_found()
    }

    /// Node holding the smallest key.
    pub fn minimum(&self) -> Option<NodeId> {
        let mut cur = self.root()?;
        while let Some(left) = self.node(cur).left {
            cur = left;
        }
        Some(cur)
    }

    /// Node holding the largest key.
    pub fn maximum(&self) -> Option<NodeId> {
        let mut cur = self.root()?;
        while let Some(right) = self.node(cur).right {
            cur = right;
        }
        Some(cur)
    }

    /// Height of the tree (0 when empty).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = match self.root() {
            Some(root) => vec![(root, 1usize)],
            None => return 0,
        };
        while let Some((id, depth)) = stack.pop() {
            max = max.max(depth);
            let node = self.node(id);
            if let Some(left) = node.left {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, depth + 1));
            }
        }
        max
    }

    /// In-order successor, `None` past the maximum.
    pub fn next_node(&self, id: NodeId) -> Option<NodeId> {
        if let Some(mut cur) = self.node(id).right {
            while let Some(left) = self.node(cur).left {
                cur = left;
            }
            return Some(cur);
        }
        let mut cur = id;
        loop {
            let parent = self.node(cur).parent?;
            if parent == HEADER {
                return None;
            }
            if self.node(parent).left == Some(cur) {
                return Some(parent);
            }
            cur = parent;
        }
    }

    /// In-order predecessor, `None` before the minimum.
    pub fn prev_node(&self, id: NodeId) -> Option<NodeId> {
        if let Some(mut cur) = self.node(id).left {
            while let Some(right) = self.node(cur).right {
                cur = right;
            }
            return Some(cur);
        }
        let mut cur = id;
        loop {
            let parent = self.node(cur).parent?;
            if parent == HEADER {
                return None;
            }
            if self.node(parent).right == Some(cur) {
                return Some(parent);
            }
            cur = parent;
        }
    }

    /// Insert a new entry.
    ///
    /// ## Output
    /// - `Ok(NodeId)`: handle of the created node
    ///
    /// ## Error Conditions
    /// - `DuplicateKey` when the key is already present (the tree is
    ///   unchanged: mutation only happens after the slot is located)
    pub fn insert(&mut self, key: K, value: V) -> MemResult<NodeId> {
        match self.root() {
            None => {
                let id = self.alloc(key, value, HEADER);
                self.nodes[HEADER as usize].parent = Some(id);
                self.count = 1;
                Ok(id)
            }
            Some(root) => self.insert_below(root, key, value),
        }
    }

    /// Insert using `hint` as a locality starting point.
    ///
    /// Equivalent to [`insert`](Self::insert) but locates the attachment
    /// point via the climb-then-descend hinted search, which is O(distance)
    /// when `hint` neighbours the new key. `hint` must be a live handle.
    pub fn insert_near(&mut self, hint: NodeId, key: K, value: V) -> MemResult<NodeId> {
        match self.root() {
            None => self.insert(key, value),
            Some(_) => {
                let subtree = self.nearby_subtree(hint, &key);
                self.insert_below(subtree, key, value)
            }
        }
    }

    /// Remove by key.
    ///
    /// Returns whether the key was present; a missing key is not an error.
    pub fn remove(&mut self, key: &K) -> bool {
        let result = self.search(key);
        match (result.node, result.diff) {
            (Some(id), Ordering::Equal) => {
                self.remove_node(id);
                true
            }
            _ => false,
        }
    }

    /// Remove a node by handle, returning its entry.
    ///
    /// The handle (and only it) becomes invalid; every other handle
    /// survives the removal.
    pub fn remove_node(&mut self, id: NodeId) -> (K, V) {
        if self.node(id).left.is_some() && self.node(id).right.is_some() {
            let mut pred = self.node(id).left.unwrap();
            while let Some(right) = self.node(pred).right {
                pred = right;
            }
            self.splice(id, pred);
        }

        // At most one child now; excise the node.
        let child = self.node(id).left.or(self.node(id).right);
        let parent = self.node(id).parent.unwrap();
        let side = if parent == HEADER {
            None
        } else if self.node(parent).left == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        };
        match side {
            None => self.nodes[HEADER as usize].parent = child,
            Some(Side::Left) => self.node_mut(parent).left = child,
            Some(Side::Right) => self.node_mut(parent).right = child,
        }
        if let Some(child) = child {
            self.node_mut(child).parent = Some(parent);
        }

        let slot = std::mem::replace(&mut self.nodes[id as usize], Node::vacant());
        self.free.push(id);
        self.count -= 1;

        if let Some(side) = side {
            self.rebalance_shrunk(parent, side);
        }
        (slot.key.unwrap(), slot.value.unwrap())
    }

    /// Verify every structural invariant, panicking nowhere.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Verify balance tags, parent links, strict ordering, the height
    /// bound and the entry count, reporting the first violation.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        if self.node(HEADER).state != NodeState::Header {
            return Err("header slot lost its reserved state".to_string());
        }
        let root = match self.root() {
            Some(root) => root,
            None => {
                return if self.count == 0 {
                    Ok(())
                } else {
                    Err(format!("empty tree with count {}", self.count))
                }
            }
        };

        let height = self.validate_node(root, HEADER)?;

        // Strict in-order keys, counted.
        let mut seen = 0usize;
        let mut cur = self.minimum();
        let mut prev: Option<NodeId> = None;
        while let Some(id) = cur {
            if let Some(prev) = prev {
                if self.key(prev) >= self.key(id) {
                    return Err(format!(
                        "keys out of order: {:?} before {:?}",
                        self.key(prev),
                        self.key(id)
                    ));
                }
            }
            seen += 1;
            prev = Some(id);
            cur = self.next_node(id);
        }
        if seen != self.count {
            return Err(format!("count {} but traversal saw {}", self.count, seen));
        }

        // AVL height bound.
        let bound = (1.4404 * ((self.count + 2) as f64).log2() - 0.3277).ceil() as usize;
        if height > bound {
            return Err(format!(
                "height {} exceeds AVL bound {} for {} nodes",
                height, bound, self.count
            ));
        }
        Ok(())
    }

    /// Check one subtree: parent link, state tag versus real heights.
    fn validate_node(&self, id: NodeId, parent: NodeId) -> Result<usize, String> {
        let node = self.node(id);
        if node.key.is_none() {
            return Err(format!("slot {} is vacant but reachable", id));
        }
        if node.parent != Some(parent) {
            return Err(format!(
                "slot {} has parent {:?}, expected {}",
                id, node.parent, parent
            ));
        }
        let left = match node.left {
            Some(left) => self.validate_node(left, id)?,
            None => 0,
        };
        let right = match node.right {
            Some(right) => self.validate_node(right, id)?,
            None => 0,
        };
        let expected = match right as i64 - left as i64 {
            -1 => NodeState::LeftHigh,
            0 => NodeState::Balanced,
            1 => NodeState::RightHigh,
            diff => {
                return Err(format!("slot {} has height difference {}", id, diff));
            }
        };
        if node.state != expected {
            return Err(format!(
                "slot {} stores {:?} but heights say {:?}",
                id, node.state, expected
            ));
        }
        Ok(left.max(right) + 1)
    }

    /// Allocate a balanced leaf slot linked to `parent`.
    fn alloc(&mut self, key: K, value: V, parent: NodeId) -> NodeId {
        let node = Node {
            key: Some(key),
            value: Some(value),
            parent: Some(parent),
            left: None,
            right: None,
            state: NodeState::Balanced,
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id as usize] = node;
                id
            }
            None => {
                self.nodes.push(node);
                (self.nodes.len() - 1) as NodeId
            }
        }
    }

    /// Descend from `subtree` to the attachment slot and insert there.
    fn insert_below(&mut self, subtree: NodeId, key: K, value: V) -> MemResult<NodeId> {
        let mut cur = subtree;
        let (parent, side) = loop {
            match key.cmp(self.key(cur)) {
                Ordering::Equal => {
                    return Err(MemError::DuplicateKey {
                        key: format!("{:?}", key),
                    })
                }
                Ordering::Less => match self.node(cur).left {
                    Some(left) => cur = left,
                    None => break (cur, Side::Left),
                },
                Ordering::Greater => match self.node(cur).right {
                    Some(right) => cur = right,
                    None => break (cur, Side::Right),
                },
            }
        };

        let id = self.alloc(key, value, parent);
        match side {
            Side::Left => self.node_mut(parent).left = Some(id),
            Side::Right => self.node_mut(parent).right = Some(id),
        }
        self.count += 1;
        self.rebalance_grown(parent, side);
        Ok(id)
    }

    /// Walk up after an insert: the subtree on `side` of `node` grew.
    fn rebalance_grown(&mut self, mut node: NodeId, mut side: Side) {
        loop {
            match (self.node(node).state, side) {
                (NodeState::Balanced, Side::Left) => {
                    self.node_mut(node).state = NodeState::LeftHigh;
                }
                (NodeState::Balanced, Side::Right) => {
                    self.node_mut(node).state = NodeState::RightHigh;
                }
                (NodeState::LeftHigh, Side::Right) | (NodeState::RightHigh, Side::Left) => {
                    self.node_mut(node).state = NodeState::Balanced;
                    return;
                }
                (NodeState::LeftHigh, Side::Left) => {
                    self.rotate_right(node);
                    return;
                }
                (NodeState::RightHigh, Side::Right) => {
                    self.rotate_left(node);
                    return;
                }
                (NodeState::Header, _) => return,
            }
            // Subtree height grew by one; propagate.
            let parent = self.node(node).parent.unwrap();
            if parent == HEADER {
                return;
            }
            side = if self.node(parent).left == Some(node) {
                Side::Left
            } else {
                Side::Right
            };
            node = parent;
        }
    }

    /// Walk up after a removal: the subtree on `side` of `node` shrank.
    fn rebalance_shrunk(&mut self, mut node: NodeId, mut side: Side) {
        loop {
            let subtree = match (self.node(node).state, side) {
                (NodeState::Balanced, Side::Left) => {
                    self.node_mut(node).state = NodeState::RightHigh;
                    return;
                }
                (NodeState::Balanced, Side::Right) => {
                    self.node_mut(node).state = NodeState::LeftHigh;
                    return;
                }
                (NodeState::LeftHigh, Side::Left) => {
                    self.node_mut(node).state = NodeState::Balanced;
                    node
                }
                (NodeState::RightHigh, Side::Right) => {
                    self.node_mut(node).state = NodeState::Balanced;
                    node
                }
                (NodeState::LeftHigh, Side::Right) => {
                    let (root, shrunk) = self.rotate_right(node);
                    if !shrunk {
                        return;
                    }
                    root
                }
                (NodeState::RightHigh, Side::Left) => {
                    let (root, shrunk) = self.rotate_left(node);
                    if !shrunk {
                        return;
                    }
                    root
                }
                (NodeState::Header, _) => return,
            };
            // Subtree height shrank by one; propagate.
            let parent = self.node(subtree).parent.unwrap();
            if parent == HEADER {
                return;
            }
            side = if self.node(parent).left == Some(subtree) {
                Side::Left
            } else {
                Side::Right
            };
            node = parent;
        }
    }

    /// Re-attach `new` where `old` hung under `parent` (header-aware).
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent == HEADER {
            self.nodes[HEADER as usize].parent = Some(new);
        } else if self.node(parent).left == Some(old) {
            self.node_mut(parent).left = Some(new);
        } else {
            self.node_mut(parent).right = Some(new);
        }
        self.node_mut(new).parent = Some(parent);
    }

    /// Rotate the left-heavy subtree at `a` rightward.
    ///
    /// Returns the new subtree root and whether the subtree height shrank
    /// (the balanced-pivot single rotation keeps the height and stops
    /// removal propagation).
    fn rotate_right(&mut self, a: NodeId) -> (NodeId, bool) {
        let b = self.node(a).left.unwrap();
        match self.node(b).state {
            NodeState::RightHigh => {
                // Double rotation: lift b's right child between the two.
                let c = self.node(b).right.unwrap();
                let c_left = self.node(c).left;
                let c_right = self.node(c).right;
                let a_parent = self.node(a).parent.unwrap();

                self.node_mut(b).right = c_left;
                if let Some(x) = c_left {
                    self.node_mut(x).parent = Some(b);
                }
                self.node_mut(a).left = c_right;
                if let Some(x) = c_right {
                    self.node_mut(x).parent = Some(a);
                }
                self.node_mut(c).left = Some(b);
                self.node_mut(b).parent = Some(c);
                self.node_mut(c).right = Some(a);
                self.node_mut(a).parent = Some(c);
                self.replace_child(a_parent, a, c);

                let (b_state, a_state) = match self.node(c).state {
                    NodeState::LeftHigh => (NodeState::Balanced, NodeState::RightHigh),
                    NodeState::Balanced => (NodeState::Balanced, NodeState::Balanced),
                    _ => (NodeState::LeftHigh, NodeState::Balanced),
                };
                self.node_mut(b).state = b_state;
                self.node_mut(a).state = a_state;
                self.node_mut(c).state = NodeState::Balanced;
                (c, true)
            }
            pivot => {
                // Single rotation.
                let b_right = self.node(b).right;
                let a_parent = self.node(a).parent.unwrap();

                self.node_mut(a).left = b_right;
                if let Some(x) = b_right {
                    self.node_mut(x).parent = Some(a);
                }
                self.node_mut(b).right = Some(a);
                self.node_mut(a).parent = Some(b);
                self.replace_child(a_parent, a, b);

                if pivot == NodeState::Balanced {
                    // Balanced pivot: height preserved.
                    self.node_mut(a).state = NodeState::LeftHigh;
                    self.node_mut(b).state = NodeState::RightHigh;
                    (b, false)
                } else {
                    self.node_mut(a).state = NodeState::Balanced;
                    self.node_mut(b).state = NodeState::Balanced;
                    (b, true)
                }
            }
        }
    }

    /// Rotate the right-heavy subtree at `a` leftward. Mirror of
    /// [`rotate_right`](Self::rotate_right).
    fn rotate_left(&mut self, a: NodeId) -> (NodeId, bool) {
        let b = self.node(a).right.unwrap();
        match self.node(b).state {
            NodeState::LeftHigh => {
                let c = self.node(b).left.unwrap();
                let c_left = self.node(c).left;
                let c_right = self.node(c).right;
                let a_parent = self.node(a).parent.unwrap();

                self.node_mut(b).left = c_right;
                if let Some(x) = c_right {
                    self.node_mut(x).parent = Some(b);
                }
                self.node_mut(a).right = c_left;
                if let Some(x) = c_left {
                    self.node_mut(x).parent = Some(a);
                }
                self.node_mut(c).right = Some(b);
                self.node_mut(b).parent = Some(c);
                self.node_mut(c).left = Some(a);
                self.node_mut(a).parent = Some(c);
                self.replace_child(a_parent, a, c);

                let (b_state, a_state) = match self.node(c).state {
                    NodeState::RightHigh => (NodeState::Balanced, NodeState::LeftHigh),
                    NodeState::Balanced => (NodeState::Balanced, NodeState::Balanced),
                    _ => (NodeState::RightHigh, NodeState::Balanced),
                };
                self.node_mut(b).state = b_state;
                self.node_mut(a).state = a_state;
                self.node_mut(c).state = NodeState::Balanced;
                (c, true)
            }
            pivot => {
                let b_left = self.node(b).left;
                let a_parent = self.node(a).parent.unwrap();

                self.node_mut(a).right = b_left;
                if let Some(x) = b_left {
                    self.node_mut(x).parent = Some(a);
                }
                self.node_mut(b).left = Some(a);
                self.node_mut(a).parent = Some(b);
                self.replace_child(a_parent, a, b);

                if pivot == NodeState::Balanced {
                    self.node_mut(a).state = NodeState::RightHigh;
                    self.node_mut(b).state = NodeState::LeftHigh;
                    (b, false)
                } else {
                    self.node_mut(a).state = NodeState::Balanced;
                    self.node_mut(b).state = NodeState::Balanced;
                    (b, true)
                }
            }
        }
    }

    /// Exchange `n` with its in-order predecessor `pred` by pointer
    /// surgery, swapping the balance tags.
    ///
    /// `n` has two children and `pred` is the rightmost node of its left
    /// subtree, so `pred` has no right child. Afterwards `n` occupies
    /// `pred`'s old position with at most a left child.
    fn splice(&mut self, n: NodeId, pred: NodeId) {
        let n_parent = self.node(n).parent.unwrap();
        let n_left = self.node(n).left.unwrap();
        let n_right = self.node(n).right.unwrap();
        let p_parent = self.node(pred).parent.unwrap();
        let p_left = self.node(pred).left;

        let n_state = self.node(n).state;
        let p_state = self.node(pred).state;
        self.node_mut(n).state = p_state;
        self.node_mut(pred).state = n_state;

        if p_parent == n {
            // pred is n's direct left child.
            self.node_mut(pred).left = Some(n);
            self.node_mut(n).parent = Some(pred);
            self.node_mut(pred).right = Some(n_right);
            self.node_mut(n_right).parent = Some(pred);
            self.replace_child(n_parent, n, pred);
        } else {
            self.node_mut(pred).left = Some(n_left);
            self.node_mut(n_left).parent = Some(pred);
            self.node_mut(pred).right = Some(n_right);
            self.node_mut(n_right).parent = Some(pred);
            self.replace_child(n_parent, n, pred);

            self.node_mut(p_parent).right = Some(n);
            self.node_mut(n).parent = Some(p_parent);
        }

        self.node_mut(n).left = p_left;
        if let Some(x) = p_left {
            self.node_mut(x).parent = Some(n);
        }
        self.node_mut(n).right = None;
    }
}

impl<K, V> Default for AvlTree<K, V>
where
    K: Ord + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for AvlTree<K, V>
where
    K: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("count", &self.count)
            .field("slots", &self.nodes.len())
            .finish()
    }
}

