// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`BalancedIndex`] AVL tree: lookup, insertion, deletion, and rebalancing.

use core::cmp::Ordering;
use core::fmt;

use crate::node::{Arena, NodeId, NodeRef};
use crate::probe::{Closest, Probe};

/// Ordered set of keys kept in a height-balanced (AVL) binary search tree.
///
/// Nodes live in an internal arena; links between them are slot indices and
/// the parent link is a plain back-reference, so there is no shared ownership.
/// After every completed [`insert`](Self::insert) or [`delete`](Self::delete)
/// the heights of a node's two subtrees differ by at most one.
///
/// Keys are unique: inserting a key equal to a stored one is a no-op.
#[derive(Clone)]
pub struct BalancedIndex<K> {
    pub(crate) arena: Arena<K>,
    pub(crate) root: Option<u32>,
}

impl<K> BalancedIndex<K> {
    /// Create an empty index.
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Drop every key. Ids handed out earlier become stale.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Whether the index holds no keys.
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of keys. Walks the whole tree.
    pub fn len(&self) -> usize {
        self.in_order().count()
    }

    /// Height of the tree; `0` when empty.
    pub fn height(&self) -> u32 {
        self.arena.height(self.root)
    }

    /// The root node.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|idx| NodeRef::new(&self.arena, idx))
    }

    /// Node holding the smallest key.
    pub fn first(&self) -> Option<NodeRef<'_, K>> {
        self.root
            .map(|root| NodeRef::new(&self.arena, self.arena.leftmost(root)))
    }

    /// Node holding the largest key.
    pub fn last(&self) -> Option<NodeRef<'_, K>> {
        self.root
            .map(|root| NodeRef::new(&self.arena, self.arena.rightmost(root)))
    }

    /// Resolve an id, or `None` if it is stale.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, K>> {
        self.arena
            .resolve(id)
            .map(|idx| NodeRef::new(&self.arena, idx))
    }

    /// Whether `id` still names a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.arena.resolve(id).is_some()
    }

    /// Node after `id` in key order.
    pub fn successor(&self, id: NodeId) -> Option<NodeRef<'_, K>> {
        self.get(id)?.successor()
    }

    /// Node before `id` in key order.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeRef<'_, K>> {
        self.get(id)?.predecessor()
    }

    /// Descend from the root as steered by `probe`.
    ///
    /// Returns the last slot visited and the probe's answer there.
    fn locate<P: Probe<K>>(&self, probe: &mut P) -> Option<(u32, Ordering)> {
        let mut current = self.root?;
        loop {
            let node = self.arena.get(current);
            let ord = probe.probe(&node.key);
            let next = match ord {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => None,
            };
            match next {
                Some(child) => current = child,
                None => return Some((current, ord)),
            }
        }
    }

    pub(crate) fn locate_with<P: Probe<K>>(&self, probe: &mut P) -> Closest<'_, K> {
        match self.locate(probe) {
            Some((idx, ord)) => Closest {
                node: Some(NodeRef::new(&self.arena, idx)),
                found: ord == Ordering::Equal,
            },
            None => Closest::empty(),
        }
    }

    /// Boundary search steered by a caller-supplied probe.
    ///
    /// Descends left while the probe answers `Less` and right while it answers
    /// `Greater`. Stops at the first `Equal` (with `found == true`) or at the
    /// last node on the path when the required child is missing.
    ///
    /// The returned node is then adjacent (in key order) to where the probe's
    /// target would sit, which makes it a good starting point for a range walk.
    pub fn search_closer_by<P: Probe<K>>(&self, mut probe: P) -> Closest<'_, K> {
        self.locate_with(&mut probe)
    }

    /// Re-run the bottom-up height update and rotations from `start` to the root.
    fn rebalance_from(&mut self, start: u32) {
        let mut current = Some(start);
        while let Some(idx) = current {
            self.arena.update_height(idx);
            let balance = self.arena.balance_factor(idx);
            let subtree_root = if balance > 1 {
                let left = self
                    .arena
                    .get(idx)
                    .left
                    .expect("left-heavy node has a left child");
                if self.arena.balance_factor(left) < 0 {
                    self.rotate_left(left);
                }
                self.rotate_right(idx)
            } else if balance < -1 {
                let right = self
                    .arena
                    .get(idx)
                    .right
                    .expect("right-heavy node has a right child");
                if self.arena.balance_factor(right) > 0 {
                    self.rotate_right(right);
                }
                self.rotate_left(idx)
            } else {
                idx
            };
            current = self.arena.get(subtree_root).parent;
        }
    }

    /// Point `parent`'s link (or the root) that used to hold `old` at `new`.
    fn replace_child(&mut self, parent: Option<u32>, old: u32, new: u32) {
        match parent {
            None => self.root = Some(new),
            Some(parent) => {
                let parent = self.arena.get_mut(parent);
                if parent.left == Some(old) {
                    parent.left = Some(new);
                } else {
                    parent.right = Some(new);
                }
            }
        }
    }

    /// Lift `pivot`'s right child into its place. Returns the new subtree root.
    fn rotate_left(&mut self, pivot: u32) -> u32 {
        let (parent, riser) = {
            let node = self.arena.get(pivot);
            (
                node.parent,
                node.right.expect("rotate_left needs a right child"),
            )
        };
        let inner = self.arena.get(riser).left;

        self.arena.get_mut(pivot).right = inner;
        if let Some(inner) = inner {
            self.arena.get_mut(inner).parent = Some(pivot);
        }
        let lifted = self.arena.get_mut(riser);
        lifted.left = Some(pivot);
        lifted.parent = parent;
        self.arena.get_mut(pivot).parent = Some(riser);
        self.replace_child(parent, pivot, riser);

        self.arena.update_height(pivot);
        self.arena.update_height(riser);
        riser
    }

    /// Lift `pivot`'s left child into its place. Returns the new subtree root.
    fn rotate_right(&mut self, pivot: u32) -> u32 {
        let (parent, riser) = {
            let node = self.arena.get(pivot);
            (
                node.parent,
                node.left.expect("rotate_right needs a left child"),
            )
        };
        let inner = self.arena.get(riser).right;

        self.arena.get_mut(pivot).left = inner;
        if let Some(inner) = inner {
            self.arena.get_mut(inner).parent = Some(pivot);
        }
        let lifted = self.arena.get_mut(riser);
        lifted.right = Some(pivot);
        lifted.parent = parent;
        self.arena.get_mut(pivot).parent = Some(riser);
        self.replace_child(parent, pivot, riser);

        self.arena.update_height(pivot);
        self.arena.update_height(riser);
        riser
    }

    /// Physically remove the node in slot `idx` and return its key.
    ///
    /// A node with two children trades keys with its in-order successor, and the
    /// successor's node (which has at most one child) is removed instead. A node
    /// with one child absorbs that child's key and children. A leaf is simply
    /// unlinked. The tree is rebalanced from the modified node up to the root.
    fn unlink(&mut self, mut idx: u32) -> K {
        if self.arena.get(idx).has_both_children() {
            let successor = self
                .arena
                .successor(idx)
                .expect("node with a right child has a successor");
            self.arena.swap_keys(idx, successor);
            idx = successor;
        }

        let node = self.arena.get(idx);
        if !node.has_children() {
            let parent = node.parent;
            self.arena.detach_from_parent(idx);
            let key = self.arena.free(idx);
            match parent {
                Some(parent) => self.rebalance_from(parent),
                None => self.root = None,
            }
            return key;
        }

        let child = node
            .left
            .or(node.right)
            .expect("node with children has a child");
        let (left, right) = {
            let child = self.arena.get(child);
            (child.left, child.right)
        };
        let child_key = self.arena.free(child);
        let absorber = self.arena.get_mut(idx);
        absorber.left = left;
        absorber.right = right;
        let removed = core::mem::replace(&mut absorber.key, child_key);
        for grandchild in [left, right].into_iter().flatten() {
            self.arena.get_mut(grandchild).parent = Some(idx);
        }
        self.rebalance_from(idx);
        removed
    }
}

impl<K: Ord> BalancedIndex<K> {
    /// Boundary search for `target` under the key's own ordering.
    ///
    /// On a miss, `node` is the last node on the search path: either the
    /// largest key below `target` or the smallest key above it.
    ///
    /// ```
    /// use detour_index::BalancedIndex;
    ///
    /// let index: BalancedIndex<i32> = [10, 20, 30, 40].into_iter().collect();
    /// let closest = index.search_closer(&25);
    /// assert!(!closest.found);
    /// assert!(matches!(closest.key(), Some(20 | 30)));
    /// ```
    pub fn search_closer(&self, target: &K) -> Closest<'_, K> {
        self.search_closer_by(|candidate: &K| target.cmp(candidate))
    }

    /// Exact lookup.
    pub fn search(&self, key: &K) -> Option<NodeRef<'_, K>> {
        self.search_closer(key).exact()
    }

    /// Whether `key` is stored.
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Insert `key`. Returns `false`, leaving the index untouched, if an equal
    /// key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        let located = self.locate(&mut |candidate: &K| key.cmp(candidate));
        let Some((parent, ord)) = located else {
            self.root = Some(self.arena.alloc(key, None));
            return true;
        };
        let idx = match ord {
            Ordering::Equal => return false,
            Ordering::Less => {
                let idx = self.arena.alloc(key, Some(parent));
                self.arena.get_mut(parent).left = Some(idx);
                idx
            }
            Ordering::Greater => {
                let idx = self.arena.alloc(key, Some(parent));
                self.arena.get_mut(parent).right = Some(idx);
                idx
            }
        };
        self.rebalance_from(idx);
        true
    }

    /// Insert each key in turn. Returns how many were new.
    pub fn insert_all<I: IntoIterator<Item = K>>(&mut self, keys: I) -> usize {
        let mut inserted = 0;
        for key in keys {
            if self.insert(key) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Remove `key`, returning the stored key if it was present.
    ///
    /// Removing a node can move another key into the removed node's slot, so
    /// ids of the in-order successor (two-child case) or of the sole child
    /// (one-child case) may go stale or change meaning.
    pub fn delete(&mut self, key: &K) -> Option<K> {
        let idx = self.search(key)?.slot();
        Some(self.unlink(idx))
    }

    /// Remove each key in turn. Returns how many were present.
    pub fn delete_all<'k, I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'k K>,
        K: 'k,
    {
        keys.into_iter()
            .filter(|key| self.delete(key).is_some())
            .count()
    }
}

impl<K> Default for BalancedIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for BalancedIndex<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<K: Ord> FromIterator<K> for BalancedIndex<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut index = Self::new();
        index.insert_all(iter);
        index
    }
}

impl<K> fmt::Debug for BalancedIndex<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalancedIndex")
            .field("len", &self.len())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn keys<K: Copy>(index: &BalancedIndex<K>) -> Vec<K> {
        index.in_order().copied().collect()
    }

    #[test]
    fn empty_index_answers_absent() {
        let mut index = BalancedIndex::<i32>::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.height(), 0);
        let closest = index.search_closer(&5);
        assert!(closest.node.is_none());
        assert!(!closest.found);
        assert_eq!(index.delete(&5), None);
        assert!(index.first().is_none());
        assert!(index.last().is_none());
    }

    #[test]
    fn single_key_is_root_leaf() {
        let mut index = BalancedIndex::new();
        assert!(index.insert(7));
        let root = index.root().unwrap();
        assert_eq!(*root.key(), 7);
        assert_eq!(root.height(), 1);
        assert!(root.is_root());
        assert!(!root.has_children());
        assert!(index.search_closer(&7).found);
    }

    #[test]
    fn ascending_inserts_rotate_left() {
        let index: BalancedIndex<i32> = [1, 2, 3].into_iter().collect();
        let root = index.root().unwrap();
        assert_eq!(*root.key(), 2);
        assert_eq!(root.height(), 2);
        assert_eq!(root.left().map(|n| *n.key()), Some(1));
        assert_eq!(root.right().map(|n| *n.key()), Some(3));
        assert!(root.left().unwrap().parent().unwrap().is_root());
    }

    #[test]
    fn descending_inserts_rotate_right() {
        let index: BalancedIndex<i32> = [3, 2, 1].into_iter().collect();
        assert_eq!(index.root().map(|n| *n.key()), Some(2));
        assert_eq!(index.height(), 2);
    }

    #[test]
    fn zigzag_inserts_double_rotate() {
        // Left-right case.
        let index: BalancedIndex<i32> = [30, 10, 20].into_iter().collect();
        assert_eq!(index.root().map(|n| *n.key()), Some(20));
        assert!(index.check_invariants().is_ok());

        // Right-left case.
        let index: BalancedIndex<i32> = [10, 30, 20].into_iter().collect();
        assert_eq!(index.root().map(|n| *n.key()), Some(20));
        assert!(index.check_invariants().is_ok());
    }

    #[test]
    fn duplicate_insert_is_noop() {
        let mut index: BalancedIndex<i32> = [5, 3, 8].into_iter().collect();
        let before = index.root().unwrap().id();
        assert!(!index.insert(3));
        assert_eq!(keys(&index), [3, 5, 8]);
        assert_eq!(index.root().unwrap().id(), before);
        assert_eq!(index.insert_all([3, 4, 8, 9]), 2);
        assert_eq!(keys(&index), [3, 4, 5, 8, 9]);
    }

    #[test]
    fn boundary_search_lands_next_to_gap() {
        let index: BalancedIndex<i32> = [10, 20, 30, 40].into_iter().collect();
        let closest = index.search_closer(&25);
        assert!(!closest.found);
        let key = *closest.key().unwrap();
        assert!(
            key == 20 || key == 30,
            "closest should border 25, got {key}"
        );

        let below = index.search_closer(&1);
        assert_eq!(below.key(), Some(&10));
        let above = index.search_closer(&99);
        assert_eq!(above.key(), Some(&40));
    }

    #[test]
    fn custom_ordering_steers_search() {
        let index: BalancedIndex<(i32, i32)> = [(100, 0), (200, 0), (50, 0)].into_iter().collect();
        let hit = index.search_closer_by(|k: &(i32, i32)| 200.cmp(&k.0));
        assert!(hit.found);
        assert_eq!(hit.key(), Some(&(200, 0)));
    }

    #[test]
    fn delete_leaf_one_child_and_two_children() {
        let mut index: BalancedIndex<i32> = [5, 3, 8, 1, 4, 7, 9, 6].into_iter().collect();
        // Leaf.
        assert_eq!(index.delete(&1), Some(1));
        assert!(index.check_invariants().is_ok());
        // 7 has a single child (6).
        assert_eq!(index.delete(&7), Some(7));
        assert!(index.check_invariants().is_ok());
        // Root with two children.
        assert_eq!(index.delete(&5), Some(5));
        assert!(index.check_invariants().is_ok());
        assert_eq!(keys(&index), [3, 4, 6, 8, 9]);
        assert_eq!(index.delete(&5), None);
    }

    #[test]
    fn delete_last_key_empties_tree() {
        let mut index = BalancedIndex::new();
        index.insert('x');
        assert_eq!(index.delete(&'x'), Some('x'));
        assert!(index.is_empty());
        assert!(index.root().is_none());
        index.insert('y');
        assert_eq!(keys(&index), ['y']);
    }

    /// Every ordering of `keys`, by Heap's algorithm.
    fn permutations(keys: &[i32]) -> Vec<Vec<i32>> {
        let mut current = keys.to_vec();
        let mut counters = alloc::vec![0; current.len()];
        let mut all = alloc::vec![current.clone()];
        let mut i = 1;
        while i < current.len() {
            if counters[i] < i {
                let j = if i % 2 == 0 { 0 } else { counters[i] };
                current.swap(j, i);
                all.push(current.clone());
                counters[i] += 1;
                i = 1;
            } else {
                counters[i] = 0;
                i += 1;
            }
        }
        all
    }

    #[test]
    fn delete_every_order_empties_tree() {
        const KEYS: [i32; 7] = [5, 3, 8, 1, 4, 7, 9];
        let orders = permutations(&KEYS);
        assert_eq!(orders.len(), 5040);

        for order in orders {
            let mut index: BalancedIndex<i32> = KEYS.into_iter().collect();
            let ids: Vec<NodeId> = KEYS
                .iter()
                .map(|key| index.search(key).unwrap().id())
                .collect();
            for (removed, key) in order.iter().enumerate() {
                assert_eq!(index.delete(key), Some(*key), "order {order:?}");
                assert_eq!(index.check_invariants(), Ok(()), "order {order:?}");
                assert_eq!(index.len(), KEYS.len() - removed - 1);
            }
            assert!(index.root().is_none());
            assert!(index.is_empty());
            assert!(ids.iter().all(|id| !index.is_alive(*id)));
        }
    }

    #[test]
    fn delete_keeps_balance_on_interior_removals() {
        let mut index: BalancedIndex<i32> = (0..64).collect();
        for key in (0..64).step_by(3) {
            assert_eq!(index.delete(&key), Some(key));
            assert_eq!(index.check_invariants(), Ok(()));
        }
        let expected: Vec<i32> = (0..64).filter(|k| k % 3 != 0).collect();
        assert_eq!(keys(&index), expected);
        assert_eq!(index.delete_all(&[1, 2, 3]), 2);
    }

    #[test]
    fn stale_ids_do_not_resolve() {
        let mut index: BalancedIndex<i32> = [1, 2, 3].into_iter().collect();
        let leaf = index.search(&3).unwrap().id();
        assert!(index.is_alive(leaf));
        index.delete(&3);
        assert!(!index.is_alive(leaf));
        assert!(index.get(leaf).is_none());
        index.insert(4);
        assert!(index.get(leaf).is_none(), "reused slot must not alias");

        let root = index.root().unwrap().id();
        index.clear();
        assert!(index.get(root).is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn round_trip_through_neighbors() {
        let index: BalancedIndex<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
        let mut forward = Vec::new();
        let mut cursor = index.first();
        while let Some(node) = cursor {
            forward.push(*node.key());
            cursor = node.successor();
        }
        assert_eq!(forward, [1, 3, 4, 5, 7, 8, 9]);

        let mut backward = Vec::new();
        let mut cursor = index.last();
        while let Some(node) = cursor {
            backward.push(*node.key());
            cursor = node.predecessor();
        }
        assert_eq!(backward, [9, 8, 7, 5, 4, 3, 1]);

        let five = index.search(&5).unwrap().id();
        assert_eq!(index.successor(five).map(|n| *n.key()), Some(7));
        assert_eq!(index.predecessor(five).map(|n| *n.key()), Some(4));
    }
}
