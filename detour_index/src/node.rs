// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node storage: generational ids, the arena that owns every node, and the
//! read-only [`NodeRef`] cursor handed out by queries.

use alloc::vec::Vec;
use core::fmt;

/// Identifier for a node in a [`BalancedIndex`](crate::BalancedIndex).
///
/// A `NodeId` is a slot index plus a generation counter.
///
/// - Inserting a key into an empty slot bumps that slot's generation.
/// - Freeing a slot makes every `NodeId` for it stale; stale ids never resolve
///   to a newer node because the generation must match.
///
/// Ids name *nodes*, not keys. Deleting a key may move a neighboring key into
/// the deleted node's slot (see [`BalancedIndex::delete`](crate::BalancedIndex::delete)),
/// so an id taken before a delete may afterwards name a different key or be stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32, u32);

impl NodeId {
    pub(crate) const fn idx(self) -> u32 {
        self.0
    }

    /// The generation this id was minted with.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

/// One tree node: an owned key, its cached height, and slot links.
///
/// `left`/`right` are the owning edges of the logical tree. `parent` is a
/// navigation back-link only.
#[derive(Clone, Debug)]
pub(crate) struct OrderedNode<K> {
    pub(crate) key: K,
    /// Always at least 1; a missing child counts as height 0.
    pub(crate) height: u32,
    pub(crate) parent: Option<u32>,
    pub(crate) left: Option<u32>,
    pub(crate) right: Option<u32>,
}

impl<K> OrderedNode<K> {
    fn leaf(key: K, parent: Option<u32>) -> Self {
        Self {
            key,
            height: 1,
            parent,
            left: None,
            right: None,
        }
    }

    pub(crate) const fn has_children(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }

    pub(crate) const fn has_both_children(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}

#[derive(Clone, Debug)]
struct Slot<K> {
    generation: u32,
    node: Option<OrderedNode<K>>,
}

/// Slab of node slots with a free list.
#[derive(Clone, Debug)]
pub(crate) struct Arena<K> {
    slots: Vec<Slot<K>>,
    free_list: Vec<u32>,
}

impl<K> Arena<K> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Allocate a fresh leaf holding `key`.
    pub(crate) fn alloc(&mut self, key: K, parent: Option<u32>) -> u32 {
        let node = OrderedNode::leaf(key, parent);
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            idx
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Node slots are 32-bit; an index never holds more than u32::MAX nodes."
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            idx
        }
    }

    /// Release a slot and hand back the key it held.
    ///
    /// The caller must already have unlinked the node from its neighbors.
    pub(crate) fn free(&mut self, idx: u32) -> K {
        let node = self.slots[idx as usize]
            .node
            .take()
            .expect("freeing an empty node slot");
        self.free_list.push(idx);
        node.key
    }

    /// Drop every node but keep slot generations, so old ids stay stale.
    pub(crate) fn clear(&mut self) {
        self.free_list.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.node = None;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Slot count never exceeds u32::MAX; see `alloc`."
            )]
            let idx = idx as u32;
            self.free_list.push(idx);
        }
    }

    pub(crate) fn get(&self, idx: u32) -> &OrderedNode<K> {
        self.slots[idx as usize]
            .node
            .as_ref()
            .expect("dangling node slot")
    }

    pub(crate) fn get_mut(&mut self, idx: u32) -> &mut OrderedNode<K> {
        self.slots[idx as usize]
            .node
            .as_mut()
            .expect("dangling node slot")
    }

    pub(crate) fn id(&self, idx: u32) -> NodeId {
        NodeId(idx, self.slots[idx as usize].generation)
    }

    /// Map an id back to a live slot, or `None` if it is stale.
    pub(crate) fn resolve(&self, id: NodeId) -> Option<u32> {
        let slot = self.slots.get(id.idx() as usize)?;
        (slot.generation == id.generation() && slot.node.is_some()).then_some(id.idx())
    }

    pub(crate) fn height(&self, link: Option<u32>) -> u32 {
        link.map_or(0, |idx| self.get(idx).height)
    }

    /// Recompute the cached height of `idx` from its children.
    pub(crate) fn update_height(&mut self, idx: u32) {
        let node = self.get(idx);
        let height = 1 + self.height(node.left).max(self.height(node.right));
        self.get_mut(idx).height = height;
    }

    /// `height(left) - height(right)`.
    pub(crate) fn balance_factor(&self, idx: u32) -> i32 {
        let node = self.get(idx);
        self.height(node.left) as i32 - self.height(node.right) as i32
    }

    pub(crate) fn leftmost(&self, mut idx: u32) -> u32 {
        while let Some(left) = self.get(idx).left {
            idx = left;
        }
        idx
    }

    pub(crate) fn rightmost(&self, mut idx: u32) -> u32 {
        while let Some(right) = self.get(idx).right {
            idx = right;
        }
        idx
    }

    /// In-order successor: left-most node of the right subtree, otherwise the
    /// first ancestor reached from a left child.
    pub(crate) fn successor(&self, idx: u32) -> Option<u32> {
        if let Some(right) = self.get(idx).right {
            return Some(self.leftmost(right));
        }
        let mut current = idx;
        while let Some(parent) = self.get(current).parent {
            if self.get(parent).left == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Mirror of [`Self::successor`].
    pub(crate) fn predecessor(&self, idx: u32) -> Option<u32> {
        if let Some(left) = self.get(idx).left {
            return Some(self.rightmost(left));
        }
        let mut current = idx;
        while let Some(parent) = self.get(current).parent {
            if self.get(parent).right == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Clear both directions of the link between `idx` and its parent.
    /// No-op for a root.
    pub(crate) fn detach_from_parent(&mut self, idx: u32) {
        let Some(parent) = self.get(idx).parent else {
            return;
        };
        let parent = self.get_mut(parent);
        if parent.left == Some(idx) {
            parent.left = None;
        } else if parent.right == Some(idx) {
            parent.right = None;
        }
        self.get_mut(idx).parent = None;
    }

    /// Exchange the keys stored in two live slots, leaving links untouched.
    pub(crate) fn swap_keys(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        let (lo, hi) = (a.min(b) as usize, a.max(b) as usize);
        let (head, tail) = self.slots.split_at_mut(hi);
        let first = head[lo].node.as_mut().expect("dangling node slot");
        let second = tail[0].node.as_mut().expect("dangling node slot");
        core::mem::swap(&mut first.key, &mut second.key);
    }
}

/// Read-only cursor to a live node.
///
/// Borrowed from the index, so the tree cannot change while a `NodeRef` is held.
pub struct NodeRef<'a, K> {
    arena: &'a Arena<K>,
    idx: u32,
}

impl<'a, K> NodeRef<'a, K> {
    pub(crate) const fn new(arena: &'a Arena<K>, idx: u32) -> Self {
        Self { arena, idx }
    }

    pub(crate) const fn slot(&self) -> u32 {
        self.idx
    }

    fn node(&self) -> &'a OrderedNode<K> {
        self.arena.get(self.idx)
    }

    fn step(&self, link: Option<u32>) -> Option<Self> {
        link.map(|idx| Self::new(self.arena, idx))
    }

    /// Generational id of this node.
    pub fn id(&self) -> NodeId {
        self.arena.id(self.idx)
    }

    /// The key stored here.
    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    /// Height of the subtree rooted here; a leaf has height 1.
    pub fn height(&self) -> u32 {
        self.node().height
    }

    /// `height(left) - height(right)`; within `-1..=1` in a balanced tree.
    pub fn balance_factor(&self) -> i32 {
        self.arena.balance_factor(self.idx)
    }

    /// Parent node, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        self.step(self.node().parent)
    }

    /// Left child.
    pub fn left(&self) -> Option<Self> {
        self.step(self.node().left)
    }

    /// Right child.
    pub fn right(&self) -> Option<Self> {
        self.step(self.node().right)
    }

    /// Whether this node is the root.
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    /// Whether at least one child is present.
    pub fn has_children(&self) -> bool {
        self.node().has_children()
    }

    /// Whether both children are present.
    pub fn has_both_children(&self) -> bool {
        self.node().has_both_children()
    }

    /// Node holding the next larger key.
    pub fn successor(&self) -> Option<Self> {
        self.step(self.arena.successor(self.idx))
    }

    /// Node holding the next smaller key.
    pub fn predecessor(&self) -> Option<Self> {
        self.step(self.arena.predecessor(self.idx))
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id())
            .field("key", self.key())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl<K> From<NodeRef<'_, K>> for NodeId {
    fn from(node: NodeRef<'_, K>) -> Self {
        node.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-link `2` as the root with `1` and `3` as children.
    fn three() -> (Arena<i32>, u32, u32, u32) {
        let mut arena = Arena::new();
        let root = arena.alloc(2, None);
        let left = arena.alloc(1, Some(root));
        let right = arena.alloc(3, Some(root));
        arena.get_mut(root).left = Some(left);
        arena.get_mut(root).right = Some(right);
        arena.update_height(root);
        (arena, root, left, right)
    }

    #[test]
    fn neighbors_follow_key_order() {
        let (arena, root, left, right) = three();
        assert_eq!(arena.successor(left), Some(root));
        assert_eq!(arena.successor(root), Some(right));
        assert_eq!(arena.successor(right), None);
        assert_eq!(arena.predecessor(right), Some(root));
        assert_eq!(arena.predecessor(root), Some(left));
        assert_eq!(arena.predecessor(left), None);
        assert_eq!(arena.get(root).height, 2);
        assert_eq!(arena.balance_factor(root), 0);
    }

    #[test]
    fn detach_clears_both_directions() {
        let (mut arena, root, left, _) = three();
        arena.detach_from_parent(left);
        assert_eq!(arena.get(root).left, None);
        assert_eq!(arena.get(left).parent, None);
        assert!(arena.get(root).has_children());
        assert!(!arena.get(root).has_both_children());

        // Detaching a root does nothing.
        arena.detach_from_parent(root);
        assert!(arena.get(root).right.is_some());
    }

    #[test]
    fn freed_slots_reuse_with_new_generation() {
        let mut arena = Arena::new();
        let a = arena.alloc('a', None);
        let old = arena.id(a);
        assert_eq!(arena.free(a), 'a');
        assert_eq!(arena.resolve(old), None);

        let b = arena.alloc('b', None);
        assert_eq!(a, b, "free slot should be reused");
        let new = arena.id(b);
        assert_ne!(old, new);
        assert!(new.generation() > old.generation());
        assert_eq!(arena.resolve(new), Some(b));
    }

    #[test]
    fn clear_keeps_ids_stale() {
        let mut arena = Arena::new();
        let a = arena.alloc(10, None);
        let id = arena.id(a);
        arena.clear();
        assert_eq!(arena.resolve(id), None);
        let again = arena.alloc(20, None);
        assert_ne!(arena.id(again), id);
    }

    #[test]
    fn swap_keys_keeps_links() {
        let (mut arena, root, left, right) = three();
        arena.swap_keys(root, right);
        assert_eq!(arena.get(root).key, 3);
        assert_eq!(arena.get(right).key, 2);
        assert_eq!(arena.get(root).left, Some(left));
        assert_eq!(arena.get(right).parent, Some(root));
    }
}
