// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-first and breadth-first traversals.
//!
//! Every traversal is a lazy iterator over `&K` borrowed from the index, so
//! restarting one is just calling the method again.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::node::Arena;
use crate::tree::BalancedIndex;

impl<K> BalancedIndex<K> {
    /// Keys in ascending order (left, node, right).
    pub fn in_order(&self) -> InOrder<'_, K> {
        InOrder {
            arena: &self.arena,
            next: self.root.map(|root| self.arena.leftmost(root)),
        }
    }

    /// Same as [`in_order`](Self::in_order).
    pub fn iter(&self) -> InOrder<'_, K> {
        self.in_order()
    }

    /// Node, then left subtree, then right subtree.
    pub fn pre_order(&self) -> PreOrder<'_, K> {
        PreOrder {
            arena: &self.arena,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Left subtree, then right subtree, then node.
    pub fn post_order(&self) -> PostOrder<'_, K> {
        PostOrder {
            arena: &self.arena,
            stack: self.root.map(|root| (root, false)).into_iter().collect(),
        }
    }

    /// Breadth-first, top to bottom, left to right within a level.
    pub fn level_order(&self) -> LevelOrder<'_, K> {
        LevelOrder {
            arena: &self.arena,
            queue: self.root.into_iter().collect(),
        }
    }
}

impl<'a, K> IntoIterator for &'a BalancedIndex<K> {
    type Item = &'a K;
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

/// Ascending traversal that steps through successor links.
pub struct InOrder<'a, K> {
    arena: &'a Arena<K>,
    next: Option<u32>,
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        self.next = self.arena.successor(idx);
        Some(&self.arena.get(idx).key)
    }
}

impl<K> FusedIterator for InOrder<'_, K> {}

impl<K> Clone for InOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            next: self.next,
        }
    }
}

impl<K> fmt::Debug for InOrder<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InOrder")
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

/// Pre-order traversal over an explicit stack.
pub struct PreOrder<'a, K> {
    arena: &'a Arena<K>,
    stack: Vec<u32>,
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.arena.get(idx);
        // Right first so the left subtree pops first.
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(&node.key)
    }
}

impl<K> FusedIterator for PreOrder<'_, K> {}

impl<K> Clone for PreOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            stack: self.stack.clone(),
        }
    }
}

impl<K> fmt::Debug for PreOrder<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreOrder")
            .field("pending", &self.stack.len())
            .finish_non_exhaustive()
    }
}

/// Post-order traversal over an explicit stack.
///
/// Each entry carries whether its children were already scheduled.
pub struct PostOrder<'a, K> {
    arena: &'a Arena<K>,
    stack: Vec<(u32, bool)>,
}

impl<'a, K> Iterator for PostOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (idx, expanded) = self.stack.pop()?;
            let node = self.arena.get(idx);
            if expanded {
                return Some(&node.key);
            }
            self.stack.push((idx, true));
            self.stack.extend(node.right.map(|right| (right, false)));
            self.stack.extend(node.left.map(|left| (left, false)));
        }
    }
}

impl<K> FusedIterator for PostOrder<'_, K> {}

impl<K> Clone for PostOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            stack: self.stack.clone(),
        }
    }
}

impl<K> fmt::Debug for PostOrder<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostOrder")
            .field("pending", &self.stack.len())
            .finish_non_exhaustive()
    }
}

/// Breadth-first traversal over a queue.
pub struct LevelOrder<'a, K> {
    arena: &'a Arena<K>,
    queue: VecDeque<u32>,
}

impl<'a, K> Iterator for LevelOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.queue.pop_front()?;
        let node = self.arena.get(idx);
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(&node.key)
    }
}

impl<K> FusedIterator for LevelOrder<'_, K> {}

impl<K> Clone for LevelOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            queue: self.queue.clone(),
        }
    }
}

impl<K> fmt::Debug for LevelOrder<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelOrder")
            .field("pending", &self.queue.len())
            .finish_non_exhaustive()
    }
}
