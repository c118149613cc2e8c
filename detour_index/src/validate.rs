// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural self-check for tests and debug assertions.

use alloc::vec;

use crate::node::NodeId;
use crate::tree::BalancedIndex;

/// A violated tree invariant, reported by [`BalancedIndex::check_invariants`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    /// The root carries a parent link.
    #[error("root {0:?} has a parent link")]
    RootHasParent(NodeId),
    /// A child does not point back at the node that links to it.
    #[error("child {child:?} does not link back to parent {parent:?}")]
    BrokenParentLink {
        /// The node holding the child link.
        parent: NodeId,
        /// The child whose parent link disagrees.
        child: NodeId,
    },
    /// A cached height disagrees with the subtrees below it.
    #[error("node {node:?} caches height {cached}, subtrees give {actual}")]
    HeightMismatch {
        /// Offending node.
        node: NodeId,
        /// Height stored in the node.
        cached: u32,
        /// Height derived from its children.
        actual: u32,
    },
    /// Subtree heights differ by more than one.
    #[error("node {node:?} has balance factor {balance}")]
    Unbalanced {
        /// Offending node.
        node: NodeId,
        /// `height(left) - height(right)`.
        balance: i32,
    },
    /// In-order keys are not strictly ascending.
    #[error("key at node {node:?} is not greater than its predecessor")]
    OutOfOrder {
        /// First node whose key fails to exceed the previous one.
        node: NodeId,
    },
}

impl<K: Ord> BalancedIndex<K> {
    /// Verify parent links, cached heights, balance, and key order.
    ///
    /// Runs in `O(n)`.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let Some(root) = self.root else {
            return Ok(());
        };
        let arena = &self.arena;
        if arena.get(root).parent.is_some() {
            return Err(InvariantError::RootHasParent(arena.id(root)));
        }

        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            let node = arena.get(idx);
            for child in [node.left, node.right].into_iter().flatten() {
                if arena.get(child).parent != Some(idx) {
                    return Err(InvariantError::BrokenParentLink {
                        parent: arena.id(idx),
                        child: arena.id(child),
                    });
                }
                stack.push(child);
            }
            let actual = 1 + arena.height(node.left).max(arena.height(node.right));
            if node.height != actual {
                return Err(InvariantError::HeightMismatch {
                    node: arena.id(idx),
                    cached: node.height,
                    actual,
                });
            }
            let balance = arena.balance_factor(idx);
            if !(-1..=1).contains(&balance) {
                return Err(InvariantError::Unbalanced {
                    node: arena.id(idx),
                    balance,
                });
            }
        }

        let mut previous = arena.leftmost(root);
        while let Some(next) = arena.successor(previous) {
            if arena.get(next).key <= arena.get(previous).key {
                return Err(InvariantError::OutOfOrder {
                    node: arena.id(next),
                });
            }
            previous = next;
        }
        Ok(())
    }
}
