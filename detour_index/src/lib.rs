// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detour Index: an ordered set kept in an AVL tree, with probe-driven boundary search.
//!
//! Detour Index is the ordering core behind the Detour course model, but it is
//! generic over any totally ordered key.
//!
//! - Insert and delete keys; the tree stays height-balanced after every operation.
//! - Find an exact key, or the closest node to a target, with [`BalancedIndex::search_closer`].
//! - Steer the search with your own three-way [`Probe`] to find range boundaries
//!   by a projection of the key (for example, only the horizontal coordinate).
//! - Walk in order, pre-order, post-order, or breadth-first.
//! - Visit only the keys in a window with [`BalancedIndex::window`].
//!
//! Nodes live in an arena inside the index. Parent links are slot indices, so
//! the tree has no reference cycles and no interior mutability. Queries return
//! [`NodeRef`] cursors that can step to neighbors; [`NodeId`] is the copyable,
//! generational form of a node handle.
//!
//! # Example
//!
//! ```rust
//! use detour_index::BalancedIndex;
//!
//! let mut index = BalancedIndex::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     index.insert(key);
//! }
//! assert!(!index.insert(4), "duplicates are dropped");
//!
//! let sorted: Vec<i32> = index.in_order().copied().collect();
//! assert_eq!(sorted, [1, 3, 4, 5, 7, 8, 9]);
//!
//! // A miss still reports the node where the search ended.
//! let closest = index.search_closer(&6);
//! assert!(!closest.found);
//! assert!(matches!(closest.key(), Some(5 | 7)));
//!
//! assert_eq!(index.delete(&5), Some(5));
//! assert!(index.check_invariants().is_ok());
//! ```
//!
//! Range boundaries by a projection:
//!
//! ```rust
//! use detour_index::{BalancedIndex, probe};
//!
//! // (x, y) pairs, ordered by x then y.
//! let index: BalancedIndex<(i32, i32)> =
//!     [(10, 0), (50, 3), (50, 1), (90, 0), (130, 2)].into_iter().collect();
//!
//! let by_x = |p: &(i32, i32)| p.0;
//! let visible: Vec<_> = index
//!     .window(probe::at_least(40, by_x), probe::at_most(100, by_x))
//!     .copied()
//!     .collect();
//! assert_eq!(visible, [(50, 1), (50, 3), (90, 0)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod node;
pub mod probe;
mod traverse;
mod tree;
mod validate;
mod window;

pub use node::{NodeId, NodeRef};
pub use probe::{Closest, Probe};
pub use traverse::{InOrder, LevelOrder, PostOrder, PreOrder};
pub use tree::BalancedIndex;
pub use validate::InvariantError;
pub use window::Walk;
