// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Range walks between two boundary nodes.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use crate::node::{Arena, NodeId};
use crate::probe::Probe;
use crate::tree::BalancedIndex;

impl<K: Ord> BalancedIndex<K> {
    /// Walk forward from `lower` through successor links.
    ///
    /// The walk yields `lower` first and stops after yielding a node that is
    /// `upper` or holds a key greater than `upper`'s. It is empty when either
    /// bound is missing or stale.
    ///
    /// Bounds usually come from two [`search_closer_by`](Self::search_closer_by)
    /// calls, which may land one key outside the intended range. Use
    /// [`window`](Self::window) to get exactly the keys between two probes.
    pub fn walk(&self, lower: Option<NodeId>, upper: Option<NodeId>) -> Walk<'_, K> {
        let lower = lower.and_then(|id| self.arena.resolve(id));
        let upper = upper.and_then(|id| self.arena.resolve(id));
        match (lower, upper) {
            (Some(lower), Some(upper)) => Walk {
                arena: &self.arena,
                next: Some(lower),
                upper,
            },
            _ => Walk::empty(&self.arena),
        }
    }

    /// Keys inside the window described by two probes, ascending.
    ///
    /// `lower` steers toward the window's first key and `upper` toward its last.
    /// Each boundary search lands next to its edge; a lower bound the probe
    /// places before the window moves one step forward, and an upper bound the
    /// probe places after the window moves one step back. Crossed bounds give
    /// an empty walk.
    ///
    /// Cost is `O(log n + k)` for `k` keys in the window.
    ///
    /// ```
    /// use detour_index::{BalancedIndex, probe};
    ///
    /// let index: BalancedIndex<i32> = [10, 50, 90, 130].into_iter().collect();
    /// let inside: Vec<i32> = index
    ///     .window(probe::at_least(40, |k: &i32| *k), probe::at_most(100, |k: &i32| *k))
    ///     .copied()
    ///     .collect();
    /// assert_eq!(inside, [50, 90]);
    /// ```
    pub fn window<L, U>(&self, mut lower: L, mut upper: U) -> Walk<'_, K>
    where
        L: Probe<K>,
        U: Probe<K>,
    {
        let start = self.locate_with(&mut lower).node.and_then(|node| {
            if lower.probe(node.key()) == Ordering::Greater {
                node.successor()
            } else {
                Some(node)
            }
        });
        let end = self.locate_with(&mut upper).node.and_then(|node| {
            if upper.probe(node.key()) == Ordering::Less {
                node.predecessor()
            } else {
                Some(node)
            }
        });
        match (start, end) {
            (Some(start), Some(end)) if start.key() <= end.key() => Walk {
                arena: &self.arena,
                next: Some(start.slot()),
                upper: end.slot(),
            },
            _ => Walk::empty(&self.arena),
        }
    }
}

/// Forward walk produced by [`BalancedIndex::walk`] and [`BalancedIndex::window`].
pub struct Walk<'a, K> {
    arena: &'a Arena<K>,
    next: Option<u32>,
    upper: u32,
}

impl<'a, K> Walk<'a, K> {
    const fn empty(arena: &'a Arena<K>) -> Self {
        Self {
            arena,
            next: None,
            upper: 0,
        }
    }
}

impl<'a, K: Ord> Iterator for Walk<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let key = &self.arena.get(idx).key;
        let past_upper = idx == self.upper || *key > self.arena.get(self.upper).key;
        self.next = if past_upper {
            None
        } else {
            self.arena.successor(idx)
        };
        Some(key)
    }
}

impl<K: Ord> FusedIterator for Walk<'_, K> {}

impl<K> Clone for Walk<'_, K> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            next: self.next,
            upper: self.upper,
        }
    }
}

impl<K> fmt::Debug for Walk<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walk")
            .field("next", &self.next)
            .field("upper", &self.upper)
            .finish_non_exhaustive()
    }
}
