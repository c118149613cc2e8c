// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Three-way probes used to steer boundary searches.
//!
//! A probe answers one question for a candidate key: does the sought target lie
//! before it ([`Ordering::Less`]), on it ([`Ordering::Equal`]), or after it
//! ([`Ordering::Greater`])? The search descends left on `Less`, right on
//! `Greater`, and stops on `Equal`.
//!
//! Probes must be monotone over the key order: once a probe answers `Less` for
//! some key it must answer `Less` for every larger key. A non-monotone probe
//! yields an unspecified, but memory-safe, result.

use core::cmp::Ordering;

use crate::node::NodeRef;

/// Comparison strategy injected into [`BalancedIndex::search_closer_by`](crate::BalancedIndex::search_closer_by).
///
/// Any `FnMut(&K) -> Ordering` closure is a probe.
pub trait Probe<K: ?Sized> {
    /// Where the target lies relative to `candidate`.
    fn probe(&mut self, candidate: &K) -> Ordering;
}

impl<K: ?Sized, F> Probe<K> for F
where
    F: FnMut(&K) -> Ordering,
{
    fn probe(&mut self, candidate: &K) -> Ordering {
        self(candidate)
    }
}

/// Probe for the first key whose projection is at least `edge`.
///
/// Never answers `Equal`, so a search keeps descending through runs of keys
/// that share a projection and ends next to the first of them.
pub fn at_least<K, T, F>(edge: T, project: F) -> impl FnMut(&K) -> Ordering
where
    T: Ord,
    F: Fn(&K) -> T,
{
    move |candidate| {
        if edge <= project(candidate) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

/// Probe for the last key whose projection is at most `edge`.
///
/// Like [`at_least`], never answers `Equal`.
pub fn at_most<K, T, F>(edge: T, project: F) -> impl FnMut(&K) -> Ordering
where
    T: Ord,
    F: Fn(&K) -> T,
{
    move |candidate| {
        if project(candidate) <= edge {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }
}

/// Result of a boundary search.
///
/// `node` is the last node visited (the closest key in tree-descent terms) and
/// `found` says whether the probe stopped on it with `Equal`. An empty index
/// gives `node == None, found == false`.
#[derive(Debug)]
pub struct Closest<'a, K> {
    /// Last node visited, if the index was non-empty.
    pub node: Option<NodeRef<'a, K>>,
    /// Whether `node` matched exactly.
    pub found: bool,
}

impl<'a, K> Closest<'a, K> {
    pub(crate) const fn empty() -> Self {
        Self {
            node: None,
            found: false,
        }
    }

    /// The node if it was an exact match.
    pub fn exact(self) -> Option<NodeRef<'a, K>> {
        if self.found { self.node } else { None }
    }

    /// Key of the closest node.
    pub fn key(&self) -> Option<&'a K> {
        self.node.map(|node| node.key())
    }
}

impl<K> Clone for Closest<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Closest<'_, K> {}
