// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index basics.
//!
//! Insert keys, look one up, find the closest key to a miss, delete, and print
//! the four traversal orders.
//!
//! Run:
//! - `cargo run -p detour_demos --example index_basics`

use detour_index::BalancedIndex;

fn main() {
    let mut index = BalancedIndex::new();
    for key in [50, 20, 80, 10, 30, 70, 90, 60] {
        index.insert(key);
    }
    println!("height {} for {} keys", index.height(), index.len());

    let hit = index.search(&30).unwrap();
    println!(
        "found 30: neighbors {:?} / {:?}",
        hit.predecessor().map(|n| *n.key()),
        hit.successor().map(|n| *n.key())
    );

    // A miss reports where the search stopped.
    let closest = index.search_closer(&65);
    println!(
        "closest to 65: {:?} (found: {})",
        closest.key(),
        closest.found
    );

    index.delete(&50);
    assert!(
        index.check_invariants().is_ok(),
        "delete keeps the tree balanced"
    );

    println!("in-order    {:?}", index.in_order().collect::<Vec<_>>());
    println!("pre-order   {:?}", index.pre_order().collect::<Vec<_>>());
    println!("post-order  {:?}", index.post_order().collect::<Vec<_>>());
    println!("level-order {:?}", index.level_order().collect::<Vec<_>>());
}
