// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use detour_index::{BalancedIndex, probe};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, bound: u64) -> i64 {
        (self.next_u64() % bound) as i64
    }
}

fn gen_shuffled_keys(count: usize, seed: u64) -> Vec<i64> {
    let mut rng = Rng::new(seed);
    (0..count).map(|_| rng.below(count as u64 * 8)).collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[1_000usize, 10_000, 100_000] {
        let random = gen_shuffled_keys(n, 0xCAFE_F00D_DEAD_BEEF);
        let ascending: Vec<i64> = (0..n as i64).collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("random_n{}", n), |b| {
            b.iter_batched(
                BalancedIndex::<i64>::new,
                |mut idx| {
                    let inserted = idx.insert_all(random.iter().copied());
                    black_box(inserted);
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("ascending_n{}", n), |b| {
            b.iter_batched(
                BalancedIndex::<i64>::new,
                |mut idx| {
                    let inserted = idx.insert_all(ascending.iter().copied());
                    black_box(inserted);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_delete_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    for &n in &[1_000usize, 10_000] {
        let keys = gen_shuffled_keys(n, 0xBADC_F00D_1234_5678);
        let base: BalancedIndex<i64> = keys.iter().copied().collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("delete_reinsert_n{}", n), |b| {
            b.iter_batched(
                || base.clone(),
                |mut idx| {
                    for k in &keys {
                        if idx.delete(k).is_some() {
                            idx.insert(*k + 1);
                        }
                    }
                    black_box(idx.height());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("window");
    for &n in &[1_000usize, 10_000, 100_000] {
        // A long road: x spread wide, a handful of lanes.
        let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
        let keys: Vec<(i64, i64)> = (0..n)
            .map(|_| (rng.below(n as u64 * 20), rng.below(4) * 40))
            .collect();
        let idx: BalancedIndex<(i64, i64)> = keys.iter().copied().collect();
        let sorted: Vec<(i64, i64)> = idx.iter().copied().collect();
        let lo = n as i64 * 10;
        let hi = lo + 138;

        group.bench_function(format!("probe_window_n{}", n), |b| {
            b.iter(|| {
                let by_x = |k: &(i64, i64)| k.0;
                let count = idx
                    .window(probe::at_least(lo, by_x), probe::at_most(hi, by_x))
                    .count();
                black_box(count);
            })
        });
        group.bench_function(format!("linear_scan_n{}", n), |b| {
            b.iter(|| {
                let count = sorted.iter().filter(|k| (lo..=hi).contains(&k.0)).count();
                black_box(count);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_delete_churn, bench_window);
criterion_main!(benches);
