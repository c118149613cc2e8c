// Copyright 2025 the Detour Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use detour_course::{Course, ObstacleKind, Record};
use kurbo::Point;

fn gen_course(count: usize) -> Vec<Record> {
    let mut state = 0xFACE_FEED_CAFE_BABE_u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..count)
        .map(|i| Record {
            x: (i * 24) as i32,
            y: 96 + (next() % 3) as i32 * 24,
            kind: (next() % ObstacleKind::count() as u64) as u8,
        })
        .collect()
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("course");
    for &n in &[500usize, 5_000, 50_000] {
        let mut course = Course::default();
        course.load(gen_course(n));
        let road = (n * 24) as f64;

        group.bench_function(format!("visible_scroll_n{}", n), |b| {
            let mut offset = 0.0;
            b.iter(|| {
                offset = (offset + 5.0) % road;
                black_box(course.visible(offset).count());
            })
        });
        group.bench_function(format!("hits_n{}", n), |b| {
            let cursor = Point::new(16.0, 110.0);
            b.iter(|| black_box(course.hits(cursor, road / 2.0).count()))
        });
        group.bench_function(format!("save_n{}", n), |b| {
            b.iter(|| black_box(course.records().len()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scroll);
criterion_main!(benches);
