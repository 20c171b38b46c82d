// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use bracken_quadtree::{Box2D, Quadtree};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

type Item = (u32, Box2D<f64>);

fn item_box(v: &Item) -> Box2D<f64> {
    v.1
}

fn gen_grid_boxes(n: usize, cell: f64) -> Vec<Box2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Box2D::new(x as f64 * cell, y as f64 * cell, cell, cell));
        }
    }
    out
}

fn to_rstar_rects(v: &[Box2D<f64>]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|b| Rectangle::from_corners([b.left, b.top], [b.left + b.width, b.top + b.height]))
        .collect()
}

fn bench_build_query_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_vs_rstar_build_query");
    for &n in &[64_usize, 128] {
        let extent = n as f64 * 10.0;
        let boxes = gen_grid_boxes(n, 10.0);
        let world = Box2D::new(0.0, 0.0, extent, extent);
        let viewport = Box2D::new(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("bracken_build_query_n{n}"), |b| {
            b.iter_batched(
                || boxes.clone(),
                |boxes| {
                    let mut tree = Quadtree::new(world, item_box as fn(&Item) -> Box2D<f64>);
                    for (i, r) in boxes.into_iter().enumerate() {
                        tree.insert((i as u32, r)).unwrap();
                    }
                    let hits = tree.query(&viewport).len();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{n}"), |b| {
            b.iter_batched(
                || to_rstar_rects(&boxes),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [viewport.left, viewport.top],
                        [viewport.left + viewport.width, viewport.top + viewport.height],
                    );
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_nearest_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_vs_rstar_nearest");
    for &n in &[64_usize, 128] {
        let extent = n as f64 * 10.0;
        let boxes = gen_grid_boxes(n, 10.0);
        let world = Box2D::new(0.0, 0.0, extent, extent);

        let mut quadtree = Quadtree::new(world, item_box as fn(&Item) -> Box2D<f64>);
        for (i, r) in boxes.iter().copied().enumerate() {
            quadtree.insert((i as u32, r)).unwrap();
        }
        let rtree = RTree::bulk_load(to_rstar_rects(&boxes));

        let probes: Vec<[f64; 2]> = (0..16)
            .map(|i| {
                let t = i as f64 / 16.0;
                [t * extent, (1.0 - t) * extent]
            })
            .collect();
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_function(format!("bracken_nearest_n{n}"), |b| {
            b.iter(|| {
                for p in &probes {
                    let probe = Box2D::new(p[0], p[1], 0.0, 0.0);
                    black_box(quadtree.find_closest(&probe));
                }
            })
        });

        group.bench_function(format!("rstar_nearest_n{n}"), |b| {
            b.iter(|| {
                for p in &probes {
                    black_box(rtree.nearest_neighbor(p));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_query_compare, bench_nearest_compare);
criterion_main!(benches);
