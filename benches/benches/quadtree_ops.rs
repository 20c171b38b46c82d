// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bracken_quadtree::{Box2D, Quadtree};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

type Item = (u32, Box2D<f64>);

fn item_box(v: &Item) -> Box2D<f64> {
    v.1
}

type Tree = Quadtree<Item, f64, fn(&Item) -> Box2D<f64>>;

fn build_tree(world: Box2D<f64>, boxes: &[Box2D<f64>]) -> Tree {
    let mut tree = Quadtree::new(world, item_box as fn(&Item) -> Box2D<f64>);
    for (i, b) in boxes.iter().enumerate() {
        tree.insert((i as u32, *b)).unwrap();
    }
    tree
}

fn gen_grid_boxes(n: usize, cell: f64, scale: f64) -> Vec<Box2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Box2D::new(
                x as f64 * cell,
                y as f64 * cell,
                cell * scale,
                cell * scale,
            ));
        }
    }
    out
}

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
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_boxes(count: usize, extent: f64, w: f64, h: f64) -> Vec<Box2D<f64>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x = rng.next_f64() * (extent - w);
        let y = rng.next_f64() * (extent - h);
        out.push(Box2D::new(x, y, w, h));
    }
    out
}

fn gen_clustered_boxes(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Box2D<f64>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((
            200.0 + rng.next_f64() * 1600.0,
            200.0 + rng.next_f64() * 1600.0,
        ));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let x = (cx + (rng.next_f64() - 0.5) * spread).clamp(0.0, 1980.0);
            let y = (cy + (rng.next_f64() - 0.5) * spread).clamp(0.0, 1980.0);
            out.push(Box2D::new(x, y, 20.0, 20.0));
        }
    }
    out
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");
    for &n in &[32_usize, 64] {
        let world = Box2D::new(0.0, 0.0, n as f64 * 10.0, n as f64 * 10.0);
        let boxes = gen_grid_boxes(n, 10.0, 1.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{n}"), |b| {
            b.iter_batched(
                || boxes.clone(),
                |boxes| {
                    let tree = build_tree(world, &boxes);
                    black_box(tree.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    let world = Box2D::new(0.0, 0.0, 2000.0, 2000.0);
    for &count in &[1024_usize, 4096] {
        let boxes = gen_random_boxes(count, 2000.0, 20.0, 20.0);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("random_{count}"), |b| {
            b.iter_batched(
                || boxes.clone(),
                |boxes| {
                    let tree = build_tree(world, &boxes);
                    black_box(tree.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_query");
    for &n in &[32_usize, 64] {
        let extent = n as f64 * 10.0;
        let world = Box2D::new(0.0, 0.0, extent, extent);
        let tree = build_tree(world, &gen_grid_boxes(n, 10.0, 1.0));
        let viewport = Box2D::new(extent * 0.25, extent * 0.25, extent * 0.5, extent * 0.5);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{n}_viewport"), |b| {
            b.iter(|| black_box(tree.query(black_box(&viewport))).len())
        });
    }
    {
        let world = Box2D::new(0.0, 0.0, 2000.0, 2000.0);
        let tree = build_tree(world, &gen_clustered_boxes(16, 256, 200.0));
        let viewport = Box2D::new(500.0, 500.0, 1000.0, 1000.0);
        group.throughput(Throughput::Elements((16 * 256) as u64));
        group.bench_function("clustered_viewport", |b| {
            b.iter(|| black_box(tree.query(black_box(&viewport))).len())
        });
    }
    group.finish();
}

fn bench_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_pairs");
    for &n in &[32_usize, 64] {
        let extent = n as f64 * 10.0;
        // Oversized cells so neighbors overlap and pairs exist.
        let world = Box2D::new(0.0, 0.0, extent + 10.0, extent + 10.0);
        let tree = build_tree(world, &gen_grid_boxes(n, 10.0, 1.5));
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("overlap_grid_n{n}"), |b| {
            b.iter(|| black_box(tree.find_all_intersections()).len())
        });
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_nearest");
    let world = Box2D::new(0.0, 0.0, 2000.0, 2000.0);
    for &count in &[1024_usize, 4096] {
        let tree = build_tree(world, &gen_random_boxes(count, 2000.0, 20.0, 20.0));
        let mut rng = Rng::new(0xBADC_F00D_1234_5678);
        let probes: Vec<Box2D<f64>> = (0..16)
            .map(|_| {
                Box2D::new(
                    rng.next_f64() * 1990.0,
                    rng.next_f64() * 1990.0,
                    10.0,
                    10.0,
                )
            })
            .collect();
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(format!("random_{count}"), |b| {
            b.iter(|| {
                for probe in &probes {
                    black_box(tree.find_closest(probe));
                }
            })
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_remove");
    let world = Box2D::new(0.0, 0.0, 2000.0, 2000.0);
    for &count in &[1024_usize, 4096] {
        let boxes = gen_random_boxes(count, 2000.0, 20.0, 20.0);
        let items: Vec<Item> = boxes
            .iter()
            .enumerate()
            .map(|(i, b)| (i as u32, *b))
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("drain_random_{count}"), |b| {
            b.iter_batched(
                || build_tree(world, &boxes),
                |mut tree| {
                    for item in &items {
                        black_box(tree.remove(item));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_query,
    bench_pairs,
    bench_nearest,
    bench_remove
);
criterion_main!(benches);
