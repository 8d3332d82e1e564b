// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect};
use trellis_index::{Backend, FlatVec, QuadTree, QuadTreeConfig, SpatialIndex};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

fn gen_overlap_grid_rects(n: usize, cell: f64, scale: f64) -> Vec<Rect> {
    gen_grid_rects(n, cell)
        .into_iter()
        .map(|r| Rect::from_origin_size(r.origin(), (cell * scale, cell * scale)))
        .collect()
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

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Rect::from_origin_size((cx + dx, cy + dy), (12.0, 12.0)));
        }
    }
    out
}

/// Generates `count` random points inside `world`.
fn gen_random_points(count: usize, world: Rect) -> Vec<Point> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| {
            Point::new(
                rng.next_f64() * world.width() + world.x0,
                rng.next_f64() * world.height() + world.y0,
            )
        })
        .collect()
}

fn quadtree() -> SpatialIndex<u32> {
    SpatialIndex::new(QuadTreeConfig::default())
}

fn flatvec() -> SpatialIndex<u32, FlatVec> {
    SpatialIndex::with_backend(FlatVec::default())
}

fn filled<B: Backend>(mut idx: SpatialIndex<u32, B>, rects: &[Rect]) -> SpatialIndex<u32, B> {
    for (i, r) in rects.iter().copied().enumerate() {
        idx.insert(i as u32, r);
    }
    idx
}

fn bench_insert(c: &mut Criterion, group_name: &str, make_rects: impl Fn(usize) -> Vec<Rect>) {
    fn bench<F, B>(b: &mut criterion::Bencher, rects: &[Rect], make_index: F)
    where
        F: Fn() -> SpatialIndex<u32, B> + Clone + 'static,
        B: Backend + 'static,
    {
        b.iter_batched(make_index, |idx| filled(idx, rects), BatchSize::SmallInput);
    }

    let mut group = c.benchmark_group(group_name);
    for &n in &[32usize, 64, 128] {
        let rects = make_rects(n);
        group.throughput(Throughput::Elements(rects.len() as u64));
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| bench(b, &rects, flatvec));
        group.bench_function(BenchmarkId::new("QuadTree", n), |b| bench(b, &rects, quadtree));
    }
    group.finish();
}

fn bench_hit_test(c: &mut Criterion, group_name: &str, make_rects: impl Fn(usize) -> Vec<Rect>) {
    fn bench<B: Backend>(b: &mut criterion::Bencher, idx: &SpatialIndex<u32, B>, pts: &[Point]) {
        b.iter(|| {
            let mut total = 0usize;
            for pt in pts {
                total += idx.hit_test(*pt).len();
            }
            total
        });
    }

    let mut group = c.benchmark_group(group_name);
    for &n in &[32usize, 64, 128] {
        let rects = make_rects(n);
        let world = rects.iter().copied().reduce(|a, b| a.union(b)).unwrap_or_default();
        let pts = gen_random_points(256, world);
        group.throughput(Throughput::Elements(pts.len() as u64));
        let flat = filled(flatvec(), &rects);
        let quad = filled(quadtree(), &rects);
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| bench(b, &flat, &pts));
        group.bench_function(BenchmarkId::new("QuadTree", n), |b| bench(b, &quad, &pts));
    }
    group.finish();
}

fn bench_visible_region(c: &mut Criterion) {
    fn bench<B: Backend>(b: &mut criterion::Bencher, idx: &SpatialIndex<u32, B>) {
        // A 1280x720 viewport somewhere in the middle of the grid.
        let view = Rect::from_origin_size((400.0, 300.0), (1280.0, 720.0));
        b.iter(|| black_box(idx.visible_in_region(view)).len());
    }

    let mut group = c.benchmark_group("visible_region_grid");
    for &n in &[64usize, 128, 256] {
        let rects = gen_grid_rects(n, 20.0);
        group.throughput(Throughput::Elements(rects.len() as u64));
        let flat = filled(flatvec(), &rects);
        let quad = filled(quadtree(), &rects);
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| bench(b, &flat));
        group.bench_function(BenchmarkId::new("QuadTree", n), |b| bench(b, &quad));
    }
    group.finish();
}

fn bench_drag_updates(c: &mut Criterion) {
    // One node dragged across a populated canvas, as pointer-move would do.
    let rects = gen_clustered_rects(32, 128, 400.0);
    let mut group = c.benchmark_group("drag_updates_clustered");
    group.throughput(Throughput::Elements(200));
    group.bench_function("QuadTree", |b| {
        b.iter_batched(
            || filled(quadtree(), &rects),
            |mut idx| {
                for step in 0..200 {
                    let x = f64::from(step) * 10.0;
                    idx.update(&0, Rect::from_origin_size((x, x), (12.0, 12.0)));
                }
                idx
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("FlatVec", |b| {
        b.iter_batched(
            || filled(flatvec(), &rects),
            |mut idx| {
                for step in 0..200 {
                    let x = f64::from(step) * 10.0;
                    idx.update(&0, Rect::from_origin_size((x, x), (12.0, 12.0)));
                }
                idx
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_insert_grid(c: &mut Criterion) {
    bench_insert(c, "insert_rect_grid", |n| gen_grid_rects(n, 10.0));
}

fn bench_insert_overlap(c: &mut Criterion) {
    bench_insert(c, "insert_rect_overlap", |n| gen_overlap_grid_rects(n, 10.0, 3.0));
}

fn bench_hit_test_grid(c: &mut Criterion) {
    bench_hit_test(c, "hit_test_grid", |n| gen_grid_rects(n, 10.0));
}

fn bench_hit_test_overlap(c: &mut Criterion) {
    bench_hit_test(c, "hit_test_overlap", |n| gen_overlap_grid_rects(n, 10.0, 3.0));
}

fn bench_hit_test_clustered(c: &mut Criterion) {
    bench_hit_test(c, "hit_test_clustered", |n| gen_clustered_rects(n, 64, 200.0));
}

criterion_group!(
    benches,
    bench_insert_grid,
    bench_insert_overlap,
    bench_hit_test_grid,
    bench_hit_test_overlap,
    bench_hit_test_clustered,
    bench_visible_region,
    bench_drag_updates,
);
criterion_main!(benches);
