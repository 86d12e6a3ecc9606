// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gridsense_index::{Aabb3D, Index};

/// `n * n` unit-height boxes laid out on the floor, `cell` apart.
fn gen_floor_boxes(n: usize, cell: f32) -> Vec<Aabb3D<f32>> {
    let mut out = Vec::with_capacity(n * n);
    for z in 0..n {
        for x in 0..n {
            let cx = x as f32 * cell;
            let cz = z as f32 * cell;
            out.push(Aabb3D::<f32>::from_center_extents(
                [cx, 0.5, cz],
                [cell * 0.4, 0.5, cell * 0.4],
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
    fn next_f32(&mut self) -> f32 {
        let v = self.next_u64() >> 40;
        (v as f32) / ((1u64 << 24) as f32)
    }
}

/// Boxes scattered over a `size` x `size` floor, with some stacked vertically.
fn gen_random_boxes(count: usize, size: f32, half: f32) -> Vec<Aabb3D<f32>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x = rng.next_f32() * size;
        let y = rng.next_f32() * 8.0;
        let z = rng.next_f32() * size;
        out.push(Aabb3D::<f32>::from_center_extents([x, y, z], [half, half, half]));
    }
    out
}

fn gen_clustered_boxes(n_clusters: usize, per_cluster: usize, spread: f32) -> Vec<Aabb3D<f32>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let centers: Vec<(f32, f32)> = (0..n_clusters)
        .map(|_| (rng.next_f32() * 2000.0, rng.next_f32() * 2000.0))
        .collect();
    for (cx, cz) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f32() - 0.5) * spread;
            let dz = (rng.next_f32() - 0.5) * spread;
            out.push(Aabb3D::<f32>::from_center_extents(
                [cx + dx, 0.5, cz + dz],
                [6.0, 0.5, 6.0],
            ));
        }
    }
    out
}

fn query_box() -> Aabb3D<f32> {
    Aabb3D::new(100.0, -1.0, 100.0, 500.0, 10.0, 500.0)
}

fn bench_flatvec(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatvec");
    for &n in &[32usize, 64, 128] {
        let boxes = gen_floor_boxes(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("insert_commit_query_n{n}"), |b| {
            b.iter_batched(
                Index::<f32, u32>::new,
                |mut idx| {
                    for (i, a) in boxes.iter().copied().enumerate() {
                        let _ = idx.insert(a, i as u32);
                    }
                    let _ = idx.commit();
                    black_box(idx.query_aabb(query_box()).count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    for &n in &[32usize, 64, 128] {
        let boxes = gen_floor_boxes(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("insert_commit_query_n{n}"), |b| {
            b.iter_batched(
                || Index::<f32, u32>::with_uniform_grid(32.0, 32.0, 0.0, 0.0),
                |mut idx| {
                    for (i, a) in boxes.iter().copied().enumerate() {
                        let _ = idx.insert(a, i as u32);
                    }
                    let _ = idx.commit();
                    black_box(idx.query_aabb(query_box()).count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    let boxes = gen_random_boxes(4096, 2000.0, 6.0);
    group.bench_function("insert_commit_query_random", |b| {
        b.iter_batched(
            || Index::<f32, u32>::with_uniform_grid(32.0, 32.0, 0.0, 0.0),
            |mut idx| {
                for (i, a) in boxes.iter().copied().enumerate() {
                    let _ = idx.insert(a, i as u32);
                }
                let _ = idx.commit();
                black_box(
                    idx.query_aabb(Aabb3D::new(800.0, 0.0, 800.0, 1200.0, 8.0, 1200.0))
                        .count(),
                );
            },
            BatchSize::SmallInput,
        );
    });
    let boxes = gen_clustered_boxes(16, 256, 128.0);
    group.bench_function("insert_commit_query_clustered", |b| {
        b.iter_batched(
            || Index::<f32, u32>::with_uniform_grid(32.0, 32.0, 0.0, 0.0),
            |mut idx| {
                for (i, a) in boxes.iter().copied().enumerate() {
                    let _ = idx.insert(a, i as u32);
                }
                let _ = idx.commit();
                black_box(idx.query_aabb(query_box()).count());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_update_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_update_heavy");
    let boxes = gen_floor_boxes(64, 10.0);
    group.bench_function("move_all_then_commit", |b| {
        b.iter_batched(
            || {
                let mut idx = Index::<f32, u32>::with_uniform_grid(32.0, 32.0, 0.0, 0.0);
                let keys: Vec<_> = boxes
                    .iter()
                    .copied()
                    .enumerate()
                    .map(|(i, a)| idx.insert(a, i as u32))
                    .collect();
                let _ = idx.commit();
                (idx, keys)
            },
            |(mut idx, keys)| {
                for (j, (k, a)) in keys.into_iter().zip(&boxes).enumerate() {
                    let dx = (j % 5) as f32 - 2.0;
                    let dz = ((j * 7) % 5) as f32 - 2.0;
                    let moved = Aabb3D::new(
                        a.min_x + dx,
                        a.min_y,
                        a.min_z + dz,
                        a.max_x + dx,
                        a.max_y,
                        a.max_z + dz,
                    );
                    idx.update(k, moved);
                }
                black_box(idx.commit());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_query_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_heavy");
    let boxes = gen_floor_boxes(128, 8.0);
    let mut flat = Index::<f32, u32>::new();
    let mut grid = Index::<f32, u32>::with_uniform_grid(32.0, 32.0, 0.0, 0.0);
    for (i, a) in boxes.iter().copied().enumerate() {
        let _ = flat.insert(a, i as u32);
        let _ = grid.insert(a, i as u32);
    }
    let _ = flat.commit();
    let _ = grid.commit();
    let queries: Vec<Aabb3D<f32>> = (0..256)
        .map(|q| {
            let x = (q % 64) as f32 * 8.0;
            let z = (q / 64) as f32 * 8.0;
            Aabb3D::new(x, 0.0, z, x + 64.0, 1.0, z + 64.0)
        })
        .collect();
    group.bench_function("flatvec_256_queries", |b| {
        b.iter(|| {
            let total: usize = queries.iter().map(|q| flat.query_aabb(*q).count()).sum();
            black_box(total)
        });
    });
    group.bench_function("grid_256_queries", |b| {
        b.iter(|| {
            let total: usize = queries.iter().map(|q| grid.query_aabb(*q).count()).sum();
            black_box(total)
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_flatvec,
    bench_grid,
    bench_update_heavy,
    bench_query_heavy,
);
criterion_main!(benches);
