// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use glam::{Quat, Vec3};
use gridsense_detect::{
    CandidateBuffer, CapacityPolicy, DetectionBounds, Detector2D, DetectorConfig, IndexScene,
    LayerMask, ObserverTransform, OrientedBox, RotationPolicy, SceneQuery, overlap_growing,
};
use gridsense_index::Key;

/// Every call reports `n` hits, capped at the buffer length.
struct Crowd(usize);

impl SceneQuery for Crowd {
    type Handle = u32;

    fn overlap_box(&self, _: &OrientedBox, _: LayerMask, out: &mut [u32]) -> usize {
        let n = self.0.min(out.len());
        for (i, slot) in out[..n].iter_mut().enumerate() {
            *slot = i as u32;
        }
        n
    }

    fn position(&self, _: u32) -> Option<Vec3> {
        Some(Vec3::ZERO)
    }
}

fn bench_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap_growing");
    let volume = OrientedBox::new(Vec3::ZERO, Vec3::ONE, Quat::IDENTITY);
    let policy = CapacityPolicy::default();
    for &n in &[10usize, 1_000, 10_000] {
        let scene = Crowd(n);
        group.bench_function(format!("cold_buffer_n{n}"), |b| {
            b.iter_batched(
                || CandidateBuffer::with_capacity(policy.initial),
                |mut buffer| {
                    let out = overlap_growing(&scene, &volume, LayerMask::all(), &mut buffer, &policy);
                    black_box(out);
                },
                BatchSize::SmallInput,
            );
        });
        let mut warm = CandidateBuffer::with_capacity(policy.initial);
        let _ = overlap_growing(&scene, &volume, LayerMask::all(), &mut warm, &policy);
        group.bench_function(format!("warm_buffer_n{n}"), |b| {
            b.iter(|| {
                black_box(overlap_growing(
                    &scene,
                    &volume,
                    LayerMask::all(),
                    &mut warm,
                    &policy,
                ))
            });
        });
    }
    group.finish();
}

fn populate<B>(scene: &mut IndexScene<u32, B>, n: usize)
where
    B: gridsense_index::Backend<f32, gridsense_detect::Collider<u32>>,
{
    for z in 0..n {
        for x in 0..n {
            let center = Vec3::new(x as f32 * 2.0 - n as f32, 0.5, z as f32 * 2.0 - n as f32);
            scene.insert(center, Vec3::splat(0.4), (z * n + x) as u32, LayerMask::DEFAULT);
        }
    }
    let _ = scene.commit();
}

fn detector() -> Detector2D<Key> {
    let config = DetectorConfig {
        rotation: RotationPolicy::FollowYawOnly,
        bounds: DetectionBounds::new(Vec3::new(0.0, 0.5, 10.0), Vec3::new(10.0, 2.0, 10.0))
            .expect("bench bounds are valid"),
        ..DetectorConfig::default()
    };
    Detector2D::from_config(&config).expect("bench config is valid")
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector_tick");
    let n = 100;
    let mut flat: IndexScene<u32> = IndexScene::new();
    populate(&mut flat, n);
    let mut grid = IndexScene::<u32>::with_uniform_grid(8.0, 8.0, 0.0, 0.0);
    populate(&mut grid, n);
    let observers: Vec<ObserverTransform> = (0..32)
        .map(|i| {
            let yaw = i as f32 * 0.2;
            let position = Vec3::new(yaw.sin() * 20.0, 0.0, yaw.cos() * 20.0);
            ObserverTransform::new(position, Quat::from_rotation_y(yaw))
        })
        .collect();

    let mut d = detector();
    let mut hits = Vec::new();
    group.bench_function("flatvec_32_ticks", |b| {
        b.iter(|| {
            for observer in &observers {
                hits.clear();
                black_box(d.on_update(observer, &flat, &mut hits));
            }
        });
    });
    let mut d = detector();
    group.bench_function("grid_32_ticks", |b| {
        b.iter(|| {
            for observer in &observers {
                hits.clear();
                black_box(d.on_update(observer, &grid, &mut hits));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_growth, bench_tick);
criterion_main!(benches);
