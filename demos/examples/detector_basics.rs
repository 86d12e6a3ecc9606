// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detector basics.
//!
//! An agent walks a circle through a field of crates. Each tick the detector
//! reports the crates inside a box ahead of the agent, with their position on
//! the box's footprint in `[0, 1] × [0, 1]`. The same walk is repeated under
//! each rotation policy.
//!
//! Run:
//! - `RUST_LOG=gridsense_detect=debug cargo run -p gridsense_demos --example detector_basics`

use glam::{EulerRot, Quat, Vec3};
use gridsense_detect::{
    DetectionBounds, Detector2D, IndexScene, LayerMask, ObserverTransform, RotationPolicy, from_fn,
};

fn main() {
    env_logger::init();

    let mut scene: IndexScene<u32, _> = IndexScene::with_uniform_grid(4.0, 4.0, -32.0, -32.0);
    let mut id = 0;
    for z in -6..=6 {
        for x in -6..=6 {
            if (x + z) % 3 == 0 {
                let center = Vec3::new(x as f32 * 3.0, 0.5, z as f32 * 3.0);
                scene.insert(center, Vec3::splat(0.5), id, LayerMask::DEFAULT);
                id += 1;
            }
        }
    }
    let changes = scene.commit();
    println!("scene: {} crates", changes.added);

    let bounds = DetectionBounds::new(Vec3::new(0.0, 0.5, 6.0), Vec3::new(4.0, 1.5, 6.0))
        .expect("demo bounds are valid");

    for policy in [
        RotationPolicy::FollowYawOnly,
        RotationPolicy::FollowFullOrientation,
        RotationPolicy::Fixed,
    ] {
        println!("== {policy:?} ==");
        let mut detector = Detector2D::new();
        detector.set_bounds(bounds);
        detector.set_rotation_policy(policy);

        for step in 0..4 {
            let heading = step as f32 * core::f32::consts::FRAC_PI_2;
            // The agent leans forward a little; only full orientation tips the box.
            let rotation = Quat::from_euler(EulerRot::YXZ, heading, 0.15, 0.0);
            let position = Vec3::new(heading.sin() * 8.0, 0.0, heading.cos() * 8.0);
            let observer = ObserverTransform::new(position, rotation);

            let mut lines = Vec::new();
            let report = detector.on_update(
                &observer,
                &scene,
                &mut from_fn(|key: gridsense_index::Key, point: kurbo::Point| {
                    let tag = scene.collider(key).map(|c| c.tag);
                    lines.push(format!("  crate {tag:?} at ({:.2}, {:.2})", point.x, point.y));
                }),
            );
            println!(
                "tick {step}: heading {heading:.2}, {} found, {} accepted",
                report.found, report.accepted
            );
            for line in lines {
                println!("{line}");
            }
        }
    }
}
