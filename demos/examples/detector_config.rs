// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading a detector configuration from JSON, and what a capacity cap does.
//!
//! Run:
//! - `RUST_LOG=warn cargo run -p gridsense_demos --example detector_config`

use glam::Vec3;
use gridsense_detect::{Detector2D, DetectorConfig, IndexScene, LayerMask, ObserverTransform};

const CONFIG: &str = r#"{
    "rotation": "Fixed",
    "bounds": { "center": [0.0, 0.0, 0.0], "extents": [10.0, 2.0, 10.0] },
    "capacity": { "initial": 4, "max": 32 }
}"#;

fn main() {
    env_logger::init();

    let config: DetectorConfig = match serde_json::from_str(CONFIG) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("bad config: {err}");
            return;
        }
    };
    println!("loaded: {config:?}");

    let rejected = serde_json::from_str::<DetectorConfig>(
        r#"{ "bounds": { "center": [0.0, 0.0, 0.0], "extents": [0.0, 1.0, 1.0] } }"#,
    );
    if let Err(err) = rejected {
        println!("rejected flat footprint: {err}");
    }

    let mut detector: Detector2D<_> = match Detector2D::from_config(&config) {
        Ok(detector) => detector,
        Err(err) => {
            eprintln!("invalid config: {err}");
            return;
        }
    };

    // 100 crates inside the volume, more than the cap of 32.
    let mut scene: IndexScene<usize> = IndexScene::new();
    for i in 0..100 {
        let center = Vec3::new((i % 10) as f32 - 4.5, 0.0, (i / 10) as f32 - 4.5);
        scene.insert(center, Vec3::splat(0.25), i, LayerMask::DEFAULT);
    }
    let _ = scene.commit();

    let mut hits = Vec::new();
    let report = detector.on_update(&ObserverTransform::IDENTITY, &scene, &mut hits);
    println!(
        "found {} (truncated: {}), buffer now holds {} slots",
        report.found,
        report.truncated,
        detector.base().buffer().capacity()
    );

    let mut bigger = detector.capacity_policy();
    bigger.max = 256;
    if let Err(err) = detector.set_capacity_policy(bigger) {
        eprintln!("{err}");
        return;
    }
    hits.clear();
    let report = detector.on_update(&ObserverTransform::IDENTITY, &scene, &mut hits);
    println!(
        "with max {}: found {} (truncated: {})",
        bigger.max, report.found, report.truncated
    );

    match serde_json::to_string_pretty(&detector.config()) {
        Ok(json) => println!("current config:\n{json}"),
        Err(err) => eprintln!("{err}"),
    }
}
