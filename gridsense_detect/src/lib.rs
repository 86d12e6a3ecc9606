// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridsense Detect: observer-aligned box detection with normalized footprint coordinates.
//!
//! ## Overview
//!
//! A [`Detector2D`] follows an observer (an agent, a camera rig) around a 3D scene.
//! Once per tick it places a box-shaped detection volume relative to the observer,
//! asks the scene which objects overlap it, and reports every object inside the
//! box together with its position on the box's ground footprint, rescaled to
//! `[0, 1] × [0, 1]`. The result feeds grid sensors and other spatial observations.
//!
//! `y` is up. The footprint spans local `x` (first coordinate) and local `z`
//! (second coordinate).
//!
//! ## Per-tick flow
//!
//! 1) Resolve the volume's world rotation from the active [`RotationPolicy`]:
//!    heading only, full orientation, or a fixed world rotation.
//! 2) Build the [`FrameTransform`] between world space and the volume's local frame.
//! 3) Query the scene through [`SceneQuery`] with an [`OrientedBox`]. The candidate
//!    buffer doubles until the result fits, up to the [`CapacityPolicy`] cap; a
//!    result cut off at the cap is flagged as truncated rather than retried forever.
//! 4) Map each candidate into the local frame and test it against the
//!    [`DetectionConstraint`]. [`Constraint2D`] accepts points inside the full 3D
//!    bounds and normalizes them over the footprint.
//! 5) Forward accepted `(handle, point)` pairs to a [`DetectionSink`].
//!
//! ## Scenes
//!
//! Any type can be a scene by implementing [`SceneQuery`]. With the default
//! `index_adapter` feature, [`IndexScene`] wraps a `gridsense_index` collider
//! index with a broad phase through the index and an oriented-box narrow phase.
//!
//! # Example
//!
//! ```rust
//! use glam::{Quat, Vec3};
//! use gridsense_detect::{
//!     DetectionBounds, Detector2D, IndexScene, LayerMask, ObserverTransform, RotationPolicy,
//! };
//!
//! let mut scene: IndexScene<u32> = IndexScene::new();
//! scene.insert(Vec3::new(4.0, 0.0, 0.0), Vec3::splat(0.5), 1, LayerMask::DEFAULT);
//! scene.insert(Vec3::new(0.0, 0.0, 4.0), Vec3::splat(0.5), 2, LayerMask::DEFAULT);
//! let _ = scene.commit();
//!
//! // A 4 x 2 x 4 volume whose center sits 4 units ahead of the observer.
//! let mut detector = Detector2D::new();
//! detector.set_rotation_policy(RotationPolicy::FollowYawOnly);
//! detector.set_bounds(DetectionBounds::new(Vec3::new(0.0, 0.0, 4.0), Vec3::new(2.0, 1.0, 2.0)).unwrap());
//!
//! // Facing +z the volume covers object 2; after a quarter turn about y it covers object 1.
//! let mut hits = Vec::new();
//! detector.on_update(&ObserverTransform::IDENTITY, &scene, &mut hits);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(scene.collider(hits[0].0).unwrap().tag, 2);
//!
//! hits.clear();
//! let turned = ObserverTransform::new(Vec3::ZERO, Quat::from_rotation_y(core::f32::consts::FRAC_PI_2));
//! let report = detector.on_update(&turned, &scene, &mut hits);
//! assert_eq!(report.accepted, 1);
//! assert_eq!(scene.collider(hits[0].0).unwrap().tag, 1);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to glam and Kurbo.
//! - `libm`: `no_std` float math for glam and Kurbo.
//! - `index_adapter` (default): [`IndexScene`] over `gridsense_index`.
//! - `serde`: (de)serialization for [`DetectorConfig`] and the value types in it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod buffer;
pub mod config;
pub mod constraint;
pub mod detector;
pub mod error;
pub mod frame;
pub mod obb;
pub mod query;
pub mod rotation;
pub mod types;

#[cfg(feature = "index_adapter")]
pub use adapters::index::{Collider, IndexScene};
pub use buffer::CandidateBuffer;
pub use config::DetectorConfig;
pub use constraint::{Constraint2D, DetectionConstraint};
pub use detector::{DetectionSink, Detector2D, DetectorBase, FnSink, TickReport, from_fn};
pub use error::Error;
pub use frame::FrameTransform;
pub use obb::OrientedBox;
pub use query::{CapacityPolicy, Overlap, SceneQuery, overlap_growing};
pub use rotation::RotationPolicy;
pub use types::{DetectionBounds, LayerMask, ObserverTransform};
