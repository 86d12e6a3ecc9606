// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tick detection: resolve the volume, query the scene, parse candidates.

use alloc::vec::Vec;

use glam::Quat;
use kurbo::Point;
use log::trace;

use crate::buffer::CandidateBuffer;
use crate::config::DetectorConfig;
use crate::constraint::{Constraint2D, DetectionConstraint};
use crate::error::Error;
use crate::frame::FrameTransform;
use crate::obb::OrientedBox;
use crate::query::{CapacityPolicy, Overlap, SceneQuery, overlap_growing};
use crate::rotation::RotationPolicy;
use crate::types::{DetectionBounds, LayerMask, ObserverTransform};

/// Receives accepted detections.
pub trait DetectionSink<H> {
    /// Called once per accepted object with its normalized footprint coordinate.
    fn detected(&mut self, handle: H, point: Point);
}

impl<H> DetectionSink<H> for Vec<(H, Point)> {
    fn detected(&mut self, handle: H, point: Point) {
        self.push((handle, point));
    }
}

impl<H, K: DetectionSink<H> + ?Sized> DetectionSink<H> for &mut K {
    fn detected(&mut self, handle: H, point: Point) {
        (**self).detected(handle, point);
    }
}

/// Sink wrapping a closure. See [`from_fn`].
#[derive(Clone, Copy, Debug)]
pub struct FnSink<F>(F);

/// Wrap a `FnMut(handle, point)` closure as a [`DetectionSink`].
pub fn from_fn<H, F: FnMut(H, Point)>(f: F) -> FnSink<F> {
    FnSink(f)
}

impl<H, F: FnMut(H, Point)> DetectionSink<H> for FnSink<F> {
    fn detected(&mut self, handle: H, point: Point) {
        (self.0)(handle, point);
    }
}

/// Summary of one [`Detector2D::on_update`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Candidates the overlap query returned.
    pub found: usize,
    /// Candidates the constraint accepted and the sink received.
    pub accepted: usize,
    /// The overlap query hit its capacity cap; `found` may be short.
    pub truncated: bool,
}

/// Shape-independent detector state: layer mask, capacity policy, buffer.
#[derive(Clone, Debug)]
pub struct DetectorBase<H> {
    layer_mask: LayerMask,
    capacity: CapacityPolicy,
    buffer: CandidateBuffer<H>,
}

impl<H: Copy + Default> DetectorBase<H> {
    /// Create base state. The buffer starts at `capacity.initial` slots.
    pub fn new(layer_mask: LayerMask, capacity: CapacityPolicy) -> Result<Self, Error> {
        capacity.validate()?;
        Ok(Self {
            layer_mask,
            capacity,
            buffer: CandidateBuffer::with_capacity(capacity.initial),
        })
    }

    /// Layers the overlap query considers.
    pub fn layer_mask(&self) -> LayerMask {
        self.layer_mask
    }

    /// Set the layers the overlap query considers.
    pub fn set_layer_mask(&mut self, mask: LayerMask) {
        self.layer_mask = mask;
    }

    /// Current capacity policy.
    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.capacity
    }

    /// Replace the capacity policy.
    ///
    /// The buffer grows to the new initial capacity if needed and never shrinks.
    pub fn set_capacity_policy(&mut self, policy: CapacityPolicy) -> Result<(), Error> {
        policy.validate()?;
        self.capacity = policy;
        self.buffer.ensure_capacity(policy.initial);
        Ok(())
    }

    /// The candidate buffer, as left by the last query.
    pub fn buffer(&self) -> &CandidateBuffer<H> {
        &self.buffer
    }

    /// Run a growing overlap query for `volume`.
    pub fn overlap<S>(&mut self, scene: &S, volume: &OrientedBox) -> Overlap
    where
        S: SceneQuery<Handle = H> + ?Sized,
    {
        overlap_growing(scene, volume, self.layer_mask, &mut self.buffer, &self.capacity)
    }

    /// Hand the first `count` candidates to `constraint` and forward accepted ones.
    ///
    /// Candidates whose position the scene no longer knows are skipped.
    /// Returns how many were accepted.
    pub fn parse<S, C, K>(
        &self,
        scene: &S,
        count: usize,
        frame: &FrameTransform,
        constraint: &C,
        sink: &mut K,
    ) -> usize
    where
        S: SceneQuery<Handle = H> + ?Sized,
        C: DetectionConstraint + ?Sized,
        K: DetectionSink<H> + ?Sized,
    {
        let mut accepted = 0;
        for &handle in self.buffer.found(count) {
            let Some(world) = scene.position(handle) else {
                continue;
            };
            if let Some(point) = constraint.contains_point(frame.to_local(world)) {
                sink.detected(handle, point);
                accepted += 1;
            }
        }
        accepted
    }
}

impl<H: Copy + Default> Default for DetectorBase<H> {
    fn default() -> Self {
        let capacity = CapacityPolicy::default();
        Self {
            layer_mask: LayerMask::default(),
            capacity,
            buffer: CandidateBuffer::with_capacity(capacity.initial),
        }
    }
}

/// Detector with an observer-aligned box volume and a rectangular footprint.
///
/// Each [`on_update`](Self::on_update) resolves the volume's rotation from the
/// active [`RotationPolicy`], queries the scene with a buffer that grows until
/// the result fits, and forwards every candidate inside the 3D bounds to the
/// sink with its normalized footprint coordinate.
///
/// ```
/// use glam::Vec3;
/// use gridsense_detect::{
///     DetectionBounds, Detector2D, IndexScene, LayerMask, ObserverTransform,
/// };
///
/// let mut scene: IndexScene<&str> = IndexScene::new();
/// let crate_key = scene.insert(Vec3::new(0.0, 0.0, 3.0), Vec3::splat(0.5), "crate", LayerMask::DEFAULT);
/// scene.insert(Vec3::new(0.0, 0.0, -30.0), Vec3::splat(0.5), "far", LayerMask::DEFAULT);
/// let _ = scene.commit();
///
/// let mut detector = Detector2D::new();
/// let bounds = DetectionBounds::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(5.0, 1.0, 5.0)).unwrap();
/// detector.set_bounds(bounds);
///
/// let mut hits = Vec::new();
/// let report = detector.on_update(&ObserverTransform::IDENTITY, &scene, &mut hits);
/// assert_eq!(report.accepted, 1);
/// assert_eq!(hits[0].0, crate_key);
/// assert_eq!((hits[0].1.x, hits[0].1.y), (0.5, 0.3));
/// ```
#[derive(Clone, Debug)]
pub struct Detector2D<H> {
    rotation: RotationPolicy,
    world_rotation: Quat,
    constraint: Constraint2D,
    base: DetectorBase<H>,
}

impl<H: Copy + Default> Detector2D<H> {
    /// Detector with default configuration.
    pub fn new() -> Self {
        Self {
            rotation: RotationPolicy::default(),
            world_rotation: Quat::IDENTITY,
            constraint: Constraint2D::default(),
            base: DetectorBase::default(),
        }
    }

    /// Detector built from `config`, validated as a whole.
    pub fn from_config(config: &DetectorConfig) -> Result<Self, Error> {
        validate_rotation(config.world_rotation)?;
        Ok(Self {
            rotation: config.rotation,
            world_rotation: config.world_rotation,
            constraint: Constraint2D::new(config.bounds),
            base: DetectorBase::new(config.layer_mask, config.capacity)?,
        })
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> DetectorConfig {
        DetectorConfig {
            rotation: self.rotation,
            world_rotation: self.world_rotation,
            bounds: self.constraint.bounds(),
            layer_mask: self.base.layer_mask(),
            capacity: self.base.capacity_policy(),
        }
    }

    /// Active rotation policy.
    pub fn rotation_policy(&self) -> RotationPolicy {
        self.rotation
    }

    /// Set the rotation policy. Takes effect on the next tick.
    pub fn set_rotation_policy(&mut self, policy: RotationPolicy) {
        self.rotation = policy;
    }

    /// Rotation used by [`RotationPolicy::Fixed`].
    pub fn world_rotation(&self) -> Quat {
        self.world_rotation
    }

    /// Set the rotation used by [`RotationPolicy::Fixed`]. Must be a unit quaternion.
    pub fn set_world_rotation(&mut self, rotation: Quat) -> Result<(), Error> {
        validate_rotation(rotation)?;
        self.world_rotation = rotation;
        Ok(())
    }

    /// Detection bounds in the observer's local frame.
    pub fn bounds(&self) -> DetectionBounds {
        self.constraint.bounds()
    }

    /// Replace the bounds; the footprint is recomputed with them.
    pub fn set_bounds(&mut self, bounds: DetectionBounds) {
        self.constraint.set_bounds(bounds);
    }

    /// The footprint constraint.
    pub fn constraint(&self) -> &Constraint2D {
        &self.constraint
    }

    /// Layers considered by the scene query.
    pub fn layer_mask(&self) -> LayerMask {
        self.base.layer_mask()
    }

    /// Set the layers considered by the scene query.
    pub fn set_layer_mask(&mut self, mask: LayerMask) {
        self.base.set_layer_mask(mask);
    }

    /// Current capacity policy.
    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.base.capacity_policy()
    }

    /// Replace the capacity policy.
    pub fn set_capacity_policy(&mut self, policy: CapacityPolicy) -> Result<(), Error> {
        self.base.set_capacity_policy(policy)
    }

    /// Shared detector state.
    pub fn base(&self) -> &DetectorBase<H> {
        &self.base
    }

    /// Frame and world query volume for `observer` under the current configuration.
    pub fn volume(&self, observer: &ObserverTransform) -> (FrameTransform, OrientedBox) {
        let rotation = self.rotation.resolve(observer, self.world_rotation);
        let frame = FrameTransform::new(observer.position, rotation);
        let bounds = self.constraint.bounds();
        let volume = OrientedBox::new(frame.to_world(bounds.center()), bounds.extents(), rotation);
        (frame, volume)
    }

    /// Run one detection tick.
    ///
    /// Every candidate inside the bounds reaches `sink` exactly once, in the
    /// order the scene reported it.
    pub fn on_update<S, K>(
        &mut self,
        observer: &ObserverTransform,
        scene: &S,
        sink: &mut K,
    ) -> TickReport
    where
        S: SceneQuery<Handle = H> + ?Sized,
        K: DetectionSink<H> + ?Sized,
    {
        let (frame, volume) = self.volume(observer);
        let overlap = self.base.overlap(scene, &volume);
        let accepted = self
            .base
            .parse(scene, overlap.count, &frame, &self.constraint, sink);
        trace!(
            "detection tick at {}: {} found, {} accepted",
            observer.position, overlap.count, accepted
        );
        TickReport {
            found: overlap.count,
            accepted,
            truncated: overlap.truncated,
        }
    }
}

impl<H: Copy + Default> Default for Detector2D<H> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_rotation(rotation: Quat) -> Result<(), Error> {
    if rotation.is_finite() && rotation.is_normalized() {
        Ok(())
    } else {
        Err(Error::NonUnitRotation)
    }
}
