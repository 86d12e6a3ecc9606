// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detector configuration as a plain value.

use glam::Quat;

use crate::query::CapacityPolicy;
use crate::rotation::RotationPolicy;
use crate::types::{DetectionBounds, LayerMask};

/// Everything a [`Detector2D`](crate::Detector2D) is configured with.
///
/// With the `serde` feature, missing fields fall back to their defaults and
/// bounds are validated while deserializing. Use
/// [`Detector2D::from_config`](crate::Detector2D::from_config) to check the rest.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DetectorConfig {
    /// How the volume follows the observer.
    pub rotation: RotationPolicy,
    /// Rotation for [`RotationPolicy::Fixed`].
    pub world_rotation: Quat,
    /// Volume bounds in the observer's local frame.
    pub bounds: DetectionBounds,
    /// Layers the scene query considers.
    pub layer_mask: LayerMask,
    /// Candidate buffer sizing.
    pub capacity: CapacityPolicy,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            rotation: RotationPolicy::default(),
            world_rotation: Quat::IDENTITY,
            bounds: DetectionBounds::default(),
            layer_mask: LayerMask::default(),
            capacity: CapacityPolicy::default(),
        }
    }
}
