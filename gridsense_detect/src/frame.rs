// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World/local frame of the detection volume.

use glam::{Affine3A, Quat, Vec3};

/// Rigid transform between world space and the detection volume's local frame.
///
/// Built fresh every tick from the observer position and the resolved rotation;
/// the observer may have moved since the last one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTransform {
    local_to_world: Affine3A,
    world_to_local: Affine3A,
}

impl FrameTransform {
    /// Frame translated to `origin` and rotated by `rotation`, unit scale.
    ///
    /// `rotation` must be a unit quaternion.
    pub fn new(origin: Vec3, rotation: Quat) -> Self {
        // Rigid inverse: conjugate rotation, rotated negated translation.
        let inverse = rotation.conjugate();
        Self {
            local_to_world: Affine3A::from_rotation_translation(rotation, origin),
            world_to_local: Affine3A::from_rotation_translation(inverse, -(inverse * origin)),
        }
    }

    /// Map a world-space point into the local frame.
    #[inline]
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.world_to_local.transform_point3(world)
    }

    /// Map a local point back into world space.
    #[inline]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.local_to_world.transform_point3(local)
    }

    /// The world→local affine map.
    pub fn world_to_local(&self) -> Affine3A {
        self.world_to_local
    }

    /// The local→world affine map.
    pub fn local_to_world(&self) -> Affine3A {
        self.local_to_world
    }
}
