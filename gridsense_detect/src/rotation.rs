// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotation policies for the detection volume.

use glam::Quat;

use crate::types::ObserverTransform;

/// Whether and how the detection volume rotates with its observer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationPolicy {
    /// Follow the observer's heading only; the volume stays level.
    #[default]
    FollowYawOnly,
    /// Follow the observer's full 3D orientation.
    FollowFullOrientation,
    /// Ignore the observer and use a fixed world rotation.
    Fixed,
}

impl RotationPolicy {
    /// World rotation to apply to the detection volume this tick.
    ///
    /// `fixed` is only consulted by [`RotationPolicy::Fixed`].
    pub fn resolve(self, observer: &ObserverTransform, fixed: Quat) -> Quat {
        match self {
            Self::FollowYawOnly => Quat::from_rotation_y(observer.yaw()),
            Self::FollowFullOrientation => observer.rotation,
            Self::Fixed => fixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{EulerRot, Vec3};

    fn tilted_observer() -> ObserverTransform {
        ObserverTransform::new(
            Vec3::new(3.0, 1.0, -2.0),
            Quat::from_euler(EulerRot::YXZ, 0.8, 0.25, -0.3),
        )
    }

    #[test]
    fn yaw_only_discards_pitch_and_roll() {
        let observer = tilted_observer();
        let q = RotationPolicy::FollowYawOnly.resolve(&observer, Quat::IDENTITY);
        let (yaw, pitch, roll) = q.to_euler(EulerRot::YXZ);
        assert!((yaw - 0.8).abs() < 1e-5, "yaw {yaw}");
        assert!(pitch.abs() < 1e-5, "pitch {pitch}");
        assert!(roll.abs() < 1e-5, "roll {roll}");
        assert!((q * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-5), "volume must stay level");
    }

    #[test]
    fn full_orientation_is_observer_rotation() {
        let observer = tilted_observer();
        let q = RotationPolicy::FollowFullOrientation.resolve(&observer, Quat::IDENTITY);
        assert_eq!(q, observer.rotation);
    }

    #[test]
    fn fixed_ignores_observer() {
        let fixed = Quat::from_rotation_x(0.5);
        for observer in [ObserverTransform::IDENTITY, tilted_observer()] {
            assert_eq!(RotationPolicy::Fixed.resolve(&observer, fixed), fixed);
        }
    }

    #[test]
    fn yaw_only_of_pure_yaw_is_unchanged() {
        let observer = ObserverTransform::new(Vec3::ZERO, Quat::from_rotation_y(-2.0));
        let q = RotationPolicy::FollowYawOnly.resolve(&observer, Quat::IDENTITY);
        assert!(q.abs_diff_eq(observer.rotation, 1e-5));
    }
}
