// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Oriented bounding box used as the overlap query volume.

use glam::{Mat3, Quat, Vec3};

/// Slack added to projected radii so near-parallel edge pairs, whose cross
/// product is almost zero, do not produce false separations.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A box with world center, half extents, and world rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedBox {
    /// World-space center.
    pub center: Vec3,
    /// Half extents along the box's own axes.
    pub half_extents: Vec3,
    /// World rotation of the box axes.
    pub rotation: Quat,
}

impl OrientedBox {
    /// Create an oriented box.
    pub const fn new(center: Vec3, half_extents: Vec3, rotation: Quat) -> Self {
        Self {
            center,
            half_extents,
            rotation,
        }
    }

    /// Conservative world-space AABB as `(min, max)`.
    pub fn world_aabb(&self) -> (Vec3, Vec3) {
        let r = Mat3::from_quat(self.rotation).abs();
        let reach = r * self.half_extents;
        (self.center - reach, self.center + reach)
    }

    /// Whether `point` lies inside. Faces are inclusive.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let local = self.rotation.conjugate() * (point - self.center);
        local.abs().cmple(self.half_extents).all()
    }

    /// Separating-axis test against a world AABB given by its corners.
    ///
    /// Touching boxes count as overlapping.
    pub fn intersects_aabb(&self, min: Vec3, max: Vec3) -> bool {
        let b_center = (min + max) * 0.5;
        let eb = (max - min) * 0.5;
        let ea = self.half_extents;

        // Rows are this box's axes in world space; entry [i][j] is also the
        // cosine between our axis i and world axis j.
        let m = Mat3::from_quat(self.rotation);
        let axes = [m.x_axis, m.y_axis, m.z_axis];
        let d = b_center - self.center;
        let t = Vec3::new(d.dot(axes[0]), d.dot(axes[1]), d.dot(axes[2]));

        let mut r = [[0.0_f32; 3]; 3];
        let mut abs_r = [[0.0_f32; 3]; 3];
        for i in 0..3 {
            for j in 0..3 {
                r[i][j] = axes[i][j];
                abs_r[i][j] = r[i][j].abs() + PARALLEL_EPSILON;
            }
        }

        // Our face axes.
        for i in 0..3 {
            let rb = eb[0] * abs_r[i][0] + eb[1] * abs_r[i][1] + eb[2] * abs_r[i][2];
            if t[i].abs() > ea[i] + rb {
                return false;
            }
        }

        // World face axes.
        for j in 0..3 {
            let ra = ea[0] * abs_r[0][j] + ea[1] * abs_r[1][j] + ea[2] * abs_r[2][j];
            let dist = t[0] * r[0][j] + t[1] * r[1][j] + t[2] * r[2][j];
            if dist.abs() > ra + eb[j] {
                return false;
            }
        }

        // Edge-edge axes: our axis i crossed with world axis j.
        for i in 0..3 {
            let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
            for j in 0..3 {
                let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
                let ra = ea[i1] * abs_r[i2][j] + ea[i2] * abs_r[i1][j];
                let rb = eb[j1] * abs_r[i][j2] + eb[j2] * abs_r[i][j1];
                let dist = t[i2] * r[i1][j] - t[i1] * r[i2][j];
                if dist.abs() > ra + rb {
                    return false;
                }
            }
        }

        true
    }
}
