// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: layer masks, observer transforms, and detection bounds.

use glam::{EulerRot, Quat, Vec3};

use crate::error::Error;

bitflags::bitflags! {
    /// Scene layers a query considers. Bit `n` is layer `n`.
    ///
    /// Only [`LayerMask::DEFAULT`] is named; build other layers with [`LayerMask::layer`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LayerMask: u32 {
        /// Layer 0, where objects live unless placed elsewhere.
        const DEFAULT = 1;
        const _ = !0;
    }
}

impl LayerMask {
    /// The mask for the single layer `n`, or `None` if `n >= 32`.
    pub const fn layer(n: u32) -> Option<Self> {
        match 1_u32.checked_shl(n) {
            Some(bits) => Some(Self::from_bits_retain(bits)),
            None => None,
        }
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::all()
    }
}

/// World pose of the observer the detection volume follows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverTransform {
    /// World position.
    pub position: Vec3,
    /// World rotation.
    pub rotation: Quat,
}

impl ObserverTransform {
    /// Observer at the origin, facing +z.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Create an observer pose.
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Heading around the up (`y`) axis, in radians.
    ///
    /// This is the first angle of a Y-X-Z decomposition, so pitch and roll do
    /// not leak into it.
    pub fn yaw(&self) -> f32 {
        self.rotation.to_euler(EulerRot::YXZ).0
    }
}

impl Default for ObserverTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Axis-aligned detection box in the observer's local frame, before rotation.
///
/// Center and half extents can only be set together, through [`DetectionBounds::new`],
/// which rejects negative or non-finite extents, corners that overflow `f32`, and
/// a zero-area ground footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BoundsRepr", into = "BoundsRepr")
)]
pub struct DetectionBounds {
    center: Vec3,
    extents: Vec3,
}

impl DetectionBounds {
    /// Create bounds from a center offset and half extents.
    ///
    /// The vertical (`y`) extent may be zero; `x` and `z` must be positive.
    pub fn new(center: Vec3, extents: Vec3) -> Result<Self, Error> {
        if !center.is_finite() || !extents.is_finite() {
            return Err(Error::NonFinite);
        }
        if extents.cmplt(Vec3::ZERO).any() {
            return Err(Error::NegativeExtent { extents });
        }
        if extents.x == 0.0 || extents.z == 0.0 {
            return Err(Error::DegenerateFootprint {
                width: extents.x * 2.0,
                depth: extents.z * 2.0,
            });
        }
        let bounds = Self { center, extents };
        let (min, max) = (bounds.min(), bounds.max());
        if !min.is_finite() || !max.is_finite() || !bounds.size().is_finite() {
            return Err(Error::NonFinite);
        }
        // Extents too small to separate the corners at this center.
        if max.x <= min.x || max.z <= min.z {
            return Err(Error::DegenerateFootprint {
                width: max.x - min.x,
                depth: max.z - min.z,
            });
        }
        Ok(bounds)
    }

    /// Create bounds from min and max corners.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Result<Self, Error> {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    /// Center offset from the observer.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Half extents.
    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    /// Full size (twice the half extents).
    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    /// Maximum corner.
    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Whether `point` lies inside. Faces are inclusive.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min()).all() && point.cmple(self.max()).all()
    }
}

impl Default for DetectionBounds {
    /// A 10 x 2 x 10 box centered on the observer.
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            extents: Vec3::new(5.0, 1.0, 5.0),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
struct BoundsRepr {
    center: Vec3,
    extents: Vec3,
}

#[cfg(feature = "serde")]
impl TryFrom<BoundsRepr> for DetectionBounds {
    type Error = Error;

    fn try_from(repr: BoundsRepr) -> Result<Self, Error> {
        Self::new(repr.center, repr.extents)
    }
}

#[cfg(feature = "serde")]
impl From<DetectionBounds> for BoundsRepr {
    fn from(bounds: DetectionBounds) -> Self {
        Self {
            center: bounds.center,
            extents: bounds.extents,
        }
    }
}
