// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detection shapes: containment plus normalized footprint coordinates.

use glam::Vec3;
use kurbo::{Point, Rect};

use crate::types::DetectionBounds;

/// A detection shape in the volume's local frame.
///
/// Returns the point's normalized footprint coordinate when the shape accepts
/// it, and `None` otherwise.
pub trait DetectionConstraint {
    /// Test `local` and map it into the shape's normalized footprint.
    fn contains_point(&self, local: Vec3) -> Option<Point>;
}

impl<C: DetectionConstraint + ?Sized> DetectionConstraint for &C {
    fn contains_point(&self, local: Vec3) -> Option<Point> {
        (**self).contains_point(local)
    }
}

/// Box-shaped detection with a rectangular ground footprint.
///
/// Containment uses the full 3D bounds, vertical extent included. Accepted
/// points are normalized over the footprint, whose first axis is local `x` and
/// second axis is local `z`.
///
/// ```
/// use glam::Vec3;
/// use gridsense_detect::{Constraint2D, DetectionBounds, DetectionConstraint};
///
/// let bounds = DetectionBounds::new(Vec3::ZERO, Vec3::new(5.0, 2.0, 5.0)).unwrap();
/// let c = Constraint2D::new(bounds);
/// let p = c.contains_point(Vec3::new(2.5, 0.0, -2.5)).unwrap();
/// assert_eq!((p.x, p.y), (0.75, 0.25));
/// assert!(c.contains_point(Vec3::new(0.0, 2.5, 0.0)).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraint2D {
    bounds: DetectionBounds,
    footprint: Rect,
}

impl Constraint2D {
    /// Create a constraint for `bounds`.
    pub fn new(bounds: DetectionBounds) -> Self {
        Self {
            bounds,
            footprint: footprint_of(&bounds),
        }
    }

    /// The 3D bounds.
    pub fn bounds(&self) -> DetectionBounds {
        self.bounds
    }

    /// Ground footprint: `(x0, y0)` is the min corner's `(x, z)`, `(x1, y1)` the max corner's.
    pub fn footprint(&self) -> Rect {
        self.footprint
    }

    /// Replace the bounds and recompute the footprint together.
    pub fn set_bounds(&mut self, bounds: DetectionBounds) {
        *self = Self::new(bounds);
    }

    fn normalize(&self, local: Vec3) -> Point {
        let r = self.footprint;
        Point::new(
            (f64::from(local.x) - r.x0) / r.width(),
            (f64::from(local.z) - r.y0) / r.height(),
        )
    }
}

impl Default for Constraint2D {
    fn default() -> Self {
        Self::new(DetectionBounds::default())
    }
}

impl DetectionConstraint for Constraint2D {
    fn contains_point(&self, local: Vec3) -> Option<Point> {
        self.bounds
            .contains(local)
            .then(|| self.normalize(local))
    }
}

// Built from the same f32 corners `contains` tests against, so face points map to 0 and 1.
fn footprint_of(bounds: &DetectionBounds) -> Rect {
    let (min, max) = (bounds.min(), bounds.max());
    Rect::new(
        f64::from(min.x),
        f64::from(min.z),
        f64::from(max.x),
        f64::from(max.z),
    )
}
