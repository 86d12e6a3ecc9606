// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.
//!
//! Detection itself never fails. Every fallible operation in this crate is a
//! setter or constructor, and a rejected value leaves prior state untouched.

use glam::Vec3;

/// A configuration value was rejected.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A bounds component was NaN or infinite.
    #[error("detection bounds must be finite")]
    NonFinite,
    /// A half extent was negative.
    #[error("half extents must be non-negative, got {extents}")]
    NegativeExtent {
        /// The rejected half extents.
        extents: Vec3,
    },
    /// The ground-plane footprint has zero width or depth.
    #[error("footprint needs positive width and depth, got {width} x {depth}")]
    DegenerateFootprint {
        /// Full size along x.
        width: f32,
        /// Full size along z.
        depth: f32,
    },
    /// Capacity policy with `initial == 0` or `max < initial`.
    #[error("capacity policy needs 0 < initial <= max, got initial {initial}, max {max}")]
    InvalidCapacity {
        /// Requested initial capacity.
        initial: usize,
        /// Requested maximum capacity.
        max: usize,
    },
    /// Fixed world rotation was not a unit quaternion.
    #[error("fixed world rotation must be a unit quaternion")]
    NonUnitRotation,
}
