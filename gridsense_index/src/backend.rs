// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between [`IndexGeneric`](crate::IndexGeneric) and its spatial structure.

use alloc::boxed::Box;
use core::fmt::Debug;

use crate::types::Aabb3D;

/// Spatial structure holding committed AABBs by slot number.
///
/// The index owns slot allocation and payloads; a backend only answers which
/// slots might match a query. Answers may include extra slots but must never
/// miss one, since the index applies the exact test afterwards.
pub trait Backend<T: Copy + PartialOrd + Debug, P: Copy + Debug> {
    /// Start tracking `slot` with `aabb`.
    fn insert(&mut self, slot: usize, aabb: Aabb3D<T>);

    /// Replace the AABB of a tracked slot.
    fn update(&mut self, slot: usize, aabb: Aabb3D<T>);

    /// Stop tracking `slot`.
    fn remove(&mut self, slot: usize);

    /// Drop every slot.
    fn clear(&mut self);

    /// Candidate slots whose AABB may contain `(x, y, z)`.
    fn query_point<'a>(&'a self, x: T, y: T, z: T) -> Box<dyn Iterator<Item = usize> + 'a>;

    /// Candidate slots whose AABB may overlap `aabb`.
    fn query_aabb<'a>(&'a self, aabb: Aabb3D<T>) -> Box<dyn Iterator<Item = usize> + 'a>;
}
