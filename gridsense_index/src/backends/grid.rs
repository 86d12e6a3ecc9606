// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform ground-plane grid backends.
//!
//! Cells tile the XZ plane; each cell is an unbounded column along `y`. Scenes
//! whose objects spread across a floor or terrain bucket well this way, while
//! vertical stacking within one column falls back to a short scan.

use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb3D;

/// Scalar usable as a grid coordinate.
pub trait GridScalar: Copy + PartialOrd + Debug {
    /// Floor of `(v - origin) / cell` as a signed cell index.
    fn cell_index(v: Self, origin: Self, cell: Self) -> i64;

    /// Whether a cell size is usable (strictly positive and finite).
    fn valid_cell(cell: Self) -> bool;
}

impl GridScalar for f32 {
    #[inline]
    fn cell_index(v: Self, origin: Self, cell: Self) -> i64 {
        let q = (v - origin) / cell;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Cell indices saturate; coordinates beyond i64 range are not meaningful."
        )]
        let i = q as i64;
        // `as` truncates toward zero; step down for negative fractions.
        if (i as f32) > q { i.saturating_sub(1) } else { i }
    }

    #[inline]
    fn valid_cell(cell: Self) -> bool {
        cell > 0.0 && cell.is_finite()
    }
}

impl GridScalar for f64 {
    #[inline]
    fn cell_index(v: Self, origin: Self, cell: Self) -> i64 {
        let q = (v - origin) / cell;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Cell indices saturate; coordinates beyond i64 range are not meaningful."
        )]
        let i = q as i64;
        // `as` truncates toward zero; step down for negative fractions.
        if (i as f64) > q { i.saturating_sub(1) } else { i }
    }

    #[inline]
    fn valid_cell(cell: Self) -> bool {
        cell > 0.0 && cell.is_finite()
    }
}

/// Uniform grid backend over the XZ plane.
///
/// Coordinates are mapped to integer cells by floor-division of
/// `(x - origin_x) / cell_x` and `(z - origin_z) / cell_z`, so negative
/// coordinates are supported.
pub struct Grid<T: GridScalar, P: Copy + Debug> {
    cell_x: T,
    cell_z: T,
    origin_x: T,
    origin_z: T,
    entries: Vec<Option<Aabb3D<T>>>,
    cells: BTreeMap<(i64, i64), Vec<usize>>,
    _p: core::marker::PhantomData<P>,
}

/// Grid backend for `f32` coordinates.
pub type GridF32<P> = Grid<f32, P>;

/// Grid backend for `f64` coordinates.
pub type GridF64<P> = Grid<f64, P>;

impl<T: GridScalar, P: Copy + Debug> Grid<T, P> {
    /// Create a grid backend with the given cell size and origin offset.
    ///
    /// Cell sizes must be strictly positive.
    pub fn new(cell_x: T, cell_z: T, origin_x: T, origin_z: T) -> Self {
        debug_assert!(
            T::valid_cell(cell_x) && T::valid_cell(cell_z),
            "cell sizes must be positive and finite"
        );
        Self {
            cell_x,
            cell_z,
            origin_x,
            origin_z,
            entries: Vec::new(),
            cells: BTreeMap::new(),
            _p: core::marker::PhantomData,
        }
    }

    fn key_for(&self, x: T, z: T) -> (i64, i64) {
        (
            T::cell_index(x, self.origin_x, self.cell_x),
            T::cell_index(z, self.origin_z, self.cell_z),
        )
    }

    fn cells_for_aabb(&self, a: &Aabb3D<T>) -> impl Iterator<Item = (i64, i64)> + use<T, P> {
        let (min_x, min_z) = self.key_for(a.min_x, a.min_z);
        let (max_x, max_z) = self.key_for(a.max_x, a.max_z);
        (min_z..=max_z).flat_map(move |z| (min_x..=max_x).map(move |x| (x, z)))
    }

    fn add_to_cells(&mut self, slot: usize, aabb: &Aabb3D<T>) {
        let keys: Vec<_> = self.cells_for_aabb(aabb).collect();
        for key in keys {
            self.cells.entry(key).or_default().push(slot);
        }
    }

    fn remove_from_cells(&mut self, slot: usize) {
        let Some(Some(old)) = self.entries.get(slot).copied() else {
            return;
        };
        let keys: Vec<_> = self.cells_for_aabb(&old).collect();
        for key in keys {
            if let Some(slots) = self.cells.get_mut(&key) {
                if let Some(pos) = slots.iter().position(|&s| s == slot) {
                    slots.swap_remove(pos);
                }
                if slots.is_empty() {
                    self.cells.remove(&key);
                }
            }
        }
    }

    fn collect_cells(&self, keys: impl Iterator<Item = (i64, i64)>) -> BTreeSet<usize> {
        let mut set = BTreeSet::new();
        for key in keys {
            if let Some(slots) = self.cells.get(&key) {
                set.extend(slots.iter().copied());
            }
        }
        set
    }
}

impl<T: GridScalar, P: Copy + Debug> Backend<T, P> for Grid<T, P> {
    fn insert(&mut self, slot: usize, aabb: Aabb3D<T>) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        self.remove_from_cells(slot);
        self.entries[slot] = Some(aabb);
        self.add_to_cells(slot, &aabb);
    }
    fn update(&mut self, slot: usize, aabb: Aabb3D<T>) {
        if slot >= self.entries.len() {
            return;
        }
        self.remove_from_cells(slot);
        self.entries[slot] = Some(aabb);
        self.add_to_cells(slot, &aabb);
    }
    fn remove(&mut self, slot: usize) {
        self.remove_from_cells(slot);
        if let Some(e) = self.entries.get_mut(slot) {
            *e = None;
        }
    }
    fn clear(&mut self) {
        self.entries.clear();
        self.cells.clear();
    }
    fn query_point<'a>(&'a self, x: T, _y: T, z: T) -> Box<dyn Iterator<Item = usize> + 'a> {
        let key = self.key_for(x, z);
        Box::new(self.collect_cells(core::iter::once(key)).into_iter())
    }
    fn query_aabb<'a>(&'a self, aabb: Aabb3D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(self.collect_cells(self.cells_for_aabb(&aabb)).into_iter())
    }
}

impl<T: GridScalar, P: Copy + Debug> Debug for Grid<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.entries.len();
        let alive = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("Grid")
            .field("cell_x", &self.cell_x)
            .field("cell_z", &self.cell_z)
            .field("origin_x", &self.origin_x)
            .field("origin_z", &self.origin_z)
            .field("total_slots", &total)
            .field("alive", &alive)
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}
