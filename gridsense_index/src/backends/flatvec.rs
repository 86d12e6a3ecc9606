// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear-scan backend for small scenes.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;

use crate::backend::Backend;
use crate::types::Aabb3D;

/// Backend that keeps one AABB per slot and scans all of them per query.
///
/// Candidates come back in ascending slot order and are exact: no slot is
/// reported that fails the query test.
pub struct FlatVec<T: Copy + PartialOrd + Debug, P: Copy + Debug> {
    slots: Vec<Option<Aabb3D<T>>>,
    occupied: usize,
    _payload: PhantomData<P>,
}

impl<T: Copy + PartialOrd + Debug, P: Copy + Debug> FlatVec<T, P> {
    fn scan<'a>(
        &'a self,
        mut hit: impl FnMut(&Aabb3D<T>) -> bool + 'a,
    ) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(
            self.slots
                .iter()
                .enumerate()
                .filter_map(move |(i, s)| s.as_ref().filter(|a| hit(a)).map(|_| i)),
        )
    }
}

impl<T: Copy + PartialOrd + Debug, P: Copy + Debug> Default for FlatVec<T, P> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            occupied: 0,
            _payload: PhantomData,
        }
    }
}

impl<T: Copy + PartialOrd + Debug, P: Copy + Debug> Debug for FlatVec<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("slots", &self.slots.len())
            .field("occupied", &self.occupied)
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd + Debug, P: Copy + Debug> Backend<T, P> for FlatVec<T, P> {
    fn insert(&mut self, slot: usize, aabb: Aabb3D<T>) {
        if slot >= self.slots.len() {
            self.slots.resize(slot + 1, None);
        }
        if self.slots[slot].replace(aabb).is_none() {
            self.occupied += 1;
        }
    }

    fn update(&mut self, slot: usize, aabb: Aabb3D<T>) {
        if let Some(Some(a)) = self.slots.get_mut(slot) {
            *a = aabb;
        }
    }

    fn remove(&mut self, slot: usize) {
        if let Some(s) = self.slots.get_mut(slot)
            && s.take().is_some()
        {
            self.occupied -= 1;
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.occupied = 0;
    }

    fn query_point<'a>(&'a self, x: T, y: T, z: T) -> Box<dyn Iterator<Item = usize> + 'a> {
        self.scan(move |a| a.contains_point(x, y, z))
    }

    fn query_aabb<'a>(&'a self, aabb: Aabb3D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        self.scan(move |a| a.overlaps(&aabb))
    }
}
