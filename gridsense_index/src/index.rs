// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::grid::{Grid, GridScalar};
use crate::types::Aabb3D;

/// Generational handle for entries.
///
/// The default key (slot 0, generation 0) never refers to a live entry, since
/// generations start at 1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(u32, u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Keys store 32-bit slots; an index never holds more than u32::MAX entries."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mark {
    Added,
    Updated,
    Removed,
}

#[derive(Clone, Debug)]
struct Entry<T, P> {
    generation: u32,
    aabb: Aabb3D<T>,
    payload: P,
    mark: Option<Mark>,
    // Visible to queries: false until the first commit after insert.
    committed: bool,
    // Staged AABB for a committed entry; `aabb` stays what the backend holds.
    pending: Option<Aabb3D<T>>,
}

/// Summary of what a [`IndexGeneric::commit`] applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// Entries that became visible to queries.
    pub added: usize,
    /// Entries that stopped being visible to queries.
    pub removed: usize,
    /// Entries whose AABB changed.
    pub moved: usize,
}

impl Changes {
    /// True if the commit applied nothing.
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.moved == 0
    }
}

/// A generic AABB index parameterized by a spatial backend.
///
/// Mutations are staged and become visible to queries on [`IndexGeneric::commit`].
#[derive(Debug)]
pub struct IndexGeneric<T: Copy + PartialOrd + Debug, P: Copy + Debug, B: Backend<T, P>> {
    entries: Vec<Option<Entry<T, P>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    live: usize,
    backend: B,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T, P> + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self::with_backend(B::default())
    }
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T, P>,
{
    /// Create an empty index over an explicitly constructed backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            live: 0,
            backend,
        }
    }

    /// Reserve space for at least `n` entries.
    pub fn reserve(&mut self, n: usize) {
        self.entries.reserve(n);
    }

    /// Number of entries visible to queries (as of the last commit).
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if no entries are visible to queries.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Insert a new AABB with payload. Returns a stable handle `Key`.
    pub fn insert(&mut self, aabb: Aabb3D<T>, payload: P) -> Key {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.entries.push(None);
            self.generations.push(1);
            (self.entries.len() - 1, 1)
        };
        self.entries[idx] = Some(Entry {
            generation,
            aabb,
            payload,
            mark: Some(Mark::Added),
            committed: false,
            pending: None,
        });
        Key::new(idx, generation)
    }

    /// Update an existing AABB. Stale keys are ignored.
    pub fn update(&mut self, key: Key, aabb: Aabb3D<T>) {
        if let Some(e) = self.entry_mut(key) {
            match e.mark {
                Some(Mark::Removed) => {}
                Some(Mark::Added) => e.aabb = aabb,
                Some(Mark::Updated) | None => {
                    e.pending = Some(aabb);
                    e.mark = Some(Mark::Updated);
                }
            }
        }
    }

    /// Remove an existing AABB. Stale keys are ignored.
    pub fn remove(&mut self, key: Key) {
        if let Some(e) = self.entry_mut(key) {
            if e.committed {
                e.mark = Some(Mark::Removed);
            } else {
                self.entries[key.idx()] = None;
                self.free_list.push(key.idx());
            }
        }
    }

    /// Payload and committed AABB for a live key.
    pub fn get(&self, key: Key) -> Option<(Aabb3D<T>, P)> {
        let e = self.entries.get(key.idx())?.as_ref()?;
        (e.generation == key.1 && e.committed).then_some((e.aabb, e.payload))
    }

    /// Clear the index, including staged changes.
    ///
    /// Slot generations survive, so keys issued before the clear stay stale.
    pub fn clear(&mut self) {
        for e in &mut self.entries {
            *e = None;
        }
        self.free_list.clear();
        self.free_list.extend((0..self.entries.len()).rev());
        self.live = 0;
        self.backend.clear();
    }

    /// Apply staged changes to the backend and make them visible to queries.
    pub fn commit(&mut self) -> Changes {
        let mut changes = Changes::default();
        for i in 0..self.entries.len() {
            let Some(entry) = self.entries[i].as_mut() else {
                continue;
            };
            match entry.mark.take() {
                Some(Mark::Added) => {
                    self.backend.insert(i, entry.aabb);
                    entry.committed = true;
                    self.live += 1;
                    changes.added += 1;
                }
                Some(Mark::Removed) => {
                    self.backend.remove(i);
                    self.entries[i] = None;
                    self.free_list.push(i);
                    self.live -= 1;
                    changes.removed += 1;
                }
                Some(Mark::Updated) => {
                    if let Some(next) = entry.pending.take()
                        && next != entry.aabb
                    {
                        entry.aabb = next;
                        self.backend.update(i, next);
                        changes.moved += 1;
                    }
                }
                None => {}
            }
        }
        changes
    }

    /// Query for entries whose AABB contains the point.
    pub fn query_point(&self, x: T, y: T, z: T) -> impl Iterator<Item = (Key, P)> + '_ {
        self.backend
            .query_point(x, y, z)
            .filter_map(move |i| self.committed_entry(i))
            .filter(move |(_, e)| e.aabb.contains_point(x, y, z))
            .map(|(key, e)| (key, e.payload))
    }

    /// Query for entries whose AABB overlaps the given box (touching counts).
    pub fn query_aabb(&self, aabb: Aabb3D<T>) -> impl Iterator<Item = (Key, Aabb3D<T>, P)> + '_ {
        self.backend
            .query_aabb(aabb)
            .filter_map(move |i| self.committed_entry(i))
            .filter(move |(_, e)| e.aabb.overlaps(&aabb))
            .map(|(key, e)| (key, e.aabb, e.payload))
    }

    fn committed_entry(&self, i: usize) -> Option<(Key, &Entry<T, P>)> {
        let e = self.entries.get(i)?.as_ref()?;
        e.committed.then(|| (Key::new(i, e.generation), e))
    }

    fn entry_mut(&mut self, key: Key) -> Option<&mut Entry<T, P>> {
        let e = self.entries.get_mut(key.idx())?.as_mut()?;
        if e.generation != key.1 {
            return None;
        }
        Some(e)
    }
}

/// Default index using a flat vector backend.
pub type Index<T, P> = IndexGeneric<T, P, crate::backends::flatvec::FlatVec<T, P>>;

impl<T: Copy + PartialOrd + Debug, P: Copy + Debug> Default for Index<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: GridScalar, P: Copy + Debug> Index<T, P> {
    /// Create a grid-backed index over the XZ plane with the given cell size and origin.
    pub fn with_uniform_grid(
        cell_x: T,
        cell_z: T,
        origin_x: T,
        origin_z: T,
    ) -> IndexGeneric<T, P, Grid<T, P>> {
        IndexGeneric::with_backend(Grid::new(cell_x, cell_z, origin_x, origin_z))
    }
}
