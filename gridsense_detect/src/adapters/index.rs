// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene query over a `gridsense_index` collider index.
//!
//! ## Feature
//!
//! Enable with `index_adapter` (on by default).
//!
//! ## Notes
//!
//! Colliders are world AABBs tagged with a caller payload and a layer mask.
//! Overlap queries run a broad phase through the index using the query
//! volume's world AABB, then keep colliders on the mask whose AABB passes the
//! oriented-box separating-axis test. An object's position is the center of
//! its committed AABB.
//!
//! Like the index, edits are staged: inserts, moves, and removals are not seen
//! by queries until [`IndexScene::commit`].

use core::fmt::Debug;

use glam::Vec3;
use gridsense_index::{Aabb3D, Backend, Changes, FlatVec, Grid, IndexGeneric, Key};

use crate::obb::OrientedBox;
use crate::query::SceneQuery;
use crate::types::LayerMask;

/// Index payload: the caller's tag plus the collider's layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Collider<P> {
    /// Caller-defined tag.
    pub tag: P,
    /// Layers this collider is on.
    pub layers: LayerMask,
}

/// A collider scene backed by a spatial index.
pub struct IndexScene<P, B = FlatVec<f32, Collider<P>>>
where
    P: Copy + Debug,
    B: Backend<f32, Collider<P>>,
{
    index: IndexGeneric<f32, Collider<P>, B>,
}

impl<P: Copy + Debug> IndexScene<P> {
    /// Empty scene over a linear-scan backend.
    pub fn new() -> Self {
        Self {
            index: IndexGeneric::new(),
        }
    }

    /// Empty scene over a uniform XZ grid with the given cell size and origin.
    pub fn with_uniform_grid(
        cell_x: f32,
        cell_z: f32,
        origin_x: f32,
        origin_z: f32,
    ) -> IndexScene<P, Grid<f32, Collider<P>>> {
        IndexScene {
            index: IndexGeneric::with_backend(Grid::new(cell_x, cell_z, origin_x, origin_z)),
        }
    }
}

impl<P: Copy + Debug> Default for IndexScene<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, B> IndexScene<P, B>
where
    P: Copy + Debug,
    B: Backend<f32, Collider<P>>,
{
    /// Stage a collider centered at `center` with `half_extents`.
    pub fn insert(&mut self, center: Vec3, half_extents: Vec3, tag: P, layers: LayerMask) -> Key {
        self.index.insert(aabb_of(center, half_extents), Collider { tag, layers })
    }

    /// Stage a move of `key` to a new center and size. Stale keys are ignored.
    pub fn move_to(&mut self, key: Key, center: Vec3, half_extents: Vec3) {
        self.index.update(key, aabb_of(center, half_extents));
    }

    /// Stage removal of `key`. Stale keys are ignored.
    pub fn remove(&mut self, key: Key) {
        self.index.remove(key);
    }

    /// Make staged edits visible to queries.
    pub fn commit(&mut self) -> Changes {
        self.index.commit()
    }

    /// Committed collider payload for `key`.
    pub fn collider(&self, key: Key) -> Option<Collider<P>> {
        self.index.get(key).map(|(_, c)| c)
    }

    /// Number of committed colliders.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if no collider is committed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The underlying index.
    pub fn index(&self) -> &IndexGeneric<f32, Collider<P>, B> {
        &self.index
    }
}

impl<P, B> SceneQuery for IndexScene<P, B>
where
    P: Copy + Debug,
    B: Backend<f32, Collider<P>>,
{
    type Handle = Key;

    fn overlap_box(&self, volume: &OrientedBox, mask: LayerMask, out: &mut [Key]) -> usize {
        let (min, max) = volume.world_aabb();
        let broad = Aabb3D::new(min.x, min.y, min.z, max.x, max.y, max.z);
        let hits = self
            .index
            .query_aabb(broad)
            .filter(|(_, aabb, c)| {
                c.layers.intersects(mask) && {
                    let (lo, hi) = corners(aabb);
                    volume.intersects_aabb(lo, hi)
                }
            })
            .map(|(key, _, _)| key);
        let mut written = 0;
        for (slot, key) in out.iter_mut().zip(hits) {
            *slot = key;
            written += 1;
        }
        written
    }

    fn position(&self, key: Key) -> Option<Vec3> {
        let (aabb, _) = self.index.get(key)?;
        let (lo, hi) = corners(&aabb);
        Some((lo + hi) * 0.5)
    }
}

impl<P, B> Debug for IndexScene<P, B>
where
    P: Copy + Debug,
    B: Backend<f32, Collider<P>> + Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexScene").field("index", &self.index).finish()
    }
}

fn aabb_of(center: Vec3, half_extents: Vec3) -> Aabb3D<f32> {
    Aabb3D::<f32>::from_center_extents(center.to_array(), half_extents.to_array())
}

fn corners(aabb: &Aabb3D<f32>) -> (Vec3, Vec3) {
    (
        Vec3::new(aabb.min_x, aabb.min_y, aabb.min_z),
        Vec3::new(aabb.max_x, aabb.max_y, aabb.max_z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Detector2D, DetectionBounds, ObserverTransform};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::f32::consts::FRAC_PI_4;
    use glam::Quat;

    fn query<P: Copy + Debug, B: Backend<f32, Collider<P>>>(
        scene: &IndexScene<P, B>,
        volume: &OrientedBox,
        mask: LayerMask,
    ) -> Vec<Key> {
        let mut out = vec![Key::default(); 64];
        let n = scene.overlap_box(volume, mask, &mut out);
        out.truncate(n);
        out
    }

    #[test]
    fn staged_edits_wait_for_commit() {
        let mut scene: IndexScene<u32> = IndexScene::new();
        let k = scene.insert(Vec3::ZERO, Vec3::splat(0.5), 1, LayerMask::DEFAULT);
        let volume = OrientedBox::new(Vec3::ZERO, Vec3::ONE, Quat::IDENTITY);
        assert!(query(&scene, &volume, LayerMask::all()).is_empty());
        assert_eq!(scene.position(k), None);

        let changes = scene.commit();
        assert_eq!(changes.added, 1);
        assert_eq!(query(&scene, &volume, LayerMask::all()), [k]);
        assert_eq!(scene.position(k), Some(Vec3::ZERO));

        scene.move_to(k, Vec3::new(20.0, 0.0, 0.0), Vec3::splat(0.5));
        assert_eq!(query(&scene, &volume, LayerMask::all()), [k]);
        assert_eq!(scene.commit().moved, 1);
        assert!(query(&scene, &volume, LayerMask::all()).is_empty());
        assert_eq!(scene.position(k), Some(Vec3::new(20.0, 0.0, 0.0)));

        scene.remove(k);
        let _ = scene.commit();
        assert_eq!(scene.position(k), None);
        assert!(scene.is_empty());
    }

    #[test]
    fn narrow_phase_rejects_broad_phase_corner_hits() {
        let mut scene: IndexScene<()> = IndexScene::new();
        scene.insert(Vec3::new(1.2, 0.0, 1.2), Vec3::splat(0.1), (), LayerMask::DEFAULT);
        let _ = scene.commit();
        let diamond = OrientedBox::new(Vec3::ZERO, Vec3::ONE, Quat::from_rotation_y(FRAC_PI_4));
        let axis_aligned = OrientedBox::new(Vec3::ZERO, Vec3::splat(1.5), Quat::IDENTITY);
        assert!(query(&scene, &diamond, LayerMask::all()).is_empty());
        assert_eq!(query(&scene, &axis_aligned, LayerMask::all()).len(), 1);
    }

    #[test]
    fn mask_selects_layers() {
        let mut scene: IndexScene<char> = IndexScene::new();
        let a = scene.insert(Vec3::ZERO, Vec3::ONE, 'a', LayerMask::DEFAULT);
        let b = scene.insert(Vec3::ZERO, Vec3::ONE, 'b', LayerMask::layer(5).unwrap());
        let _ = scene.commit();
        let volume = OrientedBox::new(Vec3::ZERO, Vec3::ONE, Quat::IDENTITY);
        assert_eq!(query(&scene, &volume, LayerMask::DEFAULT), [a]);
        assert_eq!(query(&scene, &volume, LayerMask::layer(5).unwrap()), [b]);
        assert_eq!(query(&scene, &volume, LayerMask::all()), [a, b]);
        assert_eq!(scene.collider(b).map(|c| c.tag), Some('b'));
    }

    #[test]
    fn full_buffer_is_reported_as_full() {
        let mut scene: IndexScene<u8> = IndexScene::new();
        for i in 0..5 {
            scene.insert(Vec3::new(f32::from(i), 0.0, 0.0), Vec3::splat(0.25), i, LayerMask::DEFAULT);
        }
        let _ = scene.commit();
        let volume = OrientedBox::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 1.0), Quat::IDENTITY);
        let mut out = [Key::default(); 3];
        assert_eq!(scene.overlap_box(&volume, LayerMask::all(), &mut out), 3);
    }

    #[test]
    fn grid_and_flat_scenes_detect_the_same_objects() {
        let mut flat: IndexScene<u32> = IndexScene::new();
        let mut grid = IndexScene::<u32>::with_uniform_grid(4.0, 4.0, 0.0, 0.0);
        for i in 0..40_u32 {
            let x = (i % 8) as f32 * 3.0 - 12.0;
            let z = (i / 8) as f32 * 3.0 - 6.0;
            let center = Vec3::new(x, 0.0, z);
            flat.insert(center, Vec3::splat(0.4), i, LayerMask::DEFAULT);
            grid.insert(center, Vec3::splat(0.4), i, LayerMask::DEFAULT);
        }
        let _ = flat.commit();
        let _ = grid.commit();

        let mut detector = Detector2D::new();
        detector.set_bounds(DetectionBounds::new(Vec3::new(0.0, 0.0, 4.0), Vec3::new(4.0, 1.0, 4.0)).unwrap());
        let observer = ObserverTransform::new(Vec3::new(-2.0, 0.0, -1.0), Quat::from_rotation_y(0.7));

        let mut from_flat = Vec::new();
        let mut from_grid = Vec::new();
        let a = detector.on_update(&observer, &flat, &mut from_flat);
        let b = detector.on_update(&observer, &grid, &mut from_grid);
        assert!(a.accepted > 0);
        assert_eq!(a, b);
        assert_eq!(from_flat, from_grid);
    }
}
