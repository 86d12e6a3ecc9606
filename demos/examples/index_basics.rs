// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Gridsense Index: insert, update, commit, and query.
//!
//! Run:
//! - `cargo run -p gridsense_demos --example index_basics`

use gridsense_index::{Aabb3D, Index};

fn main() {
    let mut idx = Index::<f32, &str>::with_uniform_grid(4.0, 4.0, 0.0, 0.0);
    let crate_key = idx.insert(Aabb3D::<f32>::from_center_extents([1.0, 0.5, 1.0], [0.5; 3]), "crate");
    let _ = idx.insert(Aabb3D::<f32>::from_center_extents([6.0, 0.5, 2.0], [0.5; 3]), "barrel");
    let _ = idx.insert(Aabb3D::<f32>::from_center_extents([1.0, 3.5, 1.0], [0.5; 3]), "lamp");
    let changes = idx.commit();
    println!("first commit: {changes:?}");

    // Floor-level box query over the first cell: the lamp hangs above it.
    let floor = Aabb3D::new(0.0, 0.0, 0.0, 4.0, 1.0, 4.0);
    let hits: Vec<_> = idx.query_aabb(floor).map(|(_, _, tag)| tag).collect();
    println!("floor hits: {hits:?}");

    // Slide the crate into the barrel's cell.
    idx.update(crate_key, Aabb3D::<f32>::from_center_extents([5.0, 0.5, 2.0], [0.5; 3]));
    println!("before commit: {:?}", idx.query_point(5.0, 0.5, 2.0).collect::<Vec<_>>());
    let changes = idx.commit();
    println!(
        "added={}, removed={}, moved={}",
        changes.added, changes.removed, changes.moved
    );
    println!("after commit: {:?}", idx.query_point(5.0, 0.5, 2.0).collect::<Vec<_>>());
}
