// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridsense Index: a generic 3D AABB index for scene queries.
//!
//! Gridsense Index is the spatial building block behind overlap queries.
//!
//! - Insert, update, and remove axis-aligned bounding boxes (AABBs) with user payloads.
//! - Query by point or overlapping box. Box faces are inclusive: touching counts as overlap.
//! - Stage changes and apply them in a batch with [`Index::commit`].
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//! Higher layers (like a detector's scene adapter) compute world-space AABBs and feed them here.
//!
//! Backends are pluggable via a simple trait so you can swap the spatial strategy without API churn.
//! The default backend is a flat vector (linear scan).
//! Uniform ground-plane grid backends are available for `f32` and `f64` with explicit origin offsets.
//!
//! # Example
//!
//! ```rust
//! use gridsense_index::{Aabb3D, Index};
//!
//! // Create an index and add two boxes.
//! let mut idx: Index<i64, u32> = Index::new();
//! let k1 = idx.insert(Aabb3D::new(0, 0, 0, 10, 10, 10), 1);
//! let _k2 = idx.insert(Aabb3D::new(5, 5, 5, 15, 15, 15), 2);
//! let changes = idx.commit();
//! assert_eq!(changes.added, 2);
//!
//! // Move the first box away and commit.
//! idx.update(k1, Aabb3D::new(20, 0, 0, 30, 10, 10));
//! assert_eq!(idx.commit().moved, 1);
//!
//! // Query a point inside the second box.
//! let hits: Vec<_> = idx.query_point(6, 6, 6).collect();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].1, 2);
//! ```
//!
//! Scenes laid out across a floor can use the grid backend, which buckets boxes
//! by their XZ footprint:
//!
//! ```rust
//! use gridsense_index::{Aabb3D, Index};
//!
//! // 8×8 cells, origin shifted so the grid covers negative coordinates too.
//! let mut idx = Index::<f32, u32>::with_uniform_grid(8.0, 8.0, -64.0, -64.0);
//!
//! let _k = idx.insert(Aabb3D::<f32>::from_center_extents([-3.0, 0.5, 2.0], [0.5, 0.5, 0.5]), 7);
//! let _ = idx.commit();
//!
//! let hits: Vec<_> = idx.query_point(-3.0, 0.5, 2.0).collect();
//! assert_eq!(hits.len(), 1);
//! ```
//!
//! ## Choosing a backend
//!
//! - `FlatVec` (default): simplest and smallest, linear scans. Good for a few dozen objects
//!   or when inserts/updates vastly outnumber queries.
//! - `GridF32`/`GridF64`: uniform grid over XZ; great locality and simple tuning. Choose a
//!   cell size so most AABBs fall within a handful of cells.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::grid::{Grid, GridF32, GridF64, GridScalar};
pub use index::{Changes, Index, IndexGeneric, Key};
pub use types::Aabb3D;
