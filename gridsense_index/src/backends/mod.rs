// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple).
//! - `grid`: uniform grid over the XZ ground plane for `f32`/`f64`, with explicit origin.
//!
//! Backends report candidate slots only. The index applies the exact AABB test,
//! so a backend is free to over-report (a grid returns whole cells).

pub mod flatvec;
pub mod grid;

pub use grid::{Grid, GridF32, GridF64, GridScalar};
