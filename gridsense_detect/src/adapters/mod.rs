// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene adapters that implement [`SceneQuery`](crate::SceneQuery) over other Gridsense crates.
//!
//! Enabled via feature flags so the core stays free of index dependencies.

#[cfg(feature = "index_adapter")]
pub mod index;
