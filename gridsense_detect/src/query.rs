// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap queries with a result buffer that grows until the result fits.
//!
//! A scene query writes into a fixed-size buffer and reports how many handles
//! it wrote. When that count equals the buffer's capacity the result may have
//! been cut short, so [`overlap_growing`] grows the buffer and asks again. It
//! only returns once the count is strictly below capacity, or once the
//! [`CapacityPolicy`] cap is reached, in which case the result is flagged
//! [`Overlap::truncated`].

use glam::Vec3;
use log::{debug, warn};

use crate::buffer::CandidateBuffer;
use crate::error::Error;
use crate::obb::OrientedBox;
use crate::types::LayerMask;

/// The scene-side capability detection runs against.
pub trait SceneQuery {
    /// Opaque object handle written into candidate buffers.
    type Handle: Copy + Default;

    /// Write handles of objects on `mask` overlapping `volume` into `out`.
    ///
    /// Writes at most `out.len()` handles and returns how many it wrote. A full
    /// buffer must be reported as `out.len()`.
    fn overlap_box(&self, volume: &OrientedBox, mask: LayerMask, out: &mut [Self::Handle]) -> usize;

    /// World-space reference point of the object, or `None` if it is gone.
    fn position(&self, handle: Self::Handle) -> Option<Vec3>;
}

/// Initial and maximum capacity for a candidate buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityPolicy {
    /// Slots allocated up front.
    pub initial: usize,
    /// Hard cap; a full buffer at this size yields a truncated result.
    pub max: usize,
}

impl CapacityPolicy {
    /// Default initial capacity.
    pub const DEFAULT_INITIAL: usize = 16;
    /// Default maximum capacity.
    pub const DEFAULT_MAX: usize = 16_384;

    /// Create a validated policy.
    pub fn new(initial: usize, max: usize) -> Result<Self, Error> {
        let policy = Self { initial, max };
        policy.validate()?;
        Ok(policy)
    }

    /// Check `0 < initial <= max`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.initial == 0 || self.max < self.initial {
            return Err(Error::InvalidCapacity {
                initial: self.initial,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Capacity to grow to from `current`: doubled, at least one, at most `max`.
    pub fn next_capacity(&self, current: usize) -> usize {
        current.saturating_mul(2).max(1).min(self.max)
    }
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            initial: Self::DEFAULT_INITIAL,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Outcome of [`overlap_growing`].
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlap {
    /// Number of handles at the front of the buffer.
    pub count: usize,
    /// The cap was reached while the buffer was still full; more objects may
    /// overlap than were reported.
    pub truncated: bool,
}

impl Overlap {
    /// True when `count` is the exact number of overlapping objects.
    pub fn is_complete(&self) -> bool {
        !self.truncated
    }
}

/// Query `scene` until the result fits in `buffer`, growing it per `policy`.
///
/// The buffer's capacity after return is at least the returned count. If the
/// buffer already holds more than `policy.max` slots it is used as is.
pub fn overlap_growing<S: SceneQuery + ?Sized>(
    scene: &S,
    volume: &OrientedBox,
    mask: LayerMask,
    buffer: &mut CandidateBuffer<S::Handle>,
    policy: &CapacityPolicy,
) -> Overlap {
    loop {
        let capacity = buffer.capacity();
        let count = scene
            .overlap_box(volume, mask, buffer.slots_mut())
            .min(capacity);
        if count < capacity {
            return Overlap {
                count,
                truncated: false,
            };
        }
        if capacity >= policy.max {
            warn!("overlap query filled {capacity} slots at the capacity cap; result truncated");
            return Overlap {
                count,
                truncated: true,
            };
        }
        let next = policy.next_capacity(capacity);
        debug!("candidate buffer full at {capacity}, growing to {next}");
        buffer.ensure_capacity(next);
    }
}
