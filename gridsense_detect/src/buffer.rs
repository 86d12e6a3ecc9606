// Copyright 2025 the Gridsense Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusable result buffer for overlap queries.

use alloc::vec;
use alloc::vec::Vec;

/// Fixed-capacity slot storage a scene query writes handles into.
///
/// Capacity only grows. Slots past the last query's count hold stale or
/// default handles and are never handed out by [`CandidateBuffer::found`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateBuffer<H> {
    slots: Vec<H>,
}

impl<H: Copy + Default> CandidateBuffer<H> {
    /// Create a buffer with `capacity` default-filled slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![H::default(); capacity],
        }
    }

    /// Number of handles one query can write.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Grow to at least `capacity` slots. Returns true if the buffer grew.
    pub fn ensure_capacity(&mut self, capacity: usize) -> bool {
        if capacity > self.slots.len() {
            self.slots.resize(capacity, H::default());
            true
        } else {
            false
        }
    }

    /// All slots, for a scene query to write into.
    pub fn slots_mut(&mut self) -> &mut [H] {
        &mut self.slots
    }

    /// The first `count` slots, clamped to capacity.
    pub fn found(&self, count: usize) -> &[H] {
        &self.slots[..count.min(self.slots.len())]
    }
}

impl<H: Copy + Default> Default for CandidateBuffer<H> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_capacity_only_grows() {
        let mut b: CandidateBuffer<u32> = CandidateBuffer::with_capacity(8);
        assert!(!b.ensure_capacity(4));
        assert_eq!(b.capacity(), 8);
        assert!(b.ensure_capacity(20));
        assert_eq!(b.capacity(), 20);
    }

    #[test]
    fn growth_preserves_written_slots() {
        let mut b: CandidateBuffer<u32> = CandidateBuffer::with_capacity(2);
        b.slots_mut().copy_from_slice(&[7, 9]);
        b.ensure_capacity(4);
        assert_eq!(b.found(2), &[7, 9]);
        assert_eq!(b.found(99).len(), 4);
    }
}
