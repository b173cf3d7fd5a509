// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched damage returned by [`SharedStack::commit`](crate::SharedStack::commit).

/// Summary of how the sequence changed since the previous commit.
///
/// The host can keep the first `retained` rendered entries, drop the `popped`
/// entries after them, and render the `pushed` entries now found at
/// `routes()[retained..]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StackDamage {
    /// Leading entries untouched since the last commit.
    pub retained: usize,
    /// Entries of the previously committed sequence that were removed.
    pub popped: usize,
    /// Entries appended after `retained`.
    pub pushed: usize,
}

impl StackDamage {
    /// True if the committed sequence is unchanged.
    pub fn is_empty(&self) -> bool {
        self.popped == 0 && self.pushed == 0
    }

    /// Length of the sequence before the changes.
    pub fn old_len(&self) -> usize {
        self.retained + self.popped
    }

    /// Length of the sequence after the changes.
    pub fn new_len(&self) -> usize {
        self.retained + self.pushed
    }
}

/// Running low-water mark used by the stack to compute [`StackDamage`].
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct DamageTracker {
    committed_len: usize,
    low_water: usize,
}

impl DamageTracker {
    /// Note that the sequence shrank to `len`.
    pub(crate) fn shrunk_to(&mut self, len: usize) {
        self.low_water = self.low_water.min(len);
    }

    /// Produce damage for a sequence of length `len` and start a new batch.
    pub(crate) fn commit(&mut self, len: usize) -> StackDamage {
        let damage = StackDamage {
            retained: self.low_water,
            popped: self.committed_len - self.low_water,
            pushed: len - self.low_water,
        };
        self.committed_len = len;
        self.low_water = len;
        damage
    }
}
