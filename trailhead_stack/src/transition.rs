// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition table: where each coordinator's slice of the shared stack begins.
//!
//! ## Semantics
//!
//! - Entries are kept in push order and their indices never decrease in that order.
//!   The last entry is therefore the topmost coordinator.
//! - For an ordinary entry the index is the position of the coordinator's initial route.
//! - The optional *base* entry belongs to the coordinator the stack was created for.
//!   Its initial route is the stack root rendered by the host and is not part of the
//!   sequence, so its presented routes start at index `0`.
//!   The base is never evicted by pops.

use alloc::vec::Vec;
use core::fmt::Debug;

/// A single entry: coordinator key and the index its slice starts at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition<K> {
    /// Coordinator key.
    pub key: K,
    /// Index in the shared sequence at which the slice begins.
    pub index: usize,
}

/// Ordered mapping from coordinator key to transition index.
#[derive(Clone, Debug)]
pub struct TransitionTable<K> {
    entries: Vec<Transition<K>>,
    base: Option<K>,
}

impl<K> Default for TransitionTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            base: None,
        }
    }
}

impl<K: Copy + Eq + Debug> TransitionTable<K> {
    /// Create an empty table without a base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table whose base entry is `key` at index `0`.
    pub fn with_base(key: K) -> Self {
        Self {
            entries: alloc::vec![Transition { key, index: 0 }],
            base: Some(key),
        }
    }

    /// Record `key` as starting at `index`.
    ///
    /// A key that is already present is moved to the top with its new index.
    /// Recording the base key again is ignored.
    pub fn record(&mut self, key: K, index: usize) {
        if self.is_base(&key) {
            return;
        }
        self.entries.retain(|t| t.key != key);
        debug_assert!(
            self.entries.last().is_none_or(|t| t.index <= index),
            "transition indices must not decrease in push order"
        );
        self.entries.push(Transition { key, index });
    }

    /// Returns the transition index of `key`, if recorded.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.entries.iter().find(|t| t.key == *key).map(|t| t.index)
    }

    /// Returns `true` if `key` has an entry.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.iter().any(|t| t.key == *key)
    }

    /// Returns `true` if `key` is the base entry.
    pub fn is_base(&self, key: &K) -> bool {
        self.base.as_ref() == Some(key)
    }

    /// The base key, if the table has one.
    pub fn base(&self) -> Option<K> {
        self.base
    }

    /// The most recently pushed entry that is still present.
    pub fn topmost(&self) -> Option<K> {
        self.entries.last().map(|t| t.key)
    }

    /// Remove every non-base entry whose slice starts at or beyond `len`.
    ///
    /// Returns the evicted keys in push order.
    pub fn evict_from(&mut self, len: usize) -> Vec<K> {
        // Indices are non-decreasing, so evicted entries form a suffix.
        let keep = self
            .entries
            .iter()
            .rposition(|t| t.index < len || Some(t.key) == self.base)
            .map_or(0, |i| i + 1);
        self.entries.drain(keep..).map(|t| t.key).collect()
    }

    /// Remove every entry except the base. Returns the evicted keys in push order.
    pub fn retain_base(&mut self) -> Vec<K> {
        let base = self.base;
        let mut evicted = Vec::new();
        self.entries.retain(|t| {
            if Some(t.key) == base {
                true
            } else {
                evicted.push(t.key);
                false
            }
        });
        evicted
    }

    /// Entries in push order.
    pub fn iter(&self) -> impl Iterator<Item = Transition<K>> + '_ {
        self.entries.iter().copied()
    }

    /// Number of entries, including the base.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
