// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared stack: flat route sequence plus transition bookkeeping.
//!
//! ## Failure model
//!
//! Pops that cannot be satisfied are logged with `tracing` and ignored; they return `None`.
//! They usually come from UI callbacks racing a scope that has already changed, so they are
//! not treated as errors.
//!
//! ## Eviction
//!
//! After every successful pop, transition entries whose slice now starts at or beyond the end
//! of the sequence are removed (the base entry excepted). The evicted keys are returned to the
//! caller, which owns whatever per-coordinator state must go with them.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::damage::{DamageTracker, StackDamage};
use crate::route::Routable;
use crate::transition::{Transition, TransitionTable};

/// Single ordered route sequence shared by every coordinator registered on it.
#[derive(Clone, Debug)]
pub struct SharedStack<R, K> {
    routes: Vec<R>,
    transitions: TransitionTable<K>,
    damage: DamageTracker,
    epoch: u64,
}

impl<R: Routable, K: Copy + Eq + Debug> Default for SharedStack<R, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Routable, K: Copy + Eq + Debug> SharedStack<R, K> {
    /// Create an empty stack without a base coordinator.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            transitions: TransitionTable::new(),
            damage: DamageTracker::default(),
            epoch: 0,
        }
    }

    /// Create an empty stack owned by the base coordinator `key`.
    pub fn with_base(key: K) -> Self {
        Self {
            transitions: TransitionTable::with_base(key),
            ..Self::new()
        }
    }

    /// Create a stack for `key` seeded with routes the base coordinator already presents.
    pub fn with_base_and_routes(key: K, routes: Vec<R>) -> Self {
        Self {
            routes,
            ..Self::with_base(key)
        }
    }

    /// Append `route`.
    pub fn push_route(&mut self, route: R) {
        tracing::trace!(route = ?route.id(), len = self.routes.len() + 1, "push route");
        self.routes.push(route);
        self.epoch += 1;
    }

    /// Register `key` at the current end of the sequence, then push its initial route.
    pub fn push_transition(&mut self, key: K, initial_route: R) {
        let index = self.routes.len();
        tracing::debug!(coordinator = ?key, index, "push transition");
        self.transitions.record(key, index);
        self.push_route(initial_route);
    }

    /// Remove the last `count` routes.
    ///
    /// Returns the evicted coordinator keys, or `None` (logged) if `count` exceeds the length.
    pub fn pop_routes(&mut self, count: usize) -> Option<Vec<K>> {
        let available = self.routes.len();
        if count > available {
            tracing::warn!(
                requested = count,
                available,
                "cannot pop routes: stack is too short"
            );
            return None;
        }
        Some(self.shrink_to(available - count))
    }

    /// Pop everything above `key`'s initial route.
    ///
    /// For the base coordinator this is [`pop_to_root`](Self::pop_to_root), since its
    /// initial route is not part of the sequence.
    /// Returns `None` (logged) if `key` has no transition entry.
    pub fn pop_to_initial_route(&mut self, key: &K) -> Option<Vec<K>> {
        let Some(index) = self.transitions.index_of(key) else {
            tracing::warn!(coordinator = ?key, "cannot pop to initial route: no transition index");
            return None;
        };
        if self.transitions.is_base(key) {
            return Some(self.pop_to_root());
        }
        self.pop_routes(self.routes.len().saturating_sub(index + 1))
    }

    /// Pop every route and drop every transition entry except the base.
    ///
    /// A child pushed onto an empty stack also starts at index `0`; it is not the base and
    /// is evicted too.
    pub fn pop_to_root(&mut self) -> Vec<K> {
        if !self.routes.is_empty() {
            self.routes.clear();
            self.damage.shrunk_to(0);
            self.epoch += 1;
        }
        let evicted = self.transitions.retain_base();
        if !evicted.is_empty() {
            tracing::debug!(evicted = ?evicted, "pop to root evicted coordinators");
        }
        evicted
    }

    /// Pop `key`'s entire presence, including its initial route.
    ///
    /// Refused (logged, `None`) for the base and for unknown keys.
    pub fn pop_transition(&mut self, key: &K) -> Option<Vec<K>> {
        let Some(index) = self.transitions.index_of(key) else {
            tracing::warn!(coordinator = ?key, "cannot pop coordinator: no transition index");
            return None;
        };
        if self.transitions.is_base(key) {
            tracing::warn!(coordinator = ?key, "cannot pop coordinator: it is the stack base");
            return None;
        }
        self.pop_routes(self.routes.len().saturating_sub(index))
    }

    /// Shrink the sequence to `len` routes after the host removed them itself.
    ///
    /// A `len` at or above the current length changes nothing.
    pub fn truncate(&mut self, len: usize) -> Vec<K> {
        if len >= self.routes.len() {
            return Vec::new();
        }
        self.shrink_to(len)
    }

    fn shrink_to(&mut self, len: usize) -> Vec<K> {
        if len < self.routes.len() {
            self.routes.truncate(len);
            self.damage.shrunk_to(len);
            self.epoch += 1;
        }
        let evicted = self.transitions.evict_from(len);
        if !evicted.is_empty() {
            tracing::debug!(evicted = ?evicted, len, "pop evicted coordinators");
        }
        evicted
    }

    /// The current route sequence, bottom first.
    pub fn routes(&self) -> &[R] {
        &self.routes
    }

    /// Number of routes in the sequence.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no route is pushed.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The base coordinator's key, if any.
    pub fn base(&self) -> Option<K> {
        self.transitions.base()
    }

    /// Index at which `key`'s slice begins.
    pub fn transition_index(&self, key: &K) -> Option<usize> {
        self.transitions.index_of(key)
    }

    /// Returns `true` if `key` is registered on this stack.
    pub fn contains(&self, key: &K) -> bool {
        self.transitions.contains(key)
    }

    /// The most recently pushed coordinator still on the stack.
    pub fn topmost(&self) -> Option<K> {
        self.transitions.topmost()
    }

    /// Returns `true` if `key` is the topmost coordinator.
    pub fn is_topmost(&self, key: &K) -> bool {
        self.transitions.topmost().as_ref() == Some(key)
    }

    /// Transition entries in push order.
    pub fn transitions(&self) -> impl Iterator<Item = Transition<K>> + '_ {
        self.transitions.iter()
    }

    /// Mutation counter; increases whenever the sequence changes.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Summarize the changes since the previous commit and start a new batch.
    pub fn commit(&mut self) -> StackDamage {
        self.damage.commit(self.routes.len())
    }
}
