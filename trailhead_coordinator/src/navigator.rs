// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The navigator: arena owning coordinators and the shared stacks they register on.
//!
//! ## Ownership
//!
//! Coordinators never own each other or their stack. A coordinator's `root` is a
//! [`StackId`] and its `parent` a [`CoordinatorId`]; both are generational handles that may
//! go stale, at which point operations through them are logged no-ops.
//!
//! ## Eviction
//!
//! A coordinator pushed onto a stack lives exactly as long as its transition entry. When a pop
//! removes its initial route the entry is dropped and the coordinator is removed from the arena.
//! The base coordinator a stack was created for is never evicted; it is detached when the stack
//! is removed.

use alloc::vec::Vec;

use trailhead_stack::{Routable, SharedStack, StackDamage};

use crate::coordinator::{Blueprint, Coordinator};
use crate::slots::Slots;
use crate::types::{Capabilities, CoordinatorId, EmptyLinkPolicy, StackId};

/// Owns every coordinator and shared stack of one navigation root.
///
/// ## Usage
///
/// - [`insert`](Self::insert) a [`Blueprint`] to get a detached coordinator.
/// - [`create_stack`](Self::create_stack) to make it the base of a new shared stack.
/// - Drive it with the stack operations ([`push_route`](Self::push_route),
///   [`pop`](Self::pop), ...), modal operations, or
///   [`handle_deep_link`](Self::handle_deep_link).
/// - Call [`flush`](Self::flush) (or [`commit`](Self::commit)) once per frame to render
///   the accumulated changes.
#[derive(Debug)]
pub struct Navigator<R: Routable> {
    pub(crate) coordinators: Slots<Coordinator<R>>,
    pub(crate) stacks: Slots<SharedStack<R, CoordinatorId>>,
    pub(crate) empty_link_policy: EmptyLinkPolicy,
}

impl<R: Routable> Default for Navigator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Routable> Navigator<R> {
    /// Create an empty navigator with default policies.
    pub fn new() -> Self {
        Self {
            coordinators: Slots::default(),
            stacks: Slots::default(),
            empty_link_policy: EmptyLinkPolicy::default(),
        }
    }

    /// Set how deep-link dispatch treats a coordinator that receives no tokens.
    pub fn set_empty_link_policy(&mut self, policy: EmptyLinkPolicy) {
        self.empty_link_policy = policy;
    }

    /// Current empty-link policy.
    pub fn empty_link_policy(&self) -> EmptyLinkPolicy {
        self.empty_link_policy
    }

    /// Insert a detached coordinator built from `blueprint`.
    pub fn insert(&mut self, blueprint: Blueprint<R>) -> CoordinatorId {
        let (idx, generation) = self.coordinators.insert(Coordinator::from(blueprint));
        let id = CoordinatorId::new(idx, generation);
        tracing::trace!(id = ?id, "insert coordinator");
        id
    }

    /// Remove a coordinator.
    ///
    /// An attached coordinator pops its whole presence first, evicting every coordinator
    /// pushed after it. Removing a stack's base removes the stack.
    pub fn remove(&mut self, id: CoordinatorId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(stack) = self.stack_of(id) {
            let is_base = self.stack(stack).and_then(SharedStack::base) == Some(id);
            if is_base {
                self.remove_stack(stack);
            } else if let Some(evicted) = self
                .stack_mut(stack)
                .and_then(|s| s.pop_transition(&id))
            {
                self.settle(stack, evicted);
            }
        }
        if self.coordinators.remove(id.idx(), id.generation()).is_some() {
            tracing::trace!(id = ?id, "remove coordinator");
        }
    }

    /// Returns `true` if `id` refers to a live coordinator.
    pub fn is_alive(&self, id: CoordinatorId) -> bool {
        self.coordinators.get(id.idx(), id.generation()).is_some()
    }

    /// Read-only view of a live coordinator.
    pub fn coordinator(&self, id: CoordinatorId) -> Option<&Coordinator<R>> {
        self.coordinators.get(id.idx(), id.generation())
    }

    pub(crate) fn coordinator_entry(&mut self, id: CoordinatorId) -> Option<&mut Coordinator<R>> {
        self.coordinators.get_mut(id.idx(), id.generation())
    }

    /// Live coordinators with their ids, in slot order.
    pub fn coordinators(&self) -> impl Iterator<Item = (CoordinatorId, &Coordinator<R>)> + '_ {
        self.coordinators
            .iter()
            .map(|(idx, generation, c)| (CoordinatorId::new(idx, generation), c))
    }

    /// Number of live coordinators.
    pub fn coordinator_count(&self) -> usize {
        self.coordinators.live()
    }

    /// Create a shared stack whose base is `base`.
    ///
    /// The base must be alive, detached and able to use a stack. The stack is seeded with the
    /// routes the base already presents. Returns `None` (logged) otherwise.
    pub fn create_stack(&mut self, base: CoordinatorId) -> Option<StackId> {
        let Some(c) = self.coordinator(base) else {
            tracing::warn!(id = ?base, "cannot create stack: coordinator is gone");
            return None;
        };
        if self.stack_of(base).is_some() {
            tracing::warn!(coordinator = %c.name, "cannot create stack: already attached");
            return None;
        }
        if !c.capabilities.contains(Capabilities::STACK) {
            tracing::warn!(coordinator = %c.name, "cannot create stack: not a stack coordinator");
            return None;
        }
        let stack = SharedStack::with_base_and_routes(base, c.presented_routes.clone());
        let (idx, generation) = self.stacks.insert(stack);
        let id = StackId::new(idx, generation);
        if let Some(c) = self.coordinator_entry(base) {
            tracing::debug!(coordinator = %c.name, stack = ?id, "create stack");
            c.root = Some(id);
        }
        Some(id)
    }

    /// Tear down a shared stack.
    ///
    /// Its base is detached and keeps its presented routes; every other coordinator that was
    /// registered on it is removed.
    pub fn remove_stack(&mut self, id: StackId) {
        let Some(stack) = self.stacks.remove(id.idx(), id.generation()) else {
            tracing::warn!(stack = ?id, "cannot remove stack: already gone");
            return;
        };
        let base = stack.base();
        for t in stack.transitions() {
            if Some(t.key) == base {
                if let Some(c) = self.coordinator_entry(t.key) {
                    c.root = None;
                }
            } else {
                let _ = self.coordinators.remove(t.key.idx(), t.key.generation());
            }
        }
        tracing::debug!(stack = ?id, "remove stack");
    }

    /// Returns `true` if `id` refers to a live stack.
    pub fn is_stack_alive(&self, id: StackId) -> bool {
        self.stacks.get(id.idx(), id.generation()).is_some()
    }

    /// A live shared stack.
    pub fn stack(&self, id: StackId) -> Option<&SharedStack<R, CoordinatorId>> {
        self.stacks.get(id.idx(), id.generation())
    }

    pub(crate) fn stack_mut(&mut self, id: StackId) -> Option<&mut SharedStack<R, CoordinatorId>> {
        self.stacks.get_mut(id.idx(), id.generation())
    }

    /// The live stack `id` is registered on.
    pub fn stack_of(&self, id: CoordinatorId) -> Option<StackId> {
        let root = self.coordinator(id)?.root?;
        self.stack(root)
            .is_some_and(|s| s.contains(&id))
            .then_some(root)
    }

    /// Summarize the changes to `stack` since its previous commit.
    pub fn commit(&mut self, stack: StackId) -> Option<StackDamage> {
        self.stack_mut(stack).map(SharedStack::commit)
    }

    /// Stack of a coordinator allowed to run `op`: alive, attached to a live stack and able to
    /// use it.
    pub(crate) fn registered_stack(&self, id: CoordinatorId, op: &'static str) -> Option<StackId> {
        let Some(c) = self.coordinator(id) else {
            tracing::warn!(id = ?id, op, "ignored: coordinator is gone");
            return None;
        };
        if !c.capabilities.contains(Capabilities::STACK) {
            tracing::warn!(coordinator = %c.name, op, "ignored: not a stack coordinator");
            return None;
        }
        let Some(stack) = self.stack_of(id) else {
            tracing::warn!(coordinator = %c.name, op, "ignored: root is not set");
            return None;
        };
        Some(stack)
    }

    /// Like [`registered_stack`](Self::registered_stack), and `id` must also be the topmost
    /// coordinator of that stack.
    pub(crate) fn topmost_stack(&self, id: CoordinatorId, op: &'static str) -> Option<StackId> {
        let stack = self.registered_stack(id, op)?;
        let topmost = self.stack(stack).and_then(SharedStack::topmost);
        if topmost != Some(id) {
            tracing::warn!(
                coordinator = %self.coordinator(id).map_or("?", Coordinator::name),
                topmost = ?topmost,
                op,
                "ignored: a coordinator pushed later owns the top of the stack"
            );
            return None;
        }
        Some(stack)
    }

    /// Drop evicted coordinators and trim the presented routes of the survivors so that none
    /// reaches past the end of the stack.
    pub(crate) fn settle(&mut self, stack: StackId, evicted: Vec<CoordinatorId>) {
        for key in evicted {
            if let Some(c) = self.coordinators.remove(key.idx(), key.generation()) {
                tracing::debug!(coordinator = %c.name, "evicted from stack");
            }
        }
        let Some(s) = self.stacks.get(stack.idx(), stack.generation()) else {
            return;
        };
        let len = s.len();
        let base = s.base();
        for t in s.transitions() {
            // The base's initial route is not part of the sequence.
            let first_presented = if Some(t.key) == base {
                t.index
            } else {
                t.index + 1
            };
            let keep = len.saturating_sub(first_presented);
            if let Some(c) = self.coordinators.get_mut(t.key.idx(), t.key.generation()) {
                c.presented_routes.truncate(keep);
            }
        }
    }
}
