// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping a host's rendered stack in sync with a shared stack.
//!
//! Mutations accumulate damage on the stack. Once per frame the host calls
//! [`Navigator::flush`], which commits the damage and hands the host the routes to render.
//! When the host's own UI removes routes (a back gesture, a swipe), it reports the new length
//! with [`Navigator::host_truncated`] so the coordinators catch up.

use trailhead_stack::{Routable, SharedStack, StackDamage};

use crate::navigator::Navigator;
use crate::types::StackId;

/// The UI surface that owns the physical ordered stack.
pub trait StackHost<R> {
    /// Render `routes` on top of `base`, the base coordinator's initial route.
    ///
    /// `routes[..damage.retained]` are unchanged since the previous call; everything after
    /// them replaces the previously rendered tail.
    fn render_stack(&mut self, base: &R, routes: &[R], damage: StackDamage);
}

impl<R: Routable> Navigator<R> {
    /// Commit `stack` and render it on `host` if anything changed.
    ///
    /// Returns `true` if the host was called.
    pub fn flush(&mut self, stack: StackId, host: &mut impl StackHost<R>) -> bool {
        let Some(damage) = self.commit(stack) else {
            tracing::warn!(stack = ?stack, "cannot flush: stack is gone");
            return false;
        };
        if damage.is_empty() {
            return false;
        }
        let Some(s) = self.stack(stack) else {
            return false;
        };
        let Some(base) = s.base().and_then(|id| self.coordinator(id)) else {
            tracing::warn!(stack = ?stack, "cannot flush: stack has no live base");
            return false;
        };
        tracing::trace!(
            stack = ?stack,
            retained = damage.retained,
            popped = damage.popped,
            pushed = damage.pushed,
            "flush"
        );
        host.render_stack(&base.initial_route, s.routes(), damage);
        true
    }

    /// The host removed routes itself and now shows `len` of them.
    ///
    /// Coordinators whose initial route is gone are evicted and the survivors' presented
    /// routes are trimmed to match. A `len` at or above the current length changes nothing.
    pub fn host_truncated(&mut self, stack: StackId, len: usize) {
        let Some(evicted) = self.stack_mut(stack).map(|s| s.truncate(len)) else {
            tracing::warn!(stack = ?stack, "cannot truncate: stack is gone");
            return;
        };
        self.settle(stack, evicted);
    }

    /// Routes of a live stack.
    pub fn routes(&self, stack: StackId) -> Option<&[R]> {
        self.stack(stack).map(SharedStack::routes)
    }
}
