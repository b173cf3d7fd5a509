// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack operations of a coordinator.
//!
//! ## Topmost rule
//!
//! A coordinator's presented routes only line up with the tail of the shared stack while no
//! coordinator pushed after it is still present. [`push_route`](Navigator::push_route),
//! [`push_coordinator`](Navigator::push_coordinator), [`pop`](Navigator::pop) and
//! [`pop_to_previous_coordinator`](Navigator::pop_to_previous_coordinator) therefore require
//! the coordinator to be topmost. The other pops are computed from the transition index and
//! work from any depth, evicting whatever was pushed after the coordinator.
//!
//! Every operation returns `true` if it changed the stack. Rejections are logged.

use trailhead_stack::Routable;

use crate::coordinator::Coordinator;
use crate::navigator::Navigator;
use crate::types::{Capabilities, CoordinatorId};

impl<R: Routable> Navigator<R> {
    /// Push `route` on top of coordinator `id`'s slice.
    pub fn push_route(&mut self, id: CoordinatorId, route: R) -> bool {
        let Some(stack) = self.topmost_stack(id, "push route") else {
            return false;
        };
        let Some(s) = self.stack_mut(stack) else {
            return false;
        };
        s.push_route(route.clone());
        if let Some(c) = self.coordinator_entry(id) {
            c.presented_routes.push(route);
        }
        true
    }

    /// Push the detached coordinator `child` on top of `id`'s slice.
    ///
    /// The child records the current stack length as its transition index and pushes its
    /// initial route, followed by any routes it already presents.
    pub fn push_coordinator(&mut self, id: CoordinatorId, child: CoordinatorId) -> bool {
        let Some(stack) = self.topmost_stack(id, "push coordinator") else {
            return false;
        };
        let Some(c) = self.coordinator(child) else {
            tracing::warn!(child = ?child, "cannot push coordinator: child is gone");
            return false;
        };
        if child == id || self.stack_of(child).is_some() {
            tracing::warn!(child = %c.name, "cannot push coordinator: child is already attached");
            return false;
        }
        if !c.capabilities.contains(Capabilities::STACK) {
            tracing::warn!(child = %c.name, "cannot push coordinator: not a stack coordinator");
            return false;
        }
        let initial_route = c.initial_route.clone();
        let seeded = c.presented_routes.clone();
        let Some(s) = self.stack_mut(stack) else {
            return false;
        };
        s.push_transition(child, initial_route);
        for route in seeded {
            s.push_route(route);
        }
        if let Some(c) = self.coordinator_entry(child) {
            tracing::debug!(child = %c.name, parent = ?id, "push coordinator");
            c.root = Some(stack);
            c.parent = Some(id);
        }
        true
    }

    /// Pop the top route.
    ///
    /// When `id` has presented nothing, this pops its initial route and evicts it.
    pub fn pop(&mut self, id: CoordinatorId) -> bool {
        let Some(stack) = self.topmost_stack(id, "pop") else {
            return false;
        };
        let Some(evicted) = self.stack_mut(stack).and_then(|s| s.pop_routes(1)) else {
            return false;
        };
        if let Some(c) = self.coordinator_entry(id) {
            let _ = c.presented_routes.pop();
        }
        self.settle(stack, evicted);
        true
    }

    /// Pop everything above `id`'s initial route.
    ///
    /// For a stack base this clears the whole stack.
    pub fn pop_to_initial_route(&mut self, id: CoordinatorId) -> bool {
        let Some(stack) = self.registered_stack(id, "pop to initial route") else {
            return false;
        };
        let Some(evicted) = self
            .stack_mut(stack)
            .and_then(|s| s.pop_to_initial_route(&id))
        else {
            return false;
        };
        if let Some(c) = self.coordinator_entry(id) {
            c.presented_routes.clear();
        }
        self.settle(stack, evicted);
        true
    }

    /// Pop `id`'s presented routes together with its initial route, returning to the
    /// coordinator that pushed it. `id` is evicted.
    ///
    /// Ignored when nothing lies below `id`'s routes, which is always the case for a base.
    pub fn pop_to_previous_coordinator(&mut self, id: CoordinatorId) -> bool {
        let Some(stack) = self.topmost_stack(id, "pop to previous coordinator") else {
            return false;
        };
        let presented = self.coordinator(id).map_or(0, |c| c.presented_routes.len());
        let Some(s) = self.stack_mut(stack) else {
            return false;
        };
        if s.len() <= presented {
            tracing::warn!(
                id = ?id,
                presented,
                stack_len = s.len(),
                "cannot pop to previous coordinator: nothing below its routes"
            );
            return false;
        }
        let Some(evicted) = s.pop_routes(presented + 1) else {
            return false;
        };
        self.settle(stack, evicted);
        true
    }

    /// Clear the whole shared stack `id` is registered on, keeping only its base.
    pub fn pop_to_root(&mut self, id: CoordinatorId) -> bool {
        let Some(stack) = self.registered_stack(id, "pop to root") else {
            return false;
        };
        let Some(evicted) = self.stack_mut(stack).map(|s| s.pop_to_root()) else {
            return false;
        };
        self.settle(stack, evicted);
        true
    }

    /// Pop `id`'s entire presence, evicting it and everything pushed after it.
    ///
    /// Refused for a stack base.
    pub fn pop_coordinator(&mut self, id: CoordinatorId) -> bool {
        let Some(stack) = self.registered_stack(id, "pop coordinator") else {
            return false;
        };
        let Some(evicted) = self.stack_mut(stack).and_then(|s| s.pop_transition(&id)) else {
            return false;
        };
        self.settle(stack, evicted);
        true
    }
}

/// Stack operations of a single coordinator, as seen from its own UI scope.
///
/// Implemented by [`CoordinatorMut`]. Each method mirrors the [`Navigator`] method of the
/// same name and returns `true` if it changed the stack.
pub trait StackNavigating<R> {
    /// Push `route` on top of this coordinator's slice.
    fn push_route(&mut self, route: R) -> bool;
    /// Push the detached coordinator `child`.
    fn push_coordinator(&mut self, child: CoordinatorId) -> bool;
    /// Pop the top route.
    fn pop(&mut self) -> bool;
    /// Pop everything above this coordinator's initial route.
    fn pop_to_initial_route(&mut self) -> bool;
    /// Pop this coordinator's presence, returning to the one that pushed it.
    fn pop_to_previous_coordinator(&mut self) -> bool;
    /// Clear the whole shared stack.
    fn pop_to_root(&mut self) -> bool;
    /// Pop this coordinator's presence from any depth.
    fn pop_coordinator(&mut self) -> bool;
}

/// Mutable handle to one live coordinator.
///
/// Obtained from [`Navigator::coordinator_mut`]. The handle borrows the navigator, so the
/// coordinator cannot be removed while it is held, though an operation may evict it.
#[derive(Debug)]
pub struct CoordinatorMut<'a, R: Routable> {
    pub(crate) navigator: &'a mut Navigator<R>,
    pub(crate) id: CoordinatorId,
}

impl<R: Routable> Navigator<R> {
    /// Mutable handle to a live coordinator.
    pub fn coordinator_mut(&mut self, id: CoordinatorId) -> Option<CoordinatorMut<'_, R>> {
        self.is_alive(id).then_some(CoordinatorMut {
            navigator: self,
            id,
        })
    }
}

impl<R: Routable> CoordinatorMut<'_, R> {
    /// The coordinator's id.
    pub fn id(&self) -> CoordinatorId {
        self.id
    }

    /// Read-only view; `None` once an operation evicted the coordinator.
    pub fn get(&self) -> Option<&Coordinator<R>> {
        self.navigator.coordinator(self.id)
    }

    /// The navigator this handle borrows.
    pub fn navigator(&mut self) -> &mut Navigator<R> {
        self.navigator
    }
}

impl<R: Routable> StackNavigating<R> for CoordinatorMut<'_, R> {
    fn push_route(&mut self, route: R) -> bool {
        self.navigator.push_route(self.id, route)
    }

    fn push_coordinator(&mut self, child: CoordinatorId) -> bool {
        self.navigator.push_coordinator(self.id, child)
    }

    fn pop(&mut self) -> bool {
        self.navigator.pop(self.id)
    }

    fn pop_to_initial_route(&mut self) -> bool {
        self.navigator.pop_to_initial_route(self.id)
    }

    fn pop_to_previous_coordinator(&mut self) -> bool {
        self.navigator.pop_to_previous_coordinator(self.id)
    }

    fn pop_to_root(&mut self) -> bool {
        self.navigator.pop_to_root(self.id)
    }

    fn pop_coordinator(&mut self) -> bool {
        self.navigator.pop_coordinator(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Blueprint;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Clone, Debug, PartialEq)]
    struct Screen(&'static str);

    impl Routable for Screen {
        type Id = &'static str;
        fn id(&self) -> Self::Id {
            self.0
        }
    }

    fn setup() -> (Navigator<Screen>, CoordinatorId) {
        let mut nav = Navigator::new();
        let home = nav.insert(Blueprint::new("home", Screen("home")));
        let _ = nav.create_stack(home).unwrap();
        (nav, home)
    }

    fn routes(nav: &Navigator<Screen>, id: CoordinatorId) -> Vec<&'static str> {
        let stack = nav.stack_of(id).unwrap();
        nav.stack(stack).unwrap().routes().iter().map(|r| r.0).collect()
    }

    fn presented(nav: &Navigator<Screen>, id: CoordinatorId) -> Vec<&'static str> {
        nav.coordinator(id)
            .unwrap()
            .presented_routes()
            .iter()
            .map(|r| r.0)
            .collect()
    }

    #[test]
    fn detached_coordinator_ignores_stack_operations() {
        let mut nav = Navigator::new();
        let lone = nav.insert(Blueprint::new("lone", Screen("lone")));
        assert!(!nav.push_route(lone, Screen("a")));
        assert!(!nav.pop(lone));
        assert!(!nav.pop_to_initial_route(lone));
        assert!(!nav.pop_to_previous_coordinator(lone));
        assert!(!nav.pop_to_root(lone));
        assert!(nav.coordinator(lone).unwrap().presented_routes().is_empty());
    }

    #[test]
    fn push_route_tracks_presented_routes() {
        let (mut nav, home) = setup();
        assert!(nav.push_route(home, Screen("a")));
        assert!(nav.push_route(home, Screen("b")));
        assert_eq!(routes(&nav, home), vec!["a", "b"]);
        assert_eq!(presented(&nav, home), vec!["a", "b"]);
        assert!(nav.pop(home));
        assert_eq!(presented(&nav, home), vec!["a"]);
    }

    #[test]
    fn pop_on_empty_stack_is_ignored() {
        let (mut nav, home) = setup();
        assert!(!nav.pop(home));
        assert!(nav.is_alive(home));
    }

    #[test]
    fn child_slice_follows_parent() {
        let (mut nav, home) = setup();
        assert!(nav.push_route(home, Screen("a")));
        let flow = nav.insert(
            Blueprint::new("flow", Screen("flow")).with_presented_routes(vec![Screen("step")]),
        );
        assert!(nav.push_coordinator(home, flow));
        assert_eq!(routes(&nav, home), vec!["a", "flow", "step"]);
        let stack = nav.stack_of(flow).unwrap();
        assert_eq!(nav.stack(stack).unwrap().transition_index(&flow), Some(1));
        assert_eq!(nav.coordinator(flow).unwrap().parent(), Some(home));
        // The parent is no longer topmost.
        assert!(!nav.push_route(home, Screen("b")));
        assert!(!nav.pop(home));
        assert!(nav.push_route(flow, Screen("step2")));
        assert_eq!(presented(&nav, flow), vec!["step", "step2"]);
    }

    #[test]
    fn attached_child_cannot_be_pushed_again() {
        let (mut nav, home) = setup();
        let flow = nav.insert(Blueprint::new("flow", Screen("flow")));
        assert!(nav.push_coordinator(home, flow));
        assert!(!nav.push_coordinator(flow, flow));
        let other = nav.insert(Blueprint::new("other", Screen("other")));
        assert!(!nav.push_coordinator(home, other));
        assert!(!nav.push_coordinator(flow, home));
    }

    #[test]
    fn pop_to_initial_route_from_depth() {
        let (mut nav, home) = setup();
        assert!(nav.push_route(home, Screen("a")));
        let flow = nav.insert(Blueprint::new("flow", Screen("flow")));
        assert!(nav.push_coordinator(home, flow));
        assert!(nav.push_route(flow, Screen("b")));
        let inner = nav.insert(Blueprint::new("inner", Screen("inner")));
        assert!(nav.push_coordinator(flow, inner));
        assert!(nav.push_route(inner, Screen("c")));

        assert!(nav.pop_to_initial_route(flow));
        assert_eq!(routes(&nav, home), vec!["a", "flow"]);
        assert!(presented(&nav, flow).is_empty());
        assert!(!nav.is_alive(inner));
        // `flow` is topmost again.
        assert!(nav.push_route(flow, Screen("d")));
    }

    #[test]
    fn pop_to_initial_route_of_base_clears_stack() {
        let (mut nav, home) = setup();
        let flow = nav.insert(Blueprint::new("flow", Screen("flow")));
        assert!(nav.push_route(home, Screen("a")));
        assert!(nav.push_coordinator(home, flow));
        assert!(nav.pop_to_initial_route(home));
        assert!(routes(&nav, home).is_empty());
        assert!(presented(&nav, home).is_empty());
        assert!(!nav.is_alive(flow));
    }

    #[test]
    fn pop_to_previous_coordinator_removes_whole_presence() {
        let (mut nav, home) = setup();
        assert!(nav.push_route(home, Screen("a")));
        let flow = nav.insert(Blueprint::new("flow", Screen("flow")));
        assert!(nav.push_coordinator(home, flow));
        assert!(nav.push_route(flow, Screen("b")));
        assert!(nav.push_route(flow, Screen("c")));
        assert!(nav.pop_to_previous_coordinator(flow));
        assert_eq!(routes(&nav, home), vec!["a"]);
        assert!(!nav.is_alive(flow));
        assert_eq!(presented(&nav, home), vec!["a"]);
    }

    #[test]
    fn pop_to_previous_coordinator_on_base_is_ignored() {
        let (mut nav, home) = setup();
        assert!(nav.push_route(home, Screen("a")));
        assert!(!nav.pop_to_previous_coordinator(home));
        assert_eq!(routes(&nav, home), vec!["a"]);
    }

    #[test]
    fn popping_child_initial_route_returns_control_to_parent() {
        let (mut nav, home) = setup();
        let flow = nav.insert(Blueprint::new("flow", Screen("flow")));
        assert!(nav.push_coordinator(home, flow));
        assert!(nav.pop(flow));
        assert!(!nav.is_alive(flow));
        assert!(routes(&nav, home).is_empty());
        assert!(nav.push_route(home, Screen("a")));
    }

    #[test]
    fn pop_to_root_from_child_keeps_base() {
        let (mut nav, home) = setup();
        assert!(nav.push_route(home, Screen("a")));
        let flow = nav.insert(Blueprint::new("flow", Screen("flow")));
        assert!(nav.push_coordinator(home, flow));
        let stack = nav.stack_of(home).unwrap();
        assert!(nav.pop_to_root(flow));
        assert!(!nav.is_alive(flow));
        assert!(presented(&nav, home).is_empty());
        assert_eq!(nav.stack(stack).unwrap().topmost(), Some(home));
    }

    #[test]
    fn pop_coordinator_from_depth() {
        let (mut nav, home) = setup();
        let flow = nav.insert(Blueprint::new("flow", Screen("flow")));
        assert!(nav.push_coordinator(home, flow));
        let inner = nav.insert(Blueprint::new("inner", Screen("inner")));
        assert!(nav.push_coordinator(flow, inner));
        assert!(nav.pop_coordinator(flow));
        assert!(!nav.is_alive(flow));
        assert!(!nav.is_alive(inner));
        assert!(!nav.pop_coordinator(home));
    }

    #[test]
    fn handle_runs_the_same_operations() {
        let (mut nav, home) = setup();
        let flow = nav.insert(Blueprint::new("flow", Screen("flow")));
        {
            let mut c = nav.coordinator_mut(home).unwrap();
            assert!(c.push_route(Screen("a")));
            assert!(c.push_coordinator(flow));
            assert!(!c.pop());
        }
        let mut c = nav.coordinator_mut(flow).unwrap();
        assert!(c.pop_to_previous_coordinator());
        assert!(c.get().is_none());
        assert_eq!(presented(c.navigator(), home), vec!["a"]);
    }

    #[test]
    fn stale_id_is_ignored() {
        let (mut nav, home) = setup();
        let flow = nav.insert(Blueprint::new("flow", Screen("flow")));
        assert!(nav.push_coordinator(home, flow));
        assert!(nav.pop_coordinator(flow));
        assert!(nav.coordinator_mut(flow).is_none());
        assert!(!nav.push_route(flow, Screen("x")));
        assert!(!nav.pop_to_initial_route(flow));
    }
}
