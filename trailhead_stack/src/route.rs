// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routes: identifiable units that a host knows how to display.
//!
//! The stack never inspects a route beyond its [`Routable::id`].
//! Two routes are the same route exactly when their ids are equal, whatever payload they carry.

use core::fmt::Debug;

/// An identifiable navigation destination.
///
/// Ids must be unique within a single coordinator's presented routes but may repeat
/// across sibling coordinators.
pub trait Routable: Clone + Debug {
    /// Stable identity of the route.
    type Id: Clone + Eq + Debug;

    /// Returns the route's id.
    fn id(&self) -> Self::Id;
}

/// Display capability of a route, consumed by hosts only.
///
/// The navigation core never calls it.
pub trait Renderable {
    /// Host-specific display representation, such as a view or a title.
    type Output;

    /// Builds the display representation.
    fn render(&self) -> Self::Output;
}

/// Wrapper comparing routes by id only.
///
/// Useful as a key or for `assert_eq!` when the route payload is not `PartialEq`.
#[derive(Clone, Copy, Debug)]
pub struct ById<R>(pub R);

impl<R: Routable> PartialEq for ById<R> {
    fn eq(&self, other: &Self) -> bool {
        self.0.id() == other.0.id()
    }
}

impl<R: Routable> Eq for ById<R> {}

/// Returns `true` if both routes have the same id.
#[inline]
pub fn same_route<R: Routable>(a: &R, b: &R) -> bool {
    a.id() == b.id()
}

/// Returns `true` if both slices hold the same routes, compared by id, in the same order.
pub fn same_routes<R: Routable>(a: &[R], b: &[R]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_route(x, y))
}
