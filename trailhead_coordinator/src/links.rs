// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-coordinator deep-link tables: token to navigation action.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::coordinator::Blueprint;
use crate::types::ModalStyle;

/// Builds a child coordinator description for [`LinkAction::Delegate`].
///
/// Factories must be free of side effects: the validity pre-check calls them too.
pub type ChildFactory<R> = Rc<dyn Fn() -> Blueprint<R>>;

/// What a matched token does to the coordinator that received it.
#[derive(Clone)]
pub enum LinkAction<R> {
    /// Push a route onto the coordinator's slice.
    Push(R),
    /// Pop back to the coordinator's initial route.
    PopToInitialRoute,
    /// Present a route modally. Must be the last token of the link.
    Present(R, ModalStyle),
    /// Push a freshly built child coordinator and hand it the remaining tokens.
    Delegate(ChildFactory<R>),
}

impl<R: fmt::Debug> fmt::Debug for LinkAction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push(route) => f.debug_tuple("Push").field(route).finish(),
            Self::PopToInitialRoute => f.write_str("PopToInitialRoute"),
            Self::Present(route, style) => {
                f.debug_tuple("Present").field(route).field(style).finish()
            }
            Self::Delegate(_) => f.write_str("Delegate(..)"),
        }
    }
}

impl<R> LinkAction<R> {
    /// Returns `true` for actions after which no token may follow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Present(..))
    }
}

/// Ordered token table.
///
/// Registering a token twice replaces the earlier action.
///
/// ```rust
/// use trailhead_coordinator::{LinkAction, LinkTable, ModalStyle};
///
/// let links = LinkTable::new()
///     .push("detail", "Detail")
///     .pop_to_initial_route("home")
///     .present("settings", "Settings", ModalStyle::Sheet);
///
/// assert!(matches!(links.resolve("detail"), Some(LinkAction::Push("Detail"))));
/// assert!(links.resolve("missing").is_none());
/// assert_eq!(links.tokens().collect::<Vec<_>>(), ["detail", "home", "settings"]);
/// ```
#[derive(Clone, Debug)]
pub struct LinkTable<R> {
    entries: Vec<(String, LinkAction<R>)>,
}

impl<R> Default for LinkTable<R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<R> LinkTable<R> {
    /// Create an empty table. Every token is unmatched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `token` to `action`.
    pub fn on(mut self, token: impl Into<String>, action: LinkAction<R>) -> Self {
        let token = token.into();
        if let Some(slot) = self.entries.iter_mut().find(|(t, _)| *t == token) {
            slot.1 = action;
        } else {
            self.entries.push((token, action));
        }
        self
    }

    /// Map `token` to pushing `route`.
    pub fn push(self, token: impl Into<String>, route: R) -> Self {
        self.on(token, LinkAction::Push(route))
    }

    /// Map `token` to popping back to the initial route.
    pub fn pop_to_initial_route(self, token: impl Into<String>) -> Self {
        self.on(token, LinkAction::PopToInitialRoute)
    }

    /// Map `token` to presenting `route` in the `style` slot.
    ///
    /// The token must come last in a link. On a coordinator without
    /// [`Capabilities::MODAL`](crate::Capabilities::MODAL) it is rejected with
    /// [`DeepLinkError::ModalUnsupported`](crate::DeepLinkError::ModalUnsupported).
    pub fn present(self, token: impl Into<String>, route: R, style: ModalStyle) -> Self {
        self.on(token, LinkAction::Present(route, style))
    }

    /// Map `token` to delegating into the child built by `factory`.
    pub fn delegate(
        self,
        token: impl Into<String>,
        factory: impl Fn() -> Blueprint<R> + 'static,
    ) -> Self {
        self.on(token, LinkAction::Delegate(Rc::new(factory)))
    }

    /// Action registered for `token`.
    pub fn resolve(&self, token: &str) -> Option<&LinkAction<R>> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, action)| action)
    }

    /// Registered tokens in registration order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    /// Number of registered tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no token is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn later_registration_replaces() {
        let links = LinkTable::new().push("a", 1_u8).push("a", 2);
        assert_eq!(links.len(), 1);
        assert!(matches!(links.resolve("a"), Some(LinkAction::Push(2))));
    }

    #[test]
    fn delegate_builds_on_demand() {
        let links: LinkTable<u8> = LinkTable::new().delegate("flow", || Blueprint::new("flow", 7));
        let Some(LinkAction::Delegate(factory)) = links.resolve("flow") else {
            panic!("expected a delegate action");
        };
        assert_eq!(*factory().initial_route(), 7);
        assert_eq!(format!("{:?}", links.resolve("flow").unwrap()), "Delegate(..)");
    }

    #[test]
    fn only_present_is_terminal() {
        assert!(LinkAction::Present(1_u8, ModalStyle::Sheet).is_terminal());
        assert!(!LinkAction::Push(1_u8).is_terminal());
        assert!(!LinkAction::<u8>::PopToInitialRoute.is_terminal());
    }
}
