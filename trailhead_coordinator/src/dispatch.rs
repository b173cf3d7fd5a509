// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deep-link dispatch and its validity pre-check.
//!
//! ## Walk
//!
//! Both entry points run the same loop over a cursor (the coordinator currently receiving
//! tokens) and the remaining tokens:
//!
//! 1. No token left: success, unless the cursor received nothing and the
//!    [`EmptyLinkPolicy`] is `Reject`.
//! 2. Resolve the first token in the cursor's [`LinkTable`]. Unmatched tokens fail.
//! 3. `Push` and `PopToInitialRoute` act on the cursor and continue with it.
//! 4. `Present` acts and ends the walk; any token after it fails. A cursor without
//!    [`Capabilities::MODAL`] rejects it.
//! 5. `Delegate` builds the child, pushes it, and moves the cursor to it. The parent never
//!    sees another token.
//!
//! The loop is generic over its side effects: the live sink mutates the navigator while the
//! dry-run sink only follows child blueprints, so the pre-check and dispatch accept exactly
//! the same links. Tokens consumed before a failure are not rolled back.

use alloc::rc::Rc;
use alloc::vec::Vec;

use trailhead_stack::Routable;

use crate::coordinator::Blueprint;
use crate::deep_link::DeepLink;
use crate::error::DeepLinkError;
use crate::links::{LinkAction, LinkTable};
use crate::navigator::Navigator;
use crate::types::{Capabilities, CoordinatorId, EmptyLinkPolicy, ModalStyle};

/// Side effects of the deep-link walk.
pub(crate) trait LinkEffects<R> {
    /// Whatever identifies the coordinator receiving tokens.
    type Cursor;

    /// The cursor's link table; `None` behaves like an empty table.
    fn links(&self, cursor: &Self::Cursor) -> Option<Rc<LinkTable<R>>>;

    fn capabilities(&self, cursor: &Self::Cursor) -> Capabilities;

    fn push(&mut self, cursor: &Self::Cursor, route: R);

    fn pop_to_initial_route(&mut self, cursor: &Self::Cursor);

    fn present(&mut self, cursor: &Self::Cursor, route: R, style: ModalStyle);

    /// Attach the child described by `child` under `cursor` and return its cursor.
    fn delegate(&mut self, cursor: &Self::Cursor, child: Blueprint<R>) -> Self::Cursor;
}

/// Mutates the navigator.
struct Live<'a, R: Routable> {
    navigator: &'a mut Navigator<R>,
    // Children that could not be attached; removed once the walk is over.
    orphans: Vec<CoordinatorId>,
}

impl<R: Routable> LinkEffects<R> for Live<'_, R> {
    type Cursor = CoordinatorId;

    fn links(&self, cursor: &CoordinatorId) -> Option<Rc<LinkTable<R>>> {
        self.navigator.coordinator(*cursor).map(|c| c.links.clone())
    }

    fn capabilities(&self, cursor: &CoordinatorId) -> Capabilities {
        self.navigator
            .coordinator(*cursor)
            .map_or_else(Capabilities::empty, |c| c.capabilities)
    }

    fn push(&mut self, cursor: &CoordinatorId, route: R) {
        let _ = self.navigator.push_route(*cursor, route);
    }

    fn pop_to_initial_route(&mut self, cursor: &CoordinatorId) {
        let _ = self.navigator.pop_to_initial_route(*cursor);
    }

    fn present(&mut self, cursor: &CoordinatorId, route: R, style: ModalStyle) {
        let _ = self.navigator.present(*cursor, route, style);
    }

    fn delegate(&mut self, cursor: &CoordinatorId, child: Blueprint<R>) -> CoordinatorId {
        let id = self.navigator.insert(child);
        if !self.navigator.push_coordinator(*cursor, id) {
            self.orphans.push(id);
        }
        id
    }
}

/// What the dry run knows about the coordinator receiving tokens.
struct Preview<R> {
    links: Rc<LinkTable<R>>,
    capabilities: Capabilities,
}

/// Follows link tables without touching any state.
struct DryRun;

impl<R> LinkEffects<R> for DryRun {
    type Cursor = Option<Preview<R>>;

    fn links(&self, cursor: &Self::Cursor) -> Option<Rc<LinkTable<R>>> {
        cursor.as_ref().map(|p| p.links.clone())
    }

    fn capabilities(&self, cursor: &Self::Cursor) -> Capabilities {
        cursor
            .as_ref()
            .map_or_else(Capabilities::empty, |p| p.capabilities)
    }

    fn push(&mut self, _: &Self::Cursor, _: R) {}

    fn pop_to_initial_route(&mut self, _: &Self::Cursor) {}

    fn present(&mut self, _: &Self::Cursor, _: R, _: ModalStyle) {}

    fn delegate(&mut self, _: &Self::Cursor, child: Blueprint<R>) -> Self::Cursor {
        Some(Preview {
            links: child.links,
            capabilities: child.capabilities,
        })
    }
}

/// Walk `link` from `cursor`, consuming tokens as they are handled.
pub(crate) fn walk<R, E>(
    effects: &mut E,
    mut cursor: E::Cursor,
    link: &mut DeepLink,
    policy: EmptyLinkPolicy,
) -> Result<(), DeepLinkError>
where
    R: Clone,
    E: LinkEffects<R>,
{
    let mut received = false;
    loop {
        let Some(token) = link.first() else {
            if !received && policy == EmptyLinkPolicy::Reject {
                return Err(DeepLinkError::Empty);
            }
            return Ok(());
        };
        let links = effects.links(&cursor);
        let Some(action) = links.as_deref().and_then(|l| l.resolve(token)).cloned() else {
            return Err(DeepLinkError::Unmatched {
                token: token.into(),
            });
        };
        if matches!(action, LinkAction::Present(..))
            && !effects.capabilities(&cursor).contains(Capabilities::MODAL)
        {
            return Err(DeepLinkError::ModalUnsupported {
                token: token.into(),
            });
        }
        tracing::trace!(token, action = action_name(&action), "deep link hop");
        let _ = link.consume_first();
        match action {
            LinkAction::Push(route) => {
                effects.push(&cursor, route);
                received = true;
            }
            LinkAction::PopToInitialRoute => {
                effects.pop_to_initial_route(&cursor);
                received = true;
            }
            LinkAction::Present(route, style) => {
                effects.present(&cursor, route, style);
                return match link.first() {
                    Some(next) => Err(DeepLinkError::TrailingAfterModal { token: next.into() }),
                    None => Ok(()),
                };
            }
            LinkAction::Delegate(factory) => {
                cursor = effects.delegate(&cursor, factory());
                received = false;
            }
        }
    }
}

fn action_name<R>(action: &LinkAction<R>) -> &'static str {
    match action {
        LinkAction::Push(_) => "push",
        LinkAction::PopToInitialRoute => "pop to initial route",
        LinkAction::Present(..) => "present",
        LinkAction::Delegate(_) => "delegate",
    }
}

impl<R: Routable> Navigator<R> {
    /// Dispatch `link` starting at coordinator `id`, consuming its tokens.
    ///
    /// Fails on the first token that cannot be handled. Actions taken for earlier tokens
    /// stay applied. A stale `id` behaves like a coordinator without links.
    pub fn handle_deep_link(
        &mut self,
        id: CoordinatorId,
        link: &mut DeepLink,
    ) -> Result<(), DeepLinkError> {
        if !self.is_alive(id) {
            tracing::warn!(id = ?id, "deep link sent to a coordinator that is gone");
        }
        let policy = self.empty_link_policy;
        let mut live = Live {
            navigator: self,
            orphans: Vec::new(),
        };
        let result = walk::<R, _>(&mut live, id, link, policy);
        for orphan in live.orphans {
            if live.navigator.stack_of(orphan).is_none() {
                live.navigator.remove(orphan);
            }
        }
        match &result {
            Ok(()) => tracing::debug!(source = link.source(), "deep link handled"),
            Err(e) => tracing::warn!(source = link.source(), error = %e, "deep link rejected"),
        }
        result
    }

    /// Returns `true` if [`handle_deep_link`](Self::handle_deep_link) would accept `link`.
    ///
    /// Nothing is mutated, including `link`. Child factories are called to read the child's
    /// link table.
    pub fn can_handle_deep_link(&self, id: CoordinatorId, link: &DeepLink) -> bool {
        self.check_deep_link(id, link).is_ok()
    }

    /// Like [`can_handle_deep_link`](Self::can_handle_deep_link), reporting why a link would
    /// be rejected.
    pub fn check_deep_link(&self, id: CoordinatorId, link: &DeepLink) -> Result<(), DeepLinkError> {
        let start = self.coordinator(id).map(|c| Preview {
            links: c.links.clone(),
            capabilities: c.capabilities,
        });
        if start.is_none() {
            tracing::warn!(id = ?id, "deep link checked against a coordinator that is gone");
        }
        walk::<R, _>(&mut DryRun, start, &mut link.clone(), self.empty_link_policy)
    }
}
