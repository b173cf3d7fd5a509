// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator descriptions and the read-only view the navigator hands out.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::links::LinkTable;
use crate::types::{Capabilities, CoordinatorId, ModalStyle, StackId};

/// Side-effect-free description of a coordinator, turned into a live one by
/// [`Navigator::insert`](crate::Navigator::insert).
///
/// Deep-link factories return blueprints, so building one must not touch any navigation state.
#[derive(Clone, Debug)]
pub struct Blueprint<R> {
    pub(crate) name: String,
    pub(crate) initial_route: R,
    pub(crate) presented_routes: Vec<R>,
    pub(crate) capabilities: Capabilities,
    pub(crate) links: Rc<LinkTable<R>>,
}

impl<R> Blueprint<R> {
    /// A stack-only coordinator named `name` starting at `initial_route`, with no links.
    pub fn new(name: impl Into<String>, initial_route: R) -> Self {
        Self {
            name: name.into(),
            initial_route,
            presented_routes: Vec::new(),
            capabilities: Capabilities::default(),
            links: Rc::new(LinkTable::new()),
        }
    }

    /// Replace the capability set.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Routes the coordinator already presents when it is attached.
    ///
    /// They are pushed right after its initial route (or seed the stack, for a base).
    pub fn with_presented_routes(mut self, routes: Vec<R>) -> Self {
        self.presented_routes = routes;
        self
    }

    /// Deep-link table. Accepts a table or a shared one.
    pub fn with_links(mut self, links: impl Into<Rc<LinkTable<R>>>) -> Self {
        self.links = links.into();
        self
    }

    /// Display name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The route the coordinator starts with.
    pub fn initial_route(&self) -> &R {
        &self.initial_route
    }

    /// Deep-link table.
    pub fn links(&self) -> &Rc<LinkTable<R>> {
        &self.links
    }
}

/// A live coordinator, owned by a [`Navigator`](crate::Navigator).
///
/// Mutate it through the navigator, or through a
/// [`CoordinatorMut`](crate::CoordinatorMut) handle.
#[derive(Clone, Debug)]
pub struct Coordinator<R> {
    pub(crate) name: String,
    pub(crate) initial_route: R,
    pub(crate) presented_routes: Vec<R>,
    pub(crate) sheet: Option<R>,
    pub(crate) full_screen_cover: Option<R>,
    pub(crate) root: Option<StackId>,
    pub(crate) parent: Option<CoordinatorId>,
    pub(crate) capabilities: Capabilities,
    pub(crate) links: Rc<LinkTable<R>>,
}

impl<R> From<Blueprint<R>> for Coordinator<R> {
    fn from(blueprint: Blueprint<R>) -> Self {
        Self {
            name: blueprint.name,
            initial_route: blueprint.initial_route,
            presented_routes: blueprint.presented_routes,
            sheet: None,
            full_screen_cover: None,
            root: None,
            parent: None,
            capabilities: blueprint.capabilities,
            links: blueprint.links,
        }
    }
}

impl<R> Coordinator<R> {
    /// Display name, used in logs. Not required to be unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The route the coordinator starts with.
    pub fn initial_route(&self) -> &R {
        &self.initial_route
    }

    /// Routes this coordinator pushed on top of its initial route, bottom first.
    pub fn presented_routes(&self) -> &[R] {
        &self.presented_routes
    }

    /// Route presented as a sheet, if any.
    pub fn sheet(&self) -> Option<&R> {
        self.sheet.as_ref()
    }

    /// Route presented as a full-screen cover, if any.
    pub fn full_screen_cover(&self) -> Option<&R> {
        self.full_screen_cover.as_ref()
    }

    /// Route presented in the `style` slot, if any.
    pub fn modal(&self, style: ModalStyle) -> Option<&R> {
        match style {
            ModalStyle::Sheet => self.sheet(),
            ModalStyle::FullScreenCover => self.full_screen_cover(),
        }
    }

    pub(crate) fn modal_slot(&mut self, style: ModalStyle) -> &mut Option<R> {
        match style {
            ModalStyle::Sheet => &mut self.sheet,
            ModalStyle::FullScreenCover => &mut self.full_screen_cover,
        }
    }

    /// Stack this coordinator is registered on. The handle may be stale.
    pub fn root(&self) -> Option<StackId> {
        self.root
    }

    /// Coordinator that pushed this one, if any.
    pub fn parent(&self) -> Option<CoordinatorId> {
        self.parent
    }

    /// What this coordinator is able to do.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Deep-link table.
    pub fn links(&self) -> &Rc<LinkTable<R>> {
        &self.links
    }

    /// Returns `true` if a root handle is set.
    ///
    /// Use [`Navigator::stack_of`](crate::Navigator::stack_of) to also check it is live.
    pub fn is_attached(&self) -> bool {
        self.root.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn blueprint_becomes_detached_coordinator() {
        let blueprint = Blueprint::new("home", 0_u8)
            .with_capabilities(Capabilities::STACK | Capabilities::MODAL)
            .with_presented_routes(vec![1, 2])
            .with_links(LinkTable::new().push("one", 1));
        let c = Coordinator::from(blueprint);
        assert_eq!(c.name(), "home");
        assert_eq!(c.presented_routes(), &[1, 2]);
        assert!(!c.is_attached());
        assert!(c.parent().is_none());
        assert!(c.capabilities().contains(Capabilities::MODAL));
        assert_eq!(c.links().len(), 1);
    }

    #[test]
    fn modal_slots_are_independent() {
        let mut c = Coordinator::from(Blueprint::new("c", 0_u8));
        *c.modal_slot(ModalStyle::Sheet) = Some(4);
        assert_eq!(c.sheet(), Some(&4));
        assert_eq!(c.modal(ModalStyle::FullScreenCover), None);
    }
}
