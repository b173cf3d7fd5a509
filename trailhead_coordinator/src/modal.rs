// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Modal slots: at most one sheet and one full-screen cover per coordinator.

use trailhead_stack::Routable;

use crate::navigation::CoordinatorMut;
use crate::navigator::Navigator;
use crate::types::{Capabilities, CoordinatorId, ModalStyle};

impl<R: Routable> Navigator<R> {
    /// Present `route` in coordinator `id`'s `style` slot.
    ///
    /// Rejected (logged) if the slot is occupied; the route already shown stays. Does not
    /// need an attached root.
    pub fn present(&mut self, id: CoordinatorId, route: R, style: ModalStyle) -> bool {
        let Some(c) = self.coordinator_entry(id) else {
            tracing::warn!(id = ?id, "cannot present: coordinator is gone");
            return false;
        };
        if !c.capabilities.contains(Capabilities::MODAL) {
            tracing::warn!(coordinator = %c.name, "cannot present: not a modal coordinator");
            return false;
        }
        let name = &c.name;
        let slot = match style {
            ModalStyle::Sheet => &mut c.sheet,
            ModalStyle::FullScreenCover => &mut c.full_screen_cover,
        };
        if let Some(current) = slot.as_ref() {
            tracing::warn!(
                coordinator = %name,
                style = ?style,
                presented = ?current.id(),
                rejected = ?route.id(),
                "cannot present: slot is occupied"
            );
            return false;
        }
        tracing::debug!(coordinator = %name, style = ?style, route = ?route.id(), "present");
        *slot = Some(route);
        true
    }

    /// Clear coordinator `id`'s `style` slot.
    ///
    /// Returns the route that was presented. Hosts call this when their own dismissal gesture
    /// fires.
    pub fn dismiss(&mut self, id: CoordinatorId, style: ModalStyle) -> Option<R> {
        let Some(c) = self.coordinator_entry(id) else {
            tracing::warn!(id = ?id, "cannot dismiss: coordinator is gone");
            return None;
        };
        if !c.capabilities.contains(Capabilities::MODAL) {
            tracing::warn!(coordinator = %c.name, "cannot dismiss: not a modal coordinator");
            return None;
        }
        c.modal_slot(style).take()
    }
}

/// Modal operations of a single coordinator.
pub trait ModalPresenting<R> {
    /// Present `route` in the `style` slot if it is empty.
    fn present(&mut self, route: R, style: ModalStyle) -> bool;
    /// Clear the `style` slot.
    fn dismiss(&mut self, style: ModalStyle) -> Option<R>;
}

impl<R: Routable> ModalPresenting<R> for CoordinatorMut<'_, R> {
    fn present(&mut self, route: R, style: ModalStyle) -> bool {
        self.navigator.present(self.id, route, style)
    }

    fn dismiss(&mut self, style: ModalStyle) -> Option<R> {
        self.navigator.dismiss(self.id, style)
    }
}
