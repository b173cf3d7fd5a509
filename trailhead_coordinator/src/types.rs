// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public handle and policy types: coordinator and stack ids, capabilities, modal styles.

/// Identifier for a coordinator in a [`Navigator`](crate::Navigator).
///
/// A small, copyable, generational handle made of a slot index and a generation counter.
/// It is the non-owning reference a parent or a host keeps to a coordinator.
///
/// - On insert, a slot is allocated; reused slots get a higher generation.
/// - On removal (explicitly, or because the coordinator was popped off its stack) the handle
///   becomes stale. Stale handles never alias a newer coordinator, and every operation
///   called with one is a logged no-op.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CoordinatorId(pub(crate) u32, pub(crate) u32);

impl CoordinatorId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

/// Identifier for a shared stack in a [`Navigator`](crate::Navigator).
///
/// This is the "root" handle a coordinator holds. Same generational semantics as
/// [`CoordinatorId`]: once the stack is removed every coordinator still pointing at it
/// is detached.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct StackId(pub(crate) u32, pub(crate) u32);

impl StackId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// What a coordinator is able to do.
    ///
    /// Coordinator kinds are compositions of capabilities rather than types:
    /// a stack-only coordinator has [`STACK`](Self::STACK), a stack-and-modal coordinator
    /// has both. Operations outside a coordinator's capabilities are logged no-ops.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Push and pop routes on a shared stack.
        const STACK = 0b0000_0001;
        /// Present routes in the sheet and full-screen slots.
        const MODAL = 0b0000_0010;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::STACK
    }
}

/// Modal presentation slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModalStyle {
    /// A sheet over the current context.
    Sheet,
    /// A cover taking as much of the screen as possible.
    FullScreenCover,
}

/// How deep-link dispatch treats a coordinator that receives no tokens.
///
/// Set with [`Navigator::set_empty_link_policy`](crate::Navigator::set_empty_link_policy).
/// Running out of tokens after a coordinator consumed at least one of them is always success.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EmptyLinkPolicy {
    /// Nothing to do is success.
    #[default]
    Succeed,
    /// Fail with [`DeepLinkError::Empty`](crate::DeepLinkError::Empty).
    Reject,
}
