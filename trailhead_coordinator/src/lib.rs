// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailhead Coordinator: a tree of navigation coordinators over shared stacks.
//!
//! ## Overview
//!
//! A [`Navigator`] owns coordinators and the [`SharedStack`]s they register on. Each
//! coordinator owns a contiguous slice of one stack (its initial route followed by the routes
//! it pushed), optionally a sheet and a full-screen cover, and a [`LinkTable`] describing how
//! it reacts to deep-link tokens.
//!
//! - Coordinators are described by side-effect-free [`Blueprint`]s and referred to by
//!   generational [`CoordinatorId`]s. A coordinator's `root` is a [`StackId`], never a
//!   reference, so a torn-down stack simply makes later commands logged no-ops.
//! - Stack operations ([`Navigator::push_route`], [`Navigator::pop`], ...) keep every
//!   coordinator's presented routes aligned with the stack. Only the most recently pushed
//!   coordinator may push or pop single routes; the other pops work from any depth and evict
//!   the coordinators above.
//! - [`Navigator::handle_deep_link`] walks a [`DeepLink`] across the tree, creating child
//!   coordinators on the way; [`Navigator::can_handle_deep_link`] runs the same walk without
//!   side effects.
//! - [`TabSelector`] picks one of several branches and forwards deep links into it.
//! - [`Navigator::flush`] renders accumulated changes on a [`StackHost`].
//!
//! Misuse that typically comes from UI callbacks racing a torn-down scope (stale ids, pops
//! past the bottom, pushes from a coordinator that is no longer on top) is logged through
//! `tracing` and ignored. Only deep-link resolution returns errors.
//!
//! ## Example
//!
//! ```rust
//! use trailhead_coordinator::{
//!     Blueprint, Capabilities, DeepLink, LinkTable, ModalStyle, Navigator, Routable,
//! };
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Screen {
//!     Home,
//!     Detail,
//!     Settings,
//!     Checkout,
//! }
//!
//! impl Routable for Screen {
//!     type Id = &'static str;
//!     fn id(&self) -> Self::Id {
//!         match self {
//!             Screen::Home => "home",
//!             Screen::Detail => "detail",
//!             Screen::Settings => "settings",
//!             Screen::Checkout => "checkout",
//!         }
//!     }
//! }
//!
//! let mut nav = Navigator::new();
//! let home = nav.insert(
//!     Blueprint::new("home", Screen::Home)
//!         .with_capabilities(Capabilities::STACK | Capabilities::MODAL)
//!         .with_links(
//!             LinkTable::new()
//!                 .push("detail", Screen::Detail)
//!                 .present("settings", Screen::Settings, ModalStyle::Sheet)
//!                 .delegate("checkout", || Blueprint::new("checkout", Screen::Checkout)),
//!         ),
//! );
//! let stack = nav.create_stack(home).unwrap();
//!
//! let mut link = DeepLink::from_tokens(["detail", "checkout"]);
//! assert!(nav.can_handle_deep_link(home, &link));
//! nav.handle_deep_link(home, &mut link).unwrap();
//! assert_eq!(nav.routes(stack).unwrap(), &[Screen::Detail, Screen::Checkout]);
//!
//! // A modal token must come last.
//! let link = DeepLink::from_tokens(["settings", "detail"]);
//! assert!(!nav.can_handle_deep_link(home, &link));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to `tracing` and `thiserror`.
//! - `url` (default): [`DeepLink::parse`] tokenizes URLs with the `url` crate.
//!
//! Without them the crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod coordinator;
mod deep_link;
mod dispatch;
mod error;
mod host;
mod links;
mod modal;
mod navigation;
mod navigator;
mod slots;
mod tabs;
mod types;

pub use coordinator::{Blueprint, Coordinator};
pub use deep_link::DeepLink;
pub use error::{DeepLinkError, TabError};
pub use host::StackHost;
pub use links::{ChildFactory, LinkAction, LinkTable};
pub use modal::ModalPresenting;
pub use navigation::{CoordinatorMut, StackNavigating};
pub use navigator::Navigator;
pub use tabs::{TabBranch, TabRoutable, TabSelector};
pub use types::{Capabilities, CoordinatorId, EmptyLinkPolicy, ModalStyle, StackId};

pub use trailhead_stack::{Renderable, Routable, SharedStack, StackDamage};
