// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailhead Stack: the single, flat navigation stack shared by a tree of coordinators.
//!
//! ## Overview
//!
//! A host UI renders one ordered stack of screens. Several independently written
//! coordinators each push and pop their own slice of that stack.
//! [`SharedStack`] is the only owner of the flat sequence and records, in a
//! [`TransitionTable`], where each coordinator's slice begins.
//!
//! - Push routes or whole coordinator slices with [`SharedStack::push_route`] and
//!   [`SharedStack::push_transition`].
//! - Pop by count, back to a coordinator's initial route, or to the root.
//!   Every pop reports which coordinators were evicted so owners can drop their bookkeeping.
//! - Batch mutations and call [`SharedStack::commit`] to receive a [`StackDamage`]
//!   summary for re-rendering.
//!
//! The crate is generic over the route type (see [`Routable`]) and the coordinator key `K`.
//! It knows nothing about coordinators beyond their keys.
//!
//! ## Example
//!
//! ```rust
//! use trailhead_stack::{Routable, SharedStack};
//!
//! #[derive(Clone, Debug)]
//! struct Screen(&'static str);
//!
//! impl Routable for Screen {
//!     type Id = &'static str;
//!     fn id(&self) -> Self::Id {
//!         self.0
//!     }
//! }
//!
//! // The stack belongs to coordinator 0, which is rendered as the stack root.
//! let mut stack: SharedStack<Screen, u32> = SharedStack::with_base(0);
//! stack.push_route(Screen("detail"));
//!
//! // Coordinator 1 starts its slice at index 1 with its own initial route.
//! stack.push_transition(1, Screen("flow_root"));
//! stack.push_route(Screen("flow_step"));
//! assert_eq!(stack.transition_index(&1), Some(1));
//!
//! // Back to coordinator 1's initial route.
//! let evicted = stack.pop_to_initial_route(&1).unwrap();
//! assert!(evicted.is_empty());
//! assert_eq!(stack.len(), 2);
//!
//! // Popping past its initial route evicts coordinator 1.
//! let evicted = stack.pop_routes(1).unwrap();
//! assert_eq!(evicted, vec![1]);
//!
//! let damage = stack.commit();
//! assert_eq!(damage.retained, 0);
//! assert_eq!(damage.pushed, 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod damage;
pub mod route;
pub mod stack;
pub mod transition;

pub use damage::StackDamage;
pub use route::{ById, Renderable, Routable, same_route, same_routes};
pub use stack::SharedStack;
pub use transition::{Transition, TransitionTable};
