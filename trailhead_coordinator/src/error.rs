// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced to callers.
//!
//! Only deep-link resolution and tab construction fail loudly. Stale handles, missing roots
//! and impossible pops are logged and absorbed where they happen.

use alloc::string::String;

use thiserror::Error;

/// Deep-link resolution failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeepLinkError {
    /// No action is registered for `token` on the coordinator that received it.
    #[error("invalid deep link: no route for token `{token}`")]
    Unmatched {
        /// The offending token.
        token: String,
    },

    /// A modal was presented but tokens remain; modal tokens must come last.
    #[error("invalid deep link: token `{token}` follows a modal presentation")]
    TrailingAfterModal {
        /// The first token after the modal one.
        token: String,
    },

    /// `token` maps to a modal presentation on a coordinator without
    /// [`Capabilities::MODAL`](crate::Capabilities::MODAL).
    #[error("invalid deep link: token `{token}` needs modal slots")]
    ModalUnsupported {
        /// The modal token.
        token: String,
    },

    /// A coordinator received a link with no tokens under
    /// [`EmptyLinkPolicy::Reject`](crate::EmptyLinkPolicy::Reject).
    #[error("invalid deep link: no tokens left to route")]
    Empty,

    /// The input could not be parsed as a URL.
    #[error("invalid deep link `{input}`: {reason}")]
    InvalidUrl {
        /// The rejected input.
        input: String,
        /// Parser message.
        reason: String,
    },
}

impl DeepLinkError {
    /// The offending token, for errors that carry one.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Unmatched { token }
            | Self::TrailingAfterModal { token }
            | Self::ModalUnsupported { token } => Some(token),
            Self::Empty | Self::InvalidUrl { .. } => None,
        }
    }
}

/// Invalid [`TabSelector`](crate::TabSelector) construction.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TabError {
    /// A tab selector needs at least one branch to select.
    #[error("a tab selector needs at least one tab")]
    NoTabs,

    /// Two branches share the same tag id.
    #[error("tab at index {index} duplicates an earlier tab")]
    DuplicateTab {
        /// Index of the second occurrence.
        index: usize,
    },
}
