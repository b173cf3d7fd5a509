// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deep links: the ordered tokens of an incoming navigation request.
//!
//! ## Tokenization
//!
//! With the `url` feature, links are parsed with the [`url`] crate. The tokens are the host
//! (when present and non-empty) followed by the non-empty path segments. Query and fragment
//! are ignored, so are empty segments, which makes trailing slashes irrelevant. Relative input
//! such as `/foo/bar` is tokenized as a bare path. Tokens are percent-decoded.
//!
//! The `url` crate lowercases the host of special schemes such as `https` and `file`, so
//! `https://Home/View2` yields `home`. Hosts of custom schemes like `myapp://` keep their case.
//!
//! | input                                  | tokens                              |
//! |----------------------------------------|-------------------------------------|
//! | `https://example.com/foo/bar`          | `example.com`, `foo`, `bar`         |
//! | `https://example.com/foo/bar/?debug=1` | `example.com`, `foo`, `bar`         |
//! | `/foo/bar`                             | `foo`, `bar`                        |
//! | `file:///Users/john/file.txt`          | `Users`, `john`, `file.txt`         |
//! | `myapp://home/new%20flow`              | `home`, `new flow`                  |

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "url")]
use crate::error::DeepLinkError;

/// A navigation request, consumed token by token while it is dispatched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeepLink {
    source: String,
    remaining: VecDeque<String>,
}

impl DeepLink {
    /// A link made of already extracted tokens.
    ///
    /// Empty tokens are kept; they simply never match a link table entry.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let remaining: VecDeque<String> = tokens.into_iter().map(Into::into).collect();
        let source = remaining.iter().map(String::as_str).collect::<Vec<_>>().join("/");
        Self { source, remaining }
    }

    /// Tokenize `input`, which may be an absolute URL or a bare path.
    #[cfg(feature = "url")]
    pub fn parse(input: &str) -> Result<Self, DeepLinkError> {
        let invalid = |e: url::ParseError| DeepLinkError::InvalidUrl {
            input: input.into(),
            reason: alloc::string::ToString::to_string(&e),
        };
        // Absolute input replaces the base entirely when joined.
        let base = url::Url::parse("trailhead:///").map_err(invalid)?;
        let url = base.join(input).map_err(invalid)?;
        let mut link = Self::from_url(&url);
        link.source = input.into();
        Ok(link)
    }

    /// Tokenize a parsed URL.
    #[cfg(feature = "url")]
    pub fn from_url(url: &url::Url) -> Self {
        let host = url.host_str().filter(|h| !h.is_empty());
        let segments: Vec<&str> = match url.path_segments() {
            Some(segments) => segments.collect(),
            // Opaque paths such as `mailto:a/b` have no segments; split them by hand.
            None => url.path().split('/').collect(),
        };
        let remaining = host
            .into_iter()
            .chain(segments)
            .filter(|t| !t.is_empty())
            .map(|t| String::from(percent_encoding::percent_decode_str(t).decode_utf8_lossy()))
            .collect();
        Self {
            source: url.as_str().into(),
            remaining,
        }
    }

    /// The input the link was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Tokens not consumed yet, in order.
    pub fn remaining(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.remaining.iter().map(String::as_str)
    }

    /// The next token.
    pub fn first(&self) -> Option<&str> {
        self.remaining.front().map(String::as_str)
    }

    /// Position of the first remaining `token`.
    pub fn position(&self, token: &str) -> Option<usize> {
        self.remaining.iter().position(|t| t == token)
    }

    /// Remove and return the next token.
    pub fn consume_first(&mut self) -> Option<String> {
        self.remaining.pop_front()
    }

    /// Remove and return the token at `index`, keeping the order of the others.
    pub fn consume_at(&mut self, index: usize) -> Option<String> {
        self.remaining.remove(index)
    }

    /// Number of remaining tokens.
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Returns `true` once every token has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

#[cfg(feature = "url")]
impl core::str::FromStr for DeepLink {
    type Err = DeepLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(link: &DeepLink) -> Vec<&str> {
        link.remaining().collect()
    }

    #[test]
    fn consume_front_and_middle() {
        let mut link = DeepLink::from_tokens(["home", "sheet", "view2"]);
        assert_eq!(link.source(), "home/sheet/view2");
        assert_eq!(link.first(), Some("home"));
        assert_eq!(link.position("view2"), Some(2));
        assert_eq!(link.consume_at(1).as_deref(), Some("sheet"));
        assert_eq!(link.consume_first().as_deref(), Some("home"));
        assert_eq!(tokens(&link), ["view2"]);
        assert_eq!(link.consume_at(4), None);
        assert_eq!(link.len(), 1);
        let _ = link.consume_first();
        assert!(link.is_empty());
        assert_eq!(link.consume_first(), None);
    }

    #[cfg(feature = "url")]
    mod url_tokens {
        use super::*;

        #[test]
        fn host_and_path() {
            let link = DeepLink::parse("https://example.com/foo/bar").unwrap();
            assert_eq!(tokens(&link), ["example.com", "foo", "bar"]);
            assert_eq!(link.source(), "https://example.com/foo/bar");
        }

        #[test]
        fn host_only() {
            let link = DeepLink::parse("https://example.com").unwrap();
            assert_eq!(tokens(&link), ["example.com"]);
        }

        #[test]
        fn trailing_slash_adds_nothing() {
            let link = DeepLink::parse("https://example.com/foo/bar/").unwrap();
            assert_eq!(tokens(&link), ["example.com", "foo", "bar"]);
        }

        #[test]
        fn query_and_fragment_are_ignored() {
            let link: DeepLink = "https://example.com/foo/bar?user=123&debug=true#top"
                .parse()
                .unwrap();
            assert_eq!(tokens(&link), ["example.com", "foo", "bar"]);
        }

        #[test]
        fn bare_path() {
            let link = DeepLink::parse("/foo/bar").unwrap();
            assert_eq!(tokens(&link), ["foo", "bar"]);
        }

        #[test]
        fn file_url() {
            let link = DeepLink::parse("file:///Users/john/Documents/file.txt").unwrap();
            assert_eq!(tokens(&link), ["Users", "john", "Documents", "file.txt"]);
        }

        #[test]
        fn custom_scheme() {
            let link = DeepLink::parse("myapp://home/view2").unwrap();
            assert_eq!(tokens(&link), ["home", "view2"]);
        }

        #[test]
        fn tokens_are_percent_decoded() {
            let link = DeepLink::parse("myapp://home/new%20flow/caf%C3%A9").unwrap();
            assert_eq!(tokens(&link), ["home", "new flow", "café"]);
            let link = DeepLink::parse("myapp://my%20home/view2").unwrap();
            assert_eq!(tokens(&link), ["my home", "view2"]);
        }

        #[test]
        fn special_scheme_hosts_are_lowercased() {
            let link = DeepLink::parse("https://Home/View2").unwrap();
            assert_eq!(tokens(&link), ["home", "View2"]);
            let link = DeepLink::parse("myapp://Home/View2").unwrap();
            assert_eq!(tokens(&link), ["Home", "View2"]);
        }

        #[test]
        fn invalid_input_is_reported() {
            let err = DeepLink::parse("https://exa mple.com/").unwrap_err();
            assert!(matches!(err, DeepLinkError::InvalidUrl { .. }));
        }
    }
}
