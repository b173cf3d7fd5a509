// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tab selection: a fixed set of branches, exactly one of them selected.

use alloc::vec::Vec;

use trailhead_stack::Routable;

use crate::deep_link::DeepLink;
use crate::error::{DeepLinkError, TabError};
use crate::navigator::Navigator;
use crate::types::{CoordinatorId, EmptyLinkPolicy};

/// A route that can tag a tab.
pub trait TabRoutable: Routable {
    /// Text shown in the tab bar.
    fn label(&self) -> &str;
    /// Deep-link token selecting this tab.
    fn link_token(&self) -> &str;
}

/// One tab: its tag and the coordinator running inside it, if any.
#[derive(Clone, Debug)]
pub struct TabBranch<T> {
    /// Identifies the tab.
    pub tag: T,
    /// Coordinator receiving the deep-link tokens after the tab's own.
    pub coordinator: Option<CoordinatorId>,
}

impl<T> TabBranch<T> {
    /// A tab without a coordinator.
    pub fn new(tag: T) -> Self {
        Self {
            tag,
            coordinator: None,
        }
    }

    /// A tab hosting `coordinator`.
    pub fn with_coordinator(tag: T, coordinator: CoordinatorId) -> Self {
        Self {
            tag,
            coordinator: Some(coordinator),
        }
    }
}

/// Exclusive selection over a fixed list of tabs.
///
/// ```rust
/// use trailhead_coordinator::{Routable, TabBranch, TabRoutable, TabSelector};
///
/// #[derive(Clone, Debug)]
/// struct Tab(&'static str);
///
/// impl Routable for Tab {
///     type Id = &'static str;
///     fn id(&self) -> Self::Id {
///         self.0
///     }
/// }
///
/// impl TabRoutable for Tab {
///     fn label(&self) -> &str {
///         self.0
///     }
///     fn link_token(&self) -> &str {
///         self.0
///     }
/// }
///
/// let mut tabs = TabSelector::new(vec![TabBranch::new(Tab("home")), TabBranch::new(Tab("search"))])
///     .unwrap();
/// assert_eq!(tabs.selected().0, "home");
/// assert!(tabs.select(&Tab("search")));
/// assert!(!tabs.select(&Tab("settings")));
/// assert_eq!(tabs.selected_index(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct TabSelector<T> {
    branches: Vec<TabBranch<T>>,
    selected: usize,
}

impl<T: TabRoutable> TabSelector<T> {
    /// Create a selector with the first branch selected.
    ///
    /// Tags must be unique by id and by link token.
    pub fn new(branches: Vec<TabBranch<T>>) -> Result<Self, TabError> {
        if branches.is_empty() {
            return Err(TabError::NoTabs);
        }
        for (index, branch) in branches.iter().enumerate() {
            let duplicate = branches[..index].iter().any(|earlier| {
                earlier.tag.id() == branch.tag.id()
                    || earlier.tag.link_token() == branch.tag.link_token()
            });
            if duplicate {
                return Err(TabError::DuplicateTab { index });
            }
        }
        Ok(Self {
            branches,
            selected: 0,
        })
    }

    /// Select `tab`. Ignored (logged) if it is not one of the tabs.
    pub fn select(&mut self, tab: &T) -> bool {
        let id = tab.id();
        let Some(index) = self.branches.iter().position(|b| b.tag.id() == id) else {
            tracing::warn!(tab = ?id, "cannot select tab: not a member");
            return false;
        };
        self.selected = index;
        true
    }

    /// The selected tag.
    pub fn selected(&self) -> &T {
        &self.selected_branch().tag
    }

    /// Position of the selected tab.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected branch.
    pub fn selected_branch(&self) -> &TabBranch<T> {
        // `new` guarantees at least one branch and `selected` is always a valid index.
        &self.branches[self.selected]
    }

    /// All branches in tab-bar order.
    pub fn branches(&self) -> &[TabBranch<T>] {
        &self.branches
    }

    /// All tags in tab-bar order.
    pub fn tabs(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.branches.iter().map(|b| &b.tag)
    }

    /// The coordinator hosted by `tab`.
    pub fn coordinator_for(&self, tab: &T) -> Option<CoordinatorId> {
        let id = tab.id();
        self.branches
            .iter()
            .find(|b| b.tag.id() == id)
            .and_then(|b| b.coordinator)
    }

    /// Select the tab named by the first token and hand the rest to its coordinator.
    ///
    /// Selection sticks even if the coordinator later rejects a token.
    pub fn handle_deep_link<R: Routable>(
        &mut self,
        navigator: &mut Navigator<R>,
        link: &mut DeepLink,
    ) -> Result<(), DeepLinkError> {
        let Some(index) = self.take_branch(link, navigator.empty_link_policy())? else {
            return Ok(());
        };
        tracing::debug!(tab = self.branches[index].tag.label(), "deep link selects tab");
        self.selected = index;
        match self.branches[index].coordinator {
            Some(coordinator) => navigator.handle_deep_link(coordinator, link),
            None => Self::leaf(link),
        }
    }

    /// Returns `true` if [`handle_deep_link`](Self::handle_deep_link) would accept `link`.
    pub fn can_handle_deep_link<R: Routable>(
        &self,
        navigator: &Navigator<R>,
        link: &DeepLink,
    ) -> bool {
        self.check_deep_link(navigator, link).is_ok()
    }

    /// Like [`can_handle_deep_link`](Self::can_handle_deep_link), reporting why a link would
    /// be rejected.
    pub fn check_deep_link<R: Routable>(
        &self,
        navigator: &Navigator<R>,
        link: &DeepLink,
    ) -> Result<(), DeepLinkError> {
        let mut link = link.clone();
        let Some(index) = self.take_branch(&mut link, navigator.empty_link_policy())? else {
            return Ok(());
        };
        match self.branches[index].coordinator {
            Some(coordinator) => navigator.check_deep_link(coordinator, &link),
            None => Self::leaf(&link),
        }
    }

    /// Consume the tab token. `Ok(None)` for an empty link that the policy accepts.
    fn take_branch(
        &self,
        link: &mut DeepLink,
        policy: EmptyLinkPolicy,
    ) -> Result<Option<usize>, DeepLinkError> {
        let Some(token) = link.first() else {
            return match policy {
                EmptyLinkPolicy::Succeed => Ok(None),
                EmptyLinkPolicy::Reject => Err(DeepLinkError::Empty),
            };
        };
        let Some(index) = self
            .branches
            .iter()
            .position(|b| b.tag.link_token() == token)
        else {
            return Err(DeepLinkError::Unmatched {
                token: token.into(),
            });
        };
        let _ = link.consume_first();
        Ok(Some(index))
    }

    /// A tab without coordinator accepts no further token.
    fn leaf(link: &DeepLink) -> Result<(), DeepLinkError> {
        match link.first() {
            Some(token) => Err(DeepLinkError::Unmatched {
                token: token.into(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Blueprint, Capabilities, LinkTable, ModalStyle};
    use alloc::vec;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Tab {
        Home,
        Search,
    }

    impl Routable for Tab {
        type Id = Self;
        fn id(&self) -> Self {
            self.clone()
        }
    }

    impl TabRoutable for Tab {
        fn label(&self) -> &str {
            match self {
                Self::Home => "Home",
                Self::Search => "Search",
            }
        }

        fn link_token(&self) -> &str {
            match self {
                Self::Home => "home",
                Self::Search => "search",
            }
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Screen {
        Home,
        View2,
        SheetFlow,
    }

    impl Routable for Screen {
        type Id = &'static str;
        fn id(&self) -> &'static str {
            match self {
                Self::Home => "home",
                Self::View2 => "view2",
                Self::SheetFlow => "sheetFlow",
            }
        }
    }

    fn setup() -> (Navigator<Screen>, CoordinatorId, TabSelector<Tab>) {
        let mut nav = Navigator::new();
        let home = nav.insert(
            Blueprint::new("home", Screen::Home)
                .with_capabilities(Capabilities::STACK | Capabilities::MODAL)
                .with_links(
                    LinkTable::new()
                        .pop_to_initial_route("view1")
                        .push("view2", Screen::View2)
                        .present("sheetFlow", Screen::SheetFlow, ModalStyle::Sheet),
                ),
        );
        let _ = nav.create_stack(home).unwrap();
        let tabs = TabSelector::new(vec![
            TabBranch::with_coordinator(Tab::Home, home),
            TabBranch::new(Tab::Search),
        ])
        .unwrap();
        (nav, home, tabs)
    }

    #[test]
    fn construction_is_validated() {
        assert_eq!(
            TabSelector::<Tab>::new(vec![]).unwrap_err(),
            TabError::NoTabs
        );
        let err = TabSelector::new(vec![
            TabBranch::new(Tab::Home),
            TabBranch::new(Tab::Search),
            TabBranch::new(Tab::Home),
        ])
        .unwrap_err();
        assert_eq!(err, TabError::DuplicateTab { index: 2 });
    }

    #[test]
    fn selection() {
        let (_, home, mut tabs) = setup();
        assert_eq!(tabs.selected(), &Tab::Home);
        assert!(tabs.select(&Tab::Search));
        assert_eq!(tabs.selected_branch().coordinator, None);
        assert_eq!(tabs.coordinator_for(&Tab::Home), Some(home));
        assert_eq!(tabs.tabs().len(), 2);
        assert_eq!(tabs.branches().len(), 2);
    }

    #[test]
    fn home_view2_pushes_into_home_tab() {
        let (mut nav, home, mut tabs) = setup();
        assert!(tabs.select(&Tab::Search));
        let mut link = DeepLink::from_tokens(["home", "view2"]);
        assert!(tabs.can_handle_deep_link(&nav, &link));
        assert_eq!(tabs.handle_deep_link(&mut nav, &mut link), Ok(()));
        assert_eq!(tabs.selected(), &Tab::Home);
        assert_eq!(
            nav.coordinator(home).unwrap().presented_routes(),
            &[Screen::View2]
        );
    }

    #[test]
    fn token_after_sheet_fails_with_sheet_presented() {
        let (mut nav, home, mut tabs) = setup();
        let mut link = DeepLink::from_tokens(["home", "sheetFlow", "view2"]);
        assert!(!tabs.can_handle_deep_link(&nav, &link));
        let err = tabs.handle_deep_link(&mut nav, &mut link).unwrap_err();
        assert_eq!(
            err,
            DeepLinkError::TrailingAfterModal {
                token: "view2".into()
            }
        );
        assert_eq!(
            nav.coordinator(home).unwrap().sheet(),
            Some(&Screen::SheetFlow)
        );
    }

    #[test]
    fn unknown_tab_token() {
        let (mut nav, _, mut tabs) = setup();
        let mut link = DeepLink::from_tokens(["settings"]);
        assert!(!tabs.can_handle_deep_link(&nav, &link));
        assert_eq!(
            tabs.handle_deep_link(&mut nav, &mut link),
            Err(DeepLinkError::Unmatched {
                token: "settings".into()
            })
        );
        assert_eq!(tabs.selected(), &Tab::Home);
    }

    #[test]
    fn tab_without_coordinator_takes_no_more_tokens() {
        let (mut nav, _, mut tabs) = setup();
        assert!(tabs.can_handle_deep_link(&nav, &DeepLink::from_tokens(["search"])));
        let mut link = DeepLink::from_tokens(["search", "view2"]);
        assert!(!tabs.can_handle_deep_link(&nav, &link));
        let err = tabs.handle_deep_link(&mut nav, &mut link).unwrap_err();
        assert_eq!(err.token(), Some("view2"));
        assert_eq!(tabs.selected(), &Tab::Search);
    }

    #[test]
    fn empty_link_follows_policy() {
        let (mut nav, _, mut tabs) = setup();
        let empty = DeepLink::from_tokens(Vec::<&str>::new());
        assert!(tabs.can_handle_deep_link(&nav, &empty));
        nav.set_empty_link_policy(EmptyLinkPolicy::Reject);
        assert!(!tabs.can_handle_deep_link(&nav, &empty));
        // The home coordinator receives nothing after its tab token.
        let mut link = DeepLink::from_tokens(["home"]);
        assert_eq!(
            tabs.handle_deep_link(&mut nav, &mut link),
            Err(DeepLinkError::Empty)
        );
    }
}
