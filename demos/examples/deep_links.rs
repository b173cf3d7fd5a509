// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deep links through tabs and nested coordinators.
//!
//! Two tabs: `home` runs a home coordinator that can push views, present modals and start a
//! new flow; `test` has no coordinator. Each URL is pre-checked, then dispatched.
//!
//! Run:
//! - `cargo run -p trailhead_demos --example deep_links`
//! - `cargo run -p trailhead_demos --example deep_links -- myapp://home/newFlowRoot/view2`

use trailhead_coordinator::{
    Blueprint, Capabilities, DeepLink, LinkTable, ModalStyle, Navigator, Routable, TabBranch,
    TabRoutable, TabSelector,
};

#[derive(Clone, Debug, PartialEq)]
enum Screen {
    View1,
    View2,
    Sheet,
    Cover,
    SheetFlow,
    NewFlowRoot,
    NewFlowView2,
}

impl Routable for Screen {
    type Id = &'static str;
    fn id(&self) -> Self::Id {
        match self {
            Self::View1 => "view1",
            Self::View2 => "view2",
            Self::Sheet => "sheet",
            Self::Cover => "cover",
            Self::SheetFlow => "sheetFlow",
            Self::NewFlowRoot => "newFlowRoot",
            Self::NewFlowView2 => "newFlowView2",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Tab {
    Home,
    Test,
}

impl Routable for Tab {
    type Id = &'static str;
    fn id(&self) -> Self::Id {
        match self {
            Self::Home => "home",
            Self::Test => "test",
        }
    }
}

impl TabRoutable for Tab {
    fn label(&self) -> &str {
        match self {
            Self::Home => "Home",
            Self::Test => "Test",
        }
    }

    fn link_token(&self) -> &str {
        self.id()
    }
}

fn new_flow() -> Blueprint<Screen> {
    Blueprint::new("NewFlowCoordinator", Screen::NewFlowRoot)
        .with_links(LinkTable::new().push("view2", Screen::NewFlowView2))
}

fn home() -> Blueprint<Screen> {
    Blueprint::new("HomeCoordinator", Screen::View1)
        .with_capabilities(Capabilities::STACK | Capabilities::MODAL)
        .with_links(
            LinkTable::new()
                .pop_to_initial_route("view1")
                .push("view2", Screen::View2)
                .present("sheet", Screen::Sheet, ModalStyle::Sheet)
                .present("cover", Screen::Cover, ModalStyle::FullScreenCover)
                .present("sheetFlow", Screen::SheetFlow, ModalStyle::Sheet)
                .delegate("newFlowRoot", new_flow),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deep_links=info,trailhead_coordinator=debug".into()),
        )
        .init();

    let inputs: Vec<String> = match std::env::args().skip(1).collect::<Vec<_>>() {
        args if args.is_empty() => [
            "myapp://home/view2",
            "myapp://home/view2/newFlowRoot/view2",
            "myapp://home/sheetFlow/view2",
            "myapp://home/cover",
            "myapp://test",
            "myapp://test/view2",
            "myapp://settings",
        ]
        .map(String::from)
        .to_vec(),
        args => args,
    };

    for input in inputs {
        let mut nav = Navigator::new();
        let home_id = nav.insert(home());
        let stack = nav.create_stack(home_id).unwrap();
        let mut tabs = TabSelector::new(vec![
            TabBranch::with_coordinator(Tab::Home, home_id),
            TabBranch::new(Tab::Test),
        ])
        .unwrap();

        let mut link = match DeepLink::parse(&input) {
            Ok(link) => link,
            Err(e) => {
                tracing::error!(input = %input, error = %e, "unparsable deep link");
                continue;
            }
        };
        let accepted = tabs.can_handle_deep_link(&nav, &link);
        let result = tabs.handle_deep_link(&mut nav, &mut link);
        assert_eq!(accepted, result.is_ok());

        let home = nav.coordinator(home_id).unwrap();
        let routes: Vec<_> = nav.routes(stack).unwrap().iter().map(Routable::id).collect();
        tracing::info!(
            input = %input,
            result = ?result,
            tab = tabs.selected().label(),
            stack = ?routes,
            sheet = ?home.sheet().map(Routable::id),
            cover = ?home.full_screen_cover().map(Routable::id),
            "deep link"
        );
    }
}
