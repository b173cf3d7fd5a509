// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared stack basics.
//!
//! A home coordinator pushes a route, then a child flow takes over the top of the stack.
//! Popping back evicts the child; every flush prints what the host would re-render.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p trailhead_demos --example stack_basics`

use trailhead_coordinator::{
    Blueprint, Navigator, Renderable, Routable, StackDamage, StackHost, StackNavigating,
};

#[derive(Clone, Debug, PartialEq)]
enum Screen {
    View1,
    View2,
    NewFlowRoot,
    NewFlowView2,
}

impl Routable for Screen {
    type Id = &'static str;
    fn id(&self) -> Self::Id {
        match self {
            Self::View1 => "view1",
            Self::View2 => "view2",
            Self::NewFlowRoot => "newFlowRoot",
            Self::NewFlowView2 => "newFlowView2",
        }
    }
}

impl Renderable for Screen {
    type Output = &'static str;
    fn render(&self) -> Self::Output {
        match self {
            Self::View1 => "View 1",
            Self::View2 => "View 2",
            Self::NewFlowRoot => "New flow",
            Self::NewFlowView2 => "New flow, step 2",
        }
    }
}

/// Prints what a real host would re-render.
struct PrintHost;

impl StackHost<Screen> for PrintHost {
    fn render_stack(&mut self, base: &Screen, routes: &[Screen], damage: StackDamage) {
        let titles: Vec<_> = routes.iter().map(Renderable::render).collect();
        println!(
            "render {} + {:?} (keep {}, drop {}, add {})",
            base.render(),
            titles,
            damage.retained,
            damage.popped,
            damage.pushed
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stack_basics=info,trailhead_coordinator=debug,trailhead_stack=debug".into()),
        )
        .init();

    let mut nav = Navigator::new();
    let home = nav.insert(Blueprint::new("HomeCoordinator", Screen::View1));
    let stack = nav.create_stack(home).unwrap();
    let mut host = PrintHost;

    nav.coordinator_mut(home).unwrap().push_route(Screen::View2);
    nav.flush(stack, &mut host);

    let flow = nav.insert(Blueprint::new("NewFlowCoordinator", Screen::NewFlowRoot));
    {
        let mut home = nav.coordinator_mut(home).unwrap();
        home.push_coordinator(flow);
        // Rejected: the flow owns the top of the stack now.
        assert!(!home.push_route(Screen::View2));
    }
    nav.push_route(flow, Screen::NewFlowView2);
    nav.flush(stack, &mut host);

    // Back to the flow's root, then out of the flow entirely.
    nav.pop_to_initial_route(flow);
    nav.flush(stack, &mut host);
    nav.pop_to_previous_coordinator(flow);
    nav.flush(stack, &mut host);
    assert!(!nav.is_alive(flow));

    // Popping past the bottom is logged and ignored.
    nav.pop(home);
    nav.pop(home);
    nav.flush(stack, &mut host);
    tracing::info!(
        presented = ?nav.coordinator(home).unwrap().presented_routes(),
        "home after popping past the bottom"
    );
}
