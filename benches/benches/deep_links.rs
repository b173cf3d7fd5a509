// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use trailhead_coordinator::{
    Blueprint, Capabilities, CoordinatorId, DeepLink, LinkTable, ModalStyle, Navigator, Routable,
};

#[derive(Clone, Debug)]
struct Screen(u32);

impl Routable for Screen {
    type Id = u32;
    fn id(&self) -> u32 {
        self.0
    }
}

fn flow() -> Blueprint<Screen> {
    Blueprint::new("flow", Screen(10))
        .with_capabilities(Capabilities::STACK | Capabilities::MODAL)
        .with_links(
            LinkTable::new()
                .push("step", Screen(11))
                .present("sheet", Screen(12), ModalStyle::Sheet)
                .delegate("flow", flow),
        )
}

fn setup() -> (Navigator<Screen>, CoordinatorId) {
    let mut nav = Navigator::new();
    let home = nav.insert(
        Blueprint::new("home", Screen(0))
            .with_links(LinkTable::new().push("detail", Screen(1)).delegate("flow", flow)),
    );
    let _ = nav.create_stack(home);
    (nav, home)
}

/// `detail` followed by `depth` nested flows, each pushing one step, ending on a sheet.
fn nested_link(depth: usize) -> DeepLink {
    let mut tokens = vec!["detail"];
    for _ in 0..depth {
        tokens.extend(["flow", "step"]);
    }
    tokens.push("sheet");
    DeepLink::from_tokens(tokens)
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_link");
    for &depth in &[1_usize, 8, 64] {
        let link = nested_link(depth);
        group.bench_function(format!("check_d{}", depth), |b| {
            let (nav, home) = setup();
            b.iter(|| black_box(nav.can_handle_deep_link(home, &link)))
        });
        group.bench_function(format!("handle_d{}", depth), |b| {
            b.iter_batched(
                || (setup(), link.clone()),
                |((mut nav, home), mut link)| black_box(nav.handle_deep_link(home, &mut link)),
                BatchSize::SmallInput,
            )
        });
    }
    group.bench_function("parse_url", |b| {
        b.iter(|| black_box(DeepLink::parse("myapp://home/flow/step/flow/step?ref=bench")))
    });
    group.finish();
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);
