// Copyright 2025 the Trailhead Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trailhead_coordinator::{Blueprint, Navigator};
use trailhead_stack::{Routable, SharedStack};

#[derive(Clone, Debug)]
struct Screen(u32);

impl Routable for Screen {
    type Id = u32;
    fn id(&self) -> u32 {
        self.0
    }
}

fn bench_shared_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_stack");
    for &n in &[16_u32, 256, 4096] {
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_function(format!("push_pop_n{}", n), |b| {
            b.iter_batched(
                || SharedStack::<Screen, u32>::with_base(0),
                |mut stack| {
                    for i in 0..n {
                        stack.push_route(Screen(i));
                    }
                    let _ = stack.commit();
                    while stack.pop_routes(1).is_some() {}
                    black_box(stack.commit());
                },
                BatchSize::SmallInput,
            )
        });
        // One transition every eight routes; a single pop to the root evicts them all.
        group.bench_function(format!("transitions_pop_to_root_n{}", n), |b| {
            b.iter_batched(
                || SharedStack::<Screen, u32>::with_base(0),
                |mut stack| {
                    for i in 0..n {
                        if i % 8 == 0 {
                            stack.push_transition(i + 1, Screen(i));
                        } else {
                            stack.push_route(Screen(i));
                        }
                    }
                    black_box(stack.pop_to_root().len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_navigator(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigator");
    for &depth in &[4_u32, 32, 128] {
        group.throughput(Throughput::Elements(u64::from(depth)));
        group.bench_function(format!("nested_coordinators_d{}", depth), |b| {
            b.iter_batched(
                || {
                    let mut nav = Navigator::new();
                    let home = nav.insert(Blueprint::new("home", Screen(0)));
                    let _ = nav.create_stack(home);
                    (nav, home)
                },
                |(mut nav, home)| {
                    let mut top = home;
                    for i in 0..depth {
                        let child = nav.insert(Blueprint::new("child", Screen(i)));
                        let _ = nav.push_coordinator(top, child);
                        let _ = nav.push_route(child, Screen(i + 1000));
                        top = child;
                    }
                    let _ = nav.pop_to_initial_route(home);
                    black_box(nav.coordinator_count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shared_stack, bench_navigator);
criterion_main!(benches);
