//! Placement engine stress benchmark.
//!
//! The skip/defer loop is quadratic-ish in the worst case, and behavior at
//! thousands of items is exactly what informal complexity analysis tends to
//! get wrong. Two shapes are measured: a broad world (many ungated tasks,
//! large filler pool - the realistic case) and a strict requirement chain
//! (every placement gated by the previous one - the adversarial case).

use std::collections::BTreeMap;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use multiworld_core::entities::MultiWorld;
use multiworld_core::generate::{generate, GenerationConfig};
use multiworld_logic::{
    ItemSpec, MultiWorldSpec, PlayerSpec, Requirement, TaskSpec, WorldSpec,
};

fn single_player(world: WorldSpec) -> MultiWorldSpec {
    let mut players = BTreeMap::new();
    players.insert("P1".to_string(), PlayerSpec { world });
    MultiWorldSpec {
        name: "bench".to_string(),
        players,
    }
}

/// Broad world: `filler` coins, `free_tasks` ungated tasks, and a short
/// requirement chain mixed in.
fn wide_world(filler: u32, free_tasks: usize, chain: usize) -> MultiWorldSpec {
    let mut items = BTreeMap::new();
    let mut tasks = BTreeMap::new();

    items.insert(
        "Coin".to_string(),
        ItemSpec {
            tags: Vec::new(),
            count: filler,
        },
    );
    for i in 0..free_tasks {
        tasks.insert(format!("Free{i}"), TaskSpec::default());
    }
    for i in 0..chain {
        items.insert(format!("Key{i}"), ItemSpec::default());
        if i > 0 {
            tasks.insert(
                format!("Gate{i}"),
                TaskSpec {
                    tags: Vec::new(),
                    needs: Some(Requirement::item(format!("Key{}", i - 1), 1)),
                    victory: false,
                },
            );
        }
    }

    single_player(WorldSpec {
        name: "wide".to_string(),
        starting_items: Vec::new(),
        items,
        tasks,
    })
}

/// Strict chain: task `i` requires key `i-1`; only one task is ever newly
/// reachable per placement, maximizing defer churn.
fn chain_world(length: usize) -> MultiWorldSpec {
    let mut items = BTreeMap::new();
    let mut tasks = BTreeMap::new();

    tasks.insert("Start".to_string(), TaskSpec::default());
    for i in 0..length {
        items.insert(format!("Key{i}"), ItemSpec::default());
        if i > 0 {
            tasks.insert(
                format!("Gate{i}"),
                TaskSpec {
                    tags: Vec::new(),
                    needs: Some(Requirement::item(format!("Key{}", i - 1), 1)),
                    victory: false,
                },
            );
        }
    }

    single_player(WorldSpec {
        name: "chain".to_string(),
        starting_items: Vec::new(),
        items,
        tasks,
    })
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/wide");
    group.sample_size(10);
    for &size in &[500u32, 2000, 5000] {
        let spec = wide_world(size, 64, 16);
        group.bench_with_input(BenchmarkId::from_parameter(size), &spec, |b, spec| {
            b.iter(|| {
                let mut multi = MultiWorld::from_spec(spec);
                generate(&mut multi, &GenerationConfig { seed: Some(42) }).unwrap()
            });
        });
    }
    group.finish();
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/chain");
    group.sample_size(10);
    for &length in &[40usize, 100] {
        let spec = chain_world(length);
        group.bench_with_input(BenchmarkId::from_parameter(length), &spec, |b, spec| {
            b.iter(|| {
                let mut multi = MultiWorld::from_spec(spec);
                generate(&mut multi, &GenerationConfig { seed: Some(42) }).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wide, bench_chain);
criterion_main!(benches);
