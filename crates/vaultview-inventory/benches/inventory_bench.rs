// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the filter/sort path the list controller runs
// on every filter, sort, or search intent.

use std::sync::{Arc, Mutex};

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use uuid::Uuid;

use vaultview_core::types::{FilterState, SortConfig, SortDirection, SshKey, TrustLevel};
use vaultview_inventory::{ListController, Paging};
use vaultview_store::AssetCache;

/// Synthesize `count` SSH keys with varied owners and trust levels.
fn synth_keys(count: usize) -> Vec<SshKey> {
    let owners = ["ci-deploy", "alice", "ci-release", "bob", "svc-backup"];
    let trust = [TrustLevel::High, TrustLevel::Medium, TrustLevel::Low];

    (0..count)
        .map(|i| SshKey {
            id: Uuid::new_v4().to_string(),
            key_owner: format!("{}-{i}", owners[i % owners.len()]),
            fingerprint: format!("SHA256:{}", Uuid::new_v4().simple()),
            last_used: "2026-08-01T09:00:00Z".parse().expect("timestamp"),
            trust_level: trust[i % trust.len()],
            key_type: "ed25519".into(),
            created_at: "2024-06-11T00:00:00Z".parse().expect("timestamp"),
            servers: Vec::new(),
        })
        .collect()
}

fn loaded_controller(count: usize) -> ListController<SshKey> {
    let cache = Arc::new(Mutex::new(
        AssetCache::open_in_memory().expect("open in-memory cache"),
    ));
    let mut ctl = ListController::new(
        cache,
        SortConfig::new("trust_level", SortDirection::Desc),
        Paging::all(),
    );
    ctl.complete_load(Ok(synth_keys(count)));
    ctl
}

/// Benchmark the full filter + stable-sort pass over 1 000 records.
fn bench_apply_filters(c: &mut Criterion) {
    let mut ctl = loaded_controller(1_000);

    c.bench_function("apply_filters (1k records, no criteria)", |b| {
        b.iter(|| {
            ctl.apply_filters();
            black_box(ctl.visible().len());
        });
    });

    ctl.set_filter(FilterState {
        search: Some("ci-".into()),
        ..FilterState::default()
    });

    c.bench_function("apply_filters (1k records, substring search)", |b| {
        b.iter(|| {
            ctl.apply_filters();
            black_box(ctl.visible().len());
        });
    });
}

/// Benchmark a sort-direction toggle, which re-derives the visible slice.
fn bench_toggle_sort(c: &mut Criterion) {
    let mut ctl = loaded_controller(1_000);

    c.bench_function("toggle_sort (1k records, owner)", |b| {
        b.iter(|| {
            ctl.toggle_sort(black_box("key_owner"));
            black_box(ctl.visible().len());
        });
    });
}

criterion_group!(benches, bench_apply_filters, bench_toggle_sort);
criterion_main!(benches);
