// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use slotroute::model::{Location, LocationId, SlotId};
use slotroute::ops::{apply_ops, ApplyResult, LocationPatch, Op};
use slotroute::session::RouteSession;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group name in this file: `ops.apply`
// - Case IDs (the string after the `/`) must remain stable across refactors.
fn checksum_apply_result(result: &ApplyResult) -> u64 {
    let mut acc = 0u64;
    acc = acc.wrapping_mul(131).wrapping_add(result.new_rev);
    acc = acc.wrapping_mul(131).wrapping_add(result.applied as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.added.len() as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.updated.len() as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.removed.len() as u64);
    acc
}

fn add_location_ops(slots: &[SlotId], count: usize) -> Vec<Op> {
    assert!(!slots.is_empty(), "route fixture must contain slots");

    (0..count)
        .map(|idx| {
            let slot_id = slots[idx.wrapping_mul(7) % slots.len()].clone();
            let location_id = LocationId::new(format!("bench_loc_{idx:06}")).expect("location id");
            let location = Location::new(location_id, Some(slot_id), "bench")
                .at(52.0 + idx as f64 * 0.0001, 5.0)
                .with_radius(40.0);
            Op::AddLocation { location }
        })
        .collect()
}

fn move_location_ops(locations: &[LocationId], count: usize) -> Vec<Op> {
    (0..count)
        .map(|idx| Op::UpdateLocation {
            location_id: locations[idx % locations.len()].clone(),
            patch: LocationPatch {
                lat: Some(Some(50.0 + idx as f64 * 0.001)),
                ..LocationPatch::default()
            },
        })
        .collect()
}

fn benches_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("ops.apply");

    let doc = fixtures::route(fixtures::Case::Medium);
    let slots = doc.slots.iter().map(|slot| slot.id.clone()).collect::<Vec<_>>();
    let locations = doc
        .locations
        .iter()
        .map(|loc| loc.id.clone())
        .collect::<Vec<_>>();
    let template = RouteSession::new(doc);

    let batches = [
        ("add_single", add_location_ops(&slots, 1)),
        ("add_batch_10", add_location_ops(&slots, 10)),
        ("add_batch_200", add_location_ops(&slots, 200)),
        ("update_batch_200", move_location_ops(&locations, 200)),
    ];

    for (case_id, ops) in batches {
        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function(case_id, {
            let template = template.clone();
            move |b| {
                b.iter_batched(
                    || template.clone(),
                    |mut session| {
                        let base_rev = session.rev();
                        let result = apply_ops(&mut session, base_rev, black_box(&ops))
                            .expect("apply_ops");
                        black_box(checksum_apply_result(&result))
                    },
                    BatchSize::SmallInput,
                )
            }
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_ops
}
criterion_main!(benches);
