//! # Fractional Storage Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | Insert/extract through a slot | < 1μs |
//! | Chain population on first bind | < 10μs |
//! | Container write + read | < 50μs |
//! | Bincode snapshot + restore | < 10μs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fractional_storage::{
    FractionalGroup, ItemDescriptor, PoolConfig, StorageSlot, StorageSlotMut,
};
use fractional_tests::{create_iron_group, iron};
use serde_json::Map;
use std::time::Duration;

fn stocked_iron_group() -> FractionalGroup<ItemDescriptor> {
    let mut group = create_iron_group(32);
    let mut slot = group
        .slot_mut(2)
        .unwrap()
        .set_stored_descriptor(Some(iron("nugget")));
    slot.adjust_stored_count(10_000);
    group
}

fn bench_accounting(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool-accounting");
    group.measurement_time(Duration::from_secs(5));

    for slot in 0..3 {
        let mut pool = stocked_iron_group();
        // Extraction takes pool units, so undo an insert of 3 with 3 * rate.
        let rate = i64::from(pool.slot(slot).unwrap().conversion_rate());
        group.bench_with_input(BenchmarkId::new("insert_extract", slot), &slot, |b, &slot| {
            b.iter(|| {
                let mut view = pool.slot_mut(slot).unwrap();
                black_box(view.adjust_stored_count(black_box(3)));
                black_box(view.adjust_stored_count(black_box(-3 * rate)));
            })
        });
    }

    let pool = stocked_iron_group();
    group.bench_function("read_all_counts", |b| {
        b.iter(|| {
            for view in pool.slots() {
                black_box(view.stored_count());
                black_box(view.remaining_capacity());
            }
        })
    });

    group.finish();
}

fn bench_population(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool-population");

    group.bench_function("bind_chain_member", |b| {
        b.iter(|| {
            let mut pool = create_iron_group(32);
            let slot = pool
                .slot_mut(0)
                .unwrap()
                .set_stored_descriptor(Some(black_box(iron("ingot"))));
            black_box(slot.slot_index());
        })
    });

    group.bench_function("bind_unknown_resource", |b| {
        b.iter(|| {
            let mut pool = FractionalGroup::new(PoolConfig::default()).unwrap();
            let slot = pool
                .slot_mut(0)
                .unwrap()
                .set_stored_descriptor(Some(black_box(ItemDescriptor::new("cobblestone"))));
            black_box(slot.conversion_rate());
        })
    });

    group.finish();
}

fn bench_persistence(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool-persistence");
    let source = stocked_iron_group();

    group.throughput(Throughput::Elements(1));
    group.bench_function("container_roundtrip", |b| {
        let mut target = create_iron_group(32);
        b.iter(|| {
            let mut container = Map::new();
            source.write_to(&mut container).unwrap();
            target.read_from(black_box(&container)).unwrap();
        })
    });

    group.bench_function("bincode_roundtrip", |b| {
        let mut target = create_iron_group(32);
        b.iter(|| {
            let bytes = source.to_bytes().unwrap();
            target.load_bytes(black_box(&bytes)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_accounting, bench_population, bench_persistence);
criterion_main!(benches);
