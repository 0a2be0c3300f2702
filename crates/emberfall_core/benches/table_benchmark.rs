//! # Keyed Collection Benchmark
//!
//! Dense vs sparse table access, flag table access, and allocator churn.
//!
//! Run with: `cargo bench --package emberfall_core`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use std::sync::OnceLock;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use emberfall_core::{CyclingSlots, FlagTable, KeyedTable, OrdinalKey};

emberfall_core::ordinal_key! {
    enum StatKind {
        Health = 0,
        Mana = 1,
        Attack = 2,
        Defense = 3,
        Magic = 4,
        Ranged = 5,
        Speed = 6,
        Luck = 7,
        Crafting = 8,
        Fishing = 9,
        Mining = 10,
        Smithing = 11,
        Cooking = 12,
        Agility = 13,
        Thieving = 14,
        Slayer = 15,
    }
}

/// Wide-and-thin key space that lands in the sparse variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ItemFamily(i32);

impl OrdinalKey for ItemFamily {
    fn all_values() -> &'static [Self] {
        static VALUES: OnceLock<Vec<ItemFamily>> = OnceLock::new();
        VALUES.get_or_init(|| (0..100).map(|step| ItemFamily(step * 50)).collect())
    }

    fn to_ordinal(self) -> i32 {
        self.0
    }

    fn from_ordinal(ordinal: i32) -> Option<Self> {
        ((0..5000).contains(&ordinal) && ordinal % 50 == 0).then_some(ItemFamily(ordinal))
    }
}

/// Benchmark: dense table get/set over every defined key.
fn bench_dense_table_access(c: &mut Criterion) {
    let mut table: KeyedTable<StatKind, u32> = KeyedTable::new();

    c.bench_function("dense_table_set_get_16", |b| {
        b.iter(|| {
            for &kind in StatKind::all_values() {
                table.set(kind, black_box(99)).unwrap();
            }
            let mut total = 0u32;
            for &kind in StatKind::all_values() {
                total += *table.get(black_box(kind)).unwrap();
            }
            total
        });
    });
}

/// Benchmark: sparse table get/set over every defined key.
fn bench_sparse_table_access(c: &mut Criterion) {
    let mut table: KeyedTable<ItemFamily, u32> = KeyedTable::new();

    c.bench_function("sparse_table_set_get_100", |b| {
        b.iter(|| {
            for &family in ItemFamily::all_values() {
                table.set(family, black_box(7)).unwrap();
            }
            let mut total = 0u32;
            for &family in ItemFamily::all_values() {
                total += *table.get(black_box(family)).unwrap();
            }
            total
        });
    });
}

/// Benchmark: dense iteration with a validity mask in play.
fn bench_table_iteration(c: &mut Criterion) {
    let stats: KeyedTable<StatKind, u32> = KeyedTable::new();
    let families: KeyedTable<ItemFamily, u32> = KeyedTable::new();

    c.bench_function("dense_table_iterate", |b| {
        b.iter(|| stats.iter().map(|(_, v)| u64::from(*v)).sum::<u64>());
    });

    c.bench_function("sparse_table_iterate", |b| {
        b.iter(|| families.iter().map(|(_, v)| u64::from(*v)).sum::<u64>());
    });
}

/// Benchmark: flag table set/count.
fn bench_flag_table(c: &mut Criterion) {
    let mut flags: FlagTable<StatKind> = FlagTable::new();

    c.bench_function("flag_table_set_all_count", |b| {
        b.iter(|| {
            flags.set_all(black_box(true));
            let count = flags.count_set();
            flags.clear();
            count
        });
    });
}

/// Benchmark: allocator fill, free one, refill - the session churn pattern.
fn bench_allocator_churn(c: &mut Criterion) {
    c.bench_function("cycling_slots_churn_256", |b| {
        b.iter(|| {
            let mut slots: CyclingSlots<u8, u32> = CyclingSlots::new();
            for n in 0..255u32 {
                slots.add(black_box(n)).unwrap();
            }
            let key = 100u8;
            let _ = slots.remove(key);
            slots.add(black_box(500)).unwrap();
            slots.len()
        });
    });
}

criterion_group!(
    benches,
    bench_dense_table_access,
    bench_sparse_table_access,
    bench_table_iteration,
    bench_flag_table,
    bench_allocator_churn,
);
criterion_main!(benches);
