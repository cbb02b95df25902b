//! # Trader Database Benchmarks
//!
//! | Operation | Backend | Sizes |
//! |-----------|---------|-------|
//! | stage + commit | memory | 1, 10, 100, 500 orders |
//! | stage + commit | file (no fsync) | 10, 100 orders |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::time::Duration;
use tempfile::TempDir;
use trader_db::test_utils::{test_account, test_batch_id};
use trader_db::{
    BatchStagingApi, BincodeRecordCodec, EntityStoreApi, FileBackedKVStore, InMemoryKVStore,
    KeyValueStore, TraderDb,
};
use trader_types::{Ask, Kit, Nonce, OrderModifier, OrderState, SupplyUnit};

/// Database holding one account and `count` random asks.
fn seeded<KV: KeyValueStore>(store: KV, count: usize) -> (TraderDb<KV, BincodeRecordCodec>, Vec<Nonce>) {
    let mut rng = rand::thread_rng();
    let mut db = TraderDb::new(store, BincodeRecordCodec::default()).expect("open");
    let account = test_account();
    db.add_account(&account).expect("account");

    let nonces = (0..count)
        .map(|_| {
            let ask = Ask {
                kit: Kit::new(rng.gen(), 1_000_000, account.trader_key.pub_key),
                max_duration: 2016,
            };
            let nonce = ask.kit.nonce;
            db.submit_order(&ask.into()).expect("order");
            nonce
        })
        .collect();
    (db, nonces)
}

fn stage_and_commit<KV: KeyValueStore>(
    db: &mut TraderDb<KV, BincodeRecordCodec>,
    nonces: &[Nonce],
    modifiers: &[Vec<OrderModifier>],
) {
    db.store_pending_batch(test_batch_id(), nonces, modifiers, &[], &[])
        .expect("stage");
    db.mark_batch_complete(black_box(test_batch_id()))
        .expect("commit");
}

fn fill_modifiers(count: usize) -> Vec<Vec<OrderModifier>> {
    (0..count)
        .map(|i| {
            vec![
                OrderModifier::State(OrderState::PartiallyFilled),
                OrderModifier::UnitsUnfulfilled(SupplyUnit(i as u64 % 10)),
            ]
        })
        .collect()
}

fn bench_memory_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("trader-db-memory");

    for size in [1usize, 10, 100, 500] {
        let (mut db, nonces) = seeded(InMemoryKVStore::new(), size);
        let modifiers = fill_modifiers(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("stage_commit", size), &size, |b, _| {
            b.iter(|| stage_and_commit(&mut db, &nonces, &modifiers))
        });
    }
    group.finish();
}

fn bench_file_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("trader-db-file");
    group.measurement_time(Duration::from_secs(10));

    for size in [10usize, 100] {
        let dir = TempDir::new().expect("tempdir");
        let store = FileBackedKVStore::open(dir.path().join("trader.db"))
            .expect("store")
            .with_sync(false);
        let (mut db, nonces) = seeded(store, size);
        let modifiers = fill_modifiers(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("stage_commit", size), &size, |b, _| {
            b.iter(|| stage_and_commit(&mut db, &nonces, &modifiers))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_memory_commit, bench_file_commit);
criterion_main!(benches);
