//! # Order and Account Lifecycle
//!
//! Several auction batches in a row against one database: a partial fill,
//! an abandoned staging that gets replaced, and a final execution that
//! also moves the account.

#[cfg(test)]
mod tests {
    use crate::trader::open_seeded;
    use trader_db::test_utils::test_batch_id;
    use trader_db::{BatchStagingApi, DbConfig, DbError, EntityStoreApi};
    use trader_telemetry::{BATCHES_COMMITTED, BATCHES_STAGED, BATCH_COMMIT_FAILURES};
    use trader_types::{
        AccountModifier, AccountState, BatchId, OrderModifier, OrderState, OutPoint, SupplyUnit,
    };

    fn batch(n: u8) -> BatchId {
        BatchId::from_prefix(&[0xBA, n])
    }

    #[test]
    fn test_three_batches() {
        let (mut db, ask, bid, account) = open_seeded(&DbConfig::in_memory());
        let key = account.trader_key.pub_key;
        let (ask_nonce, bid_nonce) = (ask.kit.nonce, bid.kit.nonce);

        // Batch 1: ask partially filled.
        db.store_pending_batch(
            batch(1),
            &[ask_nonce],
            &[vec![
                OrderModifier::State(OrderState::PartiallyFilled),
                OrderModifier::UnitsUnfulfilled(SupplyUnit(4)),
            ]],
            &[key],
            &[vec![
                AccountModifier::State(AccountState::PendingUpdate),
                AccountModifier::Value(account.value - 10_000),
            ]],
        )
        .unwrap();
        db.mark_batch_complete(batch(1)).unwrap();

        // Batch 2 staged, then the auctioneer retries with a different batch.
        db.store_pending_batch(
            batch(2),
            &[bid_nonce],
            &[vec![OrderModifier::State(OrderState::Failed)]],
            &[],
            &[],
        )
        .unwrap();
        db.store_pending_batch(
            batch(3),
            &[ask_nonce, bid_nonce],
            &[
                vec![
                    OrderModifier::State(OrderState::Executed),
                    OrderModifier::UnitsUnfulfilled(SupplyUnit(0)),
                ],
                vec![OrderModifier::State(OrderState::Executed)],
            ],
            &[key],
            &[vec![
                AccountModifier::State(AccountState::Open),
                AccountModifier::OutPoint(OutPoint {
                    txid: [0x5E; 32],
                    index: 0,
                }),
            ]],
        )
        .unwrap();

        assert!(matches!(
            db.mark_batch_complete(batch(2)),
            Err(DbError::BatchIdMismatch { .. })
        ));
        db.mark_batch_complete(batch(3)).unwrap();

        let ask = db.get_order(&ask_nonce).unwrap();
        assert_eq!(ask.kit().state, OrderState::Executed);
        assert_eq!(ask.kit().units_unfulfilled, SupplyUnit(0));

        let bid = db.get_order(&bid_nonce).unwrap();
        assert_eq!(bid.kit().state, OrderState::Executed);
        assert_eq!(bid.kit().units_unfulfilled, bid.kit().units);

        let account = db.account(&key).unwrap();
        assert_eq!(account.state, AccountState::Open);
        assert_eq!(account.value, trader_db::test_utils::ONE_BTC - 10_000);
        assert_eq!(account.outpoint.map(|o| o.txid), Some([0x5E; 32]));

        assert!(matches!(db.pending_batch_id(), Err(DbError::NoPendingBatch)));
    }

    #[test]
    fn test_staged_content_is_inspectable() {
        let (mut db, ask, _, _) = open_seeded(&DbConfig::in_memory());
        let modifiers = vec![
            OrderModifier::State(OrderState::PartiallyFilled),
            OrderModifier::State(OrderState::Executed),
        ];

        db.store_pending_batch(
            test_batch_id(),
            &[ask.kit.nonce],
            std::slice::from_ref(&modifiers),
            &[],
            &[],
        )
        .unwrap();

        let pending = db.pending_batch().unwrap();
        assert_eq!(pending.id, test_batch_id());
        assert_eq!(pending.orders.len(), 1);
        assert_eq!(pending.orders[0].modifiers, modifiers);
        assert!(pending.accounts.is_empty());
    }

    #[test]
    fn test_metrics_follow_operations() {
        let (mut db, _, _, _) = open_seeded(&DbConfig::in_memory());
        let staged = BATCHES_STAGED.get();
        let committed = BATCHES_COMMITTED.get();
        let mismatches = BATCH_COMMIT_FAILURES
            .with_label_values(&["id_mismatch"])
            .get();

        db.store_pending_batch(batch(7), &[], &[], &[], &[]).unwrap();
        let _ = db.mark_batch_complete(batch(8));
        db.mark_batch_complete(batch(7)).unwrap();

        // Counters are process-wide; other tests only ever add.
        assert!(BATCHES_STAGED.get() >= staged + 1.0);
        assert!(BATCHES_COMMITTED.get() >= committed + 1.0);
        assert!(
            BATCH_COMMIT_FAILURES
                .with_label_values(&["id_mismatch"])
                .get()
                >= mismatches + 1.0
        );
    }
}
