//! # Durability Across Restarts
//!
//! A staged batch is persistent: a client that crashes between staging and
//! commit finds it again on the next start and can finish the protocol.

#[cfg(test)]
mod tests {
    use crate::trader::open_seeded;
    use tempfile::TempDir;
    use trader_db::test_utils::test_batch_id;
    use trader_db::{
        Backend, BatchStagingApi, DbConfig, DbError, DynTraderDb, EntityStoreApi,
    };
    use trader_types::{AccountModifier, AccountState, OrderModifier, OrderState, SupplyUnit};

    fn file_config(dir: &TempDir) -> DbConfig {
        DbConfig::new(dir.path()).with_backend(Backend::File)
    }

    fn staged_batch_survives_restart(config: DbConfig) {
        let (mut db, ask, _, account) = open_seeded(&config);
        let key = account.trader_key.pub_key;

        db.store_pending_batch(
            test_batch_id(),
            &[ask.kit.nonce],
            &[vec![
                OrderModifier::State(OrderState::Executed),
                OrderModifier::UnitsUnfulfilled(SupplyUnit(0)),
            ]],
            &[key],
            &[vec![AccountModifier::State(AccountState::PendingUpdate)]],
        )
        .unwrap();
        drop(db);

        // Restart: the batch is still staged and nothing was applied.
        let mut db = DynTraderDb::open(&config).unwrap();
        assert_eq!(db.pending_batch_id().unwrap(), test_batch_id());
        assert_eq!(db.get_order(&ask.kit.nonce).unwrap().kit().state, OrderState::Submitted);

        db.mark_batch_complete(test_batch_id()).unwrap();
        drop(db);

        // Restart: the commit is durable.
        let db = DynTraderDb::open(&config).unwrap();
        assert!(matches!(db.pending_batch_id(), Err(DbError::NoPendingBatch)));
        let order = db.get_order(&ask.kit.nonce).unwrap();
        assert_eq!(order.kit().state, OrderState::Executed);
        assert_eq!(order.kit().units_unfulfilled, SupplyUnit(0));
        assert_eq!(db.account(&key).unwrap().state, AccountState::PendingUpdate);
    }

    #[test]
    fn test_file_backend_survives_restart() {
        let dir = TempDir::new().unwrap();
        staged_batch_survives_restart(file_config(&dir));
    }

    #[cfg(feature = "rocksdb")]
    #[test]
    fn test_rocksdb_backend_survives_restart() {
        let dir = TempDir::new().unwrap();
        staged_batch_survives_restart(
            DbConfig::new(dir.path())
                .with_backend(Backend::RocksDb)
                .with_sync_writes(false),
        );
    }

    #[test]
    fn test_memory_backend_forgets() {
        let config = DbConfig::in_memory();
        let (mut db, _, _, _) = open_seeded(&config);
        db.store_pending_batch(test_batch_id(), &[], &[], &[], &[])
            .unwrap();
        drop(db);

        let db = DynTraderDb::open(&config).unwrap();
        assert!(matches!(db.pending_batch_id(), Err(DbError::NoPendingBatch)));
        assert!(db.get_orders().unwrap().is_empty());
    }

    #[test]
    fn test_overwrite_survives_restart() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir);
        let (mut db, ask, bid, _) = open_seeded(&config);

        db.store_pending_batch(
            test_batch_id(),
            &[ask.kit.nonce, bid.kit.nonce],
            &[
                vec![OrderModifier::State(OrderState::Canceled)],
                vec![OrderModifier::State(OrderState::Canceled)],
            ],
            &[],
            &[],
        )
        .unwrap();
        db.store_pending_batch(
            test_batch_id(),
            &[bid.kit.nonce],
            &[vec![OrderModifier::State(OrderState::Expired)]],
            &[],
            &[],
        )
        .unwrap();
        drop(db);

        let mut db = DynTraderDb::open(&config).unwrap();
        let pending = db.pending_batch().unwrap();
        assert_eq!(pending.orders.len(), 1);
        assert_eq!(pending.orders[0].nonce, bid.kit.nonce);

        db.mark_batch_complete(test_batch_id()).unwrap();
        assert_eq!(db.get_order(&ask.kit.nonce).unwrap().kit().state, OrderState::Submitted);
        assert_eq!(db.get_order(&bid.kit.nonce).unwrap().kit().state, OrderState::Expired);
    }
}
