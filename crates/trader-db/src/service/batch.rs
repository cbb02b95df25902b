//! Staging and committing batch effects.

use super::*;
use crate::domain::pending::PendingBatch;
use crate::ports::inbound::BatchStagingApi;
use crate::ports::outbound::BatchOperation;
use std::collections::btree_map::{BTreeMap, Entry};
use trader_telemetry::{
    metric_inc, time_histogram, BATCHES_COMMITTED, BATCHES_STAGED, BATCH_COMMIT_DURATION,
    BATCH_COMMIT_FAILURES, STAGED_ENTITIES,
};
use trader_types::{
    apply_account_modifiers, apply_order_modifiers, Account, AccountModifier, BatchId, Nonce,
    Order, OrderModifier, PublicKey,
};

impl<KV, C> TraderDb<KV, C>
where
    KV: KeyValueStore,
    C: RecordCodec,
{
    fn load_pending_batch(&self) -> Result<Option<PendingBatch>, DbError> {
        self.read_record(&KeyPrefix::pending_batch_key())
    }

    /// Every listed entity must be stored already.
    fn check_staged_entities(&self, batch: &PendingBatch) -> Result<(), DbError> {
        for staged in &batch.orders {
            if !self.kv_store.exists(&KeyPrefix::order_key(&staged.nonce))? {
                return Err(DbError::OrderNotFound {
                    nonce: staged.nonce,
                });
            }
        }
        for staged in &batch.accounts {
            if !self.kv_store.exists(&KeyPrefix::account_key(&staged.trader_key))? {
                return Err(DbError::AccountNotFound {
                    trader_key: staged.trader_key,
                });
            }
        }
        Ok(())
    }

    /// Build the commit write: updated entities plus removal of the slot.
    ///
    /// Each entity is read once, at its current stored state, and then
    /// receives all of its staged modifier sequences in staging order.
    fn commit_operations(&self, batch: &PendingBatch) -> Result<Vec<BatchOperation>, DbError> {
        let mut orders: BTreeMap<Nonce, Order> = BTreeMap::new();
        for staged in &batch.orders {
            let order = match orders.entry(staged.nonce) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(self.load_order(&staged.nonce)?),
            };
            apply_order_modifiers(order, &staged.modifiers);
        }

        let mut accounts: BTreeMap<PublicKey, Account> = BTreeMap::new();
        for staged in &batch.accounts {
            let account = match accounts.entry(staged.trader_key) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(self.load_account(&staged.trader_key)?),
            };
            apply_account_modifiers(account, &staged.modifiers);
        }

        let mut operations = Vec::with_capacity(orders.len() + accounts.len() + 1);
        for (nonce, order) in &orders {
            operations.push(self.put_op(KeyPrefix::order_key(nonce), order)?);
        }
        for (trader_key, account) in &accounts {
            operations.push(self.put_op(KeyPrefix::account_key(trader_key), account)?);
        }
        operations.push(BatchOperation::delete(KeyPrefix::pending_batch_key()));
        Ok(operations)
    }
}

fn failure_reason(err: &DbError) -> &'static str {
    match err {
        DbError::NoPendingBatch => "no_pending",
        DbError::BatchIdMismatch { .. } => "id_mismatch",
        DbError::OrderNotFound { .. } | DbError::AccountNotFound { .. } => "not_found",
        _ => "storage",
    }
}

impl<KV, C> BatchStagingApi for TraderDb<KV, C>
where
    KV: KeyValueStore,
    C: RecordCodec,
{
    fn store_pending_batch(
        &mut self,
        batch_id: BatchId,
        order_nonces: &[Nonce],
        order_modifiers: &[Vec<OrderModifier>],
        accounts: &[PublicKey],
        account_modifiers: &[Vec<AccountModifier>],
    ) -> Result<(), DbError> {
        let batch = PendingBatch::new(
            batch_id,
            order_nonces,
            order_modifiers,
            accounts,
            account_modifiers,
        )?;
        self.check_staged_entities(&batch)?;

        let op = self.put_op(KeyPrefix::pending_batch_key(), &batch)?;
        self.write(vec![op])?;

        metric_inc!(BATCHES_STAGED);
        STAGED_ENTITIES.set(batch.entry_count() as f64);
        tracing::info!(
            batch_id = %batch_id,
            orders = batch.orders.len(),
            accounts = batch.accounts.len(),
            "[trader-db] Pending batch staged"
        );
        Ok(())
    }

    fn pending_batch_id(&self) -> Result<BatchId, DbError> {
        self.pending_batch().map(|batch| batch.id)
    }

    fn pending_batch(&self) -> Result<PendingBatch, DbError> {
        self.load_pending_batch()?.ok_or(DbError::NoPendingBatch)
    }

    fn mark_batch_complete(&mut self, batch_id: BatchId) -> Result<(), DbError> {
        let _timer = time_histogram!(BATCH_COMMIT_DURATION);

        let result = self.pending_batch().and_then(|batch| {
            if batch.id != batch_id {
                return Err(DbError::BatchIdMismatch {
                    pending: batch.id,
                    given: batch_id,
                });
            }
            let operations = self.commit_operations(&batch)?;
            self.write(operations)?;
            Ok(batch)
        });

        match result {
            Ok(batch) => {
                metric_inc!(BATCHES_COMMITTED);
                STAGED_ENTITIES.set(0.0);
                tracing::info!(
                    batch_id = %batch_id,
                    orders = batch.orders.len(),
                    accounts = batch.accounts.len(),
                    "[trader-db] Batch committed"
                );
                Ok(())
            }
            Err(err) => {
                metric_inc!(BATCH_COMMIT_FAILURES, &[failure_reason(&err)]);
                tracing::warn!(batch_id = %batch_id, error = %err, "[trader-db] Batch commit refused");
                Err(err)
            }
        }
    }
}
