//! Record access shared by the entity and batch operations.

use super::*;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::BatchOperation;
use serde::de::DeserializeOwned;
use serde::Serialize;
use trader_types::{Account, Nonce, Order, PublicKey};

impl<KV, C> TraderDb<KV, C>
where
    KV: KeyValueStore,
    C: RecordCodec,
{
    /// Read and decode the record at `key`.
    pub(crate) fn read_record<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, DbError> {
        match self.kv_store.get(key)? {
            Some(bytes) => self
                .codec
                .decode(&bytes)
                .map(Some)
                .map_err(|e| DbError::codec(key, e)),
            None => Ok(None),
        }
    }

    /// Decode every record under a prefix, in key order.
    pub(crate) fn read_all<T: DeserializeOwned>(&self, prefix: KeyPrefix) -> Result<Vec<T>, DbError> {
        self.kv_store
            .prefix_scan(prefix.as_bytes())?
            .into_iter()
            .map(|(key, bytes)| self.codec.decode(&bytes).map_err(|e| DbError::codec(&key, e)))
            .collect()
    }

    /// Encode `record` into a put operation for `key`.
    pub(crate) fn put_op<T: Serialize>(&self, key: Vec<u8>, record: &T) -> Result<BatchOperation, DbError> {
        let value = self
            .codec
            .encode(record)
            .map_err(|e| DbError::codec(&key, e))?;
        Ok(BatchOperation::put(key, value))
    }

    /// Apply `operations` as one atomic write.
    pub(crate) fn write(&mut self, operations: Vec<BatchOperation>) -> Result<(), DbError> {
        let count = operations.len();
        self.kv_store.atomic_batch_write(operations).map_err(|e: KVStoreError| {
            tracing::error!(operations = count, error = %e, "[trader-db] Atomic write failed");
            DbError::from(e)
        })
    }

    pub(crate) fn load_order(&self, nonce: &Nonce) -> Result<Order, DbError> {
        self.read_record(&KeyPrefix::order_key(nonce))?
            .ok_or(DbError::OrderNotFound { nonce: *nonce })
    }

    pub(crate) fn load_account(&self, trader_key: &PublicKey) -> Result<Account, DbError> {
        self.read_record(&KeyPrefix::account_key(trader_key))?
            .ok_or(DbError::AccountNotFound {
                trader_key: *trader_key,
            })
    }
}
