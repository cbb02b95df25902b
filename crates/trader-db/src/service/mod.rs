//! # Trader Database Service
//!
//! The main service implementing the trader database API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `EntityStoreApi` for account and order records
//! 2. Implements `BatchStagingApi` for the stage/commit protocol
//! 3. Maps every mutation onto exactly one atomic store write
//! 4. Uses dependency injection for the store and the record codec

mod batch;
mod entities;
mod helpers;
mod open;

use crate::adapters::{BincodeRecordCodec, DatabaseLock, InMemoryKVStore};
use crate::domain::errors::DbError;
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::{KeyValueStore, RecordCodec};

/// Version of the on-disk layout written by this crate.
pub const STORAGE_VERSION: u16 = 1;

/// Database opened from a `DbConfig`, with the backend chosen at runtime.
pub type DynTraderDb = TraderDb<Box<dyn KeyValueStore>, BincodeRecordCodec>;

/// The trader database.
///
/// Holds no cached state: every read goes to the store, so what callers
/// see is exactly what a restart would see.
pub struct TraderDb<KV, C>
where
    KV: KeyValueStore,
    C: RecordCodec,
{
    /// Key-value store for persistence.
    pub(crate) kv_store: KV,
    /// Record encoding with integrity check.
    pub(crate) codec: C,
    /// Process lock on the data directory, if the backend has one.
    pub(crate) lock: Option<DatabaseLock>,
}

impl<KV, C> TraderDb<KV, C>
where
    KV: KeyValueStore,
    C: RecordCodec,
{
    /// Create the service over an open store.
    ///
    /// A fresh store is stamped with `STORAGE_VERSION`; an existing one must
    /// carry the same version.
    pub fn new(kv_store: KV, codec: C) -> Result<Self, DbError> {
        let mut db = Self {
            kv_store,
            codec,
            lock: None,
        };
        db.ensure_version()?;
        Ok(db)
    }

    pub(crate) fn with_lock(mut self, lock: DatabaseLock) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Whether this instance holds the data directory lock.
    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// Release the service and return the underlying store.
    pub fn into_store(self) -> KV {
        self.kv_store
    }

    fn ensure_version(&mut self) -> Result<(), DbError> {
        let key = KeyPrefix::version_key();
        match self.kv_store.get(&key)? {
            None => {
                self.kv_store.put(&key, &STORAGE_VERSION.to_be_bytes())?;
                tracing::info!(version = STORAGE_VERSION, "[trader-db] Initialized new store");
                Ok(())
            }
            Some(raw) => {
                let found = <[u8; 2]>::try_from(raw.as_slice())
                    .map(u16::from_be_bytes)
                    .map_err(|_| DbError::Serialization {
                        key: crate::domain::keys::describe_key(&key),
                        message: format!("version record of {} bytes", raw.len()),
                    })?;
                if found != STORAGE_VERSION {
                    return Err(DbError::UnsupportedVersion {
                        found,
                        expected: STORAGE_VERSION,
                    });
                }
                Ok(())
            }
        }
    }
}

impl TraderDb<InMemoryKVStore, BincodeRecordCodec> {
    /// Volatile database for tests and dry runs.
    pub fn new_in_memory() -> Result<Self, DbError> {
        Self::new(InMemoryKVStore::new(), BincodeRecordCodec::default())
    }
}
