//! Opening a database from configuration.

use super::*;
use crate::adapters::FileBackedKVStore;
use crate::domain::config::{Backend, DbConfig};
use crate::domain::errors::KVStoreError;

impl DynTraderDb {
    /// Open the database described by `config`.
    ///
    /// Persistent backends first take the data directory lock, waiting up
    /// to `config.lock_timeout` for another process to release it.
    pub fn open(config: &DbConfig) -> Result<Self, DbError> {
        let (store, lock): (Box<dyn KeyValueStore>, Option<DatabaseLock>) = match config.backend {
            Backend::Memory => (Box::new(InMemoryKVStore::new()) as Box<dyn KeyValueStore>, None),
            Backend::File => {
                let lock = Self::lock_data_dir(config)?;
                let store = FileBackedKVStore::open(config.store_file())?
                    .with_sync(config.sync_writes);
                (Box::new(store) as Box<dyn KeyValueStore>, Some(lock))
            }
            Backend::RocksDb => {
                let lock = Self::lock_data_dir(config)?;
                (Self::open_rocksdb(config)?, Some(lock))
            }
        };

        let db: Self = TraderDb::new(store, BincodeRecordCodec::default())?;
        tracing::info!(
            backend = ?config.backend,
            data_dir = %config.data_dir.display(),
            sync_writes = config.sync_writes,
            "[trader-db] Database opened"
        );

        Ok(match lock {
            Some(lock) => db.with_lock(lock),
            None => db,
        })
    }

    fn lock_data_dir(config: &DbConfig) -> Result<DatabaseLock, DbError> {
        std::fs::create_dir_all(&config.data_dir).map_err(|e| KVStoreError::IOError {
            message: format!("create {}: {e}", config.data_dir.display()),
        })?;
        Ok(DatabaseLock::acquire(&config.data_dir, config.lock_timeout)?)
    }

    #[cfg(feature = "rocksdb")]
    fn open_rocksdb(config: &DbConfig) -> Result<Box<dyn KeyValueStore>, DbError> {
        use crate::adapters::{RocksDbConfig, RocksDbStore};

        let rocks_config =
            RocksDbConfig::new(config.rocksdb_dir()).with_sync_writes(config.sync_writes);
        Ok(Box::new(RocksDbStore::open(rocks_config)?))
    }

    #[cfg(not(feature = "rocksdb"))]
    fn open_rocksdb(_config: &DbConfig) -> Result<Box<dyn KeyValueStore>, DbError> {
        Err(crate::domain::config::ConfigError::BackendUnavailable("rocksdb").into())
    }
}
