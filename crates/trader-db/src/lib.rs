//! # Trader Client Database
//!
//! Durable storage of the trader's accounts and orders, plus the
//! batch-staging protocol used when the auctioneer clears a batch.
//!
//! ## Batch Lifecycle
//!
//! ```text
//!             store_pending_batch            mark_batch_complete(id)
//!   [Empty] ───────────────────────→ [Staged] ─────────────────────────→ [Empty]
//!                                      │  ↑         (all entity writes +
//!                                      └──┘          slot removal land in
//!                          store_pending_batch       one atomic write)
//!                          (full replacement)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Single Slot | At most one pending batch exists; staging replaces it in full |
//! | 2 | Validate First | Length and existence checks run before any write |
//! | 3 | Atomic Commit | Entity updates and slot removal are one write or none |
//! | 4 | Mismatch Safety | Committing the wrong id leaves the staged batch intact |
//! | 5 | Data Integrity | Record checksums are verified on every read |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Errors, key layout, configuration, the `PendingBatch` record
//! - `ports/` - Inbound API traits and the outbound key-value / codec ports
//! - `adapters/` - KV stores (memory, file, RocksDB), codec, process lock
//! - `service/` - `TraderDb`, implementing the inbound API
//!
//! ## Usage
//!
//! ```ignore
//! use trader_db::{BatchStagingApi, EntityStoreApi, TraderDb};
//!
//! let mut db = TraderDb::new_in_memory()?;
//! db.add_account(&account)?;
//! db.submit_order(&order)?;
//!
//! db.store_pending_batch(batch_id, &nonces, &order_mods, &keys, &account_mods)?;
//! db.mark_batch_complete(batch_id)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::{
    BincodeRecordCodec, DatabaseLock, DefaultChecksumProvider, FileBackedKVStore, FlakyKVStore,
    InMemoryKVStore, LockError, WriteFailureSwitch,
};
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
pub use domain::config::{Backend, ConfigError, DbConfig};
pub use domain::errors::{CodecError, DbError, EntityKind, KVStoreError};
pub use domain::keys::KeyPrefix;
pub use domain::pending::{PendingBatch, StagedAccount, StagedOrder};
pub use ports::inbound::{BatchStagingApi, EntityStoreApi};
pub use ports::outbound::{BatchOperation, ChecksumProvider, KeyValueStore, RecordCodec};
pub use service::{DynTraderDb, TraderDb, STORAGE_VERSION};
