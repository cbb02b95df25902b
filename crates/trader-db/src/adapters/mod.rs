//! # Adapters Module
//!
//! Implementations of the outbound ports plus process-level locking.
//!
//! ## Modules
//!
//! - `storage`: `KeyValueStore` implementations (memory, file, RocksDB, fault injection)
//! - `serializer`: bincode record codec with checksum framing
//! - `infra`: checksum provider
//! - `lock`: Database process locking (singleton guard)

pub mod infra;
pub mod lock;
pub mod serializer;
pub mod storage;

pub use infra::DefaultChecksumProvider;
pub use lock::{DatabaseLock, LockError};
pub use serializer::BincodeRecordCodec;
pub use storage::{FileBackedKVStore, FlakyKVStore, InMemoryKVStore, WriteFailureSwitch};
#[cfg(feature = "rocksdb")]
pub use storage::{RocksDbConfig, RocksDbStore};
