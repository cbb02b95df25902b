//! Storage Adapters
//!
//! Implementations of the `KeyValueStore` trait.

mod file;
mod flaky;
mod memory;
#[cfg(feature = "rocksdb")]
mod rocks;

pub use file::FileBackedKVStore;
pub use flaky::{FlakyKVStore, WriteFailureSwitch};
pub use memory::InMemoryKVStore;
#[cfg(feature = "rocksdb")]
pub use rocks::{RocksDbConfig, RocksDbStore};

use crate::ports::outbound::BatchOperation;
use std::collections::BTreeMap;

/// Apply a batch to an ordered map.
pub(crate) fn apply_operations(data: &mut BTreeMap<Vec<u8>, Vec<u8>>, operations: Vec<BatchOperation>) {
    for op in operations {
        match op {
            BatchOperation::Put { key, value } => {
                data.insert(key, value);
            }
            BatchOperation::Delete { key } => {
                data.remove(&key);
            }
        }
    }
}

/// Pairs whose key starts with `prefix`, in key order.
pub(crate) fn scan_prefix(data: &BTreeMap<Vec<u8>, Vec<u8>>, prefix: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
    data.range(prefix.to_vec()..)
        .take_while(|(k, _)| k.starts_with(prefix))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
