use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Handle for toggling write failures on a `FlakyKVStore` it came from.
///
/// Clones share state, so a test can keep one while the store is owned
/// by a database.
#[derive(Debug, Clone, Default)]
pub struct WriteFailureSwitch {
    failing: Arc<AtomicBool>,
    rejected: Arc<AtomicUsize>,
}

impl WriteFailureSwitch {
    /// Make every following write fail until `heal` is called.
    pub fn fail_writes(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn heal(&self) {
        self.failing.store(false, Ordering::SeqCst);
    }

    pub fn is_failing(&self) -> bool {
        self.failing.load(Ordering::SeqCst)
    }

    /// Number of writes rejected so far.
    pub fn rejected_writes(&self) -> usize {
        self.rejected.load(Ordering::SeqCst)
    }
}

/// Store wrapper that rejects writes on demand, leaving the inner store
/// untouched. Reads always pass through.
pub struct FlakyKVStore<S> {
    inner: S,
    switch: WriteFailureSwitch,
}

impl<S: KeyValueStore> FlakyKVStore<S> {
    pub fn new(inner: S) -> (Self, WriteFailureSwitch) {
        let switch = WriteFailureSwitch::default();
        (
            Self {
                inner,
                switch: switch.clone(),
            },
            switch,
        )
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn check(&self, op: &str) -> Result<(), KVStoreError> {
        if self.switch.is_failing() {
            self.switch.rejected.fetch_add(1, Ordering::SeqCst);
            return Err(KVStoreError::IOError {
                message: format!("injected failure on {op}"),
            });
        }
        Ok(())
    }
}

impl<S: KeyValueStore> KeyValueStore for FlakyKVStore<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.check("put")?;
        self.inner.put(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.check("delete")?;
        self.inner.delete(key)
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.check("batch write")?;
        self.inner.atomic_batch_write(operations)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        self.inner.exists(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        self.inner.prefix_scan(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKVStore;

    #[test]
    fn test_failing_writes_leave_inner_untouched() {
        let (mut store, switch) = FlakyKVStore::new(InMemoryKVStore::new());
        store.put(b"k", b"v1").unwrap();

        switch.fail_writes();
        assert!(store.put(b"k", b"v2").is_err());
        assert!(store.delete(b"k").is_err());
        assert!(store
            .atomic_batch_write(vec![BatchOperation::delete(b"k".to_vec())])
            .is_err());
        assert_eq!(switch.rejected_writes(), 3);

        assert_eq!(store.get(b"k").unwrap(), Some(b"v1".to_vec()));
    }

    #[test]
    fn test_heal_restores_writes() {
        let (mut store, switch) = FlakyKVStore::new(InMemoryKVStore::new());
        switch.fail_writes();
        assert!(store.put(b"k", b"v").is_err());

        switch.heal();
        store.put(b"k", b"v").unwrap();
        assert_eq!(store.into_inner().get(b"k").unwrap(), Some(b"v".to_vec()));
    }
}
