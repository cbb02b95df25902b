//! # Opening From Configuration

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tempfile::TempDir;
    use trader_db::{Backend, DbConfig, DbError, DynTraderDb, EntityStoreApi};

    #[test]
    fn test_second_open_is_locked_out() {
        let dir = TempDir::new().unwrap();
        let config = DbConfig::new(dir.path()).with_lock_timeout(Duration::from_millis(50));

        let first = DynTraderDb::open(&config).unwrap();
        assert!(first.is_locked());

        match DynTraderDb::open(&config) {
            Err(DbError::Locked(_)) => {}
            Err(other) => panic!("expected Locked, got {other}"),
            Ok(_) => panic!("second open must fail while the first is alive"),
        }

        drop(first);
        let reopened = DynTraderDb::open(&config).unwrap();
        assert!(reopened.accounts().unwrap().is_empty());
    }

    #[test]
    fn test_open_from_environment_lookup() {
        let dir = TempDir::new().unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();
        let config = DbConfig::from_lookup(|var| match var {
            "TRADER_DB_DIR" => Some(dir_str.clone()),
            "TRADER_DB_SYNC" => Some("false".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.backend, Backend::File);
        let db = DynTraderDb::open(&config).unwrap();
        drop(db);
        assert!(config.store_file().exists());
    }

    #[test]
    fn test_memory_backend_needs_no_directory() {
        let db = DynTraderDb::open(&DbConfig::in_memory()).unwrap();
        assert!(!db.is_locked());
    }

    #[cfg(not(feature = "rocksdb"))]
    #[test]
    fn test_rocksdb_backend_requires_feature() {
        use trader_db::ConfigError;

        let dir = TempDir::new().unwrap();
        let config = DbConfig::new(dir.path()).with_backend(Backend::RocksDb);

        match DynTraderDb::open(&config) {
            Err(DbError::Config(ConfigError::BackendUnavailable("rocksdb"))) => {}
            Err(other) => panic!("expected BackendUnavailable, got {other}"),
            Ok(_) => panic!("rocksdb backend is not compiled in"),
        }
    }
}
