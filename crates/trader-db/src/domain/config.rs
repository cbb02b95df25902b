//! # Database Configuration
//!
//! Settings for where and how the trader database is stored. Values come
//! from defaults, builder methods, or `TRADER_DB_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = "./data/trader-db";

/// Default time to wait for the process lock.
pub const DEFAULT_LOCK_TIMEOUT_SECS: u64 = 30;

/// File name of the file-backed store inside the data directory.
const STORE_FILE_NAME: &str = "trader.db";

/// Directory name of the RocksDB store inside the data directory.
const ROCKSDB_DIR_NAME: &str = "rocksdb";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown storage backend '{0}' (expected memory, file or rocksdb)")]
    UnknownBackend(String),

    #[error("invalid value '{value}' for {var}")]
    InvalidValue { var: &'static str, value: String },

    #[error("storage backend '{0}' is not compiled in")]
    BackendUnavailable(&'static str),
}

/// Which key-value store backs the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Volatile, for tests and dry runs.
    Memory,
    /// Single snapshot file, replaced atomically on every write.
    #[default]
    File,
    /// RocksDB (requires the `rocksdb` feature).
    RocksDb,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Backend::Memory),
            "file" => Ok(Backend::File),
            "rocksdb" | "rocks" => Ok(Backend::RocksDb),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Trader database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Directory holding the store and its lock file.
    pub data_dir: PathBuf,
    pub backend: Backend,
    /// Fsync every write before reporting success.
    pub sync_writes: bool,
    /// How long to wait for another process to release the lock.
    pub lock_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            backend: Backend::default(),
            sync_writes: true,
            lock_timeout: Duration::from_secs(DEFAULT_LOCK_TIMEOUT_SECS),
        }
    }
}

impl DbConfig {
    /// Create a config for a data directory with defaults elsewhere.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Volatile in-memory configuration.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory,
            ..Default::default()
        }
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_sync_writes(mut self, sync: bool) -> Self {
        self.sync_writes = sync;
        self
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Load configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TRADER_DB_DIR` | `./data/trader-db` |
    /// | `TRADER_DB_BACKEND` | `file` |
    /// | `TRADER_DB_SYNC` | `true` |
    /// | `TRADER_DB_LOCK_TIMEOUT_SECS` | `30` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("TRADER_DB_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup("TRADER_DB_BACKEND") {
            config.backend = backend.parse()?;
        }
        if let Some(sync) = lookup("TRADER_DB_SYNC") {
            config.sync_writes = parse_bool("TRADER_DB_SYNC", &sync)?;
        }
        if let Some(secs) = lookup("TRADER_DB_LOCK_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "TRADER_DB_LOCK_TIMEOUT_SECS",
                    value: secs.clone(),
                })?;
            config.lock_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Path of the file-backed store.
    pub fn store_file(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE_NAME)
    }

    /// Path of the RocksDB directory.
    pub fn rocksdb_dir(&self) -> PathBuf {
        self.data_dir.join(ROCKSDB_DIR_NAME)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}
