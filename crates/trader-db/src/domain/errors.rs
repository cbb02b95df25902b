//! # Domain Errors
//!
//! Every failure is reported synchronously to the caller and carries enough
//! context (the offending identifier, or both ids of a mismatch) to act on.
//! Nothing is retried internally.

use crate::adapters::LockError;
use crate::domain::config::ConfigError;
use std::fmt;
use thiserror::Error;
use trader_types::{BatchId, Nonce, PublicKey};

/// Which kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Order,
    Account,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Order => f.write_str("order"),
            EntityKind::Account => f.write_str("account"),
        }
    }
}

/// Errors returned by the trader database.
#[derive(Debug, Error)]
pub enum DbError {
    /// Identifier and modifier lists are not positionally aligned.
    #[error("{kind} modifier length mismatch: {identifiers} identifiers, {modifiers} modifier sequences")]
    LengthMismatch {
        kind: EntityKind,
        identifiers: usize,
        modifiers: usize,
    },

    #[error("no order found with nonce {nonce}")]
    OrderNotFound { nonce: Nonce },

    #[error("account not found for trader key {}", hex::encode(.trader_key))]
    AccountNotFound { trader_key: PublicKey },

    #[error("order with nonce {nonce} already exists")]
    OrderExists { nonce: Nonce },

    #[error("account for trader key {} already exists", hex::encode(.trader_key))]
    AccountExists { trader_key: PublicKey },

    #[error("no pending batch")]
    NoPendingBatch,

    #[error("batch id mismatch: pending batch is {pending}, got {given}")]
    BatchIdMismatch { pending: BatchId, given: BatchId },

    /// The underlying store failed. No partial effect; safe to retry.
    #[error("storage failure: {0}")]
    Storage(#[from] KVStoreError),

    #[error("serialization error at key {key}: {message}")]
    Serialization { key: String, message: String },

    /// Record checksum did not match its payload.
    #[error("data corruption at key {key}: expected checksum {expected:#010x}, got {actual:#010x}")]
    DataCorruption {
        key: String,
        expected: u32,
        actual: u32,
    },

    #[error("unsupported storage version {found}, expected {expected}")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("database locked: {0}")]
    Locked(#[from] LockError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DbError {
    /// Attach the key a codec failure happened at.
    pub fn codec(key: &[u8], err: CodecError) -> Self {
        let key = crate::domain::keys::describe_key(key);
        match err {
            CodecError::ChecksumMismatch { expected, actual } => DbError::DataCorruption {
                key,
                expected,
                actual,
            },
            other => DbError::Serialization {
                key,
                message: other.to_string(),
            },
        }
    }

    /// Whether the same call may succeed when repeated unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DbError::Storage(_) | DbError::Locked(_))
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store itself.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

/// Record encoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{0}")]
    Serialization(String),

    #[error("record truncated: {len} bytes")]
    Truncated { len: usize },

    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}
