//! # Key Layout
//!
//! Every record lives under a short ASCII namespace prefix followed by its
//! raw identifier bytes. The pending batch and the storage version are
//! singletons with fixed keys.

use trader_types::{Nonce, PublicKey};

/// Fixed suffix of the pending batch slot.
const PENDING_BATCH_SUFFIX: &[u8] = b"pending-batch";

/// Fixed suffix of the storage version record.
const VERSION_SUFFIX: &[u8] = b"version";

/// Key prefixes for the different record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Accounts, keyed by trader public key.
    Account,
    /// Orders, keyed by nonce.
    Order,
    /// The pending batch slot.
    PendingBatch,
    /// Database metadata.
    Metadata,
}

impl KeyPrefix {
    /// Get the prefix bytes.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Account => b"a:",
            KeyPrefix::Order => b"o:",
            KeyPrefix::PendingBatch => b"p:",
            KeyPrefix::Metadata => b"m:",
        }
    }

    /// Create a key by appending a suffix to this prefix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let prefix = self.as_bytes();
        let mut key = Vec::with_capacity(prefix.len() + suffix.len());
        key.extend_from_slice(prefix);
        key.extend_from_slice(suffix);
        key
    }

    pub fn account_key(trader_key: &PublicKey) -> Vec<u8> {
        KeyPrefix::Account.key(trader_key)
    }

    pub fn order_key(nonce: &Nonce) -> Vec<u8> {
        KeyPrefix::Order.key(nonce.as_bytes())
    }

    pub fn pending_batch_key() -> Vec<u8> {
        KeyPrefix::PendingBatch.key(PENDING_BATCH_SUFFIX)
    }

    pub fn version_key() -> Vec<u8> {
        KeyPrefix::Metadata.key(VERSION_SUFFIX)
    }
}

/// Render a key for logs and errors: the prefix as text, the rest as hex.
pub fn describe_key(key: &[u8]) -> String {
    match key.iter().position(|&b| b == b':') {
        Some(idx) if idx < 4 => {
            let (prefix, rest) = key.split_at(idx + 1);
            format!("{}{}", String::from_utf8_lossy(prefix), hex::encode(rest))
        }
        _ => hex::encode(key),
    }
}
