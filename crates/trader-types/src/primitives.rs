//! # Primitive Identifiers
//!
//! Fixed-size opaque identifiers used as storage keys.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;

/// A 33-byte compressed secp256k1 public key.
///
/// Treated as an opaque identity; no curve arithmetic happens in this crate.
pub type PublicKey = [u8; 33];

/// A 32-byte order preimage. The order nonce is its SHA-256 digest.
pub type Preimage = [u8; 32];

/// Length of a batch identifier in bytes.
pub const BATCH_ID_LEN: usize = 33;

/// Number of satoshis in one supply unit.
pub const BASE_SUPPLY_UNIT: u64 = 100_000;

/// Unique, fixed-size identifier of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Nonce(pub [u8; 32]);

impl Nonce {
    /// Raw bytes of the nonce.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Nonce {
    fn from(bytes: [u8; 32]) -> Self {
        Nonce(bytes)
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Identifier of a clearing batch.
///
/// The auctioneer uses its per-batch public key as the batch id, which is why
/// this is 33 bytes wide.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchId(#[serde_as(as = "Bytes")] pub [u8; BATCH_ID_LEN]);

impl BatchId {
    /// Build a batch id from a prefix, zero-padding the remainder.
    ///
    /// Bytes beyond `BATCH_ID_LEN` are ignored.
    pub fn from_prefix(prefix: &[u8]) -> Self {
        let mut id = [0u8; BATCH_ID_LEN];
        let len = prefix.len().min(BATCH_ID_LEN);
        id[..len].copy_from_slice(&prefix[..len]);
        BatchId(id)
    }

    /// Raw bytes of the batch id.
    pub fn as_bytes(&self) -> &[u8; BATCH_ID_LEN] {
        &self.0
    }
}

impl Default for BatchId {
    fn default() -> Self {
        BatchId([0u8; BATCH_ID_LEN])
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Quantity measure used for order fulfilment tracking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SupplyUnit(pub u64);

impl SupplyUnit {
    /// Number of whole supply units contained in `sats`, rounded down.
    pub fn from_sats(sats: u64) -> Self {
        SupplyUnit(sats / BASE_SUPPLY_UNIT)
    }

    /// Number of supply units needed to cover `sats`, rounded up.
    pub fn from_sats_ceil(sats: u64) -> Self {
        SupplyUnit(sats.div_ceil(BASE_SUPPLY_UNIT))
    }

    /// Value of these units in satoshis, saturating on overflow.
    pub fn to_sats(self) -> u64 {
        self.0.saturating_mul(BASE_SUPPLY_UNIT)
    }
}

impl From<u64> for SupplyUnit {
    fn from(units: u64) -> Self {
        SupplyUnit(units)
    }
}

impl fmt::Display for SupplyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} units", self.0)
    }
}

/// Reference to a transaction output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OutPoint {
    /// Transaction id.
    pub txid: [u8; 32],
    /// Output index within the transaction.
    pub index: u32,
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(self.txid), self.index)
    }
}
