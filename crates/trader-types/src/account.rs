//! # Accounts
//!
//! A trader account locks collateral on chain that orders are funded from.
//! Accounts are keyed by the trader's public key and are never deleted; they
//! only transition into `Closed`.

use crate::primitives::{OutPoint, PublicKey};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;

/// Lifecycle state of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountState {
    /// Keys negotiated with the auctioneer, funding not yet broadcast.
    Initiated,
    /// Funding transaction broadcast, waiting for confirmation.
    PendingOpen,
    /// A modification (deposit, batch settlement) is waiting to confirm.
    PendingUpdate,
    /// Confirmed and usable for orders.
    Open,
    /// Expiry height reached.
    Expired,
    /// Closing transaction broadcast.
    PendingClosed,
    /// Closed for good.
    Closed,
}

impl AccountState {
    /// Whether orders may still be funded from an account in this state.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            AccountState::Open | AccountState::PendingUpdate | AccountState::PendingOpen
        )
    }
}

impl fmt::Display for AccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountState::Initiated => "initiated",
            AccountState::PendingOpen => "pending_open",
            AccountState::PendingUpdate => "pending_update",
            AccountState::Open => "open",
            AccountState::Expired => "expired",
            AccountState::PendingClosed => "pending_closed",
            AccountState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Locator of a key in the trader's wallet plus the derived public key.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// Key family in the wallet's derivation scheme.
    pub family: u32,
    /// Index within the family.
    pub index: u32,
    /// The derived public key.
    #[serde_as(as = "Bytes")]
    pub pub_key: PublicKey,
}

/// A trader account.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Value locked in the account, in satoshis.
    pub value: u64,
    /// Block height at which the account expires.
    pub expiry: u32,
    /// The trader's key. Its public key is the account identity.
    pub trader_key: KeyDescriptor,
    /// The auctioneer's key for the account's 2-of-2 script.
    #[serde_as(as = "Bytes")]
    pub auctioneer_key: PublicKey,
    /// Per-batch key, tweaked each time the account takes part in a batch.
    #[serde_as(as = "Bytes")]
    pub batch_key: PublicKey,
    /// Shared secret between trader and auctioneer.
    pub secret: [u8; 32],
    /// Lifecycle state.
    pub state: AccountState,
    /// Earliest height at which the funding output may confirm.
    pub height_hint: u32,
    /// Current on-chain output of the account, once known.
    pub outpoint: Option<OutPoint>,
}

impl Account {
    /// The identity under which the account is stored.
    pub fn trader_pub_key(&self) -> &PublicKey {
        &self.trader_key.pub_key
    }
}
