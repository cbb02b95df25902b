//! # Orders
//!
//! Asks offer liquidity for at most `max_duration` blocks, bids request it for
//! at least `min_duration` blocks. Both share the fields in `Kit`.

use crate::primitives::{Nonce, Preimage, PublicKey, SupplyUnit};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha2::{Digest, Sha256};
use std::fmt;

/// Current order format version.
pub const ORDER_VERSION: u32 = 0;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderState {
    /// Accepted by the auctioneer and waiting to be matched.
    Submitted,
    /// Matched in a batch that is not yet final.
    Cleared,
    /// Some units were executed, the rest remain on the book.
    PartiallyFilled,
    /// Fully executed.
    Executed,
    /// Canceled by the trader.
    Canceled,
    /// Lifetime elapsed before it was fully executed.
    Expired,
    /// Rejected or failed during execution.
    Failed,
}

impl OrderState {
    /// Whether the order can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderState::Executed | OrderState::Canceled | OrderState::Expired | OrderState::Failed
        )
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderState::Submitted => "submitted",
            OrderState::Cleared => "cleared",
            OrderState::PartiallyFilled => "partial_fill",
            OrderState::Executed => "executed",
            OrderState::Canceled => "canceled",
            OrderState::Expired => "expired",
            OrderState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Ask,
    Bid,
}

/// Fields shared by asks and bids.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kit {
    /// SHA-256 of `preimage`; the order identity.
    pub nonce: Nonce,
    /// Secret committed to by the nonce.
    pub preimage: Preimage,
    /// Order format version.
    pub version: u32,
    /// Lifecycle state.
    pub state: OrderState,
    /// Per-block interest rate in parts per billion.
    pub fixed_rate: u32,
    /// Order size in satoshis.
    pub amount: u64,
    /// Order size in supply units.
    pub units: SupplyUnit,
    /// Units not executed yet.
    pub units_unfulfilled: SupplyUnit,
    /// Fee rate for the funding transaction, sat/kw.
    pub funding_fee_rate: u64,
    /// Trader key of the account funding this order.
    #[serde_as(as = "Bytes")]
    pub account_key: PublicKey,
}

impl Kit {
    /// Create a kit for a new order of `amount` satoshis.
    ///
    /// The nonce is derived from the preimage and all units start out
    /// unfulfilled.
    pub fn new(preimage: Preimage, amount: u64, account_key: PublicKey) -> Self {
        let units = SupplyUnit::from_sats(amount);
        Self {
            nonce: Self::nonce_for(&preimage),
            preimage,
            version: ORDER_VERSION,
            state: OrderState::Submitted,
            fixed_rate: 0,
            amount,
            units,
            units_unfulfilled: units,
            funding_fee_rate: 0,
            account_key,
        }
    }

    /// Nonce committing to `preimage`.
    pub fn nonce_for(preimage: &Preimage) -> Nonce {
        Nonce(Sha256::digest(preimage).into())
    }
}

/// An offer to lease out liquidity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ask {
    pub kit: Kit,
    /// Longest lease, in blocks, the asker accepts.
    pub max_duration: u32,
}

/// A request to lease liquidity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub kit: Kit,
    /// Shortest lease, in blocks, the bidder accepts.
    pub min_duration: u32,
}

/// An order of either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Ask(Ask),
    Bid(Bid),
}

impl Order {
    /// Shared order fields.
    pub fn kit(&self) -> &Kit {
        match self {
            Order::Ask(ask) => &ask.kit,
            Order::Bid(bid) => &bid.kit,
        }
    }

    /// Mutable access to the shared order fields.
    pub fn kit_mut(&mut self) -> &mut Kit {
        match self {
            Order::Ask(ask) => &mut ask.kit,
            Order::Bid(bid) => &mut bid.kit,
        }
    }

    pub fn nonce(&self) -> Nonce {
        self.kit().nonce
    }

    pub fn order_type(&self) -> OrderType {
        match self {
            Order::Ask(_) => OrderType::Ask,
            Order::Bid(_) => OrderType::Bid,
        }
    }
}

impl From<Ask> for Order {
    fn from(ask: Ask) -> Self {
        Order::Ask(ask)
    }
}

impl From<Bid> for Order {
    fn from(bid: Bid) -> Self {
        Order::Bid(bid)
    }
}
