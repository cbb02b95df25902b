//! # Inbound Ports (Driving Ports)
//!
//! The public API of the trader database. Reads take `&self`; every
//! mutation takes `&mut self` and lands as a single atomic store write, so
//! exclusive access is what serialises writers.

use crate::domain::errors::DbError;
use crate::domain::pending::PendingBatch;
use trader_types::{Account, AccountModifier, BatchId, Nonce, Order, OrderModifier, PublicKey};

/// Persistent records of the trader's own accounts and orders.
pub trait EntityStoreApi {
    /// Fetch an order by nonce.
    ///
    /// # Errors
    /// - `OrderNotFound`: no order with this nonce
    /// - `DataCorruption`: the stored record fails its checksum
    fn get_order(&self, nonce: &Nonce) -> Result<Order, DbError>;

    /// All stored orders, in key order.
    fn get_orders(&self) -> Result<Vec<Order>, DbError>;

    /// Persist a newly submitted order.
    ///
    /// # Errors
    /// - `OrderExists`: an order with the same nonce is already stored
    fn submit_order(&mut self, order: &Order) -> Result<(), DbError>;

    /// Apply modifiers to a stored order, outside of any batch.
    fn update_order(&mut self, nonce: &Nonce, modifiers: &[OrderModifier]) -> Result<(), DbError>;

    /// Fetch an account by its trader key.
    ///
    /// # Errors
    /// - `AccountNotFound`: no account with this key
    fn account(&self, trader_key: &PublicKey) -> Result<Account, DbError>;

    /// All stored accounts, in key order.
    fn accounts(&self) -> Result<Vec<Account>, DbError>;

    /// Persist a new account.
    ///
    /// # Errors
    /// - `AccountExists`: an account with the same trader key is already stored
    fn add_account(&mut self, account: &Account) -> Result<(), DbError>;

    /// Apply modifiers to a stored account, outside of any batch.
    fn update_account(
        &mut self,
        trader_key: &PublicKey,
        modifiers: &[AccountModifier],
    ) -> Result<(), DbError>;
}

/// Two-phase persistence of a batch's effects.
///
/// ## Protocol
///
/// 1. `store_pending_batch` validates and stages the effects, replacing any
///    previous staged batch. No entity record is touched.
/// 2. `mark_batch_complete` applies the staged effects to the current entity
///    records and clears the slot, all in one atomic write.
pub trait BatchStagingApi {
    /// Stage the effects of `batch_id`.
    ///
    /// `order_modifiers[i]` applies to `order_nonces[i]` and
    /// `account_modifiers[i]` to `accounts[i]`.
    ///
    /// # Errors
    /// - `LengthMismatch`: lists not aligned (orders checked first)
    /// - `OrderNotFound` / `AccountNotFound`: a listed entity is not stored
    /// - `Storage`: the write failed; the previous slot content is kept
    fn store_pending_batch(
        &mut self,
        batch_id: BatchId,
        order_nonces: &[Nonce],
        order_modifiers: &[Vec<OrderModifier>],
        accounts: &[PublicKey],
        account_modifiers: &[Vec<AccountModifier>],
    ) -> Result<(), DbError>;

    /// Id of the staged batch.
    ///
    /// # Errors
    /// - `NoPendingBatch`: the slot is empty
    fn pending_batch_id(&self) -> Result<BatchId, DbError>;

    /// Full content of the staged batch.
    fn pending_batch(&self) -> Result<PendingBatch, DbError>;

    /// Commit the staged batch if its id equals `batch_id`.
    ///
    /// # Errors
    /// - `NoPendingBatch`: nothing staged
    /// - `BatchIdMismatch`: a different batch is staged; nothing changes
    /// - `OrderNotFound` / `AccountNotFound`: a staged entity disappeared
    /// - `Storage`: the write failed; nothing changes and retrying is safe
    fn mark_batch_complete(&mut self, batch_id: BatchId) -> Result<(), DbError>;
}
