//! # Pending Batch
//!
//! The staged-but-uncommitted effect of one auction batch on the trader's
//! orders and accounts. Order and account entries keep the order they were
//! staged in; an identifier listed more than once has its modifier
//! sequences applied one after the other at commit.

use crate::domain::errors::{DbError, EntityKind};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use trader_types::{AccountModifier, BatchId, Nonce, OrderModifier, PublicKey};

/// Modifiers staged for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedOrder {
    pub nonce: Nonce,
    pub modifiers: Vec<OrderModifier>,
}

/// Modifiers staged for one account.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedAccount {
    #[serde_as(as = "Bytes")]
    pub trader_key: PublicKey,
    pub modifiers: Vec<AccountModifier>,
}

/// The single pending batch slot's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBatch {
    pub id: BatchId,
    pub orders: Vec<StagedOrder>,
    pub accounts: Vec<StagedAccount>,
}

impl PendingBatch {
    /// Pair identifiers with their modifier sequences.
    ///
    /// Fails with `LengthMismatch` when the lists are not aligned. Order
    /// lists are checked before account lists.
    pub fn new(
        id: BatchId,
        order_nonces: &[Nonce],
        order_modifiers: &[Vec<OrderModifier>],
        accounts: &[PublicKey],
        account_modifiers: &[Vec<AccountModifier>],
    ) -> Result<Self, DbError> {
        if order_nonces.len() != order_modifiers.len() {
            return Err(DbError::LengthMismatch {
                kind: EntityKind::Order,
                identifiers: order_nonces.len(),
                modifiers: order_modifiers.len(),
            });
        }
        if accounts.len() != account_modifiers.len() {
            return Err(DbError::LengthMismatch {
                kind: EntityKind::Account,
                identifiers: accounts.len(),
                modifiers: account_modifiers.len(),
            });
        }

        let orders = order_nonces
            .iter()
            .zip(order_modifiers)
            .map(|(nonce, modifiers)| StagedOrder {
                nonce: *nonce,
                modifiers: modifiers.clone(),
            })
            .collect();
        let accounts = accounts
            .iter()
            .zip(account_modifiers)
            .map(|(trader_key, modifiers)| StagedAccount {
                trader_key: *trader_key,
                modifiers: modifiers.clone(),
            })
            .collect();

        Ok(Self {
            id,
            orders,
            accounts,
        })
    }

    /// Number of staged entries (duplicates counted).
    pub fn entry_count(&self) -> usize {
        self.orders.len() + self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty() && self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trader_types::{AccountState, OrderState, SupplyUnit};

    #[test]
    fn test_pairs_in_order() {
        let n1 = Nonce([1; 32]);
        let n2 = Nonce([2; 32]);
        let batch = PendingBatch::new(
            BatchId::from_prefix(&[9]),
            &[n1, n2],
            &[
                vec![OrderModifier::State(OrderState::Executed)],
                vec![OrderModifier::UnitsUnfulfilled(SupplyUnit(0))],
            ],
            &[[3; 33]],
            &[vec![AccountModifier::State(AccountState::PendingUpdate)]],
        )
        .unwrap();

        assert_eq!(batch.orders[0].nonce, n1);
        assert_eq!(batch.orders[1].nonce, n2);
        assert_eq!(batch.accounts[0].trader_key, [3; 33]);
        assert_eq!(batch.entry_count(), 3);
    }

    #[test]
    fn test_order_mismatch_checked_first() {
        let err = PendingBatch::new(BatchId::default(), &[Nonce([1; 32])], &[], &[[3; 33]], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::LengthMismatch {
                kind: EntityKind::Order,
                identifiers: 1,
                modifiers: 0
            }
        ));
    }

    #[test]
    fn test_account_mismatch() {
        let err = PendingBatch::new(BatchId::default(), &[], &[], &[], &[vec![]]).unwrap_err();
        assert!(matches!(
            err,
            DbError::LengthMismatch {
                kind: EntityKind::Account,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_batch_is_valid() {
        let batch = PendingBatch::new(BatchId::default(), &[], &[], &[], &[]).unwrap();
        assert!(batch.is_empty());
    }
}
