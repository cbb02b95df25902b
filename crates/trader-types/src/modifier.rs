//! # Modifier Engine
//!
//! Named, serialisable transformations of an entity's mutable fields.
//!
//! A modifier touches only the field it names and never fails. Applying the
//! same modifier twice yields the same field value, but modifiers touching the
//! same field do not commute, so sequences are applied strictly in order.

use crate::account::{Account, AccountState};
use crate::order::{Kit, Order, OrderState};
use crate::primitives::{OutPoint, SupplyUnit};
use serde::{Deserialize, Serialize};

/// Effect on an order's mutable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderModifier {
    /// Set the lifecycle state.
    State(OrderState),
    /// Set the number of units still to be executed.
    UnitsUnfulfilled(SupplyUnit),
}

impl OrderModifier {
    pub fn apply(&self, kit: &mut Kit) {
        match *self {
            OrderModifier::State(state) => kit.state = state,
            OrderModifier::UnitsUnfulfilled(units) => kit.units_unfulfilled = units,
        }
    }
}

/// Effect on an account's mutable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountModifier {
    /// Set the lifecycle state.
    State(AccountState),
    /// Set the locked value in satoshis.
    Value(u64),
    /// Set the expiry height.
    Expiry(u32),
    /// Set the confirmation height hint.
    HeightHint(u32),
    /// Set the account's current on-chain output.
    OutPoint(OutPoint),
}

impl AccountModifier {
    pub fn apply(&self, account: &mut Account) {
        match *self {
            AccountModifier::State(state) => account.state = state,
            AccountModifier::Value(value) => account.value = value,
            AccountModifier::Expiry(expiry) => account.expiry = expiry,
            AccountModifier::HeightHint(hint) => account.height_hint = hint,
            AccountModifier::OutPoint(outpoint) => account.outpoint = Some(outpoint),
        }
    }
}

/// Apply `modifiers` to `order` in sequence.
pub fn apply_order_modifiers(order: &mut Order, modifiers: &[OrderModifier]) {
    let kit = order.kit_mut();
    for modifier in modifiers {
        modifier.apply(kit);
    }
}

/// Apply `modifiers` to `account` in sequence.
pub fn apply_account_modifiers(account: &mut Account, modifiers: &[AccountModifier]) {
    for modifier in modifiers {
        modifier.apply(account);
    }
}
