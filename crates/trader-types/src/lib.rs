//! # Trader Types
//!
//! Business objects of the auction trader client.
//!
//! ## Clusters
//!
//! - **Identifiers**: `Nonce`, `BatchId`, `PublicKey`, `OutPoint`
//! - **Accounts**: `Account`, `AccountState`, `KeyDescriptor`
//! - **Orders**: `Order` (`Ask` / `Bid` over a shared `Kit`), `OrderState`
//! - **Modifiers**: `OrderModifier`, `AccountModifier`
//!
//! Modifiers are a closed set of serialisable effects. They are stored as part
//! of a pending batch and applied to a working copy of an entity when the
//! batch is committed, so their application order is preserved on disk.

pub mod account;
pub mod modifier;
pub mod order;
pub mod primitives;

pub use account::{Account, AccountState, KeyDescriptor};
pub use modifier::{apply_account_modifiers, apply_order_modifiers, AccountModifier, OrderModifier};
pub use order::{Ask, Bid, Kit, Order, OrderState, OrderType};
pub use primitives::*;
