//! Fixtures shared by unit tests and the workspace test crate.

use crate::adapters::BincodeRecordCodec;
use crate::domain::errors::DbError;
use crate::ports::inbound::EntityStoreApi;
use crate::ports::outbound::KeyValueStore;
use crate::service::TraderDb;
use trader_types::{Account, AccountState, Ask, BatchId, Bid, KeyDescriptor, Kit, OrderState, PublicKey};

/// Satoshis in one bitcoin.
pub const ONE_BTC: u64 = 100_000_000;

/// Order size used by the fixture orders.
pub const TEST_ORDER_AMOUNT: u64 = 900_000;

pub fn test_batch_id() -> BatchId {
    BatchId::from_prefix(&[0x01, 0x02, 0x03])
}

pub fn test_trader_key() -> PublicKey {
    let mut key = [0x11; 33];
    key[0] = 0x02;
    key
}

/// Same key with the last byte bumped; never stored by the fixtures.
pub fn increment_key(key: &PublicKey) -> PublicKey {
    let mut next = *key;
    next[32] = next[32].wrapping_add(1);
    next
}

pub fn test_account() -> Account {
    let mut auctioneer_key = [0x22; 33];
    auctioneer_key[0] = 0x03;
    let mut batch_key = [0x33; 33];
    batch_key[0] = 0x02;

    Account {
        value: ONE_BTC,
        expiry: 1337,
        trader_key: KeyDescriptor {
            family: 220,
            index: 0,
            pub_key: test_trader_key(),
        },
        auctioneer_key,
        batch_key,
        secret: [0x44; 32],
        state: AccountState::Open,
        height_hint: 1,
        outpoint: None,
    }
}

fn test_kit(seed: u8) -> Kit {
    let mut kit = Kit::new([seed; 32], TEST_ORDER_AMOUNT, test_trader_key());
    kit.state = OrderState::Submitted;
    kit.fixed_rate = 10_000;
    kit.funding_fee_rate = 253;
    kit
}

pub fn test_ask() -> Ask {
    Ask {
        kit: test_kit(0xA5),
        max_duration: 1337,
    }
}

pub fn test_bid() -> Bid {
    Bid {
        kit: test_kit(0xB6),
        min_duration: 1337,
    }
}

/// A database holding one account and two orders funded by it.
pub struct Fixture<KV: KeyValueStore> {
    pub db: TraderDb<KV, BincodeRecordCodec>,
    pub ask: Ask,
    pub bid: Bid,
    pub account: Account,
}

impl<KV: KeyValueStore> Fixture<KV> {
    pub fn new(store: KV) -> Result<Self, DbError> {
        let mut db = TraderDb::new(store, BincodeRecordCodec::default())?;
        let ask = test_ask();
        let bid = test_bid();
        let account = test_account();

        db.add_account(&account)?;
        db.submit_order(&ask.clone().into())?;
        db.submit_order(&bid.clone().into())?;

        Ok(Self {
            db,
            ask,
            bid,
            account,
        })
    }
}
