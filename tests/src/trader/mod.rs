//! # Trader Database Integration
//!
//! Flows that exercise `trader-db` through its public API only, on the
//! backends a deployment actually uses.

pub mod lifecycle;
pub mod opening;
pub mod restart;

use std::sync::Once;
use trader_db::{DbConfig, DynTraderDb};
use trader_telemetry::{init_logging, TelemetryConfig};
use trader_types::{Account, Ask, Bid};

static LOGGING: Once = Once::new();

/// Install the telemetry subscriber once per test binary.
///
/// `RUST_LOG` / `TRADER_LOG_LEVEL` select what is printed.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        // Another harness may already own the global subscriber.
        let _ = init_logging(&TelemetryConfig::from_env());
    });
}

/// Open `config` and seed it with the standard account and orders.
pub fn open_seeded(config: &DbConfig) -> (DynTraderDb, Ask, Bid, Account) {
    use trader_db::test_utils::{test_account, test_ask, test_bid};
    use trader_db::EntityStoreApi;

    init_test_logging();
    let mut db = DynTraderDb::open(config).expect("open database");
    let (ask, bid, account) = (test_ask(), test_bid(), test_account());
    db.add_account(&account).expect("add account");
    db.submit_order(&ask.clone().into()).expect("submit ask");
    db.submit_order(&bid.clone().into()).expect("submit bid");
    (db, ask, bid, account)
}
