//! # Trader Client Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── trader/              # Cross-crate flows against real backends
//!     ├── lifecycle.rs     # Order/account life through several batches
//!     ├── restart.rs       # Durability across process restarts
//!     └── opening.rs       # Config-driven opening and locking
//!
//! tests/benches/
//! └── batch_benchmarks.rs  # Stage/commit throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p trader-tests
//!
//! # Including the RocksDB backend
//! cargo test -p trader-tests --features rocksdb
//!
//! # Benchmarks
//! cargo bench -p trader-tests
//! ```

pub mod trader;
