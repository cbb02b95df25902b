//! # Database Process Locking
//!
//! Prevents multiple processes from opening the same data directory.
//!
//! ## Modules
//!
//! - `flock`: `DatabaseLock` using fs2
//! - `security`: Lock path validation and holder diagnostics

mod flock;
mod security;
#[cfg(test)]
mod tests;

pub use flock::{DatabaseLock, LockError};
