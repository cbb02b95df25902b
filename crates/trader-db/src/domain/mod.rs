//! # Domain Layer
//!
//! Pure domain logic for the trader database.
//!
//! ## Modules
//!
//! - `errors` - Error types for every layer
//! - `keys` - Key namespaces of the persisted layout
//! - `config` - Database configuration
//! - `pending` - The staged batch record

pub mod config;
pub mod errors;
pub mod keys;
pub mod pending;
