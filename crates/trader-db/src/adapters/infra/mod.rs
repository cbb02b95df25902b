//! Infrastructure Adapters
//!
//! Implementations of infrastructure traits.

mod checksum;

pub use checksum::DefaultChecksumProvider;
