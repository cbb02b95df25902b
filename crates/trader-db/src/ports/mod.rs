//! # Ports Layer
//!
//! - `inbound` - The API the trader client drives
//! - `outbound` - What the database needs from its host (storage, codec)

pub mod inbound;
pub mod outbound;
