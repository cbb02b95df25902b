//! Bincode record codec.
//!
//! Frame layout: `[crc32(payload): u32 LE][bincode payload]`.

use crate::adapters::infra::DefaultChecksumProvider;
use crate::domain::errors::CodecError;
use crate::ports::outbound::{ChecksumProvider, RecordCodec};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Size of the checksum header.
pub const CHECKSUM_LEN: usize = 4;

/// Record codec using bincode, with a CRC32 over the payload.
#[derive(Debug, Clone, Default)]
pub struct BincodeRecordCodec<CS = DefaultChecksumProvider> {
    checksum: CS,
}

impl<CS: ChecksumProvider> RecordCodec for BincodeRecordCodec<CS> {
    fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>, CodecError> {
        let payload =
            bincode::serialize(record).map_err(|e| CodecError::Serialization(e.to_string()))?;

        let mut framed = Vec::with_capacity(CHECKSUM_LEN + payload.len());
        framed.extend_from_slice(&self.checksum.compute_crc32(&payload).to_le_bytes());
        framed.extend_from_slice(&payload);
        Ok(framed)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CodecError> {
        if data.len() < CHECKSUM_LEN {
            return Err(CodecError::Truncated { len: data.len() });
        }
        let (header, payload) = data.split_at(CHECKSUM_LEN);
        let mut checksum = [0u8; CHECKSUM_LEN];
        checksum.copy_from_slice(header);
        let expected = u32::from_le_bytes(checksum);

        let actual = self.checksum.compute_crc32(payload);
        if actual != expected {
            return Err(CodecError::ChecksumMismatch { expected, actual });
        }

        bincode::deserialize(payload).map_err(|e| CodecError::Serialization(e.to_string()))
    }
}
