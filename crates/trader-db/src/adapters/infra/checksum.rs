use crate::ports::outbound::ChecksumProvider;

/// Checksum provider using crc32fast.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultChecksumProvider;

impl ChecksumProvider for DefaultChecksumProvider {
    fn compute_crc32(&self, data: &[u8]) -> u32 {
        crc32fast::hash(data)
    }
}
