//! The fixed 34-byte index record codec.
//!
//! All structure of the container lives in the index file: a flat sequence
//! of packed little-endian records with no header, footer, or inter-field
//! padding. The layout must stay bit-exact with existing archives.

use varc_types::AssetKey;

use crate::error::{StoreError, StoreResult};

/// On-disk size of one index record.
pub const RECORD_SIZE: usize = 34;

/// One decoded index record.
///
/// | field       | type     | meaning                              |
/// |-------------|----------|--------------------------------------|
/// | `offset`    | u32      | data-file byte offset of the payload |
/// | `length`    | u32      | padded payload length                |
/// | `atime`     | u32      | access time, seconds since epoch     |
/// | `key`       | 16 bytes | raw 128-bit identifier               |
/// | `file_type` | u16      | asset type code                      |
/// | `size`      | u32      | exact payload length                 |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexRecord {
    pub offset: u32,
    pub length: u32,
    pub atime: u32,
    pub key: AssetKey,
    pub file_type: u16,
    pub size: u32,
}

impl IndexRecord {
    /// Encode to the packed on-disk form.
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        buf[0..4].copy_from_slice(&self.offset.to_le_bytes());
        buf[4..8].copy_from_slice(&self.length.to_le_bytes());
        buf[8..12].copy_from_slice(&self.atime.to_le_bytes());
        buf[12..28].copy_from_slice(self.key.as_bytes());
        buf[28..30].copy_from_slice(&self.file_type.to_le_bytes());
        buf[30..34].copy_from_slice(&self.size.to_le_bytes());
        buf
    }

    /// Decode one packed record.
    pub fn decode(buf: &[u8; RECORD_SIZE]) -> Self {
        let mut key = [0u8; 16];
        key.copy_from_slice(&buf[12..28]);
        Self {
            offset: u32::from_le_bytes(buf[0..4].try_into().unwrap()),
            length: u32::from_le_bytes(buf[4..8].try_into().unwrap()),
            atime: u32::from_le_bytes(buf[8..12].try_into().unwrap()),
            key: AssetKey::from_bytes(key),
            file_type: u16::from_le_bytes(buf[28..30].try_into().unwrap()),
            size: u32::from_le_bytes(buf[30..34].try_into().unwrap()),
        }
    }

    /// Decode a whole index file, in file order.
    pub fn decode_all(data: &[u8]) -> StoreResult<Vec<Self>> {
        if data.len() % RECORD_SIZE != 0 {
            return Err(StoreError::CorruptIndex {
                len: data.len() as u64,
            });
        }
        Ok(data
            .chunks_exact(RECORD_SIZE)
            .map(|chunk| Self::decode(chunk.try_into().unwrap()))
            .collect())
    }
}
