//! Per-asset metadata and the size/length padding invariant.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use varc_types::AssetKey;

use crate::record::IndexRecord;

/// Allocation granularity of the data file.
pub const BLOCK_SIZE: u32 = 1024;

/// Largest payload size whose padded length still fits the record's u32
/// length field.
pub const MAX_PAYLOAD_SIZE: u32 = u32::MAX - (BLOCK_SIZE - 1);

/// Metadata for one stored asset.
///
/// `length` is the allocated span in the data file and always satisfies
/// `length % BLOCK_SIZE == 0 && length >= size`. Both constructors
/// establish the invariant once; entries never mutate afterwards. Payload
/// resolution goes through [`Store::read_entry`](crate::Store::read_entry)
/// — an entry is plain metadata with no handle on its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Byte offset of the payload in the data file.
    pub offset: u32,
    /// Exact payload length in bytes.
    pub size: u32,
    /// Allocated (padded) length in the data file.
    pub length: u32,
    /// 128-bit asset identifier.
    pub key: AssetKey,
    /// Access time associated with the asset.
    pub atime: SystemTime,
    /// Asset type code.
    pub file_type: u16,
}

impl Entry {
    /// Creation path: a fresh asset about to be appended.
    pub fn from_create(
        offset: u32,
        size: u32,
        key: AssetKey,
        file_type: u16,
        atime: SystemTime,
    ) -> Self {
        Self {
            offset,
            size,
            length: padded_length(size),
            key,
            atime,
            file_type,
        }
    }

    /// Load path: decoded from an index record.
    ///
    /// The recorded length is kept where valid and corrected where it
    /// violates the invariant.
    pub fn from_load(record: IndexRecord) -> Self {
        Self {
            offset: record.offset,
            size: record.size,
            length: corrected_length(record.size, record.length),
            key: record.key,
            atime: UNIX_EPOCH + Duration::from_secs(u64::from(record.atime)),
            file_type: record.file_type,
        }
    }

    /// Encode back to the on-disk record form. Access time drops to whole
    /// seconds, everything else is preserved exactly.
    pub fn to_record(&self) -> IndexRecord {
        IndexRecord {
            offset: self.offset,
            length: self.length,
            atime: unix_seconds(self.atime),
            key: self.key,
            file_type: self.file_type,
            size: self.size,
        }
    }

    /// Access time as whole seconds since the epoch.
    pub fn atime_secs(&self) -> u32 {
        unix_seconds(self.atime)
    }
}

/// Smallest multiple of [`BLOCK_SIZE`] that holds `size` bytes.
///
/// Sizes beyond [`MAX_PAYLOAD_SIZE`] cannot be padded within u32; the
/// result clamps to the largest representable multiple, and
/// [`Store::add`](crate::Store::add) rejects such payloads before any
/// entry exists.
pub fn padded_length(size: u32) -> u32 {
    let block = u64::from(BLOCK_SIZE);
    let padded = u64::from(size).div_ceil(block) * block;
    padded.min(u64::from(MAX_PAYLOAD_SIZE)) as u32
}

/// Correct a loaded length against the invariant: non-multiples round to
/// the nearest block multiple, and anything below `size` grows to the
/// smallest multiple that holds `size`.
fn corrected_length(size: u32, length: u32) -> u32 {
    let block = u64::from(BLOCK_SIZE);
    let mut len = u64::from(length);
    if len % block != 0 {
        len = (len + block / 2) / block * block;
    }
    if len < u64::from(size) {
        return padded_length(size);
    }
    len.min(u64::from(MAX_PAYLOAD_SIZE)) as u32
}

pub(crate) fn unix_seconds(time: SystemTime) -> u32 {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as u32
}
