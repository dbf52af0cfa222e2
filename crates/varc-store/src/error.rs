use thiserror::Error;

/// Errors from container store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unrecognized open-mode token.
    #[error("invalid open mode {0:?}: expected r, w, or a")]
    InvalidMode(String),

    /// Index file length is not a whole number of records. A trailing
    /// partial record is corruption, never a silent truncation.
    #[error("corrupt index: {len} bytes is not a multiple of the 34-byte record size")]
    CorruptIndex { len: u64 },

    /// Data file ended before a payload's declared extent.
    #[error("short read at offset {offset}: data file ends before {want} bytes")]
    ShortRead { offset: u64, want: usize },

    /// Append on a store opened read-only.
    #[error("store is read-only")]
    ReadOnly,

    /// Payload or resulting offset would overflow the format's 32-bit
    /// bookkeeping fields.
    #[error("payload of {size} bytes does not fit the container format")]
    PayloadTooLarge { size: u64 },

    /// I/O error from the underlying files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
