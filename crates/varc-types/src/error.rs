use thiserror::Error;

/// Errors from foundation type parsing and lookups.
#[derive(Debug, Error)]
pub enum TypeError {
    /// The string is not a valid 128-bit key.
    #[error("invalid asset key {0}")]
    InvalidKey(String),

    /// Name-based asset type lookup miss.
    #[error("unknown asset type name: {0}")]
    UnknownAssetType(String),
}
