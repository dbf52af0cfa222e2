use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// 128-bit identifier naming a stored asset.
///
/// A key carries no structure of its own: it is either assigned externally
/// (a path map pins keys across round trips), or derived from the asset's
/// content for bulk imports. Keys are unique within a store by convention,
/// not enforcement — on collision the last written record wins at lookup.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetKey(uuid::Uuid);

impl AssetKey {
    /// Create a key from its raw 16-byte value.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Uuid::from_bytes(bytes))
    }

    /// Derive a key from asset content (BLAKE3, truncated to 128 bits).
    ///
    /// Identical content always produces the same key, which keeps repeated
    /// imports of an unchanged tree stable without a path map.
    pub fn from_content(data: &[u8]) -> Self {
        let hash = blake3::hash(data);
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash.as_bytes()[..16]);
        Self::from_bytes(bytes)
    }

    /// The null key (all zeros).
    pub const fn null() -> Self {
        Self(uuid::Uuid::nil())
    }

    /// Returns `true` if this is the null key.
    pub fn is_null(&self) -> bool {
        self.0.is_nil()
    }

    /// The raw 16-byte value.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Parse the canonical hyphenated form; plain 32-hex is also accepted.
    pub fn parse_str(s: &str) -> Result<Self, TypeError> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TypeError::InvalidKey(s.to_string()))
    }
}

impl fmt::Debug for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.0.simple().to_string();
        write!(f, "AssetKey({})", &hex[..8])
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<[u8; 16]> for AssetKey {
    fn from(bytes: [u8; 16]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<AssetKey> for [u8; 16] {
    fn from(key: AssetKey) -> Self {
        *key.0.as_bytes()
    }
}
