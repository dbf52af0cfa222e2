//! Bidirectional key↔path tables.
//!
//! A path map pins the key a given path packs under, so repeated
//! unpack/pack round trips keep stable identifiers instead of deriving
//! fresh content-hash keys on every import.
//!
//! The text form is one `<key> <path>` record per line, split on the first
//! whitespace run; blank lines and `#` comments are ignored.

use std::collections::HashMap;

use varc_types::AssetKey;

/// Bidirectional 1:1 mapping between storage keys and relative paths.
///
/// Both directions stay consistent: mapping a key that already has a path,
/// or a path that already has a key, replaces the old association entirely.
#[derive(Clone, Debug, Default)]
pub struct PathMap {
    by_key: HashMap<AssetKey, String>,
    by_path: HashMap<String, AssetKey>,
}

impl PathMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (key, path) pairs; later pairs overwrite earlier ones.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (AssetKey, String)>,
    {
        let mut map = Self::new();
        for (key, path) in pairs {
            map.map(key, path);
        }
        map
    }

    /// Number of associations.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns `true` if the map has no associations.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// The path mapped to `key`, if any.
    pub fn find_path(&self, key: &AssetKey) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }

    /// The key mapped to `path`, if any.
    pub fn find_key(&self, path: &str) -> Option<&AssetKey> {
        self.by_path.get(path)
    }

    /// Associate `key` with `path` in both directions.
    ///
    /// Any association either side already had is removed first, so the two
    /// directions never disagree.
    pub fn map(&mut self, key: AssetKey, path: String) {
        if let Some(old_path) = self.by_key.remove(&key) {
            self.by_path.remove(&old_path);
        }
        if let Some(old_key) = self.by_path.remove(&path) {
            self.by_key.remove(&old_key);
        }
        self.by_key.insert(key, path.clone());
        self.by_path.insert(path, key);
    }

    /// Iterate over (key, path) associations in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetKey, &str)> {
        self.by_key.iter().map(|(key, path)| (key, path.as_str()))
    }

    /// Parse a line-oriented map table.
    ///
    /// Malformed lines (no separator, or an unparseable key) are logged and
    /// skipped; the rest of the table still loads.
    pub fn parse(text: &str) -> Self {
        let mut map = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key_part, path_part)) = line.split_once(char::is_whitespace) else {
                tracing::warn!(line, "path map line has no separator, skipping");
                continue;
            };
            match AssetKey::parse_str(key_part.trim()) {
                Ok(key) => map.map(key, path_part.trim().to_string()),
                Err(err) => {
                    tracing::warn!(line, error = %err, "path map line has a bad key, skipping");
                }
            }
        }
        map
    }
}
