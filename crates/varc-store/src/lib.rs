//! The varc container core: a two-file virtual file store.
//!
//! # Architecture
//!
//! - **Index file**: a flat sequence of fixed 34-byte little-endian records;
//!   all structure lives here.
//! - **Data file**: payload bytes, each zero-padded to a 1024-byte multiple;
//!   no header, no footer, no self-describing boundaries.
//! - **[`Store`]**: owns the open pair, decodes the index, resolves payloads
//!   by recorded offset/size, and appends new assets.
//!
//! The pair is single-writer: nothing in the format detects concurrent
//! appends, and readers are only safe while no writer is active. There is
//! no deletion or compaction — appends always extend the end of both files.

pub mod entry;
pub mod error;
pub mod record;
pub mod store;

pub use entry::{padded_length, Entry, BLOCK_SIZE, MAX_PAYLOAD_SIZE};
pub use error::{StoreError, StoreResult};
pub use record::{IndexRecord, RECORD_SIZE};
pub use store::{OpenMode, Store};

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use varc_types::AssetKey;

    use super::*;

    fn atime(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn pair(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
        (
            dir.path().join("static_index.db2"),
            dir.path().join("static_data.db2"),
        )
    }

    #[test]
    fn add_reload_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);
        let key = AssetKey::from_content(b"payload one");

        {
            let mut store = Store::open(&index, &data, OpenMode::Write).unwrap();
            store.add(key, 0, b"payload one", atime(1_600_000_000)).unwrap();
        }

        let mut store = Store::open(&index, &data, OpenMode::Read).unwrap();
        assert_eq!(store.len(), 1);
        let entry = *store.from_key(&key).unwrap();
        assert_eq!(entry.offset, 0);
        assert_eq!(entry.size, 11);
        assert_eq!(entry.length, 1024);
        assert_eq!(entry.file_type, 0);
        assert_eq!(entry.atime, atime(1_600_000_000));
        assert_eq!(store.read_entry(&entry).unwrap(), b"payload one");
    }

    #[test]
    fn read_in_same_session_after_add() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);

        let mut store = Store::open(&index, &data, OpenMode::Write).unwrap();
        let entry = store
            .add(AssetKey::from_content(b"abc"), 7, b"abc", atime(0))
            .unwrap();
        assert_eq!(store.read_entry(&entry).unwrap(), b"abc");
    }

    #[test]
    fn offsets_accumulate_by_padded_length() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);

        {
            let mut store = Store::open(&index, &data, OpenMode::Write).unwrap();
            store.add(AssetKey::from_bytes([1; 16]), 0, &[0xAB; 10], atime(1)).unwrap();
            store.add(AssetKey::from_bytes([2; 16]), 0, &[0xCD; 2048], atime(2)).unwrap();
            store.add(AssetKey::from_bytes([3; 16]), 0, &[], atime(3)).unwrap();
            store.add(AssetKey::from_bytes([4; 16]), 0, &[0xEF; 1], atime(4)).unwrap();
        }

        let store = Store::open(&index, &data, OpenMode::Read).unwrap();
        let offsets: Vec<u32> = store.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 1024, 3072, 3072]);
        assert_eq!(std::fs::metadata(&data).unwrap().len(), 4096);
        assert_eq!(std::fs::metadata(&index).unwrap().len(), 4 * RECORD_SIZE as u64);
    }

    #[test]
    fn payload_is_zero_padded() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);

        {
            let mut store = Store::open(&index, &data, OpenMode::Write).unwrap();
            store.add(AssetKey::from_bytes([1; 16]), 0, b"hi", atime(0)).unwrap();
        }

        let blob = std::fs::read(&data).unwrap();
        assert_eq!(blob.len(), 1024);
        assert_eq!(&blob[..2], b"hi");
        assert!(blob[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_payload_allocates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);

        {
            let mut store = Store::open(&index, &data, OpenMode::Write).unwrap();
            store.add(AssetKey::from_bytes([1; 16]), 0, &[], atime(0)).unwrap();
        }

        let mut store = Store::open(&index, &data, OpenMode::Read).unwrap();
        let entry = *store.from_key(&AssetKey::from_bytes([1; 16])).unwrap();
        assert_eq!(entry.size, 0);
        assert_eq!(entry.length, 0);
        assert_eq!(store.read_entry(&entry).unwrap(), Vec::<u8>::new());
        assert_eq!(std::fs::metadata(&data).unwrap().len(), 0);
    }

    #[test]
    fn append_mode_extends_existing_pair() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);
        let first = AssetKey::from_bytes([1; 16]);
        let second = AssetKey::from_bytes([2; 16]);

        {
            let mut store = Store::open(&index, &data, OpenMode::Write).unwrap();
            store.add(first, 0, &[0xAA; 100], atime(1)).unwrap();
        }
        {
            let mut store = Store::open(&index, &data, OpenMode::Append).unwrap();
            assert_eq!(store.len(), 1);
            store.add(second, 0, b"second", atime(2)).unwrap();
        }

        let mut store = Store::open(&index, &data, OpenMode::Read).unwrap();
        assert_eq!(store.len(), 2);
        let entry = *store.from_key(&second).unwrap();
        assert_eq!(entry.offset, 1024);
        assert_eq!(store.read_entry(&entry).unwrap(), b"second");
    }

    #[test]
    fn duplicate_key_lists_both_but_looks_up_last() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);
        let key = AssetKey::from_bytes([9; 16]);

        {
            let mut store = Store::open(&index, &data, OpenMode::Write).unwrap();
            store.add(key, 0, b"old", atime(1)).unwrap();
            store.add(key, 0, b"new!", atime(2)).unwrap();
        }

        let mut store = Store::open(&index, &data, OpenMode::Read).unwrap();
        assert_eq!(store.len(), 2);
        let entry = *store.from_key(&key).unwrap();
        assert_eq!(entry.offset, 1024);
        assert_eq!(store.read_entry(&entry).unwrap(), b"new!");
    }

    #[test]
    fn from_key_str_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);
        let key = AssetKey::from_content(b"named");

        {
            let mut store = Store::open(&index, &data, OpenMode::Write).unwrap();
            store.add(key, 0, b"named", atime(0)).unwrap();
        }

        let store = Store::open(&index, &data, OpenMode::Read).unwrap();
        assert!(store.from_key_str(&key.to_string()).is_some());
        assert!(store.from_key_str("00000000-0000-0000-0000-00000000ffff").is_none());
        assert!(store.from_key_str("definitely not a key").is_none());
    }

    #[test]
    fn read_mode_fails_on_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);
        let err = Store::open(&index, &data, OpenMode::Read).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn add_in_read_mode_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);
        std::fs::write(&index, b"").unwrap();
        std::fs::write(&data, b"").unwrap();

        let mut store = Store::open(&index, &data, OpenMode::Read).unwrap();
        let err = store
            .add(AssetKey::null(), 0, b"nope", atime(0))
            .unwrap_err();
        assert!(matches!(err, StoreError::ReadOnly));
    }

    #[test]
    fn partial_index_record_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);
        std::fs::write(&index, [0u8; 35]).unwrap();
        std::fs::write(&data, []).unwrap();

        let err = Store::open(&index, &data, OpenMode::Read).unwrap_err();
        assert!(matches!(err, StoreError::CorruptIndex { len: 35 }));
    }

    #[test]
    fn truncated_data_file_is_a_short_read() {
        let dir = tempfile::tempdir().unwrap();
        let (index, data) = pair(&dir);
        let key = AssetKey::from_bytes([5; 16]);

        {
            let mut store = Store::open(&index, &data, OpenMode::Write).unwrap();
            store.add(key, 0, &[0x55; 300], atime(0)).unwrap();
        }
        let file = std::fs::OpenOptions::new().write(true).open(&data).unwrap();
        file.set_len(100).unwrap();

        let mut store = Store::open(&index, &data, OpenMode::Read).unwrap();
        let entry = *store.from_key(&key).unwrap();
        let err = store.read_entry(&entry).unwrap_err();
        assert!(matches!(err, StoreError::ShortRead { offset: 0, want: 300 }));
    }
}
