//! The container store: an open index/data file pair.

use std::collections::HashMap;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::SystemTime;

use varc_types::AssetKey;

use crate::entry::{padded_length, Entry, MAX_PAYLOAD_SIZE};
use crate::error::{StoreError, StoreResult};
use crate::record::IndexRecord;

/// How a store is opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenMode {
    /// Open existing files, load the index, no writes.
    Read,
    /// Create or truncate both files, start empty.
    Write,
    /// Open existing files, load the index, allow further appends.
    Append,
}

impl OpenMode {
    /// Returns `true` if [`Store::add`] is permitted in this mode.
    pub fn is_writable(self) -> bool {
        !matches!(self, Self::Read)
    }
}

impl FromStr for OpenMode {
    type Err = StoreError;

    /// Parse a mode token: `r`, `w`, or `a`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" => Ok(Self::Read),
            "w" => Ok(Self::Write),
            "a" => Ok(Self::Append),
            _ => Err(StoreError::InvalidMode(s.to_string())),
        }
    }
}

/// A virtual file store: a fixed-record index file plus an append-only,
/// block-padded data file.
///
/// The store owns both file handles for its lifetime; they are released on
/// drop on every exit path, including a construction that fails after the
/// first file opened. The format has no locking or append-conflict
/// detection: one writer at a time, and readers only while nothing is
/// writing.
pub struct Store {
    index_file: File,
    data_file: File,
    mode: OpenMode,
    /// Append cursor: the sum of all previously appended padded lengths.
    /// Tracked explicitly rather than trusting the handle's position.
    cursor: u64,
    entries: Vec<Entry>,
    by_key: HashMap<AssetKey, usize>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("mode", &self.mode)
            .field("entries", &self.entries.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl Store {
    /// Open an index/data pair.
    ///
    /// Read and append modes fail if either file is missing, then decode
    /// the full index; write mode truncates both files.
    pub fn open(index_path: &Path, data_path: &Path, mode: OpenMode) -> StoreResult<Self> {
        let (index_file, data_file) = match mode {
            OpenMode::Write => (create_truncated(index_path)?, create_truncated(data_path)?),
            OpenMode::Read => (File::open(index_path)?, File::open(data_path)?),
            OpenMode::Append => (open_read_write(index_path)?, open_read_write(data_path)?),
        };

        let mut store = Self {
            index_file,
            data_file,
            mode,
            cursor: 0,
            entries: Vec::new(),
            by_key: HashMap::new(),
        };

        if matches!(mode, OpenMode::Read | OpenMode::Append) {
            store.load_index()?;
            store.cursor = store.data_file.metadata()?.len();
        }
        Ok(store)
    }

    /// Decode the whole index file into the entry sequence and key lookup.
    ///
    /// File order is preserved. A duplicate key keeps every record in the
    /// sequence; the keyed lookup sees only the latest one.
    fn load_index(&mut self) -> StoreResult<()> {
        self.index_file.seek(SeekFrom::Start(0))?;
        let mut raw = Vec::new();
        self.index_file.read_to_end(&mut raw)?;

        let records = IndexRecord::decode_all(&raw)?;
        self.entries = records.into_iter().map(Entry::from_load).collect();
        self.by_key = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.key, i))
            .collect();

        tracing::debug!(entries = self.entries.len(), "index loaded");
        Ok(())
    }

    /// The mode this store was opened with.
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Number of index records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in index-file order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterate entries in index-file order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Look up an entry by key. Duplicate keys resolve to the last record.
    pub fn from_key(&self, key: &AssetKey) -> Option<&Entry> {
        self.by_key.get(key).map(|&i| &self.entries[i])
    }

    /// Look up by the key's canonical string form.
    ///
    /// Total: an unparseable string is simply absent.
    pub fn from_key_str(&self, s: &str) -> Option<&Entry> {
        AssetKey::parse_str(s).ok().and_then(|key| self.from_key(&key))
    }

    /// Read exactly `size` bytes at `offset` from the data file.
    pub fn read(&mut self, offset: u64, size: usize) -> StoreResult<Vec<u8>> {
        self.data_file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; size];
        self.data_file.read_exact(&mut buf).map_err(|err| {
            if err.kind() == ErrorKind::UnexpectedEof {
                StoreError::ShortRead { offset, want: size }
            } else {
                StoreError::Io(err)
            }
        })?;
        Ok(buf)
    }

    /// Read an entry's payload.
    pub fn read_entry(&mut self, entry: &Entry) -> StoreResult<Vec<u8>> {
        self.read(u64::from(entry.offset), entry.size as usize)
    }

    /// Append one asset: payload plus zero padding to the data file, one
    /// record to the index file.
    ///
    /// This is a pure append. The in-memory entry set is not updated; the
    /// entry that was written is returned, and a reload sees it.
    pub fn add(
        &mut self,
        key: AssetKey,
        file_type: u16,
        payload: &[u8],
        atime: SystemTime,
    ) -> StoreResult<Entry> {
        if !self.mode.is_writable() {
            return Err(StoreError::ReadOnly);
        }

        let size = payload.len() as u64;
        if size > u64::from(MAX_PAYLOAD_SIZE) {
            return Err(StoreError::PayloadTooLarge { size });
        }
        let size = size as u32;
        let length = padded_length(size);
        if self.cursor + u64::from(length) > u64::from(u32::MAX) {
            return Err(StoreError::PayloadTooLarge { size: u64::from(size) });
        }

        let entry = Entry::from_create(self.cursor as u32, size, key, file_type, atime);

        self.data_file.seek(SeekFrom::Start(self.cursor))?;
        self.data_file.write_all(payload)?;
        let pad = (length - size) as usize;
        if pad > 0 {
            self.data_file.write_all(&vec![0u8; pad])?;
        }

        self.index_file.seek(SeekFrom::End(0))?;
        self.index_file.write_all(&entry.to_record().encode())?;

        self.cursor += u64::from(length);
        tracing::debug!(key = %key, size, length, offset = entry.offset, "appended asset");
        Ok(entry)
    }
}

fn create_truncated(path: &Path) -> StoreResult<File> {
    Ok(OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?)
}

fn open_read_write(path: &Path) -> StoreResult<File> {
    Ok(OpenOptions::new().read(true).write(true).open(path)?)
}
