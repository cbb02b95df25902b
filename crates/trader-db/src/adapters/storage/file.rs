use super::{apply_operations, scan_prefix};
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Snapshot file header.
const MAGIC: &[u8; 4] = b"TDB1";

type Snapshot = BTreeMap<Vec<u8>, Vec<u8>>;

fn io_error(context: &str, e: io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: format!("{context}: {e}"),
    }
}

fn corruption(message: impl Into<String>) -> KVStoreError {
    KVStoreError::CorruptionError {
        message: message.into(),
    }
}

/// File-backed key-value store.
///
/// The whole key space is kept in memory and every write replaces the
/// snapshot file through a temp file and a rename, so a crash leaves either
/// the old or the new snapshot on disk. The in-memory view only changes
/// after the new snapshot is in place.
///
/// ## File Format
///
/// `[magic "TDB1"][entries...][crc32(entries): u32 LE]`, with each entry
/// `[key_len: u32 LE][key][value_len: u32 LE][value]`.
pub struct FileBackedKVStore {
    data: Snapshot,
    path: PathBuf,
    sync_writes: bool,
}

impl FileBackedKVStore {
    /// Open the store at `path`, creating it empty if the file is missing.
    ///
    /// A present but unreadable or damaged file is an error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match File::open(&path) {
            Ok(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)
                    .map_err(|e| io_error("read snapshot", e))?;
                let data = decode_snapshot(&bytes)?;
                tracing::info!(
                    path = %path.display(),
                    keys = data.len(),
                    bytes = bytes.len(),
                    "[trader-db] Loaded storage file"
                );
                data
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "[trader-db] No existing storage file");
                Snapshot::new()
            }
            Err(e) => return Err(io_error("open snapshot", e)),
        };

        Ok(Self {
            data,
            path,
            sync_writes: true,
        })
    }

    /// Whether to fsync the snapshot before the rename and its directory after.
    pub fn with_sync(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `next` and adopt it as the current view.
    fn commit(&mut self, next: Snapshot) -> Result<(), KVStoreError> {
        self.save_to_file(&next)?;
        self.data = next;
        Ok(())
    }

    /// Flush the directory entry so the rename survives a power loss.
    fn sync_parent_dir(&self) -> Result<(), KVStoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        #[cfg(unix)]
        File::open(dir)
            .and_then(|d| d.sync_all())
            .map_err(|e| io_error("sync data dir", e))?;
        #[cfg(not(unix))]
        let _ = dir;
        Ok(())
    }

    fn save_to_file(&self, data: &Snapshot) -> Result<(), KVStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error("create data dir", e))?;
        }

        let bytes = encode_snapshot(data)?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path).map_err(|e| io_error("create temp file", e))?;
        file.write_all(&bytes)
            .map_err(|e| io_error("write temp file", e))?;
        if self.sync_writes {
            file.sync_all().map_err(|e| io_error("sync temp file", e))?;
        }
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| io_error("replace snapshot", e))?;
        if self.sync_writes {
            self.sync_parent_dir()?;
        }
        tracing::trace!(path = %self.path.display(), bytes = bytes.len(), "[trader-db] Snapshot written");
        Ok(())
    }
}

fn encode_snapshot(data: &Snapshot) -> Result<Vec<u8>, KVStoreError> {
    let mut body = Vec::new();
    for (key, value) in data {
        for field in [key, value] {
            let len = u32::try_from(field.len())
                .map_err(|_| corruption(format!("field of {} bytes too large", field.len())))?;
            body.extend_from_slice(&len.to_le_bytes());
            body.extend_from_slice(field);
        }
    }

    let mut bytes = Vec::with_capacity(MAGIC.len() + body.len() + 4);
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&body);
    bytes.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
    Ok(bytes)
}

fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, KVStoreError> {
    if bytes.len() < MAGIC.len() + 4 || &bytes[..MAGIC.len()] != MAGIC {
        return Err(corruption("not a trader-db snapshot"));
    }
    let (body, trailer) = bytes[MAGIC.len()..].split_at(bytes.len() - MAGIC.len() - 4);
    let expected = read_u32(trailer, 0)?;
    let actual = crc32fast::hash(body);
    if expected != actual {
        return Err(corruption(format!(
            "snapshot checksum mismatch: expected {expected:#010x}, got {actual:#010x}"
        )));
    }

    let mut data = Snapshot::new();
    let mut cursor = 0;
    while cursor < body.len() {
        let key = read_field(body, &mut cursor)?;
        let value = read_field(body, &mut cursor)?;
        data.insert(key, value);
    }
    Ok(data)
}

fn read_u32(bytes: &[u8], at: usize) -> Result<u32, KVStoreError> {
    bytes
        .get(at..at + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| corruption("truncated length field"))
}

fn read_field(body: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let len = read_u32(body, *cursor)? as usize;
    *cursor += 4;
    let field = body
        .get(*cursor..*cursor + len)
        .ok_or_else(|| corruption("truncated entry"))?;
    *cursor += len;
    Ok(field.to_vec())
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::put(key, value)])
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.atomic_batch_write(vec![BatchOperation::delete(key)])
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        apply_operations(&mut next, operations);
        self.commit(next)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>, KVStoreError> {
        Ok(scan_prefix(&self.data, prefix))
    }
}
