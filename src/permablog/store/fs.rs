use super::collection::Collection;
use super::RecordStore;
use crate::error::{BlogError, Result};
use crate::model::{IndexedField, Record, RecordId, ScalarField, SequenceField, StoredRecord};
use fs2::FileExt;
use std::cell::RefCell;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::NamedTempFile;

pub const DEFAULT_COLLECTION_FILE: &str = "records.json";

/// File-backed collection.
///
/// The whole collection is one JSON array. Reads go through a cached
/// snapshot that is parsed again only when the file is replaced or its
/// modification time or length changes. A thread resolve costs one parse, and
/// writes from other processes are still picked up on the next call.
///
/// Mutations hold an exclusive lock on a sibling `.<file>.lock` for the whole
/// load, modify and save, so the unique permalink check on insert always runs
/// against the latest state on disk and concurrent writers never drop each
/// other's documents.
pub struct FileStore {
    root: PathBuf,
    file_name: String,
    snapshot: RefCell<Snapshot>,
}

/// What the collection file looked like when it was last parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    file_id: u64,
    modified: SystemTime,
    len: u64,
}

/// A parsed collection and the stamp it was parsed at. `stamp: None` means
/// no file, for which the empty default collection is correct.
#[derive(Debug, Default)]
struct Snapshot {
    stamp: Option<Stamp>,
    collection: Collection,
}

impl FileStore {
    /// Opens (and creates, if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| unavailable(&root, e))?;
        }
        Ok(Self {
            root,
            file_name: DEFAULT_COLLECTION_FILE.to_string(),
            snapshot: RefCell::new(Snapshot::default()),
        })
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self.snapshot = RefCell::new(Snapshot::default());
        self
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join(format!(".{}.lock", self.file_name))
    }

    /// Blocks until this handle is the only writer. Released on drop.
    fn lock(&self) -> Result<File> {
        let path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| unavailable(&path, e))?;
        file.lock_exclusive().map_err(|e| unavailable(&path, e))?;
        Ok(file)
    }

    /// Re-parses the file if it changed since the last call.
    fn refresh(&self) -> Result<()> {
        let path = self.path();
        let stamp = stamp_of(&path)?;
        if self.snapshot.borrow().stamp == stamp {
            return Ok(());
        }

        let collection = match stamp {
            Some(_) => parse(&path)?,
            None => Collection::new(),
        };
        tracing::debug!(path = %path.display(), documents = collection.len(), "collection loaded");
        *self.snapshot.borrow_mut() = Snapshot { stamp, collection };
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Collection) -> T) -> Result<T> {
        self.refresh()?;
        Ok(f(&self.snapshot.borrow().collection))
    }

    /// Under the writer lock: refresh, apply `f`, and save only if `f`
    /// reports a change.
    fn mutate<T>(&mut self, f: impl FnOnce(&mut Collection) -> Result<(T, bool)>) -> Result<T> {
        let _lock = self.lock()?;
        self.refresh()?;

        let path = self.path();
        let snapshot = self.snapshot.get_mut();
        let outcome = f(&mut snapshot.collection).and_then(|(value, changed)| {
            if changed {
                write_atomically(&self.root, &path, &snapshot.collection)?;
                snapshot.stamp = stamp_of(&path)?;
            }
            Ok(value)
        });
        if outcome.is_err() {
            // The in-memory copy may no longer match the file.
            *snapshot = Snapshot::default();
        }
        outcome
    }
}

fn stamp_of(path: &Path) -> Result<Option<Stamp>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(Stamp {
            file_id: file_id(&meta),
            modified: meta.modified().map_err(|e| unavailable(path, e))?,
            len: meta.len(),
        })),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(unavailable(path, e)),
    }
}

// Saves rename a fresh file into place, so the inode changes on every write.
#[cfg(unix)]
fn file_id(meta: &fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    meta.ino()
}

#[cfg(not(unix))]
fn file_id(_meta: &fs::Metadata) -> u64 {
    0
}

fn parse(path: &Path) -> Result<Collection> {
    let content = fs::read_to_string(path).map_err(|e| unavailable(path, e))?;
    if content.trim().is_empty() {
        return Ok(Collection::new());
    }
    let docs: Vec<StoredRecord> = serde_json::from_str(&content)
        .map_err(|e| BlogError::StoreUnavailable(format!("{}: {}", path.display(), e)))?;
    Collection::from_documents(docs).map_err(|e| match e {
        BlogError::DuplicateKey(key) => BlogError::StoreUnavailable(format!(
            "{}: duplicate permalink {}",
            path.display(),
            key
        )),
        other => other,
    })
}

/// Writes through a uniquely named temp file in `root`, then renames it over
/// `path`, so readers never see a torn file.
fn write_atomically(root: &Path, path: &Path, collection: &Collection) -> Result<()> {
    let docs: Vec<&StoredRecord> = collection.documents().collect();
    let content = serde_json::to_string_pretty(&docs)?;

    let mut tmp = NamedTempFile::new_in(root).map_err(|e| unavailable(root, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| unavailable(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| unavailable(path, e.error))?;
    tracing::debug!(path = %path.display(), documents = collection.len(), "collection saved");
    Ok(())
}

fn unavailable(path: &Path, err: io::Error) -> BlogError {
    BlogError::StoreUnavailable(format!("{}: {}", path.display(), err))
}

impl RecordStore for FileStore {
    fn insert(&mut self, record: Record) -> Result<RecordId> {
        self.mutate(|c| c.insert(record).map(|id| (id, true)))
    }

    fn find_by_field_equals(&self, field: IndexedField, value: &str) -> Result<Vec<Record>> {
        self.read(|c| c.find_by_field_equals(field, value))
    }

    fn find_one_by_permalink(&self, permalink: &str) -> Result<Option<Record>> {
        self.read(|c| c.get(permalink).cloned())
    }

    fn update_field(&mut self, permalink: &str, field: ScalarField, value: &str) -> Result<bool> {
        self.mutate(|c| {
            let hit = c.update_field(permalink, field, value);
            Ok((hit, hit))
        })
    }

    fn append_to_sequence(
        &mut self,
        permalink: &str,
        field: SequenceField,
        value: &str,
    ) -> Result<bool> {
        self.mutate(|c| {
            let hit = c.append_to_sequence(permalink, field, value);
            Ok((hit, hit))
        })
    }

    fn len(&self) -> Result<usize> {
        self.read(|c| c.len())
    }
}
