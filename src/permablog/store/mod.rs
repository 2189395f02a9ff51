//! # Storage Layer
//!
//! All posts and comments live in one logical collection of documents keyed by
//! permalink. The [`RecordStore`] trait is the only way the rest of the crate
//! touches that collection.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: durable storage
//!   - The collection is a JSON array in `records.json`
//!   - Reads use a snapshot that is re-parsed whenever the file changes on
//!     disk, so separate processes see each other's writes
//!   - Mutations hold an exclusive file lock across load, modify and save,
//!     then replace the file atomically (temp file + rename)
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!   - No persistence
//!
//! Both delegate indexing to [`collection::Collection`], which enforces the
//! unique `permalink` index and keeps the secondary `blogName` index.
//!
//! ## Misses are not errors
//!
//! Lookups that find nothing return `Ok(None)`, updates that match nothing
//! return `Ok(false)`. `Err` is reserved for duplicate keys and for the
//! backing storage failing.

use crate::error::Result;
use crate::model::{IndexedField, Record, RecordId, ScalarField, SequenceField};

pub mod collection;
pub mod fs;
pub mod memory;

/// Abstract interface for the document collection.
pub trait RecordStore {
    /// Insert a new document. Fails with `DuplicateKey` if the permalink is taken.
    fn insert(&mut self, record: Record) -> Result<RecordId>;

    /// All documents whose `field` equals `value`, each exactly once.
    /// Order is up to the store.
    fn find_by_field_equals(&self, field: IndexedField, value: &str) -> Result<Vec<Record>>;

    /// Exact-key lookup
    fn find_one_by_permalink(&self, permalink: &str) -> Result<Option<Record>>;

    /// Overwrite a scalar field. Returns false if nothing matched.
    fn update_field(&mut self, permalink: &str, field: ScalarField, value: &str) -> Result<bool>;

    /// Append one element to a sequence field. Returns false if nothing matched.
    fn append_to_sequence(
        &mut self,
        permalink: &str,
        field: SequenceField,
        value: &str,
    ) -> Result<bool>;

    /// Number of documents in the collection
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
