//! core::store
//!
//! Content-addressed object storage.
//!
//! # Modules
//!
//! - [`traits`] - The [`ObjectBackend`] key-value seam and [`StoreError`]
//! - [`fs_backend`] - One file per object under `.gitlet/objects/`
//! - [`memory`] - In-memory backend for tests
//!
//! # Architecture
//!
//! [`ObjectStore`] owns hashing: every object is keyed by the SHA-256 of its
//! bytes, so storing identical content twice is a no-op and identical files
//! or commits collapse to one stored object. Reads re-hash the bytes and
//! report a mismatch as [`StoreError::Corrupt`].
//!
//! # Example
//!
//! ```
//! use gitlet::core::store::{MemoryBackend, ObjectStore};
//!
//! let store = ObjectStore::new(MemoryBackend::new());
//! let a = store.put_blob(b"contents").unwrap();
//! let b = store.put_blob(b"contents").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(store.get_blob(&a).unwrap(), b"contents");
//! ```

pub mod fs_backend;
pub mod memory;
pub mod traits;

pub use fs_backend::{write_atomic, FsBackend};
pub use memory::MemoryBackend;
pub use traits::{ObjectBackend, ObjectKind, StoreError};

use tracing::debug;

use crate::core::commit::Commit;
use crate::core::types::{ObjectId, OBJECT_ID_LEN, SHORT_ID_LEN};

/// Content-addressed store of blobs and commits.
#[derive(Debug, Clone)]
pub struct ObjectStore<B> {
    backend: B,
}

impl<B: ObjectBackend> ObjectStore<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Store raw bytes under their digest and return it.
    pub fn put(&self, kind: ObjectKind, bytes: &[u8]) -> Result<ObjectId, StoreError> {
        let id = ObjectId::for_bytes(bytes);
        if !self.backend.contains(kind, &id)? {
            debug!(%kind, id = %id.short(SHORT_ID_LEN), len = bytes.len(), "storing object");
            self.backend.write(kind, &id, bytes)?;
        }
        Ok(id)
    }

    /// Fetch raw bytes, verifying they still hash to `id`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if nothing is stored under `id`
    /// - [`StoreError::Corrupt`] if the stored bytes hash differently
    pub fn get(&self, kind: ObjectKind, id: &ObjectId) -> Result<Vec<u8>, StoreError> {
        let bytes = self
            .backend
            .read(kind, id)?
            .ok_or_else(|| StoreError::NotFound {
                kind,
                id: id.clone(),
            })?;

        let actual = ObjectId::for_bytes(&bytes);
        if &actual != id {
            return Err(StoreError::Corrupt {
                kind,
                id: id.clone(),
                actual,
            });
        }
        Ok(bytes)
    }

    /// Store file contents.
    pub fn put_blob(&self, bytes: &[u8]) -> Result<ObjectId, StoreError> {
        self.put(ObjectKind::Blob, bytes)
    }

    /// Fetch file contents.
    pub fn get_blob(&self, id: &ObjectId) -> Result<Vec<u8>, StoreError> {
        self.get(ObjectKind::Blob, id)
    }

    /// Serialize and store a commit, returning its id.
    pub fn put_commit(&self, commit: &Commit) -> Result<ObjectId, StoreError> {
        let bytes = commit
            .to_bytes()
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        self.put(ObjectKind::Commit, &bytes)
    }

    /// Fetch and decode a commit.
    pub fn get_commit(&self, id: &ObjectId) -> Result<Commit, StoreError> {
        let bytes = self.get(ObjectKind::Commit, id)?;
        Commit::from_bytes(&bytes).map_err(|e| StoreError::Decode {
            kind: ObjectKind::Commit,
            id: id.clone(),
            message: e.to_string(),
        })
    }

    /// Whether a commit with this exact id exists.
    pub fn has_commit(&self, id: &ObjectId) -> Result<bool, StoreError> {
        self.backend.contains(ObjectKind::Commit, id)
    }

    /// Every stored commit id, ascending.
    pub fn commit_ids(&self) -> Result<Vec<ObjectId>, StoreError> {
        self.backend.list(ObjectKind::Commit)
    }

    /// Resolve a full id or an 8-character abbreviation to a stored commit.
    ///
    /// Abbreviations must match exactly one stored commit. Any other length,
    /// an unknown id, or an ambiguous prefix resolves to `None`.
    pub fn resolve_commit(&self, reference: &str) -> Result<Option<ObjectId>, StoreError> {
        let reference = reference.to_ascii_lowercase();
        match reference.len() {
            OBJECT_ID_LEN => match ObjectId::new(reference) {
                Ok(id) if self.has_commit(&id)? => Ok(Some(id)),
                _ => Ok(None),
            },
            SHORT_ID_LEN => {
                let mut matches = self
                    .commit_ids()?
                    .into_iter()
                    .filter(|id| id.as_str().starts_with(&reference));
                match (matches.next(), matches.next()) {
                    (Some(id), None) => Ok(Some(id)),
                    _ => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }
}
