//! core::store::traits
//!
//! Backend trait for the object store.
//!
//! # Design
//!
//! A backend is an opaque key-value mapping from `(kind, digest)` to bytes.
//! It does no hashing of its own: [`super::ObjectStore`] computes digests and
//! decides what to store. Backends must treat writes of an existing key as a
//! no-op, since identical keys always carry identical bytes.

use thiserror::Error;

use crate::core::types::ObjectId;

/// Namespaces inside the object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    /// Raw file contents.
    Blob,
    /// Serialized commits.
    Commit,
}

impl ObjectKind {
    /// Directory name used by file-backed stores.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blobs",
            ObjectKind::Commit => "commits",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Blob => write!(f, "blob"),
            ObjectKind::Commit => write!(f, "commit"),
        }
    }
}

/// Errors from object storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No object exists under the digest.
    #[error("{kind} {id} not found")]
    NotFound { kind: ObjectKind, id: ObjectId },

    /// Stored bytes no longer hash to their key.
    #[error("{kind} {id} is corrupt: content hashes to {actual}")]
    Corrupt {
        kind: ObjectKind,
        id: ObjectId,
        actual: ObjectId,
    },

    /// A stored commit could not be decoded.
    #[error("failed to decode {kind} {id}: {message}")]
    Decode {
        kind: ObjectKind,
        id: ObjectId,
        message: String,
    },

    /// A commit could not be encoded.
    #[error("failed to encode commit: {0}")]
    Encode(String),

    /// Backend I/O failure.
    #[error("object store i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key-value storage for immutable objects.
pub trait ObjectBackend {
    /// Store `bytes` under `(kind, id)` unless the key already exists.
    fn write(&self, kind: ObjectKind, id: &ObjectId, bytes: &[u8]) -> Result<(), StoreError>;

    /// Read the bytes stored under `(kind, id)`, or `None` if absent.
    fn read(&self, kind: ObjectKind, id: &ObjectId) -> Result<Option<Vec<u8>>, StoreError>;

    /// Check whether a key exists.
    fn contains(&self, kind: ObjectKind, id: &ObjectId) -> Result<bool, StoreError>;

    /// List every id stored under `kind`, in ascending order.
    fn list(&self, kind: ObjectKind) -> Result<Vec<ObjectId>, StoreError>;
}
