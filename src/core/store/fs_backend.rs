//! core::store::fs_backend
//!
//! File-backed object storage.
//!
//! # Layout
//!
//! One file per object at `<objects>/<kind>/<id>`.
//!
//! # Durability
//!
//! - All writes are atomic (write to temp file, fsync, then rename)
//! - Existing objects are never rewritten
//! - Leftover temp files from an interrupted write are ignored by `list`

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::traits::{ObjectBackend, ObjectKind, StoreError};
use crate::core::types::ObjectId;

/// Object backend storing one file per object.
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    /// Create a backend rooted at the given objects directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The objects directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(&self, kind: ObjectKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    fn object_path(&self, kind: ObjectKind, id: &ObjectId) -> PathBuf {
        self.kind_dir(kind).join(id.as_str())
    }
}

impl ObjectBackend for FsBackend {
    fn write(&self, kind: ObjectKind, id: &ObjectId, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.object_path(kind, id);
        if path.exists() {
            return Ok(());
        }
        write_atomic(&path, bytes)?;
        Ok(())
    }

    fn read(&self, kind: ObjectKind, id: &ObjectId) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.object_path(kind, id)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn contains(&self, kind: ObjectKind, id: &ObjectId) -> Result<bool, StoreError> {
        Ok(self.object_path(kind, id).is_file())
    }

    fn list(&self, kind: ObjectKind) -> Result<Vec<ObjectId>, StoreError> {
        let dir = self.kind_dir(kind);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if let Ok(id) = ObjectId::new(name) {
                    ids.push(id);
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Replace `path` with `bytes` atomically.
///
/// Creates parent directories if needed. The content is written to a sibling
/// temp file, synced, then renamed over the destination, so readers see
/// either the old or the new file, never a partial one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)
}
