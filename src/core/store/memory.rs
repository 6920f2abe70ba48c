//! core::store::memory
//!
//! In-memory object backend for deterministic testing.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::traits::{ObjectBackend, ObjectKind, StoreError};
use crate::core::types::ObjectId;

/// In-memory backend.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<BTreeMap<(ObjectKind, ObjectId), Vec<u8>>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored objects across all kinds.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Overwrite an object's bytes, bypassing the write-once rule.
    ///
    /// Only useful for simulating corruption in tests.
    pub fn tamper(&self, kind: ObjectKind, id: &ObjectId, bytes: &[u8]) {
        self.lock().insert((kind, id.clone()), bytes.to_vec());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<(ObjectKind, ObjectId), Vec<u8>>> {
        // A poisoned map is still structurally valid.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ObjectBackend for MemoryBackend {
    fn write(&self, kind: ObjectKind, id: &ObjectId, bytes: &[u8]) -> Result<(), StoreError> {
        self.lock()
            .entry((kind, id.clone()))
            .or_insert_with(|| bytes.to_vec());
        Ok(())
    }

    fn read(&self, kind: ObjectKind, id: &ObjectId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.lock().get(&(kind, id.clone())).cloned())
    }

    fn contains(&self, kind: ObjectKind, id: &ObjectId) -> Result<bool, StoreError> {
        Ok(self.lock().contains_key(&(kind, id.clone())))
    }

    fn list(&self, kind: ObjectKind) -> Result<Vec<ObjectId>, StoreError> {
        Ok(self
            .lock()
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, id)| id.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let a = MemoryBackend::new();
        let b = a.clone();
        let id = ObjectId::for_bytes(b"x");

        a.write(ObjectKind::Blob, &id, b"x").unwrap();
        assert!(b.contains(ObjectKind::Blob, &id).unwrap());
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn list_filters_by_kind() {
        let backend = MemoryBackend::new();
        let blob = ObjectId::for_bytes(b"blob");
        let commit = ObjectId::for_bytes(b"commit");
        backend.write(ObjectKind::Blob, &blob, b"blob").unwrap();
        backend.write(ObjectKind::Commit, &commit, b"commit").unwrap();

        assert_eq!(backend.list(ObjectKind::Blob).unwrap(), vec![blob]);
        assert_eq!(backend.list(ObjectKind::Commit).unwrap(), vec![commit]);
    }
}
