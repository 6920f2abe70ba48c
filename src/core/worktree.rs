//! core::worktree
//!
//! Access to the working directory.
//!
//! Paths handed to and returned from this module are repository-relative and
//! `/`-separated, the same form used as tree keys. The `.gitlet` directory is
//! never listed, read, or written through here.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::core::error::{InternalError, UserError};
use crate::core::paths::{RepoPaths, REPO_DIR_NAME};

/// The working directory of one repository.
#[derive(Debug, Clone)]
pub struct WorkTree {
    paths: RepoPaths,
}

impl WorkTree {
    pub fn new(paths: &RepoPaths) -> Self {
        Self {
            paths: paths.clone(),
        }
    }

    /// Normalize a user-supplied path to the tree-key form.
    ///
    /// # Errors
    ///
    /// `UserError::InvalidPath` for empty, absolute, or escaping paths and
    /// for anything inside the repository directory.
    pub fn normalize(path: &str) -> Result<String, UserError> {
        let invalid = || UserError::InvalidPath(path.to_string());
        let mut parts = Vec::new();

        for component in Path::new(path).components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str().ok_or_else(invalid)?),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid())
                }
            }
        }

        match parts.first() {
            None => Err(invalid()),
            Some(&first) if first == REPO_DIR_NAME => Err(invalid()),
            Some(_) => Ok(parts.join("/")),
        }
    }

    fn root(&self) -> &Path {
        self.paths.work_dir()
    }

    fn abs(&self, rel: &str) -> PathBuf {
        self.paths.work_file(rel)
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.abs(rel).is_file()
    }

    /// Parent components of `rel` that exist on disk as files, nearest first.
    pub fn file_ancestors(&self, rel: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut end = rel.len();
        while let Some(slash) = rel[..end].rfind('/') {
            let ancestor = &rel[..slash];
            if self.abs(ancestor).is_file() {
                found.push(ancestor.to_string());
            }
            end = slash;
        }
        found
    }

    /// Files below `rel` when it is a directory on disk, sorted.
    pub fn files_under(&self, rel: &str) -> Result<Vec<String>, InternalError> {
        let dir = self.abs(rel);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        self.collect(&dir)
    }

    /// File contents, or `None` if the file does not exist.
    pub fn read(&self, rel: &str) -> Result<Option<Vec<u8>>, InternalError> {
        let path = self.abs(rel);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(InternalError::io(path, e)),
        }
    }

    /// Create or overwrite a file, creating parent directories as needed.
    pub fn write(&self, rel: &str, bytes: &[u8]) -> Result<(), InternalError> {
        let path = self.abs(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| InternalError::io(parent, e))?;
        }
        fs::write(&path, bytes).map_err(|e| InternalError::io(path, e))
    }

    /// Delete a file if present, then prune parent directories left empty.
    pub fn remove(&self, rel: &str) -> Result<(), InternalError> {
        let path = self.abs(rel);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(InternalError::io(path, e)),
        }

        let mut dir = path.parent();
        while let Some(d) = dir {
            if d == self.root() {
                break;
            }
            // Stops at the first non-empty directory.
            if fs::remove_dir(d).is_err() {
                break;
            }
            dir = d.parent();
        }
        Ok(())
    }

    /// Every regular file under the root, sorted, excluding `.gitlet`.
    pub fn list_files(&self) -> Result<Vec<String>, InternalError> {
        self.collect(self.root())
    }

    fn collect(&self, start: &Path) -> Result<Vec<String>, InternalError> {
        let root = self.root();
        let walker = WalkDir::new(start)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !(e.depth() == 1 && start == root && e.file_name() == OsStr::new(REPO_DIR_NAME))
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(start).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("filesystem loop"));
                InternalError::io(path, source)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(rel) = entry.path().strip_prefix(root) else {
                continue;
            };
            let parts: Option<Vec<&str>> = rel
                .components()
                .map(|c| c.as_os_str().to_str())
                .collect();
            match parts {
                Some(parts) => files.push(parts.join("/")),
                None => warn!(path = %entry.path().display(), "skipping non-UTF-8 path"),
            }
        }
        // Per-directory order differs from full-path order, e.g. "a-b/x" vs "a/x".
        files.sort();
        Ok(files)
    }
}
