//! core::paths
//!
//! Centralized path routing for repository storage.
//!
//! # Storage Layout
//!
//! All repository data lives under `<root>/.gitlet/`:
//! - `state.json` - Session state (current branch, branch table, staging area)
//! - `config.toml` - Repository configuration
//! - `objects/blobs/<id>` - File contents, keyed by digest
//! - `objects/commits/<id>` - Serialized commits, keyed by digest
//!
//! No code outside this module should compute `*.join(".gitlet")` paths.
//!
//! # Example
//!
//! ```
//! use gitlet::core::paths::RepoPaths;
//! use std::path::PathBuf;
//!
//! let paths = RepoPaths::new(PathBuf::from("/work"));
//! assert_eq!(paths.state_path(), PathBuf::from("/work/.gitlet/state.json"));
//! ```

use std::path::{Path, PathBuf};

/// Name of the repository directory inside the working tree.
pub const REPO_DIR_NAME: &str = ".gitlet";

/// Path routing for one working directory and its repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    /// The working directory whose files are tracked.
    pub work_dir: PathBuf,
}

impl RepoPaths {
    /// Create paths for the given working directory.
    pub fn new(work_dir: PathBuf) -> Self {
        Self { work_dir }
    }

    /// The working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// The `.gitlet` directory.
    pub fn repo_dir(&self) -> PathBuf {
        self.work_dir.join(REPO_DIR_NAME)
    }

    /// The persisted session state.
    pub fn state_path(&self) -> PathBuf {
        self.repo_dir().join("state.json")
    }

    /// Repository configuration.
    pub fn config_path(&self) -> PathBuf {
        self.repo_dir().join("config.toml")
    }

    /// Root of the object store.
    pub fn objects_dir(&self) -> PathBuf {
        self.repo_dir().join("objects")
    }

    /// Check whether a repository has been initialized here.
    pub fn is_initialized(&self) -> bool {
        self.repo_dir().is_dir()
    }

    /// Resolve a `/`-separated repository-relative path against the working
    /// directory.
    pub fn work_file(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .fold(self.work_dir.clone(), |acc, part| acc.join(part))
    }

    /// Create the repository directory structure.
    ///
    /// # Errors
    ///
    /// Returns an IO error if directory creation fails.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.repo_dir())?;
        std::fs::create_dir_all(self.objects_dir())?;
        Ok(())
    }
}
