//! core::error
//!
//! Error classes for repository operations.
//!
//! # Classes
//!
//! - [`UserError`] - Expected, recoverable conditions caused by the request
//!   or the working directory. The operation performed no mutation and the
//!   message is shown as-is.
//! - [`InternalError`] - Storage corruption, missing objects, serialization
//!   and I/O failures. These are fatal and reported differently.
//!
//! [`RepoError`] unifies both so every operation returns a single type, while
//! [`RepoError::is_user`] lets the caller decide how to surface it.
//!
//! Merge conflicts are not errors; see [`crate::core::merge::MergeOutcome`].

use std::path::PathBuf;

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::store::StoreError;
use crate::core::types::{ObjectId, TypeError};

/// Conditions the user can fix. Messages are part of the console contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("No commit with that id exists.")]
    CommitNotFound,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("A branch with that name does not exist.")]
    BranchDoesNotExist,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,

    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Failures that indicate a broken repository or environment.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("object store error: {0}")]
    Store(#[from] StoreError),

    #[error("referenced object {id} is missing from the store")]
    MissingObject { id: ObjectId },

    #[error("repository data is corrupt: {0}")]
    Corrupt(String),

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        source: serde_json::Error,
    },

    #[error("i/o error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("type validation failed: {0}")]
    Type(#[from] TypeError),
}

impl InternalError {
    /// Build an I/O error tagged with the path that failed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InternalError::Io {
            path: path.into(),
            source,
        }
    }
}

/// The error type of every repository operation.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl RepoError {
    /// True for expected conditions that should be reported as a plain message.
    pub fn is_user(&self) -> bool {
        matches!(self, RepoError::User(_))
    }

    /// The user error, if this is one.
    pub fn as_user(&self) -> Option<&UserError> {
        match self {
            RepoError::User(e) => Some(e),
            RepoError::Internal(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(e: StoreError) -> Self {
        // Every id the repository asks for is referenced by a tip or a commit.
        match e {
            StoreError::NotFound { id, .. } => {
                RepoError::Internal(InternalError::MissingObject { id })
            }
            other => RepoError::Internal(InternalError::Store(other)),
        }
    }
}

impl From<ConfigError> for RepoError {
    fn from(e: ConfigError) -> Self {
        RepoError::Internal(InternalError::Config(e))
    }
}

/// Result alias for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_exact() {
        assert_eq!(UserError::FileNotFound.to_string(), "File does not exist.");
        assert_eq!(
            UserError::CommitNotFound.to_string(),
            "No commit with that id exists."
        );
        assert_eq!(
            UserError::UntrackedFileConflict.to_string(),
            "There is an untracked file in the way; delete it, or add and commit it first."
        );
        assert_eq!(
            UserError::NothingToCommit.to_string(),
            "No changes added to the commit."
        );
    }

    #[test]
    fn classes_are_distinguishable() {
        let user: RepoError = UserError::NoSuchBranch.into();
        assert!(user.is_user());
        assert_eq!(user.as_user(), Some(&UserError::NoSuchBranch));

        let internal: RepoError = InternalError::Corrupt("bad".into()).into();
        assert!(!internal.is_user());
        assert!(internal.as_user().is_none());
        assert!(internal.to_string().contains("corrupt"));
    }

    #[test]
    fn missing_store_object_is_reported_as_missing() {
        let id = ObjectId::for_bytes(b"x");
        let err: RepoError = StoreError::NotFound {
            kind: crate::core::store::ObjectKind::Blob,
            id: id.clone(),
        }
        .into();
        assert!(matches!(
            err,
            RepoError::Internal(InternalError::MissingObject { id: missing }) if missing == id
        ));
    }

    #[test]
    fn transparent_display() {
        let err: RepoError = UserError::MergeWithSelf.into();
        assert_eq!(err.to_string(), "Cannot merge a branch with itself.");
    }
}
