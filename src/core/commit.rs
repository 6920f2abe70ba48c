//! core::commit
//!
//! Immutable commit values.
//!
//! # Invariants
//!
//! - A commit owns its [`Tree`]; building a child clones the parent's tree,
//!   so no two commits ever share map storage
//! - Only the root commit has no `parent1`
//! - Only merge commits have a `parent2`
//! - Identity is the digest of the canonical JSON encoding; `BTreeMap` keeps
//!   key order deterministic
//!
//! # Example
//!
//! ```
//! use gitlet::core::commit::{Commit, Tree};
//! use gitlet::core::types::{CommitTime, ObjectId};
//!
//! let root = Commit::root();
//! let root_id = root.id().unwrap();
//!
//! let mut tree = root.tree().clone();
//! tree.insert("a.txt".into(), ObjectId::for_bytes(b"x"));
//! let child = Commit::new("first", root_id.clone(), tree, CommitTime::now());
//!
//! assert!(root.tree().is_empty());
//! assert_eq!(child.parent1(), Some(&root_id));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{CommitTime, ObjectId};

/// Message of the commit created by `init`.
pub const INITIAL_MESSAGE: &str = "initial commit";

/// Mapping from working-directory path to blob digest.
pub type Tree = BTreeMap<String, ObjectId>;

/// An immutable snapshot of the tracked files plus history links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Commit {
    message: String,
    timestamp: CommitTime,
    parent1: Option<ObjectId>,
    parent2: Option<ObjectId>,
    tree: Tree,
}

impl Commit {
    /// The root commit: no parents, empty tree, epoch timestamp.
    pub fn root() -> Self {
        Self {
            message: INITIAL_MESSAGE.to_string(),
            timestamp: CommitTime::epoch(),
            parent1: None,
            parent2: None,
            tree: Tree::new(),
        }
    }

    /// An ordinary single-parent commit.
    pub fn new(
        message: impl Into<String>,
        parent: ObjectId,
        tree: Tree,
        timestamp: CommitTime,
    ) -> Self {
        Self {
            message: message.into(),
            timestamp,
            parent1: Some(parent),
            parent2: None,
            tree,
        }
    }

    /// A two-parent merge commit.
    pub fn merge(
        message: impl Into<String>,
        current: ObjectId,
        other: ObjectId,
        tree: Tree,
        timestamp: CommitTime,
    ) -> Self {
        Self {
            message: message.into(),
            timestamp,
            parent1: Some(current),
            parent2: Some(other),
            tree,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> CommitTime {
        self.timestamp
    }

    pub fn parent1(&self) -> Option<&ObjectId> {
        self.parent1.as_ref()
    }

    pub fn parent2(&self) -> Option<&ObjectId> {
        self.parent2.as_ref()
    }

    /// Both parent links, first parent first.
    pub fn parents(&self) -> impl Iterator<Item = &ObjectId> {
        self.parent1.iter().chain(self.parent2.iter())
    }

    pub fn is_merge(&self) -> bool {
        self.parent2.is_some()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Blob digest tracked for `path`, if any.
    pub fn blob_for(&self, path: &str) -> Option<&ObjectId> {
        self.tree.get(path)
    }

    /// Whether `path` is tracked by this commit.
    pub fn tracks(&self, path: &str) -> bool {
        self.tree.contains_key(path)
    }

    /// Canonical serialized form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode from the canonical serialized form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Content digest of the serialized form.
    pub fn id(&self) -> Result<ObjectId, serde_json::Error> {
        Ok(ObjectId::for_bytes(&self.to_bytes()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(secs: i64) -> CommitTime {
        CommitTime::from_datetime(Utc.timestamp_opt(secs, 0).unwrap())
    }

    fn blob(content: &str) -> ObjectId {
        ObjectId::for_bytes(content.as_bytes())
    }

    #[test]
    fn root_commit_shape() {
        let root = Commit::root();
        assert_eq!(root.message(), INITIAL_MESSAGE);
        assert!(root.parent1().is_none());
        assert!(root.parent2().is_none());
        assert!(root.tree().is_empty());
        assert_eq!(root.timestamp(), CommitTime::epoch());
    }

    #[test]
    fn root_commit_id_is_stable() {
        assert_eq!(Commit::root().id().unwrap(), Commit::root().id().unwrap());
    }

    #[test]
    fn child_tree_is_independent_of_parent() {
        let mut parent_tree = Tree::new();
        parent_tree.insert("a.txt".into(), blob("a"));
        let parent = Commit::new("p", Commit::root().id().unwrap(), parent_tree, at(1));

        let mut child_tree = parent.tree().clone();
        child_tree.insert("b.txt".into(), blob("b"));
        child_tree.remove("a.txt");
        let child = Commit::new("c", parent.id().unwrap(), child_tree, at(2));

        assert!(parent.tracks("a.txt"));
        assert!(!parent.tracks("b.txt"));
        assert!(child.tracks("b.txt"));
        assert!(!child.tracks("a.txt"));
    }

    #[test]
    fn merge_commit_has_two_parents() {
        let a = blob("p1");
        let b = blob("p2");
        let merge = Commit::merge("m", a.clone(), b.clone(), Tree::new(), at(5));
        assert!(merge.is_merge());
        let parents: Vec<_> = merge.parents().cloned().collect();
        assert_eq!(parents, vec![a, b]);
    }

    #[test]
    fn bytes_roundtrip_preserves_identity() {
        let mut tree = Tree::new();
        tree.insert("z.txt".into(), blob("z"));
        tree.insert("a.txt".into(), blob("a"));
        let commit = Commit::new("msg", blob("parent"), tree, at(42));

        let bytes = commit.to_bytes().unwrap();
        let decoded = Commit::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, commit);
        assert_eq!(decoded.id().unwrap(), commit.id().unwrap());
    }

    #[test]
    fn different_messages_have_different_ids() {
        let a = Commit::new("one", blob("p"), Tree::new(), at(1));
        let b = Commit::new("two", blob("p"), Tree::new(), at(1));
        assert_ne!(a.id().unwrap(), b.id().unwrap());
    }

    #[test]
    fn unknown_fields_rejected() {
        let json = br#"{"message":"m","timestamp":"1970-01-01T00:00:00Z","parent1":null,"parent2":null,"tree":{},"extra":1}"#;
        assert!(Commit::from_bytes(json).is_err());
    }
}
