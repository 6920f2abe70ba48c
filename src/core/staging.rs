//! core::staging
//!
//! The pending-change set between commits.
//!
//! # Invariants
//!
//! - A path is never pending in both `additions` and `removals`
//! - [`StagingArea::apply`] never mutates the tree it is given

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::commit::Tree;
use crate::core::types::ObjectId;

/// Staged additions and removals, keyed by working-directory path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StagingArea {
    additions: BTreeMap<String, ObjectId>,
    removals: BTreeMap<String, ObjectId>,
}

impl StagingArea {
    /// Create an empty staging area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `path` at `blob`, clearing any pending removal.
    pub fn stage_addition(&mut self, path: impl Into<String>, blob: ObjectId) {
        let path = path.into();
        self.removals.remove(&path);
        self.additions.insert(path, blob);
    }

    /// Stage the removal of `path`, recording the digest it was tracked at.
    pub fn stage_removal(&mut self, path: impl Into<String>, blob: ObjectId) {
        let path = path.into();
        self.additions.remove(&path);
        self.removals.insert(path, blob);
    }

    /// Drop a staged addition. Returns true if one existed.
    pub fn unstage_addition(&mut self, path: &str) -> bool {
        self.additions.remove(path).is_some()
    }

    /// Drop a staged removal. Returns true if one existed.
    pub fn unstage_removal(&mut self, path: &str) -> bool {
        self.removals.remove(path).is_some()
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeMap<String, ObjectId> {
        &self.removals
    }

    pub fn is_staged_for_addition(&self, path: &str) -> bool {
        self.additions.contains_key(path)
    }

    pub fn is_staged_for_removal(&self, path: &str) -> bool {
        self.removals.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    /// Build the tree of the next commit.
    ///
    /// Starts from a copy of `base`, overlays every addition, then drops every
    /// removal. The result shares no storage with `base`.
    pub fn apply(&self, base: &Tree) -> Tree {
        let mut tree = base.clone();
        for (path, blob) in &self.additions {
            tree.insert(path.clone(), blob.clone());
        }
        for path in self.removals.keys() {
            tree.remove(path);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(s: &str) -> ObjectId {
        ObjectId::for_bytes(s.as_bytes())
    }

    #[test]
    fn addition_clears_removal() {
        let mut staging = StagingArea::new();
        staging.stage_removal("a.txt", blob("old"));
        staging.stage_addition("a.txt", blob("new"));

        assert!(staging.is_staged_for_addition("a.txt"));
        assert!(!staging.is_staged_for_removal("a.txt"));
    }

    #[test]
    fn removal_clears_addition() {
        let mut staging = StagingArea::new();
        staging.stage_addition("a.txt", blob("new"));
        staging.stage_removal("a.txt", blob("old"));

        assert!(!staging.is_staged_for_addition("a.txt"));
        assert_eq!(staging.removals().get("a.txt"), Some(&blob("old")));
    }

    #[test]
    fn apply_overlays_then_removes() {
        let mut base = Tree::new();
        base.insert("keep.txt".into(), blob("k"));
        base.insert("change.txt".into(), blob("c1"));
        base.insert("gone.txt".into(), blob("g"));

        let mut staging = StagingArea::new();
        staging.stage_addition("change.txt", blob("c2"));
        staging.stage_addition("new.txt", blob("n"));
        staging.stage_removal("gone.txt", blob("g"));

        let tree = staging.apply(&base);
        assert_eq!(tree.get("keep.txt"), Some(&blob("k")));
        assert_eq!(tree.get("change.txt"), Some(&blob("c2")));
        assert_eq!(tree.get("new.txt"), Some(&blob("n")));
        assert!(!tree.contains_key("gone.txt"));

        // base untouched
        assert_eq!(base.get("change.txt"), Some(&blob("c1")));
        assert!(base.contains_key("gone.txt"));
    }

    #[test]
    fn clear_and_empty() {
        let mut staging = StagingArea::new();
        assert!(staging.is_empty());
        staging.stage_addition("a", blob("a"));
        assert!(!staging.is_empty());
        staging.clear();
        assert!(staging.is_empty());
    }

    #[test]
    fn unstage_reports_presence() {
        let mut staging = StagingArea::new();
        staging.stage_addition("a", blob("a"));
        assert!(staging.unstage_addition("a"));
        assert!(!staging.unstage_addition("a"));
        assert!(!staging.unstage_removal("a"));
    }
}
