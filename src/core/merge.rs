//! core::merge
//!
//! Three-way merge classification and conflict rendering.
//!
//! # Classification
//!
//! For each path in the union of the split-point, current and other trees,
//! with `s`, `c`, `o` its digest in each (absent is `None`):
//!
//! | Condition                   | Action                                  |
//! |-----------------------------|-----------------------------------------|
//! | `c == o`                    | [`MergeAction::Keep`]                   |
//! | `c == s`, `o` present       | [`MergeAction::TakeOther`]              |
//! | `c == s`, `o` absent        | [`MergeAction::Remove`]                 |
//! | `o == s`                    | [`MergeAction::Keep`]                   |
//! | anything else               | [`MergeAction::Conflict`]               |
//!
//! The table covers both "added only on one side" rows: a file added only by
//! the other branch has `c == s == None` and is taken, a file added only on
//! the current branch has `o == s == None` and is kept.
//!
//! The whole plan is computed before any file is touched.

use std::collections::BTreeSet;

use crate::core::commit::Tree;
use crate::core::types::ObjectId;

/// What to do with one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    /// Leave the current version (or absence) as it is.
    Keep,
    /// Check out the other branch's version and stage it.
    TakeOther,
    /// Delete the working file and stage its removal.
    Remove,
    /// Write conflict markers and stage the result.
    Conflict,
}

/// Classify one path from its digests at the split point, current and other tips.
pub fn classify(s: Option<&ObjectId>, c: Option<&ObjectId>, o: Option<&ObjectId>) -> MergeAction {
    if c == o {
        MergeAction::Keep
    } else if c == s {
        if o.is_some() {
            MergeAction::TakeOther
        } else {
            MergeAction::Remove
        }
    } else if o == s {
        MergeAction::Keep
    } else {
        MergeAction::Conflict
    }
}

/// One planned step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChange {
    pub path: String,
    pub action: MergeAction,
    /// Digest in the current tree.
    pub current: Option<ObjectId>,
    /// Digest in the other tree.
    pub other: Option<ObjectId>,
}

/// Every non-trivial change a merge will make, in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    changes: Vec<PlannedChange>,
}

impl MergePlan {
    /// Classify every path tracked by any of the three trees.
    ///
    /// Paths classified [`MergeAction::Keep`] are dropped from the plan.
    pub fn build(split: &Tree, current: &Tree, other: &Tree) -> Self {
        let paths: BTreeSet<&String> = split
            .keys()
            .chain(current.keys())
            .chain(other.keys())
            .collect();

        let changes = paths
            .into_iter()
            .filter_map(|path| {
                let c = current.get(path);
                let o = other.get(path);
                match classify(split.get(path), c, o) {
                    MergeAction::Keep => None,
                    action => Some(PlannedChange {
                        path: path.clone(),
                        action,
                        current: c.cloned(),
                        other: o.cloned(),
                    }),
                }
            })
            .collect();

        Self { changes }
    }

    pub fn changes(&self) -> &[PlannedChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Paths that will end up in conflict.
    pub fn conflicts(&self) -> impl Iterator<Item = &str> {
        self.changes
            .iter()
            .filter(|c| c.action == MergeAction::Conflict)
            .map(|c| c.path.as_str())
    }
}

/// Conflict file contents. A missing side renders as empty.
pub fn render_conflict(current: &[u8], other: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(current.len() + other.len() + 32);
    out.extend_from_slice(b"<<<<<<< HEAD\n");
    out.extend_from_slice(current);
    out.extend_from_slice(b"=======\n");
    out.extend_from_slice(other);
    out.extend_from_slice(b">>>>>>>\n");
    out
}

/// Message recorded on a merge commit.
pub fn merge_message(other: &str, current: &str) -> String {
    format!("Merged {other} into {current}.")
}

/// Result of a merge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The other tip is already an ancestor of the current tip; nothing changed.
    UpToDate,
    /// The current branch moved forward to the other tip without a new commit.
    FastForward { to: ObjectId },
    /// A two-parent commit was created. `conflicts` lists paths written with
    /// conflict markers, sorted.
    Merged {
        commit: ObjectId,
        conflicts: Vec<String>,
    },
}

impl MergeOutcome {
    pub fn has_conflicts(&self) -> bool {
        matches!(self, MergeOutcome::Merged { conflicts, .. } if !conflicts.is_empty())
    }
}
