//! core::status
//!
//! The `status` report.
//!
//! A report is a pure function of the branch table, the staging area, the
//! tip's tree and the digests of the files currently on disk. Every section
//! is sorted.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::core::branches::BranchTable;
use crate::core::commit::Tree;
use crate::core::staging::StagingArea;
use crate::core::types::{BranchName, ObjectId};

/// Kind of unstaged modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Modification {
    Modified,
    Deleted,
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modification::Modified => write!(f, "modified"),
            Modification::Deleted => write!(f, "deleted"),
        }
    }
}

/// Snapshot of repository status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub branches: Vec<BranchName>,
    pub current: BranchName,
    pub staged: Vec<String>,
    pub removed: Vec<String>,
    pub modifications: Vec<(String, Modification)>,
    pub untracked: Vec<String>,
}

impl StatusReport {
    /// Build a report.
    ///
    /// `working` maps every file on disk to the digest of its contents.
    pub fn build(
        branches: &BranchTable,
        staging: &StagingArea,
        tip: &Tree,
        working: &BTreeMap<String, ObjectId>,
    ) -> Self {
        let mut modifications = BTreeMap::new();

        for (path, tracked) in tip {
            if staging.is_staged_for_addition(path) || staging.is_staged_for_removal(path) {
                continue;
            }
            match working.get(path) {
                Some(on_disk) if on_disk != tracked => {
                    modifications.insert(path.clone(), Modification::Modified);
                }
                Some(_) => {}
                None => {
                    modifications.insert(path.clone(), Modification::Deleted);
                }
            }
        }

        for (path, staged) in staging.additions() {
            match working.get(path) {
                Some(on_disk) if on_disk != staged => {
                    modifications.insert(path.clone(), Modification::Modified);
                }
                Some(_) => {}
                None => {
                    modifications.insert(path.clone(), Modification::Deleted);
                }
            }
        }

        let untracked: BTreeSet<String> = working
            .keys()
            .filter(|path| {
                let tracked = tip.contains_key(*path) || staging.is_staged_for_addition(path);
                !tracked || staging.is_staged_for_removal(path)
            })
            .cloned()
            .collect();

        Self {
            branches: branches.names().cloned().collect(),
            current: branches.current().clone(),
            staged: staging.additions().keys().cloned().collect(),
            removed: staging.removals().keys().cloned().collect(),
            modifications: modifications.into_iter().collect(),
            untracked: untracked.into_iter().collect(),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current {
                writeln!(f, "*{branch}")?;
            } else {
                writeln!(f, "{branch}")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "=== Staged Files ===")?;
        for path in &self.staged {
            writeln!(f, "{path}")?;
        }
        writeln!(f)?;

        writeln!(f, "=== Removed Files ===")?;
        for path in &self.removed {
            writeln!(f, "{path}")?;
        }
        writeln!(f)?;

        writeln!(f, "=== Modifications Not Staged For Commit ===")?;
        for (path, kind) in &self.modifications {
            writeln!(f, "{path} ({kind})")?;
        }
        writeln!(f)?;

        writeln!(f, "=== Untracked Files ===")?;
        for path in &self.untracked {
            writeln!(f, "{path}")?;
        }
        writeln!(f)
    }
}
