//! core::repository
//!
//! The repository: object store, session state and working directory, plus
//! every lifecycle operation.
//!
//! # Transactions
//!
//! Each mutating operation validates first, then works on a copy of the
//! session state, and finally persists that copy with one atomic write. A
//! failed operation leaves both the persisted and the in-memory state
//! untouched.
//!
//! # Example
//!
//! ```
//! use gitlet::core::config::Config;
//! use gitlet::core::repository::Repository;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut repo = Repository::init(dir.path(), &Config::default()).unwrap();
//!
//! std::fs::write(dir.path().join("a.txt"), "x").unwrap();
//! repo.add("a.txt").unwrap();
//! repo.commit("first").unwrap();
//!
//! let log = repo.log().unwrap();
//! assert_eq!(log.len(), 2);
//! assert_eq!(log[1].commit.message(), "initial commit");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::branches::BranchTable;
use crate::core::commit::{Commit, Tree};
use crate::core::config::{Config, RepoConfig};
use crate::core::error::{InternalError, RepoResult, UserError};
use crate::core::graph::CommitGraph;
use crate::core::merge::{merge_message, render_conflict, MergeAction, MergeOutcome, MergePlan};
use crate::core::paths::RepoPaths;
use crate::core::staging::StagingArea;
use crate::core::status::StatusReport;
use crate::core::store::{write_atomic, FsBackend, ObjectStore};
use crate::core::types::{BranchName, CommitTime, DateOffset, ObjectId, SHORT_ID_LEN};
use crate::core::worktree::WorkTree;

/// The persisted session: branch table (including the current branch) and
/// staging area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionState {
    pub branches: BranchTable,
    pub staging: StagingArea,
}

/// One commit as shown by `log` and `global-log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: ObjectId,
    pub commit: Commit,
}

impl LogEntry {
    /// Render with the commit date shown in `offset`.
    pub fn display(&self, offset: DateOffset) -> LogEntryDisplay<'_> {
        LogEntryDisplay {
            entry: self,
            offset,
        }
    }
}

/// [`fmt::Display`] adapter returned by [`LogEntry::display`].
pub struct LogEntryDisplay<'a> {
    entry: &'a LogEntry,
    offset: DateOffset,
}

impl fmt::Display for LogEntryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let commit = &self.entry.commit;
        writeln!(f, "===")?;
        writeln!(f, "commit {}", self.entry.id)?;
        writeln!(f, "Date: {}", commit.timestamp().format_in(self.offset))?;
        writeln!(f, "{}", commit.message())?;
        writeln!(f)
    }
}

/// An opened repository.
#[derive(Debug)]
pub struct Repository {
    paths: RepoPaths,
    store: ObjectStore<FsBackend>,
    worktree: WorkTree,
    state: SessionState,
    date_offset: DateOffset,
}

impl Repository {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create a repository in `work_dir` with a root commit on the configured
    /// default branch.
    ///
    /// # Errors
    ///
    /// `UserError::AlreadyInitialized` if `.gitlet` already exists.
    pub fn init(work_dir: impl Into<PathBuf>, config: &Config) -> RepoResult<Repository> {
        let paths = RepoPaths::new(work_dir.into());
        if paths.is_initialized() {
            return Err(UserError::AlreadyInitialized.into());
        }
        let branch = config.default_branch()?;
        let date_offset = config.date_offset();

        paths
            .ensure_dirs()
            .map_err(|e| InternalError::io(paths.repo_dir(), e))?;
        let store = ObjectStore::new(FsBackend::new(paths.objects_dir()));
        let root = store.put_commit(&Commit::root())?;

        Config::write_repo(
            &paths,
            &RepoConfig {
                date_offset: Some(date_offset.to_string()),
            },
        )?;

        let state = SessionState {
            branches: BranchTable::new(branch.clone(), root.clone()),
            staging: StagingArea::new(),
        };
        write_state(&paths, &state)?;

        debug!(%branch, root = %root.short(SHORT_ID_LEN), "initialized repository");
        Ok(Repository {
            worktree: WorkTree::new(&paths),
            paths,
            store,
            state,
            date_offset,
        })
    }

    /// Open the repository rooted exactly at `work_dir`.
    ///
    /// # Errors
    ///
    /// `UserError::NotInitialized` if there is no `.gitlet` directory.
    pub fn open(work_dir: impl Into<PathBuf>) -> RepoResult<Repository> {
        let paths = RepoPaths::new(work_dir.into());
        if !paths.is_initialized() {
            return Err(UserError::NotInitialized.into());
        }
        let config = Config::load(Some(&paths))?;
        let state = read_state(&paths)?;

        Ok(Repository {
            store: ObjectStore::new(FsBackend::new(paths.objects_dir())),
            worktree: WorkTree::new(&paths),
            paths,
            state,
            date_offset: config.date_offset(),
        })
    }

    /// Override the offset used to render dates.
    pub fn with_date_offset(mut self, offset: DateOffset) -> Self {
        self.date_offset = offset;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn paths(&self) -> &RepoPaths {
        &self.paths
    }

    pub fn store(&self) -> &ObjectStore<FsBackend> {
        &self.store
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn date_offset(&self) -> DateOffset {
        self.date_offset
    }

    pub fn current_branch(&self) -> &BranchName {
        self.state.branches.current()
    }

    pub fn current_tip(&self) -> &ObjectId {
        self.state.branches.current_tip()
    }

    /// The commit the current branch points at.
    pub fn head_commit(&self) -> RepoResult<Commit> {
        Ok(self.store.get_commit(self.current_tip())?)
    }

    // =========================================================================
    // Staging and committing
    // =========================================================================

    /// Stage the working copy of `path`.
    ///
    /// Any pending removal of `path` is cancelled. If the contents match the
    /// current tip, any staged addition is dropped instead.
    pub fn add(&mut self, path: &str) -> RepoResult<()> {
        let rel = WorkTree::normalize(path)?;
        let bytes = self.worktree.read(&rel)?.ok_or(UserError::FileNotFound)?;
        let blob = ObjectId::for_bytes(&bytes);
        let head = self.head_commit()?;

        let mut state = self.state.clone();
        state.staging.unstage_removal(&rel);
        if head.blob_for(&rel) == Some(&blob) {
            state.staging.unstage_addition(&rel);
            debug!(path = %rel, "working copy matches tip; nothing staged");
        } else {
            self.store.put_blob(&bytes)?;
            state.staging.stage_addition(rel.clone(), blob.clone());
            debug!(path = %rel, blob = %blob.short(SHORT_ID_LEN), "staged for addition");
        }
        self.save(state)
    }

    /// Record the staging area as a new commit on the current branch.
    pub fn commit(&mut self, message: &str) -> RepoResult<ObjectId> {
        if message.trim().is_empty() {
            return Err(UserError::EmptyMessage.into());
        }
        if self.state.staging.is_empty() {
            return Err(UserError::NothingToCommit.into());
        }

        let parent = self.current_tip().clone();
        let head = self.store.get_commit(&parent)?;
        let tree = self.state.staging.apply(head.tree());
        let commit = Commit::new(message, parent, tree, CommitTime::now());
        let id = self.store.put_commit(&commit)?;

        let mut state = self.state.clone();
        state.branches.set_current_tip(id.clone());
        state.staging.clear();
        self.save(state)?;

        debug!(
            branch = %self.current_branch(),
            commit = %id.short(SHORT_ID_LEN),
            files = commit.tree().len(),
            "committed"
        );
        Ok(id)
    }

    /// Unstage `path`, and if the tip tracks it, stage its removal and delete
    /// the working copy.
    pub fn rm(&mut self, path: &str) -> RepoResult<()> {
        let rel = WorkTree::normalize(path)?;
        let head = self.head_commit()?;
        let tracked = head.blob_for(&rel).cloned();

        if !self.state.staging.is_staged_for_addition(&rel) && tracked.is_none() {
            return Err(UserError::NothingToRemove.into());
        }

        let mut state = self.state.clone();
        state.staging.unstage_addition(&rel);
        if let Some(blob) = tracked {
            state.staging.stage_removal(rel.clone(), blob);
            self.worktree.remove(&rel)?;
            debug!(path = %rel, "staged for removal");
        }
        self.save(state)
    }

    // =========================================================================
    // History
    // =========================================================================

    /// The current branch's first-parent history, newest first.
    pub fn log(&self) -> RepoResult<Vec<LogEntry>> {
        let history = CommitGraph::new(&self.store).first_parent_history(self.current_tip())?;
        Ok(history
            .into_iter()
            .map(|(id, commit)| LogEntry { id, commit })
            .collect())
    }

    /// Every stored commit, ordered by id.
    pub fn global_log(&self) -> RepoResult<Vec<LogEntry>> {
        self.store
            .commit_ids()?
            .into_iter()
            .map(|id| -> RepoResult<LogEntry> {
                let commit = self.store.get_commit(&id)?;
                Ok(LogEntry { id, commit })
            })
            .collect()
    }

    /// Ids of every commit whose message is exactly `message`.
    pub fn find(&self, message: &str) -> RepoResult<Vec<ObjectId>> {
        let found: Vec<ObjectId> = self
            .global_log()?
            .into_iter()
            .filter(|entry| entry.commit.message() == message)
            .map(|entry| entry.id)
            .collect();

        if found.is_empty() {
            return Err(UserError::NoCommitWithMessage.into());
        }
        Ok(found)
    }

    /// Branches, staging area and differences between tip, staging and disk.
    pub fn status(&self) -> RepoResult<StatusReport> {
        let head = self.head_commit()?;
        let mut working = BTreeMap::new();
        for rel in self.worktree.list_files()? {
            if let Some(bytes) = self.worktree.read(&rel)? {
                working.insert(rel, ObjectId::for_bytes(&bytes));
            }
        }

        Ok(StatusReport::build(
            &self.state.branches,
            &self.state.staging,
            head.tree(),
            &working,
        ))
    }

    // =========================================================================
    // Checkout, branches, reset
    // =========================================================================

    /// Overwrite the working copy of `path` with its version in a commit.
    ///
    /// `commit` is a full or 8-character id; `None` means the current tip.
    pub fn checkout_file(&self, commit: Option<&str>, path: &str) -> RepoResult<()> {
        let id = match commit {
            Some(reference) => self.resolve(reference)?,
            None => self.current_tip().clone(),
        };
        let rel = WorkTree::normalize(path)?;
        let commit = self.store.get_commit(&id)?;
        let blob = commit.blob_for(&rel).ok_or(UserError::FileNotInCommit)?;
        let bytes = self.store.get_blob(blob)?;
        self.worktree.write(&rel, &bytes)?;

        debug!(path = %rel, commit = %id.short(SHORT_ID_LEN), "checked out file");
        Ok(())
    }

    /// Switch to another branch, replacing the working files with its tip's.
    pub fn checkout_branch(&mut self, name: &str) -> RepoResult<()> {
        let name = BranchName::new(name).map_err(|_| UserError::NoSuchBranch)?;
        let target_id = self
            .state
            .branches
            .get(&name)
            .cloned()
            .ok_or(UserError::NoSuchBranch)?;
        if &name == self.current_branch() {
            return Err(UserError::AlreadyOnBranch.into());
        }

        let head = self.head_commit()?;
        let target = self.store.get_commit(&target_id)?;
        self.guard_untracked(head.tree(), target.tree())?;
        self.replace_tracked_files(head.tree(), target.tree())?;

        let mut state = self.state.clone();
        state.branches.switch(&name)?;
        state.staging.clear();
        self.save(state)?;

        debug!(branch = %name, tip = %target_id.short(SHORT_ID_LEN), "switched branch");
        Ok(())
    }

    /// Create a branch at the current tip without switching to it.
    pub fn branch(&mut self, name: &str) -> RepoResult<()> {
        let name =
            BranchName::new(name).map_err(|e| UserError::InvalidBranchName(e.to_string()))?;
        let tip = self.current_tip().clone();

        let mut state = self.state.clone();
        state.branches.create(name.clone(), tip)?;
        self.save(state)?;

        debug!(branch = %name, "created branch");
        Ok(())
    }

    /// Delete a branch pointer. Its commits stay in the store.
    pub fn rm_branch(&mut self, name: &str) -> RepoResult<()> {
        let name = BranchName::new(name).map_err(|_| UserError::BranchDoesNotExist)?;

        let mut state = self.state.clone();
        state.branches.remove(&name)?;
        self.save(state)?;

        debug!(branch = %name, "removed branch");
        Ok(())
    }

    /// Move the current branch to a commit and restore its files.
    pub fn reset(&mut self, commit: &str) -> RepoResult<ObjectId> {
        let target_id = self.resolve(commit)?;
        let head = self.head_commit()?;
        let target = self.store.get_commit(&target_id)?;
        self.guard_untracked(head.tree(), target.tree())?;
        self.replace_tracked_files(head.tree(), target.tree())?;

        let mut state = self.state.clone();
        state.branches.set_current_tip(target_id.clone());
        state.staging.clear();
        self.save(state)?;

        debug!(
            branch = %self.current_branch(),
            tip = %target_id.short(SHORT_ID_LEN),
            "reset branch"
        );
        Ok(target_id)
    }

    // =========================================================================
    // Merge
    // =========================================================================

    /// Merge branch `other` into the current branch.
    ///
    /// Conflicts do not fail the merge; they are listed in the outcome.
    pub fn merge(&mut self, other: &str) -> RepoResult<MergeOutcome> {
        if !self.state.staging.is_empty() {
            return Err(UserError::UncommittedChanges.into());
        }
        let other_name = BranchName::new(other).map_err(|_| UserError::BranchDoesNotExist)?;
        let other_id = self
            .state
            .branches
            .get(&other_name)
            .cloned()
            .ok_or(UserError::BranchDoesNotExist)?;
        if &other_name == self.current_branch() {
            return Err(UserError::MergeWithSelf.into());
        }

        let current_id = self.current_tip().clone();
        let current = self.store.get_commit(&current_id)?;
        let theirs = self.store.get_commit(&other_id)?;
        self.guard_untracked(current.tree(), theirs.tree())?;

        let graph = CommitGraph::new(&self.store);
        if graph.is_ancestor(&other_id, &current_id)? {
            info!(branch = %other_name, "merge: already up to date");
            return Ok(MergeOutcome::UpToDate);
        }
        if graph.is_ancestor(&current_id, &other_id)? {
            self.replace_tracked_files(current.tree(), theirs.tree())?;
            let mut state = self.state.clone();
            state.branches.set_current_tip(other_id.clone());
            self.save(state)?;

            info!(
                branch = %other_name,
                to = %other_id.short(SHORT_ID_LEN),
                "merge: fast-forwarded"
            );
            return Ok(MergeOutcome::FastForward { to: other_id });
        }

        let split_id = graph.split_point(&current_id, &other_id)?.ok_or_else(|| {
            InternalError::Corrupt(format!(
                "commits {current_id} and {other_id} share no ancestor"
            ))
        })?;
        let split = self.store.get_commit(&split_id)?;
        let plan = MergePlan::build(split.tree(), current.tree(), theirs.tree());
        debug!(
            split = %split_id.short(SHORT_ID_LEN),
            changes = plan.changes().len(),
            "merge plan"
        );

        // Read every blob the plan needs before touching the working directory.
        let mut writes: Vec<(String, Vec<u8>)> = Vec::new();
        for change in plan.changes() {
            match change.action {
                MergeAction::TakeOther => {
                    if let Some(blob) = &change.other {
                        writes.push((change.path.clone(), self.store.get_blob(blob)?));
                    }
                }
                MergeAction::Conflict => {
                    let ours = self.blob_or_empty(change.current.as_ref())?;
                    let incoming = self.blob_or_empty(change.other.as_ref())?;
                    writes.push((change.path.clone(), render_conflict(&ours, &incoming)));
                }
                MergeAction::Remove | MergeAction::Keep => {}
            }
        }

        let mut state = self.state.clone();
        for (path, bytes) in &writes {
            let blob = self.store.put_blob(bytes)?;
            self.worktree.write(path, bytes)?;
            state.staging.stage_addition(path.clone(), blob);
        }
        for change in plan.changes() {
            if change.action == MergeAction::Remove {
                if let Some(blob) = &change.current {
                    self.worktree.remove(&change.path)?;
                    state.staging.stage_removal(change.path.clone(), blob.clone());
                }
            }
        }

        let tree = state.staging.apply(current.tree());
        let message = merge_message(other_name.as_str(), self.current_branch().as_str());
        let commit = Commit::merge(message, current_id, other_id, tree, CommitTime::now());
        let commit_id = self.store.put_commit(&commit)?;
        state.branches.set_current_tip(commit_id.clone());
        state.staging.clear();
        self.save(state)?;

        let conflicts: Vec<String> = plan.conflicts().map(str::to_owned).collect();
        if conflicts.is_empty() {
            info!(branch = %other_name, commit = %commit_id.short(SHORT_ID_LEN), "merged");
        } else {
            info!(
                branch = %other_name,
                commit = %commit_id.short(SHORT_ID_LEN),
                conflicts = conflicts.len(),
                "merged with conflicts"
            );
        }
        Ok(MergeOutcome::Merged {
            commit: commit_id,
            conflicts,
        })
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn resolve(&self, reference: &str) -> RepoResult<ObjectId> {
        Ok(self
            .store
            .resolve_commit(reference)?
            .ok_or(UserError::CommitNotFound)?)
    }

    fn blob_or_empty(&self, blob: Option<&ObjectId>) -> RepoResult<Vec<u8>> {
        match blob {
            Some(id) => Ok(self.store.get_blob(id)?),
            None => Ok(Vec::new()),
        }
    }

    /// Fail if writing `target` would clobber a file the current tip does not
    /// track and that is not staged.
    ///
    /// Besides the target paths themselves, a file sitting where a target
    /// needs a directory, or a directory sitting where a target needs a file,
    /// is in the way unless [`Self::replace_tracked_files`] deletes it first.
    fn guard_untracked(&self, current: &Tree, target: &Tree) -> RepoResult<()> {
        let removed_first =
            |path: &str| current.contains_key(path) && !target.contains_key(path);

        for path in target.keys() {
            let clobbered = !current.contains_key(path)
                && !self.state.staging.is_staged_for_addition(path)
                && self.worktree.exists(path);
            let blocker = if clobbered {
                Some(path.clone())
            } else {
                self.worktree
                    .file_ancestors(path)
                    .into_iter()
                    .chain(self.worktree.files_under(path)?)
                    .find(|p| !removed_first(p.as_str()))
            };

            if let Some(blocker) = blocker {
                debug!(path = %path, blocker = %blocker, "untracked file in the way");
                return Err(UserError::UntrackedFileConflict.into());
            }
        }
        Ok(())
    }

    /// Delete files only `current` tracks and write every file `target` tracks.
    fn replace_tracked_files(&self, current: &Tree, target: &Tree) -> RepoResult<()> {
        let mut contents = Vec::with_capacity(target.len());
        for (path, blob) in target {
            contents.push((path, self.store.get_blob(blob)?));
        }

        for path in current.keys().filter(|p| !target.contains_key(*p)) {
            self.worktree.remove(path)?;
        }
        for (path, bytes) in contents {
            self.worktree.write(path, &bytes)?;
        }
        Ok(())
    }

    /// Persist `state`, then adopt it.
    fn save(&mut self, state: SessionState) -> RepoResult<()> {
        write_state(&self.paths, &state)?;
        self.state = state;
        Ok(())
    }
}

fn write_state(paths: &RepoPaths, state: &SessionState) -> Result<(), InternalError> {
    let bytes = serde_json::to_vec_pretty(state).map_err(|source| InternalError::Serialize {
        what: "session state",
        source,
    })?;
    let path = paths.state_path();
    write_atomic(&path, &bytes).map_err(|e| InternalError::io(path, e))
}

fn read_state(paths: &RepoPaths) -> Result<SessionState, InternalError> {
    let path = paths.state_path();
    let bytes = fs::read(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            InternalError::Corrupt(format!("missing session state at '{}'", path.display()))
        }
        _ => InternalError::io(&path, e),
    })?;

    let state: SessionState = serde_json::from_slice(&bytes)
        .map_err(|e| InternalError::Corrupt(format!("session state: {e}")))?;
    if !state.branches.is_consistent() {
        return Err(InternalError::Corrupt(format!(
            "current branch '{}' has no tip",
            state.branches.current()
        )));
    }
    Ok(state)
}
