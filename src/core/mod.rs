//! core
//!
//! Core domain types, storage, and operations for Gitlet.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ObjectId, BranchName, CommitTime, DateOffset
//! - [`error`] - User and internal error classes
//! - [`paths`] - Centralized path routing for `.gitlet` storage
//! - [`config`] - Configuration schema and loading
//! - [`store`] - Content-addressed object store and its backends
//! - [`commit`] - Immutable commit values and trees
//! - [`staging`] - Pending additions and removals
//! - [`branches`] - Branch table and current branch
//! - [`graph`] - Ancestry queries and split point search
//! - [`merge`] - Three-way classification and conflict rendering
//! - [`worktree`] - Working directory access
//! - [`status`] - The status report
//! - [`repository`] - Lifecycle operations over all of the above
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Persisted schemas are strict (`deny_unknown_fields`)
//! - Every decision in [`merge`] and [`graph`] is deterministic

pub mod branches;
pub mod commit;
pub mod config;
pub mod error;
pub mod graph;
pub mod merge;
pub mod paths;
pub mod repository;
pub mod staging;
pub mod status;
pub mod store;
pub mod types;
pub mod worktree;
