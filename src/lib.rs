//! Gitlet - a small local version-control system
//!
//! Gitlet stores snapshots of a working directory as an immutable,
//! content-addressed commit graph, tracks named branches, and merges them
//! with a three-way merge that records conflicts in the affected files.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, calls the repository)
//! - [`core`] - Domain types, object store, commit graph, merge engine
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! Gitlet maintains the following invariants:
//!
//! 1. Stored objects are immutable and keyed by the digest of their bytes
//! 2. A commit's tree never shares storage with another commit's tree
//! 3. Session state is persisted once per operation, atomically, and only on success
//! 4. A path is never staged for addition and removal at the same time

pub mod cli;
pub mod core;
pub mod ui;
