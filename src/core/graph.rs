//! core::graph
//!
//! Ancestry queries over the commit DAG.
//!
//! # Architecture
//!
//! The commit graph is a DAG where:
//! - Nodes are stored commits
//! - Edges point from child to parent (`parent1`, and `parent2` for merges)
//! - The single root is the commit created by `init`
//!
//! Nothing is cached: every query walks the object store from the given
//! tips. Histories are small and the walk is bounded by the number of
//! reachable commits.
//!
//! # Split point
//!
//! The split point of two tips is their nearest common ancestor. Each tip is
//! walked breadth-first over both parent edges, recording the edge count to
//! every reachable commit. Among commits present in both maps, the one with
//! the smallest summed distance wins; ties go to the commit closer to the
//! first tip, then to the larger digest.

use std::cmp::Reverse;
use std::collections::{HashMap, VecDeque};

use crate::core::commit::Commit;
use crate::core::store::{ObjectBackend, ObjectStore, StoreError};
use crate::core::types::ObjectId;

/// Read-only view of the commit DAG stored in an [`ObjectStore`].
#[derive(Debug)]
pub struct CommitGraph<'a, B> {
    store: &'a ObjectStore<B>,
}

impl<'a, B: ObjectBackend> CommitGraph<'a, B> {
    pub fn new(store: &'a ObjectStore<B>) -> Self {
        Self { store }
    }

    /// Commits from `start` back to the root following `parent1` only,
    /// newest first.
    pub fn first_parent_history(
        &self,
        start: &ObjectId,
    ) -> Result<Vec<(ObjectId, Commit)>, StoreError> {
        let mut history = Vec::new();
        let mut next = Some(start.clone());

        while let Some(id) = next {
            let commit = self.store.get_commit(&id)?;
            next = commit.parent1().cloned();
            history.push((id, commit));
        }
        Ok(history)
    }

    /// Edge distance from `start` to every commit reachable from it,
    /// including `start` itself at distance zero.
    pub fn distances(&self, start: &ObjectId) -> Result<HashMap<ObjectId, usize>, StoreError> {
        let mut dist = HashMap::new();
        let mut queue = VecDeque::new();

        dist.insert(start.clone(), 0);
        queue.push_back(start.clone());

        while let Some(id) = queue.pop_front() {
            let depth = dist[&id];
            let commit = self.store.get_commit(&id)?;
            for parent in commit.parents() {
                if !dist.contains_key(parent) {
                    dist.insert(parent.clone(), depth + 1);
                    queue.push_back(parent.clone());
                }
            }
        }
        Ok(dist)
    }

    /// Whether `ancestor` is reachable from `descendant` over either parent
    /// edge. A commit is its own ancestor.
    pub fn is_ancestor(
        &self,
        ancestor: &ObjectId,
        descendant: &ObjectId,
    ) -> Result<bool, StoreError> {
        if ancestor == descendant {
            return Ok(true);
        }
        Ok(self.distances(descendant)?.contains_key(ancestor))
    }

    /// Nearest common ancestor of `current` and `other`.
    ///
    /// Returns `None` only for disconnected histories, which a repository
    /// with a single root never produces.
    pub fn split_point(
        &self,
        current: &ObjectId,
        other: &ObjectId,
    ) -> Result<Option<ObjectId>, StoreError> {
        let from_current = self.distances(current)?;
        let from_other = self.distances(other)?;

        let best = from_current
            .iter()
            .filter_map(|(id, &dc)| from_other.get(id).map(|&d_o| (id, dc, d_o)))
            .min_by_key(|&(id, dc, d_o)| (dc + d_o, dc, Reverse(id.clone())))
            .map(|(id, _, _)| id.clone());

        Ok(best)
    }
}
