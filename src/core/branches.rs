//! core::branches
//!
//! Branch name to tip mapping, plus the checked-out branch.
//!
//! # Invariants
//!
//! - The current branch always has an entry
//! - Every tip references a stored commit (enforced by the repository,
//!   which only ever records ids it has just read or written)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::UserError;
use crate::core::types::{BranchName, ObjectId};

/// The branch table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchTable {
    current: BranchName,
    tips: BTreeMap<BranchName, ObjectId>,
}

impl BranchTable {
    /// A table with a single branch, checked out.
    pub fn new(current: BranchName, tip: ObjectId) -> Self {
        let mut tips = BTreeMap::new();
        tips.insert(current.clone(), tip);
        Self { current, tips }
    }

    pub fn current(&self) -> &BranchName {
        &self.current
    }

    /// Tip of the checked-out branch.
    ///
    /// Tables loaded from disk must pass [`BranchTable::is_consistent`] first.
    pub fn current_tip(&self) -> &ObjectId {
        &self.tips[&self.current]
    }

    /// Whether the current branch has an entry.
    pub fn is_consistent(&self) -> bool {
        self.tips.contains_key(&self.current)
    }

    pub fn get(&self, name: &BranchName) -> Option<&ObjectId> {
        self.tips.get(name)
    }

    pub fn contains(&self, name: &BranchName) -> bool {
        self.tips.contains_key(name)
    }

    /// Branch names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &BranchName> {
        self.tips.keys()
    }

    /// Add a branch at `tip` without switching to it.
    pub fn create(&mut self, name: BranchName, tip: ObjectId) -> Result<(), UserError> {
        if self.tips.contains_key(&name) {
            return Err(UserError::BranchExists);
        }
        self.tips.insert(name, tip);
        Ok(())
    }

    /// Delete a branch other than the current one.
    pub fn remove(&mut self, name: &BranchName) -> Result<ObjectId, UserError> {
        if !self.tips.contains_key(name) {
            return Err(UserError::BranchDoesNotExist);
        }
        if name == &self.current {
            return Err(UserError::CannotRemoveCurrent);
        }
        self.tips
            .remove(name)
            .ok_or(UserError::BranchDoesNotExist)
    }

    /// Move the current branch to `tip`.
    pub fn set_current_tip(&mut self, tip: ObjectId) {
        self.tips.insert(self.current.clone(), tip);
    }

    /// Check out an existing branch.
    pub fn switch(&mut self, name: &BranchName) -> Result<(), UserError> {
        if !self.tips.contains_key(name) {
            return Err(UserError::NoSuchBranch);
        }
        self.current = name.clone();
        Ok(())
    }
}
