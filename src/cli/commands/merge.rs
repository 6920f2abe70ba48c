//! cli::commands::merge
//!
//! Merge another branch into the current one.
//!
//! # Output
//!
//! - Already up to date: `Given branch is an ancestor of the current branch.`
//! - Fast-forward: `Current branch fast-forwarded.`
//! - Conflicts: `Encountered a merge conflict.` (shown even with `--quiet`)
//! - Clean merge: nothing

use super::open;
use crate::cli::Context;
use crate::core::merge::MergeOutcome;
use crate::ui::output;
use anyhow::Result;

/// Run the merge command.
pub fn merge(ctx: &Context, branch: &str) -> Result<()> {
    let mut repo = open(ctx)?;

    match repo.merge(branch)? {
        MergeOutcome::UpToDate => {
            output::print(
                "Given branch is an ancestor of the current branch.",
                ctx.verbosity,
            );
        }
        MergeOutcome::FastForward { .. } => {
            output::print("Current branch fast-forwarded.", ctx.verbosity);
        }
        MergeOutcome::Merged { conflicts, .. } => {
            if !conflicts.is_empty() {
                output::data("Encountered a merge conflict.");
            }
        }
    }
    Ok(())
}
