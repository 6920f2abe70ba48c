//! reset command - Move the current branch to a commit

use super::open;
use crate::cli::Context;
use anyhow::Result;

/// Restore the files of `commit` and point the current branch at it.
pub fn reset(ctx: &Context, commit: &str) -> Result<()> {
    open(ctx)?.reset(commit)?;
    Ok(())
}
