//! branch and rm-branch commands - Manage branch pointers

use super::open;
use crate::cli::Context;
use anyhow::Result;

/// Create a branch at the current commit.
pub fn branch(ctx: &Context, name: &str) -> Result<()> {
    open(ctx)?.branch(name)?;
    Ok(())
}

/// Delete a branch pointer.
pub fn rm_branch(ctx: &Context, name: &str) -> Result<()> {
    open(ctx)?.rm_branch(name)?;
    Ok(())
}
