//! commit command - Record the staging area

use super::open;
use crate::cli::Context;
use anyhow::Result;
use tracing::debug;

/// Commit staged changes on the current branch.
pub fn commit(ctx: &Context, message: &str) -> Result<()> {
    let mut repo = open(ctx)?;
    let id = repo.commit(message)?;
    debug!(commit = %id, branch = %repo.current_branch(), "commit complete");
    Ok(())
}
