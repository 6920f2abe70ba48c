//! checkout command - Restore a file or switch branches
//!
//! # Forms
//!
//! - `checkout -- <file>` restores a file from the current commit
//! - `checkout <commit> -- <file>` restores a file from any commit
//! - `checkout <branch>` switches branches

use super::open;
use crate::cli::Context;
use anyhow::{bail, Result};

/// Run whichever checkout form the operands select.
pub fn checkout(ctx: &Context, target: Option<&str>, file: Option<&str>) -> Result<()> {
    match (target, file) {
        (commit, Some(file)) => open(ctx)?.checkout_file(commit, file)?,
        (Some(branch), None) => open(ctx)?.checkout_branch(branch)?,
        (None, None) => bail!("Incorrect operands."),
    }
    Ok(())
}
