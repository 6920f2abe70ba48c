//! add and rm commands - Edit the staging area

use super::open;
use crate::cli::Context;
use anyhow::Result;

/// Stage a file.
pub fn add(ctx: &Context, file: &str) -> Result<()> {
    open(ctx)?.add(file)?;
    Ok(())
}

/// Unstage a file or stage its removal.
pub fn rm(ctx: &Context, file: &str) -> Result<()> {
    open(ctx)?.rm(file)?;
    Ok(())
}
