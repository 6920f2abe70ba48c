//! log, global-log and find commands - Read-only history queries

use super::open;
use crate::cli::Context;
use crate::ui::output;
use anyhow::Result;

/// Show the current branch's first-parent history, newest first.
pub fn log(ctx: &Context) -> Result<()> {
    let repo = open(ctx)?;
    let offset = repo.date_offset();
    for entry in repo.log()? {
        output::data_block(entry.display(offset));
    }
    Ok(())
}

/// Show every stored commit.
pub fn global_log(ctx: &Context) -> Result<()> {
    let repo = open(ctx)?;
    let offset = repo.date_offset();
    for entry in repo.global_log()? {
        output::data_block(entry.display(offset));
    }
    Ok(())
}

/// Print the ids of commits with exactly this message.
pub fn find(ctx: &Context, message: &str) -> Result<()> {
    let repo = open(ctx)?;
    for id in repo.find(message)? {
        output::data(id);
    }
    Ok(())
}
