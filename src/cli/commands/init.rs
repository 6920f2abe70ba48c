//! init command - Create a repository in the working directory

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::error::RepoError;
use crate::core::repository::Repository;
use anyhow::Result;

/// Create a repository with a root commit.
///
/// A `--date-offset` given here is pinned into the repository config.
pub fn init(ctx: &Context) -> Result<()> {
    let mut config = Config::load(None).map_err(RepoError::from)?;
    if let Some(offset) = ctx.date_offset {
        config.global.date_offset = Some(offset.to_string());
    }

    Repository::init(&ctx.cwd, &config)?;
    Ok(())
}
