//! status command - Show branches, staging area and working directory changes

use super::open;
use crate::cli::Context;
use crate::ui::output;
use anyhow::Result;

/// Print the five status sections.
pub fn status(ctx: &Context) -> Result<()> {
    let report = open(ctx)?.status()?;
    output::data_block(report);
    Ok(())
}
