//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens (or creates) the repository for the context's directory
//! 2. Calls one repository operation
//! 3. Formats and displays output
//!
//! Handlers return repository errors unchanged so that [`crate::cli::run`]
//! can tell user errors from internal ones.

mod branch;
mod checkout;
mod commit;
mod init;
mod log_cmd;
mod merge;
mod reset;
mod stage;
mod status;

pub use branch::{branch, rm_branch};
pub use checkout::checkout;
pub use commit::commit;
pub use init::init;
pub use log_cmd::{find, global_log, log};
pub use merge::merge;
pub use reset::reset;
pub use stage::{add, rm};
pub use status::status;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::error::RepoResult;
use crate::core::repository::Repository;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Init => init::init(ctx),

        // Staging and committing
        Command::Add { file } => stage::add(ctx, &file),
        Command::Rm { file } => stage::rm(ctx, &file),
        Command::Commit { message } => commit::commit(ctx, &message),

        // History
        Command::Log => log_cmd::log(ctx),
        Command::GlobalLog => log_cmd::global_log(ctx),
        Command::Find { message } => log_cmd::find(ctx, &message),
        Command::Status => status::status(ctx),

        // Branches and working directory
        Command::Checkout { target, file } => {
            checkout::checkout(ctx, target.as_deref(), file.as_deref())
        }
        Command::Branch { name } => branch::branch(ctx, &name),
        Command::RmBranch { name } => branch::rm_branch(ctx, &name),
        Command::Reset { commit } => reset::reset(ctx, &commit),
        Command::Merge { branch } => merge::merge(ctx, &branch),
    }
}

/// Open the repository in the context's directory, applying any
/// command-line date offset.
pub(crate) fn open(ctx: &Context) -> RepoResult<Repository> {
    let repo = Repository::open(&ctx.cwd)?;
    Ok(match ctx.date_offset {
        Some(offset) => repo.with_date_offset(offset),
        None => repo,
    })
}
