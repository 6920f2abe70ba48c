//! cli
//!
//! Command-line interface layer for Gitlet.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the tracing subscriber
//! - Delegate to command handlers
//! - Turn user errors into plain messages
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that call [`crate::core::repository::Repository`]. A
//! [`crate::core::error::UserError`] is printed as-is and the process still
//! exits successfully; anything else propagates to `main` as a failure.

pub mod args;
pub mod commands;

pub use args::Cli;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing_subscriber::EnvFilter;

use crate::core::error::RepoError;
use crate::core::types::DateOffset;
use crate::ui::output::{self, Verbosity};

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "GITLET_LOG";

/// Execution context shared by every command handler.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory the repository lives in.
    pub cwd: PathBuf,
    /// Output verbosity.
    pub verbosity: Verbosity,
    /// Date offset given on the command line.
    pub date_offset: Option<DateOffset>,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let cwd = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    let date_offset = cli
        .date_offset
        .as_deref()
        .map(DateOffset::parse)
        .transpose()
        .context("invalid --date-offset")?;

    let ctx = Context {
        cwd,
        verbosity: Verbosity::from_quiet(cli.quiet),
        date_offset,
    };

    match commands::dispatch(cli.command, &ctx) {
        Err(err) => match err.downcast_ref::<RepoError>().and_then(RepoError::as_user) {
            Some(user) => {
                output::data(user);
                Ok(())
            }
            None => Err(err),
        },
        ok => ok,
    }
}

/// Log to stderr at `warn`, or `debug` for this crate with `--debug`.
/// `GITLET_LOG` takes precedence over both.
fn init_tracing(debug: bool) {
    let default = if debug { "warn,gitlet=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when run() is called twice in one process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
