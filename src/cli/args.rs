//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--date-offset <+HHMM>`: Render commit dates in this offset

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gitlet - a small local version-control system
#[derive(Parser, Debug)]
#[command(name = "gitlet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if gitlet was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Offset used to show commit dates, e.g. -0800 (overrides config)
    #[arg(long, global = true, value_name = "OFFSET", allow_hyphen_values = true)]
    pub date_offset: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new repository in the current directory
    Init,

    /// Stage a file for the next commit
    Add {
        /// File to stage
        file: String,
    },

    /// Unstage a file, or stage its removal if it is tracked
    Rm {
        /// File to remove
        file: String,
    },

    /// Record the staged changes
    Commit {
        /// Commit message
        message: String,
    },

    /// Show the current branch's history
    Log,

    /// Show every commit ever made
    #[command(name = "global-log")]
    GlobalLog,

    /// Print the ids of commits with the given message
    Find {
        /// Exact commit message
        message: String,
    },

    /// Show branches, staged files and working directory changes
    Status,

    /// Restore a file or switch branches
    #[command(
        after_help = "\
USAGE FORMS:
    gitlet checkout -- <file>              restore <file> from the current commit
    gitlet checkout <commit> -- <file>     restore <file> from <commit>
    gitlet checkout <branch>               switch to <branch>"
    )]
    Checkout {
        /// Commit id (with `-- <file>`) or branch name
        target: Option<String>,

        /// File to restore
        #[arg(last = true)]
        file: Option<String>,
    },

    /// Create a branch at the current commit
    Branch {
        /// Branch name
        name: String,
    },

    /// Delete a branch pointer
    #[command(name = "rm-branch")]
    RmBranch {
        /// Branch name
        name: String,
    },

    /// Move the current branch to a commit and restore its files
    Reset {
        /// Full or 8-character commit id
        commit: String,
    },

    /// Merge another branch into the current branch
    Merge {
        /// Branch to merge
        branch: String,
    },
}
