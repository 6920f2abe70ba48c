//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag. Command
//! results go to stdout; errors go to stderr. Diagnostics are
//! not printed here, they go through `tracing`.

use std::fmt::Display;
use std::io::Write;

/// Whether informational messages are printed.
///
/// Debug logging is separate and controlled through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// `--quiet`: only command results and refusals
    Quiet,
    Normal,
}

impl Verbosity {
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message followed by a newline (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print command output followed by a newline (always shown).
///
/// For text that is the result of the command, like `find` ids or a
/// user-facing refusal.
pub fn data(message: impl Display) {
    println!("{}", message);
}

/// Print preformatted command output exactly as given (always shown).
///
/// Used for blocks that carry their own line endings, such as log entries.
pub fn data_block(text: impl Display) {
    let mut stdout = std::io::stdout().lock();
    // A closed stdout is not worth failing the command over.
    let _ = write!(stdout, "{}", text).and_then(|_| stdout.flush());
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_flag_maps_to_verbosity() {
        assert_eq!(Verbosity::from_quiet(true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_quiet(false), Verbosity::Normal);
    }
}
