//! Status output for the command line
//!
//! Progress and error lines go to stderr so that stdout carries only the
//! rendered report. `--quiet` silences everything except errors.

use std::error::Error;
use std::fmt::Display;
use std::io::IsTerminal;

use colored::Colorize;

/// Prints status lines to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    quiet: bool,
    verbosity: u8,
    color: bool,
}

impl Status {
    /// Status printer; colour is enabled when stderr is a terminal
    #[must_use]
    pub fn new(quiet: bool, verbosity: u8) -> Self {
        Self {
            quiet,
            verbosity,
            color: std::io::stderr().is_terminal(),
        }
    }

    /// Status printer with explicit colour setting
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Whether non-error output is suppressed
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Progress message
    pub fn info(&self, message: impl Display) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    /// Completion message
    pub fn success(&self, message: impl Display) {
        if !self.quiet {
            let line = message.to_string();
            if self.color {
                eprintln!("{}", line.green());
            } else {
                eprintln!("{line}");
            }
        }
    }

    /// Error message; printed even when quiet
    pub fn error(&self, err: &(dyn Error + 'static)) {
        eprintln!("{}", self.format_error(err));
    }

    /// Text printed by [`error`](Self::error)
    ///
    /// The cause chain is included from verbosity 1 upwards.
    #[must_use]
    pub fn format_error(&self, err: &(dyn Error + 'static)) -> String {
        let label = if self.color {
            "error:".red().bold().to_string()
        } else {
            "error:".to_string()
        };
        let mut text = format!("{label} {err}");
        if self.verbosity > 0 {
            let mut source = err.source();
            while let Some(cause) = source {
                text.push_str(&format!("\n  caused by: {cause}"));
                source = cause.source();
            }
        }
        text
    }
}
