// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! User-facing output with quiet/verbose gating.
//!
//! Everything the user is meant to read goes through [`Logger`] so that
//! quiet mode can silence a whole run. Diagnostic output for developers
//! goes through `tracing` instead.

/// Stdout printer honoring the quiet and verbose flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    quiet: bool,
    verbose: bool,
}

impl Logger {
    /// Create a logger. Callers guarantee quiet and verbose are not both set.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }

    /// Print a line unless quiet mode is on.
    pub fn print(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Print a line only in verbose mode.
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            println!("{}", message);
        }
    }
}
