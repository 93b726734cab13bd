// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! dco-guard - DCO sign-off checker
//!
//! A CLI tool that checks that every commit of a proposed change carries a
//! Developer Certificate of Origin sign-off matching the commit author.
//!
//! # Features
//!
//! - **CI Aware**: Detects GitLab CI, GitHub Actions, Azure Pipelines,
//!   AppVeyor and CircleCI, and resolves the commit range from their
//!   environments
//! - **Plain Git Fallback**: Works in any local repository by comparing
//!   against the default branch
//! - **Merge Commit Handling**: Merge commits are skipped unless explicitly
//!   checked
//! - **Author Exclusions**: Exempt bot accounts by email list or pattern
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use dco_guard::cli::{run, Cli};
//!
//! let cli = Cli::parse_from(["dco-guard", "--verbose"]);
//! let exit_code = run(cli).unwrap();
//! assert_eq!(0, exit_code);
//! ```

// Module declarations
pub mod ci;
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod output;
pub mod rules;

// Re-exports for convenience
pub use config::{Context, Options};
pub use error::{DcoError, Result};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of dco-guard.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
