// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::Parser;

use crate::config::{
    ENV_DEFAULT_BRANCH, ENV_DEFAULT_REMOTE, ENV_EXCLUDE_EMAILS, ENV_EXCLUDE_PATTERN,
};

/// dco-guard - DCO sign-off checker
///
/// Checks that all commits of a proposed change are signed off.
#[derive(Parser, Debug)]
#[command(name = "dco-guard")]
#[command(author = "Eshan Roy")]
#[command(version = crate::version::version_string())]
#[command(about = "Check that all commits of a proposed change have a DCO (i.e. are signed-off)")]
#[command(long_about = None)]
pub struct Cli {
    /// Default branch to use, if necessary (default: master)
    #[arg(short = 'b', long, value_name = "BRANCH", env = ENV_DEFAULT_BRANCH)]
    pub default_branch: Option<String>,

    /// Ask the default remote for the default branch instead [env: DCO_GUARD_DEFAULT_BRANCH_FROM_REMOTE]
    #[arg(short = 'd', long)]
    pub default_branch_from_remote: bool,

    /// Default remote to use, if necessary
    #[arg(short = 'r', long, value_name = "REMOTE", default_value = crate::config::DEFAULT_REMOTE, env = ENV_DEFAULT_REMOTE)]
    pub default_remote: String,

    /// Check sign-offs on merge commits as well [env: DCO_GUARD_CHECK_MERGE_COMMITS]
    #[arg(short = 'm', long)]
    pub check_merge_commits: bool,

    /// Comma-separated list of author emails to exclude from checks
    #[arg(short = 'e', long, value_name = "EMAILS", env = ENV_EXCLUDE_EMAILS)]
    pub exclude_emails: Option<String>,

    /// Regular expression matching author emails to exclude from checks
    #[arg(long, value_name = "PATTERN", env = ENV_EXCLUDE_PATTERN)]
    pub exclude_pattern: Option<String>,

    /// Quiet mode (do not print anything; simply exit with 0 or non-zero) [env: DCO_GUARD_QUIET]
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (print out more information) [env: DCO_GUARD_VERBOSE]
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
