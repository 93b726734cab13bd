// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for dco-guard.
//!
//! Options are resolved exactly once at startup from CLI arguments,
//! environment variables, and built-in defaults (in that precedence order),
//! then passed around by reference for the rest of the run.

use crate::cli::Cli;
use crate::error::{ConfigError, Result};
use crate::output::Logger;
use regex::Regex;
use std::env;

/// Built-in default branch.
pub const DEFAULT_BRANCH: &str = "master";
/// Built-in default remote.
pub const DEFAULT_REMOTE: &str = "origin";

pub const ENV_DEFAULT_BRANCH: &str = "DCO_GUARD_DEFAULT_BRANCH";
pub const ENV_DEFAULT_BRANCH_FROM_REMOTE: &str = "DCO_GUARD_DEFAULT_BRANCH_FROM_REMOTE";
pub const ENV_DEFAULT_REMOTE: &str = "DCO_GUARD_DEFAULT_REMOTE";
pub const ENV_CHECK_MERGE_COMMITS: &str = "DCO_GUARD_CHECK_MERGE_COMMITS";
pub const ENV_EXCLUDE_EMAILS: &str = "DCO_GUARD_EXCLUDE_EMAILS";
pub const ENV_EXCLUDE_PATTERN: &str = "DCO_GUARD_EXCLUDE_PATTERN";
pub const ENV_QUIET: &str = "DCO_GUARD_QUIET";
pub const ENV_VERBOSE: &str = "DCO_GUARD_VERBOSE";

/// Resolved configuration for a run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Default branch to compare against when the CI environment does not
    /// provide one.
    pub default_branch: String,
    /// Whether to ask the default remote for its default branch instead.
    pub default_branch_from_remote: bool,
    /// Remote used for fetches and the default-branch query.
    pub default_remote: String,
    /// Whether merge commits are checked too.
    pub check_merge_commits: bool,
    /// Author emails exempt from all checks.
    pub exclude_emails: Vec<String>,
    /// Regex of author emails exempt from all checks.
    pub exclude_pattern: Option<Regex>,
    /// Print nothing, only set the exit code.
    pub quiet: bool,
    /// Print extra detail.
    pub verbose: bool,
}

impl Options {
    /// Resolve options from parsed CLI arguments and the environment.
    ///
    /// clap already applied the env fallback for string options; boolean
    /// options are resolved here so that truthy strings behave predictably.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let check_merge_commits =
            cli.check_merge_commits || env_flag(ENV_CHECK_MERGE_COMMITS)?.unwrap_or(false);
        let default_branch_from_remote = cli.default_branch_from_remote
            || env_flag(ENV_DEFAULT_BRANCH_FROM_REMOTE)?.unwrap_or(false);
        let quiet = cli.quiet || env_flag(ENV_QUIET)?.unwrap_or(false);
        let verbose = cli.verbose || env_flag(ENV_VERBOSE)?.unwrap_or(false);

        if quiet && verbose {
            return Err(ConfigError::QuietAndVerbose.into());
        }
        if default_branch_from_remote && cli.default_branch.is_some() {
            return Err(ConfigError::BranchAndBranchFromRemote.into());
        }

        let exclude_emails = cli
            .exclude_emails
            .as_deref()
            .map(parse_email_list)
            .unwrap_or_default();
        let exclude_pattern = match cli.exclude_pattern.as_deref() {
            Some(pattern) => {
                Some(
                    Regex::new(pattern).map_err(|e| ConfigError::InvalidExcludePattern {
                        pattern: pattern.to_string(),
                        message: e.to_string(),
                    })?,
                )
            }
            None => None,
        };

        Ok(Self {
            default_branch: cli
                .default_branch
                .clone()
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            default_branch_from_remote,
            default_remote: cli.default_remote.clone(),
            check_merge_commits,
            exclude_emails,
            exclude_pattern,
            quiet,
            verbose,
        })
    }

    /// Whether the given author email is exempt from all checks.
    pub fn is_excluded(&self, email: &str) -> bool {
        if self.exclude_emails.iter().any(|excluded| excluded == email) {
            return true;
        }
        match &self.exclude_pattern {
            Some(pattern) => pattern.is_match(email),
            None => false,
        }
    }

    /// Name-value pairs for the verbose options dump.
    pub fn dump(&self) -> Vec<(&'static str, String)> {
        vec![
            ("check-merge-commits", self.check_merge_commits.to_string()),
            ("default-branch", self.default_branch.clone()),
            (
                "default-branch-from-remote",
                self.default_branch_from_remote.to_string(),
            ),
            ("default-remote", self.default_remote.clone()),
            ("exclude-emails", self.exclude_emails.join(",")),
            (
                "exclude-pattern",
                self.exclude_pattern
                    .as_ref()
                    .map(|pattern| pattern.as_str().to_string())
                    .unwrap_or_default(),
            ),
            ("quiet", self.quiet.to_string()),
            ("verbose", self.verbose.to_string()),
        ]
    }
}

/// Everything a retrieval or validation step needs: the resolved options
/// and the user-facing printer.
#[derive(Debug, Clone)]
pub struct Context {
    pub options: Options,
    pub log: Logger,
}

impl Context {
    /// Freeze the given options into a run context.
    pub fn new(options: Options) -> Self {
        let log = Logger::new(options.quiet, options.verbose);
        Self { options, log }
    }
}

/// Split a comma-separated email list, dropping surrounding spaces and
/// empty entries.
fn parse_email_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a boolean environment variable.
///
/// Accepts `y/yes/t/true/on/1` and `n/no/f/false/off/0` (case-insensitive);
/// unset or empty means "not configured"; anything else is an error.
fn env_flag(name: &str) -> Result<Option<bool>> {
    let value = match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => return Ok(None),
    };
    match value.to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Ok(Some(true)),
        "n" | "no" | "f" | "false" | "off" | "0" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidBool {
            variable: name.to_string(),
            value,
        }
        .into()),
    }
}
