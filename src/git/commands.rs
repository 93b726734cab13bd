// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Wrappers around the system `git` binary.
//!
//! Every retrieval step that talks to git goes through [`run`], which
//! captures the child's output so that failures can be reported with the
//! exact command line and whatever git printed.

use crate::commit::{Commit, CommitRange};
use crate::error::{GitError, Result};
use crate::git::parser;
use std::process::Command;

/// Log format producing one record per commit: full hash, `name <email>`,
/// subject, body, terminated by the 0x1E record separator.
const LOG_FORMAT: &str = "%H%n%an <%ae>%n%s%n%-b%x1e";

/// Run a command and return its trimmed stdout.
///
/// On non-zero exit the error carries the captured stdout and stderr.
pub fn run(command: &[&str]) -> Result<String> {
    let (program, args) = match command.split_first() {
        Some(parts) => parts,
        None => {
            return Err(GitError::SpawnFailed {
                command: String::new(),
                message: "empty command".to_string(),
            }
            .into())
        }
    };
    let command_line = command.join(" ");
    tracing::debug!("running: {}", command_line);

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| GitError::SpawnFailed {
            command: command_line.clone(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            if !combined.is_empty() {
                combined.push('\n');
            }
            combined.push_str(&stderr);
        }
        return Err(GitError::CommandFailed {
            command: command_line,
            output: combined.trim().to_string(),
        }
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
}

/// Get the hash of the HEAD commit.
pub fn head_commit_hash() -> Result<String> {
    run(&["git", "rev-parse", "--verify", "HEAD"])
}

/// Get the common ancestor (fork point) of HEAD and the given reference.
pub fn common_ancestor(base_ref: &str) -> Result<String> {
    run(&["git", "merge-base", "--fork-point", base_ref])
}

/// Fetch a branch from a remote.
pub fn fetch_branch(remote: &str, branch: &str) -> Result<()> {
    run(&["git", "fetch", remote, branch]).map(|_| ())
}

/// Ask a remote which branch its HEAD points to.
pub fn default_branch_from_remote(remote: &str) -> Result<String> {
    let output = run(&["git", "ls-remote", "--symref", remote, "HEAD"])?;
    match parse_remote_head(&output) {
        Some(branch) => Ok(branch.to_string()),
        None => Err(GitError::RemoteHeadNotFound {
            remote: remote.to_string(),
        }
        .into()),
    }
}

/// Extract the branch name from `git ls-remote --symref <remote> HEAD` output.
fn parse_remote_head(output: &str) -> Option<&str> {
    for line in output.lines() {
        if let Some(rest) = line.strip_prefix("ref: refs/heads/") {
            if let Some((branch, _)) = rest.split_once('\t') {
                return Some(branch);
            }
        }
    }
    None
}

/// Retrieve the commits in `]base, head]` via `git log`.
///
/// Merge commits are excluded at the git level unless `include_merges` is
/// set; records produced here therefore never carry the merge flag.
pub fn log_commits(range: &CommitRange, include_merges: bool) -> Result<Vec<Commit>> {
    let rev_range = format!("{}..{}", range.base, range.head);
    let pretty = format!("--pretty={}", LOG_FORMAT);
    let mut command = vec!["git", "log", rev_range.as_str(), pretty.as_str()];
    if !include_merges {
        command.push("--no-merges");
    }
    let data = run(&command)?;

    let mut commits = Vec::new();
    for record in parser::split_records(&data, parser::RECORD_SEPARATOR) {
        commits.push(parser::parse_record(record)?);
    }
    Ok(commits)
}
