// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CI environment detection and commit retrieval.
//!
//! Each supported environment implements [`Retriever`]. [`detect`] walks a
//! fixed priority order and returns the first environment whose marker
//! variables are present, falling back to plain git.

mod appveyor;
mod azure;
mod circleci;
mod github;
mod gitlab;
mod local;

pub use appveyor::AppVeyorRetriever;
pub use azure::AzurePipelinesRetriever;
pub use circleci::CircleCiRetriever;
pub use github::GitHubRetriever;
pub use gitlab::GitLabRetriever;
pub use local::GitRetriever;

use crate::commit::{Commit, CommitRange};
use crate::config::Context;
use crate::error::{CiError, Result};
use crate::git;

/// Commit range resolution and commit retrieval for one CI environment.
pub trait Retriever {
    /// Name reported to the user on detection.
    fn name(&self) -> &'static str;

    /// Whether this environment's marker variables are present.
    fn applies(&self) -> bool;

    /// Resolve the base and head of the commit range to check.
    fn commit_range(&mut self, ctx: &Context) -> Result<CommitRange>;

    /// Retrieve the commits in the range, base excluded, head included.
    ///
    /// Git-based environments share this git-log implementation; API-based
    /// ones override it.
    fn commits(&self, ctx: &Context, range: &CommitRange) -> Result<Vec<Commit>> {
        git::log_commits(range, ctx.options.check_merge_commits)
    }
}

/// Select the retriever for the current environment.
pub fn detect() -> Box<dyn Retriever> {
    let candidates: Vec<Box<dyn Retriever>> = vec![
        Box::new(GitLabRetriever),
        Box::new(GitHubRetriever::new()),
        Box::new(AzurePipelinesRetriever),
        Box::new(AppVeyorRetriever),
        Box::new(CircleCiRetriever),
    ];
    for candidate in candidates {
        if candidate.applies() {
            tracing::debug!("detected CI environment: {}", candidate.name());
            return candidate;
        }
    }
    // Plain git always applies.
    Box::new(GitRetriever)
}

/// Read an environment variable.
pub(crate) fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Read an environment variable, treating an empty value as unset.
pub(crate) fn env_var_non_empty(name: &str) -> Option<String> {
    env_var(name).filter(|value| !value.is_empty())
}

/// Read a required environment variable.
pub(crate) fn require_env(name: &str) -> Result<String> {
    env_var(name).ok_or_else(|| {
        CiError::MissingEnvVar {
            name: name.to_string(),
        }
        .into()
    })
}
