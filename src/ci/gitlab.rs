// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! GitLab CI retriever.

use crate::ci::{env_var, env_var_non_empty, require_env, Retriever};
use crate::commit::CommitRange;
use crate::config::Context;
use crate::error::Result;
use crate::git;

/// Retriever for GitLab CI pipelines.
///
/// Handles pushes to the default branch, merge request pipelines, pipelines
/// for external pull requests, and plain branch pipelines.
pub struct GitLabRetriever;

impl Retriever for GitLabRetriever {
    fn name(&self) -> &'static str {
        "GitLab CI"
    }

    fn applies(&self) -> bool {
        env_var("GITLAB_CI").is_some()
    }

    fn commit_range(&mut self, ctx: &Context) -> Result<CommitRange> {
        let options = &ctx.options;
        let default_branch =
            env_var("CI_DEFAULT_BRANCH").unwrap_or_else(|| options.default_branch.clone());
        let head = require_env("CI_COMMIT_SHA")?;
        let current_branch = env_var("CI_COMMIT_BRANCH");

        // Push to the default branch itself: check only the new commits
        if current_branch.as_deref() == Some(default_branch.as_str()) {
            ctx.log.verbose(&format!(
                "\ton default branch '{}': will check new commits",
                default_branch
            ));
            let base = require_env("CI_COMMIT_BEFORE_SHA")?;
            return Ok(CommitRange::new(base, head));
        }

        // Merge request pipelines carry the target branch tip directly
        if env_var_non_empty("CI_MERGE_REQUEST_ID").is_some() {
            let target_branch = require_env("CI_MERGE_REQUEST_TARGET_BRANCH_NAME")?;
            ctx.log.verbose(&format!(
                "\ton merge request branch: will check new commits off of target branch '{}'",
                target_branch
            ));
            let base = require_env("CI_MERGE_REQUEST_TARGET_BRANCH_SHA")?;
            return Ok(CommitRange::new(base, head));
        }

        if env_var_non_empty("CI_EXTERNAL_PULL_REQUEST_IID").is_some() {
            let target_branch = require_env("CI_EXTERNAL_PULL_REQUEST_TARGET_BRANCH_NAME")?;
            ctx.log.verbose(&format!(
                "\ton external pull request branch: will check new commits off of \
                 target branch '{}'",
                target_branch
            ));
            let base = require_env("CI_EXTERNAL_PULL_REQUEST_TARGET_BRANCH_SHA")?;
            return Ok(CommitRange::new(base, head));
        }

        // Plain branch pipeline: fork point off of the fetched default branch
        ctx.log.verbose(&format!(
            "\ton branch '{}': will check forked commits off of default branch '{}'",
            current_branch.as_deref().unwrap_or("N/A"),
            default_branch
        ));
        let remote = &options.default_remote;
        if let Err(error) = git::fetch_branch(remote, &default_branch) {
            ctx.log.print(&format!(
                "failed to fetch '{}' from remote '{}'",
                default_branch, remote
            ));
            return Err(error);
        }
        let base = git::common_ancestor(&format!("{}/{}", remote, default_branch))?;
        Ok(CommitRange::new(base, head))
    }
}
