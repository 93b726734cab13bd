// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! AppVeyor retriever.

use crate::ci::{env_var, env_var_non_empty, require_env, Retriever};
use crate::commit::CommitRange;
use crate::config::Context;
use crate::error::Result;
use crate::git;

/// Retriever for AppVeyor builds.
pub struct AppVeyorRetriever;

impl Retriever for AppVeyorRetriever {
    fn name(&self) -> &'static str {
        "AppVeyor"
    }

    fn applies(&self) -> bool {
        env_var("APPVEYOR").is_some()
    }

    fn commit_range(&mut self, ctx: &Context) -> Result<CommitRange> {
        let options = &ctx.options;
        let head = match env_var("APPVEYOR_REPO_COMMIT") {
            Some(commit_hash) => commit_hash,
            None => git::head_commit_hash()?,
        };
        let branch = require_env("APPVEYOR_REPO_BRANCH")?;

        // Pull request build: the target branch is checked out locally, so
        // no fetch is needed before finding the fork point.
        if env_var_non_empty("APPVEYOR_PULL_REQUEST_NUMBER").is_some() {
            let current_branch = require_env("APPVEYOR_PULL_REQUEST_HEAD_REPO_BRANCH")?;
            let target_branch = branch;
            ctx.log.verbose(&format!(
                "\ton pull request branch '{}': will check commits off of target branch '{}'",
                current_branch, target_branch
            ));
            let head = env_var_non_empty("APPVEYOR_PULL_REQUEST_HEAD_COMMIT").unwrap_or(head);
            let base = git::common_ancestor(&target_branch)?;
            return Ok(CommitRange::new(base, head));
        }

        let default_branch = &options.default_branch;
        ctx.log.verbose(&format!(
            "\ton branch '{}': will check forked commits off of default branch '{}'",
            branch, default_branch
        ));
        let base = git::common_ancestor(default_branch)?;
        Ok(CommitRange::new(base, head))
    }
}
