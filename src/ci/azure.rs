// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Azure Pipelines retriever.

use crate::ci::{env_var, env_var_non_empty, require_env, Retriever};
use crate::commit::CommitRange;
use crate::config::Context;
use crate::error::Result;
use crate::git;

/// Retriever for Azure Pipelines builds.
pub struct AzurePipelinesRetriever;

impl Retriever for AzurePipelinesRetriever {
    fn name(&self) -> &'static str {
        "Azure Pipelines"
    }

    fn applies(&self) -> bool {
        env_var("TF_BUILD").is_some()
    }

    fn commit_range(&mut self, ctx: &Context) -> Result<CommitRange> {
        let options = &ctx.options;
        let head = require_env("BUILD_SOURCEVERSION")?;
        let current_branch = require_env("BUILD_SOURCEBRANCHNAME")?;

        let base_branch = if env_var_non_empty("SYSTEM_PULLREQUEST_PULLREQUESTID").is_some() {
            let target_branch = require_env("SYSTEM_PULLREQUEST_TARGETBRANCH")?;
            ctx.log.verbose(&format!(
                "\ton pull request branch '{}': will check forked commits off of \
                 target branch '{}'",
                current_branch, target_branch
            ));
            target_branch
        } else {
            let default_branch = options.default_branch.clone();
            ctx.log.verbose(&format!(
                "\ton branch '{}': will check forked commits off of default branch '{}'",
                current_branch, default_branch
            ));
            default_branch
        };

        let remote = &options.default_remote;
        if let Err(error) = git::fetch_branch(remote, &base_branch) {
            ctx.log.print(&format!(
                "failed to fetch '{}' from remote '{}'",
                base_branch, remote
            ));
            return Err(error);
        }
        let base = git::common_ancestor(&format!("{}/{}", remote, base_branch))?;
        Ok(CommitRange::new(base, head))
    }
}
