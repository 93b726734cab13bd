// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CircleCI retriever.

use crate::ci::{env_var, env_var_non_empty, require_env, Retriever};
use crate::commit::CommitRange;
use crate::config::Context;
use crate::error::Result;
use crate::git;

/// Retriever for CircleCI pipelines.
pub struct CircleCiRetriever;

impl Retriever for CircleCiRetriever {
    fn name(&self) -> &'static str {
        "CircleCI"
    }

    fn applies(&self) -> bool {
        env_var("CIRCLECI").is_some()
    }

    fn commit_range(&mut self, ctx: &Context) -> Result<CommitRange> {
        let options = &ctx.options;
        let head = require_env("CIRCLE_SHA1")?;

        // A pipeline can hand us the base revision directly, e.g.
        //   environment:
        //     CIRCLE_BASE_REVISION: << pipeline.git.base_revision >>
        if let Some(base_revision) = env_var_non_empty("CIRCLE_BASE_REVISION") {
            ctx.log.verbose(&format!(
                "\tchecking commits off of base revision '{}'",
                base_revision
            ));
            return Ok(CommitRange::new(base_revision, head));
        }

        let current_branch = require_env("CIRCLE_BRANCH")?;
        let default_branch = &options.default_branch;
        ctx.log.verbose(&format!(
            "\ton branch '{}': will check forked commits off of default branch '{}'",
            current_branch, default_branch
        ));
        let remote = &options.default_remote;
        if let Err(error) = git::fetch_branch(remote, default_branch) {
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
