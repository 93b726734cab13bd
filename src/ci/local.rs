// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Plain git fallback, used when no CI environment is detected.

use crate::ci::Retriever;
use crate::commit::CommitRange;
use crate::config::Context;
use crate::error::Result;
use crate::git;

/// Retriever for a plain local git repository.
///
/// Checks the commits between the local default branch and `HEAD`.
pub struct GitRetriever;

impl Retriever for GitRetriever {
    fn name(&self) -> &'static str {
        "git (default)"
    }

    fn applies(&self) -> bool {
        true
    }

    fn commit_range(&mut self, ctx: &Context) -> Result<CommitRange> {
        let default_branch = &ctx.options.default_branch;
        ctx.log
            .verbose(&format!("\tusing default branch '{}'", default_branch));
        let base = git::common_ancestor(default_branch)?;
        let head = git::head_commit_hash()?;
        Ok(CommitRange::new(base, head))
    }
}
