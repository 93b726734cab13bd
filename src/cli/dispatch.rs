// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Check execution flow.

use crate::ci;
use crate::config::{Context, Options};
use crate::error::Result;
use crate::git;
use crate::output::Logger;
use crate::rules;

use super::args::Cli;

/// Run the check with the given arguments and return the process exit code.
///
/// Configuration errors are returned as `Err`; everything that happens after
/// configuration is resolved reports through the logger and the exit code.
pub fn run(cli: Cli) -> Result<i32> {
    let mut options = Options::from_cli(&cli)?;
    let log = Logger::new(options.quiet, options.verbose);

    log.verbose("Options:");
    for (name, value) in options.dump() {
        log.verbose(&format!("\t{}: {}", name, value));
    }
    log.verbose("");

    // Resolve the actual default branch before anything compares against it
    if options.default_branch_from_remote {
        match git::default_branch_from_remote(&options.default_remote) {
            Ok(default_branch) => {
                log.verbose(&format!(
                    "\tgot default branch '{}' from remote '{}'",
                    default_branch, options.default_remote
                ));
                options.default_branch = default_branch;
            }
            Err(error) => {
                log.print(&format!("error: {}", error));
                return Ok(1);
            }
        }
    }

    let ctx = Context::new(options);

    let mut retriever = ci::detect();
    ctx.log.print(&format!("Detected: {}", retriever.name()));

    let range = match retriever.commit_range(&ctx) {
        Ok(range) => range,
        Err(error) => {
            ctx.log.print(&format!("error: {}", error));
            return Ok(1);
        }
    };

    ctx.log.print("");
    if range.is_empty() {
        ctx.log.print("No commits to check");
        return Ok(0);
    }

    ctx.log.print(&format!("Checking commits: {}", range));
    ctx.log.print("");

    let commits = match retriever.commits(&ctx, &range) {
        Ok(commits) => commits,
        Err(error) => {
            ctx.log.print(&format!("error: {}", error));
            return Ok(1);
        }
    };
    tracing::debug!("retrieved {} commits", commits.len());

    let report = rules::process_commits(&ctx, &commits);
    let exit_code = report.check(&ctx.log);

    if commits.is_empty() {
        ctx.log.print("Warning: no commits were actually checked");
    }

    Ok(exit_code)
}
