// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! This module shells out to the system `git` binary and parses its output
//! into commit records.

pub mod commands;
pub mod parser;

pub use commands::{
    common_ancestor, default_branch_from_remote, fetch_branch, head_commit_hash, log_commits, run,
};
pub use parser::{extract_name_and_email, parse_record, split_records, RECORD_SEPARATOR};
