// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Parsing of raw commit data into commit records.

use crate::commit::Commit;
use crate::error::{GitError, Result};
use lazy_static::lazy_static;
use regex::Regex;

/// Separator between commit records in `git log` output (0x1E).
pub const RECORD_SEPARATOR: char = '\x1e';

lazy_static! {
    /// Regex for extracting a name and an email from a 'name <email>' string.
    static ref NAME_AND_EMAIL: Regex = Regex::new(r"(.*) <(.*)>").unwrap();
}

/// Split a raw multi-record blob into individual non-empty records.
///
/// Outer newlines are trimmed before splitting and each record is stripped
/// of its surrounding newlines, so the result preserves the original record
/// boundaries without empty entries.
pub fn split_records(data: &str, separator: char) -> Vec<&str> {
    data.trim_matches('\n')
        .split(separator)
        .map(|record| record.trim_matches('\n'))
        .filter(|record| !record.is_empty())
        .collect()
}

/// Parse one record into a commit: hash, author line, title, body lines.
///
/// A malformed author line yields `None` author fields; a record missing
/// one of the three leading positional lines is an error.
pub fn parse_record(record: &str) -> Result<Commit> {
    let mut lines = record.split('\n');
    let (hash, author_line, title) = match (lines.next(), lines.next(), lines.next()) {
        (Some(hash), Some(author_line), Some(title)) => (hash, author_line, title),
        _ => {
            return Err(GitError::MalformedCommitRecord {
                record: record.to_string(),
            }
            .into())
        }
    };
    let body: Vec<String> = lines.map(str::to_string).collect();

    let (author_name, author_email) = match extract_name_and_email(author_line) {
        Some((name, email)) => (Some(name), Some(email)),
        None => (None, None),
    };

    Ok(Commit {
        hash: hash.to_string(),
        title: title.to_string(),
        body,
        author_name,
        author_email,
        // Merge commits were already excluded at the source.
        is_merge_commit: false,
    })
}

/// Extract a name and an email from a 'name <email>' string.
pub fn extract_name_and_email(name_and_email: &str) -> Option<(String, String)> {
    let captures = NAME_AND_EMAIL.captures(name_and_email)?;
    match (captures.get(1), captures.get(2)) {
        (Some(name), Some(email)) => Some((name.as_str().to_string(), email.as_str().to_string())),
        _ => None,
    }
}
