// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Sign-off extraction and checking.

use lazy_static::lazy_static;
use regex::Regex;

use crate::commit::Commit;
use crate::config::Context;
use crate::git::extract_name_and_email;
use crate::rules::Report;

/// Trailer key marking a sign-off line in a commit body.
pub const TRAILER_KEY_SIGNED_OFF_BY: &str = "Signed-off-by:";

lazy_static! {
    // Minimal shape check, not full RFC 5322 validation
    static ref EMAIL_SHAPE: Regex = Regex::new(r"^\S+@\S+\.\S+").unwrap();
}

/// Whether an email address has a plausible shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Check all commits for sign-off infractions.
///
/// Merge commits are skipped unless merge commit checking is enabled, and
/// commits from excluded authors are skipped entirely. Every other commit
/// must carry at least one well-formed sign-off whose name and email match
/// the commit author.
pub fn process_commits(ctx: &Context, commits: &[Commit]) -> Report {
    let options = &ctx.options;
    let log = &ctx.log;
    let mut report = Report::new();

    for commit in commits {
        if commit.is_merge_commit && !options.check_merge_commits {
            log.verbose(&format!("\tignoring merge commit: {}", commit.hash));
            log.verbose("");
            continue;
        }

        if let Some(author_email) = commit.author_email.as_deref() {
            if options.is_excluded(author_email) {
                log.verbose(&format!(
                    "\tignoring commit from excluded author '{}': {}",
                    author_email, commit.hash
                ));
                log.verbose("");
                continue;
            }
        }

        log.verbose(&format!(
            "\t{}{}",
            commit.hash,
            if commit.is_merge_commit {
                " (merge commit)"
            } else {
                ""
            }
        ));
        log.verbose(&format!(
            "\t{} {}",
            commit.author_name.as_deref().unwrap_or("N/A"),
            commit.author_email.as_deref().unwrap_or("N/A")
        ));
        log.verbose(&format!("\t{}", commit.title));
        log.verbose(&format!("\t{}", commit.body.join("\n\t")));

        let (author_name, author_email) = match (
            commit.author_name.as_deref(),
            commit.author_email.as_deref(),
        ) {
            (Some(name), Some(email)) => (name, email),
            _ => {
                report.add(
                    &commit.hash,
                    format!("could not extract author data for commit: {}", commit.hash),
                );
                continue;
            }
        };

        let sign_offs: Vec<&str> = commit
            .body
            .iter()
            .filter_map(|body_line| body_line.strip_prefix(TRAILER_KEY_SIGNED_OFF_BY))
            .map(|sign_off| sign_off.trim_matches(' '))
            .collect();

        if sign_offs.is_empty() {
            report.add(&commit.hash, "no sign-off found");
            continue;
        }

        let mut valid_sign_offs: Vec<(String, String)> = Vec::new();
        for sign_off in &sign_offs {
            match extract_name_and_email(sign_off) {
                Some((name, email)) => {
                    log.verbose(&format!("\t\tfound sign-off: {} {}", name, email));
                    if !is_valid_email(&email) {
                        report.add(&commit.hash, format!("invalid email: {}", email));
                    } else {
                        valid_sign_offs.push((name, email));
                    }
                }
                None => {
                    report.add(&commit.hash, format!("invalid sign-off: '{}'", sign_off));
                }
            }
        }

        let author_signed = valid_sign_offs
            .iter()
            .any(|(name, email)| name.as_str() == author_name && email.as_str() == author_email);
        if !author_signed {
            report.add(
                &commit.hash,
                format!(
                    "sign-off not found for commit author: {} {}; found: {:?}",
                    author_name, author_email, sign_offs
                ),
            );
        }

        log.verbose("");
    }

    report
}
