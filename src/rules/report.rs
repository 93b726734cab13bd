// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Infraction report and verdict printing.

use console::style;

use crate::output::Logger;

/// Infractions recorded for one commit, in check order.
#[derive(Debug, Clone)]
pub struct CommitInfractions {
    /// Offending commit hash.
    pub hash: String,
    /// Human-readable violation descriptions.
    pub violations: Vec<String>,
}

/// All infractions of a run, preserving commit encounter order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    entries: Vec<CommitInfractions>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation against a commit.
    pub fn add(&mut self, hash: &str, violation: impl Into<String>) {
        let violation = violation.into();
        match self.entries.iter_mut().find(|entry| entry.hash == hash) {
            Some(entry) => entry.violations.push(violation),
            None => self.entries.push(CommitInfractions {
                hash: hash.to_string(),
                violations: vec![violation],
            }),
        }
    }

    /// Whether no commit has any violation.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of offending commits.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The recorded infractions, in commit encounter order.
    pub fn entries(&self) -> &[CommitInfractions] {
        &self.entries
    }

    /// Print the verdict and return the process exit code.
    pub fn check(&self, log: &Logger) -> i32 {
        if !self.is_empty() {
            log.print(&format!("{}", style("Missing sign-off(s):").red().bold()));
            log.print("");
            for entry in &self.entries {
                log.print(&format!("\t{}", style(&entry.hash).cyan()));
                for violation in &entry.violations {
                    log.print(&format!("\t\t{}", violation));
                }
            }
            return 1;
        }
        log.print(&format!("{}", style("All good!").green()));
        0
    }
}
