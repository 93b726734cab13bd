// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit value types shared by all retrievers.

use std::fmt;

/// A single commit as seen by the sign-off checks.
///
/// Built once by the active retriever and never mutated afterwards. Author
/// fields are `None` when the author line could not be parsed; validation
/// reports that as an infraction rather than failing the run.
#[derive(Debug, Clone)]
pub struct Commit {
    /// Full commit hash.
    pub hash: String,
    /// Subject line.
    pub title: String,
    /// Body lines, in order.
    pub body: Vec<String>,
    /// Author name, if it could be parsed.
    pub author_name: Option<String>,
    /// Author email, if it could be parsed.
    pub author_email: Option<String>,
    /// Whether the commit has more than one parent.
    pub is_merge_commit: bool,
}

/// The open-start range `]base, head]` of commits to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    /// Last commit already known to be checked (excluded from the range).
    pub base: String,
    /// Latest commit of the proposed change.
    pub head: String,
}

impl CommitRange {
    /// Create a range from base and head hashes.
    pub fn new(base: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            head: head.into(),
        }
    }

    /// True when base and head point at the same commit.
    pub fn is_empty(&self) -> bool {
        self.base == self.head
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.base, self.head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_display() {
        let range = CommitRange::new("abc", "def");
        assert_eq!("abc..def", range.to_string());
    }

    #[test]
    fn test_range_is_empty() {
        assert!(CommitRange::new("abc", "abc").is_empty());
        assert!(!CommitRange::new("abc", "def").is_empty());
    }
}
