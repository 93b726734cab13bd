// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! GitHub Actions retriever.
//!
//! Resolves the commit range from the workflow event payload and retrieves
//! commit data through the repository's compare API endpoint instead of
//! local git, since workflow checkouts are shallow by default.

use std::fs;

use reqwest::header;
use serde::Deserialize;

use crate::ci::{env_var, require_env, Retriever};
use crate::commit::{Commit, CommitRange};
use crate::config::Context;
use crate::error::{ApiError, CiError, Result};

/// User-Agent header sent with API requests.
const APP_USER_AGENT: &str = "dco-guard";

/// Retriever for GitHub Actions workflows.
///
/// `commit_range` reads the event payload and keeps it, along with the API
/// token, for the compare request issued by `commits`.
#[derive(Default)]
pub struct GitHubRetriever {
    token: Option<String>,
    event_payload: Option<EventPayload>,
}

/// Workflow event payload fields consumed by the retriever.
#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestEvent>,
    before: Option<String>,
    created: Option<bool>,
    #[serde(default)]
    commits: Vec<PushCommit>,
    head_commit: Option<PushCommit>,
    repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
struct PullRequestEvent {
    base: BranchRef,
    head: BranchRef,
}

#[derive(Debug, Deserialize)]
struct BranchRef {
    sha: String,
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Debug, Deserialize)]
struct PushCommit {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Repository {
    compare_url: String,
}

/// Compare API response, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct CompareResponse {
    commits: Vec<CompareCommit>,
}

#[derive(Debug, Deserialize)]
struct CompareCommit {
    sha: String,
    commit: CommitDetail,
    #[serde(default)]
    parents: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
    author: CommitAuthor,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    name: String,
    email: String,
}

impl GitHubRetriever {
    /// Create a retriever with no resolved range yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn load_event_payload(path: &str) -> Result<EventPayload> {
        let contents = fs::read_to_string(path).map_err(|error| CiError::PayloadUnreadable {
            path: path.to_string(),
            message: error.to_string(),
        })?;
        let payload = serde_json::from_str(&contents).map_err(|error| CiError::PayloadInvalid {
            message: error.to_string(),
        })?;
        Ok(payload)
    }
}

impl Retriever for GitHubRetriever {
    fn name(&self) -> &'static str {
        "GitHub Actions"
    }

    fn applies(&self) -> bool {
        env_var("GITHUB_ACTIONS").as_deref() == Some("true")
    }

    fn commit_range(&mut self, ctx: &Context) -> Result<CommitRange> {
        let token = match env_var("GITHUB_TOKEN") {
            Some(token) => token,
            None => {
                ctx.log
                    .print("Did you forget to include this in your workflow config?");
                ctx.log
                    .print("\n\tenv:\n\t\tGITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}");
                return Err(CiError::MissingEnvVar {
                    name: "GITHUB_TOKEN".to_string(),
                }
                .into());
            }
        };

        let payload_path = require_env("GITHUB_EVENT_PATH")?;
        let payload = Self::load_event_payload(&payload_path)?;
        let event_name = require_env("GITHUB_EVENT_NAME")?;

        let range = range_from_payload(ctx, &event_name, &payload)?;
        self.token = Some(token);
        self.event_payload = Some(payload);
        Ok(range)
    }

    fn commits(&self, _ctx: &Context, range: &CommitRange) -> Result<Vec<Commit>> {
        let token = self.token.as_ref().ok_or(CiError::RangeNotResolved)?;
        let payload = self.event_payload.as_ref().ok_or(CiError::RangeNotResolved)?;
        let repository = payload
            .repository
            .as_ref()
            .ok_or_else(|| CiError::PayloadInvalid {
                message: "event payload has no 'repository' object".to_string(),
            })?;

        let compare_url = repository
            .compare_url
            .replace("{base}", &range.base)
            .replace("{head}", &range.head);
        tracing::debug!("requesting commit comparison: {}", compare_url);

        let client = reqwest::blocking::Client::new();
        let response = client
            .get(&compare_url)
            .header(header::USER_AGENT, APP_USER_AGENT)
            .header(header::AUTHORIZATION, format!("token {}", token))
            .send()
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            }
            .into());
        }

        let compare: CompareResponse = response.json().map_err(ApiError::from)?;
        Ok(compare.commits.into_iter().map(commit_from_compare).collect())
    }
}

/// Resolve the commit range from the event payload for a given event type.
fn range_from_payload(
    ctx: &Context,
    event_name: &str,
    payload: &EventPayload,
) -> Result<CommitRange> {
    match event_name {
        "pull_request" => {
            let pull_request =
                payload
                    .pull_request
                    .as_ref()
                    .ok_or_else(|| CiError::PayloadInvalid {
                        message: "pull_request event has no 'pull_request' object".to_string(),
                    })?;
            ctx.log.verbose(&format!(
                "\ton pull request branch '{}': will check commits off of base branch '{}'",
                pull_request.head.ref_name, pull_request.base.ref_name
            ));
            Ok(CommitRange::new(
                pull_request.base.sha.clone(),
                pull_request.head.sha.clone(),
            ))
        }
        "push" => {
            let head_commit =
                payload
                    .head_commit
                    .as_ref()
                    .ok_or_else(|| CiError::PayloadInvalid {
                        message: "push event has no head commit".to_string(),
                    })?;
            let base = if payload.created.unwrap_or(false) {
                // A freshly created branch has no 'before' commit; use the
                // parent of the earliest pushed commit instead.
                let first_commit =
                    payload
                        .commits
                        .first()
                        .ok_or_else(|| CiError::PayloadInvalid {
                            message: "push event for a created branch lists no commits".to_string(),
                        })?;
                format!("{}^", first_commit.id)
            } else {
                payload
                    .before
                    .clone()
                    .ok_or_else(|| CiError::PayloadInvalid {
                        message: "push event has no 'before' commit".to_string(),
                    })?
            };
            Ok(CommitRange::new(base, head_commit.id.clone()))
        }
        other => Err(CiError::UnsupportedEvent {
            event: other.to_string(),
        }
        .into()),
    }
}

/// Convert one compare API commit object into a commit record.
fn commit_from_compare(compare_commit: CompareCommit) -> Commit {
    let mut lines = compare_commit
        .commit
        .message
        .split('\n')
        .filter(|line| !line.is_empty());
    let title = lines.next().unwrap_or_default().to_string();
    let body: Vec<String> = lines.map(str::to_string).collect();
    Commit {
        hash: compare_commit.sha,
        title,
        body,
        author_name: Some(compare_commit.commit.author.name),
        author_email: Some(compare_commit.commit.author.email),
        is_merge_commit: compare_commit.parents.len() > 1,
    }
}
