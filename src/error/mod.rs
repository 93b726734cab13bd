// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for the dco-guard application.
//!
//! This module defines all error types used throughout the application,
//! with proper error categorization and context propagation.

use thiserror::Error;

/// The main error type for dco-guard operations.
#[derive(Error, Debug)]
pub enum DcoError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // CI environment errors
    #[error("CI environment error: {0}")]
    Ci(#[from] CiError),

    // API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("'quiet' and 'verbose' cannot both be set")]
    QuietAndVerbose,

    #[error("'default-branch' and 'default-branch-from-remote' cannot both be set")]
    BranchAndBranchFromRemote,

    #[error("invalid boolean value for '{variable}': '{value}'")]
    InvalidBool { variable: String, value: String },

    #[error("invalid exclude pattern '{pattern}': {message}")]
    InvalidExcludePattern { pattern: String, message: String },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    #[error("'{command}' failed: {output}")]
    CommandFailed { command: String, output: String },

    #[error("could not parse commit record: '{record}'")]
    MalformedCommitRecord { record: String },

    #[error("could not determine the default branch of remote '{remote}'")]
    RemoteHeadNotFound { remote: String },
}

/// CI-environment-related errors.
#[derive(Error, Debug)]
pub enum CiError {
    #[error("required environment variable not set: '{name}'")]
    MissingEnvVar { name: String },

    #[error("could not read event payload '{path}': {message}")]
    PayloadUnreadable { path: String, message: String },

    #[error("invalid event payload: {message}")]
    PayloadInvalid { message: String },

    #[error("unsupported workflow event: '{event}'")]
    UnsupportedEvent { event: String },

    #[error("commit range has not been resolved yet")]
    RangeNotResolved,
}

/// API-related errors (GitHub compare endpoint).
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Result type alias for dco-guard operations.
pub type Result<T> = std::result::Result<T, DcoError>;
