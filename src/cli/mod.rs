// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI module for dco-guard.
//!
//! This module handles command-line argument parsing and check execution.

pub mod args;
mod dispatch;

pub use args::Cli;
pub use dispatch::run;
