// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Sign-off validation rules.
//!
//! This module checks commits for Developer Certificate of Origin
//! sign-offs and collects infractions into a report.

mod report;
mod signoff;

pub use report::{CommitInfractions, Report};
pub use signoff::{is_valid_email, process_commits, TRAILER_KEY_SIGNED_OFF_BY};
