// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Decision status state machine.
//!
//! ```text
//! pending   -> in_review | approved | rejected | deferred
//! in_review -> approved  | rejected | deferred | pending
//! deferred  -> pending   | in_review | approved | rejected
//! approved  -> (final)
//! rejected  -> (final)
//! ```
//!
//! Self-transitions are never allowed. The table is pure: no I/O, no clock.

use crate::decision::Status;
use crate::error::{Error, Result};

/// Returns the statuses reachable from `from`, in lifecycle order.
pub fn allowed_targets(from: Status) -> &'static [Status] {
    match from {
        Status::Pending => &[
            Status::InReview,
            Status::Approved,
            Status::Rejected,
            Status::Deferred,
        ],
        Status::InReview => &[
            Status::Pending,
            Status::Approved,
            Status::Rejected,
            Status::Deferred,
        ],
        Status::Deferred => &[
            Status::Pending,
            Status::InReview,
            Status::Approved,
            Status::Rejected,
        ],
        Status::Approved | Status::Rejected => &[],
    }
}

/// Check that `current -> requested` is an edge of the state machine.
pub fn validate(current: Status, requested: Status) -> Result<()> {
    let allowed = match (current, requested) {
        (Status::Pending, Status::InReview)
        | (Status::Pending, Status::Approved)
        | (Status::Pending, Status::Rejected)
        | (Status::Pending, Status::Deferred) => true,
        (Status::InReview, Status::Approved)
        | (Status::InReview, Status::Rejected)
        | (Status::InReview, Status::Deferred)
        | (Status::InReview, Status::Pending) => true,
        (Status::Deferred, Status::Pending)
        | (Status::Deferred, Status::InReview)
        | (Status::Deferred, Status::Approved)
        | (Status::Deferred, Status::Rejected) => true,
        (Status::Approved, _) | (Status::Rejected, _) => false,
        (Status::Pending, Status::Pending)
        | (Status::InReview, Status::InReview)
        | (Status::Deferred, Status::Deferred) => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(Error::InvalidTransition {
            from: current.to_string(),
            to: requested.to_string(),
            valid_targets: current.valid_targets(),
        })
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
