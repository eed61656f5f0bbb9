// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for dl-core operations.

use thiserror::Error;

/// Broad classification of an [`Error`], used by callers to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input. Fix the input; never retried.
    Validation,
    /// The referenced decision does not exist.
    NotFound,
    /// The requested status is not reachable from the current one.
    InvalidTransition,
    /// Concurrent modification detected. Re-read and retry if still wanted.
    Conflict,
    /// Storage or serialization failure.
    Storage,
}

/// All possible errors that can occur in dl-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("decision not found: {0}")]
    DecisionNotFound(String),

    #[error("invalid status transition: cannot go from {from} to {to}\n  hint: from '{from}' you can go to: {valid_targets}")]
    InvalidTransition {
        from: String,
        to: String,
        valid_targets: String,
    },

    #[error("decision {0} already exists")]
    DuplicateId(String),

    #[error("decision {id} was modified concurrently (expected version {expected}, found {actual})\n  hint: re-read the decision and retry if the change still applies")]
    Conflict {
        id: String,
        expected: i64,
        actual: i64,
    },

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("{field} too long ({actual} chars, max {max})")]
    FieldTooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("invalid decision type: '{0}'\n  hint: valid types are: strategic, budget, resource, operational")]
    InvalidDecisionType(String),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: critical, high, medium, low")]
    InvalidPriority(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: pending, in_review, approved, rejected, deferred")]
    InvalidStatus(String),

    #[error("invalid action: '{0}'")]
    InvalidAction(String),

    #[error("invalid tab: '{0}'\n  hint: valid tabs are: all, pending, decided")]
    InvalidTab(String),

    #[error("nothing to edit\n  hint: pass at least one field to change")]
    NothingToEdit,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl Error {
    /// Maps this error onto the caller-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DecisionNotFound(_) => ErrorKind::NotFound,
            Error::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Error::Conflict { .. } | Error::DuplicateId(_) => ErrorKind::Conflict,
            Error::FieldEmpty { .. }
            | Error::FieldTooLong { .. }
            | Error::InvalidValue { .. }
            | Error::InvalidDecisionType(_)
            | Error::InvalidPriority(_)
            | Error::InvalidStatus(_)
            | Error::InvalidAction(_)
            | Error::InvalidTab(_)
            | Error::NothingToEdit => ErrorKind::Validation,
            Error::Database(_) | Error::Io(_) | Error::Json(_) | Error::CorruptedData(_) => {
                ErrorKind::Storage
            }
        }
    }

    /// Returns true if re-reading and retrying the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

/// A specialized Result type for dl-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
