// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the dlrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'dl init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("invalid prefix: must be 2+ lowercase alphanumeric with at least one letter")]
    InvalidPrefix,

    #[error("workspace not found: {0}\n  hint: the workspace directory must exist before linking to it")]
    WorkspaceNotFound(String),

    #[error("invalid date '{value}'\n  hint: use YYYY-MM-DD, e.g. 2026-12-31")]
    InvalidDate { value: String },

    #[error("invalid amount '{value}'\n  hint: use a plain number, e.g. 125000 or 99.50")]
    InvalidAmount { value: String },

    #[error("{0}")]
    Core(#[from] dl_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the core error this wraps, if any.
    pub fn core(&self) -> Option<&dl_core::Error> {
        match self {
            Error::Core(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized Result type for dlrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
