// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only access to a decision's audit trail.

use tracing::debug;

use crate::decision::{Action, AuditEntry, Status};
use crate::error::{Error, Result};
use crate::store::DecisionStore;

/// Ordered retrieval of audit entries.
pub struct AuditReader<'a, S> {
    store: &'a S,
}

impl<'a, S: DecisionStore> AuditReader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        AuditReader { store }
    }

    /// All entries for a decision, most recent first.
    ///
    /// Fails with [`Error::DecisionNotFound`] for an unknown decision, so an
    /// empty trail is never mistaken for one with no history.
    pub fn list_audit_entries(&self, decision_id: &str) -> Result<Vec<AuditEntry>> {
        if !self.store.decision_exists(decision_id)? {
            return Err(Error::DecisionNotFound(decision_id.to_string()));
        }
        let entries = self.store.list_audit_entries(decision_id)?;
        debug!(decision = decision_id, count = entries.len(), "read audit trail");
        Ok(entries)
    }

    /// All entries for a decision, oldest first.
    pub fn replay(&self, decision_id: &str) -> Result<Vec<AuditEntry>> {
        let mut entries = self.list_audit_entries(decision_id)?;
        entries.reverse();
        Ok(entries)
    }
}

/// Reconstructs a status from entries in chronological order.
///
/// `created` resets to pending; `status_changed` and `edited` entries carry
/// the status in force after them. Returns `None` for an empty trail.
pub fn replay_status(entries: &[AuditEntry]) -> Option<Status> {
    entries.iter().fold(None, |status, entry| match entry.action {
        Action::Created => Some(Status::Pending),
        Action::StatusChanged | Action::Edited => entry.new_status.or(status),
    })
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
