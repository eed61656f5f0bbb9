// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Storage abstraction for decisions and their audit trail.
//!
//! The [`DecisionStore`] trait is implemented by the SQLite-backed
//! [`Database`](crate::db::Database) and by the in-memory
//! [`MemoryStore`](crate::memory::MemoryStore). Both give the same guarantees:
//!
//! - a decision and its paired audit entry are written in one atomic unit;
//! - [`DecisionStore::atomic_update`] is the only way to change a stored
//!   decision, and it refuses to write over a version it was not given;
//! - audit entries are append-only and come back most recent first.

use chrono::{DateTime, Utc};

use crate::decision::{Action, AuditEntry, Decision, NewDecision, Status};
use crate::error::{Error, Result};
use crate::id::generate_unique_id;
use crate::validate::validate_new_decision;

/// How many times creation re-allocates an ID that a concurrent writer took.
const MAX_ID_ATTEMPTS: usize = 8;

/// Store-side listing criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Only decisions with exactly this status.
    pub status: Option<Status>,
    /// Case-insensitive substring over title and project name.
    pub search: Option<String>,
}

impl ListFilter {
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns the search needle, lowercased, or `None` when blank.
    pub(crate) fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Applies this filter to one decision.
    pub fn matches(&self, decision: &Decision) -> bool {
        if let Some(status) = self.status {
            if decision.status != status {
                return false;
            }
        }
        match self.needle() {
            Some(needle) => matches_text(decision, &needle),
            None => true,
        }
    }
}

/// Case-insensitive substring match over title and project name.
/// `needle` must already be lowercase.
pub(crate) fn matches_text(decision: &Decision, needle: &str) -> bool {
    decision.title.to_lowercase().contains(needle)
        || decision
            .project_name
            .as_deref()
            .is_some_and(|p| p.to_lowercase().contains(needle))
}

/// Durable keyed storage for decisions and audit entries.
pub trait DecisionStore {
    /// Persist a fully-formed decision together with its `created` entry,
    /// as a single atomic unit.
    fn insert_decision(&self, decision: &Decision, entry: &AuditEntry) -> Result<()>;

    /// Get a decision by ID.
    fn get_decision(&self, id: &str) -> Result<Decision>;

    /// Check if a decision exists.
    fn decision_exists(&self, id: &str) -> Result<bool>;

    /// List decisions, most recently created first.
    fn list_decisions(&self, filter: &ListFilter) -> Result<Vec<Decision>>;

    /// Apply `mutate` to the stored decision and append `entry`, atomically.
    ///
    /// Fails with [`Error::Conflict`](crate::Error::Conflict) if the stored
    /// version is no longer `expected_version`, and with
    /// [`Error::DecisionNotFound`](crate::Error::DecisionNotFound) if the
    /// decision does not exist. On success the stored version is bumped by
    /// one and the updated decision is returned.
    fn atomic_update<F>(
        &self,
        id: &str,
        expected_version: i64,
        mutate: F,
        entry: AuditEntry,
    ) -> Result<Decision>
    where
        F: FnOnce(&mut Decision);

    /// All audit entries for a decision, most recent first.
    fn list_audit_entries(&self, decision_id: &str) -> Result<Vec<AuditEntry>>;

    /// A decision and its audit trail (most recent first) read from one
    /// snapshot, so the status shown always agrees with the trail shown.
    ///
    /// The provided version reads twice; stores that can see concurrent
    /// writers override it.
    fn get_decision_with_audit(&self, id: &str) -> Result<(Decision, Vec<AuditEntry>)> {
        let decision = self.get_decision(id)?;
        let entries = self.list_audit_entries(id)?;
        Ok((decision, entries))
    }

    /// Validate `fields`, allocate an ID and persist a new pending decision
    /// with its `created` audit entry.
    fn create_decision(
        &self,
        fields: NewDecision,
        owner: &str,
        prefix: &str,
        now: DateTime<Utc>,
    ) -> Result<Decision> {
        let fields = validate_new_decision(fields)?;
        let mut decision = Decision {
            id: String::new(),
            owner: owner.to_string(),
            title: fields.title,
            description: fields.description,
            rationale: fields.rationale,
            impact: fields.impact,
            decision_type: fields.decision_type,
            priority: fields.priority,
            status: Status::Pending,
            project_name: fields.project_name,
            amount: fields.amount,
            due_date: fields.due_date,
            decided_at: None,
            decided_by: None,
            created_at: now,
            updated_at: now,
            version: 1,
        };

        for _ in 0..MAX_ID_ATTEMPTS {
            decision.id = generate_unique_id(prefix, &decision.title, &now, |candidate| {
                self.decision_exists(candidate)
            })?;
            let entry =
                AuditEntry::new(decision.id.clone(), owner.to_string(), Action::Created, now);
            match self.insert_decision(&decision, &entry) {
                Ok(()) => return Ok(decision),
                // Another writer took the id between the check and the insert
                Err(Error::DuplicateId(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(Error::DuplicateId(decision.id))
    }
}

impl<S: DecisionStore> DecisionStore for &S {
    fn insert_decision(&self, decision: &Decision, entry: &AuditEntry) -> Result<()> {
        (*self).insert_decision(decision, entry)
    }

    fn get_decision(&self, id: &str) -> Result<Decision> {
        (*self).get_decision(id)
    }

    fn decision_exists(&self, id: &str) -> Result<bool> {
        (*self).decision_exists(id)
    }

    fn list_decisions(&self, filter: &ListFilter) -> Result<Vec<Decision>> {
        (*self).list_decisions(filter)
    }

    fn atomic_update<F>(
        &self,
        id: &str,
        expected_version: i64,
        mutate: F,
        entry: AuditEntry,
    ) -> Result<Decision>
    where
        F: FnOnce(&mut Decision),
    {
        (*self).atomic_update(id, expected_version, mutate, entry)
    }

    fn list_audit_entries(&self, decision_id: &str) -> Result<Vec<AuditEntry>> {
        (*self).list_audit_entries(decision_id)
    }

    fn get_decision_with_audit(&self, id: &str) -> Result<(Decision, Vec<AuditEntry>)> {
        (*self).get_decision_with_audit(id)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
