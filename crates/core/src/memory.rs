// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`DecisionStore`], used by tests and embedders that do not
//! need durability. A single mutex guards all state, so every operation is
//! atomic with respect to every other.

use std::sync::{Mutex, MutexGuard};

use tracing::warn;

use crate::decision::{AuditEntry, Decision};
use crate::error::{Error, Result};
use crate::store::{DecisionStore, ListFilter};

#[derive(Debug, Default)]
struct Inner {
    /// Decisions in insertion order.
    decisions: Vec<Decision>,
    /// Audit entries in commit order.
    entries: Vec<AuditEntry>,
    next_entry_id: i64,
}

impl Inner {
    fn find_mut(&mut self, id: &str) -> Option<&mut Decision> {
        self.decisions.iter_mut().find(|d| d.id == id)
    }

    fn trail(&self, decision_id: &str) -> Vec<AuditEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| e.decision_id == decision_id)
            .cloned()
            .collect()
    }

    fn append(&mut self, entry: &AuditEntry) {
        let latest = self
            .entries
            .iter()
            .filter(|e| e.decision_id == entry.decision_id)
            .map(|e| e.created_at)
            .max();

        let mut entry = entry.clone();
        if let Some(latest) = latest {
            if latest > entry.created_at {
                entry.created_at = latest;
            }
        }
        self.next_entry_id += 1;
        entry.id = self.next_entry_id;
        self.entries.push(entry);
    }
}

/// Thread-safe in-memory decision store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic mid-operation cannot leave partial state: every write below
        // completes its checks before touching anything.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DecisionStore for MemoryStore {
    fn insert_decision(&self, decision: &Decision, entry: &AuditEntry) -> Result<()> {
        let mut inner = self.lock();
        if inner.decisions.iter().any(|d| d.id == decision.id) {
            return Err(Error::DuplicateId(decision.id.clone()));
        }
        inner.decisions.push(decision.clone());
        inner.append(entry);
        Ok(())
    }

    fn get_decision(&self, id: &str) -> Result<Decision> {
        self.lock()
            .decisions
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| Error::DecisionNotFound(id.to_string()))
    }

    fn decision_exists(&self, id: &str) -> Result<bool> {
        Ok(self.lock().decisions.iter().any(|d| d.id == id))
    }

    fn list_decisions(&self, filter: &ListFilter) -> Result<Vec<Decision>> {
        let inner = self.lock();
        let mut decisions: Vec<Decision> = inner
            .decisions
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        // Newest first; reversing insertion order breaks timestamp ties
        decisions.reverse();
        decisions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(decisions)
    }

    fn atomic_update<F>(
        &self,
        id: &str,
        expected_version: i64,
        mutate: F,
        mut entry: AuditEntry,
    ) -> Result<Decision>
    where
        F: FnOnce(&mut Decision),
    {
        let mut inner = self.lock();
        let stored = inner
            .find_mut(id)
            .ok_or_else(|| Error::DecisionNotFound(id.to_string()))?;

        if stored.version != expected_version {
            warn!(
                decision = id,
                expected = expected_version,
                actual = stored.version,
                "rejected stale update"
            );
            return Err(Error::Conflict {
                id: id.to_string(),
                expected: expected_version,
                actual: stored.version,
            });
        }

        let mut updated = stored.clone();
        mutate(&mut updated);
        updated.id = stored.id.clone();
        updated.owner = stored.owner.clone();
        updated.created_at = stored.created_at;
        updated.version = expected_version + 1;
        *stored = updated.clone();

        entry.decision_id = id.to_string();
        inner.append(&entry);
        Ok(updated)
    }

    fn list_audit_entries(&self, decision_id: &str) -> Result<Vec<AuditEntry>> {
        Ok(self.lock().trail(decision_id))
    }

    fn get_decision_with_audit(&self, id: &str) -> Result<(Decision, Vec<AuditEntry>)> {
        let inner = self.lock();
        let decision = inner
            .decisions
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| Error::DecisionNotFound(id.to_string()))?;
        Ok((decision, inner.trail(id)))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
