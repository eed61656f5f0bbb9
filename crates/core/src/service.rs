// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The single entry point for state-changing operations.
//!
//! [`DecisionService`] composes the transition table with a
//! [`DecisionStore`] so that each status change is validated, applied and
//! audited as one unit. Errors are returned as-is: a conflict is never
//! retried here, since the transition may no longer be valid against the
//! fresh state.

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info};

use crate::audit::AuditReader;
use crate::clock::{ClockSource, SystemClock};
use crate::decision::{Action, AuditEntry, Decision, DecisionEdit, NewDecision, Status};
use crate::error::Result;
use crate::id::DEFAULT_PREFIX;
use crate::store::{DecisionStore, ListFilter};
use crate::transition;
use crate::validate::{validate_actor, validate_edit, validate_notes};

/// Decision lifecycle operations over a store.
pub struct DecisionService<S, C = SystemClock> {
    store: S,
    clock: C,
    prefix: String,
}

impl<S: DecisionStore> DecisionService<S> {
    /// Creates a service using the system clock and the default ID prefix.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: DecisionStore, C: ClockSource> DecisionService<S, C> {
    /// Creates a service with an injected clock.
    pub fn with_clock(store: S, clock: C) -> Self {
        DecisionService {
            store,
            clock,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Sets the prefix for newly generated IDs.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current time at the microsecond precision stores keep, so a returned
    /// decision equals the one read back.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(6)
    }

    /// Create a new pending decision owned by `actor`.
    pub fn create(&self, fields: NewDecision, actor: &str) -> Result<Decision> {
        let actor = validate_actor(actor)?;
        let decision = self
            .store
            .create_decision(fields, &actor, &self.prefix, self.now())?;
        info!(decision = %decision.id, actor = %actor, "created decision");
        Ok(decision)
    }

    pub fn get(&self, id: &str) -> Result<Decision> {
        debug!(decision = id, "get decision");
        self.store.get_decision(id)
    }

    pub fn list(&self, filter: &ListFilter) -> Result<Vec<Decision>> {
        debug!(?filter, "list decisions");
        self.store.list_decisions(filter)
    }

    /// Audit trail for a decision, most recent first.
    pub fn list_audit(&self, id: &str) -> Result<Vec<AuditEntry>> {
        AuditReader::new(&self.store).list_audit_entries(id)
    }

    /// A decision and its audit trail, read from one snapshot.
    pub fn get_with_audit(&self, id: &str) -> Result<(Decision, Vec<AuditEntry>)> {
        debug!(decision = id, "get decision with audit trail");
        self.store.get_decision_with_audit(id)
    }

    /// Move a decision to `requested`, validating against its current state.
    pub fn transition(
        &self,
        id: &str,
        requested: Status,
        actor: &str,
        notes: Option<&str>,
    ) -> Result<Decision> {
        let current = self.store.get_decision(id)?;
        self.transition_from(&current, requested, actor, notes)
    }

    /// Move a decision to `requested`, validating against an observed snapshot.
    ///
    /// The write only commits if the stored decision is still at
    /// `observed.version`; otherwise it fails with a conflict and nothing is
    /// written.
    pub fn transition_from(
        &self,
        observed: &Decision,
        requested: Status,
        actor: &str,
        notes: Option<&str>,
    ) -> Result<Decision> {
        let actor = validate_actor(actor)?;
        let notes = validate_notes(notes)?;
        transition::validate(observed.status, requested)?;

        let now = self.now();
        let notes = notes.unwrap_or_else(|| format!("Status changed to {requested}"));
        let entry = AuditEntry::new(
            observed.id.clone(),
            actor.clone(),
            Action::StatusChanged,
            now,
        )
        .with_statuses(observed.status, requested)
        .with_notes(Some(notes));

        let decider = actor.clone();
        let updated = self.store.atomic_update(
            &observed.id,
            observed.version,
            |d| {
                d.status = requested;
                d.updated_at = now;
                if requested.is_decided() && d.decided_at.is_none() {
                    d.decided_at = Some(now);
                    d.decided_by = Some(decider);
                }
            },
            entry,
        )?;

        info!(
            decision = %updated.id,
            from = %observed.status,
            to = %requested,
            actor = %actor,
            "transitioned decision"
        );
        Ok(updated)
    }

    /// Change descriptive fields of a decision. Status is never touched.
    pub fn edit(
        &self,
        id: &str,
        edit: DecisionEdit,
        actor: &str,
        notes: Option<&str>,
    ) -> Result<Decision> {
        let actor = validate_actor(actor)?;
        let notes = validate_notes(notes)?;
        let edit = validate_edit(edit)?;
        let current = self.store.get_decision(id)?;

        let now = self.now();
        let fields = edit.fields().join(", ");
        let notes = notes.unwrap_or_else(|| format!("Edited {fields}"));
        // The version guard below keeps current.status the stored status at commit
        let entry = AuditEntry::new(current.id.clone(), actor.clone(), Action::Edited, now)
            .with_statuses(current.status, current.status)
            .with_notes(Some(notes));

        let updated = self.store.atomic_update(
            &current.id,
            current.version,
            |d| {
                edit.apply(d);
                d.updated_at = now;
            },
            entry,
        )?;

        info!(decision = %updated.id, fields = %fields, actor = %actor, "edited decision");
        Ok(updated)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
