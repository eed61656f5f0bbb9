// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core decision types for the decision log.
//!
//! This module contains the fundamental data types: Decision, DecisionType,
//! Priority, Status, Action, and AuditEntry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Classification of a decision by the kind of commitment it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    /// Direction-setting choice affecting the portfolio.
    Strategic,
    /// Spending approval or reallocation.
    Budget,
    /// Staffing or capacity allocation.
    Resource,
    /// Day-to-day execution choice.
    Operational,
}

impl DecisionType {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionType::Strategic => "strategic",
            DecisionType::Budget => "budget",
            DecisionType::Resource => "resource",
            DecisionType::Operational => "operational",
        }
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DecisionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "strategic" => Ok(DecisionType::Strategic),
            "budget" => Ok(DecisionType::Budget),
            "resource" => Ok(DecisionType::Resource),
            "operational" => Ok(DecisionType::Operational),
            _ => Err(Error::InvalidDecisionType(s.to_string())),
        }
    }
}

/// Urgency of a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Sort rank, 0 being the most urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

/// Lifecycle status of a decision.
///
/// Transitions are governed by [`crate::transition::validate`]. Approved and
/// rejected are terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Awaiting a decision. Initial state for new decisions.
    Pending,
    /// Under active review.
    InReview,
    /// Committed to. Terminal.
    Approved,
    /// Declined. Terminal.
    Rejected,
    /// Postponed; may be picked up again.
    Deferred,
}

impl Status {
    /// Every status, in lifecycle order.
    pub const ALL: [Status; 5] = [
        Status::Pending,
        Status::InReview,
        Status::Approved,
        Status::Rejected,
        Status::Deferred,
    ];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InReview => "in_review",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
            Status::Deferred => "deferred",
        }
    }

    /// Check if a transition from this status to target is valid.
    pub fn can_transition_to(&self, target: Status) -> bool {
        crate::transition::validate(*self, target).is_ok()
    }

    /// Get valid transition targets as a formatted string.
    pub fn valid_targets(&self) -> String {
        let targets = crate::transition::allowed_targets(*self);
        if targets.is_empty() {
            return format!("(none, {} is final)", self.as_str());
        }
        targets
            .iter()
            .map(Status::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns true if no further transition is allowed (approved or rejected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Approved | Status::Rejected)
    }

    /// Returns true if the decision has been made, i.e. it belongs on the decided tab.
    pub fn is_decided(&self) -> bool {
        self.is_terminal()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "in_review" | "in-review" => Ok(Status::InReview),
            "approved" => Ok(Status::Approved),
            "rejected" => Ok(Status::Rejected),
            "deferred" => Ok(Status::Deferred),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// A tracked executive decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Unique identifier (format: `{prefix}-{hash}`). Immutable.
    pub id: String,
    /// Actor who created the decision. Immutable.
    pub owner: String,
    /// Short summary of what is being decided.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    pub decision_type: DecisionType,
    pub priority: Priority,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// When the decision first became approved or rejected. Never cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
    /// Who first approved or rejected the decision. Never cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency token, bumped by every committed mutation.
    pub version: i64,
}

/// Caller-supplied fields for a new decision.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDecision {
    pub title: String,
    pub decision_type: DecisionType,
    pub priority: Priority,
    pub description: Option<String>,
    pub rationale: Option<String>,
    pub impact: Option<String>,
    pub project_name: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
}

impl NewDecision {
    /// Creates the required part of a new decision; optional fields start empty.
    pub fn new(title: impl Into<String>, decision_type: DecisionType, priority: Priority) -> Self {
        NewDecision {
            title: title.into(),
            decision_type,
            priority,
            description: None,
            rationale: None,
            impact: None,
            project_name: None,
            amount: None,
            due_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    pub fn with_project(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = Some(project_name.into());
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Changes to the non-lifecycle fields of a decision.
///
/// `None` leaves a field untouched. Status, owner, type and the decided
/// fields cannot be edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rationale: Option<String>,
    pub impact: Option<String>,
    pub priority: Option<Priority>,
    pub project_name: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
}

impl DecisionEdit {
    /// Names of the fields this edit touches, in declaration order.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("title");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.rationale.is_some() {
            fields.push("rationale");
        }
        if self.impact.is_some() {
            fields.push("impact");
        }
        if self.priority.is_some() {
            fields.push("priority");
        }
        if self.project_name.is_some() {
            fields.push("project");
        }
        if self.amount.is_some() {
            fields.push("amount");
        }
        if self.due_date.is_some() {
            fields.push("due");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Applies the edit to a decision in place.
    pub fn apply(&self, decision: &mut Decision) {
        if let Some(title) = &self.title {
            decision.title = title.clone();
        }
        if let Some(description) = &self.description {
            decision.description = Some(description.clone());
        }
        if let Some(rationale) = &self.rationale {
            decision.rationale = Some(rationale.clone());
        }
        if let Some(impact) = &self.impact {
            decision.impact = Some(impact.clone());
        }
        if let Some(priority) = self.priority {
            decision.priority = priority;
        }
        if let Some(project_name) = &self.project_name {
            decision.project_name = Some(project_name.clone());
        }
        if let Some(amount) = self.amount {
            decision.amount = Some(amount);
        }
        if let Some(due_date) = self.due_date {
            decision.due_date = Some(due_date);
        }
    }
}

/// Types of changes recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Decision was created.
    Created,
    /// Decision moved to a new status.
    StatusChanged,
    /// A non-status field was modified.
    Edited,
}

impl Action {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Created => "created",
            Action::StatusChanged => "status_changed",
            Action::Edited => "edited",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "created" => Ok(Action::Created),
            "status_changed" => Ok(Action::StatusChanged),
            "edited" => Ok(Action::Edited),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

/// An immutable audit trail entry recording one change to a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Store-assigned identifier, increasing in commit order.
    pub id: i64,
    /// The decision this entry belongs to.
    pub decision_id: String,
    /// Who performed the change.
    pub actor: String,
    pub action: Action,
    /// Status before the change. `None` only on `created` entries.
    pub previous_status: Option<Status>,
    /// Status after the change; equal to `previous_status` on edits.
    /// `None` only on `created` entries.
    pub new_status: Option<Status>,
    /// Free-text explanation.
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Creates a new entry.
    ///
    /// The `id` field is set to 0 and will be assigned by the store on insert.
    pub fn new(
        decision_id: String,
        actor: String,
        action: Action,
        created_at: DateTime<Utc>,
    ) -> Self {
        AuditEntry {
            id: 0,
            decision_id,
            actor,
            action,
            previous_status: None,
            new_status: None,
            notes: None,
            created_at,
        }
    }

    /// Sets the previous and new status (builder pattern).
    pub fn with_statuses(mut self, previous: Status, new: Status) -> Self {
        self.previous_status = Some(previous);
        self.new_status = Some(new);
        self
    }

    /// Sets the notes (builder pattern).
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;
