// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Input validation and normalization for decision fields.

use crate::decision::{DecisionEdit, NewDecision};
use crate::error::{Error, Result};

// Input length limits
pub const MAX_TITLE_LENGTH: usize = 500;
pub const MAX_TEXT_LENGTH: usize = 100_000;
pub const MAX_PROJECT_NAME_LENGTH: usize = 200;
pub const MAX_NOTES_LENGTH: usize = 2_000;
pub const MAX_ACTOR_LENGTH: usize = 100;

fn check_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    let actual = value.chars().count();
    if actual > max {
        return Err(Error::FieldTooLong { field, actual, max });
    }
    Ok(())
}

/// Trim a title and check it is non-empty and within limits.
pub fn validate_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::FieldEmpty { field: "Title" });
    }
    check_length("Title", trimmed, MAX_TITLE_LENGTH)?;
    Ok(trimmed.to_string())
}

/// Trim an actor identifier; mutating calls require a non-empty actor.
pub fn validate_actor(actor: &str) -> Result<String> {
    let trimmed = actor.trim();
    if trimmed.is_empty() {
        return Err(Error::FieldEmpty { field: "Actor" });
    }
    check_length("Actor", trimmed, MAX_ACTOR_LENGTH)?;
    Ok(trimmed.to_string())
}

/// Trim optional notes. Blank notes count as absent.
pub fn validate_notes(notes: Option<&str>) -> Result<Option<String>> {
    let Some(notes) = trim_optional(notes) else {
        return Ok(None);
    };
    check_length("Notes", &notes, MAX_NOTES_LENGTH)?;
    Ok(Some(notes))
}

/// Amounts must be finite and non-negative.
pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(Error::InvalidValue {
            field: "amount",
            reason: "must be a finite number".to_string(),
        });
    }
    if amount < 0.0 {
        return Err(Error::InvalidValue {
            field: "amount",
            reason: "cannot be negative".to_string(),
        });
    }
    Ok(())
}

fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn validate_text(field: &'static str, value: Option<&str>, max: usize) -> Result<Option<String>> {
    let trimmed = trim_optional(value);
    if let Some(ref v) = trimmed {
        check_length(field, v, max)?;
    }
    Ok(trimmed)
}

/// Validate and normalize the fields of a new decision.
pub fn validate_new_decision(fields: NewDecision) -> Result<NewDecision> {
    let title = validate_title(&fields.title)?;
    let description = validate_text("Description", fields.description.as_deref(), MAX_TEXT_LENGTH)?;
    let rationale = validate_text("Rationale", fields.rationale.as_deref(), MAX_TEXT_LENGTH)?;
    let impact = validate_text("Impact", fields.impact.as_deref(), MAX_TEXT_LENGTH)?;
    let project_name = validate_text(
        "Project name",
        fields.project_name.as_deref(),
        MAX_PROJECT_NAME_LENGTH,
    )?;
    if let Some(amount) = fields.amount {
        validate_amount(amount)?;
    }

    Ok(NewDecision {
        title,
        description,
        rationale,
        impact,
        project_name,
        ..fields
    })
}

/// Validate and normalize an edit. An edit that changes nothing is rejected.
pub fn validate_edit(edit: DecisionEdit) -> Result<DecisionEdit> {
    if edit.is_empty() {
        return Err(Error::NothingToEdit);
    }

    let title = match edit.title.as_deref() {
        Some(t) => Some(validate_title(t)?),
        None => None,
    };
    let description = validate_text("Description", edit.description.as_deref(), MAX_TEXT_LENGTH)?;
    let rationale = validate_text("Rationale", edit.rationale.as_deref(), MAX_TEXT_LENGTH)?;
    let impact = validate_text("Impact", edit.impact.as_deref(), MAX_TEXT_LENGTH)?;
    let project_name = validate_text(
        "Project name",
        edit.project_name.as_deref(),
        MAX_PROJECT_NAME_LENGTH,
    )?;
    if let Some(amount) = edit.amount {
        validate_amount(amount)?;
    }

    let normalized = DecisionEdit {
        title,
        description,
        rationale,
        impact,
        project_name,
        ..edit
    };
    if normalized.is_empty() {
        return Err(Error::NothingToEdit);
    }
    Ok(normalized)
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
