// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use dl_core::{ClockSource, Decision, DecisionEdit, DecisionService, DecisionStore, Priority};

use crate::cli::{ChangeArgs, DetailArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;

use super::{open_db, resolve_actor, Details};

pub fn run(
    id: &str,
    title: Option<String>,
    priority: Option<Priority>,
    details: DetailArgs,
    change: ChangeArgs,
    output: OutputFormat,
) -> Result<()> {
    let edit = build_edit(title, priority, Details::parse(details)?);
    let fields = edit.fields().join(", ");
    let (service, config) = open_db()?;
    let decision = run_impl(&service, &config, id, edit, &change)?;

    match output {
        OutputFormat::Text => println!("Updated {} of {}", fields, decision.id),
        OutputFormat::Id => println!("{}", decision.id),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&decision)?),
    }
    Ok(())
}

/// Assemble an edit from the flags that were given.
pub(crate) fn build_edit(
    title: Option<String>,
    priority: Option<Priority>,
    details: Details,
) -> DecisionEdit {
    DecisionEdit {
        title,
        description: details.description,
        rationale: details.rationale,
        impact: details.impact,
        priority,
        project_name: details.project,
        amount: details.amount,
        due_date: details.due,
    }
}

/// Internal implementation that accepts the service/config for testing.
pub(crate) fn run_impl<S: DecisionStore, C: ClockSource>(
    service: &DecisionService<S, C>,
    config: &Config,
    id: &str,
    edit: DecisionEdit,
    change: &ChangeArgs,
) -> Result<Decision> {
    let actor = resolve_actor(change.actor.as_deref(), config);
    Ok(service.edit(id, edit, &actor, change.notes.as_deref())?)
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
