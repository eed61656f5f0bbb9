// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use dl_core::{
    ClockSource, Decision, DecisionService, DecisionStore, DecisionType, NewDecision, Priority,
};

use crate::cli::{DetailArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;

use super::{open_db, resolve_actor, Details};

pub fn run(
    title: String,
    decision_type: DecisionType,
    priority: Priority,
    details: DetailArgs,
    actor: Option<String>,
    output: OutputFormat,
) -> Result<()> {
    let details = Details::parse(details)?;
    let (service, config) = open_db()?;
    let decision = run_impl(
        &service,
        &config,
        title,
        decision_type,
        priority,
        details,
        actor.as_deref(),
    )?;
    print_created(&decision, output)
}

/// Internal implementation that accepts the service/config for testing.
pub(crate) fn run_impl<S: DecisionStore, C: ClockSource>(
    service: &DecisionService<S, C>,
    config: &Config,
    title: String,
    decision_type: DecisionType,
    priority: Priority,
    details: Details,
    actor: Option<&str>,
) -> Result<Decision> {
    let mut fields = NewDecision::new(title, decision_type, priority);
    fields.description = details.description;
    fields.rationale = details.rationale;
    fields.impact = details.impact;
    fields.project_name = details.project;
    fields.amount = details.amount;
    fields.due_date = details.due;

    let owner = resolve_actor(actor, config);
    Ok(service.create(fields, &owner)?)
}

fn print_created(decision: &Decision, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Text => {
            println!(
                "Created [{}] ({}) {}: {}",
                decision.decision_type, decision.status, decision.id, decision.title
            );
        }
        OutputFormat::Id => {
            println!("{}", decision.id);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(decision)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
