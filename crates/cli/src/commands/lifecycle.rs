// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use dl_core::{ClockSource, Decision, DecisionService, DecisionStore, Status};

use crate::cli::{ChangeArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;

use super::{open_db, resolve_actor};

/// Move each decision in `ids` to `status`, stopping at the first failure.
pub fn run(
    ids: &[String],
    status: Status,
    change: ChangeArgs,
    output: OutputFormat,
) -> Result<()> {
    let (service, config) = open_db()?;
    run_impl(&service, &config, ids, status, &change, output)?;
    Ok(())
}

/// Internal implementation that accepts the service/config for testing.
pub(crate) fn run_impl<S: DecisionStore, C: ClockSource>(
    service: &DecisionService<S, C>,
    config: &Config,
    ids: &[String],
    status: Status,
    change: &ChangeArgs,
    output: OutputFormat,
) -> Result<Vec<Decision>> {
    let mut updated = Vec::with_capacity(ids.len());
    for id in ids {
        let before = service.get(id)?;
        let decision = run_single(service, config, &before, status, change)?;
        print_transition(&before, &decision, output)?;
        updated.push(decision);
    }
    Ok(updated)
}

fn run_single<S: DecisionStore, C: ClockSource>(
    service: &DecisionService<S, C>,
    config: &Config,
    observed: &Decision,
    status: Status,
    change: &ChangeArgs,
) -> Result<Decision> {
    let actor = resolve_actor(change.actor.as_deref(), config);
    Ok(service.transition_from(observed, status, &actor, change.notes.as_deref())?)
}

/// Past-tense verb for a transition into `status`.
pub(crate) fn verb(status: Status) -> &'static str {
    match status {
        Status::Pending => "Reopened",
        Status::InReview => "Moved to review",
        Status::Approved => "Approved",
        Status::Rejected => "Rejected",
        Status::Deferred => "Deferred",
    }
}

fn print_transition(before: &Decision, after: &Decision, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Text => println!(
            "{} {} ({} -> {})",
            verb(after.status),
            after.id,
            before.status,
            after.status
        ),
        OutputFormat::Id => println!("{}", after.id),
        OutputFormat::Json => println!("{}", serde_json::to_string(after)?),
    }
    Ok(())
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
