// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use dl_core::{AuditEntry, ClockSource, Decision, DecisionService, DecisionStore};

use crate::cli::OutputFormat;
use crate::display::format_decision_details;
use crate::error::Result;

use super::open_db;

/// A decision together with its audit trail, most recent entry first.
#[derive(Debug, Serialize)]
pub(crate) struct DecisionDetails {
    #[serde(flatten)]
    pub decision: Decision,
    pub audit_trail: Vec<AuditEntry>,
}

pub fn run(ids: &[String], output: OutputFormat) -> Result<()> {
    let (service, _config) = open_db()?;
    run_impl(&service, ids, output)
}

pub(crate) fn run_impl<S: DecisionStore, C: ClockSource>(
    service: &DecisionService<S, C>,
    ids: &[String],
    output: OutputFormat,
) -> Result<()> {
    match output {
        OutputFormat::Json => {
            for id in ids {
                // One object per line (JSONL)
                let json = serde_json::to_string(&build_details(service, id)?)?;
                println!("{json}");
            }
        }
        OutputFormat::Id => {
            for id in ids {
                println!("{}", service.get(id)?.id);
            }
        }
        OutputFormat::Text => {
            for (i, id) in ids.iter().enumerate() {
                if i > 0 {
                    println!("---");
                }
                let details = build_details(service, id)?;
                println!(
                    "{}",
                    format_decision_details(&details.decision, &details.audit_trail)
                );
            }
        }
    }
    Ok(())
}

pub(crate) fn build_details<S: DecisionStore, C: ClockSource>(
    service: &DecisionService<S, C>,
    id: &str,
) -> Result<DecisionDetails> {
    let (decision, audit_trail) = service.get_with_audit(id)?;
    Ok(DecisionDetails {
        decision,
        audit_trail,
    })
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
