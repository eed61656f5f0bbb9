// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use dl_core::{ClockSource, DecisionService, DecisionStore};

use crate::cli::OutputFormat;
use crate::display::format_audit_entry;
use crate::error::Result;

use super::open_db;

pub fn run(id: &str, output: OutputFormat) -> Result<()> {
    let (service, _config) = open_db()?;
    run_impl(&service, id, output)
}

pub(crate) fn run_impl<S: DecisionStore, C: ClockSource>(
    service: &DecisionService<S, C>,
    id: &str,
    output: OutputFormat,
) -> Result<()> {
    let entries = service.list_audit(id)?;
    match output {
        OutputFormat::Text => {
            println!("Log for {}:", id);
            for entry in &entries {
                for line in format_audit_entry(entry) {
                    println!("{}", line);
                }
            }
        }
        OutputFormat::Id => {
            for entry in &entries {
                println!("{}", entry.id);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
