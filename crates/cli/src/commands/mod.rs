// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod edit;
pub mod init;
pub mod lifecycle;
pub mod list;
pub mod log;
pub mod new;
pub mod show;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use chrono::NaiveDate;
use dl_core::{Database, DecisionService};
use tracing::debug;

use crate::cli::DetailArgs;
use crate::config::{find_work_dir, get_db_path, Config};
use crate::error::{Error, Result};

/// Helper to open the decision log from the current context.
pub fn open_db() -> Result<(DecisionService<Database>, Config)> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    debug!(work_dir = %work_dir.display(), db = %db_path.display(), "opening decision log");
    let db = Database::open(&db_path)?;
    let service = DecisionService::new(db).with_prefix(config.prefix.clone());
    Ok((service, config))
}

/// Resolve the actor for a change, falling back to the configured default.
pub(crate) fn resolve_actor(explicit: Option<&str>, config: &Config) -> String {
    dl_core::identity::resolve_actor(explicit, config.actor.as_deref())
}

/// Parse a monetary amount such as `125000` or `99.50`.
pub(crate) fn parse_amount(value: &str) -> Result<f64> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| Error::InvalidAmount {
            value: value.to_string(),
        })
}

/// Parse a due date in `YYYY-MM-DD` form.
pub(crate) fn parse_due(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Parsed optional detail fields.
#[derive(Debug, Default)]
pub(crate) struct Details {
    pub description: Option<String>,
    pub rationale: Option<String>,
    pub impact: Option<String>,
    pub project: Option<String>,
    pub amount: Option<f64>,
    pub due: Option<NaiveDate>,
}

impl Details {
    pub(crate) fn parse(args: DetailArgs) -> Result<Self> {
        Ok(Details {
            description: args.description,
            rationale: args.rationale,
            impact: args.impact,
            project: args.project,
            amount: args.amount.as_deref().map(parse_amount).transpose()?,
            due: args.due.as_deref().map(parse_due).transpose()?,
        })
    }
}
