// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;

use dl_core::{
    filter_decisions, tab_counts, ClockSource, Decision, DecisionQuery, DecisionService,
    DecisionStore, Status, Tab, TabCounts,
};

use crate::cli::OutputFormat;
use crate::display::{format_decision_line, format_tab_counts};
use crate::error::Result;

use super::open_db;

/// One page of list output: the active tab's rows plus per-tab totals.
#[derive(Debug, Serialize)]
pub(crate) struct Listing {
    pub tab: Tab,
    pub counts: TabCounts,
    pub decisions: Vec<Decision>,
}

pub fn run(
    status: Option<Status>,
    tab: Tab,
    search: Option<String>,
    output: OutputFormat,
) -> Result<()> {
    let (service, _config) = open_db()?;
    let listing = query_impl(&service, status, tab, search)?;
    print_listing(&listing, output)
}

/// Load decisions matching `status`/`search` and split them by tab.
///
/// Counts cover every tab so the header can show them all; `decisions` only
/// holds the active tab, newest first.
pub(crate) fn query_impl<S: DecisionStore, C: ClockSource>(
    service: &DecisionService<S, C>,
    status: Option<Status>,
    tab: Tab,
    search: Option<String>,
) -> Result<Listing> {
    let mut query = DecisionQuery::default().with_tab(tab);
    if let Some(status) = status {
        query = query.with_status(status);
    }
    if let Some(search) = search {
        query = query.with_search(search);
    }

    let candidates = service.list(&query.store_filter())?;
    Ok(Listing {
        tab,
        counts: tab_counts(&candidates),
        decisions: filter_decisions(&candidates, &query),
    })
}

fn print_listing(listing: &Listing, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Text => {
            println!("{}", format_tab_counts(&listing.counts, listing.tab));
            if listing.decisions.is_empty() {
                println!("No decisions");
            }
            for decision in &listing.decisions {
                println!("{}", format_decision_line(decision));
            }
        }
        OutputFormat::Id => {
            for decision in &listing.decisions {
                println!("{}", decision.id);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(listing)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
