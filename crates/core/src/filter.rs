// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Derived views over a snapshot of decisions.
//!
//! Everything here is pure: no state is kept, and results are recomputed from
//! whatever slice the caller passes in.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::decision::{Decision, Status};
use crate::error::{Error, Result};
use crate::store::{matches_text, ListFilter};

/// Coarse grouping of decisions by whether they have been decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    All,
    /// Not yet decided: pending, in review or deferred.
    Pending,
    /// Approved or rejected.
    Decided,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Pending => "pending",
            Tab::Decided => "decided",
        }
    }

    /// Returns true if a decision in `status` belongs on this tab.
    pub fn contains(&self, status: Status) -> bool {
        match self {
            Tab::All => true,
            Tab::Pending => !status.is_decided(),
            Tab::Decided => status.is_decided(),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Tab::All),
            "pending" => Ok(Tab::Pending),
            "decided" => Ok(Tab::Decided),
            _ => Err(Error::InvalidTab(s.to_string())),
        }
    }
}

/// View criteria. All set predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionQuery {
    /// Exact status, or `None` for any.
    pub status: Option<Status>,
    /// Case-insensitive substring over title and project name.
    pub search: Option<String>,
    pub tab: Tab,
}

impl DecisionQuery {
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    /// The part of this query a store can evaluate itself.
    pub fn store_filter(&self) -> ListFilter {
        ListFilter {
            status: self.status,
            search: self.search.clone(),
        }
    }

    pub fn matches(&self, decision: &Decision) -> bool {
        self.tab.contains(decision.status) && self.store_filter().matches(decision)
    }
}

/// Decisions matching `query`, in their original order.
pub fn filter_decisions(decisions: &[Decision], query: &DecisionQuery) -> Vec<Decision> {
    let needle = query.store_filter().needle();
    decisions
        .iter()
        .filter(|d| query.tab.contains(d.status))
        .filter(|d| query.status.is_none_or(|s| d.status == s))
        .filter(|d| needle.as_deref().is_none_or(|n| matches_text(d, n)))
        .cloned()
        .collect()
}

/// Per-tab totals for tab headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TabCounts {
    pub all: usize,
    pub pending: usize,
    pub decided: usize,
}

impl TabCounts {
    pub fn get(&self, tab: Tab) -> usize {
        match tab {
            Tab::All => self.all,
            Tab::Pending => self.pending,
            Tab::Decided => self.decided,
        }
    }
}

pub fn tab_counts(decisions: &[Decision]) -> TabCounts {
    let decided = decisions.iter().filter(|d| d.status.is_decided()).count();
    TabCounts {
        all: decisions.len(),
        pending: decisions.len() - decided,
        decided,
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
