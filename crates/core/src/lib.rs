// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! dl-core: decision records and their audit trail.
//!
//! This crate provides the decision model, the status state machine, the
//! storage layer (SQLite and in-memory) and the service that ties them
//! together. The `dl` CLI is a thin layer over [`DecisionService`].

pub mod audit;
pub mod clock;
pub mod db;
pub mod decision;
pub mod error;
pub mod filter;
pub mod id;
pub mod identity;
pub mod memory;
pub mod service;
pub mod store;
pub mod transition;
pub mod validate;

pub use audit::{replay_status, AuditReader};
pub use clock::{ClockSource, SystemClock};
pub use db::Database;
pub use decision::{
    Action, AuditEntry, Decision, DecisionEdit, DecisionType, NewDecision, Priority, Status,
};
pub use error::{Error, ErrorKind, Result};
pub use filter::{filter_decisions, tab_counts, DecisionQuery, Tab, TabCounts};
pub use memory::MemoryStore;
pub use service::DecisionService;
pub use store::{DecisionStore, ListFilter};
