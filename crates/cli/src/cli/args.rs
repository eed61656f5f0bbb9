// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]` to reduce duplication
//! across commands that mutate a decision.

use clap::Args;

/// Who is making a change, and why.
#[derive(Args, Clone, Debug, Default)]
pub struct ChangeArgs {
    /// Actor recorded in the audit trail (defaults to DL_ACTOR, config, then git user)
    #[arg(long)]
    pub actor: Option<String>,

    /// Notes recorded with the change
    #[arg(long, short = 'n')]
    pub notes: Option<String>,
}

/// Optional descriptive fields shared by `new` and `edit`.
#[derive(Args, Clone, Debug, Default)]
pub struct DetailArgs {
    /// Longer description of what is being decided
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Why this decision is being made
    #[arg(long)]
    pub rationale: Option<String>,

    /// Expected impact of the decision
    #[arg(long)]
    pub impact: Option<String>,

    /// Project this decision belongs to
    #[arg(long)]
    pub project: Option<String>,

    /// Monetary amount involved (e.g. 125000 or 99.50)
    #[arg(long)]
    pub amount: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
}
