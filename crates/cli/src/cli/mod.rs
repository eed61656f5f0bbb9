// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use std::str::FromStr;

use crate::colors;
use crate::help;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use dl_core::{DecisionType, Priority, Status, Tab};

pub use args::{ChangeArgs, DetailArgs};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Parse one of the core enums, reporting the core error text on failure.
fn parse_core<T: FromStr<Err = dl_core::Error>>(s: &str) -> Result<T, String> {
    s.parse().map_err(|e: dl_core::Error| e.to_string())
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    #[value(alias = "ids")]
    Id,
}

#[derive(Parser)]
#[command(name = "dl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_version_flag = true)]
#[command(about = "A decision log with an append-only audit trail")]
#[command(
    long_about = "A decision log with an append-only audit trail.\n\n\
    Record decisions, move them through review to approval or rejection, and see who changed what."
)]
#[command(help_template = help::template())]
#[command(before_help = help::commands())]
#[command(after_help = help::quickstart())]
#[command(styles = help::styles())]
// Allow the unit type field pattern which is required for clap's ArgAction::Version/Help
#[allow(clippy::manual_non_exhaustive)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long = "version", action = clap::ArgAction::Version)]
    version: (),

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    // ─────────────────────────────────────────────────────────────────────────
    // Decisions
    // ─────────────────────────────────────────────────────────────────────────
    /// Record a new decision (starts pending)
    #[command(after_help = colors::examples("\
Examples:
  dl new \"Renew vendor\" -t budget             Record a budget decision
  dl new \"Hire SRE\" -t resource -p high        Record with priority
  dl new \"Q3 bet\" -t strategic --due 2026-09-30  Record with a due date
  dl new \"Lease\" -t budget --amount 125000     Record with an amount
  dl new \"Freeze\" -t operational -o id         Record, output only ID"))]
    New {
        /// Short summary of what is being decided
        #[arg(value_parser = non_empty_string)]
        title: String,

        /// Decision type (strategic, budget, resource, operational)
        #[arg(long = "type", short = 't', value_parser = parse_core::<DecisionType>)]
        decision_type: DecisionType,

        /// Priority (critical, high, medium, low)
        #[arg(long, short = 'p', default_value = "medium", value_parser = parse_core::<Priority>)]
        priority: Priority,

        #[command(flatten)]
        details: DetailArgs,

        /// Owner recorded on the decision (defaults to DL_ACTOR, config, then git user)
        #[arg(long)]
        actor: Option<String>,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show decision details
    #[command(arg_required_else_help = true)]
    Show {
        /// Decision ID(s)
        #[arg(required = true)]
        ids: Vec<String>,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List decisions, newest first
    #[command(after_help = colors::examples("\
Examples:
  dl list                         List all decisions
  dl list --tab pending           List decisions still awaiting a call
  dl list --tab decided           List approved and rejected decisions
  dl list -s in_review            List decisions under review
  dl list -q vendor               Search titles and project names
  dl list -o json                 Output in JSON format"))]
    List {
        /// Filter by status
        #[arg(long, short = 's', value_parser = parse_core::<Status>)]
        status: Option<Status>,

        /// Tab to show (all, pending, decided)
        #[arg(long, default_value = "all", value_parser = parse_core::<Tab>)]
        tab: Tab,

        /// Case-insensitive text search
        #[arg(long, short = 'q')]
        search: Option<String>,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Edit a decision's descriptive fields
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  dl edit dec-1 --title \"Renew vendor for 2 years\"   Change the title
  dl edit dec-1 -p critical                         Raise the priority
  dl edit dec-1 --amount 98000 -n \"Negotiated\"      Change amount with a note")
    )]
    Edit {
        /// Decision ID
        id: String,

        /// New title
        #[arg(long, value_parser = non_empty_string)]
        title: Option<String>,

        /// New priority (critical, high, medium, low)
        #[arg(long, short = 'p', value_parser = parse_core::<Priority>)]
        priority: Option<Priority>,

        #[command(flatten)]
        details: DetailArgs,

        #[command(flatten)]
        change: ChangeArgs,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// View a decision's audit trail, most recent first
    #[command(arg_required_else_help = true)]
    Log {
        /// Decision ID
        id: String,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Move decision(s) into review
    #[command(arg_required_else_help = true)]
    Review {
        /// Decision ID(s)
        #[arg(required = true)]
        ids: Vec<String>,

        #[command(flatten)]
        change: ChangeArgs,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Approve decision(s); approval is final
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  dl approve dec-1                        Approve a decision
  dl approve dec-1 -n \"Board agreed\"      Approve with notes
  dl approve dec-1 --actor ceo            Approve on behalf of ceo")
    )]
    Approve {
        /// Decision ID(s)
        #[arg(required = true)]
        ids: Vec<String>,

        #[command(flatten)]
        change: ChangeArgs,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Reject decision(s); rejection is final
    #[command(arg_required_else_help = true)]
    Reject {
        /// Decision ID(s)
        #[arg(required = true)]
        ids: Vec<String>,

        #[command(flatten)]
        change: ChangeArgs,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Postpone decision(s)
    #[command(arg_required_else_help = true)]
    Defer {
        /// Decision ID(s)
        #[arg(required = true)]
        ids: Vec<String>,

        #[command(flatten)]
        change: ChangeArgs,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Return decision(s) to pending (from in_review or deferred)
    #[command(arg_required_else_help = true)]
    Reopen {
        /// Decision ID(s)
        #[arg(required = true)]
        ids: Vec<String>,

        #[command(flatten)]
        change: ChangeArgs,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Move a decision to any reachable status
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  dl transition dec-1 in_review           Start review
  dl transition dec-1 deferred -n \"Q4\"    Defer with notes")
    )]
    Transition {
        /// Decision ID
        id: String,

        /// Target status (pending, in_review, approved, rejected, deferred)
        #[arg(value_parser = parse_core::<Status>)]
        status: Status,

        #[command(flatten)]
        change: ChangeArgs,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Setup
    // ─────────────────────────────────────────────────────────────────────────
    /// Initialize a decision log in the current directory (or specified path)
    #[command(after_help = colors::examples("\
Examples:
  dl init                          Initialize with the default 'dec' prefix
  dl init --prefix exec            Initialize with a custom prefix
  dl init --workspace shared       Keep the database in ./shared
  dl init --actor alice            Record alice when no actor is given"))]
    Init {
        /// ID prefix for decisions (2+ lowercase alphanumeric, defaults to 'dec')
        #[arg(long)]
        prefix: Option<String>,

        /// Path to initialize (defaults to current directory)
        #[arg(long)]
        path: Option<String>,

        /// Directory holding the database (must exist)
        #[arg(long)]
        workspace: Option<String>,

        /// Default actor for the audit trail
        #[arg(long, value_parser = non_empty_string)]
        actor: Option<String>,
    },

    /// Generate shell completions
    #[command(
        arg_required_else_help = true,
        after_help = colors::examples("\
Examples:
  dl completion bash > ~/.local/share/bash-completion/completions/dl
  dl completion zsh > ~/.zfunc/_dl
  dl completion fish > ~/.config/fish/completions/dl.fish")
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
