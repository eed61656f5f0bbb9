// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! dlrs - the command-line front end of the decision log.
//!
//! This crate provides the `dl` CLI: argument parsing, project
//! configuration, and text/JSON rendering over [`dl_core::DecisionService`].
//!
//! # Main Components
//!
//! - [`Cli`] / [`Command`] - clap definitions for every subcommand
//! - [`Config`] - Project configuration (prefix, workspace, default actor)
//! - [`Error`] - Error types for CLI operations, wrapping [`dl_core::Error`]
//!
//! # Initialization
//!
//! Use [`init_work_dir`] to create a new `.declog/` directory, then open the
//! database through [`get_db_path`]:
//!
//! ```rust,ignore
//! use dlrs::{find_work_dir, get_db_path, Config};
//! use dl_core::{Database, DecisionService};
//!
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let db = Database::open(&get_db_path(&work_dir, &config))?;
//! let service = DecisionService::new(db).with_prefix(config.prefix);
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
pub mod env;
pub mod help;
pub mod logging;

pub mod config;
pub mod error;

pub use cli::{ChangeArgs, Cli, Command, DetailArgs, OutputFormat};
pub use config::{find_work_dir, get_db_path, init_work_dir, Config};
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;
use dl_core::Status;

/// Run a parsed command.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init {
            prefix,
            path,
            workspace,
            actor,
        } => commands::init::run(prefix, path, workspace, actor),
        Command::New {
            title,
            decision_type,
            priority,
            details,
            actor,
            output,
        } => commands::new::run(title, decision_type, priority, details, actor, output),
        Command::Show { ids, output } => commands::show::run(&ids, output),
        Command::List {
            status,
            tab,
            search,
            output,
        } => commands::list::run(status, tab, search, output),
        Command::Log { id, output } => commands::log::run(&id, output),
        Command::Edit {
            id,
            title,
            priority,
            details,
            change,
            output,
        } => commands::edit::run(&id, title, priority, details, change, output),
        Command::Review {
            ids,
            change,
            output,
        } => commands::lifecycle::run(&ids, Status::InReview, change, output),
        Command::Approve {
            ids,
            change,
            output,
        } => commands::lifecycle::run(&ids, Status::Approved, change, output),
        Command::Reject {
            ids,
            change,
            output,
        } => commands::lifecycle::run(&ids, Status::Rejected, change, output),
        Command::Defer {
            ids,
            change,
            output,
        } => commands::lifecycle::run(&ids, Status::Deferred, change, output),
        Command::Reopen {
            ids,
            change,
            output,
        } => commands::lifecycle::run(&ids, Status::Pending, change, output),
        Command::Transition {
            id,
            status,
            change,
            output,
        } => commands::lifecycle::run(&[id], status, change, output),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "dl", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
