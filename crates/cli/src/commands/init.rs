// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use dl_core::id::DEFAULT_PREFIX;
use dl_core::Database;
use tracing::info;

use crate::config::{get_db_path, init_work_dir, write_gitignore, Config};
use crate::error::Result;

pub fn run(
    prefix: Option<String>,
    path: Option<String>,
    workspace: Option<String>,
    actor: Option<String>,
) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let (work_dir, config) = run_impl(&target_path, prefix, workspace, actor)?;

    println!("Initialized decision log at {}", work_dir.display());
    println!("Prefix: {}", config.prefix);
    if let Some(ws) = &config.workspace {
        println!("Workspace: {}", ws);
    }
    if let Some(actor) = &config.actor {
        println!("Actor: {}", actor);
    }
    Ok(())
}

/// Create `.declog/` under `target_path`, write its config and create the database.
pub(crate) fn run_impl(
    target_path: &Path,
    prefix: Option<String>,
    workspace: Option<String>,
    actor: Option<String>,
) -> Result<(PathBuf, Config)> {
    let mut config = Config::new(prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string()))?;
    if let Some(ws) = workspace {
        config = config.with_workspace(ws);
    }
    if let Some(actor) = actor {
        config = config.with_actor(actor.trim());
    }

    let work_dir = init_work_dir(target_path, &config)?;
    write_gitignore(&work_dir)?;

    // Create the schema up front so the first command doesn't pay for it
    let db_path = get_db_path(&work_dir, &config);
    Database::open(&db_path)?;
    info!(work_dir = %work_dir.display(), prefix = %config.prefix, "initialized decision log");

    Ok((work_dir, config))
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
