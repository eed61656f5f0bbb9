// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Actor identity resolution for the audit trail.
//!
//! Every mutating call records who performed it. When the caller does not
//! name an actor explicitly, one is derived from the environment.

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;

use std::process::Command;

/// Environment variable that overrides the detected actor.
pub const ACTOR_ENV: &str = "DL_ACTOR";

/// Resolves the actor for a mutating call.
///
/// Resolution order:
/// 1. Explicit actor (e.g. a `--actor` flag)
/// 2. `DL_ACTOR` environment variable
/// 3. Configured default actor
/// 4. [`get_user_name`]
pub fn resolve_actor(explicit: Option<&str>, configured: Option<&str>) -> String {
    non_blank(explicit)
        .or_else(|| non_blank(std::env::var(ACTOR_ENV).ok().as_deref()))
        .or_else(|| non_blank(configured))
        .unwrap_or_else(get_user_name)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Returns the current user's display name for audit purposes.
///
/// Resolution order:
/// 1. Git config user.name (display name only, never email)
/// 2. Unix username from USER or LOGNAME env var (if not system account)
/// 3. Fallback to "human"
pub fn get_user_name() -> String {
    if let Some(name) = get_git_user_name() {
        return name;
    }

    if let Some(name) = get_unix_username() {
        if !is_system_account(&name) {
            return name;
        }
    }

    "human".to_string()
}

fn get_git_user_name() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", "user.name"])
        .output()
        .ok()?;

    if output.status.success() {
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !name.is_empty() {
            return Some(name);
        }
    }
    None
}

fn get_unix_username() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .ok()
        .filter(|s| !s.is_empty())
}

fn is_system_account(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "root" | "system" | "administrator" | "admin" | "daemon" | "nobody"
    )
}
