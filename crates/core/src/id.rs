// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Decision ID generation.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Prefix used when no project prefix is configured.
pub const DEFAULT_PREFIX: &str = "dec";

/// Generate a decision ID from prefix, title, and timestamp.
/// Format: {prefix}-{hash} where hash is first 8 hex chars of SHA256(title + timestamp)
pub fn generate_id(prefix: &str, title: &str, created_at: &DateTime<Utc>) -> String {
    let input = format!("{}{}", title, created_at.to_rfc3339());
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..4]);
    format!("{}-{}", prefix, short_hash)
}

/// Generate a unique ID, handling collisions by appending an incrementing suffix.
///
/// `exists` is asked about each candidate; lookup errors are propagated.
pub fn generate_unique_id<F>(
    prefix: &str,
    title: &str,
    created_at: &DateTime<Utc>,
    mut exists: F,
) -> Result<String>
where
    F: FnMut(&str) -> Result<bool>,
{
    let base_id = generate_id(prefix, title, created_at);

    if !exists(&base_id)? {
        return Ok(base_id);
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id)? {
            return Ok(id);
        }
        suffix += 1;
    }
}

/// Validate that a prefix is valid (2+ lowercase alphanumeric with at least one letter)
pub fn validate_prefix(prefix: &str) -> bool {
    prefix.len() >= 2
        && prefix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && prefix.chars().any(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
