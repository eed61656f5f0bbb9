// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging to stderr, controlled by `DL_LOG`.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::env;

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global tracing subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter = build_filter(env::log_filter().as_deref());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal() && !env::no_color())
        .with_target(false)
        .try_init();
}

/// Parse a filter directive, falling back to `warn` when absent or invalid.
pub(crate) fn build_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
