// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use dlrs::Cli;

fn main() {
    dlrs::logging::init_logging();
    let cli = Cli::parse();
    if let Err(e) = dlrs::run(cli.command) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
