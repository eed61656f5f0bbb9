// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Help text generation with colorization support.

use crate::colors;
use clap::builder::styling::Styles;

/// Generate clap Styles matching the help color conventions.
pub fn styles() -> Styles {
    if !colors::should_colorize() {
        return Styles::plain();
    }

    use anstyle::{Ansi256Color, Color, Style};

    let fg = |code: u8| Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))));
    let header = fg(colors::codes::HEADER);
    let context = fg(colors::codes::CONTEXT);

    Styles::styled()
        .header(header)
        .usage(header)
        .literal(fg(colors::codes::LITERAL))
        .placeholder(context)
        .valid(context)
}

/// Main help template with colorized Options header.
pub fn template() -> String {
    format!(
        "{{about-with-newline}}
{{usage-heading}} {{usage}}

{{before-help}}{}
{{options}}{{after-help}}",
        colors::header("Options:")
    )
}

/// Commands list shown before options in main help.
pub fn commands() -> String {
    let rows: [(&str, &str, &str); 14] = [
        ("Decisions:", "new", "Record a new decision"),
        ("", "show", "Show decision details"),
        ("", "list", "List decisions"),
        ("", "edit", "Edit a decision's descriptive fields"),
        ("", "log", "View a decision's audit trail"),
        ("Lifecycle:", "review", "Move a decision into review"),
        ("", "approve", "Approve a decision (final)"),
        ("", "reject", "Reject a decision (final)"),
        ("", "defer", "Postpone a decision"),
        ("", "reopen", "Return a decision to pending"),
        ("", "transition", "Move a decision to any status"),
        ("Setup:", "init", "Initialize a decision log"),
        ("", "completion", "Generate shell completions"),
        ("", "help", "Print help for a command"),
    ];

    let mut out = String::new();
    for (section, name, about) in rows {
        if !section.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&colors::header(section));
            out.push('\n');
        }
        out.push_str(&format!(
            "  {}{}{}\n",
            colors::literal(name),
            " ".repeat(12usize.saturating_sub(name.len())),
            about
        ));
    }
    out
}

/// Quickstart help shown after options in main help.
pub fn quickstart() -> String {
    colors::examples(
        "\
Get started:
  dl init                                  Initialize a decision log
  dl new \"Renew vendor\" -t budget -p high  Record a decision
  dl list --tab pending                    See what still needs deciding
  dl approve <id>                          Approve a decision
  dl log <id>                              Review who changed what",
    )
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
