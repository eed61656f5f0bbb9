// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use dl_core::{Action, AuditEntry, Decision, Tab, TabCounts};

/// Maximum line width for wrapped text content (excluding 4-space indent).
const WRAP_WIDTH: usize = 96;

/// Wrap text at word boundaries if it's a single line.
///
/// - If content contains newlines: return as-is (preserve user formatting)
/// - If content is single line >width: wrap at word boundaries
/// - If content is single line <=width: return as-is
pub fn wrap_text(content: &str, width: usize) -> String {
    if content.contains('\n') || content.chars().count() <= width {
        return content.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in content.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Format a monetary amount with thousands separators and two decimals.
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

/// Format a single decision line for list output
pub fn format_decision_line(decision: &Decision) -> String {
    format!(
        "- [{}] ({}, {}) {}: {}",
        decision.decision_type, decision.status, decision.priority, decision.id, decision.title
    )
}

/// Format the tab summary shown above list output.
pub fn format_tab_counts(counts: &TabCounts, active: Tab) -> String {
    [Tab::All, Tab::Pending, Tab::Decided]
        .iter()
        .map(|&tab| {
            let label = format!("{} ({})", tab, counts.get(tab));
            if tab == active {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Format a single audit entry for log output.
///
/// Output format:
/// ```text
///   2026-01-10 10:30  status_changed pending -> approved by alice
///     Approved at board meeting
/// ```
pub fn format_audit_entry(entry: &AuditEntry) -> Vec<String> {
    let timestamp = entry.created_at.format("%Y-%m-%d %H:%M");
    let mut head = format!("  {}  {}", timestamp, entry.action);
    if entry.action == Action::StatusChanged {
        if let (Some(from), Some(to)) = (entry.previous_status, entry.new_status) {
            head.push_str(&format!(" {} -> {}", from, to));
        }
    }
    head.push_str(&format!(" by {}", entry.actor));

    let mut lines = vec![head];
    if let Some(notes) = &entry.notes {
        for line in wrap_text(notes, WRAP_WIDTH).lines() {
            lines.push(format!("    {}", line));
        }
    }
    lines
}

/// Format decision details for show command
pub fn format_decision_details(decision: &Decision, entries: &[AuditEntry]) -> String {
    let mut output = Vec::new();

    output.push(format!("[{}] {}", decision.decision_type, decision.id));
    output.push(format!("Title: {}", decision.title));
    output.push(format!("Status: {}", decision.status));
    output.push(format!("Priority: {}", decision.priority));
    output.push(format!("Owner: {}", decision.owner));
    if let Some(project) = &decision.project_name {
        output.push(format!("Project: {}", project));
    }
    if let Some(amount) = decision.amount {
        output.push(format!("Amount: {}", format_amount(amount)));
    }
    if let Some(due) = decision.due_date {
        output.push(format!("Due: {}", due.format("%Y-%m-%d")));
    }
    output.push(format!(
        "Created: {}",
        decision.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push(format!(
        "Updated: {}",
        decision.updated_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(decided_at) = decision.decided_at {
        let by = decision.decided_by.as_deref().unwrap_or("unknown");
        output.push(format!(
            "Decided: {} by {}",
            decided_at.format("%Y-%m-%d %H:%M"),
            by
        ));
    }

    for (label, text) in [
        ("Description", &decision.description),
        ("Rationale", &decision.rationale),
        ("Impact", &decision.impact),
    ] {
        if let Some(text) = text {
            output.push(String::new());
            output.push(format!("{}:", label));
            for line in wrap_text(text, WRAP_WIDTH).lines() {
                output.push(format!("    {}", line));
            }
        }
    }

    if !entries.is_empty() {
        output.push(String::new());
        output.push("Log:".to_string());
        for entry in entries {
            output.extend(format_audit_entry(entry));
        }
    }

    output.join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
