// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[test]
fn test_new_minimal() {
    let cli = parse(&["dl", "new", "Renew vendor", "-t", "budget"]).unwrap();
    match cli.command {
        Command::New {
            title,
            decision_type,
            priority,
            details,
            actor,
            output,
        } => {
            assert_eq!(title, "Renew vendor");
            assert_eq!(decision_type, DecisionType::Budget);
            assert_eq!(priority, Priority::Medium);
            assert!(details.description.is_none());
            assert!(details.amount.is_none());
            assert!(actor.is_none());
            assert_eq!(output, OutputFormat::Text);
        }
        _ => panic!("Expected New command"),
    }
}

#[test]
fn test_new_all_fields() {
    let cli = parse(&[
        "dl",
        "new",
        "Hire SRE",
        "--type",
        "resource",
        "-p",
        "critical",
        "-d",
        "On-call coverage",
        "--rationale",
        "Incidents doubled",
        "--impact",
        "Lower MTTR",
        "--project",
        "Atlas",
        "--amount",
        "180000",
        "--due",
        "2026-09-30",
        "--actor",
        "cto",
        "-o",
        "json",
    ])
    .unwrap();
    match cli.command {
        Command::New {
            decision_type,
            priority,
            details,
            actor,
            output,
            ..
        } => {
            assert_eq!(decision_type, DecisionType::Resource);
            assert_eq!(priority, Priority::Critical);
            assert_eq!(details.description.as_deref(), Some("On-call coverage"));
            assert_eq!(details.rationale.as_deref(), Some("Incidents doubled"));
            assert_eq!(details.impact.as_deref(), Some("Lower MTTR"));
            assert_eq!(details.project.as_deref(), Some("Atlas"));
            assert_eq!(details.amount.as_deref(), Some("180000"));
            assert_eq!(details.due.as_deref(), Some("2026-09-30"));
            assert_eq!(actor.as_deref(), Some("cto"));
            assert_eq!(output, OutputFormat::Json);
        }
        _ => panic!("Expected New command"),
    }
}

#[test]
fn test_new_requires_type() {
    assert!(parse(&["dl", "new", "Untyped"]).is_err());
}

#[test]
fn test_new_rejects_unknown_type() {
    let err = parse(&["dl", "new", "X", "-t", "whim"]).err().unwrap();
    assert!(err.to_string().contains("invalid decision type"));
}

#[test]
fn test_new_rejects_blank_title() {
    assert!(parse(&["dl", "new", "   ", "-t", "budget"]).is_err());
}

#[test]
fn test_new_output_ids_alias() {
    let cli = parse(&["dl", "new", "X", "-t", "budget", "-o", "ids"]).unwrap();
    match cli.command {
        Command::New { output, .. } => assert_eq!(output, OutputFormat::Id),
        _ => panic!("Expected New command"),
    }
}

#[test]
fn test_show_multiple_ids() {
    let cli = parse(&["dl", "show", "dec-1", "dec-2"]).unwrap();
    match cli.command {
        Command::Show { ids, output } => {
            assert_eq!(ids, vec!["dec-1", "dec-2"]);
            assert_eq!(output, OutputFormat::Text);
        }
        _ => panic!("Expected Show command"),
    }
}

#[test]
fn test_log_command() {
    let cli = parse(&["dl", "log", "dec-1", "-o", "json"]).unwrap();
    match cli.command {
        Command::Log { id, output } => {
            assert_eq!(id, "dec-1");
            assert_eq!(output, OutputFormat::Json);
        }
        _ => panic!("Expected Log command"),
    }
}
