// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::commands::testing::TestContext;
use dl_core::DecisionType;

/// Five decisions, one per status, created in order a..e.
fn seeded() -> (TestContext, Vec<String>) {
    let ctx = TestContext::new();
    let a = ctx.create("Vendor renewal", DecisionType::Budget);
    let b = ctx.create("Hire SRE", DecisionType::Resource);
    let c = ctx.create("Enter EU market", DecisionType::Strategic);
    let d = ctx.create("Freeze deploys", DecisionType::Operational);
    let e = ctx.create("Vendor audit", DecisionType::Budget);
    ctx.set_status(&b, Status::InReview);
    ctx.set_status(&c, Status::Approved);
    ctx.set_status(&d, Status::Rejected);
    ctx.set_status(&e, Status::Deferred);
    (ctx, vec![a, b, c, d, e])
}

fn ids(listing: &Listing) -> Vec<&str> {
    listing.decisions.iter().map(|d| d.id.as_str()).collect()
}

#[test]
fn test_all_tab_lists_newest_first() {
    let (ctx, created) = seeded();
    let listing = query_impl(&ctx.service, None, Tab::All, None).unwrap();

    let expected: Vec<&str> = created.iter().rev().map(String::as_str).collect();
    assert_eq!(ids(&listing), expected);
    assert_eq!(
        listing.counts,
        TabCounts {
            all: 5,
            pending: 3,
            decided: 2
        }
    );
}

#[test]
fn test_pending_tab_excludes_decided() {
    let (ctx, created) = seeded();
    let listing = query_impl(&ctx.service, None, Tab::Pending, None).unwrap();
    assert_eq!(
        ids(&listing),
        vec![created[4].as_str(), created[1].as_str(), created[0].as_str()]
    );
}

#[test]
fn test_decided_tab() {
    let (ctx, created) = seeded();
    let listing = query_impl(&ctx.service, None, Tab::Decided, None).unwrap();
    assert_eq!(
        ids(&listing),
        vec![created[3].as_str(), created[2].as_str()]
    );
}

#[test]
fn test_status_filter() {
    let (ctx, created) = seeded();
    let listing = query_impl(&ctx.service, Some(Status::InReview), Tab::All, None).unwrap();
    assert_eq!(ids(&listing), vec![created[1].as_str()]);
    assert_eq!(listing.counts.all, 1);
}

#[test]
fn test_search_is_case_insensitive() {
    let (ctx, created) = seeded();
    let listing = query_impl(&ctx.service, None, Tab::All, Some("VENDOR".into())).unwrap();
    assert_eq!(
        ids(&listing),
        vec![created[4].as_str(), created[0].as_str()]
    );
}

#[test]
fn test_filters_combine_with_and() {
    let (ctx, _created) = seeded();
    let listing = query_impl(
        &ctx.service,
        Some(Status::Approved),
        Tab::Pending,
        Some("market".into()),
    )
    .unwrap();
    assert!(listing.decisions.is_empty());
    assert_eq!(listing.counts.decided, 1);
}

#[test]
fn test_empty_log() {
    let ctx = TestContext::new();
    let listing = query_impl(&ctx.service, None, Tab::All, None).unwrap();
    assert!(listing.decisions.is_empty());
    assert_eq!(listing.counts, TabCounts::default());
    print_listing(&listing, OutputFormat::Text).unwrap();
}

#[test]
fn test_listing_json_shape() {
    let (ctx, _created) = seeded();
    let listing = query_impl(&ctx.service, None, Tab::Decided, None).unwrap();
    let json = serde_json::to_value(&listing).unwrap();
    assert_eq!(json["tab"], "decided");
    assert_eq!(json["counts"]["all"], 5);
    assert_eq!(json["decisions"].as_array().unwrap().len(), 2);
}
