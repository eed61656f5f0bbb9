// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use crate::audit::replay_status;
use crate::db::Database;
use crate::decision::{DecisionType, Priority};
use crate::error::{Error, ErrorKind};
use crate::memory::MemoryStore;
use crate::transition::allowed_targets;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use yare::parameterized;

/// Clock that only moves when told to.
struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    fn new() -> Arc<Self> {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        Arc::new(ManualClock(Mutex::new(start)))
    }

    fn advance(&self, secs: i64) {
        let mut now = self.0.lock().unwrap();
        *now += Duration::seconds(secs);
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

type TestService = DecisionService<MemoryStore, Arc<ManualClock>>;

fn service() -> (TestService, Arc<ManualClock>) {
    let clock = ManualClock::new();
    let service = DecisionService::with_clock(MemoryStore::new(), Arc::clone(&clock));
    (service, clock)
}

fn vendor_contract(service: &TestService) -> Decision {
    let fields = NewDecision::new("Vendor contract renewal", DecisionType::Budget, Priority::High);
    service.create(fields, "owner").unwrap()
}

/// Drives a fresh decision into `status` through legal edges.
fn decision_in(service: &TestService, status: Status) -> Decision {
    let decision = vendor_contract(service);
    match status {
        Status::Pending => decision,
        other => service.transition(&decision.id, other, "setup", None).unwrap(),
    }
}

fn assert_status_matches_trail(service: &TestService, id: &str) {
    let decision = service.get(id).unwrap();
    let replayed = AuditReader::new(service.store()).replay(id).unwrap();
    assert_eq!(replay_status(&replayed), Some(decision.status));

    // The most recent entry alone names the current status
    let latest = &service.list_audit(id).unwrap()[0];
    match latest.action {
        Action::Created => assert_eq!(decision.status, Status::Pending),
        _ => assert_eq!(latest.new_status, Some(decision.status)),
    }
}

// =============================================================================
// Example scenarios
// =============================================================================

#[test]
fn scenario_create_is_pending_with_created_entry() {
    let (service, _) = service();
    let decision = vendor_contract(&service);

    assert_eq!(decision.status, Status::Pending);
    assert_eq!(decision.decision_type, DecisionType::Budget);
    assert_eq!(decision.priority, Priority::High);
    assert_eq!(decision.owner, "owner");

    let trail = service.list_audit(&decision.id).unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action, Action::Created);
}

#[test]
fn scenario_approve_from_pending() {
    let (service, clock) = service();
    let decision = vendor_contract(&service);
    clock.advance(60);

    let approved = service
        .transition(&decision.id, Status::Approved, "alice", None)
        .unwrap();

    assert_eq!(approved.status, Status::Approved);
    assert_eq!(approved.decided_by.as_deref(), Some("alice"));
    assert_eq!(approved.decided_at, Some(clock.now()));
    assert_eq!(approved.updated_at, clock.now());
    assert_eq!(approved.created_at, decision.created_at);

    let trail = service.list_audit(&decision.id).unwrap();
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].action, Action::StatusChanged);
    assert_eq!(trail[0].previous_status, Some(Status::Pending));
    assert_eq!(trail[0].new_status, Some(Status::Approved));
    assert_eq!(trail[0].actor, "alice");
    assert_eq!(trail[0].notes.as_deref(), Some("Status changed to approved"));
}

#[test]
fn scenario_reject_after_approve_fails() {
    let (service, _) = service();
    let decision = decision_in(&service, Status::Approved);
    let before = service.list_audit(&decision.id).unwrap();

    let result = service.transition(&decision.id, Status::Rejected, "bob", None);

    assert!(matches!(
        result,
        Err(Error::InvalidTransition { ref from, ref to, .. }) if from == "approved" && to == "rejected"
    ));
    assert_eq!(service.list_audit(&decision.id).unwrap(), before);
}

#[test]
fn scenario_review_then_back_to_pending() {
    let (service, _) = service();
    let decision = vendor_contract(&service);

    service
        .transition(&decision.id, Status::InReview, "alice", None)
        .unwrap();
    let back = service
        .transition(&decision.id, Status::Pending, "bob", None)
        .unwrap();

    assert_eq!(back.status, Status::Pending);
    assert_eq!(back.decided_at, None);

    let replayed = AuditReader::new(service.store())
        .replay(&decision.id)
        .unwrap();
    let steps: Vec<_> = replayed
        .iter()
        .map(|e| (e.action, e.previous_status, e.new_status))
        .collect();
    assert_eq!(
        steps,
        vec![
            (Action::Created, None, None),
            (
                Action::StatusChanged,
                Some(Status::Pending),
                Some(Status::InReview)
            ),
            (
                Action::StatusChanged,
                Some(Status::InReview),
                Some(Status::Pending)
            ),
        ]
    );
}

#[test]
fn scenario_concurrent_approve_and_reject() {
    let (service, _) = service();
    let decision = vendor_contract(&service);

    // Both callers read the same pending snapshot
    let seen_by_alice = service.get(&decision.id).unwrap();
    let seen_by_bob = service.get(&decision.id).unwrap();

    let alice = service.transition_from(&seen_by_alice, Status::Approved, "alice", None);
    let bob = service.transition_from(&seen_by_bob, Status::Rejected, "bob", None);

    assert!(alice.is_ok());
    let err = bob.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(err.is_retryable());

    let stored = service.get(&decision.id).unwrap();
    assert_eq!(stored.status, Status::Approved);
    assert_eq!(stored.decided_by.as_deref(), Some("alice"));
    assert_eq!(service.list_audit(&decision.id).unwrap().len(), 2);
    assert_status_matches_trail(&service, &decision.id);
}

// =============================================================================
// State machine and terminal laws
// =============================================================================

#[parameterized(
    pending = { Status::Pending },
    in_review = { Status::InReview },
    approved = { Status::Approved },
    rejected = { Status::Rejected },
    deferred = { Status::Deferred },
)]
fn every_requested_status_obeys_the_table(from: Status) {
    for to in Status::ALL {
        let (service, _) = service();
        let decision = decision_in(&service, from);
        let trail_before = service.list_audit(&decision.id).unwrap();

        let result = service.transition(&decision.id, to, "tester", None);

        if allowed_targets(from).contains(&to) {
            let updated = result.unwrap();
            assert_eq!(updated.status, to);
            assert_eq!(updated.version, decision.version + 1);
            assert_eq!(
                service.list_audit(&decision.id).unwrap().len(),
                trail_before.len() + 1
            );
        } else {
            let err = result.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidTransition, "{from} -> {to}");
            assert_eq!(service.get(&decision.id).unwrap(), decision);
            assert_eq!(service.list_audit(&decision.id).unwrap(), trail_before);
        }
        assert_status_matches_trail(&service, &decision.id);
    }
}

#[parameterized(
    approved = { Status::Approved },
    rejected = { Status::Rejected },
)]
fn terminal_status_refuses_everything(terminal: Status) {
    let (service, _) = service();
    let decision = decision_in(&service, terminal);

    for to in Status::ALL {
        let result = service.transition(&decision.id, to, "tester", Some("try anyway"));
        assert!(matches!(result, Err(Error::InvalidTransition { .. })));
    }
    assert_eq!(service.get(&decision.id).unwrap(), decision);
}

#[test]
fn self_transition_is_rejected() {
    let (service, _) = service();
    let decision = vendor_contract(&service);
    let result = service.transition(&decision.id, Status::Pending, "alice", None);
    assert!(matches!(result, Err(Error::InvalidTransition { .. })));
}

// =============================================================================
// Decided timestamp law
// =============================================================================

#[test]
fn decided_fields_are_set_once_through_a_long_path() {
    let (service, clock) = service();
    let decision = vendor_contract(&service);

    for (status, actor) in [
        (Status::InReview, "alice"),
        (Status::Deferred, "bob"),
        (Status::Pending, "carol"),
    ] {
        clock.advance(10);
        let updated = service.transition(&decision.id, status, actor, None).unwrap();
        assert_eq!(updated.decided_at, None);
        assert_eq!(updated.decided_by, None);
    }

    clock.advance(10);
    let decided_at = clock.now();
    let rejected = service
        .transition(&decision.id, Status::Rejected, "dave", None)
        .unwrap();
    assert_eq!(rejected.decided_at, Some(decided_at));
    assert_eq!(rejected.decided_by.as_deref(), Some("dave"));

    // Later activity never touches them
    clock.advance(10);
    let edited = service
        .edit(
            &decision.id,
            DecisionEdit {
                rationale: Some("Budget freeze".into()),
                ..Default::default()
            },
            "erin",
            None,
        )
        .unwrap();
    let _ = service.transition(&decision.id, Status::Deferred, "erin", None);
    let stored = service.get(&decision.id).unwrap();
    assert_eq!(stored, edited);
    assert_eq!(stored.decided_at, Some(decided_at));
    assert_eq!(stored.decided_by.as_deref(), Some("dave"));
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn conflict_can_be_retried_after_reread() {
    let (service, _) = service();
    let decision = vendor_contract(&service);
    let stale = service.get(&decision.id).unwrap();

    service
        .transition(&decision.id, Status::InReview, "alice", None)
        .unwrap();
    assert!(matches!(
        service.transition_from(&stale, Status::Deferred, "bob", None),
        Err(Error::Conflict { .. })
    ));

    let fresh = service.get(&decision.id).unwrap();
    let retried = service
        .transition_from(&fresh, Status::Deferred, "bob", None)
        .unwrap();
    assert_eq!(retried.status, Status::Deferred);
    assert_eq!(retried.version, 3);
    assert_status_matches_trail(&service, &decision.id);
}

#[test]
fn stale_snapshot_is_validated_before_conflict_check() {
    let (service, _) = service();
    let decision = vendor_contract(&service);
    let stale = service.get(&decision.id).unwrap();
    service
        .transition(&decision.id, Status::Approved, "alice", None)
        .unwrap();

    // Against the stale pending snapshot, pending -> pending is illegal
    // regardless of what happened since
    assert!(matches!(
        service.transition_from(&stale, Status::Pending, "bob", None),
        Err(Error::InvalidTransition { .. })
    ));
}

#[test]
fn threads_racing_through_the_service_leave_one_winner() {
    let clock = ManualClock::new();
    let service = Arc::new(DecisionService::with_clock(
        MemoryStore::new(),
        Arc::clone(&clock),
    ));
    let decision = service
        .create(
            NewDecision::new("Race", DecisionType::Strategic, Priority::Critical),
            "owner",
        )
        .unwrap();
    let snapshot = service.get(&decision.id).unwrap();

    let handles: Vec<_> = [Status::Approved, Status::Rejected, Status::Deferred, Status::InReview]
        .into_iter()
        .map(|target| {
            let service = Arc::clone(&service);
            let snapshot = snapshot.clone();
            std::thread::spawn(move || service.transition_from(&snapshot, target, "racer", None))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.kind() == ErrorKind::Conflict));

    let stored = service.get(&decision.id).unwrap();
    assert_eq!(&stored, winners[0]);
    assert_eq!(service.list_audit(&decision.id).unwrap().len(), 2);
}

#[test]
fn sqlite_backed_service_races_through_two_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decisions.db");
    let first = DecisionService::new(Database::open(&path).unwrap());
    let second = DecisionService::new(Database::open(&path).unwrap());

    let decision = first
        .create(
            NewDecision::new("Vendor contract renewal", DecisionType::Budget, Priority::High),
            "owner",
        )
        .unwrap();
    let seen_by_second = second.get(&decision.id).unwrap();

    first
        .transition(&decision.id, Status::Approved, "alice", None)
        .unwrap();
    let result = second.transition_from(&seen_by_second, Status::Rejected, "bob", None);

    assert!(matches!(result, Err(Error::Conflict { .. })));
    assert_eq!(second.get(&decision.id).unwrap().status, Status::Approved);
    assert_eq!(second.list_audit(&decision.id).unwrap().len(), 2);
}

#[test]
fn sub_microsecond_clock_returns_what_sqlite_stores() {
    struct NanoClock(DateTime<Utc>);
    impl ClockSource for NanoClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap() + Duration::nanoseconds(123_456_789);
    let service = DecisionService::with_clock(Database::open_in_memory().unwrap(), NanoClock(at));

    let created = service
        .create(
            NewDecision::new("Vendor contract renewal", DecisionType::Budget, Priority::High),
            "owner",
        )
        .unwrap();
    assert_eq!(created.created_at.timestamp_subsec_nanos(), 123_456_000);
    assert_eq!(service.get(&created.id).unwrap(), created);

    let approved = service
        .transition(&created.id, Status::Approved, "alice", None)
        .unwrap();
    assert_eq!(service.get(&created.id).unwrap(), approved);

    let edited = service
        .edit(
            &created.id,
            DecisionEdit {
                priority: Some(Priority::Low),
                ..Default::default()
            },
            "alice",
            None,
        )
        .unwrap();
    assert_eq!(service.get(&created.id).unwrap(), edited);
}

// =============================================================================
// Inputs and reads
// =============================================================================

#[test]
fn custom_notes_are_recorded_trimmed() {
    let (service, _) = service();
    let decision = vendor_contract(&service);
    service
        .transition(&decision.id, Status::Deferred, "alice", Some("  Wait for Q4 "))
        .unwrap();

    let trail = service.list_audit(&decision.id).unwrap();
    assert_eq!(trail[0].notes.as_deref(), Some("Wait for Q4"));
}

#[parameterized(
    empty = { "" },
    blank = { "   " },
)]
fn mutations_require_an_actor(actor: &str) {
    let (service, _) = service();
    let fields = NewDecision::new("Title", DecisionType::Budget, Priority::Low);
    assert_eq!(
        service.create(fields, actor).unwrap_err().kind(),
        ErrorKind::Validation
    );

    let decision = vendor_contract(&service);
    let err = service
        .transition(&decision.id, Status::Approved, actor, None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(service.get(&decision.id).unwrap(), decision);
}

#[test]
fn unknown_decision_is_not_found() {
    let (service, _) = service();
    for err in [
        service.get("dec-missing").unwrap_err(),
        service
            .transition("dec-missing", Status::Approved, "alice", None)
            .unwrap_err(),
        service.list_audit("dec-missing").unwrap_err(),
        service
            .edit(
                "dec-missing",
                DecisionEdit {
                    title: Some("x".into()),
                    ..Default::default()
                },
                "alice",
                None,
            )
            .unwrap_err(),
    ] {
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

#[test]
fn reads_are_idempotent() {
    let (service, _) = service();
    let decision = decision_in(&service, Status::InReview);
    assert_eq!(
        service.get(&decision.id).unwrap(),
        service.get(&decision.id).unwrap()
    );
    assert_eq!(
        service.list_audit(&decision.id).unwrap(),
        service.list_audit(&decision.id).unwrap()
    );
}

#[test]
fn audit_entries_never_change_across_reads() {
    let (service, clock) = service();
    let decision = vendor_contract(&service);
    let first_read = service.list_audit(&decision.id).unwrap();

    clock.advance(5);
    service
        .transition(&decision.id, Status::InReview, "alice", None)
        .unwrap();
    clock.advance(5);
    service
        .transition(&decision.id, Status::Approved, "bob", None)
        .unwrap();

    let later = service.list_audit(&decision.id).unwrap();
    assert_eq!(later.len(), 3);
    assert_eq!(later[2], first_read[0]);
    assert!(later.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert!(later.windows(2).all(|w| w[0].id > w[1].id));
}

#[test]
fn list_delegates_to_store_filter() {
    let (service, clock) = service();
    let first = vendor_contract(&service);
    clock.advance(1);
    let second = service
        .create(
            NewDecision::new("Hire designer", DecisionType::Resource, Priority::Low),
            "owner",
        )
        .unwrap();
    service
        .transition(&first.id, Status::Approved, "alice", None)
        .unwrap();

    let all = service.list(&ListFilter::default()).unwrap();
    assert_eq!(
        all.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
        vec![second.id.as_str(), first.id.as_str()]
    );

    let approved = service
        .list(&ListFilter::default().with_status(Status::Approved))
        .unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, first.id);
}

#[test]
fn prefix_is_used_for_new_ids() {
    let clock = ManualClock::new();
    let service = DecisionService::with_clock(MemoryStore::new(), clock).with_prefix("exec");
    let decision = service
        .create(
            NewDecision::new("Prefixed", DecisionType::Operational, Priority::Medium),
            "owner",
        )
        .unwrap();
    assert!(decision.id.starts_with("exec-"));
}

// =============================================================================
// Edits
// =============================================================================

#[test]
fn edit_records_an_edited_entry_and_keeps_status() {
    let (service, clock) = service();
    let decision = decision_in(&service, Status::InReview);
    clock.advance(30);

    let edited = service
        .edit(
            &decision.id,
            DecisionEdit {
                title: Some("  Vendor contract renewal (3y) ".into()),
                priority: Some(Priority::Critical),
                ..Default::default()
            },
            "alice",
            None,
        )
        .unwrap();

    assert_eq!(edited.title, "Vendor contract renewal (3y)");
    assert_eq!(edited.priority, Priority::Critical);
    assert_eq!(edited.status, Status::InReview);
    assert_eq!(edited.version, decision.version + 1);
    assert_eq!(edited.updated_at, clock.now());

    let trail = service.list_audit(&decision.id).unwrap();
    assert_eq!(trail[0].action, Action::Edited);
    assert_eq!(trail[0].previous_status, Some(Status::InReview));
    assert_eq!(trail[0].new_status, Some(Status::InReview));
    assert_eq!(trail[0].notes.as_deref(), Some("Edited title, priority"));
    assert_status_matches_trail(&service, &decision.id);
}

#[test]
fn edit_is_allowed_on_terminal_decisions() {
    let (service, _) = service();
    let decision = decision_in(&service, Status::Rejected);
    let edited = service
        .edit(
            &decision.id,
            DecisionEdit {
                impact: Some("None, contract lapses".into()),
                ..Default::default()
            },
            "alice",
            Some("Clarified impact"),
        )
        .unwrap();
    assert_eq!(edited.status, Status::Rejected);
    assert_eq!(
        service.list_audit(&decision.id).unwrap()[0].notes.as_deref(),
        Some("Clarified impact")
    );
    assert_status_matches_trail(&service, &decision.id);
}

#[parameterized(
    pending = { Status::Pending },
    in_review = { Status::InReview },
    deferred = { Status::Deferred },
    approved = { Status::Approved },
)]
fn most_recent_entry_after_edit_names_current_status(status: Status) {
    let (service, _) = service();
    let decision = decision_in(&service, status);
    service
        .edit(
            &decision.id,
            DecisionEdit {
                priority: Some(Priority::Low),
                ..Default::default()
            },
            "alice",
            None,
        )
        .unwrap();

    let latest = &service.list_audit(&decision.id).unwrap()[0];
    assert_eq!(latest.action, Action::Edited);
    assert_eq!(latest.new_status, Some(status));
    assert_eq!(service.get(&decision.id).unwrap().status, status);
}

#[test]
fn empty_edit_writes_nothing() {
    let (service, _) = service();
    let decision = vendor_contract(&service);
    let result = service.edit(&decision.id, DecisionEdit::default(), "alice", None);
    assert!(matches!(result, Err(Error::NothingToEdit)));
    assert_eq!(service.list_audit(&decision.id).unwrap().len(), 1);
}
