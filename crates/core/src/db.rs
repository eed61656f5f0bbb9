// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed storage for decisions and their audit trail.
//!
//! Every write runs inside a `BEGIN IMMEDIATE` transaction, so a decision row
//! and its audit entry commit together or not at all. Updates additionally
//! carry a `WHERE version = ?` guard: two connections that read the same
//! version cannot both commit.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::path::Path;
use tracing::{debug, warn};

use crate::decision::{AuditEntry, Decision};
use crate::error::{Error, Result};
use crate::store::{DecisionStore, ListFilter};

/// SQL schema for the decision log database.
pub const SCHEMA: &str = r#"
-- Decision records; version is the optimistic-concurrency token
CREATE TABLE IF NOT EXISTS decisions (
    id TEXT PRIMARY KEY,
    owner TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    rationale TEXT,
    impact TEXT,
    decision_type TEXT NOT NULL,
    priority TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    project_name TEXT,
    amount REAL,
    due_date TEXT,
    decided_at TEXT,
    decided_by TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    version INTEGER NOT NULL DEFAULT 1
);

-- Audit trail, append-only
CREATE TABLE IF NOT EXISTS audit_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    decision_id TEXT NOT NULL,
    actor TEXT NOT NULL,
    action TEXT NOT NULL,
    previous_status TEXT,
    new_status TEXT,
    notes TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (decision_id) REFERENCES decisions(id)
);

CREATE TRIGGER IF NOT EXISTS audit_entries_no_update
BEFORE UPDATE ON audit_entries
BEGIN
    SELECT RAISE(ABORT, 'audit entries are append-only');
END;

CREATE TRIGGER IF NOT EXISTS audit_entries_no_delete
BEFORE DELETE ON audit_entries
BEGIN
    SELECT RAISE(ABORT, 'audit entries are append-only');
END;

-- Indexes
CREATE INDEX IF NOT EXISTS idx_decisions_status ON decisions(status);
CREATE INDEX IF NOT EXISTS idx_decisions_created ON decisions(created_at);
CREATE INDEX IF NOT EXISTS idx_audit_decision ON audit_entries(decision_id);
"#;

const DECISION_COLUMNS: &str = "id, owner, title, description, rationale, impact, decision_type,
     priority, status, project_name, amount, due_date, decided_at, decided_by,
     created_at, updated_at, version";

const AUDIT_COLUMNS: &str =
    "id, decision_id, actor, action, previous_status, new_status, notes, created_at";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a timestamp for storage.
///
/// Fixed precision and a `Z` suffix keep the text lexicographically ordered.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_error(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value
        .parse()
        .map_err(|_| conversion_error(format!("invalid value '{value}' in column '{column}'")))
}

fn parse_db_opt<T: std::str::FromStr>(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<T>, rusqlite::Error> {
    value.map(|v| parse_db(&v, column)).transpose()
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(format!("invalid timestamp '{value}' in column '{column}'")))
}

fn parse_timestamp_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<DateTime<Utc>>, rusqlite::Error> {
    value.map(|v| parse_timestamp(&v, column)).transpose()
}

fn parse_date_opt(value: Option<String>) -> std::result::Result<Option<NaiveDate>, rusqlite::Error> {
    value
        .map(|v| {
            NaiveDate::parse_from_str(&v, DATE_FORMAT)
                .map_err(|_| conversion_error(format!("invalid date '{v}' in column 'due_date'")))
        })
        .transpose()
}

fn row_to_decision(row: &Row<'_>) -> std::result::Result<Decision, rusqlite::Error> {
    let type_str: String = row.get(6)?;
    let priority_str: String = row.get(7)?;
    let status_str: String = row.get(8)?;
    let created_str: String = row.get(14)?;
    let updated_str: String = row.get(15)?;

    Ok(Decision {
        id: row.get(0)?,
        owner: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        rationale: row.get(4)?,
        impact: row.get(5)?,
        decision_type: parse_db(&type_str, "decision_type")?,
        priority: parse_db(&priority_str, "priority")?,
        status: parse_db(&status_str, "status")?,
        project_name: row.get(9)?,
        amount: row.get(10)?,
        due_date: parse_date_opt(row.get(11)?)?,
        decided_at: parse_timestamp_opt(row.get(12)?, "decided_at")?,
        decided_by: row.get(13)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
        version: row.get(16)?,
    })
}

fn row_to_entry(row: &Row<'_>) -> std::result::Result<AuditEntry, rusqlite::Error> {
    let action_str: String = row.get(3)?;
    let created_str: String = row.get(7)?;
    Ok(AuditEntry {
        id: row.get(0)?,
        decision_id: row.get(1)?,
        actor: row.get(2)?,
        action: parse_db(&action_str, "action")?,
        previous_status: parse_db_opt(row.get(4)?, "previous_status")?,
        new_status: parse_db_opt(row.get(5)?, "new_status")?,
        notes: row.get(6)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
    })
}

/// Maps a primary-key violation on insert to [`Error::DuplicateId`].
fn insert_error(err: rusqlite::Error, id: &str) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            Error::DuplicateId(id.to_string())
        }
        _ => Error::Database(err),
    }
}

fn query_decision(conn: &Connection, id: &str) -> Result<Option<Decision>> {
    let sql = format!("SELECT {DECISION_COLUMNS} FROM decisions WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], row_to_decision).optional()?)
}

fn query_entries(conn: &Connection, decision_id: &str) -> Result<Vec<AuditEntry>> {
    let sql = format!(
        "SELECT {AUDIT_COLUMNS} FROM audit_entries WHERE decision_id = ?1 ORDER BY id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let entries = stmt
        .query_map(params![decision_id], row_to_entry)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(entries)
}

/// The error for a guarded write that matched no row, built from the version
/// actually stored.
fn stale_version(conn: &Connection, id: &str, expected: i64) -> Result<Error> {
    let actual: Option<i64> = conn
        .query_row(
            "SELECT version FROM decisions WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(match actual {
        Some(actual) => Error::Conflict {
            id: id.to_string(),
            expected,
            actual,
        },
        None => Error::DecisionNotFound(id.to_string()),
    })
}

/// Insert an audit entry, clamping its timestamp so the decision's history
/// never goes backwards. Returns the assigned ID.
fn append_entry(conn: &Connection, entry: &AuditEntry) -> Result<i64> {
    let latest: Option<String> = conn.query_row(
        "SELECT MAX(created_at) FROM audit_entries WHERE decision_id = ?1",
        params![entry.decision_id],
        |row| row.get(0),
    )?;
    let latest = parse_timestamp_opt(latest, "created_at")?;
    let created_at = match latest {
        Some(latest) if latest > entry.created_at => latest,
        _ => entry.created_at,
    };

    conn.execute(
        "INSERT INTO audit_entries (decision_id, actor, action, previous_status,
         new_status, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entry.decision_id,
            entry.actor,
            entry.action.as_str(),
            entry.previous_status.map(|s| s.as_str()),
            entry.new_status.map(|s| s.as_str()),
            entry.notes,
            format_timestamp(&created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Run schema creation on a database connection.
///
/// The schema is idempotent, so this is safe to run on every open.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// SQLite database connection with decision log operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // WAL lets readers proceed while a writer holds the lock
        conn.execute_batch(
            "PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        debug!(path = %path.display(), "opened decision database");
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    fn begin(&self) -> Result<Transaction<'_>> {
        Ok(Transaction::new_unchecked(
            &self.conn,
            TransactionBehavior::Immediate,
        )?)
    }
}

impl DecisionStore for Database {
    fn insert_decision(&self, decision: &Decision, entry: &AuditEntry) -> Result<()> {
        let tx = self.begin()?;
        tx.execute(
            "INSERT INTO decisions (id, owner, title, description, rationale, impact,
             decision_type, priority, status, project_name, amount, due_date,
             decided_at, decided_by, created_at, updated_at, version)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            params![
                decision.id,
                decision.owner,
                decision.title,
                decision.description,
                decision.rationale,
                decision.impact,
                decision.decision_type.as_str(),
                decision.priority.as_str(),
                decision.status.as_str(),
                decision.project_name,
                decision.amount,
                decision.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
                decision.decided_at.as_ref().map(format_timestamp),
                decision.decided_by,
                format_timestamp(&decision.created_at),
                format_timestamp(&decision.updated_at),
                decision.version,
            ],
        )
        .map_err(|e| insert_error(e, &decision.id))?;
        append_entry(&tx, entry)?;
        tx.commit()?;
        Ok(())
    }

    fn get_decision(&self, id: &str) -> Result<Decision> {
        query_decision(&self.conn, id)?.ok_or_else(|| Error::DecisionNotFound(id.to_string()))
    }

    fn decision_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM decisions WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn list_decisions(&self, filter: &ListFilter) -> Result<Vec<Decision>> {
        let mut sql = format!("SELECT {DECISION_COLUMNS} FROM decisions");
        let mut params_vec: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            sql.push_str(" WHERE status = ?");
            params_vec.push(status.as_str().to_string());
        }
        sql.push_str(" ORDER BY created_at DESC, rowid DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();

        let mut decisions = stmt
            .query_map(params_refs.as_slice(), row_to_decision)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        // SQLite's lower() only folds ASCII, so text matching happens here
        if filter.needle().is_some() {
            decisions.retain(|d| filter.matches(d));
        }
        Ok(decisions)
    }

    fn atomic_update<F>(
        &self,
        id: &str,
        expected_version: i64,
        mutate: F,
        mut entry: AuditEntry,
    ) -> Result<Decision>
    where
        F: FnOnce(&mut Decision),
    {
        let tx = self.begin()?;

        let current =
            query_decision(&tx, id)?.ok_or_else(|| Error::DecisionNotFound(id.to_string()))?;
        if current.version != expected_version {
            warn!(
                decision = id,
                expected = expected_version,
                actual = current.version,
                "rejected stale update"
            );
            return Err(Error::Conflict {
                id: id.to_string(),
                expected: expected_version,
                actual: current.version,
            });
        }

        let mut updated = current.clone();
        mutate(&mut updated);
        // Identity and provenance are not the mutation's to change
        updated.id = current.id;
        updated.owner = current.owner;
        updated.created_at = current.created_at;
        updated.version = expected_version + 1;

        let affected = tx.execute(
            "UPDATE decisions SET title = ?1, description = ?2, rationale = ?3,
             impact = ?4, decision_type = ?5, priority = ?6, status = ?7,
             project_name = ?8, amount = ?9, due_date = ?10, decided_at = ?11,
             decided_by = ?12, updated_at = ?13, version = ?14
             WHERE id = ?15 AND version = ?16",
            params![
                updated.title,
                updated.description,
                updated.rationale,
                updated.impact,
                updated.decision_type.as_str(),
                updated.priority.as_str(),
                updated.status.as_str(),
                updated.project_name,
                updated.amount,
                updated.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
                updated.decided_at.as_ref().map(format_timestamp),
                updated.decided_by,
                format_timestamp(&updated.updated_at),
                updated.version,
                id,
                expected_version,
            ],
        )?;
        if affected == 0 {
            return Err(stale_version(&tx, id, expected_version)?);
        }

        entry.decision_id = id.to_string();
        append_entry(&tx, &entry)?;
        tx.commit()?;

        debug!(decision = id, version = updated.version, "committed update");
        Ok(updated)
    }

    fn list_audit_entries(&self, decision_id: &str) -> Result<Vec<AuditEntry>> {
        query_entries(&self.conn, decision_id)
    }

    fn get_decision_with_audit(&self, id: &str) -> Result<(Decision, Vec<AuditEntry>)> {
        // Both reads see the same snapshot
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Deferred)?;
        let decision =
            query_decision(&tx, id)?.ok_or_else(|| Error::DecisionNotFound(id.to_string()))?;
        let entries = query_entries(&tx, id)?;
        tx.commit()?;
        Ok((decision, entries))
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
