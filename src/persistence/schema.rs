//! `SQLite` schema bootstrap logic.
//!
//! All table definitions use `CREATE TABLE IF NOT EXISTS` — safe to
//! re-run on every startup. Produces a convergent result.

use sqlx::SqlitePool;

use crate::Result;

/// Apply all table definitions to the connected `SQLite` database.
///
/// Creates all four tables idempotently. Timestamps are RFC 3339 TEXT.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS task (
    id               TEXT PRIMARY KEY NOT NULL,
    title            TEXT NOT NULL,
    bucket           TEXT NOT NULL DEFAULT 'inbox' CHECK(bucket IN ('inbox','next','doing','done')),
    notes_md         TEXT,
    project          TEXT,
    estimate_minutes INTEGER,
    priority_hint    TEXT CHECK(priority_hint IN ('p1','p2','p3')),
    blocked_reason   TEXT,
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS task_event (
    id          TEXT PRIMARY KEY NOT NULL,
    task_id     TEXT NOT NULL,
    kind        TEXT NOT NULL CHECK(kind IN ('created','updated','moved','completed','blocked','unblocked')),
    payload     TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS checkin (
    id              TEXT PRIMARY KEY NOT NULL,
    summary         TEXT NOT NULL,
    doing_snapshot  TEXT,
    created_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS outbox (
    id            TEXT PRIMARY KEY NOT NULL,
    kind          TEXT NOT NULL CHECK(kind IN ('daily_checkin','weekly_review')),
    content       TEXT NOT NULL,
    created_at    TEXT NOT NULL,
    delivered_at  TEXT
);

CREATE INDEX IF NOT EXISTS idx_task_bucket ON task(bucket);
CREATE INDEX IF NOT EXISTS idx_task_event_task ON task_event(task_id);
CREATE INDEX IF NOT EXISTS idx_outbox_pending ON outbox(delivered_at);
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}
