//! Task repository — sole mutation/query gateway for tasks and their
//! audit trail.
//!
//! Every mutating operation checks the injected mutation gate first,
//! bumps `updated_at`, and appends one `task_event` row. Store errors
//! propagate unmodified; retries are the caller's concern.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, Utc};
use sqlx::QueryBuilder;

use crate::config::GlobalConfig;
use crate::models::event::{TaskEvent, TaskEventKind};
use crate::models::task::{Bucket, BucketCounts, NewTask, Priority, Task, TaskFilter, TaskPatch};
use crate::report::render::week_start;
use crate::{AppError, Result};

use super::db::Database;

/// Maximum tasks in the today plan.
const TODAY_PLAN_CAP: usize = 7;

/// Maximum next-bucket tasks contributed to the today plan.
const TODAY_PLAN_NEXT_CAP: i64 = 5;

/// Cap on the completed-this-week listing.
const COMPLETED_WEEK_CAP: i64 = 20;

/// Repository wrapper around `SQLite` for task records.
#[derive(Clone)]
pub struct TaskRepo {
    db: Arc<Database>,
    config: Arc<GlobalConfig>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    title: String,
    bucket: String,
    notes_md: Option<String>,
    project: Option<String>,
    estimate_minutes: Option<i64>,
    priority_hint: Option<String>,
    blocked_reason: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TaskRow {
    /// Convert a database row into the domain model.
    fn into_task(self) -> Result<Task> {
        let bucket = Bucket::parse(&self.bucket)
            .ok_or_else(|| AppError::Db(format!("invalid bucket: {}", self.bucket)))?;
        let priority_hint = self
            .priority_hint
            .as_deref()
            .map(|s| {
                Priority::parse(s)
                    .ok_or_else(|| AppError::Db(format!("invalid priority_hint: {s}")))
            })
            .transpose()?;
        let created_at = parse_timestamp(&self.created_at, "created_at")?;
        let updated_at = parse_timestamp(&self.updated_at, "updated_at")?;

        Ok(Task {
            id: self.id,
            title: self.title,
            bucket,
            notes_md: self.notes_md,
            project: self.project,
            estimate_minutes: self.estimate_minutes,
            priority_hint,
            blocked_reason: self.blocked_reason,
            created_at,
            updated_at,
        })
    }
}

/// Internal row struct for `task_event` deserialization.
#[derive(sqlx::FromRow)]
struct EventRow {
    id: String,
    task_id: String,
    kind: String,
    payload: Option<String>,
    created_at: String,
}

impl EventRow {
    /// Convert a database row into the domain model.
    fn into_event(self) -> Result<TaskEvent> {
        let kind = TaskEventKind::parse(&self.kind)
            .ok_or_else(|| AppError::Db(format!("invalid event kind: {}", self.kind)))?;
        let created_at = parse_timestamp(&self.created_at, "created_at")?;

        Ok(TaskEvent {
            id: self.id,
            task_id: self.task_id,
            kind,
            payload: self.payload,
            created_at,
        })
    }
}

fn parse_timestamp(s: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| AppError::Db(format!("invalid {field}: {err}")))
}

fn serialize_payload<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|err| AppError::Db(format!("failed to serialize event payload: {err}")))
}

impl TaskRepo {
    /// Create a new repository instance bound to the shared pool and
    /// configuration.
    #[must_use]
    pub fn new(db: Arc<Database>, config: Arc<GlobalConfig>) -> Self {
        Self { db, config }
    }

    /// Fail fast when the mutation gate is off. No rows are touched.
    fn ensure_mutations_allowed(&self) -> Result<()> {
        if self.config.allow_mutations {
            Ok(())
        } else {
            Err(AppError::MutationsDisabled)
        }
    }

    /// Append one audit row. Called synchronously after each successful
    /// task mutation.
    async fn append_event(
        &self,
        task_id: &str,
        kind: TaskEventKind,
        payload: Option<String>,
    ) -> Result<()> {
        let event = TaskEvent::new(task_id.to_owned(), kind, payload);

        sqlx::query(
            "INSERT INTO task_event (id, task_id, kind, payload, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&event.id)
        .bind(&event.task_id)
        .bind(event.kind.as_str())
        .bind(&event.payload)
        .bind(event.created_at.to_rfc3339())
        .execute(self.db.as_ref())
        .await?;

        Ok(())
    }

    /// Fetch a task by id, treating absence as a hard error.
    async fn get_required(&self, id: &str) -> Result<Task> {
        self.get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("task {id} not found")))
    }

    /// Create a new task. Bucket defaults to inbox.
    ///
    /// Appends a `created` event carrying the raw input as payload.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MutationsDisabled` when the gate is off,
    /// `AppError::Validation` for an empty title, or `AppError::Db` on
    /// storage failure.
    pub async fn create(&self, input: NewTask) -> Result<Task> {
        self.ensure_mutations_allowed()?;

        if input.title.trim().is_empty() {
            return Err(AppError::Validation("task title must not be empty".into()));
        }

        let payload = serialize_payload(&input)?;
        let task = Task::new(input);

        sqlx::query(
            "INSERT INTO task (id, title, bucket, notes_md, project, estimate_minutes,
             priority_hint, blocked_reason, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(task.bucket.as_str())
        .bind(&task.notes_md)
        .bind(&task.project)
        .bind(task.estimate_minutes)
        .bind(task.priority_hint.map(Priority::as_str))
        .bind(&task.blocked_reason)
        .bind(task.created_at.to_rfc3339())
        .bind(task.updated_at.to_rfc3339())
        .execute(self.db.as_ref())
        .await?;

        self.append_event(&task.id, TaskEventKind::Created, Some(payload))
            .await?;

        Ok(task)
    }

    /// Apply a partial update. Absent fields are left untouched;
    /// `updated_at` is always bumped.
    ///
    /// Appends an `updated` event carrying the patch as payload.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when `id` has no matching row,
    /// `AppError::MutationsDisabled` when the gate is off, or
    /// `AppError::Db` on storage failure.
    pub async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        self.ensure_mutations_allowed()?;

        let payload = serialize_payload(&patch)?;
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE task SET
                 title = COALESCE(?1, title),
                 notes_md = COALESCE(?2, notes_md),
                 project = COALESCE(?3, project),
                 estimate_minutes = COALESCE(?4, estimate_minutes),
                 priority_hint = COALESCE(?5, priority_hint),
                 updated_at = ?6
             WHERE id = ?7",
        )
        .bind(&patch.title)
        .bind(&patch.notes_md)
        .bind(&patch.project)
        .bind(patch.estimate_minutes)
        .bind(patch.priority_hint.map(Priority::as_str))
        .bind(&now)
        .bind(id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("task {id} not found")));
        }

        self.append_event(id, TaskEventKind::Updated, Some(payload))
            .await?;

        self.get_required(id).await
    }

    /// Move a task to another bucket. Does not clear the blocked reason.
    ///
    /// Appends a `moved` event with the target bucket as payload.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when `id` has no matching row,
    /// `AppError::MutationsDisabled` when the gate is off, or
    /// `AppError::Db` on storage failure.
    pub async fn move_to(&self, id: &str, bucket: Bucket) -> Result<Task> {
        self.ensure_mutations_allowed()?;

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query("UPDATE task SET bucket = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(bucket.as_str())
            .bind(&now)
            .bind(id)
            .execute(self.db.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("task {id} not found")));
        }

        let payload = serialize_payload(&serde_json::json!({ "bucket": bucket.as_str() }))?;
        self.append_event(id, TaskEventKind::Moved, Some(payload))
            .await?;

        self.get_required(id).await
    }

    /// Mark a task done, clearing any blocked reason.
    ///
    /// Appends a `completed` event with no payload.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when `id` has no matching row,
    /// `AppError::MutationsDisabled` when the gate is off, or
    /// `AppError::Db` on storage failure.
    pub async fn complete(&self, id: &str) -> Result<Task> {
        self.ensure_mutations_allowed()?;

        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE task SET bucket = 'done', blocked_reason = NULL, updated_at = ?1
             WHERE id = ?2",
        )
        .bind(&now)
        .bind(id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("task {id} not found")));
        }

        self.append_event(id, TaskEventKind::Completed, None).await?;

        self.get_required(id).await
    }

    /// Block a task with a reason.
    ///
    /// Appends a `blocked` event carrying the reason.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an empty reason,
    /// `AppError::NotFound` when `id` has no matching row,
    /// `AppError::MutationsDisabled` when the gate is off, or
    /// `AppError::Db` on storage failure.
    pub async fn block(&self, id: &str, reason: &str) -> Result<Task> {
        self.ensure_mutations_allowed()?;

        if reason.trim().is_empty() {
            return Err(AppError::Validation("block reason must not be empty".into()));
        }

        let now = Utc::now().to_rfc3339();
        let result =
            sqlx::query("UPDATE task SET blocked_reason = ?1, updated_at = ?2 WHERE id = ?3")
                .bind(reason)
                .bind(&now)
                .bind(id)
                .execute(self.db.as_ref())
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("task {id} not found")));
        }

        let payload = serialize_payload(&serde_json::json!({ "reason": reason }))?;
        self.append_event(id, TaskEventKind::Blocked, Some(payload))
            .await?;

        self.get_required(id).await
    }

    /// Clear a task's blocked reason. Idempotent — unblocking an
    /// already-unblocked task succeeds.
    ///
    /// Appends an `unblocked` event.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when `id` has no matching row,
    /// `AppError::MutationsDisabled` when the gate is off, or
    /// `AppError::Db` on storage failure.
    pub async fn unblock(&self, id: &str) -> Result<Task> {
        self.ensure_mutations_allowed()?;

        let now = Utc::now().to_rfc3339();
        let result =
            sqlx::query("UPDATE task SET blocked_reason = NULL, updated_at = ?1 WHERE id = ?2")
                .bind(&now)
                .bind(id)
                .execute(self.db.as_ref())
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("task {id} not found")));
        }

        self.append_event(id, TaskEventKind::Unblocked, None).await?;

        self.get_required(id).await
    }

    /// Retrieve a task by identifier.
    ///
    /// Returns `Ok(None)` if the task does not exist — absence is a
    /// normal outcome for lookups, unlike mutations.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn get(&self, id: &str) -> Result<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as("SELECT * FROM task WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await?;

        row.map(TaskRow::into_task).transpose()
    }

    /// List tasks matching a filter.
    ///
    /// Ordered by priority ascending with unprioritized tasks last, then
    /// creation time descending. Blocked tasks are excluded unless
    /// `include_blocked` is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut query = QueryBuilder::new("SELECT * FROM task WHERE 1 = 1");

        if let Some(bucket) = filter.bucket {
            query.push(" AND bucket = ").push_bind(bucket.as_str());
        }
        if let Some(ref project) = filter.project {
            query.push(" AND project = ").push_bind(project);
        }
        if !filter.include_blocked {
            query.push(" AND blocked_reason IS NULL");
        }

        query.push(" ORDER BY priority_hint IS NULL, priority_hint ASC, created_at DESC");

        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(limit);
        }

        let rows: Vec<TaskRow> = query
            .build_query_as()
            .fetch_all(self.db.as_ref())
            .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// Assemble the today plan: all doing tasks plus the first five next
    /// tasks, truncated to seven entries with doing tasks kept first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if a query fails.
    pub async fn today_plan(&self) -> Result<Vec<Task>> {
        let doing = self.list(&TaskFilter::bucket(Bucket::Doing)).await?;
        let next = self
            .list(&TaskFilter {
                bucket: Some(Bucket::Next),
                limit: Some(TODAY_PLAN_NEXT_CAP),
                ..TaskFilter::default()
            })
            .await?;

        Ok(doing
            .into_iter()
            .chain(next)
            .take(TODAY_PLAN_CAP)
            .collect())
    }

    /// List unblocked tasks in inbox/next/doing whose `updated_at` is
    /// older than `threshold_days`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn stale(&self, threshold_days: i64) -> Result<Vec<Task>> {
        let cutoff = (Utc::now() - Duration::days(threshold_days)).to_rfc3339();

        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT * FROM task
             WHERE bucket IN ('inbox', 'next', 'doing')
               AND blocked_reason IS NULL
               AND updated_at < ?1
             ORDER BY updated_at ASC",
        )
        .bind(&cutoff)
        .fetch_all(self.db.as_ref())
        .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    /// Full event history for a task, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn events(&self, task_id: &str) -> Result<Vec<TaskEvent>> {
        let rows: Vec<EventRow> = sqlx::query_as(
            "SELECT * FROM task_event WHERE task_id = ?1 ORDER BY created_at DESC",
        )
        .bind(task_id)
        .fetch_all(self.db.as_ref())
        .await?;

        rows.into_iter().map(EventRow::into_event).collect()
    }

    /// Count tasks per bucket, zero-defaulting buckets with no rows.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn counts(&self) -> Result<BucketCounts> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT bucket, COUNT(*) FROM task GROUP BY bucket")
                .fetch_all(self.db.as_ref())
                .await?;

        let mut counts = BucketCounts::default();
        for (bucket, count) in rows {
            match Bucket::parse(&bucket) {
                Some(Bucket::Inbox) => counts.inbox = count,
                Some(Bucket::Next) => counts.next = count,
                Some(Bucket::Doing) => counts.doing = count,
                Some(Bucket::Done) => counts.done = count,
                None => return Err(AppError::Db(format!("invalid bucket: {bucket}"))),
            }
        }

        Ok(counts)
    }

    /// Done tasks updated at or after the most recent local Monday
    /// 00:00:00, newest first, capped at twenty.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn completed_this_week(&self) -> Result<Vec<Task>> {
        let start = week_start(Local::now()).with_timezone(&Utc).to_rfc3339();

        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT * FROM task
             WHERE bucket = 'done' AND updated_at >= ?1
             ORDER BY updated_at DESC
             LIMIT ?2",
        )
        .bind(&start)
        .bind(COMPLETED_WEEK_CAP)
        .fetch_all(self.db.as_ref())
        .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }
}
